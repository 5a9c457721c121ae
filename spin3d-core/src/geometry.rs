/// Shape descriptions and mesh expansion
use log::debug;
use nalgebra::Point3;

use crate::error::ConfigError;

/// RGBA color, components in [0, 1].
pub type Color = [f32; 4];

/// A compact shape description: unique vertex positions with a parallel
/// list of per-vertex colors.
#[derive(Debug, Clone)]
pub struct Shape {
    positions: Vec<Point3<f32>>,
    colors: Vec<Color>,
}

impl Shape {
    pub fn new(positions: Vec<Point3<f32>>, colors: Vec<Color>) -> Result<Self, ConfigError> {
        if positions.len() != colors.len() {
            return Err(ConfigError::ColorCountMismatch {
                positions: positions.len(),
                colors: colors.len(),
            });
        }
        Ok(Self { positions, colors })
    }

    /// Build a shape from RGB colors, defaulting alpha to 1.0.
    pub fn from_rgb(positions: Vec<Point3<f32>>, rgb: Vec<[f32; 3]>) -> Result<Self, ConfigError> {
        let colors = rgb.iter().map(|c| [c[0], c[1], c[2], 1.0]).collect();
        Self::new(positions, colors)
    }

    /// Construct from data known to be consistent at authoring time.
    pub(crate) fn from_parts(positions: Vec<Point3<f32>>, colors: Vec<Color>) -> Self {
        debug_assert_eq!(positions.len(), colors.len());
        Self { positions, colors }
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn position(&self, index: usize) -> Point3<f32> {
        self.positions[index]
    }

    pub fn color(&self, index: usize) -> Color {
        self.colors[index]
    }

    fn resolve(&self, index: usize) -> MeshVertex {
        MeshVertex {
            position: self.positions[index],
            color: self.colors[index],
        }
    }
}

/// A face selecting shape vertices by index. Quads are split into two
/// triangles along the fixed diagonal (a, c).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Face {
    Triangle([usize; 3]),
    Quad([usize; 4]),
}

impl Face {
    pub fn indices(&self) -> &[usize] {
        match self {
            Face::Triangle(idx) => idx,
            Face::Quad(idx) => idx,
        }
    }

    /// Number of triangle vertices this face contributes when expanded.
    pub fn expanded_len(&self) -> usize {
        match self {
            Face::Triangle(_) => 3,
            Face::Quad(_) => 6,
        }
    }
}

/// A single expanded triangle vertex with resolved position and color.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeshVertex {
    pub position: Point3<f32>,
    pub color: Color,
}

/// Flat, non-indexed triangle-vertex stream ready for upload.
///
/// Expansion preserves face order and in-triangle vertex order; downstream
/// draw calls consume the buffer by linear offset. Shared edges duplicate
/// their endpoint vertices; no de-duplication is performed.
#[derive(Debug, Clone)]
pub struct ExpandedMesh {
    vertices: Vec<MeshVertex>,
}

impl ExpandedMesh {
    /// Resolve every face against the shape, in face-list order.
    ///
    /// Fails with `ConfigError::IndexOutOfRange` on the first bad index;
    /// no partial mesh is produced.
    pub fn expand(shape: &Shape, faces: &[Face]) -> Result<Self, ConfigError> {
        // Validate every index up front so expansion itself cannot fail.
        for (face_no, face) in faces.iter().enumerate() {
            for &index in face.indices() {
                if index >= shape.len() {
                    return Err(ConfigError::IndexOutOfRange {
                        face: face_no,
                        index,
                        len: shape.len(),
                    });
                }
            }
        }

        let total: usize = faces.iter().map(Face::expanded_len).sum();
        let mut vertices = Vec::with_capacity(total);

        for face in faces {
            match *face {
                Face::Triangle([a, b, c]) => {
                    for index in [a, b, c] {
                        vertices.push(shape.resolve(index));
                    }
                }
                Face::Quad([a, b, c, d]) => {
                    for index in [a, b, c, a, c, d] {
                        vertices.push(shape.resolve(index));
                    }
                }
            }
        }

        debug!(
            "expanded {} faces into {} triangle vertices",
            faces.len(),
            vertices.len()
        );

        Ok(Self { vertices })
    }

    pub fn vertices(&self) -> &[MeshVertex] {
        &self.vertices
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.vertices.len() / 3
    }

    /// Flattened position components (x, y, z per vertex) for buffer upload.
    pub fn position_data(&self) -> Vec<f32> {
        self.vertices
            .iter()
            .flat_map(|v| [v.position.x, v.position.y, v.position.z])
            .collect()
    }

    /// Flattened color components (r, g, b, a per vertex) for buffer upload.
    pub fn color_data(&self) -> Vec<f32> {
        self.vertices.iter().flat_map(|v| v.color).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models;

    fn unit_quad_shape() -> Shape {
        Shape::new(
            vec![
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(1.0, 0.0, 0.0),
                Point3::new(1.0, 1.0, 0.0),
                Point3::new(0.0, 1.0, 0.0),
            ],
            vec![
                [1.0, 0.0, 0.0, 1.0],
                [0.0, 1.0, 0.0, 1.0],
                [0.0, 0.0, 1.0, 1.0],
                [1.0, 1.0, 1.0, 1.0],
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_quad_splits_along_fixed_diagonal() {
        let shape = unit_quad_shape();
        let mesh = ExpandedMesh::expand(&shape, &[Face::Quad([0, 1, 2, 3])]).unwrap();

        assert_eq!(mesh.vertex_count(), 6);
        assert_eq!(mesh.triangle_count(), 2);

        // Triangles (a, b, c) and (a, c, d).
        let expected = [0, 1, 2, 0, 2, 3];
        for (vertex, &index) in mesh.vertices().iter().zip(expected.iter()) {
            assert_eq!(vertex.position, shape.position(index));
            assert_eq!(vertex.color, shape.color(index));
        }
    }

    #[test]
    fn test_triangle_face_passes_through() {
        let shape = unit_quad_shape();
        let mesh = ExpandedMesh::expand(&shape, &[Face::Triangle([2, 1, 0])]).unwrap();

        assert_eq!(mesh.vertex_count(), 3);
        // Winding preserved from the face definition.
        assert_eq!(mesh.vertices()[0].position, shape.position(2));
        assert_eq!(mesh.vertices()[2].position, shape.position(0));
    }

    #[test]
    fn test_out_of_range_index_fails_fast() {
        let shape = unit_quad_shape();
        let faces = [Face::Triangle([0, 1, 2]), Face::Quad([0, 1, 2, 99])];

        let err = ExpandedMesh::expand(&shape, &faces).unwrap_err();
        assert_eq!(
            err,
            ConfigError::IndexOutOfRange {
                face: 1,
                index: 99,
                len: 4
            }
        );
    }

    #[test]
    fn test_color_count_mismatch() {
        let err = Shape::new(
            vec![Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 0.0, 0.0)],
            vec![[1.0, 0.0, 0.0, 1.0]],
        )
        .unwrap_err();
        assert_eq!(
            err,
            ConfigError::ColorCountMismatch {
                positions: 2,
                colors: 1
            }
        );
    }

    #[test]
    fn test_rgb_defaults_alpha() {
        let shape =
            Shape::from_rgb(vec![Point3::new(0.0, 0.0, 0.0)], vec![[0.5, 0.25, 0.125]]).unwrap();
        assert_eq!(shape.color(0), [0.5, 0.25, 0.125, 1.0]);
    }

    #[test]
    fn test_cube_expands_to_36_vertices() {
        let (shape, faces) = models::cube();
        let mesh = ExpandedMesh::expand(&shape, &faces).unwrap();
        assert_eq!(mesh.vertex_count(), 36);
        assert_eq!(mesh.triangle_count(), 12);
        assert_eq!(mesh.position_data().len(), 36 * 3);
        assert_eq!(mesh.color_data().len(), 36 * 4);
    }

    #[test]
    fn test_pyramid_expands_to_18_vertices() {
        let (shape, faces) = models::pyramid();
        let mesh = ExpandedMesh::expand(&shape, &faces).unwrap();
        assert_eq!(mesh.vertex_count(), 18);
        assert_eq!(mesh.triangle_count(), 6);
    }
}
