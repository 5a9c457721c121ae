/// Built-in demo shapes
use nalgebra::Point3;

use crate::geometry::{Face, Shape};

/// The 8-vertex rainbow cube: one color per corner, six quad faces.
/// Expands to 36 triangle vertices.
pub fn cube() -> (Shape, Vec<Face>) {
    let positions = vec![
        Point3::new(-0.5, 0.5, 0.5),   // front top left
        Point3::new(-0.5, -0.5, 0.5),  // front bottom left
        Point3::new(0.5, -0.5, 0.5),   // front bottom right
        Point3::new(0.5, 0.5, 0.5),    // front top right
        Point3::new(-0.5, 0.5, -0.5),  // back top left
        Point3::new(-0.5, -0.5, -0.5), // back bottom left
        Point3::new(0.5, -0.5, -0.5),  // back bottom right
        Point3::new(0.5, 0.5, -0.5),   // back top right
    ];

    let colors = vec![
        [0.0, 0.0, 0.0, 1.0], // black
        [1.0, 0.0, 0.0, 1.0], // red
        [1.0, 1.0, 0.0, 1.0], // yellow
        [0.0, 1.0, 0.0, 1.0], // green
        [0.0, 0.0, 1.0, 1.0], // blue
        [1.0, 0.0, 1.0, 1.0], // magenta
        [0.0, 1.0, 1.0, 1.0], // cyan
        [1.0, 1.0, 1.0, 1.0], // white
    ];

    let faces = vec![
        Face::Quad([0, 3, 2, 1]), // front
        Face::Quad([4, 7, 3, 0]), // top
        Face::Quad([4, 0, 1, 5]), // left
        Face::Quad([7, 3, 2, 6]), // right
        Face::Quad([5, 6, 2, 1]), // bottom
        Face::Quad([4, 7, 6, 5]), // back
    ];

    (Shape::from_parts(positions, colors), faces)
}

/// The 5-vertex earth-toned pyramid: apex plus square base, four side
/// triangles and two base triangles. Expands to 18 triangle vertices.
pub fn pyramid() -> (Shape, Vec<Face>) {
    let positions = vec![
        Point3::new(0.0, 0.5, 0.0),    // apex
        Point3::new(-0.5, -0.5, 0.5),  // base front left
        Point3::new(0.5, -0.5, 0.5),   // base front right
        Point3::new(0.5, -0.5, -0.5),  // base back right
        Point3::new(-0.5, -0.5, -0.5), // base back left
    ];

    let colors = vec![
        [0.36, 0.20, 0.09, 1.0],
        [0.62, 0.32, 0.17, 1.0],
        [0.44, 0.26, 0.08, 1.0],
        [0.62, 0.32, 0.17, 1.0],
        [0.55, 0.27, 0.07, 1.0],
    ];

    let faces = vec![
        Face::Triangle([0, 1, 2]), // front side
        Face::Triangle([0, 2, 3]), // right side
        Face::Triangle([0, 3, 4]), // back side
        Face::Triangle([0, 4, 1]), // left side
        Face::Triangle([1, 2, 3]), // base front-right
        Face::Triangle([1, 3, 4]), // base back-left
    ];

    (Shape::from_parts(positions, colors), faces)
}
