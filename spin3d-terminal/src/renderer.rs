/// ASCII rasterizer backend for the rendering pipeline
use std::collections::HashMap;
use std::io::Write;

use crossterm::{
    style::{Color, Print, ResetColor, SetForegroundColor},
    QueueableCommand,
};
use log::debug;
use nalgebra::Matrix4;
use spin3d_core::{
    project_to_screen, ContextError, ExpandedMesh, GraphicsContext, MeshVertex, Primitive,
    Transform, UniformValue,
};

/// Character luminosity ramp (darkest to lightest)
const LUMINOSITY_RAMP: &[char] = &[' ', '.', ':', '-', '=', '+', '*', '#', '%', '@'];

/// Terminal backend implementing the graphics-context collaborator.
///
/// The uploaded triangle stream is rasterized into char/color/depth
/// buffers on each draw call, using whichever transform uniforms the
/// active policy pushed: a `theta` angle triple (rebuilt into an Euler
/// rotation) or explicit model/view/projection matrices.
pub struct AsciiRenderer {
    width: usize,
    height: usize,
    depth_buffer: Vec<f32>,
    char_buffer: Vec<char>,
    color_buffer: Vec<Color>,
    vertices: Vec<MeshVertex>,
    uniforms: HashMap<String, UniformValue>,
}

impl AsciiRenderer {
    pub fn new(width: usize, height: usize) -> Result<Self, ContextError> {
        if width == 0 || height == 0 {
            return Err(ContextError::Unsupported(format!(
                "terminal reports unusable size {}x{}",
                width, height
            )));
        }

        let size = width * height;
        Ok(Self {
            width,
            height,
            depth_buffer: vec![f32::INFINITY; size],
            char_buffer: vec![' '; size],
            color_buffer: vec![Color::Reset; size],
            vertices: Vec::new(),
            uniforms: HashMap::new(),
        })
    }

    pub fn clear(&mut self) {
        for i in 0..self.depth_buffer.len() {
            self.depth_buffer[i] = f32::INFINITY;
            self.char_buffer[i] = ' ';
            self.color_buffer[i] = Color::Reset;
        }
    }

    /// Assemble the MVP from the uniforms pushed by the frame driver.
    fn mvp(&self) -> Result<Matrix4<f32>, ContextError> {
        if let Some(UniformValue::Vec3(theta)) = self.uniforms.get("theta") {
            return Ok(Transform::euler_rotation(theta));
        }

        let matrix = |name: &str| -> Result<Matrix4<f32>, ContextError> {
            match self.uniforms.get(name) {
                Some(UniformValue::Mat4(m)) => Ok(*m),
                _ => Err(ContextError::MissingUniform(name.to_string())),
            }
        };

        let model = matrix("model")?;
        let view = matrix("view")?;
        let projection = matrix("projection")?;
        Ok(Transform::mvp(&model, &view, &projection))
    }

    fn render_triangle(&mut self, triangle: &[MeshVertex], mvp: &Matrix4<f32>) {
        // Project vertices to screen space
        let mut screen_coords = Vec::new();
        for vertex in triangle {
            if let Some(coords) = project_to_screen(
                mvp,
                &vertex.position,
                self.width as u32,
                self.height as u32,
            ) {
                screen_coords.push(coords);
            } else {
                return; // Triangle is clipped
            }
        }

        // Flat shade from the average vertex color.
        let mut rgb = [0.0f32; 3];
        for vertex in triangle {
            for (sum, component) in rgb.iter_mut().zip(vertex.color.iter()) {
                *sum += component / 3.0;
            }
        }

        let brightness = 0.2126 * rgb[0] + 0.7152 * rgb[1] + 0.0722 * rgb[2];
        let char_index = (brightness * (LUMINOSITY_RAMP.len() - 1) as f32) as usize;
        // Floor at the dimmest visible glyph so dark faces still render.
        let char_index = char_index.clamp(1, LUMINOSITY_RAMP.len() - 1);
        let character = LUMINOSITY_RAMP[char_index];

        let color = Color::Rgb {
            r: (rgb[0].clamp(0.0, 1.0) * 255.0) as u8,
            g: (rgb[1].clamp(0.0, 1.0) * 255.0) as u8,
            b: (rgb[2].clamp(0.0, 1.0) * 255.0) as u8,
        };

        self.rasterize_triangle(&screen_coords, character, color);
    }

    fn rasterize_triangle(&mut self, coords: &[(f32, f32, f32)], character: char, color: Color) {
        let (v0, v1, v2) = (coords[0], coords[1], coords[2]);

        // Bounding box
        let min_x = v0.0.min(v1.0).min(v2.0).floor() as i32;
        let max_x = v0.0.max(v1.0).max(v2.0).ceil() as i32;
        let min_y = v0.1.min(v1.1).min(v2.1).floor() as i32;
        let max_y = v0.1.max(v1.1).max(v2.1).ceil() as i32;

        // Clip to screen bounds
        let min_x = min_x.max(0);
        let max_x = max_x.min(self.width as i32 - 1);
        let min_y = min_y.max(0);
        let max_y = max_y.min(self.height as i32 - 1);

        // Scanline rasterization
        for y in min_y..=max_y {
            for x in min_x..=max_x {
                let px = x as f32 + 0.5;
                let py = y as f32 + 0.5;

                if let Some((w0, w1, w2)) =
                    barycentric((v0.0, v0.1), (v1.0, v1.1), (v2.0, v2.1), (px, py))
                {
                    if w0 >= 0.0 && w1 >= 0.0 && w2 >= 0.0 {
                        // Interpolate depth
                        let depth = w0 * v0.2 + w1 * v1.2 + w2 * v2.2;

                        let idx = y as usize * self.width + x as usize;
                        if depth < self.depth_buffer[idx] {
                            self.depth_buffer[idx] = depth;
                            self.char_buffer[idx] = character;
                            self.color_buffer[idx] = color;
                        }
                    }
                }
            }
        }
    }

    /// Flush the rasterized frame to the terminal.
    pub fn present<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        for y in 0..self.height {
            for x in 0..self.width {
                let idx = y * self.width + x;
                writer.queue(SetForegroundColor(self.color_buffer[idx]))?;
                writer.queue(Print(self.char_buffer[idx]))?;
            }
            if y + 1 < self.height {
                writer.queue(Print("\r\n"))?;
            }
        }
        writer.queue(ResetColor)?;
        Ok(())
    }

    #[cfg(test)]
    fn occupied_cells(&self) -> usize {
        self.char_buffer.iter().filter(|&&c| c != ' ').count()
    }
}

impl GraphicsContext for AsciiRenderer {
    fn compile_program(
        &mut self,
        vertex_src: &str,
        _fragment_src: &str,
    ) -> Result<(), ContextError> {
        // Char cells have no programmable stage; sources are informational.
        debug!("ignoring shader pair ({} byte vertex stage)", vertex_src.len());
        Ok(())
    }

    fn upload_mesh(&mut self, mesh: &ExpandedMesh) -> Result<(), ContextError> {
        self.vertices = mesh.vertices().to_vec();
        debug!("uploaded {} vertices", self.vertices.len());
        Ok(())
    }

    fn set_uniform(&mut self, name: &str, value: UniformValue) -> Result<(), ContextError> {
        self.uniforms.insert(name.to_string(), value);
        Ok(())
    }

    fn draw(&mut self, _primitive: Primitive, vertex_count: usize) -> Result<(), ContextError> {
        let mvp = self.mvp()?;
        let count = vertex_count.min(self.vertices.len());

        let triangles: Vec<[MeshVertex; 3]> = self.vertices[..count]
            .chunks_exact(3)
            .map(|chunk| [chunk[0], chunk[1], chunk[2]])
            .collect();

        for triangle in &triangles {
            self.render_triangle(triangle, &mvp);
        }
        Ok(())
    }
}

/// Calculate barycentric coordinates for a point in a triangle
fn barycentric(
    v0: (f32, f32),
    v1: (f32, f32),
    v2: (f32, f32),
    p: (f32, f32),
) -> Option<(f32, f32, f32)> {
    let denom = (v1.1 - v2.1) * (v0.0 - v2.0) + (v2.0 - v1.0) * (v0.1 - v2.1);

    if denom.abs() < 1e-6 {
        return None;
    }

    let w0 = ((v1.1 - v2.1) * (p.0 - v2.0) + (v2.0 - v1.0) * (p.1 - v2.1)) / denom;
    let w1 = ((v2.1 - v0.1) * (p.0 - v2.0) + (v0.0 - v2.0) * (p.1 - v2.1)) / denom;
    let w2 = 1.0 - w0 - w1;

    Some((w0, w1, w2))
}
