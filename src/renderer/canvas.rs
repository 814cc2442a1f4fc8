use gl::types::*;
use glam::{Mat4, Vec2};
use std::mem;

use super::scene::{DrawCmd, DrawList};
use super::shader::ShaderProgram;
use crate::camera::Viewport;
use crate::error::InitError;
use crate::math::Rgba;

const VERT_SRC: &str = r#"#version 330 core
layout (location = 0) in vec2 a_pos;
layout (location = 1) in vec4 a_color;
uniform mat4 u_projection;
out vec4 v_color;
void main() {
    v_color = a_color;
    gl_Position = u_projection * vec4(a_pos, 0.0, 1.0);
}
"#;

const FRAG_SRC: &str = r#"#version 330 core
in vec4 v_color;
out vec4 frag_color;
void main() {
    frag_color = v_color;
}
"#;

/// Floats per vertex: x, y, r, g, b, a.
const VERTEX_FLOATS: usize = 6;

/// Vertices grouped by primitive type. Consecutive commands with the same
/// primitive share one draw call; a change of primitive flushes, which
/// keeps painter's order intact.
struct Batch {
    mode: GLenum,
    vertices: Vec<f32>,
}

impl Batch {
    fn push(&mut self, p: Vec2, c: Rgba) {
        self.vertices
            .extend_from_slice(&[p.x, p.y, c.r, c.g, c.b, c.a]);
    }

    fn vertex_count(&self) -> i32 {
        (self.vertices.len() / VERTEX_FLOATS) as i32
    }
}

/// Blits a `DrawList` onto the GL surface with an orthographic pixel projection.
pub struct Canvas {
    shader: ShaderProgram,
    vao: GLuint,
    vbo: GLuint,
    viewport: Viewport,
    batch: Batch,
}

impl Canvas {
    pub fn new(viewport: Viewport) -> Result<Self, InitError> {
        let shader = ShaderProgram::from_sources(VERT_SRC, FRAG_SRC)?;

        let mut vao: GLuint = 0;
        let mut vbo: GLuint = 0;

        unsafe {
            gl::GenVertexArrays(1, &mut vao);
            gl::GenBuffers(1, &mut vbo);

            gl::BindVertexArray(vao);
            gl::BindBuffer(gl::ARRAY_BUFFER, vbo);

            let stride = (VERTEX_FLOATS * mem::size_of::<f32>()) as GLsizei;
            gl::EnableVertexAttribArray(0);
            gl::VertexAttribPointer(0, 2, gl::FLOAT, gl::FALSE, stride, std::ptr::null());
            gl::EnableVertexAttribArray(1);
            gl::VertexAttribPointer(
                1,
                4,
                gl::FLOAT,
                gl::FALSE,
                stride,
                (2 * mem::size_of::<f32>()) as *const _,
            );

            gl::BindVertexArray(0);

            gl::Disable(gl::DEPTH_TEST);
            gl::Enable(gl::BLEND);
            gl::BlendFunc(gl::SRC_ALPHA, gl::ONE_MINUS_SRC_ALPHA);
        }

        let mut canvas = Self {
            shader,
            vao,
            vbo,
            viewport,
            batch: Batch {
                mode: gl::TRIANGLES,
                vertices: Vec::new(),
            },
        };
        canvas.resize(viewport);
        Ok(canvas)
    }

    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        unsafe {
            gl::Viewport(0, 0, viewport.width as GLsizei, viewport.height as GLsizei);
        }
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn draw(&mut self, list: &DrawList) {
        let projection =
            Mat4::orthographic_rh_gl(0.0, self.viewport.width, self.viewport.height, 0.0, -1.0, 1.0);

        unsafe {
            gl::ClearColor(0.0, 0.0, 0.0, 1.0);
            gl::Clear(gl::COLOR_BUFFER_BIT);
        }
        self.shader.bind();
        self.shader.set_mat4("u_projection", &projection);

        for cmd in &list.commands {
            match cmd {
                DrawCmd::Gradient { top, bottom } => {
                    let (w, h) = (self.viewport.width, self.viewport.height);
                    self.begin(gl::TRIANGLES);
                    let quad = [
                        (Vec2::new(0.0, 0.0), *top),
                        (Vec2::new(w, 0.0), *top),
                        (Vec2::new(w, h), *bottom),
                        (Vec2::new(0.0, 0.0), *top),
                        (Vec2::new(w, h), *bottom),
                        (Vec2::new(0.0, h), *bottom),
                    ];
                    for (p, c) in quad {
                        self.batch.push(p, c);
                    }
                }
                DrawCmd::Polygon {
                    points,
                    fill,
                    stroke,
                } => {
                    if points.len() < 2 {
                        continue;
                    }
                    if let Some(fill) = fill {
                        self.begin(gl::TRIANGLES);
                        // Fan triangulation, polygons are convex.
                        for i in 1..points.len().saturating_sub(1) {
                            self.batch.push(points[0], *fill);
                            self.batch.push(points[i], *fill);
                            self.batch.push(points[i + 1], *fill);
                        }
                    }
                    if let Some(stroke) = stroke {
                        self.begin(gl::LINES);
                        for (i, &p) in points.iter().enumerate() {
                            let next = points[(i + 1) % points.len()];
                            self.batch.push(p, *stroke);
                            self.batch.push(next, *stroke);
                        }
                    }
                }
            }
        }
        self.flush();
    }

    /// Switch primitive type, flushing pending vertices of the old one.
    fn begin(&mut self, mode: GLenum) {
        if self.batch.mode != mode {
            self.flush();
            self.batch.mode = mode;
        }
    }

    fn flush(&mut self) {
        let count = self.batch.vertex_count();
        if count == 0 {
            return;
        }
        unsafe {
            gl::BindVertexArray(self.vao);
            gl::BindBuffer(gl::ARRAY_BUFFER, self.vbo);
            gl::BufferData(
                gl::ARRAY_BUFFER,
                (self.batch.vertices.len() * mem::size_of::<f32>()) as GLsizeiptr,
                self.batch.vertices.as_ptr() as *const _,
                gl::STREAM_DRAW,
            );
            gl::DrawArrays(self.batch.mode, 0, count);
            gl::BindVertexArray(0);
        }
        self.batch.vertices.clear();
    }
}

impl Drop for Canvas {
    fn drop(&mut self) {
        unsafe {
            gl::DeleteVertexArrays(1, &self.vao);
            gl::DeleteBuffers(1, &self.vbo);
        }
    }
}
