use glam::{Vec2, Vec4};

/// A map vertex as handed to the renderer.
///
/// Positions are widened to homogeneous coordinates (`w = 1`), normals are
/// directions (`w = 0`) and colours are normalised to `0.0..=1.0`.
///
/// The type only supports the arithmetic the curved surface blend needs:
/// componentwise addition and uniform scaling, both applied to every
/// attribute.
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    pub position: Vec4,
    pub normal: Vec4,
    pub color: Vec4,
    /// surface texture coordinate
    pub surface_uv: Vec2,
    /// lightmap texture coordinate
    pub lightmap_uv: Vec2,
}

impl Vertex {
    pub fn added(&self, other: &Vertex) -> Vertex {
        Vertex {
            position: self.position + other.position,
            normal: self.normal + other.normal,
            color: self.color + other.color,
            surface_uv: self.surface_uv + other.surface_uv,
            lightmap_uv: self.lightmap_uv + other.lightmap_uv,
        }
    }

    pub fn scaled(&self, s: f32) -> Vertex {
        Vertex {
            position: self.position * s,
            normal: self.normal * s,
            color: self.color * s,
            surface_uv: self.surface_uv * s,
            lightmap_uv: self.lightmap_uv * s,
        }
    }
}

/// Weighted sum of three vertices, `v0 * b0 + v1 * b1 + v2 * b2`.
///
/// Evaluated left to right, so a weight triple of `(1, 0, 0)` or `(0, 0, 1)`
/// reproduces the selected vertex exactly.
pub fn lerp3(v0: &Vertex, v1: &Vertex, v2: &Vertex, b0: f32, b1: f32, b2: f32) -> Vertex {
    v0.scaled(b0).added(&v1.scaled(b1)).added(&v2.scaled(b2))
}
