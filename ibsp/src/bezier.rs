use common::prelude::*;

use crate::error::PatchError;

/// Subdivisions per patch edge when nothing else is configured.
pub const DEFAULT_TESSELLATION_LEVEL: u32 = 10;

/// Finest subdivision accepted. Keeps per-patch index arithmetic in `u32`.
pub const MAX_TESSELLATION_LEVEL: u32 = 64;

/// Quadratic Bernstein weights at `t`.
fn weights(t: f32) -> (f32, f32, f32) {
    let a = 1.0 - t;
    (a * a, 2.0 * t * a, t * t)
}

/// Tessellates one 3x3 quadratic Bézier patch.
///
/// Control points are row-major. The three columns `{0,3,6}`, `{1,4,7}` and
/// `{2,5,8}` are first evaluated at `level + 1` evenly spaced parameters,
/// then each row of those results is evaluated the same way across.
///
/// Returns `(level + 1)^2` row-major vertices and `6 * level^2` indices, two
/// triangles per grid cell. The four corner vertices are exact copies of
/// `controls[0]`, `controls[2]`, `controls[6]` and `controls[8]`. The level is
/// clamped to `1..=MAX_TESSELLATION_LEVEL`.
pub fn tessellate(controls: &[Vertex; 9], level: u32) -> (Vec<Vertex>, Vec<u32>) {
    let level = level.clamp(1, MAX_TESSELLATION_LEVEL);
    let l1 = level as usize + 1;
    let step = |i: usize| weights(i as f32 / level as f32);

    let mut columns = [Vec::with_capacity(l1), Vec::with_capacity(l1), Vec::with_capacity(l1)];
    for (k, column) in columns.iter_mut().enumerate() {
        for i in 0..l1 {
            let (b0, b1, b2) = step(i);
            column.push(lerp3(&controls[k], &controls[k + 3], &controls[k + 6], b0, b1, b2));
        }
    }

    let mut vertices = Vec::with_capacity(l1 * l1);
    for i in 0..l1 {
        for j in 0..l1 {
            let (b0, b1, b2) = step(j);
            vertices.push(lerp3(&columns[0][i], &columns[1][i], &columns[2][i], b0, b1, b2));
        }
    }

    let w = l1 as u32;
    let mut indices = Vec::with_capacity(6 * (level * level) as usize);
    for row in 0..level {
        for col in 0..level {
            let v0 = row * w + col;
            let v1 = (row + 1) * w + col;
            let v2 = v0 + 1;
            let v3 = v1 + 1;
            indices.extend_from_slice(&[v0, v1, v2, v1, v3, v2]);
        }
    }

    (vertices, indices)
}

/// Tessellates a whole patch face.
///
/// `controls` is a row-major `width x height` grid built from 3x3 patches
/// sharing their edges. Each patch is tessellated at `level` and the results
/// are concatenated, x fastest, with indices rebased onto the combined
/// vertex list.
pub fn tessellate_patch(
    controls: &[Vertex],
    (width, height): (i32, i32),
    level: u32,
) -> Result<(Vec<Vertex>, Vec<u32>), PatchError> {
    if width < 3 || height < 3 || width % 2 == 0 || height % 2 == 0 {
        return Err(PatchError::InvalidSize { width, height });
    }
    if width as i64 * height as i64 != controls.len() as i64 {
        return Err(PatchError::ControlCount {
            width,
            height,
            got: controls.len(),
        });
    }

    let (w, h) = (width as usize, height as usize);
    let (patches_x, patches_y) = ((w - 1) / 2, (h - 1) / 2);

    let mut vertices = Vec::new();
    let mut indices = Vec::new();

    for py in 0..patches_y {
        for px in 0..patches_x {
            let mut patch = [Vertex::default(); 9];
            for i in 0..3 {
                for j in 0..3 {
                    patch[i * 3 + j] = controls[(2 * py + i) * w + 2 * px + j];
                }
            }

            let (patch_vertices, patch_indices) = tessellate(&patch, level);
            let base = vertices.len() as u32;
            indices.extend(patch_indices.into_iter().map(|i| i + base));
            vertices.extend(patch_vertices);
        }
    }

    Ok((vertices, indices))
}
