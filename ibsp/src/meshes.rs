use ahash::AHashMap;

use crate::{
    bsp::face::{BSPFace, FaceType},
    map::MapModel,
};

/// Whether a face produces triangles a renderer should draw.
///
/// Billboards are skipped, as are faces whose texture is marked `nodraw`.
pub fn drawable(model: &MapModel, face: &BSPFace) -> bool {
    if face.face_type == FaceType::Billboard {
        return false;
    }

    usize::try_from(face.texture)
        .ok()
        .and_then(|t| model.textures().get(t))
        .map_or(true, |texture| !texture.is_nodraw())
}

/// Triangles sharing one texture, ready to be drawn in one call.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MeshBatch {
    pub texture: i32,
    pub faces: Vec<usize>,
    tris: Vec<u32>,
}

impl MeshBatch {
    pub fn push_face(&mut self, face: usize, indices: &[u32]) {
        self.faces.push(face);
        self.tris.extend_from_slice(indices);
    }

    pub fn tris(&self) -> &[u32] {
        &self.tris
    }

    pub fn triangle_count(&self) -> usize {
        self.tris.len() / 3
    }

    /// Triangle list turned into a line list, three edges per triangle.
    pub fn tris_to_lines(&self) -> Vec<u32> {
        let mut lines = Vec::with_capacity(self.tris.len() * 2);

        for tri in self.tris.chunks_exact(3) {
            lines.extend_from_slice(&[tri[0], tri[1], tri[1], tri[2], tri[2], tri[0]]);
        }

        lines
    }
}

/// Groups the drawable faces among `faces` by texture.
pub fn build_meshes(model: &MapModel, faces: &[usize]) -> AHashMap<i32, MeshBatch> {
    let mut batches: AHashMap<i32, MeshBatch> = AHashMap::new();

    for &index in faces {
        let Some(face) = model.faces().get(index) else {
            continue;
        };
        if !drawable(model, face) {
            continue;
        }

        batches
            .entry(face.texture)
            .or_insert_with(|| MeshBatch {
                texture: face.texture,
                ..Default::default()
            })
            .push_face(index, model.face_indices(index));
    }

    batches
}

#[cfg(test)]
mod meshes_tests {
    use super::*;
    use crate::{
        bsp::{textures::BSPTexture, vert::BSPMeshVert},
        map::MapBuilder,
        test_map::{face, quad_vertices},
    };

    fn textured_map() -> MapModel {
        let mut builder = MapBuilder {
            textures: vec![
                BSPTexture {
                    name: "textures/base_wall/concrete".to_owned(),
                    surface_flags: 0,
                    content_flags: 1,
                },
                BSPTexture {
                    name: "textures/common/caulk".to_owned(),
                    surface_flags: 0x80,
                    content_flags: 1,
                },
            ],
            vertices: quad_vertices(),
            mesh_verts: [0, 1, 2, 0, 2, 3].map(|offset| BSPMeshVert { offset }).to_vec(),
            ..Default::default()
        };

        let mut polygon = face(FaceType::Polygon, 0..4, 0..6);
        polygon.texture = 0;
        let mut mesh = face(FaceType::Mesh, 0..4, 0..3);
        mesh.texture = 0;
        let mut caulk = face(FaceType::Polygon, 0..4, 0..6);
        caulk.texture = 1;
        let mut sprite = face(FaceType::Billboard, 0..1, 0..0);
        sprite.texture = 0;

        builder.faces = vec![polygon, mesh, caulk, sprite];
        builder.build(2).unwrap()
    }

    #[test]
    fn filters_billboards_and_nodraw() {
        let model = textured_map();
        let drawn: Vec<bool> = model.faces().iter().map(|f| drawable(&model, f)).collect();
        assert_eq!(drawn, vec![true, true, false, false]);
    }

    #[test]
    fn batches_by_texture() {
        let model = textured_map();
        let batches = build_meshes(&model, &[0, 1, 2, 3, 99]);

        assert_eq!(batches.len(), 1);
        let batch = &batches[&0];
        assert_eq!(batch.faces, vec![0, 1]);
        assert_eq!(batch.tris(), &[0, 1, 2, 0, 2, 3, 0, 1, 2]);
        assert_eq!(batch.triangle_count(), 3);
        assert_eq!(batch.tris_to_lines().len(), 18);
    }
}
