use std::ops::Range;

use common::vertex::Vertex;
use glam::Vec3;

use crate::{
    bezier::tessellate_patch,
    bsp::{
        brush::{BSPBrush, BSPBrushSide},
        consts::LumpType,
        entities::{parse_entities, Entity},
        face::{BSPFace, FaceType},
        header::BSPHeader,
        leaf::{BSPLeaf, BSPLeafBrush, BSPLeafFace},
        lightmap::{BSPLightVol, BSPLightmap},
        model::BSPModel,
        node::{BSPNode, NodeChild},
        plane::BSPPlane,
        textures::{BSPEffect, BSPTexture},
        vert::BSPMeshVert,
        visdata::VisData,
    },
    error::{EntityError, LocateError, ParseError, ParseResult},
    vis,
};

/// A fully decoded and cross-checked map.
///
/// Built once by the loader and read only afterwards. Every index stored in
/// one table is known to be in range for the table it refers to, and every
/// face has a resolved triangle list in absolute vertex indices. Patch faces
/// reference tessellated vertices appended after the parsed ones.
#[derive(Clone, Debug)]
pub struct MapModel {
    header: BSPHeader,
    entity_text: String,
    textures: Vec<BSPTexture>,
    planes: Vec<BSPPlane>,
    nodes: Vec<BSPNode>,
    leaves: Vec<BSPLeaf>,
    leaf_faces: Vec<BSPLeafFace>,
    leaf_brushes: Vec<BSPLeafBrush>,
    models: Vec<BSPModel>,
    brushes: Vec<BSPBrush>,
    brush_sides: Vec<BSPBrushSide>,
    vertices: Vec<Vertex>,
    mesh_verts: Vec<BSPMeshVert>,
    effects: Vec<BSPEffect>,
    faces: Vec<BSPFace>,
    lightmaps: Vec<BSPLightmap>,
    light_vols: Vec<BSPLightVol>,
    visdata: Option<VisData>,

    indices: Vec<u32>,
    face_ranges: Vec<Range<usize>>,
    original_vertex_count: usize,
}

impl MapModel {
    pub fn header(&self) -> &BSPHeader {
        &self.header
    }

    /// Raw entity lump text, NUL terminator removed.
    pub fn entity_text(&self) -> &str {
        &self.entity_text
    }

    /// Parses the entity text. A map with broken entities still loads; the
    /// error only surfaces here.
    pub fn entities(&self) -> Result<Vec<Entity>, EntityError> {
        parse_entities(&self.entity_text)
    }

    pub fn textures(&self) -> &[BSPTexture] {
        &self.textures
    }

    pub fn planes(&self) -> &[BSPPlane] {
        &self.planes
    }

    pub fn nodes(&self) -> &[BSPNode] {
        &self.nodes
    }

    pub fn leaves(&self) -> &[BSPLeaf] {
        &self.leaves
    }

    pub fn leaf_faces(&self) -> &[BSPLeafFace] {
        &self.leaf_faces
    }

    pub fn leaf_brushes(&self) -> &[BSPLeafBrush] {
        &self.leaf_brushes
    }

    pub fn models(&self) -> &[BSPModel] {
        &self.models
    }

    /// Model 0, the static world geometry.
    pub fn world(&self) -> Option<&BSPModel> {
        self.models.first()
    }

    pub fn brushes(&self) -> &[BSPBrush] {
        &self.brushes
    }

    pub fn brush_sides(&self) -> &[BSPBrushSide] {
        &self.brush_sides
    }

    /// Parsed vertices followed by tessellated patch vertices.
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    /// Number of vertices read from the file. Everything after is patch
    /// tessellation output.
    pub fn original_vertex_count(&self) -> usize {
        self.original_vertex_count
    }

    pub fn mesh_verts(&self) -> &[BSPMeshVert] {
        &self.mesh_verts
    }

    pub fn effects(&self) -> &[BSPEffect] {
        &self.effects
    }

    pub fn faces(&self) -> &[BSPFace] {
        &self.faces
    }

    pub fn lightmaps(&self) -> &[BSPLightmap] {
        &self.lightmaps
    }

    pub fn light_vols(&self) -> &[BSPLightVol] {
        &self.light_vols
    }

    pub fn visdata(&self) -> Option<&VisData> {
        self.visdata.as_ref()
    }

    /// Triangle list of a face in absolute vertex indices. Empty for
    /// billboards and for out of range faces.
    pub fn face_indices(&self, face: usize) -> &[u32] {
        self.face_ranges
            .get(face)
            .map_or(&[][..], |range| &self.indices[range.clone()])
    }

    /// Every face's triangles, concatenated in face order.
    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    pub fn patch_count(&self) -> usize {
        self.faces.iter().map(BSPFace::patch_count).sum()
    }

    pub fn find_leaf(&self, point: Vec3) -> Result<usize, LocateError> {
        vis::find_leaf(self, point)
    }

    pub fn visible_faces(&self, viewpoint: Vec3) -> Result<Vec<usize>, LocateError> {
        vis::visible_faces(self, viewpoint)
    }
}

/// Staging area for a map being loaded.
///
/// Filled table by table, then [`MapBuilder::build`] checks every cross
/// reference, resolves face geometry and freezes the result into a
/// [`MapModel`].
#[derive(Clone, Debug, Default)]
pub struct MapBuilder {
    pub header: BSPHeader,
    pub entity_text: String,
    pub textures: Vec<BSPTexture>,
    pub planes: Vec<BSPPlane>,
    pub nodes: Vec<BSPNode>,
    pub leaves: Vec<BSPLeaf>,
    pub leaf_faces: Vec<BSPLeafFace>,
    pub leaf_brushes: Vec<BSPLeafBrush>,
    pub models: Vec<BSPModel>,
    pub brushes: Vec<BSPBrush>,
    pub brush_sides: Vec<BSPBrushSide>,
    pub vertices: Vec<Vertex>,
    pub mesh_verts: Vec<BSPMeshVert>,
    pub effects: Vec<BSPEffect>,
    pub faces: Vec<BSPFace>,
    pub lightmaps: Vec<BSPLightmap>,
    pub light_vols: Vec<BSPLightVol>,
    pub visdata: Option<VisData>,
}

fn index_in(index: i32, len: usize) -> bool {
    usize::try_from(index).map_or(false, |i| i < len)
}

fn range_in(range: &Range<i32>, len: usize) -> bool {
    range.start >= 0 && range.start <= range.end && range.end as usize <= len
}

fn usize_range(range: &Range<i32>) -> Range<usize> {
    range.start as usize..range.end as usize
}

impl MapBuilder {
    /// Rejects any index that points outside the table it refers to.
    pub fn validate(&self) -> ParseResult<()> {
        for (i, node) in self.nodes.iter().enumerate() {
            if !index_in(node.plane, self.planes.len()) {
                return Err(ParseError::malformed(
                    LumpType::Nodes,
                    format!("node {i} uses plane {} of {}", node.plane, self.planes.len()),
                ));
            }
            for child in node.children {
                let ok = match child {
                    NodeChild::Node(n) => (n as usize) < self.nodes.len(),
                    NodeChild::Leaf(l) => (l as usize) < self.leaves.len(),
                };
                if !ok {
                    return Err(ParseError::malformed(
                        LumpType::Nodes,
                        format!("node {i} has dangling child {child:?}"),
                    ));
                }
            }
        }

        for (i, leaf) in self.leaves.iter().enumerate() {
            if !range_in(&leaf.leaf_faces, self.leaf_faces.len()) {
                return Err(ParseError::malformed(
                    LumpType::Leaves,
                    format!("leaf {i} face range {:?} outside {}", leaf.leaf_faces, self.leaf_faces.len()),
                ));
            }
            if !range_in(&leaf.leaf_brushes, self.leaf_brushes.len()) {
                return Err(ParseError::malformed(
                    LumpType::Leaves,
                    format!(
                        "leaf {i} brush range {:?} outside {}",
                        leaf.leaf_brushes,
                        self.leaf_brushes.len()
                    ),
                ));
            }
        }

        if let Some(i) = self
            .leaf_faces
            .iter()
            .position(|lf| !index_in(lf.face, self.faces.len()))
        {
            return Err(ParseError::malformed(
                LumpType::LeafFaces,
                format!("leaf face {i} refers to face {} of {}", self.leaf_faces[i].face, self.faces.len()),
            ));
        }

        if let Some(i) = self
            .leaf_brushes
            .iter()
            .position(|lb| !index_in(lb.brush, self.brushes.len()))
        {
            return Err(ParseError::malformed(
                LumpType::LeafBrushes,
                format!(
                    "leaf brush {i} refers to brush {} of {}",
                    self.leaf_brushes[i].brush,
                    self.brushes.len()
                ),
            ));
        }

        for (i, model) in self.models.iter().enumerate() {
            if !range_in(&model.faces, self.faces.len()) {
                return Err(ParseError::malformed(
                    LumpType::Models,
                    format!("model {i} face range {:?} outside {}", model.faces, self.faces.len()),
                ));
            }
            if !range_in(&model.brushes, self.brushes.len()) {
                return Err(ParseError::malformed(
                    LumpType::Models,
                    format!("model {i} brush range {:?} outside {}", model.brushes, self.brushes.len()),
                ));
            }
        }

        for (i, brush) in self.brushes.iter().enumerate() {
            if !range_in(&brush.sides, self.brush_sides.len()) {
                return Err(ParseError::malformed(
                    LumpType::Brushes,
                    format!("brush {i} side range {:?} outside {}", brush.sides, self.brush_sides.len()),
                ));
            }
            if !index_in(brush.texture, self.textures.len()) {
                return Err(ParseError::malformed(
                    LumpType::Brushes,
                    format!("brush {i} uses texture {} of {}", brush.texture, self.textures.len()),
                ));
            }
        }

        for (i, side) in self.brush_sides.iter().enumerate() {
            if !index_in(side.plane, self.planes.len()) {
                return Err(ParseError::malformed(
                    LumpType::BrushSides,
                    format!("brush side {i} uses plane {} of {}", side.plane, self.planes.len()),
                ));
            }
            if !index_in(side.texture, self.textures.len()) {
                return Err(ParseError::malformed(
                    LumpType::BrushSides,
                    format!("brush side {i} uses texture {} of {}", side.texture, self.textures.len()),
                ));
            }
        }

        // global fog has no bounding brush
        for (i, effect) in self.effects.iter().enumerate() {
            if effect.brush != -1 && !index_in(effect.brush, self.brushes.len()) {
                return Err(ParseError::malformed(
                    LumpType::Effects,
                    format!("effect {i} bounded by brush {} of {}", effect.brush, self.brushes.len()),
                ));
            }
        }

        for (i, face) in self.faces.iter().enumerate() {
            self.validate_face(i, face)?;
        }

        Ok(())
    }

    fn validate_face(&self, i: usize, face: &BSPFace) -> ParseResult<()> {
        let malformed = |reason: String| Err(ParseError::malformed(LumpType::Faces, reason));

        if !index_in(face.texture, self.textures.len()) {
            return malformed(format!(
                "face {i} uses texture {} of {}",
                face.texture,
                self.textures.len()
            ));
        }
        if let Some(effect) = face.effect.filter(|&e| !index_in(e, self.effects.len())) {
            return malformed(format!("face {i} uses effect {effect} of {}", self.effects.len()));
        }

        if !range_in(&face.vertices, self.vertices.len()) {
            return malformed(format!(
                "face {i} vertex range {:?} outside {}",
                face.vertices,
                self.vertices.len()
            ));
        }
        if !range_in(&face.mesh_verts, self.mesh_verts.len()) {
            return malformed(format!(
                "face {i} mesh vert range {:?} outside {}",
                face.mesh_verts,
                self.mesh_verts.len()
            ));
        }

        if matches!(face.face_type, FaceType::Polygon | FaceType::Mesh) {
            for mv in &self.mesh_verts[usize_range(&face.mesh_verts)] {
                let index = face.vertices.start as u64 + mv.offset as u64;
                if index >= self.vertices.len() as u64 {
                    return malformed(format!(
                        "face {i} mesh vert offset {} lands on vertex {index} of {}",
                        mv.offset,
                        self.vertices.len()
                    ));
                }
            }
        }

        if face.face_type == FaceType::Patch {
            let (w, h) = (face.patch_size.x, face.patch_size.y);
            if w < 3 || h < 3 || w % 2 == 0 || h % 2 == 0 {
                return malformed(format!("face {i} has invalid patch size {w}x{h}"));
            }
            if w as i64 * h as i64 != face.vertex_count() as i64 {
                return malformed(format!(
                    "face {i} patch size {w}x{h} does not match its {} control points",
                    face.vertex_count()
                ));
            }
        }

        if face.lightmap != -1 && !index_in(face.lightmap, self.lightmaps.len()) {
            return malformed(format!(
                "face {i} uses lightmap {} of {}",
                face.lightmap,
                self.lightmaps.len()
            ));
        }

        Ok(())
    }

    /// Validates, resolves every face to a triangle list and freezes the map.
    ///
    /// Polygons and meshes resolve through their mesh verts. Patches are
    /// tessellated at `tessellation_level` and their vertices appended after
    /// the parsed ones. Billboards get no triangles.
    pub fn build(self, tessellation_level: u32) -> ParseResult<MapModel> {
        self.validate()?;

        let MapBuilder {
            header,
            entity_text,
            textures,
            planes,
            nodes,
            leaves,
            leaf_faces,
            leaf_brushes,
            models,
            brushes,
            brush_sides,
            mut vertices,
            mesh_verts,
            effects,
            faces,
            lightmaps,
            light_vols,
            visdata,
        } = self;

        let original_vertex_count = vertices.len();
        let mut indices = Vec::new();
        let mut face_ranges = Vec::with_capacity(faces.len());

        for (i, face) in faces.iter().enumerate() {
            let start = indices.len();

            match face.face_type {
                FaceType::Polygon | FaceType::Mesh => {
                    let first = face.vertices.start as u32;
                    indices.extend(
                        mesh_verts[usize_range(&face.mesh_verts)]
                            .iter()
                            .map(|mv| first + mv.offset),
                    );
                }
                FaceType::Patch => {
                    let controls = &vertices[usize_range(&face.vertices)];
                    let (patch_vertices, patch_indices) = tessellate_patch(
                        controls,
                        (face.patch_size.x, face.patch_size.y),
                        tessellation_level,
                    )
                    .map_err(|e| ParseError::malformed(LumpType::Faces, format!("face {i}: {e}")))?;

                    let base = vertices.len() as u32;
                    indices.extend(patch_indices.into_iter().map(|index| index + base));
                    vertices.extend(patch_vertices);
                }
                FaceType::Billboard => {}
            }

            face_ranges.push(start..indices.len());
        }

        if vertices.len() > original_vertex_count {
            log::debug!(
                "tessellated patches into {} extra vertices",
                vertices.len() - original_vertex_count
            );
        }

        Ok(MapModel {
            header,
            entity_text,
            textures,
            planes,
            nodes,
            leaves,
            leaf_faces,
            leaf_brushes,
            models,
            brushes,
            brush_sides,
            vertices,
            mesh_verts,
            effects,
            faces,
            lightmaps,
            light_vols,
            visdata,
            indices,
            face_ranges,
            original_vertex_count,
        })
    }
}
