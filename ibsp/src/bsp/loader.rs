use common::vertex::Vertex;

use crate::{
    error::ParseResult,
    map::{MapBuilder, MapModel},
    options::LoadOptions,
};

use super::{
    brush::{BSPBrush, BSPBrushSide},
    consts::{LumpType, MAX_MAP_ENTSTRING},
    face::BSPFace,
    header::BSPHeader,
    leaf::{BSPLeaf, BSPLeafBrush, BSPLeafFace},
    lightmap::{BSPLightVol, BSPLightmap},
    model::BSPModel,
    node::BSPNode,
    plane::BSPPlane,
    textures::{BSPEffect, BSPTexture},
    vert::BSPMeshVert,
    visdata::VisData,
};

/// Parses a complete map with default options.
pub fn parse(data: &[u8]) -> ParseResult<MapModel> {
    parse_with(data, &LoadOptions::default())
}

/// Parses a complete map.
///
/// The buffer is only borrowed for the duration of the call. Any error is
/// fatal and no partial map is returned.
pub fn parse_with(data: &[u8], options: &LoadOptions) -> ParseResult<MapModel> {
    let header = BSPHeader::read(data)?;
    log::debug!("{header:?}");

    let builder = MapBuilder {
        header,
        entity_text: read_entities(&header, data)?,
        textures: header.get_lump::<BSPTexture>(data)?,
        planes: header.get_lump::<BSPPlane>(data)?,
        nodes: header.get_lump::<BSPNode>(data)?,
        leaves: header.get_lump::<BSPLeaf>(data)?,
        leaf_faces: header.get_lump::<BSPLeafFace>(data)?,
        leaf_brushes: header.get_lump::<BSPLeafBrush>(data)?,
        models: header.get_lump::<BSPModel>(data)?,
        brushes: header.get_lump::<BSPBrush>(data)?,
        brush_sides: header.get_lump::<BSPBrushSide>(data)?,
        vertices: header.get_lump::<Vertex>(data)?,
        mesh_verts: header.get_lump::<BSPMeshVert>(data)?,
        effects: header.get_lump::<BSPEffect>(data)?,
        faces: header.get_lump::<BSPFace>(data)?,
        lightmaps: header.get_lump::<BSPLightmap>(data)?,
        light_vols: header.get_lump::<BSPLightVol>(data)?,
        visdata: VisData::read(data, header.get_lump_header(LumpType::VisData))?,
    };

    log::debug!(
        "sections: {} textures, {} planes, {} nodes, {} leaves, {} leaf faces, {} leaf brushes, \
         {} models, {} brushes, {} brush sides, {} vertices, {} mesh verts, {} effects, \
         {} faces, {} lightmaps, {} light vols",
        builder.textures.len(),
        builder.planes.len(),
        builder.nodes.len(),
        builder.leaves.len(),
        builder.leaf_faces.len(),
        builder.leaf_brushes.len(),
        builder.models.len(),
        builder.brushes.len(),
        builder.brush_sides.len(),
        builder.vertices.len(),
        builder.mesh_verts.len(),
        builder.effects.len(),
        builder.faces.len(),
        builder.lightmaps.len(),
        builder.light_vols.len(),
    );

    if builder.visdata.is_none() {
        log::warn!("map has no visibility data, every cluster will be drawn");
    }

    let model = builder.build(options.tessellation_level)?;

    log::info!(
        "loaded map: {} faces ({} patches), {} vertices ({} from tessellation), {} leaves, {} clusters",
        model.faces().len(),
        model.patch_count(),
        model.vertices().len(),
        model.vertices().len() - model.original_vertex_count(),
        model.leaves().len(),
        model.visdata().map_or(0, |v| v.cluster_count),
    );

    Ok(model)
}

fn read_entities(header: &BSPHeader, data: &[u8]) -> ParseResult<String> {
    let bytes = header.get_lump_header(LumpType::Entities).read_bytes(data)?;
    if bytes.len() > MAX_MAP_ENTSTRING {
        log::warn!(
            "entity text is {} bytes, over the engine limit of {MAX_MAP_ENTSTRING}",
            bytes.len()
        );
    }

    let end = bytes.iter().position(|&b| b == 0).unwrap_or(bytes.len());
    Ok(String::from_utf8_lossy(&bytes[..end]).into_owned())
}
