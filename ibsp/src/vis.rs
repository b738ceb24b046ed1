use ahash::AHashSet;
use glam::Vec3;

use crate::{
    bsp::{node::NodeChild, visdata::VisData},
    error::LocateError,
    map::MapModel,
};

/// Deepest descent tolerated before the tree is assumed to contain a cycle.
pub const MAX_TREE_DEPTH: usize = 10_000;

/// Finds the leaf containing `point`.
///
/// Descends from node 0, taking the front child when the point lies on or in
/// front of the node's plane and the back child otherwise.
pub fn find_leaf(model: &MapModel, point: Vec3) -> Result<usize, LocateError> {
    let nodes = model.nodes();
    let planes = model.planes();

    if nodes.is_empty() {
        return Err(LocateError::EmptyTree);
    }

    let mut index = 0;
    for depth in 0..MAX_TREE_DEPTH {
        let corrupt = LocateError::CorruptTree { node: index, depth };

        let node = nodes.get(index).ok_or(corrupt)?;
        let plane = usize::try_from(node.plane)
            .ok()
            .and_then(|p| planes.get(p))
            .ok_or(corrupt)?;

        let child = if plane.distance_to(point) >= 0.0 {
            node.front()
        } else {
            node.back()
        };

        match child {
            NodeChild::Node(n) => index = n as usize,
            NodeChild::Leaf(l) if (l as usize) < model.leaves().len() => return Ok(l as usize),
            NodeChild::Leaf(_) => return Err(corrupt),
        }
    }

    Err(LocateError::CorruptTree {
        node: index,
        depth: MAX_TREE_DEPTH,
    })
}

/// Potentially visible set lookup.
///
/// Without visibility data everything is visible, as is anything involving
/// a negative cluster.
pub fn is_cluster_visible(visdata: Option<&VisData>, from: i32, to: i32) -> bool {
    match visdata {
        None => true,
        Some(vis) => vis.is_visible(from, to),
    }
}

/// Faces potentially visible from `viewpoint`.
///
/// Every leaf whose cluster is visible from the viewpoint's cluster
/// contributes its faces. Each face appears once, in the order first met
/// while walking leaves in index order. No filtering by face type is done.
pub fn visible_faces(model: &MapModel, viewpoint: Vec3) -> Result<Vec<usize>, LocateError> {
    let origin = model.find_leaf(viewpoint)?;
    let from = model.leaves()[origin].cluster;
    let visdata = model.visdata();
    let leaf_faces = model.leaf_faces();
    let face_count = model.faces().len();

    let mut seen = AHashSet::new();
    let mut faces = Vec::new();

    for leaf in model.leaves() {
        if !is_cluster_visible(visdata, from, leaf.cluster) {
            continue;
        }

        let start = leaf.leaf_faces.start.max(0) as usize;
        let end = (leaf.leaf_faces.end.max(0) as usize).min(leaf_faces.len());

        for leaf_face in leaf_faces.get(start..end).unwrap_or_default() {
            let face = leaf_face.face;
            match usize::try_from(face) {
                Ok(face) if face < face_count => {
                    if seen.insert(face) {
                        faces.push(face);
                    }
                }
                _ => log::trace!("skipping dangling leaf face reference to face {face}"),
            }
        }
    }

    Ok(faces)
}
