use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use clap::Parser;
use glam::Vec3;
use ini::Ini;

use ibsp::prelude::*;

const DEFAULT_CONFIG: &str = "readout.ini";

/// Print a summary of a Quake III map and what can be seen from inside it.
#[derive(Parser, Debug)]
#[command(name = "ibsp-readout")]
#[command(version)]
struct Args {
    /// Map file, overrides `[readout] map` in the config
    map: Option<PathBuf>,

    /// Configuration file, ignored when missing
    #[arg(short, long, default_value = DEFAULT_CONFIG)]
    config: PathBuf,

    /// Patch tessellation level
    #[arg(short, long)]
    level: Option<u32>,

    /// Viewpoint to run a visibility query from, may be repeated
    #[arg(
        short,
        long,
        num_args = 3,
        value_names = ["X", "Y", "Z"],
        allow_negative_numbers = true,
        action = clap::ArgAction::Append
    )]
    point: Vec<f32>,

    /// Also query from every player spawn point in the map
    #[arg(long)]
    spawns: bool,
}

fn load_config(path: &Path) -> anyhow::Result<Option<Ini>> {
    if !path.exists() {
        log::debug!("no config at {}", path.display());
        return Ok(None);
    }
    let ini = Ini::load_from_file(path).with_context(|| format!("reading {}", path.display()))?;
    Ok(Some(ini))
}

fn viewpoints_from_ini(ini: &Ini) -> anyhow::Result<Vec<(String, Vec3)>> {
    let Some(section) = ini.section(Some("viewpoints")) else {
        return Ok(Vec::new());
    };

    section
        .iter()
        .map(|(name, value)| match parse_vec3(value) {
            Some(p) => Ok((name.to_owned(), p)),
            None => bail!("[viewpoints] {name} = {value:?} is not three numbers"),
        })
        .collect()
}

fn print_summary(path: &Path, model: &MapModel) {
    let header = model.header();
    println!("{}: {:?} v{}", path.display(), String::from_utf8_lossy(&header.ident), header.version);

    for lump in LumpType::ALL {
        let entry = header.get_lump_header(lump);
        println!("  {:<12} offset {:>9} length {:>9}", format!("{lump:?}"), entry.offset, entry.length);
    }

    println!(
        "{} faces, {} patches, {} vertices ({} parsed), {} indices",
        model.faces().len(),
        model.patch_count(),
        model.vertices().len(),
        model.original_vertex_count(),
        model.indices().len(),
    );
    println!(
        "{} leaves, {} nodes, {} clusters, {} lightmaps",
        model.leaves().len(),
        model.nodes().len(),
        model.visdata().map_or(0, |v| v.cluster_count),
        model.lightmaps().len(),
    );
}

fn report_viewpoint(model: &MapModel, name: &str, point: Vec3) {
    let leaf = match model.find_leaf(point) {
        Ok(leaf) => leaf,
        Err(e) => {
            log::error!("{name} {point}: {e}");
            return;
        }
    };
    let cluster = model.leaves()[leaf].cluster;

    match model.visible_faces(point) {
        Ok(faces) => {
            let batches = build_meshes(model, &faces);
            let triangles: usize = batches.values().map(|b| b.triangle_count()).sum();
            println!(
                "{name} {point}: leaf {leaf}, cluster {cluster}, {} visible faces, {} batches, {triangles} triangles",
                faces.len(),
                batches.len(),
            );
        }
        Err(e) => log::error!("{name} {point}: {e}"),
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let ini = load_config(&args.config)?;

    let mut options = match &ini {
        Some(ini) => LoadOptions::from_ini(ini)?,
        None => LoadOptions::default(),
    };
    if let Some(level) = args.level {
        if !(1..=MAX_TESSELLATION_LEVEL).contains(&level) {
            bail!("--level must be between 1 and {MAX_TESSELLATION_LEVEL}");
        }
        options.tessellation_level = level;
    }

    let map = args
        .map
        .clone()
        .or_else(|| {
            ini.as_ref()
                .and_then(|ini| ini.get_from(Some("readout"), "map"))
                .map(PathBuf::from)
        })
        .context("no map given on the command line or in [readout] map")?;

    let data = std::fs::read(&map).with_context(|| format!("reading {}", map.display()))?;
    let model = parse_with(&data, &options).with_context(|| format!("parsing {}", map.display()))?;

    print_summary(&map, &model);

    let mut viewpoints = match &ini {
        Some(ini) => viewpoints_from_ini(ini)?,
        None => Vec::new(),
    };
    for (i, p) in args.point.chunks_exact(3).enumerate() {
        viewpoints.push((format!("point {i}"), Vec3::new(p[0], p[1], p[2])));
    }

    if args.spawns {
        match model.entities() {
            Ok(entities) => {
                let spawns = entities.iter().filter(|e| {
                    e.class_name()
                        .map_or(false, |c| c.starts_with("info_player"))
                });
                for (i, spawn) in spawns.enumerate() {
                    if let Some(origin) = spawn.origin() {
                        let class = spawn.class_name().unwrap_or_default();
                        viewpoints.push((format!("{class} {i}"), origin));
                    }
                }
            }
            Err(e) => log::warn!("could not read entities: {e}"),
        }
    }

    for (name, point) in &viewpoints {
        report_viewpoint(&model, name, *point);
    }

    Ok(())
}
