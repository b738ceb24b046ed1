use flagset::flags;
use num_derive::FromPrimitive;

pub const HEADER_LUMPS: usize = 17;

/// File identifier, little-endian "IBSP".
pub const IBSP_MAGIC: [u8; 4] = *b"IBSP";
/// Quake III Arena map version.
pub const IBSP_VERSION: i32 = 0x2e;

/// Size of the fixed header: magic, version, then the lump directory.
pub const HEADER_SIZE: usize = 8 + HEADER_LUMPS * 8;

pub const LIGHTMAP_WIDTH: usize = 128;
pub const LIGHTMAP_HEIGHT: usize = 128;

/// Bytes of fixed width name fields in the texture and effect lumps.
pub const MAX_QPATH: usize = 64;

// upper design bounds of the q3map compiler. Exceeding them is legal for the
// file format but the stock engine refuses such maps.
pub const MAX_MAP_MODELS: usize = 0x400;
pub const MAX_MAP_BRUSHES: usize = 0x8000;
pub const MAX_MAP_ENTSTRING: usize = 0x40000;
pub const MAX_MAP_SHADERS: usize = 0x400;
pub const MAX_MAP_FOGS: usize = 0x100;
pub const MAX_MAP_PLANES: usize = 0x20000;
pub const MAX_MAP_NODES: usize = 0x20000;
pub const MAX_MAP_BRUSHSIDES: usize = 0x20000;
pub const MAX_MAP_LEAFS: usize = 0x20000;
pub const MAX_MAP_LEAFFACES: usize = 0x20000;
pub const MAX_MAP_LEAFBRUSHES: usize = 0x40000;
pub const MAX_MAP_LIGHTING: usize = 0x800000;
pub const MAX_MAP_LIGHTGRID: usize = 0x800000;
pub const MAX_MAP_VISIBILITY: usize = 0x200000;
pub const MAX_MAP_DRAW_SURFS: usize = 0x20000;
pub const MAX_MAP_DRAW_VERTS: usize = 0x80000;
pub const MAX_MAP_DRAW_INDEXES: usize = 0x80000;

/// Directory slots, in file order.
#[derive(Copy, Clone, FromPrimitive, Debug, PartialEq, Eq, Hash)]
pub enum LumpType {
    Entities = 0,
    Textures = 1,
    Planes = 2,
    Nodes = 3,
    Leaves = 4,
    LeafFaces = 5,
    LeafBrushes = 6,
    Models = 7,
    Brushes = 8,
    BrushSides = 9,
    Vertices = 10,
    MeshVerts = 11,
    Effects = 12,
    Faces = 13,
    Lightmaps = 14,
    LightVols = 15,
    VisData = 16,
}

impl LumpType {
    pub const ALL: [LumpType; HEADER_LUMPS] = [
        LumpType::Entities,
        LumpType::Textures,
        LumpType::Planes,
        LumpType::Nodes,
        LumpType::Leaves,
        LumpType::LeafFaces,
        LumpType::LeafBrushes,
        LumpType::Models,
        LumpType::Brushes,
        LumpType::BrushSides,
        LumpType::Vertices,
        LumpType::MeshVerts,
        LumpType::Effects,
        LumpType::Faces,
        LumpType::Lightmaps,
        LumpType::LightVols,
        LumpType::VisData,
    ];
}

flags! {
    /// Surface flags carried by each texture (`surfaceparm` in shader scripts).
    pub enum SurfaceFlags: u32 {
        NoDamage = 0x1,       // never give falling damage
        Slick = 0x2,          // effects game physics
        Sky = 0x4,            // lighting from environment map
        Ladder = 0x8,
        NoImpact = 0x10,      // don't make missile explosions
        NoMarks = 0x20,       // don't leave missile marks
        Flesh = 0x40,         // make flesh sounds and effects
        NoDraw = 0x80,        // don't generate a drawsurface at all
        Hint = 0x100,         // make a primary bsp splitter
        Skip = 0x200,         // completely ignore, allowing non-closed brushes
        NoLightmap = 0x400,   // surface doesn't need a lightmap
        PointLight = 0x800,   // generate lighting info at vertexes
        MetalSteps = 0x1000,  // clanking footsteps
        NoSteps = 0x2000,     // no footstep sounds
        NonSolid = 0x4000,    // don't collide against curves with this set
        LightFilter = 0x8000, // act as a light filter during q3map -light
        AlphaShadow = 0x10000, // do per-pixel light shadow casting in q3map
        NoDlight = 0x20000,   // don't dlight even if solid (solid lava, skies)
        Dust = 0x40000,       // leave a dust trail when walking on this surface
    }
}

flags! {
    /// Brush contents carried by each texture.
    pub enum Contents: u32 {
        Solid = 0x1,          // an eye is never valid in a solid
        Lava = 0x8,
        Slime = 0x10,
        Water = 0x20,
        Fog = 0x40,
        NotTeam1 = 0x80,
        NotTeam2 = 0x100,
        NoBotClip = 0x200,
        AreaPortal = 0x8000,
        PlayerClip = 0x10000,
        MonsterClip = 0x20000,
        Teleporter = 0x40000, // bot specific contents types
        JumpPad = 0x80000,
        ClusterPortal = 0x100000,
        DoNotEnter = 0x200000,
        BotClip = 0x400000,
        Mover = 0x800000,
        Origin = 0x1000000,   // removed before bsping an entity
        Body = 0x2000000,     // should never be on a brush, only in game
        Corpse = 0x4000000,
        Detail = 0x8000000,   // brushes not used for the bsp
        Structural = 0x10000000, // brushes used for the bsp
        Translucent = 0x20000000, // don't consume surface fragments inside
        Trigger = 0x40000000,
        NoDrop = 0x80000000,  // don't leave bodies or items (death fog, lava)
    }
}
