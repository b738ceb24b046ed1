use flagset::FlagSet;

use crate::{
    binaries::{BinaryCursor, BinaryData},
    error::ParseResult,
};

use super::{
    consts::{Contents, LumpType, SurfaceFlags, MAX_MAP_FOGS, MAX_MAP_SHADERS, MAX_QPATH},
    Lump,
};

/// Shader reference used by faces and brushes.
///
/// `name` is a path relative to the game root without extension, eg
/// `textures/base_wall/concrete`. Resolving it to an image or shader script
/// is up to the renderer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BSPTexture {
    pub name: String,
    pub surface_flags: u32,
    pub content_flags: u32,
}

impl BSPTexture {
    pub fn surface(&self) -> FlagSet<SurfaceFlags> {
        FlagSet::new_truncated(self.surface_flags)
    }

    pub fn contents(&self) -> FlagSet<Contents> {
        FlagSet::new_truncated(self.content_flags)
    }

    pub fn is_sky(&self) -> bool {
        self.surface().contains(SurfaceFlags::Sky)
    }

    pub fn is_nodraw(&self) -> bool {
        self.surface().contains(SurfaceFlags::NoDraw)
    }
}

impl BinaryData for BSPTexture {
    fn read(cursor: &mut BinaryCursor) -> ParseResult<Self> {
        Ok(Self {
            name: cursor.read_fixed_string(MAX_QPATH)?,
            surface_flags: cursor.read_u32()?,
            content_flags: cursor.read_u32()?,
        })
    }
}

impl Lump for BSPTexture {
    fn max() -> usize {
        MAX_MAP_SHADERS
    }

    fn lump_type() -> LumpType {
        LumpType::Textures
    }

    fn record_size() -> usize {
        MAX_QPATH + 8
    }
}

/// Volumetric shader effect, in practice always a fog volume.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BSPEffect {
    pub name: String,
    pub brush: i32,   // brush that bounds the fog
    pub unknown: i32, // visible side, -1 for none
}

impl BinaryData for BSPEffect {
    fn read(cursor: &mut BinaryCursor) -> ParseResult<Self> {
        Ok(Self {
            name: cursor.read_fixed_string(MAX_QPATH)?,
            brush: cursor.read_i32()?,
            unknown: cursor.read_i32()?,
        })
    }
}

impl Lump for BSPEffect {
    fn max() -> usize {
        MAX_MAP_FOGS
    }

    fn lump_type() -> LumpType {
        LumpType::Effects
    }

    fn record_size() -> usize {
        MAX_QPATH + 8
    }
}

#[cfg(test)]
mod texture_tests {
    use super::*;

    #[test]
    fn flags_ignore_unknown_bits() {
        let texture = BSPTexture {
            name: "textures/skies/blacksky".to_owned(),
            surface_flags: 0x4 | 0x80 | 0x8000_0000,
            content_flags: 0x1,
        };

        assert!(texture.is_sky());
        assert!(texture.is_nodraw());
        assert!(texture.contents().contains(Contents::Solid));
        assert!(!texture.surface().contains(SurfaceFlags::Ladder));
    }
}
