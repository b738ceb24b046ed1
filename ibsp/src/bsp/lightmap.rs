use crate::{
    binaries::{BinaryCursor, BinaryData},
    error::ParseResult,
};

use super::{
    consts::{LumpType, LIGHTMAP_HEIGHT, LIGHTMAP_WIDTH, MAX_MAP_LIGHTGRID, MAX_MAP_LIGHTING},
    Lump,
};

/// A 128x128 page of baked RGB lighting, rows stored top to bottom.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BSPLightmap {
    pub texels: Vec<[u8; 3]>,
}

impl BSPLightmap {
    pub const TEXELS: usize = LIGHTMAP_WIDTH * LIGHTMAP_HEIGHT;

    /// Expands to RGBA8 with opaque alpha, ready for upload.
    pub fn to_rgba(&self) -> Vec<[u8; 4]> {
        self.texels.iter().map(|&[r, g, b]| [r, g, b, 255]).collect()
    }

    pub fn texel(&self, x: usize, y: usize) -> Option<[u8; 3]> {
        if x >= LIGHTMAP_WIDTH {
            return None;
        }
        self.texels.get(y * LIGHTMAP_WIDTH + x).copied()
    }
}

impl BinaryData for BSPLightmap {
    fn read(cursor: &mut BinaryCursor) -> ParseResult<Self> {
        let bytes = cursor.read_bytes(Self::TEXELS * 3)?;
        Ok(Self {
            texels: bytemuck::cast_slice::<u8, [u8; 3]>(bytes).to_vec(),
        })
    }
}

impl Lump for BSPLightmap {
    fn max() -> usize {
        MAX_MAP_LIGHTING / (Self::TEXELS * 3)
    }

    fn lump_type() -> LumpType {
        LumpType::Lightmaps
    }

    fn record_size() -> usize {
        Self::TEXELS * 3
    }
}

/// Sample of the volumetric light grid used to light moving models.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct BSPLightVol {
    pub ambient: [u8; 3],
    pub directional: [u8; 3],
    pub direction: [u8; 2], // phi, theta in 256ths of a turn
}

impl BinaryData for BSPLightVol {
    fn read(cursor: &mut BinaryCursor) -> ParseResult<Self> {
        let mut vol = BSPLightVol {
            ambient: [0; 3],
            directional: [0; 3],
            direction: [0; 2],
        };
        vol.ambient.copy_from_slice(cursor.read_bytes(3)?);
        vol.directional.copy_from_slice(cursor.read_bytes(3)?);
        vol.direction.copy_from_slice(cursor.read_bytes(2)?);
        Ok(vol)
    }
}

impl Lump for BSPLightVol {
    fn max() -> usize {
        MAX_MAP_LIGHTGRID / 8
    }

    fn lump_type() -> LumpType {
        LumpType::LightVols
    }

    fn record_size() -> usize {
        8
    }
}

#[cfg(test)]
mod lightmap_tests {
    use super::*;

    #[test]
    fn rgba_is_opaque() {
        let mut data = vec![0u8; BSPLightmap::record_size()];
        data[0..3].copy_from_slice(&[10, 20, 30]);
        let last = data.len() - 3;
        data[last..].copy_from_slice(&[1, 2, 3]);

        let lightmap = BSPLightmap::read(&mut BinaryCursor::new(&data)).unwrap();
        let rgba = lightmap.to_rgba();

        assert_eq!(rgba.len(), 128 * 128);
        assert_eq!(rgba[0], [10, 20, 30, 255]);
        assert_eq!(rgba[128 * 128 - 1], [1, 2, 3, 255]);
        assert!(rgba.iter().all(|t| t[3] == 255));
        assert_eq!(lightmap.texel(127, 127), Some([1, 2, 3]));
        assert_eq!(lightmap.texel(128, 0), None);
    }

    #[test]
    fn light_vol_fields() {
        let data = [1u8, 2, 3, 4, 5, 6, 7, 8];
        let vol = BSPLightVol::read(&mut BinaryCursor::new(&data)).unwrap();
        assert_eq!(vol.ambient, [1, 2, 3]);
        assert_eq!(vol.directional, [4, 5, 6]);
        assert_eq!(vol.direction, [7, 8]);
    }
}
