use std::fmt;

use crate::{
    binaries::BinaryCursor,
    error::{ParseError, ParseResult},
};

use super::{
    consts::{LumpType, HEADER_LUMPS, IBSP_MAGIC, IBSP_VERSION},
    lump::{BSPLump, Lump},
};

#[derive(Copy, Clone, Default, PartialEq, Eq)]
pub struct BSPHeader {
    pub ident: [u8; 4],                 // BSP file identifier
    pub version: i32,                   // BSP file version
    pub lumps: [BSPLump; HEADER_LUMPS], // lump directory array
}

impl fmt::Debug for BSPHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BSPHeader")
            .field("ident", &String::from_utf8_lossy(&self.ident))
            .field("version", &self.version)
            .finish()
    }
}

impl BSPHeader {
    /// Reads and validates the header at the start of `data`.
    ///
    /// Magic and version are checked before anything else, then every
    /// directory entry must lie inside the buffer.
    pub fn read(data: &[u8]) -> ParseResult<Self> {
        let mut cursor = BinaryCursor::new(data);

        let mut ident = [0; 4];
        ident.copy_from_slice(cursor.read_bytes(4)?);
        if ident != IBSP_MAGIC {
            return Err(ParseError::InvalidMagic(ident));
        }

        let version = cursor.read_i32()?;
        if version != IBSP_VERSION {
            return Err(ParseError::UnsupportedVersion(version));
        }

        let mut lumps = [BSPLump::default(); HEADER_LUMPS];
        for (lump, entry) in LumpType::ALL.into_iter().zip(lumps.iter_mut()) {
            let offset = cursor.read_i32()?;
            let length = cursor.read_i32()?;

            if offset < 0 || length < 0 {
                return Err(ParseError::malformed(
                    lump,
                    format!("directory entry has negative offset {offset} or length {length}"),
                ));
            }

            let (offset, length) = (offset as usize, length as usize);
            if offset + length > data.len() {
                return Err(ParseError::TruncatedBuffer {
                    offset,
                    wanted: length,
                    len: data.len(),
                });
            }

            *entry = BSPLump {
                offset: offset as u32,
                length: length as u32,
            };
        }

        Ok(Self {
            ident,
            version,
            lumps,
        })
    }

    pub fn get_lump_header(&self, lump: LumpType) -> &BSPLump {
        &self.lumps[lump as usize]
    }

    pub fn get_lump<T: Lump>(&self, data: &[u8]) -> ParseResult<Vec<T>> {
        self.get_lump_header(T::lump_type()).decode(data)
    }
}
