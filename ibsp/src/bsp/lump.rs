use crate::{
    binaries::{BinaryCursor, BinaryData},
    error::{ParseError, ParseResult},
};

use super::consts::LumpType;

/// A fixed size record stored as a flat array in one directory slot.
pub trait Lump: BinaryData {
    /// Compiler limit, exceeding it only earns a warning.
    fn max() -> usize;
    fn lump_type() -> LumpType;
    /// Bytes per record on disk.
    fn record_size() -> usize;
}

/// One directory entry: where a section lives in the file.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct BSPLump {
    pub offset: u32, // offset into file (bytes)
    pub length: u32, // length of lump (bytes)
}

impl BSPLump {
    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    pub fn read_bytes<'a>(&self, data: &'a [u8]) -> ParseResult<&'a [u8]> {
        let mut cursor = BinaryCursor::new(data);
        cursor.seek(self.offset as usize);
        cursor.read_bytes(self.length as usize)
    }

    /// Decodes the section as an array of `record_size` byte records.
    ///
    /// Each record is decoded from its own offset, so a decoder that leaves
    /// trailing fields unread never shifts the records after it.
    pub fn decode_with<T>(
        &self,
        data: &[u8],
        lump: LumpType,
        record_size: usize,
        mut decode: impl FnMut(&mut BinaryCursor) -> ParseResult<T>,
    ) -> ParseResult<Vec<T>> {
        let len = self.length as usize;

        if len % record_size != 0 {
            return Err(ParseError::malformed(
                lump,
                format!("{len} bytes is not a whole number of {record_size} byte records"),
            ));
        }

        let count = len / record_size;
        let mut cursor = BinaryCursor::new(data);
        let mut table = Vec::with_capacity(count);

        for i in 0..count {
            cursor.seek(self.offset as usize + i * record_size);
            table.push(decode(&mut cursor)?);
        }

        Ok(table)
    }

    pub fn decode<T: Lump>(&self, data: &[u8]) -> ParseResult<Vec<T>> {
        let table = self.decode_with(data, T::lump_type(), T::record_size(), T::read)?;

        if table.len() > T::max() {
            log::warn!(
                "{:?} lump holds {} records, over the engine limit of {}",
                T::lump_type(),
                table.len(),
                T::max()
            );
        }

        Ok(table)
    }
}

#[cfg(test)]
mod lump_tests {
    use super::*;

    #[test]
    fn read_bytes_stays_inside_the_entry() {
        let data = [0u8, 1, 2, 3, 4, 5];
        let lump = BSPLump { offset: 2, length: 3 };
        assert_eq!(lump.read_bytes(&data).unwrap(), &[2, 3, 4]);

        let lump = BSPLump { offset: 4, length: 3 };
        assert_eq!(
            lump.read_bytes(&data),
            Err(ParseError::TruncatedBuffer {
                offset: 4,
                wanted: 3,
                len: 6
            })
        );
    }
}
