use std::ops::Range;

use glam::{IVec2, IVec3, Vec2, Vec3};

use crate::error::{ParseError, ParseResult};

/// Sequential little-endian reader over an in-memory map file.
///
/// Every read is bounds checked; a read that would run past the end of the
/// buffer fails with [`ParseError::TruncatedBuffer`] and leaves the position
/// untouched.
#[derive(Clone, Debug)]
pub struct BinaryCursor<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> BinaryCursor<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.pos)
    }

    /// Jump to an absolute offset. Seeking past the end is allowed, the next
    /// read reports the truncation.
    pub fn seek(&mut self, offset: usize) {
        self.pos = offset;
    }

    pub fn skip(&mut self, n: usize) {
        self.pos = self.pos.saturating_add(n);
    }

    pub fn read_bytes(&mut self, n: usize) -> ParseResult<&'a [u8]> {
        let end = self
            .pos
            .checked_add(n)
            .filter(|&end| end <= self.data.len())
            .ok_or(ParseError::TruncatedBuffer {
                offset: self.pos,
                wanted: n,
                len: self.data.len(),
            })?;

        let bytes = &self.data[self.pos..end];
        self.pos = end;
        Ok(bytes)
    }

    fn read_array<const N: usize>(&mut self) -> ParseResult<[u8; N]> {
        let mut out = [0; N];
        out.copy_from_slice(self.read_bytes(N)?);
        Ok(out)
    }

    pub fn read_u8(&mut self) -> ParseResult<u8> {
        Ok(self.read_array::<1>()?[0])
    }

    pub fn read_i32(&mut self) -> ParseResult<i32> {
        self.read_array().map(i32::from_le_bytes)
    }

    pub fn read_u32(&mut self) -> ParseResult<u32> {
        self.read_array().map(u32::from_le_bytes)
    }

    pub fn read_f32(&mut self) -> ParseResult<f32> {
        self.read_array().map(f32::from_le_bytes)
    }

    pub fn read_vec2(&mut self) -> ParseResult<Vec2> {
        Ok(Vec2::new(self.read_f32()?, self.read_f32()?))
    }

    pub fn read_vec3(&mut self) -> ParseResult<Vec3> {
        Ok(Vec3::new(self.read_f32()?, self.read_f32()?, self.read_f32()?))
    }

    pub fn read_ivec2(&mut self) -> ParseResult<IVec2> {
        Ok(IVec2::new(self.read_i32()?, self.read_i32()?))
    }

    pub fn read_ivec3(&mut self) -> ParseResult<IVec3> {
        Ok(IVec3::new(self.read_i32()?, self.read_i32()?, self.read_i32()?))
    }

    /// Reads a `(first, count)` pair as `first..first + count`.
    ///
    /// The end saturates instead of wrapping; whether the range fits the
    /// table it points into is for the caller to decide.
    pub fn read_index_range(&mut self) -> ParseResult<Range<i32>> {
        let start = self.read_i32()?;
        let count = self.read_i32()?;
        Ok(start..start.saturating_add(count))
    }

    /// Reads exactly `max_len` bytes and returns the text before the first NUL.
    pub fn read_fixed_string(&mut self, max_len: usize) -> ParseResult<String> {
        let bytes = self.read_bytes(max_len)?;
        let end = bytes.iter().position(|&b| b == 0).unwrap_or(bytes.len());
        Ok(String::from_utf8_lossy(&bytes[..end]).into_owned())
    }
}

/// A fixed size record that can decode itself from a cursor.
pub trait BinaryData: Sized {
    fn read(cursor: &mut BinaryCursor) -> ParseResult<Self>;
}
