use thiserror::Error;

use crate::bsp::consts::LumpType;

/// Fatal errors raised while decoding a map. A map either parses completely
/// or not at all.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("bad magic {0:?}, expected \"IBSP\"")]
    InvalidMagic([u8; 4]),
    #[error("unsupported map version {0}, expected 46")]
    UnsupportedVersion(i32),
    #[error("read of {wanted} bytes at offset {offset} runs past the end of a {len} byte buffer")]
    TruncatedBuffer {
        offset: usize,
        wanted: usize,
        len: usize,
    },
    #[error("malformed {lump:?} section: {reason}")]
    MalformedSection { lump: LumpType, reason: String },
}

impl ParseError {
    pub(crate) fn malformed(lump: LumpType, reason: impl Into<String>) -> Self {
        Self::MalformedSection {
            lump,
            reason: reason.into(),
        }
    }
}

pub type ParseResult<T> = Result<T, ParseError>;

/// Tree descent failures. Only reachable with a model whose tree was damaged
/// in a way the loader could not see, so callers usually treat this as
/// "draw everything".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LocateError {
    #[error("map has no BSP nodes")]
    EmptyTree,
    #[error("corrupt BSP tree at node {node} (depth {depth})")]
    CorruptTree { node: usize, depth: usize },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EntityError {
    #[error("entity text ended inside {0}")]
    UnexpectedEof(&'static str),
    #[error("unexpected {found:?} at byte {offset}, expected {expected}")]
    UnexpectedToken {
        found: String,
        offset: usize,
        expected: &'static str,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("[{section}] {key} = {value:?} is not valid: {reason}")]
    InvalidValue {
        section: &'static str,
        key: &'static str,
        value: String,
        reason: &'static str,
    },
}

/// A patch control grid that cannot be split into 3x3 quadratic patches.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PatchError {
    #[error("patch size {width}x{height} must be odd and at least 3 in both directions")]
    InvalidSize { width: i32, height: i32 },
    #[error("{width}x{height} patch got {got} control points")]
    ControlCount { width: i32, height: i32, got: usize },
}
