use ini::Ini;

use crate::{
    bezier::{DEFAULT_TESSELLATION_LEVEL, MAX_TESSELLATION_LEVEL},
    error::ConfigError,
};

/// Knobs for [`crate::bsp::loader::parse_with`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct LoadOptions {
    /// Subdivisions per edge of every 3x3 patch.
    pub tessellation_level: u32,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            tessellation_level: DEFAULT_TESSELLATION_LEVEL,
        }
    }
}

impl LoadOptions {
    pub const SECTION: &'static str = "load";

    /// Reads the `[load]` section. Missing keys keep their defaults.
    pub fn from_ini(ini: &Ini) -> Result<Self, ConfigError> {
        let mut options = Self::default();

        let Some(section) = ini.section(Some(Self::SECTION)) else {
            return Ok(options);
        };

        if let Some(value) = section.get("tessellation_level") {
            let invalid = |reason| ConfigError::InvalidValue {
                section: Self::SECTION,
                key: "tessellation_level",
                value: value.to_owned(),
                reason,
            };

            let level: u32 = value.trim().parse().map_err(|_| invalid("not a whole number"))?;
            if level == 0 {
                return Err(invalid("must be at least 1"));
            }
            if level > MAX_TESSELLATION_LEVEL {
                return Err(invalid("must be at most 64"));
            }
            options.tessellation_level = level;
        }

        Ok(options)
    }
}
