//! Configuration for walks and renderers.
//!
//! Everything has a default, so a config file only needs the keys it changes:
//!
//! ```json
//! { "walk": { "bits": 4, "mirror": true }, "raster": { "fill": true } }
//! ```

use std::fs;
use std::path::Path;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::ascii::AsciiStyle;
use crate::error::{Error, Result};
use crate::raster::RasterStyle;
use crate::walk::WalkConfig;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub walk: WalkConfig,
    pub ascii: AsciiStyle,
    pub raster: RasterStyle,
}

impl Config {
    /// Read a JSON config file and validate it.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&text)
            .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))?;
        config.validate()?;
        debug!("loaded config from {}: {:?}", path.display(), config);
        Ok(config)
    }

    pub fn from_json(text: &str) -> Result<Self> {
        let config: Config =
            serde_json::from_str(text).map_err(|e| Error::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| Error::Config(e.to_string()))
    }

    pub fn validate(&self) -> Result<()> {
        self.walk.validate()?;
        self.raster.validate()
    }
}
