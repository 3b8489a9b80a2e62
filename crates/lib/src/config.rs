//! Node configuration.

use serde::{Deserialize, Serialize};

use crate::{
    Result,
    path::{DEFAULT_DELIMITER, PathCodec},
};

/// Settings shared by a root node and every view derived from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Character separating keys in path strings.
    #[serde(default = "default_delimiter")]
    pub delimiter: char,
}

fn default_delimiter() -> char {
    DEFAULT_DELIMITER
}

impl Default for Config {
    fn default() -> Self {
        Self {
            delimiter: DEFAULT_DELIMITER,
        }
    }
}

impl Config {
    /// Returns a config using `delimiter` for paths.
    pub fn with_delimiter(delimiter: char) -> Self {
        Self { delimiter }
    }

    /// Parses a config from JSON; missing fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Returns the path codec for this config.
    pub fn codec(&self) -> PathCodec {
        PathCodec::new(self.delimiter)
    }
}
