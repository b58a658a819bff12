//! # Payload Formats
//!
//! The closed set of text formats jxvault accepts. Format tokens arrive as
//! strings from the CLI boundary; [`PayloadFormat::from_str`] is the only
//! way in, and it rejects everything outside the two literal tokens
//! `"json"` and `"xml"` before any downstream work happens.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A recognized payload format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PayloadFormat {
    /// A single complete JSON document.
    Json,
    /// A single complete XML document.
    Xml,
}

impl PayloadFormat {
    /// Returns the format token string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Xml => "xml",
        }
    }

    /// File extension used when persisting an artifact of this format.
    ///
    /// Identical to the token today; kept separate so artifact naming does
    /// not silently change if a format with a divergent extension is added.
    pub fn extension(&self) -> &'static str {
        self.as_str()
    }
}

impl std::fmt::Display for PayloadFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PayloadFormat {
    type Err = UnknownFormat;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "json" => Ok(Self::Json),
            "xml" => Ok(Self::Xml),
            other => Err(UnknownFormat(other.to_string())),
        }
    }
}

/// A format token outside the recognized set.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unrecognized format {0:?}: expected \"json\" or \"xml\"")]
pub struct UnknownFormat(pub String);
