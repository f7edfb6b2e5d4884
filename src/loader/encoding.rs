//! Text encodings of thesaurus data files.
//!
//! The first line of a data file names its encoding. The common OpenOffice
//! thesaurus files are `ISO8859-1`; newer ones are `UTF-8`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ThesaurizeError;

/// Encoding of the lines of a data file.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Encoding {
    #[default]
    Utf8,
    Latin1,
}

impl Encoding {
    /// Map an encoding label to an encoding, if it is one we can decode.
    pub fn from_label(label: &str) -> Option<Self> {
        let normalized: String = label
            .trim()
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .map(|c| c.to_ascii_lowercase())
            .collect();

        match normalized.as_str() {
            "utf8" => Some(Encoding::Utf8),
            "iso88591" | "latin1" | "l1" | "cp819" | "ibm819" => Some(Encoding::Latin1),
            // Pure ASCII decodes the same either way.
            "ascii" | "usascii" => Some(Encoding::Utf8),
            _ => None,
        }
    }

    /// Decode one line. Invalid UTF-8 sequences are replaced.
    pub fn decode(&self, bytes: &[u8]) -> String {
        match self {
            Encoding::Utf8 => String::from_utf8_lossy(bytes).into_owned(),
            // Latin-1 maps every byte to the code point of the same value.
            Encoding::Latin1 => bytes.iter().map(|&b| b as char).collect(),
        }
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Encoding::Utf8 => write!(f, "UTF-8"),
            Encoding::Latin1 => write!(f, "ISO8859-1"),
        }
    }
}

impl FromStr for Encoding {
    type Err = ThesaurizeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Encoding::from_label(s)
            .ok_or_else(|| ThesaurizeError::invalid_config(format!("unsupported encoding '{s}'")))
    }
}
