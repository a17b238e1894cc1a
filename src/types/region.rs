//! Platform regions

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::RiftError;

/// Regional shard of the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Region {
    Br,
    Eune,
    Euw,
    Jp,
    Kr,
    Lan,
    Las,
    Na,
    Oce,
    Pbe,
    Ru,
    Tr,
}

impl Region {
    /// Every region, in alphabetical order.
    pub const ALL: &'static [Region] = &[
        Region::Br,
        Region::Eune,
        Region::Euw,
        Region::Jp,
        Region::Kr,
        Region::Lan,
        Region::Las,
        Region::Na,
        Region::Oce,
        Region::Pbe,
        Region::Ru,
        Region::Tr,
    ];

    /// Lowercase form used in hosts and URL paths (`"euw"`).
    pub fn as_path(&self) -> &'static str {
        match self {
            Region::Br => "br",
            Region::Eune => "eune",
            Region::Euw => "euw",
            Region::Jp => "jp",
            Region::Kr => "kr",
            Region::Lan => "lan",
            Region::Las => "las",
            Region::Na => "na",
            Region::Oce => "oce",
            Region::Pbe => "pbe",
            Region::Ru => "ru",
            Region::Tr => "tr",
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_path().to_uppercase())
    }
}

impl FromStr for Region {
    type Err = RiftError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_ascii_lowercase();
        Region::ALL
            .iter()
            .copied()
            .find(|r| r.as_path() == lower)
            .ok_or_else(|| RiftError::Configuration(format!("unknown region: {s}")))
    }
}
