//! Districts: the six fixed regions plus the statewide basis.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::InputError;

/// A bid record's region, or `Statewide` for records without one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum District {
    Crawfordsville,
    FortWayne,
    Greenfield,
    Laporte,
    Seymour,
    Vincennes,
    #[serde(rename = "STATE")]
    Statewide,
}

impl District {
    /// The six regional districts, in region-number order.
    pub const REGIONS: [District; 6] = [
        Self::Crawfordsville,
        Self::FortWayne,
        Self::Greenfield,
        Self::Laporte,
        Self::Seymour,
        Self::Vincennes,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Crawfordsville => "CRAWFORDSVILLE",
            Self::FortWayne => "FORT_WAYNE",
            Self::Greenfield => "GREENFIELD",
            Self::Laporte => "LAPORTE",
            Self::Seymour => "SEYMOUR",
            Self::Vincennes => "VINCENNES",
            Self::Statewide => "STATE",
        }
    }

    /// Region number 1–6; `None` for the statewide basis.
    pub fn region_number(&self) -> Option<u8> {
        Self::REGIONS
            .iter()
            .position(|d| d == self)
            .map(|i| i as u8 + 1)
    }

    pub fn is_regional(&self) -> bool {
        !matches!(self, Self::Statewide)
    }
}

impl fmt::Display for District {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for District {
    type Err = InputError;

    /// Accepts district names (spaces, hyphens, or underscores between words,
    /// any case), region numbers `1`–`6`, and `STATE`/`STATEWIDE`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .trim()
            .chars()
            .filter(|c| !matches!(c, ' ' | '-' | '_'))
            .collect::<String>()
            .to_ascii_uppercase();
        let district = match key.as_str() {
            "1" | "CRAWFORDSVILLE" => Self::Crawfordsville,
            "2" | "FORTWAYNE" => Self::FortWayne,
            "3" | "GREENFIELD" => Self::Greenfield,
            "4" | "LAPORTE" => Self::Laporte,
            "5" | "SEYMOUR" => Self::Seymour,
            "6" | "VINCENNES" => Self::Vincennes,
            "STATE" | "STATEWIDE" => Self::Statewide,
            _ => {
                return Err(InputError::UnknownDistrict { raw: s.to_string() });
            }
        };
        Ok(district)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_names_and_numbers() {
        assert_eq!("Fort Wayne".parse::<District>().unwrap(), District::FortWayne);
        assert_eq!("la-porte".parse::<District>().unwrap(), District::Laporte);
        assert_eq!("6".parse::<District>().unwrap(), District::Vincennes);
        assert_eq!("state".parse::<District>().unwrap(), District::Statewide);
        assert!("7".parse::<District>().is_err());
    }

    #[test]
    fn test_region_numbers() {
        assert_eq!(District::Crawfordsville.region_number(), Some(1));
        assert_eq!(District::Vincennes.region_number(), Some(6));
        assert_eq!(District::Statewide.region_number(), None);
        assert!(!District::Statewide.is_regional());
    }

    #[test]
    fn test_serde_names() {
        assert_eq!(serde_json::to_string(&District::FortWayne).unwrap(), "\"FORT_WAYNE\"");
        assert_eq!(serde_json::to_string(&District::Statewide).unwrap(), "\"STATE\"");
        let parsed: District = serde_json::from_str("\"SEYMOUR\"").unwrap();
        assert_eq!(parsed, District::Seymour);
    }
}
