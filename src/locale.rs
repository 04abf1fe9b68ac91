use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Display language for skill and level labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    Nb,
}

impl FromStr for Locale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "en" | "en-us" | "en-gb" => Ok(Locale::En),
            "nb" | "no" | "nb-no" => Ok(Locale::Nb),
            other => Err(format!("Unsupported locale: {}", other)),
        }
    }
}
