use std::env;

use crate::proficiency::{TrackDirection, DEFAULT_TRACK_LENGTH};
use crate::locale::Locale;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub data_dir: String,
    pub track_length: f64,
    pub track_direction: TrackDirection,
    pub locale: Locale,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".into(),
            port: 8080,
            data_dir: "./data".into(),
            track_length: DEFAULT_TRACK_LENGTH,
            track_direction: TrackDirection::Downward,
            locale: Locale::En,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            host: env::var("HOST").unwrap_or(defaults.host),
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.port),
            data_dir: env::var("DATA_DIR").unwrap_or(defaults.data_dir),
            track_length: env::var("TRACK_LENGTH")
                .ok()
                .and_then(|l| l.parse::<f64>().ok())
                .filter(|l| l.is_finite() && *l > 0.0)
                .unwrap_or(defaults.track_length),
            track_direction: env::var("TRACK_DIRECTION")
                .ok()
                .and_then(|d| d.parse().ok())
                .unwrap_or(defaults.track_direction),
            locale: env::var("LOCALE")
                .ok()
                .and_then(|l| l.parse().ok())
                .unwrap_or(defaults.locale),
        }
    }
}
