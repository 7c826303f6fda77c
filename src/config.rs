use chrono::format::{Item, StrftimeItems};
use chrono::{Local, NaiveDate};
use std::{env, fmt::Write, path::PathBuf};
use tracing::warn;

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_DATA_DIR: &str = "data";
/// Month/day/year without padding, e.g. `10/18/2026`.
pub const DEFAULT_DATE_FORMAT: &str = "%-m/%-d/%Y";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub port: u16,
    pub data_dir: PathBuf,
    pub date_format: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            date_format: DEFAULT_DATE_FORMAT.to_string(),
        }
    }
}

impl AppConfig {
    /// Reads `PORT`, `APP_DATA_DIR` and `APP_DATE_FORMAT`, falling back to defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let port = lookup("PORT")
            .and_then(|value| value.parse::<u16>().ok())
            .unwrap_or(defaults.port);

        let data_dir = lookup("APP_DATA_DIR")
            .filter(|value| !value.is_empty())
            .map(PathBuf::from)
            .unwrap_or(defaults.data_dir);

        let date_format = match lookup("APP_DATE_FORMAT") {
            Some(format) if is_valid_date_format(&format) => format,
            Some(format) => {
                warn!("ignoring invalid APP_DATE_FORMAT {format:?}");
                defaults.date_format
            }
            None => defaults.date_format,
        };

        Self {
            port,
            data_dir,
            date_format,
        }
    }
}

pub fn today_string(format: &str) -> String {
    format_date(Local::now().date_naive(), format)
}

/// Renders `date` with `format`, falling back to `DEFAULT_DATE_FORMAT` when the
/// format string is not a valid strftime pattern.
pub fn format_date(date: NaiveDate, format: &str) -> String {
    let mut out = String::new();
    if write!(out, "{}", date.format(format)).is_ok() {
        return out;
    }
    warn!("invalid date format {format:?}, using {DEFAULT_DATE_FORMAT}");
    date.format(DEFAULT_DATE_FORMAT).to_string()
}

pub fn is_valid_date_format(format: &str) -> bool {
    !format.trim().is_empty() && !StrftimeItems::new(format).any(|item| matches!(item, Item::Error))
}
