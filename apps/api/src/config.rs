use std::str::FromStr;

use anyhow::{Context, Result};

use crate::layout::{LayoutMetrics, DEFAULT_MAX_PAGES};

/// Application configuration loaded from environment variables.
/// Every variable is optional; invalid values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// Hard ceiling on pages per distribution run.
    pub max_pages: usize,
    /// Forward distribution trace events to `tracing` at debug level.
    pub trace_distribution: bool,
    pub metrics: LayoutMetrics,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup (the environment in production).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = LayoutMetrics::default();
        let metrics = LayoutMetrics {
            portrait_content_height: parse_or(
                &lookup,
                "LAYOUT_PORTRAIT_HEIGHT",
                defaults.portrait_content_height,
            )?,
            landscape_content_height: parse_or(
                &lookup,
                "LAYOUT_LANDSCAPE_HEIGHT",
                defaults.landscape_content_height,
            )?,
            section_header_height: parse_or(
                &lookup,
                "LAYOUT_HEADER_HEIGHT",
                defaults.section_header_height,
            )?,
            chars_per_line: parse_or(&lookup, "LAYOUT_CHARS_PER_LINE", defaults.chars_per_line)?,
            line_height: parse_or(&lookup, "LAYOUT_LINE_HEIGHT", defaults.line_height)?,
            fixed_line_height: parse_or(
                &lookup,
                "LAYOUT_FIXED_LINE_HEIGHT",
                defaults.fixed_line_height,
            )?,
            item_spacing: parse_or(&lookup, "LAYOUT_ITEM_SPACING", defaults.item_spacing)?,
            items_per_row: parse_or(&lookup, "LAYOUT_ITEMS_PER_ROW", defaults.items_per_row)?,
            chip_row_height: parse_or(&lookup, "LAYOUT_CHIP_ROW_HEIGHT", defaults.chip_row_height)?,
            general_base_height: parse_or(
                &lookup,
                "LAYOUT_GENERAL_BASE_HEIGHT",
                defaults.general_base_height,
            )?,
        };

        if metrics.chars_per_line == 0 || metrics.items_per_row == 0 {
            anyhow::bail!("LAYOUT_CHARS_PER_LINE and LAYOUT_ITEMS_PER_ROW must be at least 1");
        }
        let heights = [
            ("LAYOUT_PORTRAIT_HEIGHT", metrics.portrait_content_height),
            ("LAYOUT_LANDSCAPE_HEIGHT", metrics.landscape_content_height),
            ("LAYOUT_HEADER_HEIGHT", metrics.section_header_height),
            ("LAYOUT_LINE_HEIGHT", metrics.line_height),
            ("LAYOUT_FIXED_LINE_HEIGHT", metrics.fixed_line_height),
            ("LAYOUT_ITEM_SPACING", metrics.item_spacing),
            ("LAYOUT_CHIP_ROW_HEIGHT", metrics.chip_row_height),
            ("LAYOUT_GENERAL_BASE_HEIGHT", metrics.general_base_height),
        ];
        for (key, value) in heights {
            if !value.is_finite() || value < 0.0 {
                anyhow::bail!("{key} must be a finite, non-negative number (got {value})");
            }
        }
        if metrics.portrait_content_height == 0.0 || metrics.landscape_content_height == 0.0 {
            anyhow::bail!("Page content heights must be positive");
        }

        Ok(Config {
            port: parse_or(&lookup, "PORT", 8080)?,
            rust_log: lookup("RUST_LOG").unwrap_or_else(|| "info".to_string()),
            max_pages: parse_or(&lookup, "LAYOUT_MAX_PAGES", DEFAULT_MAX_PAGES)?,
            trace_distribution: parse_or(&lookup, "LAYOUT_TRACE", false)?,
            metrics,
        })
    }
}

fn parse_or<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("Environment variable '{key}' has an invalid value '{raw}'")),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = Config::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.rust_log, "info");
        assert_eq!(config.max_pages, DEFAULT_MAX_PAGES);
        assert!(!config.trace_distribution);
        assert_eq!(config.metrics, LayoutMetrics::default());
    }

    #[test]
    fn test_overrides_are_applied() {
        let config = Config::from_lookup(lookup(&[
            ("PORT", "9000"),
            ("LAYOUT_MAX_PAGES", "5"),
            ("LAYOUT_TRACE", "true"),
            ("LAYOUT_CHARS_PER_LINE", "80"),
            ("LAYOUT_PORTRAIT_HEIGHT", "980.5"),
        ]))
        .unwrap();
        assert_eq!(config.port, 9000);
        assert_eq!(config.max_pages, 5);
        assert!(config.trace_distribution);
        assert_eq!(config.metrics.chars_per_line, 80);
        assert_eq!(config.metrics.portrait_content_height, 980.5);
    }

    #[test]
    fn test_invalid_values_fail() {
        assert!(Config::from_lookup(lookup(&[("PORT", "eighty")])).is_err());
        assert!(Config::from_lookup(lookup(&[("LAYOUT_ITEMS_PER_ROW", "0")])).is_err());
        assert!(Config::from_lookup(lookup(&[("LAYOUT_LANDSCAPE_HEIGHT", "-1")])).is_err());
        assert!(Config::from_lookup(lookup(&[("LAYOUT_LANDSCAPE_HEIGHT", "0")])).is_err());
        assert!(Config::from_lookup(lookup(&[("LAYOUT_ITEM_SPACING", "-1")])).is_err());
        assert!(Config::from_lookup(lookup(&[("LAYOUT_PORTRAIT_HEIGHT", "NaN")])).is_err());
        assert!(Config::from_lookup(lookup(&[("LAYOUT_LINE_HEIGHT", "inf")])).is_err());
        assert!(Config::from_lookup(lookup(&[("LAYOUT_HEADER_HEIGHT", "-0.5")])).is_err());
    }

    #[test]
    fn test_zero_increments_are_allowed() {
        let config = Config::from_lookup(lookup(&[("LAYOUT_ITEM_SPACING", "0")])).unwrap();
        assert_eq!(config.metrics.item_spacing, 0.0);
    }
}
