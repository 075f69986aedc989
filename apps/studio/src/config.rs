use std::path::PathBuf;

use anyhow::Result;

/// Application configuration loaded from environment variables.
/// Only the conversion endpoint is required; everything else has a default.
#[derive(Debug, Clone)]
pub struct Config {
    /// PDF conversion endpoint the export pipeline POSTs page images to.
    pub convert_endpoint_url: String,
    /// Directory where delivered export files land.
    pub download_dir: PathBuf,
    /// Directory holding the template font files.
    pub font_dir: PathBuf,
    /// Hosts whose photo assets may be rasterized without tainting the export.
    pub trusted_asset_hosts: Vec<String>,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            convert_endpoint_url: require_env("CONVERT_ENDPOINT_URL")?,
            download_dir: std::env::var("DOWNLOAD_DIR")
                .unwrap_or_else(|_| "exports".to_string())
                .into(),
            font_dir: std::env::var("FONT_DIR")
                .unwrap_or_else(|_| "assets/fonts".to_string())
                .into(),
            trusted_asset_hosts: parse_hosts(
                &std::env::var("TRUSTED_ASSET_HOSTS").unwrap_or_default(),
            ),
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key)
        .map_err(|_| anyhow::anyhow!("Required environment variable '{key}' is not set"))
}

/// Comma-separated host list; whitespace and empty segments are dropped.
fn parse_hosts(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|h| !h.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hosts_trims_and_drops_empty_segments() {
        assert_eq!(
            parse_hosts("cdn.example.com, assets.example.com,,"),
            vec!["cdn.example.com", "assets.example.com"]
        );
    }

    #[test]
    fn test_parse_hosts_empty_input_is_empty() {
        assert!(parse_hosts("").is_empty());
    }
}
