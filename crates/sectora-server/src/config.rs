use std::path::PathBuf;

use thiserror::Error;

use sectora_export::exporter::ExportOptions;
use sectora_llm::provider::{DEFAULT_AZURE_API_VERSION, ModelSettings};
use sectora_search::types::DEFAULT_TOP_K;

pub const DEFAULT_ADDR: &str = "0.0.0.0:3001";
pub const DEFAULT_PDF_FONT: &str = "NanumGothic-Regular.ttf";
pub const DEFAULT_PDF_FONT_BOLD: &str = "NanumGothic-Bold.ttf";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value for {var}: {value}")]
    Invalid { var: &'static str, value: String },
}

/// Azure AI Search connection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchSettings {
    pub endpoint: String,
    pub api_key: String,
    pub index: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub addr: String,
    pub search: SearchSettings,
    pub model: ModelSettings,
    pub search_top: usize,
    pub fonts: ExportOptions,
}

impl AppConfig {
    /// Read configuration from the process environment, after loading a
    /// `.env` file if one exists.
    pub fn from_env() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable source. Blank values
    /// count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let require = |key: &'static str| get(key).ok_or(ConfigError::Missing(key));

        let search = SearchSettings {
            endpoint: require("AZURE_SEARCH_ENDPOINT")?,
            api_key: require("AZURE_SEARCH_KEY")?,
            index: require("AZURE_SEARCH_INDEX")?,
        };

        let model = match get("AZURE_OPENAI_KEY") {
            Some(key) => ModelSettings::azure(
                key,
                require("AZURE_OPENAI_ENDPOINT")?,
                require("AZURE_OPENAI_DEPLOYMENT")?,
            )
            .with_api_version(
                get("AZURE_OPENAI_API_VERSION").unwrap_or_else(|| DEFAULT_AZURE_API_VERSION.into()),
            ),
            None => ModelSettings::openai(
                get("OPENAI_API_KEY").ok_or(ConfigError::Missing("AZURE_OPENAI_KEY"))?,
                require("OPENAI_MODEL")?,
            ),
        };

        let search_top = match get("SECTORA_SEARCH_TOP") {
            Some(value) => value
                .trim()
                .parse::<usize>()
                .ok()
                .filter(|n| *n > 0)
                .ok_or(ConfigError::Invalid {
                    var: "SECTORA_SEARCH_TOP",
                    value,
                })?,
            None => DEFAULT_TOP_K,
        };

        let fonts = ExportOptions {
            pdf_font: Some(PathBuf::from(
                get("SECTORA_PDF_FONT").unwrap_or_else(|| DEFAULT_PDF_FONT.into()),
            )),
            pdf_font_bold: Some(PathBuf::from(
                get("SECTORA_PDF_FONT_BOLD").unwrap_or_else(|| DEFAULT_PDF_FONT_BOLD.into()),
            )),
        };

        Ok(Self {
            addr: get("SECTORA_ADDR").unwrap_or_else(|| DEFAULT_ADDR.into()),
            search,
            model,
            search_top,
            fonts,
        })
    }
}
