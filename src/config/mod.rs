//! Application Configuration
//!
//! User settings and preferences stored in TOML format.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Capture settings
    pub capture: CaptureSettings,
    /// OCR settings
    pub ocr: OcrSettings,
    /// Hint endpoint settings
    pub hint: HintSettings,
}

/// Capture-related settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaptureSettings {
    /// Write the captured region images to disk for troubleshooting
    pub save_debug_images: bool,
    /// Directory the debug images land in
    pub debug_dir: PathBuf,
}

impl Default for CaptureSettings {
    fn default() -> Self {
        Self {
            save_debug_images: false,
            debug_dir: PathBuf::from("."),
        }
    }
}

/// OCR backend settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OcrSettings {
    /// Explicit path to the Tesseract executable. When unset, the backend
    /// falls back to `TESSERACT_CMD`, then PATH, then the platform install
    /// locations.
    pub tesseract_cmd: Option<PathBuf>,
    /// Language passed to Tesseract's `-l` flag
    pub language: String,
}

impl Default for OcrSettings {
    fn default() -> Self {
        Self {
            tesseract_cmd: None,
            language: "eng".to_string(),
        }
    }
}

/// Hint-request endpoint settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HintSettings {
    /// Messages endpoint URL
    pub base_url: String,
    /// Model tried first
    pub model: String,
    /// Models retried in order when the primary is rejected
    pub fallback_models: Vec<String>,
    /// Completion budget for a hint
    pub max_tokens: u32,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for HintSettings {
    fn default() -> Self {
        Self {
            base_url: "https://api.anthropic.com/v1/messages".to_string(),
            model: "claude-3-5-sonnet-20241022".to_string(),
            fallback_models: vec![
                "claude-3-sonnet-20240229".to_string(),
                "claude-sonnet-4-20250514".to_string(),
            ],
            max_tokens: 300,
            timeout_secs: 30,
        }
    }
}

/// Load configuration from file
pub fn load_config(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)?;
    let config: AppConfig = toml::from_str(&content)?;
    Ok(config)
}

/// Save configuration to file
pub fn save_config(config: &AppConfig, path: &Path) -> Result<()> {
    let content = toml::to_string_pretty(config)?;
    std::fs::write(path, content)?;
    Ok(())
}

/// Get the configuration directory
pub fn get_config_dir() -> Result<PathBuf> {
    let proj_dirs = directories::ProjectDirs::from("com", "leethint", "LeetHint")
        .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;

    let config_dir = proj_dirs.config_dir().to_path_buf();
    std::fs::create_dir_all(&config_dir)?;

    Ok(config_dir)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_app_config() {
        let config = AppConfig::default();

        assert!(!config.capture.save_debug_images);
        assert_eq!(config.capture.debug_dir, PathBuf::from("."));

        assert!(config.ocr.tesseract_cmd.is_none());
        assert_eq!(config.ocr.language, "eng");

        assert!(config.hint.base_url.ends_with("/v1/messages"));
        assert_eq!(config.hint.fallback_models.len(), 2);
        assert_eq!(config.hint.max_tokens, 300);
    }

    #[test]
    fn test_config_serialization_roundtrip() {
        let config = AppConfig::default();

        let toml_str = toml::to_string_pretty(&config).unwrap();
        let parsed: AppConfig = toml::from_str(&toml_str).unwrap();

        assert_eq!(parsed.ocr.language, config.ocr.language);
        assert_eq!(parsed.hint.model, config.hint.model);
        assert_eq!(
            parsed.capture.save_debug_images,
            config.capture.save_debug_images
        );
    }

    #[test]
    fn test_config_with_custom_values() {
        let mut config = AppConfig::default();
        config.ocr.tesseract_cmd = Some(PathBuf::from("/usr/local/bin/tesseract"));
        config.capture.save_debug_images = true;
        config.hint.max_tokens = 500;

        let toml_str = toml::to_string_pretty(&config).unwrap();
        let parsed: AppConfig = toml::from_str(&toml_str).unwrap();

        assert_eq!(
            parsed.ocr.tesseract_cmd,
            Some(PathBuf::from("/usr/local/bin/tesseract"))
        );
        assert!(parsed.capture.save_debug_images);
        assert_eq!(parsed.hint.max_tokens, 500);
    }

    #[test]
    fn test_save_and_load_config() {
        let config = AppConfig::default();

        let temp_file = NamedTempFile::new().unwrap();
        save_config(&config, temp_file.path()).unwrap();

        let loaded = load_config(temp_file.path()).unwrap();
        assert_eq!(loaded.ocr.language, config.ocr.language);
        assert_eq!(loaded.hint.model, config.hint.model);
    }

    #[test]
    fn test_load_config_file_not_found() {
        let result = load_config(Path::new("/nonexistent/path/config.toml"));
        assert!(result.is_err());
    }

    #[test]
    fn test_load_config_invalid_toml() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(temp_file, "this is not valid toml {{{{").unwrap();

        let result = load_config(temp_file.path());
        assert!(result.is_err());
    }
}
