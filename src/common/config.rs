//! # Configuration
//!
//! Settings for the classifier are layered, lowest to highest priority:
//!
//! 1. Built-in defaults ([`DEFAULT_ENDPOINT`], [`DEFAULT_IMAGE`])
//! 2. TOML configuration file
//! 3. Environment (`HF_API_URL`, `HF_API_KEY`)
//! 4. Command-line flags
//!
//! The credential has no default: if no layer supplies one, resolution fails.
//!
//! # Example TOML
//!
//! ```toml
//! [classifier]
//! endpoint = "https://api-inference.huggingface.co/models/google/vit-base-patch16-224"
//! image = "data/000000039769.jpeg"
//! timeout_secs = 30
//! pause_on_exit = false
//! ```

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Hosted ViT model used when nothing else is configured.
pub const DEFAULT_ENDPOINT: &str =
    "https://api-inference.huggingface.co/models/google/vit-base-patch16-224";

/// Sample image shipped with the tutorial.
pub const DEFAULT_IMAGE: &str = "data/000000039769.jpeg";

pub const ENV_API_KEY: &str = "HF_API_KEY";
pub const ENV_API_URL: &str = "HF_API_URL";

/// Load a TOML configuration file and deserialize it into the specified type.
///
/// # Returns
/// - `Ok(T)`: Successfully loaded and parsed configuration
/// - `Err`: File I/O or parsing error
pub fn load_config<T>(path: impl AsRef<Path>) -> Result<T>
where
    T: for<'de> Deserialize<'de>,
{
    let content = fs::read_to_string(path)?;
    let config: T = toml::from_str(&content)?;
    Ok(config)
}

/// Contents of a configuration file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClassifierConfig {
    #[serde(default)]
    pub classifier: ClassifierSettings,
}

impl ClassifierConfig {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        load_config(path)
    }
}

/// Partially specified settings. Every layer fills in what it knows.
#[derive(Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierSettings {
    /// Inference endpoint URL
    pub endpoint: Option<String>,
    /// Bearer token. Prefer the environment over writing it to a file.
    pub token: Option<String>,
    /// Image to classify
    pub image: Option<PathBuf>,
    /// Transport timeout; unset means the HTTP client's default
    pub timeout_secs: Option<u64>,
    /// Wait for Enter before exiting
    pub pause_on_exit: bool,
}

/// Values given on the command line. `None` leaves the lower layer in place.
#[derive(Clone, Default)]
pub struct Overrides {
    pub endpoint: Option<String>,
    pub token: Option<String>,
    pub image: Option<PathBuf>,
    pub timeout_secs: Option<u64>,
    pub pause_on_exit: bool,
}

impl ClassifierSettings {
    /// Applies environment variables through `lookup`, which stands in for
    /// `std::env::var` so tests do not have to mutate the process environment.
    pub fn apply_env<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(endpoint) = lookup(ENV_API_URL).filter(|v| !v.is_empty()) {
            self.endpoint = Some(endpoint);
        }
        if let Some(token) = lookup(ENV_API_KEY).filter(|v| !v.is_empty()) {
            self.token = Some(token);
        }
        self
    }

    pub fn apply_overrides(mut self, overrides: Overrides) -> Self {
        if overrides.endpoint.is_some() {
            self.endpoint = overrides.endpoint;
        }
        if overrides.token.is_some() {
            self.token = overrides.token;
        }
        if overrides.image.is_some() {
            self.image = overrides.image;
        }
        if overrides.timeout_secs.is_some() {
            self.timeout_secs = overrides.timeout_secs;
        }
        self.pause_on_exit |= overrides.pause_on_exit;
        self
    }

    /// Fills remaining gaps with defaults. Fails when no credential was given.
    pub fn resolve(self) -> Result<RunConfig> {
        let token = match self.token {
            Some(token) if !token.is_empty() => token,
            _ => bail!(
                "no API token configured: set {} or pass --token",
                ENV_API_KEY
            ),
        };

        Ok(RunConfig {
            endpoint: self
                .endpoint
                .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string()),
            token,
            image: self.image.unwrap_or_else(|| PathBuf::from(DEFAULT_IMAGE)),
            timeout: self.timeout_secs.map(Duration::from_secs),
            pause_on_exit: self.pause_on_exit,
        })
    }
}

impl fmt::Debug for ClassifierSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClassifierSettings")
            .field("endpoint", &self.endpoint)
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .field("image", &self.image)
            .field("timeout_secs", &self.timeout_secs)
            .field("pause_on_exit", &self.pause_on_exit)
            .finish()
    }
}

/// Fully resolved settings for one run.
#[derive(Clone)]
pub struct RunConfig {
    pub endpoint: String,
    pub token: String,
    pub image: PathBuf,
    pub timeout: Option<Duration>,
    pub pause_on_exit: bool,
}

impl fmt::Debug for RunConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RunConfig")
            .field("endpoint", &self.endpoint)
            .field("token", &"<redacted>")
            .field("image", &self.image)
            .field("timeout", &self.timeout)
            .field("pause_on_exit", &self.pause_on_exit)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_need_a_token() {
        let err = ClassifierSettings::default().resolve().unwrap_err();
        assert!(err.to_string().contains(ENV_API_KEY));
    }

    #[test]
    fn test_defaults_fill_endpoint_and_image() {
        let config = ClassifierSettings::default()
            .apply_env(env(&[(ENV_API_KEY, "hf_env")]))
            .resolve()
            .unwrap();

        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(config.image, PathBuf::from(DEFAULT_IMAGE));
        assert_eq!(config.token, "hf_env");
        assert!(config.timeout.is_none());
        assert!(!config.pause_on_exit);
    }

    #[test]
    fn test_layer_priority() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
[classifier]
endpoint = "http://file.example/model"
token = "hf_file"
image = "from_file.jpeg"
timeout_secs = 5
"#
        )
        .unwrap();

        let settings = ClassifierConfig::from_file(file.path()).unwrap().classifier;
        assert_eq!(settings.endpoint.as_deref(), Some("http://file.example/model"));

        let config = settings
            .apply_env(env(&[(ENV_API_KEY, "hf_env"), (ENV_API_URL, "")]))
            .apply_overrides(Overrides {
                image: Some(PathBuf::from("cli.jpeg")),
                ..Default::default()
            })
            .resolve()
            .unwrap();

        // Empty env values are ignored
        assert_eq!(config.endpoint, "http://file.example/model");
        assert_eq!(config.token, "hf_env");
        assert_eq!(config.image, PathBuf::from("cli.jpeg"));
        assert_eq!(config.timeout, Some(Duration::from_secs(5)));
    }

    #[test]
    fn test_cli_token_beats_environment() {
        let config = ClassifierSettings::default()
            .apply_env(env(&[(ENV_API_KEY, "hf_env")]))
            .apply_overrides(Overrides {
                token: Some("hf_cli".to_string()),
                pause_on_exit: true,
                ..Default::default()
            })
            .resolve()
            .unwrap();

        assert_eq!(config.token, "hf_cli");
        assert!(config.pause_on_exit);
    }

    #[test]
    fn test_debug_redacts_token() {
        let settings = ClassifierSettings {
            token: Some("hf_secret".to_string()),
            ..Default::default()
        };
        assert!(!format!("{:?}", settings).contains("hf_secret"));

        let config = settings.resolve().unwrap();
        assert!(!format!("{:?}", config).contains("hf_secret"));
    }

    #[test]
    fn test_empty_file_section_is_allowed() {
        let config: ClassifierConfig = toml::from_str("").unwrap();
        assert!(config.classifier.endpoint.is_none());
    }
}
