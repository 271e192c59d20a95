//! Project configuration in `sdkscope.toml`.
//!
//! ```toml
//! [filter]
//! audiences = ["public"]
//! generator = "fernapi/fern-typescript-sdk"
//! ```
//!
//! Values given on the command line win over the file.

use std::path::{Path, PathBuf};

use sdkscope_filter::AudienceSelection;
use sdkscope_ir::GeneratorName;
use serde::{Deserialize, Serialize};

/// File name looked up in the working directory when `--config` is absent.
pub(crate) const DEFAULT_CONFIG_FILE: &str = "sdkscope.toml";

#[derive(Debug, thiserror::Error)]
pub(crate) enum ConfigError {
    #[error("error reading config '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config '{}': {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("audience names cannot be empty")]
    EmptyAudience,
}

/// Top-level wrapper matching the TOML file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct ConfigFile {
    #[serde(default)]
    pub filter: FilterConfig,
}

/// The `[filter]` section.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct FilterConfig {
    #[serde(default)]
    pub audiences: Vec<String>,
    #[serde(default)]
    pub generator: Option<GeneratorName>,
}

impl ConfigFile {
    pub(crate) fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load `explicit` if given, otherwise `sdkscope.toml` from the working
    /// directory if it exists.
    pub(crate) fn discover(explicit: Option<&Path>) -> Result<Option<Self>, ConfigError> {
        match explicit {
            Some(path) => Self::load(path).map(Some),
            None => {
                let default = Path::new(DEFAULT_CONFIG_FILE);
                if default.is_file() {
                    tracing::debug!(path = %default.display(), "using default config file");
                    Self::load(default).map(Some)
                } else {
                    Ok(None)
                }
            }
        }
    }
}

/// Effective settings for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Settings {
    pub selection: AudienceSelection,
    pub generator: Option<GeneratorName>,
}

impl Settings {
    /// Merge command-line values over the config file.
    pub(crate) fn resolve(
        cli_audiences: &[String],
        cli_generator: Option<GeneratorName>,
        config: Option<&ConfigFile>,
    ) -> Result<Self, ConfigError> {
        let filter = config.map(|c| &c.filter);

        let audiences: &[String] = if cli_audiences.is_empty() {
            filter.map(|f| f.audiences.as_slice()).unwrap_or_default()
        } else {
            cli_audiences
        };
        if audiences.iter().any(|a| a.trim().is_empty()) {
            return Err(ConfigError::EmptyAudience);
        }

        let generator = cli_generator.or_else(|| filter.and_then(|f| f.generator));

        Ok(Settings {
            selection: AudienceSelection::from_names(audiences.iter().map(String::as_str)),
            generator,
        })
    }
}
