//! Site metadata configuration for `pagemeta.toml`.
//!
//! # Module Structure
//!
//! ```text
//! config/
//! ├── section/       # Configuration section definitions
//! │   ├── site       # [site]
//! │   ├── image      # [image]
//! │   ├── keywords   # [keywords]
//! │   ├── og         # [og]
//! │   ├── twitter    # [twitter]
//! │   └── schemaorg  # [schemaorg]
//! ├── types/         # Utility types
//! │   ├── error      # ConfigError, ConfigDiagnostics
//! │   ├── field      # FieldPath
//! │   └── handle     # Global config handle
//! └── mod.rs         # MetaConfig (this file)
//! ```
//!
//! # Sections
//!
//! | Section       | Purpose                                          |
//! |---------------|--------------------------------------------------|
//! | `[site]`      | Protocol, domain, site name, default object type |
//! | `[image]`     | Default image and base URL for relative paths    |
//! | `[keywords]`  | Included and default keyword lists               |
//! | `[og]`        | Open Graph / Facebook properties                 |
//! | `[twitter]`   | Twitter Card properties                          |
//! | `[schemaorg]` | Schema.org itemprops and JSON-LD                 |

pub mod section;
pub mod types;
mod util;

pub use section::{
    ImageConfig, KeywordsConfig, OgConfig, SchemaorgConfig, SiteConfig, TwitterConfig,
};
pub use types::{ConfigDiagnostics, ConfigError, FieldPath, cfg, init_config, reload_config};
pub use util::find_config_file;

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default config file name, searched upward from the working directory.
pub const DEFAULT_CONFIG_NAME: &str = "pagemeta.toml";

// ============================================================================
// root configuration
// ============================================================================

/// Root configuration structure representing pagemeta.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MetaConfig {
    /// Absolute path to the config file (internal use only)
    #[serde(skip)]
    pub config_path: PathBuf,

    /// Site identity (protocol, domain, name, default type)
    pub site: SiteConfig,

    /// Image defaults and base URL
    pub image: ImageConfig,

    /// Keyword lists
    pub keywords: KeywordsConfig,

    /// Open Graph / Facebook settings
    pub og: OgConfig,

    /// Twitter Card settings
    pub twitter: TwitterConfig,

    /// Schema.org settings
    pub schemaorg: SchemaorgConfig,
}

impl MetaConfig {
    /// Load and validate configuration from a file.
    ///
    /// Unknown keys are surfaced as `tracing` warnings rather than errors,
    /// so a config written for a newer version still loads.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let config = Self::from_path(path.as_ref())?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse configuration from a file without validating.
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(path.to_path_buf(), e))?;

        let (mut config, ignored) = Self::parse_with_ignored(&content)?;
        config.config_path = path.to_path_buf();

        for field in &ignored {
            tracing::warn!(
                file = %path.display(),
                "unknown config field `{field}`, ignored"
            );
        }

        Ok(config)
    }

    /// Parse TOML content, collecting any unknown fields.
    fn parse_with_ignored(content: &str) -> Result<(Self, Vec<String>), ConfigError> {
        let mut ignored = Vec::new();
        let deserializer = toml::Deserializer::new(content);
        let config = serde_ignored::deserialize(deserializer, |path: serde_ignored::Path| {
            ignored.push(path.to_string());
        })?;
        Ok((config, ignored))
    }

    /// Parse TOML content without touching the filesystem.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Ok(Self::parse_with_ignored(content)?.0)
    }

    /// Run all section validators, failing on collected errors.
    ///
    /// Warnings are emitted through `tracing` and never fail the load.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut diag = ConfigDiagnostics::new();
        self.site.validate(&mut diag);
        self.image.validate(&mut diag);
        self.twitter.validate(&mut diag);
        self.schemaorg.validate(&mut diag);
        diag.emit_warnings();
        diag.into_result().map_err(ConfigError::Diagnostics)
    }
}
