//! HTML meta tags, Open Graph / Twitter Cards and JSON-LD structured
//! data for web pages, driven by declarative per-entity or per-view
//! configuration.
//!
//! Entities implement [`MetaEntity`] with a declarative field→selector
//! mapping; views override the small getters of [`MetaView`]. Either way
//! resolution produces a [`Meta`] object with absolutized URLs,
//! deduplicated keywords, per-channel fallbacks, and a structured-data
//! tree ready for JSON-LD export through [`tags::render_head`].
//!
//! ```
//! use pagemeta::{MetaConfig, MetaView};
//!
//! struct AboutPage;
//!
//! impl MetaView for AboutPage {
//!     fn title(&self) -> Option<String> {
//!         Some("About".into())
//!     }
//!
//!     fn url(&self) -> Option<String> {
//!         Some("/about/".into())
//!     }
//! }
//!
//! let mut config = MetaConfig::default();
//! config.site.protocol = Some("https".into());
//! config.site.domain = Some("example.com".into());
//!
//! let meta = AboutPage.as_meta_with(&config, None)?;
//! assert_eq!(meta.url.as_deref(), Some("https://example.com/about/"));
//! # Ok::<(), pagemeta::MetaError>(())
//! ```

pub mod config;
pub mod core;
pub mod meta;
pub mod resolve;
pub mod schema;
pub mod tags;
pub mod utils;

pub use crate::config::{ConfigError, MetaConfig, cfg, init_config, reload_config};
pub use crate::core::{MetaError, RequestContext, RequestScope};
pub use crate::meta::{ImageObject, Meta, MetaEntity, MetaView, default_spec};
pub use crate::resolve::{FieldValue, MetaSource, MetadataSpec, Selector};
pub use crate::schema::{EntityKey, JsonMap, SchemaCache, as_json_ld, build_schema};
