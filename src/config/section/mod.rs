//! Configuration section definitions.

mod image;
mod keywords;
mod og;
mod schemaorg;
mod site;
mod twitter;

pub use image::ImageConfig;
pub use keywords::KeywordsConfig;
pub use og::OgConfig;
pub use schemaorg::{OBJECT_TYPES, SchemaorgConfig};
pub use site::SiteConfig;
pub use twitter::{CARD_TYPES, TwitterConfig};
