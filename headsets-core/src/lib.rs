use thiserror::Error;

pub mod audio;
pub mod host;
pub mod items;

pub use audio::{
    apply_to_catalog, deep_fry, is_headset, AudioField, PassSummary, Rule, HEADSET_RULES,
};
pub use host::{DatabaseServer, DeepFriedHeadsets, HostLogger, PostDbLoadMod, TracingLogger};
pub use items::{DatabaseTables, ItemCatalog, ItemProps, ItemTemplate, Templates};

#[derive(Debug, Error)]
pub enum HeadsetError {
    #[error("item catalog unavailable: {0}")]
    CatalogUnavailable(String),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, HeadsetError>;
