//! plugindex - build a ranked plugin registry from a curated markdown catalog
//!
//! ```text
//! catalog.md ──► extract ──► enrich (metadata source) ──┐
//!                                                       ├──► merge ──► rank ──► registry.json
//! overrides.json ───────────────────────────────────────┘
//! ```

pub mod category;
pub mod config;
pub mod enrich;
pub mod error;
pub mod extract;
pub mod identity;
pub mod merge;
pub mod pipeline;
pub mod rank;
pub mod record;

pub use config::PipelineConfig;
pub use error::{FetchError, RegistryError};
pub use pipeline::{BuildReport, Pipeline};
pub use record::{Category, InstallType, Record};
