//! Container resource reporter library
//!
//! This crate provides the core functionality for:
//! - Querying a container runtime (Docker CLI or Engine API) for configured limits
//! - Normalizing runtime units (bytes, nanocores, shares, quota/period)
//! - Rendering localized, human-readable resource reports

pub mod error;
pub mod format;
pub mod locale;
pub mod models;
pub mod report;
pub mod reporter;
pub mod runtime;

pub use error::{ReportError, Result};
pub use locale::Locale;
pub use models::*;
pub use report::{render_container_table, RenderedLimits, ResourceReport};
pub use reporter::ResourceReporter;
pub use runtime::{connect, ContainerRuntime, RuntimeConfig};
