//! propbake core (host-agnostic)
//!
//! Given the layers selected in a host composition, computes the property
//! structure they all share, keeps only properties carrying explicit animation
//! data, and applies bulk mutations (baking, expression toggling) to every
//! selected instance inside one undo group.
//!
//! Hosts plug in through the traits in [`host`]; [`memory`] provides a plain
//! data implementation.

pub mod bake;
pub mod builder;
pub mod config;
pub mod error;
pub mod essential;
pub mod expression;
pub mod host;
pub mod memory;
pub mod merge;
pub mod modified;
pub mod service;
pub mod status;
pub mod target;
pub mod undo;
pub mod walker;

// Re-exports for consumers (host adapters)
pub use bake::{bake, bake_layers, BakeReport, BatchOutcome};
pub use builder::{build_common_tree, build_for_composition};
pub use config::BakerConfig;
pub use error::BakerError;
pub use expression::{set_expression_enabled, set_expression_enabled_on_layers};
pub use host::{Composition, HostLayer, HostProperty, PropertyType};
pub use service::PropertyBaker;
pub use status::{property_status, status_for_composition};
pub use target::PropertyTarget;
pub use propbake_api_core::{
    CommonPropertyTree, PropertyNode, PropertyPath, PropertyStatus, Value, ValueKind,
};
