//! propbake-api-core: shared path, value and result-tree types (host-agnostic)

pub mod blend;
pub mod json;
pub mod property_path;
pub mod status;
pub mod tree;
pub mod value;
pub mod write_ops;

pub use property_path::{PathError, PropertyPath, ESSENTIAL_MARKER, SEGMENT_DELIMITER};
pub use status::PropertyStatus;
pub use tree::{CommonPropertyTree, PropertyNode};
pub use value::{Value, ValueKind};
pub use write_ops::{KeyframeWrite, WriteBatch};
