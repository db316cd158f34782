//! Typed form of the `(path, isEssential)` pair a panel sends back after
//! the user picks a property from the common tree.

use std::fmt;

use propbake_api_core::{PathError, PropertyPath};

use crate::host::{resolve, resolve_mut, HostLayer};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PropertyTarget {
    /// A property of the main tree, addressed by structural path.
    Structural(PropertyPath),
    /// An entry of the essential-properties namespace, addressed by name.
    Essential(String),
}

impl PropertyTarget {
    /// Parse the boundary representation. Essential targets must use the
    /// sentinel path form `Essential|<name>`.
    pub fn parse(path: &str, is_essential: bool) -> Result<Self, PathError> {
        let parsed = PropertyPath::parse(path)?;
        Self::from_path(parsed, is_essential)
    }

    pub fn from_path(path: PropertyPath, is_essential: bool) -> Result<Self, PathError> {
        if !is_essential {
            return Ok(PropertyTarget::Structural(path));
        }
        match path.essential_name() {
            Some(name) => Ok(PropertyTarget::Essential(name.to_string())),
            None => Err(PathError::NotEssential(path.to_string())),
        }
    }

    pub fn is_essential(&self) -> bool {
        matches!(self, PropertyTarget::Essential(_))
    }

    /// Path form, as it appears in the common tree.
    pub fn path(&self) -> PropertyPath {
        match self {
            PropertyTarget::Structural(path) => path.clone(),
            PropertyTarget::Essential(name) => PropertyPath::essential(name.clone()),
        }
    }

    /// Resolve against one layer. `None` means this layer has no such property.
    pub fn resolve<'a, L: HostLayer>(&self, layer: &'a L) -> Option<&'a L::Property> {
        match self {
            PropertyTarget::Structural(path) => resolve(layer.root(), path),
            PropertyTarget::Essential(name) => layer.essential_property(name),
        }
    }

    pub fn resolve_mut<'a, L: HostLayer>(&self, layer: &'a mut L) -> Option<&'a mut L::Property> {
        match self {
            PropertyTarget::Structural(path) => resolve_mut(layer.root_mut(), path),
            PropertyTarget::Essential(name) => layer.essential_property_mut(name),
        }
    }
}

impl fmt::Display for PropertyTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path())
    }
}
