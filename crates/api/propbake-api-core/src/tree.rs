//! Result tree of properties shared by every selected layer.
//!
//! Serializes as the tagged union consumed by panels:
//!   { "type": "group", "name": "Transform", "matchName": "ADBE Transform Group",
//!     "path": "ADBE Transform Group", "children": [ ... ] }
//!   { "type": "property", "name": "Opacity", "matchName": "ADBE Opacity",
//!     "path": "ADBE Transform Group|ADBE Opacity" }
//!
//! The synthetic essential-properties group has no structural id or path and
//! omits both; essential leaves carry `"isEssential": true`.

use serde::{Deserialize, Serialize};

use crate::PropertyPath;

fn is_false(b: &bool) -> bool {
    !*b
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum PropertyNode {
    Group {
        name: String,
        #[serde(
            rename = "matchName",
            alias = "structuralId",
            default,
            skip_serializing_if = "Option::is_none"
        )]
        match_name: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        path: Option<PropertyPath>,
        children: Vec<PropertyNode>,
    },
    Property {
        name: String,
        #[serde(rename = "matchName", alias = "structuralId")]
        match_name: String,
        path: PropertyPath,
        #[serde(
            rename = "isEssential",
            default,
            skip_serializing_if = "is_false"
        )]
        is_essential: bool,
    },
}

impl PropertyNode {
    pub fn leaf(name: impl Into<String>, match_name: impl Into<String>, path: PropertyPath) -> Self {
        PropertyNode::Property {
            name: name.into(),
            match_name: match_name.into(),
            path,
            is_essential: false,
        }
    }

    /// Leaf addressing an entry of the essential-properties namespace.
    pub fn essential_leaf(name: impl Into<String>) -> Self {
        let name = name.into();
        PropertyNode::Property {
            path: PropertyPath::essential(name.clone()),
            match_name: name.clone(),
            name,
            is_essential: true,
        }
    }

    pub fn group(
        name: impl Into<String>,
        match_name: impl Into<String>,
        path: PropertyPath,
        children: Vec<PropertyNode>,
    ) -> Self {
        PropertyNode::Group {
            name: name.into(),
            match_name: Some(match_name.into()),
            path: Some(path),
            children,
        }
    }

    /// Group with no structural counterpart in the host tree.
    pub fn synthetic_group(name: impl Into<String>, children: Vec<PropertyNode>) -> Self {
        PropertyNode::Group {
            name: name.into(),
            match_name: None,
            path: None,
            children,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            PropertyNode::Group { name, .. } | PropertyNode::Property { name, .. } => name,
        }
    }

    pub fn path(&self) -> Option<&PropertyPath> {
        match self {
            PropertyNode::Group { path, .. } => path.as_ref(),
            PropertyNode::Property { path, .. } => Some(path),
        }
    }

    pub fn is_group(&self) -> bool {
        matches!(self, PropertyNode::Group { .. })
    }

    pub fn is_essential(&self) -> bool {
        matches!(
            self,
            PropertyNode::Property {
                is_essential: true,
                ..
            }
        )
    }

    /// Children of a group; empty for leaves.
    pub fn children(&self) -> &[PropertyNode] {
        match self {
            PropertyNode::Group { children, .. } => children,
            PropertyNode::Property { .. } => &[],
        }
    }

    fn find(&self, target: &PropertyPath) -> Option<&PropertyNode> {
        if self.path() == Some(target) {
            return Some(self);
        }
        self.children().iter().find_map(|c| c.find(target))
    }

    fn collect_leaves<'a>(&'a self, out: &mut Vec<&'a PropertyNode>) {
        match self {
            PropertyNode::Property { .. } => out.push(self),
            PropertyNode::Group { children, .. } => {
                for child in children {
                    child.collect_leaves(out);
                }
            }
        }
    }
}

/// Properties common to the current selection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CommonPropertyTree {
    /// Number of selected layers the tree was computed over.
    #[serde(rename = "layers")]
    pub layer_count: usize,
    #[serde(rename = "tree")]
    pub roots: Vec<PropertyNode>,
}

impl CommonPropertyTree {
    pub fn new(layer_count: usize, roots: Vec<PropertyNode>) -> Self {
        Self { layer_count, roots }
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// Locate a node by path, depth-first in tree order.
    pub fn find(&self, path: &PropertyPath) -> Option<&PropertyNode> {
        self.roots.iter().find_map(|n| n.find(path))
    }

    /// All leaves, depth-first in tree order.
    pub fn leaves(&self) -> Vec<&PropertyNode> {
        let mut out = Vec::new();
        for root in &self.roots {
            root.collect_leaves(&mut out);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> CommonPropertyTree {
        let transform = PropertyPath::from_segments(["ADBE Transform Group"]);
        CommonPropertyTree::new(
            2,
            vec![
                PropertyNode::group(
                    "Transform",
                    "ADBE Transform Group",
                    transform.clone(),
                    vec![PropertyNode::leaf(
                        "Opacity",
                        "ADBE Opacity",
                        transform.child("ADBE Opacity"),
                    )],
                ),
                PropertyNode::synthetic_group(
                    "Essential Graphics",
                    vec![PropertyNode::essential_leaf("Slider")],
                ),
            ],
        )
    }

    #[test]
    fn serializes_tagged_union() {
        let v = serde_json::to_value(sample()).unwrap();
        assert_eq!(
            v,
            json!({
                "layers": 2,
                "tree": [
                    {
                        "type": "group",
                        "name": "Transform",
                        "matchName": "ADBE Transform Group",
                        "path": "ADBE Transform Group",
                        "children": [{
                            "type": "property",
                            "name": "Opacity",
                            "matchName": "ADBE Opacity",
                            "path": "ADBE Transform Group|ADBE Opacity"
                        }]
                    },
                    {
                        "type": "group",
                        "name": "Essential Graphics",
                        "children": [{
                            "type": "property",
                            "name": "Slider",
                            "matchName": "Slider",
                            "path": "Essential|Slider",
                            "isEssential": true
                        }]
                    }
                ]
            })
        );
    }

    #[test]
    fn deserializes_structural_id_alias() {
        let node: PropertyNode = serde_json::from_value(json!({
            "type": "property",
            "name": "Opacity",
            "structuralId": "ADBE Opacity",
            "path": "ADBE Transform Group|ADBE Opacity"
        }))
        .unwrap();
        assert!(!node.is_essential());
        assert_eq!(node.name(), "Opacity");
    }

    #[test]
    fn find_and_leaves() {
        let tree = sample();
        let opacity = PropertyPath::parse("ADBE Transform Group|ADBE Opacity").unwrap();
        assert_eq!(tree.find(&opacity).map(|n| n.name()), Some("Opacity"));
        assert_eq!(
            tree.find(&PropertyPath::essential("Slider"))
                .map(|n| n.is_essential()),
            Some(true)
        );
        assert!(tree
            .find(&PropertyPath::parse("ADBE Transform Group|ADBE Scale").unwrap())
            .is_none());
        let names: Vec<_> = tree.leaves().iter().map(|n| n.name()).collect();
        assert_eq!(names, vec!["Opacity", "Slider"]);
    }
}
