use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A named node in an element-discovery tree.
///
/// `children: None` and `children: Some(vec![])` both mark a leaf.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreeNode {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<TreeNode>>,
}

impl TreeNode {
    pub fn leaf(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            children: None,
        }
    }

    pub fn branch(name: impl Into<String>, children: Vec<TreeNode>) -> Self {
        Self {
            name: name.into(),
            children: Some(children),
        }
    }

    /// Children as a slice; empty for leaves.
    pub fn children(&self) -> &[TreeNode] {
        self.children.as_deref().unwrap_or(&[])
    }

    pub fn is_leaf(&self) -> bool {
        self.children().is_empty()
    }
}

/// Detail row attached to a tree node by name.
///
/// The backend sends these as positional arrays; only a few positions are
/// meaningful to the renderers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventDetail(pub Vec<serde_json::Value>);

impl EventDetail {
    const DATA: usize = 1;
    const MODULE: usize = 3;
    const EVENT_TYPE: usize = 10;

    pub fn data(&self) -> &str {
        self.text_at(Self::DATA)
    }

    pub fn module(&self) -> &str {
        self.text_at(Self::MODULE)
    }

    pub fn event_type(&self) -> &str {
        self.text_at(Self::EVENT_TYPE)
    }

    fn text_at(&self, index: usize) -> &str {
        self.0.get(index).and_then(|v| v.as_str()).unwrap_or("")
    }
}

/// Element-discovery response: a tree of event ids plus the detail row for
/// each id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiscoveryTree {
    pub tree: TreeNode,
    #[serde(default)]
    pub data: HashMap<String, EventDetail>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_null_and_missing_children() {
        let json = r#"{"name":"root","children":[{"name":"a","children":null},{"name":"b"}]}"#;
        let tree: TreeNode = serde_json::from_str(json).unwrap();

        assert_eq!(tree.children().len(), 2);
        assert!(tree.children()[0].is_leaf());
        assert!(tree.children()[1].is_leaf());
        assert!(!tree.is_leaf());
    }

    #[test]
    fn test_event_detail_positions() {
        let json = r#"["2024-01-01", "example.com", "src", "sfp_dns", 0, 0, 0, "", "", "", "INTERNET_NAME"]"#;
        let detail: EventDetail = serde_json::from_str(json).unwrap();

        assert_eq!(detail.data(), "example.com");
        assert_eq!(detail.module(), "sfp_dns");
        assert_eq!(detail.event_type(), "INTERNET_NAME");
    }

    #[test]
    fn test_event_detail_short_row() {
        let detail = EventDetail(vec![serde_json::json!("x")]);
        assert_eq!(detail.data(), "");
        assert_eq!(detail.event_type(), "");
    }

    #[test]
    fn test_discovery_tree_without_data() {
        let parsed: DiscoveryTree = serde_json::from_str(r#"{"tree":{"name":"r"}}"#).unwrap();
        assert!(parsed.data.is_empty());
        assert!(parsed.tree.is_leaf());
    }
}
