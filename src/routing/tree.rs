//! Route configuration tree.
//!
//! The tree is declared by the application (in code or in a config file) and
//! never mutated afterwards. Component references are opaque: the resolver
//! only looks them up and hands them back.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One node of the nested route configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteConfigNode<C> {
    /// Single segment identifier (never dotted).
    pub name: String,

    /// Routing-library path, unused by resolution.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,

    /// Component rendered for this segment.
    #[serde(default = "Option::default", skip_serializing_if = "Option::is_none")]
    pub component: Option<C>,

    /// Candidates for the next segment, in declared order.
    #[serde(default = "Vec::new", skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<RouteConfigNode<C>>,
}

impl<C> RouteConfigNode<C> {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: None,
            component: None,
            children: Vec::new(),
        }
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn with_component(mut self, component: C) -> Self {
        self.component = Some(component);
        self
    }

    pub fn with_children(mut self, children: Vec<RouteConfigNode<C>>) -> Self {
        self.children = children;
        self
    }

    pub fn with_child(mut self, child: RouteConfigNode<C>) -> Self {
        self.children.push(child);
        self
    }

    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }
}

/// First node named `segment`, scanning in declared order.
pub fn find_child<'a, C>(nodes: &'a [RouteConfigNode<C>], segment: &str) -> Option<(usize, &'a RouteConfigNode<C>)> {
    nodes.iter().enumerate().find(|(_, node)| node.name == segment)
}

/// Component reference used by file-based configurations: the component's registered name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ComponentId(String);

impl ComponentId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ComponentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ComponentId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_child_first_match_wins() {
        let nodes = vec![
            RouteConfigNode::new("a").with_component(1),
            RouteConfigNode::new("b").with_component(2),
            RouteConfigNode::new("a").with_component(3),
        ];
        let (index, node) = find_child(&nodes, "a").unwrap();
        assert_eq!(index, 0);
        assert_eq!(node.component, Some(1));
        assert!(find_child(&nodes, "z").is_none());
    }

    #[test]
    fn test_deserialize_nested_toml() {
        let toml_str = r#"
            name = "d"
            path = "/d"
            component = "DView"

            [[children]]
            name = "e"
            component = "EView"

            [[children]]
            name = "h"
        "#;
        let node: RouteConfigNode<ComponentId> = toml::from_str(toml_str).unwrap();
        assert_eq!(node.name, "d");
        assert_eq!(node.component, Some(ComponentId::from("DView")));
        assert_eq!(node.children.len(), 2);
        assert!(node.children[1].component.is_none());
        assert!(!node.children[1].has_children());
    }
}
