//! Route descriptors and the boundary normalization to a route name.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use uuid::Uuid;

use crate::routing::name::RouteName;

/// Metadata attached to an active route.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RouteMeta {
    /// Identifier of the transition that produced this route.
    pub id: Option<Uuid>,

    /// Parameter names owned by each segment, keyed by the segment's full name
    /// (e.g. `"users.view" → ["id"]`).
    pub params: BTreeMap<String, Vec<String>>,
}

/// An active route: its name plus opaque parameters and metadata.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RouteDescriptor {
    pub name: RouteName,

    #[serde(default)]
    pub params: BTreeMap<String, Value>,

    #[serde(default)]
    pub meta: RouteMeta,
}

impl RouteDescriptor {
    /// Create a descriptor with no params.
    pub fn new(name: impl Into<RouteName>) -> Self {
        Self {
            name: name.into(),
            params: BTreeMap::new(),
            meta: RouteMeta::default(),
        }
    }

    /// Add a parameter value.
    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    /// Declare which params belong to the segment `segment_name`.
    pub fn with_segment_params<I, S>(mut self, segment_name: impl Into<String>, params: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.meta
            .params
            .insert(segment_name.into(), params.into_iter().map(Into::into).collect());
        self
    }

    /// Same name and same params. Metadata is ignored.
    pub fn same_state(&self, other: &RouteDescriptor) -> bool {
        self.name == other.name && self.params == other.params
    }
}

/// A route as accepted at the public boundary: a bare name or a full descriptor.
#[derive(Debug, Clone, Copy)]
pub enum RouteRef<'a> {
    Name(&'a str),
    Descriptor(&'a RouteDescriptor),
}

impl<'a> RouteRef<'a> {
    /// Normalize to the route name. The only place the two forms differ.
    pub fn route_name(self) -> RouteName {
        match self {
            RouteRef::Name(name) => RouteName::from(name),
            RouteRef::Descriptor(descriptor) => descriptor.name.clone(),
        }
    }
}

impl<'a> From<&'a str> for RouteRef<'a> {
    fn from(name: &'a str) -> Self {
        RouteRef::Name(name)
    }
}

impl<'a> From<&'a String> for RouteRef<'a> {
    fn from(name: &'a String) -> Self {
        RouteRef::Name(name.as_str())
    }
}

impl<'a> From<&'a RouteName> for RouteRef<'a> {
    fn from(name: &'a RouteName) -> Self {
        RouteRef::Name(name.as_str())
    }
}

impl<'a> From<&'a RouteDescriptor> for RouteRef<'a> {
    fn from(descriptor: &'a RouteDescriptor) -> Self {
        RouteRef::Descriptor(descriptor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_both_forms_normalize_to_same_name() {
        let descriptor = RouteDescriptor::new("d.h.m").with_param("id", 7);
        assert_eq!(RouteRef::from(&descriptor).route_name(), "d.h.m");
        assert_eq!(RouteRef::from("d.h.m").route_name(), "d.h.m");
    }

    #[test]
    fn test_same_state_ignores_meta() {
        let mut a = RouteDescriptor::new("users.view").with_param("id", "1");
        let b = RouteDescriptor::new("users.view").with_param("id", "1");
        a.meta.id = Some(Uuid::new_v4());
        assert!(a.same_state(&b));

        let c = RouteDescriptor::new("users.view").with_param("id", "2");
        assert!(!a.same_state(&c));
    }

    #[test]
    fn test_deserialize_minimal_descriptor() {
        let descriptor: RouteDescriptor = serde_json::from_str(r#"{"name":"a.b"}"#).unwrap();
        assert_eq!(descriptor.name, "a.b");
        assert!(descriptor.params.is_empty());
        assert!(descriptor.meta.id.is_none());
    }
}
