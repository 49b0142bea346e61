//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check route segment names (non-empty, no separator, unique among siblings)
//! - Check component ids and cache capacity
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: RouteNodeConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system
//! - Nodes without a component are allowed; the resolver reports them lazily

use std::collections::HashSet;
use thiserror::Error;

use crate::config::schema::RouteNodeConfig;
use crate::routing::name::SEPARATOR;
use crate::routing::{ComponentId, RouteConfigNode, RouteName};

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("route under '{parent}' has an empty name")]
    EmptySegment { parent: RouteName },

    #[error("route segment '{name}' under '{parent}' contains '.'")]
    DottedSegment { parent: RouteName, name: String },

    #[error("route '{route}' is declared more than once")]
    DuplicateSibling { route: RouteName },

    #[error("route '{route}' has an empty component id")]
    EmptyComponent { route: RouteName },

    #[error("cache.max_entries must be greater than 0 when the cache is enabled")]
    ZeroCacheCapacity,
}

/// Validate a whole configuration.
pub fn validate_config(config: &RouteNodeConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    check_level(&config.routes, &RouteName::root(), &mut errors);

    if config.cache.enabled && config.cache.max_entries == 0 {
        errors.push(ValidationError::ZeroCacheCapacity);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Validate a route tree on its own.
pub fn validate_routes(routes: &[RouteConfigNode<ComponentId>]) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();
    check_level(routes, &RouteName::root(), &mut errors);
    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_level(
    nodes: &[RouteConfigNode<ComponentId>],
    parent: &RouteName,
    errors: &mut Vec<ValidationError>,
) {
    let mut seen = HashSet::new();

    for node in nodes {
        if node.name.is_empty() {
            errors.push(ValidationError::EmptySegment {
                parent: parent.clone(),
            });
            continue;
        }
        if node.name.contains(SEPARATOR) {
            errors.push(ValidationError::DottedSegment {
                parent: parent.clone(),
                name: node.name.clone(),
            });
            continue;
        }

        let route = parent.child(&node.name);
        if !seen.insert(node.name.as_str()) {
            errors.push(ValidationError::DuplicateSibling {
                route: route.clone(),
            });
        }
        if node
            .component
            .as_ref()
            .is_some_and(|component| component.as_str().trim().is_empty())
        {
            errors.push(ValidationError::EmptyComponent {
                route: route.clone(),
            });
        }

        check_level(&node.children, &route, errors);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(name: &str, component: &str) -> RouteConfigNode<ComponentId> {
        RouteConfigNode::new(name).with_component(ComponentId::new(component))
    }

    #[test]
    fn test_valid_tree() {
        let routes = vec![
            node("home", "Home"),
            node("users", "Users").with_child(RouteConfigNode::new("view")),
        ];
        assert!(validate_routes(&routes).is_ok());
    }

    #[test]
    fn test_collects_every_error() {
        let config = RouteNodeConfig {
            routes: vec![
                node("home", "Home"),
                node("home", "Home2"),
                node("a.b", "AB"),
                node("users", "").with_child(node("", "X")),
            ],
            cache: crate::config::schema::CacheConfig {
                enabled: true,
                max_entries: 0,
            },
            ..Default::default()
        };

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(
            errors,
            vec![
                ValidationError::DuplicateSibling { route: "home".into() },
                ValidationError::DottedSegment {
                    parent: RouteName::root(),
                    name: "a.b".into(),
                },
                ValidationError::EmptyComponent { route: "users".into() },
                ValidationError::EmptySegment { parent: "users".into() },
                ValidationError::ZeroCacheCapacity,
            ]
        );
    }

    #[test]
    fn test_same_name_under_different_parents_is_fine() {
        let routes = vec![
            node("a", "A").with_child(node("x", "AX")),
            node("b", "B").with_child(node("x", "BX")),
        ];
        assert!(validate_routes(&routes).is_ok());
    }

    #[test]
    fn test_disabled_cache_may_have_zero_capacity() {
        let mut config = RouteNodeConfig::default();
        config.cache.enabled = false;
        config.cache.max_entries = 0;
        assert!(validate_config(&config).is_ok());
    }
}
