//! Route-to-component resolution.
//!
//! Given the active route, the name of the route node doing the rendering and
//! the route configuration tree, walk the tree along the route's own segments
//! down to the node's depth and return the component registered there.
//!
//! # Example
//! ```text
//! route 'section.subsection.a'
//!     node ''                    → section.component
//!     node 'section'             → section.subsection.component
//!     node 'section.subsection'  → section.subsection.a.component
//! ```
//!
//! # Design Decisions
//! - The node name only supplies the stopping depth; its segments are not
//!   matched against the route
//! - A route too shallow for the node fails `RouteNotFound` before the
//!   children check
//! - Every failure is a typed error; nothing is logged and swallowed

use thiserror::Error;

use crate::routing::descriptor::RouteRef;
use crate::routing::name::{NodeName, RouteName};
use crate::routing::tree::{find_child, RouteConfigNode};

/// Errors produced while resolving a component.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    /// No configured node matches the route at this depth.
    #[error("could not find route '{route}' at depth {depth}: {}", describe_segment(.segment.as_deref()))]
    RouteNotFound {
        route: RouteName,
        depth: usize,
        /// The segment that failed to match, `None` when the route ends before this depth.
        segment: Option<String>,
    },

    /// The node at the exit depth declares no component.
    #[error("route segment '{segment}' of route '{route}' does not have a component")]
    MissingComponent { route: RouteName, segment: String },

    /// The walk must descend below a node that declares no children.
    #[error("route segment '{segment}' of route '{route}' has no children to descend into")]
    NoChildrenToDescend { route: RouteName, segment: String },
}

fn describe_segment(segment: Option<&str>) -> String {
    match segment {
        Some(segment) => format!("no node named '{}'", segment),
        None => "route has no segment at this depth".to_string(),
    }
}

/// Fieldless discriminant of [`ResolveError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResolveErrorKind {
    RouteNotFound,
    MissingComponent,
    NoChildrenToDescend,
}

impl ResolveError {
    pub fn kind(&self) -> ResolveErrorKind {
        match self {
            ResolveError::RouteNotFound { .. } => ResolveErrorKind::RouteNotFound,
            ResolveError::MissingComponent { .. } => ResolveErrorKind::MissingComponent,
            ResolveError::NoChildrenToDescend { .. } => ResolveErrorKind::NoChildrenToDescend,
        }
    }

    /// The route being resolved when the error occurred.
    pub fn route(&self) -> &RouteName {
        match self {
            ResolveError::RouteNotFound { route, .. }
            | ResolveError::MissingComponent { route, .. }
            | ResolveError::NoChildrenToDescend { route, .. } => route,
        }
    }
}

/// Depth at which a node stops walking: 0 for the root node, else its segment count.
pub fn target_depth(node_name: &NodeName) -> usize {
    if node_name.is_root() {
        0
    } else {
        node_name.depth().max(1)
    }
}

/// Resolve the component `node_name` must render for `route`.
pub fn resolve_component<'a, 't, C>(
    route: impl Into<RouteRef<'a>>,
    node_name: &NodeName,
    config: &'t [RouteConfigNode<C>],
) -> Result<&'t C, ResolveError> {
    let route_name = route.into().route_name();
    walk(&route_name, node_name, config).map(|(_, component)| component)
}

/// Same walk as [`resolve_component`], returning the index of the matched node at each level.
pub fn resolve_path<'a, C>(
    route: impl Into<RouteRef<'a>>,
    node_name: &NodeName,
    config: &[RouteConfigNode<C>],
) -> Result<Vec<usize>, ResolveError> {
    let route_name = route.into().route_name();
    walk(&route_name, node_name, config).map(|(path, _)| path)
}

/// Follow an index path produced by [`resolve_path`] back to its component.
pub fn component_at<'t, C>(config: &'t [RouteConfigNode<C>], path: &[usize]) -> Option<&'t C> {
    let (last, parents) = path.split_last()?;
    let mut nodes = config;
    for &index in parents {
        nodes = &nodes.get(index)?.children;
    }
    nodes.get(*last)?.component.as_ref()
}

fn walk<'t, C>(
    route: &RouteName,
    node_name: &NodeName,
    config: &'t [RouteConfigNode<C>],
) -> Result<(Vec<usize>, &'t C), ResolveError> {
    let segments: Vec<&str> = route.segments().collect();
    let target = target_depth(node_name);

    let mut nodes = config;
    let mut level = 0;
    let mut path = Vec::with_capacity(target + 1);

    let result = loop {
        let Some(&segment) = segments.get(level) else {
            break Err(ResolveError::RouteNotFound {
                route: route.clone(),
                depth: level,
                segment: None,
            });
        };

        let Some((index, node)) = find_child(nodes, segment) else {
            break Err(ResolveError::RouteNotFound {
                route: route.clone(),
                depth: level,
                segment: Some(segment.to_string()),
            });
        };
        path.push(index);

        if level >= target {
            break match node.component.as_ref() {
                Some(component) => Ok(component),
                None => Err(ResolveError::MissingComponent {
                    route: route.clone(),
                    segment: segment.to_string(),
                }),
            };
        }

        if level + 1 >= segments.len() {
            break Err(ResolveError::RouteNotFound {
                route: route.clone(),
                depth: level + 1,
                segment: None,
            });
        }

        if !node.has_children() {
            break Err(ResolveError::NoChildrenToDescend {
                route: route.clone(),
                segment: segment.to_string(),
            });
        }

        nodes = &node.children;
        level += 1;
    };

    match result {
        Ok(component) => {
            tracing::trace!(route = %route, node = %node_name, depth = level, "Resolved route component");
            Ok((path, component))
        }
        Err(e) => {
            tracing::debug!(route = %route, node = %node_name, error = %e, "Route resolution failed");
            Err(e)
        }
    }
}
