//! Child component selection for a route view.

use thiserror::Error;

use crate::routing::{NodeName, ResolveError, RouteDescriptor, RouteTable};
use crate::store::RouteStore;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ViewError {
    /// Neither an explicit route nor a store was supplied.
    #[error("route view '{node}' has neither a route nor a route store")]
    NoRouteSource { node: NodeName },

    #[error("no active route for route view '{node}'")]
    NoActiveRoute { node: NodeName },

    #[error(transparent)]
    Resolve(#[from] ResolveError),
}

/// Pick the component `node_name` renders.
///
/// An explicit `route` wins over the store's current route.
pub fn select_component<'t, C>(
    table: &'t RouteTable<C>,
    node_name: &NodeName,
    route: Option<&RouteDescriptor>,
    store: Option<&dyn RouteStore>,
) -> Result<&'t C, ViewError> {
    if let Some(route) = route {
        return Ok(table.resolve(route, node_name)?);
    }

    let Some(store) = store else {
        return Err(ViewError::NoRouteSource {
            node: node_name.clone(),
        });
    };
    let Some(current) = store.current_route() else {
        return Err(ViewError::NoActiveRoute {
            node: node_name.clone(),
        });
    };
    Ok(table.resolve(&*current, node_name)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routing::{RouteConfigNode, ResolveErrorKind};
    use crate::store::RouterStore;

    fn table() -> RouteTable<&'static str> {
        RouteTable::new(vec![
            RouteConfigNode::new("home").with_component("Home"),
            RouteConfigNode::new("users")
                .with_component("Users")
                .with_child(RouteConfigNode::new("view").with_component("UserView")),
        ])
    }

    #[test]
    fn test_explicit_route_wins() {
        let table = table();
        let store = RouterStore::new();
        store.navigate_to("home");

        let route = RouteDescriptor::new("users.view");
        let picked = select_component(&table, &"users".into(), Some(&route), Some(&store as &dyn RouteStore));
        assert_eq!(picked, Ok(&"UserView"));
    }

    #[test]
    fn test_falls_back_to_store() {
        let table = table();
        let store = RouterStore::new();
        store.navigate_to("home");
        assert_eq!(
            select_component(&table, &NodeName::root(), None, Some(&store as &dyn RouteStore)),
            Ok(&"Home")
        );
    }

    #[test]
    fn test_missing_sources() {
        let table = table();
        let node = NodeName::root();
        assert_eq!(
            select_component(&table, &node, None, None),
            Err(ViewError::NoRouteSource { node: node.clone() })
        );

        let store = RouterStore::new();
        assert_eq!(
            select_component(&table, &node, None, Some(&store as &dyn RouteStore)),
            Err(ViewError::NoActiveRoute { node })
        );
    }

    #[test]
    fn test_resolve_errors_propagate() {
        let table = table();
        let route = RouteDescriptor::new("home");
        let err = select_component(&table, &"users".into(), Some(&route), None).unwrap_err();
        match err {
            ViewError::Resolve(e) => assert_eq!(e.kind(), ResolveErrorKind::RouteNotFound),
            other => panic!("unexpected error: {other}"),
        }
    }
}
