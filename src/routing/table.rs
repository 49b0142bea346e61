//! Compiled route table.
//!
//! # Responsibilities
//! - Own the immutable route configuration tree
//! - Memoize resolutions per (route, node) pair
//! - Allow a reloaded tree to replace the current one atomically
//!
//! # Design Decisions
//! - Immutable after construction (shared without locks)
//! - The memo stores index paths, so cached hits still return borrowed components
//! - Failures are memoized too: same triple, same error
//! - A full memo is cleared before the next insert

use arc_swap::ArcSwap;
use dashmap::DashMap;
use std::sync::Arc;

use crate::observability::metrics;
use crate::routing::descriptor::RouteRef;
use crate::routing::name::{NodeName, RouteName};
use crate::routing::resolver::{component_at, resolve_path, ResolveError};
use crate::routing::tree::RouteConfigNode;

/// Default number of memoized resolutions.
pub const DEFAULT_CACHE_CAPACITY: usize = 1024;

type CacheKey = (RouteName, NodeName);

/// Route configuration plus a resolution memo.
#[derive(Debug)]
pub struct RouteTable<C> {
    routes: Arc<[RouteConfigNode<C>]>,
    cache: Option<DashMap<CacheKey, Result<Vec<usize>, ResolveError>>>,
    max_entries: usize,
}

impl<C> RouteTable<C> {
    /// Build a table with the default memo capacity.
    pub fn new(routes: Vec<RouteConfigNode<C>>) -> Self {
        Self::with_cache_capacity(routes, DEFAULT_CACHE_CAPACITY)
    }

    /// Build a table memoizing at most `max_entries` resolutions.
    pub fn with_cache_capacity(routes: Vec<RouteConfigNode<C>>, max_entries: usize) -> Self {
        Self {
            routes: routes.into(),
            cache: (max_entries > 0).then(DashMap::new),
            max_entries,
        }
    }

    /// Build a table that resolves every call from scratch.
    pub fn uncached(routes: Vec<RouteConfigNode<C>>) -> Self {
        Self::with_cache_capacity(routes, 0)
    }

    /// The configured route tree.
    pub fn routes(&self) -> &[RouteConfigNode<C>] {
        &self.routes
    }

    /// Resolve the component `node_name` renders for `route`.
    pub fn resolve<'a>(
        &self,
        route: impl Into<RouteRef<'a>>,
        node_name: &NodeName,
    ) -> Result<&C, ResolveError> {
        let route_name = route.into().route_name();

        let Some(cache) = &self.cache else {
            let result = resolve_path(&route_name, node_name, &self.routes);
            metrics::record_resolution(result.is_ok(), false);
            return self.follow(&route_name, result);
        };

        let key = (route_name, node_name.clone());
        if let Some(hit) = cache.get(&key) {
            let result = hit.value().clone();
            drop(hit);
            metrics::record_resolution(result.is_ok(), true);
            return self.follow(&key.0, result);
        }

        let result = resolve_path(&key.0, node_name, &self.routes);
        metrics::record_resolution(result.is_ok(), false);

        if cache.len() >= self.max_entries {
            tracing::debug!(entries = cache.len(), "Resolution cache full, clearing");
            cache.clear();
        }
        cache.insert(key.clone(), result.clone());

        self.follow(&key.0, result)
    }

    /// Number of memoized resolutions.
    pub fn cache_len(&self) -> usize {
        self.cache.as_ref().map_or(0, |cache| cache.len())
    }

    pub fn clear_cache(&self) {
        if let Some(cache) = &self.cache {
            cache.clear();
        }
    }

    fn follow(
        &self,
        route: &RouteName,
        result: Result<Vec<usize>, ResolveError>,
    ) -> Result<&C, ResolveError> {
        let path = result?;
        // Paths come from a walk over this same tree and always end on a component.
        component_at(&self.routes, &path).ok_or_else(|| ResolveError::RouteNotFound {
            route: route.clone(),
            depth: path.len(),
            segment: None,
        })
    }
}

/// Shared handle to the current route table, swapped on config reload.
#[derive(Debug)]
pub struct RouteTableHandle<C> {
    current: ArcSwap<RouteTable<C>>,
}

impl<C> RouteTableHandle<C> {
    pub fn new(table: RouteTable<C>) -> Self {
        Self {
            current: ArcSwap::from_pointee(table),
        }
    }

    /// Snapshot of the current table. Stays valid while a newer one is installed.
    pub fn load(&self) -> Arc<RouteTable<C>> {
        self.current.load_full()
    }

    /// Install a new table. In-flight resolutions keep their snapshot.
    pub fn replace(&self, table: RouteTable<C>) {
        self.current.store(Arc::new(table));
        tracing::info!("Route table replaced");
    }
}
