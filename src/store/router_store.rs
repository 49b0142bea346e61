//! In-memory route store.
//!
//! # Responsibilities
//! - Hold the current route, previous route and intersection node
//! - Compute the intersection node for every transition
//! - Deliver each transition to all listeners in one synchronous batch
//!
//! # Design Decisions
//! - Snapshot swapped atomically (readers never see a half-applied transition)
//! - Listeners are copied out of the registry before dispatch, so a listener
//!   may unsubscribe itself or others mid-batch
//! - Navigation requested while a batch is running is queued, never interleaved
//! - Navigating to the current state is a no-op

use arc_swap::ArcSwap;
use serde_json::Value;
use std::collections::{BTreeMap, HashSet, VecDeque};
use std::fmt;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use uuid::Uuid;

use crate::observability::metrics;
use crate::routing::{transition_path, NodeName, RouteDescriptor, RouteName};
use crate::store::{Capability, Listener, RouteStore, Subscription, Transition};

#[derive(Debug, Default)]
struct StoreSnapshot {
    route: Option<Arc<RouteDescriptor>>,
    previous_route: Option<Arc<RouteDescriptor>>,
    intersection_node: NodeName,
}

#[derive(Default)]
struct ListenerRegistry {
    listeners: Mutex<BTreeMap<u64, Listener>>,
    next_id: AtomicU64,
}

impl ListenerRegistry {
    fn lock(&self) -> MutexGuard<'_, BTreeMap<u64, Listener>> {
        self.listeners.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn insert(&self, listener: Listener) -> u64 {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        self.lock().insert(id, listener);
        id
    }

    fn remove(&self, id: u64) {
        self.lock().remove(&id);
    }

    fn snapshot(&self) -> Vec<Listener> {
        self.lock().values().cloned().collect()
    }

    fn len(&self) -> usize {
        self.lock().len()
    }
}

/// Reference route store backed by an atomically swapped snapshot.
pub struct RouterStore {
    state: ArcSwap<StoreSnapshot>,
    registry: Arc<ListenerRegistry>,
    capabilities: HashSet<Capability>,
    dispatching: AtomicBool,
    pending: Mutex<VecDeque<RouteDescriptor>>,
}

impl RouterStore {
    /// Create a store with transition instrumentation enabled.
    pub fn new() -> Self {
        Self::with_capabilities([Capability::TransitionListeners])
    }

    /// Create a store that tracks routes but computes no intersection node and notifies no one.
    pub fn uninstrumented() -> Self {
        Self::with_capabilities([])
    }

    pub fn with_capabilities(capabilities: impl IntoIterator<Item = Capability>) -> Self {
        Self {
            state: ArcSwap::from_pointee(StoreSnapshot::default()),
            registry: Arc::new(ListenerRegistry::default()),
            capabilities: capabilities.into_iter().collect(),
            dispatching: AtomicBool::new(false),
            pending: Mutex::new(VecDeque::new()),
        }
    }

    /// Navigate to `route`.
    ///
    /// Returns `false` when `route` is already the active state. A navigation
    /// requested from inside a listener is queued and returns `true`.
    pub fn navigate(&self, route: RouteDescriptor) -> bool {
        let Some(guard) = DispatchGuard::acquire(self) else {
            tracing::debug!(route = %route.name, "Transition in progress, queueing navigation");
            self.lock_pending().push_back(route);
            return true;
        };

        let applied = self.apply(route);
        self.drain_pending(guard);
        applied
    }

    /// Navigate to a route by name, without params.
    pub fn navigate_to(&self, name: impl Into<RouteName>) -> bool {
        self.navigate(RouteDescriptor::new(name))
    }

    /// True when the active route is `name` (strict) or lies below it.
    ///
    /// Every entry of `params`, when given, must equal the active route's value.
    pub fn is_active(
        &self,
        name: &RouteName,
        params: Option<&BTreeMap<String, Value>>,
        strict: bool,
    ) -> bool {
        let state = self.state.load();
        let Some(route) = state.route.as_ref() else {
            return false;
        };
        if !route.name.is_descendant_of(name, strict) {
            return false;
        }
        params.map_or(true, |params| {
            params
                .iter()
                .all(|(key, value)| route.params.get(key) == Some(value))
        })
    }

    /// Number of registered listeners.
    pub fn listener_count(&self) -> usize {
        self.registry.len()
    }

    fn lock_pending(&self) -> MutexGuard<'_, VecDeque<RouteDescriptor>> {
        self.pending.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn drain_pending<'a>(&'a self, mut guard: DispatchGuard<'a>) {
        loop {
            loop {
                let next = self.lock_pending().pop_front();
                match next {
                    Some(route) => {
                        self.apply(route);
                    }
                    None => break,
                }
            }
            drop(guard);

            // Another thread may have queued between the last pop and the release.
            if self.lock_pending().is_empty() {
                break;
            }
            match DispatchGuard::acquire(self) {
                Some(next) => guard = next,
                None => break,
            }
        }
    }

    fn apply(&self, mut route: RouteDescriptor) -> bool {
        let current = self.state.load_full();
        if current
            .route
            .as_ref()
            .is_some_and(|active| active.same_state(&route))
        {
            tracing::debug!(route = %route.name, "Already in requested state, ignoring navigation");
            return false;
        }

        let instrumented = self.has_capability(Capability::TransitionListeners);
        let id = Uuid::new_v4();
        route.meta.id = Some(id);

        let intersection_node = if instrumented {
            transition_path(&route, current.route.as_deref()).intersection
        } else {
            current.intersection_node.clone()
        };

        let route = Arc::new(route);
        self.state.store(Arc::new(StoreSnapshot {
            route: Some(route.clone()),
            previous_route: current.route.clone(),
            intersection_node: intersection_node.clone(),
        }));
        metrics::record_transition(instrumented);

        tracing::debug!(
            transition_id = %id,
            route = %route.name,
            previous = ?current.route.as_ref().map(|r| r.name.as_str()),
            intersection = %intersection_node,
            "Route transition"
        );

        if !instrumented {
            return true;
        }

        let transition = Transition {
            id,
            route,
            previous_route: current.route.clone(),
            intersection_node,
        };
        for listener in self.registry.snapshot() {
            listener(&transition);
        }
        true
    }
}

/// Marks a store as dispatching. Releases the mark on drop, including when a listener panics.
struct DispatchGuard<'a> {
    store: &'a RouterStore,
}

impl<'a> DispatchGuard<'a> {
    fn acquire(store: &'a RouterStore) -> Option<Self> {
        if store.dispatching.swap(true, Ordering::SeqCst) {
            None
        } else {
            Some(Self { store })
        }
    }
}

impl Drop for DispatchGuard<'_> {
    fn drop(&mut self) {
        if std::thread::panicking() {
            let dropped = {
                let mut pending = self.store.lock_pending();
                let dropped = pending.len();
                pending.clear();
                dropped
            };
            tracing::error!(dropped, "Route listener panicked, discarding queued navigations");
        }
        self.store.dispatching.store(false, Ordering::SeqCst);
    }
}

impl Default for RouterStore {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for RouterStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.load();
        f.debug_struct("RouterStore")
            .field("route", &state.route.as_ref().map(|r| r.name.as_str()))
            .field("intersection_node", &state.intersection_node)
            .field("listeners", &self.registry.len())
            .field("capabilities", &self.capabilities)
            .finish()
    }
}

impl RouteStore for RouterStore {
    fn current_route(&self) -> Option<Arc<RouteDescriptor>> {
        self.state.load().route.clone()
    }

    fn previous_route(&self) -> Option<Arc<RouteDescriptor>> {
        self.state.load().previous_route.clone()
    }

    fn intersection_node(&self) -> NodeName {
        self.state.load().intersection_node.clone()
    }

    fn subscribe(&self, listener: Listener) -> Subscription {
        let id = self.registry.insert(listener);
        let registry: Weak<ListenerRegistry> = Arc::downgrade(&self.registry);
        Subscription::new(move || {
            if let Some(registry) = registry.upgrade() {
                registry.remove(id);
            }
        })
    }

    fn has_capability(&self, capability: Capability) -> bool {
        self.capabilities.contains(&capability)
    }
}
