//! Intersection tracker for a single rendering position.
//!
//! # Responsibilities
//! - Capture the store's current route at mount
//! - Re-render only when the transition's intersection node is this node
//! - Detach from the store on unmount or drop
//!
//! # Design Decisions
//! - Lock-free state (atomics plus `ArcSwapOption` for the cached route)
//! - The store listener holds a `Weak` to the tracker state, so a store never
//!   keeps an unmounted tracker alive
//! - Mount fails loudly on a missing store or an uninstrumented one

use arc_swap::ArcSwapOption;
use std::fmt;
use std::sync::atomic::{AtomicU8, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError, Weak};
use thiserror::Error;

use crate::node::view::ViewError;
use crate::observability::metrics;
use crate::routing::{NodeName, RouteDescriptor, RouteTable};
use crate::store::{Capability, Listener, RouteStore, Subscription, Transition};

/// Configuration errors raised when mounting a [`RouteNode`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MountError {
    #[error("route node '{node}' has no route store to subscribe to")]
    MissingStore { node: NodeName },

    #[error("route store lacks capability {capability} required by route node '{node}'")]
    MissingCapability { node: NodeName, capability: Capability },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum TrackerState {
    Mounted = 0,
    Unmounted = 1,
}

impl From<u8> for TrackerState {
    fn from(v: u8) -> Self {
        match v {
            0 => TrackerState::Mounted,
            _ => TrackerState::Unmounted,
        }
    }
}

type RenderCallback = Box<dyn Fn(&Transition) + Send + Sync>;

struct NodeState {
    node_name: NodeName,
    route: ArcSwapOption<RouteDescriptor>,
    state: AtomicU8,
    renders: AtomicUsize,
    on_render: RenderCallback,
}

impl NodeState {
    fn is_mounted(&self) -> bool {
        TrackerState::from(self.state.load(Ordering::SeqCst)) == TrackerState::Mounted
    }

    fn on_transition(&self, transition: &Transition) {
        if !self.is_mounted() {
            return;
        }
        if transition.intersection_node != self.node_name {
            return;
        }

        self.route.store(Some(transition.route.clone()));
        self.renders.fetch_add(1, Ordering::Relaxed);
        metrics::record_rerender(&self.node_name);
        tracing::debug!(
            node = %self.node_name,
            route = %transition.route.name,
            transition_id = %transition.id,
            "Route node re-rendering"
        );
        (self.on_render)(transition);
    }
}

/// A mounted route node.
///
/// Holds the last route this position rendered and calls `on_render` whenever
/// a transition's intersection node is this node. Dropping it unmounts.
pub struct RouteNode {
    inner: Arc<NodeState>,
    subscription: Mutex<Option<Subscription>>,
}

impl RouteNode {
    /// Mount a tracker for `node_name` on `store`.
    pub fn mount(
        node_name: impl Into<NodeName>,
        store: Option<Arc<dyn RouteStore>>,
        on_render: impl Fn(&Transition) + Send + Sync + 'static,
    ) -> Result<Self, MountError> {
        let node_name = node_name.into();

        let Some(store) = store else {
            return Err(MountError::MissingStore { node: node_name });
        };
        if !store.has_capability(Capability::TransitionListeners) {
            return Err(MountError::MissingCapability {
                node: node_name,
                capability: Capability::TransitionListeners,
            });
        }

        let inner = Arc::new(NodeState {
            node_name,
            route: ArcSwapOption::new(store.current_route()),
            state: AtomicU8::new(TrackerState::Mounted as u8),
            renders: AtomicUsize::new(0),
            on_render: Box::new(on_render),
        });

        let weak: Weak<NodeState> = Arc::downgrade(&inner);
        let listener: Listener = Arc::new(move |transition: &Transition| {
            if let Some(node) = weak.upgrade() {
                node.on_transition(transition);
            }
        });
        let subscription = store.subscribe(listener);

        tracing::debug!(node = %inner.node_name, "Route node mounted");

        Ok(Self {
            inner,
            subscription: Mutex::new(Some(subscription)),
        })
    }

    pub fn node_name(&self) -> &NodeName {
        &self.inner.node_name
    }

    /// The route this node last rendered.
    pub fn route(&self) -> Option<Arc<RouteDescriptor>> {
        self.inner.route.load_full()
    }

    pub fn state(&self) -> TrackerState {
        TrackerState::from(self.inner.state.load(Ordering::SeqCst))
    }

    /// Re-renders since mount. The initial render is not counted.
    pub fn render_count(&self) -> usize {
        self.inner.renders.load(Ordering::Relaxed)
    }

    /// Resolve the child component this node renders for its cached route.
    pub fn resolve<'t, C>(&self, table: &'t RouteTable<C>) -> Result<&'t C, ViewError> {
        let Some(route) = self.route() else {
            return Err(ViewError::NoActiveRoute {
                node: self.inner.node_name.clone(),
            });
        };
        Ok(table.resolve(&*route, &self.inner.node_name)?)
    }

    /// Detach from the store. Later notifications are ignored. Idempotent.
    pub fn unmount(&self) {
        let subscription = self
            .subscription
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(subscription) = subscription {
            subscription.unsubscribe();
        }

        let previous = self
            .inner
            .state
            .swap(TrackerState::Unmounted as u8, Ordering::SeqCst);
        if TrackerState::from(previous) == TrackerState::Mounted {
            tracing::debug!(node = %self.inner.node_name, "Route node unmounted");
        }
    }
}

impl Drop for RouteNode {
    fn drop(&mut self) {
        self.unmount();
    }
}

impl fmt::Debug for RouteNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouteNode")
            .field("node_name", &self.inner.node_name)
            .field("route", &self.route().map(|r| r.name.clone()))
            .field("state", &self.state())
            .field("renders", &self.render_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::RouterStore;

    fn store() -> Arc<RouterStore> {
        Arc::new(RouterStore::new())
    }

    #[test]
    fn test_mount_captures_current_route() {
        let store = store();
        store.navigate_to("d.h.m");

        let node = RouteNode::mount("d", Some(store.clone() as Arc<dyn RouteStore>), |_| {}).unwrap();
        assert_eq!(node.route().unwrap().name, "d.h.m");
        assert_eq!(node.state(), TrackerState::Mounted);
        assert_eq!(node.render_count(), 0);
    }

    #[test]
    fn test_mount_before_first_navigation() {
        let node = RouteNode::mount("", Some(store() as Arc<dyn RouteStore>), |_| {}).unwrap();
        assert!(node.route().is_none());
    }

    #[test]
    fn test_missing_store() {
        let err = RouteNode::mount("d", None, |_| {}).unwrap_err();
        assert_eq!(err, MountError::MissingStore { node: "d".into() });
    }

    #[test]
    fn test_missing_capability() {
        let store: Arc<dyn RouteStore> = Arc::new(RouterStore::uninstrumented());
        let err = RouteNode::mount("d", Some(store), |_| {}).unwrap_err();
        assert!(matches!(err, MountError::MissingCapability { .. }));
        assert!(err.to_string().contains("TRANSITION_LISTENERS"));
    }

    #[test]
    fn test_only_matching_node_updates_route() {
        let store = store();
        store.navigate_to("d.f");

        let node = RouteNode::mount("d.h", Some(store.clone() as Arc<dyn RouteStore>), |_| {}).unwrap();

        // Intersection 'd': not this node.
        store.navigate_to("d.h.m");
        assert_eq!(node.route().unwrap().name, "d.f");
        assert_eq!(node.render_count(), 0);

        // Intersection 'd.h'.
        store.navigate_to("d.h.l");
        assert_eq!(node.route().unwrap().name, "d.h.l");
        assert_eq!(node.render_count(), 1);
    }

    #[test]
    fn test_unmount_is_idempotent_and_detaches() {
        let store = store();
        let node = RouteNode::mount("", Some(store.clone() as Arc<dyn RouteStore>), |_| {}).unwrap();
        assert_eq!(store.listener_count(), 1);

        node.unmount();
        node.unmount();
        assert_eq!(node.state(), TrackerState::Unmounted);
        assert_eq!(store.listener_count(), 0);

        store.navigate_to("a");
        assert_eq!(node.render_count(), 0);
    }

    #[test]
    fn test_drop_detaches() {
        let store = store();
        {
            let _node = RouteNode::mount("", Some(store.clone() as Arc<dyn RouteStore>), |_| {}).unwrap();
            assert_eq!(store.listener_count(), 1);
        }
        assert_eq!(store.listener_count(), 0);
    }

    #[test]
    fn test_resolve_uses_cached_route() {
        let table = RouteTable::new(vec![crate::routing::RouteConfigNode::new("a")
            .with_component("A")
            .with_child(crate::routing::RouteConfigNode::new("b").with_component("B"))]);

        let store = store();
        let node = RouteNode::mount("a", Some(store.clone() as Arc<dyn RouteStore>), |_| {}).unwrap();
        assert!(matches!(node.resolve(&table), Err(ViewError::NoActiveRoute { .. })));

        drop(node);
        store.navigate_to("a.b");
        let node = RouteNode::mount("a", Some(store as Arc<dyn RouteStore>), |_| {}).unwrap();
        assert_eq!(node.resolve(&table), Ok(&"B"));
    }
}
