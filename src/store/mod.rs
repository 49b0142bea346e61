//! Route store contract.
//!
//! # Data Flow
//! ```text
//! navigate(next route)
//!     → transition path (previous, next) → intersection node
//!     → swap in new snapshot {route, previous_route, intersection_node}
//!     → one synchronous batch: every listener receives the same Transition
//!
//! route node mount
//!     → has_capability(TransitionListeners)?
//!     → subscribe(listener) → Subscription (RAII)
//! ```
//!
//! # Design Decisions
//! - The store is passed explicitly; there is no ambient lookup
//! - Consumers only read; navigation belongs to the store owner
//! - Batches never interleave: navigation requested mid-batch is queued

use std::fmt;
use std::sync::Arc;
use uuid::Uuid;

use crate::routing::{NodeName, RouteDescriptor};

pub mod router_store;

pub use router_store::RouterStore;

/// Event delivered to listeners once per transition.
#[derive(Debug, Clone)]
pub struct Transition {
    /// Unique transition identifier, also stored in `route.meta.id`.
    pub id: Uuid,
    pub route: Arc<RouteDescriptor>,
    pub previous_route: Option<Arc<RouteDescriptor>>,
    /// Deepest node common to the previous and next route.
    pub intersection_node: NodeName,
}

/// Callback registered with a store.
pub type Listener = Arc<dyn Fn(&Transition) + Send + Sync>;

/// Instrumentation a store may provide.
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    /// The store computes an intersection node per transition and notifies listeners.
    TransitionListeners,
}

impl Capability {
    pub fn as_str(&self) -> &'static str {
        match self {
            Capability::TransitionListeners => "TRANSITION_LISTENERS",
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Read-only view of a route store.
pub trait RouteStore: Send + Sync {
    /// The active route, `None` before the first navigation.
    fn current_route(&self) -> Option<Arc<RouteDescriptor>>;

    /// The route active before the last transition.
    fn previous_route(&self) -> Option<Arc<RouteDescriptor>>;

    /// Intersection node of the last transition.
    fn intersection_node(&self) -> NodeName;

    /// Register a listener. Dropping the returned handle detaches it.
    fn subscribe(&self, listener: Listener) -> Subscription;

    fn has_capability(&self, capability: Capability) -> bool;
}

/// A RAII guard that keeps a listener registered.
///
/// Detaching happens synchronously in [`Subscription::unsubscribe`] or on drop.
#[must_use = "dropping a Subscription detaches the listener"]
pub struct Subscription {
    detach: Option<Box<dyn FnOnce() + Send + Sync>>,
}

impl Subscription {
    pub fn new(detach: impl FnOnce() + Send + Sync + 'static) -> Self {
        Self {
            detach: Some(Box::new(detach)),
        }
    }

    /// A subscription with nothing to detach.
    pub fn detached() -> Self {
        Self { detach: None }
    }

    pub fn is_active(&self) -> bool {
        self.detach.is_some()
    }

    pub fn unsubscribe(mut self) {
        self.detach_now();
    }

    fn detach_now(&mut self) {
        if let Some(detach) = self.detach.take() {
            detach();
        }
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.is_active())
            .finish()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.detach_now();
    }
}
