//! Route node: route-to-component resolution and intersection re-render tracking.
//!
//! A host UI nests route nodes inside each other. Each node renders the
//! component configured for the active route at its own depth, and re-renders
//! only when a route transition's intersection node is that node.

pub mod config;
pub mod node;
pub mod observability;
pub mod routing;
pub mod store;

pub use config::schema::RouteNodeConfig;
pub use node::{select_component, MountError, RouteNode, TrackerState, ViewError};
pub use routing::{
    resolve_component, ComponentId, NodeName, ResolveError, ResolveErrorKind, RouteConfigNode,
    RouteDescriptor, RouteName, RouteTable, RouteTableHandle,
};
pub use store::{Capability, RouteStore, RouterStore, Subscription, Transition};
