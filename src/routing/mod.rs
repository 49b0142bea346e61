//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Active route (name or descriptor) + node name
//!     → descriptor.rs (normalize to RouteName)
//!     → table.rs (memo lookup)
//!     → resolver.rs (walk the route tree to the node's depth)
//!     → Return: component reference or ResolveError
//!
//! Route change (previous → next):
//!     → transition.rs (common ancestors, changed params)
//!     → Return: intersection node + segments to (de)activate
//! ```
//!
//! # Design Decisions
//! - Route trees are declared once, immutable at runtime
//! - First match wins (declared order)
//! - Deterministic: same triple always yields the same component or error
//! - Explicit errors rather than silent `None`

pub mod descriptor;
pub mod name;
pub mod resolver;
pub mod table;
pub mod transition;
pub mod tree;

pub use descriptor::{RouteDescriptor, RouteMeta, RouteRef};
pub use name::{NodeName, RouteName};
pub use resolver::{resolve_component, resolve_path, target_depth, ResolveError, ResolveErrorKind};
pub use table::{RouteTable, RouteTableHandle};
pub use transition::{transition_path, TransitionPath};
pub use tree::{find_child, ComponentId, RouteConfigNode};
