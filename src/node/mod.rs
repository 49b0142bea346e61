//! Route node subsystem.
//!
//! # Data Flow
//! ```text
//! RouteNode::mount(node name, store)
//!     → tracker.rs (capture current route, subscribe)
//!
//! Store transition
//!     → tracker.rs (intersection node == own name?)
//!         - yes: cache new route, re-render
//!         - no:  nothing
//!     → view.rs (pick the child component for the cached route)
//!     → Return: component reference or ViewError
//! ```
//!
//! # Design Decisions
//! - One tracker per rendering position, name fixed for its lifetime
//! - Only the intersection node re-renders; its subtree follows from the new route
//! - Unmount detaches synchronously; late notifications are no-ops

pub mod tracker;
pub mod view;

pub use tracker::{MountError, RouteNode, TrackerState};
pub use view::{select_component, ViewError};
