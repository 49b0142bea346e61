//! Transition path between two routes.
//!
//! # Algorithm
//! ```text
//! from 'd.h.m' {id: 1}  →  to 'd.h.l' {id: 1}
//!     ancestors(from) = [d, d.h, d.h.m]
//!     ancestors(to)   = [d, d.h, d.h.l]
//!     first divergence at index 2
//!     → intersection  = 'd.h'
//!     → deactivate    = [d.h.m]
//!     → activate      = [d.h.l]
//! ```
//!
//! A shared segment whose own params changed also counts as a divergence,
//! so `users.view {id: 1}` → `users.view {id: 2}` intersects at `users`.

use serde::Serialize;

use crate::routing::descriptor::RouteDescriptor;
use crate::routing::name::{NodeName, RouteName};

/// Outcome of comparing the previous and next route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransitionPath {
    /// Deepest node common to both routes.
    pub intersection: NodeName,
    /// Segments leaving the tree, deepest first.
    pub to_deactivate: Vec<RouteName>,
    /// Segments entering the tree, shallowest first.
    pub to_activate: Vec<RouteName>,
}

/// Compute the transition path from `from` (if any) to `to`.
pub fn transition_path(to: &RouteDescriptor, from: Option<&RouteDescriptor>) -> TransitionPath {
    let to_ids: Vec<&str> = to.name.ancestors().collect();

    let Some(from) = from else {
        return TransitionPath {
            intersection: NodeName::root(),
            to_deactivate: Vec::new(),
            to_activate: to_ids.into_iter().map(RouteName::from).collect(),
        };
    };

    let from_ids: Vec<&str> = from.name.ancestors().collect();

    let divergence = from_ids
        .iter()
        .zip(to_ids.iter())
        .position(|(from_id, to_id)| from_id != to_id || segment_params_changed(to_id, to, from))
        .unwrap_or_else(|| from_ids.len().min(to_ids.len()));

    let intersection = if divergence == 0 {
        NodeName::root()
    } else {
        NodeName::from(from_ids[divergence - 1])
    };

    TransitionPath {
        intersection,
        to_deactivate: from_ids[divergence..].iter().rev().map(|id| RouteName::from(*id)).collect(),
        to_activate: to_ids[divergence..].iter().map(|id| RouteName::from(*id)).collect(),
    }
}

fn segment_params_changed(segment: &str, to: &RouteDescriptor, from: &RouteDescriptor) -> bool {
    to.meta
        .params
        .get(segment)
        .map(|owned| owned.iter().any(|param| to.params.get(param) != from.params.get(param)))
        .unwrap_or(false)
}
