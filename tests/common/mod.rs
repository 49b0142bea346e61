//! Shared fixtures for integration tests.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use route_node::store::Transition;
use route_node::RouteConfigNode;

/// Stand-in for a UI component: compared by label, identified by address.
#[derive(Debug, PartialEq, Eq)]
pub struct Label(pub &'static str);

pub const A: Label = Label("A");
pub const D: Label = Label("D");
pub const F: Label = Label("F");
pub const H: Label = Label("H");
pub const M: Label = Label("M");

fn leaf(name: &str, label: &'static str) -> RouteConfigNode<Label> {
    RouteConfigNode::new(name).with_component(Label(label))
}

/// `a`, `b`, `c`, `d → {e, f, g, h → {i, l, m}}`. Node `i` has no component.
pub fn example_routes() -> Vec<RouteConfigNode<Label>> {
    vec![
        leaf("a", "A"),
        leaf("b", "B"),
        leaf("c", "C"),
        leaf("d", "D").with_children(vec![
            leaf("e", "E"),
            leaf("f", "F"),
            leaf("g", "G"),
            leaf("h", "H").with_children(vec![
                RouteConfigNode::new("i"),
                leaf("l", "L"),
                leaf("m", "M"),
            ]),
        ]),
    ]
}

/// Counts and records render callbacks.
#[derive(Clone, Default)]
pub struct RenderSpy {
    calls: Arc<AtomicUsize>,
    routes: Arc<Mutex<Vec<String>>>,
}

impl RenderSpy {
    pub fn callback(&self) -> impl Fn(&Transition) + Send + Sync + 'static {
        let spy = self.clone();
        move |transition: &Transition| {
            spy.calls.fetch_add(1, Ordering::SeqCst);
            spy.routes
                .lock()
                .unwrap()
                .push(transition.route.name.to_string());
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn routes(&self) -> Vec<String> {
        self.routes.lock().unwrap().clone()
    }
}
