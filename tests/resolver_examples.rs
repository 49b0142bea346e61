mod common;

use common::{example_routes, A, D, F, H, M};
use route_node::routing::resolve_component;
use route_node::{NodeName, ResolveError, ResolveErrorKind, RouteDescriptor, RouteTable};

fn node(name: &str) -> NodeName {
    NodeName::from(name)
}

#[test]
fn test_root_node_renders_top_level_component() {
    let routes = example_routes();
    assert_eq!(resolve_component("a", &node(""), &routes), Ok(&A));
    assert_eq!(resolve_component("d.f", &node(""), &routes), Ok(&D));
    assert_eq!(resolve_component("d.h.m", &node(""), &routes), Ok(&D));
}

#[test]
fn test_nested_nodes_render_their_own_level() {
    let routes = example_routes();
    assert_eq!(resolve_component("d.f", &node("d"), &routes), Ok(&F));
    assert_eq!(resolve_component("d.h.m", &node("d"), &routes), Ok(&H));
    assert_eq!(resolve_component("d.h.m", &node("d.h"), &routes), Ok(&M));
}

#[test]
fn test_route_outside_node_is_not_found() {
    let routes = example_routes();
    let err = resolve_component("a", &node("d"), &routes).unwrap_err();
    assert_eq!(err.kind(), ResolveErrorKind::RouteNotFound);

    let err = resolve_component("zzz", &node(""), &routes).unwrap_err();
    assert_eq!(
        err,
        ResolveError::RouteNotFound {
            route: "zzz".into(),
            depth: 0,
            segment: Some("zzz".into()),
        }
    );
}

#[test]
fn test_shallow_route_is_not_found() {
    let routes = example_routes();
    for (route, name) in [("b", "d.h"), ("d.f", "d.h"), ("d", "d")] {
        let err = resolve_component(route, &node(name), &routes).unwrap_err();
        assert_eq!(err.kind(), ResolveErrorKind::RouteNotFound, "{} @ {}", route, name);
    }
}

#[test]
fn test_leaf_without_children() {
    let routes = example_routes();
    let err = resolve_component("a.x", &node("d"), &routes).unwrap_err();
    assert_eq!(
        err,
        ResolveError::NoChildrenToDescend {
            route: "a.x".into(),
            segment: "a".into(),
        }
    );
}

#[test]
fn test_missing_component_names_segment() {
    let routes = example_routes();
    let err = resolve_component("d.h.i", &node("d.h"), &routes).unwrap_err();
    assert_eq!(
        err,
        ResolveError::MissingComponent {
            route: "d.h.i".into(),
            segment: "i".into(),
        }
    );
    assert!(err.to_string().contains("'i'"));
}

#[test]
fn test_resolution_is_idempotent() {
    let routes = example_routes();
    let first = resolve_component("d.h.m", &node("d"), &routes).unwrap();
    let second = resolve_component("d.h.m", &node("d"), &routes).unwrap();
    assert!(std::ptr::eq(first, second));

    let table = RouteTable::new(example_routes());
    let first = table.resolve("d.h.m", &node("d.h")).unwrap();
    let second = table.resolve("d.h.m", &node("d.h")).unwrap();
    assert!(std::ptr::eq(first, second));
}

#[test]
fn test_descriptor_input_is_normalized() {
    let routes = example_routes();
    let descriptor = RouteDescriptor::new("d.h.m").with_param("id", 7);
    assert_eq!(resolve_component(&descriptor, &node("d.h"), &routes), Ok(&M));
}

#[test]
fn test_cached_and_uncached_tables_agree() {
    let cached = RouteTable::new(example_routes());
    let uncached = RouteTable::uncached(example_routes());

    let cases = [
        ("a", ""),
        ("a", "d"),
        ("d.f", "d"),
        ("d.h.i", "d.h"),
        ("a.x", "d"),
        ("d.h.l", "d.h"),
    ];
    for _ in 0..2 {
        for (route, name) in cases {
            assert_eq!(
                cached.resolve(route, &node(name)),
                uncached.resolve(route, &node(name)),
                "{} @ {}",
                route,
                name
            );
        }
    }
}
