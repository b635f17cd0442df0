#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use common::*;
use modval_core::logging_facility::test_capture::init_test_capture;
use modval_core::PluginConfig;
use modval_core_types::schema::{EVENT_END, EVENT_START};
use modval_engine::{run_action, ActionOutcome, PluginAction, PluginVariant, ViewRegistry};

#[test]
fn test_shortcut_to_annotation() {
    let mut registry = ViewRegistry::new();
    registry.register("graph-view-1", PluginVariant::SingleNode);

    let mut host = library_host();
    let id = host.add_node(blend(9, "1"));
    host.select(&[id.clone()]);

    let action = registry.action_for_shortcut("graph-view-1", "Q").unwrap();
    let outcome = run_action(&mut host, &PluginConfig::default(), action);

    let ActionOutcome::Annotated(report) = outcome else {
        panic!("expected an annotation, got {outcome:?}");
    };
    assert_eq!(report.node_id, id);
    assert_eq!(report.text, "Blend: Overlay");
}

#[test]
fn test_bad_selection_becomes_advisory() {
    let mut host = library_host();

    let outcome = run_action(&mut host, &PluginConfig::default(), PluginAction::PrintModifiedValues);
    let ActionOutcome::Advisory(text) = outcome else {
        panic!("expected an advisory");
    };
    assert!(text.starts_with("Select 1 and only 1 node"));

    let outcome = run_action(&mut host, &PluginConfig::default(), PluginAction::CompareAToB);
    assert!(matches!(outcome, ActionOutcome::Advisory(t) if t.starts_with("Select 2 and only 2 nodes")));
    assert!(host.comments().is_empty());
}

#[test]
fn test_both_directions_from_one_toolbar() {
    let mut registry = ViewRegistry::new();
    let actions = registry.register("pair-view", PluginVariant::NodePair);
    assert_eq!(actions, [PluginAction::CompareAToB, PluginAction::CompareBToA]);

    let mut host = library_host();
    let a = host.add_node(blend(1, "1"));
    let b = host.add_node(blend(2, "1"));
    host.select(&[a.clone(), b.clone()]);

    for action in actions {
        run_action(&mut host, &PluginConfig::default(), *action);
    }

    let texts: Vec<_> = host
        .comments()
        .iter()
        .map(|c| (c.parent.clone(), c.description.as_str()))
        .collect();
    assert_eq!(texts, [(a, "Blend: Add"), (b, "Blend: Subtract")]);
}

#[test]
fn test_report_serializes_for_host_console() {
    let mut host = library_host();
    let id = host.add_node(blend(3, "1"));
    host.select(&[id]);

    let ActionOutcome::Annotated(report) =
        run_action(&mut host, &PluginConfig::default(), PluginAction::PrintModifiedValues)
    else {
        panic!("expected an annotation");
    };
    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["text"], "Blend: Multiply");
    assert_eq!(json["diff"]["entries"]["Blend"]["type"], "Enum");
}

#[test]
fn test_registry_dispatch_tags_view() {
    let capture = init_test_capture();
    let mut registry = ViewRegistry::new();
    registry.register("view-dispatch-7", PluginVariant::NodePair);

    let mut host = library_host();
    let a = host.add_node(blend(1, "1"));
    let b = host.add_node(blend(1, "0.5"));
    host.select(&[a, b.clone()]);

    let outcome = registry
        .dispatch(&mut host, &PluginConfig::default(), "view-dispatch-7", "W")
        .unwrap();
    let ActionOutcome::Annotated(report) = outcome else {
        panic!("expected an annotation");
    };
    assert_eq!(report.node_id, b);
    assert_eq!(report.text, "Opacity: 0.5");

    let mine: Vec<_> = capture
        .events()
        .into_iter()
        .filter(|e| e.graph_view_id.as_deref() == Some("view-dispatch-7"))
        .collect();
    let invocation = mine[0].invocation_id.clone().unwrap();
    assert_eq!(
        capture.boundary("compare_selection", &invocation),
        [EVENT_START, EVENT_END]
    );
    assert!(mine.iter().all(|e| e.invocation_id.as_deref() == Some(invocation.as_str())));
}
