mod common;

use std::fs;

use common::{arena_graph, dir_listing, read_navjson, write_nav, write_navjson, ScriptedTerminal};
use navjson_core::{
    ConversionRequest, ConvertError, Metadata, MetadataOverrides, NavJsonVersion, NavLink,
    NavNode, NavVersion, NavigationGraph, OutputTarget, OverwritePolicy, Pipeline,
};

fn curated_metadata() -> Metadata {
    Metadata {
        map_filename: "arena".to_string(),
        map_author: "Original Author".to_string(),
        map_name: "The Arena".to_string(),
        map_urls: vec![
            "https://maps.example/arena".to_string(),
            "https://mirror.example/arena".to_string(),
        ],
        comments: "ladder links tuned by hand".to_string(),
        contributors: vec!["kim".to_string(), "lee".to_string()],
    }
}

fn stale_graph() -> NavigationGraph {
    NavigationGraph::new(vec![NavNode::new([0.0, 0.0, 0.0])])
}

fn overriding_metadata() -> MetadataOverrides {
    MetadataOverrides {
        map_filename: Some("other".to_string()),
        map_author: Some("Someone Else".to_string()),
        map_name: Some("Renamed".to_string()),
        map_urls: vec!["https://ignored.example".to_string()],
        comment: Some("ignored".to_string()),
        contributors: vec!["nobody".to_string()],
    }
}

#[test]
fn upgrade_keeps_prior_metadata_and_takes_fresh_graph() {
    let dir = tempfile::tempdir().expect("tempdir");
    let source = dir.path().join("arena.nav");
    let target = dir.path().join("arena.navjson");
    write_nav(&source, &arena_graph(), NavVersion::V3);
    write_navjson(&target, &stale_graph(), &curated_metadata(), NavJsonVersion::V1);

    let request = ConversionRequest::new(&source)
        .with_upgrade(true)
        .with_overwrite(OverwritePolicy::Always)
        .with_metadata(overriding_metadata());
    Pipeline::new(&request, &mut ScriptedTerminal::default())
        .run()
        .expect("upgrade succeeds");

    let upgraded = read_navjson(&target);
    assert_eq!(upgraded.version(), NavJsonVersion::LATEST);
    assert_eq!(upgraded.metadata(), curated_metadata());
    assert_eq!(upgraded.to_graph().expect("graph"), arena_graph());
}

#[test]
fn upgrade_twice_yields_identical_metadata() {
    let dir = tempfile::tempdir().expect("tempdir");
    let source = dir.path().join("arena.nav");
    let target = dir.path().join("arena.navjson");
    write_nav(&source, &arena_graph(), NavVersion::V2);
    write_navjson(&target, &stale_graph(), &curated_metadata(), NavJsonVersion::V2);

    let first = ConversionRequest::new(&source)
        .with_upgrade(true)
        .with_overwrite(OverwritePolicy::Always);
    Pipeline::new(&first, &mut ScriptedTerminal::default())
        .run()
        .expect("first upgrade");
    let after_first = read_navjson(&target);

    let second = first.clone().with_metadata(overriding_metadata());
    Pipeline::new(&second, &mut ScriptedTerminal::default())
        .run()
        .expect("second upgrade");
    let after_second = read_navjson(&target);

    assert_eq!(after_first.metadata(), curated_metadata());
    assert_eq!(after_second.metadata(), after_first.metadata());
    assert_eq!(after_second, after_first);
}

#[test]
fn upgrade_without_prior_json_reports_and_changes_nothing() {
    let dir = tempfile::tempdir().expect("tempdir");
    let source = dir.path().join("arena.nav");
    write_nav(&source, &arena_graph(), NavVersion::V3);
    let before = dir_listing(dir.path());

    let request = ConversionRequest::new(&source).with_upgrade(true);
    let mut terminal = ScriptedTerminal::default();
    let err = Pipeline::new(&request, &mut terminal)
        .run()
        .expect_err("missing upgrade target");

    assert!(matches!(err, ConvertError::MissingUpgradeTarget { .. }));
    assert!(terminal.messages_text().starts_with("Cannot upgrade"));
    assert_eq!(dir_listing(dir.path()), before);
}

#[test]
fn upgrade_reads_prior_from_explicit_output_path() {
    let dir = tempfile::tempdir().expect("tempdir");
    let source = dir.path().join("arena.nav");
    let target = dir.path().join("published").join("arena.json");
    fs::create_dir_all(target.parent().expect("parent")).expect("mkdir");
    write_nav(&source, &arena_graph(), NavVersion::V3);
    write_navjson(&target, &stale_graph(), &curated_metadata(), NavJsonVersion::V2);

    let request = ConversionRequest::new(&source)
        .with_upgrade(true)
        .with_output(OutputTarget::Path(target.clone()))
        .with_overwrite(OverwritePolicy::Always);
    Pipeline::new(&request, &mut ScriptedTerminal::default())
        .run()
        .expect("upgrade");

    assert_eq!(read_navjson(&target).metadata(), curated_metadata());
    assert!(!dir.path().join("arena.navjson").exists());
}

#[test]
fn upgrade_to_stdout_reads_prior_from_derived_path() {
    let dir = tempfile::tempdir().expect("tempdir");
    let source = dir.path().join("arena.nav");
    let target = dir.path().join("arena.navjson");
    write_nav(&source, &arena_graph(), NavVersion::V3);
    write_navjson(&target, &stale_graph(), &curated_metadata(), NavJsonVersion::V2);
    let prior_text = fs::read_to_string(&target).expect("read prior");

    let request = ConversionRequest::new(&source)
        .with_upgrade(true)
        .with_output(OutputTarget::Stdout { path: None });
    let mut terminal = ScriptedTerminal::default();
    Pipeline::new(&request, &mut terminal).run().expect("upgrade");

    let printed: serde_json::Value =
        serde_json::from_str(&terminal.output_text()).expect("json on stdout");
    assert_eq!(printed["map"]["author"], "Original Author");
    assert_eq!(printed["contributors"][1], "lee");
    assert_eq!(fs::read_to_string(&target).expect("read"), prior_text);
}

#[test]
fn upgrade_with_unreadable_prior_fails_without_output() {
    let dir = tempfile::tempdir().expect("tempdir");
    let source = dir.path().join("arena.nav");
    let target = dir.path().join("arena.navjson");
    write_nav(&source, &arena_graph(), NavVersion::V3);
    fs::write(&target, r#"{"version": 5, "nodes": []}"#).expect("seed");

    let request = ConversionRequest::new(&source)
        .with_upgrade(true)
        .with_overwrite(OverwritePolicy::Always);
    let err = Pipeline::new(&request, &mut ScriptedTerminal::default())
        .run()
        .expect_err("prior has unknown version");

    assert!(err.nav_error().is_some());
    assert_eq!(
        fs::read_to_string(&target).expect("read"),
        r#"{"version": 5, "nodes": []}"#
    );
}

#[test]
fn upgrade_is_ignored_for_json_to_nav() {
    let dir = tempfile::tempdir().expect("tempdir");
    let source = dir.path().join("arena.navjson");
    let mut graph = stale_graph();
    graph.nodes[0].links.push(NavLink::walk(0));
    write_navjson(&source, &graph, &curated_metadata(), NavJsonVersion::V2);

    let request = ConversionRequest::new(&source).with_upgrade(true);
    Pipeline::new(&request, &mut ScriptedTerminal::default())
        .run()
        .expect("conversion still runs");
    assert!(dir.path().join("arena.nav").exists());
}
