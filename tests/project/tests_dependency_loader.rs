//! Include loading against temporary search directories.

use girscope::gir::{GirError, IncludeLoader};
use girscope::model::Include;
use girscope::project::{DependencyLoader, ParserOptions, SearchPaths};
use rstest::rstest;

use crate::helpers::gir_fixtures::gir_document;
use crate::helpers::search_dir::GirDir;

#[test]
fn test_loads_include_with_its_dependencies() {
    let dir = GirDir::with_stubs();
    let mut loader = DependencyLoader::new(dir.search_paths(), ParserOptions::default());

    loader
        .load_include(&Include::new("GObject", Some("2.0".into())))
        .expect("GObject should load");

    assert_eq!(loader.load_count(), 2, "GObject and GLib");
    let gobject = loader.repository("GObject").expect("GObject cached");
    assert!(gobject.include("GLib").is_some());
    assert!(loader.repository("GLib").is_some());
    let glib = loader.repository("GLib").unwrap();
    assert!(glib.namespace().find_symbol("g_free").is_some());
}

#[test]
fn test_repeated_includes_load_once() {
    let dir = GirDir::with_stubs();
    let mut loader = DependencyLoader::new(dir.search_paths(), ParserOptions::default());
    let glib = Include::new("GLib", Some("2.0".into()));

    loader.load_include(&glib).unwrap();
    loader.load_include(&glib).unwrap();
    loader
        .load_include(&Include::new("Gio", Some("2.0".into())))
        .unwrap();

    assert_eq!(loader.load_count(), 3);
    let loaded: Vec<&str> = loader.loaded().map(|(name, _)| name.as_ref()).collect();
    assert_eq!(loaded, vec!["GLib", "GObject", "Gio"]);
}

#[rstest]
#[case(ParserOptions::lenient(), false)]
#[case(ParserOptions::strict(), true)]
fn test_missing_include(#[case] options: ParserOptions, #[case] fails: bool) {
    let dir = GirDir::new();
    let mut loader = DependencyLoader::new(dir.search_paths(), options);
    let result = loader.load_include(&Include::new("Missing", Some("1.0".into())));

    assert_eq!(result.is_err(), fails);
    assert!(loader.repository("Missing").is_none());
    if let Err(GirError::DependencyNotFound {
        include,
        search_paths,
    }) = result
    {
        assert_eq!(include, "Missing-1.0");
        assert_eq!(search_paths, vec![dir.path().to_path_buf()]);
    }
}

#[test]
fn test_later_search_paths_are_consulted() {
    let empty = GirDir::new();
    let stubs = GirDir::with_stubs();
    let paths = SearchPaths::with_paths([empty.path(), stubs.path()]);
    let mut loader = DependencyLoader::new(paths, ParserOptions::strict());

    loader
        .load_include(&Include::new("GLib", Some("2.0".into())))
        .expect("GLib should be found in the second directory");
    let glib = loader.repository("GLib").unwrap();
    assert_eq!(
        glib.girfile.as_deref(),
        Some(stubs.path().join("GLib-2.0.gir").as_path())
    );
}

#[test]
fn test_circular_includes_terminate() {
    let dir = GirDir::new();
    dir.write("A-1.0.gir", &gir_document("A", "1.0", &[("B", "1.0")], ""));
    dir.write("B-1.0.gir", &gir_document("B", "1.0", &[("A", "1.0")], ""));
    let mut loader = DependencyLoader::new(dir.search_paths(), ParserOptions::strict());

    loader
        .load_include(&Include::new("A", Some("1.0".into())))
        .expect("cycle should not fail");
    assert_eq!(loader.load_count(), 2);
    assert!(loader.repository("A").is_some());
    assert!(loader.repository("B").is_some());
}

#[test]
fn test_broken_dependency_is_an_error() {
    let dir = GirDir::new();
    dir.write("Broken-1.0.gir", "<repository><namespace");
    let mut loader = DependencyLoader::new(dir.search_paths(), ParserOptions::default());

    let err = loader
        .load_include(&Include::new("Broken", Some("1.0".into())))
        .expect_err("malformed dependency");
    assert!(matches!(err, GirError::Xml(_)), "{err}");
}
