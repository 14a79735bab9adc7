//! End-to-end parsing through `GirParser`.

use std::path::Path;

use girscope::gir::GirError;
use girscope::{GirParser, ParserOptions, WarningKind};

use crate::helpers::gir_fixtures::{foo_document, gir_document};
use crate::helpers::search_dir::GirDir;
use crate::helpers::type_assertions::assert_type_names;

#[test]
fn test_minimal_class_with_gobject_parent() {
    let dir = GirDir::with_stubs();
    let mut parser = GirParser::new(dir.search_paths());
    let source = gir_document(
        "Foo",
        "1.0",
        &[("GObject", "2.0")],
        r#"<class name="Bar" c:type="FooBar" parent="GObject.Object"/>"#,
    );

    let repo = parser.parse_str(&source).expect("Failed to parse");
    assert_eq!(repo.namespace().name.as_ref(), "Foo");
    let bar = repo.find_class("Bar").unwrap();
    assert_type_names(&bar.ancestors, &["GObject.Object"]);
    assert!(parser.warnings().is_empty(), "{:?}", parser.warnings());
}

#[test]
fn test_parse_file_records_dependency_files() {
    let dir = GirDir::with_stubs();
    let foo = dir.write("Foo-1.0.gir", &foo_document());
    let mut parser = GirParser::new(dir.search_paths());

    let repo = parser.parse_file(&foo).expect("Failed to parse");
    let files: Vec<&str> = repo
        .dependency_files()
        .into_iter()
        .filter_map(Path::file_name)
        .filter_map(|name| name.to_str())
        .collect();
    assert_eq!(
        files,
        vec!["GLib-2.0.gir", "GObject-2.0.gir", "Gio-2.0.gir", "Foo-1.0.gir"]
    );
}

#[test]
fn test_two_namespaces_share_glib() {
    let dir = GirDir::with_stubs();
    let mut parser = GirParser::new(dir.search_paths());

    let first = gir_document("Foo", "1.0", &[("GLib", "2.0")], "");
    let second = gir_document("Qux", "1.0", &[("GLib", "2.0"), ("GObject", "2.0")], "");
    parser.parse_str(&first).unwrap();
    assert_eq!(parser.load_count(), 1);
    parser.parse_str(&second).unwrap();
    assert_eq!(parser.load_count(), 2, "only GObject is new");
    assert!(parser.dependency("GLib").is_some());
}

#[test]
fn test_lenient_parser_keeps_unresolved_references() {
    let dir = GirDir::new();
    let mut parser = GirParser::new(dir.search_paths());
    let source = gir_document(
        "Foo",
        "1.0",
        &[("GObject", "2.0")],
        r#"<class name="Bar" c:type="FooBar" parent="Missing.Type"/>"#,
    );

    let repo = parser.parse_str(&source).expect("lenient parsing succeeds");
    assert!(repo.find_class("Bar").unwrap().ancestors.is_empty());
    assert!(
        parser
            .last_report()
            .of_kind(WarningKind::UnresolvedParent)
            .any(|w| w.target.as_ref() == "Missing.Type")
    );
}

#[test]
fn test_strict_parser_rejects_missing_include() {
    let dir = GirDir::new();
    let mut parser = GirParser::with_options(dir.search_paths(), ParserOptions::strict());
    let source = gir_document("Foo", "1.0", &[("GObject", "2.0")], "");

    let err = parser.parse_str(&source).expect_err("strict parsing fails");
    assert!(matches!(err, GirError::DependencyNotFound { .. }));
    assert!(
        err.to_string()
            .starts_with("Unable to find GIR file for GObject-2.0 in search paths:")
    );
}

#[test]
fn test_missing_file_is_io_error() {
    let dir = GirDir::new();
    let mut parser = GirParser::new(dir.search_paths());
    let err = parser
        .parse_file(dir.path().join("Nope-1.0.gir"))
        .expect_err("missing file");
    assert!(matches!(err, GirError::Io { .. }));
}

#[test]
fn test_prepended_search_path_wins() {
    let stubs = GirDir::with_stubs();
    let overrides = GirDir::new();
    overrides.write(
        "GLib-2.0.gir",
        &gir_document("GLib", "2.0", &[], r#"<record name="Override" c:type="GOverride"/>"#),
    );
    let mut parser = GirParser::new(stubs.search_paths());
    parser.prepend_search_path(overrides.path());

    parser
        .parse_str(&gir_document("Foo", "1.0", &[("GLib", "2.0")], ""))
        .unwrap();
    let glib = parser.dependency("GLib").unwrap();
    assert!(glib.namespace().find_record("Override").is_some());
}
