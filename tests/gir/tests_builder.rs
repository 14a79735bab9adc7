//! XML-to-AST builder tests over complete documents.

use girscope::Name;
use girscope::gir::{NoIncludes, read_repository};
use girscope::model::{Direction, GirElement, Repository, Transfer, TypeRef};
use rstest::rstest;

use crate::helpers::gir_fixtures::{FOO_BODY, foo_document, gir_document};

fn build(source: &str) -> Repository {
    read_repository(source.as_bytes(), None, &mut NoIncludes).expect("Failed to build repository")
}

#[test]
fn test_foo_document_structure() {
    let repo = build(&foo_document());
    let ns = repo.namespace();
    assert_eq!(ns.name.as_ref(), "Foo");
    assert_eq!(ns.identifier_prefixes, vec![Name::from("Foo")]);
    assert_eq!(ns.symbol_prefixes, vec![Name::from("foo")]);

    let names: Vec<String> = repo
        .include_declarations
        .iter()
        .map(ToString::to_string)
        .collect();
    assert_eq!(names, vec!["GObject-2.0", "Gio-2.0"]);
    assert_eq!(repo.include_declarations[1].gir_file(), "Gio-2.0.gir");

    let bar = repo.find_class("Bar").expect("Bar should exist");
    assert_eq!(bar.doc().map(|d| d.content.as_str()), Some("A bar."));
    assert_eq!(
        bar.source_position().map(ToString::to_string).as_deref(),
        Some("foo/bar.h:22")
    );
    assert_eq!(bar.constructors.len(), 1);
    assert!(bar.find_property("label").unwrap().writable);
    assert!(bar.find_signal("changed").is_some());
    assert_eq!(bar.type_struct(), Some("BarClass"));
}

#[test]
fn test_parameter_defaults() {
    let repo = build(&foo_document());
    let method = repo
        .find_class("Bar")
        .and_then(|bar| bar.find_method("set_label"))
        .expect("set_label should exist");
    let label = &method.callable.parameters[0];
    assert_eq!(label.direction, Direction::In);
    assert_eq!(label.transfer, Transfer::Full);
    assert_eq!(method.instance_param.name.as_ref(), "self");
    assert_eq!(method.callable.identifier.as_deref(), Some("foo_bar_set_label"));
}

#[test]
fn test_unbounded_array_is_zero_terminated() {
    let repo = build(&foo_document());
    let init = repo.namespace().find_function("init").unwrap();
    let TypeRef::Array(array) = &init.parameters[0].target else {
        panic!("Expected an array parameter");
    };
    assert!(array.zero_terminated);
    assert_eq!(array.ctype.as_deref(), Some("const char**"));
    assert_eq!(array.element.ctype(&repo.types), Some("char*"));

    let error = &init.parameters[1];
    assert_eq!(error.direction, Direction::Out);
    assert!(error.nullable);
    assert_eq!(error.target.display(&repo.types), "GLib.Error");
}

#[rstest]
#[case(r#"<array length="1"><type name="guint8"/></array>"#, false)]
#[case(r#"<array fixed-size="4"><type name="guint8"/></array>"#, false)]
#[case(r#"<array name="GLib.Array"><type name="guint8"/></array>"#, false)]
#[case(r#"<array zero-terminated="1" length="1"><type name="guint8"/></array>"#, true)]
#[case(r#"<array><type name="guint8"/></array>"#, true)]
fn test_array_zero_terminated(#[case] array: &str, #[case] expected: bool) {
    let body = format!(
        r#"<function name="f" c:identifier="foo_f">
             <return-value><type name="none" c:type="void"/></return-value>
             <parameters><parameter name="data">{array}</parameter></parameters>
           </function>"#
    );
    let repo = build(&gir_document("Foo", "1.0", &[], &body));
    let f = repo.namespace().find_function("f").unwrap();
    match &f.parameters[0].target {
        TypeRef::Array(array) => assert_eq!(array.zero_terminated, expected),
        other => panic!("Expected array, got {other:?}"),
    }
}

#[test]
fn test_final_class_heuristic() {
    let repo = build(&foo_document());
    let ns = repo.namespace();
    let bar = repo.find_class("Bar").unwrap();
    assert!(!bar.fields.is_empty());
    assert!(ns.find_record("BarClass").unwrap().disguised);
    assert!(bar.is_final(ns), "disguised class struct makes Bar final");
    assert!(repo.find_class("Baz").unwrap().is_final(ns));
}

#[test]
fn test_type_struct_records_are_not_effective() {
    let repo = build(&gir_document("Foo", "1.0", &[], FOO_BODY));
    let ns = repo.namespace();
    assert!(ns.find_record("BarClass").is_some());
    assert_eq!(ns.get_effective_records().count(), 0);
}

#[test]
fn test_shared_type_entries() {
    let repo = build(&foo_document());
    let bar = repo.find_class("Bar").unwrap();
    let ctor = &bar.constructors[0];
    let method = bar.find_method("set_label").unwrap();
    assert_eq!(
        ctor.return_value.target.named(),
        method.instance_param.target.named(),
        "same name and ctype share one registry entry"
    );
}
