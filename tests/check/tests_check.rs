//! Findings over a parsed namespace.

use girscope::check::{FindingKind, Section, check_repository};
use girscope::gir::{NoIncludes, read_repository};
use girscope::resolve::resolve_repository;

use crate::helpers::gir_fixtures::{foo_document, gir_document};

#[test]
fn test_findings_for_foo() {
    let mut repo = read_repository(foo_document().as_bytes(), None, &mut NoIncludes).unwrap();
    resolve_repository(&mut repo);

    let findings = check_repository(&repo);
    let messages: Vec<&str> = findings.iter().map(|f| f.message.as_str()).collect();
    assert_eq!(
        messages,
        vec![
            "Symbol 'Foo.Bar.new' at <unknown>:0 is not documented",
            "Return value for symbol 'Foo.Bar.new' is not documented",
            "Symbol 'Foo.Bar.set_label' at <unknown>:0 is not documented",
            "Parameter 'label' of symbol 'Foo.Bar.set_label' is not documented",
            "Symbol 'Foo.Bar.label' at <unknown>:0 is not documented",
            "Symbol 'Foo.Bar.changed' at <unknown>:0 is not documented",
            "Symbol 'Foo.Baz' at <unknown>:0 is not documented",
            "Symbol 'Foo.init' at <unknown>:0 is not documented",
            "Parameter 'values' of symbol 'Foo.init' is not documented",
            "Parameter 'error' of symbol 'Foo.init' is not documented",
            "Return value for symbol 'Foo.init' is not documented",
        ]
    );
    assert!(findings[..7].iter().all(|f| f.section == Section::Classes));
    assert_eq!(findings[7].section, Section::Functions);
    assert_eq!(findings[3].kind, FindingKind::Parameter);
}

#[test]
fn test_documented_namespace_is_clean() {
    let body = r#"<enumeration name="Mode" c:type="FooMode">
        <doc xml:space="preserve">Modes.</doc>
        <member name="on" value="1" c:identifier="FOO_MODE_ON">
          <doc xml:space="preserve">On.</doc>
        </member>
      </enumeration>
      <function name="run" c:identifier="foo_run">
        <doc xml:space="preserve">Runs.</doc>
        <return-value transfer-ownership="none">
          <doc xml:space="preserve">Whether it ran.</doc>
          <type name="gboolean" c:type="gboolean"/>
        </return-value>
      </function>"#;
    let repo = read_repository(
        gir_document("Foo", "1.0", &[], body).as_bytes(),
        None,
        &mut NoIncludes,
    )
    .unwrap();
    assert!(check_repository(&repo).is_empty());
}

#[test]
fn test_sections_sorted_with_symbols_case_insensitive() {
    let body = r#"<function name="zeta" c:identifier="foo_zeta"/>
      <function name="Alpha" c:identifier="foo_alpha"/>
      <alias name="Handle" c:type="FooHandle"><type name="gint" c:type="int"/></alias>
      <constant name="MAX" value="3" c:type="FOO_MAX"><type name="gint" c:type="gint"/></constant>"#;
    let repo = read_repository(
        gir_document("Foo", "1.0", &[], body).as_bytes(),
        None,
        &mut NoIncludes,
    )
    .unwrap();

    let findings = check_repository(&repo);
    let symbols: Vec<(Section, &str)> = findings
        .iter()
        .map(|f| (f.section, f.symbol.as_str()))
        .collect();
    assert_eq!(
        symbols,
        vec![
            (Section::Aliases, "Foo.Handle"),
            (Section::Constants, "Foo.MAX"),
            (Section::Functions, "Foo.Alpha"),
            (Section::Functions, "Foo.zeta"),
        ]
    );
}
