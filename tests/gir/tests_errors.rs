//! Malformed documents.

use girscope::gir::{GirError, NoIncludes, read_repository};
use rstest::rstest;

use crate::helpers::gir_fixtures::gir_document;

fn read_err(source: &str) -> GirError {
    read_repository(source.as_bytes(), None, &mut NoIncludes)
        .expect_err("Expected the document to be rejected")
}

#[rstest]
#[case("<repository><namespace name=\"Foo\" version=\"1.0\">")]
#[case("<repository></namespace></repository>")]
#[case("<repository/><repository/>")]
fn test_malformed_xml(#[case] source: &str) {
    assert!(matches!(read_err(source), GirError::Xml(_)));
}

#[test]
fn test_missing_namespace() {
    let err = read_err(
        r#"<repository version="1.2" xmlns="http://www.gtk.org/introspection/core/1.0"/>"#,
    );
    assert!(matches!(err, GirError::Missing { kind: "element", .. }), "{err}");
}

#[test]
fn test_wrong_root() {
    let err = read_err(r#"<library xmlns="http://www.gtk.org/introspection/core/1.0"/>"#);
    assert!(matches!(err, GirError::Missing { .. }), "{err}");
}

#[test]
fn test_missing_name_attribute() {
    let source = gir_document("Foo", "1.0", &[], r#"<class c:type="FooNoName"/>"#);
    let err = read_err(&source);
    assert!(matches!(err, GirError::Missing { kind: "attribute", .. }), "{err}");
}

#[rstest]
#[case(r#"closure="first""#)]
#[case(r#"transfer-ownership="sometimes""#)]
#[case(r#"direction="sideways""#)]
fn test_invalid_attribute_values(#[case] attribute: &str) {
    let body = format!(
        r#"<function name="f" c:identifier="foo_f">
             <return-value><type name="none" c:type="void"/></return-value>
             <parameters>
               <parameter name="p" {attribute}><type name="gint" c:type="int"/></parameter>
             </parameters>
           </function>"#
    );
    let err = read_err(&gir_document("Foo", "1.0", &[], &body));
    assert!(matches!(err, GirError::Invalid { .. }), "{err}");
}
