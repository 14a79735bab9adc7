//! Assertion helpers over resolved type lists.

use girscope::model::Type;

/// Qualified names of `types`, in order.
pub fn type_names(types: &[Type]) -> Vec<&str> {
    types.iter().map(|t| t.name.as_ref()).collect()
}

/// Assert `types` holds exactly `expected`, in order.
pub fn assert_type_names(types: &[Type], expected: &[&str]) {
    assert_eq!(
        type_names(types),
        expected,
        "Expected types {:?}, got {:?}",
        expected,
        type_names(types)
    );
}

/// Assert every entry of `types` is distinct.
pub fn assert_no_duplicate_types(types: &[Type]) {
    for (i, ty) in types.iter().enumerate() {
        assert!(
            !types[i + 1..].contains(ty),
            "Duplicate type found: {}",
            ty.name
        );
    }
}
