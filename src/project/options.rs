/// How the parser treats includes it cannot find.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParserOptions {
    /// Fail with [`crate::gir::GirError::DependencyNotFound`] instead of
    /// logging a warning and continuing.
    pub strict: bool,
}

impl ParserOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn strict() -> Self {
        Self { strict: true }
    }

    pub fn lenient() -> Self {
        Self { strict: false }
    }
}
