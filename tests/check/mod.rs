//! Documentation coverage tests.

pub mod tests_check;
