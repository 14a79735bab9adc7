//! Resolution tests
//!
//! Graph-wide properties of resolved repositories: ctype backfill,
//! ancestor/descendant duality, implementation duality, idempotence.

pub mod tests_properties;
