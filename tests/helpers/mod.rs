//! Shared fixtures and assertions for integration tests.

#![allow(dead_code)]

pub mod gir_fixtures;
pub mod search_dir;
pub mod type_assertions;
