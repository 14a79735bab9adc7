//! The top-level entry point: read a GIR file, load its includes, resolve.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::info;

use super::{DependencyLoader, ParserOptions, SearchPaths};
use crate::gir::{self, GirError, IncludeLoader, Result};
use crate::model::Repository;
use crate::resolve::{ResolveReport, ResolveWarning, resolve_repository};

/// Parses GIR documents against one dependency cache.
///
/// Repositories parsed by the same `GirParser` share their loaded
/// dependencies.
#[derive(Debug, Default)]
pub struct GirParser {
    loader: DependencyLoader,
    last_report: ResolveReport,
}

impl GirParser {
    pub fn new(search_paths: SearchPaths) -> Self {
        Self::with_options(search_paths, ParserOptions::default())
    }

    pub fn with_options(search_paths: SearchPaths, options: ParserOptions) -> Self {
        Self {
            loader: DependencyLoader::new(search_paths, options),
            last_report: ResolveReport::default(),
        }
    }

    /// A parser using [`SearchPaths::default_paths`].
    pub fn from_env() -> Self {
        Self::new(SearchPaths::default_paths())
    }

    pub fn append_search_path(&mut self, path: impl Into<PathBuf>) {
        self.loader.search_paths_mut().push(path);
    }

    pub fn prepend_search_path(&mut self, path: impl Into<PathBuf>) {
        self.loader.search_paths_mut().prepend(path);
    }

    pub fn search_paths(&self) -> &SearchPaths {
        self.loader.search_paths()
    }

    pub fn options(&self) -> ParserOptions {
        self.loader.options()
    }

    pub fn parse_file(&mut self, path: impl AsRef<Path>) -> Result<Repository> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|e| GirError::io(path, e))?;
        self.parse_bytes(&bytes, Some(path.to_path_buf()))
    }

    pub fn parse_str(&mut self, source: &str) -> Result<Repository> {
        self.parse_bytes(source.as_bytes(), None)
    }

    /// Builds the repository, loading includes on demand, then runs every
    /// resolution pass over it.
    pub fn parse_bytes(&mut self, input: &[u8], girfile: Option<PathBuf>) -> Result<Repository> {
        let mut repo = gir::read_repository(input, girfile, &mut self.loader)?;
        self.last_report = resolve_repository(&mut repo);
        info!(
            "Parsed {}-{} with {} dependencies ({} warnings)",
            repo.namespace.name,
            repo.namespace.version,
            repo.includes().count(),
            self.last_report.len()
        );
        Ok(repo)
    }

    /// A cached dependency by namespace name.
    pub fn dependency(&self, namespace: &str) -> Option<Arc<Repository>> {
        self.loader.repository(namespace)
    }

    /// How many GIR files the dependency loader has read.
    pub fn load_count(&self) -> usize {
        self.loader.load_count()
    }

    /// Warnings from the most recent resolution.
    pub fn warnings(&self) -> &[ResolveWarning] {
        &self.last_report.warnings
    }

    pub fn last_report(&self) -> &ResolveReport {
        &self.last_report
    }
}
