//! Finds, parses and caches the GIR files named by `<include>` elements.

use std::path::Path;
use std::sync::Arc;

use indexmap::IndexMap;
use rustc_hash::FxHashSet;
use tracing::{debug, trace, warn};

use super::{ParserOptions, SearchPaths};
use crate::base::Name;
use crate::gir::{self, GirError, IncludeLoader, Result};
use crate::model::{Include, Repository};
use crate::resolve::resolve_dependency;

/// An [`IncludeLoader`] backed by the file system.
///
/// Each namespace is parsed at most once per loader, so a diamond of
/// shared dependencies is read a single time.
#[derive(Debug, Default)]
pub struct DependencyLoader {
    search_paths: SearchPaths,
    options: ParserOptions,
    loaded: IndexMap<Name, Arc<Repository>>,
    in_progress: FxHashSet<Name>,
    load_count: usize,
}

impl DependencyLoader {
    pub fn new(search_paths: SearchPaths, options: ParserOptions) -> Self {
        Self {
            search_paths,
            options,
            ..Self::default()
        }
    }

    pub fn search_paths(&self) -> &SearchPaths {
        &self.search_paths
    }

    pub fn search_paths_mut(&mut self) -> &mut SearchPaths {
        &mut self.search_paths
    }

    pub fn options(&self) -> ParserOptions {
        self.options
    }

    pub fn set_options(&mut self, options: ParserOptions) {
        self.options = options;
    }

    /// How many GIR files have actually been read.
    pub fn load_count(&self) -> usize {
        self.load_count
    }

    /// Every cached dependency, in load order.
    pub fn loaded(&self) -> impl Iterator<Item = (&Name, &Arc<Repository>)> {
        self.loaded.iter()
    }

    fn load_file(&mut self, include: &Include, path: &Path) -> Result<Arc<Repository>> {
        debug!("Loading GIR for dependency {include} from {}", path.display());
        let bytes = std::fs::read(path).map_err(|e| GirError::io(path, e))?;
        self.load_count += 1;
        let mut repo = gir::read_repository(&bytes, Some(path.to_path_buf()), self)?;
        resolve_dependency(&mut repo);
        Ok(Arc::new(repo))
    }
}

impl IncludeLoader for DependencyLoader {
    fn load_include(&mut self, include: &Include) -> Result<()> {
        if self.loaded.contains_key(&include.name) {
            trace!("Dependency {include} already loaded");
            return Ok(());
        }
        if !self.in_progress.insert(include.name.clone()) {
            warn!(symbol = %include, "Circular include, skipping");
            return Ok(());
        }

        let result = match self.search_paths.find(&include.gir_file()) {
            Some(path) => self.load_file(include, &path).map(Some),
            None if self.options.strict => Err(GirError::DependencyNotFound {
                include: include.to_string(),
                search_paths: self.search_paths.as_slice().to_vec(),
            }),
            None => {
                warn!(
                    symbol = %include,
                    "No GIR file found for dependency, continuing without it"
                );
                Ok(None)
            }
        };
        self.in_progress.remove(&include.name);

        if let Some(repo) = result? {
            self.loaded.insert(include.name.clone(), repo);
        }
        Ok(())
    }

    fn repository(&self, namespace: &str) -> Option<Arc<Repository>> {
        self.loaded.get(namespace).cloned()
    }
}
