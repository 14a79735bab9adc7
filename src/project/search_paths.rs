//! Ordered GIR search directories.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::base::constants::{
    DEFAULT_XDG_DATA_DIRS, GI_GIR_PATH_ENV, GIR_DATA_SUBDIR, SYSTEM_GIR_DIR,
};

/// Ordered, de-duplicated list of directories searched for `.gir` files.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchPaths {
    paths: Vec<PathBuf>,
}

impl SearchPaths {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_paths<I, P>(paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        let mut search = Self::new();
        for path in paths {
            search.push(path);
        }
        search
    }

    /// Appends `path` unless it is already present.
    pub fn push(&mut self, path: impl Into<PathBuf>) {
        let path = path.into();
        if !self.paths.contains(&path) {
            self.paths.push(path);
        }
    }

    /// Moves or inserts `path` to the front.
    pub fn prepend(&mut self, path: impl Into<PathBuf>) {
        let path = path.into();
        self.paths.retain(|p| p != &path);
        self.paths.insert(0, path);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Path> {
        self.paths.iter().map(PathBuf::as_path)
    }

    pub fn as_slice(&self) -> &[PathBuf] {
        &self.paths
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// The first `dir/file_name` that exists.
    pub fn find(&self, file_name: &str) -> Option<PathBuf> {
        self.paths
            .iter()
            .map(|dir| dir.join(file_name))
            .find(|candidate| candidate.is_file())
    }

    /// Search paths built from the process environment.
    pub fn default_paths() -> Self {
        let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        let paths = Self::from_env_vars(
            &cwd,
            |name| std::env::var_os(name),
            dirs::home_dir().as_deref(),
        );
        info!(
            "GIR search paths: {}",
            paths
                .iter()
                .map(|p| p.display().to_string())
                .collect::<Vec<_>>()
                .join(", ")
        );
        paths
    }

    /// Builds the default search order from explicit inputs.
    ///
    /// Order: `cwd`, `GI_GIR_PATH` entries, `$XDG_DATA_HOME/gir-1.0`
    /// (or `~/.local/share/gir-1.0`), each `$XDG_DATA_DIRS` entry joined with
    /// `gir-1.0`, then the system GIR directory on non-Windows platforms.
    pub fn from_env_vars(
        cwd: &Path,
        var: impl Fn(&str) -> Option<OsString>,
        home: Option<&Path>,
    ) -> Self {
        let mut search = Self::new();
        search.push(cwd);

        if let Some(gir_path) = var(GI_GIR_PATH_ENV) {
            for dir in std::env::split_paths(&gir_path) {
                if !dir.as_os_str().is_empty() {
                    search.push(dir);
                }
            }
        }

        let data_home = match var("XDG_DATA_HOME") {
            Some(dir) if !dir.is_empty() => Some(PathBuf::from(dir)),
            _ => home.map(|h| h.join(".local").join("share")),
        };
        if let Some(data_home) = data_home {
            search.push(data_home.join(GIR_DATA_SUBDIR));
        }

        let data_dirs = match var("XDG_DATA_DIRS") {
            Some(dirs) if !dirs.is_empty() => dirs,
            _ => OsString::from(DEFAULT_XDG_DATA_DIRS),
        };
        for dir in std::env::split_paths(&data_dirs) {
            if !dir.as_os_str().is_empty() {
                search.push(dir.join(GIR_DATA_SUBDIR));
            }
        }

        if !cfg!(windows) {
            search.push(SYSTEM_GIR_DIR);
        }
        search
    }
}

impl<'a> IntoIterator for &'a SearchPaths {
    type Item = &'a PathBuf;
    type IntoIter = std::slice::Iter<'a, PathBuf>;

    fn into_iter(self) -> Self::IntoIter {
        self.paths.iter()
    }
}
