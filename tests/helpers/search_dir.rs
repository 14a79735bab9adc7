//! On-disk GIR directories for dependency loading tests.

use std::fs;
use std::path::{Path, PathBuf};

use girscope::SearchPaths;
use tempfile::TempDir;

use super::gir_fixtures::{gio_stub, glib_stub, gobject_stub};

/// A temporary directory of `.gir` files, removed on drop.
pub struct GirDir {
    dir: TempDir,
}

impl GirDir {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp dir"),
        }
    }

    /// A directory holding the GLib, GObject and Gio stubs.
    pub fn with_stubs() -> Self {
        let dir = Self::new();
        dir.write("GLib-2.0.gir", &glib_stub());
        dir.write("GObject-2.0.gir", &gobject_stub());
        dir.write("Gio-2.0.gir", &gio_stub());
        dir
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn write(&self, file_name: &str, contents: &str) -> PathBuf {
        let path = self.dir.path().join(file_name);
        fs::write(&path, contents).expect("Failed to write GIR file");
        path
    }

    pub fn search_paths(&self) -> SearchPaths {
        SearchPaths::with_paths([self.path()])
    }
}
