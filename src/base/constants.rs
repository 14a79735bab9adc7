//! GIR vocabulary constants.

/// XML namespace URIs used by GIR documents.
pub mod namespace {
    /// Core introspection namespace (default namespace of GIR documents).
    pub const CORE: &str = "http://www.gtk.org/introspection/core/1.0";
    /// C-level attributes (`c:type`, `c:identifier`, …).
    pub const C: &str = "http://www.gtk.org/introspection/c/1.0";
    /// GObject type-system attributes (`glib:type-name`, `glib:signal`, …).
    pub const GLIB: &str = "http://www.gtk.org/introspection/glib/1.0";
}

/// Integral and floating point C types that never need cross-file lookup.
pub const FUNDAMENTAL_INTEGRAL_TYPES: &[&str] = &[
    "gint8",
    "guint8",
    "int8_t",
    "uint8_t",
    "gint16",
    "guint16",
    "int16_t",
    "uint16_t",
    "gint32",
    "guint32",
    "int32_t",
    "uint32_t",
    "gint64",
    "guint64",
    "int64_t",
    "uint64_t",
    "gint",
    "int",
    "guint",
    "unsigned",
    "unsigned int",
    "gfloat",
    "float",
    "gdouble",
    "double",
    "long double",
    "gchar",
    "guchar",
    "char",
    "unsigned char",
    "gshort",
    "gushort",
    "short",
    "unsigned short",
    "glong",
    "gulong",
    "long",
    "unsigned long",
    "gunichar",
    "gsize",
    "gssize",
    "size_t",
    "gboolean",
    "bool",
    "va_list",
];

/// Pointer and string types that are fundamental in addition to the integral ones.
pub const FUNDAMENTAL_POINTER_TYPES: &[&str] = &[
    "gpointer",
    "gconstpointer",
    "gchar*",
    "char*",
    "guchar*",
    "utf8",
    "filename",
];

/// GLib spellings that are plain aliases of C types.
pub const GLIB_ALIASES: &[(&str, &str)] = &[
    ("gchar", "char"),
    ("gdouble", "double"),
    ("gfloat", "float"),
    ("gint", "int"),
    ("glong", "long"),
    ("gshort", "short"),
];

/// C types implied by a GIR type name when the document omits `c:type`.
pub const FUNDAMENTAL_CTYPES: &[(&str, &str)] = &[
    ("utf8", "char*"),
    ("filename", "char*"),
    ("GObject.Object", "GObject*"),
    ("GObject.InitiallyUnowned", "GInitiallyUnowned*"),
    ("GObject.ParamSpec", "GParamSpec*"),
    ("GObject.Type", "GType"),
];

/// Fully qualified name `GType` is canonicalized to.
pub const GTYPE_FQTN: &str = "GObject.Type";

/// The root of the GObject class hierarchy.
pub const GOBJECT_OBJECT: &str = "GObject.Object";

/// Message used when a symbol is deprecated without `<doc-deprecated>`.
pub const DEFAULT_DEPRECATION_MESSAGE: &str = "Please do not use it in newly written code";

/// Directory name GIR files are installed under inside a data directory.
pub const GIR_DATA_SUBDIR: &str = "gir-1.0";

/// Environment variable carrying extra GIR search directories.
pub const GI_GIR_PATH_ENV: &str = "GI_GIR_PATH";

/// Fallback for `XDG_DATA_DIRS` when unset.
pub const DEFAULT_XDG_DATA_DIRS: &str = "/usr/share:/usr/local/share";

/// System GIR directory appended last on non-Windows platforms.
pub const SYSTEM_GIR_DIR: &str = "/usr/share/gir-1.0";

pub fn is_fundamental(name: &str) -> bool {
    FUNDAMENTAL_INTEGRAL_TYPES.contains(&name) || FUNDAMENTAL_POINTER_TYPES.contains(&name)
}

pub fn is_fundamental_integral(name: &str) -> bool {
    FUNDAMENTAL_INTEGRAL_TYPES.contains(&name)
}

pub fn glib_alias(name: &str) -> Option<&'static str> {
    GLIB_ALIASES
        .iter()
        .find(|(alias, _)| *alias == name)
        .map(|(_, target)| *target)
}

pub fn fundamental_ctype(fqtn: &str) -> Option<&'static str> {
    FUNDAMENTAL_CTYPES
        .iter()
        .find(|(name, _)| *name == fqtn)
        .map(|(_, ctype)| *ctype)
}
