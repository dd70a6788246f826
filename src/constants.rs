//! Common constants used throughout blade.

/// Supported settings file names, in lookup order
pub const CONFIG_FILES: [&str; 3] = ["blade.json", "blade.yml", "blade.yaml"];

/// File name of the template archive shipped next to the executable
pub const TEMPLATES_ARCHIVE: &str = "templates.tar.gz";

/// Environment variable overriding the template archive location
pub const TEMPLATES_ENV: &str = "BLADE_TEMPLATES";

/// File extensions (with the leading dot) whose content receives token substitution
pub const TEXT_EXTENSIONS: [&str; 11] = [
    ".bnd",
    ".java",
    ".project",
    ".xml",
    ".jsp",
    ".css",
    ".jspf",
    ".js",
    ".properties",
    ".gradle",
    ".prefs",
];

/// Suffix every portlet class name carries
pub const PORTLET_SUFFIX: &str = "Portlet";
