//! Global constants used throughout the tplpass codebase.
//!
//! File names, substitution tokens and defaults that more than one module
//! needs. Defining them centrally keeps the config loader, the CLI and the
//! pipeline in agreement.

/// Name of the configuration file the CLI looks for.
pub const CONFIG_FILE_NAME: &str = "tplpass.toml";

/// Token in a string output template that is replaced with the entry's base
/// name (file name without extension).
pub const NAME_TOKEN: &str = "[name]";

/// Default host output directory, relative to the configuration directory.
pub const DEFAULT_OUTPUT_DIR: &str = "dist";

/// Default namespace for partials registered from companion-generated pages.
pub const DEFAULT_PAGE_PREFIX: &str = "html";

/// Environment variable that disables colored error output.
pub const NO_COLOR_ENV: &str = "NO_COLOR";
