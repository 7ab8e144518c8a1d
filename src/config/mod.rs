#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
pub use cli::CliConfig;
pub use toml_config::TomlConfig;

use std::path::Path;

/// Joins the input file onto its data directory, as `data/<file>`.
pub(crate) fn resolve_input(data_dir: &str, file_name: &str) -> String {
    if data_dir.is_empty() {
        return file_name.to_string();
    }
    Path::new(data_dir)
        .join(file_name)
        .to_string_lossy()
        .into_owned()
}
