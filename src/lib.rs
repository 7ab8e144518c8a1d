pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::TomlConfig;

pub use adapters::storage::LocalStorage;
pub use core::{
    etl::{EtlEngine, EtlOutcome},
    parser::{parse, parse_file, CustomerParser},
    pipeline::CustomerPipeline,
};
pub use domain::model::{Customer, Delimiter, OutputFormat, ParseOptions, SortKey};
pub use utils::error::{EtlError, Result};
