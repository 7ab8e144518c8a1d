use crate::config::resolve_input;
use crate::core::ConfigProvider;
use crate::domain::model::OutputFormat;
use crate::utils::error::Result;
use crate::utils::validation::{validate_path, validate_required_field, Validate};
use clap::Parser;

pub const USAGE_EXAMPLES: [&str; 2] = [
    "customer-etl pipes.txt '|' full_name",
    "customer-etl commas.txt ',' vehicle_type",
];

#[derive(Debug, Clone, Parser)]
#[command(name = "customer-etl")]
#[command(about = "Parse delimited customer/vehicle files into sorted JSON or CSV")]
pub struct CliConfig {
    /// Input file name, resolved against --data-dir
    pub file_name: Option<String>,

    /// Field delimiter: ',' or '|'
    pub delimiter: Option<String>,

    /// Sort key: full_name or vehicle_type
    pub sort_by: Option<String>,

    #[arg(long, default_value = "data")]
    pub data_dir: String,

    #[arg(short, long, default_value = "output.json")]
    pub output: String,

    #[arg(long, default_value = "json", help = "Output format: json or csv")]
    pub format: OutputFormat,

    #[arg(short, long, help = "Do not print the document to stdout")]
    pub quiet: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub json_logs: bool,
}

impl ConfigProvider for CliConfig {
    fn input_path(&self) -> String {
        resolve_input(&self.data_dir, self.file_name.as_deref().unwrap_or_default())
    }

    fn delimiter(&self) -> &str {
        self.delimiter.as_deref().unwrap_or_default()
    }

    fn sort_by(&self) -> &str {
        self.sort_by.as_deref().unwrap_or_default()
    }

    fn output_path(&self) -> &str {
        &self.output
    }

    fn output_format(&self) -> OutputFormat {
        self.format
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_required_field("file_name", &self.file_name)?;
        validate_required_field("delimiter", &self.delimiter)?;
        validate_required_field("sort_by", &self.sort_by)?;
        validate_path("output", &self.output)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::EtlError;

    #[test]
    fn test_parse_positional_arguments() {
        let config = CliConfig::try_parse_from(["customer-etl", "pipes.txt", "|", "full_name"])
            .unwrap();

        assert!(config.validate().is_ok());
        assert_eq!(config.input_path(), "data/pipes.txt");
        assert_eq!(config.delimiter(), "|");
        assert_eq!(config.sort_by(), "full_name");
        assert_eq!(config.output_path(), "output.json");
        assert_eq!(config.output_format(), OutputFormat::Json);
    }

    #[test]
    fn test_missing_argument_fails_validation() {
        let config = CliConfig::try_parse_from(["customer-etl", "pipes.txt", "|"]).unwrap();

        let err = config.validate().unwrap_err();
        assert!(matches!(err, EtlError::MissingArgumentError { field } if field == "sort_by"));
    }

    #[test]
    fn test_illegal_values_pass_presence_check() {
        let config =
            CliConfig::try_parse_from(["customer-etl", "pipes.txt", ":", "yolo_baggins"]).unwrap();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_options() {
        let config = CliConfig::try_parse_from([
            "customer-etl",
            "commas.txt",
            ",",
            "vehicle_type",
            "--data-dir",
            "input",
            "--format",
            "csv",
            "-o",
            "out/customers.csv",
        ])
        .unwrap();

        assert_eq!(config.input_path(), "input/commas.txt");
        assert_eq!(config.output_format(), OutputFormat::Csv);
        assert_eq!(config.output_path(), "out/customers.csv");
    }

    #[test]
    fn test_unknown_format_is_rejected() {
        let result = CliConfig::try_parse_from([
            "customer-etl",
            "commas.txt",
            ",",
            "full_name",
            "--format",
            "xml",
        ]);
        assert!(result.is_err());
    }
}
