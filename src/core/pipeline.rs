use crate::core::parser::{decode, CustomerParser};
use crate::core::{ConfigProvider, Customer, Pipeline, Storage, TransformResult};
use crate::domain::model::{OutputFormat, ParseOptions};
use crate::utils::error::{EtlError, Result};

/// Column order of rendered output.
pub const OUTPUT_FIELDS: [&str; 7] = [
    "first_name",
    "last_name",
    "full_name",
    "email",
    "vehicle_type",
    "vehicle_name",
    "vehicle_length",
];

pub struct CustomerPipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
    parser: CustomerParser,
}

impl<S: Storage, C: ConfigProvider> CustomerPipeline<S, C> {
    /// Fails on an unsupported sort key or delimiter, before any file is read.
    pub fn new(storage: S, config: C) -> Result<Self> {
        let options = ParseOptions::new(config.delimiter(), config.sort_by())?;
        Ok(Self {
            storage,
            config,
            parser: CustomerParser::new(options),
        })
    }

    pub fn config(&self) -> &C {
        &self.config
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for CustomerPipeline<S, C> {
    async fn extract(&self) -> Result<Vec<String>> {
        let input_path = self.config.input_path();
        tracing::debug!("Reading customers from: {}", input_path);

        let bytes = self.storage.read_file(&input_path).await?;
        let text = decode(bytes)?;

        Ok(text.lines().map(str::to_string).collect())
    }

    async fn transform(&self, lines: Vec<String>) -> Result<TransformResult> {
        let options = self.parser.options();
        tracing::debug!(
            "Parsing {} lines (delimiter '{}', sort by {})",
            lines.len(),
            options.delimiter,
            options.sort_key
        );

        let customers = self.parser.parse_lines(&lines)?;
        let document = render_output(&customers, self.config.output_format())?;

        Ok(TransformResult {
            customers,
            document,
        })
    }

    async fn load(&self, result: TransformResult) -> Result<String> {
        let output_path = self.config.output_path().to_string();

        tracing::debug!(
            "Writing {} customers ({} bytes) to {}",
            result.customers.len(),
            result.document.len(),
            output_path
        );
        self.storage
            .write_file(&output_path, result.document.as_bytes())
            .await?;

        Ok(output_path)
    }
}

/// Renders customers as a pretty JSON array or as CSV with a header row.
pub fn render_output(customers: &[Customer], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(customers)?),
        OutputFormat::Csv => {
            let mut writer = csv::WriterBuilder::new()
                .has_headers(false)
                .from_writer(Vec::new());

            writer.write_record(OUTPUT_FIELDS)?;
            for customer in customers {
                writer.serialize(customer)?;
            }

            let bytes = writer
                .into_inner()
                .map_err(|e| EtlError::IoError(e.into_error()))?;
            decode(bytes)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Arc;
    use tokio::sync::Mutex;

    #[derive(Clone)]
    struct MockStorage {
        files: Arc<Mutex<HashMap<String, Vec<u8>>>>,
    }

    impl MockStorage {
        fn new() -> Self {
            Self {
                files: Arc::new(Mutex::new(HashMap::new())),
            }
        }

        async fn with_file(self, path: &str, content: &str) -> Self {
            self.files
                .lock()
                .await
                .insert(path.to_string(), content.as_bytes().to_vec());
            self
        }

        async fn get_file(&self, path: &str) -> Option<Vec<u8>> {
            let files = self.files.lock().await;
            files.get(path).cloned()
        }
    }

    impl Storage for MockStorage {
        async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
            let files = self.files.lock().await;
            files
                .get(path)
                .cloned()
                .ok_or_else(|| EtlError::ResourceNotFound {
                    path: path.to_string(),
                })
        }

        async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
            let mut files = self.files.lock().await;
            files.insert(path.to_string(), data.to_vec());
            Ok(())
        }
    }

    struct MockConfig {
        delimiter: String,
        sort_by: String,
        format: OutputFormat,
    }

    impl MockConfig {
        fn new(delimiter: &str, sort_by: &str) -> Self {
            Self {
                delimiter: delimiter.to_string(),
                sort_by: sort_by.to_string(),
                format: OutputFormat::Json,
            }
        }

        fn with_format(mut self, format: OutputFormat) -> Self {
            self.format = format;
            self
        }
    }

    impl ConfigProvider for MockConfig {
        fn input_path(&self) -> String {
            "data/pipes.txt".to_string()
        }

        fn delimiter(&self) -> &str {
            &self.delimiter
        }

        fn sort_by(&self) -> &str {
            &self.sort_by
        }

        fn output_path(&self) -> &str {
            "output.json"
        }

        fn output_format(&self) -> OutputFormat {
            self.format
        }
    }

    const PIPES: &str = "Ansel|Adams|a@adams.com|motorboat|Rushing Water|24’\n\
                         Isatou|Ceesay|isatou@recycle.com|campervan|Plastic To Purses|20’\n";

    #[test]
    fn test_new_rejects_invalid_options() {
        let result = CustomerPipeline::new(MockStorage::new(), MockConfig::new(":", "full_name"));
        assert!(matches!(result, Err(EtlError::InvalidDelimiter { .. })));

        let result = CustomerPipeline::new(MockStorage::new(), MockConfig::new("|", "email"));
        assert!(matches!(result, Err(EtlError::InvalidSortKey { .. })));
    }

    #[tokio::test]
    async fn test_extract_strips_line_terminators() {
        let storage = MockStorage::new().with_file("data/pipes.txt", PIPES).await;
        let pipeline = CustomerPipeline::new(storage, MockConfig::new("|", "full_name")).unwrap();

        let lines = pipeline.extract().await.unwrap();

        assert_eq!(lines.len(), 2);
        assert!(lines[0].ends_with("24’"));
        assert!(!lines[1].ends_with('\n'));
    }

    #[tokio::test]
    async fn test_extract_missing_file() {
        let pipeline =
            CustomerPipeline::new(MockStorage::new(), MockConfig::new("|", "full_name")).unwrap();

        let err = pipeline.extract().await.unwrap_err();
        assert!(matches!(err, EtlError::ResourceNotFound { .. }));
    }

    #[tokio::test]
    async fn test_transform_sorts_and_renders_json() {
        let pipeline =
            CustomerPipeline::new(MockStorage::new(), MockConfig::new("|", "vehicle_type"))
                .unwrap();
        let lines = PIPES.lines().map(str::to_string).collect();

        let result = pipeline.transform(lines).await.unwrap();

        assert_eq!(result.customers[0].full_name(), "Isatou Ceesay");
        assert_eq!(result.customers[1].full_name(), "Ansel Adams");

        let json: serde_json::Value = serde_json::from_str(&result.document).unwrap();
        assert_eq!(json[0]["vehicle_type"], "campervan");
        assert_eq!(json[1]["full_name"], "Ansel Adams");
        assert_eq!(json[1]["vehicle_length"], "24’");
    }

    #[tokio::test]
    async fn test_transform_malformed_line_returns_nothing() {
        let pipeline =
            CustomerPipeline::new(MockStorage::new(), MockConfig::new("|", "full_name")).unwrap();
        let lines = vec![
            "Ansel|Adams|a@adams.com|motorboat|Rushing Water|24’".to_string(),
            "Isatou|Ceesay|isatou@recycle.com|campervan|Plastic To Purses".to_string(),
        ];

        let err = pipeline.transform(lines).await.unwrap_err();
        assert!(matches!(err, EtlError::MalformedLine { line_number: 2, .. }));
    }

    #[tokio::test]
    async fn test_load_writes_document() {
        let storage = MockStorage::new();
        let pipeline =
            CustomerPipeline::new(storage.clone(), MockConfig::new("|", "full_name")).unwrap();

        let result = TransformResult {
            customers: vec![],
            document: "[]".to_string(),
        };
        let output_path = pipeline.load(result).await.unwrap();

        assert_eq!(output_path, "output.json");
        assert_eq!(storage.get_file("output.json").await.unwrap(), b"[]");
    }

    #[tokio::test]
    async fn test_transform_renders_csv() {
        let pipeline = CustomerPipeline::new(
            MockStorage::new(),
            MockConfig::new("|", "full_name").with_format(OutputFormat::Csv),
        )
        .unwrap();
        let lines = PIPES.lines().map(str::to_string).collect();

        let result = pipeline.transform(lines).await.unwrap();
        let rows: Vec<&str> = result.document.lines().collect();

        assert_eq!(
            rows,
            vec![
                "first_name,last_name,full_name,email,vehicle_type,vehicle_name,vehicle_length",
                "Ansel,Adams,Ansel Adams,a@adams.com,motorboat,Rushing Water,24’",
                "Isatou,Ceesay,Isatou Ceesay,isatou@recycle.com,campervan,Plastic To Purses,20’",
            ]
        );
    }

    #[test]
    fn test_render_empty() {
        assert_eq!(render_output(&[], OutputFormat::Json).unwrap(), "[]");
        assert_eq!(
            render_output(&[], OutputFormat::Csv).unwrap().trim_end(),
            OUTPUT_FIELDS.join(",")
        );
    }

    #[test]
    fn test_render_csv_quotes_embedded_commas() {
        let customer = Customer::from_fields([
            "Mandip",
            "Singh, Soin",
            "mandip@ecotourism.net",
            "motorboat",
            "Frozen Trekker",
            "32’",
        ]);
        let csv = render_output(&[customer], OutputFormat::Csv).unwrap();
        assert!(csv.contains("\"Singh, Soin\""));
    }
}
