use crate::core::Pipeline;
use crate::utils::error::Result;

#[derive(Debug, Clone)]
pub struct EtlOutcome {
    pub output_path: String,
    pub record_count: usize,
    /// The rendered document that was written to `output_path`.
    pub document: String,
}

pub struct EtlEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> EtlEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub async fn run(&self) -> Result<EtlOutcome> {
        tracing::info!("Starting customer ETL process...");

        // Extract
        let lines = self.pipeline.extract().await?;
        tracing::info!("Extracted {} lines", lines.len());

        // Transform
        let result = self.pipeline.transform(lines).await?;
        let record_count = result.customers.len();
        let document = result.document.clone();
        tracing::info!("Parsed {} customers", record_count);

        // Load
        let output_path = self.pipeline.load(result).await?;
        tracing::info!("Output saved to: {}", output_path);

        Ok(EtlOutcome {
            output_path,
            record_count,
            document,
        })
    }
}
