use crate::domain::model::{OutputFormat, TransformResult};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    /// Input file, already resolved against the data directory.
    fn input_path(&self) -> String;
    fn delimiter(&self) -> &str;
    fn sort_by(&self) -> &str;
    fn output_path(&self) -> &str;
    fn output_format(&self) -> OutputFormat;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<Vec<String>>;
    async fn transform(&self, lines: Vec<String>) -> Result<TransformResult>;
    async fn load(&self, result: TransformResult) -> Result<String>;
}
