use crate::config::resolve_input;
use crate::core::ConfigProvider;
use crate::domain::model::OutputFormat;
use crate::utils::error::{EtlError, Result};
use crate::utils::validation::{validate_non_empty_string, validate_path, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub job: JobConfig,
    pub input: InputConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobConfig {
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputConfig {
    pub file: String,
    pub data_dir: Option<String>,
    pub delimiter: String,
    pub sort_by: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputConfig {
    pub path: Option<String>,
    pub format: Option<OutputFormat>,
    pub print: Option<bool>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(EtlError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        // 處理環境變數替換
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| EtlError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${DATA_DIR})，未設定的變數保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| EtlError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.into_owned())
    }

    pub fn data_dir(&self) -> &str {
        self.input.data_dir.as_deref().unwrap_or("data")
    }

    pub fn print_output(&self) -> bool {
        self.output.print.unwrap_or(true)
    }
}

impl ConfigProvider for TomlConfig {
    fn input_path(&self) -> String {
        resolve_input(self.data_dir(), &self.input.file)
    }

    fn delimiter(&self) -> &str {
        &self.input.delimiter
    }

    fn sort_by(&self) -> &str {
        &self.input.sort_by
    }

    fn output_path(&self) -> &str {
        self.output.path.as_deref().unwrap_or("output.json")
    }

    fn output_format(&self) -> OutputFormat {
        self.output.format.unwrap_or_default()
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("input.file", &self.input.file)?;
        validate_non_empty_string("input.delimiter", &self.input.delimiter)?;
        validate_non_empty_string("input.sort_by", &self.input.sort_by)?;
        validate_path("output.path", self.output_path())?;
        Ok(())
    }
}
