use crate::core::export::SUPPORTED_FORMATS;
use crate::core::ConfigProvider;
use crate::utils::error::{RfiError, Result};
use crate::utils::validation::{
    validate_file_extension, validate_non_empty_string, validate_one_of, validate_path, Validate,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_OUTPUT_PATH: &str = "./output";
pub const DEFAULT_JSON_FILENAME: &str = "borderplex_rfi_response.json";
pub const DEFAULT_CSV_FILENAME: &str = "borderplex_rfi_response.csv";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AcceleratorConfig {
    #[serde(default)]
    pub output: OutputConfig,
    pub reference: Option<ReferenceConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_output_path")]
    pub output_path: String,
    #[serde(default = "default_output_formats")]
    pub output_formats: Vec<String>,
    pub filenames: Option<FilenameConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FilenameConfig {
    pub json: Option<String>,
    pub csv: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReferenceConfig {
    /// Reference tables in TOML; the built-in tables are used when absent.
    pub data_file: Option<String>,
}

fn default_output_path() -> String {
    DEFAULT_OUTPUT_PATH.to_string()
}

fn default_output_formats() -> Vec<String> {
    vec!["json".to_string()]
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            output_path: default_output_path(),
            output_formats: default_output_formats(),
            filenames: None,
        }
    }
}

impl AcceleratorConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content)
            .map_err(|e| RfiError::config(format!("TOML parsing error: {}", e)))
    }

    /// 替換環境變數 (例如 ${RFI_OUTPUT_DIR})
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}")?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn validate_config(&self) -> Result<()> {
        validate_path("output.output_path", &self.output.output_path)?;

        if self.output.output_formats.is_empty() {
            return Err(RfiError::validation(
                "output.output_formats",
                "[]",
                "At least one output format is required",
            ));
        }
        for format in &self.output.output_formats {
            validate_one_of("output.output_formats", format, &SUPPORTED_FORMATS)?;
        }

        validate_non_empty_string("output.filenames.json", self.json_filename())?;
        validate_file_extension("output.filenames.json", self.json_filename(), &["json"])?;
        validate_non_empty_string("output.filenames.csv", self.csv_filename())?;
        validate_file_extension("output.filenames.csv", self.csv_filename(), &["csv"])?;

        if let Some(data_file) = self.reference_data_file() {
            validate_path("reference.data_file", data_file)?;
            validate_file_extension("reference.data_file", data_file, &["toml"])?;
        }

        Ok(())
    }
}

impl ConfigProvider for AcceleratorConfig {
    fn output_path(&self) -> &str {
        &self.output.output_path
    }

    fn output_formats(&self) -> &[String] {
        &self.output.output_formats
    }

    fn json_filename(&self) -> &str {
        self.output
            .filenames
            .as_ref()
            .and_then(|f| f.json.as_deref())
            .unwrap_or(DEFAULT_JSON_FILENAME)
    }

    fn csv_filename(&self) -> &str {
        self.output
            .filenames
            .as_ref()
            .and_then(|f| f.csv.as_deref())
            .unwrap_or(DEFAULT_CSV_FILENAME)
    }

    fn reference_data_file(&self) -> Option<&str> {
        self.reference.as_ref().and_then(|r| r.data_file.as_deref())
    }
}

impl Validate for AcceleratorConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
