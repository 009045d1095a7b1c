use crate::core::{ConfigProvider, Storage};
use crate::domain::model::RfiResponse;
use crate::utils::error::{RfiError, Result};
use serde_json::Value;
use std::path::Path;

pub const FORMAT_JSON: &str = "json";
pub const FORMAT_CSV: &str = "csv";
pub const SUPPORTED_FORMATS: [&str; 2] = [FORMAT_JSON, FORMAT_CSV];

/// Writes responses through a [`Storage`] backend in the configured formats.
pub struct ResponseExporter<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
}

impl<S: Storage, C: ConfigProvider> ResponseExporter<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        Self { storage, config }
    }

    /// Returns the paths written, in the order of the configured formats.
    pub async fn export(&self, response: &RfiResponse) -> Result<Vec<String>> {
        let mut written = Vec::new();

        for format in self.config.output_formats() {
            let (filename, data) = match format.as_str() {
                FORMAT_JSON => (
                    self.config.json_filename(),
                    serde_json::to_string_pretty(response)?.into_bytes(),
                ),
                FORMAT_CSV => (self.config.csv_filename(), to_csv(response)?.into_bytes()),
                other => {
                    return Err(RfiError::validation(
                        "output.output_formats",
                        other,
                        format!("Unsupported format. Valid formats: {}", SUPPORTED_FORMATS.join(", ")),
                    ))
                }
            };

            tracing::debug!("Writing {} export ({} bytes) to storage", format, data.len());
            self.storage.write_file(filename, &data).await?;

            let full_path = Path::new(self.config.output_path()).join(filename);
            written.push(full_path.to_string_lossy().into_owned());
        }

        Ok(written)
    }

    /// 讀回上一次匯出的 JSON 回應（供 update 使用）
    pub async fn load_current(&self) -> Result<RfiResponse> {
        let data = self.storage.read_file(self.config.json_filename()).await?;
        Ok(serde_json::from_slice(&data)?)
    }
}

pub async fn read_response_file<P: AsRef<Path>>(path: P) -> Result<RfiResponse> {
    let data = tokio::fs::read(path).await?;
    Ok(serde_json::from_slice(&data)?)
}

/// Flattens a response into `section,field,value` rows.
pub fn to_csv(response: &RfiResponse) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(["section", "field", "value"])?;

    if let Value::Object(sections) = serde_json::to_value(response)? {
        for (section, value) in sections {
            if value.is_object() {
                let mut rows = Vec::new();
                flatten("", &value, &mut rows);
                for (field, cell) in rows {
                    writer.write_record([section.as_str(), field.as_str(), cell.as_str()])?;
                }
            } else {
                writer.write_record([section.as_str(), "", cell_text(&value).as_str()])?;
            }
        }
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| RfiError::IoError(e.into_error()))?;
    String::from_utf8(bytes).map_err(|e| RfiError::config(format!("CSV output is not UTF-8: {}", e)))
}

fn flatten(prefix: &str, value: &Value, rows: &mut Vec<(String, String)>) {
    match value {
        Value::Object(map) => {
            for (key, child) in map {
                let path = if prefix.is_empty() {
                    key.clone()
                } else {
                    format!("{}.{}", prefix, key)
                };
                flatten(&path, child, rows);
            }
        }
        other => rows.push((prefix.to_string(), cell_text(other))),
    }
}

fn cell_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Array(items) => items.iter().map(cell_text).collect::<Vec<_>>().join("; "),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::accelerator::RfiAccelerator;
    use crate::domain::model::RequestOverrides;

    #[test]
    fn test_csv_flattens_sections() {
        let accelerator = RfiAccelerator::with_builtin_data().unwrap();
        let response = accelerator
            .process("200-employee automotive supplier in El Paso", &RequestOverrides::default())
            .unwrap();

        let csv = to_csv(&response).unwrap();
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(lines[0], "section,field,value");
        assert!(lines.contains(&"economic_impact,indirect_jobs,560"));
        assert!(lines.contains(&"project_summary,industry,Automotive"));
        assert!(lines.contains(&"cross_border_advantages,trade_data.duty_free_programs,USMCA; IMMEX"));
        assert!(lines.contains(&"incentives,foreign_trade_zone,true"));
        assert!(lines.iter().any(|l| l.starts_with("generation_date,,")));
    }
}
