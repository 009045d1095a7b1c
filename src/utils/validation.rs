use crate::utils::error::{RfiError, Result};
use std::collections::HashSet;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(RfiError::validation(field_name, path, "Path cannot be empty"));
    }

    if path.contains('\0') {
        return Err(RfiError::validation(
            field_name,
            path.escape_debug(),
            "Path contains null bytes",
        ));
    }

    Ok(())
}

pub fn validate_at_least(field_name: &str, value: i64, min_value: i64) -> Result<()> {
    if value < min_value {
        return Err(RfiError::validation(
            field_name,
            value,
            format!("Value must be at least {}", min_value),
        ));
    }
    Ok(())
}

pub fn validate_file_extension(field_name: &str, file: &str, allowed_extensions: &[&str]) -> Result<()> {
    let allowed_set: HashSet<&str> = allowed_extensions.iter().copied().collect();

    match std::path::Path::new(file)
        .extension()
        .and_then(|ext| ext.to_str())
    {
        Some(extension) if allowed_set.contains(extension) => Ok(()),
        Some(extension) => Err(RfiError::validation(
            field_name,
            file,
            format!(
                "Unsupported file extension: {}. Allowed extensions: {}",
                extension,
                allowed_extensions.join(", ")
            ),
        )),
        None => Err(RfiError::validation(
            field_name,
            file,
            "File has no extension or invalid filename",
        )),
    }
}

pub fn validate_one_of(field_name: &str, value: &str, allowed: &[&str]) -> Result<()> {
    if !allowed.contains(&value) {
        return Err(RfiError::validation(
            field_name,
            value,
            format!("Unsupported value. Valid values: {}", allowed.join(", ")),
        ));
    }
    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(RfiError::validation(
            field_name,
            value,
            "Value cannot be empty or whitespace-only",
        ));
    }
    Ok(())
}

pub fn validate_greater_than(field_name: &str, value: f64, bound: f64) -> Result<()> {
    if !value.is_finite() || value <= bound {
        return Err(RfiError::validation(
            field_name,
            value,
            format!("Value must be a finite number greater than {}", bound),
        ));
    }
    Ok(())
}
