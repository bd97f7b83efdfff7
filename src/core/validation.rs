use crate::errors::{Error, Result};

/// Rejects values that are empty once trimmed, naming the offending field.
pub fn is_not_empty(value: &str, field_name: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(Error::validation(format!(
            "Please enter the {field_name} field."
        )));
    }
    Ok(())
}
