use crate::error::{Error, Result};

const MIN_LEN: usize = 3;
const MAX_LEN: usize = 255;

/// Checks a table name: 3 to 255 characters out of `[A-Za-z0-9_.-]`.
pub fn validate(table_name: &str) -> Result<()> {
    if table_name.is_empty() {
        return Err(Error::Validation("table name is missing".to_string()));
    }
    let len = table_name.len();
    if len < MIN_LEN {
        return Err(Error::Validation(format!(
            "table name {table_name:?} is shorter than {MIN_LEN} characters"
        )));
    }
    if len > MAX_LEN {
        return Err(Error::Validation(format!(
            "table name is longer than {MAX_LEN} characters"
        )));
    }
    if let Some(c) = table_name
        .chars()
        .find(|c| !(c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.')))
    {
        return Err(Error::Validation(format!(
            "table name {table_name:?} contains invalid character {c:?}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use rstest::rstest;

    #[rstest]
    #[case::simple("users")]
    #[case::punctuation("my-table_v1.0")]
    #[case::shortest("abc")]
    fn test_accepts(#[case] name: &str) {
        assert!(validate(name).is_ok());
    }

    #[rstest]
    #[case::empty(String::new())]
    #[case::too_short("ab".to_string())]
    #[case::too_long("a".repeat(256))]
    #[case::space("my table".to_string())]
    #[case::unicode("tablé".to_string())]
    fn test_rejects(#[case] name: String) {
        assert!(validate(&name).unwrap_err().is_validation());
    }
}
