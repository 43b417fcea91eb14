//! Environment variable expansion for configuration strings.
//!
//! Supports:
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default

use crate::ConfigError;

/// Expand environment variable references in a string.
///
/// Returns the original string unchanged if no `${` is present, so bare
/// `$VAR` in an otherwise plain value is left alone.
pub(crate) fn expand_env(value: &str, field: &str) -> Result<String, ConfigError> {
    if !value.contains("${") {
        return Ok(value.to_owned());
    }

    shellexpand::env_with_context(value, |var| -> Result<Option<String>, LookupError> {
        match std::env::var(var) {
            Ok(val) => Ok(Some(val)),
            Err(_) => Err(LookupError {
                var_name: var.to_owned(),
            }),
        }
    })
    .map(std::borrow::Cow::into_owned)
    .map_err(|e| ConfigError::EnvVar {
        field: field.to_owned(),
        message: format!("${{{0}}} not set", e.cause.var_name),
    })
}

/// Error returned when environment variable lookup fails.
struct LookupError {
    var_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_simple_var() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::set_var("BT_TEST_DATA_SIMPLE", "users.json");
        }
        let result = expand_env("${BT_TEST_DATA_SIMPLE}", "data.path").unwrap();
        assert_eq!(result, "users.json");
        unsafe {
            std::env::remove_var("BT_TEST_DATA_SIMPLE");
        }
    }

    #[test]
    fn test_expand_with_default_uses_default() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("BT_TEST_UNSET");
        }
        let result = expand_env("${BT_TEST_UNSET:-data.json}", "data.path").unwrap();
        assert_eq!(result, "data.json");
    }

    #[test]
    fn test_expand_missing_var_error() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("BT_TEST_MISSING");
        }
        let err = expand_env("${BT_TEST_MISSING}", "data.path").unwrap_err();
        assert!(matches!(err, ConfigError::EnvVar { .. }));
        assert!(err.to_string().contains("BT_TEST_MISSING"));
        assert!(err.to_string().contains("data.path"));
    }

    #[test]
    fn test_expand_embedded_var() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::set_var("BT_TEST_DIR", "/srv/fixtures");
        }
        let result = expand_env("${BT_TEST_DIR}/users.json", "data.path").unwrap();
        assert_eq!(result, "/srv/fixtures/users.json");
        unsafe {
            std::env::remove_var("BT_TEST_DIR");
        }
    }

    #[test]
    fn test_expand_literal_unchanged() {
        assert_eq!(expand_env("data.json", "data.path").unwrap(), "data.json");
        assert_eq!(expand_env("$VAR.json", "data.path").unwrap(), "$VAR.json");
    }
}
