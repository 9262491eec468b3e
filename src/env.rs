//! Environment variable abstraction for testability.
//!
//! Production code uses [`Env::real()`] which delegates to [`std::env::var`].
//! Tests use [`Env::mock()`] backed by a `HashMap`, so configuration can be
//! exercised without touching the process environment.

use std::collections::HashMap;

use crate::constants::PLACEHOLDER_API_KEY;

/// Environment variable reader.
#[derive(Clone, Debug, Default)]
pub struct Env {
    overrides: Option<HashMap<String, String>>,
}

impl Env {
    /// Create an `Env` that reads from the real process environment.
    pub fn real() -> Self {
        Self { overrides: None }
    }

    /// Create an `Env` backed by explicit key-value pairs.
    #[cfg(test)]
    pub fn mock(vars: impl IntoIterator<Item = (impl Into<String>, impl Into<String>)>) -> Self {
        Self {
            overrides: Some(
                vars.into_iter()
                    .map(|(k, v)| (k.into(), v.into()))
                    .collect(),
            ),
        }
    }

    /// Look up an environment variable by name.
    pub fn var(&self, name: &str) -> Result<String, std::env::VarError> {
        match &self.overrides {
            Some(map) => map.get(name).cloned().ok_or(std::env::VarError::NotPresent),
            None => std::env::var(name),
        }
    }

    /// Look up a variable, treating blank values and the sample-file
    /// placeholder as unset.
    pub fn non_empty(&self, name: &str) -> Option<String> {
        let value = self.var(name).ok()?;
        let trimmed = value.trim();
        if trimmed.is_empty() || trimmed == PLACEHOLDER_API_KEY {
            return None;
        }
        Some(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mock_env_returns_set_values() {
        let env = Env::mock([("FOO", "bar"), ("BAZ", "qux")]);
        assert_eq!(env.var("FOO").unwrap(), "bar");
        assert_eq!(env.non_empty("BAZ").as_deref(), Some("qux"));
    }

    #[test]
    fn missing_variable_is_unset() {
        let env = Env::mock(Vec::<(&str, &str)>::new());
        assert!(env.var("NONEXISTENT").is_err());
        assert_eq!(env.non_empty("NONEXISTENT"), None);
    }

    #[test]
    fn blank_and_placeholder_values_are_unset() {
        let env = Env::mock([("BLANK", "   "), ("KEY", "your_key_here")]);
        assert_eq!(env.non_empty("BLANK"), None);
        assert_eq!(env.non_empty("KEY"), None);
        assert!(env.var("KEY").is_ok());
    }

    #[test]
    fn non_empty_trims_whitespace() {
        let env = Env::mock([("KEY", "  sk-123\n")]);
        assert_eq!(env.non_empty("KEY").as_deref(), Some("sk-123"));
    }
}
