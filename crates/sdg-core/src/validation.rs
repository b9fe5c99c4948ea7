//! Shared validation rules for string identifiers such as tool names and
//! memory keys.

/// Validation rules for string identifiers
#[derive(Debug, Clone, Copy)]
pub struct IdentifierRules {
    /// Maximum allowed length in characters
    pub max_length: usize,
    /// Whether to allow dots (.) in the identifier
    pub allow_dots: bool,
    /// Whether to allow colons (:) in the identifier
    pub allow_colons: bool,
    /// Whether to trim whitespace before validation
    pub trim_whitespace: bool,
}

impl IdentifierRules {
    /// Rules for tool names
    ///
    /// - Max length: 64 characters
    /// - Allows: alphanumeric, `_`, `-`
    pub const TOOL_NAME: Self = Self {
        max_length: 64,
        allow_dots: false,
        allow_colons: false,
        trim_whitespace: true,
    };

    /// Rules for memory keys
    ///
    /// - Max length: 128 characters
    /// - Allows: alphanumeric, `_`, `-`, `.`, `:`
    ///
    /// The colon enables namespaced keys like `step:plan-1:step-3`.
    pub const MEMORY_KEY: Self = Self {
        max_length: 128,
        allow_dots: true,
        allow_colons: true,
        trim_whitespace: true,
    };

    /// Validate a string against these rules, returning the (possibly
    /// trimmed) identifier.
    pub fn validate(&self, input: &str) -> Result<String, ValidationError> {
        let processed = if self.trim_whitespace {
            input.trim()
        } else {
            input
        };

        if processed.is_empty() {
            return Err(ValidationError::Empty);
        }

        let length = processed.chars().count();
        if length > self.max_length {
            return Err(ValidationError::TooLong {
                length,
                max: self.max_length,
            });
        }

        if processed.contains("../") || processed.contains("./") {
            return Err(ValidationError::PathTraversal);
        }

        for ch in processed.chars() {
            let is_valid = ch.is_alphanumeric()
                || ch == '_'
                || ch == '-'
                || (ch == '.' && self.allow_dots)
                || (ch == ':' && self.allow_colons);

            if !is_valid {
                return Err(ValidationError::InvalidChar {
                    char: ch,
                    input: processed.to_string(),
                });
            }
        }

        Ok(processed.to_string())
    }
}

/// Errors that can occur during identifier validation
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("identifier cannot be empty")]
    Empty,
    #[error("identifier too long: {length} characters (max {max})")]
    TooLong { length: usize, max: usize },
    #[error("identifier contains path traversal sequence")]
    PathTraversal,
    #[error("identifier '{input}' contains invalid character '{char}'")]
    InvalidChar { char: char, input: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tool_names_follow_snake_case_rules() {
        assert!(IdentifierRules::TOOL_NAME.validate("analyze_sdg_alignment").is_ok());
        assert!(IdentifierRules::TOOL_NAME.validate("tool-1").is_ok());
        assert_eq!(
            IdentifierRules::TOOL_NAME.validate("  "),
            Err(ValidationError::Empty)
        );
        assert!(matches!(
            IdentifierRules::TOOL_NAME.validate("tool name"),
            Err(ValidationError::InvalidChar { char: ' ', .. })
        ));
        assert!(IdentifierRules::TOOL_NAME.validate("step:1").is_err());
    }

    #[test]
    fn memory_keys_allow_namespacing() {
        assert_eq!(
            IdentifierRules::MEMORY_KEY.validate(" step:plan-1:step.2 "),
            Ok("step:plan-1:step.2".to_string())
        );
        assert_eq!(
            IdentifierRules::MEMORY_KEY.validate("../etc"),
            Err(ValidationError::PathTraversal)
        );
        let long = "k".repeat(129);
        assert!(matches!(
            IdentifierRules::MEMORY_KEY.validate(&long),
            Err(ValidationError::TooLong { length: 129, max: 128 })
        ));
    }

    #[test]
    fn length_limit_counts_characters() {
        let at_limit = "é".repeat(64);
        assert_eq!(
            IdentifierRules::TOOL_NAME.validate(&at_limit),
            Ok(at_limit.clone())
        );
        assert_eq!(
            IdentifierRules::TOOL_NAME.validate(&"é".repeat(65)),
            Err(ValidationError::TooLong { length: 65, max: 64 })
        );
    }
}
