//! Error types for the memory subsystem.

use thiserror::Error;

/// Errors raised by memory assembly and the bundled memory providers.
///
/// Failures coming out of a provider's own `load_memory_variables`,
/// `save_context` or `clear` are plain [`anyhow::Error`]s and are never
/// wrapped in this type.
#[derive(Debug, Error)]
pub enum MemoryError {
    /// Two or more memories claim the same variable names.
    #[error(
        "The same variables {} are found in multiple memory objects, which is not allowed by CombinedMemory.",
        format_variables(.variables)
    )]
    RepeatedMemoryVariables { variables: Vec<String> },

    /// The prompt input key could not be resolved to exactly one key.
    #[error("One input key expected, got {count}")]
    InputKey { count: usize },

    /// The output key could not be resolved to exactly one key.
    #[error("One output key expected, got {count}")]
    OutputKey { count: usize },

    /// A required key was absent from inputs or outputs.
    #[error("Missing key: {key}")]
    MissingKey { key: String },

    /// Memory configuration could not be parsed.
    #[error("Invalid memory configuration: {0}")]
    Config(#[from] serde_json::Error),
}

fn format_variables(variables: &[String]) -> String {
    let quoted: Vec<String> = variables.iter().map(|v| format!("{:?}", v)).collect();
    format!("{{{}}}", quoted.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repeated_variables_message() {
        let err = MemoryError::RepeatedMemoryVariables {
            variables: vec!["foo".to_string(), "history".to_string()],
        };
        let message = err.to_string();
        assert!(message.contains(r#"{"foo", "history"}"#));
        assert!(message.contains("CombinedMemory"));
    }

    #[test]
    fn test_key_errors_display() {
        assert_eq!(
            MemoryError::InputKey { count: 2 }.to_string(),
            "One input key expected, got 2"
        );
        assert_eq!(
            MemoryError::MissingKey { key: "output".into() }.to_string(),
            "Missing key: output"
        );
    }
}
