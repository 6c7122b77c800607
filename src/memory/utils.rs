//! Helpers shared by memory implementations.

use std::collections::HashMap;

use serde_json::Value;

use crate::memory::errors::MemoryError;

/// Input key that never names the prompt input.
const STOP_KEY: &str = "stop";

/// Find the prompt input key among the given inputs.
///
/// The prompt input key is the only key that is neither one of the memory's
/// own variables nor `"stop"`.
///
/// # Arguments
/// * `inputs` - The inputs of the conversation turn.
/// * `memory_variables` - The variables claimed by the memory.
///
/// # Returns
/// The prompt input key, or [`MemoryError::InputKey`] when zero or several
/// candidates remain.
pub fn get_prompt_input_key(
    inputs: &HashMap<String, Value>,
    memory_variables: &[String],
) -> Result<String, MemoryError> {
    let candidates: Vec<&String> = inputs
        .keys()
        .filter(|key| key.as_str() != STOP_KEY && !memory_variables.contains(key))
        .collect();

    match candidates.as_slice() {
        [key] => Ok((*key).clone()),
        _ => Err(MemoryError::InputKey {
            count: candidates.len(),
        }),
    }
}

/// Render an input value as prompt text. Strings are used verbatim.
pub fn value_to_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn inputs(pairs: &[(&str, Value)]) -> HashMap<String, Value> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn test_prompt_input_key_skips_memory_and_stop() {
        let inputs = inputs(&[
            ("input", json!("hello")),
            ("history", json!("")),
            ("stop", json!(["\n"])),
        ]);
        let key = get_prompt_input_key(&inputs, &["history".to_string()]).unwrap();
        assert_eq!(key, "input");
    }

    #[test]
    fn test_prompt_input_key_ambiguous() {
        let inputs = inputs(&[("a", json!("1")), ("b", json!("2"))]);
        let err = get_prompt_input_key(&inputs, &[]).unwrap_err();
        assert!(matches!(err, MemoryError::InputKey { count: 2 }));
    }

    #[test]
    fn test_prompt_input_key_missing() {
        let inputs = inputs(&[("stop", json!(null))]);
        let err = get_prompt_input_key(&inputs, &[]).unwrap_err();
        assert!(matches!(err, MemoryError::InputKey { count: 0 }));
    }

    #[test]
    fn test_value_to_text() {
        assert_eq!(value_to_text(&json!("plain")), "plain");
        assert_eq!(value_to_text(&json!(42)), "42");
        assert_eq!(value_to_text(&json!({"a": 1})), r#"{"a":1}"#);
    }
}
