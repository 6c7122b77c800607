//! Memory system for conversational agents.
//!
//! This module provides the memory provider interface, the combined memory
//! that routes variables across several providers, and a few simple
//! in-process providers.

pub mod base_memory;
pub mod buffer;
pub mod combined;
pub mod errors;
pub mod readonly;
pub mod simple;
pub mod utils;

pub use base_memory::BaseMemory;
pub use buffer::{BufferMemoryConfig, ConversationBufferMemory};
pub use combined::CombinedMemory;
pub use errors::MemoryError;
pub use readonly::ReadOnlySharedMemory;
pub use simple::SimpleMemory;
pub use utils::get_prompt_input_key;

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Arc;

    use serde_json::json;

    use super::*;

    #[test]
    fn test_buffers_share_inputs_but_keep_their_own_outputs() {
        let chat = Arc::new(ConversationBufferMemory::new(BufferMemoryConfig {
            memory_key: "chat_history".to_string(),
            output_key: Some("output".to_string()),
            ..BufferMemoryConfig::default()
        }));
        let recent = Arc::new(ConversationBufferMemory::new(BufferMemoryConfig {
            memory_key: "recent".to_string(),
            output_key: Some("output".to_string()),
            window: Some(1),
            ..BufferMemoryConfig::default()
        }));
        let facts = Arc::new(SimpleMemory::new(HashMap::from([(
            "facts".to_string(),
            "The user is called Alice".to_string(),
        )])));

        let combined =
            CombinedMemory::new(vec![chat.clone(), recent.clone(), facts]).unwrap();
        assert_eq!(
            combined.memory_variables(),
            vec!["chat_history", "recent", "facts"]
        );

        for (question, answer) in [("Hi", "Hello"), ("Who am I?", "Alice")] {
            // Each buffer resolves "input" as its prompt key: the other
            // buffers' variables are filtered out before it sees them.
            let inputs = HashMap::from([
                ("input".to_string(), json!(question)),
                ("recent".to_string(), json!("stale")),
            ]);
            let outputs = HashMap::from([("output".to_string(), answer.to_string())]);
            combined.save_context(&inputs, &outputs).unwrap();
        }

        let loaded = combined.load_memory_variables(&HashMap::new()).unwrap();
        assert_eq!(
            loaded["chat_history"],
            "Human: Hi\nAI: Hello\nHuman: Who am I?\nAI: Alice"
        );
        assert_eq!(loaded["recent"], "Human: Who am I?\nAI: Alice");
        assert_eq!(loaded["facts"], "The user is called Alice");

        combined.clear().unwrap();
        assert!(chat.is_empty());
        assert!(recent.is_empty());
    }

    #[test]
    fn test_overlapping_buffers_rejected() {
        let a = Arc::new(ConversationBufferMemory::default());
        let b = Arc::new(ConversationBufferMemory::with_window(2));
        let err = CombinedMemory::new(vec![a, b]).err().unwrap();
        assert!(err.to_string().contains(r#"{"history"}"#));
    }
}
