//! Buffer memory that keeps the raw conversation transcript.

use std::collections::HashMap;

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::memory::base_memory::BaseMemory;
use crate::memory::errors::MemoryError;
use crate::memory::utils::{get_prompt_input_key, value_to_text};

/// Configuration for [`ConversationBufferMemory`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BufferMemoryConfig {
    /// Variable name the transcript is exposed under.
    pub memory_key: String,
    /// Prefix for human turns.
    pub human_prefix: String,
    /// Prefix for AI turns.
    pub ai_prefix: String,
    /// Input key holding the human message. Resolved per turn when unset.
    pub input_key: Option<String>,
    /// Output key holding the AI message. Must be the only output when unset.
    pub output_key: Option<String>,
    /// Keep only the last `window` exchanges visible on load.
    pub window: Option<usize>,
}

impl Default for BufferMemoryConfig {
    fn default() -> Self {
        Self {
            memory_key: "history".to_string(),
            human_prefix: "Human".to_string(),
            ai_prefix: "AI".to_string(),
            input_key: None,
            output_key: None,
            window: None,
        }
    }
}

impl BufferMemoryConfig {
    /// Build a config from a JSON value, filling defaults for missing fields.
    pub fn from_value(value: Value) -> Result<Self, MemoryError> {
        Ok(serde_json::from_value(value)?)
    }

    /// Build a config from a JSON string.
    pub fn from_json_str(json: &str) -> Result<Self, MemoryError> {
        Ok(serde_json::from_str(json)?)
    }
}

/// One human/AI exchange.
#[derive(Debug, Clone)]
struct Exchange {
    human: String,
    ai: String,
}

/// Memory that stores the conversation and exposes it as a single
/// newline-joined transcript.
#[derive(Debug, Default)]
pub struct ConversationBufferMemory {
    config: BufferMemoryConfig,
    buffer: RwLock<Vec<Exchange>>,
}

impl ConversationBufferMemory {
    /// Create a new buffer memory with the given configuration.
    pub fn new(config: BufferMemoryConfig) -> Self {
        Self {
            config,
            buffer: RwLock::new(Vec::new()),
        }
    }

    /// Create a buffer memory that only shows the last `k` exchanges.
    pub fn with_window(k: usize) -> Self {
        Self::new(BufferMemoryConfig {
            window: Some(k),
            ..BufferMemoryConfig::default()
        })
    }

    pub fn config(&self) -> &BufferMemoryConfig {
        &self.config
    }

    /// Number of exchanges stored, including those outside the window.
    pub fn len(&self) -> usize {
        self.buffer.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The visible transcript.
    pub fn buffer_as_str(&self) -> String {
        let buffer = self.buffer.read();
        let start = match self.config.window {
            Some(k) => buffer.len().saturating_sub(k),
            None => 0,
        };

        let mut lines = Vec::with_capacity((buffer.len() - start) * 2);
        for exchange in &buffer[start..] {
            lines.push(format!("{}: {}", self.config.human_prefix, exchange.human));
            lines.push(format!("{}: {}", self.config.ai_prefix, exchange.ai));
        }
        lines.join("\n")
    }

    fn resolve_input(&self, inputs: &HashMap<String, Value>) -> Result<String, MemoryError> {
        let key = match &self.config.input_key {
            Some(key) => key.clone(),
            None => get_prompt_input_key(inputs, &self.memory_variables())?,
        };
        inputs
            .get(&key)
            .map(value_to_text)
            .ok_or(MemoryError::MissingKey { key })
    }

    fn resolve_output(&self, outputs: &HashMap<String, String>) -> Result<String, MemoryError> {
        match &self.config.output_key {
            Some(key) => outputs
                .get(key)
                .cloned()
                .ok_or_else(|| MemoryError::MissingKey { key: key.clone() }),
            None => {
                if outputs.len() != 1 {
                    return Err(MemoryError::OutputKey {
                        count: outputs.len(),
                    });
                }
                Ok(outputs.values().next().cloned().unwrap_or_default())
            }
        }
    }
}

impl BaseMemory for ConversationBufferMemory {
    fn memory_variables(&self) -> Vec<String> {
        vec![self.config.memory_key.clone()]
    }

    fn load_memory_variables(
        &self,
        _inputs: &HashMap<String, Value>,
    ) -> Result<HashMap<String, String>, anyhow::Error> {
        Ok(HashMap::from([(
            self.config.memory_key.clone(),
            self.buffer_as_str(),
        )]))
    }

    fn save_context(
        &self,
        inputs: &HashMap<String, Value>,
        outputs: &HashMap<String, String>,
    ) -> Result<(), anyhow::Error> {
        let human = self.resolve_input(inputs)?;
        let ai = self.resolve_output(outputs)?;
        self.buffer.write().push(Exchange { human, ai });
        Ok(())
    }

    fn clear(&self) -> Result<(), anyhow::Error> {
        self.buffer.write().clear();
        Ok(())
    }
}
