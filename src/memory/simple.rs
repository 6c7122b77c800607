//! Simple memory for storing context or other information that shouldn't
//! ever change between prompts.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::memory::base_memory::BaseMemory;

/// Memory holding a fixed set of values.
///
/// Its memory variables are the keys of `memories`, in sorted order. Saving
/// and clearing leave the values untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SimpleMemory {
    /// The fixed values returned on every load.
    pub memories: HashMap<String, String>,
}

impl SimpleMemory {
    /// Create a new SimpleMemory from the given values.
    pub fn new(memories: HashMap<String, String>) -> Self {
        Self { memories }
    }
}

impl BaseMemory for SimpleMemory {
    fn memory_variables(&self) -> Vec<String> {
        let mut variables: Vec<String> = self.memories.keys().cloned().collect();
        variables.sort();
        variables
    }

    fn load_memory_variables(
        &self,
        _inputs: &HashMap<String, Value>,
    ) -> Result<HashMap<String, String>, anyhow::Error> {
        Ok(self.memories.clone())
    }

    fn save_context(
        &self,
        _inputs: &HashMap<String, Value>,
        _outputs: &HashMap<String, String>,
    ) -> Result<(), anyhow::Error> {
        Ok(())
    }

    fn clear(&self) -> Result<(), anyhow::Error> {
        Ok(())
    }
}
