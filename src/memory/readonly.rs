//! Read-only view over a shared memory.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crate::memory::base_memory::BaseMemory;

/// A memory wrapper that is read-only and cannot be changed.
///
/// Useful when the same memory is combined in several places but only one of
/// them should write to it.
pub struct ReadOnlySharedMemory {
    memory: Arc<dyn BaseMemory>,
}

impl ReadOnlySharedMemory {
    /// Wrap `memory` in a read-only view.
    pub fn new(memory: Arc<dyn BaseMemory>) -> Self {
        Self { memory }
    }

    /// The wrapped memory.
    pub fn inner(&self) -> &Arc<dyn BaseMemory> {
        &self.memory
    }
}

#[async_trait]
impl BaseMemory for ReadOnlySharedMemory {
    fn memory_variables(&self) -> Vec<String> {
        self.memory.memory_variables()
    }

    fn load_memory_variables(
        &self,
        inputs: &HashMap<String, Value>,
    ) -> Result<HashMap<String, String>, anyhow::Error> {
        self.memory.load_memory_variables(inputs)
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

    async fn aload_memory_variables(
        &self,
        inputs: &HashMap<String, Value>,
    ) -> Result<HashMap<String, String>, anyhow::Error> {
        self.memory.aload_memory_variables(inputs).await
    }
}
