//! The memory provider interface.

use std::collections::HashMap;

use async_trait::async_trait;
use serde_json::Value;

/// Abstract base trait for memory providers.
///
/// A memory provider tracks one slice of conversational state and exposes it
/// to prompts through the variable names it claims. Implementations are
/// shared behind `Arc`, so any state they mutate in `save_context` or `clear`
/// must live behind interior mutability.
#[async_trait]
pub trait BaseMemory: Send + Sync {
    /// The variable names this memory populates on load, in order.
    fn memory_variables(&self) -> Vec<String>;

    /// Return the current values of this memory's variables.
    ///
    /// # Arguments
    /// * `inputs` - The inputs of the current conversation turn.
    fn load_memory_variables(
        &self,
        inputs: &HashMap<String, Value>,
    ) -> Result<HashMap<String, String>, anyhow::Error>;

    /// Save the context of a conversation turn to memory.
    ///
    /// # Arguments
    /// * `inputs` - The inputs of the turn.
    /// * `outputs` - The outputs of the turn.
    fn save_context(
        &self,
        inputs: &HashMap<String, Value>,
        outputs: &HashMap<String, String>,
    ) -> Result<(), anyhow::Error>;

    /// Clear memory contents.
    fn clear(&self) -> Result<(), anyhow::Error>;

    /// Return the current values of this memory's variables asynchronously.
    async fn aload_memory_variables(
        &self,
        inputs: &HashMap<String, Value>,
    ) -> Result<HashMap<String, String>, anyhow::Error> {
        self.load_memory_variables(inputs)
    }

    /// Save the context of a conversation turn asynchronously.
    async fn asave_context(
        &self,
        inputs: &HashMap<String, Value>,
        outputs: &HashMap<String, String>,
    ) -> Result<(), anyhow::Error> {
        self.save_context(inputs, outputs)
    }

    /// Clear memory contents asynchronously.
    async fn aclear(&self) -> Result<(), anyhow::Error> {
        self.clear()
    }
}
