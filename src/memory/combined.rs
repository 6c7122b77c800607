//! Combined memory that routes reads and writes across several memories.
//!
//! Every memory owns the variables it claims. On save, each memory receives
//! the shared variables (claimed by nobody) plus its own claimed variables,
//! and never a variable claimed by another memory.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crate::memory::base_memory::BaseMemory;
use crate::memory::errors::MemoryError;

/// Combines the data of multiple memories into a single memory.
///
/// The memory list is fixed at construction. Load, save and clear always
/// visit the memories in list order.
pub struct CombinedMemory {
    /// The memories being combined, in routing order.
    memories: Vec<Arc<dyn BaseMemory>>,
}

/// Inputs and outputs routed to a single memory on save.
struct RoutedContext {
    inputs: HashMap<String, Value>,
    outputs: HashMap<String, String>,
}

impl CombinedMemory {
    /// Create a new CombinedMemory.
    ///
    /// # Arguments
    /// * `memories` - The memories to combine, in routing order.
    ///
    /// # Returns
    /// [`MemoryError::RepeatedMemoryVariables`] if two memories claim a
    /// common variable name.
    pub fn new(memories: Vec<Arc<dyn BaseMemory>>) -> Result<Self, MemoryError> {
        check_repeated_memory_variables(&memories)?;
        let combined = Self { memories };
        log::debug!(
            "CombinedMemory created with {} memories providing {:?}",
            combined.memories.len(),
            combined.memory_variables()
        );
        Ok(combined)
    }

    /// The combined memories, in routing order.
    pub fn memories(&self) -> &[Arc<dyn BaseMemory>] {
        &self.memories
    }

    /// Compute the inputs and outputs each memory receives on save.
    fn route_context(
        &self,
        inputs: &HashMap<String, Value>,
        outputs: &HashMap<String, String>,
    ) -> Vec<RoutedContext> {
        let all_claimed: HashSet<String> = self.memory_variables().into_iter().collect();
        let input_keys = key_set(inputs);
        let output_keys = key_set(outputs);

        let shared_inputs: HashSet<&str> = input_keys
            .iter()
            .copied()
            .filter(|key| !all_claimed.contains(*key))
            .collect();
        let shared_outputs: HashSet<&str> = output_keys
            .iter()
            .copied()
            .filter(|key| !all_claimed.contains(*key))
            .collect();

        self.memories
            .iter()
            .map(|memory| {
                let own: HashSet<String> = memory.memory_variables().into_iter().collect();

                let own_inputs: HashSet<&str> = input_keys
                    .iter()
                    .copied()
                    .filter(|key| own.contains(*key))
                    .collect();
                let own_outputs: HashSet<&str> = output_keys
                    .iter()
                    .copied()
                    .filter(|key| own.contains(*key))
                    .collect();

                let input_slice: HashSet<&str> =
                    shared_inputs.union(&own_inputs).copied().collect();
                let output_slice: HashSet<&str> =
                    shared_outputs.union(&own_outputs).copied().collect();

                RoutedContext {
                    inputs: select(inputs, &input_slice),
                    outputs: select(outputs, &output_slice),
                }
            })
            .collect()
    }
}

/// Reject memory lists in which two memories claim the same variable.
fn check_repeated_memory_variables(memories: &[Arc<dyn BaseMemory>]) -> Result<(), MemoryError> {
    let mut all_variables: HashSet<String> = HashSet::new();

    for memory in memories {
        let variables: HashSet<String> = memory.memory_variables().into_iter().collect();
        let mut overlap: Vec<String> = variables.intersection(&all_variables).cloned().collect();
        if !overlap.is_empty() {
            overlap.sort();
            log::warn!("Rejecting CombinedMemory: variables {:?} are claimed twice", overlap);
            return Err(MemoryError::RepeatedMemoryVariables { variables: overlap });
        }
        all_variables.extend(variables);
    }

    Ok(())
}

fn key_set<V>(map: &HashMap<String, V>) -> HashSet<&str> {
    map.keys().map(String::as_str).collect()
}

/// Restrict `source` to the given keys.
fn select<V: Clone>(source: &HashMap<String, V>, keys: &HashSet<&str>) -> HashMap<String, V> {
    source
        .iter()
        .filter(|(key, _)| keys.contains(key.as_str()))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect()
}

/// Merge one memory's loaded variables into the accumulated result.
/// Later memories overwrite earlier ones on key collisions.
fn merge_loaded(memory_data: &mut HashMap<String, String>, data: HashMap<String, String>) {
    for (key, value) in data {
        if memory_data.insert(key.clone(), value).is_some() {
            log::debug!("Memory variable {:?} overwritten by a later memory", key);
        }
    }
}

#[async_trait]
impl BaseMemory for CombinedMemory {
    /// All the memory variables of the linked memories, concatenated in order.
    fn memory_variables(&self) -> Vec<String> {
        self.memories
            .iter()
            .flat_map(|memory| memory.memory_variables())
            .collect()
    }

    fn load_memory_variables(
        &self,
        inputs: &HashMap<String, Value>,
    ) -> Result<HashMap<String, String>, anyhow::Error> {
        let mut memory_data = HashMap::new();
        for memory in &self.memories {
            let data = memory.load_memory_variables(inputs)?;
            merge_loaded(&mut memory_data, data);
        }
        Ok(memory_data)
    }

    fn save_context(
        &self,
        inputs: &HashMap<String, Value>,
        outputs: &HashMap<String, String>,
    ) -> Result<(), anyhow::Error> {
        let routed = self.route_context(inputs, outputs);
        for (index, (memory, context)) in self.memories.iter().zip(routed).enumerate() {
            log::debug!(
                "Saving context to memory {} ({} inputs, {} outputs)",
                index,
                context.inputs.len(),
                context.outputs.len()
            );
            memory.save_context(&context.inputs, &context.outputs)?;
        }
        Ok(())
    }

    fn clear(&self) -> Result<(), anyhow::Error> {
        for (index, memory) in self.memories.iter().enumerate() {
            log::debug!("Clearing memory {}", index);
            memory.clear()?;
        }
        Ok(())
    }

    async fn aload_memory_variables(
        &self,
        inputs: &HashMap<String, Value>,
    ) -> Result<HashMap<String, String>, anyhow::Error> {
        let mut memory_data = HashMap::new();
        for memory in &self.memories {
            let data = memory.aload_memory_variables(inputs).await?;
            merge_loaded(&mut memory_data, data);
        }
        Ok(memory_data)
    }

    async fn asave_context(
        &self,
        inputs: &HashMap<String, Value>,
        outputs: &HashMap<String, String>,
    ) -> Result<(), anyhow::Error> {
        let routed = self.route_context(inputs, outputs);
        for (index, (memory, context)) in self.memories.iter().zip(routed).enumerate() {
            log::debug!(
                "Saving context to memory {} ({} inputs, {} outputs)",
                index,
                context.inputs.len(),
                context.outputs.len()
            );
            memory
                .asave_context(&context.inputs, &context.outputs)
                .await?;
        }
        Ok(())
    }

    async fn aclear(&self) -> Result<(), anyhow::Error> {
        for (index, memory) in self.memories.iter().enumerate() {
            log::debug!("Clearing memory {}", index);
            memory.aclear().await?;
        }
        Ok(())
    }
}
