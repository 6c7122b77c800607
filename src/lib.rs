//! # combined-memory
//!
//! Conversational memory providers and a [`CombinedMemory`] that presents
//! several of them as one.
//!
//! Each provider claims a set of variable names. Claimed names must be
//! disjoint across the combined providers; this is checked once when the
//! [`CombinedMemory`] is built. On save, every provider sees the variables no
//! provider claims plus its own, and nothing claimed by another provider.

pub mod memory;

pub use memory::{
    BaseMemory, BufferMemoryConfig, CombinedMemory, ConversationBufferMemory, MemoryError,
    ReadOnlySharedMemory, SimpleMemory,
};
