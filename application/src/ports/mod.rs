//! Port definitions (interfaces for external adapters)
//!
//! Ports define the contracts that infrastructure and presentation
//! adapters implement.

pub mod conversation_logger;
pub mod observer;
pub mod text_generator;
