//! Application layer for colloquy
//!
//! This crate contains the dialog use case and its port definitions.
//! It depends only on the domain layer.

pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use ports::{
    conversation_logger::{ConversationLogger, DialogEvent, NoConversationLogger},
    observer::{DialogObserver, NoObserver},
    text_generator::{
        DEFAULT_TEMPERATURE, GenerationError, GenerationParams, TextGenerator,
    },
};
pub use use_cases::run_dialog::{
    DEFAULT_MAX_ROUNDS, RunDialogError, RunDialogInput, RunDialogUseCase,
};
