pub mod crypto;
pub mod engine;
pub mod error;
pub mod strength;
pub mod ui;

// Re-export the main entry points for convenience
pub use engine::SecureEraseEngine;
pub use strength::suggest::suggested_passes;
pub use strength::{StrengthEvaluator, StrengthLabel, StrengthReport};

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use thiserror::Error;

/// One overwrite pattern kind. A plan is an ordered sequence of these,
/// applied to the target file front to back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PassType {
    /// Every byte 0x00
    Zeros,
    /// Every byte 0xFF
    Ones,
    /// Cryptographically secure random bytes, fresh per block
    Random,
}

impl PassType {
    pub fn name(&self) -> &'static str {
        match self {
            PassType::Zeros => "Zeros",
            PassType::Ones => "Ones",
            PassType::Random => "Random",
        }
    }
}

impl std::fmt::Display for PassType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PassType {
    type Err = ();

    // Exact variant-name match, case-insensitive. Tolerant prefix matching
    // lives in the plan parser; this is the strict fallback rule.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "zeros" => Ok(PassType::Zeros),
            "ones" => Ok(PassType::Ones),
            "random" => Ok(PassType::Random),
            _ => Err(()),
        }
    }
}

/// Cooperative cancellation handle, polled by the erase engine before each
/// block write. Cloning yields another handle to the same flag.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation (called from a signal handler or another thread)
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    /// Check whether cancellation has been requested
    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }
}

/// Failure taxonomy for the erase engine. Every error escaping `erase` is one
/// of these kinds; raw I/O errors that fit no more specific kind stay in `Io`
/// with their message preserved for diagnostics.
#[derive(Error, Debug)]
pub enum EraseError {
    #[error("file not found: {0}")]
    FileNotFound(String),

    #[error("access denied: {0}")]
    AccessDenied(String),

    #[error("file is in use by another process: {0}")]
    SharingViolation(String),

    #[error("erase cancelled before completion")]
    Cancelled,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type EraseResult<T> = Result<T, EraseError>;
