//! Audible cue for new unread notifications.

use std::io::Write;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ChimeError {
    #[error("audio output unavailable: {0}")]
    Unavailable(String),
}

pub trait Chime: Send + Sync {
    fn play(&self) -> Result<(), ChimeError>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SilentChime;

impl Chime for SilentChime {
    fn play(&self) -> Result<(), ChimeError> {
        Ok(())
    }
}

/// Rings the terminal bell (BEL on stderr).
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalBell;

impl Chime for TerminalBell {
    fn play(&self) -> Result<(), ChimeError> {
        let mut stderr = std::io::stderr();
        stderr
            .write_all(b"\x07")
            .map_err(|e| ChimeError::Unavailable(e.to_string()))?;
        stderr
            .flush()
            .map_err(|e| ChimeError::Unavailable(e.to_string()))
    }
}
