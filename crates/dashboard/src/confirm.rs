//! Destructive-action guard.

use std::io::{BufRead, Write};

/// Asks the operator to confirm a destructive action. Declining is not an error.
#[async_trait::async_trait]
pub trait Confirm: Send + Sync {
    async fn confirm(&self, prompt: &str) -> bool;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysConfirm;

#[async_trait::async_trait]
impl Confirm for AlwaysConfirm {
    async fn confirm(&self, _prompt: &str) -> bool {
        true
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NeverConfirm;

#[async_trait::async_trait]
impl Confirm for NeverConfirm {
    async fn confirm(&self, _prompt: &str) -> bool {
        false
    }
}

/// `y/N` prompt on the controlling terminal.
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalConfirm;

#[async_trait::async_trait]
impl Confirm for TerminalConfirm {
    async fn confirm(&self, prompt: &str) -> bool {
        let prompt = prompt.to_string();
        let answer = tokio::task::spawn_blocking(move || {
            let mut stderr = std::io::stderr();
            let _ = write!(stderr, "{prompt} [y/N] ");
            let _ = stderr.flush();

            let mut line = String::new();
            match std::io::stdin().lock().read_line(&mut line) {
                Ok(_) => matches!(line.trim().to_lowercase().as_str(), "y" | "yes"),
                Err(_) => false,
            }
        })
        .await;
        answer.unwrap_or(false)
    }
}
