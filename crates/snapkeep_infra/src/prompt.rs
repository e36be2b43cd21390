use anyhow::{Result, anyhow};
use inquire::Confirm;
use snapkeep_services::ConfirmService;

/// Interactive confirmation backed by `inquire`.
pub struct InquireConfirm;

impl InquireConfirm {
    pub fn new() -> Self {
        Self
    }
}

impl Default for InquireConfirm {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl ConfirmService for InquireConfirm {
    async fn confirm(&self, message: &str) -> Result<bool> {
        // inquire is blocking and we're in an async context, so hop onto a
        // blocking thread for the prompt
        let message = message.to_string();
        let answer = tokio::task::spawn_blocking(move || {
            Confirm::new(&message)
                .with_default(false)
                .with_help_message("y to delete, n to keep")
                .prompt()
        })
        .await
        .map_err(|e| anyhow!("Failed to spawn blocking task: {}", e))??;

        Ok(answer)
    }
}
