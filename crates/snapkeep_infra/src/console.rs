use anyhow::Result;
use snapkeep_services::ConsoleService;

/// Writes console output straight to stdout.
pub struct StdoutConsole;

#[async_trait::async_trait]
impl ConsoleService for StdoutConsole {
    async fn print(&self, output: &str) -> Result<()> {
        println!("{output}");
        Ok(())
    }
}
