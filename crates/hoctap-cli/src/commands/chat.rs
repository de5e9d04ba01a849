//! The `hoctap chat` command.

use std::path::PathBuf;

use anyhow::Result;

use hoctap_client::config::load_config_from;

use super::Friendly;

pub async fn execute(config: Option<PathBuf>, message: String) -> Result<()> {
    anyhow::ensure!(!message.trim().is_empty(), "message is empty");
    let config = load_config_from(config.as_deref())?;
    let assistant = config.chat_assistant()?;

    tracing::debug!(model = assistant.model(), "asking assistant");
    let reply = assistant.ask(&[], &message).await.friendly()?;
    println!("{}", reply.trim());
    Ok(())
}
