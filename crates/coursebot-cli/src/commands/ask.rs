use std::path::Path;

use anyhow::{Result, bail};
use clap::ValueEnum;
use coursebot_core::widget::{ChatWidget, MenuOption};

use super::Client;

/// Conversation modes reachable with a free-text message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum AskMode {
    /// Question about the selected lesson
    Qa,
    /// No option chosen; the reply is formatted like a summary
    General,
    /// Ask for help from the course staff
    Assistance,
}

impl AskMode {
    fn menu_option(self) -> Option<MenuOption> {
        match self {
            AskMode::Qa => Some(MenuOption::QuestionAnswer),
            AskMode::General => None,
            AskMode::Assistance => Some(MenuOption::RequestAssistance),
        }
    }
}

pub async fn run(
    config_path: Option<&Path>,
    mode: AskMode,
    transcript: Option<String>,
    message: &str,
) -> Result<()> {
    let client = Client::connect(config_path, transcript).await?;
    let mut widget = ChatWidget::new();

    if let Some(option) = mode.menu_option() {
        widget.select_option(option, &client.selection);
    }

    let Some(pending) = widget.submit(message, &client.selection) else {
        bail!("Nothing to send: the message is empty");
    };
    client.exchange(&mut widget, pending).await
}
