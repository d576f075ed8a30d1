use std::path::Path;

use anyhow::{Result, bail};
use coursebot_core::widget::{ChatWidget, MenuOption};

use super::Client;

pub async fn run(config_path: Option<&Path>, message: &str) -> Result<()> {
    let client = Client::connect(config_path, None).await?;
    let mut widget = ChatWidget::new();
    widget.select_option(MenuOption::SubmitFeedback, &client.selection);

    let Some(pending) = widget.submit(message, &client.selection) else {
        bail!("Nothing to send: the feedback is empty");
    };
    client.exchange(&mut widget, pending).await
}
