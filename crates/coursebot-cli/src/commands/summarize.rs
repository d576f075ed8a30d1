use std::path::Path;

use anyhow::Result;
use coursebot_core::widget::ChatWidget;

use super::Client;

pub async fn run(config_path: Option<&Path>, transcript: Option<String>) -> Result<()> {
    let client = Client::connect(config_path, transcript).await?;
    let mut widget = ChatWidget::new();

    let pending = widget.summarize(&client.selection);
    client.exchange(&mut widget, pending).await
}
