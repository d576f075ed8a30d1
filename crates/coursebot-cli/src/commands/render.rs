use std::path::Path;

use anyhow::Result;
use coursebot_core::render::WidgetRenderer;
use coursebot_core::widget::ChatWidget;
use coursebot_interaction::config::load_config;

pub fn run(config_path: Option<&Path>, open: bool) -> Result<()> {
    let config = load_config(config_path)?;
    println!("{}", render(&config.container_id, open)?);
    Ok(())
}

fn render(container_id: &str, open: bool) -> Result<String> {
    let mut widget = ChatWidget::new();
    if open {
        widget.toggle_open();
    }

    let renderer = WidgetRenderer::new()?;
    Ok(renderer.render_widget(&widget, container_id)?)
}
