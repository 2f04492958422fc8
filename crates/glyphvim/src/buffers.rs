//! `glyphvim buffers`: the buffer switcher against a recorded buffer list.

use crate::surface::TracingSurface;
use anyhow::{Context, Result};
use glyphvim_workspace::{Host, HostBuffer, SwitcherInput, SwitcherRow, SwitcherView, Workspace};
use settings::Config;
use std::path::Path;

/// Host that answers from fixed data and logs commands instead of running
/// them.
pub struct FixtureHost {
    cwd: String,
    buffers: Vec<HostBuffer>,
}

impl FixtureHost {
    pub fn new(cwd: String, buffers: Vec<HostBuffer>) -> Self {
        Self { cwd, buffers }
    }

    pub fn load(cwd: String, path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read buffer list {:?}", path))?;
        let buffers = serde_json::from_str(&content)
            .with_context(|| format!("Malformed buffer list {:?}", path))?;
        Ok(Self::new(cwd, buffers))
    }
}

impl Host for FixtureHost {
    async fn current_dir(&self) -> Result<String> {
        Ok(self.cwd.clone())
    }

    async fn list_buffers(&self) -> Result<Vec<HostBuffer>> {
        Ok(self.buffers.clone())
    }

    async fn command(&self, command: String) -> Result<()> {
        tracing::info!("Host command: {}", command);
        Ok(())
    }
}

pub async fn run(path: &Path, cwd: String, filter: Option<String>, config: &Config) -> Result<()> {
    let host = FixtureHost::load(cwd, path)?;
    let mut workspace = Workspace::new(config, Box::new(TracingSurface::default()));

    workspace.open_buffer_switcher(&host).await;
    if let Some(query) = filter {
        workspace
            .switcher_input(SwitcherInput::Query(query), &host)
            .await;
    }

    for line in render(&workspace.switcher().view()) {
        println!("{line}");
    }
    Ok(())
}

/// Text rendering of the panel, one line per row.
pub fn render(view: &SwitcherView) -> Vec<String> {
    if !view.visible {
        return Vec::new();
    }
    if let Some(message) = view.empty_message {
        return vec![message.to_string()];
    }
    view.rows.iter().map(render_row).collect()
}

fn render_row(row: &SwitcherRow) -> String {
    format!(
        "{} {}{}{}",
        if row.selected { ">" } else { " " },
        row.dir_prefix.as_deref().unwrap_or_default(),
        row.label,
        if row.modified { " [+]" } else { "" },
    )
}
