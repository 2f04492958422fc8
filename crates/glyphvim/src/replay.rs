//! `glyphvim replay`: recorded notifications in, channel publications out.

use crate::surface::TracingSurface;
use anyhow::{Context, Result};
use dispatch::{Channel, Dispatch};
use glyphvim_workspace::Workspace;
use serde::Serialize;
use serde_json::{json, Value};
use settings::Config;
use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::path::Path;
use std::sync::Arc;

/// Receives one JSON line per publication.
pub type Sink = Arc<dyn Fn(String) + Send + Sync>;

pub fn run(path: &Path, config: &Config) -> Result<()> {
    let file = File::open(path).with_context(|| format!("Failed to open {:?}", path))?;

    let mut workspace = Workspace::new(config, Box::new(TracingSurface::default()));
    subscribe_all(
        workspace.dispatch_mut(),
        Arc::new(|line: String| {
            let mut stdout = std::io::stdout().lock();
            if let Err(e) = writeln!(stdout, "{line}") {
                tracing::warn!("Failed to write output: {}", e);
            }
        }),
    );

    let count = replay(BufReader::new(file), &mut workspace)?;
    tracing::info!("Replayed {} notifications", count);
    Ok(())
}

/// Feed every `[method, params]` line to the workspace. Blank and
/// malformed lines are skipped. Returns the number of notifications applied.
pub fn replay(reader: impl BufRead, workspace: &mut Workspace) -> Result<usize> {
    let mut count = 0;
    for (number, line) in reader.lines().enumerate() {
        let line = line.context("Failed to read replay input")?;
        if line.trim().is_empty() {
            continue;
        }

        let notification: Value = match serde_json::from_str(&line) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!("Skipping line {}: {}", number + 1, e);
                continue;
            }
        };
        let Some((method, params)) = split_notification(&notification) else {
            tracing::warn!("Skipping line {}: not a [method, params] pair", number + 1);
            continue;
        };

        workspace.handle_notification(method, params);
        count += 1;
    }
    Ok(count)
}

fn split_notification(notification: &Value) -> Option<(&str, &Value)> {
    match notification.as_array()?.as_slice() {
        [method, params] => Some((method.as_str()?, params)),
        _ => None,
    }
}

/// Print every publication on every channel through `sink`.
pub fn subscribe_all(dispatch: &mut Dispatch, sink: Sink) {
    forward(&mut dispatch.status, &sink);
    forward(&mut dispatch.control, &sink);
    forward(&mut dispatch.title, &sink);
    forward(&mut dispatch.mode, &sink);
    forward(&mut dispatch.message, &sink);
    forward(&mut dispatch.message_clear, &sink);
    forward(&mut dispatch.popup_menu, &sink);
    forward(&mut dispatch.wildmenu, &sink);
    forward(&mut dispatch.command, &sink);
    forward(&mut dispatch.search, &sink);
}

fn forward<T: Serialize + 'static>(channel: &mut Channel<T>, sink: &Sink) {
    let topic = channel.topic();
    let sink = Arc::clone(sink);
    channel.subscribe(move |payload| {
        sink(json!({ "topic": topic, "payload": payload }).to_string());
    });
}
