//! Host buffer list to switcher entries.

use serde::{Deserialize, Deserializer, Serialize};
use std::path::Path;

/// One listed buffer as reported by the host: `{name, cur, mod}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct HostBuffer {
    #[serde(default)]
    pub name: String,
    #[serde(rename = "cur", default, deserialize_with = "flag")]
    pub current: bool,
    #[serde(rename = "mod", default, deserialize_with = "flag")]
    pub modified: bool,
}

/// Vimscript booleans arrive as `0`/`1`.
fn flag<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flag {
        Bool(bool),
        Int(i64),
    }

    Ok(match Flag::deserialize(deserializer)? {
        Flag::Bool(b) => b,
        Flag::Int(i) => i != 0,
    })
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BufferEntry {
    /// Path as the host knows it; used for the switch command.
    pub path: String,
    /// Display name: `base`, or `dir/base` when `duplicate`.
    pub name: String,
    pub base: String,
    /// Directory relative to cwd (`.` for cwd itself).
    pub dir: String,
    pub modified: bool,
    /// Another entry has the same `base`.
    pub duplicate: bool,
}

/// Build switcher entries from the host list.
///
/// Drops the current buffer, unnamed buffers and repeated names (first
/// occurrence wins). Keeps host order.
pub fn build_buffer_list(buffers: &[HostBuffer], cwd: &str) -> Vec<BufferEntry> {
    let cwd = Path::new(cwd);

    let mut entries: Vec<BufferEntry> = Vec::with_capacity(buffers.len());
    for (ix, buffer) in buffers.iter().enumerate() {
        let first = buffers.iter().position(|b| b.name == buffer.name) == Some(ix);
        if !first || buffer.current || buffer.name.is_empty() {
            continue;
        }

        let path = Path::new(&buffer.name);
        let base = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| buffer.name.clone());
        let dir = path
            .parent()
            .map(|parent| relative_dir(parent, cwd))
            .unwrap_or_else(|| ".".to_string());

        entries.push(BufferEntry {
            path: buffer.name.clone(),
            name: base.clone(),
            base,
            dir,
            modified: buffer.modified,
            duplicate: false,
        });
    }

    for ix in 0..entries.len() {
        let duplicate = entries
            .iter()
            .enumerate()
            .any(|(other, entry)| other != ix && entry.base == entries[ix].base);
        if duplicate {
            let entry = &mut entries[ix];
            entry.duplicate = true;
            entry.name = format!("{}/{}", entry.dir, entry.base);
        }
    }

    entries
}

/// `dir` relative to `cwd`: `.` for cwd itself, the remainder below it,
/// unchanged elsewhere.
fn relative_dir(dir: &Path, cwd: &Path) -> String {
    if dir.as_os_str().is_empty() {
        return ".".to_string();
    }
    match dir.strip_prefix(cwd) {
        Ok(rest) if rest.as_os_str().is_empty() => ".".to_string(),
        Ok(rest) => rest.display().to_string(),
        Err(_) => dir.display().to_string(),
    }
}

/// Escape a path for use as an ex command argument.
pub fn escape_path(path: &str) -> String {
    let mut escaped = String::with_capacity(path.len());
    for c in path.chars() {
        if matches!(c, ' ' | '\t' | '%' | '#' | '|' | '"') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
