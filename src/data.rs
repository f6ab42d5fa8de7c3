//! File-backed collaborators around the pure core: the episode document,
//! the page template, and the output sink.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use crate::model::Episode;
use crate::render::format_pubdate;

pub fn load_episodes(path: &Path) -> Result<Vec<Episode>> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read episode data {}", path.display()))?;
    let episodes: Vec<Episode> = serde_json::from_str(&text)
        .with_context(|| format!("failed to decode episode data {}", path.display()))?;
    validate(&episodes)?;
    info!("Loaded {} episodes from {}", episodes.len(), path.display());
    Ok(episodes)
}

/// Reject records the renderers cannot represent, naming the offender.
/// Timestamp strings are exempt: those fall back to 0 by contract.
fn validate(episodes: &[Episode]) -> Result<()> {
    for episode in episodes {
        format_pubdate(&episode.pubdate).with_context(|| format!("episode {}", episode.bvid))?;
    }
    Ok(())
}

pub fn load_template(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("failed to read template {}", path.display()))
}

pub fn write_page(path: &Path, html: &str) -> Result<()> {
    fs::write(path, html).with_context(|| format!("failed to write {}", path.display()))?;
    info!("Wrote {} bytes to {}", html.len(), path.display());
    Ok(())
}

// ── Tests ──
