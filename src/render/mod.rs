pub mod games;
pub mod timeline;

use anyhow::{Context, Result};
use chrono::DateTime;

use crate::model::Episode;

/// Literal substitution markers recognized in the page template.
pub const TIMELINE_MARKER: &str = "<!-- {{ TIMELINE_ITEMS }} -->";
pub const GAMES_MARKER: &str = "<!-- {{ GAMES_GRID }} -->";

/// Render both views and substitute them into the template. Markers are
/// replaced wherever they occur; a template without a marker passes
/// through untouched.
pub fn build_page(episodes: &[Episode], template: &str) -> Result<String> {
    let timeline = timeline::render(episodes)?;
    let games = games::render(episodes)?;
    Ok(template
        .replace(TIMELINE_MARKER, &timeline)
        .replace(GAMES_MARKER, &games))
}

/// `YYYY/MM/DD` in whatever offset the pubdate string itself encodes.
pub fn format_pubdate(pubdate: &str) -> Result<String> {
    let date = DateTime::parse_from_rfc3339(pubdate)
        .with_context(|| format!("unparseable pubdate {:?}", pubdate))?;
    Ok(date.format("%Y/%m/%d").to_string())
}

// ── Tests ──
