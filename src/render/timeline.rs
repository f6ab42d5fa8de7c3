use anyhow::Result;
use itertools::Itertools;

use super::format_pubdate;
use crate::link;
use crate::model::Episode;

const TITLE_CHARS: usize = 50;

/// One block per episode, most recent first. The sort is stable, so
/// episodes sharing a pubdate keep their input order.
pub fn render(episodes: &[Episode]) -> Result<String> {
    let mut html = String::new();
    for episode in episodes.iter().sorted_by(|a, b| b.pubdate.cmp(&a.pubdate)) {
        html.push_str(&render_episode(episode)?);
    }
    Ok(html)
}

fn render_episode(episode: &Episode) -> Result<String> {
    let date = format_pubdate(&episode.pubdate)?;

    let segments: String = episode
        .records
        .iter()
        .map(|segment| {
            let url = link::build_video_url(&episode.bvid, &segment.p, &segment.time);
            format!(
                r#"                <a href="{url}" target="_blank" rel="noopener noreferrer" class="game-segment">
                    <span class="segment-time">{p}#{time}</span>
                    <span class="segment-name">{name}</span>
                </a>
"#,
                p = segment.p,
                time = segment.time,
                name = segment.name,
            )
        })
        .collect();

    Ok(format!(
        r#"        <div class="timeline-item" data-episode="{bvid}">
            <div>
                <div class="timeline-date">{date}</div>
                <a href="{video}" target="_blank" rel="noopener noreferrer" class="timeline-video-link">
                    {title}
                </a>
            </div>
            <div class="timeline-games">
{segments}            </div>
        </div>
"#,
        bvid = episode.bvid,
        video = link::episode_url(&episode.bvid),
        title = display_title(&episode.title),
    ))
}

/// First 50 characters of the title, ellipsis appended whether or not
/// anything was actually cut.
fn display_title(title: &str) -> String {
    let head: String = title.chars().take(TITLE_CHARS).collect();
    format!("{head}...")
}

// ── Tests ──
