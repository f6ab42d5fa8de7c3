use std::collections::HashMap;

use anyhow::Result;

use super::format_pubdate;
use crate::link::{self, timestamp_seconds};
use crate::model::{Episode, Segment};

/// One (episode, segment) pair referencing a game.
struct Appearance<'a> {
    episode: &'a Episode,
    segment: &'a Segment,
}

/// One card per distinct game, most recently played first.
pub fn render(episodes: &[Episode]) -> Result<String> {
    let mut html = String::new();
    for (name, appearances) in group_by_game(episodes) {
        html.push_str(&render_card(name, &appearances)?);
    }
    Ok(html)
}

/// Per-game summary row for the overview table, in card order.
pub struct GameRow {
    pub name: String,
    pub appearances: usize,
    pub first: String,
    pub last: String,
}

pub fn overview(episodes: &[Episode]) -> Vec<GameRow> {
    group_by_game(episodes)
        .into_iter()
        .map(|(name, appearances)| GameRow {
            name: name.to_string(),
            appearances: appearances.len(),
            first: appearances[0].episode.pubdate.clone(),
            last: appearances[appearances.len() - 1].episode.pubdate.clone(),
        })
        .collect()
}

/// Group every (episode, segment) pair by game name. Groups accumulate in
/// first-seen order; entries are then sorted chronologically (day, part,
/// in-episode offset) and the groups reordered by the pubdate of their
/// latest entry, descending. Both sorts are stable, so first-seen order
/// breaks ties.
fn group_by_game(episodes: &[Episode]) -> Vec<(&str, Vec<Appearance<'_>>)> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut groups: Vec<(&str, Vec<Appearance>)> = Vec::new();

    for episode in episodes {
        for segment in &episode.records {
            let slot = *index.entry(segment.name.as_str()).or_insert_with(|| {
                groups.push((segment.name.as_str(), Vec::new()));
                groups.len() - 1
            });
            groups[slot].1.push(Appearance { episode, segment });
        }
    }

    for (_, appearances) in &mut groups {
        appearances.sort_by_key(|a| {
            (
                day_key(&a.episode.pubdate),
                a.segment.p.number(),
                timestamp_seconds(&a.segment.time),
            )
        });
    }

    groups.sort_by(|a, b| last_pubdate(b).cmp(last_pubdate(a)));
    groups
}

/// The `YYYY-MM-DD` prefix of the raw pubdate.
fn day_key(pubdate: &str) -> String {
    pubdate.chars().take(10).collect()
}

fn last_pubdate<'e>(group: &(&str, Vec<Appearance<'e>>)) -> &'e str {
    group
        .1
        .last()
        .map(|a| a.episode.pubdate.as_str())
        .unwrap_or("")
}

fn render_card(name: &str, appearances: &[Appearance<'_>]) -> Result<String> {
    let mut items = String::new();
    for a in appearances {
        let date = format_pubdate(&a.episode.pubdate)?;
        let url = link::build_video_url(&a.episode.bvid, &a.segment.p, &a.segment.time);
        items.push_str(&format!(
            r#"                <a href="{url}" target="_blank" rel="noopener noreferrer" class="episode-item">
                    <span class="episode-date">{date}</span>
                    <span class="episode-time">{p}#{time}</span>
                </a>
"#,
            p = a.segment.p,
            time = a.segment.time,
        ));
    }

    Ok(format!(
        r#"        <div class="game-card" data-game="{name}">
            <div class="game-title">{name}</div>
            <div class="episode-list">
{items}            </div>
        </div>
"#,
    ))
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn episodes(value: serde_json::Value) -> Vec<Episode> {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn shared_game_yields_one_card_with_both_links() {
        let eps = episodes(json!([
            {
                "bvid": "BV1b", "pubdate": "2024-02-01T12:00:00Z", "title": "t",
                "records": [{ "p": 1, "time": "10:00", "name": "GameA" }]
            },
            {
                "bvid": "BV1a", "pubdate": "2024-01-01T12:00:00Z", "title": "t",
                "records": [{ "p": 1, "time": "5:00", "name": "GameA" }]
            }
        ]));
        let html = render(&eps).unwrap();
        assert_eq!(html.matches("game-card").count(), 1);
        assert_eq!(html.matches("episode-item").count(), 2);
        // Chronological inside the card: January before February.
        assert!(html.find("2024/01/01").unwrap() < html.find("2024/02/01").unwrap());
    }

    #[test]
    fn cards_order_by_most_recent_appearance() {
        let eps = episodes(json!([
            {
                "bvid": "BV1a", "pubdate": "2024-01-01T12:00:00Z", "title": "t",
                "records": [
                    { "p": 1, "time": "0:10", "name": "Old" },
                    { "p": 1, "time": "0:20", "name": "Fresh" }
                ]
            },
            {
                "bvid": "BV1b", "pubdate": "2024-03-01T12:00:00Z", "title": "t",
                "records": [{ "p": 1, "time": "0:10", "name": "Fresh" }]
            }
        ]));
        let html = render(&eps).unwrap();
        assert!(html.find(r#"data-game="Fresh""#).unwrap() < html.find(r#"data-game="Old""#).unwrap());
    }

    #[test]
    fn entries_sort_by_day_then_part_then_offset() {
        let eps = episodes(json!([
            {
                "bvid": "BV1a", "pubdate": "2024-01-01T23:00:00Z", "title": "t",
                "records": [
                    { "p": 2, "time": "0:10", "name": "GameA" },
                    { "p": 1, "time": "9:00", "name": "GameA" },
                    { "p": 1, "time": "1:00", "name": "GameA" }
                ]
            }
        ]));
        let html = render(&eps).unwrap();
        let first = html.find("1#1:00").unwrap();
        let second = html.find("1#9:00").unwrap();
        let third = html.find("2#0:10").unwrap();
        assert!(first < second && second < third);
    }

    #[test]
    fn tied_cards_keep_first_seen_order() {
        let eps = episodes(json!([
            {
                "bvid": "BV1a", "pubdate": "2024-01-01T12:00:00Z", "title": "t",
                "records": [
                    { "p": 1, "time": "0:10", "name": "Alpha" },
                    { "p": 1, "time": "0:20", "name": "Beta" }
                ]
            }
        ]));
        let html = render(&eps).unwrap();
        assert!(html.find(r#"data-game="Alpha""#).unwrap() < html.find(r#"data-game="Beta""#).unwrap());
    }

    #[test]
    fn overview_reports_span_and_count() {
        let eps = episodes(json!([
            {
                "bvid": "BV1a", "pubdate": "2024-01-01T12:00:00Z", "title": "t",
                "records": [{ "p": 1, "time": "0:10", "name": "GameA" }]
            },
            {
                "bvid": "BV1b", "pubdate": "2024-03-01T12:00:00Z", "title": "t",
                "records": [{ "p": 1, "time": "0:10", "name": "GameA" }]
            }
        ]));
        let rows = overview(&eps);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].appearances, 2);
        assert_eq!(rows[0].first, "2024-01-01T12:00:00Z");
        assert_eq!(rows[0].last, "2024-03-01T12:00:00Z");
    }

    #[test]
    fn no_segments_renders_nothing() {
        let eps = episodes(json!([
            { "bvid": "BV1a", "pubdate": "2024-01-01T12:00:00Z", "title": "t", "records": [] }
        ]));
        assert_eq!(render(&eps).unwrap(), "");
    }
}
