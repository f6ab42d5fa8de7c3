use crate::model::Part;

const VIDEO_BASE: &str = "https://www.bilibili.com/video";
const SHARE_SOURCE: &str = "MARK_POINT";

/// Parse a colon-delimited timestamp (`SS`, `MM:SS`, `HH:MM:SS`, generalized
/// for any component count) into elapsed seconds. Any malformed component
/// maps the whole timestamp to 0 — never an error.
pub fn timestamp_seconds(time: &str) -> u64 {
    let mut total: u64 = 0;
    for token in time.split(':') {
        match token.trim().parse::<u64>() {
            Ok(v) => total = total * 60 + v,
            Err(_) => return 0,
        }
    }
    total
}

/// Deep link into `bvid` at the given part and offset. The `?` is
/// concatenated unconditionally; the parameter list is never empty, so a
/// bare trailing `?` is unreachable in practice.
pub fn build_video_url(bvid: &str, part: &Part, time: &str) -> String {
    let seconds = timestamp_seconds(time);
    let milliseconds = seconds * 1000;

    let mut params = Vec::with_capacity(4);
    if !part.is_default() {
        params.push(format!("p={}", part.raw()));
    }
    params.push(format!("t={seconds}"));
    params.push(format!("start_progress={milliseconds}"));
    params.push(format!("share_source={SHARE_SOURCE}"));

    format!("{VIDEO_BASE}/{bvid}/?{}", params.join("&"))
}

/// Plain link to the episode itself, no offset.
pub fn episode_url(bvid: &str) -> String {
    format!("{VIDEO_BASE}/{bvid}/")
}

// ── Tests ──
