use std::fmt;

use serde::Deserialize;

/// One published video with its in-video markpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct Episode {
    pub bvid: String,
    /// Raw ISO-8601 publish timestamp. Kept as text: recency sorting and
    /// the per-game sort key both operate on the raw string.
    pub pubdate: String,
    pub title: String,
    #[serde(default)]
    pub records: Vec<Segment>,
}

/// A timestamped chapter within an episode, tagged with a game name.
#[derive(Debug, Clone, Deserialize)]
pub struct Segment {
    #[serde(default)]
    pub p: Part,
    pub time: String,
    pub name: String,
}

/// Part index of a multi-part video. The raw form drives URL emission and
/// labels (so `1` and `"1"` count as the default while `1.0` does not);
/// the numeric form drives chronological sorting.
#[derive(Debug, Clone)]
pub struct Part {
    raw: String,
    num: i64,
}

impl Part {
    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn number(&self) -> i64 {
        self.num
    }

    /// Part "1" is the implicit default and suppressed from URLs.
    pub fn is_default(&self) -> bool {
        self.raw == "1"
    }
}

impl Default for Part {
    fn default() -> Self {
        Part {
            raw: "1".to_string(),
            num: 1,
        }
    }
}

impl fmt::Display for Part {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl<'de> Deserialize<'de> for Part {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Num(serde_json::Number),
            Text(String),
        }

        match Repr::deserialize(deserializer)? {
            Repr::Num(n) => {
                let num = n
                    .as_i64()
                    .or_else(|| n.as_f64().map(|f| f as i64))
                    .ok_or_else(|| serde::de::Error::custom(format!("part {} out of range", n)))?;
                Ok(Part {
                    raw: n.to_string(),
                    num,
                })
            }
            Repr::Text(s) => {
                let num = s
                    .trim()
                    .parse::<i64>()
                    .map_err(|_| serde::de::Error::custom(format!("part {:?} is not numeric", s)))?;
                Ok(Part { raw: s, num })
            }
        }
    }
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn part(value: serde_json::Value) -> Part {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn integer_part_is_default() {
        let p = part(json!(1));
        assert_eq!(p.raw(), "1");
        assert_eq!(p.number(), 1);
        assert!(p.is_default());
    }

    #[test]
    fn string_part_is_default() {
        let p = part(json!("1"));
        assert!(p.is_default());
    }

    #[test]
    fn float_part_keeps_float_form() {
        // str(1.0) != "1" in the data this mirrors, so 1.0 is not default.
        let p = part(json!(1.0));
        assert_eq!(p.raw(), "1.0");
        assert_eq!(p.number(), 1);
        assert!(!p.is_default());
    }

    #[test]
    fn numeric_string_part() {
        let p = part(json!("3"));
        assert_eq!(p.raw(), "3");
        assert_eq!(p.number(), 3);
        assert!(!p.is_default());
    }

    #[test]
    fn non_numeric_part_is_rejected() {
        let r: Result<Part, _> = serde_json::from_value(json!("one"));
        assert!(r.is_err());
    }

    #[test]
    fn missing_part_defaults_to_one() {
        let s: Segment = serde_json::from_value(json!({
            "time": "1:30",
            "name": "GameA"
        }))
        .unwrap();
        assert!(s.p.is_default());
    }

    #[test]
    fn episode_decodes() {
        let e: Episode = serde_json::from_value(json!({
            "bvid": "BV1xx411c7mD",
            "pubdate": "2024-03-01T20:15:00Z",
            "title": "test",
            "records": [{ "p": 2, "time": "90", "name": "GameA" }]
        }))
        .unwrap();
        assert_eq!(e.records.len(), 1);
        assert_eq!(e.records[0].p.raw(), "2");
    }
}
