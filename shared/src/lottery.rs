use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::clock::ClockSkew;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LotteryError {
    #[error("lottery {id} closes at {end} before it opens at {start}")]
    InvertedWindow { id: String, start: i64, end: i64 },
    #[error("expected at most one record, got {0}")]
    Ambiguous(usize),
    #[error("invalid entry metadata: {0}")]
    Metadata(String),
}

impl From<serde_json::Error> for LotteryError {
    fn from(err: serde_json::Error) -> Self {
        Self::Metadata(err.to_string())
    }
}

/// A lottery record as served by `/api/lottery/lotteries`.
///
/// `start` and `end` bound the submission window, `now` is the server clock
/// when the record was produced. All values are milliseconds since the epoch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lottery {
    #[serde(alias = "lotteryId")]
    pub id: String,
    pub start: i64,
    pub end: i64,
    pub now: i64,
}

impl Lottery {
    pub fn validate(&self) -> Result<(), LotteryError> {
        if self.start > self.end {
            return Err(LotteryError::InvertedWindow {
                id: self.id.clone(),
                start: self.start,
                end: self.end,
            });
        }
        Ok(())
    }

    /// Attach a latency estimate to a freshly fetched record.
    ///
    /// `local_at_request_start` must be read right before the request was
    /// issued and `local_now` when the response is handled.
    pub fn synchronize(
        self,
        local_at_request_start: i64,
        local_now: i64,
    ) -> Result<SyncedLottery, LotteryError> {
        self.validate()?;
        let skew = ClockSkew::estimate(self.now, local_at_request_start);
        Ok(SyncedLottery {
            now: skew.corrected(local_now),
            latency: skew.latency_ms(),
            lottery: self,
        })
    }
}

/// A lottery together with the clock correction computed when it was fetched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncedLottery {
    pub lottery: Lottery,
    pub latency: i64,
    pub now: i64,
}

impl SyncedLottery {
    pub fn skew(&self) -> ClockSkew {
        ClockSkew::from_latency(self.latency)
    }

    pub fn open(&self) -> i64 {
        self.lottery.start
    }

    pub fn close(&self) -> i64 {
        self.lottery.end
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entry {
    pub email: String,
    pub lottery_id: String,
    pub entry_id: String,
    #[serde(default)]
    pub entry_metadata: Value,
    #[serde(default = "empty_object")]
    pub user_data: Value,
    pub timestamp: i64,
}

fn empty_object() -> Value {
    Value::Object(Default::default())
}

impl Entry {
    /// The block shown under the confirmation message.
    pub fn details_json(&self) -> String {
        let details = serde_json::json!({
            "entryMetadata": self.entry_metadata,
            "userData": self.user_data,
            "timestamp": self.timestamp,
        });
        serde_json::to_string_pretty(&details).unwrap_or_default()
    }
}

/// What the sign-up form submits. The server stores it without checking it.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryMetadata {
    pub first_name: String,
    pub last_name: String,
    pub student_id: String,
    pub student_number: Option<u64>,
    #[serde(default)]
    pub preferences: Vec<String>,
}

impl EntryMetadata {
    pub fn to_json(&self) -> Result<String, LotteryError> {
        Ok(serde_json::to_string(self)?)
    }

    /// One preference per non-blank line, in the order written.
    pub fn preferences_from_lines(text: &str) -> Vec<String> {
        text.lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(String::from)
            .collect()
    }
}

/// Parses the raw `entryMetadata` query value. Only JSON syntax is checked.
pub fn parse_entry_metadata(raw: &str) -> Result<Value, LotteryError> {
    Ok(serde_json::from_str(raw)?)
}

/// Reduce a list response to zero or one record.
pub fn single_record<T>(mut records: Vec<T>) -> Result<Option<T>, LotteryError> {
    match records.len() {
        0 => Ok(None),
        1 => Ok(records.pop()),
        n => {
            log::warn!("expected at most one record, got {}", n);
            Err(LotteryError::Ambiguous(n))
        }
    }
}

/// `spring2021` -> `Spring 2021`
///
/// The last four characters are taken as the year. Ids no longer than that
/// keep the whole id as the year part, so `abc` becomes `A abc`.
pub fn format_lottery_id(id: &str) -> String {
    let chars: Vec<char> = id.chars().collect();
    let Some(first) = chars.first() else {
        return String::new();
    };

    let split = chars.len().saturating_sub(4);
    let mut formatted: String = first.to_uppercase().collect();
    if split > 1 {
        formatted.extend(&chars[1..split]);
    }
    formatted.push(' ');
    formatted.extend(&chars[split..]);
    formatted
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lottery(start: i64, end: i64, now: i64) -> Lottery {
        Lottery {
            id: "spring2021".to_string(),
            start,
            end,
            now,
        }
    }

    #[test]
    fn test_format_lottery_id() {
        assert_eq!(format_lottery_id("spring2021"), "Spring 2021");
        assert_eq!(format_lottery_id("fall2022"), "Fall 2022");
        assert_eq!(format_lottery_id(""), "");
        assert_eq!(format_lottery_id("abc"), "A abc");
        assert_eq!(format_lottery_id("a"), "A a");
        assert_eq!(format_lottery_id("x2021"), "X 2021");
    }

    #[test]
    fn test_single_record_cardinality() {
        assert_eq!(single_record::<u8>(vec![]), Ok(None));
        assert_eq!(single_record(vec![7]), Ok(Some(7)));
        assert_eq!(single_record(vec![1, 2]), Err(LotteryError::Ambiguous(2)));
    }

    #[test]
    fn test_inverted_window_rejected() {
        let err = lottery(2000, 1000, 1500).synchronize(1500, 1500).unwrap_err();
        assert!(matches!(err, LotteryError::InvertedWindow { start: 2000, end: 1000, .. }));
    }

    #[test]
    fn test_synchronize_derives_latency_and_now() {
        // Server is 250ms ahead of the instant the request started.
        let synced = lottery(1000, 2000, 1250).synchronize(1000, 1100).unwrap();
        assert_eq!(synced.latency, 250);
        assert_eq!(synced.now, 1350);
        assert_eq!(synced.open(), 1000);
        assert_eq!(synced.close(), 2000);
    }

    #[test]
    fn test_lottery_accepts_lottery_id_alias() {
        let raw = r#"{"lotteryId":"spring2021","start":1,"end":2,"now":1}"#;
        let parsed: Lottery = serde_json::from_str(raw).unwrap();
        assert_eq!(parsed.id, "spring2021");
    }

    #[test]
    fn test_entry_wire_format() {
        let raw = r#"{
            "email": "a@b.edu",
            "lotteryId": "spring2021",
            "entryId": "e-1",
            "entryMetadata": {"firstName": "Ada"},
            "timestamp": 42
        }"#;
        let entry: Entry = serde_json::from_str(raw).unwrap();
        assert_eq!(entry.entry_id, "e-1");
        assert_eq!(entry.user_data, serde_json::json!({}));
        assert!(entry.details_json().contains("\"firstName\": \"Ada\""));
    }

    #[test]
    fn test_metadata_is_not_validated() {
        assert!(parse_entry_metadata(r#"{"anything": [1, "two"]}"#).is_ok());
        assert!(matches!(parse_entry_metadata("{oops"), Err(LotteryError::Metadata(_))));
    }

    #[test]
    fn test_preferences_keep_order() {
        assert_eq!(
            EntryMetadata::preferences_from_lines("  Climbing\n\nKayaking \r\nHiking"),
            vec!["Climbing", "Kayaking", "Hiking"]
        );
        assert!(EntryMetadata::preferences_from_lines("").is_empty());
    }

    #[test]
    fn test_metadata_serializes_camel_case() {
        let metadata = EntryMetadata {
            first_name: "Ada".into(),
            student_number: Some(12),
            preferences: vec!["first".into(), "second".into()],
            ..Default::default()
        };
        let json = metadata.to_json().unwrap();
        assert!(json.contains("\"firstName\":\"Ada\""));
        assert!(json.contains("\"studentNumber\":12"));
        assert!(json.contains("[\"first\",\"second\"]"));
    }
}
