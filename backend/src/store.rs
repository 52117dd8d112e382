use std::collections::HashMap;

use serde_json::Value;
use shared::clock::LotteryWindow;
use shared::{Entry, Lottery};
use tokio::sync::RwLock;
use tracing::info;
use uuid::Uuid;

use crate::config::LotterySeed;
use crate::error::Error;

/// Process-local lottery storage. Entries are keyed by lottery and email so a
/// resubmission replaces the previous entry instead of adding another.
/// Lotteries are fixed at start-up and read without locking.
#[derive(Default)]
pub struct LotteryStore {
    lotteries: HashMap<String, LotterySeed>,
    entries: RwLock<HashMap<(String, String), Entry>>,
}

fn entry_key(lottery_id: &str, email: &str) -> (String, String) {
    (lottery_id.to_string(), email.trim().to_lowercase())
}

impl LotteryStore {
    pub fn new(seeds: impl IntoIterator<Item = LotterySeed>) -> Self {
        let lotteries = seeds
            .into_iter()
            .map(|seed| (seed.id.clone(), seed))
            .collect();
        Self {
            lotteries,
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Zero or one lottery records, stamped with the server's `now`.
    pub fn lotteries(&self, lottery_id: &str, now: i64) -> Vec<Lottery> {
        self.lotteries
            .get(lottery_id)
            .map(|seed| Lottery {
                id: seed.id.clone(),
                start: seed.start,
                end: seed.end,
                now,
            })
            .into_iter()
            .collect()
    }

    pub async fn entries(&self, lottery_id: &str, email: &str) -> Vec<Entry> {
        let entries = self.entries.read().await;
        entries
            .get(&entry_key(lottery_id, email))
            .cloned()
            .into_iter()
            .collect()
    }

    /// Creates the caller's entry, or replaces its metadata if one exists.
    /// Only accepted while the lottery window is open at `now`.
    pub async fn upsert_entry(
        &self,
        lottery_id: &str,
        email: &str,
        entry_metadata: Value,
        now: i64,
    ) -> Result<Entry, Error> {
        let seed = self
            .lotteries
            .get(lottery_id)
            .ok_or_else(|| Error::LotteryNotFound(lottery_id.to_string()))?;
        if LotteryWindow::classify(now, seed.start, seed.end) != LotteryWindow::Active {
            return Err(Error::LotteryNotOpen(lottery_id.to_string()));
        }

        let key = entry_key(lottery_id, email);
        let mut entries = self.entries.write().await;
        let entry = match entries.get_mut(&key) {
            Some(existing) => {
                existing.entry_metadata = entry_metadata;
                existing.timestamp = now;
                info!("Entry {} for {} resubmitted", existing.entry_id, lottery_id);
                existing.clone()
            }
            None => {
                let entry = Entry {
                    email: key.1.clone(),
                    lottery_id: lottery_id.to_string(),
                    entry_id: Uuid::new_v4().to_string(),
                    entry_metadata,
                    user_data: Value::Object(Default::default()),
                    timestamp: now,
                };
                info!("Entry {} for {} created", entry.entry_id, lottery_id);
                entries.insert(key, entry.clone());
                entry
            }
        };
        Ok(entry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn store() -> LotteryStore {
        LotteryStore::new([LotterySeed {
            id: "spring2021".to_string(),
            start: 1000,
            end: 2000,
        }])
    }

    #[test]
    fn test_lotteries_stamps_now() {
        let store = store();
        let found = store.lotteries("spring2021", 1500);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].now, 1500);
        assert_eq!(store.lotteries("spring2021", 1700)[0].now, 1700);
        assert!(store.lotteries("fall2021", 1500).is_empty());
    }

    #[tokio::test]
    async fn test_resubmission_keeps_entry_id() {
        let store = store();
        let first = store
            .upsert_entry("spring2021", "Ada@School.edu", json!({"firstName": "Ada"}), 1100)
            .await
            .unwrap();
        let second = store
            .upsert_entry("spring2021", "ada@school.edu", json!({"firstName": "Ada L."}), 1900)
            .await
            .unwrap();

        assert_eq!(first.entry_id, second.entry_id);
        assert_eq!(second.timestamp, 1900);
        assert_eq!(second.entry_metadata, json!({"firstName": "Ada L."}));

        let listed = store.entries("spring2021", "ada@school.edu").await;
        assert_eq!(listed, vec![second]);
    }

    #[tokio::test]
    async fn test_submissions_outside_window_rejected() {
        let store = store();
        assert!(matches!(
            store.upsert_entry("spring2021", "a@b.edu", json!({}), 999).await,
            Err(Error::LotteryNotOpen(_))
        ));
        assert!(matches!(
            store.upsert_entry("spring2021", "a@b.edu", json!({}), 2001).await,
            Err(Error::LotteryNotOpen(_))
        ));
        assert!(store
            .upsert_entry("spring2021", "a@b.edu", json!({}), 2000)
            .await
            .is_ok());
    }

    #[tokio::test]
    async fn test_unknown_lottery() {
        assert!(matches!(
            store().upsert_entry("fall2021", "a@b.edu", json!({}), 1500).await,
            Err(Error::LotteryNotFound(_))
        ));
    }
}
