use anyhow::{Context, Result};
use chrono::Utc;

use crate::{
    db::{kv::HISTORY_KEY, KvRepository},
    domain::{HistoryEntry, HistoryStats, NewScan},
};

pub const HISTORY_LIMIT: usize = 50;

/// Most-recent-first log of single-email scans, mirrored to the key-value
/// store after every mutation.
pub struct HistoryStore {
    kv: KvRepository,
    entries: Vec<HistoryEntry>,
    last_id: i64,
}

impl HistoryStore {
    pub async fn load(kv: KvRepository) -> Result<Self> {
        let entries = match kv.get(HISTORY_KEY).await? {
            Some(blob) => match serde_json::from_str::<Vec<HistoryEntry>>(&blob) {
                Ok(entries) => entries,
                Err(err) => {
                    tracing::warn!(target: "history", error = %err, "stored history is unreadable; starting empty");
                    Vec::new()
                }
            },
            None => Vec::new(),
        };
        let last_id = entries.iter().map(|e| e.id).max().unwrap_or(0);
        tracing::debug!(target: "history", entries = entries.len(), "history loaded");
        Ok(Self {
            kv,
            entries,
            last_id,
        })
    }

    pub fn list_all(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub async fn record(&mut self, scan: NewScan) -> Result<&HistoryEntry> {
        let id = self.next_id();
        let entry = HistoryEntry {
            id,
            prediction: scan.prediction,
            confidence: scan.confidence,
            risk_level: scan.risk_level,
            email_text: scan.email_text,
            timestamp: scan.timestamp,
        };

        let mut next = Vec::with_capacity(HISTORY_LIMIT);
        next.push(entry);
        next.extend(self.entries.iter().take(HISTORY_LIMIT - 1).cloned());
        self.commit(next).await?;
        self.last_id = id;
        Ok(&self.entries[0])
    }

    pub async fn delete(&mut self, id: i64) -> Result<bool> {
        if !self.entries.iter().any(|e| e.id == id) {
            return Ok(false);
        }
        let next = self.entries.iter().filter(|e| e.id != id).cloned().collect();
        self.commit(next).await?;
        Ok(true)
    }

    /// Wipes everything, but only if `confirm` agrees.
    pub async fn clear<F>(&mut self, confirm: F) -> Result<bool>
    where
        F: FnOnce() -> bool,
    {
        if !confirm() {
            return Ok(false);
        }
        self.commit(Vec::new()).await?;
        Ok(true)
    }

    pub fn aggregate(&self) -> HistoryStats {
        let mut stats = HistoryStats::default();
        let mut confidence_sum = 0.0;
        for entry in &self.entries {
            stats.total += 1;
            if entry.prediction.is_spam() {
                stats.spam_count += 1;
            } else {
                stats.ham_count += 1;
            }
            confidence_sum += entry.confidence;
        }
        if stats.total > 0 {
            stats.avg_confidence_percent = confidence_sum / stats.total as f64 * 100.0;
        }
        stats
    }

    /// Persists `next` first so a failed write leaves memory untouched.
    async fn commit(&mut self, next: Vec<HistoryEntry>) -> Result<()> {
        let blob = serde_json::to_string(&next)?;
        self.kv
            .set(HISTORY_KEY, &blob)
            .await
            .context("failed to persist scan history")?;
        self.entries = next;
        Ok(())
    }

    fn next_id(&self) -> i64 {
        Utc::now().timestamp_millis().max(self.last_id + 1)
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone};

    use super::*;
    use crate::{
        db::init_pool,
        domain::{Prediction, RiskLevel},
    };

    fn scan(n: usize, prediction: Prediction, confidence: f64) -> NewScan {
        NewScan {
            prediction,
            confidence,
            risk_level: RiskLevel::Medium,
            email_text: format!("email number {n}"),
            timestamp: Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap() + Duration::seconds(n as i64),
        }
    }

    async fn open(dir: &tempfile::TempDir) -> HistoryStore {
        let kv = KvRepository::new(init_pool(&dir.path().join("history.db")).await.unwrap());
        HistoryStore::load(kv).await.unwrap()
    }

    #[tokio::test]
    async fn empty_aggregate_has_zero_average() {
        let dir = tempfile::tempdir().unwrap();
        let store = open(&dir).await;
        let stats = store.aggregate();
        assert_eq!(stats.total, 0);
        assert_eq!(stats.avg_confidence_percent, 0.0);
    }

    #[tokio::test]
    async fn keeps_the_fifty_most_recent() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = open(&dir).await;
        for n in 0..51 {
            store.record(scan(n, Prediction::Ham, 0.5)).await.unwrap();
        }

        let entries = store.list_all();
        assert_eq!(entries.len(), HISTORY_LIMIT);
        assert_eq!(entries[0].email_text, "email number 50");
        assert_eq!(entries[49].email_text, "email number 1");
        assert!(entries.iter().all(|e| e.email_text != "email number 0"));
        assert!(entries.windows(2).all(|w| w[0].id > w[1].id));
    }

    #[tokio::test]
    async fn aggregate_counts_and_averages() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = open(&dir).await;
        store.record(scan(1, Prediction::Spam, 0.9)).await.unwrap();
        store.record(scan(2, Prediction::Spam, 0.8)).await.unwrap();
        store.record(scan(3, Prediction::Ham, 0.7)).await.unwrap();

        let stats = store.aggregate();
        assert_eq!(stats.total, 3);
        assert_eq!(stats.spam_count, 2);
        assert_eq!(stats.ham_count, 1);
        assert!((stats.avg_confidence_percent - 80.0).abs() < 1e-9);
    }

    #[tokio::test]
    async fn delete_removes_only_the_matching_entry() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = open(&dir).await;
        for n in 0..4 {
            store.record(scan(n, Prediction::Ham, 0.6)).await.unwrap();
        }
        let victim = store.list_all()[1].id;
        let before: Vec<i64> = store.list_all().iter().map(|e| e.id).collect();

        assert!(store.delete(victim).await.unwrap());
        assert!(!store.delete(victim).await.unwrap());

        let after: Vec<i64> = store.list_all().iter().map(|e| e.id).collect();
        let expected: Vec<i64> = before.into_iter().filter(|id| *id != victim).collect();
        assert_eq!(after, expected);
    }

    #[tokio::test]
    async fn clear_requires_confirmation() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = open(&dir).await;
        store.record(scan(1, Prediction::Spam, 0.99)).await.unwrap();

        assert!(!store.clear(|| false).await.unwrap());
        assert_eq!(store.list_all().len(), 1);

        assert!(store.clear(|| true).await.unwrap());
        assert!(store.list_all().is_empty());
    }

    #[tokio::test]
    async fn reload_restores_persisted_state_verbatim() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = open(&dir).await;
        store.record(scan(1, Prediction::Spam, 0.93)).await.unwrap();
        store.record(scan(2, Prediction::Ham, 0.71)).await.unwrap();
        let snapshot = store.list_all().to_vec();
        let last_id = snapshot[0].id;
        drop(store);

        let mut reopened = open(&dir).await;
        assert_eq!(reopened.list_all(), snapshot.as_slice());

        let fresh = reopened.record(scan(3, Prediction::Ham, 0.5)).await.unwrap();
        assert!(fresh.id > last_id);
    }

    #[tokio::test]
    async fn corrupt_blob_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let kv = KvRepository::new(init_pool(&dir.path().join("history.db")).await.unwrap());
        kv.set(HISTORY_KEY, "{not json").await.unwrap();

        let store = HistoryStore::load(kv).await.unwrap();
        assert!(store.list_all().is_empty());
    }
}
