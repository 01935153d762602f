use async_trait::async_trait;
use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;
use uuid::Uuid;

use tammeni_scoring::DiagnosisResult;

/// Errors from the response store backend.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The backend rejected or failed the operation.
    #[error("storage backend error: {0}")]
    Backend(String),
}

/// Respondent gender, collected with the submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    /// ذكر
    Male,
    /// أنثى
    Female,
}

/// Respondent age bracket. Brackets rather than exact ages; the form never
/// collects a birth date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AgeBracket {
    /// 18 to 29 years.
    #[serde(rename = "18-29")]
    From18To29,
    /// 30 to 39 years.
    #[serde(rename = "30-39")]
    From30To39,
    /// 40 to 49 years.
    #[serde(rename = "40-49")]
    From40To49,
    /// 50 years and above.
    #[serde(rename = "50+")]
    From50,
}

impl AgeBracket {
    /// Display label, matching the stored wire form.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::From18To29 => "18-29",
            Self::From30To39 => "30-39",
            Self::From40To49 => "40-49",
            Self::From50 => "50+",
        }
    }
}

/// Lifecycle of a stored response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisStatus {
    /// Inserted, not yet scored.
    Pending,
    /// Scored; the outcome field is populated.
    Analyzed,
}

/// The scored outcome persisted alongside the raw answers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredOutcome {
    /// Fused diagnosis label.
    pub label: String,
    /// Depression confidence, percent.
    pub depression_percent: f64,
    /// Anxiety confidence, percent.
    pub anxiety_percent: f64,
}

impl From<&DiagnosisResult> for StoredOutcome {
    fn from(result: &DiagnosisResult) -> Self {
        Self {
            label: result.label.label().to_string(),
            depression_percent: result.depression_percent,
            anxiety_percent: result.anxiety_percent,
        }
    }
}

/// One questionnaire response as persisted.
///
/// Raw answers are stored verbatim: cleaning, translation and stemming are
/// in-flight transformations and are never written back.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResponseRecord {
    /// Store-assigned identifier.
    pub id: Uuid,
    /// Respondent handle.
    pub username: String,
    /// Respondent gender.
    pub gender: Gender,
    /// Respondent age bracket.
    pub age_bracket: AgeBracket,
    /// Raw answers, one per question, in question order.
    pub answers: Vec<String>,
    /// Lifecycle status.
    pub status: AnalysisStatus,
    /// Outcome, present once analyzed.
    pub outcome: Option<StoredOutcome>,
    /// Free-form metadata (client version, locale). Insertion order kept.
    pub metadata: IndexMap<String, serde_json::Value>,
    /// Insertion time.
    pub timestamp: DateTime<Utc>,
}

impl ResponseRecord {
    /// Builds a pending record for a fresh submission.
    #[must_use]
    pub fn pending(
        username: String,
        gender: Gender,
        age_bracket: AgeBracket,
        answers: Vec<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            username,
            gender,
            age_bracket,
            answers,
            status: AnalysisStatus::Pending,
            outcome: None,
            metadata: IndexMap::new(),
            timestamp: Utc::now(),
        }
    }
}

/// Query filter for record lookups. Empty filter matches everything.
#[derive(Debug, Clone, Default)]
pub struct RecordFilter {
    /// Match this username exactly.
    pub username: Option<String>,
}

impl RecordFilter {
    fn matches(&self, record: &ResponseRecord) -> bool {
        self.username
            .as_ref()
            .is_none_or(|name| record.username == *name)
    }
}

/// Sort order for multi-record queries, by insertion time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    /// Most recent record first.
    NewestFirst,
    /// Oldest record first.
    OldestFirst,
}

/// Partial update applied to one record. Only the named fields change.
#[derive(Debug, Clone, Default)]
pub struct RecordPatch {
    /// New lifecycle status.
    pub status: Option<AnalysisStatus>,
    /// New outcome.
    pub outcome: Option<StoredOutcome>,
}

impl RecordPatch {
    /// Patch marking a record analyzed with the given outcome.
    #[must_use]
    pub fn analyzed(outcome: StoredOutcome) -> Self {
        Self {
            status: Some(AnalysisStatus::Analyzed),
            outcome: Some(outcome),
        }
    }
}

/// Persistence collaborator for questionnaire responses.
#[async_trait]
pub trait ResponseStore: Send + Sync {
    /// Inserts a record, returning its identifier.
    async fn insert(&self, record: ResponseRecord) -> Result<Uuid, StorageError>;

    /// Returns the first matching record under the given order, if any.
    async fn find_one(
        &self,
        filter: &RecordFilter,
        order: SortOrder,
    ) -> Result<Option<ResponseRecord>, StorageError>;

    /// Returns all matching records under the given order.
    async fn find(
        &self,
        filter: &RecordFilter,
        order: SortOrder,
    ) -> Result<Vec<ResponseRecord>, StorageError>;

    /// Applies a patch to the record with the given identifier.
    async fn update_one(&self, id: Uuid, patch: RecordPatch) -> Result<(), StorageError>;
}

/// In-memory store for tests and single-process deployments.
#[derive(Debug, Default, Clone)]
pub struct MemoryResponseStore {
    records: Arc<RwLock<Vec<ResponseRecord>>>,
}

impl MemoryResponseStore {
    /// Empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    /// True when nothing has been stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }

    fn sorted_matches(&self, filter: &RecordFilter, order: SortOrder) -> Vec<ResponseRecord> {
        let mut hits: Vec<ResponseRecord> = self
            .records
            .read()
            .iter()
            .filter(|record| filter.matches(record))
            .cloned()
            .collect();
        hits.sort_by_key(|record| record.timestamp);
        if order == SortOrder::NewestFirst {
            hits.reverse();
        }
        hits
    }
}

#[async_trait]
impl ResponseStore for MemoryResponseStore {
    async fn insert(&self, record: ResponseRecord) -> Result<Uuid, StorageError> {
        let id = record.id;
        self.records.write().push(record);
        Ok(id)
    }

    async fn find_one(
        &self,
        filter: &RecordFilter,
        order: SortOrder,
    ) -> Result<Option<ResponseRecord>, StorageError> {
        Ok(self.sorted_matches(filter, order).into_iter().next())
    }

    async fn find(
        &self,
        filter: &RecordFilter,
        order: SortOrder,
    ) -> Result<Vec<ResponseRecord>, StorageError> {
        Ok(self.sorted_matches(filter, order))
    }

    async fn update_one(&self, id: Uuid, patch: RecordPatch) -> Result<(), StorageError> {
        let mut records = self.records.write();
        let record = records
            .iter_mut()
            .find(|record| record.id == id)
            .ok_or_else(|| StorageError::Backend(format!("no record with id {id}")))?;
        if let Some(status) = patch.status {
            record.status = status;
        }
        if let Some(outcome) = patch.outcome {
            record.outcome = Some(outcome);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn record(username: &str) -> ResponseRecord {
        ResponseRecord::pending(
            username.to_string(),
            Gender::Female,
            AgeBracket::From18To29,
            vec!["نعم".to_string()],
        )
    }

    #[tokio::test]
    async fn insert_then_find_by_username() {
        let store = MemoryResponseStore::new();
        store.insert(record("sara")).await.unwrap();
        store.insert(record("omar")).await.unwrap();

        let filter = RecordFilter {
            username: Some("sara".to_string()),
        };
        let found = store
            .find_one(&filter, SortOrder::NewestFirst)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.username, "sara");
        assert_eq!(found.status, AnalysisStatus::Pending);
        assert!(found.outcome.is_none());
    }

    #[tokio::test]
    async fn newest_first_returns_latest_record() {
        let store = MemoryResponseStore::new();
        let mut older = record("sara");
        older.timestamp = Utc::now() - Duration::minutes(5);
        let newer = record("sara");
        let newer_id = newer.id;
        store.insert(older).await.unwrap();
        store.insert(newer).await.unwrap();

        let filter = RecordFilter {
            username: Some("sara".to_string()),
        };
        let found = store
            .find_one(&filter, SortOrder::NewestFirst)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.id, newer_id);

        let all = store.find(&filter, SortOrder::OldestFirst).await.unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all.last().map(|r| r.id), Some(newer_id));
    }

    #[tokio::test]
    async fn patch_marks_record_analyzed() {
        let store = MemoryResponseStore::new();
        let id = store.insert(record("sara")).await.unwrap();

        let outcome = StoredOutcome {
            label: "Depression".to_string(),
            depression_percent: 90.0,
            anxiety_percent: 20.0,
        };
        store
            .update_one(id, RecordPatch::analyzed(outcome.clone()))
            .await
            .unwrap();

        let found = store
            .find_one(&RecordFilter::default(), SortOrder::NewestFirst)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.status, AnalysisStatus::Analyzed);
        assert_eq!(found.outcome, Some(outcome));
    }

    #[tokio::test]
    async fn update_of_unknown_id_fails() {
        let store = MemoryResponseStore::new();
        let err = store
            .update_one(Uuid::new_v4(), RecordPatch::default())
            .await
            .unwrap_err();
        assert!(matches!(err, StorageError::Backend(_)));
    }
}
