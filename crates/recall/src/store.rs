//! Append-only store of asked questions.
//!
//! The whole list lives as one JSON array under [`STORAGE_KEY`] in a
//! [`KeyValueStore`]. Every append rewrites the array, so a reader sees the
//! list either before or after a save, never half of one.

use chrono::Utc;
use std::sync::Mutex;

use crate::error::{RecallError, Result};
use crate::ids::{IdGenerator, UuidGenerator};
use crate::persistence::KeyValueStore;
use crate::question::StoredQuestion;

pub const STORAGE_KEY: &str = "asked_questions";

pub struct QuestionStore<S, I = UuidGenerator> {
  backend: S,
  ids: I,
  // Serializes read-modify-write cycles within this process
  guard: Mutex<()>,
}

impl<S: KeyValueStore> QuestionStore<S, UuidGenerator> {
  pub fn new(backend: S) -> Self {
    Self::with_id_generator(backend, UuidGenerator)
  }
}

impl<S: KeyValueStore, I: IdGenerator> QuestionStore<S, I> {
  pub fn with_id_generator(backend: S, ids: I) -> Self {
    Self { backend, ids, guard: Mutex::new(()) }
  }

  /// Record a question and its explanation.
  ///
  /// Surrounding whitespace is trimmed and blank input is rejected before the
  /// backend is touched. The record is persisted before this returns.
  pub fn append(&self, question: &str, explanation: &str) -> Result<StoredQuestion> {
    let question = question.trim();
    let explanation = explanation.trim();

    if question.is_empty() {
      return Err(RecallError::validation("question"));
    }
    if explanation.is_empty() {
      return Err(RecallError::validation("explanation"));
    }

    let _lock = self.guard.lock().unwrap_or_else(|e| e.into_inner());
    let mut records = self.load()?;

    let id = self.ids.next_id();
    if records.iter().any(|r| r.id == id) {
      return Err(RecallError::duplicate_id(id));
    }

    // Keep timestamps in insertion order even if the wall clock steps back
    let now = Utc::now();
    let timestamp = match records.last() {
      Some(last) if last.timestamp > now => last.timestamp,
      _ => now,
    };

    let record =
      StoredQuestion::new(id, question.to_string(), explanation.to_string(), timestamp);
    records.push(record.clone());

    let encoded = serde_json::to_string(&records)?;
    self.backend.set(STORAGE_KEY, &encoded)?;

    tracing::info!(id = %record.id, total = records.len(), "saved question");
    Ok(record)
  }

  /// Every stored question, oldest first
  pub fn all(&self) -> Result<Vec<StoredQuestion>> {
    let _lock = self.guard.lock().unwrap_or_else(|e| e.into_inner());
    self.load()
  }

  pub fn len(&self) -> Result<usize> {
    Ok(self.all()?.len())
  }

  pub fn is_empty(&self) -> Result<bool> {
    Ok(self.len()? == 0)
  }

  fn load(&self) -> Result<Vec<StoredQuestion>> {
    match self.backend.get(STORAGE_KEY)? {
      Some(raw) => {
        let records: Vec<StoredQuestion> = serde_json::from_str(&raw)?;
        tracing::debug!(count = records.len(), "loaded stored questions");
        Ok(records)
      }
      None => {
        tracing::debug!("no stored questions yet");
        Ok(Vec::new())
      }
    }
  }
}
