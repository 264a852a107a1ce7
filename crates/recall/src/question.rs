use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A question the user asked, paired with the explanation they received
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredQuestion {
  pub id: String,
  pub question: String,
  pub explanation: String,
  pub timestamp: DateTime<Utc>,
}

impl StoredQuestion {
  pub fn new(id: String, question: String, explanation: String, timestamp: DateTime<Utc>) -> Self {
    Self { id, question, explanation, timestamp }
  }
}
