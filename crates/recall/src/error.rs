use thiserror::Error;

pub type Result<T> = std::result::Result<T, RecallError>;

/// Broad classes of failure, used by the CLI to decide how to talk to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
  Validation,
  Persistence,
  Service,
  Config,
}

#[derive(Error, Debug)]
pub enum RecallError {
  #[error("{field} must not be empty")]
  Validation { field: &'static str },

  #[error("Storage unavailable: {message}")]
  StorageUnavailable { message: String },

  #[error("Storage I/O failed: {0}")]
  Io(#[from] std::io::Error),

  #[error("Stored questions could not be decoded: {0}")]
  Corrupted(#[from] serde_json::Error),

  #[error("A question with id '{id}' already exists")]
  DuplicateId { id: String },

  #[error("Invalid storage key '{key}'")]
  InvalidKey { key: String },

  #[error("Explanation service request failed: {message}")]
  ServiceUnavailable { message: String },

  #[error("Explanation service returned an invalid response: {message}")]
  InvalidServiceResponse { message: String },

  #[error("Invalid configuration: {message}")]
  Config { message: String },
}

impl RecallError {
  pub fn validation(field: &'static str) -> Self {
    Self::Validation { field }
  }

  pub fn storage_unavailable(message: impl Into<String>) -> Self {
    Self::StorageUnavailable { message: message.into() }
  }

  pub fn duplicate_id(id: impl Into<String>) -> Self {
    Self::DuplicateId { id: id.into() }
  }

  pub fn invalid_key(key: impl Into<String>) -> Self {
    Self::InvalidKey { key: key.into() }
  }

  pub fn service_unavailable(message: impl Into<String>) -> Self {
    Self::ServiceUnavailable { message: message.into() }
  }

  pub fn invalid_service_response(message: impl Into<String>) -> Self {
    Self::InvalidServiceResponse { message: message.into() }
  }

  pub fn config(message: impl Into<String>) -> Self {
    Self::Config { message: message.into() }
  }

  pub fn kind(&self) -> ErrorKind {
    match self {
      Self::Validation { .. } => ErrorKind::Validation,
      Self::StorageUnavailable { .. }
      | Self::Io(_)
      | Self::Corrupted(_)
      | Self::DuplicateId { .. }
      | Self::InvalidKey { .. } => ErrorKind::Persistence,
      Self::ServiceUnavailable { .. } | Self::InvalidServiceResponse { .. } => ErrorKind::Service,
      Self::Config { .. } => ErrorKind::Config,
    }
  }
}

impl From<reqwest::Error> for RecallError {
  fn from(err: reqwest::Error) -> Self {
    if err.is_decode() {
      Self::invalid_service_response(err.to_string())
    } else {
      Self::service_unavailable(err.to_string())
    }
  }
}
