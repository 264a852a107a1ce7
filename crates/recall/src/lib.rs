//! Recall - Personal Question Store and Quiz Generator
//!
//! Keeps every question a user asked alongside the explanation they got back,
//! and turns that history into short multiple-choice quizzes.

pub mod commands;
pub mod config;
pub mod error;
pub mod explain;
pub mod ids;
pub mod persistence;
pub mod question;
pub mod quiz;
pub mod session;
pub mod store;

pub use error::{ErrorKind, RecallError, Result};
pub use question::StoredQuestion;
pub use quiz::{QuizQuestion, QuizSynthesizer};
pub use store::QuestionStore;
