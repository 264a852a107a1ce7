//! Multiple-choice quizzes derived from stored questions.
//!
//! Each quiz question offers the stored explanation as the right answer and
//! the explanations of other stored questions as distractors. When the store
//! is too small to supply three distractors, numbered placeholders fill the
//! gap so every question still has four options.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::ids::IdGenerator;
use crate::persistence::KeyValueStore;
use crate::question::StoredQuestion;
use crate::store::QuestionStore;

/// Most questions drawn into a single quiz
pub const MAX_QUIZ_QUESTIONS: usize = 5;

pub const DISTRACTORS_PER_QUESTION: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizQuestion {
  /// 1-based position within the quiz
  pub id: usize,
  pub question: String,
  pub options: Vec<String>,
  /// Index into `options` of the stored explanation
  pub correct_answer: usize,
}

impl QuizQuestion {
  pub fn correct_option(&self) -> &str {
    self.options.get(self.correct_answer).map(String::as_str).unwrap_or_default()
  }

  pub fn is_correct(&self, choice: usize) -> bool {
    choice == self.correct_answer
  }
}

pub fn question_prompt(question: &str) -> String {
  format!("What is the correct explanation for: {question}?")
}

pub fn placeholder_distractor(position: usize) -> String {
  format!("Incorrect explanation {position}")
}

/// Build a quiz from `records`, taking at most the first [`MAX_QUIZ_QUESTIONS`].
///
/// Option order comes from `rng`; pass a seeded generator for reproducible output.
pub fn synthesize<R: Rng + ?Sized>(records: &[StoredQuestion], rng: &mut R) -> Vec<QuizQuestion> {
  records
    .iter()
    .take(MAX_QUIZ_QUESTIONS)
    .enumerate()
    .map(|(index, source)| build_question(index, source, records, rng))
    .collect()
}

fn build_question<R: Rng + ?Sized>(
  index: usize,
  source: &StoredQuestion,
  records: &[StoredQuestion],
  rng: &mut R,
) -> QuizQuestion {
  let mut options = Vec::with_capacity(DISTRACTORS_PER_QUESTION + 1);
  options.push(source.explanation.clone());
  options.extend(distractors_for(source, records));

  options.shuffle(rng);

  // First match wins if a placeholder happens to equal the explanation
  let correct_answer = options.iter().position(|o| *o == source.explanation).unwrap_or(0);

  QuizQuestion { id: index + 1, question: question_prompt(&source.question), options, correct_answer }
}

/// Explanations of other records in store order, padded with placeholders to
/// exactly [`DISTRACTORS_PER_QUESTION`]
fn distractors_for(source: &StoredQuestion, records: &[StoredQuestion]) -> Vec<String> {
  let mut distractors: Vec<String> = Vec::with_capacity(DISTRACTORS_PER_QUESTION);

  for other in records {
    if distractors.len() == DISTRACTORS_PER_QUESTION {
      break;
    }
    if other.id == source.id
      || other.explanation == source.explanation
      || distractors.contains(&other.explanation)
    {
      continue;
    }
    distractors.push(other.explanation.clone());
  }

  // Numbering skips any placeholder text a real distractor already uses
  let mut position = distractors.len() + 1;
  while distractors.len() < DISTRACTORS_PER_QUESTION {
    let placeholder = placeholder_distractor(position);
    position += 1;
    if !distractors.contains(&placeholder) {
      distractors.push(placeholder);
    }
  }

  distractors
}

/// Reads a [`QuestionStore`] and turns its contents into quizzes
pub struct QuizSynthesizer<'a, S, I> {
  store: &'a QuestionStore<S, I>,
}

impl<'a, S: KeyValueStore, I: IdGenerator> QuizSynthesizer<'a, S, I> {
  pub fn new(store: &'a QuestionStore<S, I>) -> Self {
    Self { store }
  }

  /// A fresh quiz with randomly ordered options. Empty when nothing is stored.
  pub fn generate_quiz(&self) -> Result<Vec<QuizQuestion>> {
    self.generate_quiz_with(&mut rand::thread_rng())
  }

  pub fn generate_quiz_with<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Vec<QuizQuestion>> {
    let records = self.store.all()?;
    let quiz = synthesize(&records, rng);
    tracing::debug!(stored = records.len(), questions = quiz.len(), "generated quiz");
    Ok(quiz)
  }
}
