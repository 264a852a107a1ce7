//! Local scoring for a quiz run. Nothing here touches the store.

use crate::quiz::QuizQuestion;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Scorecard {
  total: usize,
  answered: usize,
  correct: usize,
}

impl Scorecard {
  pub fn new(total: usize) -> Self {
    Self { total, ..Self::default() }
  }

  pub fn for_quiz(quiz: &[QuizQuestion]) -> Self {
    Self::new(quiz.len())
  }

  /// Record the option the user picked, returning whether it was right
  pub fn record(&mut self, question: &QuizQuestion, choice: usize) -> bool {
    let correct = question.is_correct(choice);
    self.answered += 1;
    if correct {
      self.correct += 1;
    }
    correct
  }

  pub fn total(&self) -> usize {
    self.total
  }

  pub fn answered(&self) -> usize {
    self.answered
  }

  pub fn correct(&self) -> usize {
    self.correct
  }

  pub fn is_complete(&self) -> bool {
    self.answered >= self.total
  }

  /// Share of the quiz answered correctly, rounded to a whole percent
  pub fn percentage(&self) -> u32 {
    if self.total == 0 {
      return 0;
    }
    ((self.correct as f64 / self.total as f64) * 100.0).round() as u32
  }

  pub fn feedback(&self) -> &'static str {
    match self.percentage() {
      p if p >= 90 => "Amazing! You're a genius!",
      p if p >= 70 => "Great job! Almost perfect!",
      p if p >= 50 => "Good effort! Keep learning!",
      p if p >= 30 => "Nice try! Review and try again!",
      _ => "Don't give up! Time to study more!",
    }
  }
}
