use anyhow::{Context, Result};
use colored::*;
use std::io::{BufRead, Write};

use crate::config::Config;
use crate::error::RecallError;
use crate::explain::ExplanationClient;
use crate::ids::IdGenerator;
use crate::persistence::{FileStore, KeyValueStore};
use crate::question::StoredQuestion;
use crate::quiz::{QuizQuestion, QuizSynthesizer};
use crate::session::Scorecard;
use crate::store::QuestionStore;

/// Open the file-backed store in the configured data directory
pub fn open_store(config: &Config) -> Result<QuestionStore<FileStore>> {
  let dir = config.data_dir()?;
  tracing::debug!("using data directory {}", dir.display());
  Ok(QuestionStore::new(FileStore::new(dir)))
}

/// Save a question, fetching its explanation from the service unless one is given
pub async fn ask_question<S: KeyValueStore, I: IdGenerator>(
  store: &QuestionStore<S, I>,
  client: Option<&ExplanationClient>,
  question: &str,
  explanation: Option<&str>,
) -> Result<StoredQuestion> {
  if question.trim().is_empty() {
    return Err(RecallError::validation("question").into());
  }

  let explanation = match (explanation, client) {
    (Some(text), _) => text.to_string(),
    (None, Some(client)) => {
      let answer = client
        .explain(question)
        .await
        .with_context(|| format!("Could not get an explanation from {}", client.base_url()))?;
      answer.explanation
    }
    (None, None) => return Err(RecallError::validation("explanation").into()),
  };

  let record = store.append(question, &explanation).context("Question was not saved")?;

  println!("{}\n", record.explanation);
  println!("{} Saved question {}", "✓".green(), record.question.cyan());
  Ok(record)
}

/// List stored questions, oldest first
pub fn list_questions<S: KeyValueStore, I: IdGenerator>(
  store: &QuestionStore<S, I>,
  verbose: bool,
) -> Result<()> {
  let records = store.all()?;

  if records.is_empty() {
    println!("No questions asked yet");
    return Ok(());
  }

  for (index, record) in records.iter().enumerate() {
    if verbose {
      println!(
        "{}. {} ({})",
        index + 1,
        record.question.cyan(),
        record.timestamp.format("%Y-%m-%d %H:%M").to_string().dimmed()
      );
      println!("   {}", record.explanation.trim().replace('\n', "\n   "));
    } else {
      println!("{}. {}", index + 1, record.question.cyan());
    }
  }

  Ok(())
}

pub fn show_stats<S: KeyValueStore, I: IdGenerator>(store: &QuestionStore<S, I>) -> Result<()> {
  let records = store.all()?;

  println!("Questions asked: {}", records.len().to_string().green());
  if let (Some(first), Some(last)) = (records.first(), records.last()) {
    println!("First asked:     {}", first.timestamp.format("%Y-%m-%d %H:%M"));
    println!("Last asked:      {}", last.timestamp.format("%Y-%m-%d %H:%M"));
  }
  let quiz_size = records.len().min(crate::quiz::MAX_QUIZ_QUESTIONS);
  println!("Quiz questions:  {quiz_size}");

  Ok(())
}

fn print_empty_quiz_hint() {
  println!("No quiz available yet. Ask some questions first with {}", "recall ask".yellow());
}

/// Print a freshly generated quiz, as JSON or for reading
pub fn print_quiz<S: KeyValueStore, I: IdGenerator>(
  store: &QuestionStore<S, I>,
  json: bool,
  show_answers: bool,
) -> Result<()> {
  let quiz = QuizSynthesizer::new(store).generate_quiz()?;

  if json {
    println!("{}", serde_json::to_string_pretty(&quiz)?);
    return Ok(());
  }

  if quiz.is_empty() {
    print_empty_quiz_hint();
    return Ok(());
  }

  for question in &quiz {
    println!("{} {}", format!("Q{}.", question.id).bold(), question.question);
    for (index, option) in question.options.iter().enumerate() {
      let marker = if show_answers && question.is_correct(index) { "*" } else { " " };
      println!("  {marker}{}) {option}", index + 1);
    }
    println!();
  }

  Ok(())
}

fn write_question<W: Write>(output: &mut W, question: &QuizQuestion, total: usize) -> Result<()> {
  writeln!(output, "Question {} of {}", question.id, total)?;
  writeln!(output, "{}", question.question)?;
  for (index, option) in question.options.iter().enumerate() {
    writeln!(output, "  {}) {option}", index + 1)?;
  }
  write!(output, "Your answer [1-{}]: ", question.options.len())?;
  output.flush()?;
  Ok(())
}

/// Read a 1-based option number, re-prompting on junk. `None` on end of input.
fn read_choice<R: BufRead, W: Write>(
  input: &mut R,
  output: &mut W,
  option_count: usize,
) -> Result<Option<usize>> {
  loop {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
      return Ok(None);
    }

    match line.trim().parse::<usize>() {
      Ok(n) if (1..=option_count).contains(&n) => return Ok(Some(n - 1)),
      _ => {
        write!(output, "Please enter a number from 1 to {option_count}: ")?;
        output.flush()?;
      }
    }
  }
}

/// Run an interactive quiz, scoring answers locally
pub fn play_quiz<S, I, R, W>(
  store: &QuestionStore<S, I>,
  input: &mut R,
  output: &mut W,
) -> Result<Scorecard>
where
  S: KeyValueStore,
  I: IdGenerator,
  R: BufRead,
  W: Write,
{
  let quiz = QuizSynthesizer::new(store).generate_quiz()?;
  run_quiz(&quiz, input, output)
}

pub fn run_quiz<R: BufRead, W: Write>(
  quiz: &[QuizQuestion],
  input: &mut R,
  output: &mut W,
) -> Result<Scorecard> {
  let mut card = Scorecard::for_quiz(quiz);

  if quiz.is_empty() {
    writeln!(output, "No quiz available yet. Ask some questions first with `recall ask`.")?;
    return Ok(card);
  }

  for question in quiz {
    write_question(output, question, quiz.len())?;

    let Some(choice) = read_choice(input, output, question.options.len())? else {
      writeln!(output)?;
      writeln!(output, "Quiz ended early.")?;
      break;
    };

    if card.record(question, choice) {
      writeln!(output, "Correct!")?;
    } else {
      writeln!(output, "Incorrect. The correct answer was: {}", question.correct_option())?;
    }
    writeln!(output)?;
  }

  writeln!(output, "Score: {}/{} ({}%)", card.correct(), card.total(), card.percentage())?;
  writeln!(output, "{}", card.feedback())?;
  Ok(card)
}

pub async fn check_service(client: &ExplanationClient) -> Result<()> {
  let health = client
    .health()
    .await
    .with_context(|| format!("Explanation service at {} is unreachable", client.base_url()))?;

  println!("{} Explanation service at {} is {}", "✓".green(), client.base_url(), health.status.cyan());
  if !health.api_key_configured {
    println!("{} The service reports no API key configured", "!".yellow());
  }
  Ok(())
}
