use assert_cmd::Command;
use predicates::prelude::*;
use predicates::str::contains;
use recall::QuizQuestion;

/// Helper to create a Command for the `recall` binary with a temporary data root.
fn recall_cmd(home: &assert_fs::TempDir) -> Command {
  let mut cmd = Command::cargo_bin("recall").expect("binary exists");
  cmd.env("RECALL_HOME", home.path());
  cmd.env_remove("RECALL_CONFIG");
  cmd.env_remove("RECALL_SERVICE_URL");
  cmd.env_remove("RUST_LOG");
  cmd.env("NO_COLOR", "1");
  cmd
}

fn ask(home: &assert_fs::TempDir, question: &str, explanation: &str) {
  recall_cmd(home)
    .args(["ask", question, "--explanation", explanation])
    .assert()
    .success()
    .stdout(contains("Saved question"));
}

#[test]
fn test_ask_then_list() {
  let home = assert_fs::TempDir::new().unwrap();

  ask(&home, "What is TCP?", "TCP is a reliable transport protocol.");
  ask(&home, "What is UDP?", "UDP is a connectionless transport protocol.");

  recall_cmd(&home)
    .args(["list"])
    .assert()
    .success()
    .stdout(contains("1. ").and(contains("What is TCP?")).and(contains("What is UDP?")));

  recall_cmd(&home)
    .args(["list", "--verbose"])
    .assert()
    .success()
    .stdout(contains("UDP is a connectionless transport protocol."));

  home.close().unwrap();
}

#[test]
fn test_quiz_json_output() {
  let home = assert_fs::TempDir::new().unwrap();

  ask(&home, "What is TCP?", "TCP is a reliable transport protocol.");
  ask(&home, "What is UDP?", "UDP is a connectionless transport protocol.");

  let output = recall_cmd(&home).args(["quiz", "--json"]).output().unwrap();
  assert!(output.status.success());

  let quiz: Vec<QuizQuestion> = serde_json::from_slice(&output.stdout).unwrap();
  assert_eq!(quiz.len(), 2);
  assert_eq!(quiz[0].id, 1);
  assert_eq!(quiz[0].options[quiz[0].correct_answer], "TCP is a reliable transport protocol.");
  assert!(quiz[0].options.contains(&"UDP is a connectionless transport protocol.".to_string()));

  home.close().unwrap();
}

#[test]
fn test_empty_store_has_no_quiz() {
  let home = assert_fs::TempDir::new().unwrap();

  recall_cmd(&home)
    .args(["quiz"])
    .assert()
    .success()
    .stdout(contains("No quiz available yet"));

  recall_cmd(&home).args(["quiz", "--json"]).assert().success().stdout(contains("[]"));

  recall_cmd(&home).args(["list"]).assert().success().stdout(contains("No questions asked yet"));

  home.close().unwrap();
}

#[test]
fn test_blank_question_is_rejected() {
  let home = assert_fs::TempDir::new().unwrap();

  recall_cmd(&home)
    .args(["ask", "   ", "--explanation", "Something"])
    .assert()
    .failure()
    .stderr(contains("question must not be empty"));

  recall_cmd(&home)
    .args(["ask", "What is TCP?", "--explanation", ""])
    .assert()
    .failure()
    .stderr(contains("explanation must not be empty"));

  recall_cmd(&home).args(["list"]).assert().success().stdout(contains("No questions asked yet"));

  home.close().unwrap();
}

#[test]
fn test_unreachable_service_saves_nothing() {
  let home = assert_fs::TempDir::new().unwrap();

  recall_cmd(&home)
    .env("RECALL_SERVICE_URL", "http://127.0.0.1:9")
    .args(["ask", "What is TCP?"])
    .assert()
    .failure()
    .stderr(contains("Could not get an explanation"));

  recall_cmd(&home).args(["stats"]).assert().success().stdout(contains("Questions asked: "));
  recall_cmd(&home).args(["list"]).assert().success().stdout(contains("No questions asked yet"));

  home.close().unwrap();
}

#[test]
fn test_play_scores_answers_from_stdin() {
  let home = assert_fs::TempDir::new().unwrap();

  ask(&home, "What is DNS?", "DNS maps names to addresses.");

  // One answer finishes a single-question quiz
  recall_cmd(&home)
    .args(["play"])
    .write_stdin("1\n")
    .assert()
    .success()
    .stdout(contains("Question 1 of 1").and(contains("Score: ")));

  home.close().unwrap();
}

#[test]
fn test_quiz_with_answers_marks_correct_option() {
  let home = assert_fs::TempDir::new().unwrap();

  ask(&home, "What is DNS?", "DNS maps names to addresses.");

  recall_cmd(&home)
    .args(["quiz", "--answers"])
    .assert()
    .success()
    .stdout(predicate::str::is_match(r"\*\d\) DNS maps names to addresses\.").unwrap());

  home.close().unwrap();
}

#[test]
fn test_stats_counts_questions() {
  let home = assert_fs::TempDir::new().unwrap();

  for n in 1..=7 {
    ask(&home, &format!("Question {n}"), &format!("Explanation {n}"));
  }

  recall_cmd(&home)
    .args(["stats"])
    .assert()
    .success()
    .stdout(contains("Questions asked: ").and(contains("Quiz questions:  5")));

  home.close().unwrap();
}
