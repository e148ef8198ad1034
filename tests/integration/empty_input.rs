use predicates::prelude::*;

#[test]
fn empty_file_prints_message_and_help() {
  let empty = test_support::fixtures_dir().join("empty.diff");

  test_support::cmd_bin("diff2html")
    .args(["-i", "file", "-o", "stdout", "--"])
    .arg(&empty)
    .assert()
    .failure()
    .stdout(predicate::str::is_empty())
    .stderr(predicate::str::contains("The input is empty. Try again."))
    .stderr(predicate::str::contains("Usage"));
}

#[test]
fn file_mode_without_path_is_empty_input() {
  test_support::cmd_bin("diff2html")
    .args(["-i", "file", "-o", "stdout"])
    .assert()
    .failure()
    .stderr(predicate::str::contains("The input is empty. Try again."));
}

#[test]
fn missing_file_shows_cause_then_empty_message() {
  test_support::cmd_bin("diff2html")
    .args(["-i", "file", "-o", "stdout", "--", "/definitely/not/here.diff"])
    .assert()
    .failure()
    .stderr(predicate::str::contains("/definitely/not/here.diff"))
    .stderr(predicate::str::contains("The input is empty. Try again."));
}

#[test]
fn empty_input_never_uploads() {
  // No listener on this port; an attempted upload would surface a transport error.
  let empty = test_support::fixtures_dir().join("empty.diff");

  test_support::cmd_bin("diff2html")
    .args(["-u", "print", "--upload-url", "http://127.0.0.1:9/api/new", "-i", "file", "--"])
    .arg(&empty)
    .assert()
    .failure()
    .stderr(predicate::str::contains("The input is empty. Try again."))
    .stderr(predicate::str::contains("upload to").not());
}

#[test]
fn whitespace_only_file_is_not_empty_input() {
  let ws = test_support::fixtures_dir().join("whitespace.diff");

  test_support::cmd_bin("diff2html")
    .args(["-i", "file", "-f", "json", "-o", "stdout", "--"])
    .arg(&ws)
    .assert()
    .success()
    .stdout("[]\n");
}
