use predicates::prelude::*;
use serial_test::serial;
use test_support::DiffyMock;

fn sample() -> std::path::PathBuf {
  test_support::fixtures_dir().join("sample.diff")
}

#[test]
#[serial]
fn print_target_prints_link() {
  let diffy = DiffyMock::start(200, r#"{"status":"ok","url":"https://diffy.org/diff/abc123"}"#);

  test_support::cmd_bin("diff2html")
    .args(["-u", "print", "--upload-url", &diffy.url(), "-i", "file", "--"])
    .arg(sample())
    .assert()
    .success()
    .stdout("Link powered by diffy.org:\nhttps://diffy.org/diff/abc123\n");

  assert_eq!(diffy.upload_count(), 1);
  let bodies = diffy.received_bodies();
  assert!(bodies[0].starts_with("udiff="));
  assert!(bodies[0].contains("sample.txt"));
}

#[test]
#[serial]
fn upload_skips_rendering_and_local_output() {
  let diffy = DiffyMock::start(200, r#"{"status":"ok","url":"https://diffy.org/diff/x"}"#);
  let td = test_support::tempdir();
  let target = td.path().join("never.html");

  test_support::cmd_bin("diff2html")
    .args(["-u", "print", "--upload-url", &diffy.url(), "-i", "file", "-F"])
    .arg(&target)
    .arg("--")
    .arg(sample())
    .assert()
    .success()
    .stdout(predicate::str::contains("<html").not());

  assert_eq!(diffy.upload_count(), 1);
  assert!(!target.exists());
}

#[test]
#[serial]
fn server_error_prints_message_and_exits_zero() {
  let diffy = DiffyMock::start(400, r#"{"status":"error","message":"diff too large"}"#);

  test_support::cmd_bin("diff2html")
    .args(["-u", "browser", "--upload-url", &diffy.url(), "-i", "file", "--"])
    .arg(sample())
    .assert()
    .success()
    .stdout(predicate::str::is_empty())
    .stderr(predicate::str::contains("Error: diff too large"));

  assert_eq!(diffy.upload_count(), 1);
}

#[test]
#[serial]
fn malformed_response_is_reported() {
  let diffy = DiffyMock::start(502, "<html>bad gateway</html>");

  test_support::cmd_bin("diff2html")
    .args(["-u", "print", "--upload-url", &diffy.url(), "-i", "file", "--"])
    .arg(sample())
    .assert()
    .success()
    .stdout(predicate::str::is_empty())
    .stderr(predicate::str::contains("could not parse response"));

  assert_eq!(diffy.upload_count(), 1);
}

#[test]
#[serial]
fn unreachable_service_is_transport_error() {
  test_support::cmd_bin("diff2html")
    .args(["-u", "print", "--upload-url", "http://127.0.0.1:9/api/new", "-i", "file", "--"])
    .arg(sample())
    .assert()
    .success()
    .stdout(predicate::str::is_empty())
    .stderr(predicate::str::contains("upload to http://127.0.0.1:9/api/new failed"));
}

#[cfg(unix)]
#[test]
#[serial]
fn pbcopy_target_pipes_link_to_clipboard_command() {
  let diffy = DiffyMock::start(200, r#"{"status":"ok","url":"https://diffy.org/diff/clip"}"#);
  let td = test_support::tempdir();
  let clip = td.path().join("clipboard.txt");

  test_support::cmd_bin("diff2html")
    .env("DIFF2HTML_CLIPBOARD", format!("sh -c 'cat > {}'", clip.display()))
    .args(["-u", "pbcopy", "--upload-url", &diffy.url(), "-i", "file", "--"])
    .arg(sample())
    .assert()
    .success()
    .stdout(predicate::str::contains("https://diffy.org/diff/clip"));

  assert_eq!(std::fs::read_to_string(&clip).unwrap(), "https://diffy.org/diff/clip");
}
