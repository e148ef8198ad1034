use serial_test::serial;

#[test]
#[serial]
fn default_command_diffs_against_previous_commit() {
  let repo = test_support::init_fixture_repo();

  let out = test_support::cmd_bin("diff2html")
    .args(["-f", "json", "-o", "stdout", "--repo"])
    .arg(repo.path())
    .output()
    .unwrap();

  assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));
  let v: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
  let files = v.as_array().unwrap();
  assert_eq!(files.len(), 1);
  assert_eq!(files[0]["newName"], "hello.txt");
  assert_eq!(files[0]["isGitDiff"], true);
}

#[test]
#[serial]
fn trailing_args_reach_git_diff() {
  let repo = test_support::init_fixture_repo();
  std::fs::write(repo.path().join("notes.md"), "draft\n").unwrap();
  test_support::run(repo.path(), &["add", "notes.md"]);

  let out = test_support::cmd_bin("diff2html")
    .args(["-f", "json", "-o", "stdout", "--repo"])
    .arg(repo.path())
    .args(["--", "--cached"])
    .output()
    .unwrap();

  assert!(out.status.success());
  let v: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
  let files = v.as_array().unwrap();
  assert_eq!(files.len(), 1);
  assert_eq!(files[0]["newName"], "notes.md");
  assert_eq!(files[0]["isNew"], true);
}

#[test]
#[serial]
fn line_html_marks_changed_word() {
  let repo = test_support::init_fixture_repo();

  let out = test_support::cmd_bin("diff2html")
    .args(["-o", "stdout", "--repo"])
    .arg(repo.path())
    .args(["--", "-M", "HEAD~1"])
    .output()
    .unwrap();

  assert!(out.status.success());
  let page = String::from_utf8_lossy(&out.stdout);
  assert!(page.contains("<style>"));
  assert!(page.contains("hello.txt"));
  assert!(page.contains("<ins>rust</ins>"));
  assert!(page.contains("<del>world</del>"));
}

#[test]
#[serial]
fn git_failure_is_reported_as_empty_input() {
  let not_a_repo = test_support::tempdir();

  let out = test_support::cmd_bin("diff2html")
    .args(["-o", "stdout", "--repo"])
    .arg(not_a_repo.path())
    .output()
    .unwrap();

  assert!(!out.status.success());
  assert!(out.stdout.is_empty());
  let stderr = String::from_utf8_lossy(&out.stderr);
  assert!(stderr.contains("git diff"));
  assert!(stderr.contains("The input is empty. Try again."));
}
