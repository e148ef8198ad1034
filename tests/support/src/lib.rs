//! test-support: helpers for robust, nextest-friendly diff2html tests.
//!
//! Add as a dev-dependency in your top-level `Cargo.toml`:
//!
//! ```toml
//! [dev-dependencies]
//! test_support = { path = "tests/support", features = ["tokio"] }
//! ```
//!
//! Then in tests:
//! ```rust
//! use test_support::{init_tracing, fixtures_dir};
//!
//! #[test]
//! fn example() {
//!   init_tracing();
//!   let _root = fixtures_dir();
//! }
//! ```

use once_cell::sync::Lazy;
use tracing_subscriber::{fmt, EnvFilter};

use std::path::{Path, PathBuf};
use std::process::Command;

/// Initialize `tracing` once, honoring `RUST_LOG` and writing via the test writer.
///
/// Safe to call from multiple tests; only the first call configures the global subscriber.
pub fn init_tracing() {
  static INIT: Lazy<()> = Lazy::new(|| {
    let filter = EnvFilter::try_from_default_env()
      .or_else(|_| EnvFilter::try_new("warn,test=info"))
      .unwrap();
    let _ = fmt().with_env_filter(filter).with_test_writer().try_init();
  });
  Lazy::force(&INIT);
}

/// Return the path to the repository's `tests/fixtures` directory.
pub fn fixtures_dir() -> PathBuf {
  PathBuf::from(env!("CARGO_MANIFEST_DIR"))
    .parent()
    .map(Path::to_path_buf)
    .unwrap_or_default()
    .join("fixtures")
}

/// Create a temp directory that deletes on drop.
pub fn tempdir() -> tempfile::TempDir {
  tempfile::tempdir().expect("create tempdir")
}

/// Run a binary target with `assert_cmd`, returning the ready-to-run `Command`.
///
/// Viewer and clipboard commands default to `true` so no test ever pops a window;
/// call `.env(...)` afterwards to override.
pub fn cmd_bin(bin: &str) -> assert_cmd::Command {
  init_tracing();
  let mut cmd = assert_cmd::Command::cargo_bin(bin).expect("binary target not found");
  cmd.env("DIFF2HTML_OPENER", "true").env("DIFF2HTML_CLIPBOARD", "true").env_remove("RUST_LOG");
  cmd
}

pub fn run(repo: &Path, args: &[&str]) {
  let status = Command::new("git").args(args).current_dir(repo).status().unwrap();
  assert!(status.success(), "git {:?} failed", args);
}

fn commit(repo: &Path, message: &str, date: &str) {
  let status = Command::new("git")
    .args(["commit", "-q", "-m", message])
    .current_dir(repo)
    .env("GIT_AUTHOR_DATE", date)
    .env("GIT_COMMITTER_DATE", date)
    .status()
    .unwrap();
  assert!(status.success());
}

/// Two-commit repo: HEAD changes `hello.txt` from "hello world" to "hello rust".
pub fn init_fixture_repo() -> tempfile::TempDir {
  let dir = tempdir();

  run(dir.path(), &["init", "-q", "-b", "main"]);
  run(dir.path(), &["config", "user.name", "Fixture Bot"]);
  run(dir.path(), &["config", "user.email", "fixture@example.com"]);
  run(dir.path(), &["config", "commit.gpgsign", "false"]);

  std::fs::write(dir.path().join("hello.txt"), "hello world\n").unwrap();
  run(dir.path(), &["add", "."]);
  commit(dir.path(), "feat: add greeting", "2025-08-12T14:03:00");

  std::fs::write(dir.path().join("hello.txt"), "hello rust\n").unwrap();
  run(dir.path(), &["add", "."]);
  commit(dir.path(), "chore: greet rust", "2025-08-13T09:12:00");

  dir
}

// --- Optional paste-service mock (feature = "tokio") ---

#[cfg(feature = "tokio")]
pub use diffy::DiffyMock;

#[cfg(feature = "tokio")]
mod diffy {
  use wiremock::matchers::{header_regex, method, path};
  use wiremock::{Mock, MockServer, ResponseTemplate};

  pub const UPLOAD_PATH: &str = "/api/new";

  /// Stand-in for the paste service: answers form POSTs on `/api/new` with a fixed
  /// status and body. Anything else gets wiremock's default 404.
  ///
  /// The binary under test is synchronous, so the mock owns its own runtime and
  /// exposes blocking accessors.
  pub struct DiffyMock {
    runtime: tokio::runtime::Runtime,
    server: MockServer,
  }

  impl DiffyMock {
    pub fn start(status: u16, body: &str) -> Self {
      let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(1)
        .enable_all()
        .build()
        .expect("tokio runtime");

      let server = runtime.block_on(async {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
          .and(path(UPLOAD_PATH))
          .and(header_regex("content-type", "^application/x-www-form-urlencoded"))
          .respond_with(ResponseTemplate::new(status).set_body_raw(body.to_string(), "application/json"))
          .mount(&server)
          .await;
        server
      });

      Self { runtime, server }
    }

    /// Endpoint to pass as `--upload-url`.
    pub fn url(&self) -> String {
      format!("{}{}", self.server.uri(), UPLOAD_PATH)
    }

    /// Bodies of every request the mock received, in arrival order.
    pub fn received_bodies(&self) -> Vec<String> {
      self
        .runtime
        .block_on(self.server.received_requests())
        .unwrap_or_default()
        .into_iter()
        .map(|req| String::from_utf8_lossy(&req.body).into_owned())
        .collect()
    }

    /// Requests that hit the upload route with the expected method and path.
    pub fn upload_count(&self) -> usize {
      self
        .runtime
        .block_on(self.server.received_requests())
        .unwrap_or_default()
        .iter()
        .filter(|req| req.method.as_str() == "POST" && req.url.path() == UPLOAD_PATH)
        .count()
    }
  }
}
