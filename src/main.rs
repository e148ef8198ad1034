use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Result;
use clap::{CommandFactory, Parser};
use tracing_subscriber::EnvFilter;

mod cli;
mod engine;
mod error;
mod input;
mod model;
mod output;
mod pipeline;
mod render;
mod upload;
mod util;

use crate::cli::{normalize, Cli};
use crate::engine::BuiltinEngine;
use crate::error::PipelineError;
use crate::pipeline::{Completion, Pipeline};
use crate::upload::{HttpUploadApi, UploadOutcome};
use crate::util::SystemRunner;

fn init_tracing(verbose: u8) {
  let fallback = match verbose {
    0 => "warn",
    1 => "debug",
    _ => "trace",
  };
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
  let _ = tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).try_init();
}

fn run(cli: Cli) -> Result<ExitCode> {
  // Phase 1: normalize CLI
  let cfg = normalize(cli)?;
  tracing::debug!(config = %serde_json::to_string(&cfg)?, "effective config");

  // Phase 2: run the pipeline
  let runner = Arc::new(SystemRunner);
  let api = Arc::new(HttpUploadApi::new(cfg.upload_url.clone()));
  let engine = BuiltinEngine;
  let mut pipeline = Pipeline::new(&cfg, runner, &engine, api);

  let completion = pipeline.run(&mut std::io::stdout(), &mut std::io::stderr());
  tracing::debug!(stage = ?pipeline.stage(), "pipeline finished");
  match completion {
    Ok(Completion::Delivered(dest)) => {
      tracing::debug!(?dest, "delivered");
      Ok(ExitCode::SUCCESS)
    }
    // Phase 3: the process stays up until the upload and its follow-up finish
    Ok(Completion::Uploading(handle)) => {
      match handle.wait() {
        UploadOutcome::Linked { url } => tracing::debug!(%url, "upload linked"),
        UploadOutcome::Rejected { message } => tracing::debug!(%message, "upload rejected"),
        UploadOutcome::Failed(e) => tracing::debug!(error = %e, "upload failed"),
      }
      Ok(ExitCode::SUCCESS)
    }
    Err(PipelineError::EmptyInput) => {
      eprintln!("{}", PipelineError::EmptyInput);
      eprintln!();
      let _ = Cli::command().write_help(&mut std::io::stderr());
      Ok(ExitCode::FAILURE)
    }
    Err(e) => Err(e.into()),
  }
}

fn main() -> ExitCode {
  let cli = Cli::parse();

  if cli.gen_man {
    return match util::render_man_page::<Cli>() {
      Ok(page) => {
        print!("{}", page);
        ExitCode::SUCCESS
      }
      Err(e) => {
        eprintln!("Error: {}", e);
        ExitCode::FAILURE
      }
    };
  }

  init_tracing(cli.verbose);

  match run(cli) {
    Ok(code) => code,
    Err(e) => {
      eprintln!("Error: {}", e);
      ExitCode::FAILURE
    }
  }
}
