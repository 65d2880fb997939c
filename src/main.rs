// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use anyhow::Context;
use std::env;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use etl_pipeline::config::{load_config, EngineConfig};
use etl_pipeline::engine::{ExecutionStatus, SequentialExecutor};
use etl_pipeline::graph::{validate_pipeline, Pipeline};
use etl_pipeline::traits::PipelineExecutor;

const USAGE: &str = "Usage: etl-pipeline [--config <engine.yaml|engine.toml>] [--validate-only] <pipeline.json>";

/// Command line options
struct Options {
    config: Option<PathBuf>,
    validate_only: bool,
    pipeline: PathBuf,
}

fn parse_args(args: &[String]) -> Result<Options, String> {
    let mut config = None;
    let mut validate_only = false;
    let mut pipeline = None;

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--config" => {
                let path = iter.next().ok_or("--config requires a path")?;
                config = Some(PathBuf::from(path));
            }
            "--validate-only" => validate_only = true,
            "-h" | "--help" => return Err(USAGE.to_string()),
            other if other.starts_with("--") => return Err(format!("Unknown option: {}", other)),
            other => {
                if pipeline.replace(PathBuf::from(other)).is_some() {
                    return Err("Only one pipeline file may be given".to_string());
                }
            }
        }
    }

    Ok(Options {
        config,
        validate_only,
        pipeline: pipeline.ok_or("Missing pipeline file")?,
    })
}

fn init_tracing(config: &EngineConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.logging.filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(options: Options) -> anyhow::Result<ExitCode> {
    let config = match &options.config {
        Some(path) => load_config(path)?,
        None => EngineConfig::default(),
    };
    init_tracing(&config);

    let pipeline = Pipeline::load(&options.pipeline)?;

    let validation = validate_pipeline(&pipeline);
    for warning in &validation.warnings {
        eprintln!("⚠️  {}", warning);
    }
    if !validation.valid {
        for error in &validation.errors {
            eprintln!("❌ {}", error);
        }
        return Ok(ExitCode::FAILURE);
    }
    if options.validate_only {
        println!("{}", serde_json::to_string_pretty(&validation)?);
        return Ok(ExitCode::SUCCESS);
    }

    let executor = SequentialExecutor::new(config);
    let report = executor.execute(&pipeline).await;
    println!(
        "{}",
        serde_json::to_string_pretty(&report).context("Failed to render execution report")?
    );

    Ok(match report.status {
        ExecutionStatus::Success => ExitCode::SUCCESS,
        _ => ExitCode::FAILURE,
    })
}

#[tokio::main]
async fn main() -> ExitCode {
    let args: Vec<String> = env::args().skip(1).collect();
    let options = match parse_args(&args) {
        Ok(options) => options,
        Err(message) => {
            eprintln!("{}", message);
            eprintln!("{}", USAGE);
            return ExitCode::from(2);
        }
    };

    match run(options).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("❌ {:#}", e);
            ExitCode::FAILURE
        }
    }
}
