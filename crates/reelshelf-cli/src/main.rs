// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

mod config;
mod logging;
mod runtime;

use anyhow::{Context, Result};
use config::Config;
use reelshelf_app::{AppState, MovieStore};
use reelshelf_client::Client;
use runtime::{DemoRuntime, HttpRuntime};
use std::env;
use std::path::PathBuf;

const DEMO_SEED: u64 = 1977;

fn main() {
    if let Err(error) = run() {
        eprintln!("{error:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let options = parse_cli_args(env::args().skip(1), Config::default_path()?)?;
    if options.show_help {
        print_help();
        return Ok(());
    }

    if options.print_config_path {
        println!("{}", options.config_path.display());
        return Ok(());
    }

    if options.print_example {
        print!("{}", Config::example_config(&options.config_path));
        return Ok(());
    }

    let config = Config::load(&options.config_path).with_context(|| {
        format!(
            "load config {}; run `reelshelf --print-example-config` to generate a v1 template",
            options.config_path.display()
        )
    })?;

    let log_path = config.log_path()?;
    logging::init(&log_path, config.log_level())
        .with_context(|| format!("start logging to {}", log_path.display()))?;
    tracing::info!(
        config = %options.config_path.display(),
        demo = options.demo,
        "starting reelshelf"
    );

    let policy = config.batch_policy();
    let mut state = AppState::default();

    if options.demo {
        let mut runtime = DemoRuntime::new(DEMO_SEED)?;
        let store = MovieStore::load(&runtime).context("load demo library")?;
        if options.check_only {
            println!("demo library: {} movies", store.len());
            return Ok(());
        }
        let (mut controller, outbox) = reelshelf_tui::movie_controller(store, policy);
        return reelshelf_tui::run_app(&mut state, &mut runtime, &mut controller, &outbox);
    }

    let base_url = config.base_url()?;
    let client = Client::new(&base_url, config.timeout()?).with_context(|| {
        format!(
            "invalid [server] config in {}; fix base_url/timeout values",
            options.config_path.display()
        )
    })?;

    if options.rescan || config.rescan_on_startup() {
        client
            .rescan()
            .with_context(|| format!("rescan library on {base_url}"))?;
    }

    let store = MovieStore::load(&client).with_context(|| {
        format!("load movie listing from {base_url}; is the server running and reachable?")
    })?;
    if options.check_only {
        println!("{base_url}: {} movies", store.len());
        return Ok(());
    }

    let (mut controller, outbox) = reelshelf_tui::movie_controller(store, policy);
    let mut runtime = HttpRuntime::new(client);
    let result = reelshelf_tui::run_app(&mut state, &mut runtime, &mut controller, &outbox);
    tracing::info!("reelshelf exiting");
    result
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct CliOptions {
    config_path: PathBuf,
    print_config_path: bool,
    print_example: bool,
    demo: bool,
    rescan: bool,
    check_only: bool,
    show_help: bool,
}

fn parse_cli_args<I, S>(args: I, default_config_path: PathBuf) -> Result<CliOptions>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut options = CliOptions {
        config_path: default_config_path,
        print_config_path: false,
        print_example: false,
        demo: false,
        rescan: false,
        check_only: false,
        show_help: false,
    };

    let mut iter = args.into_iter();
    while let Some(arg) = iter.next() {
        match arg.as_ref() {
            "--config" => {
                let value = iter
                    .next()
                    .ok_or_else(|| anyhow::anyhow!("--config requires a file path"))?;
                options.config_path = PathBuf::from(value.as_ref());
            }
            "--print-config-path" => {
                options.print_config_path = true;
            }
            "--print-example-config" => {
                options.print_example = true;
            }
            "--demo" => {
                options.demo = true;
            }
            "--rescan" => {
                options.rescan = true;
            }
            "--check" => {
                options.check_only = true;
            }
            "--help" | "-h" => {
                options.show_help = true;
            }
            unknown => {
                return Err(anyhow::anyhow!(
                    "unknown argument {unknown:?}; run with --help to see supported options"
                ));
            }
        }
    }

    Ok(options)
}

fn print_help() {
    println!("reelshelf: browse and edit a movie library served over HTTP");
    println!("  --config <path>          Use a specific config path");
    println!("  --print-config-path      Print resolved config path");
    println!("  --print-example-config   Print a v1 config template");
    println!("  --demo                   Browse a generated in-memory library");
    println!("  --rescan                 Ask the server to rescan before loading");
    println!("  --check                  Validate config and load the listing, then exit");
    println!("  --help                   Show this help");
}
