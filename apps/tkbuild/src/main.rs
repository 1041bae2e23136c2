//! tkbuild command-line interface
//!
//! Drives the configure, build, test, coverage, and package stages for the
//! Tracekit native SDK and renders the event stream they produce.

mod cli;
mod display;
mod error;
mod events;
mod logging;

use clap::Parser;
use std::path::Path;
use std::process;
use tkbuild_builder::BuildContext;
use tkbuild_config::Config;
use tkbuild_events::{AppEvent, EventReceiver};
use tkbuild_types::{BuildReport, ColorChoice};
use tracing::{error, info};

use crate::cli::{Cli, GlobalArgs};
use crate::display::OutputRenderer;
use crate::error::CliError;
use crate::events::EventHandler;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let json_mode = cli.global.json;

    if let Err(e) = run(cli).await {
        error!("Application error: {e}");
        if !json_mode {
            eprintln!("Error: {e}");
        }
        process::exit(e.exit_code());
    }
}

/// Main application logic
async fn run(cli: Cli) -> Result<(), CliError> {
    // Precedence: config file, then environment, then CLI flags
    let mut config = Config::load_or_default(&cli.global.config).await?;
    config.merge_env()?;
    apply_cli_config(&mut config, &cli.global);

    // The log directory lives under the build tree, so tracing can only be
    // set up once the configuration is loaded
    init_tracing(cli.global.json, cli.global.debug, &config.log_dir());

    info!(
        version = env!("CARGO_PKG_VERSION"),
        platform = %cli.platform,
        profile = %cli.cfg,
        steps = ?cli.requested_steps(),
        "Starting tkbuild"
    );

    let color_choice = config.general.color;
    let renderer = OutputRenderer::new(cli.global.json, color_choice);
    let colors_enabled = match color_choice {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => console::Term::stdout().features().colors_supported(),
    };
    let event_handler = EventHandler::new(colors_enabled, cli.global.debug, cli.global.json);

    let (event_sender, event_receiver) = tkbuild_events::channel();
    let ctx = BuildContext::new(cli.platform, cli.cfg, config)
        .with_build(cli.build)
        .with_test(cli.test)
        .with_coverage(cli.coverage)
        .with_event_sender(event_sender);

    let report = run_with_events(&ctx, event_receiver, &event_handler).await?;

    renderer.render_report(&report)?;
    info!(duration_ms = report.duration_ms, "Run completed");
    Ok(())
}

/// Apply CLI overrides on top of the loaded configuration
fn apply_cli_config(config: &mut Config, args: &GlobalArgs) {
    if let Some(color) = args.color {
        config.general.color = color;
    }
}

/// Drive the orchestrator while draining its event stream
async fn run_with_events(
    ctx: &BuildContext,
    mut event_receiver: EventReceiver,
    event_handler: &EventHandler,
) -> Result<BuildReport, CliError> {
    let mut build_future = Box::pin(tkbuild_builder::run(ctx));

    loop {
        tokio::select! {
            result = &mut build_future => {
                // Drain events emitted just before completion
                while let Ok(event) = event_receiver.try_recv() {
                    dispatch_event(event, event_handler);
                }
                return result.map_err(CliError::from);
            }

            event = event_receiver.recv() => {
                if let Some(event) = event {
                    dispatch_event(event, event_handler);
                }
                // Channel closed, continue waiting for the build to finish
            }
        }
    }
}

/// Mirror an event into the structured log, then render it for the console
///
/// The handler itself suppresses console rendering in JSON mode so stdout
/// stays machine-readable.
fn dispatch_event(event: AppEvent, event_handler: &EventHandler) {
    logging::log_event(&event);
    event_handler.handle_event(event);
}

/// Initialize the tracing subsystem
fn init_tracing(json_mode: bool, debug_flag: bool, log_dir: &Path) {
    // Check if debug logging is enabled via environment or flag
    let debug_enabled = std::env::var("RUST_LOG").is_ok() || debug_flag;

    if json_mode {
        // JSON mode: suppress console output to avoid contaminating stdout
        if debug_enabled {
            // In debug mode with JSON, still log to file
            if std::fs::create_dir_all(log_dir).is_ok() {
                let log_file = log_dir.join(format!(
                    "tkbuild-{}.log",
                    chrono::Utc::now().format("%Y%m%d-%H%M%S")
                ));

                if let Ok(file) = std::fs::File::create(&log_file) {
                    tracing_subscriber::fmt()
                        .json()
                        .with_writer(file)
                        .with_env_filter(
                            tracing_subscriber::EnvFilter::try_from_default_env()
                                .unwrap_or_else(|_| {
                                    tracing_subscriber::EnvFilter::new("info,tkbuild=debug")
                                }),
                        )
                        .init();
                    return;
                }
            }
        }
        // Fallback: disable all logging in JSON mode
        tracing_subscriber::fmt()
            .with_writer(std::io::sink)
            .with_env_filter("off")
            .init();
    } else if debug_enabled {
        // Debug mode: structured JSON logs to file
        if let Err(e) = std::fs::create_dir_all(log_dir) {
            eprintln!("Warning: Failed to create log directory: {e}");
        }

        let log_file = log_dir.join(format!(
            "tkbuild-{}.log",
            chrono::Utc::now().format("%Y%m%d-%H%M%S")
        ));

        match std::fs::File::create(&log_file) {
            Ok(file) => {
                tracing_subscriber::fmt()
                    .json()
                    .with_writer(file)
                    .with_env_filter(
                        tracing_subscriber::EnvFilter::try_from_default_env()
                            .unwrap_or_else(|_| {
                                tracing_subscriber::EnvFilter::new("info,tkbuild=debug")
                            }),
                    )
                    .init();

                eprintln!("Debug logging enabled: {}", log_file.display());
            }
            Err(e) => {
                eprintln!("Warning: Failed to create log file: {e}");
                // Fallback to stderr
                tracing_subscriber::fmt()
                    .with_env_filter(
                        tracing_subscriber::EnvFilter::try_from_default_env()
                            .unwrap_or_else(|_| {
                                tracing_subscriber::EnvFilter::new("info,tkbuild=info")
                            }),
                    )
                    .init();
            }
        }
    } else {
        // Normal mode: minimal logging to stderr
        tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn,tkbuild=warn")),
            )
            .init();
    }
}
