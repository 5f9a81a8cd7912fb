//! clipper - upload videos to the clip pipeline and follow its progress
//!
//! Thin front end over the sync engine: each command runs against the
//! backend while engine events are rendered as they arrive.

mod cli;
mod display;
mod error;
mod events;
mod logging;

use crate::cli::{ClipConfigCommands, Cli, Commands, SettingsCommands};
use crate::display::{CommandResult, OutputRenderer};
use crate::error::CliError;
use crate::events::EventHandler;
use clap::Parser;
use clipper_config::Config;
use clipper_events::{EventEmitter, EventReceiver, EventSender};
use clipper_net::{HttpBackend, UploadFile};
use clipper_sync::{EngineOptions, SyncEngine};
use clipper_types::{ClipConfig, ColorChoice};
use std::path::{Path, PathBuf};
use std::process;
use tokio::select;
use tracing::{error, info};

#[tokio::main]
async fn main() {
    // Parse command line arguments first to check for JSON mode
    let cli = Cli::parse();
    let json_mode = cli.global.json;

    init_tracing(json_mode, cli.global.debug);

    if let Err(e) = run(cli).await {
        error!("Application error: {}", e);
        if json_mode {
            println!("{}", serde_json::json!({ "error": e.to_string() }));
        } else {
            eprintln!("Error: {e}");
        }
        process::exit(1);
    }
}

/// Main application logic
async fn run(cli: Cli) -> Result<(), CliError> {
    info!("Starting clipper v{}", env!("CARGO_PKG_VERSION"));

    // Precedence: file (or defaults), then environment, then CLI flags.
    // `settings init` may target a file that does not exist yet.
    let creating = matches!(cli.command, Commands::Settings(SettingsCommands::Init { .. }));
    let mut config = match cli.global.config.as_deref() {
        Some(path) if creating && !tokio::fs::try_exists(path).await? => Config::default(),
        path => Config::load_or_default(path).await?,
    };
    config.merge_env()?;
    apply_cli_config(&mut config, &cli.global);
    config.validate()?;

    let (event_sender, event_receiver) = clipper_events::channel();

    let color = cli.global.color.unwrap_or(config.general.color);
    let renderer = OutputRenderer::new(cli.global.json, color);
    let colors_enabled = match color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => console::Term::stderr().features().colors_supported(),
    };
    // JSON mode keeps stderr quiet apart from the final error
    let mut event_handler =
        (!cli.global.json).then(|| EventHandler::new(colors_enabled, cli.global.debug));

    let context = CommandContext {
        config,
        config_path: cli.global.config.clone(),
        events: event_sender,
    };
    let result =
        execute_command_with_events(cli.command, context, event_receiver, event_handler.as_mut())
            .await?;

    renderer.render_result(&result)?;

    info!("Command completed successfully");
    Ok(())
}

/// Everything a command needs besides its own arguments
struct CommandContext {
    config: Config,
    config_path: Option<PathBuf>,
    events: EventSender,
}

impl CommandContext {
    fn backend(&self) -> Result<HttpBackend, CliError> {
        Ok(HttpBackend::from_config(&self.config)?)
    }

    fn engine(&self) -> Result<SyncEngine<HttpBackend>, CliError> {
        let options = EngineOptions::default()
            .with_poll_interval(self.config.poll_interval())
            .with_event_sender(self.events.clone());
        Ok(SyncEngine::new(self.backend()?, options))
    }
}

/// Execute command with concurrent event handling
async fn execute_command_with_events(
    command: Commands,
    context: CommandContext,
    mut event_receiver: EventReceiver,
    mut event_handler: Option<&mut EventHandler>,
) -> Result<CommandResult, CliError> {
    let mut command_future = Box::pin(execute_command(command, context));

    loop {
        select! {
            result = &mut command_future => {
                // Drain any remaining events
                while let Ok(event) = event_receiver.try_recv() {
                    dispatch_event(event_handler.as_deref_mut(), event);
                }
                return result;
            }

            event = event_receiver.recv() => {
                match event {
                    Some(event) => dispatch_event(event_handler.as_deref_mut(), event),
                    None => { /* Channel closed: keep waiting for command to finish */ }
                }
            }
        }
    }
}

fn dispatch_event(handler: Option<&mut EventHandler>, event: clipper_events::AppEvent) {
    match handler {
        Some(handler) => handler.handle_event(event),
        None => logging::log_event_with_tracing(&event),
    }
}

/// Execute the specified command
async fn execute_command(
    command: Commands,
    ctx: CommandContext,
) -> Result<CommandResult, CliError> {
    match command {
        Commands::Upload { file, watch } => {
            if !clipper_config::is_accepted_video(&file) {
                ctx.events.emit_warning_with_context(
                    format!("{} may not be a supported video", file.display()),
                    format!(
                        "expected one of: {}",
                        clipper_config::ACCEPTED_VIDEO_EXTENSIONS.join(", ")
                    ),
                );
            }
            let upload = UploadFile::from_path(&file).await?;

            let engine = ctx.engine()?;
            engine.upload(Some(&upload)).await;
            if watch {
                engine.settled().await;
            }
            Ok(CommandResult::Sync(engine.snapshot()))
        }

        Commands::Status => {
            let engine = ctx.engine()?;
            engine.mount().await;
            Ok(CommandResult::Sync(engine.snapshot()))
        }

        Commands::Watch => {
            let engine = ctx.engine()?;
            engine.mount().await;
            engine.settled().await;
            Ok(CommandResult::Sync(engine.snapshot()))
        }

        Commands::Clips => {
            let engine = ctx.engine()?;
            engine.refresh_clips().await;
            let state = engine.snapshot();
            if state.error().is_some() {
                // Already reported through the event stream
                return Ok(CommandResult::Sync(state));
            }
            Ok(CommandResult::Clips(state.clips().to_vec()))
        }

        Commands::Links { id } => {
            let resources = ctx.backend()?.clip_resources(&id);
            Ok(CommandResult::Links { id, resources })
        }

        Commands::ClipConfig(ClipConfigCommands::Get { id }) => {
            let config = ctx.backend()?.fetch_clip_config(&id).await?;
            Ok(CommandResult::ClipConfig { id, config })
        }

        Commands::ClipConfig(ClipConfigCommands::Save { id, file }) => {
            let config = read_clip_config(&file).await?;
            ctx.backend()?.save_clip_config(&id, &config).await?;
            Ok(CommandResult::ClipConfig { id, config })
        }

        Commands::Render { id } => {
            ctx.backend()?.render_clip(&id).await?;
            Ok(CommandResult::Success(format!("Render started for {id}")))
        }

        Commands::Settings(SettingsCommands::Show) => {
            Ok(CommandResult::Settings(Box::new(ctx.config)))
        }

        Commands::Settings(SettingsCommands::Init { force }) => {
            let path = match ctx.config_path {
                Some(path) => path,
                None => Config::default_path()?,
            };
            if !force && tokio::fs::try_exists(&path).await? {
                return Err(CliError::ConfigExists(path));
            }
            ctx.config.save_to(&path).await?;
            Ok(CommandResult::Success(format!(
                "Wrote configuration to {}",
                path.display()
            )))
        }
    }
}

/// Read a clip config from a JSON file; missing sections take defaults
async fn read_clip_config(path: &Path) -> Result<ClipConfig, CliError> {
    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| CliError::InputFile {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
    serde_json::from_str(&content).map_err(|e| CliError::InputFile {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Initialize tracing/logging
fn init_tracing(json_mode: bool, debug_enabled_flag: bool) {
    let debug_enabled = std::env::var("RUST_LOG").is_ok() || debug_enabled_flag;

    if debug_enabled {
        // Debug mode: structured JSON logs to file
        if let Some(file) = create_log_file(json_mode) {
            tracing_subscriber::fmt()
                .json()
                .with_writer(file)
                .with_env_filter(
                    tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                        tracing_subscriber::EnvFilter::new("info,clipper=debug,clipper_sync=debug")
                    }),
                )
                .init();
            return;
        }
    }

    if json_mode {
        // JSON mode: keep stdout/stderr clean for machine consumers
        tracing_subscriber::fmt()
            .with_writer(std::io::sink)
            .with_env_filter("off")
            .init();
    } else {
        // Normal mode: minimal logging to stderr
        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("error")),
            )
            .init();
    }
}

fn create_log_file(quiet: bool) -> Option<std::fs::File> {
    let Some(log_dir) = clipper_config::logs_dir() else {
        if !quiet {
            eprintln!("Warning: No log directory available on this platform");
        }
        return None;
    };
    if let Err(e) = std::fs::create_dir_all(&log_dir) {
        if !quiet {
            eprintln!("Warning: Failed to create log directory: {e}");
        }
        return None;
    }

    let log_file = log_dir.join(format!(
        "clipper-{}.log",
        chrono::Utc::now().format("%Y%m%d-%H%M%S")
    ));
    match std::fs::File::create(&log_file) {
        Ok(file) => {
            if !quiet {
                eprintln!("Debug logging enabled: {}", log_file.display());
            }
            Some(file)
        }
        Err(e) => {
            if !quiet {
                eprintln!("Warning: Failed to create log file: {e}");
            }
            None
        }
    }
}

/// Apply CLI configuration overrides (highest precedence)
fn apply_cli_config(config: &mut Config, global: &cli::GlobalArgs) {
    if let Some(color) = global.color {
        config.general.color = color;
    }
    if let Some(url) = &global.api_url {
        config.api.base_url.clone_from(url);
    }
}
