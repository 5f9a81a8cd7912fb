//! Output rendering and formatting

use clipper_config::Config;
use clipper_sync::{present_steps, SyncState};
use clipper_types::{ClipConfig, ClipId, ClipResources, ColorChoice, PipelineStatus, KNOWN_STEPS};
use comfy_table::{presets::UTF8_FULL, Attribute, Cell, Color, ContentArrangement, Table};
use console::{Style, Term};
use serde_json::json;
use std::io;

/// What a command produced, rendered once it returns
pub enum CommandResult {
    /// Pipeline snapshot plus whatever the engine holds
    Sync(SyncState),
    Clips(Vec<ClipId>),
    Links {
        id: ClipId,
        resources: ClipResources,
    },
    ClipConfig {
        id: ClipId,
        config: ClipConfig,
    },
    Settings(Box<Config>),
    Success(String),
}

/// Output renderer for CLI results
#[derive(Clone)]
pub struct OutputRenderer {
    /// Use JSON output format
    json_output: bool,
    /// Color configuration
    color_choice: ColorChoice,
    /// Terminal instance
    term: Term,
}

impl OutputRenderer {
    /// Create new output renderer
    pub fn new(json_output: bool, color_choice: ColorChoice) -> Self {
        Self {
            json_output,
            color_choice,
            term: Term::stdout(),
        }
    }

    /// Render command result
    pub fn render_result(&self, result: &CommandResult) -> io::Result<()> {
        if self.json_output {
            self.render_json(result)
        } else {
            self.render_text(result)
        }
    }

    /// Render as JSON
    fn render_json(&self, result: &CommandResult) -> io::Result<()> {
        let value = match result {
            CommandResult::Sync(state) => sync_state_json(state),
            CommandResult::Clips(clips) => json!({ "clips": clips }),
            CommandResult::Links { id, resources } => json!({ "id": id, "links": resources }),
            CommandResult::ClipConfig { id, config } => json!({ "id": id, "config": config }),
            CommandResult::Settings(config) => {
                serde_json::to_value(config.as_ref()).map_err(io::Error::other)?
            }
            CommandResult::Success(message) => json!({ "message": message }),
        };
        let json = serde_json::to_string_pretty(&value).map_err(io::Error::other)?;
        self.term.write_line(&json)
    }

    fn render_text(&self, result: &CommandResult) -> io::Result<()> {
        match result {
            CommandResult::Sync(state) => self.render_sync_state(state),
            CommandResult::Clips(clips) => self.render_clips(clips),
            CommandResult::Links { id, resources } => self.render_links(id, resources),
            CommandResult::ClipConfig { id, config } => self.render_clip_config(id, config),
            CommandResult::Settings(config) => self.render_settings(config),
            CommandResult::Success(message) => self.term.write_line(message),
        }
    }

    fn render_sync_state(&self, state: &SyncState) -> io::Result<()> {
        let progress = state.progress();
        let headline = match state.pipeline_state() {
            Some(pipeline) => format!("{} [{pipeline}]", state.summary_line()),
            None => state.summary_line().to_string(),
        };
        self.term.write_line(&self.bold(&headline))?;
        self.term.write_line(&format!(
            "Progress: {}% ({}/{} steps)",
            progress.percent, progress.completed, progress.total
        ))?;

        // Without steps from the backend, show the pipeline's known steps
        let steps = match state.status() {
            Some(status) if !status.steps.is_empty() => status.steps.clone(),
            _ => PipelineStatus::idle_with_known_steps().steps,
        };

        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL)
            .set_content_arrangement(ContentArrangement::Dynamic)
            .set_header(vec![
                Cell::new("").add_attribute(Attribute::Bold),
                Cell::new("Step").add_attribute(Attribute::Bold),
                Cell::new("State").add_attribute(Attribute::Bold),
            ]);
        for view in present_steps(&steps) {
            table.add_row(vec![
                self.state_cell(view.icon, view.state.as_str()),
                Cell::new(&view.label),
                self.state_cell(view.state.as_str(), view.state.as_str()),
            ]);
        }
        self.term.write_line(&table.to_string())?;

        let status = state.status();
        if let Some(upload) = status.and_then(|s| s.upload.as_deref()) {
            self.term.write_line(&format!("Video: {upload}"))?;
        }
        if let Some(updated) = status.and_then(PipelineStatus::updated_at) {
            self.term.write_line(&format!(
                "Updated: {}",
                updated.format("%Y-%m-%d %H:%M:%S UTC")
            ))?;
        }
        if state.is_uploading() {
            self.term.write_line("Upload in progress")?;
        }
        if let Some(message) = state.error_message() {
            self.term.write_line(&self.red(message))?;
        }
        if !state.clips().is_empty() {
            self.term.write_line("")?;
            self.render_clips(state.clips())?;
        }
        Ok(())
    }

    fn render_clips(&self, clips: &[ClipId]) -> io::Result<()> {
        if clips.is_empty() {
            return self.term.write_line("No clips yet.");
        }
        self.term
            .write_line(&self.bold(&format!("{} clip(s)", clips.len())))?;
        for clip in clips {
            self.term.write_line(&format!("  {clip}"))?;
        }
        Ok(())
    }

    fn render_links(&self, id: &ClipId, resources: &ClipResources) -> io::Result<()> {
        self.term.write_line(&self.bold(id.as_str()))?;
        self.term.write_line(&format!("  Video:     {}", resources.raw))?;
        self.term
            .write_line(&format!("  Subtitles: {}", resources.subtitles))?;
        self.term.write_line(&format!("  Preview:   {}", resources.preview))
    }

    fn render_clip_config(&self, id: &ClipId, config: &ClipConfig) -> io::Result<()> {
        let facecam = &config.facecam;
        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL)
            .set_header(vec![
                Cell::new("Setting").add_attribute(Attribute::Bold),
                Cell::new("Value").add_attribute(Attribute::Bold),
            ])
            .add_row(vec!["facecam.enabled".to_string(), facecam.enabled.to_string()])
            .add_row(vec![
                "facecam.region".to_string(),
                format!("{}x{} at ({}, {})", facecam.w, facecam.h, facecam.x, facecam.y),
            ])
            .add_row(vec![
                "facecam.out_height".to_string(),
                facecam.out_height.to_string(),
            ])
            .add_row(vec![
                "subtitles.font_size".to_string(),
                config.subtitles.font_size.to_string(),
            ])
            .add_row(vec![
                "subtitles.margin_v".to_string(),
                config.subtitles.margin_v.to_string(),
            ]);
        self.term.write_line(&self.bold(id.as_str()))?;
        self.term.write_line(&table.to_string())
    }

    fn render_settings(&self, config: &Config) -> io::Result<()> {
        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL)
            .set_header(vec![
                Cell::new("Key").add_attribute(Attribute::Bold),
                Cell::new("Value").add_attribute(Attribute::Bold),
            ])
            .add_row(vec!["api.base_url".to_string(), config.base_url().to_string()])
            .add_row(vec![
                "polling.interval_ms".to_string(),
                config.polling.interval_ms.to_string(),
            ])
            .add_row(vec![
                "network.timeout".to_string(),
                format!("{}s", config.network.timeout),
            ])
            .add_row(vec![
                "network.upload_timeout".to_string(),
                format!("{}s", config.network.upload_timeout),
            ])
            .add_row(vec![
                "network.connect_timeout".to_string(),
                format!("{}s", config.network.connect_timeout),
            ])
            .add_row(vec![
                "general.color".to_string(),
                format!("{:?}", config.general.color).to_lowercase(),
            ]);
        self.term.write_line(&table.to_string())?;
        self.term.write_line(&format!(
            "Known pipeline steps: {}",
            KNOWN_STEPS
                .iter()
                .map(|(id, _)| *id)
                .collect::<Vec<_>>()
                .join(", ")
        ))
    }

    fn state_cell(&self, text: &str, state: &str) -> Cell {
        let cell = Cell::new(text);
        if !self.supports_color() {
            return cell;
        }
        match state {
            "completed" => cell.fg(Color::Green),
            "in_progress" => cell.fg(Color::Yellow),
            "failed" => cell.fg(Color::Red),
            _ => cell,
        }
    }

    fn bold(&self, text: &str) -> String {
        if self.supports_color() {
            Style::new().bold().apply_to(text).to_string()
        } else {
            text.to_string()
        }
    }

    fn red(&self, text: &str) -> String {
        if self.supports_color() {
            Style::new().red().apply_to(text).to_string()
        } else {
            text.to_string()
        }
    }

    /// Check if color output is supported
    fn supports_color(&self) -> bool {
        match self.color_choice {
            ColorChoice::Always => true,
            ColorChoice::Never => false,
            ColorChoice::Auto => self.term.features().colors_supported(),
        }
    }
}

/// JSON view of the engine state for `--json`
pub fn sync_state_json(state: &SyncState) -> serde_json::Value {
    let progress = state.progress();
    json!({
        "status": state.status(),
        "progress": progress.percent,
        "completed_steps": progress.completed,
        "total_steps": progress.total,
        "summary": state.summary_line(),
        "clips": state.clips(),
        "is_uploading": state.is_uploading(),
        "error": state.error_message(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use clipper_sync::Transition;
    use clipper_types::{PipelineState, Step, StepState};

    #[test]
    fn test_sync_state_json() {
        let state = SyncState::default().apply(Transition::StatusFetched(PipelineStatus::new(
            PipelineState::Processing,
            vec![
                Step::new("upload", "Upload received", StepState::Completed),
                Step::new("extract_audio", "Extract audio", StepState::Pending),
            ],
        )));

        let value = sync_state_json(&state);
        assert_eq!(value["progress"], 50);
        assert_eq!(value["summary"], "Processing video...");
        assert_eq!(value["status"]["state"], "processing");
        assert!(value["error"].is_null());
    }
}
