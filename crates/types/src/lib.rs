#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! Core type definitions for clipper
//!
//! This crate provides the wire types shared by the HTTP client, the sync
//! engine and the CLI: pipeline status snapshots, steps, clip identifiers and
//! the per-clip editing configuration.

pub mod clip;
pub mod status;

// Re-export commonly used types
pub use clip::{ClipConfig, ClipId, ClipResource, ClipResources, FacecamConfig, SubtitleConfig};
pub use status::{PipelineState, PipelineStatus, Step, StepState, KNOWN_STEPS};

use serde::{Deserialize, Serialize};

/// Color output choice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorChoice {
    Always,
    Auto,
    Never,
}

// Implement clap::ValueEnum for ColorChoice
impl clap::ValueEnum for ColorChoice {
    fn value_variants<'a>() -> &'a [Self] {
        &[Self::Always, Self::Auto, Self::Never]
    }

    fn to_possible_value(&self) -> Option<clap::builder::PossibleValue> {
        Some(match self {
            Self::Always => clap::builder::PossibleValue::new("always"),
            Self::Auto => clap::builder::PossibleValue::new("auto"),
            Self::Never => clap::builder::PossibleValue::new("never"),
        })
    }
}

impl Default for ColorChoice {
    fn default() -> Self {
        Self::Auto
    }
}
