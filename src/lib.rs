use clap::ValueEnum;
use serde::Serialize;

pub mod config;
pub mod corpus;
pub mod error;
pub mod harness;
pub mod output;
pub mod protocol;
pub mod report;
pub mod runner;
pub mod schema;

/// How the destination directory for a run is chosen.
#[derive(Clone, Copy, Debug, Default, ValueEnum, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputPolicy {
    /// Allocate a fresh `<date>_<name>_<idx>` directory, incrementing the
    /// suffix until an unused one is found. Earlier runs are kept.
    #[default]
    Fresh,
    /// Reuse a single `<date>_<name>` directory, clearing its contents
    /// from any earlier run on the same day.
    Reuse,
}

impl OutputPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputPolicy::Fresh => "fresh",
            OutputPolicy::Reuse => "reuse",
        }
    }
}
