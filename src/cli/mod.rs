pub mod commands;
pub mod handlers;
pub mod output;

pub use commands::{ChatArgs, CliArgs, Commands, ConfigArgs, ExtractArgs};
pub use output::{ExtractionReport, OutputFormat, OutputFormatter};
