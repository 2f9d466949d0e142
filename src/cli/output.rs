//! Output formatting for the CLI
//!
//! Every report renders as pretty JSON, YAML, or human-readable text.

use anyhow::{Context, Result};
use serde::Serialize;

use crate::bridge::{IntentSource, Turn, TurnAction};
use crate::config::SitesmithConfig;
use crate::intent::{EditIntent, Extraction};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// JSON format (machine-readable)
    Json,
    Yaml,
    /// Human-readable formatted text
    Human,
}

/// Result of `sitesmith extract`
#[derive(Debug, Clone, Serialize)]
pub struct ExtractionReport {
    /// Rule table that was evaluated (`assistant` or `user_command`)
    pub table: &'static str,
    pub intent: EditIntent,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rule: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected: Option<String>,
    /// Every rule with at least one accepted match, in table order
    #[serde(skip_serializing_if = "Option::is_none")]
    pub candidate_rules: Option<Vec<&'static str>>,
}

impl ExtractionReport {
    pub fn new(table: &'static str, extraction: Extraction) -> Self {
        Self {
            table,
            intent: extraction.intent,
            rule: extraction.rule,
            selected: None,
            candidate_rules: None,
        }
    }
}

fn heavy_rule() -> String {
    "\u{2501}".repeat(42)
}

pub struct OutputFormatter {
    format: OutputFormat,
}

impl OutputFormatter {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    pub fn format_extraction(&self, report: &ExtractionReport) -> Result<String> {
        match self.format {
            OutputFormat::Json => serde_json::to_string_pretty(report)
                .context("Failed to serialize extraction to JSON"),
            OutputFormat::Yaml => {
                serde_yaml::to_string(report).context("Failed to serialize extraction to YAML")
            }
            OutputFormat::Human => Ok(self.format_extraction_human(report)),
        }
    }

    pub fn format_turn(&self, turn: &Turn) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                serde_json::to_string_pretty(turn).context("Failed to serialize turn to JSON")
            }
            OutputFormat::Yaml => {
                serde_yaml::to_string(turn).context("Failed to serialize turn to YAML")
            }
            OutputFormat::Human => Ok(self.format_turn_human(turn)),
        }
    }

    pub fn format_config(&self, config: &SitesmithConfig) -> Result<String> {
        let config_map: std::collections::BTreeMap<_, _> =
            config.to_display_map().into_iter().collect();
        match self.format {
            OutputFormat::Json => serde_json::to_string_pretty(&config_map)
                .context("Failed to serialize config to JSON"),
            OutputFormat::Yaml => {
                serde_yaml::to_string(&config_map).context("Failed to serialize config to YAML")
            }
            OutputFormat::Human => {
                let mut output = String::new();
                output.push_str("sitesmith Configuration\n");
                output.push_str(&heavy_rule());
                output.push_str("\n\n");
                for (key, value) in &config_map {
                    output.push_str(&format!("  {:<22}{}\n", format!("{}:", key), value));
                }
                Ok(output)
            }
        }
    }

    fn format_extraction_human(&self, report: &ExtractionReport) -> String {
        let mut output = String::new();

        if !report.intent.is_match() {
            output.push_str("\u{2717} No edit recognised\n");
        } else {
            output.push_str(&format!("\u{2713} {}\n", report.intent));
            output.push_str(&heavy_rule());
            output.push('\n');
            push_intent_fields(&mut output, &report.intent);
        }

        if let Some(rule) = report.rule {
            output.push_str(&format!("Rule:     {} ({})\n", rule, report.table));
        }
        if let Some(ref selected) = report.selected {
            output.push_str(&format!("Selected: {}\n", selected));
        }
        if let Some(ref candidates) = report.candidate_rules {
            if candidates.is_empty() {
                output.push_str("Candidates: (none)\n");
            } else {
                output.push_str("Candidates:\n");
                for (i, rule) in candidates.iter().enumerate() {
                    let connector = if i == candidates.len() - 1 {
                        "\u{2514}"
                    } else {
                        "\u{251C}"
                    };
                    output.push_str(&format!("{}\u{2500} {}\n", connector, rule));
                }
            }
        }

        output
    }

    fn format_turn_human(&self, turn: &Turn) -> String {
        let mut output = String::new();

        if let Some(ref error) = turn.backend_error {
            output.push_str(&format!("\u{26A0} Backend unavailable: {}\n\n", error));
        }

        let prose = turn.reply.prose();
        if !prose.is_empty() {
            output.push_str(&prose);
            output.push_str("\n\n");
        }

        match &turn.action {
            TurnAction::ApplyCode { changes } => {
                output.push_str("\u{2713} Applied code:\n");
                for change in changes {
                    output.push_str(&format!("  - {}\n", change));
                }
            }
            TurnAction::Edit { intent, source } => {
                let from = match source {
                    IntentSource::User => "your message",
                    IntentSource::Assistant => "the reply",
                };
                output.push_str(&format!("\u{2713} Edit from {}: {}\n", from, intent));
            }
            TurnAction::None => {}
        }

        output
    }
}

fn push_intent_fields(output: &mut String, intent: &EditIntent) {
    match intent {
        EditIntent::Recolor { target, color } => {
            output.push_str(&format!("Target:   {}\n", target));
            output.push_str(&format!("Color:    {}\n", color));
        }
        EditIntent::SetText { target, text } => {
            output.push_str(&format!("Target:   {}\n", target));
            output.push_str(&format!("Text:     {}\n", text));
        }
        EditIntent::AddElement { kind } => {
            output.push_str(&format!("Element:  {}\n", kind));
        }
        EditIntent::NoMatch => {}
    }
}
