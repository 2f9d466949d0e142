//! Command handlers
//!
//! Each handler runs one subcommand and returns the process exit code:
//! 0 on success (including "no edit recognised"), 1 on failure.

use anyhow::{Context, Result};
use std::io::Read;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{debug, error, info};

use super::commands::{ChatArgs, ConfigArgs, ExtractArgs, SourceArg};
use super::output::{ExtractionReport, OutputFormat, OutputFormatter};
use crate::bridge::EditorBridge;
use crate::config::SitesmithConfig;
use crate::intent::{
    assistant_rules, command_rules, extract_traced, extract_user_command_traced, ElementTag,
    RuleContext,
};
use crate::session::{ChatSession, SelectedElement};

pub fn handle_extract(args: &ExtractArgs) -> i32 {
    match run_extract(args) {
        Ok(output) => {
            print!("{}", with_newline(output));
            0
        }
        Err(e) => {
            error!("Extraction failed: {:#}", e);
            eprintln!("Error: {:#}", e);
            1
        }
    }
}

pub async fn handle_chat(args: &ChatArgs, quiet: bool) -> i32 {
    match run_chat(args, quiet).await {
        Ok(()) => 0,
        Err(e) => {
            error!("Chat failed: {:#}", e);
            eprintln!("Error: {:#}", e);
            1
        }
    }
}

pub fn handle_config(args: &ConfigArgs) -> i32 {
    let result = SitesmithConfig::from_env()
        .context("Failed to load configuration")
        .and_then(|config| OutputFormatter::new(args.format.into()).format_config(&config));

    match result {
        Ok(output) => {
            print!("{}", with_newline(output));
            0
        }
        Err(e) => {
            eprintln!("Error: {:#}", e);
            1
        }
    }
}

fn with_newline(mut output: String) -> String {
    if !output.ends_with('\n') {
        output.push('\n');
    }
    output
}

/// Resolves `--selected`, accepting either an HTML tag or a logical name
pub fn parse_selected(raw: &str) -> SelectedElement {
    let raw = raw.trim();
    let mut element = SelectedElement::from_html_tag(raw);
    if let ElementTag::Other(ref name) = element.tag {
        if name == &raw.to_lowercase() {
            element.tag = ElementTag::parse(raw);
        }
    }
    element
}

fn read_input(args: &ExtractArgs) -> Result<String> {
    if let Some(ref text) = args.text {
        return Ok(text.clone());
    }

    if let Some(ref path) = args.file {
        return std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read message from {}", path.display()));
    }

    let mut buffer = String::new();
    std::io::stdin()
        .read_to_string(&mut buffer)
        .context("Failed to read message from stdin")?;
    Ok(buffer)
}

fn run_extract(args: &ExtractArgs) -> Result<String> {
    let input = read_input(args)?;
    let text = input.trim_end();
    let selected = args.selected.as_deref().map(parse_selected);
    let selected_tag = selected.as_ref().map(|s| s.tag.clone());

    debug!(
        source = ?args.source,
        selected = ?selected_tag,
        len = text.len(),
        "Extracting edit intent"
    );

    let mut report = match args.source {
        SourceArg::Assistant => ExtractionReport::new(assistant_rules().name(), extract_traced(text)),
        SourceArg::User => ExtractionReport::new(
            command_rules().name(),
            extract_user_command_traced(text, selected_tag.as_ref()),
        ),
    };

    report.selected = selected_tag.as_ref().map(ToString::to_string);

    if args.explain {
        let candidates = match args.source {
            SourceArg::Assistant => assistant_rules().matching_rules(text, &RuleContext::default()),
            SourceArg::User => {
                command_rules().matching_rules(text, &RuleContext::with_selection(selected_tag))
            }
        };
        report.candidate_rules = Some(candidates);
    }

    OutputFormatter::new(args.format.into()).format_extraction(&report)
}

async fn run_chat(args: &ChatArgs, quiet: bool) -> Result<()> {
    let config = SitesmithConfig::from_env().context("Failed to load configuration")?;
    config.validate().context("Invalid configuration")?;
    let client = config
        .create_client()
        .context("Failed to create completion client")?;

    info!(model = %config.model, endpoint = %config.api_url, "Starting chat");

    let mut session = ChatSession::new(config.session_config());
    session.select(args.selected.as_deref().map(parse_selected));

    let mut bridge = EditorBridge::new(client);
    let format: OutputFormat = args.format.into();
    let formatter = OutputFormatter::new(format);

    if let Some(ref message) = args.message {
        let turn = bridge.process_message(&mut session, message).await;
        println!("{}", formatter.format_turn(&turn)?.trim_end());
        return Ok(());
    }

    let interactive = format == OutputFormat::Human && !quiet;
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stderr = tokio::io::stderr();

    loop {
        if interactive {
            stderr.write_all(b"> ").await.ok();
            stderr.flush().await.ok();
        }

        let Some(line) = lines
            .next_line()
            .await
            .context("Failed to read message from stdin")?
        else {
            break;
        };

        let message = line.trim();
        if message.is_empty() {
            continue;
        }
        if matches!(message, "exit" | "quit") {
            break;
        }

        let turn = bridge.process_message(&mut session, message).await;
        println!("{}", formatter.format_turn(&turn)?.trim_end());
        if interactive {
            println!();
        }
    }

    debug!(history = session.history_len(), "Chat ended");
    Ok(())
}
