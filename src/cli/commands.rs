use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Edit-intent extraction and chat tooling for an AI website builder
#[derive(Parser, Debug)]
#[command(
    name = "sitesmith",
    about = "Edit-intent extraction and chat tooling for an AI website builder",
    version,
    author,
    long_about = "sitesmith turns chat messages about a website into structured edits. \
                  It recognises recolor, set-text and add-element commands in user \
                  messages and in assistant replies, and can run a chat turn against \
                  an OpenAI-compatible completion endpoint."
)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(long, global = true, value_name = "LEVEL", help = "Set logging level")]
    pub log_level: Option<String>,

    #[arg(short = 'v', long, global = true, help = "Enable debug logging")]
    pub verbose: bool,

    #[arg(
        short = 'q',
        long,
        global = true,
        conflicts_with = "verbose",
        help = "Quiet mode - suppress non-error output"
    )]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    #[command(
        about = "Extract an edit intent from a message",
        long_about = "Runs the rule tables over a message and prints the recognised edit. \
                      A message with no recognisable edit prints no_match and still \
                      exits successfully.\n\n\
                      Examples:\n  \
                      sitesmith extract \"I'll make the header blue\"\n  \
                      sitesmith extract --source user \"make the footer red\"\n  \
                      sitesmith extract --source user --selected h1 \"set text to Hello\"\n  \
                      echo \"Let's add a contact form\" | sitesmith extract --format json"
    )]
    Extract(ExtractArgs),

    #[command(
        about = "Chat with the website assistant",
        long_about = "Sends a message to the completion endpoint and reports the action \
                      the editor would take. Without a message, reads one message per \
                      line from stdin and keeps the conversation going.\n\n\
                      Requires SITESMITH_API_KEY.\n\n\
                      Examples:\n  \
                      sitesmith chat \"make the header blue\"\n  \
                      sitesmith chat --selected button"
    )]
    Chat(ChatArgs),

    #[command(about = "Show the effective configuration")]
    Config(ConfigArgs),
}

#[derive(Parser, Debug, Clone)]
pub struct ExtractArgs {
    #[arg(
        value_name = "TEXT",
        conflicts_with = "file",
        help = "Message to analyse (reads stdin when omitted)"
    )]
    pub text: Option<String>,

    #[arg(long, value_name = "PATH", help = "Read the message from a file")]
    pub file: Option<PathBuf>,

    #[arg(
        short = 's',
        long,
        value_enum,
        default_value = "assistant",
        help = "Which rule table to use"
    )]
    pub source: SourceArg,

    #[arg(
        long,
        value_name = "TAG",
        help = "Selected element (HTML tag such as h1, or a name such as footer)"
    )]
    pub selected: Option<String>,

    #[arg(long, help = "Also report which rule matched and which rules could match")]
    pub explain: bool,

    #[arg(
        short = 'f',
        long,
        value_enum,
        default_value = "human",
        help = "Output format"
    )]
    pub format: OutputFormatArg,
}

#[derive(Parser, Debug, Clone)]
pub struct ChatArgs {
    #[arg(value_name = "MESSAGE", help = "Message to send (starts a REPL when omitted)")]
    pub message: Option<String>,

    #[arg(long, value_name = "TAG", help = "Selected element for the conversation")]
    pub selected: Option<String>,

    #[arg(
        short = 'f',
        long,
        value_enum,
        default_value = "human",
        help = "Output format"
    )]
    pub format: OutputFormatArg,
}

#[derive(Parser, Debug, Clone)]
pub struct ConfigArgs {
    #[arg(
        short = 'f',
        long,
        value_enum,
        default_value = "human",
        help = "Output format"
    )]
    pub format: OutputFormatArg,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceArg {
    /// Assistant reply prose ("I'll make the header blue")
    Assistant,
    /// Imperative user command ("make the header blue")
    User,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormatArg {
    Json,
    Yaml,
    Human,
}

impl From<OutputFormatArg> for super::output::OutputFormat {
    fn from(arg: OutputFormatArg) -> Self {
        match arg {
            OutputFormatArg::Json => super::output::OutputFormat::Json,
            OutputFormatArg::Yaml => super::output::OutputFormat::Yaml,
            OutputFormatArg::Human => super::output::OutputFormat::Human,
        }
    }
}
