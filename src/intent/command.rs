//! Extraction from imperative user commands
//!
//! Users type things like "change the color of the header to red" or "add a
//! contact form". Unlike assistant prose there is no "I'll"/"let's" opener,
//! and targets are free phrases rather than a fixed vocabulary, so this table
//! is kept separate from the assistant one.

use regex::Captures;
use std::sync::OnceLock;

use super::rules::{Extraction, Rule, RuleContext, RuleTable};
use super::types::{ColorValue, EditIntent, ElementKind, ElementTag};
use super::vocabulary::{
    alternation, BASIC_COLOR_NAMES, CLAUSE_END_FRAGMENT, COLOR_FRAGMENT, QUOTED_FRAGMENT,
    RESERVED_WORDS,
};

/// Interprets a user command as a website edit
///
/// "set the text to ..." targets the heading; use
/// [`extract_user_command_with_selection`] when an element is selected.
pub fn extract_user_command(text: &str) -> EditIntent {
    command_rules().evaluate(text, &RuleContext::default())
}

/// Interprets a user command, resolving implicit targets to `selected`
pub fn extract_user_command_with_selection(text: &str, selected: Option<&ElementTag>) -> EditIntent {
    extract_user_command_traced(text, selected).intent
}

pub fn extract_user_command_traced(text: &str, selected: Option<&ElementTag>) -> Extraction {
    let context = RuleContext::with_selection(selected.cloned());
    command_rules().evaluate_traced(text, &context)
}

/// The compiled user command rule table
pub fn command_rules() -> &'static RuleTable {
    static TABLE: OnceLock<RuleTable> = OnceLock::new();
    TABLE.get_or_init(|| build_table().expect("Invalid user command rule pattern"))
}

fn build_table() -> Result<RuleTable, regex::Error> {
    let color = format!("(?P<color>{})", COLOR_FRAGMENT);
    let basic_color = format!("(?P<color>{})", alternation(BASIC_COLOR_NAMES));

    let rules = vec![
        Rule::new(
            "change_color",
            &format!(
                r"\bchange\s+(?:the\s+)?(?P<property>text\s+colou?r|colou?r|background(?:\s+colou?r)?)(?:\s+(?:of\s+)?(?:the\s+)?(?P<target>.+?))?\s+to\s+{color}{CLAUSE_END_FRAGMENT}"
            ),
            change_color,
        )?,
        Rule::new(
            "change_text",
            &format!(
                r"\bchange\s+(?:the\s+)?text\s+(?:of\s+)?(?:the\s+)?(?P<target>.+?)\s+to\s+{QUOTED_FRAGMENT}"
            ),
            change_text,
        )?,
        Rule::new(
            "add_element",
            r"\badd\s+(?:(?:a|an)\s+)?(?P<kind>.+?)(?:\s*$|\s*[.,;!?]|\s+with\b|\s+that\b)",
            add_element,
        )?,
        Rule::new(
            "make_color",
            &format!(r"\bmake\s+(?:the\s+)?(?P<target>.+?)\s+{basic_color}\b"),
            make_color,
        )?,
        Rule::new(
            "set_background",
            &format!(
                r"\bset\s+(?:the\s+)?background\s+(?:color\s+)?(?:(?:to|as)\s+)?{color}{CLAUSE_END_FRAGMENT}"
            ),
            set_background,
        )?,
        Rule::new(
            "set_text",
            &format!(
                r#"\bset\s+(?:the\s+)?text\s+(?:(?:to|as)\s+)?(?:{QUOTED_FRAGMENT}|(?P<bare>[^"'“”‘’.,;!?]+?){CLAUSE_END_FRAGMENT})"#
            ),
            set_text,
        )?,
    ];

    Ok(RuleTable::new("user_command", rules))
}

fn phrase_target(caps: &Captures<'_>) -> Option<ElementTag> {
    let phrase = caps.name("target")?.as_str().trim();
    if phrase.is_empty() {
        return None;
    }
    Some(ElementTag::parse(phrase))
}

fn change_color(caps: &Captures<'_>, context: &RuleContext) -> Option<EditIntent> {
    let property = caps.name("property")?.as_str().to_lowercase();
    let target = match phrase_target(caps) {
        Some(target) => target,
        // "change the background color to navy" names no element
        None if property.starts_with("background") => ElementTag::Background,
        None => context.selected.clone()?,
    };
    Some(EditIntent::Recolor {
        target,
        color: ColorValue::parse(caps.name("color")?.as_str())?,
    })
}

fn change_text(caps: &Captures<'_>, _: &RuleContext) -> Option<EditIntent> {
    let text = caps.name("text")?.as_str().trim();
    if text.is_empty() {
        return None;
    }
    Some(EditIntent::SetText {
        target: phrase_target(caps)?,
        text: text.to_string(),
    })
}

fn add_element(caps: &Captures<'_>, _: &RuleContext) -> Option<EditIntent> {
    let phrase = caps
        .name("kind")?
        .as_str()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let kind: ElementKind = phrase.parse().ok()?;
    Some(EditIntent::AddElement { kind })
}

fn make_color(caps: &Captures<'_>, _: &RuleContext) -> Option<EditIntent> {
    Some(EditIntent::Recolor {
        target: phrase_target(caps)?,
        color: ColorValue::parse(caps.name("color")?.as_str())?,
    })
}

fn set_background(caps: &Captures<'_>, _: &RuleContext) -> Option<EditIntent> {
    Some(EditIntent::Recolor {
        target: ElementTag::Background,
        color: ColorValue::parse(caps.name("color")?.as_str())?,
    })
}

fn set_text(caps: &Captures<'_>, context: &RuleContext) -> Option<EditIntent> {
    let text = caps
        .name("text")
        .or_else(|| caps.name("bare"))?
        .as_str()
        .trim();
    if text.is_empty() || RESERVED_WORDS.contains(&text.to_lowercase().as_str()) {
        return None;
    }
    Some(EditIntent::SetText {
        target: context.implicit_target(),
        text: text.to_string(),
    })
}
