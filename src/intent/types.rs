//! Edit intent types
//!
//! These are the structured values the extractors produce. They carry logical
//! names only (`header`, `button`, ...); mapping them onto real markup is the
//! job of whoever consumes the intent.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::vocabulary::RESERVED_WORDS;

/// Structured result of interpreting free text as a website edit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EditIntent {
    /// Change the color of a target region
    Recolor {
        target: ElementTag,
        color: ColorValue,
    },
    /// Replace the text content of a target region
    SetText { target: ElementTag, text: String },
    /// Append a new element of the given kind
    AddElement { kind: ElementKind },
    /// The text did not describe any recognised edit
    NoMatch,
}

impl EditIntent {
    /// Returns true for every variant except `NoMatch`
    pub fn is_match(&self) -> bool {
        !matches!(self, EditIntent::NoMatch)
    }

    /// Short lowercase name of the variant, as used in serialized output
    pub fn kind_name(&self) -> &'static str {
        match self {
            EditIntent::Recolor { .. } => "recolor",
            EditIntent::SetText { .. } => "set_text",
            EditIntent::AddElement { .. } => "add_element",
            EditIntent::NoMatch => "no_match",
        }
    }
}

impl Default for EditIntent {
    fn default() -> Self {
        EditIntent::NoMatch
    }
}

impl fmt::Display for EditIntent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EditIntent::Recolor { target, color } => write!(f, "recolor {} -> {}", target, color),
            EditIntent::SetText { target, text } => write!(f, "set text of {} -> \"{}\"", target, text),
            EditIntent::AddElement { kind } => write!(f, "add {}", kind),
            EditIntent::NoMatch => write!(f, "no match"),
        }
    }
}

/// Logical name of a targetable region of the page
///
/// The named variants are the targets the assistant rule table recognises.
/// Anything else a user types ends up in `Other`, lowercased and trimmed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ElementTag {
    Header,
    Navigation,
    Button,
    Background,
    Footer,
    Heading,
    Title,
    Paragraph,
    Description,
    Other(String),
}

impl ElementTag {
    /// Every named tag, in the order the assistant rules try them
    pub const KNOWN: [ElementTag; 9] = [
        ElementTag::Header,
        ElementTag::Navigation,
        ElementTag::Button,
        ElementTag::Background,
        ElementTag::Footer,
        ElementTag::Heading,
        ElementTag::Title,
        ElementTag::Paragraph,
        ElementTag::Description,
    ];

    /// Parses a free-text phrase, case-insensitively
    pub fn parse(phrase: &str) -> Self {
        let normalized = phrase.trim().to_lowercase();
        match normalized.as_str() {
            "header" => ElementTag::Header,
            "navigation" => ElementTag::Navigation,
            "button" => ElementTag::Button,
            "background" => ElementTag::Background,
            "footer" => ElementTag::Footer,
            "heading" => ElementTag::Heading,
            "title" => ElementTag::Title,
            "paragraph" => ElementTag::Paragraph,
            "description" => ElementTag::Description,
            _ => ElementTag::Other(normalized),
        }
    }

    /// Maps an HTML tag name onto the logical tag a user would call it
    ///
    /// Tags without a named variant keep a readable name (`img` becomes
    /// `image`, `a` becomes `link`) or fall back to the tag itself.
    pub fn from_html_tag(tag_name: &str) -> Self {
        match tag_name.trim().to_lowercase().as_str() {
            "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => ElementTag::Heading,
            "p" => ElementTag::Paragraph,
            "button" => ElementTag::Button,
            "header" => ElementTag::Header,
            "footer" => ElementTag::Footer,
            "nav" => ElementTag::Navigation,
            "img" => ElementTag::Other("image".to_string()),
            "a" => ElementTag::Other("link".to_string()),
            other => ElementTag::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            ElementTag::Header => "header",
            ElementTag::Navigation => "navigation",
            ElementTag::Button => "button",
            ElementTag::Background => "background",
            ElementTag::Footer => "footer",
            ElementTag::Heading => "heading",
            ElementTag::Title => "title",
            ElementTag::Paragraph => "paragraph",
            ElementTag::Description => "description",
            ElementTag::Other(name) => name,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, ElementTag::Other(_))
    }
}

impl fmt::Display for ElementTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for ElementTag {
    fn from(phrase: &str) -> Self {
        ElementTag::parse(phrase)
    }
}

impl From<String> for ElementTag {
    fn from(phrase: String) -> Self {
        ElementTag::parse(&phrase)
    }
}

impl From<ElementTag> for String {
    fn from(tag: ElementTag) -> Self {
        tag.as_str().to_string()
    }
}

/// Logical name of an insertable markup fragment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ElementKind {
    #[serde(rename = "button")]
    Button,
    #[serde(rename = "image")]
    Image,
    #[serde(rename = "paragraph")]
    Paragraph,
    #[serde(rename = "heading")]
    Heading,
    #[serde(rename = "section")]
    Section,
    #[serde(rename = "form")]
    Form,
    #[serde(rename = "contact form")]
    ContactForm,
}

impl ElementKind {
    pub const ALL: [ElementKind; 7] = [
        ElementKind::Button,
        ElementKind::Image,
        ElementKind::Paragraph,
        ElementKind::Heading,
        ElementKind::Section,
        ElementKind::Form,
        ElementKind::ContactForm,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ElementKind::Button => "button",
            ElementKind::Image => "image",
            ElementKind::Paragraph => "paragraph",
            ElementKind::Heading => "heading",
            ElementKind::Section => "section",
            ElementKind::Form => "form",
            ElementKind::ContactForm => "contact form",
        }
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ElementKind {
    type Err = UnknownElementKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        ElementKind::ALL
            .iter()
            .copied()
            .find(|kind| kind.as_str() == normalized)
            .ok_or(UnknownElementKind(normalized))
    }
}

/// Returned when a phrase is not one of the insertable element kinds
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown element kind: {0}")]
pub struct UnknownElementKind(pub String);

/// A color token exactly as it appeared in the text (lowercased)
///
/// Either a bare word (`blue`, `tomato`) or a 3/6 digit hex value. Nothing
/// checks that a word is an actual CSS color name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColorValue(String);

impl ColorValue {
    /// Accepts `[a-z]+`, `#[0-9a-f]{3}` or `#[0-9a-f]{6}`
    ///
    /// Words the extractor grammar itself uses (`text`, `color`, ...) are
    /// rejected so a phrase like "the heading text to" is never read as a
    /// recolor to "text".
    pub fn parse(token: &str) -> Option<Self> {
        let token = token.trim().to_lowercase();

        if let Some(digits) = token.strip_prefix('#') {
            let valid = matches!(digits.len(), 3 | 6) && digits.chars().all(|c| c.is_ascii_hexdigit());
            return valid.then_some(ColorValue(token));
        }

        if token.is_empty() || !token.chars().all(|c| c.is_ascii_lowercase()) {
            return None;
        }
        if RESERVED_WORDS.contains(&token.as_str()) {
            return None;
        }

        Some(ColorValue(token))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_hex(&self) -> bool {
        self.0.starts_with('#')
    }
}

impl fmt::Display for ColorValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
