//! Word lists and regex fragments shared by the rule tables

/// Declarative openers: the assistant states it will do something
pub const DECLARATIVE_PHRASES: &[&str] = &["i'll", "i’ll", "i will", "let's", "let’s"];

/// Hedging openers: the assistant suggests something
pub const HEDGING_PHRASES: &[&str] = &[
    "could",
    "should",
    "might",
    "try",
    "recommend",
    "suggest",
    "would",
    "will",
];

/// Targets recognised by the assistant rules
pub const TARGET_WORDS: &[&str] = &[
    "header",
    "navigation",
    "button",
    "background",
    "footer",
    "heading",
    "title",
    "paragraph",
    "description",
];

/// Insertable element kinds; `contact form` must precede `form`
pub const KIND_WORDS: &[&str] = &[
    "contact form",
    "button",
    "image",
    "paragraph",
    "heading",
    "section",
    "form",
];

/// Words of the extractor grammar that can never be a color
pub const RESERVED_WORDS: &[&str] = &[
    "a",
    "an",
    "as",
    "background",
    "be",
    "color",
    "colour",
    "content",
    "copy",
    "in",
    "text",
    "the",
    "to",
];

/// CSS basic color keywords, used where a bare trailing word has to be a color
pub const BASIC_COLOR_NAMES: &[&str] = &[
    "aqua", "black", "blue", "fuchsia", "gray", "green", "grey", "lime", "maroon", "navy",
    "olive", "orange", "pink", "purple", "red", "silver", "teal", "white", "yellow",
];

/// Hex triplet/sextet or a single lowercase word
pub const COLOR_FRAGMENT: &str = r"#(?:[0-9a-f]{6}|[0-9a-f]{3})\b|[a-z]+\b";

/// Opening quote, minimal run of non-quote characters, closing quote
pub const QUOTED_FRAGMENT: &str = r#"["'“‘](?P<text>[^"'“”‘’]+)["'”’]"#;

/// End of a user command clause
pub const CLAUSE_END_FRAGMENT: &str = r"\s*(?:$|[.,;!?])";

/// Builds a non-capturing alternation from literal words
///
/// Internal spaces match any run of whitespace.
pub fn alternation(words: &[&str]) -> String {
    let escaped: Vec<String> = words
        .iter()
        .map(|word| {
            word.split(' ')
                .map(regex::escape)
                .collect::<Vec<_>>()
                .join(r"\s+")
        })
        .collect();
    format!("(?:{})", escaped.join("|"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use regex::Regex;

    #[test]
    fn test_alternation_escapes_and_spaces() {
        let alt = alternation(&["contact form", "a.b"]);
        assert_eq!(alt, r"(?:contact\s+form|a\.b)");
    }

    #[test]
    fn test_alternation_matches_multiword() {
        let re = Regex::new(&format!("^{}$", alternation(KIND_WORDS))).unwrap();
        assert!(re.is_match("contact   form"));
        assert!(re.is_match("section"));
        assert!(!re.is_match("carousel"));
    }

    #[test]
    fn test_color_fragment() {
        let re = Regex::new(&format!("^(?:{})$", COLOR_FRAGMENT)).unwrap();
        assert!(re.is_match("#abc"));
        assert!(re.is_match("#a1b2c3"));
        assert!(re.is_match("teal"));
        assert!(!re.is_match("#abcd"));
    }

    #[test]
    fn test_quoted_fragment_captures_inner_run() {
        let re = Regex::new(QUOTED_FRAGMENT).unwrap();
        let caps = re.captures(r#"to "Welcome Home" now"#).unwrap();
        assert_eq!(&caps["text"], "Welcome Home");
        let caps = re.captures("to 'Hi there'").unwrap();
        assert_eq!(&caps["text"], "Hi there");
        let caps = re.captures("to “Curly”").unwrap();
        assert_eq!(&caps["text"], "Curly");
    }

    #[test]
    fn test_contact_form_listed_before_form() {
        let contact = KIND_WORDS.iter().position(|w| *w == "contact form");
        let form = KIND_WORDS.iter().position(|w| *w == "form");
        assert!(contact < form);
    }
}
