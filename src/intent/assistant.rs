//! Extraction from assistant-authored prose
//!
//! Replies such as "I'll make the header blue" or "You could try changing the
//! background color to #334455" are matched against a fixed table. Declarative
//! phrasing is tried before hedged phrasing, and recolor rules come before
//! text rules, which come before addition rules.

use regex::Captures;
use std::sync::OnceLock;

use super::rules::{Extraction, Rule, RuleContext, RuleTable};
use super::types::{ColorValue, EditIntent, ElementKind, ElementTag};
use super::vocabulary::{
    alternation, COLOR_FRAGMENT, DECLARATIVE_PHRASES, HEDGING_PHRASES, KIND_WORDS,
    QUOTED_FRAGMENT, TARGET_WORDS,
};

/// Interprets assistant prose as a website edit
///
/// Fenced code blocks should already be stripped from `text`.
pub fn extract(text: &str) -> EditIntent {
    assistant_rules().evaluate(text, &RuleContext::default())
}

/// Same as [`extract`] but also names the rule that fired
pub fn extract_traced(text: &str) -> Extraction {
    assistant_rules().evaluate_traced(text, &RuleContext::default())
}

/// The compiled assistant rule table
pub fn assistant_rules() -> &'static RuleTable {
    static TABLE: OnceLock<RuleTable> = OnceLock::new();
    TABLE.get_or_init(|| build_table().expect("Invalid assistant rule pattern"))
}

fn build_table() -> Result<RuleTable, regex::Error> {
    let declarative = alternation(DECLARATIVE_PHRASES);
    let hedging = alternation(HEDGING_PHRASES);
    let target = format!("(?P<target>{})", alternation(TARGET_WORDS));
    let kind = format!("(?P<kind>{})", alternation(KIND_WORDS));
    let color = format!("(?P<color>{})", COLOR_FRAGMENT);

    let rules = vec![
        Rule::new(
            "direct_recolor",
            &format!(
                r"\b{declarative}\s+(?:make|change|set)\s+the\s+{target}\s+(?:to\s+)?{color}"
            ),
            recolor,
        )?,
        Rule::new(
            "suggested_recolor",
            &format!(
                r"\b{hedging}\s+(?:changing|setting|making|updating)\s+the\s+{target}\s+(?:color|background)\s+(?:to|as)\s+{color}"
            ),
            recolor,
        )?,
        Rule::new(
            "mentioned_recolor",
            &format!(r"\b{target}\s+(?:would\s+look\s+better|should\s+be|could\s+be)\s+(?:in\s+)?{color}"),
            recolor,
        )?,
        Rule::new(
            "direct_text_change",
            &format!(
                r"\b{declarative}\s+(?:change|update|set)\s+the\s+{target}\s+(?:text\s+)?to\s+{QUOTED_FRAGMENT}"
            ),
            set_text,
        )?,
        Rule::new(
            "suggested_text_change",
            &format!(
                r"\b{hedging}\s+(?:changing|updating|setting)\s+the\s+{target}\s+(?:text|content|copy)\s+to\s+{QUOTED_FRAGMENT}"
            ),
            set_text,
        )?,
        Rule::new(
            "direct_addition",
            &format!(r"\b{declarative}\s+add\s+(?:(?:a|an)\s+)?{kind}\b"),
            add_element,
        )?,
        Rule::new(
            "suggested_addition",
            &format!(r"\b{hedging}\s+(?:add|insert|include|create)\s+(?:(?:a|an)\s+)?{kind}\b"),
            add_element,
        )?,
    ];

    Ok(RuleTable::new("assistant", rules))
}

fn recolor(caps: &Captures<'_>, _: &RuleContext) -> Option<EditIntent> {
    Some(EditIntent::Recolor {
        target: ElementTag::parse(caps.name("target")?.as_str()),
        color: ColorValue::parse(caps.name("color")?.as_str())?,
    })
}

fn set_text(caps: &Captures<'_>, _: &RuleContext) -> Option<EditIntent> {
    let text = caps.name("text")?.as_str().trim();
    if text.is_empty() {
        return None;
    }
    Some(EditIntent::SetText {
        target: ElementTag::parse(caps.name("target")?.as_str()),
        text: text.to_string(),
    })
}

fn add_element(caps: &Captures<'_>, _: &RuleContext) -> Option<EditIntent> {
    // Multi-word kinds may have matched across any whitespace run
    let phrase = caps
        .name("kind")?
        .as_str()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let kind: ElementKind = phrase.parse().ok()?;
    Some(EditIntent::AddElement { kind })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recolor_intent(target: ElementTag, color: &str) -> EditIntent {
        EditIntent::Recolor {
            target,
            color: ColorValue::parse(color).unwrap(),
        }
    }

    #[test]
    fn test_table_compiles_in_order() {
        assert_eq!(
            assistant_rules().rule_names(),
            vec![
                "direct_recolor",
                "suggested_recolor",
                "mentioned_recolor",
                "direct_text_change",
                "suggested_text_change",
                "direct_addition",
                "suggested_addition",
            ]
        );
    }

    #[test]
    fn test_direct_recolor() {
        assert_eq!(
            extract("I'll make the header blue"),
            recolor_intent(ElementTag::Header, "blue")
        );
        assert_eq!(
            extract("Let's set the footer to #abc."),
            recolor_intent(ElementTag::Footer, "#abc")
        );
    }

    #[test]
    fn test_suggested_recolor() {
        assert_eq!(
            extract("You should try changing the background color to #334455"),
            recolor_intent(ElementTag::Background, "#334455")
        );
        assert_eq!(
            extract("I recommend updating the button background as orange."),
            recolor_intent(ElementTag::Button, "orange")
        );
    }

    #[test]
    fn test_mentioned_recolor() {
        assert_eq!(
            extract("Honestly, the navigation would look better in navy."),
            recolor_intent(ElementTag::Navigation, "navy")
        );
        assert_eq!(
            extract("The footer should be #FFF"),
            recolor_intent(ElementTag::Footer, "#fff")
        );
    }

    #[test]
    fn test_direct_text_change_keeps_casing() {
        assert_eq!(
            extract("I'll change the heading text to \"Welcome Home\""),
            EditIntent::SetText {
                target: ElementTag::Heading,
                text: "Welcome Home".to_string(),
            }
        );
        assert_eq!(
            extract("Let's update the title to 'Our Story'"),
            EditIntent::SetText {
                target: ElementTag::Title,
                text: "Our Story".to_string(),
            }
        );
    }

    #[test]
    fn test_suggested_text_change() {
        assert_eq!(
            extract("You might consider... actually, I suggest updating the description copy to \"Fresh bread daily\"."),
            EditIntent::SetText {
                target: ElementTag::Description,
                text: "Fresh bread daily".to_string(),
            }
        );
    }

    #[test]
    fn test_additions() {
        assert_eq!(
            extract("Let's add a contact form"),
            EditIntent::AddElement {
                kind: ElementKind::ContactForm
            }
        );
        assert_eq!(
            extract("I will add an image below the hero."),
            EditIntent::AddElement {
                kind: ElementKind::Image
            }
        );
        assert_eq!(
            extract("You could include a section about pricing."),
            EditIntent::AddElement {
                kind: ElementKind::Section
            }
        );
    }

    #[test]
    fn test_typographic_apostrophe() {
        assert_eq!(
            extract("I’ll make the button green"),
            recolor_intent(ElementTag::Button, "green")
        );
    }

    #[test]
    fn test_grammar_word_is_not_a_color() {
        // "text" would otherwise satisfy the direct recolor pattern
        let traced = extract_traced("I'll change the heading text to \"Hi\"");
        assert_eq!(traced.rule, Some("direct_text_change"));
    }

    #[test]
    fn test_addition_requires_known_kind() {
        assert_eq!(extract("Let's add a carousel"), EditIntent::NoMatch);
    }

    #[test]
    fn test_verbs_need_word_boundaries() {
        // "twill" ends in "will" but is not a hedge
        assert_eq!(extract("Order twill add a button"), EditIntent::NoMatch);
    }

    #[test]
    fn test_no_match() {
        assert_eq!(extract(""), EditIntent::NoMatch);
        assert_eq!(
            extract("Here is some general advice about typography."),
            EditIntent::NoMatch
        );
    }
}
