//! Ordered rule tables
//!
//! A rule is a compiled pattern plus a constructor that turns one match into
//! an [`EditIntent`]. A table evaluates its rules in order and the first rule
//! whose constructor accepts a match wins. Constructors may refuse a match
//! (for instance when the captured color is a grammar word); the rule then
//! tries its later matches before evaluation moves on to the next rule.

use regex::{Captures, Regex};
use serde::Serialize;
use tracing::{debug, trace};

use super::types::{EditIntent, ElementTag};

/// Extra input a constructor may need beyond the matched text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleContext {
    /// Tag of the element the user currently has selected, if any
    pub selected: Option<ElementTag>,
}

impl RuleContext {
    pub fn with_selection(selected: Option<ElementTag>) -> Self {
        Self { selected }
    }

    /// Target used by rules that do not name one explicitly
    pub fn implicit_target(&self) -> ElementTag {
        self.selected.clone().unwrap_or(ElementTag::Heading)
    }
}

impl Default for RuleContext {
    fn default() -> Self {
        Self { selected: None }
    }
}

/// Builds an intent from one match, or refuses it
pub type Constructor = fn(&Captures<'_>, &RuleContext) -> Option<EditIntent>;

pub struct Rule {
    name: &'static str,
    pattern: Regex,
    build: Constructor,
}

impl Rule {
    /// Compiles a rule; patterns are matched case-insensitively
    pub fn new(name: &'static str, pattern: &str, build: Constructor) -> Result<Self, regex::Error> {
        let pattern = Regex::new(&format!("(?i){}", pattern))?;
        Ok(Self {
            name,
            pattern,
            build,
        })
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Returns the intent of the first acceptable match in `text`
    pub fn apply(&self, text: &str, context: &RuleContext) -> Option<EditIntent> {
        self.pattern
            .captures_iter(text)
            .find_map(|caps| (self.build)(&caps, context))
    }
}

impl std::fmt::Debug for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rule")
            .field("name", &self.name)
            .field("pattern", &self.pattern.as_str())
            .finish()
    }
}

/// Outcome of evaluating a table, with the rule that produced it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Extraction {
    pub intent: EditIntent,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rule: Option<&'static str>,
}

impl Extraction {
    pub fn no_match() -> Self {
        Self {
            intent: EditIntent::NoMatch,
            rule: None,
        }
    }
}

#[derive(Debug)]
pub struct RuleTable {
    name: &'static str,
    rules: Vec<Rule>,
}

impl RuleTable {
    pub fn new(name: &'static str, rules: Vec<Rule>) -> Self {
        Self { name, rules }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Rule names in evaluation order
    pub fn rule_names(&self) -> Vec<&'static str> {
        self.rules.iter().map(Rule::name).collect()
    }

    pub fn evaluate(&self, text: &str, context: &RuleContext) -> EditIntent {
        self.evaluate_traced(text, context).intent
    }

    /// Like [`evaluate`](Self::evaluate) but also reports which rule fired
    pub fn evaluate_traced(&self, text: &str, context: &RuleContext) -> Extraction {
        if text.trim().is_empty() {
            trace!(table = self.name, "Empty input, nothing to extract");
            return Extraction::no_match();
        }

        for rule in &self.rules {
            if let Some(intent) = rule.apply(text, context) {
                debug!(table = self.name, rule = rule.name, intent = %intent, "Rule matched");
                return Extraction {
                    intent,
                    rule: Some(rule.name),
                };
            }
        }

        trace!(table = self.name, input_len = text.len(), "No rule matched");
        Extraction::no_match()
    }

    /// Names of every rule that would accept `text` on its own
    ///
    /// Useful when checking which later rules the first match shadows.
    pub fn matching_rules(&self, text: &str, context: &RuleContext) -> Vec<&'static str> {
        self.rules
            .iter()
            .filter(|rule| rule.apply(text, context).is_some())
            .map(Rule::name)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::intent::types::ElementKind;

    fn add_button(_: &Captures<'_>, _: &RuleContext) -> Option<EditIntent> {
        Some(EditIntent::AddElement {
            kind: ElementKind::Button,
        })
    }

    fn add_image(_: &Captures<'_>, _: &RuleContext) -> Option<EditIntent> {
        Some(EditIntent::AddElement {
            kind: ElementKind::Image,
        })
    }

    fn only_second_word(caps: &Captures<'_>, _: &RuleContext) -> Option<EditIntent> {
        (&caps["word"] == "second").then_some(EditIntent::AddElement {
            kind: ElementKind::Section,
        })
    }

    #[test]
    fn test_first_rule_wins() {
        let table = RuleTable::new(
            "test",
            vec![
                Rule::new("buttons", r"\bbutton\b", add_button).unwrap(),
                Rule::new("images", r"\bimage\b", add_image).unwrap(),
            ],
        );

        // The image rule matches earlier in the text but is later in the table
        let result = table.evaluate_traced("an image and a button", &RuleContext::default());
        assert_eq!(result.rule, Some("buttons"));
        assert_eq!(
            table.matching_rules("an image and a button", &RuleContext::default()),
            vec!["buttons", "images"]
        );
    }

    #[test]
    fn test_rules_are_case_insensitive() {
        let rule = Rule::new("buttons", r"\bbutton\b", add_button).unwrap();
        assert!(rule.apply("A BUTTON", &RuleContext::default()).is_some());
    }

    #[test]
    fn test_refused_match_tries_later_matches() {
        let rule = Rule::new("words", r"(?P<word>first|second)", only_second_word).unwrap();
        let intent = rule.apply("first then second", &RuleContext::default());
        assert_eq!(
            intent,
            Some(EditIntent::AddElement {
                kind: ElementKind::Section
            })
        );
        assert!(rule.apply("first first", &RuleContext::default()).is_none());
    }

    #[test]
    fn test_empty_input_is_no_match() {
        let table = RuleTable::new(
            "test",
            vec![Rule::new("anything", r".*", add_button).unwrap()],
        );
        assert_eq!(table.evaluate("", &RuleContext::default()), EditIntent::NoMatch);
        assert_eq!(table.evaluate("   \n", &RuleContext::default()), EditIntent::NoMatch);
    }

    #[test]
    fn test_implicit_target_defaults_to_heading() {
        assert_eq!(RuleContext::default().implicit_target(), ElementTag::Heading);
        let ctx = RuleContext::with_selection(Some(ElementTag::Footer));
        assert_eq!(ctx.implicit_target(), ElementTag::Footer);
    }

    #[test]
    fn test_invalid_pattern_is_an_error() {
        assert!(Rule::new("broken", r"(unclosed", add_button).is_err());
    }

    #[test]
    fn test_rule_names_in_order() {
        let table = RuleTable::new(
            "test",
            vec![
                Rule::new("one", "a", add_button).unwrap(),
                Rule::new("two", "b", add_image).unwrap(),
            ],
        );
        assert_eq!(table.rule_names(), vec!["one", "two"]);
        assert_eq!(table.name(), "test");
    }
}
