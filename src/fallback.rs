//! Canned replies for when the completion backend is unreachable
//!
//! The reply is picked from the first keyword group the user message mentions.
//! Keywords match whole words, case-insensitively.

use regex::Regex;
use std::sync::OnceLock;

/// Sentence every fallback reply starts with
pub const FALLBACK_PREFIX: &str =
    "I'm having trouble connecting to my backend. Here's a simple suggestion instead: ";

const GREETING_REPLY: &str = "Hello! I'm your website assistant. I can change colors, \
rework layouts, add new sections or rewrite text. What would you like to work on first?";

const COLOR_REPLY: &str = "Let's freshen up the color scheme. A blue header, a light gray \
page background and an orange accent for buttons give good contrast.

```css
header {
  background-color: #3b82f6;
  color: white;
}

body {
  background-color: #f9fafb;
}

button, .btn, .cta {
  background-color: #f97316;
  color: white;
}
```";

const TEXT_REPLY: &str = "Let's tidy up the typography. Montserrat at weight 700 works well \
for headings and Roboto keeps body text readable.

```css
@import url('https://fonts.googleapis.com/css2?family=Montserrat:wght@400;700&family=Roboto:wght@400;700&display=swap');

h1, h2, h3, h4, h5, h6 {
  font-family: 'Montserrat', sans-serif;
  font-weight: 700;
}

h1 {
  font-size: 2.5rem;
}

body, p, li, a {
  font-family: 'Roboto', sans-serif;
  font-size: 1rem;
  line-height: 1.6;
}
```";

const ADD_REPLY: &str = "Here is a features section with three cards in a responsive grid.

```html
<section class=\"features\">
  <h2>Our Services</h2>
  <div class=\"feature-grid\">
    <div class=\"feature-card\"><h3>Fast</h3><p>Pages that load in a blink.</p></div>
    <div class=\"feature-card\"><h3>Simple</h3><p>Edit everything from one place.</p></div>
    <div class=\"feature-card\"><h3>Reliable</h3><p>Built to stay online.</p></div>
  </div>
</section>
```

```css
.feature-grid {
  display: grid;
  grid-template-columns: repeat(auto-fit, minmax(240px, 1fr));
  gap: 1.5rem;
}

.feature-card {
  padding: 1.5rem;
  border-radius: 8px;
  box-shadow: 0 2px 8px rgba(0, 0, 0, 0.08);
}
```";

const DEFAULT_REPLY: &str = "I can help with colors, fonts, layout and new sections. \
Try something like \"make the header blue\" or \"add a contact form\".";

struct KeywordGroup {
    keywords: Regex,
    reply: &'static str,
}

fn keyword_groups() -> &'static [KeywordGroup] {
    static GROUPS: OnceLock<Vec<KeywordGroup>> = OnceLock::new();
    GROUPS.get_or_init(|| {
        [
            (r"hello|hi|hey", GREETING_REPLY),
            (r"colou?rs?|background", COLOR_REPLY),
            (r"text|fonts?|headings?", TEXT_REPLY),
            (r"add|insert|create", ADD_REPLY),
        ]
        .into_iter()
        .map(|(words, reply)| KeywordGroup {
            keywords: Regex::new(&format!(r"(?i)\b(?:{})\b", words))
                .expect("Invalid fallback keyword regex"),
            reply,
        })
        .collect()
    })
}

/// Builds the full fallback reply for a user message, prefix included
pub fn fallback_reply(message: &str) -> String {
    let body = keyword_groups()
        .iter()
        .find(|group| group.keywords.is_match(message))
        .map_or(DEFAULT_REPLY, |group| group.reply);
    format!("{}{}", FALLBACK_PREFIX, body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reply::AssistantReply;

    #[test]
    fn test_greeting() {
        let reply = fallback_reply("Hey there");
        assert!(reply.starts_with(FALLBACK_PREFIX));
        assert!(reply.ends_with(GREETING_REPLY));
    }

    #[test]
    fn test_color_reply_carries_css() {
        let reply = AssistantReply::parse(&fallback_reply("change the background please"));
        assert!(reply.css.unwrap().contains("#3b82f6"));
        assert!(reply.html.is_none());
    }

    #[test]
    fn test_first_group_wins() {
        // Mentions both text and add; text comes first in the group order
        let reply = fallback_reply("add some text");
        assert!(reply.ends_with(TEXT_REPLY));
    }

    #[test]
    fn test_add_reply_carries_html() {
        let reply = AssistantReply::parse(&fallback_reply("Insert a section"));
        assert!(reply.html.unwrap().contains("feature-grid"));
        assert!(reply.css.is_some());
    }

    #[test]
    fn test_keywords_match_whole_words() {
        // "this" contains "hi" and "address" contains "add"
        assert!(fallback_reply("this address").ends_with(DEFAULT_REPLY));
    }
}
