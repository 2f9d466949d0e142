//! Heuristic edit-intent extraction
//!
//! Two independent rule tables turn short free-form text into an
//! [`EditIntent`]:
//!
//! - [`extract`] reads assistant prose ("I'll make the header blue").
//! - [`extract_user_command`] reads imperative user input ("make the header blue").
//!
//! Both are pure: the same text always yields the same intent, and failing to
//! recognise anything is the ordinary [`EditIntent::NoMatch`] value rather
//! than an error.

mod assistant;
mod command;
mod rules;
mod types;
mod vocabulary;

pub use assistant::{assistant_rules, extract, extract_traced};
pub use command::{
    command_rules, extract_user_command, extract_user_command_traced,
    extract_user_command_with_selection,
};
pub use rules::{Extraction, RuleContext, RuleTable};
pub use types::{ColorValue, EditIntent, ElementKind, ElementTag, UnknownElementKind};
