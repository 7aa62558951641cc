//! Heuristic detection of "a call on the receiver".
//!
//! Without type information a selector call `x.name()` is attributed to the
//! current receiver when `x` is the receiver parameter, a configured alias
//! such as `self`, or (as a fallback for inconsistent receiver names across
//! methods of one type) a single letter equal to the first letter of the
//! receiver parameter, ignoring case. The fallback can both miss calls and
//! attribute calls on unrelated locals, so it stays configurable.

use crate::config::ReceiverMatching;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReceiverMatcher {
    aliases: Vec<String>,
    single_letter_fallback: bool,
}

impl Default for ReceiverMatcher {
    fn default() -> Self {
        Self::from_config(&ReceiverMatching::default())
    }
}

impl ReceiverMatcher {
    pub fn from_config(config: &ReceiverMatching) -> Self {
        Self {
            aliases: config.aliases.clone(),
            single_letter_fallback: config.single_letter_fallback,
        }
    }

    /// Whether `operand` refers to the receiver named `receiver_ident`.
    pub fn is_receiver(&self, operand: &str, receiver_ident: Option<&str>) -> bool {
        if operand.is_empty() {
            return false;
        }
        if receiver_ident == Some(operand) {
            return true;
        }
        if self.aliases.iter().any(|alias| alias == operand) {
            return true;
        }
        self.single_letter_fallback
            && receiver_ident.is_some_and(|ident| same_initial(operand, ident))
    }
}

fn same_initial(operand: &str, ident: &str) -> bool {
    let mut operand_chars = operand.chars();
    let (Some(letter), None) = (operand_chars.next(), operand_chars.next()) else {
        return false;
    };
    ident
        .chars()
        .next()
        .is_some_and(|first| first.to_lowercase().eq(letter.to_lowercase()))
}
