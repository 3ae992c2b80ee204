/*!
 * Clause splitting.
 *
 * Decides, for every token of a sentence, whether it belongs to the
 * conditional clause or to the main clause. Membership is kept as a mask over
 * the ordered sentence so both clause views iterate in sentence order.
 */

use log::trace;

use super::token::{DependencyLabel, ParsedSentence, Token};

/// Word that marks its head's subtree as a condition
const CONDITIONAL_TRIGGER: &str = "if";

/// Condition/main partition of one sentence
#[derive(Debug, Clone)]
pub struct ClauseSplit<'a> {
    sentence: &'a ParsedSentence,
    in_condition: Vec<bool>,
}

impl<'a> ClauseSplit<'a> {
    /// Condition tokens in sentence order
    pub fn condition(&self) -> impl Iterator<Item = &'a Token> + '_ {
        self.members(true)
    }

    /// Main clause tokens in sentence order
    pub fn main(&self) -> impl Iterator<Item = &'a Token> + '_ {
        self.members(false)
    }

    pub fn is_condition(&self, index: usize) -> bool {
        self.in_condition.get(index).copied().unwrap_or(false)
    }

    pub fn has_condition(&self) -> bool {
        self.in_condition.iter().any(|&c| c)
    }

    fn members(&self, condition: bool) -> impl Iterator<Item = &'a Token> + '_ {
        let tokens = self.sentence.tokens();
        tokens
            .iter()
            .filter(move |t| self.in_condition[t.index] == condition)
    }
}

/// Partition a sentence into its condition and main clauses.
///
/// Every `advcl` token moves its subtree into the condition; every "if" moves
/// the subtree of its head. Multiple triggers merge into one condition.
pub fn split_clauses(sentence: &ParsedSentence) -> ClauseSplit<'_> {
    let mut in_condition = vec![false; sentence.len()];

    for token in sentence.tokens() {
        if token.dep == DependencyLabel::Advcl {
            trace!("advcl '{}' opens a condition", token.text);
            mark_subtree(sentence, token.index, &mut in_condition);
        }

        if token.lower() == CONDITIONAL_TRIGGER {
            let head = sentence.head(token);
            trace!("'{}' marks the clause headed by '{}' as a condition", token.text, head.text);
            mark_subtree(sentence, head.index, &mut in_condition);
        }
    }

    ClauseSplit {
        sentence,
        in_condition,
    }
}

fn mark_subtree(sentence: &ParsedSentence, root: usize, in_condition: &mut [bool]) {
    for index in sentence.subtree(root) {
        in_condition[index] = true;
    }
}
