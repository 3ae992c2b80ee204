/*!
 * Clause classification and reordering.
 *
 * Every token is checked against an ordered rule table; the first rule whose
 * predicate holds decides the token's bucket and gloss. Buckets are then
 * concatenated in target word order.
 */

use log::debug;
use std::fmt;

use super::sequence::{GlossSequence, GlossToken};
use super::token::{DependencyLabel, EntityType, PartOfSpeech, Token};

/// Temporal words that lead the clause when tagged as adverb or adposition
const TEMPORAL_MODIFIERS: [&str; 5] = ["before", "after", "immediately", "now", "later"];

/// Dummy subject dropped from the output
const DUMMY_SUBJECT: &str = "it";

/// Role categories, declared in output order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Bucket {
    Time,
    Modifier,
    Object,
    Subject,
    Verb,
    Negation,
}

impl Bucket {
    /// Output order of the buckets
    pub const ORDER: [Bucket; 6] = [
        Bucket::Time,
        Bucket::Modifier,
        Bucket::Object,
        Bucket::Subject,
        Bucket::Verb,
        Bucket::Negation,
    ];

    fn slot(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Bucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Bucket::Time => "time",
            Bucket::Modifier => "modifier",
            Bucket::Object => "object",
            Bucket::Subject => "subject",
            Bucket::Verb => "verb",
            Bucket::Negation => "negation",
        };
        f.write_str(name)
    }
}

/// One entry of the rule table
pub struct Rule {
    /// Short name used in logs
    pub name: &'static str,
    /// Bucket receiving the gloss
    pub bucket: Bucket,
    matches: fn(&Token) -> bool,
    // None drops the token even though the rule matched
    render: fn(&Token) -> Option<GlossToken>,
}

impl Rule {
    pub fn matches(&self, token: &Token) -> bool {
        (self.matches)(token)
    }

    pub fn render(&self, token: &Token) -> Option<GlossToken> {
        (self.render)(token)
    }
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule")
            .field("name", &self.name)
            .field("bucket", &self.bucket)
            .finish()
    }
}

fn surface(token: &Token) -> Option<GlossToken> {
    Some(GlossToken::from_word(&token.text))
}

fn is_time_entity(token: &Token) -> bool {
    matches!(token.ent_type, Some(EntityType::Date) | Some(EntityType::Time))
}

fn is_temporal_modifier(token: &Token) -> bool {
    matches!(token.pos, PartOfSpeech::Adv | PartOfSpeech::Adp)
        && TEMPORAL_MODIFIERS.contains(&token.lower().as_str())
}

fn is_adverb(token: &Token) -> bool {
    token.pos == PartOfSpeech::Adv
}

fn is_subject(token: &Token) -> bool {
    matches!(token.dep, DependencyLabel::Nsubj | DependencyLabel::Nsubjpass)
}

fn subject(token: &Token) -> Option<GlossToken> {
    if token.lower() == DUMMY_SUBJECT {
        None
    } else {
        surface(token)
    }
}

fn is_verb(token: &Token) -> bool {
    token.pos == PartOfSpeech::Verb
}

fn lemma(token: &Token) -> Option<GlossToken> {
    Some(GlossToken::from_word(&token.lemma))
}

fn is_object(token: &Token) -> bool {
    matches!(
        token.dep,
        DependencyLabel::Dobj | DependencyLabel::Pobj | DependencyLabel::Attr | DependencyLabel::Acomp
    )
}

fn is_negation(token: &Token) -> bool {
    token.dep == DependencyLabel::Neg
}

fn negation(_token: &Token) -> Option<GlossToken> {
    Some(GlossToken::negation())
}

/// Classification rules, highest priority first
pub static RULES: [Rule; 7] = [
    Rule { name: "time-entity", bucket: Bucket::Time, matches: is_time_entity, render: surface },
    Rule { name: "temporal-modifier", bucket: Bucket::Modifier, matches: is_temporal_modifier, render: surface },
    // All remaining adverbs, locative or not, are treated as objects.
    Rule { name: "adverb", bucket: Bucket::Object, matches: is_adverb, render: surface },
    Rule { name: "subject", bucket: Bucket::Subject, matches: is_subject, render: subject },
    Rule { name: "verb", bucket: Bucket::Verb, matches: is_verb, render: lemma },
    Rule { name: "object", bucket: Bucket::Object, matches: is_object, render: surface },
    Rule { name: "negation", bucket: Bucket::Negation, matches: is_negation, render: negation },
];

/// Outcome of classifying one token
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    /// A rule matched and produced a gloss
    Emit {
        rule: &'static str,
        bucket: Bucket,
        gloss: GlossToken,
    },
    /// A rule matched but the token is deliberately dropped
    Dropped { rule: &'static str },
    /// No rule matched
    Unmatched,
}

/// Run a single token through the rule table
pub fn classify_token(token: &Token) -> Decision {
    match RULES.iter().find(|rule| rule.matches(token)) {
        Some(rule) => match rule.render(token) {
            Some(gloss) => Decision::Emit {
                rule: rule.name,
                bucket: rule.bucket,
                gloss,
            },
            None => Decision::Dropped { rule: rule.name },
        },
        None => Decision::Unmatched,
    }
}

/// Classify a clause and emit its glosses in target word order.
///
/// Within a bucket, tokens keep the order in which they were supplied.
pub fn classify<'a, I>(tokens: I) -> GlossSequence
where
    I: IntoIterator<Item = &'a Token>,
{
    let mut buckets: [Vec<GlossToken>; 6] = Default::default();

    for token in tokens {
        match classify_token(token) {
            Decision::Emit { rule, bucket, gloss } => {
                debug!("'{}' -> {} ({}) via {}", token.text, gloss, bucket, rule);
                buckets[bucket.slot()].push(gloss);
            }
            Decision::Dropped { rule } => {
                debug!("'{}' dropped by {}", token.text, rule);
            }
            Decision::Unmatched => {
                debug!("'{}' ({}, {}) matches no rule", token.text, token.pos, token.dep);
            }
        }
    }

    Bucket::ORDER
        .iter()
        .flat_map(|bucket| std::mem::take(&mut buckets[bucket.slot()]))
        .collect()
}
