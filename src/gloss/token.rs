/*!
 * Annotated token model.
 *
 * Tokens are produced by an annotator and never mutated afterwards. A
 * `ParsedSentence` owns the tokens of one annotated input and answers
 * structural questions (head, subtree) from the head indices.
 */

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::AnnotationError;

/// Coarse part-of-speech tag (Universal POS tag set)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PartOfSpeech {
    Adj,
    Adp,
    Adv,
    Aux,
    Cconj,
    Det,
    Intj,
    Noun,
    Num,
    Part,
    Pron,
    Propn,
    Punct,
    Sconj,
    Sym,
    Verb,
    X,
    Space,
    /// Tag outside the universal set, kept verbatim
    Other(String),
}

impl PartOfSpeech {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Adj => "ADJ",
            Self::Adp => "ADP",
            Self::Adv => "ADV",
            Self::Aux => "AUX",
            Self::Cconj => "CCONJ",
            Self::Det => "DET",
            Self::Intj => "INTJ",
            Self::Noun => "NOUN",
            Self::Num => "NUM",
            Self::Part => "PART",
            Self::Pron => "PRON",
            Self::Propn => "PROPN",
            Self::Punct => "PUNCT",
            Self::Sconj => "SCONJ",
            Self::Sym => "SYM",
            Self::Verb => "VERB",
            Self::X => "X",
            Self::Space => "SPACE",
            Self::Other(tag) => tag.as_str(),
        }
    }
}

impl From<&str> for PartOfSpeech {
    fn from(tag: &str) -> Self {
        match tag.trim().to_uppercase().as_str() {
            "ADJ" => Self::Adj,
            "ADP" => Self::Adp,
            "ADV" => Self::Adv,
            "AUX" => Self::Aux,
            "CCONJ" | "CONJ" => Self::Cconj,
            "DET" => Self::Det,
            "INTJ" => Self::Intj,
            "NOUN" => Self::Noun,
            "NUM" => Self::Num,
            "PART" => Self::Part,
            "PRON" => Self::Pron,
            "PROPN" => Self::Propn,
            "PUNCT" => Self::Punct,
            "SCONJ" => Self::Sconj,
            "SYM" => Self::Sym,
            "VERB" => Self::Verb,
            "X" => Self::X,
            "SPACE" => Self::Space,
            _ => Self::Other(tag.to_string()),
        }
    }
}

impl From<String> for PartOfSpeech {
    fn from(tag: String) -> Self {
        Self::from(tag.as_str())
    }
}

impl From<PartOfSpeech> for String {
    fn from(pos: PartOfSpeech) -> Self {
        pos.as_str().to_string()
    }
}

impl fmt::Display for PartOfSpeech {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Dependency relation of a token to its syntactic head
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum DependencyLabel {
    Root,
    Nsubj,
    Nsubjpass,
    Dobj,
    Pobj,
    Attr,
    Acomp,
    Neg,
    Advcl,
    Advmod,
    Amod,
    Aux,
    Det,
    Mark,
    Prep,
    Punct,
    Compound,
    /// Any other label, kept verbatim in lowercase
    Other(String),
}

impl DependencyLabel {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Root => "ROOT",
            Self::Nsubj => "nsubj",
            Self::Nsubjpass => "nsubjpass",
            Self::Dobj => "dobj",
            Self::Pobj => "pobj",
            Self::Attr => "attr",
            Self::Acomp => "acomp",
            Self::Neg => "neg",
            Self::Advcl => "advcl",
            Self::Advmod => "advmod",
            Self::Amod => "amod",
            Self::Aux => "aux",
            Self::Det => "det",
            Self::Mark => "mark",
            Self::Prep => "prep",
            Self::Punct => "punct",
            Self::Compound => "compound",
            Self::Other(label) => label.as_str(),
        }
    }
}

impl From<&str> for DependencyLabel {
    fn from(label: &str) -> Self {
        let normalized = label.trim().to_lowercase();
        match normalized.as_str() {
            "root" => Self::Root,
            "nsubj" => Self::Nsubj,
            "nsubjpass" => Self::Nsubjpass,
            "dobj" => Self::Dobj,
            "pobj" => Self::Pobj,
            "attr" => Self::Attr,
            "acomp" => Self::Acomp,
            "neg" => Self::Neg,
            "advcl" => Self::Advcl,
            "advmod" => Self::Advmod,
            "amod" => Self::Amod,
            "aux" => Self::Aux,
            "det" => Self::Det,
            "mark" => Self::Mark,
            "prep" => Self::Prep,
            "punct" => Self::Punct,
            "compound" => Self::Compound,
            _ => Self::Other(normalized),
        }
    }
}

impl From<String> for DependencyLabel {
    fn from(label: String) -> Self {
        Self::from(label.as_str())
    }
}

impl From<DependencyLabel> for String {
    fn from(dep: DependencyLabel) -> Self {
        dep.as_str().to_string()
    }
}

impl fmt::Display for DependencyLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Named-entity category
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum EntityType {
    Date,
    Time,
    Person,
    Org,
    Gpe,
    Loc,
    Cardinal,
    /// Any other category, kept verbatim
    Other(String),
}

impl EntityType {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Date => "DATE",
            Self::Time => "TIME",
            Self::Person => "PERSON",
            Self::Org => "ORG",
            Self::Gpe => "GPE",
            Self::Loc => "LOC",
            Self::Cardinal => "CARDINAL",
            Self::Other(label) => label.as_str(),
        }
    }

    /// Parse an annotator entity label; empty labels mean "no entity"
    pub fn parse_optional(label: &str) -> Option<Self> {
        let trimmed = label.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self::from(trimmed))
        }
    }
}

impl From<&str> for EntityType {
    fn from(label: &str) -> Self {
        match label.trim().to_uppercase().as_str() {
            "DATE" => Self::Date,
            "TIME" => Self::Time,
            "PERSON" => Self::Person,
            "ORG" => Self::Org,
            "GPE" => Self::Gpe,
            "LOC" => Self::Loc,
            "CARDINAL" => Self::Cardinal,
            _ => Self::Other(label.trim().to_string()),
        }
    }
}

impl From<String> for EntityType {
    fn from(label: String) -> Self {
        Self::from(label.as_str())
    }
}

impl From<EntityType> for String {
    fn from(ent: EntityType) -> Self {
        ent.as_str().to_string()
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One annotated word occurrence
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    /// Position in the parsed sentence
    pub index: usize,

    /// Surface form
    pub text: String,

    /// Base form
    pub lemma: String,

    /// Coarse part-of-speech tag
    pub pos: PartOfSpeech,

    /// Dependency label towards the head
    pub dep: DependencyLabel,

    /// Named-entity category, if any
    pub ent_type: Option<EntityType>,

    /// Index of the syntactic head; the root points at itself
    pub head: usize,
}

impl Token {
    pub fn new(
        index: usize,
        text: impl Into<String>,
        lemma: impl Into<String>,
        pos: PartOfSpeech,
        dep: DependencyLabel,
        head: usize,
    ) -> Self {
        Self {
            index,
            text: text.into(),
            lemma: lemma.into(),
            pos,
            dep,
            ent_type: None,
            head,
        }
    }

    /// Attach a named-entity category
    pub fn with_entity(mut self, ent_type: EntityType) -> Self {
        self.ent_type = Some(ent_type);
        self
    }

    /// Lowercased surface text
    pub fn lower(&self) -> String {
        self.text.to_lowercase()
    }

    pub fn is_root(&self) -> bool {
        self.head == self.index
    }
}

/// Tokens of one annotated input, in sentence order
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParsedSentence {
    text: String,
    tokens: Vec<Token>,
}

impl ParsedSentence {
    /// Build a sentence, checking that indices are contiguous and heads are in range
    pub fn new(text: impl Into<String>, tokens: Vec<Token>) -> Result<Self, AnnotationError> {
        for (position, token) in tokens.iter().enumerate() {
            if token.index != position {
                return Err(AnnotationError::MalformedParse(format!(
                    "token '{}' has index {} at position {}",
                    token.text, token.index, position
                )));
            }
            if token.head >= tokens.len() {
                return Err(AnnotationError::MalformedParse(format!(
                    "token '{}' points at head {} but the sentence has {} tokens",
                    token.text,
                    token.head,
                    tokens.len()
                )));
            }
        }

        Ok(Self {
            text: text.into(),
            tokens,
        })
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Token> {
        self.tokens.get(index)
    }

    /// Syntactic head of a token (the root is its own head)
    pub fn head(&self, token: &Token) -> &Token {
        &self.tokens[token.head]
    }

    /// Direct dependents of the token at `index`, in sentence order
    pub fn children(&self, index: usize) -> impl Iterator<Item = &Token> + '_ {
        self.tokens
            .iter()
            .filter(move |t| t.head == index && t.index != index)
    }

    /// Indices of the token at `index` and everything transitively dependent on it,
    /// in sentence order
    pub fn subtree(&self, index: usize) -> Vec<usize> {
        if index >= self.tokens.len() {
            return Vec::new();
        }

        let mut in_subtree = vec![false; self.tokens.len()];
        let mut stack = vec![index];
        in_subtree[index] = true;

        // A malformed parse may contain head cycles; the visited mask stops them.
        while let Some(current) = stack.pop() {
            for child in self.children(current) {
                if !in_subtree[child.index] {
                    in_subtree[child.index] = true;
                    stack.push(child.index);
                }
            }
        }

        in_subtree
            .iter()
            .enumerate()
            .filter_map(|(i, &member)| member.then_some(i))
            .collect()
    }
}
