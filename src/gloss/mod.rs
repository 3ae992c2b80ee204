/*!
 * English to ISL gloss rule engine.
 *
 * - `token`: annotated token model and parsed sentences
 * - `splitter`: condition/main clause partition
 * - `classifier`: rule table mapping tokens to ordered role buckets
 * - `sequence`: gloss output values
 * - `pipeline`: per-sentence pipeline over an annotator
 */

pub mod classifier;
pub mod pipeline;
pub mod sequence;
pub mod splitter;
pub mod token;

pub use self::classifier::{Bucket, Decision, classify, classify_token};
pub use self::pipeline::{SentenceGloss, SentencePipeline, gloss_sentence};
pub use self::sequence::{GlossSequence, GlossToken};
pub use self::splitter::{ClauseSplit, split_clauses};
pub use self::token::{DependencyLabel, EntityType, ParsedSentence, PartOfSpeech, Token};
