//! # Postag
//!
//! Postag is a hidden Markov model part-of-speech tagger. Transition and
//! emission counts are collected from a `word/TAG` annotated corpus, smoothed
//! (a Laplace mass for unknown words, deleted interpolation for tag bigrams),
//! and decoded with the Viterbi algorithm.
//!
//! ## Examples
//!
//! ```no_run
//! use std::fs::File;
//! use std::io::{prelude::*, stdin, BufReader};
//!
//! use postag::{Model, Tagger};
//!
//! let mut f = BufReader::new(File::open("model.bin").unwrap());
//! let model = Model::read(&mut f).unwrap();
//! let tagger = Tagger::new(model);
//!
//! for line in stdin().lock().lines() {
//!     let line = line.unwrap();
//!     let words: Vec<&str> = line.split(' ').collect();
//!     let tags = tagger.tag(&words).unwrap();
//!     println!("{}", postag::to_tagged_line(&words, &tags));
//! }
//! ```

mod corpus_stats;
mod errors;
mod evaluation;
mod interpolation;
mod model;
mod sentence;
mod tag_set;
mod tagger;
mod utils;

pub use corpus_stats::CorpusStats;
pub use errors::{PostagError, Result};
pub use evaluation::ConfusionMatrix;
pub use interpolation::HeldOutCounts;
pub use model::{Model, DEFAULT_UNKNOWN_WORD_MASS};
pub use sentence::{normalize_word, to_tagged_line, Sentence};
pub use tag_set::{TagId, TagSet, END_TAG, PENN_TREEBANK_TAGS, START_TAG, UNKNOWN_WORD};
pub use tagger::Tagger;
