//! Collection of sufficient statistics from a tagged corpus.

use hashbrown::HashMap;

use crate::sentence::Sentence;
use crate::tag_set::TagSet;

/// Raw transition, observation, and singleton tag counts.
///
/// The transition table is a dense `(N + 1) x (N + 1)` matrix over the fixed
/// tag ordering: row `N` is the start sentinel and column `N` is the end
/// sentinel, so every valid (previous, current) pair has an entry. Only
/// counts are accumulated here; probabilities are computed by
/// [`Model`](crate::Model).
///
/// # Examples
///
/// ```
/// use postag::{CorpusStats, Sentence, TagSet};
///
/// let tags = TagSet::penn_treebank();
/// let mut stats = CorpusStats::new(&tags);
/// let s = Sentence::from_tagged("The/DT dog/NN barks/VBZ", &tags).unwrap();
/// stats.add_sentence(&s);
/// assert_eq!(3, stats.n_tokens());
/// ```
#[derive(Debug, Clone)]
pub struct CorpusStats {
    n_tags: usize,
    transitions: Vec<Vec<u32>>,
    observations: Vec<HashMap<String, u32>>,
    tag_totals: Vec<u32>,
    n_tokens: u32,
}

impl CorpusStats {
    /// Creates zeroed statistics for the given tag set.
    pub fn new(tag_set: &TagSet) -> Self {
        let n_tags = tag_set.len();
        Self {
            n_tags,
            transitions: vec![vec![0; n_tags + 1]; n_tags + 1],
            observations: vec![HashMap::new(); n_tags],
            tag_totals: vec![0; n_tags],
            n_tokens: 0,
        }
    }

    /// Accumulates one tagged sentence.
    ///
    /// Records start -> t1 -> ... -> tn -> end transitions, one observation
    /// per token, and the singleton tag counts. Pure accumulation; additive
    /// and commutative, so partial statistics may be merged later.
    pub fn add_sentence(&mut self, sentence: &Sentence) {
        let start = self.n_tags;
        let end = self.n_tags;

        let mut prev = start;
        for (word, &tag) in sentence.words().iter().zip(sentence.tags()) {
            self.tag_totals[tag] += 1;
            self.n_tokens += 1;
            *self.observations[tag].entry_ref(word.as_str()).or_insert(0) += 1;
            self.transitions[prev][tag] += 1;
            prev = tag;
        }
        self.transitions[prev][end] += 1;
    }

    /// Returns the number of tags in the underlying tag set.
    pub fn n_tags(&self) -> usize {
        self.n_tags
    }

    /// Returns the dense transition count matrix.
    pub fn transitions(&self) -> &[Vec<u32>] {
        &self.transitions
    }

    /// Returns the per-tag observation counts, indexed by tag id.
    pub fn observations(&self) -> &[HashMap<String, u32>] {
        &self.observations
    }

    /// Returns the per-tag token totals, indexed by tag id.
    pub fn tag_totals(&self) -> &[u32] {
        &self.tag_totals
    }

    /// Returns the total number of tokens seen.
    pub fn n_tokens(&self) -> u32 {
        self.n_tokens
    }
}
