//! Viterbi decoding of word sequences into tag sequences.

use crate::errors::{PostagError, Result};
use crate::model::Model;
use crate::sentence::normalize_word;
use crate::tag_set::TagId;

/// Per-decode score and backpointer lattice.
///
/// One extra row holds the synthetic end state. Allocated inside each decode
/// call and dropped with it.
struct Lattice {
    scores: Vec<Vec<f64>>,
    backpointers: Vec<Vec<TagId>>,
}

impl Lattice {
    fn new(n_states: usize, n_words: usize) -> Self {
        Self {
            scores: vec![vec![f64::NEG_INFINITY; n_words]; n_states + 1],
            backpointers: vec![vec![0; n_words]; n_states + 1],
        }
    }
}

/// Viterbi decoder over a read-only [`Model`].
///
/// Decoding is a pure function of the model and one word sequence, so one
/// tagger may serve several threads at once.
///
/// # Examples
///
/// ```
/// use postag::{CorpusStats, Model, Sentence, TagSet, Tagger};
///
/// let tags = TagSet::penn_treebank();
/// let mut stats = CorpusStats::new(&tags);
/// let s = Sentence::from_tagged("The/DT dog/NN barks/VBZ", &tags).unwrap();
/// stats.add_sentence(&s);
/// let model = Model::from_stats(tags, stats).unwrap();
///
/// let tagger = Tagger::new(model);
/// let predicted = tagger.tag(&["the", "dog", "barks"]).unwrap();
/// assert_eq!(vec!["DT", "NN", "VBZ"], predicted);
/// ```
pub struct Tagger {
    model: Model,
}

impl Tagger {
    /// Creates a new tagger.
    pub fn new(model: Model) -> Self {
        Self { model }
    }

    /// Returns the underlying model.
    pub fn model(&self) -> &Model {
        &self.model
    }

    /// Consumes the tagger and returns the underlying model.
    pub fn into_model(self) -> Model {
        self.model
    }

    /// Decodes a word sequence into the maximum-likelihood tag sequence.
    ///
    /// Words are normalized before lookup. All arithmetic is in log space;
    /// impossible paths carry a score of negative infinity and simply never
    /// win the maximization. When several predecessors yield an equal score
    /// the lowest-indexed tag in the fixed ordering wins, which makes the
    /// output deterministic.
    ///
    /// # Errors
    ///
    /// [`PostagError::InvalidArgument`] will be returned if `words` is
    /// empty.
    pub fn tag_ids<W>(&self, words: &[W]) -> Result<Vec<TagId>>
    where
        W: AsRef<str>,
    {
        if words.is_empty() {
            return Err(PostagError::invalid_argument("words", "is empty"));
        }
        let model = &self.model;
        let n = model.tag_set().len();
        let n_words = words.len();
        let words: Vec<String> = words
            .iter()
            .map(|word| normalize_word(word.as_ref()))
            .collect();

        let mut lattice = Lattice::new(n, n_words);

        for state in 0..n {
            lattice.scores[state][0] = model
                .transition_prob_ids(model.start_state(), state)
                .ln()
                + model.emission_prob_id(&words[0], state).ln();
        }

        for t in 1..n_words {
            for state in 0..n {
                let (score, predecessor) = self.best_predecessor(&lattice, state, t - 1);
                lattice.scores[state][t] =
                    score + model.emission_prob_id(&words[t], state).ln();
                lattice.backpointers[state][t] = predecessor;
            }
        }

        // Termination: transition into the synthetic end state.
        let (score, predecessor) = self.best_end_predecessor(&lattice, n_words - 1);
        lattice.scores[n][n_words - 1] = score;
        lattice.backpointers[n][n_words - 1] = predecessor;

        let mut tags = vec![0; n_words];
        let mut state = predecessor;
        for t in (0..n_words).rev() {
            tags[t] = state;
            if t > 0 {
                state = lattice.backpointers[state][t];
            }
        }
        Ok(tags)
    }

    /// Decodes a word sequence into tag names.
    ///
    /// # Errors
    ///
    /// See [`Tagger::tag_ids`].
    pub fn tag<W>(&self, words: &[W]) -> Result<Vec<&str>>
    where
        W: AsRef<str>,
    {
        let tag_set = self.model.tag_set();
        Ok(self
            .tag_ids(words)?
            .into_iter()
            .map(|id| tag_set.tag_name(id))
            .collect())
    }

    // Scans predecessors in the fixed tag order with a strict comparison, so
    // the lowest-indexed tag keeps ties.
    fn best_predecessor(&self, lattice: &Lattice, state: TagId, t: usize) -> (f64, TagId) {
        let mut best_score = f64::NEG_INFINITY;
        let mut best_prev = 0;
        for prev in 0..self.model.tag_set().len() {
            let score = lattice.scores[prev][t]
                + self.model.transition_prob_ids(prev, state).ln();
            if score > best_score {
                best_score = score;
                best_prev = prev;
            }
        }
        (best_score, best_prev)
    }

    fn best_end_predecessor(&self, lattice: &Lattice, t: usize) -> (f64, TagId) {
        let end = self.model.end_state();
        let mut best_score = f64::NEG_INFINITY;
        let mut best_prev = 0;
        for prev in 0..self.model.tag_set().len() {
            let score = lattice.scores[prev][t]
                + self.model.transition_prob_ids(prev, end).ln();
            if score > best_score {
                best_score = score;
                best_prev = prev;
            }
        }
        (best_score, best_prev)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus_stats::CorpusStats;
    use crate::sentence::Sentence;
    use crate::tag_set::TagSet;

    fn tagger_for(tags: &[&str], lines: &[&str]) -> Tagger {
        let tag_set = TagSet::new(tags.iter().copied()).unwrap();
        let mut stats = CorpusStats::new(&tag_set);
        for line in lines {
            let s = Sentence::from_tagged(line, &tag_set).unwrap();
            stats.add_sentence(&s);
        }
        Tagger::new(Model::from_stats(tag_set, stats).unwrap())
    }

    #[test]
    fn test_single_path_corpus() {
        let tagger = tagger_for(&["DT", "NN", "VBZ"], &["the/DT dog/NN barks/VBZ"]);

        // The only path with nonzero probability.
        let predicted = tagger.tag(&["the", "dog", "barks"]).unwrap();
        assert_eq!(vec!["DT", "NN", "VBZ"], predicted);
    }

    #[test]
    fn test_empty_input() {
        let tagger = tagger_for(&["DT", "NN"], &["the/DT dog/NN"]);

        assert!(tagger.tag::<&str>(&[]).is_err());
    }

    #[test]
    fn test_decoding_is_deterministic() {
        let tagger = tagger_for(
            &["DT", "NN", "VBZ", "IN"],
            &[
                "the/DT dog/NN barks/VBZ",
                "the/DT cat/NN sleeps/VBZ in/IN the/DT house/NN",
            ],
        );

        let words = ["the", "cat", "barks", "in", "the", "house"];
        let first = tagger.tag(&words).unwrap();
        let second = tagger.tag(&words).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_input_words_are_normalized() {
        let tagger = tagger_for(&["DT", "NN", "CD"], &["the/DT 3/CD dogs/NN"]);

        let predicted = tagger.tag(&["The", "42", "DOGS"]).unwrap();
        assert_eq!(vec!["DT", "CD", "NN"], predicted);
    }

    #[test]
    fn test_unknown_word_with_laplace_mass() {
        let mut tagger = tagger_for(
            &["DT", "NN", "VBZ"],
            &["the/DT dog/NN barks/VBZ", "the/DT cat/NN sleeps/VBZ"],
        );
        tagger.model.smooth_unknown_words(0.01);

        // "horse" is unseen; the unknown-word mass keeps the NN slot viable.
        let predicted = tagger.tag(&["the", "horse", "barks"]).unwrap();
        assert_eq!(vec!["DT", "NN", "VBZ"], predicted);
    }

    #[test]
    fn test_all_impossible_paths_still_decode() {
        // No Laplace mass: an unseen word zeroes every emission, making all
        // paths impossible. Decoding must not crash and must stay
        // deterministic (every state ties at -inf, so the lowest-indexed tag
        // wins each slot).
        let tagger = tagger_for(&["DT", "NN"], &["the/DT dog/NN"]);

        let predicted = tagger.tag(&["the", "unseen"]).unwrap();
        assert_eq!(vec!["DT", "DT"], predicted);
    }

    #[test]
    fn test_tie_break_selects_lowest_indexed_tag() {
        // Two tags, A and B, with identical behavior: both emit "x" and "y"
        // once, and the transition counts are fully symmetric. Every path
        // through [x, y] scores the same, so the decoder must pick tag A
        // (index 0) at each step.
        let tagger = tagger_for(
            &["A", "B"],
            &["x/A y/A", "x/B y/B", "x/A y/B", "x/B y/A"],
        );

        let predicted = tagger.tag(&["x", "y"]).unwrap();
        assert_eq!(vec!["A", "A"], predicted);
    }

    #[test]
    fn test_full_pipeline_survives_roundtrip() {
        let tag_set = TagSet::new(["DT", "NN", "VBZ", "IN"]).unwrap();
        let mut stats = CorpusStats::new(&tag_set);
        for line in [
            "the/DT dog/NN barks/VBZ in/IN the/DT house/NN",
            "the/DT cat/NN sleeps/VBZ",
        ] {
            let s = Sentence::from_tagged(line, &tag_set).unwrap();
            stats.add_sentence(&s);
        }
        let mut model = Model::from_stats(tag_set.clone(), stats).unwrap();
        model.smooth_unknown_words(0.01);

        let mut held_out = crate::interpolation::HeldOutCounts::new(&tag_set);
        for line in ["the/DT dog/NN sleeps/VBZ", "the/DT cat/NN barks/VBZ"] {
            let s = Sentence::from_tagged(line, &tag_set).unwrap();
            held_out.add_sentence(s.tags());
        }
        let (l1, l2) = held_out.estimate().unwrap();
        model.set_interpolation_weights(l1, l2).unwrap();

        let mut buf = vec![];
        model.write(&mut buf).unwrap();
        let loaded = Model::read(&mut buf.as_slice()).unwrap();

        let words = ["the", "weasel", "barks", "in", "the", "garden"];
        let before = Tagger::new(model).tag_ids(&words).unwrap();
        let after = Tagger::new(loaded).tag_ids(&words).unwrap();
        assert_eq!(before, after);
    }

    #[test]
    fn test_longer_sequence_prefers_trained_transitions() {
        let tagger = tagger_for(
            &["DT", "NN", "VBZ", "IN"],
            &[
                "the/DT dog/NN barks/VBZ in/IN the/DT house/NN",
                "the/DT cat/NN sleeps/VBZ in/IN the/DT garden/NN",
            ],
        );

        let predicted = tagger
            .tag(&["the", "cat", "barks", "in", "the", "garden"])
            .unwrap();
        assert_eq!(vec!["DT", "NN", "VBZ", "IN", "DT", "NN"], predicted);
    }
}
