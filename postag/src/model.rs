//! The probability model estimated from corpus statistics.

use std::io::{Read, Write};

use bincode::{
    de::Decoder,
    enc::Encoder,
    error::{DecodeError, EncodeError},
    Decode, Encode,
};

use crate::corpus_stats::CorpusStats;
use crate::errors::{PostagError, Result};
use crate::tag_set::{TagId, TagSet, END_TAG, START_TAG, UNKNOWN_WORD};
use crate::utils::SerializableHashMap;

const MODEL_MAGIC: &[u8] = b"postag";
const MODEL_VERSION: u32 = 1;

/// Probability mass injected for the unknown-word pseudo-word.
pub const DEFAULT_UNKNOWN_WORD_MASS: f64 = 0.01;

/// A hidden Markov model over a fixed tag set.
///
/// Built once from a [`CorpusStats`], then mutated exactly twice: once by
/// [`smooth_unknown_words`](Model::smooth_unknown_words) and once by
/// [`set_interpolation_weights`](Model::set_interpolation_weights). After
/// that every query takes `&self`, so a model may be shared between decoding
/// threads.
///
/// While both lambdas are zero the model is in its unsmoothed state and
/// transition queries return plain maximum-likelihood estimates.
pub struct Model {
    tag_set: TagSet,

    // Dense (N + 1) x (N + 1) count matrix: row N is the start sentinel,
    // column N is the end sentinel.
    transitions: Vec<Vec<f64>>,
    observations: Vec<SerializableHashMap<String, f64>>,
    tag_totals: Vec<u32>,
    n_tokens: u32,
    lambda1: f64,
    lambda2: f64,

    // Cached denominators; rebuilt on load and after Laplace injection.
    transition_totals: Vec<f64>,
    observation_totals: Vec<f64>,
}

impl Model {
    /// Creates an unsmoothed model from aggregated counts.
    ///
    /// # Errors
    ///
    /// [`PostagError::InvalidArgument`] will be returned if `stats` was not
    /// built for `tag_set`.
    pub fn from_stats(tag_set: TagSet, stats: CorpusStats) -> Result<Self> {
        if stats.n_tags() != tag_set.len() {
            return Err(PostagError::invalid_argument(
                "stats",
                "statistics were collected for a different tag set",
            ));
        }
        let transitions: Vec<Vec<f64>> = stats
            .transitions()
            .iter()
            .map(|row| row.iter().map(|&c| f64::from(c)).collect())
            .collect();
        let observations = stats
            .observations()
            .iter()
            .map(|obs| {
                let mut map = SerializableHashMap::default();
                for (word, &count) in obs {
                    map.insert(word.clone(), f64::from(count));
                }
                map
            })
            .collect();
        let mut model = Self {
            tag_set,
            transitions,
            observations,
            tag_totals: stats.tag_totals().to_vec(),
            n_tokens: stats.n_tokens(),
            lambda1: 0.0,
            lambda2: 0.0,
            transition_totals: vec![],
            observation_totals: vec![],
        };
        model.refresh_totals();
        Ok(model)
    }

    // Observation values are summed in sorted-key order so that the cached
    // denominators, and therefore every probability, survive serialization
    // bit-for-bit regardless of hash iteration order.
    fn refresh_totals(&mut self) {
        self.transition_totals = self
            .transitions
            .iter()
            .map(|row| row.iter().sum())
            .collect();
        self.observation_totals = self
            .observations
            .iter()
            .map(|obs| {
                let mut entries: Vec<(&String, &f64)> = obs.iter().collect();
                entries.sort_unstable_by_key(|&(word, _)| word);
                entries.into_iter().map(|(_, &count)| count).sum()
            })
            .collect();
    }

    /// Returns the tag set the model was built for.
    pub fn tag_set(&self) -> &TagSet {
        &self.tag_set
    }

    /// Returns the interpolation weights `(lambda1, lambda2)`.
    pub fn lambdas(&self) -> (f64, f64) {
        (self.lambda1, self.lambda2)
    }

    pub(crate) fn start_state(&self) -> usize {
        self.tag_set.len()
    }

    pub(crate) fn end_state(&self) -> usize {
        self.tag_set.len()
    }

    /// Transition probability addressed by matrix indices.
    ///
    /// `prev` may be a tag id or the start row; `curr` may be a tag id or
    /// the end column.
    pub(crate) fn transition_prob_ids(&self, prev: usize, curr: usize) -> f64 {
        let total = self.transition_totals[prev];
        let mle = if total == 0.0 {
            0.0
        } else {
            self.transitions[prev][curr] / total
        };
        if self.lambda1 == 0.0 && self.lambda2 == 0.0 {
            return mle;
        }
        // End transitions are never interpolated.
        if curr == self.end_state() {
            return mle;
        }
        let unigram = if self.n_tokens == 0 {
            0.0
        } else {
            f64::from(self.tag_totals[curr]) / f64::from(self.n_tokens)
        };
        self.lambda1 * unigram + self.lambda2 * mle
    }

    /// Emission probability addressed by tag id. `word` must be normalized.
    pub(crate) fn emission_prob_id(&self, word: &str, tag: TagId) -> f64 {
        let obs = &self.observations[tag];
        let total = self.observation_totals[tag];
        if total == 0.0 {
            return 0.0;
        }
        if let Some(&count) = obs.get(word) {
            count / total
        } else if let Some(&mass) = obs.get(UNKNOWN_WORD) {
            mass / total
        } else {
            // Legitimately zero; becomes -inf in log space downstream.
            0.0
        }
    }

    /// Returns the probability of `curr` following `prev`.
    ///
    /// `prev` may be a tag or [`START_TAG`]; `curr` may be a tag or
    /// [`END_TAG`]. A sentinel in the wrong position has probability 0.
    ///
    /// While unsmoothed this is the maximum-likelihood estimate
    /// `count(prev -> curr) / count(prev -> *)`. Once interpolation weights
    /// are set, non-end transitions become
    /// `lambda1 * P_unigram(curr) + lambda2 * P_mle(curr | prev)`.
    ///
    /// # Errors
    ///
    /// [`PostagError::InvalidTag`] will be returned if either name is
    /// outside the tag set and not a sentinel.
    pub fn transition_prob(&self, prev: &str, curr: &str) -> Result<f64> {
        if !self.tag_set.is_valid(prev) {
            return Err(PostagError::invalid_tag(prev));
        }
        if !self.tag_set.is_valid(curr) {
            return Err(PostagError::invalid_tag(curr));
        }
        let row = match prev {
            START_TAG => self.start_state(),
            END_TAG => return Ok(0.0),
            tag => self.tag_set.tag_id(tag)?,
        };
        let col = match curr {
            END_TAG => self.end_state(),
            START_TAG => return Ok(0.0),
            tag => self.tag_set.tag_id(tag)?,
        };
        Ok(self.transition_prob_ids(row, col))
    }

    /// Returns the probability of observing `word` under `tag`.
    ///
    /// `word` must already be normalized (see
    /// [`normalize_word`](crate::normalize_word)). If the word was never
    /// observed under the tag, the unknown-word mass is substituted when
    /// present; otherwise the probability is exactly 0.
    ///
    /// # Errors
    ///
    /// [`PostagError::InvalidTag`] will be returned if `tag` is not a member
    /// of the tag set.
    pub fn emission_prob(&self, word: &str, tag: &str) -> Result<f64> {
        let tag = self.tag_set.tag_id(tag)?;
        Ok(self.emission_prob_id(word, tag))
    }

    /// Injects a constant unknown-word mass into every tag's observations.
    ///
    /// Must be called before emission queries rely on the unknown-word
    /// fallback. The per-tag emission denominator includes the injected
    /// mass.
    pub fn smooth_unknown_words(&mut self, mass: f64) {
        for obs in &mut self.observations {
            obs.insert(UNKNOWN_WORD.to_string(), mass);
        }
        self.refresh_totals();
    }

    /// Activates interpolation smoothing for transition probabilities.
    ///
    /// # Errors
    ///
    /// [`PostagError::InvalidArgument`] will be returned unless both weights
    /// are non-negative and sum to 1.
    pub fn set_interpolation_weights(&mut self, lambda1: f64, lambda2: f64) -> Result<()> {
        if lambda1 < 0.0 || lambda2 < 0.0 {
            return Err(PostagError::invalid_argument(
                "lambda1",
                "weights must be non-negative",
            ));
        }
        if (lambda1 + lambda2 - 1.0).abs() > 1e-9 {
            return Err(PostagError::invalid_argument(
                "lambda1",
                "weights must sum to 1",
            ));
        }
        self.lambda1 = lambda1;
        self.lambda2 = lambda2;
        Ok(())
    }

    /// Exports the model data.
    ///
    /// # Errors
    ///
    /// When `wtr` generates an error, it will be returned as is.
    pub fn write<W>(&self, wtr: &mut W) -> Result<()>
    where
        W: Write,
    {
        wtr.write_all(MODEL_MAGIC)?;
        let config = bincode::config::standard();
        bincode::encode_into_std_write(MODEL_VERSION, wtr, config)?;
        bincode::encode_into_std_write(self, wtr, config)?;
        Ok(())
    }

    /// Reads a model back from a snapshot produced by [`Model::write`].
    ///
    /// # Errors
    ///
    /// [`PostagError::InvalidModel`] will be returned if the snapshot has
    /// the wrong magic bytes or an unsupported format version. I/O and
    /// decoding errors are returned as is.
    pub fn read<R>(rdr: &mut R) -> Result<Self>
    where
        R: Read,
    {
        let mut magic = [0u8; 6];
        rdr.read_exact(&mut magic)?;
        if magic != MODEL_MAGIC {
            return Err(PostagError::invalid_model("unrecognized model file"));
        }
        let config = bincode::config::standard();
        let version: u32 = bincode::decode_from_std_read(rdr, config)?;
        if version != MODEL_VERSION {
            return Err(PostagError::invalid_model(format!(
                "unsupported model version: {version}"
            )));
        }
        Ok(bincode::decode_from_std_read(rdr, config)?)
    }
}

impl Encode for Model {
    fn encode<E: Encoder>(&self, encoder: &mut E) -> Result<(), EncodeError> {
        Encode::encode(&self.tag_set, encoder)?;
        Encode::encode(&self.transitions, encoder)?;
        Encode::encode(&self.observations, encoder)?;
        Encode::encode(&self.tag_totals, encoder)?;
        Encode::encode(&self.n_tokens, encoder)?;
        Encode::encode(&self.lambda1, encoder)?;
        Encode::encode(&self.lambda2, encoder)?;
        Ok(())
    }
}

impl Decode for Model {
    fn decode<D: Decoder>(decoder: &mut D) -> Result<Self, DecodeError> {
        let mut model = Self {
            tag_set: Decode::decode(decoder)?,
            transitions: Decode::decode(decoder)?,
            observations: Decode::decode(decoder)?,
            tag_totals: Decode::decode(decoder)?,
            n_tokens: Decode::decode(decoder)?,
            lambda1: Decode::decode(decoder)?,
            lambda2: Decode::decode(decoder)?,
            transition_totals: vec![],
            observation_totals: vec![],
        };
        model.refresh_totals();
        Ok(model)
    }
}
