//! Deleted-interpolation estimation of the transition smoothing weights.

use std::collections::BTreeMap;

use crate::errors::{PostagError, Result};
use crate::tag_set::{TagId, TagSet};

/// Tag bigram and singleton counts collected from held-out data.
///
/// Bigrams are counted within sentences only; no sentinel transitions are
/// involved. A `BTreeMap` keeps the accumulation order of the lambda weights
/// deterministic.
#[derive(Debug, Clone)]
pub struct HeldOutCounts {
    bigrams: BTreeMap<(TagId, TagId), u32>,
    tag_totals: Vec<u32>,
    n_tokens: u32,
}

impl HeldOutCounts {
    /// Creates zeroed counts for the given tag set.
    pub fn new(tag_set: &TagSet) -> Self {
        Self {
            bigrams: BTreeMap::new(),
            tag_totals: vec![0; tag_set.len()],
            n_tokens: 0,
        }
    }

    /// Accumulates the tag sequence of one held-out sentence.
    pub fn add_sentence(&mut self, tags: &[TagId]) {
        for window in tags.windows(2) {
            *self.bigrams.entry((window[0], window[1])).or_insert(0) += 1;
        }
        for &tag in tags {
            self.tag_totals[tag] += 1;
            self.n_tokens += 1;
        }
    }

    /// Returns the held-out token total.
    pub fn n_tokens(&self) -> u32 {
        self.n_tokens
    }

    /// Computes the interpolation weights `(lambda1, lambda2)` by deleted
    /// interpolation.
    ///
    /// For every observed bigram `(t1, t2)` with count `C(t1,t2)`, the
    /// unigram estimate with the bigram deleted,
    /// `(C(t2) - 1) / (N - 1)`, is compared against the bigram estimate
    /// `(C(t1,t2) - 1) / (C(t1) - 1)` (0 when the denominator is 0). The
    /// full weight `C(t1,t2)` goes to lambda1 on a strict win, otherwise to
    /// lambda2; ties go to lambda2. The weights are then normalized to sum
    /// to 1.
    ///
    /// # Errors
    ///
    /// [`PostagError::InvalidArgument`] will be returned if no bigram was
    /// observed, since the normalization would divide by zero.
    pub fn estimate(&self) -> Result<(f64, f64)> {
        if self.bigrams.is_empty() {
            return Err(PostagError::invalid_argument(
                "held-out counts",
                "no tag bigram was observed",
            ));
        }
        let n = f64::from(self.n_tokens);
        let mut lambda1 = 0.0;
        let mut lambda2 = 0.0;
        for (&(t1, t2), &count) in &self.bigrams {
            let val1 = (f64::from(self.tag_totals[t2]) - 1.0) / (n - 1.0);
            let val2 = if self.tag_totals[t1] == 1 {
                0.0
            } else {
                (f64::from(count) - 1.0) / (f64::from(self.tag_totals[t1]) - 1.0)
            };
            if val1 > val2 {
                lambda1 += f64::from(count);
            } else {
                lambda2 += f64::from(count);
            }
        }
        let sum = lambda1 + lambda2;
        Ok((lambda1 / sum, lambda2 / sum))
    }
}
