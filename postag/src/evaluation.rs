//! Tagging accuracy statistics.

use std::fmt;

use crate::tag_set::{TagId, TagSet};

/// A misclassification table over the fixed tag ordering.
///
/// Cell `(gold, predicted)` counts how often `gold` was mistagged as
/// `predicted`; the diagonal stays zero. The `Display` impl prints each cell
/// as its share of all predictions, with `-` for empty cells.
#[derive(Debug, Clone)]
pub struct ConfusionMatrix {
    tag_names: Vec<String>,
    counts: Vec<Vec<u32>>,
    n_predictions: u32,
    n_errors: u32,
}

impl ConfusionMatrix {
    /// Creates an empty matrix for the given tag set.
    pub fn new(tag_set: &TagSet) -> Self {
        let n = tag_set.len();
        Self {
            tag_names: tag_set.tags().to_vec(),
            counts: vec![vec![0; n]; n],
            n_predictions: 0,
            n_errors: 0,
        }
    }

    /// Records one prediction.
    pub fn record(&mut self, gold: TagId, predicted: TagId) {
        self.n_predictions += 1;
        if gold != predicted {
            self.counts[gold][predicted] += 1;
            self.n_errors += 1;
        }
    }

    /// Returns the number of recorded predictions.
    pub fn n_predictions(&self) -> u32 {
        self.n_predictions
    }

    /// Returns the share of correct predictions, or 0 when nothing has been
    /// recorded.
    pub fn accuracy(&self) -> f64 {
        if self.n_predictions == 0 {
            return 0.0;
        }
        f64::from(self.n_predictions - self.n_errors) / f64::from(self.n_predictions)
    }
}

impl fmt::Display for ConfusionMatrix {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:<7}", "")?;
        for tag in &self.tag_names {
            write!(f, "{tag:<7}")?;
        }
        writeln!(f)?;
        for (gold, row) in self.counts.iter().enumerate() {
            write!(f, "{:<7}", self.tag_names[gold])?;
            for &count in row {
                if count == 0 {
                    write!(f, "{:<7}", "-")?;
                } else {
                    let share = f64::from(count) / f64::from(self.n_predictions);
                    write!(f, "{share:<7.4}")?;
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
