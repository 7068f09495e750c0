//! Parsing of `word/TAG` annotated sentences.

use crate::errors::{PostagError, Result};
use crate::tag_set::{TagId, TagSet};

/// Normalizes a word before it is used as an observation key.
///
/// Every maximal run of ASCII digits is collapsed into a single `#`, then the
/// result is lowercased. The transform is idempotent and is applied
/// identically at train and decode time.
///
/// # Examples
///
/// ```
/// use postag::normalize_word;
///
/// assert_eq!("the", normalize_word("The"));
/// assert_eq!("#.#", normalize_word("3.14"));
/// assert_eq!("#s", normalize_word("1980s"));
/// assert_eq!("#s", normalize_word(&normalize_word("1980s")));
/// ```
pub fn normalize_word(word: &str) -> String {
    let mut normalized = String::with_capacity(word.len());
    let mut in_digits = false;
    for c in word.chars() {
        if c.is_ascii_digit() {
            if !in_digits {
                normalized.push('#');
            }
            in_digits = true;
        } else {
            in_digits = false;
            for lc in c.to_lowercase() {
                normalized.push(lc);
            }
        }
    }
    normalized
}

/// A tagged sentence: normalized words paired with validated tag ids.
#[derive(Debug, Clone, PartialEq)]
pub struct Sentence {
    words: Vec<String>,
    tags: Vec<TagId>,
}

impl Sentence {
    /// Creates a new [`Sentence`] from a `word/TAG` annotated line.
    ///
    /// Tokens are separated by single spaces. Each token is split at its
    /// *last* slash so that slashes inside the word survive. Words are
    /// normalized with [`normalize_word`]; tags are validated against the
    /// tag set.
    ///
    /// A token without a slash is skipped with a warning and contributes
    /// nothing; it does not disturb the rest of the line.
    ///
    /// # Errors
    ///
    /// This function will return an error variant when:
    ///
    /// * a tag is not a member of the tag set ([`PostagError::InvalidTag`]);
    /// * the line contains no valid token ([`PostagError::InvalidArgument`]).
    ///
    /// # Examples
    ///
    /// ```
    /// use postag::{Sentence, TagSet};
    ///
    /// let tags = TagSet::penn_treebank();
    /// let s = Sentence::from_tagged("The/DT dog/NN barks/VBZ", &tags);
    /// assert!(s.is_ok());
    ///
    /// let s = Sentence::from_tagged("The/XYZ", &tags);
    /// assert!(s.is_err());
    /// ```
    pub fn from_tagged(line: &str, tag_set: &TagSet) -> Result<Self> {
        let mut words = vec![];
        let mut tags = vec![];
        for token in line.split(' ') {
            let Some(separator) = token.rfind('/') else {
                log::warn!("'{token}' is not properly tagged, skipping");
                continue;
            };
            let (word, tag) = (&token[..separator], &token[separator + 1..]);
            words.push(normalize_word(word));
            tags.push(tag_set.tag_id(tag)?);
        }
        if words.is_empty() {
            return Err(PostagError::invalid_argument(
                "line",
                "contains no tagged token",
            ));
        }
        Ok(Self { words, tags })
    }

    /// Returns the normalized words.
    pub fn words(&self) -> &[String] {
        &self.words
    }

    /// Returns the tag ids.
    pub fn tags(&self) -> &[TagId] {
        &self.tags
    }

    /// Returns the number of tokens.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Returns `true` if the sentence contains no tokens.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

/// Reconstructs a `word/TAG` line from words and predicted tag names.
///
/// # Examples
///
/// ```
/// use postag::to_tagged_line;
///
/// let line = to_tagged_line(&["The", "dog"], &["DT", "NN"]);
/// assert_eq!("The/DT dog/NN", line);
/// ```
pub fn to_tagged_line<W, T>(words: &[W], tags: &[T]) -> String
where
    W: AsRef<str>,
    T: AsRef<str>,
{
    let mut line = String::new();
    for (i, (word, tag)) in words.iter().zip(tags).enumerate() {
        if i != 0 {
            line.push(' ');
        }
        line.push_str(word.as_ref());
        line.push('/');
        line.push_str(tag.as_ref());
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tag_set() -> TagSet {
        TagSet::new(["DT", "NN", "VBZ", "CD", "SYM"]).unwrap()
    }

    #[test]
    fn test_normalize_word_folds_case() {
        assert_eq!("the", normalize_word("The"));
        assert_eq!("nato", normalize_word("NATO"));
    }

    #[test]
    fn test_normalize_word_folds_digit_runs() {
        assert_eq!("#", normalize_word("42"));
        assert_eq!("#.#", normalize_word("3.14"));
        assert_eq!("a#b#", normalize_word("a12b345"));
    }

    #[test]
    fn test_normalize_word_is_idempotent() {
        for word in ["The", "3.14", "1980s", "U.S.", "#", ""] {
            let once = normalize_word(word);
            assert_eq!(once, normalize_word(&once));
        }
    }

    #[test]
    fn test_sentence_from_tagged() {
        let s = Sentence::from_tagged("The/DT dog/NN barks/VBZ", &tag_set()).unwrap();

        assert_eq!(&["the", "dog", "barks"], s.words());
        assert_eq!(&[0, 1, 2], s.tags());
    }

    #[test]
    fn test_sentence_from_tagged_splits_at_last_slash() {
        let s = Sentence::from_tagged("1\\/2/CD", &tag_set()).unwrap();

        assert_eq!(&["#\\/#"], s.words());
        assert_eq!(&[3], s.tags());
    }

    #[test]
    fn test_sentence_from_tagged_skips_malformed_token() {
        let s = Sentence::from_tagged("The/DT broken dog/NN", &tag_set()).unwrap();

        assert_eq!(&["the", "dog"], s.words());
        assert_eq!(&[0, 1], s.tags());
    }

    #[test]
    fn test_sentence_from_tagged_invalid_tag() {
        let s = Sentence::from_tagged("The/XYZ", &tag_set());

        assert!(s.is_err());
        assert_eq!(
            "InvalidTagError: 'XYZ' is not a valid tag",
            &s.err().unwrap().to_string()
        );
    }

    #[test]
    fn test_sentence_from_tagged_empty_line() {
        let s = Sentence::from_tagged("", &tag_set());

        assert!(s.is_err());
        assert_eq!(
            "InvalidArgumentError: line: contains no tagged token",
            &s.err().unwrap().to_string()
        );
    }

    #[test]
    fn test_sentence_from_tagged_normalizes_words() {
        let s = Sentence::from_tagged("1980s/NN The/DT", &tag_set()).unwrap();

        assert_eq!(&["#s", "the"], s.words());
    }

    #[test]
    fn test_to_tagged_line() {
        assert_eq!(
            "The/DT dog/NN barks/VBZ",
            to_tagged_line(&["The", "dog", "barks"], &["DT", "NN", "VBZ"])
        );
        assert_eq!("", to_tagged_line::<&str, &str>(&[], &[]));
    }
}
