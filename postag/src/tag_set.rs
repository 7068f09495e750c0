//! The fixed part-of-speech tag inventory.

use bincode::{
    de::Decoder,
    enc::Encoder,
    error::{DecodeError, EncodeError},
    Decode, Encode,
};
use hashbrown::HashMap;

use crate::errors::{PostagError, Result};

/// Sentinel marking the start of a sentence.
pub const START_TAG: &str = "<s>";

/// Sentinel marking the end of a sentence.
pub const END_TAG: &str = "</s>";

/// Pseudo-word holding the probability mass reserved for unseen words.
pub const UNKNOWN_WORD: &str = "<unk>";

/// Penn Treebank tags, in the order used for decoding indices and
/// tie-breaking. This order is persisted with the model.
pub const PENN_TREEBANK_TAGS: &[&str] = &[
    "CC", "CD", "DT", "EX", "FW", "IN", "JJ", "JJR", "JJS", "LS", "MD", "NN", "NNS", "NNP",
    "NNPS", "PDT", "POS", "PRP", "PRP$", "RB", "RBR", "RBS", "RP", "SYM", "TO", "UH", "VB",
    "VBD", "VBG", "VBN", "VBP", "VBZ", "WDT", "WP", "WP$", "WRB", "$", "#", "-LRB-", "-RRB-",
    ",", ".", ":", "''", "``", "“", "”",
];

/// Index of a tag in the fixed ordering of a [`TagSet`].
pub type TagId = usize;

/// A fixed, ordered, closed set of part-of-speech tags.
///
/// The sentinels ([`START_TAG`], [`END_TAG`], [`UNKNOWN_WORD`]) are not
/// members of the ordered list.
///
/// # Examples
///
/// ```
/// use postag::TagSet;
///
/// let tags = TagSet::penn_treebank();
/// let id = tags.tag_id("NN").unwrap();
/// assert_eq!("NN", tags.tag_name(id));
/// assert!(tags.tag_id("XYZ").is_err());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct TagSet {
    tags: Vec<String>,
    ids: HashMap<String, TagId>,
}

impl TagSet {
    /// Creates a tag set from an ordered list of tag names.
    ///
    /// # Errors
    ///
    /// [`PostagError::InvalidArgument`] will be returned if the list is
    /// empty, contains duplicates, or contains a sentinel name.
    pub fn new<I, S>(tags: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let tags: Vec<String> = tags.into_iter().map(Into::into).collect();
        if tags.is_empty() {
            return Err(PostagError::invalid_argument("tags", "is empty"));
        }
        let mut ids = HashMap::with_capacity(tags.len());
        for (id, tag) in tags.iter().enumerate() {
            if tag == START_TAG || tag == END_TAG || tag == UNKNOWN_WORD {
                return Err(PostagError::invalid_argument(
                    "tags",
                    format!("contains the sentinel '{tag}'"),
                ));
            }
            if ids.insert(tag.clone(), id).is_some() {
                return Err(PostagError::invalid_argument(
                    "tags",
                    format!("contains '{tag}' twice"),
                ));
            }
        }
        Ok(Self { tags, ids })
    }

    /// Creates the standard Penn Treebank tag set.
    pub fn penn_treebank() -> Self {
        // The constant list contains no duplicates or sentinels.
        Self::new(PENN_TREEBANK_TAGS.iter().copied()).unwrap()
    }

    /// Returns the id of a tag in the fixed ordering.
    ///
    /// # Errors
    ///
    /// [`PostagError::InvalidTag`] will be returned if the name is not a
    /// member of the set. Sentinels are not members.
    pub fn tag_id(&self, tag: &str) -> Result<TagId> {
        self.ids
            .get(tag)
            .copied()
            .ok_or_else(|| PostagError::invalid_tag(tag))
    }

    /// Returns the name of the tag with the given id.
    ///
    /// # Panics
    ///
    /// Panics if `id >= self.len()`.
    pub fn tag_name(&self, id: TagId) -> &str {
        &self.tags[id]
    }

    /// Returns the number of tags, excluding sentinels.
    pub fn len(&self) -> usize {
        self.tags.len()
    }

    /// Returns `true` if the set contains no tags.
    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    /// Returns the tag names in the fixed ordering.
    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    /// Returns `true` if the name is a member tag or a sentinel.
    pub fn is_valid(&self, tag: &str) -> bool {
        self.ids.contains_key(tag) || tag == START_TAG || tag == END_TAG
    }
}

impl Encode for TagSet {
    fn encode<E: Encoder>(&self, encoder: &mut E) -> Result<(), EncodeError> {
        // The index map is rebuilt on decode.
        Encode::encode(&self.tags, encoder)
    }
}

impl Decode for TagSet {
    fn decode<D: Decoder>(decoder: &mut D) -> Result<Self, DecodeError> {
        let tags: Vec<String> = Decode::decode(decoder)?;
        let ids = tags
            .iter()
            .enumerate()
            .map(|(id, tag)| (tag.clone(), id))
            .collect();
        Ok(Self { tags, ids })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_set_empty() {
        let tags = TagSet::new(Vec::<String>::new());

        assert!(tags.is_err());
        assert_eq!(
            "InvalidArgumentError: tags: is empty",
            &tags.err().unwrap().to_string()
        );
    }

    #[test]
    fn test_tag_set_duplicate() {
        let tags = TagSet::new(["NN", "DT", "NN"]);

        assert!(tags.is_err());
        assert_eq!(
            "InvalidArgumentError: tags: contains 'NN' twice",
            &tags.err().unwrap().to_string()
        );
    }

    #[test]
    fn test_tag_set_sentinel_member() {
        let tags = TagSet::new(["NN", "<s>"]);

        assert!(tags.is_err());
    }

    #[test]
    fn test_tag_set_order_is_preserved() {
        let tags = TagSet::new(["DT", "NN", "VBZ"]).unwrap();

        assert_eq!(3, tags.len());
        assert_eq!(0, tags.tag_id("DT").unwrap());
        assert_eq!(1, tags.tag_id("NN").unwrap());
        assert_eq!(2, tags.tag_id("VBZ").unwrap());
        assert_eq!("VBZ", tags.tag_name(2));
    }

    #[test]
    fn test_tag_set_unknown_tag() {
        let tags = TagSet::new(["DT", "NN"]).unwrap();
        let e = tags.tag_id("XYZ");

        assert!(e.is_err());
        assert_eq!(
            "InvalidTagError: 'XYZ' is not a valid tag",
            &e.err().unwrap().to_string()
        );
    }

    #[test]
    fn test_tag_set_sentinels_are_valid_but_not_members() {
        let tags = TagSet::new(["DT", "NN"]).unwrap();

        assert!(tags.is_valid(START_TAG));
        assert!(tags.is_valid(END_TAG));
        assert!(tags.tag_id(START_TAG).is_err());
        assert!(tags.tag_id(END_TAG).is_err());
    }

    #[test]
    fn test_penn_treebank_size() {
        let tags = TagSet::penn_treebank();

        assert_eq!(47, tags.len());
        assert!(tags.tag_id("PRP$").is_ok());
        assert!(tags.tag_id("-LRB-").is_ok());
    }

    #[test]
    fn test_tag_set_bincode_roundtrip() {
        let tags = TagSet::penn_treebank();
        let config = bincode::config::standard();
        let bytes = bincode::encode_to_vec(&tags, config).unwrap();
        let (decoded, _): (TagSet, usize) =
            bincode::decode_from_slice(&bytes, config).unwrap();

        assert_eq!(tags, decoded);
    }
}
