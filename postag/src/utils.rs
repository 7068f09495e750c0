use std::hash::Hash;
use std::ops::{Deref, DerefMut};

use bincode::{
    de::Decoder,
    enc::Encoder,
    error::{DecodeError, EncodeError},
    Decode, Encode,
};
use hashbrown::HashMap;

/// A bincode-compatible hash map wrapper.
///
/// Entries are sorted by key on encode so that identical maps always produce
/// identical model bytes.
#[derive(Debug, Clone)]
pub struct SerializableHashMap<K, V>(pub HashMap<K, V>);

impl<K, V> Default for SerializableHashMap<K, V> {
    fn default() -> Self {
        Self(HashMap::new())
    }
}

impl<K, V> Deref for SerializableHashMap<K, V> {
    type Target = HashMap<K, V>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<K, V> DerefMut for SerializableHashMap<K, V> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl<K, V> Decode for SerializableHashMap<K, V>
where
    K: Encode + Decode + Eq + Hash,
    V: Encode + Decode,
{
    fn decode<D: Decoder>(decoder: &mut D) -> Result<Self, DecodeError> {
        let raw: Vec<(K, V)> = Decode::decode(decoder)?;
        Ok(Self(raw.into_iter().collect()))
    }
}

impl<K, V> Encode for SerializableHashMap<K, V>
where
    K: Encode + Decode + Ord,
    V: Encode + Decode,
{
    fn encode<E: Encoder>(&self, encoder: &mut E) -> Result<(), EncodeError> {
        let mut raw: Vec<(&K, &V)> = self.0.iter().collect();
        raw.sort_unstable_by_key(|&(k, _)| k);
        Encode::encode(&raw, encoder)?;
        Ok(())
    }
}
