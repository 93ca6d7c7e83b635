use super::key::DictKey;
use super::TgnObjectsDict;
use crate::errors::TgnError;
use indexmap::IndexMap;
use serde::{
    Serialize,
    Serializer,
};

/// The result of a `TgnSubStatsDict` lookup.
#[derive(Debug, PartialEq)]
pub enum SubStatsEntry<'a, V> {
    /// The key addressed a whole bucket.
    Bucket(&'a IndexMap<String, V>),
    /// The key addressed a value inside the single bucket.
    Value(&'a V),
}

impl<'a, V> SubStatsEntry<'a, V> {
    /// Returns the bucket, `None` for a value.
    #[must_use]
    pub const fn bucket(self) -> Option<&'a IndexMap<String, V>> {
        match self {
            Self::Bucket(bucket) => Some(bucket),
            Self::Value(_) => None,
        }
    }

    /// Returns the value, `None` for a bucket.
    #[must_use]
    pub const fn value(self) -> Option<&'a V> {
        match self {
            Self::Bucket(_) => None,
            Self::Value(value) => Some(value),
        }
    }
}

/// `TgnSubStatsDict` is a two level statistics dictionary -- `{rx object: {field: value}}`.
///
/// Port and stream RX statistics are hierarchical in order to support multicast traffic, but in
/// most cases there is only one RX object and the bucket level is redundant. When a key does not
/// address a bucket and there is exactly one bucket, the key is looked up inside that bucket, so
/// `dict[field] == dict[rx object][field]`.
pub struct TgnSubStatsDict<V> {
    buckets: TgnObjectsDict<IndexMap<String, V>>,
}

impl<V> Default for TgnSubStatsDict<V> {
    fn default() -> Self {
        Self {
            buckets: TgnObjectsDict::new(),
        }
    }
}

impl<V> TgnSubStatsDict<V> {
    /// Returns a new, empty, `TgnSubStatsDict`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the bucket of `key`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidKey` if `key` is not an object.
    pub fn insert<'a, K: Into<DictKey<'a>>>(
        &mut self,
        key: K,
        bucket: IndexMap<String, V>,
    ) -> Result<Option<IndexMap<String, V>>, TgnError> {
        self.buckets.insert(key, bucket)
    }

    /// Returns the bucket addressed by `key`, never falling back to the single bucket content.
    ///
    /// # Errors
    ///
    /// Returns `KeyNotFound` if no bucket matches `key`.
    pub fn bucket<'a, K: Into<DictKey<'a>>>(
        &self,
        key: K,
    ) -> Result<&IndexMap<String, V>, TgnError> {
        self.buckets.get(key)
    }

    /// Returns the bucket addressed by `key` or, if there is none and the dictionary holds a single
    /// bucket, the value of `key` inside that bucket.
    ///
    /// # Errors
    ///
    /// Returns `AmbiguousLookup` if the key does not address a bucket and there are several
    /// buckets, `KeyNotFound` if the key is found nowhere.
    pub fn get<'a, K: Into<DictKey<'a>>>(
        &self,
        key: K,
    ) -> Result<SubStatsEntry<'_, V>, TgnError> {
        let key = key.into();

        if let Ok(bucket) = self.buckets.get(key) {
            return Ok(SubStatsEntry::Bucket(bucket));
        }

        self.flat(key).map(SubStatsEntry::Value)
    }

    /// Returns the value of `field` inside the single bucket.
    ///
    /// # Errors
    ///
    /// Same as `get`.
    pub fn stat(
        &self,
        field: &str,
    ) -> Result<&V, TgnError> {
        self.flat(DictKey::Str(field))
    }

    fn flat(
        &self,
        key: DictKey<'_>,
    ) -> Result<&V, TgnError> {
        if self.buckets.len() > 1 {
            return Err(TgnError::AmbiguousLookup {
                key: key.to_string(),
                buckets: self.buckets.len(),
            });
        }

        let field = match key {
            DictKey::Str(field) => field,
            DictKey::Object(_) => return Err(TgnError::KeyNotFound(key.to_string())),
        };

        self.buckets
            .values()
            .next()
            .and_then(|bucket| bucket.get(field))
            .ok_or_else(|| TgnError::KeyNotFound(key.to_string()))
    }

    /// Returns the underlying buckets dictionary.
    #[must_use]
    pub const fn buckets(&self) -> &TgnObjectsDict<IndexMap<String, V>> {
        &self.buckets
    }

    /// Returns the number of buckets.
    #[must_use]
    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    /// Returns true if the dictionary holds no buckets.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }
}

impl<V: Serialize> TgnSubStatsDict<V> {
    /// Same as `TgnObjectsDict::dumps`.
    ///
    /// # Errors
    ///
    /// Returns `Serialization` if one of the values fails to serialize.
    pub fn dumps(
        &self,
        indent: usize,
    ) -> Result<String, TgnError> {
        self.buckets.dumps(indent)
    }
}

impl<V: Serialize> Serialize for TgnSubStatsDict<V> {
    fn serialize<S: Serializer>(
        &self,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        self.buckets.serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_empty_dict() {
        let sub_stats: TgnSubStatsDict<u64> = TgnSubStatsDict::new();

        assert!(sub_stats.is_empty());
        assert!(matches!(sub_stats.stat("a"), Err(TgnError::KeyNotFound(k)) if k == "a"));
    }

    #[test]
    fn test_entry_accessors() {
        let bucket = IndexMap::from([("a".to_owned(), 1)]);

        assert_eq!(SubStatsEntry::Bucket(&bucket).bucket(), Some(&bucket));
        assert_eq!(SubStatsEntry::Bucket(&bucket).value(), None);
        assert_eq!(SubStatsEntry::<u64>::Value(&7).value(), Some(&7));
    }
}
