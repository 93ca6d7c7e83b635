extern crate alloc;

use super::key::{
    DictKey,
    ObjectHandle,
};
use crate::errors::TgnError;
use crate::object::TgnObject;
use alloc::rc::Rc;
use core::fmt::{
    Debug,
    Formatter,
    Result as FmtResult,
};
use indexmap::IndexMap;
use serde::ser::SerializeMap;
use serde::{
    Serialize,
    Serializer,
};
use serde_json::ser::PrettyFormatter;

/// `TgnObjectsDict` maps `TgnObject`s to whatever data, in insertion order.
///
/// Keys must be objects, but values can then be accessed by the object itself, the object
/// reference or the object name.
pub struct TgnObjectsDict<V> {
    entries: IndexMap<ObjectHandle, V>,
}

impl<V> Default for TgnObjectsDict<V> {
    fn default() -> Self {
        Self {
            entries: IndexMap::new(),
        }
    }
}

impl<V> TgnObjectsDict<V> {
    /// Returns a new, empty, `TgnObjectsDict`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `value` for `key`, returning the previous value of the same object if any. Re-inserting
    /// an object keeps its original position.
    ///
    /// # Errors
    ///
    /// Returns `InvalidKey` if `key` is not an object.
    pub fn insert<'a, K: Into<DictKey<'a>>>(
        &mut self,
        key: K,
        value: V,
    ) -> Result<Option<V>, TgnError> {
        match key.into() {
            DictKey::Object(object) => Ok(self
                .entries
                .insert(ObjectHandle(Rc::clone(object)), value)),
            DictKey::Str(s) => Err(TgnError::InvalidKey(s.to_owned())),
        }
    }

    /// Returns the position of the entry addressed by `key`. Objects are matched by identity,
    /// strings by name or reference of each key in insertion order.
    pub(super) fn index_of(
        &self,
        key: DictKey<'_>,
    ) -> Option<usize> {
        match key {
            DictKey::Object(object) => self
                .entries
                .get_index_of(&ObjectHandle(Rc::clone(object))),
            DictKey::Str(s) => self
                .entries
                .keys()
                .position(|k| k.0.name() == s || k.0.obj_ref() == s),
        }
    }

    /// Returns the value of `object`, matched by identity only.
    #[must_use]
    pub fn by_identity(
        &self,
        object: &Rc<TgnObject>,
    ) -> Option<&V> {
        self.entries.get(&ObjectHandle(Rc::clone(object)))
    }

    /// Returns the value of the first object named `name`.
    #[must_use]
    pub fn by_name(
        &self,
        name: &str,
    ) -> Option<&V> {
        self.entries
            .iter()
            .find_map(|(k, v)| (k.0.name() == name).then_some(v))
    }

    /// Returns the value of the first object with reference `obj_ref`.
    #[must_use]
    pub fn by_reference(
        &self,
        obj_ref: &str,
    ) -> Option<&V> {
        self.entries
            .iter()
            .find_map(|(k, v)| (k.0.obj_ref() == obj_ref).then_some(v))
    }

    /// Returns the value addressed by `key` -- an object, an object name or an object reference.
    ///
    /// # Errors
    ///
    /// Returns `KeyNotFound` if no entry matches `key`.
    pub fn get<'a, K: Into<DictKey<'a>>>(
        &self,
        key: K,
    ) -> Result<&V, TgnError> {
        let key = key.into();

        self.index_of(key)
            .and_then(|i| self.entries.get_index(i))
            .map(|(_, v)| v)
            .ok_or_else(|| TgnError::KeyNotFound(key.to_string()))
    }

    /// Returns the value addressed by `key`, `default` if there is none.
    pub fn get_or<'s, 'a, K: Into<DictKey<'a>>>(
        &'s self,
        key: K,
        default: &'s V,
    ) -> &'s V {
        self.get(key).unwrap_or(default)
    }

    /// Returns a mutable reference to the value addressed by `key`.
    ///
    /// # Errors
    ///
    /// Returns `KeyNotFound` if no entry matches `key`.
    pub fn get_mut<'a, K: Into<DictKey<'a>>>(
        &mut self,
        key: K,
    ) -> Result<&mut V, TgnError> {
        let key = key.into();

        match self.index_of(key) {
            Some(i) => self
                .entries
                .get_index_mut(i)
                .map(|(_, v)| v)
                .ok_or_else(|| TgnError::KeyNotFound(key.to_string())),
            None => Err(TgnError::KeyNotFound(key.to_string())),
        }
    }

    /// Returns true if an entry matches `key`.
    pub fn contains_key<'a, K: Into<DictKey<'a>>>(
        &self,
        key: K,
    ) -> bool {
        self.index_of(key.into()).is_some()
    }

    /// Removes the entry addressed by `key`, preserving the order of the remaining entries.
    pub fn remove<'a, K: Into<DictKey<'a>>>(
        &mut self,
        key: K,
    ) -> Option<V> {
        let i = self.index_of(key.into())?;

        self.entries.shift_remove_index(i).map(|(_, v)| v)
    }

    /// Returns the key objects in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &Rc<TgnObject>> {
        self.entries.keys().map(|k| &k.0)
    }

    /// Returns the values in insertion order.
    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.entries.values()
    }

    /// Returns the (object, value) pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&Rc<TgnObject>, &V)> {
        self.entries.iter().map(|(k, v)| (&k.0, v))
    }

    /// Returns the number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the dictionary holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<V: Serialize> TgnObjectsDict<V> {
    /// Returns a nested, json like, string representation of the dictionary with objects replaced
    /// by their names. Meant for debug/logging only, the output can not be loaded back.
    ///
    /// # Errors
    ///
    /// Returns `Serialization` if one of the values fails to serialize.
    pub fn dumps(
        &self,
        indent: usize,
    ) -> Result<String, TgnError> {
        let indent = " ".repeat(indent);
        let mut buf = Vec::new();
        let mut serializer = serde_json::Serializer::with_formatter(
            &mut buf,
            PrettyFormatter::with_indent(indent.as_bytes()),
        );

        self.serialize(&mut serializer)
            .map_err(|err| TgnError::Serialization(err.to_string()))?;

        String::from_utf8(buf).map_err(|err| TgnError::Serialization(err.to_string()))
    }
}

impl<V: Serialize> Serialize for TgnObjectsDict<V> {
    fn serialize<S: Serializer>(
        &self,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;

        for (object, value) in self.iter() {
            map.serialize_entry(&object.name(), value)?;
        }

        map.end()
    }
}

impl<V: Debug> Debug for TgnObjectsDict<V> {
    fn fmt(
        &self,
        f: &mut Formatter<'_>,
    ) -> FmtResult {
        f.debug_map()
            .entries(self.iter().map(|(k, v)| (k.name(), v)))
            .finish()
    }
}
