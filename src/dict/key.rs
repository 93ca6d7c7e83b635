extern crate alloc;

use crate::object::TgnObject;
use alloc::rc::Rc;
use core::fmt::{
    Display,
    Formatter,
    Result as FmtResult,
};
use core::hash::{
    Hash,
    Hasher,
};

/// A key used to address an object keyed dictionary -- the object itself, or its name or
/// reference.
#[derive(Clone, Copy, Debug)]
pub enum DictKey<'a> {
    /// The object, matched by identity.
    Object(&'a Rc<TgnObject>),
    /// An object name or reference.
    Str(&'a str),
}

impl<'a> From<&'a Rc<TgnObject>> for DictKey<'a> {
    fn from(object: &'a Rc<TgnObject>) -> Self {
        Self::Object(object)
    }
}

impl<'a> From<&'a str> for DictKey<'a> {
    fn from(s: &'a str) -> Self {
        Self::Str(s)
    }
}

impl<'a> From<&'a String> for DictKey<'a> {
    fn from(s: &'a String) -> Self {
        Self::Str(s)
    }
}

impl Display for DictKey<'_> {
    fn fmt(
        &self,
        f: &mut Formatter<'_>,
    ) -> FmtResult {
        match self {
            Self::Object(object) => write!(f, "{object}"),
            Self::Str(s) => write!(f, "{s}"),
        }
    }
}

/// Dictionary key wrapper hashing and comparing objects by identity.
#[derive(Clone)]
pub(super) struct ObjectHandle(pub(super) Rc<TgnObject>);

impl PartialEq for ObjectHandle {
    fn eq(
        &self,
        other: &Self,
    ) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for ObjectHandle {}

impl Hash for ObjectHandle {
    fn hash<H: Hasher>(
        &self,
        state: &mut H,
    ) {
        Rc::as_ptr(&self.0).hash(state);
    }
}
