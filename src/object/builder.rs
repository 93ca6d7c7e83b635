extern crate alloc;

use super::object::ObjectData;
use super::registry;
use super::{
    TgnClass,
    TgnObject,
};
use crate::errors::TgnError;
use alloc::rc::{
    Rc,
    Weak,
};
use core::cell::RefCell;
use indexmap::IndexMap;
use log::debug;

/// `ObjectBuilder` is a struct that holds the settings used to build (wrap or create) a
/// `TgnObject`.
pub struct ObjectBuilder {
    obj_type: String,
    obj_ref: Option<String>,
    name: Option<String>,
    index: Option<String>,
    attributes: IndexMap<String, String>,
    parent: Option<Rc<TgnObject>>,
}

#[allow(clippy::return_self_not_must_use)]
#[allow(clippy::must_use_candidate)]
impl ObjectBuilder {
    /// Return a new instance of `ObjectBuilder` for an object of type `obj_type`.
    pub fn new(obj_type: &str) -> Self {
        Self {
            obj_type: obj_type.to_owned(),
            obj_ref: None,
            name: None,
            index: None,
            attributes: IndexMap::new(),
            parent: None,
        }
    }

    /// Sets the object reference -- the object already exists in the vendor system and will only
    /// be wrapped. Without a reference the object is created through its class.
    pub fn obj_ref(
        mut self,
        s: &str,
    ) -> Self {
        self.obj_ref = Some(s.to_owned());

        self
    }

    /// Sets the object name, defaults to the object reference.
    pub fn name(
        mut self,
        s: &str,
    ) -> Self {
        self.name = Some(s.to_owned());

        self
    }

    /// Sets the object index (chassis/card/port like string).
    pub fn index(
        mut self,
        s: &str,
    ) -> Self {
        self.index = Some(s.to_owned());

        self
    }

    /// Adds a single attribute to the object data bag, attributes are also passed to `create`.
    pub fn attribute(
        mut self,
        key: &str,
        value: &str,
    ) -> Self {
        self.attributes.insert(key.to_owned(), value.to_owned());

        self
    }

    /// Adds all `attributes` to the object data bag.
    pub fn attributes(
        mut self,
        attributes: IndexMap<String, String>,
    ) -> Self {
        self.attributes.extend(attributes);

        self
    }

    /// Sets the object parent, without a parent the object is a tree root.
    pub fn parent(
        mut self,
        parent: &Rc<TgnObject>,
    ) -> Self {
        self.parent = Some(Rc::clone(parent));

        self
    }

    /// Build "builds" and returns the object, registered in its parent's children.
    ///
    /// # Errors
    ///
    /// Returns the vendor error if no reference was set and `class.create` fails.
    pub fn build(
        self,
        class: Rc<dyn TgnClass>,
    ) -> Result<Rc<TgnObject>, TgnError> {
        let obj_ref = match self.obj_ref {
            Some(obj_ref) => obj_ref,
            None => {
                debug!("no reference for new '{}' object, creating it", self.obj_type);

                class.create(self.parent.as_ref(), &self.obj_type, &self.attributes)?
            }
        };

        let name = self.name.unwrap_or_else(|| obj_ref.clone());

        let object = Rc::new(TgnObject {
            class,
            obj_ref,
            obj_type: self.obj_type,
            index: self.index,
            parent: self.parent.as_ref().map_or_else(Weak::new, Rc::downgrade),
            data: RefCell::new(ObjectData {
                name,
                attributes: self.attributes,
            }),
            objects: RefCell::new(IndexMap::new()),
        });

        if let Some(parent) = self.parent {
            parent
                .objects
                .borrow_mut()
                .insert(object.obj_ref.clone(), Rc::clone(&object));
        }

        registry::register(&object);

        debug!("built {} '{}'", object.obj_type, object.obj_ref);

        Ok(object)
    }
}
