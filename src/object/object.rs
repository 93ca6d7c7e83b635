extern crate alloc;

use super::registry;
use super::TgnClass;
use crate::errors::TgnError;
use alloc::rc::{
    Rc,
    Weak,
};
use core::cell::RefCell;
use core::fmt::{
    Debug,
    Display,
    Formatter,
    Result as FmtResult,
};
use indexmap::IndexMap;
use log::debug;

/// The mutable part of an object -- the name may be refreshed from the vendor after construction
/// and the data bag is free for vendor specific use.
pub(crate) struct ObjectData {
    pub(crate) name: String,
    pub(crate) attributes: IndexMap<String, String>,
}

/// `TgnObject` is a single node in a vendor configuration tree (a port, a stream, a filter...).
///
/// Objects are always handled through `Rc<TgnObject>`; parents own their children (`objects`) and
/// children point back to their parent weakly. The object reference and type never change after
/// construction.
pub struct TgnObject {
    pub(super) class: Rc<dyn TgnClass>,
    pub(super) obj_ref: String,
    pub(super) obj_type: String,
    pub(super) index: Option<String>,
    pub(super) parent: Weak<TgnObject>,
    pub(super) data: RefCell<ObjectData>,
    pub(super) objects: RefCell<IndexMap<String, Rc<TgnObject>>>,
}

impl TgnObject {
    /// Object reference. The reference is a unique, descriptive, ID within its parent's children.
    ///
    /// In some TGs (IxNetwork, STC, IxLoad...) the reference is maintained by the TG itself and is
    /// used for API calls, in others it is maintained by the package and may or may not be used for
    /// API calls -- in which case use `index` for API calls.
    #[must_use]
    pub fn obj_ref(&self) -> &str {
        &self.obj_ref
    }

    /// Object type.
    #[must_use]
    pub fn obj_type(&self) -> &str {
        &self.obj_type
    }

    /// Object name, defaults to the object reference.
    #[must_use]
    pub fn name(&self) -> String {
        self.data.borrow().name.clone()
    }

    /// Replace the object name, typically with the name read from the vendor API.
    pub fn set_name(
        &self,
        name: &str,
    ) {
        name.clone_into(&mut self.data.borrow_mut().name);
    }

    /// Object index, the index string (something like chassis/card/port) used for API calls when
    /// the object reference is not.
    #[must_use]
    pub fn index(&self) -> Option<&str> {
        self.index.as_deref()
    }

    /// Object ID, the relative ID of the object within its parent -- the last `/` separated part
    /// of the index (the port number of `chassis/card/port`).
    #[must_use]
    pub fn id(&self) -> Option<u32> {
        self.index.as_deref()?.rsplit('/').next()?.parse().ok()
    }

    /// Object parent, `None` for the root object.
    #[must_use]
    pub fn parent(&self) -> Option<Rc<Self>> {
        self.parent.upgrade()
    }

    /// The class (vendor implementation) of the object.
    #[must_use]
    pub fn class(&self) -> &Rc<dyn TgnClass> {
        &self.class
    }

    /// Returns a value from the object data bag.
    #[must_use]
    pub fn data(
        &self,
        key: &str,
    ) -> Option<String> {
        self.data.borrow().attributes.get(key).cloned()
    }

    /// Sets a value in the object data bag.
    pub fn set_data(
        &self,
        key: &str,
        value: &str,
    ) {
        self.data
            .borrow_mut()
            .attributes
            .insert(key.to_owned(), value.to_owned());
    }

    /// Returns a copy of the whole object data bag.
    #[must_use]
    pub fn data_bag(&self) -> IndexMap<String, String> {
        self.data.borrow().attributes.clone()
    }

    /// Returns all objects (children) currently in memory, in insertion order.
    #[must_use]
    pub fn objects(&self) -> Vec<Rc<Self>> {
        self.objects.borrow().values().cloned().collect()
    }

    /// Returns the child (in memory) with the given reference.
    #[must_use]
    pub fn object(
        &self,
        obj_ref: &str,
    ) -> Option<Rc<Self>> {
        self.objects.borrow().get(obj_ref).cloned()
    }

    /// Delete the object from its parent's children. Descendants are not touched, they simply
    /// become unreachable from the tree. An object that was already replaced under its reference
    /// leaves the parent's children as they are.
    pub fn del_object_from_parent(&self) {
        if let Some(parent) = self.parent() {
            let mut objects = parent.objects.borrow_mut();

            if !objects
                .get(&self.obj_ref)
                .is_some_and(|object| core::ptr::eq(&**object, self))
            {
                debug!("{} '{}' is no longer a child of '{}'", self.obj_type, self.obj_ref, parent.obj_ref);

                return;
            }

            debug!("deleting {} '{}' from parent '{}'", self.obj_type, self.obj_ref, parent.obj_ref);

            objects.shift_remove(&self.obj_ref);
        }
    }

    /// Delete all children objects of the requested type.
    pub fn del_objects_by_type(
        &self,
        obj_type: &str,
    ) {
        for object in self.get_objects_by_type(&[obj_type]) {
            object.del_object_from_parent();
        }
    }

    /// Return all live instances of the class named `class_name`.
    #[must_use]
    pub fn get_objects_of_class(class_name: &str) -> Vec<Rc<Self>> {
        registry::objects_of_class(class_name)
    }

    /// Read the object name from the vendor API.
    ///
    /// # Errors
    ///
    /// Returns the vendor error.
    pub fn get_name(self: &Rc<Self>) -> Result<String, TgnError> {
        self.class.get_name(self)
    }

    /// Read all attribute values from the vendor API.
    ///
    /// # Errors
    ///
    /// Returns the vendor error.
    pub fn get_attributes(self: &Rc<Self>) -> Result<IndexMap<String, String>, TgnError> {
        self.class.get_attributes(self)
    }

    /// Read a single attribute value from the vendor API.
    ///
    /// # Errors
    ///
    /// Returns the vendor error, including for attributes that do not exist.
    pub fn get_attribute(
        self: &Rc<Self>,
        attribute: &str,
    ) -> Result<String, TgnError> {
        self.class.get_attribute(self, attribute)
    }

    /// Read all children of the requested types from the vendor API.
    ///
    /// # Errors
    ///
    /// Returns the vendor error.
    pub fn get_children(
        self: &Rc<Self>,
        types: &[&str],
    ) -> Result<Vec<Rc<Self>>, TgnError> {
        debug!("reading {:?} children of '{}'", types, self.obj_ref);

        self.class.get_children(self, types)
    }

    /// Return the first (and for most useful cases only) child of the requested types.
    ///
    /// # Errors
    ///
    /// Returns the vendor error.
    pub fn get_child(
        self: &Rc<Self>,
        types: &[&str],
    ) -> Result<Option<Rc<Self>>, TgnError> {
        Ok(self.get_children(types)?.into_iter().next())
    }

    /// Return objects if children have already been read, else read (get) the children. Use this
    /// method for fast access to objects in case of static configurations.
    ///
    /// # Errors
    ///
    /// Returns the vendor error.
    pub fn get_objects_or_children_by_type(
        self: &Rc<Self>,
        types: &[&str],
    ) -> Result<Vec<Rc<Self>>, TgnError> {
        let objects = self.get_objects_by_type(types);

        if objects.is_empty() {
            return self.get_children(types);
        }

        Ok(objects)
    }

    /// Return the first object if children have already been read, else read the children.
    ///
    /// # Errors
    ///
    /// Returns the vendor error.
    pub fn get_object_or_child_by_type(
        self: &Rc<Self>,
        types: &[&str],
    ) -> Result<Option<Rc<Self>>, TgnError> {
        Ok(self
            .get_objects_or_children_by_type(types)?
            .into_iter()
            .next())
    }

    /// Read `attribute` as a list of references and return an object for each of them.
    ///
    /// # Errors
    ///
    /// Returns the vendor error.
    pub fn get_objects_from_attribute(
        self: &Rc<Self>,
        attribute: &str,
    ) -> Result<Vec<Rc<Self>>, TgnError> {
        self.class.get_objects_from_attribute(self, attribute)
    }

    /// Read `attribute` as a reference and return an object for it, `None` for empty attribute.
    ///
    /// # Errors
    ///
    /// Returns the vendor error.
    pub fn get_object_from_attribute(
        self: &Rc<Self>,
        attribute: &str,
    ) -> Result<Option<Rc<Self>>, TgnError> {
        Ok(self
            .get_objects_from_attribute(attribute)?
            .into_iter()
            .next())
    }

    /// Build child objects of type `child_type` for all (non empty) references in `children`,
    /// name them from the vendor API and add them to the object's children.
    ///
    /// # Errors
    ///
    /// Returns the vendor error of `get_obj_class`, of the object construction or of `get_name`.
    pub fn build_children_objs<S: AsRef<str>>(
        self: &Rc<Self>,
        child_type: &str,
        children: &[S],
    ) -> Result<IndexMap<String, Rc<Self>>, TgnError> {
        let child_class = self.class.get_obj_class(self, child_type)?;
        let mut children_objs = IndexMap::new();

        for child in children.iter().map(AsRef::<str>::as_ref).filter(|c| !c.is_empty()) {
            let child_object = super::ObjectBuilder::new(child_type)
                .obj_ref(child)
                .parent(self)
                .build(Rc::clone(&child_class))?;

            let name = child_object.get_name()?;

            child_object.set_name(&name);
            children_objs.insert(child_object.obj_ref.clone(), child_object);
        }

        debug!(
            "built {} '{}' children under '{}'",
            children_objs.len(),
            child_type,
            self.obj_ref
        );

        Ok(children_objs)
    }
}

impl Display for TgnObject {
    fn fmt(
        &self,
        f: &mut Formatter<'_>,
    ) -> FmtResult {
        write!(f, "{}", self.name())
    }
}

impl Debug for TgnObject {
    fn fmt(
        &self,
        f: &mut Formatter<'_>,
    ) -> FmtResult {
        f.debug_struct("TgnObject")
            .field("obj_ref", &self.obj_ref)
            .field("obj_type", &self.obj_type)
            .field("name", &self.name())
            .field("objects", &self.objects.borrow().len())
            .finish()
    }
}

impl Drop for TgnObject {
    fn drop(&mut self) {
        registry::prune(self.class.class_name());
    }
}
