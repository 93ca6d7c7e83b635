extern crate alloc;

use super::TgnObject;
use crate::errors::TgnError;
use alloc::rc::Rc;
use indexmap::IndexMap;

/// `TgnClass` is the trait every vendor family must implement in order for its objects to live in
/// a `TgnObject` tree. The tree logic only ever talks to the vendor through this trait.
///
/// One `TgnClass` instance is shared (`Rc`) by all objects of the same concrete kind;
/// `get_obj_class` is how a class hands out the class of its children.
pub trait TgnClass {
    /// Name of the class, used to scope the live instances registry.
    fn class_name(&self) -> &str;

    /// Create a new object on the chassis and return its object reference.
    ///
    /// # Errors
    ///
    /// Returns `TgnError::Vendor` if the vendor API rejects the request.
    fn create(
        &self,
        parent: Option<&Rc<TgnObject>>,
        obj_type: &str,
        attributes: &IndexMap<String, String>,
    ) -> Result<String, TgnError>;

    /// Read the object name from the vendor API.
    ///
    /// # Errors
    ///
    /// Returns `TgnError::Vendor` if the vendor API rejects the request.
    fn get_name(
        &self,
        object: &Rc<TgnObject>,
    ) -> Result<String, TgnError>;

    /// Read all attribute values of the object.
    ///
    /// # Errors
    ///
    /// Returns `TgnError::Vendor` if the vendor API rejects the request.
    fn get_attributes(
        &self,
        object: &Rc<TgnObject>,
    ) -> Result<IndexMap<String, String>, TgnError>;

    /// Read a single attribute value of the object.
    ///
    /// # Errors
    ///
    /// Returns `TgnError::Vendor` if the attribute does not exist or the request is rejected.
    fn get_attribute(
        &self,
        object: &Rc<TgnObject>,
        attribute: &str,
    ) -> Result<String, TgnError>;

    /// Read all children of the requested types (all children for no types) from the vendor API
    /// and materialize them under `object` -- typically via `TgnObject::build_children_objs`.
    ///
    /// # Errors
    ///
    /// Returns `TgnError::Vendor` if the vendor API rejects the request.
    fn get_children(
        &self,
        object: &Rc<TgnObject>,
        types: &[&str],
    ) -> Result<Vec<Rc<TgnObject>>, TgnError>;

    /// Read `attribute` as a list of object references and return an object for each of them --
    /// the existing one if it is already in the tree, else a new one under `object`. Returns an
    /// empty list for an empty attribute.
    ///
    /// # Errors
    ///
    /// Returns `TgnError::Vendor` if the vendor API rejects the request.
    fn get_objects_from_attribute(
        &self,
        object: &Rc<TgnObject>,
        attribute: &str,
    ) -> Result<Vec<Rc<TgnObject>>, TgnError>;

    /// Return the class of children of type `obj_type` of `object`.
    ///
    /// # Errors
    ///
    /// Returns `TgnError::Vendor` if the class does not know the requested type.
    fn get_obj_class(
        &self,
        object: &Rc<TgnObject>,
        obj_type: &str,
    ) -> Result<Rc<dyn TgnClass>, TgnError>;

    /// Normalize an object reference before comparing it with other references. The default is
    /// the identity, vendors with reference quirks plug in a `RefNormalizer`.
    fn normalize_ref(
        &self,
        obj_ref: &str,
    ) -> String {
        obj_ref.to_owned()
    }
}

/// `TgnL3` is implemented by vendor classes whose objects carry layer 3 configuration (interfaces,
/// emulated hosts...).
pub trait TgnL3: TgnClass {
    /// Return the (first) IP address of the object.
    ///
    /// # Errors
    ///
    /// Returns `TgnError::Vendor` if the vendor API rejects the request.
    fn ip(
        &self,
        object: &Rc<TgnObject>,
    ) -> Result<String, TgnError>;

    /// Return the number of IP addresses the object emulates.
    ///
    /// # Errors
    ///
    /// Returns `TgnError::Vendor` if the vendor API rejects the request.
    fn num_ips(
        &self,
        object: &Rc<TgnObject>,
    ) -> Result<u32, TgnError>;
}
