extern crate alloc;

use super::TgnObject;
use crate::errors::TgnError;
use alloc::rc::Rc;

fn type_matches(
    obj_type: &str,
    types: &[&str],
) -> bool {
    types.iter().any(|t| t.eq_ignore_ascii_case(obj_type))
}

/// Searches over the objects already in memory, none of them re-reads anything from the vendor
/// API (except `get_objects_with_attribute`, which reads the attribute).
impl TgnObject {
    /// Return the first object with the requested object reference in the object branch. Both
    /// references are normalized with this object's class normalizer before comparing.
    #[must_use]
    pub fn get_object_by_ref(
        self: &Rc<Self>,
        obj_ref: &str,
    ) -> Option<Rc<Self>> {
        let normalized = self.class.normalize_ref(obj_ref);

        self.find(&|o| self.class.normalize_ref(&o.obj_ref) == normalized)
    }

    /// Return the first object with the requested object name in the object branch.
    #[must_use]
    pub fn get_object_by_name(
        self: &Rc<Self>,
        obj_name: &str,
    ) -> Option<Rc<Self>> {
        self.find(&|o| o.data.borrow().name == obj_name)
    }

    /// Return the first object with the requested key/value in the object branch. `ref`, `name`,
    /// `type` and `index` address the object identity, any other key addresses the data bag.
    #[must_use]
    pub fn get_object_by_key(
        self: &Rc<Self>,
        key: &str,
        value: &str,
    ) -> Option<Rc<Self>> {
        self.find(&|o| match key {
            "ref" => o.obj_ref == value,
            "name" => o.data.borrow().name == value,
            "type" => o.obj_type == value,
            "index" => o.index.as_deref() == Some(value),
            _ => o.data.borrow().attributes.get(key).map(String::as_str) == Some(value),
        })
    }

    /// Depth first, pre order, search of the branch.
    fn find(
        self: &Rc<Self>,
        predicate: &dyn Fn(&Self) -> bool,
    ) -> Option<Rc<Self>> {
        if predicate(self) {
            return Some(Rc::clone(self));
        }

        self.objects()
            .iter()
            .find_map(|child| child.find(predicate))
    }

    /// Return the children objects stored in memory (without re-reading them from the TGN) whose
    /// type is one of `types` (case insensitive), all children if `types` is empty.
    ///
    /// Use this method for fast access to objects in case of static configurations.
    #[must_use]
    pub fn get_objects_by_type(
        &self,
        types: &[&str],
    ) -> Vec<Rc<Self>> {
        self.objects
            .borrow()
            .values()
            .filter(|o| types.is_empty() || type_matches(&o.obj_type, types))
            .cloned()
            .collect()
    }

    /// Return the first child object stored in memory of the requested types.
    #[must_use]
    pub fn get_object_by_type(
        &self,
        types: &[&str],
    ) -> Option<Rc<Self>> {
        self.get_objects_by_type(types).into_iter().next()
    }

    /// Return all objects of the requested types in the branch below this object -- direct
    /// children first, then each child's subtree in children order. The receiver itself is never
    /// matched.
    #[must_use]
    pub fn get_objects_by_type_in_subtree(
        &self,
        types: &[&str],
    ) -> Vec<Rc<Self>> {
        let mut typed_objects = self.get_objects_by_type(types);

        for child in self.objects() {
            typed_objects.extend(child.get_objects_by_type_in_subtree(types));
        }

        typed_objects
    }

    /// Return all children of the requested type that have children of any of `child_types`.
    #[must_use]
    pub fn get_objects_with_object(
        &self,
        obj_type: &str,
        child_types: &[&str],
    ) -> Vec<Rc<Self>> {
        self.get_objects_by_type(&[obj_type])
            .into_iter()
            .filter(|o| !o.get_objects_by_type(child_types).is_empty())
            .collect()
    }

    /// Return all children of the requested type that do not have children of any of
    /// `child_types`.
    #[must_use]
    pub fn get_objects_without_object(
        &self,
        obj_type: &str,
        child_types: &[&str],
    ) -> Vec<Rc<Self>> {
        self.get_objects_by_type(&[obj_type])
            .into_iter()
            .filter(|o| o.get_objects_by_type(child_types).is_empty())
            .collect()
    }

    /// Return all children of the requested type whose `attribute` equals `value`. Attributes are
    /// read through the class, so this may hit the vendor API.
    ///
    /// # Errors
    ///
    /// Returns the first vendor error encountered while reading attributes.
    pub fn get_objects_with_attribute(
        &self,
        obj_type: &str,
        attribute: &str,
        value: &str,
    ) -> Result<Vec<Rc<Self>>, TgnError> {
        let mut objects = vec![];

        for object in self.get_objects_by_type(&[obj_type]) {
            if object.get_attribute(attribute)? == value {
                objects.push(object);
            }
        }

        Ok(objects)
    }

    /// Return the first ancestor (this object included) of type `obj_type`, `None` if there is
    /// none up to the root.
    #[must_use]
    pub fn get_ancestor_object_by_type(
        self: &Rc<Self>,
        obj_type: &str,
    ) -> Option<Rc<Self>> {
        let mut current = Rc::clone(self);

        loop {
            if current.obj_type.eq_ignore_ascii_case(obj_type) {
                return Some(current);
            }

            current = current.parent()?;
        }
    }
}
