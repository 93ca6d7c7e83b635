#![allow(dead_code)]

extern crate alloc;

use alloc::rc::Rc;
use core::cell::Cell;
use indexmap::IndexMap;
use tgnrs::errors::TgnError;
use tgnrs::object::{
    ObjectBuilder,
    TgnClass,
    TgnL3,
    TgnObject,
};
use tgnrs::vendor::RefNormalizer;

/// Mock vendor class, object data doubles as object attributes and in memory objects double as
/// children.
pub struct TestClass {
    name: String,
    normalizer: RefNormalizer,
    created: Cell<u32>,
}

impl TestClass {
    pub fn new(name: &str) -> Rc<Self> {
        Rc::new(Self {
            name: name.to_owned(),
            normalizer: RefNormalizer::default(),
            created: Cell::new(0),
        })
    }

    pub fn for_vendor(
        name: &str,
        vendor_name: &str,
    ) -> Rc<Self> {
        Rc::new(Self {
            name: name.to_owned(),
            normalizer: RefNormalizer::for_vendor(vendor_name).unwrap(),
            created: Cell::new(0),
        })
    }
}

impl TgnClass for TestClass {
    fn class_name(&self) -> &str {
        &self.name
    }

    fn create(
        &self,
        _parent: Option<&Rc<TgnObject>>,
        obj_type: &str,
        attributes: &IndexMap<String, String>,
    ) -> Result<String, TgnError> {
        if attributes.contains_key("reject") {
            return Err(TgnError::Vendor(format!("failed creating {obj_type}")));
        }

        self.created.set(self.created.get() + 1);

        Ok(format!("{obj_type}:{}", self.created.get()))
    }

    fn get_name(
        &self,
        object: &Rc<TgnObject>,
    ) -> Result<String, TgnError> {
        Ok(object
            .data("name")
            .unwrap_or_else(|| object.obj_ref().to_owned()))
    }

    fn get_attributes(
        &self,
        object: &Rc<TgnObject>,
    ) -> Result<IndexMap<String, String>, TgnError> {
        Ok(object.data_bag())
    }

    fn get_attribute(
        &self,
        object: &Rc<TgnObject>,
        attribute: &str,
    ) -> Result<String, TgnError> {
        if attribute == "name" {
            return Ok(object.name());
        }

        object
            .data(attribute)
            .ok_or_else(|| TgnError::Vendor(format!("no attribute '{attribute}'")))
    }

    fn get_children(
        &self,
        object: &Rc<TgnObject>,
        types: &[&str],
    ) -> Result<Vec<Rc<TgnObject>>, TgnError> {
        Ok(object.get_objects_by_type(types))
    }

    fn get_objects_from_attribute(
        &self,
        object: &Rc<TgnObject>,
        attribute: &str,
    ) -> Result<Vec<Rc<TgnObject>>, TgnError> {
        let refs = self.get_attribute(object, attribute)?;
        let mut root = Rc::clone(object);

        while let Some(parent) = root.parent() {
            root = parent;
        }

        refs.split_whitespace()
            .map(|obj_ref| match root.get_object_by_ref(obj_ref) {
                Some(existing) => Ok(existing),
                None => ObjectBuilder::new("leaf")
                    .obj_ref(obj_ref)
                    .parent(object)
                    .build(Rc::clone(object.class())),
            })
            .collect()
    }

    fn get_obj_class(
        &self,
        object: &Rc<TgnObject>,
        _obj_type: &str,
    ) -> Result<Rc<dyn TgnClass>, TgnError> {
        Ok(Rc::clone(object.class()))
    }

    fn normalize_ref(
        &self,
        obj_ref: &str,
    ) -> String {
        self.normalizer.normalize(obj_ref)
    }
}

impl TgnL3 for TestClass {
    fn ip(
        &self,
        object: &Rc<TgnObject>,
    ) -> Result<String, TgnError> {
        self.get_attribute(object, "ip")
    }

    fn num_ips(
        &self,
        object: &Rc<TgnObject>,
    ) -> Result<u32, TgnError> {
        self.get_attribute(object, "count")?
            .parse()
            .map_err(|_| TgnError::Vendor(String::from("count is not a number")))
    }
}

pub fn build(
    class: &Rc<TestClass>,
    obj_type: &str,
    obj_ref: &str,
    name: Option<&str>,
    parent: Option<&Rc<TgnObject>>,
) -> Rc<TgnObject> {
    let mut builder = ObjectBuilder::new(obj_type).obj_ref(obj_ref);

    if let Some(name) = name {
        builder = builder.name(name).attribute("name", name);
    }

    if let Some(parent) = parent {
        builder = builder.parent(parent);
    }

    builder.build(Rc::clone(class) as Rc<dyn TgnClass>).unwrap()
}

/// Dummy objects hierarchy:
///
/// ```text
/// root1
///   leaf1
///   node1 (name1)
///     node11 (name11)
///     node12 (name12)
///     leaf11
///   node2 (name2)
/// ```
pub struct Tree {
    pub class: Rc<TestClass>,
    pub root: Rc<TgnObject>,
    pub leaf1: Rc<TgnObject>,
    pub node1: Rc<TgnObject>,
    pub node2: Rc<TgnObject>,
    pub node11: Rc<TgnObject>,
    pub node12: Rc<TgnObject>,
    pub leaf11: Rc<TgnObject>,
}

pub fn tree() -> Tree {
    let _ = env_logger::builder().is_test(true).try_init();

    let class = TestClass::new("TestClass");
    let root = build(&class, "root", "root1", None, None);
    let leaf1 = build(&class, "leaf", "leaf1", None, Some(&root));
    let node1 = build(&class, "node", "node1", Some("name1"), Some(&root));
    let node2 = build(&class, "node", "node2", Some("name2"), Some(&root));
    let node11 = build(&class, "node", "node11", Some("name11"), Some(&node1));
    let node12 = build(&class, "node", "node12", Some("name12"), Some(&node1));
    let leaf11 = build(&class, "leaf", "leaf11", None, Some(&node1));

    Tree {
        class,
        root,
        leaf1,
        node1,
        node2,
        node11,
        node12,
        leaf11,
    }
}
