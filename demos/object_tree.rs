extern crate alloc;
extern crate tgnrs;

use alloc::rc::Rc;
use env_logger::{
    Builder,
    Target,
};
use indexmap::IndexMap;
use log::LevelFilter;
use std::env;
use tgnrs::dict::{
    TgnSubStatsDict,
    DEFAULT_DUMP_INDENT,
};
use tgnrs::errors::TgnError;
use tgnrs::object::{
    ObjectBuilder,
    TgnClass,
    TgnObject,
};
use tgnrs::tcl::{
    from_tcl_list,
    TclInterpreter,
    TclSession,
};
use tgnrs::vendor::RefNormalizer;

// obviously set these to whatever you want to play with!
const ENABLE_LOGGING: bool = false;
const VENDOR: &str = "ixnetwork";
const PORTS: &str = "{::ixNet::OBJ-/vport:1} {::ixNet::OBJ-/vport:2}";

/// A toy vendor class backed by a `TclSession` variable namespace -- object attributes are Tcl
/// variables named `<ref>.<attribute>`.
struct DemoClass {
    normalizer: RefNormalizer,
    session: core::cell::RefCell<TclSession>,
}

impl DemoClass {
    fn eval(
        &self,
        command: &str,
    ) -> Result<String, TgnError> {
        self.session.borrow_mut().eval(command)
    }
}

impl TgnClass for DemoClass {
    fn class_name(&self) -> &str {
        "DemoClass"
    }

    fn create(
        &self,
        parent: Option<&Rc<TgnObject>>,
        obj_type: &str,
        _attributes: &IndexMap<String, String>,
    ) -> Result<String, TgnError> {
        let parent_ref = parent.map_or("::ixNet::OBJ-", |p| p.obj_ref());

        Ok(format!("{parent_ref}/{obj_type}:1"))
    }

    fn get_name(
        &self,
        object: &Rc<TgnObject>,
    ) -> Result<String, TgnError> {
        self.get_attribute(object, "name")
    }

    fn get_attributes(
        &self,
        object: &Rc<TgnObject>,
    ) -> Result<IndexMap<String, String>, TgnError> {
        Ok(IndexMap::from([(String::from("name"), self.get_name(object)?)]))
    }

    fn get_attribute(
        &self,
        object: &Rc<TgnObject>,
        attribute: &str,
    ) -> Result<String, TgnError> {
        self.eval(&format!("set {{{}.{attribute}}}", object.obj_ref()))
    }

    fn get_children(
        &self,
        object: &Rc<TgnObject>,
        types: &[&str],
    ) -> Result<Vec<Rc<TgnObject>>, TgnError> {
        let mut children = vec![];

        for child_type in types {
            let list = self.eval(&format!("set {{{}.{child_type}}}", object.obj_ref()))?;
            let refs: Vec<String> = from_tcl_list(&mut *self.session.borrow_mut(), &list)?
                .iter()
                .flat_map(tgnrs::tcl::TclValue::flatten)
                .collect();

            children.extend(object.build_children_objs(child_type, &refs)?.into_values());
        }

        Ok(children)
    }

    fn get_objects_from_attribute(
        &self,
        object: &Rc<TgnObject>,
        attribute: &str,
    ) -> Result<Vec<Rc<TgnObject>>, TgnError> {
        let refs = self.get_attribute(object, attribute)?;

        Ok(refs
            .split_whitespace()
            .filter_map(|r| object.get_object_by_ref(r))
            .collect())
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

/// Enable (or not) some logging for our example.
fn enable_logging() {
    if !ENABLE_LOGGING {
        return;
    }

    env::set_var("RUST_LOG", "TRACE");

    let mut builder = Builder::from_default_env();

    builder.target(Target::Stdout);
    builder.filter_level(LevelFilter::Trace);

    env_logger::init();
}

/// Seed the "vendor" with a root and two ports.
fn setup_class() -> Rc<DemoClass> {
    let class = DemoClass {
        normalizer: RefNormalizer::for_vendor(VENDOR).expect("failed loading vendor definition"),
        session: core::cell::RefCell::new(TclSession::default()),
    };

    for command in [
        String::from("set {::ixNet::OBJ-/.name} root"),
        format!("set {{::ixNet::OBJ-/.vport}} {{{PORTS}}}"),
        String::from("set {::ixNet::OBJ-/vport:1.name} {Port 1}"),
        String::from("set {::ixNet::OBJ-/vport:2.name} {Port 2}"),
    ] {
        class.eval(&command).expect("failed seeding demo data");
    }

    Rc::new(class)
}

/// Build a root object, read its ports from the "vendor" and play with the tree and statistics
/// dictionaries.
fn main() {
    enable_logging();

    let class = setup_class();

    let root = ObjectBuilder::new("root")
        .obj_ref("::ixNet::OBJ-/")
        .name("root")
        .build(Rc::clone(&class) as Rc<dyn TgnClass>)
        .expect("failed building root object");

    let ports = root
        .get_objects_or_children_by_type(&["vport"])
        .expect("failed reading ports");

    for port in &ports {
        println!("found port '{port}' with reference '{}'", port.obj_ref());
    }

    let mut stats = TgnSubStatsDict::new();

    for (i, port) in ports.iter().enumerate() {
        let frames = u64::try_from(i + 1).unwrap_or_default() * 1000;

        stats
            .insert(port, IndexMap::from([(String::from("rx frames"), frames)]))
            .expect("failed inserting stats");
    }

    println!(
        "port 2 rx frames: {}",
        stats.bucket("Port 2").expect("no such port")["rx frames"]
    );
    println!(
        "statistics:\n{}",
        stats.dumps(DEFAULT_DUMP_INDENT).expect("failed dumping stats")
    );
}
