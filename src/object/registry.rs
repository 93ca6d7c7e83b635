extern crate alloc;

use super::TgnObject;
use alloc::rc::{
    Rc,
    Weak,
};
use core::cell::RefCell;
use std::collections::HashMap;

thread_local! {
    static REGISTRY: RefCell<HashMap<String, Vec<Weak<TgnObject>>>> = RefCell::new(HashMap::new());
}

/// Registers a newly constructed object under its class name.
pub(crate) fn register(object: &Rc<TgnObject>) {
    REGISTRY.with(|registry| {
        let mut registry = registry.borrow_mut();
        let instances = registry
            .entry(object.class().class_name().to_owned())
            .or_default();

        instances.retain(|w| w.strong_count() > 0);
        instances.push(Rc::downgrade(object));
    });
}

/// Drops the dead entries of `class_name`, called when an object of that class is dropped.
pub(crate) fn prune(class_name: &str) {
    // the registry may already be gone at thread exit, or borrowed if the drop happens while it is
    // being read -- dead entries are skipped on read anyway
    let _ = REGISTRY.try_with(|registry| {
        let Ok(mut registry) = registry.try_borrow_mut() else {
            return;
        };

        let Some(instances) = registry.get_mut(class_name) else {
            return;
        };

        instances.retain(|w| w.strong_count() > 0);

        if instances.is_empty() {
            registry.remove(class_name);
        }
    });
}

/// Returns all live objects (of this thread) whose class is `class_name`, in construction order.
pub(crate) fn objects_of_class(class_name: &str) -> Vec<Rc<TgnObject>> {
    REGISTRY.with(|registry| {
        registry
            .borrow()
            .get(class_name)
            .map(|instances| instances.iter().filter_map(Weak::upgrade).collect())
            .unwrap_or_default()
    })
}
