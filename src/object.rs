mod builder;
mod class;
#[allow(clippy::module_inception)]
mod object;
mod registry;
mod search;

pub use builder::ObjectBuilder;
pub use class::{
    TgnClass,
    TgnL3,
};
pub use object::TgnObject;
