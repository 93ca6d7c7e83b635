#![deny(clippy::all)]
#![deny(clippy::cargo)]
#![deny(clippy::complexity)]
#![deny(clippy::correctness)]
#![deny(clippy::nursery)]
#![deny(clippy::pedantic)]
#![deny(clippy::perf)]
#![deny(clippy::style)]
#![deny(clippy::suspicious)]
#![deny(missing_docs)]
#![warn(clippy::multiple_crate_versions)]
// restriction is wild, but some good things for consistency in there, rather would allow things
// explicitly so any new lints pop up and annoy if they get added and then can decide to keep or
// ditch them!
#![warn(clippy::restriction)]
#![allow(clippy::implicit_return)]
#![allow(clippy::missing_docs_in_private_items)]
#![allow(clippy::question_mark_used)]
#![allow(clippy::separated_literal_suffix)]
#![allow(clippy::missing_inline_in_public_items)]
#![allow(clippy::exhaustive_enums)]
#![allow(clippy::exhaustive_structs)]
#![allow(clippy::self_named_module_files)]
#![allow(clippy::multiple_inherent_impl)]
#![allow(clippy::partial_pub_fields)]
#![allow(clippy::default_numeric_fallback)]
#![allow(clippy::blanket_clippy_restriction_lints)]
#![allow(clippy::std_instead_of_core)]
#![allow(clippy::multiple_unsafe_ops_per_block)]
#![allow(clippy::single_char_lifetime_names)]
#![allow(clippy::missing_trait_methods)]
#![allow(clippy::as_conversions)]
#![allow(clippy::shadow_unrelated)]
#![allow(clippy::unwrap_in_result)]
#![allow(clippy::pub_use)]
#![allow(clippy::arithmetic_side_effects)]

//! tgnrs is a rust implementation of the generic "trafficgenerator" object model -- a vendor
//! agnostic tree of traffic generator configuration objects (chassis, ports, streams...) plus the
//! Tcl list marshalling used to talk to Tcl based traffic generator APIs.

/// MAC (and friends) address parsing and formatting.
pub mod addresses;

/// Dictionaries keyed by `TgnObject`s that can also be addressed by object name or reference.
pub mod dict;

/// Tgnrs errors.
pub mod errors;

/// The `TgnObject` tree -- objects, their builder and the `TgnClass` trait vendors implement.
pub mod object;

/// Tcl list marshalling, the interpreter trait and the native Tcl subset interpreter, the logging
/// session wrapper and the interpreter worker thread.
pub mod tcl;

/// Tgnrs utilities.
pub mod util {
    /// Vendor string predicates (true/false values, localhost, IP types).
    pub mod strings;
}

/// Module responsible for dealing with "vendor" things -- meaning taking a yaml vendor definition
/// and generating the api type and reference normalizer of a given traffic generator family.
pub mod vendor;
