extern crate alloc;

use super::constants::{
    ELEMENT_SEPARATOR,
    LIST_SEPARATOR,
};
use super::list::quote_element;
use crate::errors::TgnError;
use crate::object::TgnObject;
use crate::tcl::{
    TclInterpreter,
    TclValue,
};
use alloc::rc::Rc;
use core::fmt::Display;
use indexmap::IndexMap;
use log::trace;
use serde_json::Value as JsonValue;

/// Returns `s` surrounded by braces -- the way to pass an opaque string as a single Tcl word.
#[must_use]
pub fn tcl_str(s: &str) -> String {
    format!("{{{s}}}")
}

fn normalize_path(name: &str) -> String {
    let unified = name.replace('\\', "/");
    let absolute = unified.starts_with('/');
    let mut parts: Vec<&str> = vec![];

    for part in unified.split('/') {
        match part {
            "" | "." => {}
            ".." => {
                if parts.last().is_some_and(|p| *p != "..") {
                    parts.pop();
                } else if !absolute {
                    parts.push(part);
                }
            }
            _ => parts.push(part),
        }
    }

    let joined = parts.join("/");

    if absolute {
        format!("/{joined}")
    } else if joined.is_empty() {
        String::from(".")
    } else {
        joined
    }
}

/// Returns the normalized, forward slashed, file name quoted as a single Tcl word.
#[must_use]
pub fn tcl_file_name(name: &str) -> String {
    tcl_str(&normalize_path(name))
}

/// Returns Tcl argument pairs (`-key {value} ...`) to be used in vendor API commands.
pub fn get_args_pairs<V: Display>(arguments: &IndexMap<String, V>) -> String {
    arguments
        .iter()
        .map(|(k, v)| format!("-{k} {}", tcl_str(&v.to_string())))
        .collect::<Vec<String>>()
        .join(" ")
}

/// Returns a Tcl list of the references of all `objects`.
pub fn build_obj_ref_list(objects: &[Rc<TgnObject>]) -> String {
    objects
        .iter()
        .map(|o| o.obj_ref())
        .collect::<Vec<&str>>()
        .join(" ")
}

/// Converts `items` into a well formed Tcl list, letting the interpreter do the quoting.
///
/// # Errors
///
/// Returns the interpreter error, typically when an item holds unbalanced braces.
pub fn to_tcl_list<S: Display>(
    interp: &mut dyn TclInterpreter,
    items: &[S],
) -> Result<String, TgnError> {
    let joined = items
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<String>>()
        .join(ELEMENT_SEPARATOR);

    interp.eval(&format!("split {} \\t", quote_element(&joined)))
}

fn json_to_value(json: JsonValue) -> TclValue {
    match json {
        JsonValue::Null => TclValue::Str(String::new()),
        JsonValue::String(s) => TclValue::Str(s),
        JsonValue::Array(values) => TclValue::List(values.into_iter().map(json_to_value).collect()),
        JsonValue::Object(map) => TclValue::List(
            map.into_iter()
                .flat_map(|(k, v)| [TclValue::Str(k), json_to_value(v)])
                .collect(),
        ),
        other => TclValue::Str(other.to_string()),
    }
}

fn from_json(list: &str) -> Option<Vec<TclValue>> {
    match serde_json::from_str::<JsonValue>(list) {
        Ok(json @ (JsonValue::Array(_) | JsonValue::Object(_))) => match json_to_value(json) {
            TclValue::List(values) => Some(values),
            TclValue::Str(_) => None,
        },
        _ => None,
    }
}

/// Recursively converts a (possibly nested) Tcl list -- or a JSON array embedded in the string --
/// into `TclValue`s.
///
/// # Errors
///
/// Returns the interpreter error if the top level string is not a valid Tcl list.
pub fn from_tcl_list(
    interp: &mut dyn TclInterpreter,
    list: &str,
) -> Result<Vec<TclValue>, TgnError> {
    if list.trim().is_empty() {
        return Ok(vec![]);
    }

    if let Some(values) = from_json(list) {
        return Ok(values);
    }

    let joined = interp.eval(&format!("join {} {LIST_SEPARATOR}", tcl_str(list)))?;

    trace!("tcl list '{}' joined to '{}'", list, joined);

    let mut values = vec![];

    for element in joined.split(LIST_SEPARATOR) {
        if !element.contains('{') {
            values.push(TclValue::from(element));

            continue;
        }

        let value = match from_tcl_list(interp, element) {
            Ok(nested) if nested.len() == 1 && nested.first().and_then(TclValue::as_str) == Some(element) => {
                TclValue::from(element)
            }
            Ok(nested) => TclValue::List(nested),
            Err(_) => TclValue::from(element),
        };

        values.push(value);
    }

    Ok(values)
}
