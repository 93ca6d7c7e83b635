use crate::tcl::list::quote_element;
use core::fmt::{
    Display,
    Formatter,
    Result,
};

/// A value read back from a Tcl list -- either a leaf string or a (possibly nested) list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TclValue {
    /// A flat, leaf, string element.
    Str(String),
    /// A nested list.
    List(Vec<TclValue>),
}

impl TclValue {
    /// Returns the leaf string, `None` for lists.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            Self::List(_) => None,
        }
    }

    /// Returns the nested values, `None` for leaf strings.
    #[must_use]
    pub fn as_list(&self) -> Option<&[Self]> {
        match self {
            Self::Str(_) => None,
            Self::List(values) => Some(values),
        }
    }

    /// Recursively flattens the value into its leaf strings, in order.
    #[must_use]
    pub fn flatten(&self) -> Vec<String> {
        match self {
            Self::Str(s) => vec![s.clone()],
            Self::List(values) => values.iter().flat_map(Self::flatten).collect(),
        }
    }
}

impl From<&str> for TclValue {
    fn from(s: &str) -> Self {
        Self::Str(s.to_owned())
    }
}

impl From<String> for TclValue {
    fn from(s: String) -> Self {
        Self::Str(s)
    }
}

impl<T: Into<TclValue>> From<Vec<T>> for TclValue {
    fn from(values: Vec<T>) -> Self {
        Self::List(values.into_iter().map(Into::into).collect())
    }
}

impl Display for TclValue {
    /// Renders the value in Tcl list syntax, nested lists are brace quoted.
    fn fmt(
        &self,
        f: &mut Formatter<'_>,
    ) -> Result {
        match self {
            Self::Str(s) => write!(f, "{s}"),
            Self::List(values) => {
                let rendered: Vec<String> = values
                    .iter()
                    .map(|v| quote_element(&v.to_string()))
                    .collect();

                write!(f, "{}", rendered.join(" "))
            }
        }
    }
}

/// Flattens a sequence of marshalled values into leaf strings.
#[must_use]
pub fn flatten(values: &[TclValue]) -> Vec<String> {
    values.iter().flat_map(TclValue::flatten).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_flatten() {
        let values = vec![
            TclValue::from("1"),
            TclValue::from(vec![
                TclValue::from("11"),
                TclValue::from(vec!["111"]),
            ]),
            TclValue::from("2"),
            TclValue::from(vec!["22"]),
        ];

        assert_eq!(values.len(), 4);
        assert_eq!(flatten(&values), vec!["1", "11", "111", "2", "22"]);
    }

    #[test]
    fn test_display() {
        let value = TclValue::from(vec![
            TclValue::from("a"),
            TclValue::from(vec!["b b", "c"]),
        ]);

        assert_eq!(value.to_string(), "a {{b b} c}");
    }
}
