use crate::errors::TgnError;
use log::debug;
use once_cell::sync::OnceCell;
use regex::{
    NoExpand,
    Regex,
};
use serde::{
    Deserialize,
    Serialize,
};
use std::collections::HashMap;

const GENERIC_VENDOR_YAML: &str = include_str!("assets/generic.yaml");
const IXNETWORK_VENDOR_YAML: &str = include_str!("assets/ixnetwork.yaml");

/// Returns a `HashMap` wherein vendor names are keys and the included yaml vendor (asset) data
/// string is the value.
pub fn get_vendors() -> &'static HashMap<&'static str, &'static str> {
    static VENDORS: OnceCell<HashMap<&str, &str>> = OnceCell::new();

    VENDORS.get_or_init(|| {
        HashMap::from([
            ("generic", GENERIC_VENDOR_YAML),
            ("ixnetwork", IXNETWORK_VENDOR_YAML),
        ])
    })
}

/// An enum representing the API types a traffic generator may expose.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApiType {
    /// Tcl API, driven through a `TclInterpreter`.
    #[default]
    Tcl,
    /// Native (Python) API.
    Python,
    /// REST API.
    Rest,
    /// Raw socket API.
    Socket,
}

/// A single reference rewrite rule -- every match of `pattern` is replaced by `replacement`.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct RefRule {
    /// Regular expression to search for in the reference.
    pub pattern: String,
    /// Literal replacement string.
    pub replacement: String,
}

/// `VendorDefinition` holds the per vendor settings the object tree needs -- the API type and the
/// rules used to normalize object references before comparing them.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct VendorDefinition {
    /// The name of the vendor, for example "ixnetwork".
    pub vendor_name: String,
    /// The API type used to talk to the vendor.
    #[serde(default)]
    pub api_type: ApiType,
    /// Reference normalization rules, applied in order.
    #[serde(default)]
    pub ref_rules: Vec<RefRule>,
}

impl VendorDefinition {
    /// Returns an instance of `VendorDefinition` loaded from the embedded asset of `vendor_name`.
    ///
    /// # Errors
    ///
    /// Returns `UnknownVendor` if there is no asset for the vendor and `VendorDefinition` if the
    /// asset can not be deserialized.
    pub fn new(vendor_name: &str) -> Result<Self, TgnError> {
        let vendor_str = get_vendors()
            .get(vendor_name)
            .ok_or_else(|| TgnError::UnknownVendor(vendor_name.to_owned()))?;

        serde_yaml::from_str(vendor_str).map_err(|err| TgnError::VendorDefinition(err.to_string()))
    }

    /// Returns a `RefNormalizer` compiled from the vendor reference rules.
    ///
    /// # Errors
    ///
    /// Returns `VendorDefinition` if one of the rule patterns is not a valid regex.
    pub fn normalizer(&self) -> Result<RefNormalizer, TgnError> {
        RefNormalizer::new(&self.ref_rules)
    }
}

/// `RefNormalizer` rewrites object references with a list of compiled `RefRule`s. A normalizer
/// without rules is the identity.
#[derive(Debug, Default)]
pub struct RefNormalizer {
    rules: Vec<(Regex, String)>,
}

impl RefNormalizer {
    /// Returns a new `RefNormalizer` for `rules`.
    ///
    /// # Errors
    ///
    /// Returns `VendorDefinition` if one of the rule patterns is not a valid regex.
    pub fn new(rules: &[RefRule]) -> Result<Self, TgnError> {
        let mut compiled = Vec::with_capacity(rules.len());

        for rule in rules {
            let pattern = Regex::new(&rule.pattern).map_err(|err| {
                TgnError::VendorDefinition(format!("bad ref rule '{}', error: {err}", rule.pattern))
            })?;

            compiled.push((pattern, rule.replacement.clone()));
        }

        Ok(Self { rules: compiled })
    }

    /// Returns a `RefNormalizer` for the embedded definition of `vendor_name`.
    ///
    /// # Errors
    ///
    /// Returns the errors of `VendorDefinition::new` and `VendorDefinition::normalizer`.
    pub fn for_vendor(vendor_name: &str) -> Result<Self, TgnError> {
        let normalizer = VendorDefinition::new(vendor_name)?.normalizer()?;

        debug!(
            "loaded {} ref rules for vendor '{vendor_name}'",
            normalizer.rules.len()
        );

        Ok(normalizer)
    }

    /// Returns the normalized form of `obj_ref`.
    #[must_use]
    pub fn normalize(
        &self,
        obj_ref: &str,
    ) -> String {
        self.rules
            .iter()
            .fold(obj_ref.to_owned(), |normalized, (pattern, replacement)| {
                pattern
                    .replace_all(&normalized, NoExpand(replacement.as_str()))
                    .into_owned()
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_vendor_definition() {
        let ixn = VendorDefinition::new("ixnetwork").unwrap();

        assert_eq!(ixn.vendor_name, "ixnetwork");
        assert_eq!(ixn.api_type, ApiType::Tcl);
        assert_eq!(ixn.ref_rules.len(), 2);

        let generic = VendorDefinition::new("generic").unwrap();

        assert_eq!(generic.api_type, ApiType::Python);
        assert!(generic.ref_rules.is_empty());
    }

    #[test]
    fn test_unknown_vendor() {
        assert!(matches!(
            VendorDefinition::new("nope"),
            Err(TgnError::UnknownVendor(name)) if name == "nope"
        ));
    }

    #[test]
    fn test_ixnetwork_normalizer() {
        let normalizer = RefNormalizer::for_vendor("ixnetwork").unwrap();

        assert_eq!(
            normalizer.normalize("::ixNet::OBJ-/vport:1/protocols/bgp/neighborRange:1.0/routeRange:1"),
            "::ixNet::OBJ-/vport:1/protocols/bgp/neighborRange:1/routeRange:1"
        );
        assert_eq!(
            normalizer.normalize("::ixNet::OBJ-/vport:1/protocols/ldp/router:1/neighborPairs:2"),
            "::ixNet::OBJ-/vport:1/protocols/ldp/router:1/neighborPair:2"
        );
        assert_eq!(normalizer.normalize("vport:1/address:10.05"), "vport:1/address:10.05");
    }

    #[test]
    fn test_identity_normalizer() {
        let normalizer = RefNormalizer::default();

        assert_eq!(normalizer.normalize("port:1.0"), "port:1.0");
    }

    #[test]
    fn test_bad_rule() {
        let rules = vec![RefRule {
            pattern: "(".to_owned(),
            replacement: String::new(),
        }];

        assert!(matches!(
            RefNormalizer::new(&rules),
            Err(TgnError::VendorDefinition(_))
        ));
    }
}
