use std::io;
use thiserror::Error;

///  `TgnError` is the base error for all tgnrs errors.
#[derive(Debug, Error)]
pub enum TgnError {
    /// An object keyed dictionary was given a key that is not a `TgnObject`.
    #[error("TgnObjectsDict keys must be TgnObject, not '{0}'")]
    InvalidKey(String),

    /// A dictionary lookup found nothing by object, name or reference.
    #[error("key '{0}' not found")]
    KeyNotFound(String),

    /// A flat key was requested from a sub stats dictionary holding more than one bucket.
    #[error("key '{key}' is ambiguous, dictionary holds {buckets} buckets")]
    AmbiguousLookup {
        /// The requested key.
        key: String,
        /// Number of buckets held by the dictionary.
        buckets: usize,
    },

    /// An address (MAC, location...) string failed structural validation.
    #[error("invalid address format '{address}' - {details}")]
    MalformedAddress {
        /// The offending address.
        address: String,
        /// What exactly is wrong with it.
        details: String,
    },

    /// The vendor API rejected a request.
    #[error("vendor api error: {0}")]
    Vendor(String),

    /// The Tcl interpreter (or the list parser) rejected a command.
    #[error("tcl error: {0}")]
    Tcl(String),

    /// No embedded definition exists for the requested vendor.
    #[error("unknown vendor name '{0}'")]
    UnknownVendor(String),

    /// An embedded vendor definition could not be loaded.
    #[error("failed loading vendor definition, error: {0}")]
    VendorDefinition(String),

    /// A value could not be serialized (dictionary dumps).
    #[error("failed serializing, error: {0}")]
    Serialization(String),

    /// A wait style polling loop did not reach the requested state in time. Not raised by the
    /// object tree itself, vendor adapters return it from their wait loops.
    #[error("timeout waiting for {0}")]
    Timeout(String),

    /// Underlying file operation failed.
    #[error(transparent)]
    Io(#[from] io::Error),
}
