use core::time::Duration;

/// Separator used to join items before asking the interpreter to split them back into a list. A
/// tab is used so it does not collide with ordinary (space separated) content.
pub const ELEMENT_SEPARATOR: &str = "\t";

/// Sentinel the interpreter joins list elements with when converting a Tcl list back into values.
/// An element that contains this text is read back as two elements.
pub const LIST_SEPARATOR: &str = "LiStSeP";

/// The default delay between polls of a `TclWorker` command queue.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(10);

/// The default file type (extension) of a session script log file.
pub const DEFAULT_SCRIPT_FILE_TYPE: &str = "tcl";
