mod constants;
mod interp;
mod list;
mod marshal;
mod session;
mod value;
mod worker;

pub use constants::{
    DEFAULT_POLL_INTERVAL,
    ELEMENT_SEPARATOR,
    LIST_SEPARATOR,
};
pub use interp::{
    NativeInterpreter,
    TclInterpreter,
};
pub use list::{
    merge_list,
    parse_list,
    quote_element,
};
pub use marshal::{
    build_obj_ref_list,
    from_tcl_list,
    get_args_pairs,
    tcl_file_name,
    tcl_str,
    to_tcl_list,
};
pub use session::{
    new_log_file_name,
    EvalRecord,
    TclSession,
};
pub use value::{
    flatten,
    TclValue,
};
pub use worker::TclWorker;
