extern crate chrono;

use super::constants::DEFAULT_SCRIPT_FILE_TYPE;
use crate::errors::TgnError;
use crate::tcl::marshal::tcl_file_name;
use crate::tcl::{
    NativeInterpreter,
    TclInterpreter,
};
use chrono::offset::Utc;
use chrono::{
    Duration,
    NaiveDateTime,
};
use log::{
    debug,
    info,
    trace,
};
use std::fs::File;
use std::io::{
    LineWriter,
    Write,
};
use std::path::{
    Path,
    PathBuf,
};

/// `EvalRecord` holds the details of the last command evaluated by a `TclSession`.
pub struct EvalRecord {
    /// The command (script) sent to the interpreter.
    pub command: String,
    /// The raw result returned by the interpreter.
    pub result: String,
    /// Starting time of the evaluation.
    pub start_time: NaiveDateTime,
    /// Ending time of the evaluation.
    pub end_time: NaiveDateTime,
    /// Total time the evaluation took.
    pub elapsed_time: Duration,
}

impl EvalRecord {
    fn new(command: &str) -> Self {
        Self {
            command: command.to_owned(),
            result: String::new(),
            start_time: Utc::now().naive_utc(),
            end_time: Utc::now().naive_utc(),
            elapsed_time: Duration::zero(),
        }
    }

    fn record(
        &mut self,
        result: &str,
    ) {
        self.end_time = Utc::now().naive_utc();

        self.elapsed_time = self.end_time - self.start_time;

        result.clone_into(&mut self.result);
    }
}

/// Returns the file name of a script log file that lives next to `log_file` -- same directory, same
/// base name with `-suffix` appended and `file_type` as extension.
#[must_use]
pub fn new_log_file_name(
    log_file: &Path,
    suffix: &str,
    file_type: &str,
) -> PathBuf {
    let stem = log_file
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();

    log_file.with_file_name(format!("{stem}-{suffix}.{file_type}"))
}

/// `TclSession` wraps a Tcl interpreter for vendor API projects. Every command is logged and,
/// optionally, mirrored into a clean Tcl script file that can be replayed later for debug.
pub struct TclSession {
    interp: Box<dyn TclInterpreter>,
    script: Option<LineWriter<File>>,
    last: Option<EvalRecord>,
}

impl Default for TclSession {
    fn default() -> Self {
        Self::new(NativeInterpreter::new())
    }
}

impl TclSession {
    /// Returns a new `TclSession` wrapping the given interpreter.
    #[must_use]
    pub fn new(interp: impl TclInterpreter + 'static) -> Self {
        Self {
            interp: Box::new(interp),
            script: None,
            last: None,
        }
    }

    /// Mirror every evaluated command into the (truncated) file at `path`.
    ///
    /// # Errors
    ///
    /// Returns `TgnError::Io` if the file cannot be created.
    pub fn with_script_file(
        mut self,
        path: &Path,
    ) -> Result<Self, TgnError> {
        info!("logging tcl commands to {}", path.display());

        self.script = Some(LineWriter::new(File::create(path)?));

        Ok(self)
    }

    /// Mirror every evaluated command into a script file named after `log_file`, see
    /// `new_log_file_name`.
    ///
    /// # Errors
    ///
    /// Returns `TgnError::Io` if the file cannot be created.
    pub fn with_log_file(
        self,
        log_file: &Path,
        suffix: &str,
    ) -> Result<Self, TgnError> {
        let path = new_log_file_name(log_file, suffix, DEFAULT_SCRIPT_FILE_TYPE);

        self.with_script_file(&path)
    }

    /// Returns the record of the last evaluated command, if any.
    #[must_use]
    pub const fn last(&self) -> Option<&EvalRecord> {
        self.last.as_ref()
    }

    /// Returns the raw output of the last evaluated command, if any.
    #[must_use]
    pub fn rc(&self) -> Option<&str> {
        self.last.as_ref().map(|r| r.result.as_str())
    }

    /// Source (evaluate) a Tcl script file.
    ///
    /// # Errors
    ///
    /// Returns the interpreter error if sourcing fails.
    pub fn source(
        &mut self,
        script_file: &str,
    ) -> Result<String, TgnError> {
        self.eval(&format!("source {}", tcl_file_name(script_file)))
    }
}

impl TclInterpreter for TclSession {
    /// Write the command to the script file (if set), execute it and log the command output.
    fn eval(
        &mut self,
        command: &str,
    ) -> Result<String, TgnError> {
        debug!("{}", command);

        if let Some(script) = self.script.as_mut() {
            writeln!(script, "{command}")?;
        }

        let mut record = EvalRecord::new(command);

        let result = self.interp.eval(command)?;

        trace!("\t{}", result);

        record.record(&result);
        self.last = Some(record);

        Ok(result)
    }
}
