use super::constants::DEFAULT_POLL_INTERVAL;
use crate::errors::TgnError;
use crate::tcl::{
    NativeInterpreter,
    TclInterpreter,
};
use core::time::Duration;
use log::{
    debug,
    info,
};
use std::sync::mpsc::{
    channel,
    Receiver,
    Sender,
    TryRecvError,
};
use std::thread::{
    self,
    JoinHandle,
};

type EvalResult = Result<String, TgnError>;

/// `TclWorker` owns a single interpreter running in its own thread and serializes `eval` calls
/// through an in/out queue pair. The interpreter is built inside the worker thread, so thread bound
/// interpreters are fine.
///
/// There is no cancellation -- `eval` blocks until the worker answers or stops.
pub struct TclWorker {
    poll_interval: Duration,
    command_sender: Option<Sender<String>>,
    result_receiver: Option<Receiver<EvalResult>>,
    done_sender: Option<Sender<bool>>,
    handle: Option<JoinHandle<()>>,
}

impl Default for TclWorker {
    fn default() -> Self {
        Self::new()
    }
}

impl TclWorker {
    /// Returns a new, not yet started, `TclWorker`.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            poll_interval: DEFAULT_POLL_INTERVAL,
            command_sender: None,
            result_receiver: None,
            done_sender: None,
            handle: None,
        }
    }

    /// Sets the delay between polls of the command queue.
    #[must_use]
    pub fn poll_interval(
        mut self,
        d: Duration,
    ) -> Self {
        self.poll_interval = d;

        self
    }

    /// Returns true if the worker thread has been started (and not stopped).
    #[must_use]
    pub const fn is_running(&self) -> bool {
        self.handle.is_some()
    }

    /// Start the worker thread, `factory` builds the interpreter inside that thread.
    ///
    /// # Errors
    ///
    /// Returns `TgnError::Tcl` if the worker is already running.
    pub fn start<F, I>(
        &mut self,
        factory: F,
    ) -> Result<(), TgnError>
    where
        F: FnOnce() -> I + Send + 'static,
        I: TclInterpreter,
    {
        if self.is_running() {
            return Err(TgnError::Tcl(String::from("tcl worker already running")));
        }

        let (command_sender, command_receiver) = channel::<String>();
        let (result_sender, result_receiver) = channel::<EvalResult>();
        let (done_sender, done_receiver) = channel::<bool>();
        let poll_interval = self.poll_interval;

        debug!("starting tcl worker loop");

        self.handle = Some(thread::spawn(move || {
            let mut interp = factory();

            Self::run(
                &mut interp,
                poll_interval,
                &command_receiver,
                &result_sender,
                &done_receiver,
            );
        }));

        self.command_sender = Some(command_sender);
        self.result_receiver = Some(result_receiver);
        self.done_sender = Some(done_sender);

        Ok(())
    }

    /// Start the worker thread with a `NativeInterpreter`.
    ///
    /// # Errors
    ///
    /// Returns `TgnError::Tcl` if the worker is already running.
    pub fn start_native(&mut self) -> Result<(), TgnError> {
        self.start(NativeInterpreter::new)
    }

    /// Stop the worker thread and wait for it to exit. Stopping a worker that is not running is a
    /// no-op.
    ///
    /// # Errors
    ///
    /// Returns `TgnError::Tcl` if the worker thread panicked.
    pub fn stop(&mut self) -> Result<(), TgnError> {
        let Some(handle) = self.handle.take() else {
            return Ok(());
        };

        info!("tcl worker stopping...");

        if let Some(done_sender) = self.done_sender.take() {
            // a send error only means the loop is already gone
            let _ = done_sender.send(true);
        }

        self.command_sender = None;
        self.result_receiver = None;

        handle
            .join()
            .map_err(|_| TgnError::Tcl(String::from("tcl worker thread panicked")))
    }

    fn run(
        interp: &mut dyn TclInterpreter,
        poll_interval: Duration,
        command_receiver: &Receiver<String>,
        result_sender: &Sender<EvalResult>,
        done_receiver: &Receiver<bool>,
    ) {
        loop {
            match done_receiver.try_recv() {
                Ok(_) | Err(TryRecvError::Disconnected) => {
                    debug!("tcl worker loop received done signal");

                    return;
                }
                Err(TryRecvError::Empty) => {}
            }

            match command_receiver.try_recv() {
                Ok(command) => {
                    if result_sender.send(interp.eval(&command)).is_err() {
                        return;
                    }

                    continue;
                }
                Err(TryRecvError::Disconnected) => return,
                Err(TryRecvError::Empty) => {}
            }

            thread::sleep(poll_interval);
        }
    }
}

impl TclInterpreter for TclWorker {
    fn eval(
        &mut self,
        command: &str,
    ) -> Result<String, TgnError> {
        let (Some(command_sender), Some(result_receiver)) =
            (self.command_sender.as_ref(), self.result_receiver.as_ref())
        else {
            return Err(TgnError::Tcl(String::from("tcl worker is not running")));
        };

        command_sender
            .send(command.to_owned())
            .map_err(|_| TgnError::Tcl(String::from("tcl worker command queue disconnected")))?;

        result_receiver
            .recv()
            .map_err(|_| TgnError::Tcl(String::from("tcl worker result queue disconnected")))?
    }
}

impl Drop for TclWorker {
    fn drop(&mut self) {
        // nothing to report to from a drop
        let _ = self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_eval_in_worker() {
        let mut worker = TclWorker::new().poll_interval(Duration::from_millis(1));

        worker.start_native().unwrap();

        assert_eq!(worker.eval("set dummy \"hello world\"").unwrap(), "hello world");
        assert_eq!(worker.eval("set dummy").unwrap(), "hello world");
        assert!(worker.eval("no_such_command").is_err());

        worker.stop().unwrap();

        assert!(!worker.is_running());
    }

    #[test]
    fn test_eval_without_start_fails() {
        let mut worker = TclWorker::new();

        assert!(worker.eval("set a 1").is_err());
        assert!(worker.stop().is_ok());
    }

    #[test]
    fn test_double_start_fails() {
        let mut worker = TclWorker::new();

        worker.start_native().unwrap();

        assert!(worker.start_native().is_err());
    }
}
