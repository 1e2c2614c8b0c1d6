//! Debounced autosave scheduling
//!
//! A worker thread waits for `touch` messages. Each touch restarts the quiet
//! period; when the period elapses without another touch the callback runs
//! once. The scheduler knows nothing about documents: whoever spawns it
//! decides what "save" means.

use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

/// Messages sent to the worker thread
enum Command {
    /// Restart the quiet period
    Touch,
    /// Drop any pending firing
    Cancel,
    /// Use a new quiet period for later touches
    SetDelay(Duration),
}

/// Handle to a running autosave worker
///
/// Dropping the handle stops the worker without running a pending callback.
pub struct Autosaver {
    sender: Option<Sender<Command>>,
    worker: Option<JoinHandle<()>>,
}

impl Autosaver {
    /// Start a worker that runs `callback` after `delay` of inactivity
    pub fn spawn<F>(delay: Duration, callback: F) -> Self
    where
        F: FnMut() + Send + 'static,
    {
        let (sender, receiver) = mpsc::channel();
        let worker = thread::spawn(move || run_worker(receiver, delay, callback));
        log::debug!("Autosave worker started with {:?} delay", delay);

        Self {
            sender: Some(sender),
            worker: Some(worker),
        }
    }

    /// Record an edit, postponing the pending save
    pub fn touch(&self) {
        self.send(Command::Touch);
    }

    /// Forget the pending save, if any
    pub fn cancel(&self) {
        self.send(Command::Cancel);
    }

    /// Change the quiet period for subsequent touches
    pub fn set_delay(&self, delay: Duration) {
        self.send(Command::SetDelay(delay));
    }

    fn send(&self, command: Command) {
        if let Some(sender) = &self.sender {
            if sender.send(command).is_err() {
                log::warn!("Autosave worker is no longer running");
            }
        }
    }
}

impl Drop for Autosaver {
    fn drop(&mut self) {
        // Disconnecting the channel ends the worker loop
        self.sender.take();
        if let Some(worker) = self.worker.take() {
            if worker.join().is_err() {
                log::warn!("Autosave worker panicked");
            }
        }
    }
}

fn run_worker<F: FnMut()>(receiver: Receiver<Command>, mut delay: Duration, mut callback: F) {
    let mut deadline: Option<Instant> = None;

    loop {
        let command = match deadline {
            Some(at) => {
                let remaining = at.saturating_duration_since(Instant::now());
                match receiver.recv_timeout(remaining) {
                    Ok(command) => command,
                    Err(RecvTimeoutError::Timeout) => {
                        deadline = None;
                        log::debug!("Autosave quiet period elapsed");
                        callback();
                        continue;
                    }
                    Err(RecvTimeoutError::Disconnected) => return,
                }
            }
            None => match receiver.recv() {
                Ok(command) => command,
                Err(_) => return,
            },
        };

        match command {
            Command::Touch => deadline = Some(Instant::now() + delay),
            Command::Cancel => deadline = None,
            Command::SetDelay(new_delay) => delay = new_delay,
        }
    }
}
