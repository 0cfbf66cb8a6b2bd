use super::backend::KeyValueBackend;
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use tracing::{debug, warn};

enum Job {
    Write { key: String, value: String },
    Flush(Sender<()>),
}

/// Single background writer applying snapshot writes in submission order.
///
/// Callers never wait on a write. Failures are logged and dropped; there is
/// no retry. Dropping the queue drains pending writes before returning.
pub struct PersistQueue {
    tx: Option<Sender<Job>>,
    worker: Option<JoinHandle<()>>,
}

impl PersistQueue {
    pub fn spawn(backend: Arc<dyn KeyValueBackend>) -> Self {
        let (tx, rx) = mpsc::channel::<Job>();

        let worker = thread::Builder::new()
            .name("nextact-persist".to_string())
            .spawn(move || run_writer(backend, rx));

        match worker {
            Ok(handle) => Self {
                tx: Some(tx),
                worker: Some(handle),
            },
            Err(e) => {
                warn!("Failed to start persist thread, writes disabled: {}", e);
                Self {
                    tx: None,
                    worker: None,
                }
            }
        }
    }

    /// Queue a full overwrite of `key`
    pub fn submit(&self, key: &str, value: String) {
        let Some(tx) = &self.tx else {
            return;
        };
        let job = Job::Write {
            key: key.to_string(),
            value,
        };
        if tx.send(job).is_err() {
            warn!("Persist thread gone, dropping write for '{}'", key);
        }
    }

    /// Block until every write submitted so far has been applied
    pub fn flush(&self) {
        let Some(tx) = &self.tx else {
            return;
        };
        let (done_tx, done_rx) = mpsc::channel();
        if tx.send(Job::Flush(done_tx)).is_ok() {
            let _ = done_rx.recv();
        }
    }
}

impl Drop for PersistQueue {
    fn drop(&mut self) {
        // Closing the channel ends the writer loop once the backlog is done
        self.tx.take();
        if let Some(worker) = self.worker.take() {
            if worker.join().is_err() {
                warn!("Persist thread panicked");
            }
        }
    }
}

fn run_writer(backend: Arc<dyn KeyValueBackend>, rx: Receiver<Job>) {
    while let Ok(job) = rx.recv() {
        match job {
            Job::Write { key, value } => match backend.set(&key, &value) {
                Ok(()) => debug!("Persisted '{}' ({} bytes)", key, value.len()),
                Err(e) => warn!("Failed to persist '{}': {}", key, e),
            },
            Job::Flush(done) => {
                let _ = done.send(());
            }
        }
    }
}
