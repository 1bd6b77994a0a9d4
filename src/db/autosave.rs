use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use tracing::{debug, error};

use crate::db::kv_store::KvStore;
use crate::db::roster_repo;
use crate::model::Participant;

/// Quiet period after the last change before the roster is written.
pub const SAVE_DELAY: Duration = Duration::from_secs(1);

enum Message {
    Snapshot(Vec<Participant>),
    Flush(Sender<()>),
}

/// Debounced roster writer. Each scheduled snapshot replaces the pending one
/// and restarts the quiet period; only the latest snapshot is written.
/// Dropping the saver writes whatever is still pending.
pub struct Autosaver {
    tx: Option<Sender<Message>>,
    worker: Option<JoinHandle<()>>,
}

impl Autosaver {
    pub fn spawn(store: Box<dyn KvStore>, delay: Duration) -> Self {
        let (tx, rx) = mpsc::channel();
        let worker = thread::Builder::new()
            .name("dues-autosave".into())
            .spawn(move || run(store, rx, delay));

        match worker {
            Ok(handle) => Self {
                tx: Some(tx),
                worker: Some(handle),
            },
            Err(e) => {
                error!(error = %e, "could not start autosave worker, changes will not be saved");
                Self {
                    tx: None,
                    worker: None,
                }
            }
        }
    }

    pub fn schedule(&self, snapshot: Vec<Participant>) {
        if let Some(tx) = &self.tx {
            if tx.send(Message::Snapshot(snapshot)).is_err() {
                error!("autosave worker has stopped, change not saved");
            }
        }
    }

    /// Writes any pending snapshot now and waits for it to land.
    pub fn flush(&self) {
        let Some(tx) = &self.tx else { return };
        let (ack_tx, ack_rx) = mpsc::channel();
        if tx.send(Message::Flush(ack_tx)).is_ok() {
            let _ = ack_rx.recv();
        }
    }
}

impl Drop for Autosaver {
    fn drop(&mut self) {
        // Closing the channel makes the worker write its pending snapshot and exit.
        self.tx.take();
        if let Some(worker) = self.worker.take() {
            if worker.join().is_err() {
                error!("autosave worker panicked");
            }
        }
    }
}

fn run(store: Box<dyn KvStore>, rx: Receiver<Message>, delay: Duration) {
    let mut pending: Option<(Vec<Participant>, Instant)> = None;

    loop {
        let received = match &pending {
            Some((_, deadline)) => {
                let now = Instant::now();
                if now >= *deadline {
                    Err(RecvTimeoutError::Timeout)
                } else {
                    rx.recv_timeout(*deadline - now)
                }
            }
            None => rx.recv().map_err(|_| RecvTimeoutError::Disconnected),
        };

        match received {
            Ok(Message::Snapshot(snapshot)) => {
                pending = Some((snapshot, Instant::now() + delay));
            }
            Ok(Message::Flush(ack)) => {
                write_pending(store.as_ref(), pending.take());
                let _ = ack.send(());
            }
            Err(RecvTimeoutError::Timeout) => {
                write_pending(store.as_ref(), pending.take());
            }
            Err(RecvTimeoutError::Disconnected) => {
                write_pending(store.as_ref(), pending.take());
                debug!("autosave worker stopped");
                return;
            }
        }
    }
}

fn write_pending(store: &dyn KvStore, pending: Option<(Vec<Participant>, Instant)>) {
    if let Some((snapshot, _)) = pending {
        if let Err(e) = roster_repo::save(store, &snapshot) {
            error!(error = %e, "failed to save roster");
        }
    }
}
