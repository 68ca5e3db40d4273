use std::{collections::BTreeMap, io, sync::Arc};

use tokio::{
    sync::{mpsc, oneshot},
    task::JoinHandle,
};
use tracing::{debug, warn};

use super::backend::Backend;
use crate::error::StoreError;

#[derive(Debug)]
enum WriteOp {
    Write { key: String, bytes: Vec<u8> },
    Remove { key: String },
    Flush(oneshot::Sender<()>),
}

/// Backend decorator that performs writes on a background task.
///
/// Writes are queued in call order and applied one at a time, so two writes
/// to the same key always land in the order they were issued. A write that
/// fails is kept and retried before the next queued operation; a newer write
/// to the same key replaces it.
pub struct BackgroundBackend {
    inner: Arc<dyn Backend>,
    sender: mpsc::UnboundedSender<WriteOp>,
}

impl BackgroundBackend {
    /// Start the writer task on the current Tokio runtime.
    pub fn spawn(inner: Arc<dyn Backend>) -> (Self, JoinHandle<()>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        let handle = tokio::spawn(drain(Arc::clone(&inner), receiver));
        (Self { inner, sender }, handle)
    }

    /// Wait until every write queued so far has been attempted.
    pub async fn flush(&self) {
        let (done, wait) = oneshot::channel();
        if self.sender.send(WriteOp::Flush(done)).is_ok() {
            let _ = wait.await;
        }
    }

    fn enqueue(&self, key: &str, op: WriteOp) -> Result<(), StoreError> {
        self.sender.send(op).map_err(|_| StoreError::Write {
            key: key.to_string(),
            source: io::Error::new(io::ErrorKind::BrokenPipe, "background writer stopped"),
        })
    }
}

impl Backend for BackgroundBackend {
    fn read(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        self.inner.read(key)
    }

    fn write(&self, key: &str, bytes: &[u8]) -> Result<(), StoreError> {
        self.enqueue(
            key,
            WriteOp::Write {
                key: key.to_string(),
                bytes: bytes.to_vec(),
            },
        )
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.enqueue(
            key,
            WriteOp::Remove {
                key: key.to_string(),
            },
        )
    }
}

async fn drain(inner: Arc<dyn Backend>, mut receiver: mpsc::UnboundedReceiver<WriteOp>) {
    let mut failed: BTreeMap<String, WriteOp> = BTreeMap::new();

    while let Some(op) = receiver.recv().await {
        match op {
            WriteOp::Flush(done) => {
                retry(inner.as_ref(), &mut failed);
                let _ = done.send(());
            }
            op => {
                let key = match &op {
                    WriteOp::Write { key, .. } | WriteOp::Remove { key } => key.clone(),
                    WriteOp::Flush(_) => continue,
                };
                failed.remove(&key);
                retry(inner.as_ref(), &mut failed);
                if let Err(err) = apply(inner.as_ref(), &op) {
                    warn!(%key, ?err, "Background write failed; will retry");
                    failed.insert(key, op);
                }
            }
        }
    }

    if !failed.is_empty() {
        warn!(pending = failed.len(), "Background writer stopped with unsaved keys");
    }
    debug!("Background writer stopped");
}

fn retry(inner: &dyn Backend, failed: &mut BTreeMap<String, WriteOp>) {
    failed.retain(|key, op| match apply(inner, op) {
        Ok(()) => {
            debug!(%key, "Retried write succeeded");
            false
        }
        Err(_) => true,
    });
}

fn apply(inner: &dyn Backend, op: &WriteOp) -> Result<(), StoreError> {
    match op {
        WriteOp::Write { key, bytes } => inner.write(key, bytes),
        WriteOp::Remove { key } => inner.remove(key),
        WriteOp::Flush(_) => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryBackend;

    #[tokio::test]
    async fn writes_land_in_order() -> anyhow::Result<()> {
        let memory = Arc::new(MemoryBackend::new());
        let (backend, _handle) = BackgroundBackend::spawn(memory.clone());

        backend.write("currentGame", b"1")?;
        backend.write("currentGame", b"2")?;
        backend.remove("lastPlayedDate")?;
        backend.write("currentGame", b"3")?;
        backend.flush().await;

        assert_eq!(memory.read("currentGame")?.as_deref(), Some(&b"3"[..]));
        Ok(())
    }

    #[tokio::test]
    async fn failed_writes_are_retried() -> anyhow::Result<()> {
        let memory = Arc::new(MemoryBackend::new());
        let (backend, _handle) = BackgroundBackend::spawn(memory.clone());

        memory.set_fail_writes(true);
        backend.write("gameStats", b"first")?;
        backend.flush().await;
        assert!(!memory.contains("gameStats"));

        memory.set_fail_writes(false);
        backend.write("lastPlayedDate", b"\"2024-01-01T00:00:00Z\"")?;
        backend.flush().await;
        assert_eq!(memory.read("gameStats")?.as_deref(), Some(&b"first"[..]));
        assert!(memory.contains("lastPlayedDate"));
        Ok(())
    }

    #[tokio::test]
    async fn newer_write_supersedes_failed_one() -> anyhow::Result<()> {
        let memory = Arc::new(MemoryBackend::new());
        let (backend, _handle) = BackgroundBackend::spawn(memory.clone());

        memory.set_fail_writes(true);
        backend.write("gameStats", b"stale")?;
        backend.flush().await;
        memory.set_fail_writes(false);
        backend.write("gameStats", b"fresh")?;
        backend.flush().await;

        assert_eq!(memory.read("gameStats")?.as_deref(), Some(&b"fresh"[..]));
        Ok(())
    }
}
