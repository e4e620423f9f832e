//! Process spawning.
//!
//! A process is a named OS thread running one protocol body. The thread only
//! ever blocks on rendezvous, so it needs no other coordination.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use tracing::{trace, warn};

use crate::error::{ProtocolError, Result};

/// Configuration for spawned processes.
#[derive(Debug, Clone)]
pub struct SpawnConfig {
    /// Prefix of every process thread name.
    pub name_prefix: String,
    /// Stack size for process threads. `None` keeps the platform default.
    pub stack_size: Option<usize>,
}

impl Default for SpawnConfig {
    fn default() -> Self {
        Self {
            name_prefix: "peano".to_string(),
            stack_size: None,
        }
    }
}

/// Starts processes and counts them.
///
/// Cheap to clone; clones share the configuration and the counter.
#[derive(Clone, Default)]
pub struct Spawner {
    inner: Arc<SpawnerInner>,
}

#[derive(Default)]
struct SpawnerInner {
    config: SpawnConfig,
    spawned: AtomicU64,
}

impl Spawner {
    /// Spawner with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Spawner with explicit configuration.
    pub fn with_config(config: SpawnConfig) -> Self {
        Self {
            inner: Arc::new(SpawnerInner {
                config,
                spawned: AtomicU64::new(0),
            }),
        }
    }

    /// Current configuration.
    pub fn config(&self) -> &SpawnConfig {
        &self.inner.config
    }

    /// Number of processes started so far.
    pub fn spawned(&self) -> u64 {
        self.inner.spawned.load(Ordering::Relaxed)
    }

    /// Start `body` as a new process.
    ///
    /// A failing body is logged here; the error is also returned from
    /// [`Process::join`].
    pub fn spawn<T, F>(&self, name: &'static str, body: F) -> Result<Process<T>>
    where
        T: Send + 'static,
        F: FnOnce() -> Result<T> + Send + 'static,
    {
        let seq = self.inner.spawned.fetch_add(1, Ordering::Relaxed);
        let thread_name = format!("{}-{name}-{seq}", self.inner.config.name_prefix);

        let mut builder = thread::Builder::new().name(thread_name.clone());
        if let Some(size) = self.inner.config.stack_size {
            builder = builder.stack_size(size);
        }

        let log_name = thread_name.clone();
        let handle = builder
            .spawn(move || {
                trace!(process = %log_name, "process started");
                let result = body();
                if let Err(err) = &result {
                    warn!(process = %log_name, error = %err, "process failed");
                }
                result
            })
            .map_err(|source| ProtocolError::Spawn {
                name: thread_name.clone(),
                source,
            })?;

        Ok(Process {
            name: thread_name,
            handle,
        })
    }
}

impl fmt::Debug for Spawner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Spawner")
            .field("config", &self.inner.config)
            .field("spawned", &self.spawned())
            .finish()
    }
}

/// Handle to a running process. Dropping it detaches the process.
pub struct Process<T> {
    name: String,
    handle: JoinHandle<Result<T>>,
}

impl<T> Process<T> {
    /// Thread name of the process.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Wait for the process and return its result.
    pub fn join(self) -> Result<T> {
        self.handle
            .join()
            .map_err(|_| ProtocolError::Panicked { name: self.name })?
    }
}

impl<T> fmt::Debug for Process<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Process").field("name", &self.name).finish()
    }
}

/// Join every process, then return the first error in spawn order.
pub fn join_all(processes: impl IntoIterator<Item = Process<()>>) -> Result<()> {
    let mut first_error = None;
    for process in processes {
        if let Err(err) = process.join() {
            first_error.get_or_insert(err);
        }
    }
    match first_error {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use peano_wire::{numeral, Endpoint, WireError};

    use super::*;

    #[test]
    fn spawned_process_returns_value() {
        let spawner = Spawner::new();
        let process = spawner
            .spawn("answer", || Ok(42u64))
            .expect("process should spawn");

        assert!(process.name().starts_with("peano-answer-"));
        assert_eq!(process.join().expect("process should succeed"), 42);
        assert_eq!(spawner.spawned(), 1);
    }

    #[test]
    fn thread_name_uses_configured_prefix() {
        let spawner = Spawner::with_config(SpawnConfig {
            name_prefix: "calc".to_string(),
            stack_size: Some(256 * 1024),
        });
        let process = spawner
            .spawn("probe", || {
                Ok(thread::current().name().unwrap_or_default().to_string())
            })
            .expect("process should spawn");

        assert_eq!(process.join().expect("process should succeed"), "calc-probe-0");
    }

    #[test]
    fn clones_share_counter() {
        let spawner = Spawner::new();
        let other = spawner.clone();
        other
            .spawn("one", || Ok(()))
            .and_then(Process::join)
            .expect("process should succeed");
        spawner
            .spawn("two", || Ok(()))
            .and_then(Process::join)
            .expect("process should succeed");

        assert_eq!(spawner.spawned(), 2);
        assert_eq!(other.spawned(), 2);
    }

    #[test]
    fn panicking_process_reports_panicked() {
        let spawner = Spawner::new();
        let process = spawner
            .spawn::<(), _>("boom", || panic!("boom"))
            .expect("process should spawn");

        assert!(matches!(
            process.join(),
            Err(ProtocolError::Panicked { .. })
        ));
    }

    #[test]
    fn join_all_returns_first_error_after_joining_everything() {
        let spawner = Spawner::new();
        let (tx, _rx) = numeral();
        let id = tx.id();
        let processes = vec![
            spawner.spawn("ok", || Ok(())).unwrap(),
            spawner
                .spawn("underflow", move || {
                    Err(ProtocolError::Underflow { numeral: id })
                })
                .unwrap(),
            spawner
                .spawn("wire", move || {
                    Err(WireError::Disconnected {
                        numeral: id,
                        endpoint: Endpoint::Zero,
                    }
                    .into())
                })
                .unwrap(),
        ];

        assert!(matches!(
            join_all(processes),
            Err(ProtocolError::Underflow { .. })
        ));
    }
}
