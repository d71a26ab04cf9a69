//! Scoped worker launcher.
//!
//! Workers are plain OS threads started per call inside
//! [`std::thread::scope`], so they may borrow the caller's inputs and the
//! disjoint output blocks moved into them. No pool outlives a call.
//!
//! # Launch failure
//!
//! Workers are started strictly in job order. If starting worker `i` fails,
//! the launcher:
//!
//! 1. stops launching,
//! 2. raises the shared [`CancelToken`] so workers `0..i` return at their
//!    next safe point,
//! 3. joins those workers and drops whatever they produced,
//! 4. returns [`KernelError::Launch`].
//!
//! The caller therefore never sees partial output from a failed call.

use std::io;
use std::panic;
use std::thread::{self, ScopedJoinHandle};

use tracing::{debug, warn};

use super::CancelToken;
use crate::error::{KernelError, Result};

const DEFAULT_NAME_PREFIX: &str = "par-kernels-worker";

/// Supplies the thread builder used to start each worker.
///
/// The default [`ThreadSpawner`] never fails here; the actual OS spawn can
/// still fail. Custom policies can refuse a launch, which exercises the same
/// recovery path as an OS-level failure.
pub trait SpawnPolicy: Sync {
    /// Return the builder for worker `index`, or an error to abort the launch.
    fn builder(&self, index: usize) -> io::Result<thread::Builder>;
}

/// Settings applied to every worker thread.
#[derive(Debug, Clone)]
pub struct LaunchConfig {
    /// Workers are named `{name_prefix}-{index}`.
    pub name_prefix: String,
    /// Stack size for worker threads; `None` uses the platform default.
    pub stack_size: Option<usize>,
}

impl Default for LaunchConfig {
    fn default() -> Self {
        Self {
            name_prefix: DEFAULT_NAME_PREFIX.to_string(),
            stack_size: None,
        }
    }
}

impl LaunchConfig {
    /// Create the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the worker thread name prefix.
    pub fn name_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.name_prefix = prefix.into();
        self
    }

    /// Set the worker stack size in bytes.
    pub fn stack_size(mut self, bytes: usize) -> Self {
        self.stack_size = Some(bytes);
        self
    }
}

/// Spawns named OS threads according to a [`LaunchConfig`].
#[derive(Debug, Clone, Default)]
pub struct ThreadSpawner {
    config: LaunchConfig,
}

impl ThreadSpawner {
    /// Create a spawner from a configuration.
    pub fn new(config: LaunchConfig) -> Self {
        Self { config }
    }

    /// The configuration in use.
    pub fn config(&self) -> &LaunchConfig {
        &self.config
    }
}

impl SpawnPolicy for ThreadSpawner {
    fn builder(&self, index: usize) -> io::Result<thread::Builder> {
        let mut builder =
            thread::Builder::new().name(format!("{}-{index}", self.config.name_prefix));
        if let Some(bytes) = self.config.stack_size {
            builder = builder.stack_size(bytes);
        }
        Ok(builder)
    }
}

/// Runs one job per worker thread and collects their outputs.
///
/// # Example
///
/// ```rust
/// use par_kernels::core::{CancelToken, Launcher};
///
/// let data = [1, 2, 3, 4];
/// let jobs: Vec<_> = data
///     .chunks(2)
///     .map(|chunk| move |_: &CancelToken| chunk.iter().sum::<i32>())
///     .collect();
/// let sums = Launcher::new().launch(jobs).unwrap();
/// assert_eq!(sums, vec![3, 7]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Launcher<S = ThreadSpawner> {
    spawner: S,
}

impl Launcher {
    /// Launcher with default thread settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Launcher spawning threads with the given settings.
    pub fn with_config(config: LaunchConfig) -> Self {
        Self {
            spawner: ThreadSpawner::new(config),
        }
    }
}

impl<S: SpawnPolicy> Launcher<S> {
    /// Launcher driven by a custom spawn policy.
    pub fn with_spawner(spawner: S) -> Self {
        Self { spawner }
    }

    /// The spawn policy in use.
    pub fn spawner(&self) -> &S {
        &self.spawner
    }

    /// Run every job on its own thread and return the outputs in job order.
    ///
    /// Each job receives the call's [`CancelToken`]; it is only raised when
    /// a later launch fails.
    ///
    /// # Errors
    ///
    /// Returns [`KernelError::Launch`] if any worker cannot be started. All
    /// workers launched before the failure have been cancelled and joined by
    /// the time this returns.
    ///
    /// # Panics
    ///
    /// If a worker panics, the panic is resumed on the calling thread after
    /// every worker has been joined.
    pub fn launch<J, T>(&self, jobs: Vec<J>) -> Result<Vec<T>>
    where
        J: FnOnce(&CancelToken) -> T + Send,
        T: Send,
    {
        let cancel = CancelToken::new();
        let total = jobs.len();
        debug!(workers = total, "launching workers");

        thread::scope(|scope| {
            let mut handles = Vec::with_capacity(total);
            for (index, job) in jobs.into_iter().enumerate() {
                let cancel = &cancel;
                let spawned = self
                    .spawner
                    .builder(index)
                    .and_then(|builder| builder.spawn_scoped(scope, move || job(cancel)));

                match spawned {
                    Ok(handle) => handles.push(handle),
                    Err(source) => {
                        let launched = handles.len();
                        warn!(
                            index,
                            launched,
                            error = %source,
                            "worker launch failed, cancelling running workers"
                        );
                        cancel.cancel();
                        drop(join_all(handles));
                        return Err(KernelError::Launch {
                            index,
                            launched,
                            source,
                        });
                    }
                }
            }
            Ok(join_all(handles))
        })
    }
}

/// Join every handle before surfacing the first worker panic, if any.
fn join_all<T>(handles: Vec<ScopedJoinHandle<'_, T>>) -> Vec<T> {
    let mut outputs = Vec::with_capacity(handles.len());
    let mut first_panic = None;
    for handle in handles {
        match handle.join() {
            Ok(output) => outputs.push(output),
            Err(payload) => {
                first_panic.get_or_insert(payload);
            }
        }
    }
    if let Some(payload) = first_panic {
        panic::resume_unwind(payload);
    }
    outputs
}
