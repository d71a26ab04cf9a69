//! Partitioning and worker launch machinery behind the parallel kernels.
//!
//! A parallel kernel call runs in four steps:
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────┐
//! │ 1. partition(N, W)      -> W disjoint, gap-free WorkRanges       │
//! │ 2. build one job per non-empty range                             │
//! │      dot:    job owns &v1[range], &v2[range]                     │
//! │      matmul: job owns a RowBlockMut of the destination           │
//! │ 3. Launcher::launch     -> spawn in range order, join all        │
//! │ 4. aggregate            -> sum partials in range order (dot)     │
//! │                            nothing to do (matmul)                │
//! └──────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Workers never share mutable state: inputs are shared read-only and every
//! output region is moved into exactly one job. The only cross-thread signal
//! is the [`CancelToken`], raised when a launch fails part-way through.
//!
//! # Module Contents
//!
//! - [`partition`](partition): Range partitioner with remainder distribution
//! - [`cancel`](cancel): Cooperative cancellation token
//! - [`launcher`](launcher): Scoped thread launcher with failure recovery
//! - [`kernel`](kernel): Range-restricted dot and row-block product bodies

mod cancel;
mod kernel;
mod launcher;
mod partition;

pub use cancel::CancelToken;
pub use kernel::{dot_range, product_rows, CANCEL_POLL_STRIDE};
pub(crate) use kernel::widened_dot;
pub use launcher::{LaunchConfig, Launcher, SpawnPolicy, ThreadSpawner};
pub use partition::{partition, Partition};

#[cfg(test)]
pub(crate) use launcher::testing;
