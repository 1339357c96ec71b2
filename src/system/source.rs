//! The metric-retrieval capability the sampling engine consumes.
//!
//! Every query is fallible on its own so the engine can decide, per
//! category, whether a failure is fatal for the tick or just skipped.

use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum SourceError {
    #[error("{0} is unavailable on this host")]
    Unavailable(String),
    #[error("mount point {0} not found")]
    MountNotFound(String),
    #[error("process {0} exited")]
    ProcessGone(i32),
    #[error("{0}")]
    Os(String),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VirtualMemory {
    pub total_bytes: u64,
    pub used_percent: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DiskUsage {
    pub used_bytes: u64,
    pub total_bytes: u64,
    pub used_percent: f64,
}

impl DiskUsage {
    /// Derives the percentage from raw byte counts; an empty device is 0%.
    pub fn from_bytes(used_bytes: u64, total_bytes: u64) -> Self {
        let used_percent = if total_bytes > 0 {
            used_bytes as f64 / total_bytes as f64 * 100.0
        } else {
            0.0
        };
        Self {
            used_bytes,
            total_bytes,
            used_percent,
        }
    }
}

/// Cumulative byte counters for one network interface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterfaceCounters {
    pub name: String,
    pub bytes_recv: u64,
    pub bytes_sent: u64,
}

/// A live process as enumerated by the source. Attribute queries may fail
/// independently, e.g. when the process exits between enumeration and query.
pub trait ProcessHandle {
    fn pid(&self) -> i32;
    fn name(&self) -> Result<String, SourceError>;
    fn cpu_percent(&self) -> Result<f32, SourceError>;
    fn io_nice(&self) -> Result<i32, SourceError>;
}

pub trait MetricsSource {
    type Process<'a>: ProcessHandle
    where
        Self: 'a;

    /// Aggregate CPU utilisation since the previous call, 0-100.
    fn cpu_percent(&mut self) -> Result<f32, SourceError>;
    fn virtual_memory(&mut self) -> Result<VirtualMemory, SourceError>;
    /// Mount points of the currently mounted partitions.
    fn disk_partitions(&mut self) -> Result<Vec<String>, SourceError>;
    fn disk_usage(&mut self, mount_point: &str) -> Result<DiskUsage, SourceError>;
    /// Per-interface cumulative counters, loopback included.
    fn network_counters(&mut self) -> Result<Vec<InterfaceCounters>, SourceError>;
    fn processes(&mut self) -> Result<Vec<Self::Process<'_>>, SourceError>;
}
