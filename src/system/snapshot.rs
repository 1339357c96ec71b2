use std::time::SystemTime;

use serde::Serialize;
use thiserror::Error;

use super::source::SourceError;

/// Failure of a required aggregate metric. Aborts the tick's content.
#[derive(Debug, Clone, PartialEq, Error, Serialize)]
#[serde(tag = "metric", content = "cause", rename_all = "snake_case")]
pub enum TickError {
    #[error("CPU usage unavailable: {0}")]
    Cpu(SourceError),
    #[error("memory stats unavailable: {0}")]
    Memory(SourceError),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct MemorySample {
    pub total_bytes: u64,
    pub used_percent: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiskSample {
    pub mount_name: String,
    pub used_bytes: u64,
    pub total_bytes: u64,
    pub used_percent: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NetworkRate {
    pub interface_name: String,
    pub download_bytes_per_sec: f64,
    pub upload_bytes_per_sec: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProcessSample {
    pub pid: i32,
    pub name: String,
    pub cpu_percent: f32,
    pub io_priority: i32,
}

/// Everything collected in one tick. Built once by the engine and never
/// modified afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub timestamp: SystemTime,
    pub cpu_percent: f32,
    pub memory: MemorySample,
    pub disks: Vec<DiskSample>,
    /// Empty until a previous tick exists to diff against.
    pub networks: Vec<NetworkRate>,
    /// Ranked by CPU, highest first.
    pub processes: Vec<ProcessSample>,
    /// When set, every other metric field is empty or zero.
    pub error: Option<TickError>,
}

impl Snapshot {
    pub fn failed(timestamp: SystemTime, error: TickError) -> Self {
        Self {
            timestamp,
            cpu_percent: 0.0,
            memory: MemorySample::default(),
            disks: Vec::new(),
            networks: Vec::new(),
            processes: Vec::new(),
            error: Some(error),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}
