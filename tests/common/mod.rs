#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use hostpulse::system::source::{
    DiskUsage, InterfaceCounters, MetricsSource, ProcessHandle, SourceError, VirtualMemory,
};

/// Process with scripted attribute results.
#[derive(Debug, Clone)]
pub struct FakeProcess {
    pub pid: i32,
    pub name: Result<String, SourceError>,
    pub cpu: Result<f32, SourceError>,
    pub io_nice: Result<i32, SourceError>,
    lookups: Arc<AtomicUsize>,
}

impl FakeProcess {
    pub fn new(pid: i32, name: &str, cpu: f32) -> Self {
        Self {
            pid,
            name: Ok(name.to_string()),
            cpu: Ok(cpu),
            io_nice: Ok(4),
            lookups: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Number of `name()` calls made on this process or its clones.
    pub fn name_lookups(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }
}

impl ProcessHandle for FakeProcess {
    fn pid(&self) -> i32 {
        self.pid
    }

    fn name(&self) -> Result<String, SourceError> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        self.name.clone()
    }

    fn cpu_percent(&self) -> Result<f32, SourceError> {
        self.cpu.clone()
    }

    fn io_nice(&self) -> Result<i32, SourceError> {
        self.io_nice.clone()
    }
}

/// Scripted [`MetricsSource`]. Tests mutate the public fields between ticks.
#[derive(Debug, Clone)]
pub struct FakeSource {
    pub cpu: Result<f32, SourceError>,
    pub memory: Result<VirtualMemory, SourceError>,
    pub partitions: Result<Vec<String>, SourceError>,
    pub usage: HashMap<String, Result<DiskUsage, SourceError>>,
    pub counters: Result<Vec<InterfaceCounters>, SourceError>,
    pub processes: Result<Vec<FakeProcess>, SourceError>,
    pub cpu_queries: usize,
}

impl FakeSource {
    /// The host from the end-to-end scenario, before the network counters move.
    pub fn healthy() -> Self {
        let mut usage = HashMap::new();
        usage.insert(
            "/".to_string(),
            Ok(DiskUsage::from_bytes(50_000_000_000, 100_000_000_000)),
        );
        Self {
            cpu: Ok(45.2),
            memory: Ok(VirtualMemory {
                total_bytes: 16_000_000_000,
                used_percent: 62.3,
            }),
            partitions: Ok(vec!["/".to_string()]),
            usage,
            counters: Ok(vec![counters("eth0", 1_000_000, 500)]),
            processes: Ok(vec![
                FakeProcess::new(10, "sshd", 3.5),
                FakeProcess::new(20, "postgres", 27.0),
                FakeProcess::new(30, "nginx", 12.25),
            ]),
            cpu_queries: 0,
        }
    }

    pub fn with_process_count(n: usize) -> Self {
        let mut source = Self::healthy();
        source.processes = Ok((0..n)
            .map(|i| FakeProcess::new(i as i32 + 1, &format!("proc_{i}"), (i % 97) as f32 * 0.5))
            .collect());
        source
    }

    pub fn set_counters(&mut self, list: Vec<InterfaceCounters>) {
        self.counters = Ok(list);
    }
}

pub fn counters(name: &str, bytes_recv: u64, bytes_sent: u64) -> InterfaceCounters {
    InterfaceCounters {
        name: name.to_string(),
        bytes_recv,
        bytes_sent,
    }
}

impl MetricsSource for FakeSource {
    type Process<'a> = FakeProcess;

    fn cpu_percent(&mut self) -> Result<f32, SourceError> {
        self.cpu_queries += 1;
        self.cpu.clone()
    }

    fn virtual_memory(&mut self) -> Result<VirtualMemory, SourceError> {
        self.memory.clone()
    }

    fn disk_partitions(&mut self) -> Result<Vec<String>, SourceError> {
        self.partitions.clone()
    }

    fn disk_usage(&mut self, mount_point: &str) -> Result<DiskUsage, SourceError> {
        self.usage
            .get(mount_point)
            .cloned()
            .unwrap_or_else(|| Err(SourceError::MountNotFound(mount_point.to_string())))
    }

    fn network_counters(&mut self) -> Result<Vec<InterfaceCounters>, SourceError> {
        self.counters.clone()
    }

    fn processes(&mut self) -> Result<Vec<Self::Process<'_>>, SourceError> {
        self.processes.clone()
    }
}
