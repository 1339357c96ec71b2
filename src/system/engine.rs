use std::collections::HashMap;
use std::time::SystemTime;

use tracing::{debug, trace, warn};

use super::ranker::RankPolicy;
use super::rate::RateTracker;
use super::snapshot::{DiskSample, MemorySample, NetworkRate, ProcessSample, Snapshot, TickError};
use super::source::{MetricsSource, ProcessHandle};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Flow {
    Recv,
    Sent,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct CounterKey {
    interface: String,
    flow: Flow,
}

impl CounterKey {
    fn new(interface: &str, flow: Flow) -> Self {
        Self {
            interface: interface.to_string(),
            flow,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    pub rank: RankPolicy,
    /// Interfaces left out of the network table, matched by exact name.
    pub excluded_interfaces: Vec<String>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            rank: RankPolicy::default(),
            excluded_interfaces: vec!["lo".to_string(), "lo0".to_string()],
        }
    }
}

/// Runs one sampling pass per tick and produces a [`Snapshot`].
///
/// CPU and memory are required: if either query fails the tick returns a
/// snapshot carrying only the error. Disks and processes are skipped item by
/// item, and a failed network query just empties the network list.
///
/// `sample` takes `&mut self` because the network baseline carries over from
/// one tick to the next; ticks must not overlap.
#[derive(Debug)]
pub struct SamplingEngine {
    config: EngineConfig,
    rates: RateTracker<CounterKey>,
}

impl SamplingEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            rates: RateTracker::new(),
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn sample<S: MetricsSource>(&mut self, source: &mut S) -> Snapshot {
        self.sample_at(source, SystemTime::now())
    }

    pub fn sample_at<S: MetricsSource>(&mut self, source: &mut S, now: SystemTime) -> Snapshot {
        let _sample_span = tracing::debug_span!("engine.sample").entered();

        let cpu_percent = match source.cpu_percent() {
            Ok(cpu) => cpu,
            Err(err) => {
                warn!(error = %err, "cpu query failed, dropping tick");
                return Snapshot::failed(now, TickError::Cpu(err));
            }
        };

        let memory = match source.virtual_memory() {
            Ok(vm) => MemorySample {
                total_bytes: vm.total_bytes,
                used_percent: vm.used_percent,
            },
            Err(err) => {
                warn!(error = %err, "memory query failed, dropping tick");
                return Snapshot::failed(now, TickError::Memory(err));
            }
        };

        let disks = sample_disks(source);
        let networks = self.sample_networks(source, now);
        let processes = self.sample_processes(source);

        debug!(
            disks = disks.len(),
            networks = networks.len(),
            processes = processes.len(),
            "tick sampled"
        );

        Snapshot {
            timestamp: now,
            cpu_percent,
            memory,
            disks,
            networks,
            processes,
            error: None,
        }
    }

    fn sample_networks<S: MetricsSource>(
        &mut self,
        source: &mut S,
        now: SystemTime,
    ) -> Vec<NetworkRate> {
        let _span = tracing::debug_span!("engine.sample.networks").entered();

        let counters = match source.network_counters() {
            Ok(counters) => counters,
            Err(err) => {
                warn!(error = %err, "network counters unavailable this tick");
                return Vec::new();
            }
        };

        let counters: Vec<_> = counters
            .into_iter()
            .filter(|c| !self.config.excluded_interfaces.contains(&c.name))
            .collect();

        let mut current = HashMap::with_capacity(counters.len() * 2);
        for c in &counters {
            current.insert(CounterKey::new(&c.name, Flow::Recv), c.bytes_recv);
            current.insert(CounterKey::new(&c.name, Flow::Sent), c.bytes_sent);
        }

        let rates = self.rates.update(current, now);

        counters
            .iter()
            .filter_map(|c| {
                let down = rates.get(&CounterKey::new(&c.name, Flow::Recv))?;
                let up = rates.get(&CounterKey::new(&c.name, Flow::Sent))?;
                Some(NetworkRate {
                    interface_name: c.name.clone(),
                    download_bytes_per_sec: *down,
                    upload_bytes_per_sec: *up,
                })
            })
            .collect()
    }

    fn sample_processes<S: MetricsSource>(&self, source: &mut S) -> Vec<ProcessSample> {
        let _span = tracing::debug_span!("engine.sample.processes").entered();
        let policy = self.config.rank;

        let handles = match source.processes() {
            Ok(handles) => handles,
            Err(err) => {
                warn!(error = %err, "process list unavailable this tick");
                return Vec::new();
            }
        };

        let mut samples = Vec::with_capacity(policy.limit.min(handles.len()));
        for handle in &handles {
            let pid = handle.pid();
            let cpu_percent = match handle.cpu_percent() {
                Ok(cpu) => cpu,
                Err(err) => {
                    trace!(pid, error = %err, "skipping process");
                    continue;
                }
            };
            // Idle processes never reach the table, so skip their lookups.
            if cpu_percent.is_nan() || cpu_percent <= policy.cpu_threshold {
                continue;
            }
            samples.push(ProcessSample {
                pid,
                name: handle.name().unwrap_or_default(),
                cpu_percent,
                io_priority: handle.io_nice().unwrap_or_default(),
            });
        }

        policy.rank(samples)
    }
}

impl Default for SamplingEngine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

fn sample_disks<S: MetricsSource>(source: &mut S) -> Vec<DiskSample> {
    let _span = tracing::debug_span!("engine.sample.disks").entered();

    let mount_points = match source.disk_partitions() {
        Ok(mounts) => mounts,
        Err(err) => {
            warn!(error = %err, "disk partitions unavailable this tick");
            return Vec::new();
        }
    };

    mount_points
        .into_iter()
        .filter_map(|mount| match source.disk_usage(&mount) {
            Ok(usage) => Some(DiskSample {
                mount_name: mount,
                used_bytes: usage.used_bytes,
                total_bytes: usage.total_bytes,
                used_percent: usage.used_percent,
            }),
            Err(err) => {
                debug!(mount = %mount, error = %err, "skipping mount point");
                None
            }
        })
        .collect()
}
