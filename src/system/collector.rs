use sysinfo::{Disks, Networks, Pid, Process, ProcessRefreshKind, ProcessesToUpdate, System};

use super::platform;
use super::source::{
    DiskUsage, InterfaceCounters, MetricsSource, ProcessHandle, SourceError, VirtualMemory,
};

/// [`MetricsSource`] backed by `sysinfo`.
pub struct Collector {
    sys: System,
    disks: Disks,
    networks: Networks,
}

impl Default for Collector {
    fn default() -> Self {
        Self::new()
    }
}

impl Collector {
    pub fn new() -> Self {
        let mut sys = System::new();
        // CPU usage is a delta between refreshes; prime it so the first tick
        // already has a reference point.
        sys.refresh_memory();
        sys.refresh_cpu_usage();
        sys.refresh_processes_specifics(
            ProcessesToUpdate::All,
            true,
            ProcessRefreshKind::nothing().with_cpu(),
        );
        Collector {
            sys,
            disks: Disks::new_with_refreshed_list(),
            networks: Networks::new_with_refreshed_list(),
        }
    }
}

impl MetricsSource for Collector {
    type Process<'a> = SysinfoProcess<'a>;

    fn cpu_percent(&mut self) -> Result<f32, SourceError> {
        if !sysinfo::IS_SUPPORTED_SYSTEM {
            return Err(SourceError::Unavailable("CPU usage".to_string()));
        }
        self.sys.refresh_cpu_usage();
        Ok(self.sys.global_cpu_usage())
    }

    fn virtual_memory(&mut self) -> Result<VirtualMemory, SourceError> {
        self.sys.refresh_memory();
        let total_bytes = self.sys.total_memory();
        if total_bytes == 0 {
            return Err(SourceError::Unavailable("memory totals".to_string()));
        }
        let used_percent = self.sys.used_memory() as f64 / total_bytes as f64 * 100.0;
        Ok(VirtualMemory {
            total_bytes,
            used_percent,
        })
    }

    fn disk_partitions(&mut self) -> Result<Vec<String>, SourceError> {
        self.disks.refresh(true);
        Ok(self
            .disks
            .list()
            .iter()
            .map(|disk| disk.mount_point().to_string_lossy().into_owned())
            .collect())
    }

    fn disk_usage(&mut self, mount_point: &str) -> Result<DiskUsage, SourceError> {
        let disk = self
            .disks
            .list()
            .iter()
            .find(|disk| disk.mount_point().to_string_lossy() == mount_point)
            .ok_or_else(|| SourceError::MountNotFound(mount_point.to_string()))?;
        let total = disk.total_space();
        let used = total.saturating_sub(disk.available_space());
        Ok(DiskUsage::from_bytes(used, total))
    }

    fn network_counters(&mut self) -> Result<Vec<InterfaceCounters>, SourceError> {
        self.networks.refresh(true);
        let mut counters: Vec<InterfaceCounters> = self
            .networks
            .list()
            .iter()
            .map(|(name, data)| InterfaceCounters {
                name: name.clone(),
                bytes_recv: data.total_received(),
                bytes_sent: data.total_transmitted(),
            })
            .collect();
        counters.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(counters)
    }

    fn processes(&mut self) -> Result<Vec<SysinfoProcess<'_>>, SourceError> {
        let _span = tracing::trace_span!("collector.processes").entered();

        self.sys.refresh_processes_specifics(
            ProcessesToUpdate::All,
            true,
            ProcessRefreshKind::nothing().with_cpu(),
        );
        let mut handles: Vec<SysinfoProcess<'_>> = self
            .sys
            .processes()
            .iter()
            .map(|(&pid, process)| SysinfoProcess { pid, process })
            .collect();
        // sysinfo hands out a hash map; pid order keeps ties stable across ticks.
        handles.sort_by_key(|handle| handle.pid);
        Ok(handles)
    }
}

pub struct SysinfoProcess<'a> {
    pid: Pid,
    process: &'a Process,
}

impl ProcessHandle for SysinfoProcess<'_> {
    fn pid(&self) -> i32 {
        self.pid.as_u32() as i32
    }

    fn name(&self) -> Result<String, SourceError> {
        let name = self.process.name().to_string_lossy();
        if name.is_empty() {
            return Err(SourceError::Unavailable(format!("name of pid {}", self.pid)));
        }
        Ok(name.into_owned())
    }

    fn cpu_percent(&self) -> Result<f32, SourceError> {
        Ok(self.process.cpu_usage())
    }

    fn io_nice(&self) -> Result<i32, SourceError> {
        platform::io_priority(self.pid.as_u32())
            .ok_or_else(|| SourceError::Unavailable(format!("io priority of pid {}", self.pid)))
    }
}
