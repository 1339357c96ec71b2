use hostpulse::system::collector::Collector;
use hostpulse::system::engine::SamplingEngine;
use hostpulse::system::source::{MetricsSource, ProcessHandle};

#[test]
fn collector_reports_sane_aggregates() {
    if !sysinfo::IS_SUPPORTED_SYSTEM {
        return;
    }
    let mut collector = Collector::new();

    let cpu = collector.cpu_percent().expect("cpu usage");
    assert!((0.0..=100.0).contains(&cpu) || cpu.is_nan(), "cpu = {cpu}");

    let memory = collector.virtual_memory().expect("memory");
    assert!(memory.total_bytes > 0);
    assert!((0.0..=100.0).contains(&memory.used_percent));
}

#[test]
fn collector_sees_this_process() {
    if !sysinfo::IS_SUPPORTED_SYSTEM {
        return;
    }
    let mut collector = Collector::new();
    let me = std::process::id() as i32;

    let handles = collector.processes().expect("process list");
    let own = handles.iter().find(|h| h.pid() == me).expect("own pid listed");
    assert!(own.cpu_percent().is_ok());
    assert!(!own.name().unwrap_or_default().is_empty());
}

#[test]
fn engine_samples_the_live_host() {
    if !sysinfo::IS_SUPPORTED_SYSTEM {
        return;
    }
    let mut engine = SamplingEngine::default();
    let mut collector = Collector::new();

    let first = engine.sample(&mut collector);
    assert!(first.is_ok(), "first tick failed: {:?}", first.error);
    assert!(first.networks.is_empty());
    assert!(first.processes.len() <= engine.config().rank.limit);

    std::thread::sleep(std::time::Duration::from_millis(200));
    let second = engine.sample(&mut collector);
    assert!(second.is_ok());
    assert!(
        second
            .networks
            .iter()
            .all(|n| n.download_bytes_per_sec >= 0.0 && n.upload_bytes_per_sec >= 0.0)
    );
    assert!(second.networks.iter().all(|n| n.interface_name != "lo"));
    assert!(second.disks.iter().all(|d| d.used_percent.is_finite()));
}
