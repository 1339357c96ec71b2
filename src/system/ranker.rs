use super::snapshot::ProcessSample;

pub const DEFAULT_CPU_THRESHOLD: f32 = 0.01;
pub const DEFAULT_PROCESS_LIMIT: usize = 30;

/// Which processes are worth showing and how many.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RankPolicy {
    /// Entries at or below this CPU percentage are treated as idle noise.
    pub cpu_threshold: f32,
    pub limit: usize,
}

impl Default for RankPolicy {
    fn default() -> Self {
        Self {
            cpu_threshold: DEFAULT_CPU_THRESHOLD,
            limit: DEFAULT_PROCESS_LIMIT,
        }
    }
}

impl RankPolicy {
    pub fn rank(&self, processes: Vec<ProcessSample>) -> Vec<ProcessSample> {
        rank(processes, self.cpu_threshold, self.limit)
    }
}

/// Keeps entries above `threshold`, orders them by CPU descending and cuts
/// the result to `limit`.
///
/// The sort is stable, so equal CPU values keep their enumeration order and
/// rows do not swap places between ticks. Truncation happens only after
/// sorting.
pub fn rank(processes: Vec<ProcessSample>, threshold: f32, limit: usize) -> Vec<ProcessSample> {
    // NaN fails the comparison and is dropped here, so total_cmp below only
    // sees real numbers.
    let mut notable: Vec<ProcessSample> = processes
        .into_iter()
        .filter(|p| p.cpu_percent > threshold)
        .collect();

    notable.sort_by(|a, b| b.cpu_percent.total_cmp(&a.cpu_percent));
    notable.truncate(limit);
    notable
}
