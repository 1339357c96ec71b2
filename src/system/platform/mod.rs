pub trait PlatformExtensions {
    /// I/O scheduling priority of `pid`, 0 (highest) to 7 (lowest).
    fn io_priority(pid: u32) -> Option<i32>;
}

#[cfg(target_os = "linux")]
mod linux;
#[cfg(not(target_os = "linux"))]
mod unsupported;

#[cfg(target_os = "linux")]
use linux as platform_impl;
#[cfg(not(target_os = "linux"))]
use unsupported as platform_impl;

pub fn io_priority(pid: u32) -> Option<i32> {
    platform_impl::Platform::io_priority(pid)
}
