use super::PlatformExtensions;

pub struct Platform;

impl PlatformExtensions for Platform {
    fn io_priority(_pid: u32) -> Option<i32> {
        None
    }
}
