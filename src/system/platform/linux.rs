use super::PlatformExtensions;

// linux/ioprio.h
const IOPRIO_WHO_PROCESS: libc::c_int = 1;
const IOPRIO_CLASS_SHIFT: libc::c_long = 13;
const IOPRIO_PRIO_MASK: libc::c_long = (1 << IOPRIO_CLASS_SHIFT) - 1;
const IOPRIO_CLASS_NONE: libc::c_long = 0;
const IOPRIO_CLASS_IDLE: libc::c_long = 3;
const IOPRIO_LOWEST: i32 = 7;

pub struct Platform;

impl PlatformExtensions for Platform {
    fn io_priority(pid: u32) -> Option<i32> {
        // SAFETY: ioprio_get only reads its integer arguments.
        let raw = unsafe {
            libc::syscall(
                libc::SYS_ioprio_get,
                IOPRIO_WHO_PROCESS,
                pid as libc::c_int,
            )
        };
        if raw < 0 {
            return None;
        }
        match raw >> IOPRIO_CLASS_SHIFT {
            // No explicit class: the kernel derives a best-effort level from
            // the CPU nice value.
            IOPRIO_CLASS_NONE => process_nice(pid).map(|nice| (nice + 20) / 5),
            IOPRIO_CLASS_IDLE => Some(IOPRIO_LOWEST),
            _ => Some((raw & IOPRIO_PRIO_MASK) as i32),
        }
    }
}

fn process_nice(pid: u32) -> Option<i32> {
    let path = format!("/proc/{pid}/stat");
    let contents = std::fs::read_to_string(path).ok()?;
    // comm may contain spaces and parens, so split after the last ')'
    let after_comm = contents.rfind(')')? + 1;
    let fields: Vec<&str> = contents[after_comm..].split_whitespace().collect();
    // state(0) ppid(1) pgrp(2) session(3) tty_nr(4) tpgid(5) flags(6)
    // minflt(7) cminflt(8) majflt(9) cmajflt(10) utime(11) stime(12)
    // cutime(13) cstime(14) priority(15) nice(16)
    fields.get(16)?.parse().ok()
}
