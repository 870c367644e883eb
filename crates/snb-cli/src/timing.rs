//! Wall-clock and thread CPU time for `--timing`.

use std::time::{Duration, Instant};

/// CPU time consumed by the calling thread.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CpuTime {
    pub user: Duration,
    pub system: Duration,
}

impl CpuTime {
    #[cfg(target_os = "linux")]
    pub fn now() -> Option<Self> {
        use nix::sys::resource::{getrusage, UsageWho};
        use nix::sys::time::{TimeVal, TimeValLike};

        let micros =
            |t: TimeVal| Duration::from_micros(u64::try_from(t.num_microseconds()).unwrap_or(0));
        let usage = getrusage(UsageWho::RUSAGE_THREAD).ok()?;
        Some(Self {
            user: micros(usage.user_time()),
            system: micros(usage.system_time()),
        })
    }

    /// Per-thread usage is only sampled on Linux.
    #[cfg(not(target_os = "linux"))]
    pub fn now() -> Option<Self> {
        None
    }

    pub fn total(&self) -> Duration {
        self.user + self.system
    }

    fn since(self, earlier: Self) -> Self {
        Self {
            user: self.user.saturating_sub(earlier.user),
            system: self.system.saturating_sub(earlier.system),
        }
    }
}

/// Samples both clocks at start and reports the difference.
pub struct Timer {
    wall: Instant,
    cpu: Option<CpuTime>,
}

impl Timer {
    pub fn start() -> Self {
        Self {
            wall: Instant::now(),
            cpu: CpuTime::now(),
        }
    }

    pub fn report(&self) -> Vec<String> {
        let elapsed = self.wall.elapsed();
        let cpu = self
            .cpu
            .zip(CpuTime::now())
            .map(|(start, stop)| stop.since(start));
        report(elapsed, cpu)
    }

    pub fn print(&self) {
        for line in self.report() {
            println!("{}", line);
        }
    }
}

fn percent(part: Duration, whole: Duration) -> f64 {
    if whole.is_zero() {
        return 0.0;
    }
    100.0 * part.as_secs_f64() / whole.as_secs_f64()
}

fn report(elapsed: Duration, cpu: Option<CpuTime>) -> Vec<String> {
    let mut lines = vec![format!(
        "Elapsed time is {} microseconds",
        elapsed.as_micros()
    )];
    let Some(cpu) = cpu else {
        return lines;
    };
    for (name, time) in [
        ("total", cpu.total()),
        ("user", cpu.user),
        ("system", cpu.system),
    ] {
        lines.push(format!(
            "Thread {} time is {} microseconds ({:.1}%)",
            name,
            time.as_micros(),
            percent(time, elapsed)
        ));
    }
    lines
}
