/// Performance measurement utilities
/// Draw stages are timed with `perf_scope!`; timings go to the log at trace
/// level under the `polyraster::perf` target.
pub mod profiling;

pub use profiling::{CounterSnapshot, FunctionCounters, FUNCTION_COUNTERS};

use std::time::{Duration, Instant};

/// Times one draw stage until dropped. The clock is only read when trace
/// logging is enabled.
pub struct PerfTimer {
    stage: &'static str,
    start: Option<Instant>,
}

impl PerfTimer {
    #[inline]
    pub fn new(stage: &'static str) -> Self {
        let enabled = log::log_enabled!(target: "polyraster::perf", log::Level::Trace);
        Self {
            stage,
            start: enabled.then(Instant::now),
        }
    }

    /// Time since the timer started, or `None` when timing is disabled.
    #[inline]
    pub fn elapsed(&self) -> Option<Duration> {
        self.start.map(|start| start.elapsed())
    }
}

impl Drop for PerfTimer {
    fn drop(&mut self) {
        if let Some(elapsed) = self.elapsed() {
            log::trace!(target: "polyraster::perf", "{} took {}us", self.stage, elapsed.as_micros());
        }
    }
}

/// Frame timing accumulator for the interactive demo
#[derive(Debug, Default, Clone, Copy)]
pub struct FrameStats {
    pub frames: u64,
    pub total: Duration,
    pub worst: Duration,
}

impl FrameStats {
    pub fn record(&mut self, frame_time: Duration) {
        self.frames += 1;
        self.total += frame_time;
        self.worst = self.worst.max(frame_time);
    }

    pub fn average(&self) -> Duration {
        if self.frames == 0 {
            return Duration::ZERO;
        }
        self.total / self.frames as u32
    }

    /// Log the current averages and start a new window.
    pub fn flush(&mut self) {
        if self.frames > 0 {
            let avg = self.average();
            let fps = 1.0 / avg.as_secs_f64().max(f64::EPSILON);
            log::info!(
                "{} frames, avg {:.2}ms ({:.1} fps), worst {:.2}ms",
                self.frames,
                avg.as_secs_f64() * 1000.0,
                fps,
                self.worst.as_secs_f64() * 1000.0
            );
        }
        *self = Self::default();
    }
}

/// Time the rest of the enclosing scope as stage `$stage`.
#[macro_export]
macro_rules! perf_scope {
    ($stage:expr) => {
        let _perf_timer = $crate::perf::PerfTimer::new($stage);
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_stats_average_and_worst() {
        let mut stats = FrameStats::default();
        assert_eq!(stats.average(), Duration::ZERO);

        stats.record(Duration::from_millis(10));
        stats.record(Duration::from_millis(30));
        assert_eq!(stats.frames, 2);
        assert_eq!(stats.average(), Duration::from_millis(20));
        assert_eq!(stats.worst, Duration::from_millis(30));

        stats.flush();
        assert_eq!(stats.frames, 0);
    }

    #[test]
    fn timer_skips_clock_without_trace_logging() {
        let timer = PerfTimer::new("stage");
        if log::max_level() < log::LevelFilter::Trace {
            assert_eq!(timer.elapsed(), None);
        }
        {
            crate::perf_scope!("scoped");
        }
    }
}
