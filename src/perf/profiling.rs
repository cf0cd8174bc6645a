/// Instrumentation for the draw paths.
/// Counters only move when the `profiling` feature is enabled; otherwise the
/// macros expand to nothing and the statics stay at zero.
use std::sync::atomic::{AtomicU64, Ordering};

/// Thread-safe call and work counters
pub struct FunctionCounters {
    // Draw entry points
    pub draw_solid_calls: AtomicU64,
    pub draw_textured_calls: AtomicU64,
    pub textured_draws_aborted: AtomicU64,

    // Per-face work
    pub polygons_filled: AtomicU64,
    pub triangles_rasterized: AtomicU64,
    pub triangles_degenerate: AtomicU64,
    pub triangles_culled: AtomicU64,
    pub pixels_written: AtomicU64,

    // Voxel store
    pub chunks_visited: AtomicU64,
    pub voxels_submitted: AtomicU64,
}

impl FunctionCounters {
    pub const fn new() -> Self {
        Self {
            draw_solid_calls: AtomicU64::new(0),
            draw_textured_calls: AtomicU64::new(0),
            textured_draws_aborted: AtomicU64::new(0),
            polygons_filled: AtomicU64::new(0),
            triangles_rasterized: AtomicU64::new(0),
            triangles_degenerate: AtomicU64::new(0),
            triangles_culled: AtomicU64::new(0),
            pixels_written: AtomicU64::new(0),
            chunks_visited: AtomicU64::new(0),
            voxels_submitted: AtomicU64::new(0),
        }
    }

    /// Reset all counters to zero
    pub fn reset(&self) {
        for counter in self.all() {
            counter.store(0, Ordering::Relaxed);
        }
    }

    fn all(&self) -> [&AtomicU64; 10] {
        [
            &self.draw_solid_calls,
            &self.draw_textured_calls,
            &self.textured_draws_aborted,
            &self.polygons_filled,
            &self.triangles_rasterized,
            &self.triangles_degenerate,
            &self.triangles_culled,
            &self.pixels_written,
            &self.chunks_visited,
            &self.voxels_submitted,
        ]
    }

    /// Get snapshot of all counters
    pub fn snapshot(&self) -> CounterSnapshot {
        CounterSnapshot {
            draw_solid_calls: self.draw_solid_calls.load(Ordering::Relaxed),
            draw_textured_calls: self.draw_textured_calls.load(Ordering::Relaxed),
            textured_draws_aborted: self.textured_draws_aborted.load(Ordering::Relaxed),
            polygons_filled: self.polygons_filled.load(Ordering::Relaxed),
            triangles_rasterized: self.triangles_rasterized.load(Ordering::Relaxed),
            triangles_degenerate: self.triangles_degenerate.load(Ordering::Relaxed),
            triangles_culled: self.triangles_culled.load(Ordering::Relaxed),
            pixels_written: self.pixels_written.load(Ordering::Relaxed),
            chunks_visited: self.chunks_visited.load(Ordering::Relaxed),
            voxels_submitted: self.voxels_submitted.load(Ordering::Relaxed),
        }
    }
}

impl Default for FunctionCounters {
    fn default() -> Self {
        Self::new()
    }
}

/// Snapshot of counter values at a point in time
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CounterSnapshot {
    pub draw_solid_calls: u64,
    pub draw_textured_calls: u64,
    pub textured_draws_aborted: u64,
    pub polygons_filled: u64,
    pub triangles_rasterized: u64,
    pub triangles_degenerate: u64,
    pub triangles_culled: u64,
    pub pixels_written: u64,
    pub chunks_visited: u64,
    pub voxels_submitted: u64,
}

impl CounterSnapshot {
    /// Log a formatted report at info level
    pub fn log_report(&self) {
        log::info!("=== Performance Counters Report ===");
        log::info!("draw_solid calls:        {:12}", self.draw_solid_calls);
        log::info!("draw_textured calls:     {:12}", self.draw_textured_calls);
        log::info!("textured draws aborted:  {:12}", self.textured_draws_aborted);
        log::info!("polygons filled:         {:12}", self.polygons_filled);
        log::info!("triangles rasterized:    {:12}", self.triangles_rasterized);
        log::info!("triangles degenerate:    {:12}", self.triangles_degenerate);
        log::info!("triangles culled:        {:12}", self.triangles_culled);
        log::info!("pixels written:          {:12}", self.pixels_written);
        if self.triangles_rasterized > 0 {
            let per_triangle = self.pixels_written as f64 / self.triangles_rasterized as f64;
            log::info!("pixels per triangle:     {:12.1}", per_triangle);
        }
        log::info!("chunks visited:          {:12}", self.chunks_visited);
        log::info!("voxels submitted:        {:12}", self.voxels_submitted);
    }
}

/// Global function counters instance
pub static FUNCTION_COUNTERS: FunctionCounters = FunctionCounters::new();

/// Macro for incrementing a counter (only when profiling feature is enabled)
#[macro_export]
macro_rules! count_call {
    ($counter:expr) => {
        #[cfg(feature = "profiling")]
        {
            $counter.fetch_add(1, std::sync::atomic::Ordering::Relaxed);
        }
    };
}

/// Macro for adding to a counter (only when profiling feature is enabled)
#[macro_export]
macro_rules! count_add {
    ($counter:expr, $value:expr) => {
        #[cfg(feature = "profiling")]
        {
            $counter.fetch_add($value, std::sync::atomic::Ordering::Relaxed);
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_and_reset_on_local_counters() {
        let counters = FunctionCounters::new();
        counters.draw_solid_calls.fetch_add(3, Ordering::Relaxed);
        counters.pixels_written.fetch_add(40, Ordering::Relaxed);

        let snap = counters.snapshot();
        assert_eq!(snap.draw_solid_calls, 3);
        assert_eq!(snap.pixels_written, 40);
        snap.log_report();

        counters.reset();
        assert_eq!(counters.snapshot(), CounterSnapshot::default());
    }
}
