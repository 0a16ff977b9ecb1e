//! Time source abstraction for testability.
//!
//! The console reads time in two ways: monotonic instants for the double-tab
//! window and the auto-open timer, and local wall-clock time for `date` and
//! `ls -l`. Production code uses the system clock; tests use a controllable
//! implementation so timing is exact and output is deterministic.

use chrono::{DateTime, Local};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Abstraction over time-related operations.
pub trait TimeSource: Send + Sync + std::fmt::Debug {
    /// Get the current instant for measuring elapsed time.
    fn now(&self) -> Instant;

    /// Get the current local date and time.
    fn local_now(&self) -> DateTime<Local>;

    /// Calculate elapsed time since an earlier instant.
    fn elapsed_since(&self, earlier: Instant) -> Duration {
        self.now().saturating_duration_since(earlier)
    }
}

/// Type alias for shared time source.
pub type SharedTimeSource = Arc<dyn TimeSource>;

/// Production implementation using actual system time.
#[derive(Debug, Clone, Copy, Default)]
pub struct RealTimeSource;

impl RealTimeSource {
    pub fn new() -> Self {
        Self
    }

    pub fn shared() -> SharedTimeSource {
        Arc::new(Self)
    }
}

impl TimeSource for RealTimeSource {
    fn now(&self) -> Instant {
        Instant::now()
    }

    fn local_now(&self) -> DateTime<Local> {
        Local::now()
    }
}

/// Test implementation with controllable time.
///
/// - `now()` returns a logical instant based on an internal counter
/// - `local_now()` returns the base date-time plus the logical elapsed time
/// - Time only moves when `advance()` is called
///
/// # Example
///
/// ```
/// use site_console::services::time_source::{TimeSource, TestTimeSource};
/// use std::time::Duration;
///
/// let time = TestTimeSource::new();
/// let start = time.now();
///
/// time.advance(Duration::from_millis(250));
///
/// assert_eq!(time.elapsed_since(start), Duration::from_millis(250));
/// ```
#[derive(Debug)]
pub struct TestTimeSource {
    /// Logical time in nanoseconds since creation.
    logical_nanos: AtomicU64,
    /// Base instant (real time at creation, used for Instant arithmetic).
    base_instant: Instant,
    /// Wall-clock time reported at logical zero.
    base_time: DateTime<Local>,
}

impl Default for TestTimeSource {
    fn default() -> Self {
        Self::new()
    }
}

impl TestTimeSource {
    /// Create a new TestTimeSource whose wall clock starts at the real current time.
    pub fn new() -> Self {
        Self::at(Local::now())
    }

    /// Create a TestTimeSource whose wall clock starts at `base_time`.
    pub fn at(base_time: DateTime<Local>) -> Self {
        Self {
            logical_nanos: AtomicU64::new(0),
            base_instant: Instant::now(),
            base_time,
        }
    }

    pub fn shared() -> Arc<Self> {
        Arc::new(Self::new())
    }

    /// Advance logical time by the given duration.
    pub fn advance(&self, duration: Duration) {
        self.logical_nanos
            .fetch_add(duration.as_nanos() as u64, Ordering::SeqCst);
    }

    /// Get the logical elapsed time since creation.
    pub fn elapsed(&self) -> Duration {
        Duration::from_nanos(self.logical_nanos.load(Ordering::SeqCst))
    }
}

impl TimeSource for TestTimeSource {
    fn now(&self) -> Instant {
        self.base_instant + self.elapsed()
    }

    fn local_now(&self) -> DateTime<Local> {
        let elapsed =
            chrono::Duration::from_std(self.elapsed()).unwrap_or_else(|_| chrono::Duration::zero());
        self.base_time + elapsed
    }
}
