//! Submit round-trip timing markers.
//!
//! Three line-oriented markers for external log scrapers:
//!
//! ```text
//! ===START=<unix_nanoseconds>===
//! ===END=<unix_nanoseconds>===
//! TOTAL_NS=<integer nanoseconds>
//! ```
//!
//! The format is a stable external contract, so the markers bypass the log
//! formatter and are written raw to the diagnostic stream. A single enabled
//! flag controls all three; when disabled nothing is emitted.

use std::io::Write;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use parking_lot::Mutex;

/// In-memory marker sink handed out by [`TimingMarkers::in_memory`].
pub type CapturedMarkers = Arc<Mutex<Vec<u8>>>;

/// Emits the timing markers around the submit round-trip.
pub struct TimingMarkers {
    enabled: bool,
    sink: Mutex<Box<dyn Write + Send>>,
}

impl TimingMarkers {
    /// Markers written to stderr.
    #[must_use]
    pub fn stderr(enabled: bool) -> Self {
        Self::with_sink(enabled, Box::new(std::io::stderr()))
    }

    /// Markers written to an arbitrary sink.
    #[must_use]
    pub fn with_sink(enabled: bool, sink: Box<dyn Write + Send>) -> Self {
        Self {
            enabled,
            sink: Mutex::new(sink),
        }
    }

    /// Markers captured into a shared buffer, for tests.
    #[must_use]
    pub fn in_memory(enabled: bool) -> (Self, CapturedMarkers) {
        let buffer: CapturedMarkers = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&buffer);
        (Self::with_sink(enabled, Box::new(SharedSink(sink))), buffer)
    }

    /// Whether markers are being emitted.
    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Current wall-clock time in nanoseconds since the Unix epoch.
    #[must_use]
    pub fn now_ns() -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(0, |elapsed| u64::try_from(elapsed.as_nanos()).unwrap_or(u64::MAX))
    }

    /// Emit the start marker and return the captured instant, or `None` when
    /// timing is disabled.
    pub fn mark_start(&self) -> Option<u64> {
        if !self.enabled {
            return None;
        }
        let start_ns = Self::now_ns();
        let mut sink = self.sink.lock();
        let _ = writeln!(sink, "===START={start_ns}===");
        let _ = sink.flush();
        Some(start_ns)
    }

    /// Emit the end and total markers for an instant captured by the caller.
    ///
    /// Callers capture `end_ns` inside the submit completion handler so the
    /// measurement excludes orchestrator wake-up scheduling jitter.
    pub fn mark_end(&self, start_ns: u64, end_ns: u64) {
        if !self.enabled {
            return;
        }
        let mut sink = self.sink.lock();
        let _ = writeln!(sink, "===END={end_ns}===");
        let _ = writeln!(sink, "TOTAL_NS={}", end_ns.saturating_sub(start_ns));
        let _ = sink.flush();
    }
}

/// `Write` adapter over the shared capture buffer.
struct SharedSink(CapturedMarkers);

impl Write for SharedSink {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn captured_lines(buffer: &CapturedMarkers) -> Vec<String> {
        String::from_utf8(buffer.lock().clone())
            .unwrap()
            .lines()
            .map(ToString::to_string)
            .collect()
    }

    #[test]
    fn start_marker_format() {
        let (markers, buffer) = TimingMarkers::in_memory(true);
        let start_ns = markers.mark_start().unwrap();

        let lines = captured_lines(&buffer);
        assert_eq!(lines, vec![format!("===START={start_ns}===")]);
    }

    #[test]
    fn end_markers_carry_exact_difference() {
        let (markers, buffer) = TimingMarkers::in_memory(true);
        markers.mark_end(1_000, 4_500);

        let lines = captured_lines(&buffer);
        assert_eq!(lines, vec!["===END=4500===".to_string(), "TOTAL_NS=3500".to_string()]);
    }

    #[test]
    fn disabled_markers_emit_nothing() {
        let (markers, buffer) = TimingMarkers::in_memory(false);
        assert!(markers.mark_start().is_none());
        markers.mark_end(0, 100);
        assert!(buffer.lock().is_empty());
        assert!(!markers.is_enabled());
    }

    #[test]
    fn now_ns_is_monotonic_enough() {
        let a = TimingMarkers::now_ns();
        let b = TimingMarkers::now_ns();
        assert!(b >= a);
        // Sanity: we are well past 2020 in nanoseconds.
        assert!(a > 1_577_836_800_000_000_000);
    }
}
