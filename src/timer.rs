//! Scoped wall-clock timer.
//!
//! A [`ScopedTimer`] starts counting when it is created and prints a single
//! elapsed-time line when it is dropped. Drop runs on every exit path,
//! including panic unwinding, so the report fires even when the timed block
//! fails. The timer never catches or alters the failure itself.

use std::io::Write;
use std::time::{Duration, Instant};

/// Measures and reports wall-clock time for the enclosing scope.
///
/// # Examples
///
/// ```
/// use tvdb::ScopedTimer;
///
/// {
///     let _timer = ScopedTimer::new("load phase");
///     // ... timed work ...
/// } // prints "[load phase] Elapsed: 0.000 s."
/// ```
pub struct ScopedTimer {
    label: String,
    start: Instant,
    out: Option<Box<dyn Write + Send>>,
}

impl ScopedTimer {
    /// Starts a timer that reports to stdout on drop.
    ///
    /// An empty label omits the bracketed prefix from the report line.
    pub fn new(label: &str) -> ScopedTimer {
        ScopedTimer {
            label: label.to_string(),
            start: Instant::now(),
            out: None,
        }
    }

    /// Starts a timer that writes its report line to `out` instead of stdout.
    pub fn with_output(label: &str, out: Box<dyn Write + Send>) -> ScopedTimer {
        ScopedTimer {
            label: label.to_string(),
            start: Instant::now(),
            out: Some(out),
        }
    }

    /// Time elapsed since the timer was created.
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    /// The report line as it would be printed right now.
    pub fn report(&self) -> String {
        let header = if self.label.is_empty() {
            String::new()
        } else {
            format!("[{}] ", self.label)
        };
        format!("{}Elapsed: {:.3} s.", header, self.elapsed().as_secs_f64())
    }
}

impl Drop for ScopedTimer {
    fn drop(&mut self) {
        let line = self.report();
        match self.out.as_mut() {
            // A failed write must not turn a report into a panic
            Some(out) => {
                let _ = writeln!(out, "{}", line);
            }
            None => println!("{}", line),
        }
    }
}
