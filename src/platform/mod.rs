//! Platform abstraction layer
//!
//! Handles native frame pacing: one simulation tick per frame at a fixed rate,
//! sleeping until the next frame boundary. Also feeds blocking line input to
//! the non-blocking game loop.

use std::io::BufRead;
use std::sync::mpsc::{self, Receiver};
use std::time::{Duration, Instant};

/// Fixed-rate frame limiter
#[derive(Debug, Clone)]
pub struct FrameClock {
    period: Duration,
    next: Instant,
    /// Frames that started late because the previous one overran
    pub late_frames: u64,
}

impl FrameClock {
    /// Clock ticking `rate` times per second (clamped to at least 1)
    pub fn new(rate: u32) -> Self {
        let period = Duration::from_secs(1) / rate.max(1);
        Self {
            period,
            next: Instant::now() + period,
            late_frames: 0,
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Block until the next frame boundary.
    ///
    /// An overrunning frame does not trigger catch-up ticks: the schedule
    /// restarts from now so the simulation slows down instead of bursting.
    pub fn wait(&mut self) {
        let now = Instant::now();
        if now < self.next {
            std::thread::sleep(self.next - now);
            self.next += self.period;
        } else {
            self.late_frames += 1;
            self.next = now + self.period;
        }
    }
}

/// Read `reader` line by line on a background thread.
///
/// The channel disconnects once the reader hits end of input or an error.
pub fn spawn_line_reader<R>(reader: R) -> Receiver<String>
where
    R: BufRead + Send + 'static,
{
    let (tx, rx) = mpsc::channel();
    std::thread::spawn(move || {
        for line in reader.lines() {
            let Ok(line) = line else { break };
            if tx.send(line).is_err() {
                break;
            }
        }
        log::debug!("Input reader finished");
    });
    rx
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_period_from_rate() {
        assert_eq!(FrameClock::new(50).period(), Duration::from_millis(20));
        assert_eq!(FrameClock::new(0).period(), Duration::from_secs(1));
    }

    #[test]
    fn test_wait_paces_frames() {
        let mut clock = FrameClock::new(200);
        let start = Instant::now();
        for _ in 0..4 {
            clock.wait();
        }
        // Four 5 ms frames
        assert!(start.elapsed() >= Duration::from_millis(15));
    }

    #[test]
    fn test_line_reader_forwards_then_disconnects() {
        let rx = spawn_line_reader(std::io::Cursor::new("right\njump\n"));
        let lines: Vec<String> = rx.iter().collect();
        assert_eq!(lines, vec!["right", "jump"]);
    }
}
