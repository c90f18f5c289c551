//! Lock-free distribution of pixel work across render threads.

use std::sync::atomic::{AtomicUsize, Ordering};

use log::info;

/// A single pixel coordinate, row-major from the top-left.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Pixel {
    pub row: u32,
    pub col: u32,
}

/// Hands out each pixel of a frame exactly once and tracks completion.
///
/// Workers call [`claim`](Self::claim) until it returns `None`; whoever
/// records finished results calls [`complete`](Self::complete). Both sides
/// are plain atomic counters, so the queue works unchanged from a single
/// thread or from many.
#[derive(Debug)]
pub struct PixelQueue {
    rows: u32,
    cols: u32,
    next: AtomicUsize,
    done: AtomicUsize,
    log_step: usize,
}

impl PixelQueue {
    /// Creates a queue over a `rows` x `cols` frame.
    ///
    /// `progress_interval` is the percentage of the frame between progress
    /// log lines; 0 disables progress logging.
    pub fn new(rows: u32, cols: u32, progress_interval: u32) -> Self {
        let total = rows as usize * cols as usize;
        let log_step = if progress_interval == 0 {
            0
        } else {
            (total * progress_interval.min(100) as usize / 100).max(1)
        };
        Self {
            rows,
            cols,
            next: AtomicUsize::new(0),
            done: AtomicUsize::new(0),
            log_step,
        }
    }

    pub fn total(&self) -> usize {
        self.rows as usize * self.cols as usize
    }

    /// Claims the next unrendered pixel, or `None` once the frame is
    /// exhausted. No pixel is ever handed out twice.
    pub fn claim(&self) -> Option<Pixel> {
        let index = self.next.fetch_add(1, Ordering::Relaxed);
        if index >= self.total() {
            return None;
        }
        Some(Pixel {
            row: (index / self.cols as usize) as u32,
            col: (index % self.cols as usize) as u32,
        })
    }

    /// Records one finished pixel, logging progress at the configured
    /// interval.
    pub fn complete(&self) {
        let done = self.done.fetch_add(1, Ordering::Relaxed) + 1;
        if self.log_step > 0 && (done % self.log_step == 0 || done == self.total()) {
            info!(
                "render progress: {}% ({done}/{} pixels)",
                done * 100 / self.total(),
                self.total()
            );
        }
    }

    pub fn completed(&self) -> usize {
        self.done.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::thread;

    #[test]
    fn test_claims_are_row_major() {
        let queue = PixelQueue::new(2, 3, 0);
        let claimed: Vec<Pixel> = std::iter::from_fn(|| queue.claim()).collect();
        let expected: Vec<Pixel> = (0..2)
            .flat_map(|row| (0..3).map(move |col| Pixel { row, col }))
            .collect();
        assert_eq!(claimed, expected);
        assert_eq!(queue.claim(), None);
    }

    #[test]
    fn test_empty_queue_yields_nothing() {
        let queue = PixelQueue::new(0, 10, 0);
        assert_eq!(queue.claim(), None);
        assert_eq!(queue.total(), 0);
    }

    #[test]
    fn test_complete_counts_up() {
        let queue = PixelQueue::new(2, 2, 0);
        assert_eq!(queue.completed(), 0);
        queue.complete();
        queue.complete();
        assert_eq!(queue.completed(), 2);
    }

    #[test]
    fn test_concurrent_claims_are_disjoint_and_exhaustive() {
        let queue = PixelQueue::new(40, 25, 0);
        let mut per_thread: Vec<Vec<Pixel>> = Vec::new();
        thread::scope(|scope| {
            let handles: Vec<_> = (0..4)
                .map(|_| {
                    let queue = &queue;
                    scope.spawn(move || {
                        let mut mine = Vec::new();
                        while let Some(pixel) = queue.claim() {
                            mine.push(pixel);
                        }
                        mine
                    })
                })
                .collect();
            for handle in handles {
                per_thread.push(handle.join().unwrap());
            }
        });
        let all: Vec<Pixel> = per_thread.into_iter().flatten().collect();
        let unique: HashSet<Pixel> = all.iter().copied().collect();
        assert_eq!(all.len(), 1000);
        assert_eq!(unique.len(), 1000);
    }
}
