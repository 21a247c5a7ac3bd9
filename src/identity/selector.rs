//! Index selection strategies for the identity rotator.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Picks one position out of a non-empty list.
pub trait Selector: Send + Sync {
    /// Return an index in `0..len`. Callers guarantee `len > 0`.
    fn pick(&self, len: usize) -> usize;
}

/// Uniform selection from the thread-local RNG.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadRngSelector;

impl Selector for ThreadRngSelector {
    fn pick(&self, len: usize) -> usize {
        rand::thread_rng().gen_range(0..len)
    }
}

/// Uniform selection from a seeded RNG, reproducible across runs.
#[derive(Debug)]
pub struct SeededSelector {
    rng: Mutex<StdRng>,
}

impl SeededSelector {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl Selector for SeededSelector {
    fn pick(&self, len: usize) -> usize {
        // A poisoned lock still holds a usable RNG state.
        let mut rng = self.rng.lock().unwrap_or_else(|e| e.into_inner());
        rng.gen_range(0..len)
    }
}

/// Replays a fixed sequence of indices, wrapping around at the end.
///
/// Indices larger than the list are reduced modulo its length.
#[derive(Debug)]
pub struct SequenceSelector {
    sequence: Vec<usize>,
    counter: AtomicUsize,
}

impl SequenceSelector {
    pub fn new(sequence: Vec<usize>) -> Self {
        Self {
            sequence,
            counter: AtomicUsize::new(0),
        }
    }
}

impl Selector for SequenceSelector {
    fn pick(&self, len: usize) -> usize {
        if self.sequence.is_empty() {
            return 0;
        }
        let step = self.counter.fetch_add(1, Ordering::Relaxed);
        self.sequence[step % self.sequence.len()] % len
    }
}
