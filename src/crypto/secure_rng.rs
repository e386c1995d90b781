use ring::rand::{SecureRandom, SystemRandom};
use std::io;

/// Cryptographically secure random byte source backed by the OS CSPRNG.
///
/// One instance is created per erase call and dropped with it; no generator
/// state is shared across invocations, so concurrent erases of distinct
/// files never contend on a common RNG.
pub struct SecureRng {
    rng: SystemRandom,
}

impl SecureRng {
    pub fn new() -> Self {
        Self {
            rng: SystemRandom::new(),
        }
    }

    /// Fill `dest` with fresh random bytes. Every call produces new output;
    /// blocks are never reused across passes.
    pub fn fill_bytes(&self, dest: &mut [u8]) -> io::Result<()> {
        self.rng
            .fill(dest)
            .map_err(|_| io::Error::other("system CSPRNG failed to produce bytes"))
    }
}

impl Default for SecureRng {
    fn default() -> Self {
        Self::new()
    }
}

/// Calculate Shannon entropy of data in bits per byte (for verification)
pub fn calculate_entropy(data: &[u8]) -> f64 {
    let mut counts = [0u64; 256];
    for &byte in data {
        counts[byte as usize] += 1;
    }

    let length = data.len() as f64;
    let mut entropy = 0.0;

    for &count in &counts {
        if count > 0 {
            let probability = count as f64 / length;
            entropy -= probability * probability.log2();
        }
    }

    entropy
}
