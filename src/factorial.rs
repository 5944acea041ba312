//! Factorials backing the Poisson pmf. Goal counts are tiny, so a precomputed table
//! covers the entire usable range.

const MAX_ENTRIES: usize = 35;

pub trait Factorial {
    fn get(&self, n: u8) -> u128;
}

/// Precomputed table of `0!..=34!`; anything larger overflows `u128` and is far beyond
/// any plausible scoreline cutoff anyway.
pub struct Lookup {
    entries: [u128; MAX_ENTRIES],
}
impl Factorial for Lookup {
    #[inline]
    fn get(&self, n: u8) -> u128 {
        self.entries[n as usize]
    }
}

impl Default for Lookup {
    fn default() -> Self {
        let mut entries = [1u128; MAX_ENTRIES];
        for i in 2..MAX_ENTRIES {
            entries[i] = i as u128 * entries[i - 1];
        }
        Self { entries }
    }
}
