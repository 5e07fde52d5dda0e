//! Sources of pseudo-random words and numbers.
use fake::faker::lorem::en::Words;
use fake::Fake;
use rand::rngs::StdRng;
use rand::{
    Rng,
    SeedableRng,
};

/// Everything the generator needs from a random source.  All integer bounds are inclusive.
#[cfg_attr(any(test, feature = "testutils"), mockall::automock)]
pub trait Randomizer {
    /// `count` words for name components and labels.
    fn words(&mut self, count: usize) -> Vec<String>;

    /// A uniform integer in `[lo, hi]`; `lo` when the range is empty or a single value.
    fn int_in(&mut self, lo: u64, hi: u64) -> u64;

    /// A zero-padded decimal string exactly `width` digits wide.
    fn number_str(&mut self, width: usize) -> String {
        #[allow(clippy::cast_possible_truncation)]
        let hi = 10_u64.checked_pow(width as u32).map_or(u64::MAX, |p| p - 1);
        format!("{:0width$}", self.int_in(0, hi))
    }

    /// A uniform pick from `{lo, lo + step, lo + 2 * step, ...}` capped at `hi`.  A zero step is
    /// treated as one.
    fn stepped_in(&mut self, lo: u64, hi: u64, step: u64) -> u64 {
        if hi <= lo {
            return lo;
        }
        let step = step.max(1);
        lo + self.int_in(0, (hi - lo) / step) * step
    }

    /// A uniform index into a collection of length `len`; zero for an empty collection.
    fn pick(&mut self, len: usize) -> usize {
        if len == 0 {
            return 0;
        }
        #[allow(clippy::cast_possible_truncation)]
        let ix = self.int_in(0, len as u64 - 1) as usize;
        ix
    }
}

/// A [`Randomizer`] backed by `StdRng` and the `fake` lorem word list.
#[derive(Clone, Debug)]
pub struct FakeRandomizer {
    /// Backing generator.
    rng: StdRng,
}

impl FakeRandomizer {
    /// A reproducible randomizer: the same seed yields the same dataset.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        FakeRandomizer { rng: StdRng::seed_from_u64(seed) }
    }

    /// A randomizer seeded from the operating system.
    #[must_use]
    pub fn from_entropy() -> Self {
        FakeRandomizer { rng: StdRng::from_entropy() }
    }
}

impl Randomizer for FakeRandomizer {
    fn words(&mut self, count: usize) -> Vec<String> {
        Words(count..count + 1).fake_with_rng(&mut self.rng)
    }

    fn int_in(&mut self, lo: u64, hi: u64) -> u64 {
        if hi <= lo {
            return lo;
        }
        self.rng.gen_range(lo..=hi)
    }
}
