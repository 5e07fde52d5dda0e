use assertables::*;
use rstest::*;

use super::*;
use crate::randomizer::*;

// Always draws the same value, clamped into the requested range.
struct FixedDraw(u64);

impl Randomizer for FixedDraw {
    fn words(&mut self, count: usize) -> Vec<String> {
        vec!["word".into(); count]
    }

    fn int_in(&mut self, lo: u64, hi: u64) -> u64 {
        self.0.clamp(lo, hi.max(lo))
    }
}

#[rstest]
#[case::low(0, "0000000000")]
#[case::mid(42, "0000000042")]
#[case::high(u64::MAX, "9999999999")]
fn test_number_str_is_fixed_width(#[case] draw: u64, #[case] expected: &str) {
    assert_eq!(FixedDraw(draw).number_str(10), expected);
}

#[rstest]
#[case::bottom(0, 300)]
#[case::top(u64::MAX, 3540)]
#[case::middle(2, 1020)]
fn test_stepped_in(#[case] draw: u64, #[case] expected: u64) {
    assert_eq!(FixedDraw(draw).stepped_in(300, 3600, 360), expected);
}

#[test]
fn test_stepped_in_degenerate_ranges() {
    assert_eq!(FixedDraw(5).stepped_in(600, 600, 100), 600);
    assert_eq!(FixedDraw(5).stepped_in(700, 600, 100), 700);
    assert_eq!(FixedDraw(5).stepped_in(0, 10, 0), 5);
}

#[test]
fn test_pick() {
    assert_eq!(FixedDraw(u64::MAX).pick(3), 2);
    assert_eq!(FixedDraw(1).pick(3), 1);
    assert_eq!(FixedDraw(9).pick(0), 0);
}

#[test]
fn test_seeded_randomizers_agree() {
    let mut a = FakeRandomizer::seeded(TEST_SEED);
    let mut b = FakeRandomizer::seeded(TEST_SEED);

    assert_eq!(a.words(4), b.words(4));
    assert_eq!(a.int_in(1, 1_000_000), b.int_in(1, 1_000_000));
    assert_eq!(a.number_str(12), b.number_str(12));
}

#[rstest]
#[case(0)]
#[case(1)]
#[case(5)]
fn test_words_count(#[case] count: usize) {
    let words = FakeRandomizer::seeded(TEST_SEED).words(count);
    assert_eq!(words.len(), count);
    assert!(words.iter().all(|w| !w.is_empty()));
}

#[test]
fn test_int_in_bounds() {
    let mut rnd = FakeRandomizer::seeded(TEST_SEED);
    for _ in 0..500 {
        let n = rnd.int_in(3, 9);
        assert_ge!(n, 3);
        assert_le!(n, 9);
    }
    assert_eq!(rnd.int_in(7, 7), 7);
}

#[test]
fn test_stepped_values_stay_on_grid() {
    let mut rnd = FakeRandomizer::seeded(TEST_SEED);
    for _ in 0..500 {
        let n = rnd.stepped_in(300, 3600, 360);
        assert_le!(n, 3600);
        assert_eq!((n - 300) % 360, 0);
    }
}

#[test]
fn test_number_str_digits() {
    let mut rnd = FakeRandomizer::seeded(TEST_SEED);
    for width in [1, 10, 19, 25] {
        let id = rnd.number_str(width);
        assert_ge!(id.len(), width);
        assert!(id.chars().all(|c| c.is_ascii_digit()));
    }
}
