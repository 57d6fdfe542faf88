use proptest::prelude::*;

use crate::domain::{judge, test_gens, Verdict};

proptest! {
    #![proptest_config(test_gens::proptest_config())]

    /// Property: swapping sides reverses the verdict.
    #[test]
    fn prop_judge_antisymmetric(a in test_gens::symbol(), b in test_gens::symbol()) {
        prop_assert_eq!(judge(a, b), judge(b, a).reversed());
    }

    /// Property: mixed symbols never draw; identical symbols always do.
    #[test]
    fn prop_judge_draw_iff_equal(a in test_gens::symbol(), b in test_gens::symbol()) {
        prop_assert_eq!(judge(a, b) == Verdict::Draw, a == b);
    }

    /// Property: the first side wins exactly when its symbol beats the other.
    #[test]
    fn prop_judge_matches_beats(a in test_gens::symbol(), b in test_gens::symbol()) {
        prop_assert_eq!(judge(a, b) == Verdict::FirstWins, a.beats(b));
        prop_assert!(!(a.beats(b) && b.beats(a)));
    }
}
