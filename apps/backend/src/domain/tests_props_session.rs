use proptest::prelude::*;

use crate::domain::{
    test_gens, Continuation, EndReason, MatchResult, ResolutionReason, RoundWinner, Seat,
    SessionState,
};

proptest! {
    #![proptest_config(test_gens::proptest_config())]

    /// Property: round numbers go up by exactly one per started round, and
    /// every round adds at most one point per seat, two in total only on a draw.
    #[test]
    fn prop_rounds_monotonic_and_scores_bounded(inputs in test_gens::match_inputs(9)) {
        let max_rounds = inputs.len() as u32;
        let mut state = SessionState::new(max_rounds);

        for (i, (a, b)) in inputs.iter().enumerate() {
            let before_round = state.round_no;
            let before = state.scores;
            let round_no = state.start_round().unwrap();
            prop_assert_eq!(round_no, before_round + 1);
            prop_assert_eq!(round_no, i as u32 + 1);

            if let Some(mv) = a {
                state.submit(Seat::First, *mv).unwrap();
            }
            if let Some(mv) = b {
                state.submit(Seat::Second, *mv).unwrap();
            }
            let reason = if a.is_some() && b.is_some() {
                ResolutionReason::AllMovesIn
            } else {
                ResolutionReason::Timeout
            };
            let outcome = state.resolve(reason).unwrap();

            let gained: Vec<u32> = (0..2).map(|s| state.scores[s] - before[s]).collect();
            match outcome.winner {
                RoundWinner::Draw => prop_assert_eq!(gained, vec![1, 1]),
                RoundWinner::NoContest => prop_assert_eq!(gained, vec![0, 0]),
                RoundWinner::Seat(seat) => {
                    prop_assert_eq!(gained[seat.index()], 1);
                    prop_assert_eq!(gained[seat.other().index()], 0);
                }
            }
        }

        prop_assert_eq!(state.continuation(), Continuation::MatchOver);
        let summary = state.finish(EndReason::Completed);
        prop_assert_eq!(summary.history.len(), inputs.len());
        prop_assert_eq!(summary.result, MatchResult::from_scores(summary.scores));
    }

    /// Property: a lone mover always takes the round.
    #[test]
    fn prop_lone_mover_wins(mv in test_gens::symbol(), seat in test_gens::seat()) {
        let mut state = SessionState::new(3);
        state.start_round().unwrap();
        state.submit(seat, mv).unwrap();
        let outcome = state.resolve(ResolutionReason::Timeout).unwrap();
        prop_assert_eq!(outcome.winner, RoundWinner::Seat(seat));
        prop_assert_eq!(state.score(seat), 1);
        prop_assert_eq!(state.score(seat.other()), 0);
    }
}
