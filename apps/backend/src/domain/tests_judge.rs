use crate::domain::{judge, Move, Verdict};

#[test]
fn judge_classic_pairs() {
    assert_eq!(judge(Move::Rock, Move::Scissors), Verdict::FirstWins);
    assert_eq!(judge(Move::Scissors, Move::Paper), Verdict::FirstWins);
    assert_eq!(judge(Move::Paper, Move::Rock), Verdict::FirstWins);

    assert_eq!(judge(Move::Scissors, Move::Rock), Verdict::SecondWins);
    assert_eq!(judge(Move::Paper, Move::Scissors), Verdict::SecondWins);
    assert_eq!(judge(Move::Rock, Move::Paper), Verdict::SecondWins);
}

#[test]
fn judge_identical_symbols_draw() {
    for mv in Move::ALL {
        assert_eq!(judge(mv, mv), Verdict::Draw);
    }
}

#[test]
fn judge_table_has_three_wins_three_losses_three_draws() {
    let mut wins = 0;
    let mut losses = 0;
    let mut draws = 0;
    for a in Move::ALL {
        for b in Move::ALL {
            match judge(a, b) {
                Verdict::FirstWins => wins += 1,
                Verdict::SecondWins => losses += 1,
                Verdict::Draw => draws += 1,
            }
        }
    }
    assert_eq!((wins, losses, draws), (3, 3, 3));
}

#[test]
fn each_symbol_beats_exactly_one_other() {
    for a in Move::ALL {
        let beaten = Move::ALL.iter().filter(|b| a.beats(**b)).count();
        assert_eq!(beaten, 1, "{a} should beat exactly one symbol");
    }
}
