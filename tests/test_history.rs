use luck_cli::error::LuckError;
use luck_cli::history::*;

const TURN_SHOWDOWN: &str = "\
PokerStars Hand #101: Tournament #900123, $10+$1 USD Hold'em No Limit - Level V (50/100)
Table '900123 7' 9-max Seat #3 is the button
Seat 1: Hero (1,500 in chips)
Seat 2: Raptor77 (4,200 in chips)
Hero: posts small blind 50
Raptor77: posts big blind 100
*** HOLE CARDS ***
Dealt to Hero [Ah Kh]
Hero: raises 200 to 300
Raptor77: calls 200
*** FLOP *** [Qh 7h 2h]
Hero: bets 400
Raptor77: raises 800 to 1200
Hero: calls 800 and is all-in
*** TURN *** [Qh 7h 2h] [2d]
Hero: shows [Ah Kh] (a flush, ace high)
Raptor77: shows [Qs Jd] (two pair, queens and deuces)
*** RIVER *** [Qh 7h 2h 2d] [5s]
Hero collected 3,000 from pot
*** SUMMARY ***
Total pot 3,000 | Rake 0
Board [Qh 7h 2h 2d 5s]
Seat 1: Hero showed [Ah Kh] and won (3,000) with a flush, ace high
Seat 2: Raptor77 showed [Qs Jd] and lost with two pair, queens and deuces";

const FOLDED_HAND: &str = "\
PokerStars Hand #102: Tournament #900123, $10+$1 USD Hold'em No Limit - Level V (50/100)
Table '900123 7' 9-max Seat #3 is the button
Seat 1: Hero (3,000 in chips)
Seat 2: Raptor77 (2,700 in chips)
Hero: posts small blind 50
Raptor77: posts big blind 100
*** HOLE CARDS ***
Dealt to Hero [9c 4d]
Hero: folds
Raptor77 collected 100 from pot
*** SUMMARY ***
Total pot 100 | Rake 0
Seat 1: Hero folded before Flop";

fn two_hand_file() -> String {
    format!("{}\n\n{}", TURN_SHOWDOWN, FOLDED_HAND)
}

#[test]
fn test_eligible_showdown_parses() {
    let session = parse_session(&two_hand_file()).unwrap();
    assert_eq!(session.records.len(), 1);
    assert_eq!(session.skipped, 0);

    let r = &session.records[0];
    assert_eq!(format!("{} {}", r.hero_hole[0], r.hero_hole[1]), "Ah Kh");
    assert_eq!(format!("{} {}", r.opp_hole[0], r.opp_hole[1]), "Qs Jd");
    assert_eq!(r.board.len(), 4);
    assert_eq!(format!("{}", r.board[3]), "2d");
    assert_eq!(r.start_stack, 1_500);
    assert_eq!(r.collected, 3_000);
    assert_eq!(r.total_pot, 3_000);
    assert_eq!(r.buy_in, 10.0);
}

#[test]
fn test_final_stack_comes_from_next_header() {
    let session = parse_session(&two_hand_file()).unwrap();
    assert_eq!(session.records[0].final_stack, 3_000);
}

#[test]
fn test_scale_is_last_observed_stack() {
    let session = parse_session(&two_hand_file()).unwrap();
    assert_eq!(session.scale_chips, 3_000);
}

#[test]
fn test_last_hand_final_stack_is_own_header() {
    let session = parse_session(TURN_SHOWDOWN).unwrap();
    assert_eq!(session.records[0].final_stack, 1_500);
}

#[test]
fn test_river_before_showdown_is_excluded() {
    // Move the reveal after the river: the final card was already out.
    let hand = TURN_SHOWDOWN
        .replace(
            "*** RIVER *** [Qh 7h 2h 2d] [5s]",
            "*** SHOW DOWN ***",
        )
        .replace(
            "*** TURN *** [Qh 7h 2h] [2d]",
            "*** TURN *** [Qh 7h 2h] [2d]\n*** RIVER *** [Qh 7h 2h 2d] [5s]",
        );
    let session = parse_session(&hand).unwrap();
    assert!(session.records.is_empty());
}

#[test]
fn test_no_hero_showdown_is_excluded() {
    let session = parse_session(FOLDED_HAND).unwrap();
    assert!(session.records.is_empty());
    assert_eq!(session.skipped, 0);
}

#[test]
fn test_two_opponents_showing_is_excluded() {
    let hand = format!(
        "{}\nSeat 3: Nit showed [8c 8d] and lost with a pair of eights",
        TURN_SHOWDOWN
    );
    let session = parse_session(&hand).unwrap();
    assert!(session.records.is_empty());
}

#[test]
fn test_overlapping_cards_are_excluded() {
    // Opponent claims one of hero's cards: not resolvable to distinct cards.
    let hand = TURN_SHOWDOWN.replace("[Qs Jd]", "[Ah Jd]");
    let session = parse_session(&hand).unwrap();
    assert!(session.records.is_empty());
}

#[test]
fn test_malformed_card_counts_as_skipped() {
    let hand = TURN_SHOWDOWN.replace("Dealt to Hero [Ah Kh]", "Dealt to Hero [Xx Kh]");
    let session = parse_session(&hand).unwrap();
    assert!(session.records.is_empty());
    assert_eq!(session.skipped, 1);
}

#[test]
fn test_yen_buy_in_converts() {
    let hand = TURN_SHOWDOWN.replace("$10+$1 USD", "¥100+¥10 JPY");
    let session = parse_session(&hand).unwrap();
    assert_eq!(session.records.len(), 1);
    assert!((session.records[0].buy_in - 14.0).abs() < 1e-9);
}

#[test]
fn test_flop_showdown_board_stops_at_flop() {
    // Reveal happens on the flop: the turn marker comes later, so only the
    // three flop cards are known at showdown.
    let hand = TURN_SHOWDOWN
        .replace(
            "Hero: calls 800 and is all-in",
            "Hero: calls 800 and is all-in\nHero: shows [Ah Kh] (flush draw)\nRaptor77: shows [Qs Jd] (a pair of queens)",
        )
        .replace("Hero: shows [Ah Kh] (a flush, ace high)\n", "")
        .replace("Raptor77: shows [Qs Jd] (two pair, queens and deuces)\n", "");
    let session = parse_session(&hand).unwrap();
    assert_eq!(session.records.len(), 1);
    assert_eq!(session.records[0].board.len(), 3);
}

#[test]
fn test_no_observed_stack_is_degenerate() {
    let err = parse_session("nothing resembling a hand\n\nstill nothing").unwrap_err();
    assert!(matches!(err, LuckError::DegenerateSession));
}
