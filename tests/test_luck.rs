use approx::assert_relative_eq;
use luck_cli::equity::EquityDistribution;
use luck_cli::luck::*;
use luck_cli::normalize::NormalizedShowdown;

#[test]
fn test_adjusted_value_zero_stack() {
    assert_eq!(adjusted_value(10.0, 0.0), 0.0);
    assert_eq!(adjusted_value(0.0, 0.0), 0.0);
    assert_eq!(adjusted_value(250.0, 0.0), 0.0);
}

#[test]
fn test_adjusted_value_discards_sign() {
    assert_relative_eq!(adjusted_value(5.0, 2.0), adjusted_value(5.0, -2.0));
    assert_relative_eq!(adjusted_value(11.0, 0.3), adjusted_value(11.0, -0.3));
}

#[test]
fn test_adjusted_value_scales_with_buy_in() {
    assert_relative_eq!(adjusted_value(20.0, 1.5), 2.0 * adjusted_value(10.0, 1.5));
}

#[test]
fn test_adjusted_value_sublinear() {
    // Concave in the stack: doubling the stack less than doubles the value.
    let one = adjusted_value(10.0, 1.0);
    let two = adjusted_value(10.0, 2.0);
    assert!(two > one);
    assert!(two < 2.0 * one);
}

#[test]
fn test_guaranteed_win_realized_is_zero_luck() {
    // Hero was certain to win and the realized stack equals the win branch
    // exactly (final = final - collected + pot), so luck vanishes.
    let outcome = NormalizedShowdown {
        start_stack: 1.0,
        final_stack: 2.0,
        collected: 1.0,
        total_pot: 1.0,
    };
    let dist = EquityDistribution { win: 1.0, tie: 0.0 };
    let result = hand_luck(&outcome, &dist, 10.0);
    assert_relative_eq!(result.luck, 0.0);
    assert_eq!(result.buy_in, 10.0);
    assert_eq!(result.equity, 1.0);
}

#[test]
fn test_losing_a_flip_is_negative_luck() {
    // Hero got it in as a coin flip and lost: realized value sits below the
    // equity baseline.
    let outcome = NormalizedShowdown {
        start_stack: 1.0,
        final_stack: 0.5,
        collected: 0.0,
        total_pot: 1.0,
    };
    let dist = EquityDistribution { win: 0.5, tie: 0.0 };
    let result = hand_luck(&outcome, &dist, 10.0);
    assert!(result.luck < 0.0);
}

#[test]
fn test_winning_as_underdog_is_positive_luck() {
    let outcome = NormalizedShowdown {
        start_stack: 1.0,
        final_stack: 1.5,
        collected: 1.0,
        total_pot: 1.0,
    };
    let dist = EquityDistribution { win: 0.2, tie: 0.0 };
    let result = hand_luck(&outcome, &dist, 10.0);
    assert!(result.luck > 0.0);
}

#[test]
fn test_tie_branch_uses_half_pot() {
    // With certain tie, all-in EV is the half-pot branch.
    let outcome = NormalizedShowdown {
        start_stack: 1.0,
        final_stack: 1.0,
        collected: 0.5,
        total_pot: 1.0,
    };
    let dist = EquityDistribution { win: 0.0, tie: 1.0 };
    let result = hand_luck(&outcome, &dist, 10.0);
    // final - collected + pot/2 = 1.0 = final: realized matches baseline.
    assert_relative_eq!(result.luck, 0.0);
}
