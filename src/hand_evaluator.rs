use std::collections::BTreeSet;
use std::fmt;

use itertools::Itertools;

use crate::cards::Card;
use crate::error::{LuckError, LuckResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum HandCategory {
    HighCard = 0,
    OnePair = 1,
    TwoPair = 2,
    ThreeOfAKind = 3,
    Straight = 4,
    Flush = 5,
    FullHouse = 6,
    FourOfAKind = 7,
    StraightFlush = 8,
    RoyalFlush = 9,
}

impl fmt::Display for HandCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HandCategory::HighCard => write!(f, "High Card"),
            HandCategory::OnePair => write!(f, "One Pair"),
            HandCategory::TwoPair => write!(f, "Two Pair"),
            HandCategory::ThreeOfAKind => write!(f, "Three of a Kind"),
            HandCategory::Straight => write!(f, "Straight"),
            HandCategory::Flush => write!(f, "Flush"),
            HandCategory::FullHouse => write!(f, "Full House"),
            HandCategory::FourOfAKind => write!(f, "Four of a Kind"),
            HandCategory::StraightFlush => write!(f, "Straight Flush"),
            HandCategory::RoyalFlush => write!(f, "Royal Flush"),
        }
    }
}

/// Total order over hand strengths, packed into a single integer so mass
/// evaluation during equity runs stays allocation-free.
///
/// Layout: category in bits 20..24, then up to five kicker nibbles from
/// bit 16 down. Higher score = stronger hand; equal scores tie exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct HandScore(u32);

impl HandScore {
    fn pack(category: HandCategory, kickers: &[u8]) -> HandScore {
        debug_assert!(kickers.len() <= 5);
        let mut bits = (category as u32) << 20;
        for (i, &k) in kickers.iter().enumerate() {
            bits |= (k as u32) << (16 - 4 * i);
        }
        HandScore(bits)
    }

    pub fn category(self) -> HandCategory {
        match self.0 >> 20 {
            0 => HandCategory::HighCard,
            1 => HandCategory::OnePair,
            2 => HandCategory::TwoPair,
            3 => HandCategory::ThreeOfAKind,
            4 => HandCategory::Straight,
            5 => HandCategory::Flush,
            6 => HandCategory::FullHouse,
            7 => HandCategory::FourOfAKind,
            8 => HandCategory::StraightFlush,
            _ => HandCategory::RoyalFlush,
        }
    }
}

impl fmt::Display for HandScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.category())
    }
}

/// The external hand-ranking capability the equity estimator depends on.
/// Any implementation must order scores so that stronger hands compare
/// greater and exactly tied hands compare equal.
pub trait HandEval {
    fn evaluate(&self, hole: &[Card], board: &[Card]) -> LuckResult<HandScore>;
}

/// Built-in best-five-of-seven evaluator.
#[derive(Debug, Default, Clone, Copy)]
pub struct RankedEval;

impl HandEval for RankedEval {
    fn evaluate(&self, hole: &[Card], board: &[Card]) -> LuckResult<HandScore> {
        evaluate_hand(hole, board)
    }
}

fn is_flush(cards: &[Card; 5]) -> bool {
    cards.windows(2).all(|w| w[0].suit == w[1].suit)
}

fn straight_high(values: &[u8]) -> Option<u8> {
    let unique: Vec<u8> = values
        .iter()
        .copied()
        .collect::<BTreeSet<u8>>()
        .into_iter()
        .rev()
        .collect();
    if unique.len() == 5 && unique[0] - unique[4] == 4 {
        return Some(unique[0]);
    }
    // Wheel: A-2-3-4-5
    if unique == [14, 5, 4, 3, 2] {
        return Some(5);
    }
    None
}

fn evaluate_five(cards: &[Card; 5]) -> HandScore {
    let mut values: Vec<u8> = cards.iter().map(|c| c.value()).collect();
    values.sort_unstable_by(|a, b| b.cmp(a));

    let flush = is_flush(cards);
    let straight = straight_high(&values);

    if flush {
        if let Some(high) = straight {
            if high == 14 {
                return HandScore::pack(HandCategory::RoyalFlush, &[14]);
            }
            return HandScore::pack(HandCategory::StraightFlush, &[high]);
        }
    }

    // (count, value) sorted by count desc, then value desc
    let mut counts = [0u8; 15];
    for &v in &values {
        counts[v as usize] += 1;
    }
    let mut freq: Vec<(u8, u8)> = (2..=14u8)
        .filter(|&v| counts[v as usize] > 0)
        .map(|v| (counts[v as usize], v))
        .collect();
    freq.sort_unstable_by(|a, b| b.cmp(a));

    match (freq[0].0, freq.get(1).map_or(0, |f| f.0)) {
        (4, _) => HandScore::pack(HandCategory::FourOfAKind, &[freq[0].1, freq[1].1]),
        (3, 2) => HandScore::pack(HandCategory::FullHouse, &[freq[0].1, freq[1].1]),
        _ if flush => HandScore::pack(HandCategory::Flush, &values),
        _ if straight.is_some() => {
            HandScore::pack(HandCategory::Straight, &[straight.unwrap()])
        }
        (3, _) => {
            let kickers: Vec<u8> = std::iter::once(freq[0].1)
                .chain(values.iter().copied().filter(|&v| v != freq[0].1))
                .collect();
            HandScore::pack(HandCategory::ThreeOfAKind, &kickers)
        }
        (2, 2) => {
            let kicker = freq.iter().find(|f| f.0 == 1).map_or(0, |f| f.1);
            HandScore::pack(HandCategory::TwoPair, &[freq[0].1, freq[1].1, kicker])
        }
        (2, _) => {
            let kickers: Vec<u8> = std::iter::once(freq[0].1)
                .chain(values.iter().copied().filter(|&v| v != freq[0].1))
                .collect();
            HandScore::pack(HandCategory::OnePair, &kickers)
        }
        _ => HandScore::pack(HandCategory::HighCard, &values),
    }
}

/// Scores the best five-card hand from hole cards plus board.
pub fn evaluate_hand(hole: &[Card], board: &[Card]) -> LuckResult<HandScore> {
    let all_cards: Vec<Card> = hole.iter().chain(board.iter()).copied().collect();
    if all_cards.len() < 5 {
        return Err(LuckError::NotEnoughCards {
            need: 5,
            got: all_cards.len(),
        });
    }

    let mut best: Option<HandScore> = None;
    for combo in all_cards.iter().combinations(5) {
        let five: [Card; 5] = [*combo[0], *combo[1], *combo[2], *combo[3], *combo[4]];
        let score = evaluate_five(&five);
        if best.map_or(true, |b| score > b) {
            best = Some(score);
        }
    }

    Ok(best.unwrap())
}
