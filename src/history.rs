//! Hand-history extraction: turns archived hand-history text into
//! `ShowdownRecord`s for the equity and luck pipeline.
//!
//! A file is a sequence of hands separated by blank lines. Hero's stack in a
//! hand's seat listing is the stack carried *into* that hand, so the stack
//! after hand `i` is read from hand `i + 1`'s header; the last observed
//! header stack doubles as the session's normalization scale.

use std::collections::HashSet;

use crate::cards::{parse_board, Card};
use crate::error::{LuckError, LuckResult};

/// One eligible showdown: hero and exactly one opponent revealed cards
/// before the final community card. Chip amounts are raw (unnormalized).
#[derive(Debug, Clone)]
pub struct ShowdownRecord {
    pub hero_hole: [Card; 2],
    pub opp_hole: [Card; 2],
    pub board: Vec<Card>,
    pub start_stack: u64,
    pub final_stack: u64,
    pub collected: u64,
    pub total_pot: u64,
    pub buy_in: f64,
}

/// Everything the pipeline needs from one file.
#[derive(Debug)]
pub struct ParsedSession {
    pub records: Vec<ShowdownRecord>,
    /// Hero's last observed header stack, the per-file chip scale.
    pub scale_chips: u64,
    /// Hands dropped by the eligibility filter or by malformed tokens.
    pub skipped: usize,
}

const SHOWS_MARKER: &str = "Hero: shows";
const FLOP_MARKER: &str = "*** FLOP ***";
const TURN_MARKER: &str = "*** TURN ***";
const RIVER_MARKER: &str = "*** RIVER ***";

/// Yen buy-ins are converted upstream of the core at a fixed rate.
const YEN_TO_USD: f64 = 0.14;

pub fn parse_session(text: &str) -> LuckResult<ParsedSession> {
    let hands: Vec<&str> = text
        .trim()
        .split("\n\n")
        .filter(|h| !h.trim().is_empty())
        .collect();

    let header_stacks: Vec<Option<u64>> = hands.iter().map(|h| header_stack(h)).collect();
    let scale_chips = header_stacks
        .iter()
        .rev()
        .find_map(|s| *s)
        .ok_or(LuckError::DegenerateSession)?;

    let mut records = Vec::new();
    let mut skipped = 0usize;
    for (i, hand) in hands.iter().enumerate() {
        let start_stack = match header_stacks[i] {
            Some(s) => s,
            None => {
                skipped += 1;
                continue;
            }
        };
        // Stack after this hand = next hand's header; the file's last hand
        // has no successor, so its own header stands in.
        let final_stack = header_stacks
            .get(i + 1)
            .and_then(|s| *s)
            .unwrap_or(start_stack);

        match showdown_record(hand, start_stack, final_stack) {
            Ok(Some(record)) => records.push(record),
            Ok(None) => {}
            Err(_) => skipped += 1,
        }
    }

    Ok(ParsedSession {
        records,
        scale_chips,
        skipped,
    })
}

/// Applies the eligibility filter to one hand. `Ok(None)` means the hand is
/// simply not a heads-up pre-river showdown; `Err` means it looked eligible
/// but a token would not resolve.
fn showdown_record(
    hand: &str,
    start_stack: u64,
    final_stack: u64,
) -> LuckResult<Option<ShowdownRecord>> {
    let shows_at = match hand.find(SHOWS_MARKER) {
        Some(i) => i,
        None => return Ok(None),
    };

    // Hero plus exactly one opponent in the showdown summary.
    if count_ignore_case(hand, "showed [") != 2 {
        return Ok(None);
    }

    // Showdown after the river is settled; only undealt-card showdowns count.
    if let Some(river_at) = hand.find(RIVER_MARKER) {
        if river_at < shows_at {
            return Ok(None);
        }
    }

    let board = partial_board(hand, shows_at)?;

    let hero_hole = match bracket_after(hand, "Dealt to Hero [") {
        Some((_, inner)) => parse_board(inner)?,
        None => return Ok(None),
    };
    let opp_hole = opponent_shown_cards(hand)?;
    if hero_hole.len() != 2 || opp_hole.len() != 2 || board.len() > 5 {
        return Ok(None);
    }

    // Hole cards and board must be pairwise disjoint.
    let mut seen: HashSet<Card> = HashSet::new();
    for &c in hero_hole.iter().chain(opp_hole.iter()).chain(board.iter()) {
        if !seen.insert(c) {
            return Ok(None);
        }
    }

    let collected = number_after(hand, "Hero collected ").unwrap_or(0);
    let total_pot = match number_after(hand, "Total pot ") {
        Some(p) => p,
        None => return Ok(None),
    };
    let buy_in = match buy_in(hand) {
        Some(b) => b,
        None => return Ok(None),
    };

    Ok(Some(ShowdownRecord {
        hero_hole: [hero_hole[0], hero_hole[1]],
        opp_hole: [opp_hole[0], opp_hole[1]],
        board,
        start_stack,
        final_stack,
        collected,
        total_pot,
        buy_in,
    }))
}

/// Community cards revealed before the showdown marker: the flop bracket,
/// plus the turn card when its stage marker precedes the marker. The river
/// is never included.
fn partial_board(hand: &str, shows_at: usize) -> LuckResult<Vec<Card>> {
    let mut board = Vec::new();
    if let Some((at, inner)) = bracket_after(hand, FLOP_MARKER) {
        if at < shows_at {
            board.extend(parse_board(inner)?);
        }
    }
    if let Some((at, inner)) = second_bracket_after(hand, TURN_MARKER) {
        if at < shows_at {
            board.extend(parse_board(inner)?);
        }
    }
    Ok(board)
}

/// Cards shown by the single non-Hero player in the summary section.
fn opponent_shown_cards(hand: &str) -> LuckResult<Vec<Card>> {
    let mut cards = Vec::new();
    for line in hand.lines() {
        if !line.starts_with("Seat ") {
            continue;
        }
        let Some(colon) = line.find(": ") else { continue };
        let player = &line[colon + 2..];
        if player.starts_with("Hero") {
            continue;
        }
        if let Some((_, inner)) = bracket_after(player, " showed [") {
            cards.extend(parse_board(inner)?);
        }
    }
    Ok(cards)
}

fn header_stack(hand: &str) -> Option<u64> {
    for line in hand.lines() {
        if line.starts_with("Seat ") && line.contains(": Hero (") {
            let open = line.find('(')?;
            let rest = &line[open + 1..];
            let end = rest.find(" in chips")?;
            return parse_chips(&rest[..end]);
        }
    }
    None
}

/// Tournament buy-in: first dollar amount in the hand header, or a yen
/// amount converted at the fixed rate.
fn buy_in(hand: &str) -> Option<f64> {
    if let Some(v) = currency_amount(hand, '$') {
        return Some(v);
    }
    currency_amount(hand, '¥').map(|v| v * YEN_TO_USD)
}

fn currency_amount(hand: &str, symbol: char) -> Option<f64> {
    let at = hand.find(symbol)?;
    let rest = &hand[at + symbol.len_utf8()..];
    let end = rest
        .find(|c: char| !c.is_ascii_digit() && c != '.')
        .unwrap_or(rest.len());
    rest[..end].parse().ok()
}

/// The comma-grouped integer immediately following `marker`.
fn number_after(hand: &str, marker: &str) -> Option<u64> {
    let at = hand.find(marker)?;
    let rest = &hand[at + marker.len()..];
    let end = rest
        .find(|c: char| !c.is_ascii_digit() && c != ',')
        .unwrap_or(rest.len());
    parse_chips(&rest[..end])
}

fn parse_chips(digits: &str) -> Option<u64> {
    let cleaned = digits.replace(',', "");
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse().ok()
}

/// Position of `marker` and the contents of the first `[..]` after it.
/// The marker may itself end with '[' (e.g. "Dealt to Hero [").
fn bracket_after<'a>(text: &'a str, marker: &str) -> Option<(usize, &'a str)> {
    let at = text.find(marker)?;
    let after = &text[at + marker.len()..];
    let start = if marker.ends_with('[') {
        0
    } else {
        after.find('[')? + 1
    };
    let inner = &after[start..];
    let close = inner.find(']')?;
    Some((at, &inner[..close]))
}

/// Like `bracket_after` but skips one bracket group: turn lines repeat the
/// flop in the first group and carry the new card in the second.
fn second_bracket_after<'a>(text: &'a str, marker: &str) -> Option<(usize, &'a str)> {
    let at = text.find(marker)?;
    let rest = &text[at + marker.len()..];
    let first_close = rest.find(']')?;
    let rest = &rest[first_close + 1..];
    let open = rest.find('[')?;
    let rest = &rest[open + 1..];
    let close = rest.find(']')?;
    Some((at, &rest[..close]))
}

fn count_ignore_case(text: &str, needle: &str) -> usize {
    text.to_ascii_lowercase().matches(needle).count()
}
