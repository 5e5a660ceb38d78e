//! Trick comparison: which card takes a trick given trump and the led suit.

use super::cards_types::{Card, Suit};
use super::deck::RankTable;

/// True when `challenger` beats `incumbent`, with `incumbent` having been
/// played first. Trump beats non-trump; within trump or within the led suit
/// a strictly higher value weight wins; an identical copy never wins.
pub fn card_beats(challenger: Card, incumbent: Card, led: Suit, ranks: &RankTable) -> bool {
    if challenger == incumbent {
        return false;
    }
    let trump = ranks.trump();
    let challenger_trump = Some(challenger.suit) == trump;
    let incumbent_trump = Some(incumbent.suit) == trump;
    match (challenger_trump, incumbent_trump) {
        (true, false) => true,
        (false, true) => false,
        (true, true) => ranks.value_weight(challenger.value) > ranks.value_weight(incumbent.value),
        (false, false) => {
            let challenger_follows = challenger.suit == led;
            let incumbent_follows = incumbent.suit == led;
            match (challenger_follows, incumbent_follows) {
                (true, false) => true,
                (false, true) => false,
                (true, true) => {
                    ranks.value_weight(challenger.value) > ranks.value_weight(incumbent.value)
                }
                (false, false) => false,
            }
        }
    }
}

/// Index into `plays` of the card that takes the trick.
///
/// The first card sets the led suit. A trump card takes the lead from any
/// non-trump card (and the lead suit becomes trump); otherwise a card must
/// follow the current lead with a strictly higher value weight to take over.
/// Ties between identical copies resolve to the earlier play.
pub fn winning_index(plays: &[Card], ranks: &RankTable) -> Option<usize> {
    let first = *plays.first()?;
    let trump = ranks.trump();

    let mut win_idx = 0;
    let mut winning = first;
    let mut lead = first.suit;

    for (idx, card) in plays.iter().copied().enumerate().skip(1) {
        if card == winning {
            continue;
        }
        if Some(card.suit) == trump && Some(winning.suit) != trump {
            winning = card;
            win_idx = idx;
            lead = card.suit;
            continue;
        }
        if card.suit == lead && ranks.value_weight(card.value) > ranks.value_weight(winning.value) {
            winning = card;
            win_idx = idx;
        }
    }

    Some(win_idx)
}
