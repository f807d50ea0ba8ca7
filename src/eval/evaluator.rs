use crate::domain::card::{Card, Suit};

use super::hand_rank::{HandCategory, HandValue};
use super::lookup_tables::{detect_straight, rank_to_bit, RankMask};

/// Главная функция: лучшая 5-карточная рука из hole + board.
///
/// Обычно это 2 карманные + 0–5 общих. Если в сумме карт меньше пяти,
/// возвращается `HandValue::incomplete()` — она проигрывает любой реальной руке.
pub fn evaluate_hand(hole: &[Card], board: &[Card]) -> HandValue {
    let mut all_cards = Vec::with_capacity(hole.len() + board.len());
    all_cards.extend_from_slice(hole);
    all_cards.extend_from_slice(board);

    if all_cards.len() < 5 {
        return HandValue::incomplete();
    }

    best_of_all_5card_combinations(&all_cards)
}

/// Перебираем все комбинации 5 карт из N (для холдема N ≤ 7, т.е. ≤ 21 комбинация).
fn best_of_all_5card_combinations(cards: &[Card]) -> HandValue {
    let n = cards.len();
    let mut best = HandValue::incomplete();

    for a in 0..(n - 4) {
        for b in (a + 1)..(n - 3) {
            for c in (b + 1)..(n - 2) {
                for d in (c + 1)..(n - 1) {
                    for e in (d + 1)..n {
                        let five = [cards[a], cards[b], cards[c], cards[d], cards[e]];
                        let hand = evaluate_5card_hand(&five);
                        if hand > best {
                            best = hand;
                        }
                    }
                }
            }
        }
    }

    best
}

/// Оценка строго 5-карточной комбинации.
pub fn evaluate_5card_hand(cards: &[Card; 5]) -> HandValue {
    let mut suit_counts = [0u8; 4];
    // Индексы 2..14 по значению карты.
    let mut value_counts = [0u8; 15];
    let mut rank_mask: RankMask = 0;

    for card in cards.iter() {
        let suit_idx = match card.suit {
            Suit::Hearts => 0,
            Suit::Diamonds => 1,
            Suit::Clubs => 2,
            Suit::Spades => 3,
        };
        suit_counts[suit_idx] += 1;
        value_counts[card.value() as usize] += 1;
        rank_mask |= rank_to_bit(card.rank);
    }

    let is_flush = suit_counts.iter().any(|&c| c == 5);
    let straight_high = detect_straight(rank_mask);

    // Группы (value, count): сначала по количеству, затем по значению, по убыванию.
    let mut groups: Vec<(u8, u8)> = (2u8..=14)
        .rev()
        .filter(|&v| value_counts[v as usize] > 0)
        .map(|v| (v, value_counts[v as usize]))
        .collect();
    groups.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| b.0.cmp(&a.0)));

    // Например [4,1], [3,2], [3,1,1], [2,2,1], [2,1,1,1], [1,1,1,1,1].
    let pattern: Vec<u8> = groups.iter().map(|&(_, count)| count).collect();
    let values: Vec<u8> = groups.iter().map(|&(value, _)| value).collect();

    let mut sorted = cards.to_vec();
    sorted.sort_by(|a, b| b.rank.cmp(&a.rank));
    let used = sorted.clone();

    if is_flush {
        if let Some(high) = straight_high {
            let category = if high == 14 {
                HandCategory::RoyalFlush
            } else {
                HandCategory::StraightFlush
            };
            return HandValue::new(category, high, Vec::new(), used);
        }
    }

    match pattern.as_slice() {
        [4, 1] => {
            return HandValue::new(HandCategory::FourOfAKind, values[0], vec![values[1]], used);
        }
        [3, 2] => {
            return HandValue::new(HandCategory::FullHouse, values[0], vec![values[1]], used);
        }
        _ => {}
    }

    if is_flush {
        let desc: Vec<u8> = sorted.iter().map(Card::value).collect();
        return HandValue::new(HandCategory::Flush, desc[0], desc[1..].to_vec(), used);
    }

    if let Some(high) = straight_high {
        return HandValue::new(HandCategory::Straight, high, Vec::new(), used);
    }

    match pattern.as_slice() {
        [3, 1, 1] => HandValue::new(HandCategory::ThreeOfAKind, values[0], values[1..].to_vec(), used),
        [2, 2, 1] => HandValue::new(HandCategory::TwoPair, values[0], values[1..].to_vec(), used),
        [2, 1, 1, 1] => HandValue::new(HandCategory::OnePair, values[0], values[1..].to_vec(), used),
        // 1+1+1+1+1: просто топ-5 значений по убыванию.
        _ => HandValue::new(HandCategory::HighCard, values[0], values[1..].to_vec(), used),
    }
}
