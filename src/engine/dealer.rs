use crate::domain::{Card, Deck};
use crate::engine::errors::EngineError;
use crate::engine::RandomSource;

/// Сдать `count` карт из колоды без `used`.
///
/// Остаток колоды перемешивается целиком (Fisher–Yates через RNG),
/// берутся первые `count` карт.
pub fn deal_excluding<R: RandomSource>(
    used: &[Card],
    count: usize,
    rng: &mut R,
) -> Result<Vec<Card>, EngineError> {
    let mut deck = Deck::without(used);
    if deck.len() < count {
        return Err(EngineError::DeckExhausted(count));
    }
    rng.shuffle(&mut deck.cards);
    Ok(deck.take_front(count))
}

/// Проверить карты, введённые руками: ни одной из `used`, без повторов внутри.
pub fn ensure_available(used: &[Card], requested: &[Card]) -> Result<(), EngineError> {
    for (idx, card) in requested.iter().enumerate() {
        if used.contains(card) || requested[..idx].contains(card) {
            return Err(EngineError::DuplicateCard(*card));
        }
    }
    Ok(())
}
