use core::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::domain::card::Card;

/// Категория покерной руки по силе.
///
/// Числовое значение — "rank" категории: 10 = royal flush … 1 = high card,
/// 0 = неполная рука (меньше пяти карт).
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum HandCategory {
    Incomplete = 0,
    HighCard = 1,
    OnePair = 2,
    TwoPair = 3,
    ThreeOfAKind = 4,
    Straight = 5,
    Flush = 6,
    FullHouse = 7,
    FourOfAKind = 8,
    StraightFlush = 9,
    RoyalFlush = 10,
}

impl HandCategory {
    pub const fn rank(self) -> u8 {
        self as u8
    }
}

/// Оценка руки: категория, основное значение и кикеры (по убыванию).
///
/// Сравнение: категория → value → кикеры поэлементно,
/// недостающий кикер считается нулём.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct HandValue {
    pub category: HandCategory,
    /// Старшая значимая карта (ранг каре/сета/пары, верх стрита; wheel = 5).
    pub value: u8,
    pub kickers: Vec<u8>,
    /// Пять карт, из которых собрана рука (пусто для неполной).
    pub cards: Vec<Card>,
}

impl HandValue {
    pub fn new(category: HandCategory, value: u8, kickers: Vec<u8>, cards: Vec<Card>) -> Self {
        Self {
            category,
            value,
            kickers,
            cards,
        }
    }

    /// Маркер "руку оценить нельзя" — ниже любой настоящей руки.
    pub fn incomplete() -> Self {
        Self::new(HandCategory::Incomplete, 0, Vec::new(), Vec::new())
    }

    pub fn rank(&self) -> u8 {
        self.category.rank()
    }

    pub fn is_complete(&self) -> bool {
        self.category != HandCategory::Incomplete
    }

    /// Сравнение только по силе (карты руки не учитываются).
    pub fn compare(&self, other: &HandValue) -> Ordering {
        self.category
            .cmp(&other.category)
            .then_with(|| self.value.cmp(&other.value))
            .then_with(|| compare_kickers(&self.kickers, &other.kickers))
    }
}

fn compare_kickers(a: &[u8], b: &[u8]) -> Ordering {
    let len = a.len().max(b.len());
    for i in 0..len {
        let x = a.get(i).copied().unwrap_or(0);
        let y = b.get(i).copied().unwrap_or(0);
        match x.cmp(&y) {
            Ordering::Equal => continue,
            other => return other,
        }
    }
    Ordering::Equal
}

/// Равенство по силе: одинаковые руки из разных мастей равны.
impl PartialEq for HandValue {
    fn eq(&self, other: &Self) -> bool {
        self.compare(other) == Ordering::Equal
    }
}

impl Eq for HandValue {}

impl PartialOrd for HandValue {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for HandValue {
    fn cmp(&self, other: &Self) -> Ordering {
        self.compare(other)
    }
}

/// Человеческое описание руки.
pub fn describe_hand(hand: &HandValue) -> String {
    let name = value_name(hand.value);
    let names = plural(hand.value);
    match hand.category {
        HandCategory::Incomplete => "Incomplete hand".to_string(),
        HandCategory::HighCard => format!("High card, {name}"),
        HandCategory::OnePair => format!("One pair, {names}"),
        HandCategory::TwoPair => {
            let low = hand.kickers.first().copied().map(plural).unwrap_or_default();
            format!("Two pair, {names} and {low}")
        }
        HandCategory::ThreeOfAKind => format!("Three of a kind, {names}"),
        HandCategory::Straight => format!("Straight, {name} high"),
        HandCategory::Flush => format!("Flush, {name} high"),
        HandCategory::FullHouse => {
            let pair = hand.kickers.first().copied().map(plural).unwrap_or_default();
            format!("Full house, {names} over {pair}")
        }
        HandCategory::FourOfAKind => format!("Four of a kind, {names}"),
        HandCategory::StraightFlush => format!("Straight flush, {name} high"),
        HandCategory::RoyalFlush => "Royal flush".to_string(),
    }
}

fn value_name(v: u8) -> &'static str {
    match v {
        2 => "Two",
        3 => "Three",
        4 => "Four",
        5 => "Five",
        6 => "Six",
        7 => "Seven",
        8 => "Eight",
        9 => "Nine",
        10 => "Ten",
        11 => "Jack",
        12 => "Queen",
        13 => "King",
        14 => "Ace",
        _ => "?",
    }
}

fn plural(v: u8) -> String {
    match v {
        6 => "Sixes".to_string(),
        _ => format!("{}s", value_name(v)),
    }
}
