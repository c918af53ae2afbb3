//! Dashboard card records
//!
//! The dashboard renders a fixed deck of sample cards. Cards are display
//! records only: built once, never mutated, never persisted.

/// Category of a dashboard card
///
/// Only `Voice` carries behaviour (it opens the voice modal); every other
/// category is inert in this snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardKind {
    Finance,
    Life,
    Health,
    Voice,
    Retirement,
}

impl CardKind {
    /// Glyph shown in the card's art slot
    pub fn glyph(&self) -> &'static str {
        match self {
            CardKind::Finance => "📈",
            CardKind::Life => "🧧",
            CardKind::Health => "💪",
            CardKind::Voice => "🔊",
            CardKind::Retirement => "⏳",
        }
    }
}

/// Cosmetic market-mood tag driving badge colors only
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mood {
    Hot,
    Warm,
    Cool,
    Cold,
}

impl Mood {
    /// Badge label for this mood
    pub fn label(&self) -> &'static str {
        match self {
            Mood::Hot => "🔥 升溫",
            Mood::Warm => "☀️ 觀望",
            Mood::Cool => "❄️ 冷靜",
            Mood::Cold => "🧊 淡靜",
        }
    }
}

/// One dashboard tile
#[derive(Debug, Clone)]
pub struct Card {
    /// Unique identifier within the deck
    pub id: &'static str,
    pub kind: CardKind,
    pub title: &'static str,
    pub subtitle: &'static str,
    /// Headline figure, if the card carries one
    pub value: Option<&'static str>,
    /// Change string next to the value; a leading '+' renders positive
    pub change: Option<&'static str>,
    pub mood: Option<Mood>,
    /// Art asset path; assets ship separately, the UI paints a placeholder
    pub image: &'static str,
    /// Float-animation stagger in seconds
    pub delay: f32,
}

/// The fixed sample deck shown on the dashboard
pub fn sample_deck() -> Vec<Card> {
    vec![
        Card {
            id: "1",
            kind: CardKind::Finance,
            title: "恒生指數",
            subtitle: "HSI",
            value: Some("18,432"),
            change: Some("+1.25%"),
            mood: Some(Mood::Hot),
            image: "assets/images/finance-card.png",
            delay: 0.0,
        },
        Card {
            id: "2",
            kind: CardKind::Finance,
            title: "騰訊控股",
            subtitle: "0700.HK",
            value: Some("388.40"),
            change: Some("+2.18%"),
            mood: Some(Mood::Warm),
            image: "assets/images/finance-card.png",
            delay: 0.5,
        },
        Card {
            id: "3",
            kind: CardKind::Life,
            title: "利是錢部署",
            subtitle: "今年收咗幾多？",
            value: None,
            change: None,
            mood: None,
            image: "assets/images/life-card.png",
            delay: 1.0,
        },
        Card {
            id: "4",
            kind: CardKind::Health,
            title: "健康指數",
            subtitle: "今日運動量",
            value: Some("6,432"),
            change: Some("步"),
            mood: Some(Mood::Cool),
            image: "assets/images/health-card.png",
            delay: 1.5,
        },
        Card {
            id: "5",
            kind: CardKind::Voice,
            title: "Net仔話你知",
            subtitle: "今日大市點睇？",
            value: None,
            change: None,
            mood: None,
            image: "assets/images/voice-card.png",
            delay: 2.0,
        },
        Card {
            id: "6",
            kind: CardKind::Retirement,
            title: "退休倒計時",
            subtitle: "距離65歲",
            value: Some("11,232"),
            change: Some("日"),
            mood: None,
            image: "assets/images/retirement-card.png",
            delay: 2.5,
        },
    ]
}

/// Quick-action pills under the card grid (inert in this snapshot)
pub const QUICK_ACTIONS: [&str; 5] = [
    "📊 大市概覽",
    "💰 MPF計算機",
    "📈 美股報價",
    "🏠 樓市資訊",
    "💱 匯率轉換",
];

/// Check the deck invariant: every card id appears exactly once
pub fn ids_are_unique(cards: &[Card]) -> bool {
    let mut seen = std::collections::HashSet::new();
    cards.iter().all(|card| seen.insert(card.id))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deck_has_six_cards() {
        assert_eq!(sample_deck().len(), 6);
    }

    #[test]
    fn test_deck_ids_are_unique() {
        assert!(ids_are_unique(&sample_deck()));
    }

    #[test]
    fn test_duplicate_ids_are_detected() {
        let mut deck = sample_deck();
        deck[1].id = deck[0].id;
        assert!(!ids_are_unique(&deck));
    }

    #[test]
    fn test_deck_has_exactly_one_voice_card() {
        let deck = sample_deck();
        let voice_cards: Vec<_> = deck
            .iter()
            .filter(|c| c.kind == CardKind::Voice)
            .collect();
        assert_eq!(voice_cards.len(), 1);
        assert_eq!(voice_cards[0].title, "Net仔話你知");
    }

    #[test]
    fn test_value_and_change_pair_up() {
        for card in sample_deck() {
            if card.change.is_some() {
                assert!(card.value.is_some(), "card {} has change without value", card.id);
            }
        }
    }

    #[test]
    fn test_mood_labels() {
        assert_eq!(Mood::Hot.label(), "🔥 升溫");
        assert_eq!(Mood::Cold.label(), "🧊 淡靜");
    }
}
