//! The canned reply set

use rand::Rng;

/// Every reply the assistant can give, in the product's voice
pub const CANNED_REPLIES: [&str; 4] = [
    "今日大市氣氛幾好，恒指升咗超過1%，可以考慮下藍籌股，不過都要留意成交額！",
    "你講得啱！最近科技股表現唔錯，騰訊同美團都有升幅，可以留意下。",
    "利是錢可以考慮做定期或者買基金，唔好淨係放喺床底啦！Net仔建議你可以分散投資。",
    "健康最重要！今日行咗6000幾步，繼續努力！記住每日要飲8杯水呀！",
];

/// Pick one reply uniformly at random
pub fn pick<R: Rng + ?Sized>(rng: &mut R) -> &'static str {
    CANNED_REPLIES[rng.random_range(0..CANNED_REPLIES.len())]
}

/// Check whether a string is one of the canned replies
pub fn is_canned(text: &str) -> bool {
    CANNED_REPLIES.iter().any(|r| *r == text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_pick_is_always_canned() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..64 {
            assert!(is_canned(pick(&mut rng)));
        }
    }

    #[test]
    fn test_every_reply_is_reachable() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut seen = std::collections::HashSet::new();
        for _ in 0..256 {
            seen.insert(pick(&mut rng));
        }
        assert_eq!(seen.len(), CANNED_REPLIES.len());
    }

    #[test]
    fn test_is_canned_rejects_other_text() {
        assert!(!is_canned("hello"));
        assert!(!is_canned(""));
    }
}
