//! OCEAN personality traits, each clamped to `0..=10` (spec.md §3).

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Personality {
    pub openness: u8,
    pub conscientiousness: u8,
    pub extraversion: u8,
    pub agreeableness: u8,
    pub neuroticism: u8,
}

impl Personality {
    pub fn new(
        openness: u8,
        conscientiousness: u8,
        extraversion: u8,
        agreeableness: u8,
        neuroticism: u8,
    ) -> Self {
        Self {
            openness: openness.min(10),
            conscientiousness: conscientiousness.min(10),
            extraversion: extraversion.min(10),
            agreeableness: agreeableness.min(10),
            neuroticism: neuroticism.min(10),
        }
    }
}

impl Default for Personality {
    fn default() -> Self {
        Self::new(5, 5, 5, 5, 5)
    }
}
