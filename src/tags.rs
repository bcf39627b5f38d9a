use std::sync::Mutex;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

/// Tags every analysis starts with.
pub const BASE_TAGS: [&str; 2] = ["Digital Art", "Portfolio"];

/// Descriptive tags the random picks are drawn from.
pub const STYLE_VOCABULARY: [&str; 9] = [
    "Concept Art",
    "Illustration",
    "3D Render",
    "Character Design",
    "Environment",
    "Abstract",
    "Surrealism",
    "Cyberpunk",
    "Fantasy",
];

/// How many style tags are drawn per analysis.
pub const RANDOM_TAG_COUNT: usize = 3;

/// Below this average brightness an image is tagged dark.
pub const DARK_BELOW: f64 = 80.0;

/// Above this average brightness an image is tagged bright.
pub const BRIGHT_ABOVE: f64 = 180.0;

/// Coarse brightness class used to pick the mood tags.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BrightnessBand {
    Dark,
    Balanced,
    Bright,
}

impl BrightnessBand {
    /// Both thresholds are inclusive for `Balanced`. NaN is `Balanced` too.
    pub fn classify(brightness: f64) -> Self {
        if brightness < DARK_BELOW {
            BrightnessBand::Dark
        } else if brightness > BRIGHT_ABOVE {
            BrightnessBand::Bright
        } else {
            BrightnessBand::Balanced
        }
    }

    pub fn tags(self) -> [&'static str; 3] {
        match self {
            BrightnessBand::Dark => ["Dark", "Moody", "Night"],
            BrightnessBand::Bright => ["Bright", "Minimalist", "High Key"],
            BrightnessBand::Balanced => ["Vibrant", "Balanced", "Detailed"],
        }
    }
}

/// Source of the random style picks.
///
/// Implementations return `count` distinct entries of `vocabulary`.
pub trait TagSelector: Send + Sync {
    fn choose(&self, vocabulary: &[&'static str], count: usize) -> Vec<&'static str>;
}

fn shuffle_take<R: Rng + ?Sized>(
    rng: &mut R,
    vocabulary: &[&'static str],
    count: usize,
) -> Vec<&'static str> {
    let mut pool = vocabulary.to_vec();
    pool.shuffle(rng);
    pool.truncate(count);
    pool
}

/// Uniform picks from the thread-local generator.
#[derive(Clone, Copy, Debug, Default)]
pub struct RandomTagSelector;

impl TagSelector for RandomTagSelector {
    fn choose(&self, vocabulary: &[&'static str], count: usize) -> Vec<&'static str> {
        shuffle_take(&mut rand::rng(), vocabulary, count)
    }
}

/// Reproducible picks from a seeded generator.
#[derive(Debug)]
pub struct SeededTagSelector {
    rng: Mutex<StdRng>,
}

impl SeededTagSelector {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl TagSelector for SeededTagSelector {
    fn choose(&self, vocabulary: &[&'static str], count: usize) -> Vec<&'static str> {
        // a poisoned lock still holds a usable generator
        let mut rng = self.rng.lock().unwrap_or_else(|e| e.into_inner());
        shuffle_take(&mut *rng, vocabulary, count)
    }
}

/// Always picks the first `count` entries, in vocabulary order.
#[derive(Clone, Copy, Debug, Default)]
pub struct FixedTagSelector;

impl TagSelector for FixedTagSelector {
    fn choose(&self, vocabulary: &[&'static str], count: usize) -> Vec<&'static str> {
        vocabulary.iter().take(count).copied().collect()
    }
}

/// Builds the tag list: base tags, three mood tags for the brightness band,
/// then [`RANDOM_TAG_COUNT`] style tags from `selector`.
pub fn generate_tags(brightness: f64, selector: &dyn TagSelector) -> Vec<String> {
    BASE_TAGS
        .iter()
        .chain(BrightnessBand::classify(brightness).tags().iter())
        .copied()
        .chain(selector.choose(&STYLE_VOCABULARY, RANDOM_TAG_COUNT))
        .map(str::to_owned)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn band_thresholds_are_inclusive() {
        assert_eq!(BrightnessBand::classify(79.99), BrightnessBand::Dark);
        assert_eq!(BrightnessBand::classify(80.0), BrightnessBand::Balanced);
        assert_eq!(BrightnessBand::classify(180.0), BrightnessBand::Balanced);
        assert_eq!(BrightnessBand::classify(180.01), BrightnessBand::Bright);
        assert_eq!(BrightnessBand::classify(f64::NAN), BrightnessBand::Balanced);
    }

    #[test]
    fn fixed_selector_gives_exact_tags() {
        let tags = generate_tags(10.0, &FixedTagSelector);
        assert_eq!(
            tags,
            vec![
                "Digital Art",
                "Portfolio",
                "Dark",
                "Moody",
                "Night",
                "Concept Art",
                "Illustration",
                "3D Render",
            ]
        );
    }

    #[test]
    fn random_picks_are_distinct_vocabulary_entries() {
        let vocab: HashSet<_> = STYLE_VOCABULARY.iter().copied().collect();
        for _ in 0..200 {
            let tags = generate_tags(200.0, &RandomTagSelector);
            assert_eq!(tags.len(), 8);
            assert_eq!(&tags[2..5], &["Bright", "Minimalist", "High Key"]);
            let picks: HashSet<_> = tags[5..].iter().map(String::as_str).collect();
            assert_eq!(picks.len(), RANDOM_TAG_COUNT);
            assert!(picks.is_subset(&vocab));
        }
    }

    #[test]
    fn seeded_selectors_agree() {
        let a = SeededTagSelector::new(42);
        let b = SeededTagSelector::new(42);
        for _ in 0..5 {
            assert_eq!(
                a.choose(&STYLE_VOCABULARY, RANDOM_TAG_COUNT),
                b.choose(&STYLE_VOCABULARY, RANDOM_TAG_COUNT)
            );
        }
    }
}
