use std::collections::HashMap;
use std::str::FromStr;

use palette::Srgb;

use crate::sampler::ColorSample;

/// Width of a quantization step, per channel.
pub const BUCKET_STEP: u16 = 20;

/// Number of palette entries kept after ranking.
pub const PALETTE_SIZE: usize = 5;

/// A coarse color bucket. Every channel is a multiple of [`BUCKET_STEP`].
///
/// Rounding is half-up, so bright channels land on 260, which is outside
/// 8-bit range. That value is kept as is and bleeds into the neighbouring
/// digit when formatted with [`BucketKey::to_hex`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct BucketKey {
    pub red: u16,
    pub green: u16,
    pub blue: u16,
}

#[inline(always)]
fn round_to_step(c: u8) -> u16 {
    (c as u16 + BUCKET_STEP / 2) / BUCKET_STEP * BUCKET_STEP
}

impl BucketKey {
    pub fn from_sample(sample: ColorSample) -> Self {
        Self {
            red: round_to_step(sample.red),
            green: round_to_step(sample.green),
            blue: round_to_step(sample.blue),
        }
    }

    /// Formats the key as `#RRGGBB`, uppercase.
    ///
    /// Computes `(1 << 24) + (r << 16) + (g << 8) + b` and drops the leading
    /// hex digit of the result. No channel is clamped.
    pub fn to_hex(&self) -> String {
        let packed = (1u32 << 24)
            + ((self.red as u32) << 16)
            + ((self.green as u32) << 8)
            + self.blue as u32;
        let digits = format!("{packed:X}");
        format!("#{}", &digits[1..])
    }

    /// Parses a `#RRGGBB` string back into a key.
    ///
    /// Returns `None` for anything but the 7-character `#RRGGBB` form, or when
    /// a channel is not on a bucket boundary.
    pub fn from_hex(hex: &str) -> Option<Self> {
        if hex.len() != 7 || !hex.starts_with('#') {
            return None;
        }
        let rgb = Srgb::<u8>::from_str(hex).ok()?;
        let key = Self {
            red: rgb.red as u16,
            green: rgb.green as u16,
            blue: rgb.blue as u16,
        };
        let on_step = |c: u16| c % BUCKET_STEP == 0;
        (on_step(key.red) && on_step(key.green) && on_step(key.blue)).then_some(key)
    }
}

/// Frequency table of [`BucketKey`]s, ranked by occurrence.
#[derive(Debug, Default)]
pub struct ColorQuantizer {
    index: HashMap<BucketKey, usize>,
    // first-encounter order, used to break ties when ranking
    buckets: Vec<(BucketKey, usize)>,
    total: usize,
}

impl ColorQuantizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, sample: ColorSample) {
        let key = BucketKey::from_sample(sample);
        match self.index.get(&key) {
            Some(&slot) => self.buckets[slot].1 += 1,
            None => {
                self.index.insert(key, self.buckets.len());
                self.buckets.push((key, 1));
            }
        }
        self.total += 1;
    }

    /// Number of samples pushed.
    pub fn total(&self) -> usize {
        self.total
    }

    /// Number of distinct buckets seen.
    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    /// All buckets by descending count; ties keep first-encounter order.
    pub fn ranked(&self) -> Vec<(BucketKey, usize)> {
        let mut ranked = self.buckets.clone();
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked
    }

    /// The `limit` most frequent buckets as hex strings.
    pub fn palette(&self, limit: usize) -> Vec<String> {
        self.ranked()
            .into_iter()
            .take(limit)
            .map(|(key, _)| key.to_hex())
            .collect()
    }
}

impl Extend<ColorSample> for ColorQuantizer {
    fn extend<I: IntoIterator<Item = ColorSample>>(&mut self, iter: I) {
        for sample in iter {
            self.push(sample);
        }
    }
}
