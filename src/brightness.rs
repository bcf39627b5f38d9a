use crate::sampler::ColorSample;

/// Running channel sums over the sampled pixels.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrightnessAccumulator {
    red: u64,
    green: u64,
    blue: u64,
}

impl BrightnessAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, sample: ColorSample) {
        self.red += sample.red as u64;
        self.green += sample.green as u64;
        self.blue += sample.blue as u64;
    }

    pub fn sum(&self) -> u64 {
        self.red + self.green + self.blue
    }

    /// Average brightness normalized by the **whole** buffer, not by the
    /// number of samples: `sum / (buffer_len / 4 * 3)`.
    ///
    /// Strided and transparent pixels count toward the denominator, so the
    /// result runs low on large or translucent images. An empty buffer gives
    /// NaN.
    pub fn average(&self, buffer_len: usize) -> f64 {
        let channels = (buffer_len / 4 * 3) as f64;
        self.sum() as f64 / channels
    }
}
