use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::brightness::BrightnessAccumulator;
use crate::quantize::{ColorQuantizer, PALETTE_SIZE};
use crate::resource::ImageResource;
use crate::sampler::PixelSampler;
use crate::tags::{TagSelector, generate_tags};

/// Caller-facing outcome of an analysis.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub tags: Vec<String>,
    pub color_palette: Vec<String>,
}

/// Statistics of one sampling pass, before tags are attached.
#[derive(Clone, Debug, PartialEq)]
pub struct PaletteStats {
    pub palette: Vec<String>,
    pub brightness: f64,
    /// Opaque samples fed to the quantizer.
    pub samples: usize,
    /// Strided offsets walked, opaque or not.
    pub visited: usize,
}

/// Runs sampling, quantization and brightness in a single pass.
pub fn palette_stats(data: &[u8]) -> PaletteStats {
    let mut sampler = PixelSampler::from_raw(data);
    let mut quantizer = ColorQuantizer::new();
    let mut brightness = BrightnessAccumulator::new();

    for sample in sampler.by_ref() {
        brightness.push(sample);
        quantizer.push(sample);
    }

    let stats = PaletteStats {
        palette: quantizer.palette(PALETTE_SIZE),
        brightness: brightness.average(data.len()),
        samples: quantizer.total(),
        visited: sampler.visited(),
    };
    debug!(
        visited = stats.visited,
        samples = stats.samples,
        buckets = quantizer.bucket_count(),
        brightness = stats.brightness,
        "sampled image"
    );
    stats
}

/// Full synchronous analysis of an already decoded image.
pub fn analyze_resource(resource: &ImageResource, selector: &dyn TagSelector) -> AnalysisResult {
    let stats = palette_stats(resource.as_raw());
    AnalysisResult {
        tags: generate_tags(stats.brightness, selector),
        color_palette: stats.palette,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tags::FixedTagSelector;
    use image::{Rgba, RgbaImage};

    #[test]
    fn solid_red_overflows_and_reads_dark() {
        let res = ImageResource::from(RgbaImage::from_pixel(10, 10, Rgba([255, 0, 0, 255])));
        let stats = palette_stats(res.as_raw());
        assert_eq!(stats.visited, 10);
        assert_eq!(stats.samples, 10);
        assert_eq!(stats.palette, vec!["#040000"]);
        // 10 samples * 255 over 100 pixels * 3 channels
        assert_eq!(stats.brightness, 8.5);

        let result = analyze_resource(&res, &FixedTagSelector);
        assert_eq!(&result.tags[2..5], &["Dark", "Moody", "Night"]);
    }

    #[test]
    fn transparent_image_has_empty_palette() {
        let res = ImageResource::from(RgbaImage::from_pixel(20, 20, Rgba([200, 200, 200, 0])));
        let result = analyze_resource(&res, &FixedTagSelector);
        assert!(result.color_palette.is_empty());
        assert_eq!(result.tags.len(), 8);
    }

    #[test]
    fn serializes_with_camel_case_palette() {
        let result = AnalysisResult {
            tags: vec!["Digital Art".into()],
            color_palette: vec!["#000000".into()],
        };
        let json = serde_json::to_string(&result).unwrap();
        assert_eq!(json, r##"{"tags":["Digital Art"],"colorPalette":["#000000"]}"##);
    }
}
