//! Dominant-color palette and descriptive tags for artwork images.
//!
//! The core is a single synchronous pass over an RGBA buffer:
//!
//! 1. [`sampler`] walks every 10th pixel and drops translucent ones.
//! 2. [`quantize`] buckets the samples and ranks the buckets by frequency.
//! 3. [`brightness`] averages the sampled channels over the whole image.
//! 4. [`tags`] turns the brightness into mood tags plus random style tags.
//!
//! On native targets [`analyzer::Analyzer`] wraps the pass behind an async,
//! URL-driven façade. In the browser the [`wasm`] bindings take the canvas
//! pixels directly.

pub mod analysis;
pub mod brightness;
pub mod config;
pub mod error;
pub mod quantize;
pub mod resource;
pub mod sampler;
pub mod tags;
pub mod wasm;

#[cfg(not(target_arch = "wasm32"))]
pub mod analyzer;
#[cfg(not(target_arch = "wasm32"))]
pub mod loader;

pub use analysis::{AnalysisResult, PaletteStats, analyze_resource, palette_stats};
pub use config::AnalyzerConfig;
pub use error::{AnalyzeError, ErrorKind, LoadError, ResourceError};
pub use resource::ImageResource;
pub use tags::{FixedTagSelector, RandomTagSelector, SeededTagSelector, TagSelector};

#[cfg(not(target_arch = "wasm32"))]
pub use analyzer::{Analyzer, AnalyzerState};
#[cfg(not(target_arch = "wasm32"))]
pub use loader::{ImageLoader, UrlImageLoader};
