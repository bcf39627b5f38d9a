use tokio::sync::watch;
use tracing::{info, warn};

use crate::analysis::{AnalysisResult, analyze_resource};
use crate::config::AnalyzerConfig;
use crate::error::{AnalyzeError, ErrorKind, LoadError};
use crate::loader::{ImageLoader, UrlImageLoader};
use crate::tags::{RandomTagSelector, TagSelector};

/// Lifecycle of an analysis request as observed by a caller.
#[derive(Clone, Debug, PartialEq)]
pub enum AnalyzerState {
    Idle,
    Loading,
    Succeeded(AnalysisResult),
    Failed(ErrorKind),
}

impl AnalyzerState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, AnalyzerState::Succeeded(_) | AnalyzerState::Failed(_))
    }
}

/// Loads an image by URL and runs the palette and tag analysis on it.
///
/// Every call to [`Analyzer::analyze`] is an independent pass with its own
/// buffers, so calls may overlap. The published [`AnalyzerState`] follows the
/// latest transition of whichever call made it. There are no retries: a
/// failed request stays failed until the caller submits a new one.
pub struct Analyzer<L> {
    loader: L,
    selector: Box<dyn TagSelector>,
    config: AnalyzerConfig,
    state: watch::Sender<AnalyzerState>,
}

impl Analyzer<UrlImageLoader> {
    /// Analyzer backed by [`UrlImageLoader`] and random style tags.
    pub fn from_config(config: AnalyzerConfig) -> Result<Self, LoadError> {
        let loader = UrlImageLoader::new(&config)?;
        Ok(Self::new(loader, RandomTagSelector, config))
    }
}

impl<L: ImageLoader> Analyzer<L> {
    pub fn new(loader: L, selector: impl TagSelector + 'static, config: AnalyzerConfig) -> Self {
        let (state, _) = watch::channel(AnalyzerState::Idle);
        Self {
            loader,
            selector: Box::new(selector),
            config,
            state,
        }
    }

    pub fn loader(&self) -> &L {
        &self.loader
    }

    /// Snapshot of the latest published state.
    pub fn state(&self) -> AnalyzerState {
        self.state.borrow().clone()
    }

    /// Receiver that observes every subsequent state transition.
    pub fn subscribe(&self) -> watch::Receiver<AnalyzerState> {
        self.state.subscribe()
    }

    fn publish(&self, state: AnalyzerState) {
        self.state.send_replace(state);
    }

    fn fail(&self, err: AnalyzeError) -> AnalyzeError {
        warn!(kind = %err.kind(), "analysis failed: {err}");
        self.publish(AnalyzerState::Failed(err.kind()));
        err
    }

    /// Analyzes the image at `url`.
    ///
    /// An empty `url` fails with [`AnalyzeError::MissingInput`] right away,
    /// without touching the loader. Anything else, whitespace included, is
    /// handed to the loader as is.
    pub async fn analyze(&self, url: &str) -> Result<AnalysisResult, AnalyzeError> {
        if url.is_empty() {
            return Err(self.fail(AnalyzeError::MissingInput));
        }

        info!(%url, "analyzing artwork");
        self.publish(AnalyzerState::Loading);

        let resource = match self.loader.load(url).await {
            Ok(resource) => resource,
            Err(e) => return Err(self.fail(AnalyzeError::from(e))),
        };

        let result = analyze_resource(&resource, self.selector.as_ref());

        if !self.config.processing_delay.is_zero() {
            tokio::time::sleep(self.config.processing_delay).await;
        }

        info!(
            %url,
            width = resource.width(),
            height = resource.height(),
            palette = ?result.color_palette,
            tags = ?result.tags,
            "analysis complete"
        );
        self.publish(AnalyzerState::Succeeded(result.clone()));
        Ok(result)
    }
}
