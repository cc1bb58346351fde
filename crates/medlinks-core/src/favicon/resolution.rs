//! Per-card icon race
//!
//! One `FaviconResolution` per rendered card. The image load, the load
//! error and the timer all feed events in; only the first decisive event
//! produces an outcome, later ones are ignored.

use super::FaviconResolver;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallbackReason {
    /// No domain, so no remote icon was requested
    NoSource,
    Timeout,
    LoadError,
    /// Loaded, but too small or a service placeholder
    Unusable,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FaviconState {
    /// Remote icon requested, gradient shown optimistically
    #[default]
    Pending,
    /// Remote icon accepted
    Loaded,
    /// Glyph drawn over the gradient
    Fallback(FallbackReason),
}

/// Transition produced exactly once per card. The caller must cancel the
/// pending timer whenever it receives one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaviconOutcome {
    ShowImage,
    ShowFallback(FallbackReason),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FaviconResolution {
    state: FaviconState,
}

impl FaviconResolution {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> FaviconState {
        self.state
    }

    pub fn is_settled(&self) -> bool {
        self.state != FaviconState::Pending
    }

    pub fn shows_fallback(&self) -> bool {
        matches!(self.state, FaviconState::Fallback(_))
    }

    fn settle(&mut self, outcome: FaviconOutcome) -> Option<FaviconOutcome> {
        if self.is_settled() {
            return None;
        }
        self.state = match outcome {
            FaviconOutcome::ShowImage => FaviconState::Loaded,
            FaviconOutcome::ShowFallback(reason) => {
                log::debug!("[FAVICON] Fallback: {:?}", reason);
                FaviconState::Fallback(reason)
            }
        };
        Some(outcome)
    }

    pub fn on_no_source(&mut self) -> Option<FaviconOutcome> {
        self.settle(FaviconOutcome::ShowFallback(FallbackReason::NoSource))
    }

    pub fn on_timeout(&mut self) -> Option<FaviconOutcome> {
        self.settle(FaviconOutcome::ShowFallback(FallbackReason::Timeout))
    }

    pub fn on_error(&mut self) -> Option<FaviconOutcome> {
        self.settle(FaviconOutcome::ShowFallback(FallbackReason::LoadError))
    }

    /// Image finished loading with the given intrinsic width and final URL
    pub fn on_load(
        &mut self,
        resolver: &FaviconResolver,
        natural_width: u32,
        resolved_src: &str,
    ) -> Option<FaviconOutcome> {
        if resolver.is_unusable(natural_width, resolved_src) {
            self.settle(FaviconOutcome::ShowFallback(FallbackReason::Unusable))
        } else {
            self.settle(FaviconOutcome::ShowImage)
        }
    }
}
