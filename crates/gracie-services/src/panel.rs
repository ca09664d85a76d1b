//! Analysis panel: input selection, submission and progress state
//!
//! Mirrors the interactive panel without any UI: the host feeds it user
//! actions and progress ticks, and reads back the state to render.

use gracie_core::{GracieError, Result};
use std::path::Path;

use crate::analysis::AnalysisResult;
use crate::provider::{AnalysisInput, AnalysisProvider, ImageAttachment};
use crate::report::AnalysisReport;

/// Simulated progress step applied on each tick while a request is in flight
pub const PROGRESS_STEP: u8 = 10;
/// Simulated progress never passes this until the response arrives
pub const PROGRESS_CEILING: u8 = 90;
/// Interval between simulated progress ticks, in milliseconds
pub const PROGRESS_TICK_MS: u64 = 200;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputTab {
    #[default]
    Text,
    Image,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PanelStatus {
    #[default]
    Idle,
    Analyzing,
}

/// Inline alert shown under the inputs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelError {
    pub kind: &'static str,
    pub message: String,
}

impl From<&GracieError> for PanelError {
    fn from(err: &GracieError) -> Self {
        Self {
            kind: err.kind(),
            message: err.to_string(),
        }
    }
}

#[derive(Debug, Default)]
pub struct AnalysisPanel {
    tab: InputTab,
    text_input: String,
    selected_image: Option<ImageAttachment>,
    status: PanelStatus,
    progress: u8,
    result: Option<AnalysisResult>,
    error: Option<PanelError>,
}

impl AnalysisPanel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tab(&self) -> InputTab {
        self.tab
    }

    pub fn text_input(&self) -> &str {
        &self.text_input
    }

    pub fn selected_image(&self) -> Option<&ImageAttachment> {
        self.selected_image.as_ref()
    }

    pub fn status(&self) -> PanelStatus {
        self.status
    }

    pub fn is_analyzing(&self) -> bool {
        self.status == PanelStatus::Analyzing
    }

    pub fn progress(&self) -> u8 {
        self.progress
    }

    pub fn result(&self) -> Option<&AnalysisResult> {
        self.result.as_ref()
    }

    pub fn report(&self) -> Option<AnalysisReport> {
        self.result.as_ref().map(AnalysisReport::from_result)
    }

    pub fn error(&self) -> Option<&PanelError> {
        self.error.as_ref()
    }

    /// The analyse trigger is enabled whenever no request is in flight
    pub fn can_submit(&self) -> bool {
        !self.is_analyzing()
    }

    pub fn set_tab(&mut self, tab: InputTab) {
        self.tab = tab;
    }

    /// Edit the conversation text; locked while analysing or while an image is selected
    pub fn set_text(&mut self, text: impl Into<String>) -> bool {
        if self.is_analyzing() || self.selected_image.is_some() {
            return false;
        }
        self.text_input = text.into();
        true
    }

    /// Accept or reject a candidate image. Accepting clears the text input.
    pub fn select_image(&mut self, candidate: Result<ImageAttachment>) -> bool {
        if self.is_analyzing() {
            return false;
        }
        match candidate {
            Ok(image) => {
                tracing::debug!(
                    file = %image.file_name,
                    mime = image.mime_type(),
                    "image selected"
                );
                self.selected_image = Some(image);
                self.text_input.clear();
                self.error = None;
                true
            }
            Err(err) => {
                self.error = Some(PanelError::from(&err));
                false
            }
        }
    }

    pub fn select_file(&mut self, path: &Path) -> bool {
        self.select_image(ImageAttachment::from_path(path))
    }

    pub fn clear_file(&mut self) {
        if !self.is_analyzing() {
            self.selected_image = None;
        }
    }

    /// Validate inputs and enter the analysing state.
    ///
    /// A selected image takes precedence over text. Missing input leaves the
    /// panel idle with an inline error; a request already in flight is refused
    /// without touching any state.
    pub fn begin(&mut self) -> Result<AnalysisInput> {
        if self.is_analyzing() {
            return Err(GracieError::AnalysisInProgress);
        }

        let input = match &self.selected_image {
            Some(image) => AnalysisInput::Image(image.clone()),
            None if !self.text_input.trim().is_empty() => {
                AnalysisInput::Text(self.text_input.clone())
            }
            None => {
                let err = GracieError::InputMissing;
                self.error = Some(PanelError::from(&err));
                return Err(err);
            }
        };

        self.status = PanelStatus::Analyzing;
        self.error = None;
        self.result = None;
        self.progress = 0;
        Ok(input)
    }

    /// Advance simulated progress; no effect when idle
    pub fn tick_progress(&mut self) -> u8 {
        if self.is_analyzing() {
            self.progress = (self.progress + PROGRESS_STEP).min(PROGRESS_CEILING);
        }
        self.progress
    }

    /// Record the outcome of the request begun by `begin`
    pub fn finish(&mut self, outcome: Result<AnalysisResult>) {
        if !self.is_analyzing() {
            return;
        }
        self.progress = 100;
        match outcome {
            Ok(result) => {
                self.result = Some(result);
            }
            Err(err) => {
                tracing::warn!(kind = err.kind(), error = %err, "analysis failed");
                self.error = Some(PanelError::from(&err));
            }
        }
        self.status = PanelStatus::Idle;
        self.progress = 0;
    }

    /// Run one full submission synchronously against `provider`.
    /// Returns true when a result is available afterwards.
    pub fn submit(&mut self, provider: &dyn AnalysisProvider) -> bool {
        let input = match self.begin() {
            Ok(input) => input,
            Err(_) => return false,
        };
        let outcome = provider.analyze(&input);
        self.finish(outcome);
        self.result.is_some()
    }
}
