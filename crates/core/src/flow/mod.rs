//! Client-side conversion flow.
//!
//! Drives a single conversion through
//! `idle -> ready -> converting -> completed | failed`, exposing a simulated
//! progress sequence. The flow is a cloneable handle so that UI actions
//! (tab changes, resets) can interleave with an in-flight conversion: every
//! reset bumps a generation counter, and a running conversion that finds the
//! generation changed abandons its work without touching state.

mod types;

pub use types::{
    ConversionOutput, FlowBackend, FlowConfig, FlowError, FlowSnapshot, FlowState,
    CONVERSION_FAILED_MESSAGE, MISSING_INPUT_NOTICE,
};

use chrono::{SecondsFormat, Utc};
use std::sync::Arc;
use tokio::sync::{watch, Mutex};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::client::{ApiClient, ClientError};
use crate::converter::ConversionOptions;
use crate::formats::{category_of, mime_type_for, picker_formats, suggested_target, FormatCategory};
use crate::session::{ConversionEntry, ConversionSession, EntryStatus};
use crate::validation::{validate_file, FileMeta};

struct SelectedFile {
    meta: FileMeta,
    bytes: Vec<u8>,
}

struct FlowInner {
    state: FlowState,
    category: FormatCategory,
    file: Option<SelectedFile>,
    target_format: Option<String>,
    options: Option<ConversionOptions>,
    progress: u8,
    error: Option<String>,
    notice: Option<String>,
    output: Option<ConversionOutput>,
    generation: u64,
    session: ConversionSession,
}

impl FlowInner {
    fn new(category: FormatCategory) -> Self {
        Self {
            state: FlowState::Idle,
            category,
            file: None,
            target_format: None,
            options: None,
            progress: 0,
            error: None,
            notice: None,
            output: None,
            generation: 0,
            session: ConversionSession::new(),
        }
    }

    /// Back to idle. Any in-flight conversion becomes stale.
    fn reset(&mut self) {
        self.state = FlowState::Idle;
        self.file = None;
        self.target_format = None;
        self.options = None;
        self.clear_downstream();
        self.generation += 1;
    }

    fn clear_downstream(&mut self) {
        self.progress = 0;
        self.error = None;
        self.notice = None;
        self.output = None;
    }

    /// Marks a superseded run's history entry as failed.
    fn discard(&mut self, entry_id: &str) -> FlowError {
        let err = FlowError::Superseded;
        self.session.set_error(entry_id, err.to_string());
        err
    }

    fn ensure_editable(&self, action: &'static str) -> Result<(), FlowError> {
        match self.state {
            FlowState::Idle | FlowState::Ready => Ok(()),
            state => Err(FlowError::InvalidTransition { state, action }),
        }
    }
}

/// Handle to one conversion flow and its session history.
#[derive(Clone)]
pub struct ConversionFlow {
    inner: Arc<Mutex<FlowInner>>,
    progress: Arc<watch::Sender<u8>>,
    config: Arc<FlowConfig>,
    backend: FlowBackend,
}

impl Default for ConversionFlow {
    fn default() -> Self {
        Self::new(FlowConfig::default(), FlowBackend::Local)
    }
}

impl ConversionFlow {
    pub fn new(config: FlowConfig, backend: FlowBackend) -> Self {
        let (progress, _) = watch::channel(0);
        Self {
            inner: Arc::new(Mutex::new(FlowInner::new(FormatCategory::Documents))),
            progress: Arc::new(progress),
            config: Arc::new(config),
            backend,
        }
    }

    /// Progress updates (0-100) for display.
    pub fn subscribe_progress(&self) -> watch::Receiver<u8> {
        self.progress.subscribe()
    }

    pub async fn snapshot(&self) -> FlowSnapshot {
        let inner = self.inner.lock().await;
        FlowSnapshot {
            state: inner.state,
            category: inner.category,
            file: inner.file.as_ref().map(|f| f.meta.clone()),
            target_format: inner.target_format.clone(),
            options: inner.options.clone(),
            progress: inner.progress,
            error: inner.error.clone(),
            notice: inner.notice.clone(),
            output: inner.output.clone(),
        }
    }

    pub async fn state(&self) -> FlowState {
        self.inner.lock().await.state
    }

    /// Conversions attempted in this session, newest first.
    pub async fn history(&self) -> Vec<ConversionEntry> {
        self.inner.lock().await.session.entries().to_vec()
    }

    /// Switches the category tab. A change always hard-resets to idle.
    pub async fn select_tab(&self, category: FormatCategory) {
        let mut inner = self.inner.lock().await;
        if inner.category == category {
            return;
        }
        debug!(from = %inner.category, to = %category, "Category tab changed, resetting flow");
        inner.reset();
        inner.category = category;
        self.progress.send_replace(0);
    }

    /// Picks a file, moving to `ready` with a suggested target format.
    ///
    /// A file that fails validation leaves the flow untouched apart from the
    /// notice.
    pub async fn select_file(
        &self,
        name: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Result<(), FlowError> {
        let meta = FileMeta::new(name, bytes.len() as u64);
        let mut inner = self.inner.lock().await;
        inner.ensure_editable("select a file")?;

        if let Err(e) = validate_file(&meta, self.config.max_file_bytes, None) {
            warn!(file = %meta.name, error = %e, "File rejected");
            inner.notice = Some(e.to_string());
            return Err(e.into());
        }

        let extension = meta.extension().unwrap_or_default();
        inner.clear_downstream();
        inner.target_format = suggested_target(&extension).map(str::to_string);
        inner.options = ConversionOptions::defaults_for(category_of(&extension));
        inner.file = Some(SelectedFile { meta, bytes });
        inner.state = FlowState::Ready;
        self.progress.send_replace(0);
        Ok(())
    }

    pub async fn set_target_format(&self, format: &str) -> Result<(), FlowError> {
        let mut inner = self.inner.lock().await;
        inner.ensure_editable("change the target format")?;
        let format = format.trim();
        inner.target_format = (!format.is_empty()).then(|| format.to_string());
        Ok(())
    }

    pub async fn set_options(&self, options: ConversionOptions) -> Result<(), FlowError> {
        options.validate()?;
        let mut inner = self.inner.lock().await;
        inner.ensure_editable("change options")?;
        inner.options = Some(options);
        Ok(())
    }

    /// Target formats offered for the selected file.
    pub async fn available_targets(&self) -> &'static [&'static str] {
        let inner = self.inner.lock().await;
        match inner.file.as_ref().and_then(|f| f.meta.extension()) {
            Some(ext) => picker_formats(category_of(&ext)),
            None => &[],
        }
    }

    /// "Convert another file" / "try again": back to idle.
    pub async fn reset(&self) {
        let mut inner = self.inner.lock().await;
        inner.reset();
        self.progress.send_replace(0);
    }

    /// Runs the conversion: steps progress to 100, then produces the output
    /// from the configured backend.
    pub async fn convert(&self) -> Result<ConversionOutput, FlowError> {
        let (generation, meta, bytes, target, options, entry_id) = {
            let mut inner = self.inner.lock().await;
            if matches!(
                inner.state,
                FlowState::Converting | FlowState::Completed | FlowState::Failed
            ) {
                return Err(FlowError::InvalidTransition {
                    state: inner.state,
                    action: "convert",
                });
            }

            let Some(file) = inner.file.as_ref() else {
                inner.notice = Some(MISSING_INPUT_NOTICE.to_string());
                return Err(FlowError::MissingFile);
            };
            let meta = file.meta.clone();
            let bytes = match self.backend {
                FlowBackend::Remote(_) => file.bytes.clone(),
                FlowBackend::Local => Vec::new(),
            };
            let Some(target) = inner.target_format.clone().filter(|t| !t.is_empty()) else {
                inner.notice = Some(MISSING_INPUT_NOTICE.to_string());
                return Err(FlowError::MissingTargetFormat);
            };

            inner.state = FlowState::Converting;
            inner.clear_downstream();
            let entry_id = inner.session.add_file(meta.clone(), target.clone());
            inner
                .session
                .update_status(&entry_id, EntryStatus::Processing, 0);
            self.progress.send_replace(0);

            (
                inner.generation,
                meta,
                bytes,
                target,
                inner.options.clone(),
                entry_id,
            )
        };

        info!(file = %meta.name, target = %target, "Conversion started");

        let step = self.config.progress_step.max(1);
        let mut value: u8 = 0;
        loop {
            tokio::time::sleep(self.config.step_delay).await;
            {
                let mut inner = self.inner.lock().await;
                if inner.generation != generation {
                    debug!(file = %meta.name, "Dropping stale progress update");
                    return Err(inner.discard(&entry_id));
                }
                inner.progress = value;
                inner
                    .session
                    .update_status(&entry_id, EntryStatus::Processing, value);
                self.progress.send_replace(value);
            }
            if value >= 100 {
                break;
            }
            value = value.saturating_add(step).min(100);
        }

        let produced = match &self.backend {
            FlowBackend::Local => Ok(local_output(&meta.name, &target)),
            FlowBackend::Remote(client) => {
                remote_output(client, &meta.name, bytes, &target, options.as_ref()).await
            }
        };

        let mut inner = self.inner.lock().await;
        if inner.generation != generation {
            return Err(inner.discard(&entry_id));
        }

        match produced {
            Ok(output) => {
                inner.state = FlowState::Completed;
                inner.progress = 100;
                inner.session.set_result(&entry_id, output.locator.clone());
                inner.output = Some(output.clone());
                info!(file = %output.file_name, "File converted successfully");
                Ok(output)
            }
            Err(e) => {
                warn!(file = %meta.name, error = %e, "Conversion failed");
                inner.state = FlowState::Failed;
                inner.error = Some(CONVERSION_FAILED_MESSAGE.to_string());
                inner.notice = Some("Conversion failed".to_string());
                inner.session.set_error(&entry_id, e.to_string());
                Err(e.into())
            }
        }
    }
}

/// Builds the labeled text payload the interactive page hands out.
fn local_output(source_name: &str, target: &str) -> ConversionOutput {
    let label = target.to_uppercase();
    let text = format!(
        "This is a Convertify demo {label} file.\n\n\
         Created: {created}\n\
         Source file: {source_name}\n\
         Target format: {label}\n\n\
         In a production environment, this would be a proper {label} file converted using specialized libraries.",
        created = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
    );

    ConversionOutput {
        file_name: format!("converted.{}", target),
        content_type: mime_type_for(target).to_string(),
        bytes: text.into_bytes(),
        locator: format!("blob:{}", Uuid::new_v4()),
        record: None,
    }
}

async fn remote_output(
    client: &ApiClient,
    source_name: &str,
    bytes: Vec<u8>,
    target: &str,
    options: Option<&ConversionOptions>,
) -> Result<ConversionOutput, ClientError> {
    let record = client.convert(source_name, bytes, target, options).await?;
    let file = client.download(&record.download_url).await?;

    Ok(ConversionOutput {
        file_name: file
            .file_name
            .unwrap_or_else(|| format!("converted.{}", target)),
        content_type: file
            .content_type
            .unwrap_or_else(|| mime_type_for(target).to_string()),
        bytes: file.bytes,
        locator: record.download_url.clone(),
        record: Some(record),
    })
}
