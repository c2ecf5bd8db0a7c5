use super::logic::{
    SyntheticInputs, SyntheticView, UploadInputs, UploadView, run_synthetic, run_upload,
};
use crate::config::{DashboardSettings, DataSource};
use crate::error::EdaError;
use std::path::Path;
use std::time::{Duration, Instant};

/// State of the synthetic-data dashboard for one session.
#[derive(Debug)]
pub struct SyntheticSession {
    pub inputs: SyntheticInputs,
    pub view: Option<Result<SyntheticView, EdaError>>,
    pub last_duration: Option<Duration>,
    last_run: Option<SyntheticInputs>,
    runs: usize,
}

impl SyntheticSession {
    pub fn new(settings: &DashboardSettings) -> Self {
        Self {
            inputs: SyntheticInputs::new(settings),
            view: None,
            last_duration: None,
            last_run: None,
            runs: 0,
        }
    }

    /// Re-runs the pipeline if any input changed since the last run.
    pub fn refresh(&mut self, settings: &DashboardSettings) {
        if self.last_run.as_ref() == Some(&self.inputs) {
            return;
        }

        let start = Instant::now();
        let result = run_synthetic(&self.inputs, settings);
        self.runs += 1;
        self.last_duration = Some(start.elapsed());

        match &result {
            Ok(view) => self.inputs = view.inputs.clone(),
            Err(e) => tracing::error!("Synthetic pipeline failed: {e}"),
        }
        self.last_run = Some(self.inputs.clone());
        self.view = Some(result);
    }

    pub fn run_count(&self) -> usize {
        self.runs
    }
}

/// State of the upload dashboard for one session.
#[derive(Debug)]
pub struct UploadSession {
    pub file_name: Option<String>,
    /// Last failure to read a file from disk, shown next to the picker.
    pub read_error: Option<String>,
    bytes: Option<Vec<u8>>,
    pub inputs: UploadInputs,
    pub view: Option<Result<UploadView, EdaError>>,
    pub last_duration: Option<Duration>,
    last_run: Option<UploadInputs>,
    runs: usize,
}

impl UploadSession {
    pub fn new(settings: &DashboardSettings) -> Self {
        Self {
            file_name: None,
            read_error: None,
            bytes: None,
            inputs: UploadInputs::new(settings),
            view: None,
            last_duration: None,
            last_run: None,
            runs: 0,
        }
    }

    /// Replaces the uploaded file and resets every selection.
    pub fn load_file(&mut self, name: String, bytes: Vec<u8>, settings: &DashboardSettings) {
        tracing::info!(file = %name, size = bytes.len(), "File uploaded");
        self.file_name = Some(name);
        self.read_error = None;
        self.bytes = Some(bytes);
        self.inputs = UploadInputs::new(settings);
        self.last_run = None;
        self.view = None;
    }

    /// Reads `path` and loads it as the uploaded file.
    ///
    /// # Errors
    ///
    /// Returns the I/O error if the file cannot be read; the previous upload
    /// is kept in that case.
    pub fn load_path(&mut self, path: &Path, settings: &DashboardSettings) -> Result<(), EdaError> {
        let name = path
            .file_name()
            .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned());
        match std::fs::read(path) {
            Ok(bytes) => {
                self.load_file(name, bytes, settings);
                Ok(())
            }
            Err(e) => {
                let err = EdaError::Io(e);
                self.read_error = Some(format!("Could not open {name}: {err}"));
                Err(err)
            }
        }
    }

    pub fn has_file(&self) -> bool {
        self.bytes.is_some()
    }

    /// Re-runs the pipeline over the uploaded bytes if any input changed.
    pub fn refresh(&mut self, settings: &DashboardSettings) {
        let Some(bytes) = &self.bytes else {
            return;
        };
        if self.last_run.as_ref() == Some(&self.inputs) {
            return;
        }

        let start = Instant::now();
        let result = run_upload(bytes, &self.inputs, settings);
        self.runs += 1;
        self.last_duration = Some(start.elapsed());

        match &result {
            Ok(view) => self.inputs = view.inputs.clone(),
            Err(e) => tracing::warn!("Upload could not be processed: {e}"),
        }
        self.last_run = Some(self.inputs.clone());
        self.view = Some(result);
    }

    pub fn run_count(&self) -> usize {
        self.runs
    }
}

/// Everything one dashboard window owns. Nothing here is shared or persisted.
#[derive(Debug)]
pub struct DashboardModel {
    pub settings: DashboardSettings,
    pub source: DataSource,
    pub synthetic: SyntheticSession,
    pub upload: UploadSession,
}

impl DashboardModel {
    pub fn new(settings: DashboardSettings) -> Self {
        Self {
            source: settings.start_source,
            synthetic: SyntheticSession::new(&settings),
            upload: UploadSession::new(&settings),
            settings,
        }
    }

    /// Runs whichever pipeline is on screen.
    pub fn refresh(&mut self) {
        match self.source {
            DataSource::Synthetic => self.synthetic.refresh(&self.settings),
            DataSource::Upload => self.upload.refresh(&self.settings),
        }
    }
}
