use metrics_exporter_prometheus::PrometheusHandle;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};
use tracing::info;

use hireline::workflows::recruitment::{
    Candidate, NotifyError, SignatureNotifier, SignatureRequest, SnapshotError, SnapshotStore,
};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Snapshot store backed by a single pretty-printed JSON file.
///
/// A missing file is not an error; the service falls back to its seed roster
/// and the file appears after the first mutation.
pub(crate) struct JsonFileSnapshotStore {
    path: PathBuf,
}

impl JsonFileSnapshotStore {
    pub(crate) fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl SnapshotStore for JsonFileSnapshotStore {
    fn load(&self) -> Result<Option<Vec<Candidate>>, SnapshotError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(SnapshotError::Unavailable(err.to_string())),
        };
        let candidates = serde_json::from_str(&raw)
            .map_err(|err| SnapshotError::Corrupt(err.to_string()))?;
        Ok(Some(candidates))
    }

    fn save(&self, candidates: &[Candidate]) -> Result<(), SnapshotError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .map_err(|err| SnapshotError::Unavailable(err.to_string()))?;
            }
        }
        let json = serde_json::to_string_pretty(candidates)
            .map_err(|err| SnapshotError::Corrupt(err.to_string()))?;
        fs::write(&self.path, json).map_err(|err| SnapshotError::Unavailable(err.to_string()))
    }
}

#[derive(Default)]
pub(crate) struct InMemorySnapshotStore {
    snapshot: Mutex<Option<Vec<Candidate>>>,
}

impl SnapshotStore for InMemorySnapshotStore {
    fn load(&self) -> Result<Option<Vec<Candidate>>, SnapshotError> {
        Ok(self.snapshot.lock().expect("snapshot mutex poisoned").clone())
    }

    fn save(&self, candidates: &[Candidate]) -> Result<(), SnapshotError> {
        *self.snapshot.lock().expect("snapshot mutex poisoned") = Some(candidates.to_vec());
        Ok(())
    }
}

/// Signature adapter for the HTTP service. There is no transport integration
/// yet, so a structured log line stands in for the dispatch.
#[derive(Default, Clone)]
pub(crate) struct LoggingSignatureNotifier;

impl SignatureNotifier for LoggingSignatureNotifier {
    fn send(&self, request: SignatureRequest) -> Result<(), NotifyError> {
        info!(
            candidate = %request.candidate_id,
            recipient = %request.recipient,
            template = %request.template,
            "offer dispatched for e-signature"
        );
        Ok(())
    }
}

#[derive(Default, Clone)]
pub(crate) struct RecordingSignatureNotifier {
    requests: Arc<Mutex<Vec<SignatureRequest>>>,
}

impl SignatureNotifier for RecordingSignatureNotifier {
    fn send(&self, request: SignatureRequest) -> Result<(), NotifyError> {
        let mut guard = self.requests.lock().expect("notifier mutex poisoned");
        guard.push(request);
        Ok(())
    }
}

impl RecordingSignatureNotifier {
    pub(crate) fn requests(&self) -> Vec<SignatureRequest> {
        self.requests.lock().expect("notifier mutex poisoned").clone()
    }
}
