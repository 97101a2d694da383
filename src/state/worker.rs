use crate::state::messages::{DataRequest, DataResponse};
use cfb_data::{DataError, DatasetStore};
use log::{debug, error, warn};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tokio::sync::mpsc;

const SPINNER_CHARS: [char; 10] = ['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];
pub const ERROR_CHAR: char = '!';

#[derive(Debug, Copy, Clone)]
pub struct LoadingState {
    pub is_loading: bool,
    pub spinner_char: char,
}

impl Default for LoadingState {
    fn default() -> Self {
        Self { is_loading: false, spinner_char: ' ' }
    }
}

/// Reads exports off the UI task. Each request runs on the blocking pool
/// since the store touches the filesystem when an exports dir is set.
pub struct DataWorker {
    store: Arc<DatasetStore>,
    requests: mpsc::Receiver<DataRequest>,
    responses: mpsc::Sender<DataResponse>,
    is_loading: Arc<AtomicBool>,
}

impl DataWorker {
    pub fn new(
        store: DatasetStore,
        requests: mpsc::Receiver<DataRequest>,
        responses: mpsc::Sender<DataResponse>,
    ) -> Self {
        Self {
            store: Arc::new(store),
            requests,
            responses,
            is_loading: Arc::new(AtomicBool::new(false)),
        }
    }

    pub async fn run(mut self) {
        while let Some(request) = self.requests.recv().await {
            self.start_loading_animation().await;

            let response = match request {
                DataRequest::LoadExport { key, reload } => self.handle_load_export(key, reload).await,
            };

            let is_ok = !matches!(response, DataResponse::Error { not_found: false, .. });
            self.stop_loading_animation(is_ok).await;

            if let Err(e) = self.responses.send(response).await {
                error!("Failed to send data response: {e}");
                break;
            }
        }
    }

    async fn handle_load_export(&self, key: String, reload: bool) -> DataResponse {
        debug!("loading export {key} (reload: {reload})");
        let store = Arc::clone(&self.store);
        let lookup = key.clone();
        let result = tokio::task::spawn_blocking(move || store.load(&lookup)).await;

        match result {
            Ok(Ok(export)) => {
                debug!("export {key} loaded with {} samples", export.series.len());
                DataResponse::ExportLoaded { export, reload }
            }
            Ok(Err(err)) => load_error(key, err),
            Err(join_err) => DataResponse::Error {
                key,
                not_found: false,
                message: format!("export load task failed: {join_err}"),
            },
        }
    }

    async fn start_loading_animation(&self) {
        self.is_loading.store(true, Ordering::Relaxed);

        let mut loading_state = LoadingState { is_loading: true, spinner_char: SPINNER_CHARS[0] };
        let _ = self
            .responses
            .send(DataResponse::LoadingStateChanged { loading_state })
            .await;

        let responses = self.responses.clone();
        let is_loading = self.is_loading.clone();

        tokio::spawn(async move {
            let mut spinner_index = 1;
            let mut interval = tokio::time::interval(Duration::from_millis(33));
            loop {
                interval.tick().await;
                if !is_loading.load(Ordering::Relaxed) {
                    break;
                }
                loading_state.spinner_char = SPINNER_CHARS[spinner_index];
                spinner_index = (spinner_index + 1) % SPINNER_CHARS.len();
                let _ = responses
                    .send(DataResponse::LoadingStateChanged { loading_state })
                    .await;
            }
        });
    }

    async fn stop_loading_animation(&self, is_ok: bool) {
        self.is_loading.store(false, Ordering::Relaxed);
        tokio::time::sleep(Duration::from_millis(15)).await;

        let spinner_char = if is_ok { ' ' } else { ERROR_CHAR };
        let _ = self
            .responses
            .send(DataResponse::LoadingStateChanged {
                loading_state: LoadingState { is_loading: false, spinner_char },
            })
            .await;
    }
}

fn load_error(key: String, err: DataError) -> DataResponse {
    let not_found = matches!(err, DataError::NotFound(_));
    if not_found {
        warn!("{err}");
    } else {
        error!("{err}");
    }
    DataResponse::Error { key, not_found, message: err.to_string() }
}
