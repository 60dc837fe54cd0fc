//! Runtime bridge: a dedicated worker thread with its own tokio runtime
//! drains the command queue and feeds prediction results back to the UI.

use std::thread;

use client_core::PredictionClient;
use crossbeam_channel::{Receiver, Sender};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{UiError, UiEvent};

pub fn launch(server_url: String, cmd_rx: Receiver<BackendCommand>, ui_tx: Sender<UiEvent>) {
    thread::spawn(move || {
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                let _ = ui_tx.try_send(UiEvent::StartupFailed(UiError::startup(format!(
                    "backend worker startup failure: failed to build runtime: {err}"
                ))));
                tracing::error!("failed to build backend runtime: {err}");
                return;
            }
        };

        runtime.block_on(async move {
            let client = match PredictionClient::new(&server_url) {
                Ok(client) => client,
                Err(err) => {
                    tracing::error!("backend: client startup failed: {err}");
                    let _ = ui_tx.try_send(UiEvent::StartupFailed(UiError::startup(
                        err.user_message(),
                    )));
                    return;
                }
            };
            let _ = ui_tx.try_send(UiEvent::Info(format!(
                "Ready; prediction service at {}",
                client.server_url()
            )));

            while let Ok(cmd) = cmd_rx.recv() {
                match cmd {
                    BackendCommand::Predict {
                        generation,
                        endpoint,
                        query,
                    } => {
                        tracing::info!(
                            generation,
                            endpoint = endpoint.path(),
                            "backend: predict"
                        );
                        match client.submit(endpoint, &query).await {
                            Ok(outcome) => {
                                let _ = ui_tx.try_send(UiEvent::PredictionReady {
                                    generation,
                                    outcome,
                                });
                            }
                            Err(err) => {
                                tracing::error!(
                                    generation,
                                    endpoint = endpoint.path(),
                                    "backend: predict failed: {err}"
                                );
                                let _ = ui_tx.try_send(UiEvent::PredictionFailed {
                                    generation,
                                    error: UiError::from_prediction(&err),
                                });
                            }
                        }
                    }
                }
            }
        });
    });
}
