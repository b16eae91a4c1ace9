//! Websocket Connection Manager.
//!
//! Each connection instance runs as one task on the application runtime. The
//! task reports lifecycle and inbound payloads over a std channel to the UI
//! thread, which is the only place the lifecycle state is mutated.

use std::sync::mpsc;

use futures_util::{SinkExt, StreamExt};
use tokio::{
    runtime::Handle,
    sync::{mpsc as tokio_mpsc, watch},
};
use tokio_tungstenite::{connect_async, tungstenite::Message as WsMessage};
use url::Url;

use crate::{
    domain::connection::{
        ConnectionError, ConnectionEvent, ConnectionLifecycle, ConnectionState, LifecycleUpdate,
        SendStatus,
    },
    usecases::contracts::ChatTransport,
};

const CHAT_CONNECTION_STARTED: &str = "CHAT_CONNECTION_STARTED";
const CHAT_CONNECTION_OPENED: &str = "CHAT_CONNECTION_OPENED";
const CHAT_CONNECTION_FAILED: &str = "CHAT_CONNECTION_FAILED";
const CHAT_CONNECTION_CLOSED: &str = "CHAT_CONNECTION_CLOSED";
const CHAT_CONNECTION_SEND_FAILED: &str = "CHAT_CONNECTION_SEND_FAILED";
const CHAT_CONNECTION_FRAME_SKIPPED: &str = "CHAT_CONNECTION_FRAME_SKIPPED";
const CHAT_CONNECTION_EVENT_SINK_GONE: &str = "CHAT_CONNECTION_EVENT_SINK_GONE";

const CHAT_ID_QUERY_PARAM: &str = "chat_id";

/// Builds `<endpoint>?chat_id=<chat_id>`.
pub fn chat_url(endpoint: &str, chat_id: &str) -> Result<Url, ConnectionError> {
    if chat_id.trim().is_empty() {
        return Err(ConnectionError::EmptyChatId);
    }

    let mut url = Url::parse(endpoint).map_err(|error| ConnectionError::InvalidEndpoint {
        endpoint: endpoint.to_owned(),
        details: error.to_string(),
    })?;

    if !matches!(url.scheme(), "ws" | "wss") {
        return Err(ConnectionError::InvalidEndpoint {
            endpoint: endpoint.to_owned(),
            details: format!("unsupported scheme `{}`", url.scheme()),
        });
    }

    url.query_pairs_mut()
        .append_pair(CHAT_ID_QUERY_PARAM, chat_id);
    Ok(url)
}

struct WorkerHandle {
    outbound_tx: tokio_mpsc::UnboundedSender<String>,
    stop_tx: watch::Sender<bool>,
}

pub struct WebSocketConnection {
    runtime: Handle,
    url: Url,
    event_tx: mpsc::Sender<ConnectionEvent>,
    lifecycle: ConnectionLifecycle,
    worker: Option<WorkerHandle>,
}

impl std::fmt::Debug for WebSocketConnection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WebSocketConnection")
            .field("url", &self.url.as_str())
            .field("lifecycle", &self.lifecycle)
            .field("worker_running", &self.worker.is_some())
            .finish()
    }
}

impl WebSocketConnection {
    /// Starts connecting in the background. Progress arrives on `event_tx`.
    pub fn open(
        runtime: Handle,
        endpoint: &str,
        chat_id: &str,
        event_tx: mpsc::Sender<ConnectionEvent>,
    ) -> Result<Self, ConnectionError> {
        let url = chat_url(endpoint, chat_id)?;

        let mut connection = Self {
            runtime,
            url,
            event_tx,
            lifecycle: ConnectionLifecycle::default(),
            worker: None,
        };
        connection.spawn_worker();

        Ok(connection)
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    fn spawn_worker(&mut self) {
        let generation = self.lifecycle.generation();
        let (outbound_tx, outbound_rx) = tokio_mpsc::unbounded_channel();
        let (stop_tx, stop_rx) = watch::channel(false);

        self.runtime.spawn(run_connection(
            self.url.to_string(),
            generation,
            outbound_rx,
            stop_rx,
            self.event_tx.clone(),
        ));

        tracing::info!(
            code = CHAT_CONNECTION_STARTED,
            generation,
            url = %self.url,
            "chat connection worker started"
        );

        self.worker = Some(WorkerHandle {
            outbound_tx,
            stop_tx,
        });
    }

    fn stop_worker(&mut self) {
        if let Some(worker) = self.worker.take() {
            let _ = worker.stop_tx.send(true);
        }
    }
}

impl ChatTransport for WebSocketConnection {
    fn state(&self) -> ConnectionState {
        self.lifecycle.state()
    }

    fn observe(&mut self, event: &ConnectionEvent) -> LifecycleUpdate {
        let update = self.lifecycle.apply(event);
        if update == LifecycleUpdate::Transitioned(ConnectionState::Closed) {
            // The worker has already exited; release its channels.
            self.worker = None;
        }
        update
    }

    fn send(&self, payload: String) -> SendStatus {
        if self.lifecycle.state() != ConnectionState::Open {
            return SendStatus::Dropped;
        }

        match &self.worker {
            Some(worker) if worker.outbound_tx.send(payload).is_ok() => SendStatus::Dispatched,
            _ => SendStatus::Dropped,
        }
    }

    fn reopen(&mut self) -> Result<(), ConnectionError> {
        self.lifecycle.restart()?;
        self.stop_worker();
        self.spawn_worker();
        Ok(())
    }

    fn close(&mut self) {
        self.stop_worker();
        if self.lifecycle.mark_closed() {
            tracing::info!(
                code = CHAT_CONNECTION_CLOSED,
                generation = self.lifecycle.generation(),
                "chat connection closed by client"
            );
        }
    }
}

impl Drop for WebSocketConnection {
    fn drop(&mut self) {
        self.stop_worker();
    }
}

fn emit(event_tx: &mpsc::Sender<ConnectionEvent>, event: ConnectionEvent) -> bool {
    if event_tx.send(event).is_err() {
        tracing::debug!(
            code = CHAT_CONNECTION_EVENT_SINK_GONE,
            "chat connection event receiver dropped; stopping worker"
        );
        return false;
    }
    true
}

async fn run_connection(
    url: String,
    generation: u64,
    mut outbound_rx: tokio_mpsc::UnboundedReceiver<String>,
    mut stop_rx: watch::Receiver<bool>,
    event_tx: mpsc::Sender<ConnectionEvent>,
) {
    let socket = tokio::select! {
        _ = stop_rx.changed() => {
            emit(&event_tx, ConnectionEvent::closed(generation, Some("cancelled before open".to_owned())));
            return;
        }
        connected = connect_async(url.as_str()) => match connected {
            Ok((socket, _response)) => socket,
            Err(error) => {
                tracing::warn!(
                    code = CHAT_CONNECTION_FAILED,
                    generation,
                    error = %error,
                    "chat connection handshake failed"
                );
                emit(&event_tx, ConnectionEvent::closed(generation, Some(error.to_string())));
                return;
            }
        }
    };

    tracing::info!(
        code = CHAT_CONNECTION_OPENED,
        generation,
        "chat connection opened"
    );
    if !emit(&event_tx, ConnectionEvent::opened(generation)) {
        return;
    }

    let (mut sink, mut stream) = socket.split();

    let reason = loop {
        tokio::select! {
            changed = stop_rx.changed() => {
                if changed.is_err() || *stop_rx.borrow() {
                    let _ = sink.send(WsMessage::Close(None)).await;
                    break Some("closed by client".to_owned());
                }
            }
            outbound = outbound_rx.recv() => {
                let Some(payload) = outbound else {
                    let _ = sink.send(WsMessage::Close(None)).await;
                    break Some("closed by client".to_owned());
                };

                if let Err(error) = sink.send(WsMessage::Text(payload.into())).await {
                    tracing::warn!(
                        code = CHAT_CONNECTION_SEND_FAILED,
                        generation,
                        error = %error,
                        "failed to write chat frame"
                    );
                    break Some(error.to_string());
                }
            }
            inbound = stream.next() => match inbound {
                Some(Ok(WsMessage::Text(text))) => {
                    if !emit(&event_tx, ConnectionEvent::message(generation, text.as_str())) {
                        return;
                    }
                }
                Some(Ok(WsMessage::Binary(bytes))) => match String::from_utf8(bytes.to_vec()) {
                    Ok(text) => {
                        if !emit(&event_tx, ConnectionEvent::message(generation, text)) {
                            return;
                        }
                    }
                    Err(error) => {
                        tracing::warn!(
                            code = CHAT_CONNECTION_FRAME_SKIPPED,
                            generation,
                            error = %error,
                            "skipping binary chat frame that is not utf-8"
                        );
                    }
                },
                Some(Ok(WsMessage::Ping(payload))) => {
                    if let Err(error) = sink.send(WsMessage::Pong(payload)).await {
                        break Some(error.to_string());
                    }
                }
                Some(Ok(WsMessage::Close(frame))) => {
                    break frame.map(|frame| {
                        format!("server closed: {} {}", u16::from(frame.code), frame.reason.as_str())
                    });
                }
                Some(Ok(_)) => {}
                Some(Err(error)) => break Some(error.to_string()),
                None => break None,
            }
        }
    };

    tracing::info!(
        code = CHAT_CONNECTION_CLOSED,
        generation,
        reason = reason.as_deref().unwrap_or("stream ended"),
        "chat connection closed"
    );
    emit(&event_tx, ConnectionEvent::closed(generation, reason));
}
