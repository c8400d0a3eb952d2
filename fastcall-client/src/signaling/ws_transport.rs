use crate::error::CallError;
use crate::signaling::{SignalingChannel, SignalingTransport};
use async_trait::async_trait;
use fastcall_core::utils::signaling_path;
use fastcall_core::{ClientId, RoomId};
use futures::stream::{SplitSink, SplitStream};
use futures::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio::sync::mpsc;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async};
use tracing::{debug, error, info};

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// Relay transport over WebSocket.
#[derive(Debug, Clone)]
pub struct WsTransport {
    base_url: String,
}

impl WsTransport {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_owned(),
        }
    }

    pub fn url_for(&self, room: &RoomId, client: &ClientId) -> String {
        format!("{}{}", self.base_url, signaling_path(room, client))
    }

    async fn writer_task(
        mut write: SplitSink<WsStream, Message>,
        mut rx: mpsc::UnboundedReceiver<String>,
    ) {
        while let Some(text) = rx.recv().await {
            if let Err(e) = write.send(Message::Text(text)).await {
                error!("Failed to send signaling frame: {}", e);
                return;
            }
        }
        let _ = write.send(Message::Close(None)).await;
        debug!("Signaling writer terminated");
    }

    async fn reader_task(mut read: SplitStream<WsStream>, tx: mpsc::UnboundedSender<String>) {
        while let Some(frame) = read.next().await {
            match frame {
                Ok(Message::Text(text)) => {
                    if tx.send(text).is_err() {
                        break;
                    }
                }
                Ok(Message::Close(_)) => {
                    info!("Relay closed the signaling connection");
                    break;
                }
                Err(e) => {
                    error!("Signaling connection error: {}", e);
                    break;
                }
                _ => {}
            }
        }
        debug!("Signaling reader terminated");
    }
}

#[async_trait]
impl SignalingTransport for WsTransport {
    async fn open(&self, room: &RoomId, client: &ClientId) -> Result<SignalingChannel, CallError> {
        let url = self.url_for(room, client);
        info!("Connecting to relay: {}", url);

        let (ws_stream, _) = connect_async(url.as_str())
            .await
            .map_err(|e| CallError::ChannelUnavailable(format!("{}: {}", url, e)))?;

        info!("Connected to relay as {} in room {}", client, room);

        let (write, read) = ws_stream.split();
        let (out_tx, out_rx) = mpsc::unbounded_channel();
        let (in_tx, in_rx) = mpsc::unbounded_channel();

        tokio::spawn(Self::writer_task(write, out_rx));
        let reader = tokio::spawn(Self::reader_task(read, in_tx));

        Ok(SignalingChannel::new(out_tx, in_rx).with_reader(reader))
    }
}
