use crate::RelayService;
use axum::extract::ws::{Message, WebSocket};
use axum::extract::{Path, State, WebSocketUpgrade};
use axum::response::IntoResponse;
use fastcall_core::{ClientId, RoomId};
use futures::{SinkExt, StreamExt};
use tokio::sync::mpsc;
use tracing::{debug, info};

pub async fn ws_handler(
    ws: WebSocketUpgrade,
    Path((room, client)): Path<(String, String)>,
    State(service): State<RelayService>,
) -> impl IntoResponse {
    let room = RoomId::from(room);
    let client = ClientId::from(client);

    ws.on_upgrade(move |socket| handle_socket(socket, room, client, service))
}

async fn handle_socket(socket: WebSocket, room: RoomId, client: ClientId, service: RelayService) {
    let (mut sender, mut receiver) = socket.split();
    let (tx, mut rx) = mpsc::unbounded_channel();

    service.connect(&room, &client, tx.clone());

    let mut send_task = tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if sender.send(msg).await.is_err() {
                break;
            }
        }
    });

    let mut recv_task = tokio::spawn({
        let service = service.clone();
        let room = room.clone();
        let client = client.clone();

        async move {
            while let Some(Ok(msg)) = receiver.next().await {
                match msg {
                    Message::Text(text) => {
                        service.relay(&room, &client, text);
                    }
                    Message::Close(_) => break,
                    _ => debug!("Ignoring non-text frame from {}", client),
                }
            }
        }
    });

    tokio::select! {
        _ = (&mut send_task) => recv_task.abort(),
        _ = (&mut recv_task) => send_task.abort(),
    };

    service.disconnect(&room, &client, &tx);
    info!("WebSocket connection closed for {} in room {}", client, room);
}
