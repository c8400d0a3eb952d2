use crate::actor::{SessionActor, SessionCommand, SessionSnapshot};
use crate::engine::NegotiationEngine;
use crate::error::{CallError, Result};
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot};

/// Cloneable front door to a session running on its own task.
#[derive(Debug, Clone)]
pub struct SessionHandle {
    tx: mpsc::Sender<SessionCommand>,
}

/// Spawns a session actor and returns its handle. The session leaves its
/// room once every handle is dropped.
pub fn spawn_session(engine: Arc<NegotiationEngine>) -> SessionHandle {
    let (tx, rx) = mpsc::channel(32);
    tokio::spawn(SessionActor::new(engine, rx).run());
    SessionHandle { tx }
}

impl SessionHandle {
    pub async fn join(&self, room: impl Into<String>) -> Result<()> {
        let room = room.into();
        self.request(|respond_to| SessionCommand::Join { room, respond_to })
            .await
    }

    pub async fn start(&self) -> Result<()> {
        self.request(|respond_to| SessionCommand::Start { respond_to })
            .await
    }

    pub async fn hangup(&self) -> Result<()> {
        self.request(|respond_to| SessionCommand::Hangup { respond_to })
            .await
    }

    pub async fn leave(&self) -> Result<()> {
        self.request(|respond_to| SessionCommand::Leave { respond_to })
            .await
    }

    pub async fn snapshot(&self) -> Result<SessionSnapshot> {
        let (respond_to, rx) = oneshot::channel();
        self.tx
            .send(SessionCommand::Snapshot { respond_to })
            .await
            .map_err(|_| CallError::SessionGone)?;
        rx.await.map_err(|_| CallError::SessionGone)
    }

    async fn request(
        &self,
        make: impl FnOnce(oneshot::Sender<Result<()>>) -> SessionCommand,
    ) -> Result<()> {
        let (respond_to, rx) = oneshot::channel();
        self.tx
            .send(make(respond_to))
            .await
            .map_err(|_| CallError::SessionGone)?;
        rx.await.map_err(|_| CallError::SessionGone)?
    }
}
