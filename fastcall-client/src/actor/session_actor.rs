use crate::actor::{SessionCommand, SessionSnapshot};
use crate::engine::{NegotiationEngine, Session};
use crate::error::CallError;
use crate::signaling::SignalingChannel;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{error, info, warn};

/// Runs one [`Session`] on a single task, so UI triggers, relay frames and
/// connection events are handled strictly one at a time.
pub struct SessionActor {
    engine: Arc<NegotiationEngine>,
    session: Session,
    command_rx: mpsc::Receiver<SessionCommand>,
}

impl SessionActor {
    pub fn new(engine: Arc<NegotiationEngine>, command_rx: mpsc::Receiver<SessionCommand>) -> Self {
        let session = engine.new_session();
        Self {
            engine,
            session,
            command_rx,
        }
    }

    pub async fn run(mut self) {
        info!("Session event loop started");

        loop {
            tokio::select! {
                cmd = self.command_rx.recv() => {
                    match cmd {
                        Some(c) => self.handle_command(c).await,
                        None => {
                            info!("Command channel closed. Shutting down session.");
                            break;
                        }
                    }
                }

                frame = next_frame(self.session.channel.as_mut()) => {
                    match frame {
                        Some(text) => {
                            if let Err(e) =
                                self.engine.handle_inbound(&mut self.session, &text).await
                            {
                                log_failure(&e);
                            }
                        }
                        None => self.engine.handle_channel_dropped(&mut self.session).await,
                    }
                }

                Some(evt) = self.session.events.recv() => {
                    self.engine.handle_connection_event(&mut self.session, evt).await;
                }
            }
        }

        if let Err(e) = self.engine.leave(&mut self.session).await {
            warn!("Leave on shutdown failed: {}", e);
        }
        info!("Session event loop finished");
    }

    async fn handle_command(&mut self, cmd: SessionCommand) {
        match cmd {
            SessionCommand::Join { room, respond_to } => {
                let result = self.engine.join(&mut self.session, &room).await;
                let _ = respond_to.send(result);
            }
            SessionCommand::Start { respond_to } => {
                let result = self.engine.start(&mut self.session).await;
                let _ = respond_to.send(result);
            }
            SessionCommand::Hangup { respond_to } => {
                let result = self.engine.hangup(&mut self.session).await;
                let _ = respond_to.send(result);
            }
            SessionCommand::Leave { respond_to } => {
                let result = self.engine.leave(&mut self.session).await;
                let _ = respond_to.send(result);
            }
            SessionCommand::Snapshot { respond_to } => {
                let _ = respond_to.send(self.snapshot());
            }
        }
    }

    fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            state: self.session.state(),
            room_id: self.session.room_id().cloned(),
            client_id: self.session.client_id().cloned(),
            local_tracks: self.session.local_track_count(),
            remote_tracks: self.session.remote_stream().map_or(0, |s| s.len()),
            pending_candidates: self.session.pending_candidates().len(),
        }
    }
}

/// Pends forever while there is no relay connection.
async fn next_frame(channel: Option<&mut SignalingChannel>) -> Option<String> {
    match channel {
        Some(channel) => channel.recv().await,
        None => std::future::pending().await,
    }
}

fn log_failure(e: &CallError) {
    match e {
        CallError::CandidateRejected(_) => warn!("{}", e),
        _ => error!("{}", e),
    }
}
