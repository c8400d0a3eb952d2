use fastcall_core::SignalMessage;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::warn;

/// A duplex text pipe to the relay. Sends never wait for delivery.
#[derive(Debug)]
pub struct SignalingChannel {
    outbound: Option<mpsc::UnboundedSender<String>>,
    inbound: mpsc::UnboundedReceiver<String>,
    reader: Option<JoinHandle<()>>,
}

impl SignalingChannel {
    pub fn new(
        outbound: mpsc::UnboundedSender<String>,
        inbound: mpsc::UnboundedReceiver<String>,
    ) -> Self {
        Self {
            outbound: Some(outbound),
            inbound,
            reader: None,
        }
    }

    /// Attaches the task feeding `inbound`; it is aborted on close.
    pub fn with_reader(mut self, reader: JoinHandle<()>) -> Self {
        self.reader = Some(reader);
        self
    }

    /// Queues `msg` for the relay. Returns `false` if it could not be queued.
    pub fn send(&self, msg: &SignalMessage) -> bool {
        let Some(outbound) = &self.outbound else {
            warn!("Signaling channel closed, dropping {}", msg.kind());
            return false;
        };
        let text = match msg.encode() {
            Ok(text) => text,
            Err(e) => {
                warn!("Failed to encode {}: {}", msg.kind(), e);
                return false;
            }
        };
        if outbound.send(text).is_err() {
            warn!("Signaling writer gone, dropping {}", msg.kind());
            return false;
        }
        true
    }

    /// Next inbound frame. `None` once the relay side is gone.
    pub async fn recv(&mut self) -> Option<String> {
        self.inbound.recv().await
    }

    pub fn try_recv(&mut self) -> Option<String> {
        self.inbound.try_recv().ok()
    }

    /// Stops delivery in both directions. Frames already queued for the
    /// relay are still flushed by the writer.
    pub fn close(&mut self) {
        self.outbound = None;
        self.inbound.close();
        if let Some(reader) = self.reader.take() {
            reader.abort();
        }
    }

    pub fn is_closed(&self) -> bool {
        self.outbound.is_none()
    }
}

impl Drop for SignalingChannel {
    fn drop(&mut self) {
        self.close();
    }
}
