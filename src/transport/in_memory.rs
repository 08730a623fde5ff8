use std::time::Duration;

use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};

use crate::protocol::{Phase, ProtocolError};
use crate::transport::{with_deadline, Transport};

/// One end of an in-process line channel. Used to script agents in tests.
pub struct InMemoryTransport {
    send_queue: Option<UnboundedSender<String>>,
    recv_queue: UnboundedReceiver<String>,
    read_timeout: Option<Duration>,
}

impl InMemoryTransport {
    pub fn pair() -> (Self, Self) {
        let (tx1, rx1) = unbounded_channel();
        let (tx2, rx2) = unbounded_channel();
        (
            Self {
                send_queue: Some(tx1),
                recv_queue: rx2,
                read_timeout: None,
            },
            Self {
                send_queue: Some(tx2),
                recv_queue: rx1,
                read_timeout: None,
            },
        )
    }

    /// Limit how long `recv_line` waits on this end.
    pub fn with_timeout(mut self, read_timeout: Duration) -> Self {
        self.read_timeout = Some(read_timeout);
        self
    }
}

#[async_trait::async_trait]
impl Transport for InMemoryTransport {
    async fn send_line(&mut self, line: &str, phase: Phase) -> Result<(), ProtocolError> {
        let queue = self
            .send_queue
            .as_ref()
            .ok_or(ProtocolError::Closed { phase })?;
        queue
            .send(line.to_string())
            .map_err(|_| ProtocolError::Closed { phase })
    }

    async fn recv_line(&mut self, phase: Phase) -> Result<String, ProtocolError> {
        let queue = &mut self.recv_queue;
        with_deadline(self.read_timeout, phase, async move {
            queue.recv().await.ok_or(ProtocolError::Closed { phase })
        })
        .await
    }

    async fn close(&mut self) {
        self.send_queue = None;
        self.recv_queue.close();
    }
}
