use std::process::Stdio;
use std::time::Duration;

use log::{debug, warn};
use tokio::io::{AsyncWriteExt, BufReader};
use tokio::process::{Child, ChildStdin, ChildStdout, Command};
use tokio::time::timeout;

use crate::core::config::MAX_LINE_LENGTH;
use crate::protocol::{Phase, ProtocolError};
use crate::transport::{read_line_limited, with_deadline, Transport};

/// How long `close` waits for the agent to exit on its own before killing it.
const EXIT_GRACE: Duration = Duration::from_secs(2);

/// Talks to an agent over the stdin and stdout pipes of its process.
///
/// The child is killed if the transport is dropped without being closed.
pub struct ProcessTransport {
    program: String,
    child: Child,
    stdin: Option<ChildStdin>,
    stdout: BufReader<ChildStdout>,
    read_timeout: Option<Duration>,
}

impl ProcessTransport {
    /// Start `program` with `args`. The agent's stderr is inherited.
    pub fn spawn(
        program: &str,
        args: &[String],
        read_timeout: Option<Duration>,
    ) -> Result<Self, ProtocolError> {
        let spawn_error = |source| ProtocolError::Spawn {
            program: program.to_string(),
            source,
        };
        let mut child = Command::new(program)
            .args(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .kill_on_drop(true)
            .spawn()
            .map_err(spawn_error)?;
        let missing = |pipe: &str| {
            spawn_error(std::io::Error::new(
                std::io::ErrorKind::BrokenPipe,
                format!("agent {} was not captured", pipe),
            ))
        };
        let stdin = child.stdin.take().ok_or_else(|| missing("stdin"))?;
        let stdout = child.stdout.take().ok_or_else(|| missing("stdout"))?;
        debug!("spawned agent {:?} (pid {:?})", program, child.id());
        Ok(Self {
            program: program.to_string(),
            child,
            stdin: Some(stdin),
            stdout: BufReader::new(stdout),
            read_timeout,
        })
    }

    pub fn program(&self) -> &str {
        &self.program
    }
}

#[async_trait::async_trait]
impl Transport for ProcessTransport {
    async fn send_line(&mut self, line: &str, phase: Phase) -> Result<(), ProtocolError> {
        let stdin = self.stdin.as_mut().ok_or(ProtocolError::Closed { phase })?;
        let mut data = Vec::with_capacity(line.len() + 1);
        data.extend_from_slice(line.as_bytes());
        data.push(b'\n');
        with_deadline(self.read_timeout, phase, async move {
            let io_error = |source: std::io::Error| {
                if source.kind() == std::io::ErrorKind::BrokenPipe {
                    ProtocolError::Closed { phase }
                } else {
                    ProtocolError::Io { phase, source }
                }
            };
            stdin.write_all(&data).await.map_err(io_error)?;
            stdin.flush().await.map_err(io_error)
        })
        .await
    }

    async fn recv_line(&mut self, phase: Phase) -> Result<String, ProtocolError> {
        let stdout = &mut self.stdout;
        with_deadline(self.read_timeout, phase, async move {
            read_line_limited(stdout, MAX_LINE_LENGTH, phase).await
        })
        .await
    }

    async fn close(&mut self) {
        // Dropping stdin delivers end of input to the agent.
        self.stdin = None;
        match timeout(EXIT_GRACE, self.child.wait()).await {
            Ok(Ok(status)) => debug!("agent {:?} exited with {}", self.program, status),
            Ok(Err(e)) => warn!("waiting for agent {:?} failed: {}", self.program, e),
            Err(_) => {
                warn!(
                    "agent {:?} still running after {:?}, killing it",
                    self.program, EXIT_GRACE
                );
                if let Err(e) = self.child.kill().await {
                    warn!("failed to kill agent {:?}: {}", self.program, e);
                }
            }
        }
    }
}
