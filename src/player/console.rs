use std::path::PathBuf;
use std::sync::Arc;

use tokio::io::{
    self, AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader, Stdin, Stdout,
};
use tokio::sync::Mutex;

use crate::core::{parse_shot, Board, Coord, PublicBoard, ShotResult};
use crate::player::{Player, PlayerError};
use crate::protocol::{Setup, SetupError};

/// Where a console player's fleet comes from.
#[derive(Debug, Clone)]
pub enum SetupSource {
    /// A setup file read when setup starts.
    File(PathBuf),
    /// A setup already in memory.
    Inline(Setup),
}

/// One buffered line source that several console players read from in turn.
///
/// Two seats at the same terminal must share this, or the first to read
/// buffers input meant for the other.
pub struct SharedInput<R> {
    reader: Arc<Mutex<R>>,
}

impl<R> Clone for SharedInput<R> {
    fn clone(&self) -> Self {
        Self {
            reader: Arc::clone(&self.reader),
        }
    }
}

impl SharedInput<BufReader<Stdin>> {
    pub fn stdin() -> Self {
        Self::new(BufReader::new(io::stdin()))
    }
}

impl<R: AsyncBufRead + Unpin + Send> SharedInput<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader: Arc::new(Mutex::new(reader)),
        }
    }

    async fn read_line(&self, line: &mut String) -> io::Result<usize> {
        self.reader.lock().await.read_line(line).await
    }
}

/// A human entering shots as `<column> <row>`, e.g. `C 4`.
pub struct ConsolePlayer<R, W> {
    source: SetupSource,
    name: String,
    input: SharedInput<R>,
    output: W,
}

impl ConsolePlayer<BufReader<Stdin>, Stdout> {
    /// A console player on the process's own terminal.
    pub fn stdio(setup_file: impl Into<PathBuf>, input: SharedInput<BufReader<Stdin>>) -> Self {
        Self::sharing(SetupSource::File(setup_file.into()), input, io::stdout())
    }
}

impl<R, W> ConsolePlayer<R, W>
where
    R: AsyncBufRead + Unpin + Send,
    W: AsyncWrite + Unpin + Send,
{
    /// A player with an input of its own.
    pub fn new(source: SetupSource, input: R, output: W) -> Self {
        Self::sharing(source, SharedInput::new(input), output)
    }

    pub fn sharing(source: SetupSource, input: SharedInput<R>, output: W) -> Self {
        Self {
            source,
            name: String::new(),
            input,
            output,
        }
    }

    /// The writer prompts and boards are printed to.
    pub fn output(&self) -> &W {
        &self.output
    }
}

#[async_trait::async_trait]
impl<R, W> Player for ConsolePlayer<R, W>
where
    R: AsyncBufRead + Unpin + Send,
    W: AsyncWrite + Unpin + Send,
{
    async fn setup(&mut self) -> Result<Setup, SetupError> {
        let setup = match &self.source {
            SetupSource::File(path) => Setup::load(path).await?,
            SetupSource::Inline(setup) => setup.clone(),
        };
        self.name = setup.name.clone();
        Ok(setup)
    }

    async fn show_own_board(&mut self, board: &Board) -> Result<(), PlayerError> {
        let shown = format!("{}'s fleet:\n{}", self.name, board.display(true));
        self.output.write_all(shown.as_bytes()).await?;
        self.output.flush().await?;
        Ok(())
    }

    async fn make_shot(
        &mut self,
        _own: &PublicBoard,
        opponent: &PublicBoard,
    ) -> Result<Coord, PlayerError> {
        self.output
            .write_all(opponent.to_string().as_bytes())
            .await?;
        loop {
            let prompt = format!("{}, make your shot: ", self.name);
            self.output.write_all(prompt.as_bytes()).await?;
            self.output.flush().await?;

            let mut line = String::new();
            if self.input.read_line(&mut line).await? == 0 {
                return Err(PlayerError::InputClosed);
            }
            match parse_shot(&line) {
                Ok(coord) => return Ok(coord),
                Err(e) => {
                    let message = format!("Invalid square! {}\n", e);
                    self.output.write_all(message.as_bytes()).await?;
                }
            }
        }
    }

    async fn notify_status(&mut self, result: ShotResult) -> Result<(), PlayerError> {
        let message = format!("{}!\n", result);
        self.output.write_all(message.as_bytes()).await?;
        self.output.flush().await?;
        Ok(())
    }
}
