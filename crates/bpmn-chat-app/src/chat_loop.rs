//! The stdin chat loop.

use bpmn_chat_ai::{Annotation, ConversationLog, DiagramDocument, SessionState, TurnHandler};
use bpmn_chat_view::DiagramWriter;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};

/// One conversation: transcript, backend session and the diagram shown.
struct Conversation {
    log: ConversationLog,
    state: SessionState,
    document: DiagramDocument,
    annotations: Vec<Annotation>,
}

impl Conversation {
    fn new() -> Self {
        Self {
            log: ConversationLog::new(),
            state: SessionState::NotStarted,
            document: DiagramDocument::placeholder(),
            annotations: Vec::new(),
        }
    }
}

enum Command<'a> {
    Quit,
    New,
    Turn(&'a str),
    Empty,
}

fn parse_command(line: &str) -> Command<'_> {
    match line.trim() {
        "" => Command::Empty,
        "/quit" | "/exit" => Command::Quit,
        "/new" => Command::New,
        text => Command::Turn(text),
    }
}

fn publish(writer: &DiagramWriter, conv: &Conversation) {
    if let Err(e) = writer.write(&conv.document, &conv.annotations, &conv.log) {
        tracing::error!("Failed to write diagram page: {e}");
    }
}

pub async fn run(handler: TurnHandler, writer: DiagramWriter) -> bpmn_chat_common::Result<()> {
    let stdin = BufReader::new(tokio::io::stdin());
    let stdout = tokio::io::stdout();
    drive(&handler, &writer, stdin, stdout).await?;
    Ok(())
}

async fn drive<R, W>(
    handler: &TurnHandler,
    writer: &DiagramWriter,
    input: R,
    mut output: W,
) -> std::io::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut conv = Conversation::new();
    publish(writer, &conv);
    output
        .write_all(
            format!(
                "Diagram page: {} (type /new to start over, /quit to exit)\n",
                writer.html_path().display()
            )
            .as_bytes(),
        )
        .await?;

    let mut lines = input.lines();
    loop {
        output.write_all(b"> ").await?;
        output.flush().await?;

        let Some(line) = lines.next_line().await? else {
            break;
        };

        match parse_command(&line) {
            Command::Empty => continue,
            Command::Quit => break,
            Command::New => {
                if let Some(old) = conv.state.reset() {
                    tracing::info!(session = old.id().short(), "session dropped");
                }
                conv = Conversation::new();
                publish(writer, &conv);
                output.write_all(b"Started a new diagram.\n").await?;
            }
            Command::Turn(text) => {
                let outcome = handler
                    .submit(&mut conv.log, &mut conv.state, &conv.document, text)
                    .await;
                match outcome {
                    Ok(outcome) => {
                        conv.document = outcome.document;
                        conv.annotations = outcome.annotations;
                    }
                    Err(e) => {
                        tracing::error!("Turn rejected: {e}");
                        continue;
                    }
                }

                let reply = conv.log.last_reply().unwrap_or_default().to_string();
                output.write_all(format!("{reply}\n").as_bytes()).await?;
                publish(writer, &conv);
            }
        }
    }

    output.flush().await?;
    Ok(())
}
