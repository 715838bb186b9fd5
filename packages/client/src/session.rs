//! Interactive chat session.
//!
//! Lines are read on a dedicated thread (rustyline blocks) and handed to the
//! async loop over a channel.

use chathub_server::infrastructure::dto::websocket::{InboundMessage, MessageDto};
use futures_util::{SinkExt, StreamExt};
use rustyline::{DefaultEditor, error::ReadlineError};
use tokio::sync::mpsc;
use tokio_tungstenite::{connect_async, tungstenite::Message};

use crate::{config::ClientConfig, error::ClientError, format::format_message};

const QUIT_COMMAND: &str = "quit";

/// What the input thread reports
#[derive(Debug, Clone, PartialEq, Eq)]
enum InputEvent {
    Line(String),
    Quit,
}

/// Map one line of user input to an event; blank lines are ignored.
fn classify_line(line: &str) -> Option<InputEvent> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        None
    } else if trimmed == QUIT_COMMAND {
        Some(InputEvent::Quit)
    } else {
        Some(InputEvent::Line(trimmed.to_string()))
    }
}

fn spawn_input_thread(
    mut editor: DefaultEditor,
    events: mpsc::UnboundedSender<InputEvent>,
) -> std::thread::JoinHandle<()> {
    std::thread::spawn(move || {
        loop {
            match editor.readline("> ") {
                Ok(line) => match classify_line(&line) {
                    Some(InputEvent::Quit) => {
                        let _ = events.send(InputEvent::Quit);
                        break;
                    }
                    Some(event) => {
                        let _ = editor.add_history_entry(line.as_str());
                        if events.send(event).is_err() {
                            break;
                        }
                    }
                    None => {}
                },
                Err(ReadlineError::Interrupted | ReadlineError::Eof) => {
                    let _ = events.send(InputEvent::Quit);
                    break;
                }
                Err(e) => {
                    tracing::error!("Failed to read input: {}", e);
                    let _ = events.send(InputEvent::Quit);
                    break;
                }
            }
        }
    })
}

/// Connect, then relay input and broadcasts until quit or server close.
pub async fn run_client(config: ClientConfig) -> Result<(), ClientError> {
    let endpoint = config.endpoint()?;
    tracing::info!("Connecting to {}", endpoint);
    let (socket, _) = connect_async(endpoint.as_str()).await?;
    let (mut sink, mut stream) = socket.split();
    println!("Connected. Type a message and press Enter, or '{QUIT_COMMAND}' to exit.");

    let editor = DefaultEditor::new()?;
    let (events_tx, mut events) = mpsc::unbounded_channel();
    let _input = spawn_input_thread(editor, events_tx);

    loop {
        tokio::select! {
            frame = stream.next() => match frame {
                Some(Ok(Message::Text(text))) => {
                    match serde_json::from_str::<MessageDto>(text.as_str()) {
                        Ok(message) => println!("{}", format_message(&message)),
                        Err(e) => tracing::warn!("Ignoring unexpected frame: {}", e),
                    }
                }
                Some(Ok(Message::Close(frame))) => {
                    match frame {
                        Some(frame) => println!(
                            "Server closed the connection ({}: {})",
                            u16::from(frame.code),
                            frame.reason.as_str()
                        ),
                        None => println!("Server closed the connection"),
                    }
                    break;
                }
                Some(Ok(_)) => {}
                Some(Err(e)) => return Err(e.into()),
                None => {
                    println!("Connection lost");
                    break;
                }
            },
            event = events.recv() => match event {
                Some(InputEvent::Line(content)) => {
                    let outgoing = InboundMessage {
                        sender_id: Some(config.sender.clone()),
                        content,
                    };
                    sink.send(Message::text(serde_json::to_string(&outgoing)?)).await?;
                }
                Some(InputEvent::Quit) | None => {
                    let _ = sink.send(Message::Close(None)).await;
                    println!("Bye");
                    break;
                }
            },
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_line() {
        // テスト項目: 入力行の解釈（空行は無視、quit で終了、それ以外は送信）
        // given (前提条件):
        let cases = vec![
            ("", None),
            ("   ", None),
            ("quit", Some(InputEvent::Quit)),
            ("  quit ", Some(InputEvent::Quit)),
            (" hello ", Some(InputEvent::Line("hello".to_string()))),
            ("quit now", Some(InputEvent::Line("quit now".to_string()))),
        ];

        // when (操作) / then (期待する結果):
        for (input, expected) in cases {
            assert_eq!(classify_line(input), expected, "input: {input:?}");
        }
    }
}
