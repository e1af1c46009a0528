use crate::events::AppEvent;
use async_channel::Sender;
use handkit::input::{Vec3ParseError, parse_vec3};
use std::path::PathBuf;
use thiserror::Error;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::UnixListener;

#[derive(Debug, Error, PartialEq)]
pub enum CommandParseError {
    #[error("empty command")]
    Empty,
    #[error("unknown command '{0}'")]
    Unknown(String),
    #[error("bad position: {0}")]
    Position(#[from] Vec3ParseError),
}

/// `show <x> <y> <z>`, `show x,y,z` or `close`.
pub fn parse_command(line: &str) -> Result<AppEvent, CommandParseError> {
    let line = line.trim();
    let (verb, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));

    match verb.to_ascii_lowercase().as_str() {
        "" => Err(CommandParseError::Empty),
        "show" => Ok(AppEvent::Show(parse_vec3(rest)?)),
        "close" | "hide" => Ok(AppEvent::Close),
        "reload" => Ok(AppEvent::ConfigReload),
        _ => Err(CommandParseError::Unknown(verb.to_string())),
    }
}

pub async fn run_server(tx: Sender<AppEvent>, socket_path: PathBuf) {
    // Cleanup old socket if it exists
    if std::fs::metadata(&socket_path).is_ok() {
        let _ = std::fs::remove_file(&socket_path);
    }

    let listener = match UnixListener::bind(&socket_path) {
        Ok(l) => l,
        Err(e) => {
            log::error!("Failed to bind unix socket {}: {}", socket_path.display(), e);
            return;
        }
    };
    log::info!("Listening on {}", socket_path.display());

    loop {
        match listener.accept().await {
            Ok((stream, _)) => {
                let tx = tx.clone();
                tokio::spawn(async move {
                    let (read, mut write) = stream.into_split();
                    let mut lines = BufReader::new(read).lines();

                    while let Ok(Some(line)) = lines.next_line().await {
                        match parse_command(&line) {
                            Ok(event) => {
                                if tx.send(event).await.is_err() {
                                    break;
                                }
                            }
                            Err(CommandParseError::Empty) => {}
                            Err(e) => {
                                log::warn!("Ignoring command '{}': {}", line.trim(), e);
                                let _ = write.write_all(format!("error: {}\n", e).as_bytes()).await;
                            }
                        }
                    }
                });
            }
            Err(e) => {
                log::error!("Failed to accept connection: {}", e);
            }
        }
    }
}
