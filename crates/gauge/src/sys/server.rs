use super::SOCKET_PATH;
use crate::events::AppEvent;
use async_channel::Sender;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::net::{UnixListener, UnixStream};

/// Listens on [`SOCKET_PATH`] and forwards every well-formed command line to `tx`.
pub async fn run_server(tx: Sender<AppEvent>) {
    // a stale socket from a previous run blocks the bind
    if let Err(e) = fs_err::remove_file(SOCKET_PATH)
        && e.kind() != std::io::ErrorKind::NotFound
    {
        log::warn!("Could not remove stale socket: {}", e);
    }

    let listener = match UnixListener::bind(SOCKET_PATH) {
        Ok(listener) => listener,
        Err(e) => {
            log::error!("Failed to bind control socket {}: {}", SOCKET_PATH, e);
            return;
        }
    };
    log::info!("Listening for commands on {}", SOCKET_PATH);

    loop {
        match listener.accept().await {
            Ok((stream, _)) => {
                tokio::spawn(handle_connection(stream, tx.clone()));
            }
            Err(e) => log::error!("Failed to accept control connection: {}", e),
        }
    }
}

/// Reads commands until the client hangs up or the UI side goes away.
async fn handle_connection(stream: UnixStream, tx: Sender<AppEvent>) {
    let mut lines = BufReader::new(stream).lines();

    loop {
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(e) => {
                log::warn!("Control connection failed: {}", e);
                break;
            }
        };
        if line.trim().is_empty() {
            continue;
        }

        match line.parse::<AppEvent>() {
            Ok(event) => {
                log::debug!("Received command: {}", event);
                if tx.send(event).await.is_err() {
                    break;
                }
            }
            Err(e) => log::warn!("Ignoring command {:?}: {}", line, e),
        }
    }
}
