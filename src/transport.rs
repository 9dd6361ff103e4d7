//! JSON-lines transport: commands on a reader, events on a writer.
//!
//! One command per input line; blank lines are skipped and undecodable
//! lines produce an `invalid_command` error event without reaching the
//! session. End of input closes the command channel, then every event the
//! session still produces is written before returning.
//!
//! Events are drained on every loop turn. A decoded command is held until
//! the command channel has room, so a full channel never stops the event
//! side and the session can always make progress.

#[cfg(test)]
#[path = "transport_test.rs"]
mod transport_test;

use messages::{Command, ErrorCode, Event, decode_command, encode_event};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tokio::sync::mpsc;
use tracing::{info, warn};

use crate::error::BridgeError;
use crate::session::SessionHandle;

/// Relay lines between `reader`/`writer` and `session` until input ends
/// and the session drains.
///
/// # Errors
///
/// Returns [`BridgeError::Io`] on read or write failure and
/// [`BridgeError::ChannelClosed`] if the session exits while input remains.
pub async fn run<R, W>(reader: R, mut writer: W, mut session: SessionHandle) -> Result<(), BridgeError>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let session_id = session.session_id();
    info!(%session_id, "transport: relaying");
    let mut commands = session.take_sender();
    let mut held: Option<Command> = None;
    let mut lines = reader.lines();
    let mut input_closed = false;

    loop {
        if input_closed {
            commands = None;
            input_closed = false;
        }
        tokio::select! {
            line = lines.next_line(), if commands.is_some() && held.is_none() => {
                let Some(line) = line? else {
                    info!(%session_id, "transport: input closed");
                    input_closed = true;
                    continue;
                };
                if line.trim().is_empty() {
                    continue;
                }
                match decode_command(&line) {
                    Ok(command) => held = Some(command),
                    Err(e) => {
                        warn!(%session_id, error = %e, "transport: rejected command line");
                        write_event(&mut writer, &Event::error(ErrorCode::InvalidCommand, e.to_string())).await?;
                    }
                }
            }
            permit = reserve(commands.as_ref()), if held.is_some() => {
                let permit = permit?;
                if let Some(command) = held.take() {
                    permit.send(command);
                }
            }
            event = session.recv() => {
                let Some(event) = event else { break };
                write_event(&mut writer, &event).await?;
            }
        }
    }

    if held.is_some() {
        return Err(BridgeError::ChannelClosed);
    }
    session.join().await
}

async fn reserve(commands: Option<&mpsc::Sender<Command>>) -> Result<mpsc::Permit<'_, Command>, BridgeError> {
    let commands = commands.ok_or(BridgeError::ChannelClosed)?;
    commands.reserve().await.map_err(|_| BridgeError::ChannelClosed)
}

async fn write_event<W: AsyncWrite + Unpin>(writer: &mut W, event: &Event) -> Result<(), BridgeError> {
    let mut line = encode_event(event)?;
    line.push('\n');
    writer.write_all(line.as_bytes()).await?;
    writer.flush().await?;
    Ok(())
}
