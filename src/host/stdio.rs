//! Stdin/stdout JSON bridge for the host command channel.
//!
//! Reads newline-delimited JSON `CommandEnvelope` messages, dispatches them
//! through a [`CommandHandler`], and writes one `ResponseEnvelope` per line.
//!
//! Stdout is exclusively reserved for the JSON protocol; all diagnostic
//! output (tracing, logs) must be routed to stderr.

use crate::error::{MoodwellError, Result};
use crate::host::contract::{CommandEnvelope, CommandName, PARSE_ERROR_REQUEST_ID, ResponseEnvelope};
use crate::host::handler::CommandHandler;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader, BufWriter};

/// Run the bridge on the process stdin/stdout until stdin closes or a
/// `runtime.stop` command is received.
pub async fn run_stdio_bridge<H: CommandHandler>(handler: H) -> Result<()> {
    let reader = BufReader::new(tokio::io::stdin());
    let writer = BufWriter::new(tokio::io::stdout());
    run_bridge(&handler, reader, writer).await
}

/// Run the bridge over arbitrary line-oriented I/O.
///
/// Returns once the reader hits EOF or after the response to `runtime.stop`
/// has been flushed.
pub async fn run_bridge<H, R, W>(handler: &H, mut reader: R, mut writer: W) -> Result<()>
where
    H: CommandHandler + ?Sized,
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut line = String::new();

    loop {
        line.clear();
        let bytes_read = reader
            .read_line(&mut line)
            .await
            .map_err(|e| MoodwellError::Protocol(format!("failed to read command line: {e}")))?;

        if bytes_read == 0 {
            tracing::info!("input closed (EOF); shutting down bridge");
            break;
        }

        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        let envelope: CommandEnvelope = match serde_json::from_str(trimmed) {
            Ok(env) => env,
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    raw_line = %trimmed,
                    "failed to parse command envelope"
                );
                let response = ResponseEnvelope::error(
                    PARSE_ERROR_REQUEST_ID,
                    format!("failed to parse command envelope: {e}"),
                );
                write_response(&mut writer, &response).await?;
                continue;
            }
        };

        let is_stop = envelope.command == CommandName::RuntimeStop;
        let response = dispatch(handler, &envelope).await;
        write_response(&mut writer, &response).await?;

        if is_stop {
            tracing::info!("runtime.stop received; shutting down bridge");
            break;
        }
    }

    Ok(())
}

/// Validate and route one envelope; failures become error responses.
pub async fn dispatch<H: CommandHandler + ?Sized>(
    handler: &H,
    envelope: &CommandEnvelope,
) -> ResponseEnvelope {
    if let Err(e) = envelope.validate() {
        tracing::warn!(request_id = %envelope.request_id, error = %e, "invalid command envelope");
        return ResponseEnvelope::error(envelope.request_id.clone(), e.to_string());
    }

    match handler.handle(envelope).await {
        Ok(resp) => resp,
        Err(e) => {
            tracing::warn!(
                request_id = %envelope.request_id,
                command = envelope.command.as_str(),
                error = %e,
                "host command failed"
            );
            ResponseEnvelope::error(envelope.request_id.clone(), e.to_string())
        }
    }
}

/// Serialize one response as a JSON line and flush.
async fn write_response<W: AsyncWrite + Unpin>(
    writer: &mut W,
    response: &ResponseEnvelope,
) -> Result<()> {
    let json = serde_json::to_string(response)
        .map_err(|e| MoodwellError::Protocol(format!("failed to serialize response: {e}")))?;
    writer
        .write_all(json.as_bytes())
        .await
        .map_err(|e| MoodwellError::Protocol(format!("failed to write response: {e}")))?;
    writer
        .write_all(b"\n")
        .await
        .map_err(|e| MoodwellError::Protocol(format!("failed to write newline: {e}")))?;
    writer
        .flush()
        .await
        .map_err(|e| MoodwellError::Protocol(format!("failed to flush output: {e}")))?;
    Ok(())
}
