//! Character-by-character reveal of assistant text.
//!
//! Presentation only: the full message is already committed when this runs.

use std::time::Duration;

use tokio::io::{AsyncWrite, AsyncWriteExt};

/// Write `text` one character at a time, pausing `delay` after each.
/// A zero delay writes it in one go.
pub async fn reveal<W>(out: &mut W, text: &str, delay: Duration) -> std::io::Result<()>
where
    W: AsyncWrite + Unpin,
{
    if delay.is_zero() {
        out.write_all(text.as_bytes()).await?;
        return out.flush().await;
    }

    let mut buf = [0u8; 4];
    for ch in text.chars() {
        out.write_all(ch.encode_utf8(&mut buf).as_bytes()).await?;
        out.flush().await?;
        tokio::time::sleep(delay).await;
    }
    Ok(())
}
