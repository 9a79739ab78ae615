// Server-sent-events streaming utilities
use crate::domain::reading::Reading;
use axum::response::sse::{Event, KeepAlive, Sse};
use futures::Stream;
use std::convert::Infallible;
use tokio::sync::broadcast;

/// Turn a broadcast receiver of readings into an SSE response. The stream
/// ends when the sender side is dropped; a slow client that lags simply
/// skips the readings it missed.
pub fn sse_from_receiver(
    mut rx: broadcast::Receiver<Reading>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let stream = async_stream::stream! {
        loop {
            match rx.recv().await {
                Ok(reading) => match Event::default().json_data(&reading) {
                    Ok(event) => yield Ok(event),
                    Err(e) => tracing::error!("failed to encode reading event: {}", e),
                },
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    tracing::warn!("stream subscriber lagged, skipped {} readings", skipped);
                }
                Err(broadcast::error::RecvError::Closed) => break,
            }
        }
    };

    Sse::new(stream).keep_alive(KeepAlive::default())
}
