//! Buffers a chunked body into one contiguous buffer before any parsing.

use bytes::{Bytes, BytesMut};
use futures::stream::{Stream, StreamExt};

/// Drain `stream` into a single buffer. The first chunk error aborts collection.
pub async fn collect_body<S, E>(stream: S) -> std::result::Result<Bytes, E>
where
    S: Stream<Item = std::result::Result<Bytes, E>>,
{
    tokio::pin!(stream);

    let mut buffer = BytesMut::new();
    while let Some(chunk) = stream.next().await {
        buffer.extend_from_slice(&chunk?);
    }

    Ok(buffer.freeze())
}
