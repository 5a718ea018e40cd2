// Chunked snapshot streaming - one JSON line per published render
use crate::domain::dashboard::DashboardSnapshot;
use axum::body::Body;
use axum::http::{Response, StatusCode, header};
use axum::response::IntoResponse;
use bytes::{BufMut, Bytes, BytesMut};
use futures::StreamExt;
use futures::stream::Stream;
use tokio::sync::watch;

/// Current snapshot first, then every newly published one, until the loop stops
pub fn snapshot_updates(
    mut rx: watch::Receiver<DashboardSnapshot>,
) -> impl Stream<Item = DashboardSnapshot> {
    async_stream::stream! {
        loop {
            let snapshot = rx.borrow_and_update().clone();
            yield snapshot;
            if rx.changed().await.is_err() {
                break;
            }
        }
    }
}

/// Serialize a snapshot as one newline-terminated JSON chunk
fn serialize_line(snapshot: &DashboardSnapshot) -> Result<Bytes, std::io::Error> {
    let json = serde_json::to_vec(snapshot)?;
    let mut chunk = BytesMut::with_capacity(json.len() + 1);
    chunk.put_slice(&json);
    chunk.put_u8(b'\n');
    Ok(chunk.freeze())
}

pub fn stream_from_receiver(rx: watch::Receiver<DashboardSnapshot>) -> impl IntoResponse {
    let byte_stream = snapshot_updates(rx).map(|snapshot| serialize_line(&snapshot));

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "application/x-ndjson")
        .header(header::CACHE_CONTROL, "no-cache")
        .body(Body::from_stream(byte_stream))
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::grid::GridConfig;
    use crate::domain::scene::Scene;

    fn snapshot(last: Option<&str>) -> DashboardSnapshot {
        DashboardSnapshot::new(
            Scene::new(&GridConfig::default()),
            Vec::new(),
            last.map(str::to_string),
            None,
        )
    }

    #[tokio::test]
    async fn test_stream_yields_current_then_updates() {
        let (tx, rx) = watch::channel(snapshot(None));
        let mut updates = Box::pin(snapshot_updates(rx));

        assert_eq!(updates.next().await.unwrap().last_timestamp, None);

        tx.send_replace(snapshot(Some("T1")));
        assert_eq!(
            updates.next().await.unwrap().last_timestamp.as_deref(),
            Some("T1")
        );

        drop(tx);
        assert!(updates.next().await.is_none());
    }

    #[test]
    fn test_serialize_line_is_newline_terminated() {
        let line = serialize_line(&snapshot(Some("T1"))).unwrap();
        assert_eq!(line.last(), Some(&b'\n'));
        let value: serde_json::Value = serde_json::from_slice(&line[..line.len() - 1]).unwrap();
        assert_eq!(value["last_timestamp"], "T1");
        assert_eq!(value["scene"]["grid_size"], 16);
    }
}
