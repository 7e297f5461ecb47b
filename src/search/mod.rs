//! Debounced search input.
//!
//! Keystrokes arrive as a stream of query strings; only the value that is
//! still current after a quiet period goes out as a request.

use std::time::Duration;

use async_stream::stream;
use futures::{Stream, StreamExt};
use tokio::time::{sleep_until, Instant};

/// Yield the last item of every burst once `quiet` has passed with no newer
/// item. A pending item is flushed when the input ends.
pub fn debounced<S>(input: S, quiet: Duration) -> impl Stream<Item = S::Item>
where
    S: Stream + Unpin,
{
    let mut input = input;
    stream! {
        let mut pending: Option<S::Item> = None;
        let mut deadline = Instant::now();

        loop {
            if pending.is_some() {
                tokio::select! {
                    next = input.next() => match next {
                        Some(item) => {
                            pending = Some(item);
                            deadline = Instant::now() + quiet;
                        }
                        None => {
                            if let Some(item) = pending.take() {
                                yield item;
                            }
                            break;
                        }
                    },
                    _ = sleep_until(deadline) => {
                        if let Some(item) = pending.take() {
                            yield item;
                        }
                    }
                }
            } else {
                match input.next().await {
                    Some(item) => {
                        pending = Some(item);
                        deadline = Instant::now() + quiet;
                    }
                    None => break,
                }
            }
        }
    }
}

/// Normalized search term; blank input clears the filter.
pub fn normalize_query(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::channel::mpsc;
    use futures::stream;

    #[tokio::test(start_paused = true)]
    async fn test_burst_yields_only_final_query() {
        let (tx, rx) = mpsc::unbounded();
        let out = debounced(rx, Duration::from_millis(500));
        tokio::pin!(out);

        let typing = tokio::spawn(async move {
            for query in ["a", "am", "ama", "amal"] {
                tx.unbounded_send(query.to_string()).unwrap();
                tokio::time::sleep(Duration::from_millis(120)).await;
            }
            tokio::time::sleep(Duration::from_millis(2000)).await;
            drop(tx);
        });

        let mut emitted = Vec::new();
        while let Some(q) = out.next().await {
            emitted.push(q);
        }
        typing.await.unwrap();

        assert_eq!(emitted, vec!["amal".to_string()]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_separate_bursts_each_emit() {
        let (tx, rx) = mpsc::unbounded();
        let out = debounced(rx, Duration::from_millis(500));
        tokio::pin!(out);

        let typing = tokio::spawn(async move {
            tx.unbounded_send("cl".to_string()).unwrap();
            tx.unbounded_send("cli".to_string()).unwrap();
            tokio::time::sleep(Duration::from_millis(800)).await;
            tx.unbounded_send("clie".to_string()).unwrap();
            tokio::time::sleep(Duration::from_millis(800)).await;
        });

        let first = out.next().await;
        let second = out.next().await;
        typing.await.unwrap();

        assert_eq!(first.as_deref(), Some("cli"));
        assert_eq!(second.as_deref(), Some("clie"));
        assert_eq!(out.next().await, None);
    }

    #[tokio::test]
    async fn test_pending_value_flushed_on_end() {
        let out = debounced(stream::iter(vec![1, 2, 3]), Duration::from_secs(60));
        let collected: Vec<i32> = out.collect().await;
        assert_eq!(collected, vec![3]);
    }

    #[test]
    fn test_normalize_query() {
        assert_eq!(normalize_query("  amal "), Some("amal".to_string()));
        assert_eq!(normalize_query("   "), None);
    }
}
