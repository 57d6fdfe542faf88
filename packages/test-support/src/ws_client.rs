//! WebSocket client for driving the game gateway from tests.

use std::time::Duration;

use futures_util::{SinkExt, StreamExt};
use serde_json::{json, Value};
use tokio::net::TcpStream;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};

type BoxError = Box<dyn std::error::Error>;

/// WebSocket test client speaking the `{ event, payload }` envelope.
pub struct WebSocketClient {
    stream: WebSocketStream<MaybeTlsStream<TcpStream>>,
}

impl WebSocketClient {
    /// Connect to a WebSocket endpoint, retrying until success or timeout.
    pub async fn connect_retry(url: &str, timeout: Duration) -> Result<Self, BoxError> {
        let start = tokio::time::Instant::now();
        loop {
            match connect_async(url).await {
                Ok((stream, _)) => return Ok(Self { stream }),
                Err(err) => {
                    if start.elapsed() >= timeout {
                        return Err(Box::new(err));
                    }
                    tokio::time::sleep(Duration::from_millis(5)).await;
                }
            }
        }
    }

    /// Send an envelope with the given event name and payload.
    pub async fn send_event(&mut self, event: &str, payload: Value) -> Result<(), BoxError> {
        let frame = json!({ "event": event, "payload": payload }).to_string();
        self.send_text(&frame).await
    }

    /// Send a raw text frame.
    pub async fn send_text(&mut self, text: &str) -> Result<(), BoxError> {
        self.stream.send(Message::Text(text.into())).await?;
        Ok(())
    }

    /// Receive the next JSON envelope. Non-text frames are skipped.
    pub async fn recv_json_timeout(&mut self, timeout: Duration) -> Result<Value, BoxError> {
        let deadline = tokio::time::Instant::now() + timeout;
        loop {
            let remaining = deadline.saturating_duration_since(tokio::time::Instant::now());
            let next = tokio::time::timeout(remaining, self.stream.next())
                .await
                .map_err(|_| "timeout waiting for message")?;
            match next {
                Some(Ok(Message::Text(text))) => return Ok(serde_json::from_str(text.as_str())?),
                Some(Ok(Message::Close(_))) | None => return Err("connection closed".into()),
                Some(Ok(_)) => continue,
                Some(Err(err)) => return Err(Box::new(err)),
            }
        }
    }

    /// Skip envelopes until one with the given event arrives.
    pub async fn expect_event(&mut self, event: &str, timeout: Duration) -> Result<Value, BoxError> {
        let deadline = tokio::time::Instant::now() + timeout;
        loop {
            let remaining = deadline.saturating_duration_since(tokio::time::Instant::now());
            if remaining.is_zero() {
                return Err(format!("timeout waiting for {event}").into());
            }
            let msg = self.recv_json_timeout(remaining).await?;
            if msg["event"] == event {
                return Ok(msg);
            }
        }
    }

    /// Close the connection.
    pub async fn close(&mut self) -> Result<(), BoxError> {
        self.stream.close(None).await?;
        Ok(())
    }
}
