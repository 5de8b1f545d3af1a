use futures_util::{SinkExt, StreamExt};
use tokio::io::{AsyncRead, AsyncWrite};
use tokio::net::TcpStream;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream};

use crate::transport::Transport;

/// WebSocket connection carrying one JSON envelope per text message.
pub struct WsTransport<S> {
    stream: WebSocketStream<S>,
}

impl WsTransport<TcpStream> {
    /// Complete the server side of the WebSocket handshake.
    pub async fn accept(stream: TcpStream) -> anyhow::Result<Self> {
        let stream = tokio_tungstenite::accept_async(stream).await?;
        Ok(Self { stream })
    }
}

impl WsTransport<MaybeTlsStream<TcpStream>> {
    /// Open a client connection to `url` (e.g. `ws://127.0.0.1:3000`).
    pub async fn connect(url: &str) -> anyhow::Result<Self> {
        let (stream, _response) = tokio_tungstenite::connect_async(url).await?;
        Ok(Self { stream })
    }
}

#[async_trait::async_trait]
impl<S> Transport for WsTransport<S>
where
    S: AsyncRead + AsyncWrite + Unpin + Send,
{
    async fn send(&mut self, frame: String) -> anyhow::Result<()> {
        self.stream.send(Message::text(frame)).await?;
        Ok(())
    }

    async fn recv(&mut self) -> anyhow::Result<Option<String>> {
        while let Some(msg) = self.stream.next().await {
            match msg? {
                Message::Text(text) => return Ok(Some(text.as_str().to_owned())),
                Message::Binary(bytes) => return Ok(Some(String::from_utf8(bytes.to_vec())?)),
                Message::Close(_) => return Ok(None),
                // ping/pong are answered by tungstenite
                _ => continue,
            }
        }
        Ok(None)
    }
}
