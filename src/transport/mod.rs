//! Text-frame transports between clients and the server.

#[async_trait::async_trait]
pub trait Transport: Send {
    async fn send(&mut self, frame: String) -> anyhow::Result<()>;
    /// Next inbound frame, or `None` once the peer has closed the connection.
    async fn recv(&mut self) -> anyhow::Result<Option<String>>;
}

pub mod in_memory;
pub mod ws;
