use log::{debug, warn};

use crate::server::ServerHandle;
use crate::transport::Transport;

/// Pump frames between one client transport and the server until either
/// side closes. The server is told about the disconnect in every case.
pub async fn serve_connection<T: Transport>(mut transport: T, server: ServerHandle) -> anyhow::Result<()> {
    let (client_id, mut outbound) = server.connect()?;
    let result = pump(&mut transport, &server, client_id, &mut outbound).await;
    server.disconnect(client_id);
    if let Err(e) = &result {
        warn!("connection {} ended with an error: {}", client_id, e);
    }
    result
}

async fn pump<T: Transport>(
    transport: &mut T,
    server: &ServerHandle,
    client_id: crate::broadcast::ClientId,
    outbound: &mut tokio::sync::mpsc::UnboundedReceiver<String>,
) -> anyhow::Result<()> {
    loop {
        tokio::select! {
            inbound = transport.recv() => match inbound? {
                Some(frame) => server.send_frame(client_id, frame)?,
                None => {
                    debug!("connection {} closed by peer", client_id);
                    return Ok(());
                }
            },
            frame = outbound.recv() => match frame {
                Some(frame) => transport.send(frame).await?,
                None => return Ok(()),
            },
        }
    }
}
