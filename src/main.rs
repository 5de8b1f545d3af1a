use battleship_server::{
    init_logging, serve_connection, GameServer, ServerConfig, WsTransport, DEFAULT_BIND,
};
use clap::Parser;
use log::{debug, info, warn};
use tokio::net::TcpListener;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Parser)]
enum Commands {
    /// Accept WebSocket clients and run games between them.
    Serve {
        #[arg(long, default_value = DEFAULT_BIND)]
        bind: String,
        #[arg(long, help = "Fix RNG seed for reproducible random attacks (e.g., --seed 12345)")]
        seed: Option<u64>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { bind, seed } => {
            let config = ServerConfig { bind, seed };
            if let Some(s) = config.seed {
                info!("using fixed seed {}", s);
            }
            let listener = TcpListener::bind(&config.bind).await?;
            info!("listening for WebSocket clients on {}", listener.local_addr()?);

            let (server, handle) = GameServer::new(&config);
            tokio::spawn(server.run());

            loop {
                let (stream, addr) = listener.accept().await?;
                debug!("tcp connection from {}", addr);
                let handle = handle.clone();
                tokio::spawn(async move {
                    let transport = match WsTransport::accept(stream).await {
                        Ok(transport) => transport,
                        Err(e) => {
                            warn!("websocket handshake with {} failed: {}", addr, e);
                            return;
                        }
                    };
                    let _ = serve_connection(transport, handle).await;
                });
            }
        }
    }
}
