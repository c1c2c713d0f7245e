use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::info;

use crate::config::Config;
use crate::http::connection::Connection;
use crate::static_files::StaticFiles;

pub async fn run(cfg: &Config) -> anyhow::Result<()> {
    let listener = TcpListener::bind(&cfg.server.listen_addr)
        .await
        .with_context(|| format!("Failed to bind {}", cfg.server.listen_addr))?;
    info!("Listening on {}", cfg.server.listen_addr);
    info!("Serving files from {}", cfg.static_files.root.display());

    serve(listener, cfg).await
}

/// Accepts connections forever, one task per connection.
pub async fn serve(listener: TcpListener, cfg: &Config) -> anyhow::Result<()> {
    let files = Arc::new(StaticFiles::from_config(&cfg.static_files));
    let server = Arc::new(cfg.server.clone());

    loop {
        let (socket, peer) = listener.accept().await?;
        info!("Accepted connection from {}", peer);

        let files = Arc::clone(&files);
        let server = Arc::clone(&server);
        tokio::spawn(async move {
            let mut conn = Connection::new(socket, files, &server);
            if let Err(e) = conn.run().await {
                tracing::error!("Connection error from {}: {}", peer, e);
            }
        });
    }
}
