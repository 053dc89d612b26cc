use std::net::SocketAddr;
use log::debug;
use tokio::net::{lookup_host, TcpListener, TcpSocket};
use crate::{Error, Result};

mod server;
mod config;

pub use server::HandshakeServer;
pub use config::*;

/// Pending-connection queue length
const LISTEN_BACKLOG: u32 = 1024;

/// Bind a listener with SO_REUSEADDR on the configured address.
///
/// The host may be a name (`localhost`); the first resolved address is used.
pub async fn bind_server(config: &ServerConfig) -> Result<TcpListener> {
    let addr = resolve(config).await?;

    let socket = match addr {
        SocketAddr::V4(_) => TcpSocket::new_v4()?,
        SocketAddr::V6(_) => TcpSocket::new_v6()?,
    };
    socket.set_reuseaddr(true)?;
    socket.bind(addr)?;

    debug!("Bound {} as {}", config.addr(), addr);
    Ok(socket.listen(LISTEN_BACKLOG)?)
}

async fn resolve(config: &ServerConfig) -> Result<SocketAddr> {
    let mut addrs = lookup_host((config.host.as_str(), config.port))
        .await
        .map_err(|e| Error::config(format!("Cannot resolve {}: {}", config.addr(), e)))?;

    addrs
        .next()
        .ok_or_else(|| Error::config(format!("No address for {}", config.addr())))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_bind_resolves_host_name() {
        let config = ServerConfig::builder()
            .host("localhost")
            .port(19520)
            .build()
            .unwrap();

        let listener = bind_server(&config).await.unwrap();
        let local = listener.local_addr().unwrap();
        assert!(local.ip().is_loopback());
        assert_eq!(local.port(), 19520);
    }

    #[tokio::test]
    async fn test_bind_rejects_unresolvable_host() {
        let config = ServerConfig::builder()
            .host("no such host")
            .port(19521)
            .build()
            .unwrap();

        let err = bind_server(&config).await.unwrap_err();
        assert!(matches!(err, Error::Configuration(_)));
    }
}
