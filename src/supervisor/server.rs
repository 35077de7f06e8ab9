use std::future::IntoFuture;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;

use crate::config::Config;

use super::error::ServeError;
use super::routes::{build_router, SupervisorContext};
use super::shutdown::ShutdownManager;
use super::slot::ProcessSlot;

pub struct SupervisorServer {
    pub addr: SocketAddr,
    /// The bound listener, kept alive between try_bind() and run().
    listener: Option<TcpListener>,
    router: Router,
    slot: ProcessSlot,
    shutdown: Arc<ShutdownManager>,
}

impl SupervisorServer {
    pub fn new(config: &Config) -> Self {
        let context = SupervisorContext::from_config(&config.supervisor);
        let slot = context.slot();
        Self {
            addr: SocketAddr::from(([127, 0, 0, 1], 0)), // Will be determined at bind time
            listener: None,
            router: build_router(context, &config.endpoints),
            slot,
            shutdown: Arc::new(ShutdownManager::new()),
        }
    }

    /// Bind the configured address. Port `0` picks a free port.
    pub async fn try_bind(&mut self, bind_addr: &str) -> Result<SocketAddr, ServeError> {
        let addr: SocketAddr = bind_addr
            .parse()
            .map_err(|_| ServeError::InvalidBindAddress {
                addr: bind_addr.to_string(),
            })?;

        let listener = TcpListener::bind(addr)
            .await
            .map_err(|source| ServeError::Bind { addr, source })?;
        let actual_addr = listener.local_addr()?;

        self.addr = actual_addr;
        self.listener = Some(listener);
        tracing::info!("Supervisor bound to {}", actual_addr);
        Ok(actual_addr)
    }

    pub fn slot(&self) -> ProcessSlot {
        self.slot.clone()
    }

    pub fn handle(&self) -> SupervisorHandle {
        SupervisorHandle {
            shutdown: self.shutdown.clone(),
        }
    }

    /// Serve until shutdown, then kill any running job.
    ///
    /// Consumes self to take ownership of the pre-bound listener.
    pub async fn run(self) -> Result<(), ServeError> {
        let listener = self.listener.ok_or(ServeError::NotBound)?;

        tracing::info!("Starting supervisor on {}", self.addr);

        let shutdown = self.shutdown.clone();
        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                if let Err(err) = shutdown.wait_for_shutdown().await {
                    tracing::warn!(error = %err, "Signal handler failed; shutting down");
                }
            })
            .into_future()
            .await?;

        self.slot.shutdown();
        tracing::info!("Supervisor stopped");
        Ok(())
    }
}

#[derive(Clone)]
pub struct SupervisorHandle {
    shutdown: Arc<ShutdownManager>,
}

impl SupervisorHandle {
    pub fn shutdown(&self) {
        self.shutdown.signal_shutdown();
    }
}
