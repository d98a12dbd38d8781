use std::{future::Future, net::SocketAddr, sync::Arc};

use log::info;
use tokio::net::{TcpListener, ToSocketAddrs};

use crate::{Result, predictor::Predictor, routes};

/// The prediction web service.
pub struct Server {
    listener: TcpListener,
    predictor: Arc<Predictor>,
}

impl Server {
    /// Binds the listening socket.
    ///
    /// # Arguments
    /// * `addr` - The address to listen at, port `0` picks a free one.
    /// * `predictor` - The loaded model every request is answered from.
    ///
    /// # Errors
    /// Returns `ServeErr::Io` if the address can't be bound.
    pub async fn bind<A: ToSocketAddrs>(addr: A, predictor: Predictor) -> Result<Self> {
        let listener = TcpListener::bind(addr).await?;
        info!("listening at http://{}", listener.local_addr()?);

        Ok(Self {
            listener,
            predictor: Arc::new(predictor),
        })
    }

    pub fn local_addr(&self) -> Result<SocketAddr> {
        Ok(self.listener.local_addr()?)
    }

    /// Serves requests forever.
    pub async fn run(self) -> Result<()> {
        self.run_until(std::future::pending()).await
    }

    /// Serves requests until `shutdown` completes, then lets in-flight requests finish.
    ///
    /// # Errors
    /// Returns `ServeErr::Io` if the listener fails.
    pub async fn run_until<F>(self, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        axum::serve(self.listener, routes::app(self.predictor))
            .with_graceful_shutdown(shutdown)
            .await?;

        info!("server stopped");
        Ok(())
    }
}
