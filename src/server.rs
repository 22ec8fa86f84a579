//! HTTP server lifecycle
//!
//! Serving stops accepting connections as soon as the shutdown signal
//! arrives. Requests already in flight keep running; only when they fail to
//! drain within the grace period are their calculations cancelled.

use std::future::Future;
use std::io;
use std::sync::Arc;
use std::time::Duration;

use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::routes::create_router;
use crate::services::cancel::Canceller;
use crate::state::AppState;

/// Serves the API on `listener` until `signal` resolves and in-flight
/// requests drain, or the grace period runs out.
pub async fn serve<F>(
    listener: TcpListener,
    app_state: AppState,
    signal: F,
    grace: Duration,
) -> io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let draining = Arc::new(Canceller::new());
    let app = create_router(app_state.clone());

    let notice = draining.clone();
    let server = async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                signal.await;
                info!("shutting down service");
                notice.cancel();
            })
            .await
    };

    tokio::select! {
        result = server => result,
        _ = cancel_after_grace(&draining, &app_state.shutdown, grace) => {
            warn!("in-flight requests did not drain in time, forcing shutdown");
            Ok(())
        }
    }
}

/// Once draining starts, waits out the grace period and then cancels every
/// calculation still running.
async fn cancel_after_grace(draining: &Canceller, calculations: &Canceller, grace: Duration) {
    draining.cancelled().await;
    tokio::time::sleep(grace).await;
    calculations.cancel();
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::oneshot;

    #[tokio::test]
    async fn test_calculations_survive_until_grace_expires() {
        let draining = Arc::new(Canceller::new());
        let calculations = Arc::new(Canceller::new());

        let task = {
            let draining = draining.clone();
            let calculations = calculations.clone();
            tokio::spawn(async move {
                cancel_after_grace(&draining, &calculations, Duration::from_millis(300)).await
            })
        };

        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(!calculations.is_cancelled());

        draining.cancel();
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert!(!calculations.is_cancelled());
        assert!(calculations.signal().check().is_ok());

        tokio::time::timeout(Duration::from_secs(5), task)
            .await
            .unwrap()
            .unwrap();
        assert!(calculations.is_cancelled());
    }

    #[tokio::test]
    async fn test_graceful_shutdown_leaves_calculations_alone() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let state = AppState::in_memory();
        let (stop, stopped) = oneshot::channel::<()>();

        let server = tokio::spawn(serve(
            listener,
            state.clone(),
            async move {
                let _ = stopped.await;
            },
            Duration::from_secs(5),
        ));

        {
            let client = reqwest::Client::new();
            let response = client
                .get(format!("http://{addr}/health"))
                .send()
                .await
                .unwrap();
            assert_eq!(response.status(), reqwest::StatusCode::OK);
        }

        stop.send(()).unwrap();
        let result = tokio::time::timeout(Duration::from_secs(5), server)
            .await
            .unwrap()
            .unwrap();
        assert!(result.is_ok());
        assert!(!state.shutdown.is_cancelled());
    }
}
