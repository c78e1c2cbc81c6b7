use axum::{
    Router,
    routing::{get, post},
};

use std::sync::Arc;

use crate::{products, vouchers};
use engine::Engine;

#[derive(Clone)]
pub struct ServerState {
    pub engine: Arc<Engine>,
}

fn router(state: ServerState) -> Router {
    Router::new()
        .route("/products", get(products::list).post(products::create))
        .route("/products/low-stock", get(products::list_low_stock))
        .route(
            "/products/{product_id}",
            get(products::detail).delete(products::delete),
        )
        .route("/vouchers", get(vouchers::list).post(vouchers::create))
        .route("/vouchers/form", post(vouchers::create_form))
        .route(
            "/vouchers/{voucher_number}",
            get(vouchers::detail)
                .put(vouchers::update)
                .delete(vouchers::delete),
        )
        .with_state(state)
}

/// Build the application router. Exposed so tests can drive it directly.
pub fn app(engine: Engine) -> Router {
    router(ServerState {
        engine: Arc::new(engine),
    })
}

pub async fn run(engine: Engine) {
    let listener = match tokio::net::TcpListener::bind("127.0.0.1:3000").await {
        Ok(listener) => listener,
        Err(err) => {
            tracing::error!("failed to bind server listener: {err}");
            return;
        }
    };
    if let Err(err) = run_with_listener(engine, listener).await {
        tracing::error!("server failed: {err}");
    }
}

pub async fn run_with_listener(
    engine: Engine,
    listener: tokio::net::TcpListener,
) -> Result<(), std::io::Error> {
    let addr = listener.local_addr()?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app(engine)).await
}

pub fn spawn_with_listener(
    engine: Engine,
    listener: tokio::net::TcpListener,
) -> Result<std::net::SocketAddr, std::io::Error> {
    let addr = listener.local_addr()?;

    tokio::spawn(async move {
        if let Err(err) = run_with_listener(engine, listener).await {
            tracing::error!("server failed: {err}");
        }
    });

    Ok(addr)
}
