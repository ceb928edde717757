// SPDX-License-Identifier: Apache-2.0

use catalogo_server::{build_router, AppState, FakeStore};
use serde_json::{json, Value};
use std::sync::Arc;

/// Serves the router on an ephemeral port and returns its base URL.
pub async fn spawn_server(store: Arc<FakeStore>) -> String {
    let app = build_router(AppState::new(store));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind listener");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("serve app");
    });
    format!("http://{addr}")
}

/// Creates a product through the API and returns the stored row.
pub async fn create_product(base: &str, nome: &str, codigo: &str, preco: f64) -> Value {
    let resp = reqwest::Client::new()
        .post(format!("{base}/products"))
        .json(&json!({
            "nome": nome,
            "codigo": codigo,
            "preco_atacado": preco,
            "categoria": "vestuario"
        }))
        .send()
        .await
        .expect("create request");
    assert_eq!(resp.status().as_u16(), 201);
    resp.json().await.expect("created row")
}
