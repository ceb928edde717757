// SPDX-License-Identifier: Apache-2.0

mod support;

use catalogo_server::FakeStore;
use serde_json::{json, Value};
use std::sync::atomic::Ordering;
use std::sync::Arc;
use support::{create_product, spawn_server};
use tokio::io::{AsyncReadExt, AsyncWriteExt};

#[tokio::test]
async fn health_answers_over_a_raw_socket() {
    let base = spawn_server(Arc::new(FakeStore::default())).await;
    let addr = base.trim_start_matches("http://").to_string();

    let mut stream = tokio::net::TcpStream::connect(&addr)
        .await
        .expect("connect server");
    let request =
        format!("GET /health HTTP/1.1\r\nHost: {addr}\r\nConnection: close\r\n\r\n");
    stream
        .write_all(request.as_bytes())
        .await
        .expect("write request");

    let mut response = String::new();
    stream
        .read_to_string(&mut response)
        .await
        .expect("read response");
    assert!(response.starts_with("HTTP/1.1 200 OK\r\n"));
    assert!(response.contains("\"status\":\"ok\""));
    assert!(response.contains("x-request-id"));
}

#[tokio::test]
async fn create_then_list_round_trip() {
    let store = Arc::new(FakeStore::default());
    let base = spawn_server(store).await;

    let created = create_product(&base, "Boné Trucker", "BN-01", 29.9).await;
    assert_eq!(created["nome"], "Boné Trucker");
    assert_eq!(created["ativo"], true);
    assert!(created["foto_url"].is_null());
    assert!(created["id"].as_str().is_some());

    let rows: Vec<Value> = reqwest::get(format!("{base}/products"))
        .await
        .expect("list request")
        .json()
        .await
        .expect("list body");
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["codigo"], "BN-01");
}

#[tokio::test]
async fn create_rejects_invalid_bodies_with_portuguese_messages() {
    let base = spawn_server(Arc::new(FakeStore::default())).await;
    let client = reqwest::Client::new();

    let cases = [
        (
            json!({"nome": "ab", "codigo": "C1", "preco_atacado": 5, "categoria": "vestuario"}),
            "Nome inválido (mínimo 3 caracteres).",
        ),
        (
            json!({"nome": "Boné", "codigo": "C", "preco_atacado": 5, "categoria": "vestuario"}),
            "Código inválido (mínimo 2 caracteres).",
        ),
        (
            // Comma-decimal strings are the UI's job to convert.
            json!({"nome": "Boné", "codigo": "C1", "preco_atacado": "10,50", "categoria": "vestuario"}),
            "Preço de atacado inválido (use número maior que zero).",
        ),
        (
            json!({"nome": "Boné", "codigo": "C1", "preco_atacado": 5, "categoria": "brincos"}),
            "Categoria inválida. Use: promocoes, bolsas_pochetes, chapeus_bones_viseiras, \
             vestuario, acessorios_brinquedos_infantil, mais_vendidos, lar_casa",
        ),
    ];

    for (body, message) in cases {
        let resp = client
            .post(format!("{base}/products"))
            .json(&body)
            .send()
            .await
            .expect("create request");
        assert_eq!(resp.status().as_u16(), 400);
        let err: Value = resp.json().await.expect("error body");
        assert_eq!(err["message"], message);
    }
}

#[tokio::test]
async fn public_listing_filters_inactive_admin_does_not() {
    let store = Arc::new(FakeStore::default());
    let base = spawn_server(store).await;
    let client = reqwest::Client::new();

    let hat = create_product(&base, "Chapéu Palha", "CP-1", 15.0).await;
    let bag = create_product(&base, "Bolsa Couro", "BC-2", 49.0).await;

    let resp = client
        .patch(format!("{base}/products/{}/ativo", hat["id"].as_str().expect("id")))
        .json(&json!({"ativo": false}))
        .send()
        .await
        .expect("toggle request");
    assert_eq!(resp.status().as_u16(), 200);

    let public: Vec<Value> = reqwest::get(format!("{base}/products"))
        .await
        .expect("public list")
        .json()
        .await
        .expect("public body");
    assert_eq!(public.len(), 1);
    assert_eq!(public[0]["id"], bag["id"]);

    let admin: Vec<Value> = reqwest::get(format!("{base}/admin/products"))
        .await
        .expect("admin list")
        .json()
        .await
        .expect("admin body");
    assert_eq!(admin.len(), 2);
    // Newest first by creation time.
    assert_eq!(admin[0]["id"], bag["id"]);
    assert_eq!(admin[1]["id"], hat["id"]);
}

#[tokio::test]
async fn patch_updates_normalize_and_surface_not_found() {
    let store = Arc::new(FakeStore::default());
    let base = spawn_server(store).await;
    let client = reqwest::Client::new();

    let created = create_product(&base, "Meia Kit", "MK-3", 9.9).await;
    let id = created["id"].as_str().expect("id");

    let resp = client
        .patch(format!("{base}/products/{id}"))
        .json(&json!({"nome": "  Meia Kit 3 Pares  ", "precoAtacado": "12.5"}))
        .send()
        .await
        .expect("patch request");
    assert_eq!(resp.status().as_u16(), 200);
    let updated: Value = resp.json().await.expect("patched row");
    assert_eq!(updated["nome"], "Meia Kit 3 Pares");
    assert_eq!(updated["preco_atacado"], 12.5);
    assert_eq!(updated["codigo"], "MK-3", "untouched field survives");

    // No-op patch is valid.
    let resp = client
        .patch(format!("{base}/products/{id}"))
        .json(&json!({}))
        .send()
        .await
        .expect("empty patch");
    assert_eq!(resp.status().as_u16(), 200);

    // Explicit null clears the image.
    let resp = client
        .patch(format!("{base}/products/{id}"))
        .json(&json!({"foto_url": null}))
        .send()
        .await
        .expect("null foto_url patch");
    assert_eq!(resp.status().as_u16(), 200);
    let cleared: Value = resp.json().await.expect("cleared row");
    assert!(cleared["foto_url"].is_null());

    let resp = client
        .patch(format!("{base}/products/prod-9999"))
        .json(&json!({"nome": "Fantasma"}))
        .send()
        .await
        .expect("missing id patch");
    assert_eq!(resp.status().as_u16(), 404);
    let err: Value = resp.json().await.expect("error body");
    assert_eq!(err["message"], "Produto não encontrado.");
}

#[tokio::test]
async fn ativo_toggle_requires_a_boolean() {
    let store = Arc::new(FakeStore::default());
    let base = spawn_server(store).await;
    let client = reqwest::Client::new();

    let created = create_product(&base, "Pochete Neon", "PN-4", 19.0).await;
    let id = created["id"].as_str().expect("id");

    let resp = client
        .patch(format!("{base}/products/{id}/ativo"))
        .json(&json!({"ativo": "true"}))
        .send()
        .await
        .expect("string ativo request");
    assert_eq!(resp.status().as_u16(), 400);
    let err: Value = resp.json().await.expect("error body");
    assert_eq!(err["message"], "Campo 'ativo' deve ser boolean.");

    let resp = client
        .patch(format!("{base}/products/{id}/ativo"))
        .json(&json!({"ativo": false}))
        .send()
        .await
        .expect("boolean ativo request");
    assert_eq!(resp.status().as_u16(), 200);
    let row: Value = resp.json().await.expect("row");
    assert_eq!(row["ativo"], false);
}

#[tokio::test]
async fn delete_returns_no_content_and_is_idempotent() {
    let store = Arc::new(FakeStore::default());
    let base = spawn_server(store.clone()).await;
    let client = reqwest::Client::new();

    let created = create_product(&base, "Caneca Lar", "CL-5", 22.0).await;
    let id = created["id"].as_str().expect("id").to_string();

    let resp = client
        .delete(format!("{base}/products/{id}"))
        .send()
        .await
        .expect("delete request");
    assert_eq!(resp.status().as_u16(), 204);
    assert!(resp.bytes().await.expect("body").is_empty());
    assert!(store.products.lock().await.is_empty());

    // Deleting the same id again is still 204; the row is gone.
    let resp = client
        .delete(format!("{base}/products/{id}"))
        .send()
        .await
        .expect("second delete");
    assert_eq!(resp.status().as_u16(), 204);
}

#[tokio::test]
async fn store_outage_maps_to_500() {
    let store = Arc::new(FakeStore::default());
    let base = spawn_server(store.clone()).await;
    store.fail_requests.store(true, Ordering::Relaxed);

    let resp = reqwest::get(format!("{base}/products"))
        .await
        .expect("list during outage");
    assert_eq!(resp.status().as_u16(), 500);
    let err: Value = resp.json().await.expect("error body");
    assert_eq!(err["message"], "fake store outage");
}

#[tokio::test]
async fn settings_read_and_partial_update() {
    let store = Arc::new(FakeStore::default());
    let base = spawn_server(store).await;
    let client = reqwest::Client::new();

    let settings: Value = reqwest::get(format!("{base}/settings"))
        .await
        .expect("settings request")
        .json()
        .await
        .expect("settings body");
    assert_eq!(settings["id"], 1);
    let stale_updated_at = settings["updated_at"].as_str().expect("updated_at").to_string();

    let resp = client
        .patch(format!("{base}/settings"))
        .json(&json!({"company_name": "  Atacadão da Serra  ", "contact_phone": ""}))
        .send()
        .await
        .expect("settings patch");
    assert_eq!(resp.status().as_u16(), 200);
    let updated: Value = resp.json().await.expect("updated settings");
    assert_eq!(updated["company_name"], "Atacadão da Serra");
    assert_eq!(updated["catalog_name"], "Catálogo de Atacado", "absent field untouched");
    assert!(updated["contact_phone"].is_null(), "blank phone stored as null");
    assert_ne!(updated["updated_at"], stale_updated_at, "updated_at refreshed");

    let resp = client
        .patch(format!("{base}/settings"))
        .json(&json!({"catalog_name": "C"}))
        .send()
        .await
        .expect("invalid settings patch");
    assert_eq!(resp.status().as_u16(), 400);
    let err: Value = resp.json().await.expect("error body");
    assert_eq!(err["message"], "Nome do catálogo inválido (mínimo 2 caracteres).");
}
