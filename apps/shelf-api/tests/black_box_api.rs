use std::path::PathBuf;

use reqwest::StatusCode;
use serde_json::{json, Value};
use shelf_api::{build_app, ApiConfig};
use shelf_service::UpdatePolicy;

struct TestServer {
    base_url: String,
    path: PathBuf,
    handle: tokio::task::JoinHandle<()>,
    _dir: tempfile::TempDir,
}

impl TestServer {
    async fn spawn(update_policy: UpdatePolicy) -> Self {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        let path = dir.path().join("products.json");

        let config = ApiConfig {
            port: 0,
            products_path: path.clone(),
            products_pretty: false,
            update_policy,
            log_json: false,
        };

        // Same router as prod, bound to an ephemeral port.
        let app = build_app(&config);
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{}", addr);

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url,
            path,
            handle,
            _dir: dir,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

fn product(code: &str, quantity: i64, price: f64) -> Value {
    json!({
        "name": format!("Product {code}"),
        "quantity": quantity,
        "code_value": code,
        "is_published": true,
        "expiration": "15/12/2023",
        "price": price,
    })
}

async fn create(client: &reqwest::Client, server: &TestServer, body: Value) -> Value {
    let res = client
        .post(server.url("/products"))
        .json(&body)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    let body: Value = res.json().await.unwrap();
    body["data"].clone()
}

#[tokio::test]
async fn test_ping() {
    let server = TestServer::spawn(UpdatePolicy::Strict).await;
    let res = reqwest::get(server.url("/ping")).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.text().await.unwrap(), "pong");
}

#[tokio::test]
async fn test_crud_round_trip_persists_to_file() {
    let server = TestServer::spawn(UpdatePolicy::Strict).await;
    let client = reqwest::Client::new();

    let created = create(&client, &server, product("S82254D", 5, 71.42)).await;
    assert_eq!(created["id"], 1);
    assert_eq!(created["code_value"], "S82254D");

    let on_disk: Vec<Value> =
        serde_json::from_slice(&std::fs::read(&server.path).unwrap()).unwrap();
    assert_eq!(on_disk.len(), 1);

    let res = client
        .get(server.url("/products/code/S82254D"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let res = client
        .patch(server.url("/products/1"))
        .json(&json!({"price": 99.99}))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let patched: Value = res.json().await.unwrap();
    assert_eq!(patched["data"]["price"], 99.99);
    assert_eq!(patched["data"]["quantity"], 5);

    let res = client
        .delete(server.url("/products/1"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NO_CONTENT);

    let res = client.get(server.url("/products/1")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["code"], "not_found");
}

#[tokio::test]
async fn test_create_rejections() {
    let server = TestServer::spawn(UpdatePolicy::Strict).await;
    let client = reqwest::Client::new();
    create(&client, &server, product("A", 1, 1.0)).await;

    let res = client
        .post(server.url("/products"))
        .json(&product("A", 1, 1.0))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CONFLICT);

    let mut stale = product("B", 1, 1.0);
    stale["expiration"] = json!("31/12/2022");
    let res = client
        .post(server.url("/products"))
        .json(&stale)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["code"], "date_out_of_range");

    let res = client
        .post(server.url("/products"))
        .header("content-type", "application/json")
        .body("{not json")
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let res = client.get(server.url("/products")).send().await.unwrap();
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_total_price_and_search() {
    let server = TestServer::spawn(UpdatePolicy::Strict).await;
    let client = reqwest::Client::new();
    create(&client, &server, product("TWO", 2, 10.0)).await;
    create(&client, &server, product("THREE", 3, 10.0)).await;

    let res = client
        .get(server.url("/products/total?list=[2,2,2]"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["data"]["total_price"], 36.3);
    assert_eq!(body["data"]["products"].as_array().unwrap().len(), 3);

    let res = client
        .get(server.url("/products/total?list=[1,1,1]"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CONFLICT);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["message"], "unavailable quantity for product id: 1");

    let res = client
        .get(server.url("/products/total?list=[1,x]"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let res = client
        .get(server.url("/products/search?priceGt=5"))
        .send()
        .await
        .unwrap();
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["data"].as_array().unwrap().len(), 2);

    let res = client
        .get(server.url("/products/search?priceGt=10"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_put_by_code_value_policies() {
    let server = TestServer::spawn(UpdatePolicy::Strict).await;
    let client = reqwest::Client::new();
    create(&client, &server, product("A", 1, 1.0)).await;

    let res = client
        .put(server.url("/products/code/GHOST"))
        .json(&product("NEW", 1, 1.0))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CONFLICT);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["code"], "key_mismatch");

    let res = client
        .put(server.url("/products/9"))
        .json(&product("NEW", 1, 1.0))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let upsert = TestServer::spawn(UpdatePolicy::Upsert).await;
    let res = client
        .put(upsert.url("/products/9"))
        .json(&product("NEW", 1, 1.0))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["data"]["id"], 1);
}
