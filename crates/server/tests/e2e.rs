use std::net::SocketAddr;

use reqwest::StatusCode as HttpStatusCode;
use serde_json::json;
use tokio::net::TcpListener;

use server::{startup::build_app, AppState};

struct TestApp {
    base_url: String,
}

/// Serve the full router on an ephemeral port backed by the in-memory store.
async fn start_server() -> anyhow::Result<TestApp> {
    let app = build_app(AppState::in_memory());
    let listener = TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0)).await?;
    let addr: SocketAddr = listener.local_addr()?;
    let base_url = format!("http://{}:{}", addr.ip(), addr.port());

    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await { eprintln!("server error: {}", e); }
    });

    Ok(TestApp { base_url })
}

#[tokio::test]
async fn e2e_public_health() -> anyhow::Result<()> {
    let app = start_server().await?;
    let res = reqwest::get(format!("{}/health", app.base_url)).await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["status"], "ok");
    Ok(())
}

#[tokio::test]
async fn e2e_user_and_post_crud() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = reqwest::Client::new();

    let res = c.post(format!("{}/users", app.base_url))
        .json(&json!({"email": "e2e@example.com", "name": "E2E"}))
        .send().await?;
    assert_eq!(res.status(), HttpStatusCode::CREATED);
    let user = res.json::<serde_json::Value>().await?;
    let uid = user["id"].as_i64().unwrap();

    let res = c.post(format!("{}/posts", app.base_url))
        .json(&json!({"title": "Hello", "content": "world", "author_id": uid}))
        .send().await?;
    assert_eq!(res.status(), HttpStatusCode::CREATED);
    let post = res.json::<serde_json::Value>().await?;
    let pid = post["id"].as_i64().unwrap();

    let res = c.patch(format!("{}/posts/{}", app.base_url, pid))
        .json(&json!({"published": true}))
        .send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let patched = res.json::<serde_json::Value>().await?;
    assert_eq!(patched["published"], true);
    assert_eq!(patched["content"], "world");

    let res = c.delete(format!("{}/posts/{}", app.base_url, pid)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::NO_CONTENT);

    let res = c.get(format!("{}/posts", app.base_url)).send().await?;
    assert_eq!(res.json::<serde_json::Value>().await?, json!([]));
    Ok(())
}
