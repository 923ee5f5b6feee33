mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::json;

#[tokio::test]
async fn school_crud_roundtrip() -> Result<()> {
    let server = common::spawn_server().await?;
    let token = server.register_and_login("admin", "hunter2").await?;

    // Create: the store assigns ids starting at 1
    let res = server
        .client
        .post(server.url("/api/schools"))
        .bearer_auth(&token)
        .json(&json!({
            "name": "Lincoln High",
            "address": "1 Main St",
            "directorName": "Pat Doe"
        }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);

    let created = res.json::<serde_json::Value>().await?;
    assert_eq!(created["id"], 1);
    assert_eq!(created["name"], "Lincoln High");
    assert_eq!(created["directorName"], "Pat Doe");

    // List
    let res = server
        .client
        .get(server.url("/api/schools"))
        .bearer_auth(&token)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let listed = res.json::<serde_json::Value>().await?;
    assert_eq!(listed.as_array().unwrap().len(), 1);

    // Get by id
    let res = server
        .client
        .get(server.url("/api/schools/1"))
        .bearer_auth(&token)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let fetched = res.json::<serde_json::Value>().await?;
    assert_eq!(fetched["name"], "Lincoln High");

    // Delete, then the row is gone
    let res = server
        .client
        .delete(server.url("/api/schools/1"))
        .bearer_auth(&token)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);

    let res = server
        .client
        .get(server.url("/api/schools/1"))
        .bearer_auth(&token)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn school_ids_increment() -> Result<()> {
    let server = common::spawn_server().await?;
    let token = server.register_and_login("admin", "hunter2").await?;

    for (i, name) in ["Lincoln High", "Roosevelt Middle"].iter().enumerate() {
        let res = server
            .client
            .post(server.url("/api/schools"))
            .bearer_auth(&token)
            .json(&json!({ "name": name, "address": "1 Main St", "directorName": "Pat Doe" }))
            .send()
            .await?;
        let created = res.json::<serde_json::Value>().await?;
        assert_eq!(created["id"], (i + 1) as i64);
    }
    Ok(())
}

#[tokio::test]
async fn get_unknown_school_returns_404() -> Result<()> {
    let server = common::spawn_server().await?;
    let token = server.register_and_login("admin", "hunter2").await?;

    let res = server
        .client
        .get(server.url("/api/schools/42"))
        .bearer_auth(&token)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn delete_is_idempotent() -> Result<()> {
    let server = common::spawn_server().await?;
    let token = server.register_and_login("admin", "hunter2").await?;

    // Deleting a row that never existed is still a 200
    for _ in 0..2 {
        let res = server
            .client
            .delete(server.url("/api/schools/42"))
            .bearer_auth(&token)
            .send()
            .await?;
        assert_eq!(res.status(), StatusCode::OK);
    }
    Ok(())
}
