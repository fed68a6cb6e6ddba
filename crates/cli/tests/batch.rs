use axum::extract::Path;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use cwfetch_cli::batch::{BatchSummary, run_batch};
use cwfetch_extractor::{ExtractorConfig, ExtractorRegistry};
use serde_json::{Value, json};

async fn video_meta(Path(segment): Path<String>) -> Response {
    match segment.as_str() {
        "guid_d848488f-f62a-40fd-af1f-6440b1821aab" => Json(json!({
            "result": "ok",
            "video": {
                "title": "Ready Or Not",
                "series_name": "All American: Homecoming",
                "season": "3",
                "episode": "301",
                "start_time": "2024-07-09T10:00:00Z"
            }
        }))
        .into_response(),
        "guid_00000000-0000-0000-0000-000000000000" => {
            Json(json!({ "result": "error", "msg": "Video not found" })).into_response()
        }
        _ => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
    }
}

/// Create a registry backed by a local fake video-meta feed.
async fn test_registry() -> ExtractorRegistry {
    let app = Router::new().route(
        "/feed/mobileapp/video-meta/apiversion_12/{segment}",
        get(video_meta),
    );
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    let config = ExtractorConfig {
        api_base: format!("http://{addr}"),
        ..Default::default()
    };
    let client = reqwest::Client::builder().no_proxy().build().unwrap();
    ExtractorRegistry::with_defaults(config, client)
}

fn lines(out: &[u8]) -> Vec<Value> {
    String::from_utf8(out.to_vec())
        .unwrap()
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect()
}

#[tokio::test]
async fn batch_writes_one_line_per_url() {
    let registry = test_registry().await;
    let urls = vec![
        "https://www.cwtv.com/shows/all-american-homecoming/ready-or-not/?play=d848488f-f62a-40fd-af1f-6440b1821aab".to_string(),
        "https://example.com/video/1".to_string(),
        "https://www.cwtv.com/shows/x/y/?play=00000000-0000-0000-0000-000000000000".to_string(),
        "https://www.cwtv.com/shows/x/y/?watch=99999999-9999-9999-9999-999999999999".to_string(),
    ];

    let mut out = Vec::new();
    let summary = run_batch(&registry, &urls, false, &mut out).await.unwrap();

    assert_eq!(
        summary,
        BatchSummary {
            resolved: 1,
            skipped: 2,
            failed: 1,
        }
    );
    assert!(!summary.is_success());

    let docs = lines(&out);
    assert_eq!(docs.len(), 4);
    assert_eq!(docs[0]["_type"], "url_transparent");
    assert_eq!(docs[0]["title"], "Ready Or Not");
    assert_eq!(docs[0]["season_number"], 3);
    assert_eq!(docs[0]["episode_number"], 1);
    assert_eq!(docs[0]["timestamp"], 1720519200);
    assert_eq!(docs[1]["error"]["code"], "unsupported");
    assert_eq!(docs[1]["error"]["details"]["input"], "https://example.com/video/1");
    assert_eq!(docs[2]["error"]["code"], "expected");
    assert_eq!(docs[2]["error"]["message"], "Video not found");
    assert_eq!(docs[3]["error"]["code"], "http_error");
}

#[tokio::test]
async fn pretty_output_still_parses() {
    let registry = test_registry().await;
    let urls = vec![
        "https://www.cwtv.com/shows/all-american-homecoming/ready-or-not/?play=d848488f-f62a-40fd-af1f-6440b1821aab".to_string(),
    ];

    let mut out = Vec::new();
    let summary = run_batch(&registry, &urls, true, &mut out).await.unwrap();
    assert!(summary.is_success());

    let doc: Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(doc["id"], "d848488f-f62a-40fd-af1f-6440b1821aab");
}
