use axum::{
    Router,
    body::{self, Body},
    http::{Request, StatusCode, header},
};
use pneuscope_service::{app, config::ServiceConfig};
use serde_json::{Value, json};
use tower::util::ServiceExt; // for `oneshot`

fn router() -> Router {
    app(&ServiceConfig::default())
}

async fn send(router: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = router.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

fn post_json(uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .method("POST")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_vec(body).unwrap()))
        .unwrap()
}

#[tokio::test]
async fn root_and_health() {
    let (status, body) = send(router(), Request::builder().uri("/").body(Body::empty()).unwrap()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"message": "PneuScope ML Service", "status": "healthy"}));

    let (status, body) = send(router(), Request::builder().uri("/health").body(Body::empty()).unwrap()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "OK");
    assert_eq!(body["service"], "ml-service");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn predict_returns_score_confidence_and_analysis() {
    let (status, body) = send(router(), post_json("/predict", &json!({"audio": [10, 12, 11, 13, 12]}))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["risk_score"], 0.116);
    assert_eq!(body["confidence"], 0.481);

    let analysis = &body["analysis"];
    assert_eq!(analysis["total_samples"], 5);
    assert_eq!(analysis["duration_seconds"], 1.0);
    assert_eq!(analysis["statistics"]["mean_db"], 11.6);
    assert_eq!(analysis["anomaly_indicators"]["amplitude_variability"], "normal");
    assert_eq!(analysis["risk_category"], "low");
    assert_eq!(
        analysis["recommendations"],
        json!(["Continue routine monitoring", "Normal breathing patterns observed"])
    );
}

#[tokio::test]
async fn predict_honours_sample_rate_override() {
    let body = json!({"audio": [30, 31, 29, 30, 32, 28, 30, 31, 29, 30], "samples_per_second": 10.0});
    let (status, body) = send(router(), post_json("/predict", &body)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["analysis"]["duration_seconds"], 1.0);
}

#[tokio::test]
async fn loud_recording_is_flagged() {
    let body = json!({"audio": [45, 72, 68, 51, 80, 66, 40, 75, 70, 62]});
    let (status, body) = send(router(), post_json("/predict", &body)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["analysis"]["risk_category"], "high");
    assert_eq!(
        body["analysis"]["recommendations"][0],
        "Immediate clinical evaluation recommended"
    );
}

#[tokio::test]
async fn empty_audio_is_a_client_error() {
    let (status, body) = send(router(), post_json("/predict", &json!({"audio": []}))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["type"], "empty_input");
    assert_eq!(body["error"]["status"], 400);
}

#[tokio::test]
async fn short_audio_is_a_client_error() {
    let (status, body) = send(router(), post_json("/predict", &json!({"audio": [1, 2, 3]}))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["type"], "insufficient_data");
}

#[tokio::test]
async fn malformed_body_is_rejected() {
    let (status, body) = send(router(), post_json("/predict", &json!({"audio": "loud"}))).await;

    assert!(status.is_client_error());
    assert_eq!(body["error"]["type"], "invalid_request");
}

#[tokio::test]
async fn batch_reports_each_item_in_order() {
    let body = json!({
        "items": [
            {"audio": [10, 12, 11, 13, 12]},
            {"audio": []},
            {"audio": [45, 72, 68, 51, 80, 66, 40]}
        ]
    });
    let (status, body) = send(router(), post_json("/predict/batch", &body)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["succeeded"], 2);
    assert_eq!(body["failed"], 1);

    let results = body["results"].as_array().unwrap();
    assert_eq!(results.len(), 3);
    for (i, result) in results.iter().enumerate() {
        assert_eq!(result["index"], i);
    }

    assert_eq!(results[0]["success"], true);
    assert_eq!(results[0]["prediction"]["risk_score"], 0.116);
    assert_eq!(results[1]["success"], false);
    assert_eq!(results[1]["error"]["type"], "empty_input");
    assert!(results[1].get("prediction").is_none());
    assert_eq!(results[2]["success"], true);

    let (_, single) = send(router(), post_json("/predict", &json!({"audio": [45, 72, 68, 51, 80, 66, 40]}))).await;
    assert_eq!(results[2]["prediction"], single);
}

#[tokio::test]
async fn cors_allows_configured_origin() {
    let request = Request::builder()
        .uri("/health")
        .header(header::ORIGIN, "http://localhost:3000")
        .body(Body::empty())
        .unwrap();

    let response = router().oneshot(request).await.unwrap();
    assert_eq!(
        response.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
        "http://localhost:3000"
    );
}
