use yandex2spotify::errors::{ApiError, check_status};

fn response(status: u16, retry_after: Option<&str>, body: &'static str) -> reqwest::Response {
    let mut builder = http::Response::builder().status(status);
    if let Some(value) = retry_after {
        builder = builder.header("Retry-After", value);
    }
    builder.body(body).unwrap().into()
}

#[tokio::test]
async fn test_rate_limit_reads_retry_after() {
    let result = check_status(response(429, Some("3"), "")).await;
    assert!(matches!(result, Err(ApiError::RateLimited { retry_after: 3 })));
}

#[tokio::test]
async fn test_rate_limit_without_header_waits_zero() {
    let result = check_status(response(429, None, "")).await;
    assert!(matches!(result, Err(ApiError::RateLimited { retry_after: 0 })));

    let result = check_status(response(429, Some("soon"), "")).await;
    assert!(matches!(result, Err(ApiError::RateLimited { retry_after: 0 })));
}

#[tokio::test]
async fn test_error_status_keeps_body() {
    let result = check_status(response(500, None, "upstream exploded")).await;
    match result {
        Err(ApiError::Status { status, message }) => {
            assert_eq!(status, 500);
            assert_eq!(message, "upstream exploded");
        }
        other => panic!("unexpected result: {:?}", other.map(|r| r.status())),
    }
}

#[tokio::test]
async fn test_success_passes_through() {
    let response = check_status(response(201, None, "{}")).await.unwrap();
    assert_eq!(response.status().as_u16(), 201);
    assert_eq!(response.text().await.unwrap(), "{}");
}

#[test]
fn test_timeout_detection() {
    assert!(ApiError::Timeout.is_timeout());
    assert!(!ApiError::RateLimited { retry_after: 1 }.is_timeout());
}
