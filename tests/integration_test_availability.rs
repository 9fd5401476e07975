mod common;

use axum::http::StatusCode;
use common::{future_date, parse_body, TestApp};
use serde_json::json;

#[tokio::test]
async fn open_days_with_no_bookings_are_available() {
    let app = TestApp::new().await;
    let bid = app.create_business("09:00", "17:00").await;
    let sid = app.create_service(&bid, 60, 15).await;

    let res = app.get(&format!(
        "/api/v1/{}/services/{}/dates?start={}&end={}",
        bid, sid, future_date(3), future_date(7)
    )).await;

    assert_eq!(res.status(), StatusCode::OK);
    let dates = parse_body(res).await;
    let dates = dates.as_array().unwrap();
    assert_eq!(dates.len(), 5);
    assert_eq!(dates[0].as_str().unwrap(), future_date(3));
    assert_eq!(dates[4].as_str().unwrap(), future_date(7));
}

#[tokio::test]
async fn closed_exception_removes_the_date() {
    let app = TestApp::new().await;
    let bid = app.create_business("09:00", "17:00").await;
    let sid = app.create_service(&bid, 60, 15).await;
    let blocked = future_date(4);

    let res = app.post_json(&format!("/api/v1/{}/hours/exceptions", bid), json!({
        "date": blocked, "closed": true, "open": null, "close": null
    })).await;
    assert_eq!(res.status(), StatusCode::OK);

    let res = app.get(&format!(
        "/api/v1/{}/services/{}/dates?start={}&end={}",
        bid, sid, future_date(3), future_date(5)
    )).await;
    let dates = parse_body(res).await;
    let dates = dates.as_array().unwrap();

    assert_eq!(dates.len(), 2);
    assert!(dates.iter().all(|d| d.as_str().unwrap() != blocked));
}

#[tokio::test]
async fn modified_hours_exception_shrinks_capacity() {
    let app = TestApp::new().await;
    let bid = app.create_business("09:00", "17:00").await;
    let short = app.create_service(&bid, 60, 15).await;
    let long = app.create_service(&bid, 180, 15).await;
    let date = future_date(4);

    // Only two hours open that day: enough for the 60 min service,
    // not for the 180 min one.
    app.post_json(&format!("/api/v1/{}/hours/exceptions", bid), json!({
        "date": date, "closed": false, "open": "10:00", "close": "12:00"
    })).await;

    let res = app.get(&format!(
        "/api/v1/{}/services/{}/dates?start={}&end={}", bid, short, date, date
    )).await;
    assert_eq!(parse_body(res).await.as_array().unwrap().len(), 1);

    let res = app.get(&format!(
        "/api/v1/{}/services/{}/dates?start={}&end={}", bid, long, date, date
    )).await;
    assert!(parse_body(res).await.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn past_dates_are_never_available() {
    let app = TestApp::new().await;
    let bid = app.create_business("09:00", "17:00").await;
    let sid = app.create_service(&bid, 60, 15).await;

    let start = (chrono::Utc::now() - chrono::Duration::days(5)).format("%Y-%m-%d").to_string();
    let end = (chrono::Utc::now() - chrono::Duration::days(1)).format("%Y-%m-%d").to_string();

    let res = app.get(&format!(
        "/api/v1/{}/services/{}/dates?start={}&end={}", bid, sid, start, end
    )).await;
    assert_eq!(res.status(), StatusCode::OK);
    assert!(parse_body(res).await.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn reads_are_idempotent() {
    let app = TestApp::new().await;
    let bid = app.create_business("09:00", "17:00").await;
    let sid = app.create_service(&bid, 60, 15).await;
    let uri = format!(
        "/api/v1/{}/services/{}/dates?start={}&end={}",
        bid, sid, future_date(3), future_date(10)
    );

    let first = parse_body(app.get(&uri).await).await;
    let second = parse_body(app.get(&uri).await).await;
    assert_eq!(first, second);
}

#[tokio::test]
async fn inactive_service_is_rejected() {
    let app = TestApp::new().await;
    let bid = app.create_business("09:00", "17:00").await;
    let sid = app.create_service(&bid, 60, 15).await;

    let res = app.put_json(&format!("/api/v1/{}/services/{}", bid, sid), json!({
        "active": false
    })).await;
    assert_eq!(res.status(), StatusCode::OK);

    let res = app.get(&format!(
        "/api/v1/{}/services/{}/dates?start={}&end={}",
        bid, sid, future_date(3), future_date(5)
    )).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(parse_body(res).await["kind"], "invalid_service");
}

#[tokio::test]
async fn packed_day_disappears_from_calendar() {
    let app = TestApp::new().await;
    // Two-hour day: a single one-hour booking saturates it once buffers apply.
    let bid = app.create_business("09:00", "11:00").await;
    let sid = app.create_service(&bid, 60, 15).await;
    let date = future_date(4);

    let res = app.reserve(&bid, &sid, &date, "09:30").await;
    assert_eq!(res.status(), StatusCode::OK);

    let res = app.get(&format!(
        "/api/v1/{}/services/{}/dates?start={}&end={}", bid, sid, date, date
    )).await;
    assert!(parse_body(res).await.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn inverted_range_is_rejected() {
    let app = TestApp::new().await;
    let bid = app.create_business("09:00", "17:00").await;
    let sid = app.create_service(&bid, 60, 15).await;

    let res = app.get(&format!(
        "/api/v1/{}/services/{}/dates?start={}&end={}",
        bid, sid, future_date(7), future_date(3)
    )).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(parse_body(res).await["kind"], "validation_error");
}
