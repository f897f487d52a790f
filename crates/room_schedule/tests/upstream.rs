//! End-to-end tests against a fake schedule API served by axum.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use chrono::NaiveDate;
use room_schedule::schedule::client::schedule_url;
use room_schedule::{
    CacheError, ClockTime, FetchError, LessonRecord, Rgb, ScheduleCache, ScheduleClient,
    ScheduleClientConfig,
};
use serde_json::json;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

#[derive(Clone, Default)]
struct Upstream {
    hits: Arc<AtomicUsize>,
    paths: Arc<Mutex<Vec<(String, String)>>>,
}

async fn schedule(
    State(upstream): State<Upstream>,
    Path((room, date)): Path<(String, String)>,
) -> Response {
    upstream.hits.fetch_add(1, Ordering::SeqCst);
    upstream.paths.lock().unwrap().push((room, date.clone()));

    match date.as_str() {
        "02.09.2024" => json!([
            {
                "Type": "лек.",
                "Groups": "ПМ-201",
                "Teacher": "Иванов И.И.",
                "Period": "09:00:00-10:30:00",
                "Subject": "Математический анализ"
            },
            {
                "Type": null,
                "Groups": "",
                "Teacher": "",
                "Period": "10:40:00-12:10:00",
                "Subject": ""
            },
            {
                "Type": "экз.",
                "Groups": "ПМ-202",
                "Teacher": "Петров П.П.",
                "Period": "garbage",
                "Subject": "Физика"
            },
            {
                "Type": "unknown_code",
                "Groups": "ПМ-203",
                "Teacher": "Сидоров С.С.",
                "Period": "12:40:00-14:10:00",
                "Subject": "Философия"
            }
        ])
        .to_string()
        .into_response(),
        "03.09.2024" => "[]".into_response(),
        "04.09.2024" => (StatusCode::BAD_GATEWAY, "<html>Bad Gateway</html>").into_response(),
        "05.09.2024" => json!({ "Message": "room not found" }).to_string().into_response(),
        "06.09.2024" => (
            StatusCode::INTERNAL_SERVER_ERROR,
            json!([{
                "Type": "лаб.",
                "Groups": "ПМ-201",
                "Teacher": "Иванов И.И.",
                "Period": "14:20:00-15:50:00",
                "Subject": "Программирование"
            }])
            .to_string(),
        )
            .into_response(),
        _ => StatusCode::NOT_FOUND.into_response(),
    }
}

async fn spawn_upstream() -> (SocketAddr, Upstream) {
    let upstream = Upstream::default();
    let app = Router::new()
        .route("/api/roomId/:room/date/:date", get(schedule))
        .with_state(upstream.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (addr, upstream)
}

fn client_for(addr: SocketAddr) -> ScheduleClient {
    ScheduleClient::with_config(ScheduleClientConfig {
        base_url: format!("http://{}/api", addr),
        timeout: Some(Duration::from_secs(5)),
    })
    .unwrap()
}

fn date(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 9, d).unwrap()
}

#[tokio::test]
async fn test_fetch_normalizes_day() {
    let (addr, upstream) = spawn_upstream().await;
    let client = client_for(addr);

    let lessons = client.fetch_schedule("1234", date(2)).await.unwrap();

    assert_eq!(lessons.len(), 3);

    assert_eq!(lessons[0].kind(), "Лекции");
    assert_eq!(lessons[0].color(), Rgb(0x276093));
    assert_eq!(lessons[0].subject(), "Математический анализ");
    assert_eq!(lessons[0].start(), ClockTime::new(9, 0).unwrap());
    assert_eq!(lessons[0].end(), ClockTime::new(10, 30).unwrap());

    // bad period: kept, blank
    assert_eq!(lessons[1], LessonRecord::blank());

    assert_eq!(lessons[2].kind(), "unknown_code");
    assert_eq!(lessons[2].color(), Rgb(0xCCCCCC));

    assert_eq!(
        *upstream.paths.lock().unwrap(),
        vec![("1234".to_string(), "02.09.2024".to_string())]
    );
}

#[tokio::test]
async fn test_fetch_empty_day() {
    let (addr, _) = spawn_upstream().await;
    let lessons = client_for(addr).fetch_schedule("1234", date(3)).await.unwrap();
    assert!(lessons.is_empty());
}

#[tokio::test]
async fn test_fetch_bad_responses() {
    let (addr, _) = spawn_upstream().await;
    let client = client_for(addr);

    assert!(matches!(
        client.fetch_schedule("1234", date(4)).await,
        Err(FetchError::BadResponse { .. })
    ));
    assert!(matches!(
        client.fetch_schedule("1234", date(5)).await,
        Err(FetchError::BadResponse { .. })
    ));
}

#[tokio::test]
async fn test_error_status_with_array_body_is_parsed() {
    let (addr, _) = spawn_upstream().await;
    let lessons = client_for(addr).fetch_schedule("1234", date(6)).await.unwrap();

    assert_eq!(lessons.len(), 1);
    assert_eq!(lessons[0].kind(), "Лабораторные занятия");
}

#[tokio::test]
async fn test_connection_refused_is_transport_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let err = client_for(addr).fetch_schedule("1234", date(2)).await.unwrap_err();
    assert!(matches!(err, FetchError::Transport { .. }));
    assert!(err.is_retryable());
}

#[tokio::test]
async fn test_room_id_is_one_path_segment() {
    let (addr, upstream) = spawn_upstream().await;
    let client = client_for(addr);

    let url = schedule_url(&format!("http://{}/api", addr), "A 1/2", date(3)).unwrap();
    assert_eq!(url.path(), "/api/roomId/A%201%2F2/date/03.09.2024");

    client.fetch_schedule("A 1/2", date(3)).await.unwrap();
    assert_eq!(upstream.paths.lock().unwrap()[0].0, "A 1/2");
}

#[tokio::test]
async fn test_cache_fetches_once_per_date() {
    let (addr, upstream) = spawn_upstream().await;
    let cache = ScheduleCache::with_room(client_for(addr), "1234");

    assert_eq!(cache.lesson_count(date(2)).await, 3);
    assert_eq!(cache.lesson_count(date(2)).await, 3);
    assert_eq!(upstream.hits.load(Ordering::SeqCst), 1);

    assert_eq!(cache.lesson_for_date(date(2), 0).await.kind(), "Лекции");
    assert_eq!(upstream.hits.load(Ordering::SeqCst), 1);

    assert_eq!(cache.lesson_count(date(3)).await, 0);
    assert_eq!(upstream.hits.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_cache_swallows_failures_but_reports_them() {
    let (addr, upstream) = spawn_upstream().await;
    let cache = ScheduleCache::with_room(client_for(addr), "1234");

    assert_eq!(cache.lesson_count(date(4)).await, 0);
    assert_eq!(cache.lesson(0).await, LessonRecord::default());
    assert!(matches!(
        cache.try_lesson_count(date(4)).await,
        Err(CacheError::Fetch(FetchError::BadResponse { .. }))
    ));
    assert_eq!(upstream.hits.load(Ordering::SeqCst), 2);
}
