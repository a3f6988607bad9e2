use super::*;

use axum::{routing::post, Json, Router};
use clap::CommandFactory;
use serde_json::{json, Value};
use shared::protocol::{CourseMeeting, ScheduleRecommendation};
use tokio::net::TcpListener;

fn args(extra: &[&str]) -> GenerateArgs {
    let mut argv = vec![
        "scheduler_cli",
        "generate",
        "--course",
        "CS101",
        "--course",
        "MATH 51",
        "--quarter",
        "fall 2025",
        "--day",
        "monday",
        "--day",
        "Wednesday",
        "--time",
        "morning",
    ];
    argv.extend_from_slice(extra);
    match Cli::try_parse_from(argv).expect("parse").command {
        Command::Generate(args) => args,
        Command::Health => panic!("expected generate"),
    }
}

async fn spawn_service() -> String {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    let app = Router::new()
        .route(
            "/api/generate-schedule",
            post(|Json(body): Json<Value>| async move {
                let options: Vec<Value> = body["courses"]
                    .as_array()
                    .into_iter()
                    .flatten()
                    .map(|course| {
                        json!({
                            "pros": ["Fits your mornings"],
                            "cons": [],
                            "schedule": [{"summary": course, "description": "Staff", "days_of_week": "MO,WE"}]
                        })
                    })
                    .collect();
                Json(json!({ "success": true, "data": { "recommendations": options } }))
            }),
        )
        .route(
            "/api/add-to-calendar",
            post(|Json(body): Json<Value>| async move {
                Json(json!({
                    "success": true,
                    "calendar_id": "cal-7",
                    "message": format!("added {}", body["schedule"][0]["summary"].as_str().unwrap_or("?"))
                }))
            }),
        );
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    format!("http://{addr}")
}

#[test]
fn cli_definition_is_consistent() {
    Cli::command().debug_assert();
}

#[test]
fn rejects_unknown_day_tokens() {
    let err = Cli::try_parse_from([
        "scheduler_cli",
        "generate",
        "--course",
        "CS101",
        "--quarter",
        "Fall 2025",
        "--day",
        "saturday",
        "--time",
        "morning",
    ])
    .expect_err("weekend is not offered");
    assert!(err.to_string().contains("saturday"));
}

#[test]
fn draft_grows_past_initial_slots_and_ignores_repeats() {
    let mut many = args(&["--day", "monday", "--notes", "clear lectures"]);
    many.courses = (0..6).map(|i| format!("C{i}")).collect();
    let draft = build_draft(&many);

    assert_eq!(draft.course_count(), 6);
    assert_eq!(draft.days_of_week().len(), 2);
    let request = draft.to_generate_request(None).expect("valid");
    assert_eq!(request.days_of_week, vec!["monday".to_string(), "wednesday".to_string()]);
    assert_eq!(request.teacher_preference, "clear lectures");
}

#[test]
fn rendering_applies_location_and_days_defaults() {
    let results = ScheduleResults {
        recommendations: vec![ScheduleRecommendation {
            pros: Vec::new(),
            cons: vec!["Early start".to_string()],
            schedule: vec![CourseMeeting {
                summary: "CS101".to_string(),
                description: "Dr. Lee".to_string(),
                location: Some("  ".to_string()),
                days_of_week: Some(Vec::new()),
                ..CourseMeeting::default()
            }],
        }],
        summary: None,
    };
    let text = render_options(&results);
    assert!(text.contains("Schedule Option 1"));
    assert!(!text.contains("Pros:"));
    assert!(text.contains("    - Early start"));
    assert!(text.contains("  CS101 | Dr. Lee | TBA\n"));

    assert_eq!(
        render_options(&ScheduleResults::default()),
        "No schedule options matched your preferences.\n"
    );
}

#[tokio::test]
async fn generate_then_export_selected_option() {
    let server_url = spawn_service().await;
    let client = HttpSchedulerClient::new(&server_url, Duration::from_secs(5)).expect("client");
    let settings = Settings::default();

    let out = run_generate(&client, &settings, &args(&["--add-to-calendar", "--select", "2"]))
        .await
        .expect("generate");

    assert!(out.contains("Schedule Option 2"));
    assert!(out.contains("MATH 51 | Staff | TBA | MO, WE"));
    assert!(out.contains("Schedule added to calendar \"Class Schedule\" (id cal-7): added MATH 51"));
}

#[tokio::test]
async fn out_of_range_selection_is_reported() {
    let server_url = spawn_service().await;
    let client = HttpSchedulerClient::new(&server_url, Duration::from_secs(5)).expect("client");

    let err = run_generate(
        &client,
        &Settings::default(),
        &args(&["--add-to-calendar", "--select", "9"]),
    )
    .await
    .expect_err("only two options");
    assert!(err.to_string().contains("out of range"));
}

#[tokio::test]
async fn blank_courses_fail_locally() {
    let mut blank = args(&[]);
    blank.courses = vec!["   ".to_string()];
    // Nothing listens here; a request would surface as a transport error.
    let client = HttpSchedulerClient::new("http://127.0.0.1:9", Duration::from_secs(1)).expect("client");

    let err = run_generate(&client, &Settings::default(), &blank)
        .await
        .expect_err("no courses");
    assert!(err
        .to_string()
        .starts_with("Please complete all required fields before generating schedule."));
}

#[tokio::test]
async fn declined_export_keeps_the_service_reason() {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    let app = Router::new()
        .route(
            "/api/generate-schedule",
            post(|| async {
                Json(json!({
                    "success": true,
                    "data": {"recommendations": [{"pros": null, "schedule": [{"summary": "CS101", "description": null}]}]}
                }))
            }),
        )
        .route(
            "/api/add-to-calendar",
            post(|| async { Json(json!({"success": false, "error": "calendar quota exceeded"})) }),
        );
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    let client =
        HttpSchedulerClient::new(&format!("http://{addr}"), Duration::from_secs(5)).expect("client");

    let err = run_generate(&client, &Settings::default(), &args(&["--add-to-calendar"]))
        .await
        .expect_err("export declined");
    assert_eq!(err.to_string(), "Failed to add to calendar");
    assert!(format!("{err:#}").contains("calendar quota exceeded"));
}
