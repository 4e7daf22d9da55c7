use std::io::Write;
use std::path::Path;
use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use chrono::NaiveDate;
use http_body_util::BodyExt;
use tempfile::TempDir;
use tower::ServiceExt;

use employee_insight::features::{feature_names, FEATURE_COUNT};
use employee_insight::predictor::LinearModel;
use employee_insight::state::PredictorContext;
use employee_insight::web::predictor_router;

const FULL_HEADER: &str = "Employee_ID,Department,Gender,Age,Job_Title,Hire_Date,Years_At_Company,\
Monthly_Salary,Work_Hours_Per_Week,Projects_Handled,Overtime_Hours,Sick_Days,\
Remote_Work_Frequency,Team_Size,Training_Hours,Promotions,Employee_Satisfaction_Score";

fn write_fixture(dir: &Path, header: &str, rows: &[&str]) -> (std::path::PathBuf, std::path::PathBuf) {
    let data = dir.join("employees.csv");
    let mut file = std::fs::File::create(&data).unwrap();
    writeln!(file, "{header}").unwrap();
    for row in rows {
        writeln!(file, "{row}").unwrap();
    }

    let mut coefficients = vec![0.0; FEATURE_COUNT];
    let names = feature_names();
    let training = names.iter().position(|n| *n == "Training_Hours").unwrap();
    coefficients[training] = 0.02;
    let model = LinearModel {
        feature_names: names.iter().map(|s| s.to_string()).collect(),
        coefficients,
        intercept: 2.0,
    };
    let model_path = dir.join("model.json");
    std::fs::write(&model_path, serde_json::to_string(&model).unwrap()).unwrap();
    (data, model_path)
}

fn full_rows() -> Vec<&'static str> {
    vec![
        "1,0,Female,29,Analyst,2019-01-01,5,4200,40,12,5,3,50,8,50,1,4.1",
        "3,3,Male,41,Engineer,2016-05-01,8,6100,45,30,10,73,25,12,25,2,3.2",
        "4,5,Other,35,Specialist,2022-11-11,2,3900,38,4,0,1,100,5,0,0,2.9",
    ]
}

fn app(dir: &TempDir, header: &str, rows: &[&str]) -> Router {
    let (data, model) = write_fixture(dir.path(), header, rows);
    let ctx = PredictorContext::load(&data, &model, Some(7))
        .unwrap()
        .with_as_of(NaiveDate::from_ymd_opt(2026, 5, 1).unwrap());
    predictor_router(Arc::new(ctx))
}

async fn body(response: axum::response::Response) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

async fn predict(app: Router, employee_id: &str) -> (StatusCode, String) {
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/predict")
                .header("content-type", "application/x-www-form-urlencoded")
                .body(Body::from(format!("employee_id={employee_id}")))
                .unwrap(),
        )
        .await
        .unwrap();
    let status = response.status();
    (status, body(response).await)
}

#[tokio::test]
async fn index_shows_empty_form() {
    let dir = TempDir::new().unwrap();
    let response = app(&dir, FULL_HEADER, &full_rows())
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let html = body(response).await;
    assert!(html.contains(r#"name="employee_id""#));
    assert!(!html.contains("Predicted Performance Score"));
}

#[tokio::test]
async fn known_employee_gets_prediction_and_charts() {
    let dir = TempDir::new().unwrap();
    let (status, html) = predict(app(&dir, FULL_HEADER, &full_rows()), "3").await;

    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("Predicted Performance Score"));
    assert!(html.contains("2.50"));
    assert!(html.contains("Engineering"));
    assert!(html.contains("1st May 2016"));
    assert!(html.contains("10.0 years"));
    assert!(html.contains("Simulated Monthly Performance Trend"));
    assert_eq!(html.matches("<svg").count(), 2);
}

#[tokio::test]
async fn unknown_employee_is_reported_inline() {
    let dir = TempDir::new().unwrap();
    let (status, html) = predict(app(&dir, FULL_HEADER, &full_rows()), "999").await;

    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("Employee ID 999 not found."));
    assert!(html.contains(r#"action="/predict""#));
    assert!(!html.contains("<svg"));
}

#[tokio::test]
async fn non_numeric_id_is_reported_inline() {
    let dir = TempDir::new().unwrap();
    let (status, html) = predict(app(&dir, FULL_HEADER, &full_rows()), "abc").await;

    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("Invalid employee ID"));
}

#[tokio::test]
async fn missing_columns_are_listed_by_name() {
    let dir = TempDir::new().unwrap();
    let header = FULL_HEADER
        .replace(",Training_Hours", "")
        .replace(",Sick_Days", "");
    let rows = ["3,3,Male,41,Engineer,2016-05-01,8,6100,45,30,10,25,12,2,3.2"];
    let (status, html) = predict(app(&dir, &header, &rows), "3").await;

    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("Missing columns: Sick_Days, Training_Hours"));
    assert!(!html.contains("Predicted Performance Score"));
}

#[tokio::test]
async fn seeded_context_renders_identical_pages() {
    let dir = TempDir::new().unwrap();
    let router = app(&dir, FULL_HEADER, &full_rows());
    let (_, first) = predict(router.clone(), "1").await;
    let (_, second) = predict(router, "1").await;
    assert_eq!(first, second);
}
