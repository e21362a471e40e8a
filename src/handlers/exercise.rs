use actix_web::{web, HttpResponse};
use serde::Deserialize;
use validator::Validate;
use chrono::{DateTime, Utc};
use log::info;
use crate::errors::AppError;
use crate::handlers::Body;
use crate::models::exercise::Exercise;
use crate::store::{AppState, LogFilter};
use crate::utils::date::parse_date;
use crate::utils::validation::{present, validate_payload, FieldValue};

const EXERCISE_FIELDS_REQUIRED: &str = "Description and duration are required";

#[derive(Deserialize, Validate, Default)]
pub struct ExerciseRequest {
    #[validate(required(message = "Description and duration are required"))]
    description: Option<FieldValue>,

    #[validate(required(message = "Description and duration are required"))]
    duration: Option<FieldValue>,

    date: Option<FieldValue>,
}

#[derive(Deserialize)]
pub struct LogQuery {
    from: Option<String>,
    to: Option<String>,
    limit: Option<String>,
}

impl ExerciseRequest {
    fn into_exercise(self) -> Result<Exercise, AppError> {
        validate_payload(&self)?;

        let description = present(self.description.as_ref()).map(FieldValue::to_text);
        let duration = present(self.duration.as_ref())
            .and_then(FieldValue::to_minutes)
            .filter(|minutes| *minutes != 0);
        let (description, duration) = description
            .zip(duration)
            .ok_or_else(|| AppError::BadRequest(EXERCISE_FIELDS_REQUIRED.to_string()))?;

        Ok(Exercise::new(description, duration, exercise_date(self.date.as_ref())))
    }
}

// Absent dates mean "now"; unreadable ones are kept as invalid rather than rejected.
fn exercise_date(date: Option<&FieldValue>) -> Option<DateTime<Utc>> {
    match present(date) {
        None => Some(Utc::now()),
        Some(FieldValue::Integer(millis)) => DateTime::from_timestamp_millis(*millis),
        Some(other) => parse_date(&other.to_text()),
    }
}

// POST /api/users/{_id}/exercises
pub async fn add_exercise(
    state: web::Data<AppState>,
    user_id: web::Path<String>,
    payload: Body<ExerciseRequest>,
) -> Result<HttpResponse, AppError> {
    let exercise = payload.into_inner().into_exercise();

    let mut store = state.store.write().await;

    // An unknown user wins over a bad payload
    let user_id = store.find_user(&user_id)?.user_id;
    let receipt = store.add_exercise(user_id, exercise?)?;
    info!("Logged \"{}\" for user {}", receipt.description, user_id);

    Ok(HttpResponse::Ok().json(receipt))
}

// GET /api/users/{_id}/logs
pub async fn get_log(
    state: web::Data<AppState>,
    user_id: web::Path<String>,
    query: web::Query<LogQuery>,
) -> Result<HttpResponse, AppError> {
    let query = query.into_inner();
    let filter = LogFilter {
        from: query.from,
        to: query.to,
        limit: query.limit,
    };

    let store = state.store.read().await;
    let log = store.exercise_log(&user_id, &filter)?;

    Ok(HttpResponse::Ok().json(log))
}

#[cfg(test)]
mod tests {
    use crate::handlers::test_support::{body_json, test_app};
    use crate::utils::date::format_display;
    use actix_web::dev::{Service, ServiceResponse};
    use actix_web::http::StatusCode;
    use actix_web::test;
    use chrono::Utc;
    use rstest::rstest;
    use serde_json::{json, Value};

    async fn create_user(
        app: &impl Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
        username: &str,
    ) -> String {
        let req = test::TestRequest::post()
            .uri("/api/users")
            .set_json(json!({ "username": username }))
            .to_request();
        let body: Value = test::call_and_read_body_json(app, req).await;
        body["_id"].as_str().unwrap().to_string()
    }

    async fn post_exercise(
        app: &impl Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
        id: &str,
        payload: Value,
    ) -> ServiceResponse {
        let req = test::TestRequest::post()
            .uri(&format!("/api/users/{}/exercises", id))
            .set_json(payload)
            .to_request();
        test::call_service(app, req).await
    }

    async fn get_log(
        app: &impl Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
        id: &str,
        query: &str,
    ) -> ServiceResponse {
        let req = test::TestRequest::get()
            .uri(&format!("/api/users/{}/logs{}", id, query))
            .to_request();
        test::call_service(app, req).await
    }

    #[actix_web::test]
    async fn logs_exercise_and_reads_it_back() {
        let app = test::init_service(test_app()).await;
        let id = create_user(&app, "fcc_test").await;

        let res = post_exercise(
            &app,
            &id,
            json!({ "description": "test", "duration": 60, "date": "2023-01-01" }),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(
            body_json(res).await,
            json!({
                "username": "fcc_test",
                "description": "test",
                "duration": 60,
                "date": "Sun Jan 01 2023",
                "_id": &id,
            })
        );

        let res = get_log(&app, &id, "").await;
        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(
            body_json(res).await,
            json!({
                "username": "fcc_test",
                "count": 1,
                "_id": &id,
                "log": [{ "description": "test", "duration": 60, "date": "Sun Jan 01 2023" }],
            })
        );
    }

    #[actix_web::test]
    async fn form_body_coerces_duration() {
        let app = test::init_service(test_app()).await;
        let id = create_user(&app, "form").await;

        let req = test::TestRequest::post()
            .uri(&format!("/api/users/{}/exercises", id))
            .set_form([("description", "rowing"), ("duration", "45"), ("date", "2024-02-29")])
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["duration"], 45);
        assert_eq!(body["date"], "Thu Feb 29 2024");
    }

    #[actix_web::test]
    async fn missing_date_defaults_to_today() {
        let app = test::init_service(test_app()).await;
        let id = create_user(&app, "today").await;

        let res = post_exercise(&app, &id, json!({ "description": "walk", "duration": "20" })).await;
        let body = body_json(res).await;
        assert_eq!(body["date"], format_display(&Utc::now()));
        assert_eq!(body["description"], "walk");
        assert_eq!(body["duration"], 20);
    }

    #[actix_web::test]
    async fn unreadable_date_is_stored_as_invalid() {
        let app = test::init_service(test_app()).await;
        let id = create_user(&app, "odd").await;

        let res = post_exercise(
            &app,
            &id,
            json!({ "description": "stretch", "duration": 5, "date": "someday" }),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(body_json(res).await["date"], "Invalid Date");
    }

    #[actix_web::test]
    async fn unknown_user_is_reported_before_bad_payload() {
        let app = test::init_service(test_app()).await;

        let res = post_exercise(&app, "missing", json!({})).await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(res).await, json!({ "error": "User not found" }));

        let res = get_log(&app, "missing", "").await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(res).await, json!({ "error": "User not found" }));
    }

    #[rstest]
    #[case(json!({ "duration": 30 }))]
    #[case(json!({ "description": "", "duration": 30 }))]
    #[case(json!({ "description": "run" }))]
    #[case(json!({ "description": "run", "duration": "soon" }))]
    #[case(json!({ "description": "run", "duration": 0 }))]
    #[actix_web::test]
    async fn rejects_incomplete_exercise(#[case] payload: Value) {
        let app = test::init_service(test_app()).await;
        let id = create_user(&app, "strict").await;

        let res = post_exercise(&app, &id, payload).await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(res).await,
            json!({ "error": "Description and duration are required" })
        );

        let log = body_json(get_log(&app, &id, "").await).await;
        assert_eq!(log["count"], 0);
        assert_eq!(log["log"], json!([]));
    }

    #[actix_web::test]
    async fn zero_minute_form_duration_is_rejected() {
        let app = test::init_service(test_app()).await;
        let id = create_user(&app, "zero").await;

        let req = test::TestRequest::post()
            .uri(&format!("/api/users/{}/exercises", id))
            .set_form([("description", "rest"), ("duration", "0")])
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(res).await,
            json!({ "error": "Description and duration are required" })
        );
    }

    #[actix_web::test]
    async fn bodyless_post_for_known_user_needs_fields() {
        let app = test::init_service(test_app()).await;
        let id = create_user(&app, "empty").await;

        let req = test::TestRequest::post()
            .uri(&format!("/api/users/{}/exercises", id))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(res).await,
            json!({ "error": "Description and duration are required" })
        );
    }

    #[rstest]
    #[case("", vec!["a", "b", "c"])]
    #[case("?limit=2", vec!["a", "b"])]
    #[case("?from=2023-01-02", vec!["b", "c"])]
    #[case("?to=2023-01-02", vec!["a", "b"])]
    #[case("?from=2023-01-02&to=2023-01-02", vec!["b"])]
    #[case("?from=2023-01-01&to=2023-01-03&limit=1", vec!["a"])]
    #[actix_web::test]
    async fn filters_log_by_query(#[case] query: &str, #[case] expected: Vec<&str>) {
        let app = test::init_service(test_app()).await;
        let id = create_user(&app, "ranged").await;
        for (description, date) in [("a", "2023-01-01"), ("b", "2023-01-02"), ("c", "2023-01-03")] {
            let payload = json!({ "description": description, "duration": 10, "date": date });
            assert_eq!(post_exercise(&app, &id, payload).await.status(), StatusCode::OK);
        }

        let body = body_json(get_log(&app, &id, query).await).await;
        let descriptions: Vec<&str> = body["log"]
            .as_array()
            .unwrap()
            .iter()
            .map(|entry| entry["description"].as_str().unwrap())
            .collect();
        assert_eq!(descriptions, expected);
        assert_eq!(body["count"], expected.len());
    }
}
