pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::analysis::handlers as analysis;
use crate::builder::handlers as builder;
use crate::resources::handlers as resources;
use crate::resume::handlers as resume;
use crate::state::AppState;

pub fn build_router(state: AppState, max_upload_bytes: usize) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Analysis
        .route(
            "/api/analyze",
            get(analysis::handle_list_roles).post(analysis::handle_analyze),
        )
        .route("/api/analyze-resume", post(analysis::handle_analyze_resume))
        .route("/api/job-roles", get(analysis::handle_job_roles))
        .route("/api/analyze-role", post(analysis::handle_analyze_role))
        .route("/api/critique-resume", post(analysis::handle_critique))
        .route(
            "/api/critique-resume/file",
            post(analysis::handle_critique_file),
        )
        .route("/api/roadmap", post(analysis::handle_roadmap))
        // Learning resources
        .route("/api/youtube", post(resources::handle_youtube))
        .route(
            "/api/learning-resources",
            post(resources::handle_learning_resources),
        )
        // Resume upload
        .route("/api/resume/upload", post(resume::handle_upload))
        // Resume builder
        .route(
            "/api/resume-builder/export/:format",
            post(builder::handle_export),
        )
        .route("/api/resume-builder/summary", post(builder::handle_summary))
        .route(
            "/api/resume-builder/enhance-description",
            post(builder::handle_enhance_description),
        )
        .route(
            "/api/resume-builder/suggest-skills",
            post(builder::handle_suggest_skills),
        )
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;
    use wiremock::matchers::{body_string_contains, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::config::Config;
    use crate::llm_client::LlmClient;
    use crate::resources::youtube::testing::EchoVideoSearch;
    use crate::resources::youtube::{DisabledVideoSearch, VideoSearch};

    const LIMIT: usize = 1024 * 1024;

    fn app(llm_base: &str, videos: Arc<dyn VideoSearch>) -> Router {
        let state = AppState {
            llm: LlmClient::for_tests(&Config::for_tests(llm_base)),
            videos,
        };
        build_router(state, LIMIT)
    }

    fn offline_app() -> Router {
        app("http://127.0.0.1:9", Arc::new(DisabledVideoSearch))
    }

    fn json_request(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get_request(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    async fn mock_llm_reply(server: &MockServer, content: &str) {
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "choices": [{"message": {"role": "assistant", "content": content}}]
            })))
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn test_health() {
        let response = offline_app().oneshot(get_request("/health")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["service"], "skillsync-api");
        assert_eq!(body["youtube"], false);
    }

    #[tokio::test]
    async fn test_role_lists() {
        let body = body_json(offline_app().oneshot(get_request("/api/analyze")).await.unwrap()).await;
        assert_eq!(body["roles"].as_array().unwrap().len(), 7);

        let body = body_json(offline_app().oneshot(get_request("/api/job-roles")).await.unwrap()).await;
        assert_eq!(body["roles"].as_array().unwrap().len(), 8);
    }

    #[tokio::test]
    async fn test_analyze_requires_fields() {
        let response = offline_app()
            .oneshot(json_request("/api/analyze", json!({"resumeText": "  "})))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_analyze_rejects_unknown_role() {
        let response = offline_app()
            .oneshot(json_request(
                "/api/analyze",
                json!({"resumeText": "Rust developer", "selectedRole": "Astronaut"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["error"]["message"], "Invalid role selected");
    }

    #[tokio::test]
    async fn test_analyze_full_pipeline() {
        let server = MockServer::start().await;
        let extraction = json!({
            "technical_skills": ["sql", "Python"],
            "soft_skills": ["Communication"],
            "tools": ["Excel"],
            "experience_level": "Junior"
        })
        .to_string();
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .and(body_string_contains("Extract structured skills"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "choices": [{"message": {"role": "assistant", "content": extraction}}]
            })))
            .expect(1)
            .mount(&server)
            .await;
        let roadmap = json!({
            "months": [{
                "month": 1,
                "focusSkills": ["Pandas", "NumPy"],
                "recommendedProjects": ["Clean a public dataset"],
                "weeklyGoals": "Load, reshape and summarize data",
                "estimatedHoursPerWeek": 6
            }]
        })
        .to_string();
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .and(body_string_contains("Target role: Data Analyst"))
            .and(body_string_contains("Missing skills: Pandas, NumPy, Data Visualization"))
            .and(body_string_contains("Current skills: sql, Python, Excel, Communication"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "choices": [{"message": {"role": "assistant", "content": roadmap}}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let resume = "Summary\nJunior analyst.\nSkills\n- SQL and Python\n- Excel dashboards";
        let response = app(&server.uri(), Arc::new(DisabledVideoSearch))
            .oneshot(json_request(
                "/api/analyze",
                json!({"email": "asha@example.com", "resumeText": resume, "selectedRole": "Data Analyst"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["userId"], "email:asha@example.com");
        assert_eq!(body["skills"], json!(["sql", "Python", "Excel", "Communication"]));
        assert_eq!(body["extracted"]["experience_level"], "Junior");
        assert_eq!(body["comparison"]["matchedSkills"], json!(["SQL", "Python", "Excel"]));
        assert_eq!(body["comparison"]["missingSkills"].as_array().unwrap().len(), 7);
        assert_eq!(body["comparison"]["matchScore"], 30);
        assert_eq!(body["roadmap"]["months"][0]["focusSkills"], json!(["Pandas", "NumPy"]));
        assert_eq!(body["ats"]["notes"].as_array().unwrap().len(), 3);
        assert_eq!(body["demand"]["level"], "Medium");
        assert_eq!(body["demand"]["index"], 68);
    }

    #[tokio::test]
    async fn test_wrong_field_types_are_validation_errors() {
        for (uri, payload) in [
            ("/api/youtube", json!({"skills": "Rust"})),
            ("/api/roadmap", json!({"targetRole": "Backend Developer", "missingSkills": "Go"})),
            ("/api/learning-resources", json!({"missingSkills": 3})),
        ] {
            let response = offline_app().oneshot(json_request(uri, payload)).await.unwrap();
            assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{uri}");
            assert_eq!(body_json(response).await["error"]["code"], "VALIDATION_ERROR", "{uri}");
        }
    }

    #[tokio::test]
    async fn test_malformed_json_is_validation_error() {
        let request = Request::builder()
            .method("POST")
            .uri("/api/critique-resume")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{\"resumeText\": "))
            .unwrap();
        let response = offline_app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_analyze_resume_enriches_roadmap() {
        let server = MockServer::start().await;
        let content = json!({
            "matched_skills": ["Python"],
            "missing_skills": ["Docker"],
            "skill_gap_percentage": 60,
            "roadmap": [{"skill": "Docker", "beginner_steps": ["Install Docker"]}]
        })
        .to_string();
        mock_llm_reply(&server, &content).await;

        let response = app(&server.uri(), Arc::new(EchoVideoSearch))
            .oneshot(json_request(
                "/api/analyze-resume",
                json!({"resumeText": "Python dev", "jobDescription": "Python and Docker"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["skill_gap_percentage"], "60");
        assert_eq!(
            body["roadmap"][0]["youtube_resources"][0]["title"],
            "Learn Docker full course"
        );
    }

    #[tokio::test]
    async fn test_analyze_role_unknown_role() {
        let response = offline_app()
            .oneshot(json_request(
                "/api/analyze-role",
                json!({"resumeText": "text", "jobRole": "Astronaut"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_critique_upstream_auth_failure_is_502() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(401).set_body_string("bad key"))
            .mount(&server)
            .await;

        let response = app(&server.uri(), Arc::new(DisabledVideoSearch))
            .oneshot(json_request("/api/critique-resume", json!({"resumeText": "text"})))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        assert_eq!(body_json(response).await["error"]["code"], "LLM_ERROR");
    }

    #[tokio::test]
    async fn test_critique_file_reads_text_upload() {
        let server = MockServer::start().await;
        mock_llm_reply(&server, "Add metrics to every bullet.").await;

        let boundary = "XBOUNDARY";
        let body = format!(
            "--{boundary}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"cv.txt\"\r\nContent-Type: text/plain\r\n\r\nGo developer with 2 years experience\r\n\
             --{boundary}\r\nContent-Disposition: form-data; name=\"job_role\"\r\n\r\nBackend Developer\r\n--{boundary}--\r\n"
        );
        let request = Request::builder()
            .method("POST")
            .uri("/api/critique-resume/file")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={boundary}"),
            )
            .body(Body::from(body))
            .unwrap();

        let response = app(&server.uri(), Arc::new(DisabledVideoSearch))
            .oneshot(request)
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["analysis"], "Add metrics to every bullet.");
    }

    #[tokio::test]
    async fn test_upload_rejects_non_pdf() {
        let boundary = "XBOUNDARY";
        let body = format!(
            "--{boundary}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"cv.txt\"\r\nContent-Type: text/plain\r\n\r\nhello\r\n--{boundary}--\r\n"
        );
        let request = Request::builder()
            .method("POST")
            .uri("/api/resume/upload")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={boundary}"),
            )
            .body(Body::from(body))
            .unwrap();

        let response = offline_app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(response).await["error"]["message"],
            "Invalid file type. Only PDF is supported."
        );
    }

    #[tokio::test]
    async fn test_youtube_validation_and_disabled_search() {
        let response = offline_app()
            .oneshot(json_request("/api/youtube", json!({"skills": []})))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = offline_app()
            .oneshot(json_request("/api/youtube", json!({"skills": ["Rust"]})))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["resources"][0]["skill"], "Rust");
        assert!(body["resources"][0]["videos"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_export_txt_download() {
        let response = offline_app()
            .oneshot(json_request(
                "/api/resume-builder/export/txt",
                json!({"personal": {"name": "Asha Rao"}, "skills": ["Rust"]}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_DISPOSITION],
            "attachment; filename=\"Asha-Rao-resume.txt\""
        );
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&bytes[..], b"Asha Rao\n\nSKILLS\nRust");
    }

    #[tokio::test]
    async fn test_export_unknown_format() {
        let response = offline_app()
            .oneshot(json_request("/api/resume-builder/export/odt", json!({})))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_enhance_description_requires_text() {
        let response = offline_app()
            .oneshot(json_request(
                "/api/resume-builder/enhance-description",
                json!({"role": "Intern", "description": " "}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
