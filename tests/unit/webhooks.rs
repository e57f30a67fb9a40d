//! Unit tests for admission webhook validation
//!
//! These tests use the public webhook API (ValidationContext, validate_all and
//! the router) to verify policy enforcement from an external perspective.
//!
//! Note: Internal policy tests are in src/webhooks/policies/*.rs

use crate::common::*;

// =============================================================================
// Policy Tests
// =============================================================================

mod policy_tests {
    use super::*;
    use rhmi_config_operator::webhooks::{ValidationContext, validate_all};

    #[test]
    fn test_valid_config_passes() {
        let config = RHMIConfigBuilder::new("rhmi-config", TEST_NAMESPACE)
            .with_backup("20:00")
            .with_maintenance("sun 23:00")
            .with_contacts("user1@example.com,user2@example.com")
            .with_upgrade_on("12 Jan 2999 23:00")
            .build();
        let clock = test_clock();
        let result = validate_all(&ValidationContext::new(&config, None, &clock));
        assert!(result.allowed, "Valid config should pass: {:?}", result);
    }

    #[test]
    fn test_empty_spec_allowed_on_create() {
        let config = RHMIConfigBuilder::new("rhmi-config", TEST_NAMESPACE).build();
        let clock = test_clock();
        let result = validate_all(&ValidationContext::new(&config, None, &clock));
        assert!(result.allowed, "Empty CREATE should pass: {:?}", result);
    }

    #[test]
    fn test_empty_spec_denied_on_update() {
        let old_config = create_test_config("20:00", "sun 23:00");
        let config = RHMIConfigBuilder::new("rhmi-config", TEST_NAMESPACE).build();
        let clock = test_clock();
        let result = validate_all(&ValidationContext::new(&config, Some(&old_config), &clock));
        assert!(!result.allowed);
        assert_eq!(result.reason.as_deref(), Some("MissingField"));
        assert_eq!(
            result.message.as_deref(),
            Some("maintenance apply from value is required")
        );
    }

    #[test]
    fn test_conflicting_upgrade_policy_denied() {
        let config = RHMIConfigBuilder::new("rhmi-config", TEST_NAMESPACE)
            .with_backup("20:00")
            .with_maintenance("sun 23:00")
            .with_during_next_maintenance()
            .with_upgrade_on("12 Jan 2999 23:00")
            .build();
        let clock = test_clock();
        let result = validate_all(&ValidationContext::new(&config, None, &clock));
        assert!(!result.allowed);
        assert_eq!(result.reason.as_deref(), Some("ConflictingFields"));
    }

    #[test]
    fn test_automatic_policy_without_date_passes() {
        let config = RHMIConfigBuilder::new("rhmi-config", TEST_NAMESPACE)
            .with_backup("20:00")
            .with_maintenance("sun 23:00")
            .with_always_immediately()
            .build();
        let clock = test_clock();
        let result = validate_all(&ValidationContext::new(&config, None, &clock));
        assert!(result.allowed);
    }

    #[test]
    fn test_update_validates_new_object() {
        let old_config = create_test_config("20:00", "sun 23:00");
        let new_config = create_test_config("23:00", "sun 23:30");
        let clock = test_clock();
        let result = validate_all(&ValidationContext::new(
            &new_config,
            Some(&old_config),
            &clock,
        ));
        assert!(!result.allowed);
        assert_eq!(result.reason.as_deref(), Some("WindowOverlap"));
    }
}

// =============================================================================
// HTTP Handler Tests
// =============================================================================

mod handler_tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use http_body_util::BodyExt;
    use rhmi_config_operator::webhooks::{WebhookState, create_webhook_router};
    use rhmi_config_operator::HealthState;
    use std::sync::Arc;
    use tower::ServiceExt;

    async fn post_review(
        state: WebhookState,
        body: serde_json::Value,
    ) -> (StatusCode, serde_json::Value) {
        let app = create_webhook_router(Arc::new(state));
        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/validate")
                    .header("content-type", "application/json")
                    .body(Body::from(serde_json::to_vec(&body).unwrap()))
                    .unwrap(),
            )
            .await
            .unwrap();

        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    fn fixed_state() -> WebhookState {
        WebhookState::new(Arc::new(test_clock()), None)
    }

    #[tokio::test]
    async fn test_update_allowed() {
        let config = create_test_config("20:00", "sun 23:00");
        let (status, body) =
            post_review(fixed_state(), admission_review("UPDATE", Some(&config), Some(&config)))
                .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["apiVersion"], "admission.k8s.io/v1");
        assert_eq!(body["kind"], "AdmissionReview");
        assert_eq!(body["response"]["uid"], "705ab4f5-6393-11e8-b7cc-42010a800002");
        assert_eq!(body["response"]["allowed"], true);
        assert!(body["response"].get("status").is_none());
    }

    #[tokio::test]
    async fn test_update_denied_with_reason() {
        let old_config = create_test_config("20:00", "sun 23:00");
        let config = create_test_config("23:00", "sun 23:30");
        let (status, body) = post_review(
            fixed_state(),
            admission_review("UPDATE", Some(&config), Some(&old_config)),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["response"]["allowed"], false);
        assert_eq!(body["response"]["status"]["code"], 403);
        assert_eq!(body["response"]["status"]["reason"], "WindowOverlap");
    }

    #[tokio::test]
    async fn test_create_with_past_upgrade_denied() {
        let config = RHMIConfigBuilder::new("rhmi-config", TEST_NAMESPACE)
            .with_backup("20:00")
            .with_maintenance("sun 23:00")
            .with_upgrade_on("12 Jan 1980 23:00")
            .build();
        let (_, body) =
            post_review(fixed_state(), admission_review("CREATE", Some(&config), None)).await;

        assert_eq!(body["response"]["allowed"], false);
        assert_eq!(body["response"]["status"]["reason"], "NotInFuture");
    }

    #[tokio::test]
    async fn test_empty_create_allowed() {
        let config = RHMIConfigBuilder::new("rhmi-config", TEST_NAMESPACE).build();
        let (status, body) =
            post_review(fixed_state(), admission_review("CREATE", Some(&config), None)).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["response"]["allowed"], true);
    }

    #[tokio::test]
    async fn test_empty_update_denied() {
        let old_config = create_test_config("20:00", "sun 23:00");
        let config = RHMIConfigBuilder::new("rhmi-config", TEST_NAMESPACE).build();
        let (_, body) = post_review(
            fixed_state(),
            admission_review("UPDATE", Some(&config), Some(&old_config)),
        )
        .await;

        assert_eq!(body["response"]["allowed"], false);
        assert_eq!(body["response"]["status"]["reason"], "MissingField");
    }

    #[tokio::test]
    async fn test_update_without_old_object_denied() {
        let config = create_test_config("20:00", "sun 23:00");
        let (_, body) =
            post_review(fixed_state(), admission_review("UPDATE", Some(&config), None)).await;

        assert_eq!(body["response"]["allowed"], false);
        assert_eq!(
            body["response"]["status"]["message"],
            "Missing old object in UPDATE request"
        );
    }

    #[tokio::test]
    async fn test_delete_allowed() {
        let (status, body) =
            post_review(fixed_state(), admission_review("DELETE", None, None)).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["response"]["allowed"], true);
    }

    #[tokio::test]
    async fn test_missing_request_is_bad_request() {
        let review = serde_json::json!({
            "apiVersion": "admission.k8s.io/v1",
            "kind": "AdmissionReview",
        });
        let (status, body) = post_review(fixed_state(), review).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["response"]["allowed"], false);
    }

    #[tokio::test]
    async fn test_metrics_recorded() {
        let health = Arc::new(HealthState::new());
        let state = WebhookState::new(Arc::new(test_clock()), Some(health.clone()));
        let old_config = create_test_config("20:00", "sun 23:00");
        let config = create_test_config("", "sun 23:00");

        post_review(
            state,
            admission_review("UPDATE", Some(&config), Some(&old_config)),
        )
        .await;

        let encoded = health.metrics.encode();
        assert!(encoded.contains("reason=\"MissingField\""), "{}", encoded);
        assert!(encoded.contains("operation=\"UPDATE\""), "{}", encoded);
    }
}
