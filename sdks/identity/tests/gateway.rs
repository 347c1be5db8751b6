//! Wire-level behavior of the request gateway.

mod common;

use std::sync::Arc;

use httpmock::prelude::*;
use serde_json::json;

use common::{FailingTokenProvider, SCOPES, authed_gateway, gateway, service};
use idc_identity_sdk::{ApiClientError, ApiRequest, CreateTenantRequest, RoleDto, UsState, UserDto};

// -- authentication -----------------------------------------------------------

#[tokio::test]
async fn failed_token_acquisition_issues_no_network_request() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST).path("/users");
        then.status(201).json_body(json!({}));
    });

    let client = gateway(&server)
        .with_token_provider(Arc::new(FailingTokenProvider), vec![SCOPES.to_owned()]);

    let err = client
        .execute::<UserDto>(
            ApiRequest::post("/users")
                .json(&json!({"tenantId": "t1", "userName": "ada"}))
                .unwrap(),
        )
        .await
        .unwrap_err();

    assert!(
        matches!(err, ApiClientError::Authentication(_)),
        "got: {err:?}"
    );
    assert!(err.is_interaction_required());
    assert_eq!(mock.calls(), 0, "no network request may be issued");
}

#[tokio::test]
async fn missing_provider_fails_authentication_without_network() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET).path("/users/me");
        then.status(200).json_body(json!({}));
    });

    let client = gateway(&server); // no provider installed
    let err = client.get::<UserDto>("/users/me").await.unwrap_err();

    assert!(
        matches!(err, ApiClientError::Authentication(_)),
        "got: {err:?}"
    );
    assert_eq!(mock.calls(), 0);
}

#[tokio::test]
async fn bearer_token_attached_to_authenticated_requests() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET)
            .path("/users/me")
            .header("authorization", "Bearer test-token");
        then.status(200)
            .header("content-type", "application/json")
            .json_body(json!({"userId": "u1", "tenantId": "t1", "isActive": true}));
    });

    let client = authed_gateway(&server, "test-token");
    let user: UserDto = client.get("/users/me").await.unwrap();

    assert_eq!(user.user_id.as_deref(), Some("u1"));
    mock.assert();
}

#[tokio::test]
async fn unauthenticated_request_has_no_authorization_header() {
    let server = MockServer::start();
    let with_auth = server.mock(|when, then| {
        when.method(GET).path("/roles").header_exists("authorization");
        then.status(500);
    });
    let without_auth = server.mock(|when, then| {
        when.method(GET).path("/roles");
        then.status(200)
            .header("content-type", "application/json")
            .json_body(json!([]));
    });

    let client = authed_gateway(&server, "test-token");
    let roles: Vec<RoleDto> = client
        .execute(ApiRequest::get("/roles").no_auth())
        .await
        .unwrap();

    assert!(roles.is_empty());
    assert_eq!(with_auth.calls(), 0);
    without_auth.assert();
}

// -- success classification ---------------------------------------------------

/// `GET /roles` without auth against a stub returning one role.
#[tokio::test]
async fn roles_list_parses_unchanged() {
    let server = MockServer::start();
    let _m = server.mock(|when, then| {
        when.method(GET).path("/roles");
        then.status(200)
            .header("content-type", "application/json")
            .body(r#"[{"roleId":"r1","roleName":"Admin"}]"#);
    });

    let client = gateway(&server);
    let roles: Vec<RoleDto> = client
        .execute(ApiRequest::get("/roles").no_auth())
        .await
        .unwrap();

    assert_eq!(roles.len(), 1);
    assert_eq!(roles[0].role_id.as_deref(), Some("r1"));
    assert_eq!(roles[0].role_name.as_deref(), Some("Admin"));
}

#[tokio::test]
async fn no_content_resolves_to_unit() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(DELETE).path("/users/u1");
        then.status(204);
    });

    let client = authed_gateway(&server, "test-token");
    client.delete::<()>("/users/u1").await.unwrap();
    mock.assert();
}

#[tokio::test]
async fn empty_200_body_resolves_to_unit() {
    let server = MockServer::start();
    let _m = server.mock(|when, then| {
        when.method(PUT).path("/roles/r1");
        then.status(200); // no body at all
    });

    let client = authed_gateway(&server, "test-token");
    client.put::<(), _>("/roles/r1", &json!({"roleName": "Admin"})).await.unwrap();
}

#[tokio::test]
async fn json_body_round_trips_unchanged() {
    let server = MockServer::start();
    let _m = server.mock(|when, then| {
        when.method(POST)
            .path("/users")
            .header("content-type", "application/json")
            .json_body_includes(r#"{"userName": "ada", "tenantId": "t1"}"#);
        then.status(201)
            .header("content-type", "application/json")
            .json_body(json!({
                "userId": "u-new",
                "tenantId": "t1",
                "firstName": "Ada",
                "lastName": "Lovelace",
                "username": "ada",
                "roles": [{"roleId": "r1", "roleName": "User Admin"}],
                "isActive": true
            }));
    });

    let client = authed_gateway(&server, "test-token");
    let user: UserDto = client
        .post(
            "/users",
            &json!({
                "tenantId": "t1",
                "userName": "ada",
                "password": "pw",
                "firstName": "Ada",
                "lastName": "Lovelace",
                "email": "ada@example.com",
                "mobilePhone": "555-0100"
            }),
        )
        .await
        .unwrap();

    assert_eq!(user.user_id.as_deref(), Some("u-new"));
    assert_eq!(user.roles.as_ref().unwrap()[0].role_name.as_deref(), Some("User Admin"));
    assert!(user.has_role("User Admin"));
}

#[tokio::test]
async fn non_json_success_returns_raw_text() {
    let server = MockServer::start();
    let _m = server.mock(|when, then| {
        when.method(GET).path("/status");
        then.status(200)
            .header("content-type", "text/plain")
            .body("pong");
    });

    let client = gateway(&server);
    let text: String = client
        .execute(ApiRequest::get("/status").no_auth())
        .await
        .unwrap();
    assert_eq!(text, "pong");
}

// -- error classification -----------------------------------------------------

#[tokio::test]
async fn problem_details_preserved_verbatim() {
    let server = MockServer::start();
    let _m = server.mock(|when, then| {
        when.method(POST).path("/users");
        then.status(400)
            .header("content-type", "application/problem+json")
            .body(
                r#"{
                    "type": "https://tools.ietf.org/html/rfc9110#section-15.5.1",
                    "title": "One or more validation errors occurred.",
                    "status": 400,
                    "detail": "user payload rejected",
                    "errors": {
                        "email": ["The email field is required."],
                        "mobilePhone": ["Invalid phone number.", "Too short."]
                    }
                }"#,
            );
    });

    let client = authed_gateway(&server, "test-token");
    let err = client
        .post::<UserDto, _>("/users", &json!({"tenantId": "t1"}))
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(http::StatusCode::BAD_REQUEST));
    assert_eq!(err.detail(), Some("user payload rejected"));
    let errors = err.field_errors().unwrap();
    assert_eq!(errors["email"], vec!["The email field is required.".to_owned()]);
    assert_eq!(errors["mobilePhone"].len(), 2);
}

#[tokio::test]
async fn unparseable_error_body_falls_back_to_status_text() {
    let server = MockServer::start();
    let _m = server.mock(|when, then| {
        when.method(GET).path("/tenants");
        then.status(500)
            .header("content-type", "text/html")
            .body("<html>gateway exploded</html>");
    });

    let client = authed_gateway(&server, "test-token");
    let err = client.get::<Vec<serde_json::Value>>("/tenants").await.unwrap_err();

    match err {
        ApiClientError::Api { status, problem } => {
            assert_eq!(status, http::StatusCode::INTERNAL_SERVER_ERROR);
            assert_eq!(problem.title.as_deref(), Some("Internal Server Error"));
            assert_eq!(problem.detail.as_deref(), Some("HTTP 500: Internal Server Error"));
        }
        other => panic!("expected Api error, got: {other:?}"),
    }
}

#[tokio::test]
async fn error_carries_exact_status_code() {
    let server = MockServer::start();
    for (path, status) in [("/a", 401u16), ("/b", 403), ("/c", 404), ("/d", 409), ("/e", 503)] {
        let _m = server.mock(|when, then| {
            when.method(GET).path(path);
            then.status(status);
        });
        let client = authed_gateway(&server, "test-token");
        let err = client.get::<serde_json::Value>(path).await.unwrap_err();
        assert_eq!(err.status().map(|s| s.as_u16()), Some(status));
    }
}

#[tokio::test]
async fn unreachable_backend_is_transport_error() {
    // Nothing listens on port 1.
    let client = idc_identity_sdk::ApiClient::for_testing(idc_identity_sdk::ApiConfig::new(
        "http://127.0.0.1:1",
    ));
    let err = client
        .execute::<serde_json::Value>(ApiRequest::get("/roles").no_auth())
        .await
        .unwrap_err();
    assert!(matches!(err, ApiClientError::Transport(_)), "got: {err:?}");
}

// -- multipart ----------------------------------------------------------------

#[tokio::test]
async fn tenant_creation_is_multipart_not_json() {
    let server = MockServer::start();
    let json_content_type = server.mock(|when, then| {
        when.method(POST)
            .path("/tenants")
            .header("content-type", "application/json");
        then.status(500);
    });
    let multipart = server.mock(|when, then| {
        when.method(POST)
            .path("/tenants")
            .header("authorization", "Bearer test-token")
            .header_matches("content-type", "^multipart/form-data; boundary=.+$")
            .body_includes("name=\"tenantName\"")
            .body_includes("Acme Corp")
            .body_includes("name=\"tenantState\"")
            .body_includes("FL");
        then.status(201)
            .header("content-type", "application/json")
            .json_body(json!({"tenantId": "t-new", "tenantState": "FL", "isActive": true}));
    });

    let api = service(&server, "test-token");
    let request = CreateTenantRequest {
        tenant_name: "Acme Corp".into(),
        tenant_address1: "1 Main St".into(),
        tenant_address2: None,
        tenant_city: "Orlando".into(),
        tenant_state: UsState::FL,
        tenant_zip: "32801".into(),
        tenant_phone_number: "555-0100".into(),
        tenant_fax: None,
        contact_first_name: "Ada".into(),
        contact_last_name: "Lovelace".into(),
        contact_mobile_phone: "555-0101".into(),
        contact_email: "ada@acme.example".into(),
        password: None,
    };

    let tenant = api.tenants.create(&request).await.unwrap();

    assert_eq!(tenant.tenant_id, "t-new");
    assert_eq!(
        json_content_type.calls(),
        0,
        "multipart request must not carry application/json"
    );
    multipart.assert();
}

// -- concurrent composition ---------------------------------------------------

#[tokio::test]
async fn overview_loads_three_reads_concurrently() {
    let server = MockServer::start();
    let _user = server.mock(|when, then| {
        when.method(GET).path("/users/me");
        then.status(200)
            .header("content-type", "application/json")
            .json_body(json!({"userId": "u1", "tenantId": "t1", "username": "ada", "isActive": true}));
    });
    let _roles = server.mock(|when, then| {
        when.method(GET).path("/roles");
        then.status(200)
            .header("content-type", "application/json")
            .json_body(json!([{"roleId": "r1", "roleName": "Super Admin"}]));
    });
    let _tenants = server.mock(|when, then| {
        when.method(GET).path("/tenants");
        then.status(200)
            .header("content-type", "application/json")
            .json_body(json!([{"tenantId": "t1", "tenantState": "FL", "isActive": true}]));
    });

    let api = service(&server, "test-token");
    let overview = api.load_overview().await.unwrap();

    assert_eq!(overview.current_user.username.as_deref(), Some("ada"));
    assert_eq!(overview.roles.len(), 1);
    assert_eq!(overview.tenants.len(), 1);
    assert!(overview.current_user.tenant_id == overview.tenants[0].tenant_id);
}

/// One failing read blanks the whole overview: the roles 500 wins and the
/// successful user/tenant reads are discarded.
#[tokio::test]
async fn overview_rejects_with_the_failing_reads_error() {
    let server = MockServer::start();
    let _user = server.mock(|when, then| {
        when.method(GET).path("/users/me");
        then.status(200)
            .header("content-type", "application/json")
            .json_body(json!({"userId": "u1", "tenantId": "t1", "isActive": true}));
    });
    let _roles = server.mock(|when, then| {
        when.method(GET).path("/roles");
        then.status(500)
            .header("content-type", "application/problem+json")
            .body(r#"{"title":"Internal Server Error","status":500,"detail":"roles backend down"}"#);
    });
    let _tenants = server.mock(|when, then| {
        when.method(GET).path("/tenants");
        then.status(200)
            .header("content-type", "application/json")
            .json_body(json!([]));
    });

    let api = service(&server, "test-token");
    let err = api.load_overview().await.unwrap_err();

    assert_eq!(err.status(), Some(http::StatusCode::INTERNAL_SERVER_ERROR));
    assert_eq!(err.detail(), Some("roles backend down"));
}

// -- end-to-end with the session provider -------------------------------------

#[tokio::test]
async fn session_provider_feeds_the_gateway() {
    let server = MockServer::start();
    let token_endpoint = server.mock(|when, then| {
        when.method(POST)
            .path("/oauth2/token")
            .body_includes("grant_type=refresh_token");
        then.status(200)
            .header("content-type", "application/json")
            .body(r#"{"access_token":"live-token","expires_in":3600,"token_type":"Bearer"}"#);
    });
    let api_mock = server.mock(|when, then| {
        when.method(GET)
            .path("/users/me")
            .header("authorization", "Bearer live-token");
        then.status(200)
            .header("content-type", "application/json")
            .json_body(json!({"userId": "u1", "tenantId": "t1", "isActive": true}));
    });

    let auth_config = idc_auth::AuthConfig {
        token_endpoint: Some(
            url::Url::parse(&format!("{}/oauth2/token", server.base_url())).unwrap(),
        ),
        client_id: "console-client".into(),
        http_config: Some(idc_http::HttpClientConfig::for_testing()),
        ..Default::default()
    };
    let provider = Arc::new(
        idc_auth::SessionTokenProvider::new(auth_config)
            .await
            .unwrap(),
    );
    provider.begin_session(idc_auth::SecretString::new("rt-1"));

    let client = gateway(&server).with_token_provider(provider, vec![SCOPES.to_owned()]);
    let user: UserDto = client.get("/users/me").await.unwrap();

    assert_eq!(user.user_id.as_deref(), Some("u1"));
    token_endpoint.assert();
    api_mock.assert();
}
