//! Integration tests for the HTTP endpoint client against a local fixture.

mod common;

use std::sync::Arc;
use std::time::Duration;

use common::Fixture;
use common::Reply;
use rbac_lib::AdminClient;
use rbac_lib::RetryConfig;
use rbac_lib::api::DataEndpoint;
use rbac_lib::api::ListQuery;
use rbac_lib::api::Resource;
use rbac_lib::api::ResourceEndpoint;
use rbac_lib::api::SortKey;
use rbac_lib::config::TableConfig;
use rbac_lib::error::ApiError;
use rbac_lib::model::RecordId;
use rbac_lib::presets;
use serde_json::json;

fn client(fixture: &Fixture) -> AdminClient {
    AdminClient::builder()
        .url(fixture.url())
        .retry(RetryConfig::default().initial_delay(Duration::from_millis(10)))
        .build()
        .unwrap()
}

#[tokio::test]
async fn test_list_sends_query_and_parses_envelope() {
    let fixture = Fixture::start(|_, _| Reply::json(200, common::users_page(2, 25, 47))).await;
    let client = client(&fixture);

    let query = ListQuery {
        page: 2,
        per_page: Some(25),
        global_search: "example".into(),
        order: Some(SortKey::desc("name")),
    };
    let page = client.list(&Resource::users(), &query).await.unwrap();

    assert_eq!(page.current_page(), 2);
    assert_eq!(page.per_page(), 25);
    assert_eq!(page.total(), 47);
    assert_eq!((page.from(), page.to()), (26, 47));
    assert_eq!(page.len(), 22);

    let requests = fixture.requests();
    let request = &requests[0];
    assert_eq!(request.method, "GET");
    assert_eq!(request.path, "/core/users/data");
    assert_eq!(request.query["page"], "2");
    assert_eq!(request.query["perPage"], "25");
    assert_eq!(request.query["globalSearch"], "example");
    assert_eq!(request.query["orderBy"], "name");
    assert_eq!(request.query["orderDirection"], "desc");
    assert_eq!(request.headers["accept"], "application/json");
    assert_eq!(request.headers["x-requested-with"], "XMLHttpRequest");
}

#[tokio::test]
async fn test_list_without_sort_omits_order_params() {
    let fixture = Fixture::start(|_, _| Reply::json(200, common::users_page(1, 10, 3))).await;
    let client = client(&fixture);

    client.list(&Resource::roles(), &ListQuery::default()).await.unwrap();

    let request = &fixture.requests()[0];
    assert_eq!(request.path, "/core/roles/data");
    assert!(!request.query.contains_key("orderBy"));
    assert!(!request.query.contains_key("orderDirection"));
    assert_eq!(request.query["globalSearch"], "");
}

#[tokio::test]
async fn test_unpaginated_list_accepts_bare_array() {
    let fixture = Fixture::start(|_, _| {
        Reply::json(200, json!([{"id": 1, "name": "admin"}, {"id": 2, "name": "editor"}]))
    })
    .await;
    let client = client(&fixture);

    let query = ListQuery {
        per_page: None,
        ..Default::default()
    };
    let page = client.list(&Resource::permissions(), &query).await.unwrap();
    assert_eq!(page.len(), 2);
    assert_eq!(page.total(), 2);
    assert!(!fixture.requests()[0].query.contains_key("perPage"));
}

#[tokio::test]
async fn test_empty_page_with_null_bounds() {
    let fixture = Fixture::start(|_, _| Reply::json(200, common::users_page(1, 10, 0))).await;
    let page = client(&fixture)
        .list(&Resource::users(), &ListQuery::default())
        .await
        .unwrap();
    assert!(page.is_empty());
    assert_eq!((page.from(), page.to(), page.total()), (0, 0, 0));
}

#[tokio::test]
async fn test_server_error_is_retried() {
    let fixture = Fixture::start(|_, index| {
        if index == 0 {
            Reply::status(503)
        } else {
            Reply::json(200, common::users_page(1, 10, 5))
        }
    })
    .await;

    let page = client(&fixture)
        .list(&Resource::users(), &ListQuery::default())
        .await
        .unwrap();
    assert_eq!(page.len(), 5);
    assert_eq!(fixture.requests().len(), 2);
}

#[tokio::test]
async fn test_retries_are_bounded() {
    let fixture = Fixture::start(|_, _| Reply::status(500)).await;
    let client = AdminClient::builder()
        .url(fixture.url())
        .retry(RetryConfig::default().max_retries(1).initial_delay(Duration::from_millis(5)))
        .build()
        .unwrap();

    let err = client.list(&Resource::users(), &ListQuery::default()).await.unwrap_err();
    assert_eq!(err.status_code(), Some(500));
    assert_eq!(fixture.requests().len(), 2);
}

#[tokio::test]
async fn test_rate_limit_without_retry() {
    let fixture = Fixture::start(|_, _| {
        let mut reply = Reply::status(429);
        reply.headers.push(("Retry-After", "7".to_string()));
        reply
    })
    .await;
    let client = AdminClient::builder()
        .url(fixture.url())
        .retry(RetryConfig::no_retry())
        .build()
        .unwrap();

    let err = client.list(&Resource::users(), &ListQuery::default()).await.unwrap_err();
    assert!(matches!(
        err,
        ApiError::RateLimited { retry_after: Some(d) } if d == Duration::from_secs(7)
    ));
}

#[tokio::test]
async fn test_validation_errors_are_parsed() {
    let fixture = Fixture::start(|_, _| {
        Reply::json(
            422,
            json!({
                "message": "The permissions field is required.",
                "errors": {"permissions": ["The permissions field is required."]}
            }),
        )
    })
    .await;

    let err = client(&fixture)
        .assign_role_permissions(&RecordId::Int(1), &[])
        .await
        .unwrap_err();
    let ApiError::Validation(errors) = err else {
        panic!("expected validation error, got {:?}", err);
    };
    assert_eq!(errors.message.as_deref(), Some("The permissions field is required."));
    assert_eq!(errors.for_field("permissions").count(), 1);
}

#[tokio::test]
async fn test_assign_role_permissions_body() {
    let fixture = Fixture::start(|_, _| Reply::status(200)).await;
    client(&fixture)
        .assign_role_permissions(&RecordId::Int(3), &[RecordId::Int(1), RecordId::Int(4)])
        .await
        .unwrap();

    let request = &fixture.requests()[0];
    assert_eq!(request.method, "POST");
    assert_eq!(request.path, "/core/roles/access");
    let body: serde_json::Value = serde_json::from_str(&request.body).unwrap();
    assert_eq!(body, json!({"role_id": 3, "permissions": [1, 4]}));
}

#[tokio::test]
async fn test_parse_error_keeps_body() {
    let fixture = Fixture::start(|_, _| Reply::json(200, json!({"unexpected": true}))).await;
    let err = client(&fixture)
        .list(&Resource::users(), &ListQuery::default())
        .await
        .unwrap_err();
    let ApiError::Parse { body, .. } = err else {
        panic!("expected parse error, got {:?}", err);
    };
    assert!(body.unwrap().contains("unexpected"));
}

#[tokio::test]
async fn test_resource_endpoint_delete_and_verify() {
    let fixture = Fixture::start(|_, _| Reply::status(200)).await;
    let endpoint = ResourceEndpoint::new(client(&fixture), Resource::users());

    endpoint.delete(&RecordId::Int(5)).await.unwrap();
    endpoint.verify(&RecordId::Int(6)).await.unwrap();

    let requests = fixture.requests();
    assert_eq!((requests[0].method.as_str(), requests[0].path.as_str()), ("DELETE", "/core/users/5"));
    assert_eq!((requests[1].method.as_str(), requests[1].path.as_str()), ("PUT", "/core/users/6/verify"));
}

#[tokio::test]
async fn test_delete_is_not_retried() {
    let fixture = Fixture::start(|_, _| Reply::status(500)).await;
    let endpoint = ResourceEndpoint::new(client(&fixture), Resource::roles());
    assert!(endpoint.delete(&RecordId::Int(1)).await.is_err());
    assert_eq!(fixture.requests().len(), 1);
}

#[tokio::test]
async fn test_preset_table_over_http() {
    let fixture = Fixture::start(|seen, _| {
        let page: u64 = seen.query.get("page").and_then(|p| p.parse().ok()).unwrap_or(1);
        Reply::json(200, common::users_page(page, 10, 47))
    })
    .await;

    let preset = presets::users();
    let endpoint = Arc::new(preset.endpoint(client(&fixture)));
    let (table, _parts) = preset.into_table(endpoint, TableConfig::default());

    assert!(table.fetch().await.is_loaded());
    assert!(table.set_page(5).await.is_loaded());
    let snapshot = table.snapshot();
    assert_eq!(snapshot.pagination.page(), 5);
    assert_eq!(snapshot.rows.len(), 7);
    assert_eq!(fixture.requests()[1].query["page"], "5");
}
