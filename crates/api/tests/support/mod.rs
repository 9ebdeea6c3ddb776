//! Shared fixtures for the harvest-api integration tests

#![allow(dead_code)]

use harvest_api::{HarvestClient, HarvestConfig};
use serde_json::{json, Value};
use wiremock::MockServer;

pub const USER_AGENT: &str = "harvest-tests (dev@example.com)";
pub const ACCOUNT_ID: i64 = 1176282;
pub const REDIRECT: &str = "http://localhost:5000/harvest/callback";

/// Config pointing both hosts at `server`, with a default account.
pub fn config_for(server: &MockServer) -> HarvestConfig {
    HarvestConfig {
        api_base_url: server.uri(),
        id_base_url: server.uri(),
        user_agent: Some(USER_AGENT.to_string()),
        default_account_id: Some(ACCOUNT_ID),
        access_token: Some("token-abc".to_string()),
        ..HarvestConfig::default()
    }
}

pub fn client_for(server: &MockServer) -> HarvestClient {
    HarvestClient::new(config_for(server)).expect("client")
}

/// OAuth-capable client with no tokens installed.
pub fn oauth_client_for(server: &MockServer) -> HarvestClient {
    HarvestClient::new(HarvestConfig {
        client_id: Some("client-123".to_string()),
        client_secret: Some("secret-456".to_string()),
        redirect_uri: Some(REDIRECT.to_string()),
        access_token: None,
        default_account_id: None,
        ..config_for(server)
    })
    .expect("oauth client")
}

pub fn pagination(key: &str, items: Vec<Value>) -> Value {
    let total = items.len();
    json!({
        key: items,
        "per_page": 100,
        "total_pages": 1,
        "total_entries": total,
        "next_page": null,
        "previous_page": null,
        "page": 1,
        "links": null
    })
}

pub fn time_entry(id: i64) -> Value {
    json!({
        "id": id,
        "spent_date": "2017-03-21",
        "user": {"id": 1782959, "name": "Kim Allen"},
        "client": {"id": 5735776, "name": "123 Industries"},
        "project": {"id": 14307913, "name": "Marketing Website"},
        "task": {"id": 8083365, "name": "Graphic Design"},
        "invoice": null,
        "hours": 1.0,
        "notes": "Blog post",
        "is_locked": false,
        "locked_reason": null,
        "is_closed": false,
        "is_billed": false,
        "timer_started_at": null,
        "started_time": null,
        "ended_time": null,
        "is_running": false,
        "billable": true,
        "budgeted": true,
        "billable_rate": 100.0,
        "cost_rate": 50.0,
        "external_reference": null,
        "created_at": "2017-06-27T15:49:28Z",
        "updated_at": "2017-06-27T16:47:14Z"
    })
}

pub fn user(id: i64, first: &str, last: &str) -> Value {
    json!({
        "id": id,
        "first_name": first,
        "last_name": last,
        "email": format!("{}@example.com", first.to_lowercase()),
        "telephone": "",
        "timezone": "Eastern Time (US & Canada)",
        "has_access_to_all_future_projects": false,
        "is_contractor": false,
        "is_active": true,
        "weekly_capacity": 126000,
        "default_hourly_rate": 100.0,
        "cost_rate": 50.0,
        "roles": ["Founder"],
        "access_roles": ["administrator"],
        "avatar_url": null,
        "created_at": "2017-05-01T20:41:00Z",
        "updated_at": "2017-05-01T20:42:25Z"
    })
}

pub fn project(id: i64, name: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "code": "MW",
        "is_active": true,
        "is_billable": true,
        "is_fixed_fee": false,
        "bill_by": "Project",
        "budget": 50.0,
        "budget_by": "project",
        "budget_is_monthly": false,
        "notify_when_over_budget": true,
        "over_budget_notification_percentage": 80.0,
        "over_budget_notification_date": null,
        "show_budget_to_all": false,
        "cost_budget": null,
        "cost_budget_include_expenses": false,
        "hourly_rate": 100.0,
        "fee": null,
        "notes": "",
        "starts_on": "2017-01-01",
        "ends_on": null,
        "client": {"id": 5735776, "name": "123 Industries"},
        "created_at": "2017-06-26T21:52:18Z",
        "updated_at": "2017-06-26T21:54:06Z"
    })
}

pub fn task(id: i64, name: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "billable_by_default": true,
        "default_hourly_rate": 100.0,
        "is_default": true,
        "is_active": true,
        "created_at": "2017-06-26T22:08:25Z",
        "updated_at": "2017-06-26T22:08:25Z"
    })
}

pub fn client_record(id: i64, name: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "is_active": true,
        "currency": "EUR",
        "address": "123 Main St",
        "statement_key": null,
        "created_at": "2017-06-26T21:02:12Z",
        "updated_at": "2017-06-26T21:34:11Z"
    })
}

pub fn project_assignment(id: i64) -> Value {
    json!({
        "id": id,
        "is_project_manager": true,
        "is_active": true,
        "budget": null,
        "hourly_rate": 100.0,
        "project": {"id": 14308069, "name": "Online Store - Phase 1", "code": "OS1"},
        "client": {"id": 5735776, "name": "123 Industries"},
        "task_assignments": [{
            "id": 155505014,
            "billable": true,
            "is_active": true,
            "hourly_rate": 100.0,
            "budget": null,
            "task": {"id": 8083365, "name": "Graphic Design"},
            "created_at": "2017-06-26T21:52:18Z",
            "updated_at": "2017-06-26T21:52:18Z"
        }],
        "created_at": "2017-06-26T21:52:18Z",
        "updated_at": "2017-06-26T21:52:18Z"
    })
}
