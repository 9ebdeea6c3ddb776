//! Integration tests for wire records
//!
//! Decodes response bodies shaped like the ones Harvest documents and checks
//! the fields callers depend on.

use anyhow::Result;
use chrono::{NaiveDate, NaiveTime};
use harvest_domain::{
    AccountsResponse, ExternalReference, ProjectAssignmentsResponse, TimeEntry, TokenResponse,
    UsersResponse,
};
use serde_json::json;

// ============================================================================
// Time entries
// ============================================================================

/// A running timer on a 12-hour account.
///
/// Scenario: the entry has no end time yet and an external reference to an
/// issue tracker.
#[test]
fn test_running_timer_entry() -> Result<()> {
    let body = json!({
        "id": 662204379,
        "spent_date": "2017-03-21",
        "user": {"id": 1795925, "name": "Jane Smith"},
        "client": {"id": 5735776, "name": "123 Industries"},
        "project": {"id": 14808188, "name": "Task Force"},
        "task": {"id": 8083366, "name": "Programming"},
        "invoice": null,
        "hours": 0.02,
        "notes": null,
        "is_locked": false,
        "locked_reason": null,
        "is_closed": false,
        "is_billed": false,
        "timer_started_at": "2017-08-22T16:48:13Z",
        "started_time": "9:48am",
        "ended_time": null,
        "is_running": true,
        "billable": true,
        "budgeted": false,
        "billable_rate": 100.0,
        "cost_rate": 75.0,
        "external_reference": {
            "id": "ISSUE-8",
            "group_id": "PROJ",
            "permalink": "https://tracker.example.com/ISSUE-8",
            "service": "tracker.example.com",
            "service_icon_url": null
        },
        "created_at": "2017-08-22T16:48:13Z",
        "updated_at": "2017-08-22T16:48:13Z"
    });

    let entry: TimeEntry = serde_json::from_value(body)?;

    assert!(entry.is_running);
    assert_eq!(entry.spent_date, NaiveDate::from_ymd_opt(2017, 3, 21).unwrap());
    assert_eq!(entry.started_time, NaiveTime::from_hms_opt(9, 48, 0));
    assert_eq!(entry.ended_time, None);
    assert_eq!(entry.notes, None);

    let reference = entry.external_reference.expect("external reference");
    assert_eq!(reference.id, "ISSUE-8");
    assert_eq!(reference.service.as_deref(), Some("tracker.example.com"));
    Ok(())
}

/// Only the writable parts of an external reference are serialized.
#[test]
fn test_new_external_reference_omits_server_fields() -> Result<()> {
    let reference = ExternalReference::new("8", "3", "https://example.com/8");
    let value = serde_json::to_value(&reference)?;

    assert_eq!(value, json!({"id": "8", "group_id": "3", "permalink": "https://example.com/8"}));
    Ok(())
}

// ============================================================================
// Users and accounts
// ============================================================================

#[test]
fn test_users_page_with_next_link() -> Result<()> {
    let body = json!({
        "users": [{
            "id": 3230547,
            "first_name": "Jim",
            "last_name": "Allen",
            "email": "jimallen@example.com",
            "telephone": "",
            "timezone": "Mountain Time (US & Canada)",
            "has_access_to_all_future_projects": false,
            "is_contractor": false,
            "is_active": true,
            "weekly_capacity": 126000,
            "default_hourly_rate": 100.0,
            "cost_rate": 50.0,
            "roles": [],
            "avatar_url": "https://example.com/avatar.png",
            "created_at": "2020-05-01T22:34:41Z",
            "updated_at": "2020-05-01T22:34:52Z"
        }],
        "per_page": 1,
        "total_pages": 3,
        "total_entries": 3,
        "next_page": 2,
        "previous_page": null,
        "page": 1,
        "links": {
            "first": "https://api.harvestapp.com/v2/users?page=1&per_page=1",
            "next": "https://api.harvestapp.com/v2/users?page=2&per_page=1",
            "previous": null,
            "last": "https://api.harvestapp.com/v2/users?page=3&per_page=1"
        }
    });

    let page: UsersResponse = serde_json::from_value(body)?;

    assert_eq!(page.users.len(), 1);
    assert!(page.users[0].access_roles.is_empty(), "missing access_roles defaults to empty");
    assert!(page.pagination.has_next());
    assert_eq!(page.pagination.next_page, Some(2));
    Ok(())
}

#[test]
fn test_accounts_filter_to_harvest_product() -> Result<()> {
    let body = json!({
        "user": {"id": 1, "first_name": "Kim", "last_name": "Allen", "email": "kim@example.com"},
        "accounts": [
            {"id": 1176282, "name": "Acme", "product": "harvest"},
            {"id": 44, "name": "Acme Forecast", "product": "forecast"},
            {"id": 45, "name": "Legacy"}
        ]
    });

    let response: AccountsResponse = serde_json::from_value(body)?;
    let ids: Vec<i64> = response.harvest_accounts().map(|a| a.id).collect();

    assert_eq!(ids, vec![1176282, 45]);
    Ok(())
}

// ============================================================================
// Assignments and tokens
// ============================================================================

#[test]
fn test_project_assignment_without_task_assignments() -> Result<()> {
    let body = json!({
        "project_assignments": [{
            "id": 125066109,
            "is_project_manager": false,
            "is_active": true,
            "budget": null,
            "hourly_rate": null,
            "project": {"id": 14308069, "name": "Online Store - Phase 1", "code": null},
            "client": {"id": 5735776, "name": "123 Industries"},
            "created_at": "2017-06-26T21:52:18Z",
            "updated_at": "2017-06-26T21:52:18Z"
        }],
        "per_page": 100,
        "total_pages": 1,
        "total_entries": 1,
        "next_page": null,
        "previous_page": null,
        "page": 1,
        "links": null
    });

    let response: ProjectAssignmentsResponse = serde_json::from_value(body)?;

    let assignment = &response.project_assignments[0];
    assert!(assignment.task_assignments.is_empty());
    assert_eq!(assignment.project.code, None);
    Ok(())
}

#[test]
fn test_token_response_defaults() -> Result<()> {
    let token: TokenResponse = serde_json::from_value(json!({"access_token": "A1"}))?;

    assert_eq!(token.token_type, "Bearer");
    assert_eq!(token.expires_in, 0);
    assert_eq!(token.refresh_token, None);
    assert!(!format!("{token:?}").contains("A1"));
    Ok(())
}
