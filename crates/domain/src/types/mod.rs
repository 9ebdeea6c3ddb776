//! Harvest wire records
//!
//! Field names match the API's snake_case keys. Fields the server may omit
//! or null out are `Option`s; unknown fields are ignored.

pub mod account;
pub mod assignment;
pub mod client;
pub mod common;
pub mod paging;
pub mod project;
pub mod task;
pub mod time_entry;
pub mod token;
pub mod user;

pub use account::{Account, AccountsResponse};
pub use assignment::{ProjectAssignment, ProjectAssignmentsResponse, TaskAssignment};
pub use client::{Client, ClientsResponse};
pub use common::{ExternalReference, IdName, IdNumber, ProjectReference};
pub use paging::{PageLinks, Pagination};
pub use project::{Project, ProjectsResponse};
pub use task::{Task, TasksResponse};
pub use time_entry::{TimeEntriesResponse, TimeEntry};
pub use token::TokenResponse;
pub use user::{User, UserDetails, UsersResponse};
