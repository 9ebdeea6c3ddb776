//! Accounts visible to the authenticated identity

use serde::{Deserialize, Serialize};

use super::user::User;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub id: i64,
    pub name: String,
    /// `"harvest"` or `"forecast"`
    pub product: Option<String>,
}

/// `GET {id}/api/v1/accounts`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountsResponse {
    pub user: User,
    pub accounts: Vec<Account>,
}

impl AccountsResponse {
    /// Harvest (as opposed to Forecast) accounts only.
    pub fn harvest_accounts(&self) -> impl Iterator<Item = &Account> {
        self.accounts.iter().filter(|a| a.product.as_deref().map_or(true, |p| p == "harvest"))
    }
}
