//! Scope string parsing
//!
//! Harvest grants scopes of the form `harvest:<account id>` (plus
//! `forecast:<id>` for the sister product), separated by whitespace.

use harvest_domain::constants::HARVEST_SCOPE_PREFIX;

/// Raw suffixes of the `harvest:` tokens, in scope order.
pub fn harvest_scopes(scope: &str) -> Vec<&str> {
    scope.split_whitespace().filter_map(|token| token.strip_prefix(HARVEST_SCOPE_PREFIX)).collect()
}

/// The default account id: set only when the scope holds exactly one
/// `harvest:` token and its suffix is numeric.
pub fn default_account_id(scope: Option<&str>) -> Option<i64> {
    match harvest_scopes(scope?).as_slice() {
        [single] => single.parse().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_harvest_scope_sets_default() {
        assert_eq!(default_account_id(Some("harvest:1176282")), Some(1176282));
    }

    #[test]
    fn test_forecast_tokens_are_ignored() {
        assert_eq!(default_account_id(Some("forecast:99 harvest:42")), Some(42));
    }

    #[test]
    fn test_multiple_or_empty_scopes_leave_default_unset() {
        assert_eq!(default_account_id(Some("harvest:1 harvest:2")), None);
        assert_eq!(default_account_id(Some("")), None);
        assert_eq!(default_account_id(None), None);
    }

    #[test]
    fn test_non_numeric_tokens_still_count() {
        assert_eq!(harvest_scopes("harvest:all forecast:3 harvest:7"), vec!["all", "7"]);
        assert_eq!(default_account_id(Some("harvest:all harvest:7")), None);
        assert_eq!(default_account_id(Some("harvest:abc")), None);
    }
}
