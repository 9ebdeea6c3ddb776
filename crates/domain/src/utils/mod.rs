//! Serde helpers for Harvest wire formats

pub mod time_of_day;
