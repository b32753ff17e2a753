use crate::error::invalid_input;
use anyhow::Result;
use cadastro_core::CustomerId;
use chrono::{Local, LocalResult, TimeZone, Utc};
use std::str::FromStr;

pub fn now_utc() -> i64 {
    Utc::now().timestamp()
}

pub fn parse_customer_id(value: &str) -> Result<CustomerId> {
    CustomerId::from_str(value.trim())
        .map_err(|_| invalid_input(format!("invalid customer id: {}", value)))
}

pub fn format_timestamp(timestamp: i64) -> String {
    match Utc.timestamp_opt(timestamp, 0) {
        LocalResult::Single(datetime) => datetime
            .with_timezone(&Local)
            .format("%Y-%m-%d %H:%M")
            .to_string(),
        _ => timestamp.to_string(),
    }
}
