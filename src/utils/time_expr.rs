// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::remote_post::parse_remote_date;
use chrono::{DateTime, Duration, Months, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

static RELATIVE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)^([+-]?\d+)\s*(sec|secs|second|seconds|min|mins|minute|minutes|hour|hours|day|days|week|weeks|fortnight|fortnights|month|months|year|years)(\s+ago)?$",
    )
    .expect("valid relative time regex")
});

/// 时间表达式错误
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TimeExprError {
    #[error("Unrecognized time expression: {0}")]
    Unrecognized(String),
    #[error("Time expression out of range: {0}")]
    OutOfRange(String),
}

/// 回溯窗口的起点
///
/// 可以是 Unix 时间戳，也可以是可解析的日期表达式（如 `"-7 days"`、
/// `"yesterday"`、`"2024-01-01"`），在调用远端之前解析为绝对时间。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Since {
    Timestamp(i64),
    Expression(String),
}

impl Since {
    /// 解析为绝对 UTC 时间
    pub fn resolve(&self, now: DateTime<Utc>) -> Result<DateTime<Utc>, TimeExprError> {
        match self {
            Since::Timestamp(ts) => DateTime::from_timestamp(*ts, 0)
                .ok_or_else(|| TimeExprError::OutOfRange(ts.to_string())),
            Since::Expression(expr) => parse_time_expression(expr, now),
        }
    }
}

impl fmt::Display for Since {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Since::Timestamp(ts) => write!(f, "@{}", ts),
            Since::Expression(expr) => write!(f, "{}", expr),
        }
    }
}

impl From<&str> for Since {
    fn from(value: &str) -> Self {
        Since::Expression(value.to_string())
    }
}

/// 解析时间表达式
///
/// 支持 `now`、`today`、`yesterday`、纯数字时间戳、`[+-]N unit`、
/// `N unit ago` 以及远端日期格式。
pub fn parse_time_expression(expr: &str, now: DateTime<Utc>) -> Result<DateTime<Utc>, TimeExprError> {
    let trimmed = expr.trim();
    let lowered = trimmed.to_ascii_lowercase();

    match lowered.as_str() {
        "now" => return Ok(now),
        "today" | "midnight" => return Ok(start_of_day(now)),
        "yesterday" => return Ok(start_of_day(now) - Duration::days(1)),
        "tomorrow" => return Ok(start_of_day(now) + Duration::days(1)),
        _ => {}
    }

    if !trimmed.is_empty() && trimmed.chars().all(|c| c.is_ascii_digit()) {
        let ts: i64 = trimmed
            .parse()
            .map_err(|_| TimeExprError::OutOfRange(trimmed.to_string()))?;
        return Since::Timestamp(ts).resolve(now);
    }

    if let Some(captures) = RELATIVE_REGEX.captures(&lowered) {
        let mut amount: i64 = captures[1]
            .parse()
            .map_err(|_| TimeExprError::OutOfRange(trimmed.to_string()))?;
        if captures.get(3).is_some() {
            amount = -amount;
        }
        return shift(now, amount, &captures[2])
            .ok_or_else(|| TimeExprError::OutOfRange(trimmed.to_string()));
    }

    parse_remote_date(trimmed)
        .map(|d| d.with_timezone(&Utc))
        .ok_or_else(|| TimeExprError::Unrecognized(trimmed.to_string()))
}

fn start_of_day(now: DateTime<Utc>) -> DateTime<Utc> {
    now.date_naive()
        .and_hms_opt(0, 0, 0)
        .map(|naive| naive.and_utc())
        .unwrap_or(now)
}

fn shift(now: DateTime<Utc>, amount: i64, unit: &str) -> Option<DateTime<Utc>> {
    let unit = unit.trim_end_matches('s');
    let fixed = match unit {
        "sec" | "second" => Duration::try_seconds(amount),
        "min" | "minute" => Duration::try_minutes(amount),
        "hour" => Duration::try_hours(amount),
        "day" => Duration::try_days(amount),
        "week" => Duration::try_weeks(amount),
        "fortnight" => Duration::try_weeks(amount.checked_mul(2)?),
        "month" => return shift_months(now, amount),
        "year" => return shift_months(now, amount.checked_mul(12)?),
        _ => None,
    }?;

    now.checked_add_signed(fixed)
}

fn shift_months(now: DateTime<Utc>, amount: i64) -> Option<DateTime<Utc>> {
    let months = Months::new(u32::try_from(amount.unsigned_abs()).ok()?);
    if amount < 0 {
        now.checked_sub_months(months)
    } else {
        now.checked_add_months(months)
    }
}
