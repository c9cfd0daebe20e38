// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

const HOUR_SECS: u64 = 60 * 60;

/// 自定义间隔的上限（52 周）
const MAX_INTERVAL_SECS: u64 = 52 * 7 * 24 * HOUR_SECS;

/// 调度错误类型
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchedulerError {
    /// 无法识别的同步频率
    #[error("Invalid sync frequency: '{0}'")]
    InvalidFrequency(String),
    /// 调度未启用
    #[error("Scheduler is disabled")]
    Disabled,
}

/// 同步频率
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Frequency {
    Hourly,
    TwiceDaily,
    Daily,
    Weekly,
    /// 自定义间隔（秒）
    Every(u64),
}

impl Frequency {
    /// 触发间隔
    pub fn interval(&self) -> Duration {
        match self {
            Frequency::Hourly => Duration::from_secs(HOUR_SECS),
            Frequency::TwiceDaily => Duration::from_secs(12 * HOUR_SECS),
            Frequency::Daily => Duration::from_secs(24 * HOUR_SECS),
            Frequency::Weekly => Duration::from_secs(7 * 24 * HOUR_SECS),
            Frequency::Every(secs) => Duration::from_secs(*secs),
        }
    }
}

impl FromStr for Frequency {
    type Err = SchedulerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "hourly" => Ok(Frequency::Hourly),
            "twicedaily" => Ok(Frequency::TwiceDaily),
            "daily" => Ok(Frequency::Daily),
            "weekly" => Ok(Frequency::Weekly),
            other => match other.parse::<u64>() {
                Ok(secs) if secs > 0 && secs <= MAX_INTERVAL_SECS => Ok(Frequency::Every(secs)),
                _ => Err(SchedulerError::InvalidFrequency(s.to_string())),
            },
        }
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Frequency::Hourly => write!(f, "hourly"),
            Frequency::TwiceDaily => write!(f, "twicedaily"),
            Frequency::Daily => write!(f, "daily"),
            Frequency::Weekly => write!(f, "weekly"),
            Frequency::Every(secs) => write!(f, "{}", secs),
        }
    }
}
