// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::scheduler::binding::ScheduledJob;
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{debug, info};

/// 定时同步工作器
///
/// 按固定间隔触发同步任务。错过的触发点顺延，不会补发。
/// 收到停止信号后不再触发，正在执行的同步会完整结束。
pub struct SyncWorker<J>
where
    J: ScheduledJob + 'static,
{
    job: Arc<J>,
    interval: Duration,
    run_immediately: bool,
    next_run: Arc<Mutex<DateTime<Utc>>>,
    shutdown: watch::Receiver<bool>,
}

impl<J> SyncWorker<J>
where
    J: ScheduledJob + 'static,
{
    pub fn new(
        job: Arc<J>,
        interval: Duration,
        run_immediately: bool,
        next_run: Arc<Mutex<DateTime<Utc>>>,
        shutdown: watch::Receiver<bool>,
    ) -> Self {
        Self {
            job,
            interval,
            run_immediately,
            next_run,
            shutdown,
        }
    }

    /// 运行工作器
    pub async fn run(mut self) {
        info!("Cross-post sync worker started, interval {:?}", self.interval);

        let start = if self.run_immediately {
            Instant::now()
        } else {
            Instant::now() + self.interval
        };
        let mut interval = tokio::time::interval_at(start, self.interval);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            if *self.shutdown.borrow() {
                break;
            }

            tokio::select! {
                biased;
                // A dropped sender also stops the worker
                _ = self.shutdown.changed() => break,
                _ = interval.tick() => {}
            }

            *self.next_run.lock() = next_run_after(self.interval);
            debug!("Scheduled sync tick");
            self.job.run().await;
        }

        info!("Cross-post sync worker stopped");
    }

    /// 启动后台运行
    pub fn start(self) -> JoinHandle<()> {
        tokio::spawn(self.run())
    }
}

/// 从现在起经过 `interval` 的时间点
pub(crate) fn next_run_after(interval: Duration) -> DateTime<Utc> {
    chrono::Duration::from_std(interval)
        .ok()
        .and_then(|delta| Utc::now().checked_add_signed(delta))
        .unwrap_or(DateTime::<Utc>::MAX_UTC)
}
