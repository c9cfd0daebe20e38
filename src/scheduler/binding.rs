// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::config::settings::SchedulerSettings;
use crate::domain::services::hooks::SyncHooks;
use crate::scheduler::frequency::{Frequency, SchedulerError};
use crate::workers::sync_worker::{next_run_after, SyncWorker};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{info, warn};

/// 默认定时任务名称
pub const DEFAULT_JOB_NAME: &str = "crossposts_create_posts";

/// 可被定时触发的任务
#[async_trait]
pub trait ScheduledJob: Send + Sync {
    /// 使用默认回溯窗口执行一次
    async fn run(&self);
}

/// 调度状态
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ScheduleState {
    Unscheduled,
    Scheduled {
        job_name: String,
        interval_secs: u64,
        next_run: DateTime<Utc>,
    },
}

struct Registration {
    handle: JoinHandle<()>,
    shutdown: watch::Sender<bool>,
    interval: Duration,
    next_run: Arc<Mutex<DateTime<Utc>>>,
}

impl Registration {
    /// 停止后续触发，正在执行的同步继续完成
    fn stop(self) {
        let _ = self.shutdown.send(true);
    }
}

/// 调度绑定
///
/// 以任务名为键最多注册一个定时触发器。安装和卸载都是幂等的。
pub struct SchedulerBinding<J>
where
    J: ScheduledJob + 'static,
{
    job: Arc<J>,
    job_name: String,
    frequency: String,
    run_on_install: bool,
    enabled: bool,
    hooks: SyncHooks,
    registration: Mutex<Option<Registration>>,
}

impl<J> SchedulerBinding<J>
where
    J: ScheduledJob + 'static,
{
    pub fn new(job: Arc<J>, frequency: impl Into<String>, hooks: SyncHooks) -> Self {
        Self {
            job,
            job_name: DEFAULT_JOB_NAME.to_string(),
            frequency: frequency.into(),
            run_on_install: true,
            enabled: true,
            hooks,
            registration: Mutex::new(None),
        }
    }

    pub fn from_settings(job: Arc<J>, settings: &SchedulerSettings, hooks: SyncHooks) -> Self {
        let mut binding = Self::new(job, settings.frequency.clone(), hooks);
        binding.job_name = settings.job_name.clone();
        binding.run_on_install = settings.run_on_install;
        binding.enabled = settings.enabled;
        binding
    }

    /// 安装后是否立即触发一次
    pub fn with_run_on_install(mut self, run_on_install: bool) -> Self {
        self.run_on_install = run_on_install;
        self
    }

    pub fn job_name(&self) -> &str {
        &self.job_name
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// 安装定时触发器
    ///
    /// # 返回值
    ///
    /// * `Ok(Duration)` - 生效的触发间隔，已安装时返回现有间隔
    /// * `Err(SchedulerError)` - 调度未启用或频率无效
    pub fn install(&self) -> Result<Duration, SchedulerError> {
        if !self.enabled {
            return Err(SchedulerError::Disabled);
        }

        let mut registration = self.registration.lock();
        if let Some(existing) = registration.as_ref() {
            if !existing.handle.is_finished() {
                info!("Job {} is already scheduled", self.job_name);
                return Ok(existing.interval);
            }
        }

        let frequency: Frequency = self.hooks.sync_frequency(self.frequency.clone()).parse()?;
        let interval = frequency.interval();

        let first_run = if self.run_on_install {
            Utc::now()
        } else {
            next_run_after(interval)
        };
        let next_run = Arc::new(Mutex::new(first_run));

        let (shutdown, shutdown_rx) = watch::channel(false);
        let worker = SyncWorker::new(
            self.job.clone(),
            interval,
            self.run_on_install,
            next_run.clone(),
            shutdown_rx,
        );
        let handle = worker.start();

        info!("Scheduled job {} to run {}", self.job_name, frequency);
        *registration = Some(Registration {
            handle,
            shutdown,
            interval,
            next_run,
        });

        Ok(interval)
    }

    /// 卸载定时触发器，返回之前是否已安装
    ///
    /// 只取消后续触发，不会中断正在执行的同步。
    pub fn uninstall(&self) -> bool {
        match self.registration.lock().take() {
            Some(existing) => {
                existing.stop();
                info!("Unscheduled job {}", self.job_name);
                true
            }
            None => false,
        }
    }

    /// 当前调度状态
    pub fn state(&self) -> ScheduleState {
        match self.registration.lock().as_ref() {
            Some(existing) if !existing.handle.is_finished() => ScheduleState::Scheduled {
                job_name: self.job_name.clone(),
                interval_secs: existing.interval.as_secs(),
                next_run: *existing.next_run.lock(),
            },
            _ => ScheduleState::Unscheduled,
        }
    }

    /// 按配置启动调度
    ///
    /// 调度被禁用时只记录警告：文章将不会自动同步。
    pub fn activate(&self) -> Result<Option<Duration>, SchedulerError> {
        if !self.enabled {
            warn!(
                "Scheduler is disabled: posts from the remote site will not be cross-posted until a sync is triggered manually"
            );
            return Ok(None);
        }
        self.install().map(Some)
    }
}

impl<J> Drop for SchedulerBinding<J>
where
    J: ScheduledJob + 'static,
{
    fn drop(&mut self) {
        if let Some(existing) = self.registration.get_mut().take() {
            existing.stop();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct CountingJob {
        runs: AtomicUsize,
    }

    #[async_trait]
    impl ScheduledJob for CountingJob {
        async fn run(&self) {
            self.runs.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn runs(job: &CountingJob) -> usize {
        job.runs.load(Ordering::SeqCst)
    }

    async fn advance(duration: Duration) {
        tokio::time::sleep(duration).await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_install_runs_immediately_and_on_interval() {
        let job = Arc::new(CountingJob::default());
        let binding = SchedulerBinding::new(job.clone(), "60", SyncHooks::default());

        assert_eq!(binding.install().unwrap(), Duration::from_secs(60));
        advance(Duration::from_millis(1)).await;
        assert_eq!(runs(&job), 1);

        advance(Duration::from_secs(60)).await;
        assert_eq!(runs(&job), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_install_without_immediate_run() {
        let job = Arc::new(CountingJob::default());
        let binding =
            SchedulerBinding::new(job.clone(), "60", SyncHooks::default()).with_run_on_install(false);

        binding.install().unwrap();
        advance(Duration::from_millis(1)).await;
        assert_eq!(runs(&job), 0);

        advance(Duration::from_secs(60)).await;
        assert_eq!(runs(&job), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_install_twice_is_a_no_op() {
        let job = Arc::new(CountingJob::default());
        let binding = SchedulerBinding::new(job.clone(), "hourly", SyncHooks::default());

        let first = binding.install().unwrap();
        let second = binding.install().unwrap();
        advance(Duration::from_millis(1)).await;

        assert_eq!(first, second);
        assert_eq!(runs(&job), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_uninstall_stops_ticks_and_is_idempotent() {
        let job = Arc::new(CountingJob::default());
        let binding = SchedulerBinding::new(job.clone(), "60", SyncHooks::default());

        binding.install().unwrap();
        advance(Duration::from_millis(1)).await;

        assert!(binding.uninstall());
        assert!(!binding.uninstall());
        assert_eq!(binding.state(), ScheduleState::Unscheduled);

        advance(Duration::from_secs(600)).await;
        assert_eq!(runs(&job), 1);
    }

    #[tokio::test]
    async fn test_state_reports_interval() {
        let job = Arc::new(CountingJob::default());
        let binding = SchedulerBinding::new(job, "daily", SyncHooks::default()).with_run_on_install(false);

        assert_eq!(binding.state(), ScheduleState::Unscheduled);
        binding.install().unwrap();

        match binding.state() {
            ScheduleState::Scheduled {
                job_name,
                interval_secs,
                next_run,
            } => {
                assert_eq!(job_name, DEFAULT_JOB_NAME);
                assert_eq!(interval_secs, 86_400);
                assert!(next_run > Utc::now());
            }
            other => panic!("unexpected state {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_invalid_frequency_fails_install() {
        let binding = SchedulerBinding::new(Arc::new(CountingJob::default()), "monthly", SyncHooks::default());

        assert_eq!(
            binding.install(),
            Err(SchedulerError::InvalidFrequency("monthly".to_string()))
        );
        assert_eq!(binding.state(), ScheduleState::Unscheduled);
    }

    #[tokio::test]
    async fn test_frequency_hook_overrides_setting() {
        let hooks = SyncHooks::new().with_sync_frequency(|_| "hourly".to_string());
        let binding = SchedulerBinding::new(Arc::new(CountingJob::default()), "daily", hooks)
            .with_run_on_install(false);

        assert_eq!(binding.install().unwrap(), Duration::from_secs(3600));
    }

    #[tokio::test]
    async fn test_disabled_scheduler_stays_unscheduled() {
        let settings = SchedulerSettings {
            enabled: false,
            job_name: DEFAULT_JOB_NAME.to_string(),
            frequency: "daily".to_string(),
            run_on_install: true,
        };
        let binding =
            SchedulerBinding::from_settings(Arc::new(CountingJob::default()), &settings, SyncHooks::default());

        assert_eq!(binding.activate(), Ok(None));
        assert_eq!(binding.install(), Err(SchedulerError::Disabled));
        assert_eq!(binding.state(), ScheduleState::Unscheduled);
    }
}
