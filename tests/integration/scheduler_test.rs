// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::helpers::{create_test_app, mount_posts, remote_post};
use crosspost::domain::repositories::content_store::ContentStore;
use crosspost::scheduler::binding::ScheduleState;
use std::time::Duration;

#[tokio::test]
async fn test_scheduled_job_runs_a_sync() {
    let app = create_test_app().await;
    mount_posts(&app.server, vec![remote_post("Hello", "2024-01-10T09:30:00+00:00")]).await;

    let binding = crosspost::scheduler::binding::SchedulerBinding::new(
        app.use_case.clone(),
        "hourly",
        Default::default(),
    );
    assert_eq!(binding.install().unwrap(), Duration::from_secs(3600));

    let mut created = 0;
    for _ in 0..50 {
        created = app.store.list_cross_post_links(10).await.unwrap().len();
        if created > 0 {
            break;
        }
        tokio::time::sleep(Duration::from_millis(50)).await;
    }

    assert_eq!(created, 1);
    assert!(matches!(binding.state(), ScheduleState::Scheduled { .. }));
    assert!(binding.uninstall());
}

#[tokio::test]
async fn test_configured_binding_installs_without_running() {
    let app = create_test_app().await;

    assert_eq!(app.binding.install().unwrap(), Duration::from_secs(3600));
    tokio::time::sleep(Duration::from_millis(50)).await;

    assert!(app.store.list_cross_post_links(10).await.unwrap().is_empty());
    match app.binding.state() {
        ScheduleState::Scheduled {
            job_name,
            interval_secs,
            ..
        } => {
            assert_eq!(job_name, "crossposts_create_posts");
            assert_eq!(interval_secs, 3600);
        }
        other => panic!("unexpected state {:?}", other),
    }
}
