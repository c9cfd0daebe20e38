// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::config::settings::MetricsSettings;
use metrics::{describe_counter, describe_histogram, Unit};
use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;
use tracing::{info, warn};

/// 注册指标说明
pub fn describe_metrics() {
    describe_counter!("crosspost_runs_total", "Number of sync runs");
    describe_counter!("crosspost_posts_created_total", "Number of cross-posts created");
    describe_counter!(
        "crosspost_posts_skipped_total",
        "Number of remote posts skipped because they were already cross-posted"
    );
    describe_counter!(
        "crosspost_fetch_failures_total",
        "Number of failed remote fetches, labelled by kind"
    );
    describe_counter!("crosspost_insert_failures_total", "Number of failed post inserts");
    describe_histogram!(
        "crosspost_sync_duration_seconds",
        Unit::Seconds,
        "Duration of a sync run"
    );
}

/// 初始化 Prometheus 导出器
pub fn init_metrics(settings: &MetricsSettings) {
    if !settings.enabled {
        info!("Metrics exporter disabled");
        return;
    }

    let addr: SocketAddr = match settings.listen_addr.parse() {
        Ok(addr) => addr,
        Err(e) => {
            warn!("Invalid metrics address '{}': {}", settings.listen_addr, e);
            return;
        }
    };

    // Ignore error if address is already in use (for development/testing)
    if let Err(e) = PrometheusBuilder::new().with_http_listener(addr).install() {
        warn!("Failed to install Prometheus recorder: {}. This might happen if the port is already in use.", e);
        return;
    }

    describe_metrics();
    info!("Metrics exporter listening on {}", addr);
}
