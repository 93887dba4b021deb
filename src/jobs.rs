use std::time::Duration;

use reqwest::Client;
use tokio::{
    task::JoinHandle,
    time::{Instant, MissedTickBehavior, interval_at},
};

/// Periodic GET against the service's own health endpoint. Keeps hosted
/// instances that idle out on inactivity awake.
#[derive(Debug, Clone)]
pub struct KeepAliveJob {
    client: Client,
    url: String,
    every: Duration,
}

impl KeepAliveJob {
    pub fn new(api_url: &str, every: Duration) -> Self {
        Self {
            client: Client::new(),
            url: health_url(api_url),
            every,
        }
    }

    /// Spawns the loop. The first ping happens one period after start.
    pub fn start(self) -> JoinHandle<()> {
        tokio::spawn(async move {
            let mut ticker = interval_at(Instant::now() + self.every, self.every);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            tracing::info!(
                url = %self.url,
                every_secs = self.every.as_secs(),
                "keep-alive job started"
            );

            loop {
                ticker.tick().await;
                self.ping().await;
            }
        })
    }

    async fn ping(&self) {
        match self.client.get(&self.url).send().await {
            Ok(resp) if resp.status().is_success() => {
                tracing::debug!(status = %resp.status(), "keep-alive ping ok");
            }
            Ok(resp) => {
                tracing::warn!(status = %resp.status(), "keep-alive ping returned non-success");
            }
            Err(err) => {
                tracing::warn!(error = %err, "keep-alive ping failed");
            }
        }
    }
}

fn health_url(api_url: &str) -> String {
    let base = api_url.trim_end_matches('/');
    if base.ends_with("/api/health") {
        base.to_string()
    } else if base.ends_with("/api") {
        format!("{base}/health")
    } else {
        format!("{base}/api/health")
    }
}
