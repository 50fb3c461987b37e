use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::Mutex;

/// Minimum-interval gate on outbound chat-completion calls.
///
/// Rejects rather than queues: callers get a "try again" message so the
/// MCP client stays responsive.
#[derive(Clone)]
pub struct UpstreamThrottle {
    min_interval: Duration,
    last_call: Arc<Mutex<Option<Instant>>>,
}

impl UpstreamThrottle {
    /// Read `OPENAI_MIN_INTERVAL_MS` from the environment. Absent, zero, or
    /// unparseable means the throttle is disabled.
    pub fn from_env() -> Option<Self> {
        let millis = std::env::var("OPENAI_MIN_INTERVAL_MS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .filter(|&n| n > 0)?;
        Some(Self::new(Duration::from_millis(millis)))
    }

    pub fn new(min_interval: Duration) -> Self {
        Self {
            min_interval,
            last_call: Arc::new(Mutex::new(None)),
        }
    }

    pub async fn check(&self) -> Result<(), String> {
        let mut last_call = self.last_call.lock().await;
        if let Some(last) = *last_call {
            let since = last.elapsed();
            if since < self.min_interval {
                let wait = self.min_interval - since;
                return Err(format!(
                    "upstream throttle active (OPENAI_MIN_INTERVAL_MS={}): try again in ~{}ms",
                    self.min_interval.as_millis(),
                    wait.as_millis()
                ));
            }
        }
        *last_call = Some(Instant::now());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn first_call_passes_immediate_second_rejected() {
        let throttle = UpstreamThrottle::new(Duration::from_secs(60));
        assert!(throttle.check().await.is_ok());
        assert!(throttle.check().await.is_err());
    }

    #[tokio::test]
    async fn calls_pass_after_the_interval() {
        let throttle = UpstreamThrottle::new(Duration::from_millis(10));
        assert!(throttle.check().await.is_ok());
        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(throttle.check().await.is_ok());
    }
}
