//! Minimum-interval call gates for the logo API.
//!
//! `acquire()` returns once the caller may issue the next request. Consecutive
//! grants are at least `min_interval` apart.

use std::num::NonZeroU32;
use std::time::Duration;

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use governor::{
    clock::QuantaClock,
    state::{InMemoryState, NotKeyed},
    Quota, RateLimiter,
};
use redis::aio::MultiplexedConnection;
use tracing::debug;

#[async_trait]
pub trait CallGate: Send + Sync {
    async fn acquire(&self) -> Result<()>;
}

type DirectRateLimiter = RateLimiter<NotKeyed, InMemoryState, QuantaClock>;

/// In-process gate: a governor limiter allowing one call per `min_interval`
/// with no burst.
pub struct LocalGate {
    limiter: DirectRateLimiter,
}

impl LocalGate {
    pub fn new(min_interval: Duration) -> Result<Self> {
        Ok(Self {
            limiter: RateLimiter::direct(single_call_quota(min_interval)?),
        })
    }
}

#[async_trait]
impl CallGate for LocalGate {
    async fn acquire(&self) -> Result<()> {
        if self.limiter.check().is_err() {
            debug!("Logo API rate limit hit. Waiting for the next slot...");
            self.limiter.until_ready().await;
        }
        Ok(())
    }
}

fn single_call_quota(min_interval: Duration) -> Result<Quota> {
    let period = min_interval.max(Duration::from_millis(1));
    let quota = Quota::with_period(period)
        .ok_or_else(|| anyhow!("Invalid logo API interval: {}ms", period.as_millis()))?;
    Ok(quota.allow_burst(NonZeroU32::MIN))
}

/// Gate shared by every instance pointed at the same Redis. A call slot is a key
/// that lives for `min_interval`; whoever sets it first owns the slot.
pub struct RedisGate {
    client: redis::Client,
    key: String,
    min_interval: Duration,
}

impl RedisGate {
    pub fn new(client: redis::Client, key: impl Into<String>, min_interval: Duration) -> Self {
        Self {
            client,
            key: key.into(),
            min_interval,
        }
    }

    async fn try_claim(&self, conn: &mut MultiplexedConnection) -> Result<bool> {
        let claimed: Option<String> = redis::cmd("SET")
            .arg(&self.key)
            .arg(1)
            .arg("NX")
            .arg("PX")
            .arg(interval_millis(self.min_interval))
            .query_async(conn)
            .await?;
        Ok(claimed.is_some())
    }

    async fn remaining(&self, conn: &mut MultiplexedConnection) -> Result<Duration> {
        let ttl_ms: i64 = redis::cmd("PTTL").arg(&self.key).query_async(conn).await?;
        Ok(pttl_to_wait(ttl_ms))
    }
}

#[async_trait]
impl CallGate for RedisGate {
    async fn acquire(&self) -> Result<()> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;

        while !self.try_claim(&mut conn).await? {
            let wait = self.remaining(&mut conn).await?;
            debug!(
                "Logo API slot held elsewhere. Waiting {}ms...",
                wait.as_millis()
            );
            tokio::time::sleep(wait).await;
        }

        Ok(())
    }
}

fn interval_millis(interval: Duration) -> u64 {
    u64::try_from(interval.as_millis()).unwrap_or(u64::MAX).max(1)
}

/// PTTL answers -2 (no key) or -1 (no expiry) as well as a positive TTL.
/// Negative answers retry quickly; the next SET settles it.
fn pttl_to_wait(ttl_ms: i64) -> Duration {
    match u64::try_from(ttl_ms) {
        Ok(ms) if ms > 0 => Duration::from_millis(ms),
        _ => Duration::from_millis(10),
    }
}
