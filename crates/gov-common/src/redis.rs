/// Redis wrapper with graceful degradation.
///
/// Every operation is best-effort: on any Redis error it logs a warning and
/// returns `None`/`false`, and callers fall through to compute from source.
/// The server is fully functional without Redis.
use redis::aio::MultiplexedConnection;
use redis::AsyncCommands;
use tracing::warn;

pub struct RedisCache {
    client: Option<redis::Client>,
}

impl RedisCache {
    /// Build a cache handle. A `None` URL or an invalid URL yields a handle
    /// whose operations all no-op.
    pub fn new(url: Option<&str>) -> Self {
        let client = url.and_then(|u| {
            redis::Client::open(u)
                .inspect_err(
                    |e| warn!(error = %e, url = u, "failed to create redis client, cache disabled"),
                )
                .ok()
        });
        Self { client }
    }

    /// PING the server. `true` means Redis is reachable right now.
    pub async fn is_available(&self) -> bool {
        let Some(mut conn) = self.connect().await else {
            return false;
        };
        let result: Result<String, _> = redis::cmd("PING").query_async(&mut conn).await;
        result.is_ok()
    }

    async fn connect(&self) -> Option<MultiplexedConnection> {
        let client = self.client.as_ref()?;
        client
            .get_multiplexed_async_connection()
            .await
            .inspect_err(|e| warn!(error = %e, "redis connection failed"))
            .ok()
    }

    pub async fn get(&self, key: &str) -> Option<String> {
        let mut conn = self.connect().await?;
        let value: Option<String> = conn
            .get(key)
            .await
            .inspect_err(|e| warn!(error = %e, key, "redis GET failed"))
            .ok()?;
        value
    }

    pub async fn set_with_ttl(&self, key: &str, value: &str, ttl_secs: u64) -> bool {
        let Some(mut conn) = self.connect().await else {
            return false;
        };
        conn.set_ex::<_, _, ()>(key, value, ttl_secs)
            .await
            .inspect_err(|e| warn!(error = %e, key, "redis SETEX failed"))
            .is_ok()
    }

    /// HINCRBY on a hash field. Used for monotonic counters.
    pub async fn hincr_by(&self, key: &str, field: &str, delta: i64) -> bool {
        let Some(mut conn) = self.connect().await else {
            return false;
        };
        conn.hincr::<_, _, _, i64>(key, field, delta)
            .await
            .inspect_err(|e| warn!(error = %e, key, field, "redis HINCRBY failed"))
            .is_ok()
    }

    /// HGETALL on a hash. Returns `None` when Redis is unavailable or the
    /// command fails; an existing-but-empty hash yields an empty vec.
    pub async fn hgetall(&self, key: &str) -> Option<Vec<(String, String)>> {
        let mut conn = self.connect().await?;
        conn.hgetall::<_, Vec<(String, String)>>(key)
            .await
            .inspect_err(|e| warn!(error = %e, key, "redis HGETALL failed"))
            .ok()
    }
}
