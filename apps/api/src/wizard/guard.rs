//! Per-session completion lease.
//!
//! Two concurrent `complete` calls for the same session must not both run the
//! pipeline. The database unique constraint on `diagnosis_results.session_id`
//! is the last line; the lease keeps the second caller from doing the work at all.

use std::collections::HashSet;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::debug;
use uuid::Uuid;

use crate::errors::AppError;

const KEY_PREFIX: &str = "bizzer:wizard:complete";

/// Deletes the key only if it still holds our token.
const RELEASE_SCRIPT: &str = r#"
if redis.call("GET", KEYS[1]) == ARGV[1] then
    return redis.call("DEL", KEYS[1])
else
    return 0
end
"#;

/// Proof of holding the completion lock for one session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionLease {
    pub session_id: Uuid,
    pub key: String,
    pub token: String,
}

impl CompletionLease {
    fn new(session_id: Uuid) -> Self {
        Self {
            session_id,
            key: format!("{KEY_PREFIX}:{session_id}"),
            token: Uuid::new_v4().to_string(),
        }
    }
}

#[async_trait]
pub trait CompletionGuard: Send + Sync {
    /// Returns `None` when another caller holds the lease.
    async fn acquire(&self, session_id: Uuid) -> Result<Option<CompletionLease>, AppError>;

    async fn release(&self, lease: CompletionLease) -> Result<(), AppError>;
}

// ────────────────────────────────────────────────────────────────────────────
// Redis
// ────────────────────────────────────────────────────────────────────────────

/// Cross-process lease: `SET key token NX PX ttl`, released by compare-and-delete.
/// The TTL bounds how long a crashed holder can block a session.
pub struct RedisCompletionGuard {
    client: redis::Client,
    ttl: Duration,
}

impl RedisCompletionGuard {
    pub fn new(url: &str, ttl: Duration) -> Result<Self, AppError> {
        Ok(Self {
            client: redis::Client::open(url)?,
            ttl,
        })
    }
}

#[async_trait]
impl CompletionGuard for RedisCompletionGuard {
    async fn acquire(&self, session_id: Uuid) -> Result<Option<CompletionLease>, AppError> {
        let lease = CompletionLease::new(session_id);
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        let reply: Option<String> = redis::cmd("SET")
            .arg(&lease.key)
            .arg(&lease.token)
            .arg("NX")
            .arg("PX")
            .arg(self.ttl.as_millis() as u64)
            .query_async(&mut conn)
            .await?;

        if reply.is_some() {
            debug!("Acquired completion lease {}", lease.key);
            Ok(Some(lease))
        } else {
            Ok(None)
        }
    }

    async fn release(&self, lease: CompletionLease) -> Result<(), AppError> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        let deleted: i32 = redis::Script::new(RELEASE_SCRIPT)
            .key(&lease.key)
            .arg(&lease.token)
            .invoke_async(&mut conn)
            .await?;
        if deleted == 0 {
            debug!("Completion lease {} expired before release", lease.key);
        }
        Ok(())
    }
}

// ────────────────────────────────────────────────────────────────────────────
// In-process
// ────────────────────────────────────────────────────────────────────────────

/// Single-instance fallback when no Redis is configured.
#[derive(Default)]
pub struct InProcessCompletionGuard {
    held: Mutex<HashSet<Uuid>>,
}

#[async_trait]
impl CompletionGuard for InProcessCompletionGuard {
    async fn acquire(&self, session_id: Uuid) -> Result<Option<CompletionLease>, AppError> {
        let mut held = self.held.lock().await;
        if held.insert(session_id) {
            Ok(Some(CompletionLease::new(session_id)))
        } else {
            Ok(None)
        }
    }

    async fn release(&self, lease: CompletionLease) -> Result<(), AppError> {
        self.held.lock().await.remove(&lease.session_id);
        Ok(())
    }
}
