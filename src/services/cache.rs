use crate::models::FindMatchesResponse;
use moka::future::Cache;
use redis::aio::ConnectionManager;
use redis::AsyncCommands;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CacheError {
    #[error("Redis error: {0}")]
    Redis(#[from] redis::RedisError),

    #[error("Cached ranking could not be encoded: {0}")]
    Encoding(#[from] serde_json::Error),
}

/// Which cached rankings a profile change makes stale
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RankingScope {
    /// Every ranking computed for one mentee
    Mentee(i64),
    /// Every ranking; mentors appear in all of them
    All,
}

impl RankingScope {
    fn key_prefix(&self) -> String {
        match self {
            RankingScope::Mentee(mentee_id) => format!("{}:{}:", KEY_NAMESPACE, mentee_id),
            RankingScope::All => format!("{}:", KEY_NAMESPACE),
        }
    }

    /// Counter bumped whenever rankings in this scope go stale
    fn generation_key(&self) -> String {
        match self {
            RankingScope::Mentee(mentee_id) => format!("{}:{}", GENERATION_NAMESPACE, mentee_id),
            RankingScope::All => format!("{}:all", GENERATION_NAMESPACE),
        }
    }
}

const KEY_NAMESPACE: &str = "matches";
// Kept outside KEY_NAMESPACE so prefix invalidation never resets a counter
const GENERATION_NAMESPACE: &str = "matches_gen";

/// Invalidation counters observed before a ranking was computed.
///
/// Both counters are part of the cache key, so a ranking computed before an
/// invalidation is stored under a key no later reader will ask for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RankingGeneration {
    global: u64,
    mentee: u64,
}

impl RankingGeneration {
    fn key(&self, mentee_id: i64, limit: usize) -> String {
        format!(
            "{}:{}:{}.{}:{}",
            KEY_NAMESPACE, mentee_id, self.global, self.mentee, limit
        )
    }
}

/// Two-tier cache of ranked mentor lists keyed by (mentee, generation, limit).
///
/// L1 is an in-process moka cache; L2 is Redis, shared by every instance.
/// Entries in both tiers expire after the configured TTL.
pub struct RankingCache {
    redis: ConnectionManager,
    local: Cache<String, FindMatchesResponse>,
    ttl_secs: u64,
}

impl RankingCache {
    pub async fn connect(redis_url: &str, l1_size: u64, ttl_secs: u64) -> Result<Self, CacheError> {
        let redis = ConnectionManager::new(redis::Client::open(redis_url)?).await?;

        let local = Cache::builder()
            .max_capacity(l1_size)
            .time_to_live(Duration::from_secs(ttl_secs))
            .support_invalidation_closures()
            .build();

        Ok(Self {
            redis,
            local,
            ttl_secs,
        })
    }

    /// Current generation for `mentee_id`; read this before loading candidates
    pub async fn generation(&self, mentee_id: i64) -> Result<RankingGeneration, CacheError> {
        let mut conn = self.redis.clone();
        let global: Option<u64> = conn.get(RankingScope::All.generation_key()).await?;
        let mentee: Option<u64> = conn.get(RankingScope::Mentee(mentee_id).generation_key()).await?;

        Ok(RankingGeneration {
            global: global.unwrap_or_default(),
            mentee: mentee.unwrap_or_default(),
        })
    }

    pub async fn get(
        &self,
        mentee_id: i64,
        generation: RankingGeneration,
        limit: usize,
    ) -> Result<Option<FindMatchesResponse>, CacheError> {
        let key = generation.key(mentee_id, limit);

        if let Some(ranking) = self.local.get(&key).await {
            tracing::trace!("L1 hit: {}", key);
            return Ok(Some(ranking));
        }

        let mut conn = self.redis.clone();
        let stored: Option<String> = conn.get(&key).await?;

        let Some(json) = stored else {
            tracing::trace!("Miss: {}", key);
            return Ok(None);
        };

        tracing::trace!("L2 hit: {}", key);
        let ranking: FindMatchesResponse = serde_json::from_str(&json)?;
        self.local.insert(key, ranking.clone()).await;

        Ok(Some(ranking))
    }

    pub async fn put(
        &self,
        mentee_id: i64,
        generation: RankingGeneration,
        limit: usize,
        ranking: &FindMatchesResponse,
    ) -> Result<(), CacheError> {
        let key = generation.key(mentee_id, limit);
        let json = serde_json::to_string(ranking)?;

        let mut conn = self.redis.clone();
        conn.set_ex::<_, _, ()>(&key, json, self.ttl_secs).await?;
        self.local.insert(key, ranking.clone()).await;

        Ok(())
    }

    /// Retire every ranking in `scope`.
    ///
    /// Redis is updated first; L1 is cleared even when Redis fails, and the
    /// Redis error is returned afterwards.
    pub async fn invalidate(&self, scope: RankingScope) -> Result<usize, CacheError> {
        let removed = self.invalidate_shared(scope).await;

        let prefix = scope.key_prefix();
        if self
            .local
            .invalidate_entries_if(move |key, _| key.starts_with(&prefix))
            .is_err()
        {
            self.local.invalidate_all();
        }

        removed
    }

    async fn invalidate_shared(&self, scope: RankingScope) -> Result<usize, CacheError> {
        let mut conn = self.redis.clone();
        let generation: u64 = conn.incr(scope.generation_key(), 1u64).await?;

        let prefix = scope.key_prefix();
        let keys: Vec<String> = conn.keys(format!("{}*", prefix)).await?;
        if !keys.is_empty() {
            conn.del::<_, ()>(&keys).await?;
        }

        tracing::debug!(
            "Invalidated {} cached rankings under {}* (generation {})",
            keys.len(),
            prefix,
            generation
        );
        Ok(keys.len())
    }
}
