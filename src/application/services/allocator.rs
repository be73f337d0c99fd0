//! Short code allocation.
//!
//! The allocator holds no mappings of its own: every decision is taken
//! against the [`MappingStore`], whose unique indexes are the only collision
//! signal. There is no in-process lock; concurrent callers are reconciled by
//! the store rejecting the losing insert.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::domain::errors::{AllocationError, StoreError, UniqueField};
use crate::domain::repositories::MappingStore;
use crate::utils::code_generator::{DEFAULT_CODE_LENGTH, generate_code, is_reserved};

/// Default bound on insert attempts per allocation.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 10;

/// Tuning knobs for code allocation.
///
/// At 62^6 possible codes a collision is rare until the namespace is heavily
/// populated, so a handful of attempts is enough; the bound makes a full
/// namespace fail fast instead of looping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AllocatorConfig {
    pub code_length: usize,
    pub max_attempts: u32,
}

impl Default for AllocatorConfig {
    fn default() -> Self {
        Self {
            code_length: DEFAULT_CODE_LENGTH,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }
}

/// Draws a candidate code of the requested length.
type CodeSource = Box<dyn Fn(usize) -> String + Send + Sync>;

/// Resolves URLs to short codes, creating mappings on first submission.
pub struct Allocator<S: MappingStore + ?Sized> {
    store: Arc<S>,
    config: AllocatorConfig,
    draw: CodeSource,
}

impl<S: MappingStore + ?Sized> Allocator<S> {
    /// Creates a new allocator over the given store.
    pub fn new(store: Arc<S>, config: AllocatorConfig) -> Self {
        Self {
            store,
            config,
            draw: Box::new(generate_code),
        }
    }

    /// Replaces the random code source with a scripted one.
    #[cfg(test)]
    fn with_code_source(
        mut self,
        draw: impl Fn(usize) -> String + Send + Sync + 'static,
    ) -> Self {
        self.draw = Box::new(draw);
        self
    }

    /// Returns the allocation settings this allocator was built with.
    pub fn config(&self) -> AllocatorConfig {
        self.config
    }

    /// Returns the underlying store.
    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    /// Returns the code for `long_url`, allocating one if the URL is new.
    ///
    /// Uses the configured code length and attempt bound. See
    /// [`Self::resolve_or_create_with`].
    pub async fn resolve_or_create(&self, long_url: &str) -> Result<String, AllocationError> {
        self.resolve_or_create_with(long_url, self.config.code_length, self.config.max_attempts)
            .await
    }

    /// Returns the code for `long_url`, allocating one if the URL is new.
    ///
    /// Re-submitting the same URL always yields the same code. For a new URL,
    /// random candidates are inserted until one is accepted:
    ///
    /// - a violation on `short_code` discards the candidate and draws again
    /// - a reserved candidate (see [`is_reserved`]) is discarded the same way
    /// - a violation on `long_url` means a concurrent caller mapped the URL
    ///   first; the winner's code is read back and returned
    ///
    /// `long_url` is expected to be normalized already.
    ///
    /// # Errors
    ///
    /// Returns [`AllocationError::Exhausted`] once `max_attempts` candidates
    /// have been rejected, or immediately when `code_length` is zero.
    /// Returns [`AllocationError::StorageUnavailable`] as soon as the store
    /// fails for any other reason.
    pub async fn resolve_or_create_with(
        &self,
        long_url: &str,
        code_length: usize,
        max_attempts: u32,
    ) -> Result<String, AllocationError> {
        if let Some(existing) = self.store.find_by_url(long_url).await? {
            debug!(code = %existing.short_code, "URL already shortened");
            metrics::counter!("shortener_allocations_total", "outcome" => "existing").increment(1);
            return Ok(existing.short_code);
        }

        if code_length == 0 {
            warn!("refusing to allocate empty short codes");
            return Err(AllocationError::Exhausted { attempts: 0 });
        }

        for attempt in 1..=max_attempts {
            let candidate = (self.draw)(code_length);
            if is_reserved(&candidate) {
                debug!(attempt, "drew a reserved code, drawing a new candidate");
                metrics::counter!("shortener_code_collisions_total").increment(1);
                continue;
            }

            match self.store.insert(long_url, &candidate).await {
                Ok(mapping) => {
                    debug!(code = %mapping.short_code, attempt, "allocated short code");
                    metrics::counter!("shortener_allocations_total", "outcome" => "created")
                        .increment(1);
                    return Ok(mapping.short_code);
                }
                Err(StoreError::UniquenessViolation(UniqueField::ShortCode)) => {
                    debug!(attempt, "short code collision, drawing a new candidate");
                    metrics::counter!("shortener_code_collisions_total").increment(1);
                }
                Err(StoreError::UniquenessViolation(UniqueField::LongUrl)) => {
                    if let Some(winner) = self.store.find_by_url(long_url).await? {
                        debug!(code = %winner.short_code, "URL mapped by a concurrent request");
                        metrics::counter!("shortener_allocations_total", "outcome" => "reconciled")
                            .increment(1);
                        return Ok(winner.short_code);
                    }
                    warn!(attempt, "URL reported as taken but no mapping was found");
                }
                Err(err @ StoreError::Unavailable(_)) => return Err(err.into()),
            }
        }

        warn!(max_attempts, code_length, "short code allocation exhausted");
        metrics::counter!("shortener_allocations_total", "outcome" => "exhausted").increment(1);

        Err(AllocationError::Exhausted {
            attempts: max_attempts,
        })
    }

    /// Returns the long URL stored for `short_code`.
    ///
    /// # Errors
    ///
    /// Returns [`AllocationError::NotFound`] if no mapping exists.
    /// Returns [`AllocationError::StorageUnavailable`] on store failures.
    pub async fn lookup(&self, short_code: &str) -> Result<String, AllocationError> {
        self.store
            .find_by_code(short_code)
            .await?
            .map(|mapping| mapping.long_url)
            .ok_or_else(|| AllocationError::NotFound {
                code: short_code.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::UrlMapping;
    use crate::domain::repositories::MockMappingStore;
    use chrono::Utc;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    const URL: &str = "https://example.com/page";

    fn mapping(code: &str, url: &str) -> UrlMapping {
        UrlMapping::new(1, url.to_string(), code.to_string(), Utc::now())
    }

    fn allocator(store: MockMappingStore) -> Allocator<MockMappingStore> {
        Allocator::new(Arc::new(store), AllocatorConfig::default())
    }

    #[tokio::test]
    async fn test_existing_url_returns_stored_code() {
        let mut store = MockMappingStore::new();
        store
            .expect_find_by_url()
            .withf(|url| url == URL)
            .times(1)
            .returning(|url| Ok(Some(mapping("aB3xY9", url))));
        store.expect_insert().times(0);

        let code = allocator(store).resolve_or_create(URL).await.unwrap();

        assert_eq!(code, "aB3xY9");
    }

    #[tokio::test]
    async fn test_new_url_inserts_generated_code() {
        let mut store = MockMappingStore::new();
        store.expect_find_by_url().times(1).returning(|_| Ok(None));
        store
            .expect_insert()
            .withf(|url, code| {
                url == URL && code.len() == 6 && code.chars().all(|c| c.is_ascii_alphanumeric())
            })
            .times(1)
            .returning(|url, code| Ok(mapping(code, url)));

        let code = allocator(store).resolve_or_create(URL).await.unwrap();

        assert_eq!(code.len(), 6);
        assert!(code.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[tokio::test]
    async fn test_code_collision_retries_with_fresh_candidate() {
        let attempts = Arc::new(AtomicUsize::new(0));
        let candidates = Arc::new(Mutex::new(Vec::new()));

        let mut store = MockMappingStore::new();
        store.expect_find_by_url().times(1).returning(|_| Ok(None));
        {
            let attempts = attempts.clone();
            let candidates = candidates.clone();
            store.expect_insert().times(3).returning(move |url, code| {
                candidates.lock().unwrap().push(code.to_string());
                if attempts.fetch_add(1, Ordering::SeqCst) < 2 {
                    Err(StoreError::UniquenessViolation(UniqueField::ShortCode))
                } else {
                    Ok(mapping(code, url))
                }
            });
        }

        let code = allocator(store).resolve_or_create(URL).await.unwrap();

        let candidates = candidates.lock().unwrap();
        assert_eq!(candidates.len(), 3);
        assert_eq!(&code, candidates.last().unwrap());
    }

    #[tokio::test]
    async fn test_url_race_returns_winner_code() {
        let lookups = Arc::new(AtomicUsize::new(0));

        let mut store = MockMappingStore::new();
        {
            let lookups = lookups.clone();
            store.expect_find_by_url().times(2).returning(move |url| {
                if lookups.fetch_add(1, Ordering::SeqCst) == 0 {
                    Ok(None)
                } else {
                    Ok(Some(mapping("Winner", url)))
                }
            });
        }
        store
            .expect_insert()
            .times(1)
            .returning(|_, _| Err(StoreError::UniquenessViolation(UniqueField::LongUrl)));

        let code = allocator(store).resolve_or_create(URL).await.unwrap();

        assert_eq!(code, "Winner");
    }

    #[tokio::test]
    async fn test_exhausts_after_exactly_max_attempts() {
        let mut store = MockMappingStore::new();
        store.expect_find_by_url().times(1).returning(|_| Ok(None));
        store
            .expect_insert()
            .times(10)
            .returning(|_, _| Err(StoreError::UniquenessViolation(UniqueField::ShortCode)));

        let result = allocator(store).resolve_or_create(URL).await;

        assert_eq!(result, Err(AllocationError::Exhausted { attempts: 10 }));
    }

    #[tokio::test]
    async fn test_custom_attempt_bound_and_length() {
        let mut store = MockMappingStore::new();
        store.expect_find_by_url().times(1).returning(|_| Ok(None));
        store
            .expect_insert()
            .withf(|_, code| code.len() == 8)
            .times(3)
            .returning(|_, _| Err(StoreError::UniquenessViolation(UniqueField::ShortCode)));

        let result = allocator(store).resolve_or_create_with(URL, 8, 3).await;

        assert_eq!(result, Err(AllocationError::Exhausted { attempts: 3 }));
    }

    #[tokio::test]
    async fn test_zero_attempts_exhausts_without_insert() {
        let mut store = MockMappingStore::new();
        store.expect_find_by_url().times(1).returning(|_| Ok(None));
        store.expect_insert().times(0);

        let result = allocator(store).resolve_or_create_with(URL, 6, 0).await;

        assert_eq!(result, Err(AllocationError::Exhausted { attempts: 0 }));
    }

    #[tokio::test]
    async fn test_reserved_draw_is_skipped() {
        let mut store = MockMappingStore::new();
        store.expect_find_by_url().times(1).returning(|_| Ok(None));
        store
            .expect_insert()
            .withf(|_, code| code == "aB3xY9")
            .times(1)
            .returning(|url, code| Ok(mapping(code, url)));

        let draws = AtomicUsize::new(0);
        let script = ["health", "shorten", "aB3xY9"];
        let allocator = allocator(store).with_code_source(move |_| {
            script[draws.fetch_add(1, Ordering::SeqCst)].to_string()
        });

        let code = allocator.resolve_or_create(URL).await.unwrap();

        assert_eq!(code, "aB3xY9");
    }

    #[tokio::test]
    async fn test_reserved_draws_count_against_attempt_bound() {
        let mut store = MockMappingStore::new();
        store.expect_find_by_url().times(1).returning(|_| Ok(None));
        store.expect_insert().times(0);

        let allocator = allocator(store).with_code_source(|_| "health".to_string());
        let result = allocator.resolve_or_create_with(URL, 6, 3).await;

        assert_eq!(result, Err(AllocationError::Exhausted { attempts: 3 }));
    }

    #[tokio::test]
    async fn test_zero_length_never_inserts_empty_code() {
        let mut store = MockMappingStore::new();
        store.expect_find_by_url().times(1).returning(|_| Ok(None));
        store.expect_insert().times(0);

        let result = allocator(store).resolve_or_create_with(URL, 0, 10).await;

        assert_eq!(result, Err(AllocationError::Exhausted { attempts: 0 }));
    }

    #[tokio::test]
    async fn test_zero_length_still_resolves_existing_url() {
        let mut store = MockMappingStore::new();
        store
            .expect_find_by_url()
            .times(1)
            .returning(|url| Ok(Some(mapping("aB3xY9", url))));
        store.expect_insert().times(0);

        let code = allocator(store)
            .resolve_or_create_with(URL, 0, 10)
            .await
            .unwrap();

        assert_eq!(code, "aB3xY9");
    }

    #[tokio::test]
    async fn test_storage_failure_on_insert_is_not_retried() {
        let mut store = MockMappingStore::new();
        store.expect_find_by_url().times(1).returning(|_| Ok(None));
        store
            .expect_insert()
            .times(1)
            .returning(|_, _| Err(StoreError::Unavailable("database is locked".to_string())));

        let result = allocator(store).resolve_or_create(URL).await;

        assert_eq!(
            result,
            Err(AllocationError::StorageUnavailable(
                "database is locked".to_string()
            ))
        );
    }

    #[tokio::test]
    async fn test_storage_failure_on_lookup_propagates() {
        let mut store = MockMappingStore::new();
        store
            .expect_find_by_url()
            .times(1)
            .returning(|_| Err(StoreError::Unavailable("connection refused".to_string())));
        store.expect_insert().times(0);

        let result = allocator(store).resolve_or_create(URL).await;

        assert!(matches!(
            result,
            Err(AllocationError::StorageUnavailable(_))
        ));
    }

    #[tokio::test]
    async fn test_url_race_with_vanished_winner_keeps_trying() {
        let mut store = MockMappingStore::new();
        store.expect_find_by_url().times(3).returning(|_| Ok(None));
        store
            .expect_insert()
            .times(2)
            .returning(|_, _| Err(StoreError::UniquenessViolation(UniqueField::LongUrl)));

        let result = allocator(store).resolve_or_create_with(URL, 6, 2).await;

        assert_eq!(result, Err(AllocationError::Exhausted { attempts: 2 }));
    }

    #[tokio::test]
    async fn test_lookup_found() {
        let mut store = MockMappingStore::new();
        store
            .expect_find_by_code()
            .withf(|code| code == "aB3xY9")
            .times(1)
            .returning(|code| Ok(Some(mapping(code, URL))));

        let url = allocator(store).lookup("aB3xY9").await.unwrap();

        assert_eq!(url, URL);
    }

    #[tokio::test]
    async fn test_lookup_not_found() {
        let mut store = MockMappingStore::new();
        store.expect_find_by_code().times(1).returning(|_| Ok(None));

        let result = allocator(store).lookup("ZZZZZZ").await;

        assert_eq!(
            result,
            Err(AllocationError::NotFound {
                code: "ZZZZZZ".to_string()
            })
        );
    }

    #[test]
    fn test_default_config() {
        let config = AllocatorConfig::default();
        assert_eq!(config.code_length, 6);
        assert_eq!(config.max_attempts, 10);
    }
}
