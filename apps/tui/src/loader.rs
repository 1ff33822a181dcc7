use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use std::time::Duration;

use chrono::{DateTime, Utc};
use futures_util::stream::{self, StreamExt};
use tokio::sync::watch;

use crate::domain::Entity;
use crate::roster::{FetchError, RosterEntry, RosterSource};

/// Lifecycle of one entity's roster.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState {
    NotRequested,
    Loading,
    Loaded(Arc<Vec<RosterEntry>>),
    Failed(String),
}

impl LoadState {
    pub const fn is_resolved(&self) -> bool {
        matches!(self, Self::Loaded(_) | Self::Failed(_))
    }

    /// Roster to show for this state. Failed entities fall back to an empty roster.
    pub fn roster(&self) -> &[RosterEntry] {
        match self {
            Self::Loaded(entries) => entries.as_slice(),
            _ => &[],
        }
    }

    pub const fn label(&self) -> &'static str {
        match self {
            Self::NotRequested => "not requested",
            Self::Loading => "loading",
            Self::Loaded(_) => "loaded",
            Self::Failed(_) => "failed",
        }
    }
}

#[derive(Debug, Clone)]
struct Slot {
    state: LoadState,
    resolved_at: Option<DateTime<Utc>>,
}

/// Shared roster cache. Written by the orchestrator, read by the tab controller.
///
/// Every state change bumps a `watch` version so readers can wait for a
/// code to resolve instead of polling.
#[derive(Debug)]
pub struct FleetCache {
    slots: RwLock<HashMap<String, Slot>>,
    version: watch::Sender<u64>,
}

impl Default for FleetCache {
    fn default() -> Self {
        Self::new()
    }
}

impl FleetCache {
    pub fn new() -> Self {
        let (version, _) = watch::channel(0);
        Self {
            slots: RwLock::new(HashMap::new()),
            version,
        }
    }

    pub fn state(&self, code: &str) -> LoadState {
        self.read_slot(code)
            .map_or(LoadState::NotRequested, |slot| slot.state)
    }

    pub fn is_resolved(&self, code: &str) -> bool {
        self.state(code).is_resolved()
    }

    pub fn resolved_at(&self, code: &str) -> Option<DateTime<Utc>> {
        self.read_slot(code).and_then(|slot| slot.resolved_at)
    }

    pub fn roster(&self, code: &str) -> Arc<Vec<RosterEntry>> {
        match self.state(code) {
            LoadState::Loaded(entries) => entries,
            _ => Arc::new(Vec::new()),
        }
    }

    /// Number of codes that are loaded or failed.
    pub fn resolved_count(&self) -> usize {
        self.slots.read().map_or(0, |slots| {
            slots
                .values()
                .filter(|slot| slot.state.is_resolved())
                .count()
        })
    }

    /// Claim `code` for fetching. Only the first caller for a code gets `true`.
    pub fn begin(&self, code: &str) -> bool {
        let Ok(mut slots) = self.slots.write() else {
            return false;
        };
        if slots.contains_key(code) {
            return false;
        }
        slots.insert(
            code.to_string(),
            Slot {
                state: LoadState::Loading,
                resolved_at: None,
            },
        );
        drop(slots);
        self.bump();
        true
    }

    /// Settle a code claimed with [`FleetCache::begin`]. Resolved codes never change again.
    pub fn resolve(&self, code: &str, outcome: Result<Vec<RosterEntry>, FetchError>) -> bool {
        let Ok(mut slots) = self.slots.write() else {
            return false;
        };
        let Some(slot) = slots.get_mut(code) else {
            return false;
        };
        if slot.state != LoadState::Loading {
            return false;
        }

        slot.state = match outcome {
            Ok(entries) => LoadState::Loaded(Arc::new(entries)),
            Err(error) => LoadState::Failed(error.to_string()),
        };
        slot.resolved_at = Some(Utc::now());
        drop(slots);
        self.bump();
        true
    }

    /// Wait until `code` is loaded or failed.
    pub async fn wait_resolved(&self, code: &str) {
        let mut version = self.version.subscribe();
        while !self.is_resolved(code) {
            if version.changed().await.is_err() {
                return;
            }
        }
    }

    fn read_slot(&self, code: &str) -> Option<Slot> {
        self.slots.read().ok()?.get(code).cloned()
    }

    fn bump(&self) {
        self.version.send_modify(|version| *version += 1);
    }
}

/// Fetches rosters into a [`FleetCache`]: the default entity first, then the rest.
#[derive(Clone)]
pub struct LoadOrchestrator {
    source: Arc<dyn RosterSource>,
    cache: Arc<FleetCache>,
    fetch_timeout: Duration,
    concurrency: usize,
}

impl LoadOrchestrator {
    pub fn new(source: Arc<dyn RosterSource>, cache: Arc<FleetCache>) -> Self {
        Self {
            source,
            cache,
            fetch_timeout: Duration::from_secs(10),
            concurrency: 1,
        }
    }

    #[must_use]
    pub const fn with_timeout(mut self, fetch_timeout: Duration) -> Self {
        self.fetch_timeout = fetch_timeout;
        self
    }

    #[must_use]
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    pub fn cache(&self) -> &Arc<FleetCache> {
        &self.cache
    }

    pub fn source_description(&self) -> String {
        self.source.describe()
    }

    /// Load every entity, the default one first.
    pub async fn load_all(&self, entities: &[Entity], default_code: &str) {
        self.load_default(default_code).await;
        self.load_remaining(entities, default_code).await;
        tracing::info!(
            resolved = self.cache.resolved_count(),
            "roster loading finished"
        );
    }

    /// Load only the default entity. Returns once it is loaded or failed.
    pub async fn load_default(&self, default_code: &str) {
        self.load_one(default_code).await;
    }

    /// Load everything except the default, at most `concurrency` at a time.
    pub async fn load_remaining(&self, entities: &[Entity], default_code: &str) {
        stream::iter(
            entities
                .iter()
                .filter(|entity| entity.code != default_code)
                .map(|entity| entity.code),
        )
        .for_each_concurrent(self.concurrency, |code| self.load_one(code))
        .await;
    }

    async fn load_one(&self, code: &str) {
        if !self.cache.begin(code) {
            return;
        }

        let outcome = match tokio::time::timeout(self.fetch_timeout, self.source.fetch(code)).await
        {
            Ok(result) => result,
            Err(_) => Err(FetchError::Timeout(self.fetch_timeout)),
        };

        match &outcome {
            Ok(entries) => tracing::info!(code, rows = entries.len(), "roster loaded"),
            Err(error) => {
                tracing::warn!(code, %error, "roster fetch failed, using empty roster");
            }
        }

        self.cache.resolve(code, outcome);
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::domain::LEADERBOARD;
    use async_trait::async_trait;
    use std::collections::HashSet;
    use std::sync::Mutex;
    use tokio::sync::Notify;

    /// In-memory source recording fetch order. Codes in `failing` error out,
    /// codes in `gated` block until the gate is opened.
    #[derive(Default)]
    pub(crate) struct FakeSource {
        pub calls: Mutex<Vec<String>>,
        pub failing: HashSet<String>,
        pub gated: HashSet<String>,
        pub gate: Notify,
        pub stall: bool,
    }

    impl FakeSource {
        pub(crate) fn calls(&self) -> Vec<String> {
            self.calls.lock().map(|calls| calls.clone()).unwrap_or_default()
        }
    }

    pub(crate) fn row(name: &str) -> RosterEntry {
        RosterEntry {
            aircraft: Some(name.to_string()),
            ..RosterEntry::default()
        }
    }

    #[async_trait]
    impl RosterSource for FakeSource {
        async fn fetch(&self, code: &str) -> Result<Vec<RosterEntry>, FetchError> {
            if let Ok(mut calls) = self.calls.lock() {
                calls.push(code.to_string());
            }
            if self.stall {
                std::future::pending::<()>().await;
            }
            if self.gated.contains(code) {
                self.gate.notified().await;
            }
            if self.failing.contains(code) {
                return Err(FetchError::Status {
                    status: 503,
                    url: format!("fake://{code}"),
                });
            }
            Ok(vec![row(&format!("{code}-fighter"))])
        }

        fn describe(&self) -> String {
            "fake".to_string()
        }
    }

    #[tokio::test]
    async fn load_all_resolves_every_entity() {
        let source = Arc::new(FakeSource::default());
        let cache = Arc::new(FleetCache::new());
        let orchestrator = LoadOrchestrator::new(source.clone(), cache.clone());

        orchestrator.load_all(&LEADERBOARD, "us").await;

        for entity in &LEADERBOARD {
            assert!(matches!(cache.state(entity.code), LoadState::Loaded(_)));
        }
        assert_eq!(cache.resolved_count(), LEADERBOARD.len());
    }

    #[tokio::test]
    async fn default_entity_is_fetched_first_then_table_order() {
        let source = Arc::new(FakeSource::default());
        let cache = Arc::new(FleetCache::new());
        let orchestrator = LoadOrchestrator::new(source.clone(), cache);

        orchestrator.load_all(&LEADERBOARD[..4], "cn").await;

        assert_eq!(source.calls(), vec!["cn", "us", "ru", "il"]);
    }

    #[tokio::test]
    async fn remaining_entities_wait_for_the_default() {
        let source = Arc::new(FakeSource {
            gated: HashSet::from(["us".to_string()]),
            ..FakeSource::default()
        });
        let cache = Arc::new(FleetCache::new());
        let orchestrator = LoadOrchestrator::new(source.clone(), cache.clone()).with_concurrency(4);

        let loading = tokio::spawn(async move { orchestrator.load_all(&LEADERBOARD, "us").await });
        for _ in 0..5 {
            tokio::task::yield_now().await;
        }
        assert_eq!(source.calls(), vec!["us"]);
        assert_eq!(cache.state("us"), LoadState::Loading);
        assert_eq!(cache.state("ru"), LoadState::NotRequested);

        source.gate.notify_one();
        let joined = tokio::time::timeout(Duration::from_secs(1), loading).await;
        assert!(matches!(joined, Ok(Ok(()))));
        assert_eq!(cache.resolved_count(), LEADERBOARD.len());
    }

    #[tokio::test]
    async fn default_is_resolved_when_load_default_returns() {
        let source = Arc::new(FakeSource::default());
        let cache = Arc::new(FleetCache::new());
        let orchestrator = LoadOrchestrator::new(source, cache.clone());

        orchestrator.load_default("jp").await;

        assert!(cache.is_resolved("jp"));
        assert_eq!(cache.state("us"), LoadState::NotRequested);
    }

    #[tokio::test]
    async fn one_failure_leaves_other_entities_loaded() {
        let source = Arc::new(FakeSource {
            failing: HashSet::from(["ru".to_string()]),
            ..FakeSource::default()
        });
        let cache = Arc::new(FleetCache::new());
        let orchestrator = LoadOrchestrator::new(source, cache.clone()).with_concurrency(3);

        orchestrator.load_all(&LEADERBOARD, "us").await;

        assert!(matches!(cache.state("ru"), LoadState::Failed(_)));
        assert!(cache.roster("ru").is_empty());
        for entity in LEADERBOARD.iter().filter(|entity| entity.code != "ru") {
            assert!(
                matches!(cache.state(entity.code), LoadState::Loaded(_)),
                "{} should be loaded",
                entity.code
            );
        }
    }

    #[tokio::test]
    async fn stalled_fetch_times_out_into_failed() {
        let source = Arc::new(FakeSource {
            stall: true,
            ..FakeSource::default()
        });
        let cache = Arc::new(FleetCache::new());
        let orchestrator = LoadOrchestrator::new(source, cache.clone())
            .with_timeout(Duration::from_millis(20));

        orchestrator.load_default("us").await;

        match cache.state("us") {
            LoadState::Failed(reason) => assert!(reason.contains("timed out")),
            other => panic!("expected failure, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn resolved_codes_are_never_fetched_again() {
        let source = Arc::new(FakeSource::default());
        let cache = Arc::new(FleetCache::new());
        let orchestrator = LoadOrchestrator::new(source.clone(), cache.clone());

        orchestrator.load_all(&LEADERBOARD[..3], "us").await;
        orchestrator.load_all(&LEADERBOARD[..3], "us").await;

        assert_eq!(source.calls().len(), 3);
        assert!(!cache.begin("us"));
        assert!(!cache.resolve("us", Ok(Vec::new())));
        assert_eq!(cache.roster("us").len(), 1);
    }

    #[test]
    fn resolve_requires_a_claimed_code() {
        let cache = FleetCache::new();
        assert!(!cache.resolve("us", Ok(Vec::new())));
        assert_eq!(cache.state("us"), LoadState::NotRequested);

        assert!(cache.begin("us"));
        assert_eq!(cache.state("us"), LoadState::Loading);
        assert!(cache.resolve("us", Err(FetchError::Timeout(Duration::from_secs(1)))));
        assert!(cache.resolved_at("us").is_some());
    }

    #[tokio::test]
    async fn wait_resolved_wakes_on_resolution() {
        let cache = Arc::new(FleetCache::new());
        cache.begin("gb");

        let waiter = {
            let cache = cache.clone();
            tokio::spawn(async move { cache.wait_resolved("gb").await })
        };
        tokio::task::yield_now().await;
        assert!(!waiter.is_finished());

        cache.resolve("gb", Ok(vec![row("Typhoon")]));
        let joined = tokio::time::timeout(Duration::from_secs(1), waiter).await;
        assert!(matches!(joined, Ok(Ok(()))));
    }
}
