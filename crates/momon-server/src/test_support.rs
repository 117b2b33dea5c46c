//! In-memory doubles shared by the server's unit tests

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::Router;
use chrono::{DateTime, Duration, TimeZone, Utc};
use tokio::sync::Barrier;

use momon::{
    Clock, DomainError, Identity, IdentityRepository, MonsterRecord, MonsterRepository,
    NewMonster, ObjectStorage,
};

/// Identity store keyed by device id, rejecting duplicate inserts like a primary key
#[derive(Default)]
pub struct InMemoryIdentityRepository {
    identities: Mutex<HashMap<String, Identity>>,
    lookup_barrier: Option<Arc<Barrier>>,
    pub conflicts: AtomicUsize,
}

impl InMemoryIdentityRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `n` concurrent lookups wait for each other after reading,
    /// so they all observe the same (possibly empty) state
    pub fn with_lookup_barrier(n: usize) -> Self {
        Self {
            lookup_barrier: Some(Arc::new(Barrier::new(n))),
            ..Self::default()
        }
    }

    pub fn count(&self) -> usize {
        self.identities.lock().unwrap().len()
    }

    pub fn get(&self, device_id: &str) -> Option<Identity> {
        self.identities.lock().unwrap().get(device_id).cloned()
    }

    /// Pre-register a device as if it had been seen at `seen_at`
    pub fn seed(&self, device_id: &str, seen_at: DateTime<Utc>) -> Identity {
        let identity = Identity::first_contact(device_id, seen_at);
        self.identities
            .lock()
            .unwrap()
            .insert(device_id.to_string(), identity.clone());
        identity
    }
}

#[async_trait]
impl IdentityRepository for InMemoryIdentityRepository {
    async fn find_by_device_id(&self, device_id: &str) -> Result<Option<Identity>, DomainError> {
        let found = self.get(device_id);
        if let Some(barrier) = &self.lookup_barrier {
            barrier.wait().await;
        }
        Ok(found)
    }

    async fn insert(&self, identity: &Identity) -> Result<Identity, DomainError> {
        let mut identities = self.identities.lock().unwrap();
        if identities.contains_key(&identity.device_id) {
            self.conflicts.fetch_add(1, Ordering::SeqCst);
            return Err(DomainError::Conflict(format!(
                "duplicate key value violates unique constraint: {}",
                identity.device_id
            )));
        }
        identities.insert(identity.device_id.clone(), identity.clone());
        Ok(identity.clone())
    }

    async fn touch(
        &self,
        device_id: &str,
        seen_at: DateTime<Utc>,
    ) -> Result<Identity, DomainError> {
        let mut identities = self.identities.lock().unwrap();
        let identity = identities
            .get_mut(device_id)
            .ok_or_else(|| DomainError::not_found("Identity", device_id))?;
        identity.touch(seen_at);
        Ok(identity.clone())
    }
}

/// Monster store with an auto-incrementing id
#[derive(Default)]
pub struct InMemoryMonsterRepository {
    monsters: Mutex<Vec<MonsterRecord>>,
}

impl InMemoryMonsterRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self) -> usize {
        self.monsters.lock().unwrap().len()
    }
}

#[async_trait]
impl MonsterRepository for InMemoryMonsterRepository {
    async fn insert(&self, monster: &NewMonster) -> Result<MonsterRecord, DomainError> {
        let mut monsters = self.monsters.lock().unwrap();
        let record = monster.clone().into_record(monsters.len() as i64 + 1);
        monsters.push(record.clone());
        Ok(record)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<MonsterRecord>, DomainError> {
        let monsters = self.monsters.lock().unwrap();
        Ok(monsters.iter().find(|m| m.id == id).cloned())
    }

    async fn find_by_owner(&self, device_id: &str) -> Result<Vec<MonsterRecord>, DomainError> {
        let monsters = self.monsters.lock().unwrap();
        let mut owned: Vec<MonsterRecord> = monsters
            .iter()
            .filter(|m| m.owner_device_id == device_id)
            .cloned()
            .collect();
        owned.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(owned)
    }
}

/// Clock that advances one second on every read
pub struct ManualClock {
    now: Mutex<DateTime<Utc>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self {
            now: Mutex::new(Utc.with_ymd_and_hms(2025, 1, 1, 9, 0, 0).unwrap()),
        }
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        let mut now = self.now.lock().unwrap();
        *now += Duration::seconds(1);
        *now
    }
}

/// Object storage that keeps everything in a map
#[derive(Default)]
pub struct InMemoryObjectStorage {
    pub objects: Mutex<HashMap<String, (Vec<u8>, String)>>,
}

#[async_trait]
impl ObjectStorage for InMemoryObjectStorage {
    async fn put_object(
        &self,
        key: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<(), DomainError> {
        self.objects
            .lock()
            .unwrap()
            .insert(key.to_string(), (bytes, content_type.to_string()));
        Ok(())
    }

    fn public_url(&self, key: &str) -> String {
        format!("https://test-bucket.s3.ap-northeast-2.amazonaws.com/{key}")
    }
}

/// Serve a router on an ephemeral local port and return its base URL
pub async fn spawn_server(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}
