//! Bounded TTL cache for recommendation results
//!
//! Purely a performance layer: a miss recomputes the identical result, and
//! eviction is deterministic (expired entries are purged lazily on access,
//! the oldest entry is dropped when the capacity bound is hit).

use crate::types::{JobRole, RoleRecommendation, UserProfile};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::time::{Duration, Instant};
use xxhash_rust::xxh3::xxh3_64;

struct CacheEntry {
    inserted_at: Instant,
    recommendations: Vec<RoleRecommendation>,
}

pub struct RecommendationCache {
    entries: Mutex<HashMap<u64, CacheEntry>>,
    ttl: Duration,
    capacity: usize,
}

impl RecommendationCache {
    pub fn new(ttl: Duration, capacity: usize) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            ttl,
            capacity,
        }
    }

    /// Fingerprint of everything a recommendation result depends on: the
    /// profile's identity and scoring-relevant fields, the candidate role
    /// set, and the requested cutoff. Hashing the role IDs scopes entries to
    /// whatever role collection the caller passed (per-tenant role sets get
    /// distinct keys for free).
    pub fn fingerprint(profile: &UserProfile, roles: &[JobRole], top_n: usize) -> u64 {
        let mut skills: Vec<String> = profile.skills.iter().map(|s| s.to_lowercase()).collect();
        skills.sort();

        let mut role_ids: Vec<i64> = roles.iter().map(|r| r.id).collect();
        role_ids.sort_unstable();

        let raw = format!(
            "{}:{}:{}:{}:{}:{}:{:?}",
            profile.id,
            skills.join(","),
            profile.years_experience,
            profile.education.as_deref().unwrap_or(""),
            profile.is_career_switcher,
            top_n,
            role_ids,
        );
        xxh3_64(raw.as_bytes())
    }

    pub fn get(&self, key: u64) -> Option<Vec<RoleRecommendation>> {
        let mut entries = self.entries.lock();
        let ttl = self.ttl;
        entries.retain(|_, entry| entry.inserted_at.elapsed() < ttl);
        entries.get(&key).map(|e| e.recommendations.clone())
    }

    pub fn insert(&self, key: u64, recommendations: Vec<RoleRecommendation>) {
        let mut entries = self.entries.lock();
        if entries.len() >= self.capacity && !entries.contains_key(&key) {
            if let Some(oldest) = entries
                .iter()
                .min_by_key(|(_, e)| e.inserted_at)
                .map(|(k, _)| *k)
            {
                entries.remove(&oldest);
            }
        }
        entries.insert(
            key,
            CacheEntry {
                inserted_at: Instant::now(),
                recommendations,
            },
        );
    }

    pub fn clear(&self) {
        self.entries.lock().clear();
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }
}
