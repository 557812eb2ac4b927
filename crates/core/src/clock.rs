//! Injectable sources of time and identity.
//!
//! Services never call `Utc::now()` or `Uuid::new_v4()` directly; they are
//! handed a `Clock` and an `IdGenerator` at construction so tests can pin
//! both.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use chrono::{DateTime, SubsecRound, Utc};

use crate::id::CatId;

/// Source of the current instant.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Source of fresh cat identifiers.
pub trait IdGenerator: Send + Sync {
    fn next(&self) -> CatId;
}

impl<C> Clock for Arc<C>
where
    C: Clock + ?Sized,
{
    fn now(&self) -> DateTime<Utc> {
        (**self).now()
    }
}

impl<G> IdGenerator for Arc<G>
where
    G: IdGenerator + ?Sized,
{
    fn next(&self) -> CatId {
        (**self).next()
    }
}

/// Wall clock.
///
/// Truncated to microseconds, the finest precision `TIMESTAMPTZ` stores, so a
/// persisted instant reads back unchanged.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now().trunc_subsecs(6)
    }
}

/// Clock frozen at a single instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(DateTime<Utc>);

impl FixedClock {
    pub fn new(at: DateTime<Utc>) -> Self {
        Self(at)
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Random (UUIDv4) identifiers.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomIdGenerator;

impl IdGenerator for RandomIdGenerator {
    fn next(&self) -> CatId {
        CatId::new()
    }
}

/// Always yields the same identifier.
#[derive(Debug, Clone, Copy)]
pub struct FixedIdGenerator(CatId);

impl FixedIdGenerator {
    pub fn new(id: CatId) -> Self {
        Self(id)
    }
}

impl IdGenerator for FixedIdGenerator {
    fn next(&self) -> CatId {
        self.0
    }
}

/// Yields pre-seeded identifiers in order, then falls back to random ones.
#[derive(Debug, Default)]
pub struct SequenceIdGenerator {
    queue: Mutex<VecDeque<CatId>>,
}

impl SequenceIdGenerator {
    pub fn new(ids: impl IntoIterator<Item = CatId>) -> Self {
        Self {
            queue: Mutex::new(ids.into_iter().collect()),
        }
    }
}

impl IdGenerator for SequenceIdGenerator {
    fn next(&self) -> CatId {
        let seeded = match self.queue.lock() {
            Ok(mut queue) => queue.pop_front(),
            Err(poisoned) => poisoned.into_inner().pop_front(),
        };
        seeded.unwrap_or_default()
    }
}
