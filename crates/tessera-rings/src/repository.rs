//! The process-wide ring table.
//!
//! A ring is identified by its ordered variable names and the id of its
//! coefficient ring, if any. The first request for a key assigns the next
//! free [`RingId`]; every later request with an equal key returns the same
//! id. Entries live until the process exits.
//!
//! Rings with generated names (`x0, x1, ...`) are additionally cached
//! under the short key `(prefix, count, coefficient ring)` so that asking
//! for "the ring with 50 variables named x" does not build 50 strings on
//! every call.

use std::fmt;
use std::sync::Arc;

use hashbrown::HashMap;
use log::debug;
use once_cell::sync::Lazy;
use parking_lot::Mutex;
use smallvec::SmallVec;
use tessera_core::{InternId, InternTable};

use crate::error::{Result, RingError};

/// Ordered variable names of a ring.
pub type Names = SmallVec<[Arc<str>; 4]>;

/// Identity of an interned ring. Equal ids mean equal rings.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RingId(InternId);

impl RingId {
    /// Returns the raw index.
    #[must_use]
    pub fn index(self) -> u32 {
        self.0.index()
    }

    /// Looks up a raw index previously obtained from [`RingId::index`].
    ///
    /// # Errors
    ///
    /// [`RingError::UnknownRing`] if no ring has that index.
    pub fn from_index(index: u32) -> Result<Self> {
        let id = InternId::new(index);
        if REPOSITORY.lock().by_key.get(id).is_some() {
            Ok(Self(id))
        } else {
            Err(RingError::UnknownRing(index))
        }
    }
}

impl fmt::Debug for RingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RingId({})", self.index())
    }
}

impl fmt::Display for RingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.index())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
struct RingKey {
    names: Names,
    coeff: Option<RingId>,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
struct ArityKey {
    prefix: Arc<str>,
    count: usize,
    coeff: Option<RingId>,
}

#[derive(Default)]
struct Repository {
    by_key: InternTable<RingKey>,
    by_arity: HashMap<ArityKey, RingId>,
    pretty: HashMap<RingId, Names>,
}

impl Repository {
    fn intern(&mut self, key: RingKey) -> RingId {
        let (id, fresh) = self.by_key.intern_full(key);
        let id = RingId(id);
        if fresh {
            debug!(
                "interned ring {id} with {} variables",
                self.by_key.get(id.0).map_or(0, |k| k.names.len())
            );
        }
        id
    }

    fn key(&self, id: RingId) -> Option<&RingKey> {
        self.by_key.get(id.0)
    }
}

static REPOSITORY: Lazy<Mutex<Repository>> = Lazy::new(|| Mutex::new(Repository::default()));

/// Returns the id of the ring with the given variable names over the given
/// coefficient ring, creating it on first use.
///
/// The order of `names` matters: `["x", "y"]` and `["y", "x"]` are
/// different rings.
pub fn intern<S: AsRef<str>>(names: &[S], coeff: Option<RingId>) -> RingId {
    let names = names.iter().map(|s| Arc::from(s.as_ref())).collect();
    REPOSITORY.lock().intern(RingKey { names, coeff })
}

/// Returns the id of the ring with `count` variables named after `prefix`.
///
/// A single variable is named `prefix` itself; otherwise the names are
/// `prefix0 .. prefix{count-1}`.
pub fn intern_by_arity(prefix: &str, count: usize, coeff: Option<RingId>) -> RingId {
    if count == 1 {
        return intern(&[prefix], coeff);
    }

    let arity_key = ArityKey {
        prefix: Arc::from(prefix),
        count,
        coeff,
    };
    let mut repo = REPOSITORY.lock();
    if let Some(&id) = repo.by_arity.get(&arity_key) {
        return id;
    }
    let names = (0..count)
        .map(|i| Arc::from(format!("{prefix}{i}")))
        .collect();
    let id = repo.intern(RingKey { names, coeff });
    repo.by_arity.insert(arity_key, id);
    id
}

/// The variable names of a ring.
#[must_use]
pub fn names(id: RingId) -> Names {
    REPOSITORY
        .lock()
        .key(id)
        .map(|k| k.names.clone())
        .unwrap_or_default()
}

/// The coefficient ring of a ring, if it has one.
#[must_use]
pub fn coefficient_ring(id: RingId) -> Option<RingId> {
    REPOSITORY.lock().key(id).and_then(|k| k.coeff)
}

/// The display names of a ring: those set by [`set_pretty_names`], or the
/// variable names.
#[must_use]
pub fn pretty_names(id: RingId) -> Names {
    let repo = REPOSITORY.lock();
    if let Some(pretty) = repo.pretty.get(&id) {
        return pretty.clone();
    }
    repo.key(id).map(|k| k.names.clone()).unwrap_or_default()
}

/// Sets the display names of a ring. Does not affect its identity.
///
/// # Errors
///
/// [`RingError::WrongArity`] if `names` does not have one entry per
/// variable.
pub fn set_pretty_names<S: AsRef<str>>(id: RingId, names: &[S]) -> Result<()> {
    let mut repo = REPOSITORY.lock();
    let expected = repo.key(id).map_or(0, |k| k.names.len());
    if names.len() != expected {
        return Err(RingError::WrongArity {
            expected,
            found: names.len(),
        });
    }
    let names = names.iter().map(|s| Arc::from(s.as_ref())).collect();
    repo.pretty.insert(id, names);
    Ok(())
}

/// Number of rings interned so far.
#[must_use]
pub fn len() -> usize {
    REPOSITORY.lock().by_key.len()
}
