//! Capability-scoped pool of preview players shared by every fiddle on a page.
//!
//! The pool replaces a module-level shared registry: whoever owns the value
//! decides which widgets may borrow from it. Players are created lazily up to
//! a fixed capacity and loaned out against a [`SurfaceId`]. An exclusive
//! borrow may reassign a loaned player; the displaced handle goes stale and
//! every operation through it becomes an inert no-op.
//!
//! A [`PlayerHandle`] is not `Clone` and [`release`](PlayerPool::release)
//! consumes it, so a loan cannot be closed twice.

use std::fmt;

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

use crate::config::AspectRatio;
use crate::event::PlayerEvent;
use crate::player::PreviewPlayer;

/// Default number of players a pool will create.
pub const DEFAULT_POOL_CAPACITY: usize = 3;

/// Identifies the preview surface a player renders into (a DOM element id on
/// the web, an arbitrary label in tests).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SurfaceId(String);

impl SurfaceId {
    /// Create a new surface id
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the id as a string slice
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for SurfaceId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl fmt::Display for SurfaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Move-only proof of an open player loan.
#[derive(Debug)]
pub struct PlayerHandle {
    player_id: String,
    loan: u64,
}

impl PlayerHandle {
    /// Id of the pooled player backing this loan.
    #[inline]
    pub fn player_id(&self) -> &str {
        &self.player_id
    }
}

#[derive(Debug)]
struct ActiveLoan {
    id: u64,
    surface: SurfaceId,
}

#[derive(Debug)]
struct PooledPlayer {
    player: PreviewPlayer,
    loan: Option<ActiveLoan>,
    /// Loan counter value at the last grant, for least-recently-borrowed
    /// reassignment.
    borrowed_at: u64,
}

/// Pool of preview players, loaned to widgets one surface at a time.
#[derive(Debug)]
pub struct PlayerPool {
    players: HashMap<String, PooledPlayer>,
    capacity: usize,
    next_loan: u64,
}

impl PlayerPool {
    /// Create a pool that will lazily create up to `capacity` players.
    pub fn new(capacity: usize) -> Self {
        Self {
            players: HashMap::new(),
            capacity,
            next_loan: 0,
        }
    }

    /// Maximum number of players this pool will create.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of players created so far.
    #[inline]
    pub fn len(&self) -> usize {
        self.players.len()
    }

    /// Whether no player has been created yet.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    /// Number of players currently on loan.
    #[inline]
    pub fn loaned_count(&self) -> usize {
        self.players.values().filter(|p| p.loan.is_some()).count()
    }

    /// Number of created players sitting idle.
    #[inline]
    pub fn idle_count(&self) -> usize {
        self.players.values().filter(|p| p.loan.is_none()).count()
    }

    /// Non-exclusive borrow: grants an idle player (creating one while under
    /// capacity) and never displaces another widget's loan.
    pub fn try_borrow(&mut self, surface: &SurfaceId, ratio: AspectRatio) -> Option<PlayerHandle> {
        if let Some(id) = self.idle_player_id() {
            return Some(self.lend(id, surface, ratio));
        }
        if self.players.len() < self.capacity {
            let id = self.create_player();
            return Some(self.lend(id, surface, ratio));
        }
        log::debug!("player pool exhausted, try-borrow for {} denied", surface);
        None
    }

    /// Exclusive borrow: prefers an idle player, otherwise reassigns the
    /// least recently borrowed one. Returns `None` only for a zero-capacity
    /// pool.
    pub fn borrow(&mut self, surface: &SurfaceId, ratio: AspectRatio) -> Option<PlayerHandle> {
        if let Some(handle) = self.try_borrow(surface, ratio) {
            return Some(handle);
        }
        let id = self
            .players
            .iter()
            .filter(|(_, p)| p.loan.is_some())
            .min_by_key(|(_, p)| p.borrowed_at)
            .map(|(id, _)| id.clone())?;
        let entry = self.players.get_mut(&id).expect("entry exists");
        if let Some(loan) = entry.loan.take() {
            log::debug!(
                "player {} reassigned from {} to {}",
                id,
                loan.surface,
                surface
            );
        }
        entry.player.reset();
        Some(self.lend(id, surface, ratio))
    }

    /// Close a loan. Consumes the handle; a stale handle (its player was
    /// reassigned meanwhile) is a silent no-op.
    pub fn release(&mut self, handle: PlayerHandle) {
        let Some(entry) = self.players.get_mut(&handle.player_id) else {
            return;
        };
        let is_live = entry.loan.as_ref().map_or(false, |l| l.id == handle.loan);
        if is_live {
            if let Some(loan) = entry.loan.take() {
                log::debug!("player {} released by {}", handle.player_id, loan.surface);
            }
            entry.player.toggle_playback(Some(false));
        } else {
            log::trace!("stale release of player {} ignored", handle.player_id);
        }
    }

    /// Access the player behind a live handle. `None` when the handle is
    /// stale.
    pub fn player(&self, handle: &PlayerHandle) -> Option<&PreviewPlayer> {
        let entry = self.players.get(&handle.player_id)?;
        match &entry.loan {
            Some(loan) if loan.id == handle.loan => Some(&entry.player),
            _ => None,
        }
    }

    /// Mutable access to the player behind a live handle.
    pub fn player_mut(&mut self, handle: &PlayerHandle) -> Option<&mut PreviewPlayer> {
        let entry = self.players.get_mut(&handle.player_id)?;
        match &entry.loan {
            Some(loan) if loan.id == handle.loan => Some(&mut entry.player),
            _ => None,
        }
    }

    /// Drain the pending events of a loaned player. Empty for stale handles.
    pub fn take_events(&mut self, handle: &PlayerHandle) -> Vec<PlayerEvent> {
        self.player_mut(handle)
            .map(|p| p.take_events())
            .unwrap_or_default()
    }

    /// Advance every playing player; the host calls this once per animation
    /// frame.
    pub fn advance_all(&mut self, frames: u32) {
        for entry in self.players.values_mut() {
            entry.player.advance(frames);
        }
    }

    fn idle_player_id(&self) -> Option<String> {
        self.players
            .iter()
            .find(|(_, p)| p.loan.is_none())
            .map(|(id, _)| id.clone())
    }

    fn create_player(&mut self) -> String {
        let mut id = uuid::Uuid::new_v4().to_string();
        while self.players.contains_key(&id) {
            id = uuid::Uuid::new_v4().to_string();
        }
        self.players.insert(
            id.clone(),
            PooledPlayer {
                player: PreviewPlayer::new(AspectRatio::default()),
                loan: None,
                borrowed_at: 0,
            },
        );
        log::debug!("created preview player {}", id);
        id
    }

    fn lend(&mut self, player_id: String, surface: &SurfaceId, ratio: AspectRatio) -> PlayerHandle {
        self.next_loan += 1;
        let loan = self.next_loan;
        let entry = self.players.get_mut(&player_id).expect("entry exists");
        entry.loan = Some(ActiveLoan {
            id: loan,
            surface: surface.clone(),
        });
        entry.borrowed_at = loan;
        entry.player.set_ratio(ratio);
        log::debug!("player {} loaned to {}", player_id, surface);
        PlayerHandle { player_id, loan }
    }
}

impl Default for PlayerPool {
    fn default() -> Self {
        Self::new(DEFAULT_POOL_CAPACITY)
    }
}
