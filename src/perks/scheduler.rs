//! Scheduled actions and notices.
//!
//! Delayed one-shots (word swap, invisible-word hide, notice dismissal)
//! and repeating tickers (time-bomb drain) are entries in one queue
//! against the logical clock. Every entry is owned by exactly one team;
//! turn end and team removal cancel by owner, and cancellation by handle
//! is idempotent: cancelling an action that already fired or whose owner
//! is gone is a no-op.
//!
//! The engine drains due entries inside `tick()` and interprets the
//! action kinds; this module only keeps the book.

use log::debug;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{ActionId, NoticeId, TeamId, Tick};

/// What a scheduled action does when it fires.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActionKind {
    /// Swap the owner's active term for a fresh one.
    SwapWord,
    /// Hide the owner's active term until it changes.
    HideWord,
    /// Drain points from the owner (time bomb).
    BombTick,
    /// Auto-dismiss a posted notice.
    DismissNotice(NoticeId),
}

/// A scheduled one-shot or repeating action.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledAction {
    pub id: ActionId,
    pub owner: TeamId,
    pub due: Tick,
    /// `Some(n)` re-arms the action `n` seconds after each fire.
    pub repeat_every: Option<u64>,
    pub kind: ActionKind,
}

/// The action queue.
///
/// Entry count is tiny (a handful per team at most), so a plain vec
/// beats a heap here and keeps cancellation trivial.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ActionQueue {
    entries: Vec<ScheduledAction>,
    next_id: u32,
}

impl ActionQueue {
    fn alloc_id(&mut self) -> ActionId {
        let id = ActionId::new(self.next_id);
        self.next_id += 1;
        id
    }

    /// Schedule a one-shot action `delay` seconds from `now`.
    pub fn schedule_in(
        &mut self,
        owner: TeamId,
        kind: ActionKind,
        now: Tick,
        delay: u64,
    ) -> ActionId {
        let id = self.alloc_id();
        self.entries.push(ScheduledAction {
            id,
            owner,
            due: now.plus_secs(delay),
            repeat_every: None,
            kind,
        });
        debug!("scheduled {kind:?} for {owner} at {}", now.plus_secs(delay));
        id
    }

    /// Schedule a repeating action firing every `interval` seconds.
    pub fn schedule_repeating(
        &mut self,
        owner: TeamId,
        kind: ActionKind,
        now: Tick,
        interval: u64,
    ) -> ActionId {
        let id = self.alloc_id();
        self.entries.push(ScheduledAction {
            id,
            owner,
            due: now.plus_secs(interval),
            repeat_every: Some(interval),
            kind,
        });
        debug!("scheduled repeating {kind:?} for {owner} every {interval}s");
        id
    }

    /// Cancel by handle. Idempotent: returns false if the action already
    /// fired or was cancelled.
    pub fn cancel(&mut self, id: ActionId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|a| a.id != id);
        self.entries.len() != before
    }

    /// Cancel everything owned by a team. Returns the number cancelled.
    pub fn cancel_owned_by(&mut self, team: TeamId) -> usize {
        let before = self.entries.len();
        self.entries.retain(|a| a.owner != team);
        let cancelled = before - self.entries.len();
        if cancelled > 0 {
            debug!("cancelled {cancelled} scheduled action(s) for {team}");
        }
        cancelled
    }

    /// Drain every action due at or before `now`, re-arming repeats.
    ///
    /// Fired actions come out in scheduling order.
    pub fn fire_due(&mut self, now: Tick) -> SmallVec<[ScheduledAction; 4]> {
        let mut fired = SmallVec::new();
        let mut remaining = Vec::with_capacity(self.entries.len());

        for mut action in self.entries.drain(..) {
            if action.due <= now {
                fired.push(action);
                if let Some(interval) = action.repeat_every {
                    action.due = now.plus_secs(interval);
                    remaining.push(action);
                }
            } else {
                remaining.push(action);
            }
        }

        self.entries = remaining;
        fired
    }

    /// Number of pending actions owned by a team.
    #[must_use]
    pub fn owned_by(&self, team: TeamId) -> usize {
        self.entries.iter().filter(|a| a.owner == team).count()
    }

    /// Total pending actions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Is the queue empty?
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop everything (new game).
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

/// What a notice reports.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum NoticeKind {
    PerkEarned,
    UnderAttack,
    Info,
}

/// An ephemeral, UI-facing notification.
///
/// Carries no state consequence if dropped; auto-dismissal is a
/// scheduled `DismissNotice` action owned by the same team.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub id: NoticeId,
    pub team: TeamId,
    pub kind: NoticeKind,
    pub text: String,
}

/// Posted notices, keyed by owning team.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct NoticeBoard {
    notices: Vec<Notice>,
    next_id: u32,
}

impl NoticeBoard {
    /// Post a notice for a team.
    pub fn post(&mut self, team: TeamId, kind: NoticeKind, text: impl Into<String>) -> NoticeId {
        let id = NoticeId::new(self.next_id);
        self.next_id += 1;
        self.notices.push(Notice {
            id,
            team,
            kind,
            text: text.into(),
        });
        id
    }

    /// Dismiss by handle. Idempotent.
    pub fn dismiss(&mut self, id: NoticeId) {
        self.notices.retain(|n| n.id != id);
    }

    /// Drop every notice for a team (turn end, removal).
    pub fn remove_team(&mut self, team: TeamId) {
        self.notices.retain(|n| n.team != team);
    }

    /// Notices currently posted for a team.
    pub fn for_team(&self, team: TeamId) -> impl Iterator<Item = &Notice> {
        self.notices.iter().filter(move |n| n.team == team)
    }

    /// All notices.
    pub fn iter(&self) -> impl Iterator<Item = &Notice> {
        self.notices.iter()
    }

    /// Drop everything (new game).
    pub fn clear(&mut self) {
        self.notices.clear();
    }
}
