//! The game engine coordinator.
//!
//! `GameEngine` owns all mutable state: phase, roster, deck, countdown,
//! effect ledger, action queue and notices. External callers drive it
//! through a small set of operations (`start_game`, `start_turn`,
//! `tick`, `correct_guess`, `skip_term`, `wrong_guess`, `next_turn`,
//! `spin_slot`, `remove_team`) and observe it through `view()`.
//!
//! ## Phase machine
//!
//! ```text
//! Setup -> Playing -> { Setup | RoundEnd | SlotReward }
//! SlotReward -> { Setup | RoundEnd }      (resumes the deferred phase)
//! RoundEnd -> { Setup | GameEnd }
//! ```
//!
//! Operations invoked outside their valid phase are silent no-ops; the
//! presentation layer gates by observed phase. `handle_turn_end` is the
//! single choke point for ending a turn: every path that finishes a turn
//! (timer at zero, term exhaustion, team removal mid-turn) goes through
//! it, and it cancels every scheduled action, flag and notice owned by
//! the finishing team before control returns.

use log::{debug, info, warn};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::config::{GameSettings, RoundId};
use crate::core::{GameRng, TeamId, TermId, Tick};
use crate::perks::kind::{
    FREEZE_SECS, GLITCH_SECS, INVISIBLE_DELAY_SECS, MIRROR_SECS, NOTICE_SECS, PAUSE_TRAP_SECS,
    POINT_STEAL_AMOUNT, REWIND_SECS, SKIP_FREEZE_SECS, SLOW_MOTION_FLASH_SECS, SUDDEN_RUSH_SECS,
    TIME_BOMB_DRAIN, TIME_BOMB_INTERVAL_SECS, TRANSLATION_SECS, WORD_SWAP_DELAY_SECS,
};
use crate::perks::{
    legal_perk_types, should_award, ActionKind, ActionQueue, EffectLedger, EffectState,
    NoticeBoard, NoticeKind, PerkTarget, PerkType,
};
use crate::scoring::{self, MissKind, PenaltyReveal};
use crate::slots::{SlotSession, SpinResult};
use crate::team::Roster;
use crate::terms::TermDeck;
use crate::view::{self, GameView, TeamScore};

/// Authoritative game phase. Exactly one value at a time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Between turns: waiting for the next team to start.
    Setup,
    /// A turn is running and the countdown may be draining.
    Playing,
    /// All terms of the round are done; waiting to advance.
    RoundEnd,
    /// Bonus mini-game gating phase.
    SlotReward,
    /// Final scores are settled.
    GameEnd,
}

/// What happened to one term during a turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GuessKind {
    Correct,
    Skip,
    Wrong,
}

/// One entry in the guess history.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuessRecord {
    pub team: TeamId,
    pub term: TermId,
    pub round: RoundId,
    pub kind: GuessKind,
    /// Score delta applied to the visible score by this event.
    pub points: i64,
}

/// The engine. See module docs for the operation surface.
pub struct GameEngine {
    settings: GameSettings,
    shuffle_rng: GameRng,
    perk_rng: GameRng,
    slot_rng: GameRng,

    now: Tick,
    phase: GamePhase,
    round: RoundId,
    teams: Roster,
    deck: TermDeck,
    started: bool,

    current_team: Option<TeamId>,
    current_term: Option<TermId>,
    countdown: u32,
    countdown_running: bool,
    seen_this_turn: im::HashSet<TermId>,
    term_hidden: bool,
    forced_skip_pending: bool,

    ledger: EffectLedger,
    actions: ActionQueue,
    notices: NoticeBoard,
    /// Attacks earned against a team, primed at that team's next turn start.
    queued_attacks: FxHashMap<TeamId, SmallVec<[PerkType; 2]>>,

    slot_session: Option<SlotSession>,
    resume_phase: GamePhase,

    history: im::Vector<GuessRecord>,
    reveals: Vec<PenaltyReveal>,
}

impl GameEngine {
    /// Create an engine. Nothing runs until `start_game`.
    ///
    /// The seed fixes every random decision of the game: the same seed
    /// and the same operation sequence replay identically.
    #[must_use]
    pub fn new(settings: GameSettings, seed: u64) -> Self {
        let root = GameRng::new(seed);
        Self {
            shuffle_rng: root.for_context("shuffle"),
            perk_rng: root.for_context("perks"),
            slot_rng: root.for_context("slots"),
            settings,
            now: Tick::ZERO,
            phase: GamePhase::Setup,
            round: RoundId::Round1,
            teams: Roster::default(),
            deck: TermDeck::default(),
            started: false,
            current_team: None,
            current_term: None,
            countdown: 0,
            countdown_running: false,
            seen_this_turn: im::HashSet::new(),
            term_hidden: false,
            forced_skip_pending: false,
            ledger: EffectLedger::default(),
            actions: ActionQueue::default(),
            notices: NoticeBoard::default(),
            queued_attacks: FxHashMap::default(),
            slot_session: None,
            resume_phase: GamePhase::Setup,
            history: im::Vector::new(),
            reveals: Vec::new(),
        }
    }

    // === Preconditions ===

    /// Pure start-game precondition. Failing it blocks `start_game`.
    #[must_use]
    pub fn can_start_game(&self) -> bool {
        self.settings.validate().is_ok()
    }

    // === Public operations ===

    /// Validate configuration, build and shuffle the term pool, reset
    /// all scores and transient state, and enter `Setup`.
    pub fn start_game(&mut self) {
        if let Err(err) = self.settings.validate() {
            warn!("start_game blocked: {err}");
            return;
        }

        self.deck = TermDeck::build(
            &self.settings.categories,
            self.settings.words_per_category,
            &mut self.shuffle_rng,
        );
        self.teams = Roster::from_names(&self.settings.team_names);
        self.ledger.clear();
        self.actions.clear();
        self.notices.clear();
        self.queued_attacks.clear();
        self.history = im::Vector::new();
        self.reveals.clear();
        self.slot_session = None;

        self.now = Tick::ZERO;
        self.round = RoundId::Round1;
        self.current_team = self.teams.first();
        self.current_term = None;
        self.countdown = 0;
        self.countdown_running = false;
        self.started = true;
        self.set_phase(GamePhase::Setup);

        info!(
            "game started: {} teams, {} terms, {:?}/{:?}",
            self.teams.len(),
            self.deck.len(),
            self.settings.difficulty,
            self.settings.mode
        );
    }

    /// Start the incoming team's turn: reset the seen set, prime attacks
    /// queued for them, start the countdown and enter `Playing`.
    ///
    /// No-op outside `Setup`.
    pub fn start_turn(&mut self) {
        if self.phase != GamePhase::Setup || !self.started {
            return;
        }
        let Some(team_id) = self.current_team else {
            return;
        };

        self.seen_this_turn = im::HashSet::new();
        self.term_hidden = false;
        self.forced_skip_pending = false;
        if let Some(team) = self.teams.get_mut(team_id) {
            team.turn_counter += 1;
        }

        // Attacks queued by the previous team land before the first term
        // is shown.
        if let Some(attacks) = self.queued_attacks.remove(&team_id) {
            for perk in attacks {
                self.prime_attack(team_id, perk);
            }
        }

        self.countdown = self.settings.turn_seconds;
        self.countdown_running = !self.round.defers_countdown();
        self.set_phase(GamePhase::Playing);
        debug!("turn started for {team_id} in {}", self.round);

        self.advance_term();

        if self.phase == GamePhase::Playing && self.forced_skip_pending {
            self.forced_skip_pending = false;
            self.apply_forced_skip();
        }
    }

    /// Advance the logical clock by one second.
    ///
    /// Services due scheduled actions, then runs the countdown: frozen
    /// teams don't drain, sudden-rush teams drain double, zero ends the
    /// turn. No-op outside `Playing`.
    pub fn tick(&mut self) {
        if self.phase != GamePhase::Playing {
            return;
        }
        self.now.advance();

        let Some(team_id) = self.current_team else {
            return;
        };
        self.ledger.sweep(team_id, self.now);

        for action in self.actions.fire_due(self.now) {
            match action.kind {
                ActionKind::DismissNotice(id) => self.notices.dismiss(id),
                // Team-owned effects only apply while the owner is the
                // playing team; a fired leftover is dropped harmlessly.
                _ if self.phase != GamePhase::Playing
                    || self.current_team != Some(action.owner) =>
                {
                    self.actions.cancel(action.id);
                }
                ActionKind::SwapWord => {
                    debug!("word swap fires on {}", action.owner);
                    if let Some(term) = self.current_term {
                        self.seen_this_turn.insert(term);
                        self.advance_term();
                    }
                }
                ActionKind::HideWord => {
                    debug!("invisible word fires on {}", action.owner);
                    self.term_hidden = true;
                }
                ActionKind::BombTick => {
                    if let Some(team) = self.teams.get_mut(action.owner) {
                        team.add_points(self.round, -TIME_BOMB_DRAIN);
                        debug!("time bomb drains {} by {TIME_BOMB_DRAIN}", action.owner);
                    }
                }
            }
        }

        if self.phase != GamePhase::Playing || !self.countdown_running {
            return;
        }

        // The countdown reads the ledger flags but never writes them.
        let effects = self.ledger.state(team_id);
        if effects.is_frozen(self.now) {
            return;
        }
        let drain = if effects.is_sudden_rush(self.now) { 2 } else { 1 };
        self.countdown = self.countdown.saturating_sub(drain);
        if self.countdown == 0 {
            self.handle_turn_end();
        }
    }

    /// Record a correct guess on the current term.
    ///
    /// Applies base points and multipliers, the queued pause-trap time
    /// penalty, the rewind time bonus, streak/combo accounting and perk
    /// awarding, then advances to the next unseen term (or ends the turn
    /// if none remain). No-op outside `Playing`.
    pub fn correct_guess(&mut self) {
        if self.phase != GamePhase::Playing {
            return;
        }
        let (Some(team_id), Some(term_id)) = (self.current_team, self.current_term) else {
            return;
        };

        // A deferred countdown arms on the first guess event.
        self.countdown_running = true;

        let outcome = scoring::score_correct_guess(self.ledger.state_mut(team_id), self.now);

        if let Some(team) = self.teams.get_mut(team_id) {
            team.add_points(self.round, outcome.total_points());
            team.hit_streak += 1;
        }
        self.countdown = self
            .countdown
            .saturating_sub(outcome.time_penalty_secs)
            .saturating_add(outcome.time_bonus_secs.max(0) as u32);

        self.deck.mark_completed(term_id, self.round);
        self.history.push_back(GuessRecord {
            team: team_id,
            term: term_id,
            round: self.round,
            kind: GuessKind::Correct,
            points: outcome.total_points(),
        });

        self.maybe_award_perk(team_id);

        if self.countdown == 0 {
            // The pause trap drained the rest of the clock.
            self.handle_turn_end();
        } else {
            self.advance_term();
        }
    }

    /// Skip the current term.
    ///
    /// Silent no-op when the round forbids skipping or a skip freeze is
    /// active. Otherwise a shield charge absorbs the penalty, or the
    /// difficulty's policy applies. Resets streak and combo.
    pub fn skip_term(&mut self) {
        if self.phase != GamePhase::Playing || !self.round.can_skip() {
            return;
        }
        let (Some(team_id), Some(term_id)) = (self.current_team, self.current_term) else {
            return;
        };
        if self.ledger.state(team_id).is_skip_frozen(self.now) {
            debug!("skip blocked for {team_id}: skip freeze active");
            return;
        }

        self.countdown_running = true;
        self.record_miss(team_id, term_id, MissKind::Skip);
    }

    /// Record a wrong guess on the current term.
    ///
    /// Shield/penalty handling as for a skip; at hard difficulty an
    /// unshielded wrong guess also injects a fresh penalty term that the
    /// guessing team cannot be served before its next turn.
    pub fn wrong_guess(&mut self) {
        if self.phase != GamePhase::Playing {
            return;
        }
        let (Some(team_id), Some(term_id)) = (self.current_team, self.current_term) else {
            return;
        };

        self.countdown_running = true;
        self.record_miss(team_id, term_id, MissKind::WrongGuess);
    }

    /// Advance out of `RoundEnd` (next round, or reveal penalties and
    /// finish the game after the final round) or out of `SlotReward`
    /// (finish/skip the bonus game and resume the deferred phase).
    ///
    /// No-op in other phases.
    pub fn next_turn(&mut self) {
        match self.phase {
            GamePhase::RoundEnd => match self.round.next() {
                Some(next) => {
                    self.round = next;
                    self.set_phase(GamePhase::Setup);
                    info!("advancing to {next}");
                }
                None => {
                    self.reveals = scoring::reveal_pending(&mut self.teams);
                    self.set_phase(GamePhase::GameEnd);
                    for team in self.teams.iter() {
                        info!(
                            "final score for {}: {}",
                            team.name,
                            team.final_score(self.settings.mode)
                        );
                    }
                }
            },
            GamePhase::SlotReward => {
                // Explicit finish/skip; unspent credits are forfeited.
                self.slot_session = None;
                self.set_phase(self.resume_phase);
            }
            _ => {}
        }
    }

    /// Spin the slot machine once. Returns `None` when not in
    /// `SlotReward` or when no credits remain (finish with `next_turn`).
    pub fn spin_slot(&mut self) -> Option<SpinResult> {
        if self.phase != GamePhase::SlotReward {
            return None;
        }
        let session = self.slot_session.as_mut()?;
        let result = session.spin(&mut self.slot_rng)?;
        let team = session.team;

        if let Some(team) = self.teams.get_mut(team) {
            team.add_points(self.round, result.delta);
        }
        debug!(
            "slot spin for {team}: {} ({} credits left)",
            if result.won { "win" } else { "loss" },
            result.credits_left
        );
        Some(result)
    }

    /// Remove a team mid-game, purging every per-team entry from every
    /// scheduler map. Ends the team's turn first if it is playing.
    pub fn remove_team(&mut self, team_id: TeamId) {
        if self.teams.get(team_id).is_none() {
            return;
        }

        if self.phase == GamePhase::Playing && self.current_team == Some(team_id) {
            self.handle_turn_end();
        }
        if self
            .slot_session
            .as_ref()
            .is_some_and(|s| s.team == team_id)
        {
            self.slot_session = None;
            self.set_phase(self.resume_phase);
        }

        self.actions.cancel_owned_by(team_id);
        self.notices.remove_team(team_id);
        self.ledger.remove_team(team_id);
        self.queued_attacks.remove(&team_id);
        self.teams.remove(team_id);

        if self.current_team == Some(team_id) {
            self.current_team = self.teams.after(team_id);
        }
        if self.teams.is_empty() && self.started {
            self.set_phase(GamePhase::GameEnd);
        }
        info!("removed {team_id}");
    }

    // === Observable state ===

    /// Build the observable snapshot for the presentation layer.
    #[must_use]
    pub fn view(&self) -> GameView {
        let effects = self
            .current_team
            .map(|t| self.ledger.state(t))
            .unwrap_or_default();

        let display_term = match (self.phase, self.current_term) {
            (GamePhase::Playing, Some(id)) => self
                .deck
                .get(id)
                .map(|t| view::display_text(t, &effects, self.term_hidden, self.now)),
            _ => None,
        };

        let badges = if self.phase == GamePhase::Playing {
            view::badges(&effects, self.term_hidden, self.now)
        } else {
            Vec::new()
        };

        let scores = self
            .teams
            .iter()
            .map(|team| TeamScore {
                id: team.id,
                name: team.name.clone(),
                total: team.total_score(),
                final_score: (self.phase == GamePhase::GameEnd)
                    .then(|| team.final_score(self.settings.mode)),
            })
            .collect();

        let slot_credits = match &self.slot_session {
            Some(session) => session.credits(),
            None => effects.slot_credits,
        };

        GameView {
            phase: self.phase,
            round: self.round,
            countdown: self.countdown,
            current_team: self.current_team,
            display_term,
            badges,
            notices: self.notices.iter().cloned().collect(),
            scores,
            slot_credits,
        }
    }

    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    /// Current round.
    #[must_use]
    pub fn round(&self) -> RoundId {
        self.round
    }

    /// Current logical time.
    #[must_use]
    pub fn now(&self) -> Tick {
        self.now
    }

    /// Seconds left on the shared countdown.
    #[must_use]
    pub fn countdown(&self) -> u32 {
        self.countdown
    }

    /// Team whose turn it is (or is next).
    #[must_use]
    pub fn current_team(&self) -> Option<TeamId> {
        self.current_team
    }

    /// The active term, if a turn is running.
    #[must_use]
    pub fn current_term(&self) -> Option<TermId> {
        self.current_term
    }

    /// Team roster access.
    #[must_use]
    pub fn teams(&self) -> &Roster {
        &self.teams
    }

    /// A team's effect state (default record when none is set).
    #[must_use]
    pub fn effect_state(&self, team: TeamId) -> EffectState {
        self.ledger.state(team)
    }

    /// Number of scheduled actions owned by a team.
    #[must_use]
    pub fn scheduled_actions_for(&self, team: TeamId) -> usize {
        self.actions.owned_by(team)
    }

    /// Number of notices posted for a team.
    #[must_use]
    pub fn notices_for(&self, team: TeamId) -> usize {
        self.notices.for_team(team).count()
    }

    /// Attacks queued against a team, awaiting its next turn.
    #[must_use]
    pub fn queued_attacks_for(&self, team: TeamId) -> usize {
        self.queued_attacks.get(&team).map_or(0, SmallVec::len)
    }

    /// Does the engine hold any transient state keyed by this team?
    /// Cleanup tests assert this goes false on removal.
    #[must_use]
    pub fn has_team_state(&self, team: TeamId) -> bool {
        self.ledger.has_state(team)
            || self.actions.owned_by(team) > 0
            || self.notices.for_team(team).next().is_some()
            || self.queued_attacks.contains_key(&team)
    }

    /// Guess history, oldest first.
    #[must_use]
    pub fn history(&self) -> &im::Vector<GuessRecord> {
        &self.history
    }

    /// Deferred-penalty reveal snapshots, populated at game end.
    #[must_use]
    pub fn penalty_reveals(&self) -> &[PenaltyReveal] {
        &self.reveals
    }

    // === Internals ===

    fn set_phase(&mut self, phase: GamePhase) {
        if self.phase != phase {
            debug!("phase {:?} -> {:?}", self.phase, phase);
            self.phase = phase;
        }
    }

    /// Move to the next unseen term, or fall through to turn end when
    /// the team has no legal term left.
    fn advance_term(&mut self) {
        self.term_hidden = false;
        let Some(team_id) = self.current_team else {
            return;
        };
        let turn_counter = self.teams.get(team_id).map_or(0, |t| t.turn_counter);

        match self
            .deck
            .next_unseen(self.round, &self.seen_this_turn, team_id, turn_counter)
        {
            Some(id) => self.current_term = Some(id),
            None => {
                self.current_term = None;
                self.handle_turn_end();
            }
        }
    }

    /// Shared skip/wrong-guess path.
    fn record_miss(&mut self, team_id: TeamId, term_id: TermId, kind: MissKind) {
        let outcome = scoring::score_miss(
            self.ledger.state_mut(team_id),
            kind,
            self.settings.difficulty,
        );

        let mut points = 0;
        if let Some(team) = self.teams.get_mut(team_id) {
            if outcome.immediate_penalty > 0 {
                team.add_points(self.round, -outcome.immediate_penalty);
                points = -outcome.immediate_penalty;
            }
            if outcome.deferred_penalty > 0 {
                team.defer_penalty(self.round, outcome.deferred_penalty);
            }
            team.hit_streak = 0;
        }
        self.ledger.state_mut(team_id).reset_combo();

        if outcome.inject_penalty_term {
            let next_turn = self.teams.get(team_id).map_or(1, |t| t.turn_counter + 1);
            if let Some(id) = self
                .deck
                .draw_penalty_term(team_id, next_turn, &mut self.shuffle_rng)
            {
                debug!("penalty term {id} injected for {team_id}");
            }
        }

        self.seen_this_turn.insert(term_id);
        self.history.push_back(GuessRecord {
            team: team_id,
            term: term_id,
            round: self.round,
            kind: match kind {
                MissKind::Skip => GuessKind::Skip,
                MissKind::WrongGuess => GuessKind::Wrong,
            },
            points,
        });

        self.advance_term();
    }

    /// The single choke point for ending a turn.
    fn handle_turn_end(&mut self) {
        if self.phase != GamePhase::Playing {
            return;
        }
        let Some(team_id) = self.current_team else {
            return;
        };

        self.countdown = 0;
        self.countdown_running = false;
        self.current_term = None;
        self.term_hidden = false;
        self.forced_skip_pending = false;

        // Flush everything keyed by the finishing team before the phase
        // moves on. Banked slot credits transfer into the bonus phase.
        self.actions.cancel_owned_by(team_id);
        self.notices.remove_team(team_id);
        let credits = {
            let state = self.ledger.state_mut(team_id);
            std::mem::take(&mut state.slot_credits)
        };
        self.ledger.flush_turn(team_id);
        if let Some(team) = self.teams.get_mut(team_id) {
            team.hit_streak = 0;
        }

        let next_phase = if self.deck.round_exhausted(self.round) {
            GamePhase::RoundEnd
        } else {
            GamePhase::Setup
        };
        self.current_team = self.teams.after(team_id);

        if credits > 0 {
            self.slot_session = Some(SlotSession::new(team_id, credits));
            self.resume_phase = next_phase;
            self.set_phase(GamePhase::SlotReward);
            info!("turn ended for {team_id}; {credits} slot credit(s) to spin");
        } else {
            self.set_phase(next_phase);
            debug!("turn ended for {team_id}");
        }
    }

    /// Check streak thresholds and award one perk if due.
    fn maybe_award_perk(&mut self, team_id: TeamId) {
        let streak = self.teams.get(team_id).map_or(0, |t| t.hit_streak);
        let effects = self.ledger.state(team_id);
        let perks = &self.settings.perks;

        if !should_award(
            perks.enabled,
            &perks.packs,
            effects.perks_this_turn,
            self.settings.mode,
            streak,
        ) {
            return;
        }

        let legal = legal_perk_types(&perks.packs, self.round.can_skip(), effects.last_perk);
        let Some(&perk) = self.perk_rng.choose(&legal) else {
            return;
        };
        self.apply_perk(team_id, perk);
    }

    /// Apply an awarded perk: self-perks take effect now, attacks queue
    /// against the next team (point steal transfers immediately).
    fn apply_perk(&mut self, team_id: TeamId, perk: PerkType) {
        info!("{team_id} earned perk: {perk}");
        {
            let state = self.ledger.state_mut(team_id);
            state.last_perk = Some(perk);
            state.perks_this_turn += 1;
        }

        match perk {
            PerkType::DoubleScore => {
                self.ledger.state_mut(team_id).next_word_multiplier = Some(2);
            }
            PerkType::TurnMultiplier => {
                self.ledger.state_mut(team_id).turn_multiplier = Some(2);
            }
            PerkType::Shield => {
                self.ledger.state_mut(team_id).shield_charges += 1;
            }
            PerkType::TimeFreeze => {
                let until = self.now.plus_secs(FREEZE_SECS);
                let state = self.ledger.state_mut(team_id);
                state.frozen_until = Some(until);
                state.slow_motion_flash_until =
                    Some(self.now.plus_secs(SLOW_MOTION_FLASH_SECS));
            }
            PerkType::Rewind => {
                self.ledger.state_mut(team_id).rewind_until =
                    Some(self.now.plus_secs(REWIND_SECS));
            }
            PerkType::Combo => {
                let state = self.ledger.state_mut(team_id);
                state.combo_active = true;
                state.combo_counter = 0;
            }
            PerkType::SlotSpin => {
                self.ledger.state_mut(team_id).slot_credits += 1;
            }
            PerkType::PointSteal => {
                if let Some(victim) = self.next_victim(team_id) {
                    if let Some(team) = self.teams.get_mut(victim) {
                        team.add_points(self.round, -POINT_STEAL_AMOUNT);
                    }
                    if let Some(team) = self.teams.get_mut(team_id) {
                        team.add_points(self.round, POINT_STEAL_AMOUNT);
                    }
                }
            }
            _ => {
                if let Some(victim) = self.next_victim(team_id) {
                    self.queued_attacks.entry(victim).or_default().push(perk);
                    debug!("{perk} queued against {victim}");
                }
            }
        }

        self.post_notice(team_id, NoticeKind::PerkEarned, perk.label());
        if perk.target() == PerkTarget::NextTeam {
            self.post_notice(
                team_id,
                NoticeKind::UnderAttack,
                format!("{} hits the next team", perk.label()),
            );
        }
    }

    /// The next team in turn order, or `None` when the earner would only
    /// hit itself.
    fn next_victim(&self, earner: TeamId) -> Option<TeamId> {
        self.teams.after(earner).filter(|&v| v != earner)
    }

    /// Arm a queued attack against the incoming team, relative to its
    /// turn start.
    fn prime_attack(&mut self, victim: TeamId, perk: PerkType) {
        debug!("priming {perk} on {victim}");
        match perk {
            PerkType::WordSwap => {
                self.actions
                    .schedule_in(victim, ActionKind::SwapWord, self.now, WORD_SWAP_DELAY_SECS);
            }
            PerkType::InvisibleWord => {
                self.actions
                    .schedule_in(victim, ActionKind::HideWord, self.now, INVISIBLE_DELAY_SECS);
            }
            PerkType::TimeBomb => {
                self.actions.schedule_repeating(
                    victim,
                    ActionKind::BombTick,
                    self.now,
                    TIME_BOMB_INTERVAL_SECS,
                );
            }
            PerkType::Translation => {
                self.ledger.state_mut(victim).translation_until =
                    Some(self.now.plus_secs(TRANSLATION_SECS));
            }
            PerkType::SkipFreeze => {
                self.ledger.state_mut(victim).skip_frozen_until =
                    Some(self.now.plus_secs(SKIP_FREEZE_SECS));
            }
            PerkType::Glitch => {
                self.ledger.state_mut(victim).glitch_until =
                    Some(self.now.plus_secs(GLITCH_SECS));
            }
            PerkType::Mirror => {
                self.ledger.state_mut(victim).mirror_until =
                    Some(self.now.plus_secs(MIRROR_SECS));
            }
            PerkType::SuddenRush => {
                self.ledger.state_mut(victim).sudden_rush_until =
                    Some(self.now.plus_secs(SUDDEN_RUSH_SECS));
            }
            PerkType::PauseTrap => {
                self.ledger.state_mut(victim).pending_time_penalty = PAUSE_TRAP_SECS;
            }
            PerkType::ForcedSkip => {
                self.forced_skip_pending = true;
            }
            // Self-targeted perks are never queued.
            _ => {}
        }
    }

    /// Consume the victim's first term penalty-free (the forced skip is
    /// the attacker's doing, not the victim's choice).
    fn apply_forced_skip(&mut self) {
        let Some(term_id) = self.current_term else {
            return;
        };
        debug!("forced skip consumes {term_id}");
        self.seen_this_turn.insert(term_id);
        self.advance_term();
    }

    fn post_notice(&mut self, team: TeamId, kind: NoticeKind, text: impl Into<String>) {
        let id = self.notices.post(team, kind, text);
        self.actions
            .schedule_in(team, ActionKind::DismissNotice(id), self.now, NOTICE_SECS);
    }
}
