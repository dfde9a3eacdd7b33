//! Terms and the term deck.
//!
//! A term is the word or phrase a team must get guessed. Terms come from
//! category pools: at game start each selected category is shuffled and a
//! prefix of it is sampled into the deck (the source of the pool does not
//! matter to the engine). Terms carry per-round completion flags so the
//! same deck is replayed across all four rounds.
//!
//! Hard difficulty injects extra "penalty terms" mid-game. A penalty term
//! is owned by the team that caused it and is gated so the owner does not
//! see it again before their next turn.

use serde::{Deserialize, Serialize};

use crate::config::RoundId;
use crate::core::{GameRng, TeamId, TermId};

/// One entry in a category pool.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryEntry {
    pub text: String,
    /// Decoy-language rendering used by the translation attack.
    pub translation_hint: Option<String>,
}

impl CategoryEntry {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            translation_hint: None,
        }
    }

    /// Attach a translation hint (builder pattern).
    #[must_use]
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.translation_hint = Some(hint.into());
        self
    }
}

/// A named, weighted pool of terms.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub name: String,
    pub entries: Vec<CategoryEntry>,
    /// Relative weight when drawing penalty terms across categories.
    pub weight: f32,
}

impl Category {
    /// Create a category from plain term texts.
    pub fn new(name: impl Into<String>, terms: Vec<String>) -> Self {
        Self {
            name: name.into(),
            entries: terms.into_iter().map(CategoryEntry::new).collect(),
            weight: 1.0,
        }
    }

    /// Create a category from prepared entries.
    pub fn from_entries(name: impl Into<String>, entries: Vec<CategoryEntry>) -> Self {
        Self {
            name: name.into(),
            entries,
            weight: 1.0,
        }
    }

    /// Set the penalty-draw weight (builder pattern).
    #[must_use]
    pub fn with_weight(mut self, weight: f32) -> Self {
        self.weight = weight;
        self
    }
}

/// A single term in the deck.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Term {
    pub id: TermId,
    pub text: String,
    pub translation_hint: Option<String>,
    /// Bitmask over `RoundId::index()`.
    completed_rounds: u8,
    /// Team that caused this penalty term, if any.
    pub owner_team: Option<TeamId>,
    /// Owner may not be served this term before reaching this turn count.
    pub available_from_turn: Option<u32>,
}

impl Term {
    /// Create a plain term (mainly useful to tests and adapters).
    pub fn new(id: TermId, text: impl Into<String>) -> Self {
        Self::from_entry(id, CategoryEntry::new(text))
    }

    /// Attach a translation hint (builder pattern).
    #[must_use]
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.translation_hint = Some(hint.into());
        self
    }

    fn from_entry(id: TermId, entry: CategoryEntry) -> Self {
        Self {
            id,
            text: entry.text,
            translation_hint: entry.translation_hint,
            completed_rounds: 0,
            owner_team: None,
            available_from_turn: None,
        }
    }

    /// Has this term been guessed in the given round?
    #[must_use]
    pub fn is_completed(&self, round: RoundId) -> bool {
        self.completed_rounds & (1 << round.index()) != 0
    }

    /// Mark this term guessed for the given round.
    pub fn mark_completed(&mut self, round: RoundId) {
        self.completed_rounds |= 1 << round.index();
    }

    /// May this term be served to `team` at its current turn count?
    ///
    /// Only penalty terms are gated, and only against their owner.
    #[must_use]
    pub fn servable_to(&self, team: TeamId, turn_counter: u32) -> bool {
        match (self.owner_team, self.available_from_turn) {
            (Some(owner), Some(from)) if owner == team => turn_counter >= from,
            _ => true,
        }
    }
}

/// Leftover entries of one category, kept for penalty-term draws.
#[derive(Clone, Debug, Serialize, Deserialize)]
struct ReservePool {
    weight: f32,
    entries: Vec<CategoryEntry>,
}

/// The game's term deck.
///
/// Built once per game by shuffle-and-prefix sampling; extended mid-game
/// only through `draw_penalty_term`.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct TermDeck {
    terms: Vec<Term>,
    reserve: Vec<ReservePool>,
    next_id: u32,
}

impl TermDeck {
    /// Build a deck from the selected categories.
    ///
    /// Each category is shuffled independently and the first
    /// `words_per_category` entries enter the deck; the remainder feeds
    /// the penalty-term reserve. The combined deck is shuffled again so
    /// categories interleave.
    #[must_use]
    pub fn build(categories: &[Category], words_per_category: usize, rng: &mut GameRng) -> Self {
        let mut deck = TermDeck::default();

        for category in categories {
            let mut entries = category.entries.clone();
            rng.shuffle(&mut entries);

            let take = words_per_category.min(entries.len());
            let rest = entries.split_off(take);

            for entry in entries {
                let id = deck.alloc_id();
                deck.terms.push(Term::from_entry(id, entry));
            }
            deck.reserve.push(ReservePool {
                weight: category.weight,
                entries: rest,
            });
        }

        rng.shuffle(&mut deck.terms);
        deck
    }

    fn alloc_id(&mut self) -> TermId {
        let id = TermId::new(self.next_id);
        self.next_id += 1;
        id
    }

    /// Number of terms currently in the deck.
    #[must_use]
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    /// Is the deck empty (game not started)?
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Look up a term.
    #[must_use]
    pub fn get(&self, id: TermId) -> Option<&Term> {
        self.terms.iter().find(|t| t.id == id)
    }

    /// Mark a term guessed for a round. Unknown IDs are ignored.
    pub fn mark_completed(&mut self, id: TermId, round: RoundId) {
        if let Some(term) = self.terms.iter_mut().find(|t| t.id == id) {
            term.mark_completed(round);
        }
    }

    /// Next term for the current turn: not completed this round, not yet
    /// seen this turn, and servable to the team.
    #[must_use]
    pub fn next_unseen(
        &self,
        round: RoundId,
        seen: &im::HashSet<TermId>,
        team: TeamId,
        turn_counter: u32,
    ) -> Option<TermId> {
        self.terms
            .iter()
            .find(|t| {
                !t.is_completed(round) && !seen.contains(&t.id) && t.servable_to(team, turn_counter)
            })
            .map(|t| t.id)
    }

    /// Count of terms not yet completed in a round.
    #[must_use]
    pub fn remaining_in_round(&self, round: RoundId) -> usize {
        self.terms.iter().filter(|t| !t.is_completed(round)).count()
    }

    /// Has every term been completed in this round?
    #[must_use]
    pub fn round_exhausted(&self, round: RoundId) -> bool {
        self.remaining_in_round(round) == 0
    }

    /// Draw a fresh penalty term from the reserve, owned by `owner` and
    /// gated until the owner's `available_from_turn`.
    ///
    /// Returns `None` when every reserve pool is exhausted; the caller
    /// simply forgoes the injection.
    pub fn draw_penalty_term(
        &mut self,
        owner: TeamId,
        available_from_turn: u32,
        rng: &mut GameRng,
    ) -> Option<TermId> {
        let weights: Vec<f32> = self
            .reserve
            .iter()
            .map(|p| if p.entries.is_empty() { 0.0 } else { p.weight })
            .collect();
        let pool_idx = rng.choose_weighted(&weights)?;

        let pool = &mut self.reserve[pool_idx];
        let entry_idx = rng.gen_range_usize(0..pool.entries.len());
        let entry = pool.entries.swap_remove(entry_idx);

        let id = self.alloc_id();
        let mut term = Term::from_entry(id, entry);
        term.owner_team = Some(owner);
        term.available_from_turn = Some(available_from_turn);
        self.terms.push(term);
        Some(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn deck_of(n: usize) -> (TermDeck, GameRng) {
        let mut rng = GameRng::new(7);
        let category = Category::new("Animals", (0..n).map(|i| format!("animal-{i}")).collect());
        let deck = TermDeck::build(&[category], n, &mut rng);
        (deck, rng)
    }

    #[test]
    fn test_build_samples_prefix() {
        let mut rng = GameRng::new(1);
        let category = Category::new("Food", (0..20).map(|i| format!("food-{i}")).collect());

        let deck = TermDeck::build(&[category], 5, &mut rng);
        assert_eq!(deck.len(), 5);
        // The other 15 entries back the penalty reserve.
        assert!(deck
            .clone()
            .draw_penalty_term(TeamId::new(0), 1, &mut rng)
            .is_some());
    }

    #[test]
    fn test_build_multiple_categories() {
        let mut rng = GameRng::new(2);
        let cats = vec![
            Category::new("A", (0..10).map(|i| format!("a{i}")).collect()),
            Category::new("B", (0..10).map(|i| format!("b{i}")).collect()),
        ];

        let deck = TermDeck::build(&cats, 4, &mut rng);
        assert_eq!(deck.len(), 8);
    }

    #[test]
    fn test_completion_is_per_round() {
        let (mut deck, _) = deck_of(3);
        let id = deck.next_unseen(RoundId::Round1, &im::HashSet::new(), TeamId::new(0), 1).unwrap();

        deck.mark_completed(id, RoundId::Round1);
        assert!(deck.get(id).unwrap().is_completed(RoundId::Round1));
        assert!(!deck.get(id).unwrap().is_completed(RoundId::Round2));
        assert_eq!(deck.remaining_in_round(RoundId::Round1), 2);
        assert_eq!(deck.remaining_in_round(RoundId::Round2), 3);
    }

    #[test]
    fn test_next_unseen_skips_seen() {
        let (deck, _) = deck_of(2);
        let team = TeamId::new(0);

        let first = deck.next_unseen(RoundId::Round1, &im::HashSet::new(), team, 1).unwrap();
        let mut seen = im::HashSet::new();
        seen.insert(first);

        let second = deck.next_unseen(RoundId::Round1, &seen, team, 1).unwrap();
        assert_ne!(first, second);

        seen.insert(second);
        assert!(deck.next_unseen(RoundId::Round1, &seen, team, 1).is_none());
    }

    #[test]
    fn test_round_exhaustion() {
        let (mut deck, _) = deck_of(2);
        let seen = im::HashSet::new();
        let team = TeamId::new(0);

        while let Some(id) = deck.next_unseen(RoundId::Round1, &seen, team, 1) {
            deck.mark_completed(id, RoundId::Round1);
        }

        assert!(deck.round_exhausted(RoundId::Round1));
        assert!(!deck.round_exhausted(RoundId::Round2));
    }

    #[test]
    fn test_penalty_term_gated_against_owner() {
        let (mut deck, mut rng) = deck_of(1);
        let owner = TeamId::new(0);
        let other = TeamId::new(1);

        // Complete the only regular term so the penalty term is the sole candidate.
        let regular = deck.next_unseen(RoundId::Round1, &im::HashSet::new(), owner, 1).unwrap();
        deck.mark_completed(regular, RoundId::Round1);

        let penalty = deck.draw_penalty_term(owner, 2, &mut rng).unwrap();
        let seen = im::HashSet::new();

        // Owner on turn 1: gated. Owner on turn 2: served. Other team: always served.
        assert_eq!(deck.next_unseen(RoundId::Round1, &seen, owner, 1), None);
        assert_eq!(deck.next_unseen(RoundId::Round1, &seen, owner, 2), Some(penalty));
        assert_eq!(deck.next_unseen(RoundId::Round1, &seen, other, 1), Some(penalty));
    }

    #[test]
    fn test_penalty_reserve_exhaustion() {
        let mut rng = GameRng::new(3);
        // words_per_category == pool size leaves an empty reserve.
        let category = Category::new("Tiny", vec!["only".into()]);
        let mut deck = TermDeck::build(&[category], 1, &mut rng);

        assert!(deck.draw_penalty_term(TeamId::new(0), 1, &mut rng).is_none());
    }

    #[test]
    fn test_translation_hint_carried() {
        let mut rng = GameRng::new(4);
        let category = Category::from_entries(
            "Hints",
            vec![CategoryEntry::new("cat").with_hint("gato")],
        );
        let deck = TermDeck::build(&[category], 1, &mut rng);

        let id = deck.next_unseen(RoundId::Round1, &im::HashSet::new(), TeamId::new(0), 1).unwrap();
        assert_eq!(deck.get(id).unwrap().translation_hint.as_deref(), Some("gato"));
    }

    #[test]
    fn test_build_is_deterministic() {
        let cats = vec![Category::new("X", (0..30).map(|i| format!("x{i}")).collect())];

        let d1 = TermDeck::build(&cats, 10, &mut GameRng::new(42));
        let d2 = TermDeck::build(&cats, 10, &mut GameRng::new(42));

        let t1: Vec<_> = d1.terms.iter().map(|t| t.text.clone()).collect();
        let t2: Vec<_> = d2.terms.iter().map(|t| t.text.clone()).collect();
        assert_eq!(t1, t2);
    }
}
