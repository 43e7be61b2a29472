//! Game state module - the authoritative state of one play session
//!
//! This module ties together the board, the deck generator and the timed effect
//! queue. It owns the selection cycle (select, evaluate, resolve), scoring,
//! completion and restarts, and exposes them as synchronous transitions plus a
//! virtual clock ([`GameState::tick`]) that fires delayed effects.
//!
//! Nothing here performs I/O. Audio and speech requests are collected as
//! [`Cue`]s and handed out through [`GameState::drain_cues`].

use arrayvec::ArrayVec;
use log::{debug, info};

use crate::board::{step_focus, Board, Tile};
use crate::rng::{deal_deck, SimpleRng};
use crate::schedule::{Effect, Scheduled, Scheduler};
use crate::snapshot::{GameSnapshot, TileSnapshot};
use crate::types::*;

/// Where the current selection cycle stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TurnPhase {
    /// No tile selected.
    Idle,
    /// One tile revealed, waiting for its partner.
    OneSelected,
    /// Two tiles selected, resolution pending.
    Evaluating,
    /// All pairs matched; only restart (and help) is meaningful.
    Complete,
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    board: Board,
    /// Indices selected in the current cycle, in selection order.
    selected: ArrayVec<usize, 2>,
    score: u32,
    matches: u8,
    focus: usize,
    complete: bool,
    /// Monotonic game instance id (increments on every new game).
    generation: u32,
    rng: SimpleRng,
    /// Virtual time, advanced only by `tick`.
    clock_ms: u64,
    scheduler: Scheduler,
    /// Cues emitted since the last drain.
    cues: Vec<Cue>,
}

impl GameState {
    /// Create a session with the given RNG seed and deal the first game.
    pub fn new(seed: u32) -> Self {
        let mut rng = SimpleRng::new(seed);
        let deck = deal_deck(&mut rng);
        Self::start(rng, deck)
    }

    /// Create a session whose first game uses `deck` in board order.
    ///
    /// Restarts deal from the seeded RNG as usual.
    pub fn with_deck(seed: u32, deck: [SoundId; TILE_COUNT]) -> Self {
        Self::start(SimpleRng::new(seed), deck)
    }

    fn start(rng: SimpleRng, deck: [SoundId; TILE_COUNT]) -> Self {
        let mut state = Self {
            board: Board::from_deck(deck),
            selected: ArrayVec::new(),
            score: 0,
            matches: 0,
            focus: 0,
            complete: false,
            generation: 0,
            rng,
            clock_ms: 0,
            scheduler: Scheduler::new(),
            cues: Vec::with_capacity(8),
        };
        state.begin_generation(deck);
        state
    }

    /// Replace the game wholesale with a freshly dealt one.
    ///
    /// Effects still queued for the previous game are not removed; they are
    /// dropped when they come due because their generation no longer matches.
    pub fn new_game(&mut self) {
        let deck = deal_deck(&mut self.rng);
        self.begin_generation(deck);
    }

    fn begin_generation(&mut self, deck: [SoundId; TILE_COUNT]) {
        self.generation = self.generation.wrapping_add(1);
        self.board = Board::from_deck(deck);
        self.selected.clear();
        self.score = 0;
        self.matches = 0;
        self.focus = 0;
        self.complete = false;
        info!("new game: generation={} deck={:?}", self.generation, deck);
        self.schedule(
            INTRO_ANNOUNCE_DELAY_MS,
            Effect::Cue(Cue::Speak(Announcement::Intro)),
        );
    }

    pub fn tiles(&self) -> &[Tile; TILE_COUNT] {
        self.board.tiles()
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn selected(&self) -> &[usize] {
        &self.selected
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn matches(&self) -> u8 {
        self.matches
    }

    pub fn focus(&self) -> usize {
        self.focus
    }

    pub fn is_complete(&self) -> bool {
        self.complete
    }

    pub fn generation(&self) -> u32 {
        self.generation
    }

    pub fn seed(&self) -> u32 {
        self.rng.seed()
    }

    pub fn clock_ms(&self) -> u64 {
        self.clock_ms
    }

    /// Number of queued effects, stale ones included.
    pub fn pending_effects(&self) -> usize {
        self.scheduler.len()
    }

    pub fn phase(&self) -> TurnPhase {
        if self.complete {
            return TurnPhase::Complete;
        }
        match self.selected.len() {
            0 => TurnPhase::Idle,
            1 => TurnPhase::OneSelected,
            _ => TurnPhase::Evaluating,
        }
    }

    /// Apply a player action. Returns whether it was accepted.
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        let accepted = match action {
            GameAction::MoveFocus(direction) => self.move_focus(direction),
            GameAction::SelectFocused => self.select(self.focus),
            GameAction::Select(index) => self.select(index),
            GameAction::Restart => {
                self.new_game();
                true
            }
            GameAction::Help => {
                self.cues.push(Cue::Speak(Announcement::Help));
                true
            }
        };
        if !accepted {
            debug!("ignored {} in phase {:?}", action, self.phase());
        }
        accepted
    }

    /// Move the keyboard focus, clamped to the board.
    ///
    /// Ignored once the game is complete. When the focus actually lands on
    /// another tile, a position tone plays and the tile's label is spoken
    /// right away so its state can be heard before selecting it.
    pub fn move_focus(&mut self, direction: Direction) -> bool {
        if self.complete {
            return false;
        }
        let next = step_focus(self.focus, direction);
        if next != self.focus {
            self.focus = next;
            let (row, col) = tile_position(next);
            self.cues.push(Cue::Tone(ToneCue::Position {
                row: row as u8,
                col: col as u8,
            }));
            self.cues.push(Cue::Speak(Announcement::Focus {
                row: row as u8 + 1,
                col: col as u8 + 1,
                state: self.tile_state(next),
            }));
        }
        true
    }

    /// State of tile `index` as a player would hear it.
    pub fn tile_state(&self, index: usize) -> TileState {
        let matched = self.board.get(index).is_some_and(|t| t.matched);
        TileState::of(matched, self.selected.contains(&index))
    }

    /// Select tile `index`, starting or completing a selection cycle.
    ///
    /// Silently refused when the tile does not exist, is matched, is already
    /// selected, or a pair is still being evaluated.
    pub fn select(&mut self, index: usize) -> bool {
        let Some(tile) = self.board.get(index) else {
            return false;
        };
        if tile.matched || self.selected.contains(&index) || self.selected.is_full() {
            return false;
        }
        let sound = tile.sound;

        if let Some(tile) = self.board.get_mut(index) {
            tile.revealed = true;
        }
        self.selected.push(index);
        self.cues.push(Cue::Tone(ToneCue::TileSound(sound)));

        let (row, col) = tile_position(index);
        self.schedule(
            POSITION_ANNOUNCE_DELAY_MS,
            Effect::Cue(Cue::Speak(Announcement::TilePosition {
                row: row as u8 + 1,
                col: col as u8 + 1,
            })),
        );

        if let [first, second] = self.selected[..] {
            self.schedule(RESOLVE_DELAY_MS, Effect::Resolve { first, second });
        }
        true
    }

    /// Advance the virtual clock and fire every effect that comes due.
    ///
    /// Effects scheduled while firing are timed from the firing effect's own
    /// due time, so a single large tick is equivalent to many small ones.
    /// Returns the number of effects that fired for the current generation.
    pub fn tick(&mut self, elapsed_ms: u32) -> usize {
        self.clock_ms += elapsed_ms as u64;
        let mut fired = 0;
        while let Some(entry) = self.scheduler.pop_due(self.clock_ms) {
            if entry.generation != self.generation {
                debug!(
                    "dropped stale {:?} from generation {} (current {})",
                    entry.effect, entry.generation, self.generation
                );
                continue;
            }
            self.fire(entry);
            fired += 1;
        }
        fired
    }

    /// Take every cue emitted since the last call, in emission order.
    pub fn drain_cues(&mut self) -> std::vec::Drain<'_, Cue> {
        self.cues.drain(..)
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        for (slot, tile) in out.tiles.iter_mut().zip(self.board.tiles()) {
            *slot = TileSnapshot {
                sound: tile.sound,
                revealed: tile.revealed,
                matched: tile.matched,
                selected: self.selected.contains(&tile.id),
            };
        }
        out.score = self.score;
        out.matches = self.matches;
        out.focus = self.focus;
        out.complete = self.complete;
        out.phase = self.phase();
        out.generation = self.generation;
        out.seed = self.rng.seed();
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    fn schedule(&mut self, delay_ms: u32, effect: Effect) {
        self.scheduler
            .schedule(self.clock_ms, delay_ms, self.generation, effect);
    }

    fn fire(&mut self, entry: Scheduled) {
        match entry.effect {
            Effect::Cue(cue) => self.cues.push(cue),
            Effect::Resolve { first, second } => self.resolve(entry.fire_at_ms, first, second),
        }
    }

    fn resolve(&mut self, now_ms: u64, first: usize, second: usize) {
        let (Some(a), Some(b)) = (self.board.get(first), self.board.get(second)) else {
            return;
        };
        let is_match = a.sound == b.sound;
        let sound = a.sound;

        for index in [first, second] {
            if let Some(tile) = self.board.get_mut(index) {
                if is_match {
                    tile.matched = true;
                } else {
                    tile.revealed = false;
                }
            }
        }
        self.selected.clear();
        self.cues.push(Cue::Tone(ToneCue::Feedback { correct: is_match }));

        let verdict = if is_match {
            self.matches += 1;
            self.score += POINTS_PER_MATCH;
            Announcement::Match(sound)
        } else {
            Announcement::Mismatch
        };
        debug!(
            "resolved {}/{}: match={} score={} matches={}",
            first, second, is_match, self.score, self.matches
        );
        self.scheduler.schedule(
            now_ms,
            FEEDBACK_SPEECH_DELAY_MS,
            self.generation,
            Effect::Cue(Cue::Speak(verdict)),
        );

        if is_match && self.matches == PAIR_COUNT {
            self.complete = true;
            info!("game complete: generation={} score={}", self.generation, self.score);
            self.scheduler.schedule(
                now_ms,
                COMPLETION_ANNOUNCE_DELAY_MS,
                self.generation,
                Effect::Cue(Cue::Speak(Announcement::Complete { score: self.score })),
            );
        }
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::{is_valid_deck, SORTED_DECK};

    /// Deck `[1,1,2,2,3,3]` in board order.
    fn sorted_game() -> GameState {
        let mut state = GameState::with_deck(12345, SORTED_DECK);
        state.tick(0);
        state.drain_cues().for_each(drop);
        state
    }

    fn cues(state: &mut GameState) -> Vec<Cue> {
        state.drain_cues().collect()
    }

    fn match_pair(state: &mut GameState, a: usize, b: usize) {
        assert!(state.select(a));
        assert!(state.select(b));
        state.tick(RESOLVE_DELAY_MS);
    }

    #[test]
    fn test_new_game_state() {
        let state = GameState::new(12345);

        assert_eq!(state.score, 0);
        assert_eq!(state.matches, 0);
        assert_eq!(state.focus, 0);
        assert!(!state.complete);
        assert!(state.selected.is_empty());
        assert_eq!(state.generation, 1);
        assert_eq!(state.phase(), TurnPhase::Idle);
        assert!(is_valid_deck(&state.board.deck()));
    }

    #[test]
    fn test_intro_is_scheduled_not_immediate() {
        let mut state = GameState::new(12345);
        assert!(cues(&mut state).is_empty());
        assert_eq!(state.pending_effects(), 1);

        assert_eq!(state.tick(0), 1);
        assert_eq!(cues(&mut state), vec![Cue::Speak(Announcement::Intro)]);
    }

    #[test]
    fn test_select_reveals_and_plays_sound() {
        let mut state = sorted_game();

        assert!(state.select(2));
        assert!(state.tiles()[2].revealed);
        assert_eq!(state.selected(), &[2]);
        assert_eq!(state.phase(), TurnPhase::OneSelected);
        assert_eq!(cues(&mut state), vec![Cue::Tone(ToneCue::TileSound(SoundId::Cat))]);
    }

    #[test]
    fn test_position_announced_after_delay() {
        let mut state = sorted_game();
        state.select(4);
        cues(&mut state);

        state.tick(POSITION_ANNOUNCE_DELAY_MS - 1);
        assert!(cues(&mut state).is_empty());

        state.tick(1);
        assert_eq!(
            cues(&mut state),
            vec![Cue::Speak(Announcement::TilePosition { row: 2, col: 2 })]
        );
    }

    #[test]
    fn test_matching_pair() {
        let mut state = sorted_game();

        assert!(state.select(0));
        assert!(state.select(1));
        assert_eq!(state.phase(), TurnPhase::Evaluating);

        // Nothing settles before the resolution delay.
        state.tick(RESOLVE_DELAY_MS - 1);
        assert!(!state.tiles()[0].matched);
        assert_eq!(state.selected().len(), 2);

        state.tick(1);
        assert!(state.tiles()[0].matched);
        assert!(state.tiles()[1].matched);
        assert_eq!(state.matches(), 1);
        assert_eq!(state.score(), 10);
        assert!(state.selected().is_empty());
        assert_eq!(state.phase(), TurnPhase::Idle);
    }

    #[test]
    fn test_match_cue_sequence() {
        let mut state = sorted_game();
        state.select(0);
        state.select(1);
        state.tick(RESOLVE_DELAY_MS);

        assert_eq!(
            cues(&mut state),
            vec![
                Cue::Tone(ToneCue::TileSound(SoundId::Dog)),
                Cue::Tone(ToneCue::TileSound(SoundId::Dog)),
                Cue::Speak(Announcement::TilePosition { row: 1, col: 1 }),
                Cue::Speak(Announcement::TilePosition { row: 1, col: 2 }),
                Cue::Tone(ToneCue::Feedback { correct: true }),
            ]
        );

        state.tick(FEEDBACK_SPEECH_DELAY_MS);
        assert_eq!(
            cues(&mut state),
            vec![Cue::Speak(Announcement::Match(SoundId::Dog))]
        );
    }

    #[test]
    fn test_mismatched_pair() {
        let mut state = sorted_game();

        state.select(0);
        state.select(2);
        state.tick(RESOLVE_DELAY_MS + FEEDBACK_SPEECH_DELAY_MS);

        assert!(!state.tiles()[0].revealed);
        assert!(!state.tiles()[2].revealed);
        assert!(!state.tiles()[0].matched);
        assert!(!state.tiles()[2].matched);
        assert!(state.selected().is_empty());
        assert_eq!(state.score(), 0);
        assert_eq!(state.matches(), 0);

        let emitted = cues(&mut state);
        assert!(emitted.contains(&Cue::Tone(ToneCue::Feedback { correct: false })));
        assert_eq!(emitted.last(), Some(&Cue::Speak(Announcement::Mismatch)));
    }

    #[test]
    fn test_selecting_matched_tile_is_noop() {
        let mut state = sorted_game();
        match_pair(&mut state, 0, 1);
        cues(&mut state);

        assert!(!state.select(0));
        assert!(state.selected().is_empty());
        assert_eq!(state.score(), 10);
        assert_eq!(state.matches(), 1);
        assert!(cues(&mut state).is_empty());
    }

    #[test]
    fn test_selecting_same_tile_twice_is_noop() {
        let mut state = sorted_game();
        assert!(state.select(3));
        assert!(!state.select(3));
        assert_eq!(state.selected(), &[3]);
    }

    #[test]
    fn test_out_of_range_select_is_noop() {
        let mut state = sorted_game();
        assert!(!state.apply_action(GameAction::Select(6)));
        assert!(state.selected().is_empty());
    }

    #[test]
    fn test_third_selection_refused_while_evaluating() {
        let mut state = sorted_game();
        state.select(0);
        state.select(2);
        assert!(!state.select(4));
        assert!(!state.tiles()[4].revealed);
        assert_eq!(state.selected(), &[0, 2]);

        state.tick(RESOLVE_DELAY_MS);
        assert!(state.select(4));
    }

    #[test]
    fn test_focus_moves_and_clamps() {
        let mut state = sorted_game();

        assert!(state.move_focus(Direction::Up));
        assert_eq!(state.focus(), 0);
        assert!(state.move_focus(Direction::Left));
        assert_eq!(state.focus(), 0);
        assert!(cues(&mut state).is_empty(), "no cue when focus stays put");

        state.move_focus(Direction::Down);
        assert_eq!(state.focus(), 3);
        state.move_focus(Direction::Right);
        state.move_focus(Direction::Right);
        state.move_focus(Direction::Right);
        assert_eq!(state.focus(), 5);

        let focus = |row, col| {
            Cue::Speak(Announcement::Focus {
                row,
                col,
                state: TileState::Available,
            })
        };
        assert_eq!(
            cues(&mut state),
            vec![
                Cue::Tone(ToneCue::Position { row: 1, col: 0 }),
                focus(2, 1),
                Cue::Tone(ToneCue::Position { row: 1, col: 1 }),
                focus(2, 2),
                Cue::Tone(ToneCue::Position { row: 1, col: 2 }),
                focus(2, 3),
            ]
        );
    }

    #[test]
    fn test_focus_announces_tile_state() {
        let mut state = sorted_game();
        match_pair(&mut state, 0, 1);
        state.select(3);
        cues(&mut state);

        state.move_focus(Direction::Right);
        state.move_focus(Direction::Down);
        state.move_focus(Direction::Right);
        let spoken: Vec<String> = cues(&mut state)
            .into_iter()
            .filter_map(|cue| match cue {
                Cue::Speak(a) => Some(a.to_string()),
                Cue::Tone(_) => None,
            })
            .collect();
        assert_eq!(
            spoken,
            vec![
                "Tile at row 1, column 2. Matched",
                "Tile at row 2, column 2. Available",
                "Tile at row 2, column 3. Available",
            ]
        );

        state.move_focus(Direction::Left);
        state.move_focus(Direction::Left);
        assert_eq!(state.tile_state(3), TileState::Selected);
        assert_eq!(
            cues(&mut state).last(),
            Some(&Cue::Speak(Announcement::Focus {
                row: 2,
                col: 1,
                state: TileState::Selected,
            }))
        );
    }

    #[test]
    fn test_select_focused_uses_focus() {
        let mut state = sorted_game();
        state.apply_action(GameAction::MoveFocus(Direction::Right));
        assert!(state.apply_action(GameAction::SelectFocused));
        assert_eq!(state.selected(), &[1]);
    }

    #[test]
    fn test_full_game_completes() {
        let mut state = sorted_game();
        match_pair(&mut state, 4, 5);
        match_pair(&mut state, 0, 1);
        assert!(!state.is_complete());
        match_pair(&mut state, 3, 2);

        assert!(state.is_complete());
        assert_eq!(state.phase(), TurnPhase::Complete);
        assert_eq!(state.score(), 30);
        assert_eq!(state.matches(), 3);
        assert_eq!(state.board().matched_count(), 6);
    }

    #[test]
    fn test_completion_announcement_follows_match() {
        let mut state = sorted_game();
        match_pair(&mut state, 0, 1);
        match_pair(&mut state, 2, 3);
        match_pair(&mut state, 4, 5);
        cues(&mut state);

        state.tick(FEEDBACK_SPEECH_DELAY_MS);
        assert_eq!(
            cues(&mut state),
            vec![Cue::Speak(Announcement::Match(SoundId::Bird))]
        );

        state.tick(COMPLETION_ANNOUNCE_DELAY_MS - FEEDBACK_SPEECH_DELAY_MS - 1);
        assert!(cues(&mut state).is_empty());
        state.tick(1);
        assert_eq!(
            cues(&mut state),
            vec![Cue::Speak(Announcement::Complete { score: 30 })]
        );
    }

    #[test]
    fn test_complete_ignores_focus_but_allows_restart_and_help() {
        let mut state = sorted_game();
        match_pair(&mut state, 0, 1);
        match_pair(&mut state, 2, 3);
        match_pair(&mut state, 4, 5);

        assert!(!state.apply_action(GameAction::MoveFocus(Direction::Right)));
        assert_eq!(state.focus(), 0);
        assert!(!state.apply_action(GameAction::SelectFocused));
        assert!(state.apply_action(GameAction::Help));
        assert!(state.is_complete());

        assert!(state.apply_action(GameAction::Restart));
        assert!(!state.is_complete());
    }

    #[test]
    fn test_help_speaks_immediately_without_mutation() {
        let mut state = sorted_game();
        state.select(0);
        cues(&mut state);
        let before = state.snapshot();

        assert!(state.apply_action(GameAction::Help));
        assert_eq!(cues(&mut state), vec![Cue::Speak(Announcement::Help)]);
        assert_eq!(state.snapshot(), before);
    }

    #[test]
    fn test_restart_resets_everything() {
        let mut state = sorted_game();
        match_pair(&mut state, 0, 1);
        state.move_focus(Direction::Down);
        state.select(2);
        let generation = state.generation();

        assert!(state.apply_action(GameAction::Restart));
        assert_eq!(state.score(), 0);
        assert_eq!(state.matches(), 0);
        assert!(state.selected().is_empty());
        assert_eq!(state.focus(), 0);
        assert!(!state.is_complete());
        assert_eq!(state.generation(), generation + 1);
        assert!(state.tiles().iter().all(|t| !t.revealed && !t.matched));
        assert!(is_valid_deck(&state.board().deck()));
    }

    #[test]
    fn test_restarts_deal_fresh_decks() {
        let mut state = GameState::new(7);
        let mut decks = std::collections::HashSet::new();
        for _ in 0..10 {
            decks.insert(state.board().deck());
            state.apply_action(GameAction::Restart);
        }
        assert!(decks.len() > 1);
    }

    #[test]
    fn test_stale_resolution_dropped_after_restart() {
        let mut state = sorted_game();
        state.select(0);
        state.select(1);
        state.apply_action(GameAction::Restart);
        cues(&mut state);

        state.tick(RESOLVE_DELAY_MS * 3);
        assert_eq!(state.matches(), 0);
        assert_eq!(state.score(), 0);
        assert!(state.tiles().iter().all(|t| !t.matched));

        // Only the new game's intro survives.
        assert_eq!(cues(&mut state), vec![Cue::Speak(Announcement::Intro)]);
        assert_eq!(state.pending_effects(), 0);
    }

    #[test]
    fn test_stale_completion_announcement_dropped() {
        let mut state = sorted_game();
        match_pair(&mut state, 0, 1);
        match_pair(&mut state, 2, 3);
        match_pair(&mut state, 4, 5);
        state.apply_action(GameAction::Restart);
        state.tick(COMPLETION_ANNOUNCE_DELAY_MS * 2);

        let emitted = cues(&mut state);
        assert!(!emitted
            .iter()
            .any(|c| matches!(c, Cue::Speak(Announcement::Complete { .. }))));
    }

    #[test]
    fn test_large_tick_equals_small_ticks() {
        let mut coarse = sorted_game();
        let mut fine = sorted_game();
        for state in [&mut coarse, &mut fine] {
            state.select(0);
            state.select(1);
        }

        coarse.tick(5000);
        for _ in 0..(5000 / TICK_MS + 1) {
            fine.tick(TICK_MS);
        }

        assert_eq!(coarse.snapshot(), fine.snapshot());
        assert_eq!(cues(&mut coarse), cues(&mut fine));
    }

    #[test]
    fn test_focus_survives_selection_cycle() {
        let mut state = sorted_game();
        state.move_focus(Direction::Right);
        state.apply_action(GameAction::SelectFocused);
        state.move_focus(Direction::Right);
        state.apply_action(GameAction::SelectFocused);
        state.tick(RESOLVE_DELAY_MS);
        assert_eq!(state.focus(), 2);
    }
}
