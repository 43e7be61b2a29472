//! Timed effect queue.
//!
//! Every delayed consequence of a player action (speech, pair resolution) is an
//! entry here instead of a free-running timer. Entries fire in
//! `(fire_at_ms, seq)` order, where `seq` is the issue order, so two effects
//! scheduled from the same instant keep their relative order and effects from
//! different instants are ordered by absolute fire time.
//!
//! Each entry remembers the game generation that issued it. The queue itself
//! does not interpret generations; the game state drops entries that no longer
//! match when they come due.

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

use crate::types::Cue;

/// A deferred consequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// Emit an audio/speech cue.
    Cue(Cue),
    /// Settle the pair selected at `first` then `second`.
    Resolve { first: usize, second: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scheduled {
    pub fire_at_ms: u64,
    pub seq: u64,
    pub generation: u32,
    pub effect: Effect,
}

impl Ord for Scheduled {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.fire_at_ms, self.seq).cmp(&(other.fire_at_ms, other.seq))
    }
}

impl PartialOrd for Scheduled {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[derive(Debug, Clone, Default)]
pub struct Scheduler {
    queue: BinaryHeap<Reverse<Scheduled>>,
    next_seq: u64,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `effect` to fire `delay_ms` after `now_ms`.
    pub fn schedule(&mut self, now_ms: u64, delay_ms: u32, generation: u32, effect: Effect) {
        let entry = Scheduled {
            fire_at_ms: now_ms + delay_ms as u64,
            seq: self.next_seq,
            generation,
            effect,
        };
        self.next_seq += 1;
        self.queue.push(Reverse(entry));
    }

    /// Remove and return the earliest entry due at or before `now_ms`.
    pub fn pop_due(&mut self, now_ms: u64) -> Option<Scheduled> {
        match self.queue.peek() {
            Some(Reverse(next)) if next.fire_at_ms <= now_ms => {
                self.queue.pop().map(|Reverse(entry)| entry)
            }
            _ => None,
        }
    }

    /// Number of queued entries.
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Announcement, Cue};

    fn speak(a: Announcement) -> Effect {
        Effect::Cue(Cue::Speak(a))
    }

    fn drain(s: &mut Scheduler, now: u64) -> Vec<Effect> {
        let mut out = Vec::new();
        while let Some(entry) = s.pop_due(now) {
            out.push(entry.effect);
        }
        out
    }

    #[test]
    fn nothing_fires_early() {
        let mut s = Scheduler::new();
        s.schedule(0, 800, 1, speak(Announcement::Help));
        assert!(s.pop_due(799).is_none());
        assert_eq!(s.len(), 1);
        assert_eq!(s.pop_due(800).map(|e| e.fire_at_ms), Some(800));
        assert!(s.is_empty());
    }

    #[test]
    fn shorter_delay_from_same_instant_fires_first() {
        let mut s = Scheduler::new();
        s.schedule(100, 1000, 1, speak(Announcement::Mismatch));
        s.schedule(100, 800, 1, speak(Announcement::Intro));
        assert_eq!(
            drain(&mut s, 5000),
            vec![speak(Announcement::Intro), speak(Announcement::Mismatch)]
        );
    }

    #[test]
    fn absolute_fire_time_beats_issue_order() {
        let mut s = Scheduler::new();
        // Issued first but due later.
        s.schedule(0, 1000, 1, speak(Announcement::Mismatch));
        // Issued later from a later instant but due earlier.
        s.schedule(100, 800, 1, speak(Announcement::Intro));
        assert_eq!(
            drain(&mut s, 2000),
            vec![speak(Announcement::Intro), speak(Announcement::Mismatch)]
        );
    }

    #[test]
    fn equal_fire_times_keep_issue_order() {
        let mut s = Scheduler::new();
        s.schedule(0, 0, 1, speak(Announcement::Intro));
        s.schedule(0, 0, 1, speak(Announcement::Help));
        s.schedule(0, 0, 1, Effect::Resolve { first: 0, second: 1 });
        assert_eq!(
            drain(&mut s, 0),
            vec![
                speak(Announcement::Intro),
                speak(Announcement::Help),
                Effect::Resolve { first: 0, second: 1 },
            ]
        );
    }

    #[test]
    fn entries_carry_their_generation() {
        let mut s = Scheduler::new();
        s.schedule(0, 10, 7, Effect::Resolve { first: 2, second: 3 });
        let entry = s.pop_due(10).unwrap();
        assert_eq!(entry.generation, 7);
        assert_eq!(entry.fire_at_ms, 10);
        assert_eq!(s.len(), 0);
    }
}
