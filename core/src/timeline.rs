use alloc::collections::BTreeMap;
use alloc::vec::Vec;

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq)]
struct ArmedTimer {
    period_ms: u32,
    due_ms: u64,
    seq: u64,
}

/// A timer callback that ran on the [`Timeline`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct FiredTimer {
    pub at_ms: u64,
    pub key: TimerKey,
    pub outcome: TickOutcome,
}

/// Deterministic stand-in for the browser's interval timers, in virtual milliseconds.
///
/// Timers are reconciled against [`Round::active_timers`] after every callback, the same way the web front end
/// does it: timers that are no longer wanted are dropped, new ones are armed one period from now. Timers due at
/// the same instant fire in the order they were armed.
#[derive(Clone, Debug, Default)]
pub struct Timeline {
    now_ms: u64,
    next_seq: u64,
    armed: BTreeMap<TimerKey, ArmedTimer>,
}

impl Timeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    pub fn is_armed(&self, key: TimerKey) -> bool {
        self.armed.contains_key(&key)
    }

    pub fn armed_keys(&self) -> impl Iterator<Item = TimerKey> + '_ {
        self.armed.keys().copied()
    }

    /// Cancels every timer, as when the round owning them is thrown away.
    pub fn cancel_all(&mut self) {
        self.armed.clear();
    }

    pub fn sync(&mut self, round: &Round) {
        let wanted: BTreeMap<TimerKey, u32> = round
            .active_timers()
            .map(|spec| (spec.key, spec.period_ms))
            .collect();

        self.armed.retain(|key, _| wanted.contains_key(key));
        for (key, period_ms) in wanted {
            if !self.armed.contains_key(&key) {
                let timer = self.arm(period_ms);
                self.armed.insert(key, timer);
            }
        }
    }

    /// Fires every timer due up to and including `at_ms`.
    pub fn advance_to(&mut self, round: &mut Round, at_ms: u64) -> Vec<FiredTimer> {
        let mut fired = Vec::new();

        while let Some((key, due_ms)) = self.next_due().filter(|&(_, due_ms)| due_ms <= at_ms) {
            self.now_ms = due_ms;
            if let Some(timer) = self.armed.get(&key).copied() {
                let rearmed = ArmedTimer {
                    due_ms: due_ms + u64::from(timer.period_ms),
                    seq: self.take_seq(),
                    ..timer
                };
                self.armed.insert(key, rearmed);
            }

            match round.fire(key) {
                Ok(outcome) => fired.push(FiredTimer {
                    at_ms: due_ms,
                    key,
                    outcome,
                }),
                Err(err) => log::trace!("timer {:?} rejected: {}", key, err),
            }
            self.sync(round);
        }

        self.now_ms = self.now_ms.max(at_ms);
        fired
    }

    pub fn advance_by(&mut self, round: &mut Round, ms: u64) -> Vec<FiredTimer> {
        self.advance_to(round, self.now_ms + ms)
    }

    /// Advances to `at_ms` and clicks there, as a player would between two timer callbacks.
    pub fn click_at(&mut self, round: &mut Round, at_ms: u64, id: TileId) -> Result<ClickOutcome> {
        self.advance_to(round, at_ms);
        let outcome = round.click(id);
        self.sync(round);
        outcome
    }

    /// Runs until the round leaves `Playing`, returning the instant it did, or `None` past `limit_ms`.
    pub fn run_until_finished(&mut self, round: &mut Round, limit_ms: u64) -> Option<u64> {
        while !round.state().is_finished() {
            let (_, due_ms) = self.next_due()?;
            if due_ms > limit_ms {
                return None;
            }
            self.advance_to(round, due_ms);
        }
        Some(self.now_ms)
    }

    fn next_due(&self) -> Option<(TimerKey, u64)> {
        self.armed
            .iter()
            .min_by_key(|(_, timer)| (timer.due_ms, timer.seq))
            .map(|(&key, timer)| (key, timer.due_ms))
    }

    fn arm(&mut self, period_ms: u32) -> ArmedTimer {
        ArmedTimer {
            period_ms,
            due_ms: self.now_ms + u64::from(period_ms),
            seq: self.take_seq(),
        }
    }

    fn take_seq(&mut self) -> u64 {
        let seq = self.next_seq;
        self.next_seq += 1;
        seq
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn start(point_count: u32, auto_play: bool) -> (Round, Timeline) {
        let layout = RandomLayoutGenerator::new(11).generate(point_count);
        let round = Round::start(GameConfig::default(), layout, auto_play);
        let mut timeline = Timeline::new();
        timeline.sync(&round);
        (round, timeline)
    }

    #[test]
    fn clock_counts_tenths_while_playing() {
        let (mut round, mut timeline) = start(3, false);

        timeline.advance_to(&mut round, 1_050);
        assert_eq!(round.elapsed_ticks(), 10);
        assert_eq!(round.elapsed_secs(), 1.0);
    }

    #[test]
    fn ascending_clicks_clear_after_last_fade() {
        let (mut round, mut timeline) = start(3, false);

        assert_eq!(
            timeline.click_at(&mut round, 0, 1),
            Ok(ClickOutcome::Advanced)
        );
        assert_eq!(
            timeline.click_at(&mut round, 250, 2),
            Ok(ClickOutcome::Advanced)
        );
        assert_eq!(
            timeline.click_at(&mut round, 450, 3),
            Ok(ClickOutcome::AwaitingClear)
        );

        timeline.advance_to(&mut round, 3_449);
        assert_eq!(round.state(), RoundState::Playing);
        assert!(round.is_pending_clear());
        assert_eq!(round.tile(1).unwrap().opacity(), 0.0);

        let fired = timeline.advance_to(&mut round, 3_450);
        assert_eq!(round.state(), RoundState::AllCleared);
        assert!(fired.iter().any(|timer| timer.outcome == TickOutcome::AllCleared));
        assert_eq!(timeline.armed_keys().count(), 0);
    }

    #[test]
    fn skipping_a_tile_is_game_over_and_stops_timers() {
        let (mut round, mut timeline) = start(3, false);

        timeline.click_at(&mut round, 0, 1).unwrap();
        assert_eq!(
            timeline.click_at(&mut round, 500, 3),
            Ok(ClickOutcome::Mistake)
        );

        assert_eq!(round.state(), RoundState::GameOver);
        assert_eq!(round.expected(), 2);
        assert_eq!(timeline.armed_keys().count(), 0);

        let elapsed = round.elapsed_ticks();
        timeline.advance_by(&mut round, 5_000);
        assert_eq!(round.tile(1).unwrap().opacity(), 1.0);
        assert_eq!(round.elapsed_ticks(), elapsed);
    }

    #[test]
    fn auto_play_clicks_once_per_interval() {
        let (mut round, mut timeline) = start(2, true);

        let clicks: Vec<(u64, ClickOutcome)> = timeline
            .advance_to(&mut round, 1_200)
            .into_iter()
            .filter_map(|timer| match timer.outcome {
                TickOutcome::AutoClick(outcome) => Some((timer.at_ms, outcome)),
                _ => None,
            })
            .collect();

        assert_eq!(
            clicks,
            [
                (500, ClickOutcome::Advanced),
                (1_000, ClickOutcome::AwaitingClear)
            ]
        );
        assert_eq!(timeline.run_until_finished(&mut round, 10_000), Some(4_000));
        assert_eq!(round.state(), RoundState::AllCleared);
    }

    #[test]
    fn manual_click_rearms_auto_play() {
        let (mut round, mut timeline) = start(3, true);

        timeline.click_at(&mut round, 300, 1).unwrap();
        assert!(timeline.is_armed(TimerKey::AutoPlay { next: 2 }));

        let fired = timeline.advance_to(&mut round, 800);
        assert!(fired.iter().any(|timer| timer.at_ms == 800
            && timer.outcome == TickOutcome::AutoClick(ClickOutcome::Advanced)));
        assert_eq!(round.expected(), 3);
    }

    #[test]
    fn restart_cancels_previous_fades() {
        let (mut round, mut timeline) = start(3, false);
        timeline.click_at(&mut round, 0, 1).unwrap();
        timeline.click_at(&mut round, 100, 2).unwrap();
        timeline.advance_to(&mut round, 700);
        let faded = round.tile(1).unwrap().fade();

        let old = round.clone();
        round = round.restart(RandomLayoutGenerator::new(12).generate(3));
        timeline.cancel_all();
        timeline.sync(&round);

        assert!(!timeline.armed_keys().any(|key| matches!(key, TimerKey::Fade(_))));
        timeline.advance_by(&mut round, 5_000);
        assert!(round.tiles().iter().all(|tile| tile.fade().is_none()));
        assert_eq!(old.tile(1).unwrap().fade(), faded);
        assert_eq!(round.state(), RoundState::Playing);
    }
}
