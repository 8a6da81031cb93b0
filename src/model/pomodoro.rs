use std::time::Duration;

use serde::{Deserialize, Serialize};

const ONE_SECOND: Duration = Duration::from_secs(1);

/// Delay before a break countdown starts on its own.
pub const BREAK_AUTO_START_DELAY: Duration = Duration::from_secs(2);

pub const DEFAULT_WORK_MINUTES: u32 = 25;
pub const DEFAULT_BREAK_MINUTES: u32 = 5;
pub const MAX_MINUTES: u32 = 180;

/// Work and break lengths in whole minutes, each at least one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerConfig {
    pub work_minutes: u32,
    pub break_minutes: u32,
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            work_minutes: DEFAULT_WORK_MINUTES,
            break_minutes: DEFAULT_BREAK_MINUTES,
        }
    }
}

impl TimerConfig {
    pub fn new(work_minutes: u32, break_minutes: u32) -> Self {
        Self {
            work_minutes: clamp_minutes(work_minutes),
            break_minutes: clamp_minutes(break_minutes),
        }
    }

    pub fn work_seconds(&self) -> u32 {
        self.work_minutes * 60
    }

    pub fn break_seconds(&self) -> u32 {
        self.break_minutes * 60
    }
}

fn clamp_minutes(minutes: u32) -> u32 {
    minutes.clamp(1, MAX_MINUTES)
}

/// Something observable that happened while driving the timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerEvent {
    Started,
    Paused,
    Reset,
    Tick { remaining: u32 },
    SessionComplete { sessions: u32, entered_break: bool },
    /// The delayed break start fired.
    AutoStarted,
}

/// The live one-second countdown. Owned by the timer, never more than one.
#[derive(Debug, Default)]
struct Countdown {
    carry: Duration,
}

/// Work/break countdown with a completed-session counter.
#[derive(Debug)]
pub struct Pomodoro {
    config: TimerConfig,
    remaining: u32,
    is_break: bool,
    sessions: u32,
    countdown: Option<Countdown>,
    auto_start: Option<Duration>,
}

impl Default for Pomodoro {
    fn default() -> Self {
        Self::new(TimerConfig::default())
    }
}

impl Pomodoro {
    pub fn new(config: TimerConfig) -> Self {
        Self {
            config,
            remaining: config.work_seconds(),
            is_break: false,
            sessions: 0,
            countdown: None,
            auto_start: None,
        }
    }

    // ── Getters ─────────────────────────────────────────────────

    pub fn config(&self) -> TimerConfig {
        self.config
    }

    pub fn remaining_seconds(&self) -> u32 {
        self.remaining
    }

    pub fn is_running(&self) -> bool {
        self.countdown.is_some()
    }

    pub fn is_break(&self) -> bool {
        self.is_break
    }

    pub fn sessions_completed(&self) -> u32 {
        self.sessions
    }

    /// Time left before the armed break auto-start fires, if any.
    pub fn auto_start_pending(&self) -> Option<Duration> {
        self.auto_start
    }

    /// Length of the current phase in seconds.
    pub fn phase_seconds(&self) -> u32 {
        if self.is_break {
            self.config.break_seconds()
        } else {
            self.config.work_seconds()
        }
    }

    /// Fraction of the current phase already elapsed, 0.0 to 1.0.
    pub fn progress(&self) -> f32 {
        let total = self.phase_seconds().max(1) as f32;
        (1.0 - self.remaining as f32 / total).clamp(0.0, 1.0)
    }

    /// `MM:SS`, zero padded.
    pub fn display(&self) -> String {
        format_clock(self.remaining)
    }

    // ── Controls ────────────────────────────────────────────────

    /// Begin counting down. Returns false if a countdown is already live.
    pub fn start(&mut self) -> bool {
        if self.countdown.is_some() {
            return false;
        }
        self.countdown = Some(Countdown::default());
        true
    }

    pub fn pause(&mut self) {
        self.countdown = None;
    }

    /// Back to a fresh work phase. The session counter is kept.
    pub fn reset(&mut self) {
        self.pause();
        self.remaining = self.config.work_seconds();
        self.is_break = false;
    }

    /// Store a new work length; a stopped timer shows it immediately.
    pub fn set_work_minutes(&mut self, minutes: u32) {
        self.config.work_minutes = clamp_minutes(minutes);
        if !self.is_running() {
            self.remaining = self.config.work_seconds();
        }
    }

    pub fn set_break_minutes(&mut self, minutes: u32) {
        self.config.break_minutes = clamp_minutes(minutes);
    }

    // ── Driving ─────────────────────────────────────────────────

    /// One simulated second. Does nothing while stopped.
    pub fn tick(&mut self) -> Vec<TimerEvent> {
        if !self.is_running() {
            return Vec::new();
        }
        self.remaining = self.remaining.saturating_sub(1);
        let mut events = vec![TimerEvent::Tick {
            remaining: self.remaining,
        }];
        if self.remaining == 0 {
            events.push(self.complete_session());
        }
        events
    }

    /// Feed wall-clock time. Every whole second accumulated by the live
    /// countdown becomes a tick; an armed break auto-start counts down too.
    pub fn advance(&mut self, elapsed: Duration) -> Vec<TimerEvent> {
        let mut events = Vec::new();
        let armed_before = self.auto_start.is_some();

        if let Some(countdown) = self.countdown.as_mut() {
            countdown.carry += elapsed;
        }
        loop {
            match self.countdown.as_mut() {
                Some(countdown) if countdown.carry >= ONE_SECOND => {
                    countdown.carry -= ONE_SECOND;
                }
                _ => break,
            }
            events.extend(self.tick());
        }

        // The auto-start does not look at what the user did in the meantime.
        if armed_before {
            if let Some(left) = self.auto_start {
                if elapsed >= left {
                    self.auto_start = None;
                    if self.start() {
                        if let Some(countdown) = self.countdown.as_mut() {
                            countdown.carry = elapsed - left;
                        }
                        events.push(TimerEvent::AutoStarted);
                    }
                } else {
                    self.auto_start = Some(left - elapsed);
                }
            }
        }
        events
    }

    fn complete_session(&mut self) -> TimerEvent {
        self.pause();
        self.sessions += 1;
        self.is_break = !self.is_break;
        self.remaining = self.phase_seconds();
        if self.is_break {
            self.auto_start = Some(BREAK_AUTO_START_DELAY);
        }
        TimerEvent::SessionComplete {
            sessions: self.sessions,
            entered_break: self.is_break,
        }
    }
}

pub fn format_clock(seconds: u32) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn completions(events: &[TimerEvent]) -> usize {
        events
            .iter()
            .filter(|e| matches!(e, TimerEvent::SessionComplete { .. }))
            .count()
    }

    #[test]
    fn defaults() {
        let timer = Pomodoro::default();
        assert_eq!(timer.remaining_seconds(), 1500);
        assert_eq!(timer.display(), "25:00");
        assert!(!timer.is_running());
        assert!(!timer.is_break());
    }

    #[test]
    fn full_work_session_enters_break_once() {
        let mut timer = Pomodoro::default();
        assert!(timer.start());
        let mut events = Vec::new();
        for _ in 0..1500 {
            events.extend(timer.tick());
        }
        assert_eq!(completions(&events), 1);
        assert_eq!(timer.sessions_completed(), 1);
        assert!(timer.is_break());
        assert!(!timer.is_running());
        assert_eq!(timer.remaining_seconds(), 5 * 60);
        assert_eq!(timer.auto_start_pending(), Some(BREAK_AUTO_START_DELAY));
    }

    #[test]
    fn ticks_while_stopped_do_nothing() {
        let mut timer = Pomodoro::default();
        assert!(timer.tick().is_empty());
        assert_eq!(timer.remaining_seconds(), 1500);
    }

    #[test]
    fn double_start_keeps_a_single_countdown() {
        let mut timer = Pomodoro::default();
        assert!(timer.start());
        assert!(!timer.start());
        timer.advance(Duration::from_secs(1));
        assert_eq!(timer.remaining_seconds(), 1499);
    }

    #[test]
    fn advance_accumulates_partial_seconds() {
        let mut timer = Pomodoro::default();
        timer.start();
        timer.advance(Duration::from_millis(600));
        assert_eq!(timer.remaining_seconds(), 1500);
        timer.advance(Duration::from_millis(600));
        assert_eq!(timer.remaining_seconds(), 1499);
        timer.advance(Duration::from_millis(2_900));
        assert_eq!(timer.remaining_seconds(), 1496);
    }

    #[test]
    fn pause_stops_and_restart_resumes() {
        let mut timer = Pomodoro::default();
        timer.start();
        timer.advance(Duration::from_secs(10));
        timer.pause();
        timer.advance(Duration::from_secs(10));
        assert_eq!(timer.remaining_seconds(), 1490);
        timer.start();
        timer.advance(Duration::from_secs(1));
        assert_eq!(timer.remaining_seconds(), 1489);
    }

    #[test]
    fn break_auto_starts_after_delay() {
        let mut timer = Pomodoro::new(TimerConfig::new(1, 1));
        timer.start();
        let events = timer.advance(Duration::from_secs(60));
        assert_eq!(completions(&events), 1);
        assert!(timer.is_break());

        timer.advance(Duration::from_millis(1_500));
        assert!(!timer.is_running());
        let events = timer.advance(Duration::from_millis(500));
        assert!(events.contains(&TimerEvent::AutoStarted));
        assert!(timer.is_running());
        assert_eq!(timer.remaining_seconds(), 60);
    }

    #[test]
    fn auto_start_fires_even_after_reset() {
        let mut timer = Pomodoro::new(TimerConfig::new(1, 1));
        timer.start();
        timer.advance(Duration::from_secs(60));
        timer.reset();
        assert!(!timer.is_break());
        let events = timer.advance(BREAK_AUTO_START_DELAY);
        assert!(events.contains(&TimerEvent::AutoStarted));
        assert!(timer.is_running());
    }

    #[test]
    fn finishing_a_break_waits_for_manual_start() {
        let mut timer = Pomodoro::new(TimerConfig::new(1, 1));
        timer.start();
        timer.advance(Duration::from_secs(60));
        timer.advance(BREAK_AUTO_START_DELAY);
        let events = timer.advance(Duration::from_secs(60));
        assert_eq!(
            events.last(),
            Some(&TimerEvent::SessionComplete {
                sessions: 2,
                entered_break: false
            })
        );
        assert!(!timer.is_break());
        assert_eq!(timer.auto_start_pending(), None);
        timer.advance(Duration::from_secs(30));
        assert!(!timer.is_running());
        assert_eq!(timer.remaining_seconds(), 60);
    }

    #[test]
    fn reset_reloads_work_length() {
        let mut timer = Pomodoro::default();
        timer.start();
        timer.advance(Duration::from_secs(90));
        timer.reset();
        assert!(!timer.is_running());
        assert_eq!(timer.remaining_seconds(), 1500);
    }

    #[test]
    fn work_length_edits_apply_only_when_stopped() {
        let mut timer = Pomodoro::default();
        timer.set_work_minutes(50);
        assert_eq!(timer.remaining_seconds(), 3000);

        timer.start();
        timer.set_work_minutes(10);
        assert_eq!(timer.remaining_seconds(), 3000);
        timer.reset();
        assert_eq!(timer.remaining_seconds(), 600);
    }

    #[test]
    fn minutes_are_clamped() {
        let config = TimerConfig::new(0, 1_000);
        assert_eq!(config.work_minutes, 1);
        assert_eq!(config.break_minutes, MAX_MINUTES);
    }

    #[test]
    fn clock_format() {
        assert_eq!(format_clock(0), "00:00");
        assert_eq!(format_clock(65), "01:05");
        assert_eq!(format_clock(1500), "25:00");
    }
}
