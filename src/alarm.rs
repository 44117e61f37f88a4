/**
 * The alarm clock hidden in the present. It goes off at a random moment in the last two
 * minutes before the chosen time (but never in the first minute), and whoever holds the
 * present at that moment wins.
 *
 * Version: November 2025
 */
use std::cmp;

use log::info;
use rand::Rng;

use super::common::{QuizError, Result};


pub const MIN_ALARM_MINUTES: u32 = 1;
pub const MAX_ALARM_MINUTES: u32 = 60;
pub const DEFAULT_ALARM_MINUTES: u32 = 10;
// The alarm goes off at most this many seconds before the chosen time.
const MAX_REDUCTION_SECONDS: u64 = 120;
// ...and never sooner than this after it was started.
const MIN_ALARM_SECONDS: u64 = 60;


/// Pick the number of seconds until the alarm goes off for a chosen time of
/// `max_minutes`.
pub fn alarm_seconds<R: Rng + ?Sized>(max_minutes: u32, rng: &mut R) -> Result<u64> {
    check_minutes(max_minutes)?;
    let max_seconds = u64::from(max_minutes) * 60;
    let min_seconds = cmp::max(max_seconds.saturating_sub(MAX_REDUCTION_SECONDS), MIN_ALARM_SECONDS);
    Ok(rng.gen_range(min_seconds..=max_seconds))
}


fn check_minutes(minutes: u32) -> Result<()> {
    if minutes < MIN_ALARM_MINUTES || minutes > MAX_ALARM_MINUTES {
        Err(QuizError::InvalidAlarmTime(minutes))
    } else {
        Ok(())
    }
}


#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alarm {
    max_minutes: u32,
    time_left: Option<u64>,
    active: bool,
    paused: bool,
    triggered: bool,
    /// Set once the alarm goes off; no more questions may be answered.
    locked: bool,
}


impl Alarm {
    pub fn new(max_minutes: u32) -> Result<Self> {
        check_minutes(max_minutes)?;
        Ok(Alarm {
            max_minutes,
            time_left: None,
            active: false,
            paused: false,
            triggered: false,
            locked: false,
        })
    }

    pub fn set_max_minutes(&mut self, minutes: u32) -> Result<()> {
        check_minutes(minutes)?;
        self.max_minutes = minutes;
        Ok(())
    }

    /// Wind the alarm up with a fresh random time.
    pub fn start<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<()> {
        let seconds = alarm_seconds(self.max_minutes, rng)?;
        self.time_left = Some(seconds);
        self.active = true;
        self.paused = false;
        self.triggered = false;
        Ok(())
    }

    /// Let `seconds` pass. Time only runs while the alarm is active and not paused. If
    /// this makes the alarm go off, `true` is returned.
    pub fn tick(&mut self, seconds: u64) -> bool {
        if !self.active || self.paused {
            return false;
        }

        if let Some(left) = self.time_left {
            let left = left.saturating_sub(seconds);
            self.time_left = Some(left);
            if left == 0 {
                info!("the alarm went off");
                self.active = false;
                self.triggered = true;
                self.locked = true;
                return true;
            }
        }
        false
    }

    pub fn pause(&mut self) {
        if self.active {
            self.paused = true;
        }
    }

    pub fn resume(&mut self) {
        self.paused = false;
    }

    pub fn stop(&mut self) {
        self.active = false;
        self.paused = false;
        self.time_left = None;
    }

    /// Put the alarm back in its initial state, unlocking the game.
    pub fn reset(&mut self) {
        self.stop();
        self.triggered = false;
        self.locked = false;
    }

    pub fn max_minutes(&self) -> u32 {
        self.max_minutes
    }

    pub fn time_left(&self) -> Option<u64> {
        self.time_left
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn is_triggered(&self) -> bool {
        self.triggered
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }
}


#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    #[test]
    fn alarm_time_is_in_last_two_minutes() {
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..50 {
            let seconds = alarm_seconds(10, &mut rng).unwrap();
            assert!(seconds >= 480 && seconds <= 600, "{}", seconds);
        }
        for _ in 0..50 {
            let seconds = alarm_seconds(60, &mut rng).unwrap();
            assert!(seconds >= 3480 && seconds <= 3600, "{}", seconds);
        }
    }

    #[test]
    fn alarm_time_is_never_below_a_minute() {
        let mut rng = StdRng::seed_from_u64(2);
        for _ in 0..20 {
            assert_eq!(alarm_seconds(1, &mut rng).unwrap(), 60);
            let seconds = alarm_seconds(2, &mut rng).unwrap();
            assert!(seconds >= 60 && seconds <= 120);
        }
    }

    #[test]
    fn alarm_time_varies() {
        let mut rng = StdRng::seed_from_u64(3);
        let first = alarm_seconds(10, &mut rng).unwrap();
        assert!((0..20).any(|_| alarm_seconds(10, &mut rng).unwrap() != first));
    }

    #[test]
    fn out_of_range_minutes_are_rejected() {
        let mut rng = StdRng::seed_from_u64(4);
        assert!(matches!(alarm_seconds(0, &mut rng), Err(QuizError::InvalidAlarmTime(0))));
        assert!(alarm_seconds(61, &mut rng).is_err());
        assert!(Alarm::new(0).is_err());

        let mut alarm = Alarm::new(DEFAULT_ALARM_MINUTES).unwrap();
        assert!(alarm.set_max_minutes(61).is_err());
        assert_eq!(alarm.max_minutes(), 10);
    }

    #[test]
    fn new_alarm_is_idle() {
        let alarm = Alarm::new(DEFAULT_ALARM_MINUTES).unwrap();
        assert_eq!(alarm.time_left(), None);
        assert!(!alarm.is_active());
        assert!(!alarm.is_paused());
        assert!(!alarm.is_triggered());
        assert!(!alarm.is_locked());
    }

    #[test]
    fn ticks_count_down_only_while_running() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut alarm = Alarm::new(1).unwrap();
        assert!(!alarm.tick(10));
        assert_eq!(alarm.time_left(), None);

        alarm.start(&mut rng).unwrap();
        assert_eq!(alarm.time_left(), Some(60));
        assert!(!alarm.tick(10));
        assert_eq!(alarm.time_left(), Some(50));

        alarm.pause();
        assert!(!alarm.tick(10));
        assert_eq!(alarm.time_left(), Some(50));

        alarm.resume();
        assert!(!alarm.tick(1));
        assert_eq!(alarm.time_left(), Some(49));
    }

    #[test]
    fn alarm_goes_off_and_locks_game() {
        let mut rng = StdRng::seed_from_u64(6);
        let mut alarm = Alarm::new(1).unwrap();
        alarm.start(&mut rng).unwrap();

        assert!(alarm.tick(1000));
        assert_eq!(alarm.time_left(), Some(0));
        assert!(alarm.is_triggered());
        assert!(alarm.is_locked());
        assert!(!alarm.is_active());
        // Going off happens once.
        assert!(!alarm.tick(1));

        alarm.reset();
        assert!(!alarm.is_locked());
        assert!(!alarm.is_triggered());
        assert_eq!(alarm.time_left(), None);
    }

    #[test]
    fn stopped_alarm_does_not_go_off() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut alarm = Alarm::new(1).unwrap();
        alarm.start(&mut rng).unwrap();
        alarm.stop();
        assert!(!alarm.tick(1000));
        assert!(!alarm.is_locked());
    }
}
