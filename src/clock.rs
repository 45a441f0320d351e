//! The animation clock: a bounded counter `t` advanced on a fixed
//! wall-clock cadence.
//!
//! Timestamps come in as caller-supplied milliseconds, so schedulers and
//! tests alike can drive the clock without real delays.

/// Counter step applied after each completed pass while running.
pub const STEP: i64 = 5;
/// The counter wraps modulo this bound.
pub const T_MODULUS: i64 = 200;
/// Minimum wall-clock spacing between two fired passes.
pub const FRAME_INTERVAL_MS: u64 = 200;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ClockState {
    Idle,
    Running,
}

#[derive(Clone, Debug)]
pub struct AnimationClock {
    state: ClockState,
    counter: i64,
    last_fired_ms: Option<u64>,
}

impl AnimationClock {
    /// A fresh clock is idle with `t = 1`: manual renders before animation
    /// has ever been enabled see 1, not 0.
    pub fn new() -> Self {
        Self {
            state: ClockState::Idle,
            counter: 1,
            last_fired_ms: None,
        }
    }

    pub fn is_running(&self) -> bool {
        self.state == ClockState::Running
    }

    /// The current time value handed to formulas.
    pub fn t(&self) -> i64 {
        self.counter
    }

    /// Idle → Running: the counter resets to 0 and the next
    /// [`AnimationClock::should_fire`] passes immediately. A no-op while
    /// already running.
    pub fn enable(&mut self) {
        if self.is_running() {
            return;
        }
        self.state = ClockState::Running;
        self.counter = 0;
        self.last_fired_ms = None;
    }

    /// Running → Idle. The counter holds its last value, so subsequent
    /// manual renders keep the `t` the animation stopped at.
    pub fn disable(&mut self) {
        self.state = ClockState::Idle;
    }

    /// Frame gate: true when a pass should run at `now_ms`. Fires
    /// immediately after enabling, then at most once per
    /// [`FRAME_INTERVAL_MS`]; an early tick is dropped, not queued.
    pub fn should_fire(&mut self, now_ms: u64) -> bool {
        if !self.is_running() {
            return false;
        }
        if let Some(last) = self.last_fired_ms
            && now_ms.saturating_sub(last) < FRAME_INTERVAL_MS
        {
            return false;
        }
        self.last_fired_ms = Some(now_ms);
        true
    }

    /// Post-pass advance: counter += 5 mod 200, with a wrap to exactly 0
    /// forced to 5. `t = 0` is therefore only ever observed on the first
    /// frame after enabling.
    pub fn advance(&mut self) {
        if !self.is_running() {
            return;
        }
        self.counter = (self.counter + STEP) % T_MODULUS;
        if self.counter == 0 {
            self.counter = STEP;
        }
    }
}

impl Default for AnimationClock {
    fn default() -> Self {
        Self::new()
    }
}
