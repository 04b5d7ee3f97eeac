#![no_std]

#[macro_use]
mod fmt;

pub mod config;
pub mod offset;
pub mod pid;
pub mod sogi;
pub mod trig;

use config::{consts, SpllConfig};
use offset::OffsetTracker;
use pid::{Factors, PID};
use sogi::{park_q, SOGI};
use trig::{Micromath, SinCos};

/// Default threshold of [`SPLL::is_lock`].
pub const DEFAULT_LOCK_THRESHOLD: f32 = 1e-2;

// Loop filter gains, tuned for 50 Hz at 12.8 kHz.

/// Proportional gain of the loop filter.
pub const LOOP_KP: f32 = 750.;
/// Integral gain of the loop filter, per sample.
pub const LOOP_KI: f32 = 15.;
/// Anti-windup back-calculation gain of the loop filter.
pub const LOOP_KC: f32 = 10.;

/// Headroom of the frequency correction above the target, in Hz.
pub const LOOP_FREQ_MARGIN: f32 = 15.;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Stage {
    /// only the offset tracker runs
    WarmingUp,
    /// SOGI, phase detector and loop filter run every sample
    Running,
}

/// Single-phase software PLL.
///
/// Feed one raw sample per control period with [`transfer_1phase`](Self::transfer_1phase);
/// the estimator has no clock of its own. Deliberately neither `Clone` nor
/// `Copy`: one instance belongs to one signal channel.
#[derive(Debug)]
pub struct SPLL<S: SinCos = Micromath> {
    config: SpllConfig,
    trig: S,

    pid: PID,
    sogi: SOGI,
    offset: OffsetTracker,

    stage: Stage,
    sample_index: u32,

    omega: f32,
    cur_phase: f32,
    last_error: f32,
}

impl SPLL<Micromath> {
    /// 50 Hz estimator at 12.8 kHz using the `micromath` trigonometry.
    pub fn new() -> Self {
        Self::with_trig(SpllConfig::MAINS_50HZ, Micromath)
    }
}

impl Default for SPLL<Micromath> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: SinCos> SPLL<S> {
    pub fn with_trig(config: SpllConfig, trig: S) -> Self {
        let limit = (config.target_freq() + LOOP_FREQ_MARGIN) * consts::TAU;
        let pid = PID::new(Factors {
            kp: LOOP_KP,
            ki: LOOP_KI,
            kd: 0.,
            kg: 0.,
            kc: LOOP_KC,
            i_min: -limit,
            i_max: limit,
        });

        let mut spll = Self {
            config,
            trig,
            pid,
            sogi: SOGI::new(),
            offset: OffsetTracker::new(),
            stage: Stage::WarmingUp,
            sample_index: 0,
            omega: 0.,
            cur_phase: 0.,
            last_error: 0.,
        };
        spll.reset();
        spll
    }

    /// Drops all estimator state and re-enters warm-up. Loop filter gains are kept.
    pub fn reset(&mut self) {
        self.stage = Stage::WarmingUp;
        self.sample_index = 0;
        self.omega = 0.;
        self.cur_phase = 0.;
        self.last_error = 0.;
        self.sogi.reset();
        self.offset.reset();
        self.pid.reset();
        debug!("spll reset, warm-up {} samples", self.config.warmup());
    }

    /// Advances the loop by one control period with the raw sample `val`.
    ///
    /// The peak-to-peak amplitude seen during warm-up must be non-zero,
    /// a constant input makes the normalisation divide by zero.
    pub fn transfer_1phase(&mut self, val: f32) {
        let v_org = self.offset.update(val);

        if self.sample_index < self.config.warmup() {
            self.sample_index += 1;
            self.stage = Stage::WarmingUp;
            return;
        }
        if self.stage == Stage::WarmingUp {
            info!(
                "spll loop launched, offset {} span {}",
                self.offset.midpoint(),
                self.offset.span()
            );
        }
        self.stage = Stage::Running;

        let dt = self.config.period();
        let v = v_org / self.offset.span();
        let (alpha, beta) = self.sogi.update(v, self.config.target_omega(), dt);

        let theta = self.cur_phase.to_degrees();
        let uq = park_q(alpha, beta, self.trig.sin_cos_deg(theta));

        let e = consts::ZERO - uq;
        let u = self.pid.pi_transfer(e);

        self.omega = u;
        self.cur_phase = wrap_phase(self.cur_phase + dt * u);
        self.last_error = e;
    }

    /// True once past warm-up with the last phase error below `th`.
    ///
    /// The comparison is one-sided: any negative error counts as locked.
    pub fn is_lock(&self, th: f32) -> bool {
        self.stage == Stage::Running && self.last_error < th
    }

    /// Estimated frequency in Hz.
    pub fn freq(&self) -> f32 {
        self.omega / consts::TAU
    }

    /// Estimated angular frequency in rad/s.
    pub fn omega(&self) -> f32 {
        self.omega
    }

    /// Estimated phase in rad, within (-2pi, 2pi].
    pub fn phase(&self) -> f32 {
        self.cur_phase
    }

    /// Phase detector output of the last sample.
    pub fn error(&self) -> f32 {
        self.last_error
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn config(&self) -> &SpllConfig {
        &self.config
    }

    pub fn offset(&self) -> &OffsetTracker {
        &self.offset
    }

    pub fn pid(&self) -> &PID {
        &self.pid
    }

    /// Loop filter access, e.g. for retuning the factors.
    pub fn pid_mut(&mut self) -> &mut PID {
        &mut self.pid
    }
}

/// Folds a phase that stepped past +-2pi back by one turn.
fn wrap_phase(mut i: f32) -> f32 {
    if i > consts::TAU {
        i -= consts::TAU;
    } else if i < -consts::TAU {
        i += consts::TAU;
    }
    i
}
