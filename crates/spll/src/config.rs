#[cfg_attr(test, allow(unused_imports))]
use micromath::F32Ext;

/// Constant table of the working numeric type.
pub mod consts {
    pub const ZERO: f32 = 0.;
    pub const PI: f32 = core::f32::consts::PI;
    pub const HALF_PI: f32 = core::f32::consts::FRAC_PI_2;
    pub const TAU: f32 = core::f32::consts::TAU;
    pub const MAX: f32 = f32::MAX;
    pub const MIN: f32 = f32::MIN;
}

/// Control period of the default configuration, 12.8 kHz.
pub const T: f32 = 1. / 12800.;

/// Nominal mains frequency of the default configuration.
pub const TARGET_FREQ: f32 = 50.;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    InvalidPeriod,
    InvalidTargetFrequency,
    EmptyWarmup,
}

/// Timing of one estimator. Fixed for the lifetime of an [`SPLL`](crate::SPLL).
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SpllConfig {
    period: f32,
    target_freq: f32,
    warmup: u32,
}

impl SpllConfig {
    /// 50 Hz mains sampled at 12.8 kHz, one signal period of warm-up.
    pub const MAINS_50HZ: Self = Self {
        period: T,
        target_freq: TARGET_FREQ,
        warmup: 256,
    };

    /// `period` in seconds, `target_freq` in Hz. The warm-up lasts one
    /// period of the target frequency, rounded to whole samples.
    pub fn new(period: f32, target_freq: f32) -> Result<Self, ConfigError> {
        if !period.is_finite() || period <= 0. {
            warn!("rejected control period {}", period);
            return Err(ConfigError::InvalidPeriod);
        }
        if !target_freq.is_finite() || target_freq <= 0. {
            warn!("rejected target frequency {}", target_freq);
            return Err(ConfigError::InvalidTargetFrequency);
        }

        let samples = ((1. / period) / target_freq).round();
        if samples < 1. || samples > u32::MAX as f32 {
            warn!("warm-up of {} samples is not usable", samples);
            return Err(ConfigError::EmptyWarmup);
        }

        Ok(Self {
            period,
            target_freq,
            warmup: samples as u32,
        })
    }

    pub fn period(&self) -> f32 {
        self.period
    }

    pub fn target_freq(&self) -> f32 {
        self.target_freq
    }

    /// Angular target frequency in rad/s.
    pub fn target_omega(&self) -> f32 {
        self.target_freq * consts::TAU
    }

    /// Number of samples fed to the offset tracker before the loop runs.
    pub fn warmup(&self) -> u32 {
        self.warmup
    }
}

impl Default for SpllConfig {
    fn default() -> Self {
        Self::MAINS_50HZ
    }
}
