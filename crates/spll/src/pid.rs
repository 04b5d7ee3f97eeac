/// Controller factors. Every field may be changed between transfer calls,
/// nothing is validated: keep `i_min <= i_max`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Factors {
    /// proportional gain
    pub kp: f32,
    /// integral gain, applied per call
    pub ki: f32,
    /// derivative gain, applied per call
    pub kd: f32,
    /// derivative low-pass gain in `[0, 1]`, `1` disables filtering
    pub kg: f32,
    /// back-calculation gain of the anti-windup feedback
    pub kc: f32,
    /// lower bound of the output and of the integrator
    pub i_min: f32,
    /// upper bound of the output and of the integrator
    pub i_max: f32,
}

/// Digital PID with output clamping and back-calculation anti-windup.
///
/// Gains are discrete: the caller folds its sample period into `ki` and
/// `kd`. The integrator never leaves `[i_min, i_max]`.
#[derive(Debug, Default)]
pub struct PID {
    pub param: Factors,

    i_sum: f32,
    sat_err: f32,
    last_e: f32,
    d_filt: f32,
}

// `f32::clamp` panics on inverted bounds, which must not happen in a control tick.
#[inline]
fn limit(x: f32, min: f32, max: f32) -> f32 {
    x.max(min).min(max)
}

impl PID {
    pub fn new(param: Factors) -> Self {
        Self {
            param,
            ..Default::default()
        }
    }

    /// Clears the integrator, the saturation memory and the derivative state.
    pub fn reset(&mut self) {
        self.i_sum = 0.;
        self.sat_err = 0.;
        self.last_e = 0.;
        self.d_filt = 0.;
    }

    pub fn integral(&self) -> f32 {
        self.i_sum
    }

    /// `output - unsaturated` of the last PI/PD/PID call, zero when it was in range.
    pub fn saturation_error(&self) -> f32 {
        self.sat_err
    }

    pub fn p_transfer(&self, e: f32) -> f32 {
        limit(self.param.kp * e, self.param.i_min, self.param.i_max)
    }

    pub fn pi_transfer(&mut self, e: f32) -> f32 {
        let sat = self.param.kp * e + self.i_sum;
        self.saturate_and_integrate(e, sat)
    }

    pub fn pd_transfer(&mut self, e: f32) -> f32 {
        let d = self.derivative(e);
        let sat = self.param.kp * e + d;
        let out = limit(sat, self.param.i_min, self.param.i_max);
        self.sat_err = out - sat;
        out
    }

    pub fn pid_transfer(&mut self, e: f32) -> f32 {
        let d = self.derivative(e);
        let sat = self.param.kp * e + self.i_sum + d;
        self.saturate_and_integrate(e, sat)
    }

    fn saturate_and_integrate(&mut self, e: f32, sat: f32) -> f32 {
        let Factors {
            ki, kc, i_min, i_max, ..
        } = self.param;

        let out = limit(sat, i_min, i_max);
        self.sat_err = out - sat;
        self.i_sum = limit(self.i_sum + ki * e + kc * self.sat_err, i_min, i_max);
        out
    }

    fn derivative(&mut self, e: f32) -> f32 {
        let raw = self.param.kd * (e - self.last_e);
        self.last_e = e;
        self.d_filt += self.param.kg * (raw - self.d_filt);
        self.d_filt
    }
}
