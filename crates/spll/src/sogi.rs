/// Damping of the generator, close to sqrt(2).
pub const SOGI_K: f32 = 1.414;

/// Second-order generalized integrator: turns one input into an in-phase
/// (`s1`) and a quadrature (`s2`) component of its fundamental near `w`.
#[derive(Debug, Default)]
pub struct SOGI {
    s1: f32,
    s2: f32,
}

impl SOGI {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        self.s1 = 0.;
        self.s2 = 0.;
    }

    /// One forward-Euler step of period `dt` at angular frequency `w`.
    /// Returns `(alpha, beta)`.
    pub fn update(&mut self, v: f32, w: f32, dt: f32) -> (f32, f32) {
        let u = (SOGI_K * (v - self.s1) - self.s2) * w;
        self.s1 += dt * u;
        self.s2 += dt * w * self.s1;
        (self.s1, self.s2)
    }

    pub fn alpha(&self) -> f32 {
        self.s1
    }

    pub fn beta(&self) -> f32 {
        self.s2
    }
}

/// q-axis of the (alpha, beta) pair rotated by the angle with `(sin, cos)`.
/// Zero when the angle lines up with the signal.
pub fn park_q(alpha: f32, beta: f32, (sin, cos): (f32, f32)) -> f32 {
    cos * beta - sin * alpha
}
