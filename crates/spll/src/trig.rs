// shadowed by the inherent std methods in test builds
#[cfg_attr(test, allow(unused_imports))]
use micromath::F32Ext;

/// Sine and cosine of an angle given in degrees.
///
/// The phase detector only needs this one evaluation per sample, so the
/// accuracy of the implementation bounds how tightly the loop can lock.
pub trait SinCos {
    /// returns `(sin, cos)`
    fn sin_cos_deg(&self, deg: f32) -> (f32, f32);
}

/// Polynomial approximation from `micromath`, good to a few 1e-3.
#[derive(Debug, Default, Clone, Copy)]
pub struct Micromath;

impl SinCos for Micromath {
    fn sin_cos_deg(&self, deg: f32) -> (f32, f32) {
        let rad = deg.to_radians();
        (rad.sin(), rad.cos())
    }
}

impl<F: Fn(f32) -> (f32, f32)> SinCos for F {
    fn sin_cos_deg(&self, deg: f32) -> (f32, f32) {
        self(deg)
    }
}
