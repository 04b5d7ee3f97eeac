use proptest::prelude::*;
use spll::pid::{Factors, PID};

fn factors() -> impl Strategy<Value = Factors> {
    (
        0f32..2000.,
        0f32..100.,
        0f32..50.,
        0f32..=1.,
        0f32..50.,
        -1000f32..1000.,
        0f32..2000.,
    )
        .prop_map(|(kp, ki, kd, kg, kc, i_min, width)| Factors {
            kp,
            ki,
            kd,
            kg,
            kc,
            i_min,
            i_max: i_min + width,
        })
}

fn straddling_zero() -> impl Strategy<Value = Factors> {
    factors().prop_map(|mut f| {
        f.i_min = -f.i_min.abs();
        f.i_max = f.i_max.abs();
        f
    })
}

fn errors() -> impl Strategy<Value = Vec<f32>> {
    prop::collection::vec(-1e3f32..1e3, 1..200)
}

proptest! {
    #[test]
    fn pi_output_and_integral_within_bounds(param in factors(), es in errors()) {
        let mut pid = PID::new(param);
        for e in es {
            let out = pid.pi_transfer(e);
            prop_assert!(out >= param.i_min && out <= param.i_max);
            prop_assert!(pid.integral() >= param.i_min && pid.integral() <= param.i_max);
        }
    }

    #[test]
    fn pid_output_and_integral_within_bounds(param in factors(), es in errors()) {
        let mut pid = PID::new(param);
        for e in es {
            let out = pid.pid_transfer(e);
            prop_assert!(out >= param.i_min && out <= param.i_max);
            prop_assert!(pid.integral() >= param.i_min && pid.integral() <= param.i_max);
            let out = pid.pd_transfer(e);
            prop_assert!(out >= param.i_min && out <= param.i_max);
        }
    }

    #[test]
    fn p_transfer_is_clamped_gain(param in factors(), e in -1e3f32..1e3) {
        let pid = PID::new(param);
        let out = pid.p_transfer(e);
        let raw = param.kp * e;
        if raw >= param.i_min && raw <= param.i_max {
            prop_assert_eq!(out, raw);
        } else {
            prop_assert!(out == param.i_min || out == param.i_max);
        }
    }

    #[test]
    fn reset_restores_zero_state(param in straddling_zero(), es in errors()) {
        let mut pid = PID::new(param);
        for e in es {
            pid.pi_transfer(e);
        }
        pid.reset();
        for _ in 0..10 {
            prop_assert_eq!(pid.pi_transfer(0.), 0.);
        }
    }
}
