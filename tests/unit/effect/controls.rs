use super::*;

fn approx(a: f64, b: f64) {
    assert!((a - b).abs() < 1e-9, "{a} != {b}");
}

#[test]
fn empty_json_gives_defaults() {
    let controls = EffectControls::from_json("{}").unwrap();
    assert_eq!(controls, EffectControls::default());
    assert_eq!(controls.center, Point::new(0.5, 0.5));
    assert_eq!(controls.projectile_end, Point::new(0.9, 0.5));
    assert_eq!(controls.mode, FlowMode::RadialSwirl);
}

#[test]
fn partial_json_overrides_named_keys() {
    let controls = EffectControls::from_json(
        r#"{"mode":"projectile_wake","intensity":-2.5,"center":{"x":0.25,"y":0.75}}"#,
    )
    .unwrap();
    assert_eq!(controls.mode, FlowMode::ProjectileWake);
    assert_eq!(controls.intensity, -2.5);
    assert_eq!(controls.center, Point::new(0.25, 0.75));
    assert_eq!(controls.radius, 200.0);
}

#[test]
fn malformed_json_is_a_validation_error() {
    let err = EffectControls::from_json(r#"{"intensity":"lots"}"#).unwrap_err();
    assert!(err.to_string().contains("invalid controls json"), "{err}");
}

#[test]
fn out_of_range_controls_are_rejected() {
    let err = EffectControls::from_json(r#"{"wake_decay":3.0}"#).unwrap_err();
    assert!(err.to_string().contains("wake_decay"), "{err}");

    let bad = [
        EffectControls {
            intensity: 10.5,
            ..EffectControls::default()
        },
        EffectControls {
            radius: 0.5,
            ..EffectControls::default()
        },
        EffectControls {
            flow_direction: -361.0,
            ..EffectControls::default()
        },
        EffectControls {
            projectile_speed: f64::NAN,
            ..EffectControls::default()
        },
        EffectControls {
            center: Point::new(f64::INFINITY, 0.0),
            ..EffectControls::default()
        },
    ];
    for controls in bad {
        assert!(controls.validate().is_err(), "{controls:?}");
    }
}

#[test]
fn range_edges_are_inclusive() {
    let controls = EffectControls {
        intensity: -10.0,
        radius: 1000.0,
        decay: 1.0,
        flow_strength: 0.0,
        wake_width: 5.0,
        vortex_spacing: 300.0,
        projectile_speed: 200.0,
        projectile_radius: 10.0,
        wake_decay: 0.1,
        ..EffectControls::default()
    };
    assert!(controls.validate().is_ok());
}

#[test]
fn resolve_at_reference_size_keeps_distances() {
    let params = EffectControls::default().resolve(RectI::from_size(1920, 1080), 4.0);
    assert_eq!(params.center, Point::new(960.0, 540.0));
    approx(params.radius, 200.0);
    approx(params.decay, 100.0);
    assert_eq!(params.current_time, 4.0);
}

#[test]
fn resolve_scales_distances_and_maps_points() {
    let controls = EffectControls::default();
    let params = controls.resolve(RectI::new(100, 50, 1060, 590), 1.5);
    assert_eq!(params.center, Point::new(580.0, 320.0));
    approx(params.projectile_start.x, 196.0);
    approx(params.projectile_start.y, 320.0);
    approx(params.projectile_end.x, 964.0);
    approx(params.radius, 100.0);
    approx(params.decay, 50.0);
    approx(params.wake_width, 25.0);
    approx(params.vortex_spacing, 40.0);
    approx(params.projectile_radius, 40.0);
    assert_eq!(params.projectile_speed, 30.0);
    assert_eq!(params.wake_decay, 0.5);
    assert_eq!(params.flow_direction_deg, 0.0);
}

#[test]
fn identity_follows_mode() {
    let off = EffectControls {
        intensity: 0.0,
        ..EffectControls::default()
    };
    assert!(off.is_identity());
    let flowing = EffectControls {
        mode: FlowMode::DirectionalFlow,
        ..off
    };
    assert!(!flowing.is_identity());
    let still = EffectControls {
        flow_strength: 0.0,
        ..flowing
    };
    assert!(still.is_identity());
}
