//! Integration tests for the kaleidoscope controller and its hosts.
//!
//! These drive the public API the way a host would: build from a config,
//! start an [`Animation`], tick it, and inspect what was drawn.

use std::f32::consts::TAU;

use kaleidoscope::prelude::*;
use kaleidoscope::{rotate, DrawCommand, SymmetryConfig, WedgeLayout};

fn seeded(config: KaleidoscopeConfig) -> Kaleidoscope {
    Kaleidoscope::new(config.with_seed(2024)).unwrap()
}

// ============================================================================
// Geometry
// ============================================================================

#[test]
fn test_rotation_step_and_wedge_area() {
    for corner in 3..=16 {
        for (w, h) in [(500.0, 500.0), (100.0, 100.0), (640.0, 360.0)] {
            let k = seeded(KaleidoscopeConfig::new().with_corner(corner).with_size(w, h));
            let step = k.symmetry().rotation_step;
            assert!((step - TAU / corner as f32).abs() < 1e-6);
            assert!(k.wedge().has_area(), "corner {} on {}x{}", corner, w, h);
        }
    }
}

#[test]
fn test_symmetry_group_closes() {
    let sym = SymmetryConfig::new(500.0, 500.0, 7);
    let start = Vec2::new(120.0, 40.0);
    let end = (0..7).fold(start, |p, _| rotate(p, sym.center, sym.rotation_step));
    assert!((end - start).length() < 1e-2, "drifted to {:?}", end);
}

#[test]
fn test_both_layouts_occur() {
    let right = seeded(KaleidoscopeConfig::new().with_corner(4));
    let left = seeded(KaleidoscopeConfig::new().with_corner(12));
    assert_eq!(right.wedge().layout(), WedgeLayout::RotatedRight);
    assert_eq!(left.wedge().layout(), WedgeLayout::RotatedLeft);
}

// ============================================================================
// Spawning and culling
// ============================================================================

#[test]
fn test_spawned_points_are_contained() {
    for corner in [3, 4, 5, 6, 8, 12] {
        let mut k = seeded(KaleidoscopeConfig::new().with_corner(corner));
        let points: Vec<Vec2> = (0..500).map(|_| k.spawn_position()).collect();
        let contained = points.iter().filter(|p| k.is_in_range(**p)).count();
        assert!(contained >= 495, "corner {}: {} of 500", corner, contained);
    }
}

#[test]
fn test_quantity_holds_after_every_frame() {
    let mut k = seeded(KaleidoscopeConfig::new().with_quantity(17));
    let mut list = DrawList::new(500.0, 500.0, k.background());
    for _ in 0..300 {
        let stats = k.frame(&mut list);
        assert_eq!(stats.particles, 17);
        assert_eq!(k.particles().len(), 17);
    }
}

#[test]
fn test_survivors_stay_in_wedge() {
    let mut k = seeded(KaleidoscopeConfig::new().with_corner(5).with_quantity(40));
    k.populate();
    for _ in 0..200 {
        k.advance();
        let outside = k
            .particles()
            .iter()
            .filter(|p| !k.is_in_range(p.position()))
            .count();
        // Freshly spawned boundary samples are the only allowed exception.
        assert!(outside <= 1);
    }
}

#[test]
fn test_culled_particle_is_replaced_not_reused() {
    let config = KaleidoscopeConfig::new()
        .with_corner(4)
        .with_size(100.0, 100.0)
        .with_quantity(1);
    let mut k = seeded(config);
    k.populate();

    let mut replaced = 0;
    for _ in 0..1000 {
        let before = k.particles()[0].position();
        let stats = k.advance();
        let after = k.particles()[0].position();
        if stats.culled == 1 {
            replaced += 1;
            assert_ne!(after, before + Vec2::new(0.0, 1.0));
        } else {
            assert_eq!(after, before + Vec2::new(0.0, 1.0));
        }
    }
    assert!(replaced > 0);
}

// ============================================================================
// Scenarios
// ============================================================================

#[test]
fn test_corner_four_single_particle_thousand_frames() {
    let config = KaleidoscopeConfig::new()
        .with_corner(4)
        .with_size(100.0, 100.0)
        .with_quantity(1);
    let mut anim = Animation::from_config(config.with_seed(9), ManualScheduler::new()).unwrap();
    let mut list = DrawList::new(100.0, 100.0, Color::WHITE);

    anim.start(&mut list);
    let first = anim.kaleidoscope().particles()[0].position();
    assert!(first.x >= 0.0 && first.x <= 50.0);

    for _ in 0..1000 {
        assert!(anim.tick(&mut list));
        let particles = anim.kaleidoscope().particles();
        assert_eq!(particles.len(), 1);
        assert!(particles[0].position().x <= 50.0);
    }
    assert_eq!(anim.frames_rendered(), 1001);
}

#[test]
fn test_corner_one_is_rejected() {
    let err = Kaleidoscope::new(KaleidoscopeConfig::new().with_corner(1)).err();
    assert!(matches!(err, Some(ConfigError::InvalidCorner(1))));
}

#[test]
fn test_degenerate_sizes_are_rejected() {
    for (w, h) in [(0.0, 500.0), (500.0, 0.0), (-10.0, 10.0)] {
        let err = Kaleidoscope::new(KaleidoscopeConfig::new().with_size(w, h)).err();
        assert!(matches!(err, Some(ConfigError::InvalidDimensions { .. })));
    }
}

#[test]
fn test_oversized_configs_are_rejected_without_panicking() {
    let err = Kaleidoscope::new(KaleidoscopeConfig::new().with_quantity(usize::MAX / 2)).err();
    assert!(matches!(err, Some(ConfigError::QuantityTooLarge(_))));

    let config = KaleidoscopeConfig::from_json_str(r#"{ "quantity": 9223372036854775807 }"#).unwrap();
    let err = Kaleidoscope::new(config).err();
    assert!(matches!(err, Some(ConfigError::QuantityTooLarge(_))));

    let err = Kaleidoscope::new(KaleidoscopeConfig::new().with_size(1e9, 1e9)).err();
    assert!(matches!(err, Some(ConfigError::DimensionsTooLarge { .. })));
}

// ============================================================================
// Rendering
// ============================================================================

#[test]
fn test_frame_paints_corner_plus_one_copies() {
    let mut k = seeded(KaleidoscopeConfig::new().with_corner(6).with_quantity(10));
    let mut list = DrawList::new(500.0, 500.0, k.background());
    let stats = k.frame(&mut list);

    assert_eq!(stats.paints, 10 * 7);
    assert_eq!(list.rects().count(), 70);
    assert_eq!(list.lines().count(), 6);
    assert_eq!(list.commands().first(), Some(&DrawCommand::Clear));
}

#[test]
fn test_rotated_copies_lie_on_symmetry_orbit() {
    let mut k = seeded(KaleidoscopeConfig::new().with_corner(5).with_quantity(1));
    let mut list = DrawList::new(500.0, 500.0, k.background());
    k.frame(&mut list);

    let particle = k.particles()[0].position();
    let center = k.symmetry().center;
    let radius = (particle - center).length();
    for (origin, _, _) in list.rects() {
        assert!(((origin - center).length() - radius).abs() < 1e-2);
    }
}

#[test]
fn test_raster_frame_shows_particles_and_guides() {
    let config = KaleidoscopeConfig::new()
        .with_corner(4)
        .with_size(200.0, 200.0)
        .with_colors(["#000000"])
        .with_quantity(5);
    let mut anim = Animation::from_config(config.with_seed(3), ManualScheduler::new()).unwrap();
    let mut surface = RasterSurface::new(200, 200, Color::WHITE);
    anim.start(&mut surface);

    let black = surface.image().pixels().filter(|p| p.0 == [0, 0, 0, 255]).count();
    assert!(black > 0);
    // The guide toward the top-left corner passes through (50, 50); a
    // particle may have been painted over it.
    let guide = surface.pixel(50, 50).unwrap();
    assert!(guide == [150, 150, 150, 255] || guide == [0, 0, 0, 255], "{:?}", guide);
}

#[test]
fn test_stopped_animation_never_draws_again() {
    let mut anim =
        Animation::from_config(KaleidoscopeConfig::new().with_seed(4), ManualScheduler::new())
            .unwrap();
    let mut list = DrawList::new(500.0, 500.0, Color::WHITE);
    anim.start(&mut list);
    anim.stop();

    let snapshot = list.commands().to_vec();
    for _ in 0..5 {
        assert!(!anim.tick(&mut list));
    }
    assert_eq!(list.commands(), snapshot.as_slice());
}
