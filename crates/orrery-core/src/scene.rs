//! The default solar system.
//!
//! Distances and sizes are compressed so every planet stays visible from the
//! overview pose. Orbits are circular; only the starting phases are random.

use crate::body::{BodyKind, BodyRegistry, Orbit, SelectableBody};
use crate::error::Result;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::f32::consts::TAU;

struct PlanetDef {
    name: &'static str,
    radius: f32,
    orbit_radius: f32,
    period_secs: f32,
    spin_speed: f32,
    tilt_degrees: f32,
    color: [f32; 3],
    kind: BodyKind,
}

const SUN_RADIUS: f32 = 8.0;

const PLANETS: &[PlanetDef] = &[
    PlanetDef {
        name: "mercury",
        radius: 0.8,
        orbit_radius: 14.0,
        period_secs: 24.0,
        spin_speed: 0.1,
        tilt_degrees: 0.0,
        color: [0.62, 0.58, 0.55],
        kind: BodyKind::Rocky { bump_scale: 0.04 },
    },
    PlanetDef {
        name: "venus",
        radius: 1.4,
        orbit_radius: 20.0,
        period_secs: 40.0,
        spin_speed: -0.05,
        tilt_degrees: 177.0,
        color: [0.91, 0.78, 0.52],
        kind: BodyKind::Layered {
            cloud_altitude: 0.04,
            cloud_opacity: 0.9,
        },
    },
    PlanetDef {
        name: "earth",
        radius: 1.5,
        orbit_radius: 27.0,
        period_secs: 60.0,
        spin_speed: 0.5,
        tilt_degrees: 23.4,
        color: [0.25, 0.45, 0.85],
        kind: BodyKind::Layered {
            cloud_altitude: 0.02,
            cloud_opacity: 0.6,
        },
    },
    PlanetDef {
        name: "mars",
        radius: 1.0,
        orbit_radius: 34.0,
        period_secs: 90.0,
        spin_speed: 0.48,
        tilt_degrees: 25.2,
        color: [0.80, 0.38, 0.22],
        kind: BodyKind::Rocky { bump_scale: 0.08 },
    },
    PlanetDef {
        name: "jupiter",
        radius: 4.5,
        orbit_radius: 50.0,
        period_secs: 180.0,
        spin_speed: 1.2,
        tilt_degrees: 3.1,
        color: [0.84, 0.70, 0.55],
        kind: BodyKind::Layered {
            cloud_altitude: 0.01,
            cloud_opacity: 0.4,
        },
    },
    PlanetDef {
        name: "saturn",
        radius: 3.8,
        orbit_radius: 68.0,
        period_secs: 260.0,
        spin_speed: 1.1,
        tilt_degrees: 26.7,
        color: [0.90, 0.82, 0.60],
        kind: BodyKind::Ringed {
            ring_inner: 1.3,
            ring_outer: 2.3,
            ring_tilt: 0.47,
        },
    },
    PlanetDef {
        name: "uranus",
        radius: 2.6,
        orbit_radius: 84.0,
        period_secs: 360.0,
        spin_speed: -0.7,
        tilt_degrees: 97.8,
        color: [0.60, 0.85, 0.90],
        kind: BodyKind::Ringed {
            ring_inner: 1.6,
            ring_outer: 2.0,
            ring_tilt: 1.7,
        },
    },
    PlanetDef {
        name: "neptune",
        radius: 2.5,
        orbit_radius: 98.0,
        period_secs: 460.0,
        spin_speed: 0.75,
        tilt_degrees: 28.3,
        color: [0.25, 0.40, 0.95],
        kind: BodyKind::Rocky { bump_scale: 0.0 },
    },
];

/// Star plus eight planets. The same seed always yields the same layout.
pub fn default_solar_system(seed: u64) -> Result<BodyRegistry> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut registry = BodyRegistry::new();

    registry.insert(
        SelectableBody::new("sun", BodyKind::Star { corona_intensity: 1.6 }, SUN_RADIUS)
            .with_spin(0.05, 0.0)
            .with_color([1.0, 0.78, 0.35])
            .with_texture("sun"),
    )?;

    for def in PLANETS {
        let orbit = Orbit {
            radius: def.orbit_radius,
            angular_speed: TAU / def.period_secs,
            phase: rng.gen_range(0.0..TAU),
            inclination: rng.gen_range(-0.03..0.03),
        };
        registry.insert(
            SelectableBody::new(def.name, def.kind, def.radius)
                .with_orbit(orbit)
                .with_spin(def.spin_speed, def.tilt_degrees.to_radians())
                .with_color(def.color)
                .with_texture(def.name),
        )?;
    }
    log::info!("[scene] {} bodies, seed {seed}", registry.len());
    Ok(registry)
}
