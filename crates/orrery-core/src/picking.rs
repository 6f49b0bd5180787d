//! Ray casting against body spheres.

use crate::body::BodyId;
use crate::state::{Camera, Ray};
use glam::{Quat, Vec2, Vec3};
use std::f32::consts::PI;

#[inline]
pub fn ray_sphere(ray_origin: Vec3, ray_dir: Vec3, center: Vec3, radius: f32) -> Option<f32> {
    let oc = ray_origin - center;
    let b = oc.dot(ray_dir);
    let c = oc.dot(oc) - radius * radius;
    let disc = b * b - c;
    if disc < 0.0 {
        return None;
    }
    let t = -b - disc.sqrt();
    (t >= 0.0).then_some(t)
}

/// A sphere the picker can hit.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PickTarget {
    pub id: BodyId,
    pub center: Vec3,
    pub radius: f32,
    /// World-from-local rotation of the body (its spin).
    pub orientation: Quat,
    pub uv_mapped: bool,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PickHit {
    pub id: BodyId,
    pub distance: f32,
    pub point: Vec3,
    pub uv: Option<Vec2>,
}

/// Equirectangular coordinates of a unit normal given in the body's local frame.
///
/// u wraps around the equator starting at -X, v runs from the south pole (0)
/// to the north pole (1).
pub fn sphere_uv(local_normal: Vec3) -> Vec2 {
    let n = local_normal.normalize_or_zero();
    let theta = n.y.clamp(-1.0, 1.0).acos();
    let mut phi = n.z.atan2(-n.x);
    if phi < 0.0 {
        phi += 2.0 * PI;
    }
    Vec2::new(phi / (2.0 * PI), 1.0 - theta / PI)
}

impl PickTarget {
    pub fn intersect(&self, ray: &Ray) -> Option<PickHit> {
        let distance = ray_sphere(ray.origin, ray.direction, self.center, self.radius)?;
        let point = ray.at(distance);
        let uv = self.uv_mapped.then(|| {
            let local = self.orientation.inverse() * (point - self.center);
            sphere_uv(local)
        });
        Some(PickHit {
            id: self.id,
            distance,
            point,
            uv,
        })
    }
}

/// Nearest hit along `ray`, or `None` when nothing is hit.
pub fn pick_nearest<'a, I>(ray: &Ray, targets: I) -> Option<PickHit>
where
    I: IntoIterator<Item = &'a PickTarget>,
{
    targets
        .into_iter()
        .filter_map(|t| t.intersect(ray))
        .min_by(|a, b| a.distance.total_cmp(&b.distance))
}

/// Pick under a device-normalized pointer position.
pub fn pick_at<'a, I>(camera: &Camera, ndc: Vec2, targets: I) -> Option<PickHit>
where
    I: IntoIterator<Item = &'a PickTarget>,
{
    pick_nearest(&camera.ray_from_ndc(ndc), targets)
}

/// Remembers the last surface coordinate seen on a focused body.
#[derive(Clone, Copy, Debug, Default)]
pub struct SurfaceProbe {
    last_uv: Option<Vec2>,
}

impl SurfaceProbe {
    /// Records the uv of `hit` if it has one and returns the last known uv.
    pub fn observe(&mut self, hit: Option<&PickHit>) -> Option<Vec2> {
        if let Some(uv) = hit.and_then(|h| h.uv) {
            self.last_uv = Some(uv);
        }
        self.last_uv
    }

    #[inline]
    pub fn last_uv(&self) -> Option<Vec2> {
        self.last_uv
    }

    pub fn reset(&mut self) {
        self.last_uv = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn target(id: u32, center: Vec3, radius: f32) -> PickTarget {
        PickTarget {
            id: BodyId(id),
            center,
            radius,
            orientation: Quat::IDENTITY,
            uv_mapped: true,
        }
    }

    #[test]
    fn uv_of_axis_points() {
        let north = sphere_uv(Vec3::Y);
        assert!((north.y - 1.0).abs() < 1e-6);
        let south = sphere_uv(Vec3::NEG_Y);
        assert!(south.y.abs() < 1e-6);
        let front = sphere_uv(Vec3::Z);
        assert!((front.x - 0.25).abs() < 1e-6);
        assert!((front.y - 0.5).abs() < 1e-6);
        let back = sphere_uv(Vec3::NEG_X);
        assert!(back.x.abs() < 1e-6);
    }

    #[test]
    fn spin_rotates_uv() {
        let ray = Ray {
            origin: Vec3::new(0.0, 0.0, 10.0),
            direction: Vec3::NEG_Z,
        };
        let mut t = target(0, Vec3::ZERO, 1.0);
        let still = t.intersect(&ray).unwrap().uv.unwrap();
        t.orientation = Quat::from_rotation_y(PI / 2.0);
        let spun = t.intersect(&ray).unwrap().uv.unwrap();
        assert!((still.x - spun.x).abs() > 0.1);
        assert!((still.y - spun.y).abs() < 1e-5);
    }

    #[test]
    fn unmapped_target_has_no_uv() {
        let ray = Ray {
            origin: Vec3::new(0.0, 0.0, 10.0),
            direction: Vec3::NEG_Z,
        };
        let mut t = target(0, Vec3::ZERO, 1.0);
        t.uv_mapped = false;
        let hit = t.intersect(&ray).unwrap();
        assert!(hit.uv.is_none());
        assert!((hit.distance - 9.0).abs() < 1e-5);
    }

    #[test]
    fn probe_keeps_last_uv() {
        let mut probe = SurfaceProbe::default();
        assert!(probe.observe(None).is_none());
        let hit = PickHit {
            id: BodyId(1),
            distance: 1.0,
            point: Vec3::ZERO,
            uv: Some(Vec2::new(0.3, 0.7)),
        };
        assert_eq!(probe.observe(Some(&hit)), Some(Vec2::new(0.3, 0.7)));
        assert_eq!(probe.observe(None), Some(Vec2::new(0.3, 0.7)));
        probe.reset();
        assert!(probe.last_uv().is_none());
    }
}
