//! Camera and ray types shared with the frontends.
//!
//! These types avoid referencing platform-specific APIs and are suitable for
//! use on both native and web targets. The frontends consume them to build
//! camera matrices; the core uses them for picking.

use glam::{Mat4, Vec2, Vec3, Vec4};

/// Simple right-handed camera description with perspective projection.
#[derive(Clone, Debug, PartialEq)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub aspect: f32,
    pub fovy_radians: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Camera {
    pub fn new(eye: Vec3, target: Vec3, fovy_radians: f32, znear: f32, zfar: f32) -> Self {
        Self {
            eye,
            target,
            up: Vec3::Y,
            aspect: 1.0,
            fovy_radians,
            znear,
            zfar,
        }
    }

    /// Compute the clip-space projection matrix.
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy_radians, self.aspect, self.znear, self.zfar)
    }
    /// Compute the view matrix that transforms world to view space.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    pub fn view_proj(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    #[inline]
    pub fn forward(&self) -> Vec3 {
        (self.target - self.eye).normalize_or_zero()
    }

    /// Camera right axis in world space.
    #[inline]
    pub fn right(&self) -> Vec3 {
        let r = self.forward().cross(self.up);
        if r.length_squared() > 1e-12 {
            r.normalize()
        } else {
            Vec3::X
        }
    }

    /// Camera up axis in world space (orthogonal to forward and right).
    #[inline]
    pub fn up_axis(&self) -> Vec3 {
        self.right().cross(self.forward()).normalize_or_zero()
    }

    #[inline]
    pub fn look_at(&mut self, target: Vec3) {
        self.target = target;
    }

    /// World-space ray through a device-normalized point (x right, y up, both in -1..1).
    pub fn ray_from_ndc(&self, ndc: Vec2) -> Ray {
        let inv = self.view_proj().inverse();
        let p_near = inv * Vec4::new(ndc.x, ndc.y, 0.0, 1.0);
        let p_far = inv * Vec4::new(ndc.x, ndc.y, 1.0, 1.0);
        let p_near: Vec3 = p_near.truncate() / p_near.w;
        let p_far: Vec3 = p_far.truncate() / p_far.w;
        Ray {
            origin: self.eye,
            direction: (p_far - p_near).normalize(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    #[inline]
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn camera() -> Camera {
        Camera::new(
            Vec3::new(0.0, 0.0, 10.0),
            Vec3::ZERO,
            60f32.to_radians(),
            0.1,
            100.0,
        )
    }

    #[test]
    fn center_ray_points_at_target() {
        let ray = camera().ray_from_ndc(Vec2::ZERO);
        assert!((ray.direction - Vec3::NEG_Z).length() < 1e-4);
        assert_eq!(ray.origin, Vec3::new(0.0, 0.0, 10.0));
    }

    #[test]
    fn positive_ndc_y_points_up() {
        let ray = camera().ray_from_ndc(Vec2::new(0.0, 0.5));
        assert!(ray.direction.y > 0.0);
        let ray = camera().ray_from_ndc(Vec2::new(0.5, 0.0));
        assert!(ray.direction.x > 0.0);
    }

    #[test]
    fn axes_are_orthonormal() {
        let mut cam = camera();
        cam.eye = Vec3::new(3.0, 4.0, 5.0);
        let (f, r, u) = (cam.forward(), cam.right(), cam.up_axis());
        assert!(f.dot(r).abs() < 1e-5);
        assert!(f.dot(u).abs() < 1e-5);
        assert!((r.length() - 1.0).abs() < 1e-5);
        assert!(u.y > 0.0);
    }
}
