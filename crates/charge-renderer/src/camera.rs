//! Orbit camera for the 3D charge view

use glam::{Mat4, Quat, Vec2, Vec3, Vec4};

/// Zoom range around the fitted distance, as a factor either way
const ZOOM_RANGE: f32 = 1.0e3;

/// Camera orbiting a target point
#[derive(Debug, Clone, Copy)]
pub struct Camera {
    pub distance: f32,
    pub rotation: Quat,
    pub target: Vec3,
    pub aspect: f32,
    pub fovy: f32,
    pub znear: f32,
    pub zfar: f32,
    /// Closest and farthest orbit allowed by `zoom`, set by `fit_to`
    pub min_distance: f32,
    pub max_distance: f32,
}

impl Camera {
    pub fn new(width: f32, height: f32) -> Self {
        let rotation = Quat::from_rotation_y(0.6) * Quat::from_rotation_x(-0.4);

        Self {
            distance: 10.0,
            rotation,
            target: Vec3::ZERO,
            aspect: width / height.max(1.0),
            fovy: 45.0_f32.to_radians(),
            znear: 0.01,
            zfar: 1000.0,
            min_distance: 10.0 / ZOOM_RANGE,
            max_distance: 10.0 * ZOOM_RANGE,
        }
    }

    pub fn position(&self) -> Vec3 {
        let offset = self.rotation * Vec3::new(0.0, 0.0, self.distance);
        self.target + offset
    }

    pub fn rotate(&mut self, delta_x: f32, delta_y: f32) {
        let up = self.rotation * Vec3::Y;
        let yaw_rotation = Quat::from_axis_angle(up, delta_x);

        let right = self.rotation * Vec3::X;
        let pitch_rotation = Quat::from_axis_angle(right, -delta_y);

        self.rotation = yaw_rotation * pitch_rotation * self.rotation;
        self.rotation = self.rotation.normalize();
    }

    /// Multiply the orbit distance by `factor` (< 1 moves closer)
    pub fn zoom(&mut self, factor: f32) {
        self.distance = (self.distance * factor).clamp(self.min_distance, self.max_distance);
        self.update_clip_planes();
    }

    /// Center the orbit on the box `min..max` and back off far enough to
    /// see all of it, whatever its scale. Zoom limits follow the fitted
    /// distance. Non-finite bounds leave the camera untouched.
    pub fn fit_to(&mut self, min: Vec3, max: Vec3) {
        if !min.is_finite() || !max.is_finite() {
            return;
        }
        self.target = (min + max) * 0.5;

        let radius = (max - min).length() * 0.5;
        let radius = if radius > 0.0 {
            radius
        } else if self.target.length() > 0.0 {
            // Single point away from the origin
            self.target.length() * 0.1
        } else {
            1.0
        };

        self.distance = radius / (self.fovy * 0.5).sin() * 1.2;
        self.min_distance = self.distance / ZOOM_RANGE;
        self.max_distance = self.distance * ZOOM_RANGE;
        self.update_clip_planes();
    }

    fn update_clip_planes(&mut self) {
        self.znear = self.distance * 0.01;
        self.zfar = self.distance * 100.0;
    }

    pub fn build_view_projection_matrix(&self) -> Mat4 {
        let position = self.position();
        let rotation_matrix = Mat4::from_quat(self.rotation.conjugate());
        let translation_matrix = Mat4::from_translation(-position);
        let view = rotation_matrix * translation_matrix;
        let proj = Mat4::perspective_rh(self.fovy, self.aspect, self.znear, self.zfar);
        proj * view
    }

    /// Project a world-space point into a viewport of `size` pixels.
    ///
    /// The result is relative to the viewport's top-left corner with y
    /// pointing down. Points behind the camera give `None`.
    pub fn project(&self, world: Vec3, size: Vec2) -> Option<Vec2> {
        let clip = self.build_view_projection_matrix() * Vec4::new(world.x, world.y, world.z, 1.0);
        if clip.w <= 0.0 {
            return None;
        }

        let ndc = clip.truncate() / clip.w;
        Some(Vec2::new(
            (ndc.x + 1.0) * 0.5 * size.x,
            (1.0 - ndc.y) * 0.5 * size.y,
        ))
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.aspect = width / height.max(1.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_target_projects_to_center() {
        let mut camera = Camera::new(800.0, 600.0);
        camera.target = Vec3::new(1.0, 2.0, -3.0);

        let screen = camera.project(camera.target, Vec2::new(800.0, 600.0)).unwrap();

        assert_relative_eq!(screen.x, 400.0, epsilon = 1.0e-3);
        assert_relative_eq!(screen.y, 300.0, epsilon = 1.0e-3);
    }

    #[test]
    fn test_point_behind_camera_is_culled() {
        let camera = Camera::new(800.0, 600.0);
        let behind = camera.position() + (camera.position() - camera.target);

        assert!(camera.project(behind, Vec2::new(800.0, 600.0)).is_none());
    }

    #[test]
    fn test_fit_to_centers_on_bounds() {
        let mut camera = Camera::new(800.0, 600.0);
        camera.fit_to(Vec3::new(-2.0, 0.0, 0.0), Vec3::new(4.0, 2.0, 0.0));

        assert_eq!(camera.target, Vec3::new(1.0, 1.0, 0.0));
        assert!(camera.distance > 3.0);
        assert!(camera.znear < camera.distance && camera.zfar > camera.distance);
    }

    #[test]
    fn test_zoom_is_clamped_around_fitted_distance() {
        let mut camera = Camera::new(800.0, 600.0);
        camera.fit_to(Vec3::ZERO, Vec3::new(1.0e-6, 0.0, 0.0));
        let fitted = camera.distance;

        camera.zoom(0.0);
        assert_relative_eq!(camera.distance, fitted / ZOOM_RANGE, max_relative = 1.0e-6);

        camera.zoom(1.0e12);
        assert_relative_eq!(camera.distance, fitted * ZOOM_RANGE, max_relative = 1.0e-6);
    }

    /// Screen separation of two points on the x axis after framing them
    fn fitted_separation(length: f32) -> Option<f32> {
        let size = Vec2::new(800.0, 600.0);
        let mut camera = Camera::new(size.x, size.y);
        camera.rotation = Quat::IDENTITY;

        let a = Vec3::ZERO;
        let b = Vec3::new(length, 0.0, 0.0);
        camera.fit_to(a, b);

        let pa = camera.project(a, size)?;
        let pb = camera.project(b, size)?;
        Some(pa.distance(pb))
    }

    #[test]
    fn test_fit_to_frames_nanometre_scene() {
        let separation = fitted_separation(1.0e-9).unwrap();
        assert!(separation > 100.0 && separation < 800.0, "{separation}");
    }

    #[test]
    fn test_fit_to_frames_planetary_scene() {
        let separation = fitted_separation(1.0e7).unwrap();
        assert!(separation > 100.0 && separation < 800.0, "{separation}");
    }

    #[test]
    fn test_fit_to_same_separation_at_any_scale() {
        let metre = fitted_separation(1.0).unwrap();
        let millimetre = fitted_separation(1.0e-3).unwrap();

        assert_relative_eq!(metre, millimetre, max_relative = 1.0e-3);
    }

    #[test]
    fn test_fit_to_ignores_non_finite_bounds() {
        let mut camera = Camera::new(800.0, 600.0);
        camera.fit_to(Vec3::ZERO, Vec3::ONE);
        let before = (camera.target, camera.distance);

        camera.fit_to(Vec3::ZERO, Vec3::new(f32::NAN, 0.0, 0.0));
        assert_eq!((camera.target, camera.distance), before);
    }

    #[test]
    fn test_rotate_keeps_distance() {
        let mut camera = Camera::new(800.0, 600.0);
        camera.rotate(0.7, -0.2);

        assert_relative_eq!(
            (camera.position() - camera.target).length(),
            camera.distance,
            epsilon = 1.0e-4
        );
    }
}
