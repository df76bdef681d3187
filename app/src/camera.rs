use glam::{Mat4, Vec2, Vec3, Vec4};

const ORBIT_SPEED: f32 = 0.008;
const MIN_PITCH: f32 = 0.05;
const MAX_PITCH: f32 = 1.45;
const MIN_DISTANCE: f32 = 20.0;
const MAX_DISTANCE: f32 = 1200.0;

// Orbit camera around a fixed target. Starts with the eye near (0, 45, 160)
// and a 50° vertical field of view.
pub struct OrbitCamera {
    target: Vec3,
    yaw: f32,
    pitch: f32,
    distance: f32,
    fov: f32,
    aspect: f32,
    near: f32,
    far: f32,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self {
            target: Vec3::ZERO,
            yaw: 0.0,
            pitch: 0.274, // asin(45 / 166.2)
            distance: 166.2,
            fov: 50f32.to_radians(),
            aspect: 1.0,
            near: 0.1,
            far: 4000.0,
        }
    }
}

impl OrbitCamera {
    pub fn position(&self) -> Vec3 {
        let (sy, cy) = self.yaw.sin_cos();
        let (sp, cp) = self.pitch.sin_cos();
        self.target + Vec3::new(sy * cp, sp, cy * cp) * self.distance
    }

    // Aspect follows the render target; recomputed by the host on resize.
    pub fn set_aspect(&mut self, aspect: f32) {
        if aspect.is_finite() && aspect > 0.0 {
            self.aspect = aspect;
        }
    }

    pub fn orbit(&mut self, dx: f32, dy: f32) {
        self.yaw -= dx * ORBIT_SPEED;
        self.pitch = (self.pitch + dy * ORBIT_SPEED).clamp(MIN_PITCH, MAX_PITCH);
    }

    pub fn zoom(&mut self, scroll: f32) {
        self.distance = (self.distance * (1.0 - scroll * 0.001)).clamp(MIN_DISTANCE, MAX_DISTANCE);
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position(), self.target, Vec3::Y)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov, self.aspect, self.near, self.far)
    }

    // Cast the cursor into the scene and intersect the y = 0 water plane.
    // Returns the world XZ hit point.
    pub fn pick_water_plane(&self, screen: Vec2, viewport: Vec2) -> Option<Vec2> {
        let ndc = Vec2::new(
            screen.x / viewport.x * 2.0 - 1.0,
            1.0 - screen.y / viewport.y * 2.0,
        );
        let inverse = (self.projection_matrix() * self.view_matrix()).inverse();
        let near = inverse * Vec4::new(ndc.x, ndc.y, -1.0, 1.0);
        let far = inverse * Vec4::new(ndc.x, ndc.y, 1.0, 1.0);
        if near.w == 0.0 || far.w == 0.0 {
            return None;
        }
        let origin = near.truncate() / near.w;
        let end = far.truncate() / far.w;
        let dir = (end - origin).normalize();
        if dir.y.abs() < 1e-6 {
            return None;
        }
        let t = -origin.y / dir.y;
        if t < 0.0 {
            return None;
        }
        let hit = origin + dir * t;
        Some(Vec2::new(hit.x, hit.z))
    }
}
