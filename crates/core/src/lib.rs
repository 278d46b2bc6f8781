//! Core shared types (renderer-agnostic): error taxonomy, load state,
//! spin kinematics, camera, brand material and typed page content.

pub use glam::{Mat4, Vec3, vec3};

pub mod camera;
pub mod content;
pub mod error;
pub mod material;
pub mod spin;
pub mod state;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_spin_is_identity_matrix() {
        let s = spin::Spin::new();
        assert_eq!(s.model_matrix(), Mat4::IDENTITY);
    }

    #[test]
    fn camera_pv_is_finite() {
        let cam = camera::Camera::showcase(1.0).with_aspect(16.0 / 9.0);
        let pv = cam.proj_view();
        let a = pv.to_cols_array();
        assert!(a.iter().all(|f| f.is_finite()));
    }

    #[test]
    fn spun_matrix_is_finite() {
        let mut s = spin::Spin::new();
        s.advance(123.456);
        let a = s.model_matrix().to_cols_array();
        assert!(a.iter().all(|f| f.is_finite()));
    }
}
