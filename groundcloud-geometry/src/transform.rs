//! Rigid transforms between reference frames.

use glam::{DQuat, DVec3, EulerRot};
use std::ops::Mul;

/// A rotation followed by a translation, mapping child-frame coordinates into
/// a parent frame.
///
/// The rotation is always a unit quaternion, so points and free vectors are
/// transformed consistently: vectors get the rotation only.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RigidTransform {
    rotation: DQuat,
    translation: DVec3,
}

impl RigidTransform {
    pub const IDENTITY: Self = Self {
        rotation: DQuat::IDENTITY,
        translation: DVec3::ZERO,
    };

    /// Build from a translation and rotation. The rotation is renormalized.
    pub fn new(translation: DVec3, rotation: DQuat) -> Self {
        Self {
            rotation: rotation.normalize(),
            translation,
        }
    }

    /// Build from a translation and fixed-axis roll/pitch/yaw angles (radians).
    pub fn from_rpy(translation: DVec3, roll: f64, pitch: f64, yaw: f64) -> Self {
        Self::new(translation, DQuat::from_euler(EulerRot::ZYX, yaw, pitch, roll))
    }

    pub fn from_translation(translation: DVec3) -> Self {
        Self {
            rotation: DQuat::IDENTITY,
            translation,
        }
    }

    pub fn rotation(&self) -> DQuat {
        self.rotation
    }

    pub fn translation(&self) -> DVec3 {
        self.translation
    }

    pub fn transform_point(&self, point: DVec3) -> DVec3 {
        self.rotation * point + self.translation
    }

    pub fn transform_vector(&self, vector: DVec3) -> DVec3 {
        self.rotation * vector
    }

    pub fn inverse(&self) -> Self {
        let rotation = self.rotation.inverse();
        Self {
            rotation,
            translation: -(rotation * self.translation),
        }
    }

    /// `self` applied after `inner`: maps `inner`'s child frame into `self`'s parent frame.
    pub fn compose(&self, inner: &RigidTransform) -> Self {
        Self::new(
            self.transform_point(inner.translation),
            self.rotation * inner.rotation,
        )
    }
}

impl Default for RigidTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Mul for RigidTransform {
    type Output = RigidTransform;

    fn mul(self, rhs: RigidTransform) -> RigidTransform {
        self.compose(&rhs)
    }
}
