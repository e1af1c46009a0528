use glam::{Mat3, Mat4, Quat, Vec3};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};
use thiserror::Error;

pub const DEFAULT_FRAME_TIME: f32 = 1.0 / 60.0;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[strum(ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum Handed {
    Left,
    Right,
}

/// Position plus orientation. Forward is -Z, up is +Y.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    pub position: Vec3,
    pub orientation: Quat,
}

impl Default for Pose {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Pose {
    pub const IDENTITY: Self = Self {
        position: Vec3::ZERO,
        orientation: Quat::IDENTITY,
    };

    pub fn new(position: Vec3, orientation: Quat) -> Self {
        Self {
            position,
            orientation,
        }
    }

    pub fn at(position: Vec3) -> Self {
        Self::new(position, Quat::IDENTITY)
    }

    /// A pose at `from` whose forward axis points at `target`.
    pub fn look_at(from: Vec3, target: Vec3) -> Self {
        Self::new(from, look_rotation(target - from))
    }

    pub fn forward(&self) -> Vec3 {
        self.orientation * Vec3::NEG_Z
    }

    pub fn up(&self) -> Vec3 {
        self.orientation * Vec3::Y
    }

    pub fn to_matrix(&self, scale: f32) -> Mat4 {
        Mat4::from_scale_rotation_translation(Vec3::splat(scale), self.orientation, self.position)
    }

    pub fn to_local(&self, world: Vec3) -> Vec3 {
        self.orientation.inverse() * (world - self.position)
    }

    pub fn to_world(&self, local: Vec3) -> Vec3 {
        self.position + self.orientation * local
    }

    /// Moves `t` of the way towards `dest`; lerp for position, slerp for orientation.
    pub fn approach(&self, dest: &Pose, t: f32) -> Pose {
        Pose {
            position: self.position.lerp(dest.position, t),
            orientation: self.orientation.slerp(dest.orientation, t).normalize(),
        }
    }
}

/// Rotation whose -Z axis points along `forward`, keeping +Y as close to world up as possible.
pub fn look_rotation(forward: Vec3) -> Quat {
    let Some(forward) = forward.try_normalize() else {
        return Quat::IDENTITY;
    };
    let z = -forward;
    // straight up or down, fall back to world -Z as the up hint
    let x = Vec3::Y
        .cross(z)
        .try_normalize()
        .or_else(|| Vec3::NEG_Z.cross(z).try_normalize())
        .unwrap_or(Vec3::X);
    let y = z.cross(x);
    Quat::from_mat3(&Mat3::from_cols(x, y, z)).normalize()
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HandSnapshot {
    pub tracked: bool,
    pub palm: Pose,
    pub index_tip: Vec3,
    /// How closed the hand is, 0 open and 1 fully gripped.
    pub grip_activation: f32,
    pub just_gripped: bool,
}

impl Default for HandSnapshot {
    fn default() -> Self {
        Self::untracked()
    }
}

impl HandSnapshot {
    pub fn untracked() -> Self {
        Self {
            tracked: false,
            palm: Pose::IDENTITY,
            index_tip: Vec3::ZERO,
            grip_activation: 0.0,
            just_gripped: false,
        }
    }

    /// Cosine between the palm normal and the direction from palm to head.
    pub fn palm_facing(&self, head: Vec3) -> f32 {
        let to_head = (head - self.palm.position).normalize_or_zero();
        self.palm.forward().dot(to_head)
    }
}

/// Everything the menu reads from tracking in one frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputFrame {
    /// Seconds since the previous frame.
    pub elapsed: f32,
    pub head: Pose,
    pub left: HandSnapshot,
    pub right: HandSnapshot,
}

impl Default for InputFrame {
    fn default() -> Self {
        Self {
            elapsed: DEFAULT_FRAME_TIME,
            head: Pose::IDENTITY,
            left: HandSnapshot::untracked(),
            right: HandSnapshot::untracked(),
        }
    }
}

impl InputFrame {
    pub fn hand(&self, handed: Handed) -> &HandSnapshot {
        match handed {
            Handed::Left => &self.left,
            Handed::Right => &self.right,
        }
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum Vec3ParseError {
    #[error("expected three components, got {0}")]
    Arity(usize),
    #[error("invalid component '{0}'")]
    Component(String),
}

/// Parses `x,y,z` or `x y z`.
pub fn parse_vec3(s: &str) -> Result<Vec3, Vec3ParseError> {
    let parts: Vec<&str> = s
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|p| !p.is_empty())
        .collect();

    if parts.len() != 3 {
        return Err(Vec3ParseError::Arity(parts.len()));
    }

    let mut out = [0.0f32; 3];
    for (slot, part) in out.iter_mut().zip(&parts) {
        *slot = part
            .parse()
            .map_err(|_| Vec3ParseError::Component(part.to_string()))?;
    }
    Ok(Vec3::from_array(out))
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-5;

    fn approx_eq(a: Vec3, b: Vec3) {
        assert!((a - b).length() <= EPSILON, "{a} != {b}");
    }

    #[test]
    fn look_at_points_forward_at_target() {
        let pose = Pose::look_at(Vec3::new(0.0, 1.0, -0.5), Vec3::new(0.0, 1.0, 0.0));
        approx_eq(pose.forward(), Vec3::Z);
        approx_eq(pose.up(), Vec3::Y);
    }

    #[test]
    fn look_at_straight_down_stays_finite() {
        let pose = Pose::look_at(Vec3::Y, Vec3::ZERO);
        approx_eq(pose.forward(), Vec3::NEG_Y);
        assert!(pose.orientation.is_finite());
    }

    #[test]
    fn local_and_world_are_inverse() {
        let pose = Pose::look_at(Vec3::new(0.3, 1.2, -0.4), Vec3::new(0.0, 1.6, 0.0));
        let world = Vec3::new(0.35, 1.1, -0.41);
        approx_eq(pose.to_world(pose.to_local(world)), world);
    }

    #[test]
    fn palm_facing_head() {
        let hand = HandSnapshot {
            tracked: true,
            palm: Pose::look_at(Vec3::new(0.0, 0.0, -0.4), Vec3::ZERO),
            ..HandSnapshot::untracked()
        };
        assert!((hand.palm_facing(Vec3::ZERO) - 1.0).abs() < EPSILON);
        assert!((hand.palm_facing(Vec3::new(0.0, 0.0, -1.0)) + 1.0).abs() < EPSILON);
    }

    #[test]
    fn parses_vectors() {
        assert_eq!(parse_vec3("0.1,1.5,-0.3"), Ok(Vec3::new(0.1, 1.5, -0.3)));
        assert_eq!(parse_vec3(" 1 2  3 "), Ok(Vec3::new(1.0, 2.0, 3.0)));
        assert_eq!(parse_vec3("1,2"), Err(Vec3ParseError::Arity(2)));
        assert_eq!(
            parse_vec3("1,x,3"),
            Err(Vec3ParseError::Component("x".to_string()))
        );
    }
}
