//! Joints - two-body constraints solved by sequential impulses
//!
//! Every variant follows the same three-phase contract, driven by the
//! world once per step and in creation order:
//! 1. `init_velocity_constraints` - effective mass, bias, warm start
//! 2. `solve_velocity_constraints` - repeated `velocity_iterations` times
//! 3. `solve_position_constraints` - until every joint reports `true`

pub mod jacobian;
pub mod pointer;
pub mod distance;
pub mod weld;

use serde::{Deserialize, Serialize};

use crate::core::math::{Vec2, PI};
use crate::domain::body::{Body, BodyHandle};
use crate::systems::solver::TimeStep;

pub use distance::{DistanceJoint, DistanceJointDef};
pub use jacobian::Jacobian;
pub use pointer::{PointerJoint, PointerJointDef};
pub use weld::{WeldJoint, WeldJointDef};

/// Position error tolerated before correction kicks in
pub const LINEAR_SLOP: f32 = 0.005;
/// Angular error tolerated before correction kicks in (2 degrees)
pub const ANGULAR_SLOP: f32 = 2.0 / 180.0 * PI;
/// Largest position correction applied in one pass
pub const MAX_LINEAR_CORRECTION: f32 = 0.2;

/// Stable joint id handed out by the world
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct JointHandle(pub u32);

impl JointHandle {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Two distinct bodies borrowed mutably at once.
/// Callers guarantee `a != b` and both in range (checked at joint creation).
pub(crate) fn pair_mut(bodies: &mut [Body], a: BodyHandle, b: BodyHandle) -> (&mut Body, &mut Body) {
    let (ia, ib) = (a.index(), b.index());
    debug_assert_ne!(ia, ib);
    if ia < ib {
        let (left, right) = bodies.split_at_mut(ib);
        (&mut left[ia], &mut right[0])
    } else {
        let (left, right) = bodies.split_at_mut(ia);
        (&mut right[0], &mut left[ib])
    }
}

/// Joint description, tagged by `type` in JSON:
/// `{"type":"pointer","bodyA":0,"bodyB":1,"target":{"x":1,"y":0},"maxForce":100}`
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum JointDef {
    Pointer(PointerJointDef),
    Distance(DistanceJointDef),
    Weld(WeldJointDef),
}

impl JointDef {
    pub fn bodies(&self) -> (BodyHandle, BodyHandle) {
        match self {
            JointDef::Pointer(def) => (def.body_a, def.body_b),
            JointDef::Distance(def) => (def.body_a, def.body_b),
            JointDef::Weld(def) => (def.body_a, def.body_b),
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        match self {
            JointDef::Pointer(def) => def.validate(),
            JointDef::Distance(def) => def.validate(),
            JointDef::Weld(def) => def.validate(),
        }
    }

    pub fn from_json(json: &str) -> Result<Self, String> {
        let def: JointDef = serde_json::from_str(json).map_err(|e| format!("invalid joint json: {e}"))?;
        def.validate()?;
        Ok(def)
    }
}

#[derive(Clone, Debug)]
pub enum Joint {
    Pointer(PointerJoint),
    Distance(DistanceJoint),
    Weld(WeldJoint),
}

impl Joint {
    /// Build a joint against the current body poses.
    /// The handles in `def` must already be checked against `bodies`.
    pub fn new(def: &JointDef, bodies: &[Body]) -> Self {
        let (a, b) = def.bodies();
        let (body_a, body_b) = (&bodies[a.index()], &bodies[b.index()]);
        match def {
            JointDef::Pointer(def) => Joint::Pointer(PointerJoint::new(def, body_b)),
            JointDef::Distance(def) => Joint::Distance(DistanceJoint::new(def, body_a, body_b)),
            JointDef::Weld(def) => Joint::Weld(WeldJoint::new(def, body_a, body_b)),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Joint::Pointer(_) => "pointer",
            Joint::Distance(_) => "distance",
            Joint::Weld(_) => "weld",
        }
    }

    pub fn body_a(&self) -> BodyHandle {
        match self {
            Joint::Pointer(j) => j.body_a(),
            Joint::Distance(j) => j.body_a(),
            Joint::Weld(j) => j.body_a(),
        }
    }

    pub fn body_b(&self) -> BodyHandle {
        match self {
            Joint::Pointer(j) => j.body_b(),
            Joint::Distance(j) => j.body_b(),
            Joint::Weld(j) => j.body_b(),
        }
    }

    pub fn anchor_a(&self, bodies: &[Body]) -> Vec2 {
        match self {
            Joint::Pointer(j) => j.anchor_a(),
            Joint::Distance(j) => j.anchor_a(bodies),
            Joint::Weld(j) => j.anchor_a(bodies),
        }
    }

    pub fn anchor_b(&self, bodies: &[Body]) -> Vec2 {
        match self {
            Joint::Pointer(j) => j.anchor_b(bodies),
            Joint::Distance(j) => j.anchor_b(bodies),
            Joint::Weld(j) => j.anchor_b(bodies),
        }
    }

    pub fn reaction_force(&self, inv_dt: f32) -> Vec2 {
        match self {
            Joint::Pointer(j) => j.reaction_force(inv_dt),
            Joint::Distance(j) => j.reaction_force(inv_dt),
            Joint::Weld(j) => j.reaction_force(inv_dt),
        }
    }

    pub fn reaction_torque(&self, inv_dt: f32) -> f32 {
        match self {
            Joint::Pointer(j) => j.reaction_torque(inv_dt),
            Joint::Distance(j) => j.reaction_torque(inv_dt),
            Joint::Weld(j) => j.reaction_torque(inv_dt),
        }
    }

    pub fn init_velocity_constraints(&mut self, bodies: &mut [Body], step: &TimeStep) {
        match self {
            Joint::Pointer(j) => j.init_velocity_constraints(bodies, step),
            Joint::Distance(j) => j.init_velocity_constraints(bodies, step),
            Joint::Weld(j) => j.init_velocity_constraints(bodies, step),
        }
    }

    pub fn solve_velocity_constraints(&mut self, bodies: &mut [Body], step: &TimeStep) {
        match self {
            Joint::Pointer(j) => j.solve_velocity_constraints(bodies, step),
            Joint::Distance(j) => j.solve_velocity_constraints(bodies, step),
            Joint::Weld(j) => j.solve_velocity_constraints(bodies, step),
        }
    }

    /// Returns `true` when this joint's error is within tolerance
    pub fn solve_position_constraints(&mut self, bodies: &mut [Body]) -> bool {
        match self {
            Joint::Pointer(j) => j.solve_position_constraints(bodies),
            Joint::Distance(j) => j.solve_position_constraints(bodies),
            Joint::Weld(j) => j.solve_position_constraints(bodies),
        }
    }

    pub fn as_pointer_mut(&mut self) -> Option<&mut PointerJoint> {
        match self {
            Joint::Pointer(j) => Some(j),
            _ => None,
        }
    }
}
