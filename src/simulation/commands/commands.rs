use crate::core::math::Vec2;
use crate::domain::body::{Body, BodyDef, BodyHandle};
use crate::systems::joints::{Joint, JointDef, JointHandle};

use super::WorldCore;

pub(super) fn create_body(world: &mut WorldCore, def: &BodyDef) -> Result<BodyHandle, String> {
    if let Err(err) = def.validate() {
        engine_warn!("create_body rejected: {}", err);
        return Err(err);
    }

    let id = world.bodies.len() as u32;
    world.bodies.push(Body::new(def, id));
    Ok(BodyHandle(id))
}

pub(super) fn create_joint(world: &mut WorldCore, def: &JointDef) -> Result<JointHandle, String> {
    if let Err(err) = check_joint(world, def) {
        engine_warn!("create_joint rejected: {}", err);
        return Err(err);
    }

    let def = with_world_time_step(def, world.settings.dt);
    let joint = Joint::new(&def, &world.bodies);
    let handle = JointHandle(world.joints.len() as u32);
    engine_log!(
        "{} joint {} created between bodies {} and {}",
        joint.kind(),
        handle.0,
        joint.body_a().0,
        joint.body_b().0
    );
    world.joints.push(Some(joint));
    Ok(handle)
}

/// Pointer softness without an explicit `time_step` is tuned for the world step
fn with_world_time_step(def: &JointDef, dt: f32) -> JointDef {
    let mut def = def.clone();
    if let JointDef::Pointer(pointer) = &mut def {
        pointer.time_step.get_or_insert(dt);
    }
    def
}

fn check_joint(world: &WorldCore, def: &JointDef) -> Result<(), String> {
    def.validate()?;

    let (a, b) = def.bodies();
    let body_a = world.body(a).ok_or_else(|| format!("unknown body {}", a.0))?;
    let body_b = world.body(b).ok_or_else(|| format!("unknown body {}", b.0))?;
    if a == b {
        return Err(format!("joint needs two different bodies, got {} twice", a.0));
    }

    match def {
        JointDef::Pointer(_) if body_b.is_static() => {
            Err(format!("pointer joint cannot drag static body {}", b.0))
        }
        _ if body_a.is_static() && body_b.is_static() => {
            Err(format!("bodies {} and {} are both static", a.0, b.0))
        }
        _ => Ok(()),
    }
}

pub(super) fn destroy_joint(world: &mut WorldCore, handle: JointHandle) -> bool {
    match world.joints.get_mut(handle.index()).and_then(|slot| slot.take()) {
        Some(joint) => {
            engine_log!("{} joint {} destroyed", joint.kind(), handle.0);
            true
        }
        None => false,
    }
}

pub(super) fn set_pointer_target(
    world: &mut WorldCore,
    handle: JointHandle,
    target: Vec2,
) -> Result<(), String> {
    if !target.is_valid() {
        return Err("pointer target must be finite".to_string());
    }
    let joint = world
        .joints
        .get_mut(handle.index())
        .and_then(|slot| slot.as_mut())
        .ok_or_else(|| format!("unknown joint {}", handle.0))?;
    let pointer = joint
        .as_pointer_mut()
        .ok_or_else(|| format!("joint {} is not a pointer joint", handle.0))?;
    pointer.set_target(target);
    Ok(())
}
