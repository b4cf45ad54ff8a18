use particula_rigid::{Body, BodyDef, BodyHandle, PointerJoint, PointerJointDef, TimeStep, Vec2, World};

#[test]
fn unit_box_scenario_through_the_kernel() {
    let mut bodies = vec![
        Body::new(&BodyDef::fixed(0.0, 0.0), 0),
        Body::new(&BodyDef::dynamic(0.0, 0.0, 1.0, 1.0), 1),
    ];
    let max_force = 1000.0;
    let def = PointerJointDef::new(BodyHandle(0), BodyHandle(1), Vec2::ZERO, max_force);
    let mut joint = PointerJoint::new(&def, &bodies[1]);
    joint.set_target(Vec2::new(1.0, 0.0));

    let step = TimeStep::new(1.0 / 60.0);
    joint.init_velocity_constraints(&mut bodies, &step);
    joint.solve_velocity_constraints(&mut bodies, &step);

    let v = bodies[1].linear_velocity;
    assert!(v.x > 0.0);
    assert!(v.length() <= max_force * step.dt / bodies[1].mass + 1e-5);
    assert!(joint.impulse().length() <= max_force);
}

#[test]
fn dragging_through_the_facade() {
    let mut world = World::new();
    world.set_gravity(0.0, 0.0).expect("zero gravity");
    let ground = world.create_static_body(0.0, 0.0).expect("ground");
    let body = world.create_body(0.0, 0.0, 0.0, 1.0, 1.0).expect("body");
    let joint = world
        .create_pointer_joint(ground, body, 0.0, 0.0, 500.0, 5.0, 0.7)
        .expect("pointer");
    world.set_pointer_target(joint, 1.0, 1.0).expect("target");

    for _ in 0..180 {
        world.step();
    }
    assert!((world.body_x(body) - 1.0).abs() < 0.05);
    assert!((world.body_y(body) - 1.0).abs() < 0.05);
    assert_eq!(world.frame(), 180);

    assert!(world.destroy_joint(joint));
    assert_eq!(world.joint_count(), 0);
}
