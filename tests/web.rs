//! Facade tests that need a real JS host (`wasm-pack test --node`)
#![cfg(target_arch = "wasm32")]

use particula_rigid::World;
use wasm_bindgen_test::*;

#[wasm_bindgen_test]
fn facade_errors_surface_as_js_values() {
    let mut world = World::new();
    let ground = world.create_static_body(0.0, 0.0).expect("ground");
    let body = world.create_body(1.0, 0.0, 0.0, 1.0, 1.0).expect("body");

    let err = world
        .create_pointer_joint(body, ground, 0.0, 0.0, 10.0, 5.0, 0.7)
        .expect_err("static body cannot be dragged");
    assert!(err.as_string().unwrap_or_default().contains("static"));

    assert!(World::from_settings_json("{\"dt\":0}".to_string()).is_err());
    assert!(world.set_pointer_target(99, 0.0, 0.0).is_err());
}

#[wasm_bindgen_test]
fn init_logs_without_panicking() {
    particula_rigid::init();
    assert!(!particula_rigid::version().is_empty());
}
