use disassembly_demo::prelude::*;

const VIEWPORT: Vec2 = Vec2::new(800.0, 600.0);

fn setup() -> (DisassemblyDemo, OrbitCamera3d) {
    let options = DemoOptions::default();
    let demo = DisassemblyDemo::from_options(&options).unwrap();
    let mut camera = OrbitCamera3d::from_options(&options.camera);
    camera.set_viewport(VIEWPORT.x as u32, VIEWPORT.y as u32);
    (demo, camera)
}

fn center_click() -> ClickEvent {
    ClickEvent::new(VIEWPORT.x / 2.0, VIEWPORT.y / 2.0)
}

#[test]
fn clicking_the_red_block_twice_removes_then_restores_it() {
    let (mut demo, camera) = setup();

    let first = demo.handle_click(center_click(), VIEWPORT, &camera).unwrap();
    assert_eq!(first.outcome, ToggleOutcome::Removed);
    let red = demo.registry().get(first.id).unwrap();
    assert_eq!(red.name(), "redBlock");
    assert!(red.is_removed());
    assert_eq!(red.color(), from_hex(0x808080));

    // The other blocks are untouched.
    for name in ["greenBlock", "blueBlock"] {
        assert!(!demo.registry().find_by_name(name).unwrap().is_removed());
    }

    let second = demo.handle_click(center_click(), VIEWPORT, &camera).unwrap();
    assert_eq!(second.id, first.id);
    assert_eq!(second.outcome, ToggleOutcome::Restored);
    let red = demo.registry().get(first.id).unwrap();
    assert!(!red.is_removed());
    assert_eq!(red.color(), from_hex(0xff0000));
    assert_eq!(demo.registry().find_original_color("redBlock"), Ok(RED));
}

#[test]
fn clicking_the_background_changes_nothing() {
    let (mut demo, camera) = setup();

    assert_eq!(demo.handle_click(ClickEvent::new(0.0, 0.0), VIEWPORT, &camera), None);
    assert_eq!(demo.registry().removed_count(), 0);
}

#[test]
fn clicking_the_projected_center_of_each_block_picks_it() {
    let (mut demo, camera) = setup();
    let blocks: Vec<(String, Vec3)> = demo
        .registry()
        .iter()
        .map(|b| (b.name().to_owned(), b.position() + Vec3::new(0.0, 0.0, 1.0)))
        .collect();

    for (name, front_face) in blocks {
        let screen = camera.project(front_face, VIEWPORT);
        let hit = demo
            .handle_click(ClickEvent::new(screen.x, screen.y), VIEWPORT, &camera)
            .unwrap();
        assert_eq!(demo.registry().get(hit.id).unwrap().name(), name);
    }

    assert_eq!(demo.registry().removed_count(), 3);
}

#[test]
fn picking_follows_a_resized_window() {
    let (mut demo, mut camera) = setup();
    let green_front = demo.registry().find_by_name("greenBlock").unwrap().position()
        + Vec3::new(0.0, 0.0, 1.0);
    let before = camera.project(green_front, VIEWPORT);

    let wide = Vec2::new(1600.0, 600.0);
    camera.handle_event(&WindowEvent::FramebufferSize(wide.x as u32, wide.y as u32));
    let after = camera.project(green_front, wide);
    assert!((after.x - before.x).abs() > 100.0);

    let hit = demo
        .handle_click(ClickEvent::new(after.x, after.y), wide, &camera)
        .unwrap();
    assert_eq!(demo.registry().get(hit.id).unwrap().name(), "greenBlock");
}

#[test]
fn dragging_over_a_block_does_not_toggle_it() {
    let (mut demo, camera) = setup();
    let mut tracker = ClickTracker::default();

    let events = [
        WindowEvent::CursorPos(400.0, 300.0),
        WindowEvent::MouseButton(MouseButton::Button1, Action::Press),
        WindowEvent::CursorPos(450.0, 300.0),
        WindowEvent::CursorPos(400.0, 300.0),
        WindowEvent::MouseButton(MouseButton::Button1, Action::Release),
    ];

    for event in &events {
        if let Some(click) = tracker.handle_event(event) {
            demo.handle_click(click, VIEWPORT, &camera);
        }
    }

    assert_eq!(demo.registry().removed_count(), 0);
}

#[test]
fn a_refusing_rule_keeps_blocks_in_place() {
    let (demo, camera) = setup();
    let mut demo = demo.with_rule(|_: &SceneObject, _: &Registry| false);

    let hit = demo.handle_click(center_click(), VIEWPORT, &camera).unwrap();
    assert_eq!(hit.outcome, ToggleOutcome::Blocked);
    assert_eq!(demo.registry().removed_count(), 0);
    assert_eq!(demo.registry().get(hit.id).unwrap().color(), RED);
}

#[test]
fn duplicate_names_keep_the_first_block() {
    let mut registry = Registry::new();
    registry.create_object(Vec3::ZERO, RED, "redBlock").unwrap();

    assert_eq!(
        registry
            .create_object(Vec3::new(0.0, 5.0, 0.0), BLUE, "redBlock")
            .map(|o| o.id()),
        Err(RegistryError::DuplicateName("redBlock".to_owned()))
    );
    assert_eq!(registry.len(), 1);
    assert_eq!(registry.find_original_color("redBlock"), Ok(RED));
    assert_eq!(registry.find_by_name("redBlock").unwrap().position(), Vec3::ZERO);
}
