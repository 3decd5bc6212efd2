/*!
# Disassembly demo

Click cuboids to take them apart.

A handful of colored blocks sit in a scene seen through an orbit camera. Clicking a
block marks it as removed and turns it grey; clicking it again puts it back with its
original color. There is no puzzle logic: whether a block may be removed is decided by
a pluggable [`RemovalRule`](scene::RemovalRule), and the default one always says yes.

The interesting parts are small and free of any GPU dependency:

* [`scene::Registry`] owns the blocks, their removed flag and their original colors.
* [`picking::resolve`] finds the block under a screen position by casting a ray from
  the camera against every block's bounding box.
* [`demo::DisassemblyDemo`] wires both together behind a single `handle_click`.

Rendering goes through `wgpu`, windowing through `winit`.

```no_run
use disassembly_demo::prelude::*;

fn main() -> Result<(), DemoError> {
    let options = DemoOptions::default();
    disassembly_demo::window::run(options)
}
```

Clicks can also be replayed without opening a window:

```
use disassembly_demo::prelude::*;

let mut demo = DisassemblyDemo::from_options(&DemoOptions::default()).unwrap();
let mut camera = OrbitCamera3d::new(Vec3::new(0.0, 5.0, 10.0), Vec3::ZERO);
camera.set_viewport(800, 600);

let hit = demo
    .handle_click(ClickEvent::new(400.0, 300.0), Vec2::new(800.0, 600.0), &camera)
    .unwrap();
assert_eq!(hit.outcome, ToggleOutcome::Removed);
assert!(demo.registry().find_by_name("redBlock").unwrap().is_removed());
```

Some controls are handled by the orbit camera:

* `scroll`: zoom in / zoom out.
* `left click + drag`: orbit around the target.
* `right click + drag`: move the target on the ground plane.
* `enter`: go back to the initial view.
* `escape`: quit.

Logging goes through the `log` facade; the binary installs `env_logger` and honors
`RUST_LOG`.
*/
#![allow(clippy::module_inception)]

pub use glamx;

pub mod camera;
pub mod color;
pub mod context;
pub mod demo;
pub mod error;
pub mod event;
pub mod light;
pub mod options;
pub mod picking;
pub mod procedural;
pub mod renderer;
pub mod scene;
pub mod window;

pub mod prelude {
    pub use crate::camera::*;
    pub use crate::color::*;
    pub use crate::demo::*;
    pub use crate::error::*;
    pub use crate::event::*;
    pub use crate::light::*;
    pub use crate::options::*;
    pub use crate::picking::*;
    pub use crate::scene::*;
    pub use glamx::{Mat4, Vec2, Vec3, Vec4};
}
