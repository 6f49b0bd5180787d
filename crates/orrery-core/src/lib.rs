pub mod body;
pub mod camera_rig;
pub mod clock;
pub mod config;
pub mod constants;
pub mod error;
pub mod gesture;
pub mod interaction;
pub mod keymap;
pub mod materials;
pub mod orbit;
pub mod picking;
pub mod pointer;
pub mod quality;
pub mod renderer;
pub mod runtime;
pub mod scene;
pub mod state;
pub mod tween;

pub static BODIES_WGSL: &str = include_str!("../shaders/bodies.wgsl");
pub static POST_WGSL: &str = include_str!("../shaders/post.wgsl");

pub use body::*;
pub use camera_rig::{CameraMode, CameraRig, TransitionComplete, TransitionKind};
pub use clock::{Clock, FrameClock, ManualClock};
pub use config::*;
pub use error::OrreryError;
pub use gesture::PointerGesture;
pub use interaction::*;
pub use keymap::{command_for_key, Command};
pub use materials::*;
pub use picking::{pick_at, pick_nearest, PickHit, PickTarget, SurfaceProbe};
pub use pointer::PointerTracker;
pub use quality::*;
pub use renderer::{Renderer, SceneFrame};
pub use runtime::{FrameOutput, Orrery};
pub use state::*;
