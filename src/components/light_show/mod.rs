//! Firefly light show.
//!
//! A field of softly glowing fireflies wanders across a canvas while light
//! sequences, generated from the user's text, recolor and flash them:
//! - Per-frame random wander with a bounded speed band and toroidal wrap
//! - Radial-gradient glows drawn through the [`GlowCanvas`] seam
//! - Phase-by-phase playback with at most one sequence in flight
//! - Canvas sizing that leaves room for the control bar
//!
//! # Example
//!
//! ```ignore
//! use firefly_show::{FireflyField, GlowStyle, SurfaceConfig};
//!
//! let bounds = SurfaceConfig::default().fit(1280.0, 800.0, None);
//! let field = Rc::new(RefCell::new(FireflyField::new(GlowStyle::default(), bounds)));
//!
//! view! { <FireflyCanvas field=field surface=SurfaceConfig::default() /> }
//! ```

mod component;
pub mod config;
mod controls;
mod particles;
mod player;
mod render;
mod source;
pub mod surface;
pub mod theme;
mod types;

pub use component::FireflyCanvas;
pub use config::ShowConfig;
pub use controls::{ControlBar, MessageStyle, outcome_message, request_show};
pub use particles::{Firefly, FireflyField};
pub use player::{Delay, Playback, PlaybackState, SequencePlayer, TimeoutDelay};
pub use render::{GlowCanvas, GlowStop, RadialGlow};
pub use source::{FetchSequenceSource, SequenceSource};
pub use surface::{Bounds, SurfaceConfig};
pub use theme::{Color, DEFAULT_GLOW, FlashStyle, GlowStyle, resolve_color};
pub use types::{LightSequence, Phase};
