//! UI components.

pub mod light_show;
