//! Seaglow library - glowing wave surface with a dual-mode camera rig

pub mod camera;
pub mod cli;
pub mod debug_ui;
pub mod params;
pub mod rendering;
pub mod resources;
pub mod scene;
pub mod surface;
pub mod world;
