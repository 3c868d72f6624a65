//! trackside - headless racing-demo core: track containment, surface bands,
//! car physics, chase camera and HUD model

pub mod config;
pub mod domain;
pub mod geometry;
pub mod hud;
pub mod sim;
pub mod startup;
pub mod trace;
