//! watermap - Render ordered routes of water points as interactive maps

pub mod config;
pub mod data;
pub mod domain;
pub mod geometry;
pub mod render;
