//! Phonetic annotation passes: normalize → resolve → stress → rules → render.

pub mod normalizer;
pub mod options;
pub mod render;
pub mod resolver;
pub mod rules;
pub mod stress;
pub mod symbols;
