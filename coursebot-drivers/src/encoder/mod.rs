//! Wheel encoder drivers

pub mod edge;

pub use edge::EdgeEncoder;
