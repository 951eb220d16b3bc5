//! Line-aware metro route planner.
//!
//! Answers: "I am at this station on this line, what is the fastest way to
//! that station?" Routes are found with A* over (station, line) states,
//! charging a penalty for every change of line.

pub mod domain;
pub mod network;
pub mod planner;
pub mod prompt;
pub mod render;
pub mod web;
