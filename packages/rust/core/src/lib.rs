//! Extraction pipeline orchestration for anchorprobe.
//!
//! This crate ties together fetching, content region lookup and anchor
//! collection into a single `extract` call.

pub mod pipeline;
