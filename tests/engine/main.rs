//! Integration tests for Layer 1: Engine
//!
//! Tests for cloning, shims, call paths, classification and recording.

mod classification;
mod cloning;
mod paths;
mod tracer;
