// Copyright (c) 2025 - Cowboy AI, Inc.
//! Property-Based Tests Entry Point
//!
//! This test suite uses proptest to verify the laws that must hold for all
//! inputs: outcome composition and deterministic replay.

mod fixtures;
mod property;
