//! Consolidated test utilities for vcs-overlay
//!
//! This module provides unified testing utilities for integration tests,
//! focused on real git repository scenarios with isolated config and cache
//! directories.

pub mod assertions;
pub mod fixtures;
pub mod repository;
