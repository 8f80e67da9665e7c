// Copyright (c) 2025 - Cowboy AI, Inc.
//! Property-Based Tests Module
//!
//! This module contains property-based tests using proptest to verify
//! fundamental properties of the Pokemon aggregate.

mod event_application;
mod replay;
