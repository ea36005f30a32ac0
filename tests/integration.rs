//! Integration tests for the slated scheduling backend.
//!
//! These tests verify the complete pipeline from free-text prompt to
//! task list, across both extraction tiers and the HTTP surface.

#[path = "integration/test_schedule.rs"]
mod test_schedule;

#[path = "integration/test_api.rs"]
mod test_api;
