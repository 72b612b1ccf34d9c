//! Integration tests for Crawl Studio
//!
//! These tests use wiremock to stand in for the crawl service and drive a
//! full session through the real HTTP client.

mod crawl_tests;
mod export_tests;
