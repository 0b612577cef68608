//! Domain layer containing business entities and logic.
//!
//! Defines the entities, repository contracts and the concurrency primitives
//! shared by request handlers and background workers. Nothing here depends on
//! the HTTP layer or on a concrete storage backend.
//!
//! # Architecture
//!
//! - [`entities`] - Short URLs and clicks
//! - [`repositories`] - Data access trait definitions
//! - [`queue`] - Bounded, non-blocking work queues
//! - [`jobs`] - Items placed on those queues
//! - [`reachability`] - Probe verdicts
//! - [`rate_limit`] - Fixed-window token bucket
//! - [`click_event`] - Click tracking event model
//!
//! # Request / Worker Flow
//!
//! 1. A handler validates input and enqueues jobs with `try_enqueue`
//! 2. A full queue fails the request with `503`; nothing blocks
//! 3. Workers in [`crate::workers`] dequeue and publish results to shared caches
//! 4. Later requests read those caches without waiting on workers

pub mod click_event;
pub mod entities;
pub mod jobs;
pub mod queue;
pub mod rate_limit;
pub mod reachability;
pub mod repositories;
