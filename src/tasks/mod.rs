//! Background Tasks Module
//!
//! Contains tasks spawned alongside the HTTP server.
//!
//! # Tasks
//! - Warm-up: primes the snapshot cache so the first request is served from it

mod warmup;

pub use warmup::spawn_warmup_task;
