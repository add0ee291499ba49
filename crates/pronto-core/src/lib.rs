//! # pronto-core
//!
//! Foundation types and utilities for the Pronto multi-agent runtime.
//!
//! This crate provides the shared vocabulary the other Pronto crates depend on:
//!
//! - **Messages**: [`messages::Message`] conversation entries with roles
//! - **Memory**: [`memory::AgentMemory`] bounded history + context store
//! - **Responses**: [`response::AgentResponse`] returned by every `process` call
//! - **Tool schema**: [`tools::ToolSpec`] with parameters, timeout, and mode
//! - **Status**: [`status::AgentStatus`] advisory per-agent liveness
//! - **Errors**: [`errors::ToolError`] hierarchy via `thiserror`
//! - **Logging**: [`logging::init_subscriber`] tracing bootstrap
//!
//! ## Crate Position
//!
//! Foundation crate. Depended on by `pronto-llm` and `pronto-runtime`.

#![deny(unsafe_code)]

pub mod errors;
pub mod logging;
pub mod memory;
pub mod messages;
pub mod response;
pub mod status;
pub mod tools;
