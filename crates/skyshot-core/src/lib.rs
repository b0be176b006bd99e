//! Core types and definitions for the SKYSHOT simulation.
//!
//! This crate defines the vocabulary shared across all other crates:
//! tuning configuration, commands, state snapshots, events, and constants.
//! It has no dependency on the ECS or any runtime framework.

pub mod commands;
pub mod config;
pub mod constants;
pub mod enums;
pub mod error;
pub mod events;
pub mod state;
pub mod types;
