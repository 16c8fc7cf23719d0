//! deckconf_core - Pure no_std configuration logic for MIDI controllers
//!
//! This crate contains the remote configuration protocol types, the
//! persistent preset-aware parameter store and the configuration handler.
//! Everything is platform-agnostic and tested on host without feature flags.
//!
//! # Design Principles
//!
//! - **Zero cfg**: No `#[cfg(feature = ...)]` directives allowed
//! - **Pure no_std**: No std library dependencies, no allocation
//! - **Trait abstractions**: Storage medium and runtime modules injected via traits
//!
//! # Modules
//!
//! - [`protocol`]: Wire-level blocks, sections, settings and result codes
//! - [`database`]: Storage medium, layout, signature and parameter store
//! - [`config`]: Address translation and the `SysConfig` handler
//! - [`limits`]: Value ranges enforced by the handler

#![no_std]

pub mod config;
pub mod database;
pub mod limits;
pub mod protocol;
