//! deskkit - desktop configuration helpers
//!
//! This crate provides two small tools consumed by third-party desktop hosts:
//! a microphone level probe for a menu-bar/status-bar plugin, and a loader,
//! validator and exporter for browser routing rule sets.
//!
//! # Architecture
//!
//! The crate follows hexagonal (ports & adapters) architecture:
//!
//! - **Domain**: Level mapping, metering, routing rule schema, config, errors
//! - **Application**: The microphone probe use case and port interfaces (traits)
//! - **Infrastructure**: Adapter implementations (cpal, FLAC, XDG config, rule files, logging)
//! - **CLI**: Command-line interface, argument parsing, and output formatting

pub mod application;
pub mod cli;
pub mod domain;
pub mod infrastructure;
