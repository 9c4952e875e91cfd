//! Core library for the cdsmigrate obsolete table scanner.
//!
//! This library finds references to obsolete ABAP database tables in source
//! code and suggests the released CDS views that replace them. Matching is
//! purely lexical, and suggestions can be applied back into a buffer with
//! span-based rewriting.

#![allow(clippy::similar_names, clippy::items_after_statements)]
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used))]

/// Module containing the scanning engine.
/// This includes the `Migrator` struct and its unit, batch and file entry points.
pub mod analyzer;

/// Module for loading configuration.
pub mod config;

/// Module containing the obsolete table rules.
/// This includes the registry, the statement matcher and the remediation text.
pub mod rules;

/// Module containing utility functions.
/// This includes offset-to-line mapping, snippets and path helpers.
pub mod utils;

/// Module for span-based rewriting of source text.
pub mod fix;

/// Module defining the entry point logic shared by every binary.
pub mod entry_point;

/// Module containing shared constants and regex patterns.
pub mod constants;

/// Module for rich CLI output formatting with colored text and progress bars.
pub mod output;

/// Module defining the command-line interface arguments and structs.
pub mod cli;

/// Module for handling CLI commands and their execution logic.
pub mod commands;
