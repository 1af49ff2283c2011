#![doc = "releasenotes-core: core logic for migrating documentation release notes into the release-notes admin API."]

//! This crate holds everything that does not depend on a transport:
//! the note model and YAML loader, text flattening, markup rewriting,
//! payload formatting and the directory pipeline.
//! Delivery to the API is abstracted behind [`contract::Submitter`].
//!
//! # Usage
//! Build a [`process::ProcessConfig`], pick a submitter and call
//! [`process::process_directory`].

pub mod collect;
pub mod contract;
pub mod format;
pub mod locale;
pub mod markup;
pub mod note;
pub mod process;
pub mod scope;
pub mod text_block;
