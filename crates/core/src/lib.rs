//! Core upload logic for Pixstash.
//!
//! This crate contains the upload flow with no web framework or database
//! dependencies. The db crate supplies the repository and the api crate the
//! HTTP surface.
//!
//! # Modules
//!
//! - `hosting` - Remote image host client (ImgBB)
//! - `upload` - Validation, orchestration and lookups

pub mod hosting;
pub mod upload;
