//! quaderno: export a Notion-style block database to Markdown documents
//! ready for a static-site pipeline.
//!
//! The pipeline lists a database once, then renders each page inside a
//! bounded worker pool: block tree acquisition ([`api`]), Markdown synthesis
//! ([`render`]), image materialization ([`assets`]), and atomic persistence
//! of one document per page ([`export`]).

pub mod api;
pub mod assets;
pub mod config;
pub mod domain;
pub mod export;
pub mod io;
pub mod render;
pub mod telemetry;
