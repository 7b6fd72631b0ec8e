//! luadoc: extract documentation from EmmyLua-style annotated Lua sources.
//!
//! The extraction engine lives in [`parser`] and turns source text into
//! [`model::Module`] and [`model::Program`] records. [`catalog`] collects them
//! in presentation order and [`render`] turns the catalog into Markdown, HTML
//! and JSON.

pub mod catalog;
pub mod model;
pub mod parser;
pub mod render;
pub mod toc;
