//! proforma-export
//!
//! Hands assembled reports to the outside world: plain clipboard text,
//! DOCX documents, and Tera-rendered report templates.

pub mod docx;
pub mod error;
pub mod markup;
pub mod render;
pub mod styles;
