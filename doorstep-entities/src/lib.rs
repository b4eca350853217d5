//#![deny(missing_docs)] // TODO: Complete missing documentation and enable this option
#![deny(missing_debug_implementations)]
#![deny(rustdoc::broken_intra_doc_links)]
#![cfg_attr(test, deny(warnings))]

//! # doorstep-entities
//!
//! Reusable, agnostic domain entities for the Doorstep address engine.
//!
//! The entities only contain generic functionality that does not reveal any application-specific business logic.

pub mod address;
pub mod geo;
pub mod session;
pub mod slot;

#[cfg(any(test, feature = "builders"))]
pub mod builders;
