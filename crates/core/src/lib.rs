//! Core value and scope model for Worksnap
//!
//! This crate defines the data types the snapshot engine operates on:
//! - [`Value`]: the canonical value model, covering both persistable data
//!   and live host objects
//! - [`Scope`]: a name→value binding table (user scope or hidden scope)
//! - [`TypeFilter`]: an optional restriction on runtime type names
//!
//! Nothing in this crate touches the filesystem; durable artifacts live in
//! `worksnap-archive` and orchestration in `worksnap-engine`.

pub mod filter;
pub mod scope;
pub mod value;

pub use filter::TypeFilter;
pub use scope::{Scope, RESERVED_PREFIX};
pub use value::{Category, HostHandle, Value};
