//! Operations on weighted transducers.
//!
//! All operations validate their inputs before doing any work. Every
//! operation except [`connect`](connect::connect) leaves its inputs untouched
//! and returns a freshly built [`VectorFst`](crate::VectorFst).

pub mod arc_sort;
pub mod compose;
pub mod connect;
pub mod extend_final;
pub mod invert;
pub mod project;
pub mod reverse;

pub use arc_sort::arc_sort;
pub use compose::{compose, compose_with_config};
pub use connect::{connect, connect_with_config};
pub use extend_final::extend_final;
pub use invert::invert;
pub use project::project;
pub use reverse::reverse;
