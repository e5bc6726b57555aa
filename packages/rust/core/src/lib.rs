//! Guide compilation and batch generation for guidegen.
//!
//! [`compiler`] turns one guide config into its markdown document;
//! [`pipeline`] drives a whole collection from load to persist.

pub mod compiler;
pub mod pipeline;
