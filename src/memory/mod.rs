//! Runtime memory model
//!
//! - [`value`]: tagged runtime values (integer or real)
//! - [`store`]: the flat variable store written by assignments
//!
//! The store is created by the caller and lent to the interpreter for one run;
//! the interpreter never owns or shares it.

pub mod store;
pub mod value;
