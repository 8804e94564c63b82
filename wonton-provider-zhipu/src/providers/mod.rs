//! Provider implementations

pub mod zhipu;
