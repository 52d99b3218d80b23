//! Runtime module — CLI lifecycle: boot, decode inputs, render output.

pub mod boot;
pub mod decode;
pub mod output;
