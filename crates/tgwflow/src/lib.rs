// Module structure for the Transit Gateway flow log decoder.

// Core decoding
pub mod parser;
pub mod logs;
pub mod unmarshaler;

// Ambient
pub mod conf;
pub mod runtime;
