//! Provider adapter implementations.

pub mod groq;
