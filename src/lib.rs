pub mod basis;
pub mod chunk;
pub mod combine;
pub mod error;
pub mod grid;
pub mod naming;
pub mod reassemble;
pub mod split;
