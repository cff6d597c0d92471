pub mod benchmark;
pub mod hash;
