// src/io/mod.rs
pub mod fasta;
pub mod hashes;
