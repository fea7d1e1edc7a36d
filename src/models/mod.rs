// src/models/mod.rs

pub mod preview;
