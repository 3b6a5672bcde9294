// src/workers/mod.rs

pub mod decay_worker;

pub use decay_worker::DecayWorker;
