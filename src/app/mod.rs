// SeqSleuth - app/mod.rs
//
// Application layer: settings resolution and pipeline orchestration.
// Dependencies: core layer, platform layer for config and file reads.

pub mod analysis;
pub mod settings;
