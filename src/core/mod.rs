// SeqSleuth - core/mod.rs
//
// Core business logic layer: parsing, session graphs, successor trees.
// Must NOT depend on: platform, app, or any filesystem access.

pub mod catalog;
pub mod frequency;
pub mod graph;
pub mod model;
pub mod parser;
pub mod report;
pub mod tree;
