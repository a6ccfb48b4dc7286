// Library root
// -----------
// This crate exposes a small library surface for the progress tracker. The
// binary (`main.rs`) uses these modules to run the interactive menu.
//
// Module responsibilities:
// - `registry`: courses, scores and the typed parsers for user input.
// - `storage`: loads and saves the registry as one JSON snapshot.
// - `grading` / `report`: pure computations over the registry.
// - `tracker`: context object tying storage and registry together; every
//   successful mutation is persisted immediately.
// - `ui`: the numbered menu loop.
// - `config` / `error`: ambient configuration and the error taxonomy.
pub mod config;
pub mod error;
pub mod grading;
pub mod registry;
pub mod report;
pub mod storage;
pub mod tracker;
pub mod ui;

pub use error::TrackerError;
pub use tracker::Tracker;
