//! Reference collaborators: a headless engine and a catalog track selector.
//!
//! Neither decodes anything. They model the engine surface closely enough
//! to drive the facade in headless hosts and tests.

pub mod catalog;
pub mod headless;

pub use catalog::{CatalogTrackSelector, RendererTracks, TrackFormat};
pub use headless::{HeadlessEngine, HeadlessSession, SessionOp, SessionProbe};
