//! Annotation state engine for marking up a raster image.
//!
//! The crate owns everything between normalized pointer input and the paint
//! callback: the element model, snapshot undo/redo history, the tool state
//! machine and the hit-testing used to delete elements. Decoding the base
//! image, showing dialogs and rasterizing the result stay with the host,
//! which drives the engine through [`engine::Engine`] (or the host-free
//! [`engine::EngineCore`]) and receives [`engine::Action`]s back.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Orchestrator: [`engine::EngineCore`] and the renderer-owning [`engine::Engine`] |
//! | [`element`] | Element sum type, colors, normalization |
//! | [`history`] | Linear snapshot history with a cursor |
//! | [`input`] | Tools, modifiers, and the interaction mode state machine |
//! | [`hit`] | Distance and candidate tests used by the delete tool |
//! | [`geom`] | Points, segment distance, and drag constraints |
//! | [`render`] | Renderer/painter seams and the element paint dispatch |
//! | [`touch`] | Touch pointer gate for hosts that translate touch input |
//! | [`config`] | Palette and tuning values supplied at construction |
//! | [`consts`] | Shared numeric defaults (thresholds, arrowhead geometry) |

pub mod config;
pub mod consts;
pub mod element;
pub mod engine;
pub mod geom;
pub mod history;
pub mod hit;
pub mod input;
pub mod render;
pub mod touch;
