//! Thumbstick Render Library
//!
//! Drawing-surface implementations for the Thumbstick widget.
//! The default implementation records into a Vello scene and presents it
//! with wgpu.

mod renderer;

#[cfg(feature = "vello-renderer")]
mod presenter;
#[cfg(feature = "vello-renderer")]
mod vello_impl;

pub use renderer::{RenderResult, RendererError};

#[cfg(feature = "vello-renderer")]
pub use presenter::Presenter;
#[cfg(feature = "vello-renderer")]
pub use vello_impl::VelloSurface;
