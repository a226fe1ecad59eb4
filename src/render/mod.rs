//! Meme compositing: layout planning and the `vello_cpu` rasterizer.

/// CPU compositor.
pub mod cpu;
/// Pure caption geometry.
pub mod plan;
/// Rendered pixel buffers.
pub mod surface;
