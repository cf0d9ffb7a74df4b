//! Render adapter seam
//!
//! The engine's obligation ends at the derived view structures; turning
//! them into pixels, tables, or text is a renderer's job. Adapters are
//! polymorphic over the view type so one renderer can cover all three
//! views.

/// Turns a derived view into a render artifact.
pub trait RenderAdapter<V> {
    type Artifact;

    fn render(&self, view: &V) -> Self::Artifact;
}
