use glam::Vec4;

/// Opaque identity of an engine resource (texture, sprite sheet, ...).
///
/// The animation core never dereferences a handle; reference-type curves
/// swap handle identity and the renderer interprets it elsewhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ResourceHandle(pub u64);

/// Minimal material component.
///
/// The subset of material state the animation core can drive: a base color
/// (color curves) and a main texture handle (reference curves, e.g. sprite
/// swaps).
#[derive(Debug, Clone)]
pub struct Material {
    pub name: String,
    /// Linear-space RGBA.
    pub base_color: Vec4,
    pub main_texture: Option<ResourceHandle>,
}

impl Material {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            base_color: Vec4::ONE,
            main_texture: None,
        }
    }
}
