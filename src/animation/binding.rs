use crate::animation::clip::AnimationClip;
use crate::animation::curve::CurveData;
use crate::animation::values::AnimatedValue;
use crate::scene::{NodeKey, Scene};

/// The scene property a curve drives.
///
/// The authoring format's (target type, property name) pair collapses into
/// one enum here; resolution produces a direct write target with no string
/// lookup on the per-frame path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TargetProperty {
    /// `transform.position`
    Translation,
    /// `transform.rotation`
    Rotation,
    /// `transform.scale`
    Scale,
    /// `material.base_color` of the node's material
    MaterialColor,
    /// `material.main_texture` of the node's material (reference curves)
    MaterialTexture,
}

impl TargetProperty {
    /// Whether `curve` produces values this property can consume.
    #[must_use]
    pub fn accepts(self, curve: &CurveData) -> bool {
        matches!(
            (self, curve),
            (
                TargetProperty::Translation | TargetProperty::Scale,
                CurveData::Vector3(_)
            ) | (TargetProperty::Rotation, CurveData::Quaternion(_))
                | (
                    TargetProperty::MaterialColor,
                    CurveData::Color(_) | CurveData::Vector4(_)
                )
                | (TargetProperty::MaterialTexture, CurveData::Reference(_))
        )
    }
}

/// A curve binding resolved against a concrete scene node.
///
/// Resolution happens once per (animator, state); after that the per-frame
/// path is an index into the clip's curves plus a direct node key.
#[derive(Debug, Clone, Copy)]
pub(crate) struct ResolvedCurve {
    pub curve_index: usize,
    pub node: NodeKey,
    pub property: TargetProperty,
}

/// Resolves every curve binding of `clip` against the hierarchy under
/// `root`.
///
/// Bindings that cannot be resolved (unknown path, empty curve, value type
/// mismatched to the property) are skipped with a warning so a broken
/// binding degrades to "that property stops animating" instead of an error.
pub(crate) fn resolve_clip_bindings(
    scene: &Scene,
    root: NodeKey,
    clip: &AnimationClip,
) -> Vec<ResolvedCurve> {
    let mut resolved = Vec::with_capacity(clip.curve_bindings().len());

    for (curve_index, binding) in clip.curve_bindings().iter().enumerate() {
        if binding.curve.is_empty() {
            log::warn!(
                "Clip '{}': curve for '{}' has no keys, skipping",
                clip.name,
                binding.relative_path
            );
            continue;
        }
        if !binding.property.accepts(&binding.curve) {
            log::warn!(
                "Clip '{}': curve type mismatch for {:?} at '{}', skipping",
                clip.name,
                binding.property,
                binding.relative_path
            );
            continue;
        }
        let Some(node) = scene.find_by_path(root, &binding.relative_path) else {
            log::warn!(
                "Clip '{}': binding path '{}' did not resolve, skipping",
                clip.name,
                binding.relative_path
            );
            continue;
        };
        resolved.push(ResolvedCurve {
            curve_index,
            node,
            property: binding.property,
        });
    }

    log::debug!(
        "Clip '{}': resolved {}/{} curve bindings",
        clip.name,
        resolved.len(),
        clip.curve_bindings().len()
    );
    resolved
}

/// Reads the current value of a bound property, used to seed blends for
/// properties only one side of a crossfade (or only an upper layer) drives.
#[must_use]
pub(crate) fn read_value(
    scene: &Scene,
    node: NodeKey,
    property: TargetProperty,
) -> Option<AnimatedValue> {
    let n = scene.get_node(node)?;
    match property {
        TargetProperty::Translation => Some(AnimatedValue::Vector3(n.transform.position)),
        TargetProperty::Rotation => Some(AnimatedValue::Quaternion(n.transform.rotation)),
        TargetProperty::Scale => Some(AnimatedValue::Vector3(n.transform.scale)),
        TargetProperty::MaterialColor => {
            let material = scene.get_material(n.material?)?;
            Some(AnimatedValue::Color(material.base_color))
        }
        TargetProperty::MaterialTexture => {
            let material = scene.get_material(n.material?)?;
            material.main_texture.map(AnimatedValue::Reference)
        }
    }
}

/// Writes a final composited value through to the scene. A plain write: the
/// animation core does not interpret the property further.
pub(crate) fn apply_value(
    scene: &mut Scene,
    node: NodeKey,
    property: TargetProperty,
    value: AnimatedValue,
) {
    match (property, value) {
        (TargetProperty::Translation, AnimatedValue::Vector3(v)) => {
            if let Some(n) = scene.get_node_mut(node) {
                n.transform.position = v;
                n.transform.mark_dirty();
            }
        }
        (TargetProperty::Rotation, AnimatedValue::Quaternion(q)) => {
            if let Some(n) = scene.get_node_mut(node) {
                n.transform.rotation = q;
                n.transform.mark_dirty();
            }
        }
        (TargetProperty::Scale, AnimatedValue::Vector3(v)) => {
            if let Some(n) = scene.get_node_mut(node) {
                n.transform.scale = v;
                n.transform.mark_dirty();
            }
        }
        (
            TargetProperty::MaterialColor,
            AnimatedValue::Color(c) | AnimatedValue::Vector4(c),
        ) => {
            let key = scene.get_node(node).and_then(|n| n.material);
            if let Some(material) = key.and_then(|k| scene.get_material_mut(k)) {
                material.base_color = c;
            }
        }
        (TargetProperty::MaterialTexture, AnimatedValue::Reference(handle)) => {
            let key = scene.get_node(node).and_then(|n| n.material);
            if let Some(material) = key.and_then(|k| scene.get_material_mut(k)) {
                material.main_texture = Some(handle);
            }
        }
        // Mismatched value for the property: configuration error, skip
        _ => {}
    }
}
