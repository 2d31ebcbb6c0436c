//! Scene graph module
//!
//! The minimal hierarchy the animation core writes into:
//! - Node: scene node (name, parent/child links, transform)
//! - Transform: TRS component with dirty tracking
//! - Material: color / texture component targeted by property curves
//! - Scene: node arena and component pools

pub mod material;
pub mod node;
pub mod scene;
pub mod transform;

pub use material::{Material, ResourceHandle};
pub use node::Node;
pub use scene::Scene;
pub use transform::Transform;

use slotmap::new_key_type;

new_key_type! {
    pub struct NodeKey;
    pub struct MaterialKey;
}
