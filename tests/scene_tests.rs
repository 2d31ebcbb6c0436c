//! Scene Graph Tests
//!
//! Tests for:
//! - Scene: create/remove nodes, attach hierarchy, subtree removal
//! - Path lookup used by animation curve bindings
//! - Material pool assignment
//! - Transform dirty tracking and local matrix refresh

use glam::Vec3;

use eidolon::scene::{Material, Node, Scene};

// ============================================================================
// Node Creation & Removal
// ============================================================================

#[test]
fn scene_create_node() {
    let mut scene = Scene::new();
    let key = scene.create_node("hero");
    assert_eq!(scene.get_node(key).map(|n| n.name.as_str()), Some("hero"));
    assert!(scene.root_nodes.contains(&key));
}

#[test]
fn scene_create_child_links_both_sides() {
    let mut scene = Scene::new();
    let parent = scene.create_node("torso");
    let child = scene.create_child(parent, "arm");

    assert_eq!(scene.get_node(child).unwrap().parent(), Some(parent));
    assert!(scene.get_node(parent).unwrap().children().contains(&child));
    assert!(!scene.root_nodes.contains(&child));
}

#[test]
fn scene_attach_reparents() {
    let mut scene = Scene::new();
    let a = scene.create_node("a");
    let b = scene.create_node("b");
    let child = scene.create_child(a, "child");

    scene.attach(child, b);

    assert_eq!(scene.get_node(child).unwrap().parent(), Some(b));
    assert!(!scene.get_node(a).unwrap().children().contains(&child));
    assert!(scene.get_node(b).unwrap().children().contains(&child));
}

#[test]
fn scene_remove_node_removes_subtree() {
    let mut scene = Scene::new();
    let parent = scene.create_node("parent");
    let child = scene.create_child(parent, "child");
    let grandchild = scene.create_child(child, "grandchild");

    scene.remove_node(parent);

    assert!(scene.get_node(parent).is_none());
    assert!(scene.get_node(child).is_none());
    assert!(scene.get_node(grandchild).is_none());
    assert!(!scene.root_nodes.contains(&parent));
}

// ============================================================================
// Path Lookup
// ============================================================================

#[test]
fn find_by_path_walks_names() {
    let mut scene = Scene::new();
    let root = scene.create_node("root");
    let torso = scene.create_child(root, "torso");
    let arm = scene.create_child(torso, "arm_l");
    let hand = scene.create_child(arm, "hand");

    assert_eq!(scene.find_by_path(root, "torso/arm_l/hand"), Some(hand));
    assert_eq!(scene.find_by_path(root, "torso"), Some(torso));
    assert_eq!(scene.find_by_path(root, ""), Some(root), "empty path is the root");
    assert_eq!(scene.find_by_path(root, "torso/arm_r"), None);
    assert_eq!(scene.find_by_path(root, "ghost"), None);
}

#[test]
fn find_by_path_picks_first_matching_sibling() {
    let mut scene = Scene::new();
    let root = scene.create_node("root");
    let first = scene.create_child(root, "twin");
    let _second = scene.create_child(root, "twin");

    assert_eq!(scene.find_by_path(root, "twin"), Some(first));
}

// ============================================================================
// Materials
// ============================================================================

#[test]
fn assign_material_links_node() {
    let mut scene = Scene::new();
    let node = scene.create_node("mesh");
    let key = scene.assign_material(node, Material::new("skin"));

    assert_eq!(scene.get_node(node).unwrap().material, Some(key));
    assert_eq!(scene.get_material(key).map(|m| m.name.as_str()), Some("skin"));
}

// ============================================================================
// Transform
// ============================================================================

#[test]
fn transform_rebuilds_only_when_changed() {
    let mut node = Node::with_name("t");
    assert!(node.transform.update_local_matrix(), "first update rebuilds");
    assert!(!node.transform.update_local_matrix(), "clean transform is a no-op");

    node.transform.position = Vec3::new(1.0, 2.0, 3.0);
    assert!(node.transform.update_local_matrix());
    assert_eq!(
        node.transform.local_matrix().translation,
        glam::Vec3A::new(1.0, 2.0, 3.0)
    );
}

#[test]
fn scene_update_local_matrices() {
    let mut scene = Scene::new();
    let key = scene.create_node("n");
    scene.get_node_mut(key).unwrap().transform.position = Vec3::X;
    scene.update_local_matrices();

    let m = *scene.get_node(key).unwrap().transform.local_matrix();
    assert_eq!(m.translation, glam::Vec3A::X);
}
