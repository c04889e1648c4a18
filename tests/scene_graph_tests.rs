use approx::assert_relative_eq;
use chart_stage::StageError;
use chart_stage::graphics::Graphics;
use chart_stage::math::Point;
use chart_stage::scene::Scene;

#[test]
fn add_child_reparents_and_preserves_order() {
    let mut scene = Scene::new();
    let root = scene.root();
    let a = scene.create_container();
    let b = scene.create_container();
    let c = scene.create_container();
    scene.add_child(root, a).expect("add a");
    scene.add_child(root, b).expect("add b");
    scene.add_child(a, c).expect("add c under a");

    scene.add_child(b, c).expect("move c under b");
    assert_eq!(scene.parent(c).expect("parent"), Some(b));
    assert!(scene.children(a).expect("children of a").is_empty());
    assert_eq!(scene.children(b).expect("children of b"), &[c]);
    assert_eq!(scene.children(root).expect("root children"), &[a, b]);
}

#[test]
fn add_child_rejects_cycles() {
    let mut scene = Scene::new();
    let root = scene.root();
    let parent = scene.create_container();
    let child = scene.create_container();
    scene.add_child(root, parent).expect("add parent");
    scene.add_child(parent, child).expect("add child");

    let err = scene.add_child(child, parent).expect_err("cycle must fail");
    assert!(matches!(err, StageError::WouldCreateCycle { .. }));
    let err = scene.add_child(child, child).expect_err("self parenting must fail");
    assert!(matches!(err, StageError::WouldCreateCycle { .. }));
}

#[test]
fn remove_children_range_is_strict() {
    let mut scene = Scene::new();
    let root = scene.root();
    for _ in 0..3 {
        let child = scene.create_container();
        scene.add_child(root, child).expect("add child");
    }

    let err = scene
        .remove_children(root, 0, Some(5))
        .expect_err("end past the child count");
    assert!(matches!(err, StageError::RangeError(_)));
    assert_eq!(scene.children(root).expect("children").len(), 3);

    let removed = scene.remove_children(root, 1, None).expect("remove tail");
    assert_eq!(removed.len(), 2);
    assert_eq!(scene.children(root).expect("children").len(), 1);
    for id in removed {
        assert_eq!(scene.parent(id).expect("detached"), None);
    }
}

#[test]
fn remove_children_on_empty_container_is_a_no_op() {
    let mut scene = Scene::new();
    let root = scene.root();
    let removed = scene.remove_children(root, 0, None).expect("empty span");
    assert!(removed.is_empty());
}

#[test]
fn child_index_operations() {
    let mut scene = Scene::new();
    let root = scene.root();
    let a = scene.create_container();
    let b = scene.create_container();
    let c = scene.create_container();
    for id in [a, b, c] {
        scene.add_child(root, id).expect("add");
    }

    scene.swap_children(root, a, c).expect("swap");
    assert_eq!(scene.children(root).expect("children"), &[c, b, a]);
    scene.set_child_index(root, a, 0).expect("move a to front");
    assert_eq!(scene.get_child_index(root, a).expect("index"), 0);
    assert_eq!(scene.get_child_at(root, 2).expect("last"), b);
    assert!(matches!(
        scene.get_child_at(root, 3),
        Err(StageError::RangeError(_))
    ));
}

#[test]
fn destroyed_handles_are_stale() {
    let mut scene = Scene::new();
    let root = scene.root();
    let parent = scene.create_container();
    let child = scene.create_container();
    scene.add_child(root, parent).expect("add parent");
    scene.add_child(parent, child).expect("add child");

    scene.destroy(parent).expect("destroy");
    assert!(!scene.is_alive(parent));
    assert!(!scene.is_alive(child));
    assert!(matches!(scene.node(child), Err(StageError::NodeNotFound(_))));
    assert!(scene.children(root).expect("root children").is_empty());

    let reused = scene.create_container();
    assert!(scene.is_alive(reused));
    assert!(!scene.is_alive(parent));
}

#[test]
fn world_transform_and_alpha_propagate() {
    let mut scene = Scene::new();
    let root = scene.root();
    let parent = scene.create_container();
    let child = scene.create(Graphics::new());
    scene.add_child(root, parent).expect("add parent");
    scene.add_child(parent, child).expect("add child");
    {
        let node = scene.node_mut(parent).expect("parent");
        node.transform.set_position(10.0, 20.0);
        node.transform.set_scale(2.0, 2.0);
        node.alpha = 0.5;
    }
    {
        let node = scene.node_mut(child).expect("child");
        node.transform.set_position(5.0, 5.0);
        node.alpha = 0.5;
    }
    scene.update_transform(root).expect("update");

    let global = scene.to_global(child, Point::new(1.0, 1.0)).expect("to global");
    assert_relative_eq!(global.x, 22.0);
    assert_relative_eq!(global.y, 32.0);
    let local = scene.to_local(child, global).expect("to local");
    assert_relative_eq!(local.x, 1.0, epsilon = 1e-9);
    assert_relative_eq!(local.y, 1.0, epsilon = 1e-9);
    assert_relative_eq!(scene.node(child).expect("child").world_alpha(), 0.25);
}

#[test]
fn set_mask_marks_the_mask_node() {
    let mut scene = Scene::new();
    let root = scene.root();
    let content = scene.create_container();
    let mut shape = Graphics::new();
    shape.begin_fill(0xFFFFFF, 1.0).draw_rect(0.0, 0.0, 10.0, 10.0);
    let mask = scene.create(shape);
    scene.add_child(root, content).expect("add content");
    scene.add_child(root, mask).expect("add mask");

    scene.set_mask(content, Some(mask)).expect("set mask");
    assert_eq!(scene.node(content).expect("content").mask(), Some(mask));
    assert!(scene.node(mask).expect("mask").is_mask());

    scene.set_mask(content, None).expect("clear mask");
    assert!(!scene.node(mask).expect("mask").is_mask());
}
