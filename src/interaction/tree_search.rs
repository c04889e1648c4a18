use crate::math::Point;
use crate::scene::{HitTestable, NodeId, Scene};

/// One interactive node reached by a hit-test pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HitVisit {
    pub node: NodeId,
    /// The pointer is over this node or one of its descendants.
    pub hit: bool,
    /// Event target as it stood when this node was reached.
    pub target: Option<NodeId>,
}

/// Walks the scene front to back and records every interactive node it
/// reaches, in the order event handlers should see them.
///
/// The walk only reads the scene; the manager replays the recorded visits
/// afterwards so handlers are free to mutate nodes.
#[derive(Debug, Default)]
pub struct TreeSearch {
    visits: Vec<HitVisit>,
    target: Option<NodeId>,
}

impl TreeSearch {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs a pass from `root`; returns whether anything under `root` was
    /// hit. With `hit_test` off every interactive node is visited with
    /// `hit == false`.
    pub fn find_hit(&mut self, scene: &Scene, point: Point, root: NodeId, hit_test: bool) -> bool {
        self.visits.clear();
        self.target = None;
        self.recursive_find_hit(scene, point, root, hit_test, false)
    }

    #[must_use]
    pub fn visits(&self) -> &[HitVisit] {
        &self.visits
    }

    pub fn take_visits(&mut self) -> Vec<HitVisit> {
        std::mem::take(&mut self.visits)
    }

    /// Topmost interactive node hit by the last pass.
    #[must_use]
    pub fn target(&self) -> Option<NodeId> {
        self.target
    }

    fn recursive_find_hit(
        &mut self,
        scene: &Scene,
        point: Point,
        id: NodeId,
        mut hit_test: bool,
        interactive: bool,
    ) -> bool {
        let Some(node) = scene.slot(id) else {
            return false;
        };
        if !node.visible {
            return false;
        }

        let interactive = node.interactive || interactive;
        let mut hit = false;
        let mut interactive_parent = interactive;
        let mut hit_test_children = true;

        if let Some(hit_area) = &node.hit_area {
            if hit_test {
                let local = node.transform.world_matrix().apply_inverse(point);
                if hit_area.contains(local.x, local.y) {
                    hit = true;
                } else {
                    hit_test = false;
                    hit_test_children = false;
                }
            }
            interactive_parent = false;
        } else if let Some(mask) = node.mask {
            if hit_test && !scene.contains_point(mask, point).unwrap_or(false) {
                hit_test = false;
            }
        }

        if hit_test_children && node.interactive_children {
            for child in node.children.iter().rev().copied() {
                if self.recursive_find_hit(scene, point, child, hit_test, interactive_parent) {
                    interactive_parent = false;
                    if self.target.is_some() {
                        hit_test = false;
                    }
                    hit = true;
                }
            }
        }

        if interactive {
            if hit_test && self.target.is_none() && node.hit_area.is_none() {
                let local = node.transform.world_matrix().apply_inverse(point);
                if node.content.contains_local_point(local) {
                    hit = true;
                }
            }
            if node.interactive {
                if hit && self.target.is_none() {
                    self.target = Some(id);
                }
                self.visits.push(HitVisit {
                    node: id,
                    hit,
                    target: self.target,
                });
            }
        }
        hit
    }
}
