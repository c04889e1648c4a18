//! Retained scene graph.
//!
//! Nodes live in a slot arena owned by [`Scene`] and are addressed by
//! generational [`NodeId`] handles; a handle to a destroyed node is detected
//! and reported as [`StageError::NodeNotFound`] instead of aliasing whatever
//! reuses the slot.

mod node;
mod traits;

pub use node::{Node, NodeContent, NodeId};
pub use traits::{Drawable, HitTestable, Transformable};

use tracing::{debug, trace};

use crate::error::{StageError, StageResult};
use crate::graphics::Graphics;
use crate::interaction::{EventHandler, EventKind};
use crate::math::{Bounds, Matrix, Point, Rectangle};
use crate::sprite::Sprite;
use crate::text::Text;

pub struct Scene {
    nodes: Vec<Option<Node>>,
    generations: Vec<u32>,
    free_list: Vec<u32>,
    root: NodeId,
}

impl std::fmt::Debug for Scene {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scene")
            .field("nodes_total", &self.nodes.len())
            .field("nodes_alive", &self.len())
            .field("free_list", &self.free_list.len())
            .field("root", &self.root)
            .finish_non_exhaustive()
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene {
    /// Creates a scene holding only its root container.
    #[must_use]
    pub fn new() -> Self {
        let mut scene = Self {
            nodes: Vec::new(),
            generations: Vec::new(),
            free_list: Vec::new(),
            root: NodeId {
                index: 0,
                generation: 0,
            },
        };
        let mut root = Node::new(NodeContent::Empty);
        root.name = Some("stage".to_owned());
        scene.root = scene.insert(root);
        scene
    }

    #[must_use]
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Number of live nodes, the root included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.iter().filter(|slot| slot.is_some()).count()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[must_use]
    pub fn is_alive(&self, id: NodeId) -> bool {
        self.generations.get(id.index as usize) == Some(&id.generation)
            && self
                .nodes
                .get(id.index as usize)
                .is_some_and(Option::is_some)
    }

    /// Creates a detached node.
    pub fn create(&mut self, content: impl Into<NodeContent>) -> NodeId {
        self.insert(Node::new(content.into()))
    }

    pub fn create_container(&mut self) -> NodeId {
        self.create(NodeContent::Empty)
    }

    pub fn node(&self, id: NodeId) -> StageResult<&Node> {
        if !self.is_alive(id) {
            return Err(StageError::NodeNotFound(id.to_string()));
        }
        self.nodes[id.index as usize]
            .as_ref()
            .ok_or_else(|| StageError::NodeNotFound(id.to_string()))
    }

    pub fn node_mut(&mut self, id: NodeId) -> StageResult<&mut Node> {
        if !self.is_alive(id) {
            return Err(StageError::NodeNotFound(id.to_string()));
        }
        self.nodes[id.index as usize]
            .as_mut()
            .ok_or_else(|| StageError::NodeNotFound(id.to_string()))
    }

    pub fn graphics_mut(&mut self, id: NodeId) -> StageResult<&mut Graphics> {
        match self.node_mut(id)?.content_mut() {
            NodeContent::Graphics(graphics) => Ok(graphics),
            _ => Err(StageError::InvalidData(format!("{id} is not a graphics node"))),
        }
    }

    pub fn sprite_mut(&mut self, id: NodeId) -> StageResult<&mut Sprite> {
        match self.node_mut(id)?.content_mut() {
            NodeContent::Sprite(sprite) => Ok(sprite),
            _ => Err(StageError::InvalidData(format!("{id} is not a sprite node"))),
        }
    }

    pub fn text_mut(&mut self, id: NodeId) -> StageResult<&mut Text> {
        match self.node_mut(id)?.content_mut() {
            NodeContent::Text(text) => Ok(text),
            _ => Err(StageError::InvalidData(format!("{id} is not a text node"))),
        }
    }

    /// Registers `handler` for `kind` events dispatched to `node`.
    pub fn on(
        &mut self,
        node: NodeId,
        kind: EventKind,
        handler: EventHandler,
    ) -> StageResult<()> {
        self.node_mut(node)?.listeners.on(kind, handler);
        Ok(())
    }

    pub fn off(&mut self, node: NodeId, kind: EventKind) -> StageResult<usize> {
        Ok(self.node_mut(node)?.listeners.off(kind))
    }

    pub fn children(&self, id: NodeId) -> StageResult<&[NodeId]> {
        Ok(self.node(id)?.children())
    }

    pub fn parent(&self, id: NodeId) -> StageResult<Option<NodeId>> {
        Ok(self.node(id)?.parent)
    }

    /// Appends `child` to `parent`, detaching it from any previous parent.
    pub fn add_child(&mut self, parent: NodeId, child: NodeId) -> StageResult<NodeId> {
        let len = self.node(parent)?.children.len();
        let already_here = self.node(child)?.parent == Some(parent);
        let index = if already_here { len - 1 } else { len };
        self.add_child_at(parent, child, index)
    }

    pub fn add_child_at(
        &mut self,
        parent: NodeId,
        child: NodeId,
        index: usize,
    ) -> StageResult<NodeId> {
        let len = self.node(parent)?.children.len();
        self.node(child)?;
        if index > len {
            return Err(StageError::RangeError(format!(
                "add_child_at: index {index} out of bounds {len}"
            )));
        }
        if child == parent || self.is_ancestor(child, parent) {
            return Err(StageError::WouldCreateCycle {
                parent: parent.to_string(),
                child: child.to_string(),
            });
        }

        if let Some(previous) = self.node(child)?.parent {
            self.unlink(previous, child);
        }

        let siblings = &mut self.node_mut(parent)?.children;
        let index = index.min(siblings.len());
        siblings.insert(index, child);
        self.node_mut(child)?.parent = Some(parent);
        trace!(%parent, %child, index, "add child");
        Ok(child)
    }

    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) -> StageResult<NodeId> {
        let index = self.get_child_index(parent, child)?;
        self.remove_child_at(parent, index)
    }

    pub fn remove_child_at(&mut self, parent: NodeId, index: usize) -> StageResult<NodeId> {
        let child = self.get_child_at(parent, index)?;
        self.node_mut(parent)?.children.remove(index);
        self.node_mut(child)?.parent = None;
        trace!(%parent, %child, index, "remove child");
        Ok(child)
    }

    /// Removes children `begin..end` (`end` defaults to the child count).
    ///
    /// An out-of-range or empty span is a [`StageError::RangeError`], except
    /// for an empty span on a container without children.
    pub fn remove_children(
        &mut self,
        parent: NodeId,
        begin: usize,
        end: Option<usize>,
    ) -> StageResult<Vec<NodeId>> {
        let len = self.node(parent)?.children.len();
        let end = end.unwrap_or(len);

        if begin == end && len == 0 {
            return Ok(Vec::new());
        }
        if end > len || begin >= end {
            return Err(StageError::RangeError(format!(
                "remove_children: numeric values are outside the acceptable range (begin={begin}, end={end}, len={len})"
            )));
        }

        let removed: Vec<NodeId> = self.node_mut(parent)?.children.drain(begin..end).collect();
        for child in &removed {
            if let Some(node) = self.slot_mut(*child) {
                node.parent = None;
            }
        }
        trace!(%parent, count = removed.len(), "remove children");
        Ok(removed)
    }

    pub fn get_child_at(&self, parent: NodeId, index: usize) -> StageResult<NodeId> {
        let children = &self.node(parent)?.children;
        children.get(index).copied().ok_or_else(|| {
            StageError::RangeError(format!(
                "get_child_at: index {index} does not exist (len {})",
                children.len()
            ))
        })
    }

    pub fn get_child_index(&self, parent: NodeId, child: NodeId) -> StageResult<usize> {
        self.node(parent)?
            .children
            .iter()
            .position(|candidate| *candidate == child)
            .ok_or_else(|| StageError::NotAChild {
                parent: parent.to_string(),
                child: child.to_string(),
            })
    }

    pub fn set_child_index(
        &mut self,
        parent: NodeId,
        child: NodeId,
        index: usize,
    ) -> StageResult<()> {
        let len = self.node(parent)?.children.len();
        if index >= len {
            return Err(StageError::RangeError(format!(
                "set_child_index: index {index} out of bounds {len}"
            )));
        }
        let current = self.get_child_index(parent, child)?;
        let children = &mut self.node_mut(parent)?.children;
        children.remove(current);
        children.insert(index, child);
        Ok(())
    }

    pub fn swap_children(&mut self, parent: NodeId, a: NodeId, b: NodeId) -> StageResult<()> {
        if a == b {
            return Ok(());
        }
        let index_a = self.get_child_index(parent, a)?;
        let index_b = self.get_child_index(parent, b)?;
        self.node_mut(parent)?.children.swap(index_a, index_b);
        Ok(())
    }

    /// Destroys `id` and its whole subtree; their handles become stale.
    pub fn destroy(&mut self, id: NodeId) -> StageResult<()> {
        if id == self.root {
            return Err(StageError::InvalidData(
                "the scene root cannot be destroyed".to_owned(),
            ));
        }
        if let Some(parent) = self.node(id)?.parent {
            self.unlink(parent, id);
        }
        let freed = self.free_subtree(id);
        debug!(node = %id, freed, "destroy node");
        Ok(())
    }

    /// Uses `mask` as a clip for `node` and its subtree. A mask node is
    /// never drawn itself; clearing or replacing it makes it renderable
    /// again.
    pub fn set_mask(&mut self, node: NodeId, mask: Option<NodeId>) -> StageResult<()> {
        self.node(node)?;
        if let Some(mask) = mask {
            self.node(mask)?;
            if mask == node {
                return Err(StageError::InvalidData(format!(
                    "{node} cannot mask itself"
                )));
            }
        }

        if let Some(previous) = self.node(node)?.mask {
            if let Some(previous) = self.slot_mut(previous) {
                previous.renderable = true;
                previous.is_mask = false;
            }
        }
        self.node_mut(node)?.mask = mask;
        if let Some(mask) = mask {
            let mask_node = self.node_mut(mask)?;
            mask_node.renderable = false;
            mask_node.is_mask = true;
        }
        Ok(())
    }

    /// Recomputes world transforms and world alpha for `id` and every
    /// visible descendant, treating `id` as a root.
    pub fn update_transform(&mut self, id: NodeId) -> StageResult<()> {
        self.node(id)?;
        self.update_subtree(id, &Matrix::IDENTITY, 1.0);
        Ok(())
    }

    /// Rebuilds the bounds of `id` and its visible, renderable descendants
    /// from their current world transforms.
    pub fn calculate_bounds(&mut self, id: NodeId) -> StageResult<()> {
        self.node(id)?;
        self.calculate_subtree_bounds(id);
        Ok(())
    }

    /// World-space bounds of `id`, refreshing transforms from the root down
    /// first.
    pub fn get_bounds(&mut self, id: NodeId) -> StageResult<Rectangle> {
        self.update_from_ancestors(id)?;
        Ok(self.calculate_subtree_bounds(id).rectangle())
    }

    /// Bounds of `id` in its own local space.
    pub fn get_local_bounds(&mut self, id: NodeId) -> StageResult<Rectangle> {
        let node = self.node_mut(id)?;
        let saved = std::mem::take(&mut node.transform);
        self.update_subtree(id, &Matrix::IDENTITY, 1.0);
        let bounds = self.calculate_subtree_bounds(id).rectangle();
        self.node_mut(id)?.transform = saved;
        self.update_from_ancestors(id)?;
        Ok(bounds)
    }

    /// Maps a local point of `id` to stage coordinates using the current
    /// world transform.
    pub fn to_global(&self, id: NodeId, point: Point) -> StageResult<Point> {
        Ok(self.node(id)?.transform.world_matrix().apply(point))
    }

    pub fn to_local(&self, id: NodeId, point: Point) -> StageResult<Point> {
        Ok(self.node(id)?.transform.world_matrix().apply_inverse(point))
    }

    /// Whether the content of `id` covers the stage point `global`.
    pub fn contains_point(&self, id: NodeId, global: Point) -> StageResult<bool> {
        let node = self.node(id)?;
        let local = node.transform.world_matrix().apply_inverse(global);
        Ok(node.content.contains_local_point(local))
    }

    /// `id` followed by all of its descendants in paint order.
    pub fn descendants(&self, id: NodeId) -> StageResult<Vec<NodeId>> {
        self.node(id)?;
        let mut out = Vec::new();
        let mut stack = vec![id];
        while let Some(next) = stack.pop() {
            out.push(next);
            if let Some(node) = self.slot(next) {
                stack.extend(node.children.iter().rev().copied());
            }
        }
        Ok(out)
    }

    pub(crate) fn slot(&self, id: NodeId) -> Option<&Node> {
        if !self.is_alive(id) {
            return None;
        }
        self.nodes[id.index as usize].as_ref()
    }

    pub(crate) fn slot_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        if !self.is_alive(id) {
            return None;
        }
        self.nodes[id.index as usize].as_mut()
    }

    fn insert(&mut self, node: Node) -> NodeId {
        if let Some(index) = self.free_list.pop() {
            let generation = self.generations[index as usize].wrapping_add(1);
            self.generations[index as usize] = generation;
            self.nodes[index as usize] = Some(node);
            NodeId { index, generation }
        } else {
            let index = self.nodes.len() as u32;
            self.nodes.push(Some(node));
            self.generations.push(0);
            NodeId {
                index,
                generation: 0,
            }
        }
    }

    fn is_ancestor(&self, candidate: NodeId, of: NodeId) -> bool {
        let mut cursor = self.slot(of).and_then(|node| node.parent);
        while let Some(id) = cursor {
            if id == candidate {
                return true;
            }
            cursor = self.slot(id).and_then(|node| node.parent);
        }
        false
    }

    fn unlink(&mut self, parent: NodeId, child: NodeId) {
        if let Some(node) = self.slot_mut(parent) {
            node.children.retain(|candidate| *candidate != child);
        }
        if let Some(node) = self.slot_mut(child) {
            node.parent = None;
        }
    }

    fn free_subtree(&mut self, id: NodeId) -> usize {
        let Some(node) = self.slot_mut(id) else {
            return 0;
        };
        let children = std::mem::take(&mut node.children);
        let mask = node.mask.take();

        if let Some(mask) = mask.and_then(|mask| self.slot_mut(mask)) {
            mask.renderable = true;
            mask.is_mask = false;
        }

        let mut freed = 1;
        for child in children {
            freed += self.free_subtree(child);
        }
        self.nodes[id.index as usize] = None;
        self.free_list.push(id.index);
        freed
    }

    fn update_subtree(&mut self, id: NodeId, parent_world: &Matrix, parent_alpha: f64) {
        let Some(node) = self.slot_mut(id) else {
            return;
        };
        node.transform.update_transform(parent_world);
        node.world_alpha = node.alpha * parent_alpha;
        let world = node.transform.world_matrix();
        let world_alpha = node.world_alpha;
        let mask = node.mask;
        let child_count = node.children.len();

        for index in 0..child_count {
            let Some(child) = self.slot(id).and_then(|node| node.children.get(index).copied())
            else {
                break;
            };
            if self.slot(child).is_some_and(|child| child.visible) {
                self.update_subtree(child, &world, world_alpha);
            }
        }

        // a detached mask has no parent to update it
        if let Some(mask) = mask {
            if self.slot(mask).is_some_and(|mask| mask.parent.is_none()) {
                self.update_subtree(mask, &Matrix::IDENTITY, 1.0);
            }
        }
    }

    fn update_from_ancestors(&mut self, id: NodeId) -> StageResult<()> {
        let mut chain = Vec::new();
        let mut cursor = self.node(id)?.parent;
        while let Some(ancestor) = cursor {
            chain.push(ancestor);
            cursor = self.slot(ancestor).and_then(|node| node.parent);
        }

        let mut world = Matrix::IDENTITY;
        let mut alpha = 1.0;
        for ancestor in chain.into_iter().rev() {
            if let Some(node) = self.slot_mut(ancestor) {
                node.transform.update_transform(&world);
                node.world_alpha = node.alpha * alpha;
                world = node.transform.world_matrix();
                alpha = node.world_alpha;
            }
        }
        self.update_subtree(id, &world, alpha);
        Ok(())
    }

    fn calculate_subtree_bounds(&mut self, id: NodeId) -> Bounds {
        let Some(node) = self.slot_mut(id) else {
            return Bounds::new();
        };
        if let NodeContent::Graphics(graphics) = &mut node.content {
            graphics.flush_path();
        }

        let mut bounds = Bounds::new();
        let world = node.transform.world_matrix();
        node.content.add_content_bounds(&world, &mut bounds);
        let children = node.children.clone();

        for child in children {
            let Some((visible, renderable, mask)) = self
                .slot(child)
                .map(|node| (node.visible, node.renderable, node.mask))
            else {
                continue;
            };
            if !visible || !renderable {
                continue;
            }
            let child_bounds = self.calculate_subtree_bounds(child);
            match mask.filter(|mask| self.is_alive(*mask)) {
                Some(mask) => {
                    let mask_bounds = self.calculate_subtree_bounds(mask);
                    bounds.add_bounds_mask(&child_bounds, &mask_bounds);
                }
                None => bounds.add_bounds(&child_bounds),
            }
        }

        if let Some(node) = self.slot_mut(id) {
            node.bounds = bounds;
        }
        bounds
    }
}
