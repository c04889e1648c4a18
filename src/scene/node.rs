use std::fmt;

use indexmap::IndexMap;

use crate::graphics::Graphics;
use crate::interaction::{EventListeners, InteractionTrackingData};
use crate::math::{Bounds, Shape, Transform};
use crate::render::WHITE_TINT;
use crate::sprite::Sprite;
use crate::text::Text;

/// Generational handle to a node owned by a [`super::Scene`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId {
    pub(crate) index: u32,
    pub(crate) generation: u32,
}

impl NodeId {
    #[must_use]
    pub fn index(self) -> u32 {
        self.index
    }

    #[must_use]
    pub fn generation(self) -> u32 {
        self.generation
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "node#{}v{}", self.index, self.generation)
    }
}

/// What a node draws besides its children.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum NodeContent {
    #[default]
    Empty,
    Graphics(Graphics),
    Sprite(Sprite),
    Text(Text),
}

impl From<Graphics> for NodeContent {
    fn from(graphics: Graphics) -> Self {
        Self::Graphics(graphics)
    }
}

impl From<Sprite> for NodeContent {
    fn from(sprite: Sprite) -> Self {
        Self::Sprite(sprite)
    }
}

impl From<Text> for NodeContent {
    fn from(text: Text) -> Self {
        Self::Text(text)
    }
}

/// A display object: transform, visibility and interaction flags, content
/// and an ordered child list.
#[derive(Debug)]
pub struct Node {
    pub name: Option<String>,
    pub transform: Transform,
    pub alpha: f64,
    pub visible: bool,
    pub renderable: bool,
    pub interactive: bool,
    pub interactive_children: bool,
    /// Local-space hit region replacing content hit testing.
    pub hit_area: Option<Shape>,
    pub cursor: Option<String>,
    /// Shorthand for a `pointer` cursor.
    pub button_mode: bool,
    /// `0xRRGGBB` multiplier applied to graphics and sprite content.
    pub tint: u32,
    pub(crate) world_alpha: f64,
    pub(crate) content: NodeContent,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
    pub(crate) mask: Option<NodeId>,
    pub(crate) is_mask: bool,
    pub(crate) bounds: Bounds,
    pub(crate) tracked_pointers: IndexMap<u32, InteractionTrackingData>,
    pub(crate) listeners: EventListeners,
}

impl Node {
    pub(crate) fn new(content: NodeContent) -> Self {
        Self {
            name: None,
            transform: Transform::default(),
            alpha: 1.0,
            visible: true,
            renderable: true,
            interactive: false,
            interactive_children: true,
            hit_area: None,
            cursor: None,
            button_mode: false,
            tint: WHITE_TINT,
            world_alpha: 1.0,
            content,
            parent: None,
            children: Vec::new(),
            mask: None,
            is_mask: false,
            bounds: Bounds::new(),
            tracked_pointers: IndexMap::new(),
            listeners: EventListeners::new(),
        }
    }

    #[must_use]
    pub fn world_alpha(&self) -> f64 {
        self.world_alpha
    }

    #[must_use]
    pub fn content(&self) -> &NodeContent {
        &self.content
    }

    pub fn content_mut(&mut self) -> &mut NodeContent {
        &mut self.content
    }

    #[must_use]
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    #[must_use]
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    #[must_use]
    pub fn mask(&self) -> Option<NodeId> {
        self.mask
    }

    /// True while this node is used as another node's mask.
    #[must_use]
    pub fn is_mask(&self) -> bool {
        self.is_mask
    }

    /// Bounds computed by the last `calculate_bounds` pass.
    #[must_use]
    pub fn bounds(&self) -> &Bounds {
        &self.bounds
    }

    #[must_use]
    pub fn tracked_pointer(&self, pointer_id: u32) -> Option<&InteractionTrackingData> {
        self.tracked_pointers.get(&pointer_id)
    }

    #[must_use]
    pub fn tracked_pointer_count(&self) -> usize {
        self.tracked_pointers.len()
    }

    #[must_use]
    pub fn listeners(&self) -> &EventListeners {
        &self.listeners
    }

    /// Cursor this node requests while hovered.
    #[must_use]
    pub fn effective_cursor(&self) -> Option<&str> {
        match (&self.cursor, self.button_mode) {
            (Some(cursor), _) => Some(cursor.as_str()),
            (None, true) => Some("pointer"),
            (None, false) => None,
        }
    }
}
