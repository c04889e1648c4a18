use indexmap::IndexMap;

use crate::error::StageResult;
use crate::interaction::{MOUSE_POINTER_ID, PointerEventRecord, PointerType};
use crate::math::Point;
use crate::scene::{NodeId, Scene};

/// Last known state of one pointer.
#[derive(Debug, Clone, PartialEq)]
pub struct InteractionData {
    pub identifier: u32,
    /// Position in stage coordinates.
    pub global: Point,
    pub target: Option<NodeId>,
    pub original_event: Option<PointerEventRecord>,
    pub pointer_type: PointerType,
    pub button: i32,
    pub buttons: u32,
    pub pressure: f64,
    pub tilt_x: f64,
    pub tilt_y: f64,
    pub twist: f64,
    pub width: f64,
    pub height: f64,
    pub is_primary: bool,
}

impl InteractionData {
    #[must_use]
    pub fn new(identifier: u32) -> Self {
        Self {
            identifier,
            global: Point::ORIGIN,
            target: None,
            original_event: None,
            pointer_type: PointerType::Mouse,
            button: 0,
            buttons: 0,
            pressure: 0.0,
            tilt_x: 0.0,
            tilt_y: 0.0,
            twist: 0.0,
            width: 0.0,
            height: 0.0,
            is_primary: false,
        }
    }

    pub(crate) fn copy_event(&mut self, record: &PointerEventRecord) {
        self.is_primary = record.is_primary;
        self.width = record.width;
        self.height = record.height;
        self.tilt_x = record.tilt_x;
        self.tilt_y = record.tilt_y;
        self.pointer_type = record.pointer_type;
        self.pressure = record.pressure;
        self.twist = record.twist;
        self.button = record.button;
        self.buttons = record.buttons;
        self.original_event = Some(*record);
    }

    pub(crate) fn reset(&mut self) {
        self.is_primary = false;
        self.target = None;
        self.original_event = None;
    }

    /// `global` mapped into `node`'s local space.
    pub fn local_position(&self, scene: &Scene, node: NodeId) -> StageResult<Point> {
        scene.to_local(node, self.global)
    }
}

/// Per-pointer data records: the mouse record is permanent, every other
/// pointer borrows a record from a reuse pool until it is released.
#[derive(Debug)]
pub struct InteractionDataPool {
    mouse: InteractionData,
    active: IndexMap<u32, InteractionData>,
    free: Vec<InteractionData>,
}

impl Default for InteractionDataPool {
    fn default() -> Self {
        Self {
            mouse: InteractionData::new(MOUSE_POINTER_ID),
            active: IndexMap::new(),
            free: Vec::new(),
        }
    }
}

impl InteractionDataPool {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn mouse(&self) -> &InteractionData {
        &self.mouse
    }

    #[must_use]
    pub fn get(&self, pointer_id: u32) -> Option<&InteractionData> {
        if pointer_id == MOUSE_POINTER_ID {
            return Some(&self.mouse);
        }
        self.active.get(&pointer_id)
    }

    pub fn get_or_create(&mut self, pointer_id: u32) -> &mut InteractionData {
        if pointer_id == MOUSE_POINTER_ID {
            return &mut self.mouse;
        }
        let free = &mut self.free;
        self.active.entry(pointer_id).or_insert_with(|| {
            let mut data = free.pop().unwrap_or_else(|| InteractionData::new(pointer_id));
            data.identifier = pointer_id;
            data
        })
    }

    /// Returns the pointer's record to the pool. The mouse record stays.
    pub fn release(&mut self, pointer_id: u32) {
        if pointer_id == MOUSE_POINTER_ID {
            return;
        }
        if let Some(mut data) = self.active.shift_remove(&pointer_id) {
            data.reset();
            self.free.push(data);
        }
    }

    /// Pointers with a live record, the mouse excluded.
    #[must_use]
    pub fn active_len(&self) -> usize {
        self.active.len()
    }

    #[must_use]
    pub fn pooled_len(&self) -> usize {
        self.free.len()
    }
}
