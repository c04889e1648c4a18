use std::time::Duration;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use crate::error::{StageError, StageResult};
use crate::interaction::{
    EventHandler, EventKind, EventListeners, GestureDebouncer, HitVisit, InputCapabilities,
    InputPhase, InputSource, InteractionConfig, InteractionData, InteractionDataPool,
    InteractionEvent, InteractionTrackingData, MOUSE_POINTER_ID, NativeInput, PointerEventRecord,
    PointerType, TreeSearch, normalize_to_pointer_data,
};
use crate::math::Point;
use crate::scene::{NodeId, Scene};

/// Client-space rectangle of the element that receives native input.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TargetElement {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl TargetElement {
    #[must_use]
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }
}

/// Per-node step run for every interactive node a pass reaches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PassHandler {
    Down,
    Up,
    Cancel,
    Move,
    OverOut,
    Wheel,
    DoubleClick,
}

impl PassHandler {
    fn follows_capture(self) -> bool {
        matches!(self, Self::Up | Self::Cancel | Self::Move)
    }
}

/// Turns native input into scene events.
///
/// Each input runs a hit-test pass over the scene, delivers node events in
/// front-to-back order, then emits the same event names to manager-level
/// listeners. Over events found during a pass are held back until the pass
/// finishes so out events for the node being left are seen first.
#[derive(Debug)]
pub struct InteractionManager {
    capabilities: InputCapabilities,
    move_when_inside: bool,
    cursor_styles: IndexMap<String, String>,
    listeners: EventListeners,
    pool: InteractionDataPool,
    event: InteractionEvent,
    delayed: Vec<(NodeId, EventKind)>,
    search: TreeSearch,
    target_element: Option<TargetElement>,
    view_width: f64,
    view_height: f64,
    resolution: f64,
    mouse_over_renderer: bool,
    cursor: Option<String>,
    /// The closest hit node already decided the cursor for this move.
    cursor_claimed: bool,
    current_cursor_mode: Option<String>,
    current_cursor_style: Option<String>,
    captures: IndexMap<u32, NodeId>,
    gesture: GestureDebouncer,
}

impl Default for InteractionManager {
    fn default() -> Self {
        Self::from_valid_config(InteractionConfig::default())
    }
}

impl InteractionManager {
    pub fn new(config: InteractionConfig) -> StageResult<Self> {
        config.validate()?;
        Ok(Self::from_valid_config(config))
    }

    fn from_valid_config(config: InteractionConfig) -> Self {
        Self {
            capabilities: config.capabilities,
            move_when_inside: config.move_when_inside,
            cursor_styles: config.cursor_styles,
            listeners: EventListeners::new(),
            pool: InteractionDataPool::new(),
            event: InteractionEvent::new(EventKind::PointerMove, InteractionData::new(MOUSE_POINTER_ID)),
            delayed: Vec::new(),
            search: TreeSearch::new(),
            target_element: None,
            view_width: 0.0,
            view_height: 0.0,
            resolution: 1.0,
            mouse_over_renderer: true,
            cursor: None,
            cursor_claimed: false,
            current_cursor_mode: None,
            current_cursor_style: None,
            captures: IndexMap::new(),
            gesture: GestureDebouncer::new(Duration::from_millis(config.wheel_gesture_end_ms)),
        }
    }

    /// Registers a manager-level listener.
    pub fn on(&mut self, kind: EventKind, handler: EventHandler) {
        self.listeners.on(kind, handler);
    }

    pub fn off(&mut self, kind: EventKind) -> usize {
        self.listeners.off(kind)
    }

    #[must_use]
    pub fn capabilities(&self) -> InputCapabilities {
        self.capabilities
    }

    #[must_use]
    pub fn move_when_inside(&self) -> bool {
        self.move_when_inside
    }

    pub fn set_move_when_inside(&mut self, move_when_inside: bool) {
        self.move_when_inside = move_when_inside;
    }

    #[must_use]
    pub fn cursor_styles(&self) -> &IndexMap<String, String> {
        &self.cursor_styles
    }

    pub fn cursor_styles_mut(&mut self) -> &mut IndexMap<String, String> {
        &mut self.cursor_styles
    }

    /// Cursor mode resolved by the last mouse move or out.
    #[must_use]
    pub fn current_cursor_mode(&self) -> Option<&str> {
        self.current_cursor_mode.as_deref()
    }

    /// CSS cursor value for [`Self::current_cursor_mode`].
    #[must_use]
    pub fn current_cursor_style(&self) -> Option<&str> {
        self.current_cursor_style.as_deref()
    }

    #[must_use]
    pub fn mouse_over_renderer(&self) -> bool {
        self.mouse_over_renderer
    }

    #[must_use]
    pub fn data_pool(&self) -> &InteractionDataPool {
        &self.pool
    }

    #[must_use]
    pub fn gesture(&self) -> &GestureDebouncer {
        &self.gesture
    }

    /// `None` maps client coordinates to the stage unchanged.
    pub fn set_target_element(&mut self, element: Option<TargetElement>) {
        self.target_element = element;
    }

    #[must_use]
    pub fn target_element(&self) -> Option<TargetElement> {
        self.target_element
    }

    /// View size in device pixels and the renderer resolution.
    pub fn set_view(&mut self, view_width: u32, view_height: u32, resolution: f64) {
        self.view_width = f64::from(view_width);
        self.view_height = f64::from(view_height);
        self.resolution = if resolution > 0.0 { resolution } else { 1.0 };
    }

    /// Maps client coordinates into stage coordinates.
    #[must_use]
    pub fn map_position_to_point(&self, client_x: f64, client_y: f64) -> Point {
        let Some(rect) = self.target_element else {
            return Point::new(client_x, client_y);
        };
        let scale = |view: f64, extent: f64| {
            if view > 0.0 && extent > 0.0 {
                view / extent
            } else {
                1.0
            }
        };
        let scale_x = scale(self.view_width, rect.width);
        let scale_y = scale(self.view_height, rect.height);
        Point::new(
            (client_x - rect.left) * scale_x / self.resolution,
            (client_y - rect.top) * scale_y / self.resolution,
        )
    }

    /// Binds `pointer_id` to `node` until the pointer is released.
    pub fn set_pointer_capture(
        &mut self,
        scene: &Scene,
        pointer_id: u32,
        node: NodeId,
    ) -> StageResult<()> {
        scene.node(node)?;
        self.captures.insert(pointer_id, node);
        debug!(pointer_id, %node, "pointer captured");
        Ok(())
    }

    pub fn release_pointer_capture(&mut self, pointer_id: u32) -> Option<NodeId> {
        let released = self.captures.shift_remove(&pointer_id);
        if let Some(node) = released {
            debug!(pointer_id, %node, "pointer capture released");
        }
        released
    }

    #[must_use]
    pub fn pointer_capture(&self, pointer_id: u32) -> Option<NodeId> {
        self.captures.get(&pointer_id).copied()
    }

    /// Topmost interactive node under the stage point `point`, without
    /// dispatching anything.
    pub fn hit_test(&mut self, scene: &Scene, point: Point, root: NodeId) -> Option<NodeId> {
        self.search.find_hit(scene, point, root, true);
        self.search.take_visits();
        self.search.target()
    }

    /// Processes one native input against the tree under `root`.
    ///
    /// World transforms must be current; `now` is host time used to end
    /// wheel gestures.
    pub fn handle_input(
        &mut self,
        scene: &mut Scene,
        root: NodeId,
        input: &NativeInput,
        now: Duration,
    ) -> StageResult<()> {
        if !scene.is_alive(root) {
            return Err(StageError::NodeNotFound(root.to_string()));
        }
        let records = normalize_to_pointer_data(input, self.capabilities);
        let Some(first) = records.first().copied() else {
            trace!("input ignored for this capability set");
            return Ok(());
        };

        match first.source {
            InputSource::Wheel => {
                for record in &records {
                    self.on_wheel(scene, root, record, now);
                }
            }
            InputSource::DoubleClick => {
                for record in &records {
                    self.on_double_click(scene, root, record);
                }
            }
            InputSource::Pointer | InputSource::Mouse | InputSource::Touch => match first.phase {
                InputPhase::Down => self.on_pointer_down(scene, root, &records),
                InputPhase::Move => self.on_pointer_move(scene, root, &records),
                InputPhase::Up => self.on_pointer_complete(scene, root, &records, false),
                InputPhase::Cancel => self.on_pointer_complete(scene, root, &records, true),
                InputPhase::Over => self.on_pointer_over(&first),
                InputPhase::Out => self.on_pointer_out(scene, root, &first),
            },
        }
        Ok(())
    }

    /// Advances host time; emits `zoomend` when a wheel gesture has gone
    /// quiet. Returns whether it did.
    pub fn tick(&mut self, now: Duration) -> bool {
        if !self.gesture.poll(now) {
            return false;
        }
        self.event.data = self.pool.mouse().clone();
        self.event.reset();
        self.emit(EventKind::ZoomEnd);
        true
    }

    fn on_pointer_down(&mut self, scene: &mut Scene, root: NodeId, records: &[PointerEventRecord]) {
        for record in records {
            self.configure_event(record);
            self.process_interactive(scene, root, PassHandler::Down, true);

            self.emit(EventKind::PointerDown);
            match record.pointer_type {
                PointerType::Touch => self.emit(EventKind::TouchStart),
                PointerType::Mouse | PointerType::Pen => {
                    if record.button == 2 {
                        self.emit(EventKind::RightDown);
                    } else {
                        self.emit(EventKind::MouseDown);
                    }
                }
            }
            self.store_target(record);
        }
    }

    fn on_pointer_complete(
        &mut self,
        scene: &mut Scene,
        root: NodeId,
        records: &[PointerEventRecord],
        cancelled: bool,
    ) {
        for record in records {
            let outside = record.outside;
            self.configure_event(record);
            let handler = if cancelled {
                PassHandler::Cancel
            } else {
                PassHandler::Up
            };
            self.process_interactive(scene, root, handler, cancelled || !outside);

            self.emit(match (cancelled, outside) {
                (true, _) => EventKind::PointerCancel,
                (false, true) => EventKind::PointerUpOutside,
                (false, false) => EventKind::PointerUp,
            });
            match record.pointer_type {
                PointerType::Mouse | PointerType::Pen => {
                    self.emit(match (record.button == 2, outside) {
                        (true, true) => EventKind::RightUpOutside,
                        (true, false) => EventKind::RightUp,
                        (false, true) => EventKind::MouseUpOutside,
                        (false, false) => EventKind::MouseUp,
                    });
                }
                PointerType::Touch => {
                    self.emit(match (cancelled, outside) {
                        (true, _) => EventKind::TouchCancel,
                        (false, true) => EventKind::TouchEndOutside,
                        (false, false) => EventKind::TouchEnd,
                    });
                }
            }

            let id = data_id(record);
            self.store_target(record);
            self.release_pointer_capture(id);
            self.pool.release(id);
        }
    }

    fn on_pointer_move(&mut self, scene: &mut Scene, root: NodeId, records: &[PointerEventRecord]) {
        let Some(first_type) = records.first().map(|record| record.pointer_type) else {
            return;
        };
        if first_type.is_mouse_like() {
            self.cursor = None;
            self.cursor_claimed = false;
        }

        for record in records {
            self.configure_event(record);
            self.process_interactive(scene, root, PassHandler::Move, true);

            self.emit(EventKind::PointerMove);
            match record.pointer_type {
                PointerType::Touch => self.emit(EventKind::TouchMove),
                PointerType::Mouse | PointerType::Pen => self.emit(EventKind::MouseMove),
            }
            self.store_target(record);
        }

        if first_type == PointerType::Mouse {
            let mode = self.cursor.clone();
            self.set_cursor_mode(mode);
        }
    }

    fn on_pointer_over(&mut self, record: &PointerEventRecord) {
        self.configure_event(record);
        if record.pointer_type == PointerType::Mouse {
            self.mouse_over_renderer = true;
        }
        self.emit(EventKind::PointerOver);
        if record.pointer_type.is_mouse_like() {
            self.emit(EventKind::MouseOver);
        }
    }

    fn on_pointer_out(&mut self, scene: &mut Scene, root: NodeId, record: &PointerEventRecord) {
        if record.pointer_type == PointerType::Mouse {
            self.mouse_over_renderer = false;
            self.set_cursor_mode(None);
        }
        self.configure_event(record);
        self.process_interactive(scene, root, PassHandler::OverOut, false);

        self.emit(EventKind::PointerOut);
        if record.pointer_type.is_mouse_like() {
            self.emit(EventKind::MouseOut);
        } else {
            self.pool.release(data_id(record));
        }
    }

    fn on_wheel(
        &mut self,
        scene: &mut Scene,
        root: NodeId,
        record: &PointerEventRecord,
        now: Duration,
    ) {
        self.tick(now);
        self.configure_event(record);
        if self.gesture.bump(now) {
            self.emit(EventKind::ZoomStart);
        }
        self.process_interactive(scene, root, PassHandler::Wheel, true);
        self.emit(EventKind::Wheel);
        self.store_target(record);
    }

    fn on_double_click(&mut self, scene: &mut Scene, root: NodeId, record: &PointerEventRecord) {
        self.configure_event(record);
        self.process_interactive(scene, root, PassHandler::DoubleClick, true);
        self.emit(EventKind::DblClick);
        self.store_target(record);
    }

    /// Loads the pointer's data into the shared event and clears per-pass
    /// event state.
    fn configure_event(&mut self, record: &PointerEventRecord) {
        let global = self.map_position_to_point(record.client.x, record.client.y);
        let data = self.pool.get_or_create(data_id(record));
        data.copy_event(record);
        data.global = global;
        self.event.data = data.clone();
        self.event.reset();
    }

    fn store_target(&mut self, record: &PointerEventRecord) {
        self.pool.get_or_create(data_id(record)).target = self.event.target;
    }

    fn process_interactive(
        &mut self,
        scene: &mut Scene,
        root: NodeId,
        handler: PassHandler,
        hit_test: bool,
    ) -> bool {
        let pointer_id = self.event.data.identifier;
        let (visits, hit, target) = match self.captured_node(scene, pointer_id, handler) {
            Some(node) => (
                vec![HitVisit {
                    node,
                    hit: true,
                    target: Some(node),
                }],
                true,
                Some(node),
            ),
            None => {
                let point = self.event.data.global;
                let hit = self.search.find_hit(scene, point, root, hit_test);
                (self.search.take_visits(), hit, self.search.target())
            }
        };

        for visit in &visits {
            self.event.target = visit.target;
            self.run_handler(scene, handler, visit.node, visit.hit);
        }
        self.event.target = target;

        if !self.delayed.is_empty() {
            self.event.set_stop_propagation_hint(false);
            for (node, kind) in std::mem::take(&mut self.delayed) {
                if self.event.stops_propagating_at() == Some(node) {
                    self.event.set_stop_propagation_hint(true);
                }
                self.dispatch_event(scene, node, kind);
            }
        }
        hit
    }

    fn captured_node(
        &mut self,
        scene: &Scene,
        pointer_id: u32,
        handler: PassHandler,
    ) -> Option<NodeId> {
        if !handler.follows_capture() {
            return None;
        }
        let node = *self.captures.get(&pointer_id)?;
        if scene.is_alive(node) {
            return Some(node);
        }
        warn!(pointer_id, %node, "captured node was destroyed; releasing capture");
        self.captures.shift_remove(&pointer_id);
        None
    }

    fn run_handler(&mut self, scene: &mut Scene, handler: PassHandler, node: NodeId, hit: bool) {
        match handler {
            PassHandler::Down => self.process_pointer_down(scene, node, hit),
            PassHandler::Up => self.process_pointer_up(scene, node, hit),
            PassHandler::Cancel => self.process_pointer_cancel(scene, node),
            PassHandler::Move => self.process_pointer_move(scene, node, hit),
            PassHandler::OverOut => self.process_pointer_over_out(scene, node, hit),
            PassHandler::Wheel => {
                if hit {
                    self.dispatch_event(scene, node, EventKind::Wheel);
                }
            }
            PassHandler::DoubleClick => {
                if hit {
                    self.dispatch_event(scene, node, EventKind::DblClick);
                }
            }
        }
    }

    fn process_pointer_down(&mut self, scene: &mut Scene, node: NodeId, hit: bool) {
        if !hit {
            return;
        }
        let id = self.event.data.identifier;
        let pointer_type = self.event.data.pointer_type;
        if let Some(target) = scene.slot_mut(node) {
            target
                .tracked_pointers
                .entry(id)
                .or_insert_with(|| InteractionTrackingData::new(id));
        }

        self.dispatch_event(scene, node, EventKind::PointerDown);
        match pointer_type {
            PointerType::Touch => self.dispatch_event(scene, node, EventKind::TouchStart),
            PointerType::Mouse | PointerType::Pen => {
                let right = self.event.data.button == 2;
                update_tracking(scene, node, id, |tracking| {
                    if right {
                        tracking.set_right_down(true);
                    } else {
                        tracking.set_left_down(true);
                    }
                });
                let kind = if right {
                    EventKind::RightDown
                } else {
                    EventKind::MouseDown
                };
                self.dispatch_event(scene, node, kind);
            }
        }
    }

    fn process_pointer_up(&mut self, scene: &mut Scene, node: NodeId, hit: bool) {
        let id = self.event.data.identifier;
        let pointer_type = self.event.data.pointer_type;
        let is_touch = pointer_type == PointerType::Touch;
        let is_mouse = pointer_type.is_mouse_like();
        let tracked = scene
            .slot(node)
            .and_then(|target| target.tracked_pointer(id))
            .copied();

        let mut is_mouse_tap = false;
        if is_mouse {
            let right = self.event.data.button == 2;
            let is_down = tracked.is_some_and(|tracking| {
                if right {
                    tracking.right_down()
                } else {
                    tracking.left_down()
                }
            });

            if hit {
                let up = if right {
                    EventKind::RightUp
                } else {
                    EventKind::MouseUp
                };
                self.dispatch_event(scene, node, up);
                if is_down {
                    let click = if right {
                        EventKind::RightClick
                    } else {
                        EventKind::Click
                    };
                    self.dispatch_event(scene, node, click);
                    is_mouse_tap = true;
                }
            } else if is_down {
                let outside = if right {
                    EventKind::RightUpOutside
                } else {
                    EventKind::MouseUpOutside
                };
                self.dispatch_event(scene, node, outside);
            }

            update_tracking(scene, node, id, |tracking| {
                if right {
                    tracking.set_right_down(false);
                } else {
                    tracking.set_left_down(false);
                }
            });
        }

        if hit {
            self.dispatch_event(scene, node, EventKind::PointerUp);
            if is_touch {
                self.dispatch_event(scene, node, EventKind::TouchEnd);
            }
            if tracked.is_some() {
                if !is_mouse || is_mouse_tap {
                    self.dispatch_event(scene, node, EventKind::PointerTap);
                }
                if is_touch {
                    self.dispatch_event(scene, node, EventKind::Tap);
                    update_tracking(scene, node, id, |tracking| tracking.set_over(false));
                }
            }
        } else if tracked.is_some() {
            self.dispatch_event(scene, node, EventKind::PointerUpOutside);
            if is_touch {
                self.dispatch_event(scene, node, EventKind::TouchEndOutside);
            }
        }

        drop_idle_tracking(scene, node, id);
    }

    fn process_pointer_cancel(&mut self, scene: &mut Scene, node: NodeId) {
        let id = self.event.data.identifier;
        let removed = scene
            .slot_mut(node)
            .and_then(|target| target.tracked_pointers.shift_remove(&id));
        if removed.is_some() {
            self.dispatch_event(scene, node, EventKind::PointerCancel);
            if self.event.data.pointer_type == PointerType::Touch {
                self.dispatch_event(scene, node, EventKind::TouchCancel);
            }
        }
    }

    fn process_pointer_move(&mut self, scene: &mut Scene, node: NodeId, hit: bool) {
        let pointer_type = self.event.data.pointer_type;
        if pointer_type.is_mouse_like() {
            self.process_pointer_over_out(scene, node, hit);
        }

        if !self.move_when_inside || hit {
            self.dispatch_event(scene, node, EventKind::PointerMove);
            match pointer_type {
                PointerType::Touch => self.dispatch_event(scene, node, EventKind::TouchMove),
                PointerType::Mouse | PointerType::Pen => {
                    self.dispatch_event(scene, node, EventKind::MouseMove);
                }
            }
        }
    }

    fn process_pointer_over_out(&mut self, scene: &mut Scene, node: NodeId, hit: bool) {
        let id = self.event.data.identifier;
        let is_mouse = self.event.data.pointer_type.is_mouse_like();
        let Some(target) = scene.slot_mut(node) else {
            return;
        };
        if hit {
            target
                .tracked_pointers
                .entry(id)
                .or_insert_with(|| InteractionTrackingData::new(id));
        }
        let Some(tracking) = target.tracked_pointers.get_mut(&id) else {
            return;
        };

        if hit && self.mouse_over_renderer {
            if !tracking.over() {
                tracking.set_over(true);
                self.delay_dispatch_event(node, EventKind::PointerOver);
                if is_mouse {
                    self.delay_dispatch_event(node, EventKind::MouseOver);
                }
            }
            if is_mouse && !self.cursor_claimed {
                self.cursor_claimed = true;
                self.cursor = target.effective_cursor().map(str::to_owned);
            }
        } else if tracking.over() {
            tracking.set_over(false);
            self.dispatch_event(scene, node, EventKind::PointerOut);
            if is_mouse {
                self.dispatch_event(scene, node, EventKind::MouseOut);
            }
            drop_idle_tracking(scene, node, id);
        }
    }

    fn dispatch_event(&mut self, scene: &mut Scene, node: NodeId, kind: EventKind) {
        if self.event.stop_propagation_hint() && self.event.stops_propagating_at() != Some(node) {
            return;
        }
        let Some(target) = scene.slot_mut(node) else {
            warn!(%node, event = %kind, "dispatch to a destroyed node skipped");
            return;
        };
        self.event.current_target = Some(node);
        self.event.kind = kind;
        let ran = target.listeners.emit(&mut self.event);
        trace!(%node, event = %kind, listeners = ran, "node event dispatched");
    }

    fn delay_dispatch_event(&mut self, node: NodeId, kind: EventKind) {
        self.delayed.push((node, kind));
    }

    fn emit(&mut self, kind: EventKind) {
        self.event.kind = kind;
        self.event.current_target = None;
        let ran = self.listeners.emit(&mut self.event);
        trace!(event = %kind, listeners = ran, "manager event emitted");
    }

    /// Maps a cursor mode through `cursor_styles`; unknown modes are used
    /// as the CSS value directly.
    fn set_cursor_mode(&mut self, mode: Option<String>) {
        let mode = mode.unwrap_or_else(|| "default".to_owned());
        if self.current_cursor_mode.as_deref() == Some(mode.as_str()) {
            return;
        }
        let style = self
            .cursor_styles
            .get(&mode)
            .cloned()
            .unwrap_or_else(|| mode.clone());
        trace!(mode = %mode, style = %style, "cursor changed");
        self.current_cursor_style = Some(style);
        self.current_cursor_mode = Some(mode);
    }
}

/// Mouse input always uses the shared mouse record.
fn data_id(record: &PointerEventRecord) -> u32 {
    if record.pointer_type == PointerType::Mouse {
        MOUSE_POINTER_ID
    } else {
        record.pointer_id
    }
}

fn update_tracking(
    scene: &mut Scene,
    node: NodeId,
    pointer_id: u32,
    update: impl FnOnce(&mut InteractionTrackingData),
) {
    if let Some(tracking) = scene
        .slot_mut(node)
        .and_then(|target| target.tracked_pointers.get_mut(&pointer_id))
    {
        update(tracking);
    }
}

fn drop_idle_tracking(scene: &mut Scene, node: NodeId, pointer_id: u32) {
    if let Some(target) = scene.slot_mut(node) {
        if target
            .tracked_pointers
            .get(&pointer_id)
            .is_some_and(InteractionTrackingData::none)
        {
            target.tracked_pointers.shift_remove(&pointer_id);
        }
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::{InteractionManager, TargetElement};

    #[test]
    fn client_points_scale_into_the_view() {
        let mut manager = InteractionManager::default();
        let identity = manager.map_position_to_point(30.0, 40.0);
        assert_relative_eq!(identity.x, 30.0);
        assert_relative_eq!(identity.y, 40.0);

        manager.set_target_element(Some(TargetElement::new(10.0, 20.0, 100.0, 50.0)));
        manager.set_view(200, 100, 2.0);
        let mapped = manager.map_position_to_point(60.0, 45.0);
        assert_relative_eq!(mapped.x, 50.0);
        assert_relative_eq!(mapped.y, 25.0);
    }

    #[test]
    fn unknown_cursor_modes_pass_through() {
        let mut manager = InteractionManager::default();
        manager.set_cursor_mode(Some("crosshair".to_owned()));
        assert_eq!(manager.current_cursor_style(), Some("crosshair"));
        manager.set_cursor_mode(None);
        assert_eq!(manager.current_cursor_mode(), Some("default"));
        assert_eq!(manager.current_cursor_style(), Some("inherit"));
    }
}
