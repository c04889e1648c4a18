use std::fmt;

use serde::{Deserialize, Serialize};

use crate::interaction::InteractionData;
use crate::scene::NodeId;

/// Event names emitted to nodes and to manager-level listeners.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventKind {
    #[serde(rename = "pointerdown")]
    PointerDown,
    #[serde(rename = "pointermove")]
    PointerMove,
    #[serde(rename = "pointerup")]
    PointerUp,
    #[serde(rename = "pointerover")]
    PointerOver,
    #[serde(rename = "pointerout")]
    PointerOut,
    #[serde(rename = "pointercancel")]
    PointerCancel,
    #[serde(rename = "pointertap")]
    PointerTap,
    #[serde(rename = "pointerupoutside")]
    PointerUpOutside,
    #[serde(rename = "mousedown")]
    MouseDown,
    #[serde(rename = "mousemove")]
    MouseMove,
    #[serde(rename = "mouseup")]
    MouseUp,
    #[serde(rename = "mouseover")]
    MouseOver,
    #[serde(rename = "mouseout")]
    MouseOut,
    #[serde(rename = "mouseupoutside")]
    MouseUpOutside,
    #[serde(rename = "click")]
    Click,
    #[serde(rename = "rightdown")]
    RightDown,
    #[serde(rename = "rightup")]
    RightUp,
    #[serde(rename = "rightclick")]
    RightClick,
    #[serde(rename = "rightupoutside")]
    RightUpOutside,
    #[serde(rename = "touchstart")]
    TouchStart,
    #[serde(rename = "touchmove")]
    TouchMove,
    #[serde(rename = "touchend")]
    TouchEnd,
    #[serde(rename = "touchcancel")]
    TouchCancel,
    #[serde(rename = "touchendoutside")]
    TouchEndOutside,
    #[serde(rename = "tap")]
    Tap,
    #[serde(rename = "wheel")]
    Wheel,
    #[serde(rename = "dblclick")]
    DblClick,
    #[serde(rename = "zoomstart")]
    ZoomStart,
    #[serde(rename = "zoomend")]
    ZoomEnd,
}

impl EventKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::PointerDown => "pointerdown",
            Self::PointerMove => "pointermove",
            Self::PointerUp => "pointerup",
            Self::PointerOver => "pointerover",
            Self::PointerOut => "pointerout",
            Self::PointerCancel => "pointercancel",
            Self::PointerTap => "pointertap",
            Self::PointerUpOutside => "pointerupoutside",
            Self::MouseDown => "mousedown",
            Self::MouseMove => "mousemove",
            Self::MouseUp => "mouseup",
            Self::MouseOver => "mouseover",
            Self::MouseOut => "mouseout",
            Self::MouseUpOutside => "mouseupoutside",
            Self::Click => "click",
            Self::RightDown => "rightdown",
            Self::RightUp => "rightup",
            Self::RightClick => "rightclick",
            Self::RightUpOutside => "rightupoutside",
            Self::TouchStart => "touchstart",
            Self::TouchMove => "touchmove",
            Self::TouchEnd => "touchend",
            Self::TouchCancel => "touchcancel",
            Self::TouchEndOutside => "touchendoutside",
            Self::Tap => "tap",
            Self::Wheel => "wheel",
            Self::DblClick => "dblclick",
            Self::ZoomStart => "zoomstart",
            Self::ZoomEnd => "zoomend",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Value handed to listeners for one dispatch.
///
/// A single event value travels through a whole hit-test pass; calling
/// [`InteractionEvent::stop_propagation`] prevents delivery to any node other
/// than the current one for the rest of that pass.
#[derive(Debug, Clone)]
pub struct InteractionEvent {
    pub kind: EventKind,
    /// First interactive node hit during the pass.
    pub target: Option<NodeId>,
    /// Node whose listener is running, `None` for manager-level listeners.
    pub current_target: Option<NodeId>,
    pub data: InteractionData,
    stopped: bool,
    stops_propagating_at: Option<NodeId>,
    stop_propagation_hint: bool,
}

impl InteractionEvent {
    #[must_use]
    pub fn new(kind: EventKind, data: InteractionData) -> Self {
        Self {
            kind,
            target: None,
            current_target: None,
            data,
            stopped: false,
            stops_propagating_at: None,
            stop_propagation_hint: false,
        }
    }

    pub fn stop_propagation(&mut self) {
        self.stopped = true;
        self.stop_propagation_hint = true;
        self.stops_propagating_at = self.current_target;
    }

    #[must_use]
    pub fn is_propagation_stopped(&self) -> bool {
        self.stopped
    }

    #[must_use]
    pub fn stops_propagating_at(&self) -> Option<NodeId> {
        self.stops_propagating_at
    }

    pub(crate) fn stop_propagation_hint(&self) -> bool {
        self.stop_propagation_hint
    }

    pub(crate) fn set_stop_propagation_hint(&mut self, hint: bool) {
        self.stop_propagation_hint = hint;
    }

    /// Clears per-pass state before the event is reused.
    pub(crate) fn reset(&mut self) {
        self.stopped = false;
        self.stops_propagating_at = None;
        self.stop_propagation_hint = false;
        self.current_target = None;
        self.target = None;
    }
}

pub type EventHandler = Box<dyn FnMut(&mut InteractionEvent)>;

/// Handlers registered per event kind, run in registration order.
#[derive(Default)]
pub struct EventListeners {
    handlers: Vec<(EventKind, EventHandler)>,
}

impl fmt::Debug for EventListeners {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.handlers.iter().map(|(kind, _)| kind))
            .finish()
    }
}

impl EventListeners {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on(&mut self, kind: EventKind, handler: EventHandler) {
        self.handlers.push((kind, handler));
    }

    /// Removes every handler for `kind`, returning how many were dropped.
    pub fn off(&mut self, kind: EventKind) -> usize {
        let before = self.handlers.len();
        self.handlers.retain(|(registered, _)| *registered != kind);
        before - self.handlers.len()
    }

    #[must_use]
    pub fn has(&self, kind: EventKind) -> bool {
        self.handlers.iter().any(|(registered, _)| *registered == kind)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Runs the handlers registered for `event.kind`; returns how many ran.
    pub fn emit(&mut self, event: &mut InteractionEvent) -> usize {
        let mut ran = 0;
        for (kind, handler) in &mut self.handlers {
            if *kind == event.kind {
                handler(event);
                ran += 1;
            }
        }
        ran
    }
}
