//! Native input records and their normalization into pointer records.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::math::Point;

/// Pointer id reserved for the mouse.
pub const MOUSE_POINTER_ID: u32 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PointerType {
    Mouse,
    Touch,
    Pen,
}

impl PointerType {
    /// Mouse and pen share the mouse event family.
    #[must_use]
    pub fn is_mouse_like(self) -> bool {
        matches!(self, Self::Mouse | Self::Pen)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputPhase {
    Down,
    Move,
    Up,
    Cancel,
    /// The pointer entered the view.
    Over,
    /// The pointer left the view.
    Out,
}

/// Which input modalities the host delivers.
///
/// When pointer events are delivered, legacy mouse events are duplicates and
/// are ignored; when touch events are delivered, touch-typed pointer events
/// are ignored for the same reason.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputCapabilities {
    #[serde(default = "default_true")]
    pub pointer_events: bool,
    #[serde(default)]
    pub touch_events: bool,
}

impl Default for InputCapabilities {
    fn default() -> Self {
        Self {
            pointer_events: true,
            touch_events: false,
        }
    }
}

impl InputCapabilities {
    #[must_use]
    pub fn mouse_only() -> Self {
        Self {
            pointer_events: false,
            touch_events: false,
        }
    }
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq)]
pub struct PointerInput {
    pub phase: InputPhase,
    pub pointer_id: u32,
    pub pointer_type: PointerType,
    pub client_x: f64,
    pub client_y: f64,
    pub button: i32,
    pub buttons: u32,
    pub pressure: Option<f64>,
    pub tilt_x: f64,
    pub tilt_y: f64,
    pub twist: f64,
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub is_primary: bool,
    /// The native event was dispatched to something other than the view.
    pub outside: bool,
}

impl PointerInput {
    #[must_use]
    pub fn new(
        phase: InputPhase,
        pointer_id: u32,
        pointer_type: PointerType,
        client_x: f64,
        client_y: f64,
    ) -> Self {
        Self {
            phase,
            pointer_id,
            pointer_type,
            client_x,
            client_y,
            button: 0,
            buttons: 0,
            pressure: None,
            tilt_x: 0.0,
            tilt_y: 0.0,
            twist: 0.0,
            width: None,
            height: None,
            is_primary: true,
            outside: false,
        }
    }

    #[must_use]
    pub fn mouse(phase: InputPhase, client_x: f64, client_y: f64) -> Self {
        Self::new(phase, MOUSE_POINTER_ID, PointerType::Mouse, client_x, client_y)
    }

    #[must_use]
    pub fn with_button(mut self, button: i32) -> Self {
        self.button = button;
        self
    }

    #[must_use]
    pub fn with_outside(mut self, outside: bool) -> Self {
        self.outside = outside;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MouseInput {
    pub phase: InputPhase,
    pub client_x: f64,
    pub client_y: f64,
    pub button: i32,
    pub buttons: u32,
    pub outside: bool,
}

impl MouseInput {
    #[must_use]
    pub fn new(phase: InputPhase, client_x: f64, client_y: f64) -> Self {
        Self {
            phase,
            client_x,
            client_y,
            button: 0,
            buttons: 0,
            outside: false,
        }
    }

    #[must_use]
    pub fn with_button(mut self, button: i32) -> Self {
        self.button = button;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Touch {
    pub identifier: u32,
    pub client_x: f64,
    pub client_y: f64,
    pub radius_x: Option<f64>,
    pub radius_y: Option<f64>,
    pub force: Option<f64>,
}

impl Touch {
    #[must_use]
    pub fn new(identifier: u32, client_x: f64, client_y: f64) -> Self {
        Self {
            identifier,
            client_x,
            client_y,
            radius_x: None,
            radius_y: None,
            force: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TouchInput {
    pub phase: InputPhase,
    pub changed_touches: Vec<Touch>,
    /// Touches currently on the surface, including the changed ones.
    pub active_touches: usize,
    pub outside: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WheelDelta {
    pub delta_x: f64,
    pub delta_y: f64,
    /// 0 = pixels, 1 = lines, 2 = pages.
    pub delta_mode: u32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WheelInput {
    pub client_x: f64,
    pub client_y: f64,
    pub delta: WheelDelta,
}

impl WheelInput {
    #[must_use]
    pub fn new(client_x: f64, client_y: f64, delta_x: f64, delta_y: f64) -> Self {
        Self {
            client_x,
            client_y,
            delta: WheelDelta {
                delta_x,
                delta_y,
                delta_mode: 0,
            },
        }
    }
}

/// Raw input as delivered by the host.
#[derive(Debug, Clone, PartialEq)]
pub enum NativeInput {
    Pointer(PointerInput),
    Mouse(MouseInput),
    Touch(TouchInput),
    Wheel(WheelInput),
    DoubleClick(MouseInput),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputSource {
    Pointer,
    Mouse,
    Touch,
    Wheel,
    DoubleClick,
}

/// One pointer's view of a native input, with every optional field
/// defaulted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointerEventRecord {
    pub source: InputSource,
    pub phase: InputPhase,
    pub pointer_id: u32,
    pub pointer_type: PointerType,
    pub client: Point,
    pub button: i32,
    pub buttons: u32,
    pub pressure: f64,
    pub tilt_x: f64,
    pub tilt_y: f64,
    pub twist: f64,
    pub width: f64,
    pub height: f64,
    pub is_primary: bool,
    pub outside: bool,
    pub wheel: Option<WheelDelta>,
}

impl PointerEventRecord {
    fn mouse(source: InputSource, input: &MouseInput) -> Self {
        Self {
            source,
            phase: input.phase,
            pointer_id: MOUSE_POINTER_ID,
            pointer_type: PointerType::Mouse,
            client: Point::new(input.client_x, input.client_y),
            button: input.button,
            buttons: input.buttons,
            pressure: 0.5,
            tilt_x: 0.0,
            tilt_y: 0.0,
            twist: 0.0,
            width: 1.0,
            height: 1.0,
            is_primary: true,
            outside: input.outside,
            wheel: None,
        }
    }
}

pub type PointerRecords = SmallVec<[PointerEventRecord; 4]>;

/// Converts `input` into pointer records, or nothing when `capabilities`
/// says the modality is a duplicate the host also delivers another way.
#[must_use]
pub fn normalize_to_pointer_data(
    input: &NativeInput,
    capabilities: InputCapabilities,
) -> PointerRecords {
    let mut records = PointerRecords::new();

    match input {
        NativeInput::Pointer(pointer) => {
            if capabilities.touch_events && pointer.pointer_type == PointerType::Touch {
                return records;
            }
            records.push(PointerEventRecord {
                source: InputSource::Pointer,
                phase: pointer.phase,
                pointer_id: pointer.pointer_id,
                pointer_type: pointer.pointer_type,
                client: Point::new(pointer.client_x, pointer.client_y),
                button: pointer.button,
                buttons: pointer.buttons,
                pressure: pointer.pressure.unwrap_or(0.5),
                tilt_x: pointer.tilt_x,
                tilt_y: pointer.tilt_y,
                twist: pointer.twist,
                width: pointer.width.unwrap_or(1.0),
                height: pointer.height.unwrap_or(1.0),
                is_primary: pointer.is_primary,
                outside: pointer.outside,
                wheel: None,
            });
        }
        NativeInput::Mouse(mouse) => {
            if capabilities.pointer_events {
                return records;
            }
            records.push(PointerEventRecord::mouse(InputSource::Mouse, mouse));
        }
        NativeInput::Touch(touch) => {
            if !capabilities.touch_events {
                return records;
            }
            let is_primary = touch.active_touches == 1 && touch.phase == InputPhase::Down;
            records.extend(touch.changed_touches.iter().map(|changed| PointerEventRecord {
                source: InputSource::Touch,
                phase: touch.phase,
                pointer_id: changed.identifier,
                pointer_type: PointerType::Touch,
                client: Point::new(changed.client_x, changed.client_y),
                button: 0,
                buttons: 1,
                pressure: changed.force.unwrap_or(0.5),
                tilt_x: 0.0,
                tilt_y: 0.0,
                twist: 0.0,
                width: changed.radius_x.unwrap_or(1.0),
                height: changed.radius_y.unwrap_or(1.0),
                is_primary,
                outside: touch.outside,
                wheel: None,
            }));
        }
        NativeInput::Wheel(wheel) => {
            let mouse = MouseInput::new(InputPhase::Move, wheel.client_x, wheel.client_y);
            let mut record = PointerEventRecord::mouse(InputSource::Wheel, &mouse);
            record.wheel = Some(wheel.delta);
            records.push(record);
        }
        NativeInput::DoubleClick(mouse) => {
            records.push(PointerEventRecord::mouse(InputSource::DoubleClick, mouse));
        }
    }

    records
}

#[cfg(test)]
mod tests {
    use super::{
        InputCapabilities, InputPhase, MouseInput, NativeInput, PointerInput, PointerType, Touch,
        TouchInput, normalize_to_pointer_data,
    };

    #[test]
    fn one_record_per_changed_touch() {
        let input = NativeInput::Touch(TouchInput {
            phase: InputPhase::Down,
            changed_touches: vec![Touch::new(7, 1.0, 2.0), Touch::new(8, 3.0, 4.0)],
            active_touches: 2,
            outside: false,
        });
        let caps = InputCapabilities {
            pointer_events: true,
            touch_events: true,
        };
        let records = normalize_to_pointer_data(&input, caps);
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].pointer_id, 8);
        assert_eq!(records[0].pressure, 0.5);
        assert!(!records[0].is_primary);
    }

    #[test]
    fn duplicate_modalities_are_dropped() {
        let mouse = NativeInput::Mouse(MouseInput::new(InputPhase::Move, 0.0, 0.0));
        assert!(normalize_to_pointer_data(&mouse, InputCapabilities::default()).is_empty());
        assert_eq!(
            normalize_to_pointer_data(&mouse, InputCapabilities::mouse_only()).len(),
            1
        );

        let touch_pointer = NativeInput::Pointer(PointerInput::new(
            InputPhase::Down,
            3,
            PointerType::Touch,
            0.0,
            0.0,
        ));
        let caps = InputCapabilities {
            pointer_events: true,
            touch_events: true,
        };
        assert!(normalize_to_pointer_data(&touch_pointer, caps).is_empty());
    }
}
