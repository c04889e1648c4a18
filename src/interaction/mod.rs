//! Pointer interaction: input normalization, hit testing and event dispatch.

mod config;
mod data;
mod event;
mod gesture;
mod manager;
mod normalize;
mod tracking;
mod tree_search;

pub use config::InteractionConfig;
pub use data::{InteractionData, InteractionDataPool};
pub use event::{EventHandler, EventKind, EventListeners, InteractionEvent};
pub use gesture::{DEFAULT_WHEEL_GESTURE_END, GestureDebouncer};
pub use manager::{InteractionManager, TargetElement};
pub use normalize::{
    InputCapabilities, InputPhase, InputSource, MOUSE_POINTER_ID, MouseInput, NativeInput,
    PointerEventRecord, PointerInput, PointerRecords, PointerType, Touch, TouchInput, WheelDelta,
    WheelInput, normalize_to_pointer_data,
};
pub use tracking::InteractionTrackingData;
pub use tree_search::{HitVisit, TreeSearch};
