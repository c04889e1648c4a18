use thiserror::Error;

pub type StageResult<T> = Result<T, StageError>;

#[derive(Debug, Error)]
pub enum StageError {
    #[error("invalid viewport size: width={width}, height={height}")]
    InvalidViewport { width: u32, height: u32 },

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("range error: {0}")]
    RangeError(String),

    #[error("node {0} does not exist or was destroyed")]
    NodeNotFound(String),

    #[error("node {child} is not a child of {parent}")]
    NotAChild { parent: String, child: String },

    #[error("adding {child} under {parent} would create a cycle")]
    WouldCreateCycle { parent: String, child: String },

    #[error("base texture resource can be set only once")]
    ResourceAlreadyBound,

    #[error(
        "texture frame does not fit inside the base texture: x: {x} + {width} > {base_width} or y: {y} + {height} > {base_height}"
    )]
    FrameOutOfBounds {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        base_width: f64,
        base_height: f64,
    },

    #[error("canvas backend failure: {0}")]
    Backend(String),
}
