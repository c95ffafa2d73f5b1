use crate::light::LightId;

/// Errors reported by the lighting engine.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EngineError {
    /// Working resolution is zero or exceeds `MAX_DIMENSION` on an axis.
    #[error("Invalid working resolution {width}x{height}")]
    InvalidResolution { width: u32, height: u32 },

    /// Diffuse and normal images passed to one capture differ in size.
    #[error("Diffuse image is {diffuse_width}x{diffuse_height} but normal image is {normal_width}x{normal_height}")]
    ImageSizeMismatch {
        diffuse_width: u32,
        diffuse_height: u32,
        normal_width: u32,
        normal_height: u32,
    },

    /// Image pixel data does not match its declared dimensions.
    #[error("Image data holds {actual} texels, expected {expected}")]
    ImageDataLength { expected: usize, actual: usize },

    /// Image has a zero dimension.
    #[error("Image has no texels")]
    EmptyImage,

    /// `render` was called before both the colormap and the normalmap were
    /// captured for the current frame.
    #[error("Colormap and normalmap must both be captured before rendering")]
    SurfacesNotCaptured,

    /// The composite buffer has not been produced since the last resize.
    #[error("Composite buffer has not been rendered")]
    CompositeNotRendered,

    /// A light handle that is not (or no longer) in the registry.
    #[error("Unknown light {0:?}")]
    UnknownLight(LightId),

    /// The operation only applies to spot lights.
    #[error("Light {0:?} is not a spot light")]
    NotASpotLight(LightId),
}
