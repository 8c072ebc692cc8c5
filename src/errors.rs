//! Errors for the layers around the renderer.  The renderer itself
//! cannot fail; parsing arguments and writing images can.

/// Failures specific to this crate.  Anything coming up from the
/// standard library or the image codecs is carried as a
/// `failure::Error` with context attached instead.
#[derive(Debug, Fail, PartialEq)]
pub enum TileError {
    /// A command-line or query value could not be understood.
    #[fail(display = "could not parse {} from {:?}", name, value)]
    InvalidArgument {
        /// Which value was being parsed.
        name: String,
        /// What we were given.
        value: String,
    },

    /// PNG has no representation for an image without pixels.
    #[fail(display = "refusing to encode an empty {}x{} image", width, height)]
    EmptyImage {
        /// Width of the rejected image.
        width: u32,
        /// Height of the rejected image.
        height: u32,
    },
}

impl TileError {
    /// Shorthand for `InvalidArgument`.
    pub fn invalid(name: &str, value: &str) -> TileError {
        TileError::InvalidArgument {
            name: name.to_string(),
            value: value.to_string(),
        }
    }
}

/// The result type used throughout the outer layers.
pub type Result<T> = ::std::result::Result<T, failure::Error>;
