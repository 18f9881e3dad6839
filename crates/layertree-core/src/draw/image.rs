//! Decoded raster images placed in a layer.

use std::str::FromStr;

use thiserror::Error;

use crate::geometry::Point;

/// Raster formats a layer tree can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageFormat {
    Png,
    Jpeg,
    Gif,
    Webp,
}

/// Returned when a MIME type does not name a supported raster format.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unsupported image type `{0}`")]
pub struct UnsupportedImageType(pub String);

impl ImageFormat {
    /// Returns the canonical MIME type of the format.
    pub fn mime_type(self) -> &'static str {
        match self {
            Self::Png => "image/png",
            Self::Jpeg => "image/jpeg",
            Self::Gif => "image/gif",
            Self::Webp => "image/webp",
        }
    }
}

impl FromStr for ImageFormat {
    type Err = UnsupportedImageType;

    /// Parses a MIME type, ignoring ASCII case and any parameters.
    ///
    /// # Examples
    ///
    /// ```
    /// # use layertree_core::draw::ImageFormat;
    /// assert_eq!("image/PNG".parse::<ImageFormat>(), Ok(ImageFormat::Png));
    /// assert_eq!("image/jpg".parse::<ImageFormat>(), Ok(ImageFormat::Jpeg));
    /// assert!("text/plain".parse::<ImageFormat>().is_err());
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let essence = s.split(';').next().unwrap_or_default().trim();
        match essence.to_ascii_lowercase().as_str() {
            "image/png" => Ok(Self::Png),
            "image/jpeg" | "image/jpg" => Ok(Self::Jpeg),
            "image/gif" => Ok(Self::Gif),
            "image/webp" => Ok(Self::Webp),
            _ => Err(UnsupportedImageType(s.to_string())),
        }
    }
}

/// A decoded image and its placement rectangle.
///
/// Width and height are only set when the element gave them explicitly;
/// an unset dimension means "use the image's intrinsic size", which is left
/// to the paint backend.
///
/// # Examples
///
/// ```
/// # use layertree_core::draw::{Image, ImageFormat};
/// # use layertree_core::geometry::Point;
/// assert!(Image::new(ImageFormat::Png, Vec::new()).is_none());
///
/// let image = Image::new(ImageFormat::Png, vec![0x89, b'P', b'N', b'G'])
///     .unwrap()
///     .with_origin(Point::new(5.0, 5.0))
///     .with_width(Some(32.0));
/// assert_eq!(image.origin(), Point::new(5.0, 5.0));
/// assert_eq!(image.width(), Some(32.0));
/// assert_eq!(image.height(), None);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Image {
    format: ImageFormat,
    data: Vec<u8>,
    origin: Point,
    width: Option<f32>,
    height: Option<f32>,
}

impl Image {
    /// Creates an image at the origin, or `None` if `data` is empty.
    pub fn new(format: ImageFormat, data: Vec<u8>) -> Option<Self> {
        if data.is_empty() {
            return None;
        }

        Some(Self {
            format,
            data,
            origin: Point::default(),
            width: None,
            height: None,
        })
    }

    pub fn with_origin(mut self, origin: Point) -> Self {
        self.origin = origin;
        self
    }

    pub fn with_width(mut self, width: Option<f32>) -> Self {
        self.width = width;
        self
    }

    pub fn with_height(mut self, height: Option<f32>) -> Self {
        self.height = height;
        self
    }

    pub fn format(&self) -> ImageFormat {
        self.format
    }

    pub fn mime_type(&self) -> &'static str {
        self.format.mime_type()
    }

    /// Returns the encoded image bytes; never empty.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn origin(&self) -> Point {
        self.origin
    }

    pub fn width(&self) -> Option<f32> {
        self.width
    }

    pub fn height(&self) -> Option<f32> {
        self.height
    }
}
