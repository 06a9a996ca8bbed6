//! Image decodability checks backed by the `image` crate.

use crate::error::{CoreError, CoreResult};
use crate::external::ImageValidator;

use image::ImageReader;
use std::path::Path;

/// Treats an image as valid when its format can be sniffed from its content
/// and the whole image decodes.
#[derive(Debug, Clone, Copy, Default)]
pub struct DecodeImageValidator;

impl DecodeImageValidator {
    /// Decodes `image`, describing why it failed if it does not.
    pub fn verify(&self, image: &Path) -> CoreResult<()> {
        let reader = ImageReader::open(image)?
            .with_guessed_format()
            .map_err(|e| CoreError::ImageDecode(format!("{}: {}", image.display(), e)))?;
        reader
            .decode()
            .map_err(|e| CoreError::ImageDecode(format!("{}: {}", image.display(), e)))?;
        Ok(())
    }
}

impl ImageValidator for DecodeImageValidator {
    fn is_decodable(&self, image: &Path) -> bool {
        match self.verify(image) {
            Ok(()) => true,
            Err(e) => {
                log::debug!("Image failed verification: {}", e);
                false
            }
        }
    }
}
