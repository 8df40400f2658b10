//! Convert parsed [`Options`] into a [`Request`].

use crate::fit::{FitTo, FitToError};
use crate::geometry::{BoundingBox, Extent};
use crate::plan::Request;

use super::Options;

impl Options {
    /// The fit policy these options describe. Defaults to `original`.
    pub fn fit_to(&self) -> Result<FitTo, FitToError> {
        if self.fit_mode_invalid {
            return Err(FitToError::UnknownMode);
        }
        match self.fit_mode {
            Some(mode) => FitTo::from_parts(mode, self.fit_value),
            None => Ok(FitTo::Original),
        }
    }

    /// Build a [`Request`] for a document of the given size.
    ///
    /// `bbox` is the content bounding box to crop to, typically measured by
    /// the renderer; `padding` and `square` only apply when it is given.
    ///
    /// Returns `Err` only for structural problems with the fit settings.
    pub fn to_request(
        &self,
        document: Extent,
        bbox: Option<BoundingBox>,
    ) -> Result<Request, FitToError> {
        let mut request = Request::new(document).fit_to(self.fit_to()?);
        if let Some(bbox) = bbox {
            request = request.crop_to_bbox(bbox, self.padding, self.square.unwrap_or(false));
        }
        if let Some(crop) = self.output_crop {
            request = request.output_crop(crop);
        }
        if let Some(max) = self.max_dimension {
            request = request.max_dimension(max);
        }
        Ok(request)
    }
}
