use serde::{Deserialize, Serialize};

use crate::core::PlotParameters;
use crate::render::RenderRequest;

pub use crate::error::InvalidParameterReason;

/// Result of checking a `PlotParameters` value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValidationOutcome {
    Valid,
    Invalid(InvalidParameterReason),
}

impl ValidationOutcome {
    #[must_use]
    pub fn is_valid(self) -> bool {
        matches!(self, Self::Valid)
    }

    pub fn into_result(self) -> Result<(), InvalidParameterReason> {
        match self {
            Self::Valid => Ok(()),
            Self::Invalid(reason) => Err(reason),
        }
    }
}

/// Checks bounds and counts in a fixed order; the first failure wins.
///
/// Bounds use strict `<`: a zero-width window can never be rendered, and NaN
/// bounds fail the comparison as well.
#[must_use]
#[allow(clippy::neg_cmp_op_on_partial_ord)]
pub fn validate(params: &PlotParameters) -> ValidationOutcome {
    if !(params.min_x < params.max_x) {
        return ValidationOutcome::Invalid(InvalidParameterReason::MinGreaterOrEqualMaxX);
    }
    if !(params.min_y < params.max_y) {
        return ValidationOutcome::Invalid(InvalidParameterReason::MinGreaterOrEqualMaxY);
    }
    if params.interval_count < 0 {
        return ValidationOutcome::Invalid(InvalidParameterReason::NegativeIntervalCount);
    }
    if params.resolution < 0 {
        return ValidationOutcome::Invalid(InvalidParameterReason::NegativeResolution);
    }
    ValidationOutcome::Valid
}

/// Validates `params` and projects them into the request an engine consumes.
pub fn render_request(
    params: &PlotParameters,
    dark_mode: bool,
) -> Result<RenderRequest, InvalidParameterReason> {
    validate(params).into_result()?;
    Ok(RenderRequest::from_validated(params, dark_mode))
}
