//! Route resolution metadata

use serde::{Deserialize, Serialize};

/// Structured routing metadata produced by a successful route resolution.
///
/// Produced per call by a routing scope and discarded after the eligibility
/// decision; never stored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RouteInfo {
    /// Controller handling the route
    pub controller: String,
    /// Action within the controller
    pub action: String,
    /// Canonical URL of the route
    pub url: String,
    /// Response format of the route (e.g. "html", "json", "jpeg")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
}

impl RouteInfo {
    /// Create route metadata without a format
    pub fn new(
        controller: impl Into<String>,
        action: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        Self {
            controller: controller.into(),
            action: action.into(),
            url: url.into(),
            format: None,
        }
    }

    /// Attach a response format
    pub fn with_format(mut self, format: impl Into<String>) -> Self {
        self.format = Some(format.into());
        self
    }
}
