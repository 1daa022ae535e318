//! Map-application deep links for an ordered list of stops.

use thiserror::Error;
use url::form_urlencoded;

/// Directions endpoint used when no base URL is configured.
pub const DEFAULT_DIRECTIONS_URL: &str = "https://www.google.com/maps/dir/";

/// Errors from [`MapsLinkBuilder::build`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LinkError {
    /// A directions link needs an origin and a destination.
    #[error("a directions link needs at least two stops, got {count}")]
    TooFewStops {
        /// Number of stops supplied.
        count: usize,
    },
}

/// Builds directions links of the form
/// `{base}?api=1&origin=O&destination=D&waypoints=W1|W2`.
///
/// Each label is form-urlencoded, so spaces become `+`. The `waypoints`
/// parameter is omitted when the route has no intermediate stops.
///
/// # Examples
///
/// ```
/// use waymark_core::MapsLinkBuilder;
///
/// # fn main() -> Result<(), waymark_core::LinkError> {
/// let link = MapsLinkBuilder::default().build(&["Paris, France", "Lyon", "Nice"])?;
/// assert_eq!(
///     link,
///     "https://www.google.com/maps/dir/?api=1&origin=Paris%2C+France&destination=Nice&waypoints=Lyon"
/// );
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MapsLinkBuilder {
    base_url: String,
}

impl Default for MapsLinkBuilder {
    fn default() -> Self {
        Self::new(DEFAULT_DIRECTIONS_URL)
    }
}

impl MapsLinkBuilder {
    /// Create a builder targeting `base_url`.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    /// The configured directions endpoint.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build a link visiting `stops` in order.
    ///
    /// # Errors
    ///
    /// Returns [`LinkError::TooFewStops`] when fewer than two stops are given.
    pub fn build<S: AsRef<str>>(&self, stops: &[S]) -> Result<String, LinkError> {
        let [origin, waypoints @ .., destination] = stops else {
            return Err(LinkError::TooFewStops { count: stops.len() });
        };
        let mut link = format!(
            "{}?api=1&origin={}&destination={}",
            self.base_url,
            encode(origin.as_ref()),
            encode(destination.as_ref())
        );
        if !waypoints.is_empty() {
            let joined = waypoints
                .iter()
                .map(|stop| encode(stop.as_ref()))
                .collect::<Vec<_>>()
                .join("|");
            link.push_str("&waypoints=");
            link.push_str(&joined);
        }
        Ok(link)
    }
}

fn encode(label: &str) -> String {
    form_urlencoded::byte_serialize(label.as_bytes()).collect()
}
