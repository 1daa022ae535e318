/// An ordered visit plan with its total distance and a directions link.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Itinerary {
    /// Location labels in visiting order, start first and end last.
    pub stops: Vec<String>,
    /// Total travel distance in metres.
    pub total_distance_metres: u64,
    /// Directions link visiting `stops` in order.
    pub maps_url: String,
}

impl Itinerary {
    /// Total travel distance in kilometres.
    ///
    /// ```
    /// use waymark_core::Itinerary;
    ///
    /// let itinerary = Itinerary {
    ///     stops: vec!["A".into(), "B".into()],
    ///     total_distance_metres: 12_345,
    ///     maps_url: String::new(),
    /// };
    /// assert!((itinerary.total_distance_km() - 12.345).abs() < 1e-9);
    /// ```
    #[must_use]
    #[expect(
        clippy::float_arithmetic,
        clippy::cast_precision_loss,
        reason = "kilometres are reported as a float for display"
    )]
    pub fn total_distance_km(&self) -> f64 {
        self.total_distance_metres as f64 / 1000.0
    }
}
