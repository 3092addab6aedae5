use super::WaterPoint;

/// An ordered route through a set of water points.
///
/// The route keeps its own copy of the input and orders it once, at
/// construction, by descending latitude. It is read-only afterwards.
#[derive(Debug, Clone, Default)]
pub struct WaterRoute {
    points: Vec<WaterPoint>,
}

impl WaterRoute {
    pub fn new(points: &[WaterPoint]) -> Self {
        let mut route = Self {
            points: points.to_vec(),
        };
        route.optimize();
        route
    }

    /// Points in route order
    pub fn points(&self) -> &[WaterPoint] {
        &self.points
    }

    pub fn iter(&self) -> std::slice::Iter<'_, WaterPoint> {
        self.points.iter()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// (lat, lng) pairs in route order, ready to be drawn as a polyline
    pub fn positions(&self) -> Vec<(f64, f64)> {
        self.points.iter().map(WaterPoint::position).collect()
    }

    /// Straight-line distance between two points in coordinate space (degrees).
    pub fn distance(a: &WaterPoint, b: &WaterPoint) -> f64 {
        let dlat = a.latitude() - b.latitude();
        let dlng = a.longitude() - b.longitude();
        (dlat * dlat + dlng * dlng).sqrt()
    }

    /// Sum of leg distances along the route, in degrees
    pub fn length(&self) -> f64 {
        self.points
            .windows(2)
            .map(|leg| Self::distance(&leg[0], &leg[1]))
            .sum()
    }

    // Stable sort: points sharing a latitude (including -0.0 and 0.0) keep
    // their input order. total_cmp only decides comparisons involving NaN.
    fn optimize(&mut self) {
        self.points.sort_by(|a, b| {
            let (a, b) = (a.latitude(), b.latitude());
            b.partial_cmp(&a).unwrap_or_else(|| b.total_cmp(&a))
        });
    }
}

impl<'a> IntoIterator for &'a WaterRoute {
    type Item = &'a WaterPoint;
    type IntoIter = std::slice::Iter<'a, WaterPoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}
