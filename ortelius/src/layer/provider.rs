use ortelius_types::geo::{GeoPoint, GeoRect};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Identifier of a line in the map data source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LineId(pub i64);

/// The geographic data the map draws.
///
/// The engine never loads map data itself. An implementation resolves line
/// identifiers to polylines and reports the full extent of what it has
/// loaded; everything else, from storage format to caching, is its own
/// business. Resolution happens at render time, so a provider may serve
/// different data from one frame to the next.
pub trait ShapeProvider {
    /// Identifiers of all lines in the data source.
    fn line_ids(&self) -> Vec<LineId>;

    /// Shape of the given line as a geographic polyline, or `None` if the
    /// data source has no such line.
    fn line_geometry(&self, id: LineId) -> Option<Vec<GeoPoint>>;

    /// Bounding box of all data in the source.
    ///
    /// An empty source reports a zero-area box; zoom calculations expand it
    /// to the minimum usable span.
    fn bounds(&self) -> GeoRect;
}

/// In-memory [`ShapeProvider`].
///
/// Keeps lines in registration order and maintains the bounding box
/// incrementally. Meant for tests, examples and small static datasets.
#[derive(Debug, Default, Clone)]
pub struct VecShapeProvider {
    lines: Vec<(LineId, Vec<GeoPoint>)>,
    bounds: Option<GeoRect>,
}

impl VecShapeProvider {
    /// Creates a provider with the given lines.
    pub fn new(lines: Vec<(LineId, Vec<GeoPoint>)>) -> Self {
        let mut provider = Self::default();
        for (id, shape) in lines {
            provider.add_line(id, shape);
        }

        provider
    }

    /// Adds a line to the provider.
    ///
    /// A line registered under an existing id shadows the earlier one in
    /// [`ShapeProvider::line_geometry`] lookups.
    pub fn add_line(&mut self, id: LineId, shape: Vec<GeoPoint>) {
        if let Some(shape_bounds) = GeoRect::from_points(shape.iter().copied()) {
            self.bounds = Some(match self.bounds {
                Some(bounds) => bounds.merge(shape_bounds),
                None => shape_bounds,
            });
        }

        self.lines.push((id, shape));
    }

    /// Number of lines in the provider.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// True if the provider has no lines.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

impl ShapeProvider for VecShapeProvider {
    fn line_ids(&self) -> Vec<LineId> {
        self.lines.iter().map(|(id, _)| *id).collect()
    }

    fn line_geometry(&self, id: LineId) -> Option<Vec<GeoPoint>> {
        self.lines
            .iter()
            .rev()
            .find(|(line_id, _)| *line_id == id)
            .map(|(_, shape)| shape.clone())
    }

    fn bounds(&self) -> GeoRect {
        self.bounds
            .unwrap_or_else(|| GeoRect::new(0.0, 0.0, 0.0, 0.0))
    }
}
