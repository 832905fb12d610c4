use std::ops::Index;

use crate::layer::{Layer, ShapeProvider};
use crate::render::Canvas;
use crate::view::MapProjection;

/// Identifier a [`LayerCollection`] assigns to a layer when it is
/// registered.
///
/// Ids are unique within one collection and are never reused, so a stale id
/// held after its layer was removed simply stops matching anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LayerId(u64);

struct LayerEntry {
    id: LayerId,
    layer: Layer,
}

/// Collection of layers ordered for compositing.
///
/// The collection keeps its layers sorted bottom-to-top: all
/// [`LayerOrder::Bottom`](crate::layer::LayerOrder::Bottom) layers first,
/// `Top` layers last, with registration order preserved inside each bucket.
/// Iteration order is therefore exactly the order layers are composited in.
#[derive(Default)]
pub struct LayerCollection {
    entries: Vec<LayerEntry>,
    next_id: u64,
}

impl LayerCollection {
    /// Creates an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a layer and returns the id assigned to it.
    pub fn insert(&mut self, layer: Layer) -> LayerId {
        let id = LayerId(self.next_id);
        self.next_id += 1;
        self.entries.push(LayerEntry { id, layer });

        // Stable sort, so same-bucket layers stay in registration order.
        self.entries.sort_by_key(|entry| entry.layer.order());

        id
    }

    /// Removes the layer with the given id, returning it if it was present.
    pub fn remove(&mut self, id: LayerId) -> Option<Layer> {
        let index = self.entries.iter().position(|entry| entry.id == id)?;
        Some(self.entries.remove(index).layer)
    }

    /// Removes the layer at the given position in compositing order.
    ///
    /// # Panics
    ///
    /// Panics if the index is out of bounds.
    pub fn remove_at(&mut self, index: usize) -> Layer {
        self.entries.remove(index).layer
    }

    /// Returns the layer with the given id.
    pub fn get(&self, id: LayerId) -> Option<&Layer> {
        self.entries
            .iter()
            .find(|entry| entry.id == id)
            .map(|entry| &entry.layer)
    }

    /// Returns the layer with the given id for modification.
    pub fn get_mut(&mut self, id: LayerId) -> Option<&mut Layer> {
        self.entries
            .iter_mut()
            .find(|entry| entry.id == id)
            .map(|entry| &mut entry.layer)
    }

    /// Shows or hides the layer with the given id.
    ///
    /// Returns false if no layer has that id.
    pub fn set_visible(&mut self, id: LayerId, visible: bool) -> bool {
        match self.get_mut(id) {
            Some(layer) => {
                layer.set_visible(visible);
                true
            }
            None => false,
        }
    }

    /// Hides every layer in the collection.
    pub fn hide_all(&mut self) {
        for entry in &mut self.entries {
            entry.layer.set_visible(false);
        }
    }

    /// Number of layers in the collection.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if the collection has no layers.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over the layers in compositing order.
    pub fn iter(&self) -> impl Iterator<Item = (LayerId, &Layer)> {
        self.entries.iter().map(|entry| (entry.id, &entry.layer))
    }

    /// Iterates over the layers in compositing order, mutably.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (LayerId, &mut Layer)> {
        self.entries
            .iter_mut()
            .map(|entry| (entry.id, &mut entry.layer))
    }

    /// Draws every visible layer onto the canvas, bottom to top.
    ///
    /// A failing layer is logged and skipped; it never breaks the frame or
    /// the layers above it. This keeps one layer with a dangling line
    /// reference from taking the whole map down.
    pub fn render(
        &self,
        canvas: &mut dyn Canvas,
        projection: &MapProjection,
        provider: &dyn ShapeProvider,
    ) {
        for entry in &self.entries {
            if !entry.layer.is_visible() {
                continue;
            }

            if let Err(error) = entry.layer.render(canvas, projection, provider) {
                log::error!(
                    "skipping layer {:?} ({}): {error}",
                    entry.id,
                    entry.layer.name()
                );
            }
        }
    }
}

impl Index<usize> for LayerCollection {
    type Output = Layer;

    fn index(&self, index: usize) -> &Self::Output {
        &self.entries[index].layer
    }
}

impl From<Vec<Layer>> for LayerCollection {
    fn from(layers: Vec<Layer>) -> Self {
        let mut collection = Self::new();
        for layer in layers {
            collection.insert(layer);
        }

        collection
    }
}

#[cfg(test)]
mod tests {
    use ortelius_types::cartesian::ScreenSize;
    use ortelius_types::geo::GeoRect;
    use ortelius_types::latlon;

    use super::*;
    use crate::layer::{LayerBody, LayerOrder, LineId, VecShapeProvider};
    use crate::render::{LinePaint, PointPaint, RasterCanvas};
    use crate::Color;

    fn marker_layer(name: &str, lat: f64, lon: f64, color: Color) -> Layer {
        Layer::new(
            name,
            LayerBody::Markers {
                points: vec![latlon!(lat, lon)],
                paint: PointPaint { color, radius: 2 },
            },
        )
    }

    fn names(collection: &LayerCollection) -> Vec<String> {
        collection
            .iter()
            .map(|(_, layer)| layer.name().to_string())
            .collect()
    }

    #[test]
    fn layers_are_sorted_by_bucket() {
        let mut collection = LayerCollection::new();
        collection.insert(marker_layer("a", 0.1, 0.1, Color::RED).with_order(LayerOrder::Top));
        collection.insert(marker_layer("b", 0.2, 0.2, Color::RED).with_order(LayerOrder::Bottom));
        collection.insert(marker_layer("c", 0.3, 0.3, Color::RED));

        assert_eq!(names(&collection), vec!["b", "c", "a"]);
    }

    #[test]
    fn registration_order_is_kept_within_a_bucket() {
        let mut collection = LayerCollection::new();
        collection.insert(marker_layer("first", 0.1, 0.1, Color::RED));
        collection.insert(marker_layer("top", 0.2, 0.2, Color::RED).with_order(LayerOrder::Top));
        collection.insert(marker_layer("second", 0.3, 0.3, Color::RED));
        collection.insert(marker_layer("third", 0.4, 0.4, Color::RED));

        assert_eq!(names(&collection), vec!["first", "second", "third", "top"]);
    }

    #[test]
    fn remove_by_id_returns_the_layer() {
        let mut collection = LayerCollection::new();
        let id = collection.insert(marker_layer("gone", 0.1, 0.1, Color::RED));
        collection.insert(marker_layer("kept", 0.2, 0.2, Color::RED));

        let removed = collection.remove(id).unwrap();
        assert_eq!(removed.name(), "gone");
        assert_eq!(collection.len(), 1);
        assert!(collection.remove(id).is_none());
        assert!(collection.get(id).is_none());
    }

    #[test]
    fn remove_at_uses_compositing_order() {
        let mut collection = LayerCollection::new();
        collection.insert(marker_layer("middle", 0.1, 0.1, Color::RED));
        collection
            .insert(marker_layer("bottom", 0.2, 0.2, Color::RED).with_order(LayerOrder::Bottom));

        let removed = collection.remove_at(0);
        assert_eq!(removed.name(), "bottom");
    }

    #[test]
    fn hide_all_makes_every_layer_invisible() {
        let mut collection = LayerCollection::new();
        let id = collection.insert(marker_layer("a", 0.1, 0.1, Color::RED));
        collection.insert(marker_layer("b", 0.2, 0.2, Color::RED));

        collection.hide_all();

        assert!(collection.iter().all(|(_, layer)| !layer.is_visible()));
        assert!(collection.set_visible(id, true));
        assert!(collection.get(id).unwrap().is_visible());
    }

    #[test]
    fn failing_layer_is_isolated() {
        let mut provider = VecShapeProvider::default();
        provider.add_line(LineId(1), vec![latlon!(0.1, 0.1), latlon!(0.9, 0.9)]);

        let mut collection = LayerCollection::new();
        collection
            .insert(marker_layer("below", 0.25, 0.25, Color::RED).with_order(LayerOrder::Bottom));
        collection.insert(Layer::new(
            "broken",
            LayerBody::Lines {
                ids: vec![LineId(404)],
                paint: LinePaint::default(),
            },
        ));
        collection
            .insert(marker_layer("above", 0.75, 0.75, Color::BLUE).with_order(LayerOrder::Top));

        let projection =
            MapProjection::new(ScreenSize::new(100, 100), GeoRect::new(0.0, 0.0, 1.0, 1.0))
                .unwrap();
        let mut canvas = RasterCanvas::new(ScreenSize::new(100, 100));

        collection.render(&mut canvas, &projection, &provider);

        // Both healthy layers made it to the canvas.
        assert_eq!(canvas.image().get_pixel(25, 74).0, Color::RED.to_u8_array());
        assert_eq!(canvas.image().get_pixel(75, 24).0, Color::BLUE.to_u8_array());
    }

    #[test]
    fn invisible_layers_are_skipped() {
        let provider = VecShapeProvider::default();
        let mut collection = LayerCollection::new();
        let id = collection.insert(marker_layer("hidden", 0.5, 0.5, Color::RED));
        collection.set_visible(id, false);

        let projection =
            MapProjection::new(ScreenSize::new(100, 100), GeoRect::new(0.0, 0.0, 1.0, 1.0))
                .unwrap();
        let mut canvas = RasterCanvas::new(ScreenSize::new(100, 100));

        collection.render(&mut canvas, &projection, &provider);

        assert_eq!(canvas.image().get_pixel(50, 49).0, [0, 0, 0, 0]);
    }
}
