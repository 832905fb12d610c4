use ortelius_types::geo::GeoRect;

use super::Map;
use crate::fit::{fit_rect, FitOptions};
use crate::layer::{Layer, ShapeProvider, VecShapeProvider};
use crate::messenger::Messenger;
use crate::scale_bar::{ScaleBar, ScaleBarOptions};
use crate::view::MapView;
use crate::Color;

/// Convenience builder for a [`Map`].
///
/// Everything has a default: a builder with no calls at all produces a map
/// over an empty data source. The calls you almost always want are
/// [`MapBuilder::with_provider`] and [`MapBuilder::with_layer`].
pub struct MapBuilder {
    extent: Option<GeoRect>,
    provider: Option<Box<dyn ShapeProvider>>,
    layers: Vec<Layer>,
    messenger: Option<Box<dyn Messenger>>,
    scale_bar: Option<ScaleBarOptions>,
    fit_options: FitOptions,
    background: Color,
}

impl Default for MapBuilder {
    fn default() -> Self {
        Self {
            extent: None,
            provider: None,
            layers: vec![],
            messenger: None,
            scale_bar: Some(ScaleBarOptions::default()),
            fit_options: FitOptions::default(),
            background: Color::WHITE,
        }
    }
}

impl MapBuilder {
    /// Creates a builder with all parameters at their defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the data source of the map.
    pub fn with_provider(mut self, provider: impl ShapeProvider + 'static) -> Self {
        self.provider = Some(Box::new(provider));
        self
    }

    /// Sets the initial viewport extent.
    ///
    /// Without this call the map starts at the full extent of its data
    /// source, expanded by the fit margin.
    pub fn with_extent(mut self, extent: GeoRect) -> Self {
        self.extent = Some(extent);
        self
    }

    /// Adds a layer to the map.
    pub fn with_layer(mut self, layer: Layer) -> Self {
        self.layers.push(layer);
        self
    }

    /// Sets the messenger the map requests redraws through.
    pub fn with_messenger(mut self, messenger: impl Messenger + 'static) -> Self {
        self.messenger = Some(Box::new(messenger));
        self
    }

    /// Configures the scale bar.
    pub fn with_scale_bar(mut self, options: ScaleBarOptions) -> Self {
        self.scale_bar = Some(options);
        self
    }

    /// Builds the map without a scale bar.
    pub fn without_scale_bar(mut self) -> Self {
        self.scale_bar = None;
        self
    }

    /// Sets the zoom and margin parameters for zoom-to commands.
    pub fn with_fit_options(mut self, options: FitOptions) -> Self {
        self.fit_options = options;
        self
    }

    /// Sets the background color of the map.
    pub fn with_background(mut self, color: Color) -> Self {
        self.background = color;
        self
    }

    /// Builds the map.
    ///
    /// The screen size starts at zero; rendering begins once the owner calls
    /// [`Map::resize`] with the real surface size.
    pub fn build(self) -> Map {
        let provider = self
            .provider
            .unwrap_or_else(|| Box::new(VecShapeProvider::default()));

        let extent = self
            .extent
            .unwrap_or_else(|| fit_rect(provider.bounds(), &self.fit_options));

        let mut map = Map::new(MapView::new(extent), provider, self.messenger);
        map.fit_options = self.fit_options;
        map.background = self.background;
        map.scale_bar = self.scale_bar.map(ScaleBar::new);
        for layer in self.layers {
            map.layers_mut().insert(layer);
        }

        map
    }
}
