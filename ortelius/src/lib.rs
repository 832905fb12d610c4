//! Ortelius is a map compositing engine for line networks. It projects geographic
//! data onto a pixel grid with a simple linear projection, composes styled layers
//! into a raster image and translates pointer input into map navigation.
//!
//! # Quick start
//!
//! You can render a line network to a PNG file with this code:
//!
//! ```no_run
//! use ortelius::layer::{Layer, LayerBody, LineId, VecShapeProvider};
//! use ortelius::ortelius_types::cartesian::ScreenSize;
//! use ortelius::ortelius_types::latlon;
//! use ortelius::render::{LinePaint, RasterCanvas};
//! use ortelius::{Color, MapBuilder};
//!
//! let provider = VecShapeProvider::new(vec![(
//!     LineId(1),
//!     vec![
//!         latlon!(52.37, 4.90),
//!         latlon!(50.85, 4.35),
//!         latlon!(48.86, 2.35),
//!     ],
//! )]);
//!
//! let mut map = MapBuilder::default()
//!     .with_provider(provider)
//!     .with_layer(Layer::new(
//!         "route",
//!         LayerBody::Network(LinePaint {
//!             color: Color::BLUE,
//!             width: 2,
//!         }),
//!     ))
//!     .build();
//!
//! map.resize(ScreenSize::new(800, 600));
//!
//! let mut canvas = RasterCanvas::new(ScreenSize::new(800, 600));
//! map.render(&mut canvas);
//! canvas.into_image().save("route.png").unwrap();
//! ```
//!
//! This draws the route from Amsterdam to Paris over a white background with a
//! scale bar in the lower left corner. The builder fits the viewport around the
//! bounding box of the provided data, so the whole route is visible.
//!
//! # Main components of Ortelius
//!
//! Everything revolves around the
//!
//! * [`Map`] struct, which ties together the currently displayed [`MapView`], a
//!   data source and a set of
//! * [`layers`](layer) that describe which shapes to draw and how. Layers are
//!   composed bottom to top onto a
//! * [`canvas`](render), which holds the pixels. The built-in
//!   [`RasterCanvas`](render::RasterCanvas) draws into an RGBA image in memory.
//!
//! A map built from these three parts is static. If a user is supposed to
//! navigate it, you would also need
//!
//! * [`EventProcessor`](control::EventProcessor) to convert raw pointer events
//!   into clicks and drags, and the
//! * [`MapController`](control::MapController) that changes the viewport based
//!   on them: double click to zoom, drag to pan.
//!
//! The engine itself is windowing-agnostic. An application embedding it feeds
//! pointer events into the processor, gives the map a [`Messenger`] to be
//! notified when the picture is out of date, and presents the rendered image
//! whatever way fits its UI stack.

#![warn(clippy::unwrap_used)]
#![warn(missing_docs)]

mod color;
pub mod control;
pub mod error;
pub mod fit;
pub mod layer;
mod map;
mod messenger;
pub mod render;
pub mod scale_bar;
mod view;

pub use color::Color;
pub use error::OrteliusError;
pub use map::{LayerCollection, LayerId, Map, MapBuilder, OverlayTask, OverlayTasks};
pub use messenger::{DummyMessenger, Messenger};
pub use view::{MapProjection, MapView};

// Reexport ortelius_types
pub use ortelius_types;
