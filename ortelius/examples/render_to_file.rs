//! This example shows how to render a map to an image file without creating a window.
//!
//! Running it will create a file `output.png` with a small rail network plotted
//! over a white background, together with a scale bar.
//!
//! ```shell
//! cargo run --example render_to_file
//! ```

use ortelius::layer::{Layer, LayerBody, LayerOrder, LineId, VecShapeProvider};
use ortelius::ortelius_types::cartesian::ScreenSize;
use ortelius::ortelius_types::latlon;
use ortelius::render::{LinePaint, PointPaint, RasterCanvas};
use ortelius::{Color, MapBuilder};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // A few western European rail corridors.
    let provider = VecShapeProvider::new(vec![
        (
            LineId(1),
            vec![
                latlon!(52.37, 4.90),
                latlon!(51.92, 4.48),
                latlon!(50.85, 4.35),
                latlon!(48.86, 2.35),
            ],
        ),
        (
            LineId(2),
            vec![latlon!(50.85, 4.35), latlon!(50.94, 6.96), latlon!(52.52, 13.40)],
        ),
        (
            LineId(3),
            vec![latlon!(48.86, 2.35), latlon!(45.76, 4.84), latlon!(43.30, 5.37)],
        ),
    ]);

    let stations = vec![
        latlon!(52.37, 4.90),
        latlon!(50.85, 4.35),
        latlon!(48.86, 2.35),
        latlon!(52.52, 13.40),
        latlon!(43.30, 5.37),
    ];

    // The builder fits the viewport around the bounding box of the provider,
    // so the whole network ends up on screen.
    let mut map = MapBuilder::default()
        .with_provider(provider)
        .with_layer(Layer::new(
            "network",
            LayerBody::Network(LinePaint {
                color: Color::rgba(70, 130, 180, 255),
                width: 3,
            }),
        ))
        .with_layer(
            Layer::new(
                "stations",
                LayerBody::Markers {
                    points: stations,
                    paint: PointPaint {
                        color: Color::RED,
                        radius: 4,
                    },
                },
            )
            .with_order(LayerOrder::Top),
        )
        .build();

    let size = ScreenSize::new(800, 600);
    map.resize(size);

    let mut canvas = RasterCanvas::new(size);
    map.render(&mut canvas);

    canvas
        .into_image()
        .save("output.png")
        .expect("failed to write output.png");

    println!("Rendered the network into output.png");
}
