use rusty_worldmap::color::{GRADIENT_DARK, GRADIENT_LIGHT};
use rusty_worldmap::data::filter::filter_records;
use rusty_worldmap::data::model::{ProjectionSeed, RawRecord};
use rusty_worldmap::map::payload::PayloadSurface;
use rusty_worldmap::map::render::{MapStyle, RenderOptions, render};
use rusty_worldmap::scale::Extent;

fn world() -> Vec<RawRecord> {
    vec![
        RawRecord::new("USA", 38.0, -97.0, "United States", 100.0, 50.0),
        RawRecord::new("XXX", 0.0, 0.0, "Unknown", 999.0, 999.0),
        RawRecord::new("FRA", 46.0, 2.0, "France", 10.0, 5.0),
    ]
}

fn options() -> RenderOptions {
    RenderOptions {
        height: 500.0,
        max_bubble_size: 10.0,
        show_bubbles: true,
        ..RenderOptions::default()
    }
}

#[test]
fn unknown_country_is_excluded_from_normalization() {
    let records = world();
    let filtered = filter_records(&records);
    assert!(filtered.iter().all(|r| r.country != "XXX"));

    let mut surface = PayloadSurface::new();
    let map = render(&mut surface, &records, &options(), &MapStyle::default()).unwrap();

    assert_eq!(map.scales.radius.domain, Extent { min: 5.0, max: 50.0 });
    assert_eq!(map.scales.radius.range, [1.0, 10.0]);
    assert_eq!(map.scales.color.domain, Extent { min: 10.0, max: 100.0 });

    let countries: Vec<&str> = map.index.countries().collect();
    assert_eq!(countries, ["FRA", "USA"]);

    let usa = map.index.get("USA").unwrap();
    let fra = map.index.get("FRA").unwrap();
    assert_eq!(usa.radius, 10.0);
    assert_eq!(fra.radius, 1.0);
    assert_eq!(usa.fill_color, GRADIENT_DARK);
    assert_eq!(fra.fill_color, GRADIENT_LIGHT);
}

#[test]
fn seed_comes_from_unfiltered_first_record() {
    let mut surface = PayloadSurface::new();
    let map = render(&mut surface, &world(), &options(), &MapStyle::default()).unwrap();
    assert_eq!(map.seed, ProjectionSeed { latitude: 38.0, longitude: -97.0 });

    // The first row is unknown but still decides the centre.
    let mut records = world();
    records.swap(0, 1);
    let map = render(&mut surface, &records, &options(), &MapStyle::default()).unwrap();
    assert_eq!(map.seed, ProjectionSeed { latitude: 0.0, longitude: 0.0 });
    assert!(!map.index.contains("XXX"));
}

#[test]
fn rerender_is_idempotent_and_clears_previous_content() {
    let mut surface = PayloadSurface::new();
    let style = MapStyle::default();

    let first = render(&mut surface, &world(), &options(), &style).unwrap();
    let snapshot = surface.clone();

    let second = render(&mut surface, &world(), &options(), &style).unwrap();
    assert_eq!(first.index, second.index);
    assert_eq!(first.seed, second.seed);
    assert_eq!(surface.clears, 2);
    assert_eq!(surface.countries, snapshot.countries);
    assert_eq!(surface.bubbles.len(), 2);
}

#[test]
fn hiding_bubbles_on_rerender_removes_old_bubbles() {
    let mut surface = PayloadSurface::new();
    let style = MapStyle::default();

    render(&mut surface, &world(), &options(), &style).unwrap();
    assert_eq!(surface.bubbles.len(), 2);

    let no_bubbles = RenderOptions {
        show_bubbles: false,
        ..options()
    };
    render(&mut surface, &world(), &no_bubbles, &style).unwrap();
    assert!(surface.bubbles.is_empty());
    assert_eq!(surface.countries.len(), 2);
    assert_eq!(surface.height, Some(500.0));
}

#[test]
fn invalid_metric_aborts_before_drawing() {
    let mut surface = PayloadSurface::new();
    let mut records = world();
    records[2].m2 = f64::NAN;

    let err = render(&mut surface, &records, &options(), &MapStyle::default()).unwrap_err();
    assert!(err.to_string().contains("FRA"));
    assert_eq!(surface, PayloadSurface::new());
}
