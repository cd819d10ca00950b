//! Tile requests seen on real viewers, and what they must normalize to

use dezoomify_extension::{TileFormat, UrlClassifier, DEZOOMIFY_URL};
use pretty_assertions::assert_eq;
use test_case::test_case;

#[test_case(
    "https://example.com/images/photo.dzi",
    "https://example.com/images/photo_files/0/0_0.jpg",
    TileFormat::DeepZoom ; "dzi descriptor"
)]
#[test_case(
    "https://example.com/images/photo_files/11/5_3.jpg?token=abc",
    "https://example.com/images/photo_files/0/0_0.jpg",
    TileFormat::DeepZoom ; "deep zoom tile"
)]
#[test_case(
    "https://example.com/zoomify/map/TileGroup0/3-2-1.jpg",
    "https://example.com/zoomify/map/ImageProperties.xml",
    TileFormat::Zoomify ; "zoomify tile"
)]
#[test_case(
    "https://example.com/zoomify/map/ImageProperties.xml?t12345",
    "https://example.com/zoomify/map/ImageProperties.xml",
    TileFormat::Zoomify ; "zoomify descriptor with cache buster"
)]
#[test_case(
    "https://iiif.example.org/iiif/2/ms-42/full/512,/0/default.jpg",
    "https://iiif.example.org/iiif/2/ms-42/info.json",
    TileFormat::Iiif ; "iiif tile"
)]
#[test_case(
    "https://iiif.example.org/iiif/3/ms-42/pct:10,10,50,50/max/90/gray.png",
    "https://iiif.example.org/iiif/3/ms-42/info.json",
    TileFormat::Iiif ; "iiif region in percent"
)]
#[test_case(
    "https://iiif.example.org/iiif/2/ms-42/info.json",
    "https://iiif.example.org/iiif/2/ms-42/info.json",
    TileFormat::Iiif ; "iiif descriptor"
)]
#[test_case(
    "https://example.com/fcgi-bin/iipsrv.fcgi?FIF=/data/painting.tif&JTL=4,12",
    "https://example.com/fcgi-bin/iipsrv.fcgi?FIF=/data/painting.tif",
    TileFormat::IipImage ; "iipimage tile"
)]
#[test_case(
    "https://artsandculture.google.com/asset/the-starry-night/bgEuwDxel93-Pg?hl=en&ms=x",
    "https://artsandculture.google.com/asset/the-starry-night/bgEuwDxel93-Pg",
    TileFormat::GoogleArts ; "google arts page"
)]
#[test_case(
    "https://example.com/api/getTilesInfo?object_id=1234&callback=jQuery1_2",
    "https://example.com/api/getTilesInfo?object_id=1234",
    TileFormat::TilesInfo ; "tiles info jsonp"
)]
#[test_case(
    "https://example.com/viewer/zoom.pff&requestType=1",
    "https://example.com/viewer/zoom.pff&requestType=1",
    TileFormat::ZoomifyPff ; "zoomify pff"
)]
#[test_case(
    "https://maps.hungaricana.hu/imageserver/maps/ABC_123.ecw?tile=3",
    "https://maps.hungaricana.hu/imageserver/maps/ABC_123.ecw?tile=3",
    TileFormat::Hungaricana ; "hungaricana ecw"
)]
#[test_case(
    "https://archives.example.fr/ark:/1234/p.xml?v=1",
    "https://archives.example.fr/ark:/1234/p.xml?v=1",
    TileFormat::Mnesys ; "mnesys descriptor"
)]
fn test_tile_request_matches(url: &str, normalized: &str, format: TileFormat) {
    let classification = UrlClassifier::default().classify(url);
    assert_eq!(classification.normalized, normalized);
    assert_eq!(classification.format, Some(format));
}

#[test_case("https://example.com/" ; "home page")]
#[test_case("https://example.com/static/photo.jpg" ; "plain image")]
#[test_case("https://example.com/assets/app.js?v=2" ; "script")]
#[test_case("https://example.com/data/manifest.json" ; "other json")]
fn test_unrelated_request_ignored(url: &str) {
    assert!(!UrlClassifier::default().classify(url).is_match());
}

#[test_case("https://iiif.example.org/iiif/2/ms-42/info.json" ; "descriptor")]
#[test_case("https://iiif.example.org/iiif/2/ms-42/full/512,/0/default.jpg" ; "tile")]
#[test_case("https://example.com/images/photo.dzi" ; "dzi")]
fn test_viewer_link_never_matches(image_url: &str) {
    let link = format!("{}{}", DEZOOMIFY_URL, image_url);
    assert!(!UrlClassifier::default().classify(&link).is_match());
}
