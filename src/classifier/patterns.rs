//! Shapes of known tile server metadata endpoints

use lazy_static::lazy_static;
use regex::RegexSet;
use serde::{Deserialize, Serialize};

/// IIIF Image API request: /region/size/rotation/quality.format
pub const IIIF_IMAGE_PATH: &str = concat!(
    r"/\^?(full|square|(pct:)?\d+,\d+,\d+,\d+)",
    r"/(full|max|\d+,|,\d+|pct:\d+|!?\d+,\d+)",
    r"/!?[1-3]?[0-9]?[0-9]",
    r"/(color|gray|bitonal|default|native)",
    r"\.(jpe?g|tiff?|png|gif|jp2|pdf|webp)",
);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TileFormat {
    Zoomify,
    Iiif,
    IipImage,
    DeepZoom,
    ImageServer,
    TilesInfo,
    ZoomifyPff,
    Hungaricana,
    Mnesys,
    GoogleArts,
}

/// Metadata endpoint patterns, tried in order; the first hit names the format
pub static METADATA_TABLE: &[(&str, TileFormat)] = &[
    (r"/ImageProperties.xml", TileFormat::Zoomify),
    (r"/info.json", TileFormat::Iiif),
    (r"\?FIF=", TileFormat::IipImage),
    (r"_files/0/0_0.jpg(?:\?.*)?$", TileFormat::DeepZoom),
    (r"\.img.\\?cmd=info", TileFormat::ImageServer),
    (r"getTilesInfo\?object_id", TileFormat::TilesInfo),
    (r"\.pff(&requestType=1)?$", TileFormat::ZoomifyPff),
    (r"\.ecw(?:\?.*)?$", TileFormat::Hungaricana),
    (r"/p.xml(?:\?.*)?$", TileFormat::Mnesys),
    (IIIF_IMAGE_PATH, TileFormat::Iiif),
    (r"artsandculture\.google\.com/asset/", TileFormat::GoogleArts),
];

lazy_static! {
    static ref METADATA_SET: RegexSet =
        RegexSet::new(METADATA_TABLE.iter().map(|(pattern, _)| *pattern)).unwrap();
}

/// Format of the first metadata pattern matching `url`
pub fn match_metadata(url: &str) -> Option<TileFormat> {
    METADATA_SET
        .matches(url)
        .iter()
        .next()
        .map(|index| METADATA_TABLE[index].1)
}

impl TileFormat {
    pub fn name(&self) -> &'static str {
        match self {
            TileFormat::Zoomify => "Zoomify",
            TileFormat::Iiif => "IIIF",
            TileFormat::IipImage => "IIPImage",
            TileFormat::DeepZoom => "Deep Zoom",
            TileFormat::ImageServer => "ImageServer",
            TileFormat::TilesInfo => "Tiles info",
            TileFormat::ZoomifyPff => "Zoomify PFF",
            TileFormat::Hungaricana => "Hungaricana",
            TileFormat::Mnesys => "Mnesys",
            TileFormat::GoogleArts => "Google Arts & Culture",
        }
    }
}

impl std::fmt::Display for TileFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
