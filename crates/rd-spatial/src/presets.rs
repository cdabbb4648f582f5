//! Built-in road networks.
//!
//! [`mumbai`] is a hand-curated 50-node graph of Mumbai's arterial roads:
//! south Mumbai, the Dadar/Sion junctions, the Western and Eastern Express
//! Highways, the SV/Link Road corridor, and the JVLR/Saki Naka connectors.
//! Coordinates are intersection or landmark centroids, not surveyed data.

use rd_core::GeoPoint;

use crate::{RoadNetwork, RoadNetworkBuilder, SpatialResult};

/// Default base for the rescue fleet.
pub const RESCUE_HQ: GeoPoint = GeoPoint::new(18.9486, 72.8336);

/// Build the Mumbai network.
///
/// The adjacency table lists some roads from one side only (e.g. Juhu →
/// VileParleEast); the builder makes every road bidirectional.
pub fn mumbai() -> SpatialResult<RoadNetwork> {
    let mut b = RoadNetworkBuilder::new();
    for &(key, lat, lng) in NODES {
        b.add_node(key, GeoPoint::new(lat, lng));
    }
    for &(key, neighbors) in ROADS {
        b.add_adjacency(key, neighbors);
    }
    b.build()
}

// ── Tables ────────────────────────────────────────────────────────────────────

const NODES: &[(&str, f64, f64)] = &[
    ("Colaba",          18.9067, 72.8147),
    ("NarimanPoint",    18.9256, 72.8242),
    ("Gateway",         18.9220, 72.8347),
    ("CST",             18.9401, 72.8347),
    ("Churchgate",      18.9322, 72.8264),
    ("MarineDrive",     18.9430, 72.8230),
    ("Girgaon",         18.9560, 72.8160),
    ("MumbaiCentral",   18.9690, 72.8190),
    ("Byculla",         18.9750, 72.8330),
    ("HajiAli",         18.9827, 72.8089),
    ("Worli",           19.0000, 72.8150),
    ("LowerParel",      18.9950, 72.8290),
    ("DadarTT",         19.0178, 72.8478),
    ("DadarWest",       19.0190, 72.8400),
    ("Matunga",         19.0280, 72.8500),
    ("Sion",            19.0400, 72.8640),
    ("Dharavi",         19.0380, 72.8530),
    ("BandraWest",      19.0550, 72.8290),
    ("BandraKalanagar", 19.0600, 72.8450),
    ("BKC",             19.0670, 72.8770),
    ("Kurla",           19.0730, 72.8810),
    ("SantacruzEast",   19.0800, 72.8560),
    ("VileParleEast",   19.0960, 72.8540),
    ("AndheriEast",     19.1136, 72.8697),
    ("JogeshwariEast",  19.1360, 72.8600),
    ("GoregaonEast",    19.1650, 72.8580),
    ("MaladEast",       19.1840, 72.8560),
    ("KandivaliEast",   19.2150, 72.8630),
    ("BorivaliEast",    19.2300, 72.8660),
    ("Dahisar",         19.2500, 72.8590),
    ("BandraTurner",    19.0590, 72.8300),
    ("KharWest",        19.0700, 72.8340),
    ("SantacruzWest",   19.0820, 72.8350),
    ("Juhu",            19.1000, 72.8270),
    ("AndheriWest",     19.1140, 72.8350),
    ("Versova",         19.1250, 72.8150),
    ("InfinityMall",    19.1450, 72.8300),
    ("MaladWest",       19.1860, 72.8370),
    ("BorivaliWest",    19.2300, 72.8460),
    ("Chembur",         19.0620, 72.8990),
    ("Ghatkopar",       19.0860, 72.9090),
    ("Vikhroli",        19.1100, 72.9250),
    ("Kanjurmarg",      19.1300, 72.9340),
    ("Bhandup",         19.1480, 72.9390),
    ("Mulund",          19.1720, 72.9560),
    ("Thane",           19.1950, 72.9700),
    ("Airport",         19.0902, 72.8628),
    ("Powai",           19.1176, 72.9060),
    ("SakiNaka",        19.1050, 72.8870),
    ("Vashi",           19.0770, 73.0),
];

const ROADS: &[(&str, &[&str])] = &[
    ("Colaba",          &["Gateway", "NarimanPoint"]),
    ("NarimanPoint",    &["Colaba", "Churchgate", "MarineDrive"]),
    ("Gateway",         &["Colaba", "CST"]),
    ("CST",             &["Gateway", "Churchgate", "MarineDrive", "MumbaiCentral"]),
    ("Churchgate",      &["NarimanPoint", "MarineDrive", "CST"]),
    ("MarineDrive",     &["NarimanPoint", "Churchgate", "Girgaon"]),
    ("Girgaon",         &["MarineDrive", "HajiAli", "MumbaiCentral"]),
    ("MumbaiCentral",   &["CST", "Girgaon", "Byculla", "HajiAli"]),
    ("Byculla",         &["MumbaiCentral", "DadarTT"]),
    ("HajiAli",         &["Girgaon", "MumbaiCentral", "Worli", "DadarWest"]),
    ("Worli",           &["HajiAli", "DadarWest", "LowerParel", "BandraWest"]),
    ("LowerParel",      &["Worli", "DadarWest", "DadarTT"]),
    ("DadarTT",         &["Byculla", "DadarWest", "Matunga", "Sion"]),
    ("DadarWest",       &["HajiAli", "Worli", "LowerParel", "DadarTT", "Matunga"]),
    ("Matunga",         &["DadarTT", "DadarWest", "Sion", "Dharavi"]),
    ("Dharavi",         &["Matunga", "Sion", "BandraKalanagar"]),
    ("Sion",            &["DadarTT", "Matunga", "Dharavi", "BKC", "Kurla", "Chembur"]),
    ("BandraKalanagar", &["Dharavi", "BKC", "SantacruzEast", "BandraTurner"]),
    ("SantacruzEast",   &["BandraKalanagar", "VileParleEast", "Airport"]),
    ("VileParleEast",   &["SantacruzEast", "AndheriEast", "Airport"]),
    ("AndheriEast",     &["VileParleEast", "JogeshwariEast", "Powai", "SakiNaka"]),
    ("JogeshwariEast",  &["AndheriEast", "GoregaonEast"]),
    ("GoregaonEast",    &["JogeshwariEast", "MaladEast"]),
    ("MaladEast",       &["GoregaonEast", "KandivaliEast"]),
    ("KandivaliEast",   &["MaladEast", "BorivaliEast"]),
    ("BorivaliEast",    &["KandivaliEast", "Dahisar"]),
    ("Dahisar",         &["BorivaliEast"]),
    ("BandraWest",      &["Worli", "BandraTurner"]),
    ("BandraTurner",    &["BandraWest", "BandraKalanagar", "KharWest"]),
    ("KharWest",        &["BandraTurner", "SantacruzWest"]),
    ("SantacruzWest",   &["KharWest", "Juhu"]),
    ("Juhu",            &["SantacruzWest", "AndheriWest", "VileParleEast"]),
    ("AndheriWest",     &["Juhu", "Versova", "AndheriEast"]),
    ("Versova",         &["AndheriWest", "InfinityMall"]),
    ("InfinityMall",    &["Versova", "MaladWest"]),
    ("MaladWest",       &["InfinityMall", "MaladEast", "BorivaliWest"]),
    ("BorivaliWest",    &["MaladWest", "BorivaliEast"]),
    ("Chembur",         &["Sion", "Ghatkopar", "Vashi"]),
    ("Ghatkopar",       &["Chembur", "Vikhroli", "SakiNaka"]),
    ("Vikhroli",        &["Ghatkopar", "Kanjurmarg", "Powai"]),
    ("Kanjurmarg",      &["Vikhroli", "Bhandup", "Powai"]),
    ("Bhandup",         &["Kanjurmarg", "Mulund"]),
    ("Mulund",          &["Bhandup", "Thane"]),
    ("Thane",           &["Mulund"]),
    ("BKC",             &["Sion", "BandraKalanagar", "Kurla"]),
    ("Kurla",           &["Sion", "BKC", "Ghatkopar", "SakiNaka"]),
    ("Airport",         &["SantacruzEast", "VileParleEast", "SakiNaka"]),
    ("SakiNaka",        &["AndheriEast", "Airport", "Powai", "Kurla", "Ghatkopar"]),
    ("Powai",           &["AndheriEast", "SakiNaka", "Vikhroli", "Kanjurmarg"]),
    ("Vashi",           &["Chembur"]),
];
