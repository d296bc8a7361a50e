//! Coordinate reference system values.
//!
//! A [`Crs`] names a coordinate system either by EPSG code or by PROJ string.
//! It does no projection math itself: it only knows how to describe itself to
//! PROJ and whether its axes are angular (geographic) or linear (projected).

use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::{RastersError, Result};

/// WGS 84 longitude/latitude (EPSG:4326)
pub const WGS84: Crs = Crs::Epsg(4326);

/// Geocentric (cartesian) systems numbered inside the geographic EPSG block
const GEOCENTRIC_IN_BLOCK: [u32; 14] =
    [4328, 4910, 4911, 4912, 4913, 4914, 4915, 4916, 4917, 4918, 4919, 4920, 4936, 4978];

/// Projected systems numbered inside the geographic EPSG block
const PROJECTED_IN_BLOCK: &[RangeInclusive<u32>] = &[
    4026..=4026, // MOLDREF99 / Moldova TM
    4037..=4038, // WGS 84 / TMzn35N, TMzn36N
    4048..=4051, // RGRDC 2005 / Congo TM
    4056..=4063,
    4071..=4071, // Chua / UTM zone 23S
    4082..=4083, // REGCAN95 / UTM
    4087..=4088, // World Equidistant Cylindrical
    4093..=4096, // ETRS89 / DKTM
    4217..=4217, // NAD83 / BLM 59N
    4390..=4415, // Kertau, NAD27 / BLM and state planes
    4417..=4434,
    4437..=4439,
    4455..=4457,
    4462..=4462, // WGS 84 / Australian Centre for Remote Sensing Lambert
    4467..=4467, // RGSPM06 / UTM zone 21N
    4471..=4471, // RGM04 / UTM zone 38S
    4474..=4474, // Cadastre 1997 / UTM zone 38S
    4484..=4489, // Mexico ITRF92 / UTM
    4491..=4554, // CGCS2000 / Gauss-Kruger
    4559..=4559, // RRAF 1991 / UTM zone 20N
    4568..=4589, // New Beijing / Gauss-Kruger
    4647..=4647, // ETRS89 / UTM zone 32N (zE-N)
    4826..=4826, // WGS 84 / Cape Verde National
    4839..=4839, // ETRS89 / LCC Germany (N-E)
    4855..=4880, // ETRS89 / NTM
];

/// Geographic systems numbered outside the 4001-4999 block
const GEOGRAPHIC_OUTSIDE_BLOCK: [u32; 25] = [
    3824, 3889, 3906, 5340, 5354, 5360, 5365, 5373, 5489, 5527, 5546, 5593, 5681, 5886, 6318,
    6319, 6322, 6325, 6668, 6706, 7683, 7686, 7843, 7844, 8086,
];

/// Authority names, other than EPSG, for longitude/latitude systems
const GEOGRAPHIC_NAMES: [&str; 3] = ["OGC:CRS27", "OGC:CRS83", "OGC:CRS84"];

/// PROJ `+proj=` names that describe angular coordinates
const LONGLAT_PROJECTIONS: [&str; 4] = ["longlat", "latlong", "lonlat", "latlon"];

/// Coordinate Reference System identified by EPSG code, authority code, or PROJ string
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Crs {
    Epsg(u32),
    /// `AUTHORITY:CODE` for authorities other than EPSG, resolved by PROJ
    Named(String),
    Proj4(String),
}

impl Default for Crs {
    fn default() -> Self {
        WGS84
    }
}

impl Crs {
    pub fn epsg(code: u32) -> Self {
        Crs::Epsg(code)
    }

    /// WGS 84 (EPSG:4326)
    pub fn wgs84() -> Self {
        WGS84
    }

    /// Web Mercator (EPSG:3857)
    pub fn web_mercator() -> Self {
        Crs::Epsg(3857)
    }

    /// Build a CRS from a PROJ string, collapsing runs of whitespace
    pub fn proj4(definition: impl AsRef<str>) -> Self {
        let normalized: Vec<&str> = definition.as_ref().split_whitespace().collect();
        Crs::Proj4(normalized.join(" "))
    }

    /// WGS 84 UTM zone as a PROJ string
    pub fn utm(zone: u8, south: bool) -> Self {
        Crs::Proj4(format!(
            "+proj=utm +zone={} {}+ellps=WGS84 +datum=WGS84 +units=m +no_defs",
            zone,
            if south { "+south " } else { "" }
        ))
    }

    /// Parse a CRS from user input.
    ///
    /// Accepts `EPSG:<code>`, a bare EPSG code, any other `AUTHORITY:CODE`
    /// (`ESRI:54009`, `IGNF:LAMB93`, `OGC:CRS27`), OGC URNs
    /// (`urn:ogc:def:crs:<authority>:[<version>]:<code>`), `CRS84`, and PROJ
    /// strings carrying `+proj=` or `+init=`.
    pub fn parse(input: &str) -> Result<Self> {
        let trimmed = input.trim();
        let invalid = |reason: &str| RastersError::CrsInvalid {
            crs: input.to_string(),
            reason: reason.to_string(),
        };

        if trimmed.is_empty() {
            return Err(invalid("empty CRS definition"));
        }

        if trimmed.starts_with('+') {
            let has_param = |key: &str| proj_param(trimmed, key).is_some_and(|value| !value.is_empty());
            return if has_param("proj") || has_param("init") {
                Ok(Crs::proj4(trimmed))
            } else {
                Err(invalid("PROJ string has no +proj or +init parameter"))
            };
        }

        if trimmed.eq_ignore_ascii_case("CRS84") {
            return Ok(WGS84);
        }

        let (authority, code) = if trimmed.to_ascii_uppercase().starts_with("URN:OGC:DEF:CRS:") {
            // The version segment is optional, the code is always last
            let parts: Vec<&str> = trimmed.split(':').collect();
            if parts.len() < 6 {
                return Err(invalid("OGC URN has no authority and code"));
            }
            (parts[4], parts[parts.len() - 1])
        } else {
            trimmed.split_once(':').unwrap_or(("EPSG", trimmed))
        };

        Crs::from_authority(authority, code).map_err(invalid)
    }

    fn from_authority(authority: &str, code: &str) -> std::result::Result<Self, &'static str> {
        let authority = authority.trim().to_ascii_uppercase();
        let code = code.trim();

        if authority.is_empty()
            || !authority.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
        {
            return Err("authority name must be alphanumeric");
        }
        if code.is_empty() || code.contains(|c: char| c == ':' || c.is_whitespace()) {
            return Err("authority code must be a single token");
        }

        match authority.as_str() {
            "EPSG" => match code.parse::<u32>() {
                Ok(0) => Err("EPSG code must be positive"),
                Ok(code) => Ok(Crs::Epsg(code)),
                Err(_) => Err("expected an EPSG code, authority code, OGC URN, or PROJ string"),
            },
            "OGC" if code.eq_ignore_ascii_case("CRS84") => Ok(WGS84),
            _ => Ok(Crs::Named(format!("{}:{}", authority, code))),
        }
    }

    /// True if coordinates are angular (longitude/latitude) rather than linear.
    ///
    /// EPSG codes are looked up in the geographic 4001-4999 block, corrected
    /// by tables of the projected and geocentric systems numbered inside it
    /// and the geographic systems numbered outside it.
    pub fn is_geographic(&self) -> bool {
        match self {
            Crs::Epsg(code) => epsg_is_geographic(*code),
            Crs::Named(name) => GEOGRAPHIC_NAMES.contains(&name.as_str()),
            Crs::Proj4(definition) => match init_epsg(definition) {
                Some(code) => epsg_is_geographic(code),
                None => proj_param(definition, "proj")
                    .map(|name| LONGLAT_PROJECTIONS.contains(&name))
                    .unwrap_or(false),
            },
        }
    }

    /// EPSG code for this CRS, if one is known.
    ///
    /// PROJ strings are only recognized for WGS 84 longitude/latitude and the
    /// WGS 84 UTM zones.
    pub fn epsg_code(&self) -> Option<u32> {
        match self {
            Crs::Epsg(code) => Some(*code),
            Crs::Named(_) => None,
            Crs::Proj4(definition) => {
                if let Some(code) = init_epsg(definition) {
                    return Some(code);
                }
                if !is_wgs84_datum(definition) {
                    return None;
                }
                let name = proj_param(definition, "proj")?;
                if LONGLAT_PROJECTIONS.contains(&name) {
                    return Some(4326);
                }
                if name != "utm" {
                    return None;
                }
                let zone: u32 = proj_param(definition, "zone")?.parse().ok()?;
                if !(1..=60).contains(&zone) {
                    return None;
                }
                let base = if proj_param(definition, "south").is_some() { 32700 } else { 32600 };
                Some(base + zone)
            }
        }
    }

    /// PROJ string for this CRS, where one can be derived without a database
    pub fn to_proj4(&self) -> Option<String> {
        match self {
            Crs::Proj4(definition) => Some(definition.clone()),
            Crs::Epsg(4326) => Some("+proj=longlat +datum=WGS84 +no_defs".to_string()),
            Crs::Epsg(code @ 32601..=32660) => Crs::utm((code - 32600) as u8, false).to_proj4(),
            Crs::Epsg(code @ 32701..=32760) => Crs::utm((code - 32700) as u8, true).to_proj4(),
            Crs::Epsg(_) | Crs::Named(_) => None,
        }
    }

    /// OGC URN naming this CRS, if it has an authority code
    pub fn urn(&self) -> Option<String> {
        match self {
            Crs::Named(name) => {
                let (authority, code) = name.split_once(':')?;
                Some(format!("urn:ogc:def:crs:{}::{}", authority, code))
            }
            _ => self.epsg_code().map(|code| format!("urn:ogc:def:crs:EPSG::{}", code)),
        }
    }

    /// Definition string handed to PROJ when building a transform
    pub fn definition(&self) -> String {
        match self {
            Crs::Epsg(code) => format!("EPSG:{}", code),
            Crs::Named(name) => name.clone(),
            Crs::Proj4(definition) if proj_param(definition, "type").is_some() => {
                definition.clone()
            }
            Crs::Proj4(definition) => format!("{} +type=crs", definition),
        }
    }
}

impl fmt::Display for Crs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Crs::Epsg(code) => write!(f, "EPSG:{}", code),
            Crs::Named(text) | Crs::Proj4(text) => f.write_str(text),
        }
    }
}

impl FromStr for Crs {
    type Err = RastersError;

    fn from_str(s: &str) -> Result<Self> {
        Crs::parse(s)
    }
}

impl TryFrom<String> for Crs {
    type Error = RastersError;

    fn try_from(value: String) -> Result<Self> {
        Crs::parse(&value)
    }
}

impl From<Crs> for String {
    fn from(crs: Crs) -> Self {
        crs.to_string()
    }
}

/// Anything that can be resolved to a shared CRS value
pub trait IntoCrs {
    fn into_crs(self) -> Result<Arc<Crs>>;
}

impl IntoCrs for Crs {
    fn into_crs(self) -> Result<Arc<Crs>> {
        Ok(Arc::new(self))
    }
}

impl IntoCrs for &Crs {
    fn into_crs(self) -> Result<Arc<Crs>> {
        Ok(Arc::new(self.clone()))
    }
}

impl IntoCrs for Arc<Crs> {
    fn into_crs(self) -> Result<Arc<Crs>> {
        Ok(self)
    }
}

impl IntoCrs for &Arc<Crs> {
    fn into_crs(self) -> Result<Arc<Crs>> {
        Ok(Arc::clone(self))
    }
}

impl IntoCrs for &str {
    fn into_crs(self) -> Result<Arc<Crs>> {
        Crs::parse(self).map(Arc::new)
    }
}

impl IntoCrs for String {
    fn into_crs(self) -> Result<Arc<Crs>> {
        Crs::parse(&self).map(Arc::new)
    }
}

impl IntoCrs for u32 {
    fn into_crs(self) -> Result<Arc<Crs>> {
        Crs::parse(&self.to_string()).map(Arc::new)
    }
}

/// Look up a `+key=value` (or bare `+key`) parameter in a PROJ string
fn proj_param<'a>(definition: &'a str, key: &str) -> Option<&'a str> {
    definition
        .split_whitespace()
        .filter_map(|token| token.strip_prefix('+'))
        .find_map(|token| match token.split_once('=') {
            Some((name, value)) if name == key => Some(value),
            None if token == key => Some(""),
            _ => None,
        })
}

/// EPSG code from a `+init=epsg:<code>` PROJ string
fn init_epsg(definition: &str) -> Option<u32> {
    let init = proj_param(definition, "init")?;
    let (authority, code) = init.split_once(':')?;
    if !authority.eq_ignore_ascii_case("epsg") {
        return None;
    }
    code.parse().ok()
}

fn epsg_is_geographic(code: u32) -> bool {
    if GEOGRAPHIC_OUTSIDE_BLOCK.contains(&code) {
        return true;
    }
    (4001..=4999).contains(&code)
        && !GEOCENTRIC_IN_BLOCK.contains(&code)
        && !PROJECTED_IN_BLOCK.iter().any(|range| range.contains(&code))
}

fn is_wgs84_datum(definition: &str) -> bool {
    match proj_param(definition, "datum") {
        Some(datum) => datum.eq_ignore_ascii_case("WGS84"),
        None => proj_param(definition, "ellps")
            .map(|ellps| ellps.eq_ignore_ascii_case("WGS84"))
            .unwrap_or(false),
    }
}
