// src/domain/region.rs

use crate::pipeline::PipelineError;

pub const MAX_LIMIT: u32 = 200;

/// How many codes on each side of the primary region the ring covers.
const RING_STEPS: u32 = 2;
const ZIP_DIGITS: usize = 5;

/// One request's region scope: the primary code, the provider page size, and
/// the neighbours to fall back on when the primary region is thin.
#[derive(Debug, Clone, PartialEq)]
pub struct RegionQuery {
    pub primary_region: String,
    pub limit: u32,
    pub expansion_ring: Vec<String>,
}

impl RegionQuery {
    /// Validates the region code and derives its expansion ring.
    ///
    /// Accepts five-digit ZIPs and ZIP+4. ZIP+4 codes get an empty ring since
    /// they have no numeric neighbours. `limit` is clamped to 1..=200.
    pub fn new(region: &str, limit: u32) -> Result<Self, PipelineError> {
        let region = region.trim();
        let zip = parse_region(region)?;

        let expansion_ring = match zip {
            Some(zip) => ring_around(zip),
            None => Vec::new(),
        };

        Ok(Self {
            primary_region: region.to_string(),
            limit: limit.clamp(1, MAX_LIMIT),
            expansion_ring,
        })
    }
}

/// Returns the numeric ZIP for five-digit codes, `None` for ZIP+4.
fn parse_region(region: &str) -> Result<Option<u32>, PipelineError> {
    let invalid = || PipelineError::InvalidRegion(region.to_string());

    let (base, plus4) = match region.split_once('-') {
        Some((base, plus4)) => (base, Some(plus4)),
        None => (region, None),
    };

    if !is_digits(base, ZIP_DIGITS) {
        return Err(invalid());
    }

    match plus4 {
        None => base.parse().map(Some).map_err(|_| invalid()),
        Some(p) if is_digits(p, 4) => Ok(None),
        Some(_) => Err(invalid()),
    }
}

fn is_digits(s: &str, len: usize) -> bool {
    s.len() == len && s.bytes().all(|b| b.is_ascii_digit())
}

/// `z-2, z-1, z+1, z+2`, zero-padded, skipping codes outside 00000..=99999.
fn ring_around(zip: u32) -> Vec<String> {
    let max = 10u32.pow(ZIP_DIGITS as u32) - 1;
    let below = (1..=RING_STEPS).rev().filter_map(|step| zip.checked_sub(step));
    let above = (1..=RING_STEPS).map(|step| zip + step).filter(|z| *z <= max);

    below
        .chain(above)
        .map(|z| format!("{z:0width$}", width = ZIP_DIGITS))
        .collect()
}
