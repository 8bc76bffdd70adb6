use std::ops::RangeInclusive;

/// Narrativa pays by word-count band. Counts outside every band pay the fallback.
pub const NARRATIVA_BANDS: [(RangeInclusive<u32>, u32); 4] = [
    (300..=499, 300),
    (500..=999, 400),
    (1000..=1499, 500),
    (1500..=1999, 600),
];
pub const NARRATIVA_FALLBACK: u32 = 300;

/// `(exclusive upper bound, trazos)` tiers, checked in order
pub type Tiers = [(u32, u32)];

pub const DRABBLE_TIERS: [(u32, u32); 2] = [(150, 150), (200, 200)];
pub const DRABBLE_CEILING: u32 = 200;

pub const HILO_TIERS: [(u32, u32); 2] = [(5, 100), (10, 150)];
pub const HILO_CEILING: u32 = 150;

pub const ROL_TIERS: [(u32, u32); 4] = [(5, 250), (10, 400), (15, 550), (20, 700)];
pub const ROL_CEILING: u32 = 700;

pub const MICROCUENTO: u32 = 100;
pub const ENCUESTA: u32 = 100;
pub const COLLAGE: u32 = 150;
pub const POEMAS: u32 = 150;
pub const PINTURAS: u32 = 200;
pub const INTERPRETACION: u32 = 200;
pub const OTRO: u32 = 100;

/// Every value the scoring table can produce
pub const TRAZOS_VALUES: [u32; 10] = [100, 150, 200, 250, 300, 400, 500, 550, 600, 700];

pub fn banded(value: u32, bands: &[(RangeInclusive<u32>, u32)], fallback: u32) -> u32 {
    bands
        .iter()
        .find(|(band, _)| band.contains(&value))
        .map(|(_, trazos)| *trazos)
        .unwrap_or(fallback)
}

pub fn tiered(value: u32, tiers: &Tiers, ceiling: u32) -> u32 {
    tiers
        .iter()
        .find(|(upper, _)| value < *upper)
        .map(|(_, trazos)| *trazos)
        .unwrap_or(ceiling)
}
