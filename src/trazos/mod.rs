//! Trazos scoring engine.
//!
//! A pure function from activity attributes to the points the activity earns.
//! The table is the contract every ranking depends on; values and boundaries
//! must not change.

mod activity_type;
pub mod rules;


pub use activity_type::ActivityType;

use rules::{
    banded, tiered, COLLAGE, DRABBLE_CEILING, DRABBLE_TIERS, ENCUESTA, HILO_CEILING, HILO_TIERS,
    INTERPRETACION, MICROCUENTO, NARRATIVA_BANDS, NARRATIVA_FALLBACK, OTRO, PINTURAS, POEMAS,
    ROL_CEILING, ROL_TIERS,
};

/// Computes the trazos earned by an activity.
///
/// `words` and `responses` are assumed already validated as non-negative;
/// callers that have no response count pass 0.
pub fn compute_trazos(activity_type: ActivityType, words: u32, responses: u32) -> u32 {
    match activity_type {
        ActivityType::Narrativa => banded(words, &NARRATIVA_BANDS, NARRATIVA_FALLBACK),
        ActivityType::Microcuento => MICROCUENTO,
        ActivityType::Drabble => tiered(words, &DRABBLE_TIERS, DRABBLE_CEILING),
        ActivityType::Hilo => tiered(responses, &HILO_TIERS, HILO_CEILING),
        ActivityType::Rol => tiered(responses, &ROL_TIERS, ROL_CEILING),
        ActivityType::Encuesta => ENCUESTA,
        ActivityType::Collage => COLLAGE,
        ActivityType::Poemas => POEMAS,
        ActivityType::Pinturas => PINTURAS,
        ActivityType::Interpretacion => INTERPRETACION,
        // Fallback arm: unrecognized labels are parsed into `Otro` and land here
        ActivityType::Otro => OTRO,
    }
}

/// Scores a free-form category label, as used by the preview endpoint.
pub fn compute_trazos_for_label(label: &str, words: u32, responses: Option<u32>) -> u32 {
    compute_trazos(
        ActivityType::from_label(label),
        words,
        responses.unwrap_or_default(),
    )
}
