// SPDX-FileCopyrightText: 2026 Ritmo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Free-text campaign objectives mapped to a coarse category.
//!
//! Operators type objectives in Spanish or English; the category picks the
//! content template set. Matching is substring-based over a lowercase copy,
//! checked in declaration order, so an objective touching several themes
//! lands in the first one listed.

use strum::{Display, EnumString};

/// Coarse objective category keying a template set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString)]
#[strum(serialize_all = "snake_case")]
pub enum Category {
    Awareness,
    Engagement,
    Conversion,
    Branding,
    Default,
}

const AWARENESS_KEYWORDS: &[&str] = &[
    "awareness",
    "alcance",
    "visibilidad",
    "conocimiento",
    "notoriedad",
    "reach",
];

const ENGAGEMENT_KEYWORDS: &[&str] = &[
    "engagement",
    "interacción",
    "interaccion",
    "comunidad",
    "participación",
    "participacion",
    "community",
];

const CONVERSION_KEYWORDS: &[&str] = &[
    "conversión",
    "conversion",
    "ventas",
    "leads",
    "sales",
    "clientes nuevos",
];

const BRANDING_KEYWORDS: &[&str] = &[
    "branding",
    "marca",
    "identidad",
    "posicionamiento",
    "brand",
    "positioning",
];

/// Buckets an objective into its category; anything unrecognized falls
/// through to [`Category::Default`].
pub fn categorize(objective: &str) -> Category {
    let lowered = objective.to_lowercase();
    let matches = |keywords: &[&str]| keywords.iter().any(|keyword| lowered.contains(keyword));

    if matches(AWARENESS_KEYWORDS) {
        Category::Awareness
    } else if matches(ENGAGEMENT_KEYWORDS) {
        Category::Engagement
    } else if matches(CONVERSION_KEYWORDS) {
        Category::Conversion
    } else if matches(BRANDING_KEYWORDS) {
        Category::Branding
    } else {
        Category::Default
    }
}
