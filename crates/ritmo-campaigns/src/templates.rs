// SPDX-FileCopyrightText: 2026 Ritmo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Canned post templates per objective category.
//!
//! Drafts are placeholders for the operator to edit before scheduling, so
//! the sets stay short and generic. `{client}` and `{week}` interpolate the
//! client name and the 1-based week number.

use crate::objective::Category;

const AWARENESS: &[&str] = &[
    "Descubre {client}: esto es lo que nos hace diferentes",
    "¿Todavía no conoces {client}? Semana {week}, te contamos nuestra historia",
    "{client} llega cada semana a más personas. Gracias por acompañarnos",
    "Semana {week}: comparte {client} con alguien que debería conocernos",
];

const ENGAGEMENT: &[&str] = &[
    "Pregunta de la semana {week}: cuéntanos tu experiencia con {client}",
    "Detrás de cámaras en {client}: así trabajamos",
    "Etiqueta a alguien con quien compartirías {client}",
    "Encuesta de {client}, semana {week}: tu opinión decide el próximo paso",
];

const CONVERSION: &[&str] = &[
    "Oferta de la semana {week} en {client}: solo por tiempo limitado",
    "Últimos días: {client} tiene algo preparado para ti",
    "¿Listo para dar el paso? {client} te espera",
    "Semana {week}: beneficio exclusivo para la comunidad de {client}",
];

const BRANDING: &[&str] = &[
    "Los valores de {client}: lo que defendemos todos los días",
    "La historia de {client}, capítulo semana {week}",
    "Así entiende el mundo {client}",
    "{client}: identidad y propósito, semana {week}",
];

const DEFAULT: &[&str] = &[
    "Novedades de {client}, semana {week}",
    "{client} trae contenido nuevo esta semana",
    "Semana {week} en {client}: esto es lo que viene",
    "Gracias por seguir de cerca a {client}",
];

pub fn templates_for(category: Category) -> &'static [&'static str] {
    match category {
        Category::Awareness => AWARENESS,
        Category::Engagement => ENGAGEMENT,
        Category::Conversion => CONVERSION,
        Category::Branding => BRANDING,
        Category::Default => DEFAULT,
    }
}

/// Content for the `index`-th post of a campaign, cycling through the
/// category's set.
pub fn render(category: Category, index: usize, client_name: &str, week: usize) -> String {
    let set = templates_for(category);
    set[index % set.len()]
        .replace("{client}", client_name)
        .replace("{week}", &week.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placeholders_interpolate() {
        let content = render(Category::Engagement, 0, "Cafetería Luna", 1);
        assert_eq!(
            content,
            "Pregunta de la semana 1: cuéntanos tu experiencia con Cafetería Luna"
        );
    }

    #[test]
    fn sets_cycle_past_their_length() {
        let first = render(Category::Default, 0, "Luna", 1);
        let wrapped = render(Category::Default, 4, "Luna", 3);
        // Same template, different week.
        assert_eq!(first, "Novedades de Luna, semana 1");
        assert_eq!(wrapped, "Novedades de Luna, semana 3");
    }

    #[test]
    fn every_set_has_content() {
        for category in [
            Category::Awareness,
            Category::Engagement,
            Category::Conversion,
            Category::Branding,
            Category::Default,
        ] {
            assert!(!templates_for(category).is_empty());
        }
    }
}
