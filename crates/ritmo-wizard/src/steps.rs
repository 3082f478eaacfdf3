// SPDX-FileCopyrightText: 2026 Ritmo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The five ordered wizard steps and the fixed industry list.

use strum::EnumIter;

/// Industries offered in step one. Free choice is deliberate only through
/// "Otros".
pub const INDUSTRIES: [&str; 11] = [
    "Tecnología / Software",
    "E-commerce",
    "Salud / Bienestar",
    "Educación",
    "Finanzas",
    "Inmobiliaria",
    "Hostelería / Turismo",
    "Moda / Lifestyle",
    "Alimentación",
    "Servicios Profesionales",
    "Otros",
];

/// One of the five wizard screens, in order. A fresh wizard starts on
/// [`WizardStep::BasicInfo`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, EnumIter)]
pub enum WizardStep {
    #[default]
    BasicInfo,
    DigitalPresence,
    VisualIdentity,
    InitialBrief,
    Confirmation,
}

impl WizardStep {
    pub const COUNT: usize = 5;

    /// Spanish screen title, as shown in the step header.
    pub fn title(&self) -> &'static str {
        match self {
            WizardStep::BasicInfo => "Información Básica",
            WizardStep::DigitalPresence => "Presencia Digital",
            WizardStep::VisualIdentity => "Identidad Visual",
            WizardStep::InitialBrief => "Brief Inicial",
            WizardStep::Confirmation => "Confirmación",
        }
    }

    /// 1-based position for "Paso N de 5" headers.
    pub fn number(&self) -> usize {
        *self as usize + 1
    }

    pub fn next(&self) -> Option<WizardStep> {
        match self {
            WizardStep::BasicInfo => Some(WizardStep::DigitalPresence),
            WizardStep::DigitalPresence => Some(WizardStep::VisualIdentity),
            WizardStep::VisualIdentity => Some(WizardStep::InitialBrief),
            WizardStep::InitialBrief => Some(WizardStep::Confirmation),
            WizardStep::Confirmation => None,
        }
    }

    pub fn previous(&self) -> Option<WizardStep> {
        match self {
            WizardStep::BasicInfo => None,
            WizardStep::DigitalPresence => Some(WizardStep::BasicInfo),
            WizardStep::VisualIdentity => Some(WizardStep::DigitalPresence),
            WizardStep::InitialBrief => Some(WizardStep::VisualIdentity),
            WizardStep::Confirmation => Some(WizardStep::InitialBrief),
        }
    }
}

#[cfg(test)]
mod tests {
    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn steps_are_ordered_and_numbered() {
        let steps: Vec<WizardStep> = WizardStep::iter().collect();
        assert_eq!(steps.len(), WizardStep::COUNT);
        assert_eq!(steps[0], WizardStep::BasicInfo);
        assert_eq!(steps[4], WizardStep::Confirmation);
        assert_eq!(steps[0].number(), 1);
        assert_eq!(steps[4].number(), 5);
    }

    #[test]
    fn next_and_previous_walk_the_chain() {
        assert_eq!(WizardStep::BasicInfo.next(), Some(WizardStep::DigitalPresence));
        assert_eq!(WizardStep::Confirmation.next(), None);
        assert_eq!(WizardStep::BasicInfo.previous(), None);
        assert_eq!(WizardStep::Confirmation.previous(), Some(WizardStep::InitialBrief));
    }

    #[test]
    fn industries_end_with_the_catch_all() {
        assert_eq!(INDUSTRIES.len(), 11);
        assert_eq!(INDUSTRIES[10], "Otros");
    }
}
