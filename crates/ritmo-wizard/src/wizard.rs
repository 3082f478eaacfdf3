// SPDX-FileCopyrightText: 2026 Ritmo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The wizard engine: a draft, a current step, and per-step gates.
//!
//! The engine holds no I/O. The binary renders prompts, writes operator
//! answers into the draft, and calls [`ClientWizard::advance`]; the gate
//! for the current step either lets the move happen or names what is
//! missing. Completing the final step yields the [`NewClient`] insert
//! payload.

use ritmo_core::{ClientStatus, NewClient};
use thiserror::Error;

use crate::steps::WizardStep;

/// A brief shorter than this (counted in characters, not bytes) blocks
/// step four.
pub const MIN_BRIEF_CHARS: usize = 50;

/// Form state accumulated across the steps. Empty strings mean "not
/// answered"; trimming and optional-field mapping happen when the draft
/// becomes a [`NewClient`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClientDraft {
    pub name: String,
    pub industry: String,
    pub website: String,
    /// Optional URL; the console does not upload files.
    pub logo_url: String,
    pub brief: String,
}

impl ClientDraft {
    fn brief_chars(&self) -> usize {
        self.brief.trim().chars().count()
    }

    fn to_new_client(&self) -> NewClient {
        let industry = self.industry.trim();
        let website = self.website.trim();
        let logo_url = self.logo_url.trim();
        let brief = self.brief.trim();
        NewClient {
            name: self.name.trim().to_string(),
            industry: if industry.is_empty() {
                "Otros".to_string()
            } else {
                industry.to_string()
            },
            website: (!website.is_empty()).then(|| website.to_string()),
            logo_url: (!logo_url.is_empty()).then(|| logo_url.to_string()),
            brief: (!brief.is_empty()).then(|| brief.to_string()),
            status: ClientStatus::Active,
        }
    }
}

/// The current step's gate failed; `requirements` names what is missing.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("el paso \"{}\" está incompleto: {}", step.title(), requirements.join(", "))]
pub struct IncompleteStep {
    pub step: WizardStep,
    pub requirements: Vec<String>,
}

/// What [`ClientWizard::advance`] did.
#[derive(Debug, Clone, PartialEq)]
pub enum Advance {
    /// Moved forward to this step.
    Moved(WizardStep),
    /// The final step confirmed; this is the insert payload.
    Complete(NewClient),
}

/// Client-creation wizard state machine.
#[derive(Debug, Clone, Default)]
pub struct ClientWizard {
    step: WizardStep,
    draft: ClientDraft,
}

impl ClientWizard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn draft(&self) -> &ClientDraft {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut ClientDraft {
        &mut self.draft
    }

    /// What the current step still needs before `advance` will move.
    pub fn missing_requirements(&self) -> Vec<String> {
        let mut missing = Vec::new();
        match self.step {
            WizardStep::BasicInfo => {
                if self.draft.name.trim().is_empty() {
                    missing.push("el nombre del cliente".to_string());
                }
                if self.draft.industry.trim().is_empty() {
                    missing.push("la industria".to_string());
                }
            }
            WizardStep::DigitalPresence => {
                if self.draft.website.trim().is_empty() {
                    missing.push("el sitio web".to_string());
                }
            }
            WizardStep::VisualIdentity => {}
            WizardStep::InitialBrief => {
                let chars = self.draft.brief_chars();
                if chars < MIN_BRIEF_CHARS {
                    missing.push(format!(
                        "un brief de al menos {MIN_BRIEF_CHARS} caracteres (lleva {chars})"
                    ));
                }
            }
            WizardStep::Confirmation => {}
        }
        missing
    }

    pub fn can_proceed(&self) -> bool {
        self.missing_requirements().is_empty()
    }

    /// Move to the next step, or complete the wizard from the last one.
    /// A failing gate leaves the step where it is.
    pub fn advance(&mut self) -> Result<Advance, IncompleteStep> {
        let requirements = self.missing_requirements();
        if !requirements.is_empty() {
            return Err(IncompleteStep {
                step: self.step,
                requirements,
            });
        }
        match self.step.next() {
            Some(next) => {
                self.step = next;
                Ok(Advance::Moved(next))
            }
            None => Ok(Advance::Complete(self.draft.to_new_client())),
        }
    }

    /// Move one step back. Never validates; going back from the first step
    /// stays put.
    pub fn back(&mut self) -> WizardStep {
        if let Some(previous) = self.step.previous() {
            self.step = previous;
        }
        self.step
    }
}
