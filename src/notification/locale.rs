//! Fixed localization tables.
//!
//! Kept as data so supporting another language only means adding rows.

use crate::incident::{Action, Language, Risk};

const STATE_LABELS: &[(Action, Language, &str)] = &[
    (Action::Created, Language::Es, "creado"),
    (Action::Created, Language::Pt, "criado"),
    (Action::Escalated, Language::Es, "escalado"),
    (Action::Escalated, Language::Pt, "escalado"),
    (Action::Closed, Language::Es, "cerrado"),
    (Action::Closed, Language::Pt, "fechado"),
];

const RISK_LABELS: &[(Risk, Language, &str)] = &[
    (Risk::High, Language::Es, "Alto"),
    (Risk::High, Language::Pt, "Alto"),
    (Risk::Medium, Language::Es, "Medio"),
    (Risk::Medium, Language::Pt, "Médio"),
    (Risk::Low, Language::Es, "Bajo"),
    (Risk::Low, Language::Pt, "Baixo"),
];

const RISK_SUBJECT_PREFIXES: &[(Language, &str)] = &[
    (Language::Es, "Riesgo actualizado"),
    (Language::Pt, "Risco atualizado"),
];

/// Human-readable incident state for an action, if it denotes one
pub fn state_label(action: Action, language: Language) -> Option<&'static str> {
    STATE_LABELS
        .iter()
        .find(|(a, l, _)| *a == action && *l == language)
        .map(|(_, _, label)| *label)
}

pub fn risk_label(risk: Risk, language: Language) -> Option<&'static str> {
    RISK_LABELS
        .iter()
        .find(|(r, l, _)| *r == risk && *l == language)
        .map(|(_, _, label)| *label)
}

pub fn risk_subject_prefix(language: Language) -> Option<&'static str> {
    RISK_SUBJECT_PREFIXES
        .iter()
        .find(|(l, _)| *l == language)
        .map(|(_, prefix)| *prefix)
}
