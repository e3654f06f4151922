//! Narrative text: summary, pitch, features and next steps rendered from the
//! resolved solution profile into fixed bilingual templates.

use crate::diagnosis::catalog::SolutionProfile;
use crate::diagnosis::language::{Language, Localized};

/// Pitch tier selected from the step-5 urgency answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PitchTier {
    Immediate,
    Short,
    Relaxed,
}

impl PitchTier {
    pub fn from_urgency(urgency: Option<&str>) -> Self {
        match urgency {
            Some("immediate") => PitchTier::Immediate,
            Some("short") => PitchTier::Short,
            _ => PitchTier::Relaxed,
        }
    }
}

/// Profile answers interpolated into the summary.
#[derive(Debug, Clone, Copy, Default)]
pub struct SummaryInputs<'a> {
    pub company_size: Option<&'a str>,
    pub industry: Option<&'a str>,
    pub pain_point: Option<&'a str>,
}

pub fn build_summary(profile: &SolutionProfile, inputs: SummaryInputs<'_>) -> Localized {
    let company_size = non_empty(inputs.company_size);
    let industry = non_empty(inputs.industry);
    let pain_point = non_empty(inputs.pain_point);

    Localized::render(|lang| {
        let title = profile.title.get(lang);
        let description = profile.description.get(lang);
        match lang {
            Language::En => {
                let mut summary = format!(
                    "Based on your current situation ({title}), your organization size ({}) and industry ({}), we've identified that {description}",
                    company_size.unwrap_or("company"),
                    industry.unwrap_or("your industry"),
                );
                if let Some(pain) = pain_point {
                    summary.push_str(&format!(
                        " This will directly address your main challenge: {pain}"
                    ));
                }
                summary
            }
            Language::Es => {
                let mut summary = format!(
                    "Basándose en tu situación actual ({title}), el tamaño de tu organización ({}) y tu industria ({}), hemos identificado que {description}",
                    company_size.unwrap_or("empresa"),
                    industry.unwrap_or("tu industria"),
                );
                if let Some(pain) = pain_point {
                    summary.push_str(&format!(
                        " Esto abordará directamente tu principal desafío: {pain}"
                    ));
                }
                summary
            }
        }
    })
}

pub fn build_pitch(profile: &SolutionProfile, tier: PitchTier) -> Localized {
    Localized::render(|lang| {
        let title = profile.title.get(lang);
        match (lang, tier) {
            (Language::En, PitchTier::Immediate) => format!(
                "We understand your need is urgent. {title} can be operational in less than a week, allowing you to address your situation immediately."
            ),
            (Language::En, PitchTier::Short) => format!(
                "{title} will allow you to organize and be prepared in the short term. We can start implementation this week."
            ),
            (Language::En, PitchTier::Relaxed) => format!(
                "You have time to evaluate options, and {title} is the ideal solution for your context. Schedule a no-commitment demo."
            ),
            (Language::Es, PitchTier::Immediate) => format!(
                "Entendemos que tu necesidad es urgente. {title} puede estar operativo en menos de una semana, permitiéndote abordar tu situación inmediatamente."
            ),
            (Language::Es, PitchTier::Short) => format!(
                "{title} te permitirá organizarte y estar preparado en el corto plazo. Podemos comenzar la implementación esta semana."
            ),
            (Language::Es, PitchTier::Relaxed) => format!(
                "Tienes tiempo para evaluar opciones, y {title} es la solución ideal para tu contexto. Agenda una demo sin compromiso."
            ),
        }
    })
}

pub fn build_features(profile: &SolutionProfile) -> Vec<Localized> {
    profile.features.iter().map(|t| t.to_localized()).collect()
}

pub fn build_next_steps(profile: &SolutionProfile) -> Vec<Localized> {
    profile.next_steps.iter().map(|t| t.to_localized()).collect()
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}
