//! Wizard step catalog: the six-question questionnaire shown to prospects.
//!
//! Option values are the categorical codes the diagnosis engine scores, so the
//! two must move together.

use serde::Serialize;

use crate::diagnosis::engine::{
    STEP_COMPANY_SIZE, STEP_DECISION_ROLE, STEP_INDUSTRY, STEP_PAIN_POINT, STEP_SITUATION,
    STEP_URGENCY,
};
use crate::diagnosis::language::{Language, Text};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionType {
    SingleChoice,
    Text,
}

#[derive(Debug)]
pub struct StepOption {
    pub value: &'static str,
    pub label: Text,
}

#[derive(Debug)]
pub struct WizardStep {
    pub step_number: u32,
    pub title: Text,
    pub description: Text,
    pub quick_win: Text,
    pub question_type: QuestionType,
    pub options: &'static [StepOption],
    pub placeholder: Option<Text>,
    pub is_required: bool,
}

/// A step rendered in one language for the client.
#[derive(Debug, Serialize)]
pub struct LocalizedStep {
    pub step_number: u32,
    pub title: &'static str,
    pub description: &'static str,
    pub quick_win: &'static str,
    pub question_type: QuestionType,
    pub options: Vec<LocalizedOption>,
    pub placeholder: Option<&'static str>,
    pub is_required: bool,
}

#[derive(Debug, Serialize)]
pub struct LocalizedOption {
    pub value: &'static str,
    pub label: &'static str,
}

impl WizardStep {
    pub fn localize(&self, language: Language) -> LocalizedStep {
        LocalizedStep {
            step_number: self.step_number,
            title: self.title.get(language),
            description: self.description.get(language),
            quick_win: self.quick_win.get(language),
            question_type: self.question_type,
            options: self
                .options
                .iter()
                .map(|o| LocalizedOption {
                    value: o.value,
                    label: o.label.get(language),
                })
                .collect(),
            placeholder: self.placeholder.map(|p| p.get(language)),
            is_required: self.is_required,
        }
    }
}

pub fn find_step(step_number: u32) -> Option<&'static WizardStep> {
    WIZARD_STEPS.iter().find(|s| s.step_number == step_number)
}

pub fn total_steps() -> u32 {
    WIZARD_STEPS.len() as u32
}

const fn opt(value: &'static str, en: &'static str, es: &'static str) -> StepOption {
    StepOption {
        value,
        label: Text::new(en, es),
    }
}

pub static WIZARD_STEPS: [WizardStep; 6] = [
    WizardStep {
        step_number: STEP_SITUATION,
        title: Text::new("What is your current situation?", "¿Cuál es tu situación actual?"),
        description: Text::new(
            "Select the option that best describes your current business situation",
            "Selecciona la opción que mejor describe tu situación empresarial actual",
        ),
        quick_win: Text::new(
            "73% of companies that clearly identify their situation implement solutions 2x faster.",
            "El 73% de las empresas que identifican su situación claramente logran implementar soluciones 2x más rápido.",
        ),
        question_type: QuestionType::SingleChoice,
        options: &[
            opt(
                "audits",
                "I have frequent audits (ESG, risk, compliance, AI, privacy)",
                "Tengo auditorías frecuentes (ESG, riesgos, compliance, IA, privacidad)",
            ),
            opt(
                "expansion",
                "I want to expand operations to another country/market",
                "Quiero expandir operaciones a otro país/mercado",
            ),
            opt(
                "tenders",
                "I frequently participate in tenders",
                "Me presento a licitaciones frecuentemente",
            ),
            opt(
                "due_diligence",
                "I need to prepare for a due diligence",
                "Necesito prepararme para una due diligence",
            ),
            opt(
                "contracts",
                "I supervise multiple contracts in execution",
                "Superviso múltiples contratos en ejecución",
            ),
            opt(
                "sensitive_contract",
                "I'm about to sign a sensitive/important contract",
                "Voy a firmar un contrato delicado/importante",
            ),
        ],
        placeholder: None,
        is_required: true,
    },
    WizardStep {
        step_number: STEP_COMPANY_SIZE,
        title: Text::new(
            "What is your organization size?",
            "¿Cuál es el tamaño de tu organización?",
        ),
        description: Text::new(
            "This helps us tailor our recommendations to your scale",
            "Esto nos ayuda a adaptar nuestras recomendaciones a tu escala",
        ),
        quick_win: Text::new(
            "Correctly sized compliance solutions reduce operational costs by up to 40%.",
            "Las soluciones de compliance correctamente dimensionadas reducen costos operativos hasta un 40%.",
        ),
        question_type: QuestionType::SingleChoice,
        options: &[
            opt("startup", "Startup (1-10 employees)", "Startup (1-10 empleados)"),
            opt("pyme", "SMB (11-100 employees)", "PyME (11-100 empleados)"),
            opt(
                "midmarket",
                "Midmarket (101-500 employees)",
                "Midmarket (101-500 empleados)",
            ),
            opt(
                "enterprise",
                "Enterprise (500+ employees)",
                "Enterprise (500+ empleados)",
            ),
        ],
        placeholder: None,
        is_required: true,
    },
    WizardStep {
        step_number: STEP_INDUSTRY,
        title: Text::new("What industry do you operate in?", "¿En qué industria operas?"),
        description: Text::new(
            "Each industry has specific regulatory requirements",
            "Cada industria tiene requisitos regulatorios específicos",
        ),
        quick_win: Text::new(
            "Each industry has specific regulatory requirements. Identifying them early avoids 65% of compliance issues.",
            "Cada industria tiene requisitos regulatorios específicos. Identificarlos temprano evita el 65% de los problemas de compliance.",
        ),
        question_type: QuestionType::SingleChoice,
        options: &[
            opt(
                "finance",
                "Financial Services / Banking",
                "Servicios Financieros / Banca",
            ),
            opt("tech", "Technology / Software", "Tecnología / Software"),
            opt("legal", "Legal / Law Firms", "Legal / Estudios Jurídicos"),
            opt("accounting", "Accounting / Audit", "Contabilidad / Auditoría"),
            opt("healthcare", "Healthcare / Pharma", "Salud / Pharma"),
            opt(
                "manufacturing",
                "Manufacturing / Industry",
                "Manufactura / Industria",
            ),
            opt(
                "public",
                "Public Sector / Government",
                "Sector Público / Gobierno",
            ),
            opt("other", "Other industry", "Otra industria"),
        ],
        placeholder: None,
        is_required: true,
    },
    WizardStep {
        step_number: STEP_PAIN_POINT,
        title: Text::new(
            "What is your main pain point?",
            "¿Cuál es tu principal dolor actual?",
        ),
        description: Text::new(
            "Describe your main challenge in compliance or governance",
            "Describe tu principal desafío de compliance o gobernanza",
        ),
        quick_win: Text::new(
            "Defining the problem correctly is 50% of the solution. Companies that do this implement 3x more successfully.",
            "Definir el problema correctamente es el 50% de la solución. Las empresas que lo hacen implementan 3x más exitosamente.",
        ),
        question_type: QuestionType::Text,
        options: &[],
        placeholder: Some(Text::new(
            "Briefly describe your main compliance or governance challenge...",
            "Describe brevemente tu principal desafío de compliance o gobernanza...",
        )),
        is_required: true,
    },
    WizardStep {
        step_number: STEP_URGENCY,
        title: Text::new(
            "How urgent is it to solve this?",
            "¿Qué tan urgente es resolver esto?",
        ),
        description: Text::new(
            "Understanding your timeline helps us prioritize",
            "Entender tu timeline nos ayuda a priorizar",
        ),
        quick_win: Text::new(
            "82% of companies that act within the first month achieve better results than those that wait.",
            "El 82% de las empresas que actúan dentro del primer mes logran mejores resultados que las que esperan.",
        ),
        question_type: QuestionType::SingleChoice,
        options: &[
            opt(
                "immediate",
                "Immediate (less than 1 month)",
                "Inmediato (menos de 1 mes)",
            ),
            opt("short", "Short term (1-3 months)", "Corto plazo (1-3 meses)"),
            opt("medium", "Medium term (3-6 months)", "Mediano plazo (3-6 meses)"),
            opt(
                "exploring",
                "I'm exploring options",
                "Estoy explorando opciones",
            ),
        ],
        placeholder: None,
        is_required: true,
    },
    WizardStep {
        step_number: STEP_DECISION_ROLE,
        title: Text::new(
            "Are you the decision maker or influencer?",
            "¿Eres el decisor o influenciador?",
        ),
        description: Text::new(
            "Understanding your role helps us tailor the proposal",
            "Entender tu rol nos ayuda a diseñar la propuesta perfecta",
        ),
        quick_win: Text::new(
            "Understanding the decision process allows us to design the perfect proposal for your context.",
            "Entender el proceso de decisión nos permite diseñar la propuesta perfecta para tu contexto.",
        ),
        question_type: QuestionType::SingleChoice,
        options: &[
            opt(
                "decision_maker",
                "I'm the final decision maker",
                "Soy el decisor final",
            ),
            opt(
                "influencer",
                "I influence the decision",
                "Influyo en la decisión",
            ),
            opt(
                "evaluator",
                "I'm evaluating to recommend",
                "Estoy evaluando para recomendar",
            ),
            opt(
                "researcher",
                "I'm researching options",
                "Estoy investigando opciones",
            ),
        ],
        placeholder: None,
        is_required: true,
    },
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnosis::catalog::Situation;
    use crate::diagnosis::scoring::{ScoreTable, COMPANY_SIZE, DECISION_ROLE, INDUSTRY_FIT, URGENCY};

    fn option_values(step: u32) -> Vec<&'static str> {
        find_step(step)
            .unwrap()
            .options
            .iter()
            .map(|o| o.value)
            .collect()
    }

    fn table_codes(table: &ScoreTable) -> Vec<&'static str> {
        table.entries.iter().map(|(code, _)| *code).collect()
    }

    #[test]
    fn test_steps_are_numbered_one_to_six() {
        let numbers: Vec<u32> = WIZARD_STEPS.iter().map(|s| s.step_number).collect();
        assert_eq!(numbers, vec![1, 2, 3, 4, 5, 6]);
        assert_eq!(total_steps(), 6);
    }

    #[test]
    fn test_situation_options_match_catalog() {
        let codes: Vec<&str> = Situation::ALL.iter().map(|s| s.code()).collect();
        assert_eq!(option_values(STEP_SITUATION), codes);
    }

    #[test]
    fn test_choice_options_are_scored_by_engine_tables() {
        for (step, table) in [
            (STEP_COMPANY_SIZE, &COMPANY_SIZE),
            (STEP_URGENCY, &URGENCY),
            (STEP_DECISION_ROLE, &DECISION_ROLE),
        ] {
            assert_eq!(option_values(step), table_codes(table), "step {step}");
        }
        let industries = table_codes(&INDUSTRY_FIT);
        for value in option_values(STEP_INDUSTRY) {
            assert!(industries.contains(&value), "industry {value} is not scored");
        }
    }

    #[test]
    fn test_pain_point_step_is_free_text() {
        let step = find_step(STEP_PAIN_POINT).unwrap();
        assert_eq!(step.question_type, QuestionType::Text);
        assert!(step.options.is_empty());
        assert!(step.placeholder.is_some());
    }

    #[test]
    fn test_localize_picks_requested_language() {
        let step = find_step(STEP_URGENCY).unwrap();
        let en = step.localize(Language::En);
        let es = step.localize(Language::Es);
        assert_eq!(en.title, "How urgent is it to solve this?");
        assert_eq!(es.title, "¿Qué tan urgente es resolver esto?");
        assert_eq!(es.options[0].value, "immediate");
        assert_eq!(es.options[0].label, "Inmediato (menos de 1 mes)");
    }

    #[test]
    fn test_unknown_step_not_found() {
        assert!(find_step(0).is_none());
        assert!(find_step(7).is_none());
    }
}
