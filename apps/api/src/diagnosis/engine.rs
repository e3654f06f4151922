//! Diagnosis Engine: maps a completed set of wizard answers to a recommendation.
//!
//! Pure and synchronous: no I/O, no shared state, no logging. The same answers
//! always produce an identical `DiagnosisResult`.
//!
//! Computation order:
//! 1. primary solution from the step-1 situation (default `audits`)
//! 2. secondary solutions (industry rule, then size rule, max 2, never the primary)
//! 3. urgency score from step 5
//! 4. fit score blended from steps 2, 3 and 6
//! 5. bilingual summary / pitch / features / next steps
//! 6. pain points from the step-4 free text

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::diagnosis::catalog::{Situation, Solution};
use crate::diagnosis::language::Localized;
use crate::diagnosis::narrative::{
    build_features, build_next_steps, build_pitch, build_summary, PitchTier, SummaryInputs,
};
use crate::diagnosis::scoring::{compute_fit_score, compute_urgency_score};

pub const STEP_SITUATION: u32 = 1;
pub const STEP_COMPANY_SIZE: u32 = 2;
pub const STEP_INDUSTRY: u32 = 3;
pub const STEP_PAIN_POINT: u32 = 4;
pub const STEP_URGENCY: u32 = 5;
pub const STEP_DECISION_ROLE: u32 = 6;

const MAX_SECONDARY_SOLUTIONS: usize = 2;

/// Industries that regularly face audits.
const AUDIT_HEAVY_INDUSTRIES: &[&str] = &["finance", "legal", "accounting"];
/// Company sizes large enough to run many contracts at once.
const CONTRACT_HEAVY_SIZES: &[&str] = &["midmarket", "enterprise"];

/// One recorded answer to a wizard step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WizardAnswer {
    pub step_number: u32,
    pub value: String,
    #[serde(default)]
    pub auxiliary_data: serde_json::Map<String, serde_json::Value>,
}

impl WizardAnswer {
    pub fn new(step_number: u32, value: impl Into<String>) -> Self {
        Self {
            step_number,
            value: value.into(),
            auxiliary_data: serde_json::Map::new(),
        }
    }
}

/// Engine output. Immutable once produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiagnosisResult {
    pub primary_solution: Solution,
    pub secondary_solutions: Vec<Solution>,
    pub diagnosis_summary: Localized,
    pub pain_points: Vec<String>,
    pub recommended_features: Vec<Localized>,
    pub urgency_score: u8,
    pub fit_score: u8,
    pub personalized_pitch: Localized,
    pub next_steps: Vec<Localized>,
}

/// Answers indexed by step number. Later answers for the same step win.
struct AnswerSet<'a> {
    by_step: HashMap<u32, &'a str>,
}

impl<'a> AnswerSet<'a> {
    fn new(answers: &'a [WizardAnswer]) -> Self {
        let by_step = answers
            .iter()
            .map(|a| (a.step_number, a.value.as_str()))
            .collect();
        Self { by_step }
    }

    fn get(&self, step: u32) -> Option<&'a str> {
        self.by_step.get(&step).copied()
    }
}

/// Produces the diagnosis for a set of wizard answers.
///
/// Missing or unrecognised answers never fail: the situation falls back to
/// `audits` and every score lookup falls back to a weight of 5. Completeness of
/// the answer set is the caller's responsibility.
pub fn generate_diagnosis(answers: &[WizardAnswer]) -> DiagnosisResult {
    let answers = AnswerSet::new(answers);

    let situation = resolve_situation(answers.get(STEP_SITUATION));
    let profile = situation.profile();
    let primary_solution = profile.solution;

    let company_size = answers.get(STEP_COMPANY_SIZE);
    let industry = answers.get(STEP_INDUSTRY);
    let pain_point = answers.get(STEP_PAIN_POINT);
    let urgency = answers.get(STEP_URGENCY);
    let decision_role = answers.get(STEP_DECISION_ROLE);

    let secondary_solutions = select_secondary_solutions(primary_solution, industry, company_size);
    let urgency_score = compute_urgency_score(urgency);
    let fit_score = compute_fit_score(company_size, industry, decision_role);

    let diagnosis_summary = build_summary(
        profile,
        SummaryInputs {
            company_size,
            industry,
            pain_point,
        },
    );
    let personalized_pitch = build_pitch(profile, PitchTier::from_urgency(urgency));

    let pain_points = pain_point
        .filter(|p| !p.is_empty())
        .map(|p| vec![p.to_string()])
        .unwrap_or_default();

    DiagnosisResult {
        primary_solution,
        secondary_solutions,
        diagnosis_summary,
        pain_points,
        recommended_features: build_features(profile),
        urgency_score,
        fit_score,
        personalized_pitch,
        next_steps: build_next_steps(profile),
    }
}

/// Step-1 value → situation; absent or unknown codes resolve to `audits`.
pub fn resolve_situation(value: Option<&str>) -> Situation {
    value
        .and_then(Situation::from_code)
        .unwrap_or(Situation::Audits)
}

/// Rule-based complementary solutions, evaluated industry rule first, then size rule.
fn select_secondary_solutions(
    primary: Solution,
    industry: Option<&str>,
    company_size: Option<&str>,
) -> Vec<Solution> {
    let mut secondary = Vec::with_capacity(MAX_SECONDARY_SOLUTIONS);

    if industry.is_some_and(|i| AUDIT_HEAVY_INDUSTRIES.contains(&i))
        && primary != Solution::DataRoomAudit
    {
        secondary.push(Solution::DataRoomAudit);
    }

    if company_size.is_some_and(|s| CONTRACT_HEAVY_SIZES.contains(&s))
        && primary != Solution::DealVisor
    {
        secondary.push(Solution::DealVisor);
    }

    secondary.truncate(MAX_SECONDARY_SOLUTIONS);
    secondary
}

#[cfg(test)]
mod tests {
    use super::*;

    fn answers(values: &[(u32, &str)]) -> Vec<WizardAnswer> {
        values
            .iter()
            .map(|(step, value)| WizardAnswer::new(*step, *value))
            .collect()
    }

    fn full_answers(situation: &str, size: &str, industry: &str) -> Vec<WizardAnswer> {
        answers(&[
            (1, situation),
            (2, size),
            (3, industry),
            (4, "Documents everywhere"),
            (5, "medium"),
            (6, "influencer"),
        ])
    }

    #[test]
    fn test_primary_solution_matches_catalog_for_every_situation() {
        for situation in Situation::ALL {
            let result = generate_diagnosis(&answers(&[(1, situation.code())]));
            assert_eq!(result.primary_solution, situation.profile().solution);
        }
    }

    #[test]
    fn test_unknown_situation_defaults_to_audit_solution() {
        let result = generate_diagnosis(&answers(&[(1, "mergers")]));
        assert_eq!(result.primary_solution, Solution::DataRoomAudit);
    }

    #[test]
    fn test_missing_situation_defaults_to_audit_solution() {
        let result = generate_diagnosis(&answers(&[
            (2, "pyme"),
            (3, "tech"),
            (5, "short"),
            (6, "evaluator"),
        ]));
        assert_eq!(result.primary_solution, Solution::DataRoomAudit);
        assert!(result.diagnosis_summary.en.contains("(Data Room for Audits)"));
    }

    #[test]
    fn test_empty_answers_fully_defaulted() {
        let result = generate_diagnosis(&[]);
        assert_eq!(result.primary_solution, Solution::DataRoomAudit);
        assert!(result.secondary_solutions.is_empty());
        assert_eq!(result.urgency_score, 5);
        assert_eq!(result.fit_score, 5);
        assert!(result.pain_points.is_empty());
        assert_eq!(result.recommended_features.len(), 5);
        assert_eq!(result.next_steps.len(), 3);
    }

    #[test]
    fn test_sensitive_contract_enterprise_legal_scenario() {
        let result = generate_diagnosis(&answers(&[
            (1, "sensitive_contract"),
            (2, "enterprise"),
            (3, "legal"),
            (4, "Contract visibility is poor"),
            (5, "immediate"),
            (6, "decision_maker"),
        ]));
        assert_eq!(result.primary_solution, Solution::SmartDataRoom);
        assert_eq!(
            result.secondary_solutions,
            vec![Solution::DataRoomAudit, Solution::DealVisor]
        );
        assert_eq!(result.urgency_score, 10);
        assert_eq!(result.fit_score, 10);
        assert_eq!(result.pain_points, vec!["Contract visibility is poor".to_string()]);
        assert!(result
            .personalized_pitch
            .en
            .starts_with("We understand your need is urgent."));
    }

    #[test]
    fn test_audits_startup_exploring_scenario() {
        let result = generate_diagnosis(&answers(&[
            (1, "audits"),
            (2, "startup"),
            (3, "other"),
            (4, ""),
            (5, "exploring"),
            (6, "researcher"),
        ]));
        assert_eq!(result.primary_solution, Solution::DataRoomAudit);
        assert!(result.secondary_solutions.is_empty());
        assert_eq!(result.urgency_score, 2);
        assert_eq!(result.fit_score, 4);
        assert!(result.pain_points.is_empty());
    }

    #[test]
    fn test_industry_rule_suppressed_when_primary_is_audit() {
        let result = generate_diagnosis(&full_answers("audits", "enterprise", "finance"));
        assert_eq!(result.secondary_solutions, vec![Solution::DealVisor]);
    }

    #[test]
    fn test_size_rule_suppressed_when_primary_is_deal_visor() {
        let result = generate_diagnosis(&full_answers("contracts", "midmarket", "accounting"));
        assert_eq!(result.primary_solution, Solution::DealVisor);
        assert_eq!(result.secondary_solutions, vec![Solution::DataRoomAudit]);
    }

    #[test]
    fn test_no_rules_fire_for_small_non_regulated_company() {
        let result = generate_diagnosis(&full_answers("tenders", "pyme", "manufacturing"));
        assert!(result.secondary_solutions.is_empty());
    }

    #[test]
    fn test_secondary_never_contains_primary_and_is_bounded() {
        let sizes = ["startup", "pyme", "midmarket", "enterprise", "unknown"];
        let industries = ["finance", "legal", "accounting", "tech", "other", "unknown"];
        for situation in Situation::ALL {
            for size in sizes {
                for industry in industries {
                    let result =
                        generate_diagnosis(&full_answers(situation.code(), size, industry));
                    assert!(result.secondary_solutions.len() <= 2);
                    assert!(!result.secondary_solutions.contains(&result.primary_solution));
                    if let [a, b] = result.secondary_solutions.as_slice() {
                        assert_ne!(a, b);
                    }
                }
            }
        }
    }

    #[test]
    fn test_generation_is_idempotent() {
        let input = full_answers("due_diligence", "enterprise", "legal");
        let first = generate_diagnosis(&input);
        let second = generate_diagnosis(&input);
        assert_eq!(first, second);
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }

    #[test]
    fn test_answer_order_does_not_matter() {
        let mut input = full_answers("expansion", "midmarket", "finance");
        let forward = generate_diagnosis(&input);
        input.reverse();
        assert_eq!(forward, generate_diagnosis(&input));
    }

    #[test]
    fn test_later_answer_for_same_step_wins() {
        let result = generate_diagnosis(&answers(&[(1, "audits"), (1, "tenders")]));
        assert_eq!(result.primary_solution, Solution::DealTeaser);
    }

    #[test]
    fn test_whitespace_pain_point_is_reported_literally() {
        let result = generate_diagnosis(&answers(&[(1, "audits"), (4, "  ")]));
        assert_eq!(result.pain_points, vec!["  ".to_string()]);
        assert!(result.diagnosis_summary.en.ends_with("main challenge:   "));
        assert!(result.diagnosis_summary.es.ends_with("principal desafío:   "));
    }

    #[test]
    fn test_empty_pain_point_is_not_reported() {
        let result = generate_diagnosis(&answers(&[(1, "audits"), (4, "")]));
        assert!(result.pain_points.is_empty());
        assert!(!result.diagnosis_summary.en.contains("main challenge"));
    }

    #[test]
    fn test_pain_point_text_passes_through_verbatim() {
        let result = generate_diagnosis(&answers(&[(4, "  Auditors ask the same thing twice ")]));
        assert_eq!(
            result.pain_points,
            vec!["  Auditors ask the same thing twice ".to_string()]
        );
    }

    #[test]
    fn test_scores_within_bounds_for_documented_values() {
        let urgencies = ["immediate", "short", "medium", "exploring"];
        let roles = ["decision_maker", "influencer", "evaluator", "researcher"];
        for urgency in urgencies {
            for role in roles {
                let result = generate_diagnosis(&answers(&[
                    (2, "startup"),
                    (3, "manufacturing"),
                    (5, urgency),
                    (6, role),
                ]));
                assert!(result.urgency_score <= 10);
                assert!(result.fit_score <= 10);
            }
        }
    }

    #[test]
    fn test_result_serializes_codes_and_language_maps() {
        let result = generate_diagnosis(&answers(&[(1, "contracts")]));
        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value["primary_solution"], "deal_visor");
        assert!(value["diagnosis_summary"]["en"].is_string());
        assert!(value["diagnosis_summary"]["es"].is_string());
        assert!(value["next_steps"][0]["es"].is_string());
    }
}
