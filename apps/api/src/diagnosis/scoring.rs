//! Score tables and the urgency / fit computations.

/// Weight used for any answer missing from a table (or not answered at all).
pub const DEFAULT_WEIGHT: u8 = 5;

/// Categorical answer value → integer weight (0–10).
#[derive(Debug)]
pub struct ScoreTable {
    pub entries: &'static [(&'static str, u8)],
}

impl ScoreTable {
    pub fn lookup(&self, value: Option<&str>) -> u8 {
        value
            .and_then(|v| {
                self.entries
                    .iter()
                    .find(|(code, _)| *code == v)
                    .map(|(_, weight)| *weight)
            })
            .unwrap_or(DEFAULT_WEIGHT)
    }
}

/// Step 5: timeline.
pub const URGENCY: ScoreTable = ScoreTable {
    entries: &[("immediate", 10), ("short", 7), ("medium", 4), ("exploring", 2)],
};

/// Step 2: organization size.
pub const COMPANY_SIZE: ScoreTable = ScoreTable {
    entries: &[("startup", 3), ("pyme", 5), ("midmarket", 8), ("enterprise", 10)],
};

/// Step 3: industry fit.
pub const INDUSTRY_FIT: ScoreTable = ScoreTable {
    entries: &[
        ("finance", 10),
        ("legal", 10),
        ("accounting", 9),
        ("healthcare", 8),
        ("tech", 7),
        ("manufacturing", 6),
        ("public", 8),
        ("other", 5),
    ],
};

/// Step 6: role in the purchasing decision.
pub const DECISION_ROLE: ScoreTable = ScoreTable {
    entries: &[
        ("decision_maker", 10),
        ("influencer", 7),
        ("evaluator", 5),
        ("researcher", 3),
    ],
};

/// Fit blend weights in tenths: size 0.3, industry 0.3, role 0.4.
const SIZE_TENTHS: u32 = 3;
const INDUSTRY_TENTHS: u32 = 3;
const ROLE_TENTHS: u32 = 4;

pub fn compute_urgency_score(urgency: Option<&str>) -> u8 {
    URGENCY.lookup(urgency)
}

/// Weighted blend `size*0.3 + industry*0.3 + role*0.4`, rounded half away from zero.
///
/// Evaluated in integer tenths so a blend of exactly `x.5` always rounds up.
pub fn compute_fit_score(
    company_size: Option<&str>,
    industry: Option<&str>,
    decision_role: Option<&str>,
) -> u8 {
    let tenths = u32::from(COMPANY_SIZE.lookup(company_size)) * SIZE_TENTHS
        + u32::from(INDUSTRY_FIT.lookup(industry)) * INDUSTRY_TENTHS
        + u32::from(DECISION_ROLE.lookup(decision_role)) * ROLE_TENTHS;
    let rounded = (tenths + 5) / 10;
    rounded.min(10) as u8
}
