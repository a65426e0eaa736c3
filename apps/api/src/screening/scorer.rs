//! Résumé scoring against a recruiter's criteria.
//!
//! Two gates, deliberately independent:
//! - `score` = min(100, ⌊0.6 × skill_match_pct⌋ + 10 × experience_years)
//! - `decision` depends only on skill_match_pct and experience_years
//!
//! A résumé can therefore score 100 through experience alone and still be
//! NOT SUITABLE when too few required skills are found.

use std::num::IntErrorKind;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::screening::domain::{classify, Domain};
use crate::screening::segmenter::PhraseSegmenter;
use crate::screening::skills::extract_skills;

/// Alternate surface forms accepted for a required skill.
const SKILL_EQUIVALENTS: &[(&str, &[&str])] = &[
    ("python", &["python", "django", "flask"]),
    ("java", &["java", "spring", "backend"]),
    ("javascript", &["javascript", "react", "angular", "node"]),
    ("sql", &["sql", "database", "mysql", "postgres"]),
    ("aws", &["aws", "cloud", "ec2", "s3"]),
    ("azure", &["azure", "cloud"]),
    ("devops", &["devops", "docker", "ci", "cd"]),
    ("cyber security", &["security", "forensics", "malware", "incident"]),
    ("ruby", &["ruby", "rails"]),
];

const SUITABLE_MIN_MATCH_PCT: u32 = 70;
const SUITABLE_MIN_EXPERIENCE: u32 = 2;
const CONDITIONAL_MIN_MATCH_PCT: u32 = 40;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Decision {
    #[serde(rename = "SUITABLE")]
    Suitable,
    #[serde(rename = "CONDITIONAL")]
    Conditional,
    #[serde(rename = "NOT SUITABLE")]
    NotSuitable,
}

impl Decision {
    pub fn as_str(self) -> &'static str {
        match self {
            Decision::Suitable => "SUITABLE",
            Decision::Conditional => "CONDITIONAL",
            Decision::NotSuitable => "NOT SUITABLE",
        }
    }

    pub fn parse(value: &str) -> Option<Decision> {
        [Decision::Suitable, Decision::Conditional, Decision::NotSuitable]
            .into_iter()
            .find(|d| d.as_str() == value)
    }
}

/// The skills and experience a résumé is evaluated against.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScreeningCriteria {
    /// Lowercase, trimmed, non-empty. Order and duplicates are kept.
    pub required_skills: Vec<String>,
    pub experience_years: u32,
}

impl ScreeningCriteria {
    /// Parses the raw form values: a comma-separated skill list and an
    /// experience count. Unparseable experience (including negatives) is 0;
    /// counts too large for `u32` saturate.
    pub fn from_form(skills: &str, experience: &str) -> Self {
        let required_skills = skills
            .split(',')
            .map(|s| s.trim().to_lowercase())
            .filter(|s| !s.is_empty())
            .collect();
        let experience_years = parse_experience(experience);

        Self {
            required_skills,
            experience_years,
        }
    }
}

fn parse_experience(raw: &str) -> u32 {
    match raw.trim().parse::<u32>() {
        Ok(years) => years,
        Err(e) if *e.kind() == IntErrorKind::PosOverflow => u32::MAX,
        Err(_) => 0,
    }
}

/// Outcome of evaluating one résumé.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreResult {
    pub domain: Domain,
    pub score: u32, // 0 – 100
    pub decision: Decision,
    /// Required skills found, in the order they were requested.
    pub matched_skills: Vec<String>,
    /// Sorted, deduplicated skill phrases extracted from the résumé.
    pub detected_skills: Vec<String>,
}

/// Scores résumé text. Pure apart from logging; share via `Arc`.
pub struct ResumeScorer {
    segmenter: Arc<dyn PhraseSegmenter>,
}

impl ResumeScorer {
    pub fn new(segmenter: Arc<dyn PhraseSegmenter>) -> Self {
        Self { segmenter }
    }

    pub fn score(&self, text: &str, criteria: &ScreeningCriteria) -> ScoreResult {
        let domain = classify(text);
        let detected_skills = extract_skills(text, domain, self.segmenter.as_ref());

        let matched_skills = match_skills(&criteria.required_skills, &detected_skills);
        let pct = skill_match_pct(matched_skills.len(), criteria.required_skills.len());
        let score = compute_score(pct, criteria.experience_years);
        let decision = decide(pct, criteria.experience_years);

        debug!(
            %domain,
            detected = detected_skills.len(),
            matched = matched_skills.len(),
            required = criteria.required_skills.len(),
            pct,
            score,
            decision = decision.as_str(),
            "Scored résumé"
        );

        ScoreResult {
            domain,
            score,
            decision,
            matched_skills,
            detected_skills,
        }
    }
}

/// Terms that count as evidence of `skill`; the skill itself when it has no
/// synonym entry.
pub fn equivalents(skill: &str) -> Vec<&str> {
    SKILL_EQUIVALENTS
        .iter()
        .find(|(name, _)| *name == skill)
        .map(|(_, terms)| terms.to_vec())
        .unwrap_or_else(|| vec![skill])
}

/// Required skills with at least one equivalent occurring inside a detected phrase.
pub fn match_skills(required: &[String], detected: &[String]) -> Vec<String> {
    required
        .iter()
        .filter(|req| {
            equivalents(req)
                .into_iter()
                .any(|eq| detected.iter().any(|phrase| phrase.contains(eq)))
        })
        .cloned()
        .collect()
}

/// ⌊matched / total × 100⌋, or 0 when nothing was required.
pub fn skill_match_pct(matched: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    (matched.min(total) * 100 / total) as u32
}

/// min(100, ⌊pct × 0.6⌋ + experience × 10), saturating for any experience value.
pub fn compute_score(skill_match_pct: u32, experience_years: u32) -> u32 {
    let weighted = u64::from(skill_match_pct) * 6 / 10 + u64::from(experience_years) * 10;
    weighted.min(100) as u32
}

pub fn decide(skill_match_pct: u32, experience_years: u32) -> Decision {
    if skill_match_pct >= SUITABLE_MIN_MATCH_PCT && experience_years >= SUITABLE_MIN_EXPERIENCE {
        Decision::Suitable
    } else if skill_match_pct >= CONDITIONAL_MIN_MATCH_PCT {
        Decision::Conditional
    } else {
        Decision::NotSuitable
    }
}
