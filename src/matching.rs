//! Candidate/job skill comparison and the screening rows it produces.

use crate::store::{RecordStore, StoreError};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const SCREENING_TABLE: &str = "screening_matrix";
const NO_REQUIREMENTS_SCORE: u8 = 50;

#[derive(Debug, Error)]
pub enum MatchError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("malformed {table} row: {source}")]
    Malformed {
        table: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillGap {
    pub found: Vec<String>,
    pub missing: Vec<String>,
}

/// One row of the screening matrix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScreeningRow {
    pub company_id: String,
    pub candidate_id: String,
    pub job_id: String,
    pub semantic_match_score: u8,
    pub skills_gap: SkillGap,
    pub ai_reasoning: String,
}

#[derive(Debug, Default, Deserialize)]
struct Analysis {
    #[serde(default)]
    skills: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct CandidateRecord {
    #[serde(default)]
    analysis: Option<Analysis>,
}

#[derive(Debug, Default, Deserialize)]
struct Requirements {
    #[serde(default)]
    mandatory: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct JobRecord {
    company_id: String,
    #[serde(default)]
    requirements: Option<Requirements>,
}

/// `found` keeps the candidate's ordering, `missing` the job's.
pub fn skill_gap(candidate_skills: &[String], mandatory: &[String]) -> SkillGap {
    SkillGap {
        found: candidate_skills
            .iter()
            .filter(|s| mandatory.contains(s))
            .cloned()
            .collect(),
        missing: mandatory
            .iter()
            .filter(|r| !candidate_skills.contains(r))
            .cloned()
            .collect(),
    }
}

/// Percentage of mandatory requirements covered, rounded down.
pub fn match_score(found: usize, mandatory: usize) -> u8 {
    if mandatory == 0 {
        return NO_REQUIREMENTS_SCORE;
    }
    (found * 100 / mandatory).min(100) as u8
}

pub fn reasoning(gap: &SkillGap) -> String {
    format!(
        "The candidate shows a strong technical fit in {}. However, gaps were identified in {}.",
        gap.found.join(", "),
        gap.missing.join(", ")
    )
}

/// Scores a candidate against a job and stores the result.
pub async fn compute_match(
    store: &dyn RecordStore,
    candidate_id: &str,
    job_id: &str,
) -> Result<ScreeningRow, MatchError> {
    tracing::info!(candidate_id, job_id, "computing semantic match");

    let candidate: CandidateRecord =
        serde_json::from_value(store.fetch_by_id("candidates", candidate_id).await?)
            .map_err(|source| MatchError::Malformed {
                table: "candidates",
                source,
            })?;
    let job: JobRecord = serde_json::from_value(store.fetch_by_id("jobs", job_id).await?)
        .map_err(|source| MatchError::Malformed {
            table: "jobs",
            source,
        })?;

    let skills = candidate.analysis.unwrap_or_default().skills;
    let mandatory = job.requirements.unwrap_or_default().mandatory;

    let gap = skill_gap(&skills, &mandatory);
    let row = ScreeningRow {
        company_id: job.company_id,
        candidate_id: candidate_id.to_string(),
        job_id: job_id.to_string(),
        semantic_match_score: match_score(gap.found.len(), mandatory.len()),
        ai_reasoning: reasoning(&gap),
        skills_gap: gap,
    };

    let value = serde_json::to_value(&row).map_err(StoreError::from)?;
    store.upsert(SCREENING_TABLE, value).await?;

    tracing::info!(score = row.semantic_match_score, "screening matrix updated");
    Ok(row)
}
