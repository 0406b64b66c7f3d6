//! Demo data for a fresh environment: one job, three candidates and their
//! screening rows.

use crate::matching::{skill_gap, ScreeningRow, SkillGap, SCREENING_TABLE};
use crate::store::{RecordStore, StoreError};
use serde::Serialize;
use serde_json::Value;
use uuid::Uuid;

const STRONG_FIT_THRESHOLD: u8 = 80;

#[derive(Debug, Clone, Serialize)]
pub struct JobRequirements {
    pub mandatory: Vec<String>,
    pub nice_to_have: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DemoJob {
    pub id: String,
    pub company_id: String,
    pub title: String,
    pub description: String,
    pub requirements: JobRequirements,
    pub status: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct CandidateAnalysis {
    pub skills: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DemoCandidate {
    pub id: String,
    pub company_id: String,
    pub job_id: String,
    pub name: String,
    pub email: String,
    pub ai_score: u8,
    pub status: String,
    pub priority: String,
    pub analysis: CandidateAnalysis,
}

#[derive(Debug, Clone)]
pub struct DemoDataset {
    pub job: DemoJob,
    pub candidates: Vec<DemoCandidate>,
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

impl DemoDataset {
    /// Builds the dataset with fresh ids.
    pub fn new(company_id: &str) -> Self {
        let job_id = Uuid::new_v4().to_string();

        let job = DemoJob {
            id: job_id.clone(),
            company_id: company_id.to_string(),
            title: "Senior Full Stack Developer".into(),
            description: "Looking for someone with strong experience in React, Node.js and Supabase."
                .into(),
            requirements: JobRequirements {
                mandatory: strings(&["React", "Node.js", "SQL"]),
                nice_to_have: strings(&["Next.js", "AI"]),
            },
            status: "ACTIVE".into(),
        };

        let candidate = |name: &str, email: &str, score: u8, status: &str, priority: &str, skills: &[&str]| {
            DemoCandidate {
                id: Uuid::new_v4().to_string(),
                company_id: company_id.to_string(),
                job_id: job_id.clone(),
                name: name.into(),
                email: email.into(),
                ai_score: score,
                status: status.into(),
                priority: priority.into(),
                analysis: CandidateAnalysis {
                    skills: strings(skills),
                },
            }
        };

        let candidates = vec![
            candidate(
                "Alice Silva",
                "alice@example.com",
                92,
                "OFFERED",
                "HIGH",
                &["React", "Node.js", "SQL", "Next.js"],
            ),
            candidate(
                "Bruno Costa",
                "bruno@example.com",
                75,
                "INTERVIEW",
                "MEDIUM",
                &["React", "SQL"],
            ),
            candidate(
                "Carla Souza",
                "carla@example.com",
                45,
                "NEW",
                "LOW",
                &["PHP", "JavaScript"],
            ),
        ];

        Self { job, candidates }
    }

    /// The screening row shown for a seeded candidate. The score is the
    /// candidate's stored `ai_score` and every listed skill counts as found.
    pub fn screening_for(&self, candidate: &DemoCandidate) -> ScreeningRow {
        let gap = skill_gap(&candidate.analysis.skills, &self.job.requirements.mandatory);
        let verdict = if candidate.ai_score > STRONG_FIT_THRESHOLD {
            "Excellent fit with the core technologies."
        } else {
            "Some mandatory skills are missing."
        };

        ScreeningRow {
            company_id: self.job.company_id.clone(),
            candidate_id: candidate.id.clone(),
            job_id: self.job.id.clone(),
            semantic_match_score: candidate.ai_score,
            skills_gap: SkillGap {
                found: candidate.analysis.skills.clone(),
                missing: gap.missing,
            },
            ai_reasoning: format!(
                "{}'s profile shows {}% adherence. {verdict}",
                candidate.name, candidate.ai_score
            ),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub job_title: String,
    pub candidates: Vec<(String, u8)>,
}

fn to_row<T: Serialize>(value: &T) -> Result<Value, StoreError> {
    Ok(serde_json::to_value(value)?)
}

/// Writes the dataset into `jobs`, `candidates` and `screening_matrix`.
pub async fn seed_demo(store: &dyn RecordStore, dataset: &DemoDataset) -> Result<SeedReport, StoreError> {
    store.upsert("jobs", to_row(&dataset.job)?).await?;
    tracing::info!(job = %dataset.job.title, "job created");

    let mut report = SeedReport {
        job_title: dataset.job.title.clone(),
        candidates: Vec::with_capacity(dataset.candidates.len()),
    };

    for candidate in &dataset.candidates {
        store.upsert("candidates", to_row(candidate)?).await?;
        store
            .upsert(SCREENING_TABLE, to_row(&dataset.screening_for(candidate))?)
            .await?;
        tracing::info!(candidate = %candidate.name, score = candidate.ai_score, "candidate inserted");
        report
            .candidates
            .push((candidate.name.clone(), candidate.ai_score));
    }

    Ok(report)
}
