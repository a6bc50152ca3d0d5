//! Analysis report: everything one run produced, ready for rendering

use crate::processing::extractor::ExtractedSkillSet;
use crate::processing::gap::GapResult;
use crate::processing::planner::StudyPlan;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Full result of one gap analysis run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub candidate_skills: ExtractedSkillSet,
    pub target_skills: ExtractedSkillSet,
    pub gap: GapResult,
    pub plan: StudyPlan,
    pub metadata: ReportMetadata,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMetadata {
    pub generated_at: DateTime<Utc>,
    pub tool_version: String,
    pub resume_source: String,
    pub target_source: TargetSource,
    pub taxonomy_skills: usize,
    pub weeks: u32,
}

/// What the analysis compared the resume against.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum TargetSource {
    JobDescription { path: String },
    CompanyRole { company: String, role: String },
}

impl std::fmt::Display for TargetSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TargetSource::JobDescription { path } => write!(f, "{}", path),
            TargetSource::CompanyRole { company, role } => write!(f, "{} / {}", company, role),
        }
    }
}

impl AnalysisReport {
    pub fn new(
        candidate_skills: ExtractedSkillSet,
        target_skills: ExtractedSkillSet,
        gap: GapResult,
        plan: StudyPlan,
        resume_source: String,
        target_source: TargetSource,
        taxonomy_skills: usize,
    ) -> Self {
        let weeks = plan.weeks;
        Self {
            candidate_skills,
            target_skills,
            gap,
            plan,
            metadata: ReportMetadata {
                generated_at: Utc::now(),
                tool_version: env!("CARGO_PKG_VERSION").to_string(),
                resume_source,
                target_source,
                taxonomy_skills,
                weeks,
            },
        }
    }

    /// Fraction of target skills fully covered.
    pub fn coverage(&self) -> f32 {
        self.gap.coverage()
    }

    /// One-line assessment, thresholds matching the original advice tiers.
    pub fn verdict(&self) -> &'static str {
        let coverage = self.coverage();
        if coverage >= 0.7 {
            "Strong match - apply with confidence"
        } else if coverage >= 0.5 {
            "Moderate match - close the top gaps first"
        } else {
            "Low match - work through the study plan before applying"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::extractor::SkillExtractor;
    use crate::processing::gap::{GapAnalyzer, PartialMatchPolicy};
    use crate::processing::planner::{PlanConfig, PlanGenerator};
    use crate::taxonomy::SkillTaxonomy;

    fn report(resume: &str, jd: &str) -> AnalysisReport {
        let taxonomy = SkillTaxonomy::builtin();
        let extractor = SkillExtractor::new(&taxonomy).unwrap();
        let candidate = extractor.extract(resume);
        let target = extractor.extract_requirements(jd);
        let gap = GapAnalyzer::new(PartialMatchPolicy::default()).analyze(&candidate, &target);
        let plan = PlanGenerator::new(&taxonomy, PlanConfig::default()).generate(&gap, 8);

        AnalysisReport::new(
            candidate,
            target,
            gap,
            plan,
            "resume.txt".to_string(),
            TargetSource::JobDescription {
                path: "jd.txt".to_string(),
            },
            taxonomy.skill_count(),
        )
    }

    #[test]
    fn test_verdict_tiers() {
        let strong = report("Python, SQL, Spark", "Python, SQL, Spark");
        assert!(strong.coverage() >= 0.7);
        assert!(strong.verdict().starts_with("Strong"));

        let low = report("Git", "Python, SQL, Spark, Kafka");
        assert!(low.coverage() < 0.5);
        assert!(low.verdict().starts_with("Low"));
    }

    #[test]
    fn test_report_serializes_to_json() {
        let report = report("Python", "Python, Ranking");
        let json = serde_json::to_string(&report).unwrap();
        assert!(json.contains("\"gap\""));
        assert!(json.contains("\"plan\""));
    }
}
