//! Core analysis pipeline: extraction, gap analysis, plan generation

pub mod extractor;
pub mod gap;
pub mod planner;
pub mod text;

pub use extractor::{ExtractedSkillSet, MatchConfidence, RequirementImportance, SkillExtractor};
pub use gap::{GapAnalyzer, GapResult, PartialMatchPolicy};
pub use planner::{PlanConfig, PlanGenerator, StudyPlan};
