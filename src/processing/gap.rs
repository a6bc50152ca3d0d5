//! Gap analysis: diffing candidate skills against a target requirement set

use crate::processing::extractor::{ExtractedSkillSet, RequirementImportance, SkillHit};
use serde::{Deserialize, Serialize};
use strsim::jaro_winkler;

/// Policy knobs for the partial-match heuristic. A target skill the candidate
/// lacks exactly can still count as partial when the candidate shows related
/// coverage: enough skills in the same category, or a near-identical name.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PartialMatchPolicy {
    pub enabled: bool,
    /// Candidate skills required in the target skill's category
    pub min_category_overlap: usize,
    /// Jaro-Winkler threshold for near-name matches
    pub name_similarity: f64,
}

impl Default for PartialMatchPolicy {
    fn default() -> Self {
        Self {
            enabled: true,
            min_category_overlap: 1,
            name_similarity: 0.85,
        }
    }
}

/// One target skill placed into a gap bucket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GapSkill {
    pub skill: String,
    pub category: String,
    pub importance: RequirementImportance,
    /// Candidate skills that justified a partial classification
    pub related: Vec<String>,
}

/// Result of comparing a candidate against a target requirement set.
/// matched, missing and partial are pairwise disjoint and union to the
/// target set; surplus holds candidate-only skills outside that invariant.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GapResult {
    pub matched: Vec<GapSkill>,
    pub missing: Vec<GapSkill>,
    pub partial: Vec<GapSkill>,
    pub surplus: Vec<String>,
}

impl GapResult {
    pub fn target_len(&self) -> usize {
        self.matched.len() + self.missing.len() + self.partial.len()
    }

    /// Fraction of target skills fully covered by the candidate.
    pub fn coverage(&self) -> f32 {
        if self.target_len() == 0 {
            0.0
        } else {
            self.matched.len() as f32 / self.target_len() as f32
        }
    }
}

pub struct GapAnalyzer {
    policy: PartialMatchPolicy,
}

impl GapAnalyzer {
    pub fn new(policy: PartialMatchPolicy) -> Self {
        Self { policy }
    }

    /// Compare candidate skills against the target requirement set. An empty
    /// target yields an all-empty result rather than an error.
    pub fn analyze(&self, candidate: &ExtractedSkillSet, target: &ExtractedSkillSet) -> GapResult {
        if target.is_empty() {
            return GapResult::default();
        }

        let mut result = GapResult::default();

        for hit in &target.hits {
            let mut entry = GapSkill {
                skill: hit.skill.clone(),
                category: hit.category.clone(),
                importance: hit.importance.unwrap_or(RequirementImportance::Mentioned),
                related: Vec::new(),
            };

            // Exact match always wins over the partial heuristic
            if candidate.contains(&hit.skill) {
                result.matched.push(entry);
                continue;
            }

            let related = self.related_evidence(hit, candidate);
            if related.is_empty() {
                result.missing.push(entry);
            } else {
                entry.related = related;
                result.partial.push(entry);
            }
        }

        result.surplus = candidate
            .hits
            .iter()
            .filter(|h| !target.contains(&h.skill))
            .map(|h| h.skill.clone())
            .collect();

        result
    }

    /// Candidate skills that make a missing target skill count as partial.
    fn related_evidence(&self, target: &SkillHit, candidate: &ExtractedSkillSet) -> Vec<String> {
        if !self.policy.enabled {
            return Vec::new();
        }

        let mut related: Vec<String> = Vec::new();

        let category_mates: Vec<&SkillHit> = candidate
            .hits
            .iter()
            .filter(|h| h.category == target.category)
            .collect();
        if !category_mates.is_empty() && category_mates.len() >= self.policy.min_category_overlap {
            related.extend(category_mates.iter().map(|h| h.skill.clone()));
        }

        let target_name = target.skill.to_lowercase();
        for hit in &candidate.hits {
            let similarity = jaro_winkler(&hit.skill.to_lowercase(), &target_name);
            if similarity >= self.policy.name_similarity && !related.contains(&hit.skill) {
                related.push(hit.skill.clone());
            }
        }

        related
    }
}
