//! Skill extraction by multi-pattern matching against the taxonomy

use crate::error::{Result, SkillGapError};
use crate::processing::text::TextNormalizer;
use crate::taxonomy::SkillTaxonomy;
use aho_corasick::AhoCorasick;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Extracts canonical skills from free text. Patterns come from the taxonomy's
/// canonical names and synonyms; matching is case-insensitive, normalized, and
/// word-boundary anchored, with overlaps resolved to the longest match.
pub struct SkillExtractor {
    matcher: AhoCorasick,
    patterns: Vec<PatternEntry>,
    normalizer: TextNormalizer,
}

#[derive(Debug, Clone)]
struct PatternEntry {
    skill: String,
    category: String,
    confidence: MatchConfidence,
}

/// How a skill was recognized in the text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchConfidence {
    /// The canonical skill name appeared verbatim (modulo normalization)
    Exact,
    /// Only a known synonym appeared
    Synonym,
}

/// How strongly a job description demands a skill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RequirementImportance {
    Required,
    Preferred,
    Mentioned,
}

/// One recognized skill within a text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillHit {
    pub skill: String,
    pub category: String,
    pub confidence: MatchConfidence,
    /// Set when the source text is a job description or requirement list
    pub importance: Option<RequirementImportance>,
    pub occurrences: usize,
}

/// Ordered set of skills found in one text, in order of first occurrence.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtractedSkillSet {
    pub hits: Vec<SkillHit>,
}

impl ExtractedSkillSet {
    pub fn len(&self) -> usize {
        self.hits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hits.is_empty()
    }

    pub fn contains(&self, skill: &str) -> bool {
        self.get(skill).is_some()
    }

    pub fn get(&self, skill: &str) -> Option<&SkillHit> {
        self.hits.iter().find(|h| h.skill.eq_ignore_ascii_case(skill))
    }

    pub fn names(&self) -> Vec<&str> {
        self.hits.iter().map(|h| h.skill.as_str()).collect()
    }

    /// Group the extracted skills by taxonomy category, in taxonomy order.
    pub fn categorize<'a>(&'a self, taxonomy: &'a SkillTaxonomy) -> Vec<(&'a str, Vec<&'a str>)> {
        let mut grouped = Vec::new();
        for category in &taxonomy.categories {
            let skills: Vec<&str> = self
                .hits
                .iter()
                .filter(|h| h.category == category.id)
                .map(|h| h.skill.as_str())
                .collect();
            if !skills.is_empty() {
                grouped.push((category.name.as_str(), skills));
            }
        }
        grouped
    }
}

impl SkillExtractor {
    /// Build an extractor over the taxonomy's canonical names and synonyms.
    pub fn new(taxonomy: &SkillTaxonomy) -> Result<Self> {
        let normalizer = TextNormalizer::new();
        let mut patterns = Vec::new();
        let mut surfaces: Vec<String> = Vec::new();

        for (category, skill) in taxonomy.skills() {
            let canonical = normalizer.normalize(&skill.name);
            if !canonical.is_empty() {
                surfaces.push(canonical);
                patterns.push(PatternEntry {
                    skill: skill.name.clone(),
                    category: category.id.clone(),
                    confidence: MatchConfidence::Exact,
                });
            }
            for synonym in &skill.synonyms {
                let surface = normalizer.normalize(synonym);
                if !surface.is_empty() {
                    surfaces.push(surface);
                    patterns.push(PatternEntry {
                        skill: skill.name.clone(),
                        category: category.id.clone(),
                        confidence: MatchConfidence::Synonym,
                    });
                }
            }
        }

        let matcher = AhoCorasick::builder()
            .ascii_case_insensitive(true)
            .match_kind(aho_corasick::MatchKind::LeftmostLongest)
            .build(&surfaces)
            .map_err(|e| {
                SkillGapError::TextProcessing(format!("Failed to build skill matcher: {}", e))
            })?;

        Ok(Self {
            matcher,
            patterns,
            normalizer,
        })
    }

    /// Extract the set of canonical skills present in the text. Empty or
    /// unrecognized text yields an empty set, never an error.
    pub fn extract(&self, text: &str) -> ExtractedSkillSet {
        let normalized = self.normalizer.normalize(text);
        if normalized.is_empty() {
            return ExtractedSkillSet::default();
        }

        // first occurrence position keyed by canonical skill
        let mut first_seen: HashMap<String, usize> = HashMap::new();
        let mut hits: Vec<(usize, SkillHit)> = Vec::new();

        for mat in self.matcher.find_iter(&normalized) {
            if !self.on_word_boundary(&normalized, mat.start(), mat.end()) {
                continue;
            }

            let entry = &self.patterns[mat.pattern().as_usize()];
            match first_seen.get(&entry.skill) {
                Some(&idx) => {
                    let (_, hit) = &mut hits[idx];
                    hit.occurrences += 1;
                    if entry.confidence == MatchConfidence::Exact {
                        hit.confidence = MatchConfidence::Exact;
                    }
                }
                None => {
                    first_seen.insert(entry.skill.clone(), hits.len());
                    hits.push((
                        mat.start(),
                        SkillHit {
                            skill: entry.skill.clone(),
                            category: entry.category.clone(),
                            confidence: entry.confidence,
                            importance: None,
                            occurrences: 1,
                        },
                    ));
                }
            }
        }

        hits.sort_by_key(|(position, _)| *position);
        ExtractedSkillSet {
            hits: hits.into_iter().map(|(_, hit)| hit).collect(),
        }
    }

    /// Extract skills from a job description and classify how strongly each
    /// one is demanded, based on the surrounding phrasing.
    pub fn extract_requirements(&self, jd_text: &str) -> ExtractedSkillSet {
        let mut set = self.extract(jd_text);

        // Classification is line-scoped: "required" on one line must not
        // promote a skill mentioned three lines later.
        let lines: Vec<String> = jd_text
            .lines()
            .map(|line| self.normalizer.normalize(line))
            .filter(|line| !line.is_empty())
            .collect();

        for hit in &mut set.hits {
            let surface = self.normalizer.normalize(&hit.skill);
            hit.importance = Some(classify_importance(&surface, &lines));
        }
        set
    }

    /// Build a requirement set from a static skill list (e.g. a company role
    /// profile). Every listed skill the taxonomy knows counts as required.
    pub fn extract_required_list(&self, skills: &[String]) -> ExtractedSkillSet {
        let text = skills.join("\n");
        let mut set = self.extract(&text);
        for hit in &mut set.hits {
            hit.importance = Some(RequirementImportance::Required);
        }
        set
    }

    /// Number of match patterns compiled into the extractor.
    pub fn pattern_count(&self) -> usize {
        self.patterns.len()
    }

    fn on_word_boundary(&self, text: &str, start: usize, end: usize) -> bool {
        let before_ok = text[..start]
            .chars()
            .next_back()
            .map_or(true, |c| !TextNormalizer::is_word_char(c));
        let after_ok = text[end..]
            .chars()
            .next()
            .map_or(true, |c| !TextNormalizer::is_word_char(c));
        before_ok && after_ok
    }
}

/// Classify a skill's importance from job-description phrasing, strongest
/// signal across lines winning.
fn classify_importance(surface: &str, normalized_lines: &[String]) -> RequirementImportance {
    // `\b` misbehaves next to '+'/'#', so skills like "c++" get explicit
    // boundary classes instead.
    let bounded = format!(r"(?:^|[^a-z0-9+#]){}(?:[^a-z0-9+#]|$)", regex::escape(surface));

    let required = [
        format!(r"required.*{}", bounded),
        format!(r"must have.*{}", bounded),
        format!(r"{}.*required", bounded),
        format!(r"{}.*must", bounded),
        format!(r"experience with.*{}", bounded),
        format!(r"proficiency in.*{}", bounded),
    ];
    let preferred = [
        format!(r"preferred.*{}", bounded),
        format!(r"nice to have.*{}", bounded),
        format!(r"{}.*preferred", bounded),
        format!(r"{}.*bonus", bounded),
        format!(r"familiarity with.*{}", bounded),
    ];

    let mut best = RequirementImportance::Mentioned;
    for line in normalized_lines {
        for pattern in &required {
            if let Ok(re) = Regex::new(pattern) {
                if re.is_match(line) {
                    return RequirementImportance::Required;
                }
            }
        }
        for pattern in &preferred {
            if let Ok(re) = Regex::new(pattern) {
                if re.is_match(line) {
                    best = RequirementImportance::Preferred;
                }
            }
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extractor() -> SkillExtractor {
        SkillExtractor::new(&SkillTaxonomy::builtin()).unwrap()
    }

    #[test]
    fn test_extracts_canonical_names_any_case() {
        let extractor = extractor();
        let set = extractor.extract("Experienced with PYTHON, pytorch and Kubernetes.");

        assert!(set.contains("Python"));
        assert!(set.contains("PyTorch"));
        assert!(set.contains("Kubernetes"));
    }

    #[test]
    fn test_punctuation_variants_match() {
        let extractor = extractor();
        let set = extractor.extract("I studied regularization and bias variance tradeoff");

        assert!(set.contains("Regularization"));
        assert!(set.contains("Bias-Variance Tradeoff"));
    }

    #[test]
    fn test_synonym_match_is_tagged() {
        let extractor = extractor();
        let set = extractor.extract("Built services on k8s with retrieval augmented generation.");

        let k8s = set.get("Kubernetes").unwrap();
        assert_eq!(k8s.confidence, MatchConfidence::Synonym);

        let rag = set.get("RAG").unwrap();
        assert_eq!(rag.confidence, MatchConfidence::Synonym);
    }

    #[test]
    fn test_longest_match_wins() {
        let extractor = extractor();
        // "vision transformer" contains the shorter "transformer" surface;
        // only the more specific skill may fire
        let set = extractor.extract("Trained vision transformer models at scale.");

        assert!(set.contains("ViT"));
        assert!(!set.contains("Transformer"));

        let set = extractor.extract("Trained transformer models at scale.");
        assert!(set.contains("Transformer"));
    }

    #[test]
    fn test_word_boundaries_respected() {
        let extractor = extractor();
        // "Javascript" must not produce a "Java" hit
        let set = extractor.extract("Wrote Javascript for the frontend.");
        assert!(!set.contains("Java"));

        let set = extractor.extract("Wrote Java services.");
        assert!(set.contains("Java"));
    }

    #[test]
    fn test_cpp_token() {
        let extractor = extractor();
        let set = extractor.extract("Low-latency inference in C++ and Python.");
        assert!(set.contains("C++"));
    }

    #[test]
    fn test_empty_text_yields_empty_set() {
        let extractor = extractor();
        assert!(extractor.extract("").is_empty());
        assert!(extractor.extract("   \n\t ").is_empty());
    }

    #[test]
    fn test_ordering_and_occurrences() {
        let extractor = extractor();
        let set = extractor.extract("SQL first, then Python, then SQL again.");

        assert_eq!(set.names(), vec!["SQL", "Python"]);
        assert_eq!(set.get("SQL").unwrap().occurrences, 2);
    }

    #[test]
    fn test_requirement_importance() {
        let extractor = extractor();
        let jd = "Must have experience with PyTorch.\n\
                  Familiarity with Kubernetes is nice to have.\n\
                  Our stack also includes Airflow.";
        let set = extractor.extract_requirements(jd);

        assert_eq!(
            set.get("PyTorch").unwrap().importance,
            Some(RequirementImportance::Required)
        );
        assert_eq!(
            set.get("Kubernetes").unwrap().importance,
            Some(RequirementImportance::Preferred)
        );
        assert_eq!(
            set.get("Airflow").unwrap().importance,
            Some(RequirementImportance::Mentioned)
        );
    }

    #[test]
    fn test_required_list() {
        let extractor = extractor();
        let set = extractor.extract_required_list(&[
            "PyTorch".to_string(),
            "Ranking".to_string(),
        ]);

        assert_eq!(set.len(), 2);
        assert!(set
            .hits
            .iter()
            .all(|h| h.importance == Some(RequirementImportance::Required)));
    }

    #[test]
    fn test_categorize() {
        let taxonomy = SkillTaxonomy::builtin();
        let extractor = SkillExtractor::new(&taxonomy).unwrap();
        let set = extractor.extract("Python, PyTorch and SQL.");

        let grouped = set.categorize(&taxonomy);
        let names: Vec<&str> = grouped.iter().map(|(name, _)| *name).collect();
        assert!(names.contains(&"Deep Learning"));
        assert!(names.contains(&"Programming"));
        assert!(names.contains(&"Data Engineering"));
    }
}
