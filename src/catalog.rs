//! Company role catalog: per-company target skill lists and interview rounds

use crate::error::{Result, SkillGapError};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Static catalog of companies and the skills their roles require. Used as
/// the target side of a gap analysis when no job description is supplied.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompanyCatalog {
    pub companies: Vec<Company>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Company {
    pub name: String,
    pub roles: Vec<RoleProfile>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoleProfile {
    pub role: String,
    #[serde(default)]
    pub levels: Vec<String>,
    pub required_skills: Vec<String>,
    #[serde(default)]
    pub interview_rounds: Vec<InterviewRound>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InterviewRound {
    pub round: u32,
    pub name: String,
    pub duration_min: u32,
    #[serde(default)]
    pub focus: Vec<String>,
}

impl CompanyCatalog {
    /// Load a catalog from a JSON file. Malformed data is fatal, same policy
    /// as the taxonomy.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            SkillGapError::Catalog(format!(
                "Failed to read catalog file '{}': {}",
                path.display(),
                e
            ))
        })?;

        let catalog: CompanyCatalog = serde_json::from_str(&content).map_err(|e| {
            SkillGapError::Catalog(format!(
                "Failed to parse catalog file '{}': {}",
                path.display(),
                e
            ))
        })?;

        if catalog.companies.is_empty() {
            return Err(SkillGapError::Catalog(
                "Catalog contains no companies".to_string(),
            ));
        }
        Ok(catalog)
    }

    pub fn find_company(&self, name: &str) -> Option<&Company> {
        self.companies
            .iter()
            .find(|c| c.name.eq_ignore_ascii_case(name))
    }

    /// Resolve a role for a company. With no role given, a company with a
    /// single role resolves to it.
    pub fn find_role(&self, company: &str, role: Option<&str>) -> Result<&RoleProfile> {
        let company = self.find_company(company).ok_or_else(|| {
            SkillGapError::InvalidInput(format!("Unknown company: {}", company))
        })?;

        match role {
            Some(role) => company
                .roles
                .iter()
                .find(|r| r.role.eq_ignore_ascii_case(role))
                .ok_or_else(|| {
                    SkillGapError::InvalidInput(format!(
                        "Company '{}' has no role '{}'",
                        company.name, role
                    ))
                }),
            None if company.roles.len() == 1 => Ok(&company.roles[0]),
            None => Err(SkillGapError::InvalidInput(format!(
                "Company '{}' has multiple roles, pass --role ({})",
                company.name,
                company
                    .roles
                    .iter()
                    .map(|r| r.role.as_str())
                    .collect::<Vec<_>>()
                    .join(", ")
            ))),
        }
    }

    /// Built-in catalog covering a handful of common ML employers.
    pub fn builtin() -> Self {
        fn role(
            name: &str,
            levels: &[&str],
            skills: &[&str],
            rounds: Vec<InterviewRound>,
        ) -> RoleProfile {
            RoleProfile {
                role: name.to_string(),
                levels: levels.iter().map(|s| s.to_string()).collect(),
                required_skills: skills.iter().map(|s| s.to_string()).collect(),
                interview_rounds: rounds,
            }
        }

        fn round(n: u32, name: &str, duration_min: u32, focus: &[&str]) -> InterviewRound {
            InterviewRound {
                round: n,
                name: name.to_string(),
                duration_min,
                focus: focus.iter().map(|s| s.to_string()).collect(),
            }
        }

        let mle_rounds = vec![
            round(1, "Phone Screen", 45, &["coding"]),
            round(2, "ML Coding", 60, &["coding", "ml fundamentals"]),
            round(3, "ML System Design", 60, &["system design"]),
            round(4, "Behavioral", 45, &["behavioral"]),
        ];

        let companies = vec![
            Company {
                name: "Google".to_string(),
                roles: vec![role(
                    "MLE",
                    &["L4", "L5", "L6"],
                    &[
                        "Python",
                        "TensorFlow",
                        "Neural Networks",
                        "Transformer",
                        "Recommendation Systems",
                        "A/B Testing",
                        "SQL",
                        "Distributed Training",
                    ],
                    mle_rounds.clone(),
                )],
            },
            Company {
                name: "Meta".to_string(),
                roles: vec![role(
                    "MLE",
                    &["E4", "E5", "E6"],
                    &[
                        "Python",
                        "PyTorch",
                        "Recommendation Systems",
                        "Ranking",
                        "A/B Testing",
                        "Feature Engineering",
                        "Spark",
                    ],
                    mle_rounds.clone(),
                )],
            },
            Company {
                name: "Amazon".to_string(),
                roles: vec![role(
                    "Applied Scientist",
                    &["L4", "L5", "L6"],
                    &[
                        "Python",
                        "XGBoost",
                        "Neural Networks",
                        "AWS",
                        "SageMaker",
                        "Experimental Design",
                        "SQL",
                    ],
                    mle_rounds.clone(),
                )],
            },
            Company {
                name: "OpenAI".to_string(),
                roles: vec![role(
                    "MLE",
                    &["L4", "L5"],
                    &[
                        "Python",
                        "PyTorch",
                        "Transformer",
                        "LLM",
                        "RLHF",
                        "Fine-tuning",
                        "Distributed Training",
                        "Kubernetes",
                    ],
                    mle_rounds.clone(),
                )],
            },
            Company {
                name: "Netflix".to_string(),
                roles: vec![role(
                    "MLE",
                    &["Senior"],
                    &[
                        "Python",
                        "Recommendation Systems",
                        "Collaborative Filtering",
                        "Ranking",
                        "A/B Testing",
                        "Spark",
                        "Kafka",
                    ],
                    mle_rounds,
                )],
            },
        ];

        CompanyCatalog { companies }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_builtin_catalog() {
        let catalog = CompanyCatalog::builtin();
        assert!(catalog.find_company("google").is_some());
        assert!(catalog.find_company("Acme Corp").is_none());
    }

    #[test]
    fn test_role_resolution() {
        let catalog = CompanyCatalog::builtin();

        let profile = catalog.find_role("Meta", Some("mle")).unwrap();
        assert!(profile.required_skills.contains(&"PyTorch".to_string()));

        // Single-role companies resolve without an explicit role
        let profile = catalog.find_role("Netflix", None).unwrap();
        assert_eq!(profile.role, "MLE");

        assert!(catalog.find_role("Google", Some("PM")).is_err());
        assert!(catalog.find_role("Umbrella Corp", None).is_err());
    }

    #[test]
    fn test_load_rejects_empty_catalog() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"companies": []}}"#).unwrap();

        let result = CompanyCatalog::load(file.path());
        assert!(matches!(result, Err(SkillGapError::Catalog(_))));
    }
}
