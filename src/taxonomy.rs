//! Skill taxonomy: controlled vocabulary of canonical skills with synonyms

use crate::error::{Result, SkillGapError};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

/// Static mapping from category to canonical skills. Loaded once at startup
/// and treated as immutable afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillTaxonomy {
    pub categories: Vec<SkillCategory>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillCategory {
    pub id: String,
    pub name: String,
    /// Relative importance of the category when ranking study plan items
    #[serde(default = "default_weight")]
    pub weight: f32,
    pub skills: Vec<Skill>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Skill {
    pub name: String,
    #[serde(default)]
    pub synonyms: Vec<String>,
    #[serde(default = "default_weight")]
    pub weight: f32,
}

fn default_weight() -> f32 {
    1.0
}

impl SkillTaxonomy {
    /// Load a taxonomy from a JSON file. Any parse or validation failure is
    /// fatal to startup and surfaced as an error.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            SkillGapError::Taxonomy(format!(
                "Failed to read taxonomy file '{}': {}",
                path.display(),
                e
            ))
        })?;

        let taxonomy: SkillTaxonomy = serde_json::from_str(&content).map_err(|e| {
            SkillGapError::Taxonomy(format!(
                "Failed to parse taxonomy file '{}': {}",
                path.display(),
                e
            ))
        })?;

        taxonomy.validate()?;
        Ok(taxonomy)
    }

    /// Validate structural invariants: at least one category, no empty or
    /// duplicate canonical names.
    pub fn validate(&self) -> Result<()> {
        if self.categories.is_empty() {
            return Err(SkillGapError::Taxonomy(
                "Taxonomy contains no categories".to_string(),
            ));
        }

        let mut seen: HashSet<String> = HashSet::new();
        for category in &self.categories {
            if category.id.trim().is_empty() {
                return Err(SkillGapError::Taxonomy(
                    "Category with empty id".to_string(),
                ));
            }
            for skill in &category.skills {
                if skill.name.trim().is_empty() {
                    return Err(SkillGapError::Taxonomy(format!(
                        "Empty skill name in category '{}'",
                        category.id
                    )));
                }
                let key = skill.name.to_lowercase();
                if !seen.insert(key) {
                    return Err(SkillGapError::Taxonomy(format!(
                        "Duplicate canonical skill '{}'",
                        skill.name
                    )));
                }
            }
        }
        Ok(())
    }

    /// Iterate over all (category, skill) pairs.
    pub fn skills(&self) -> impl Iterator<Item = (&SkillCategory, &Skill)> {
        self.categories
            .iter()
            .flat_map(|c| c.skills.iter().map(move |s| (c, s)))
    }

    /// Total number of canonical skills across all categories.
    pub fn skill_count(&self) -> usize {
        self.categories.iter().map(|c| c.skills.len()).sum()
    }

    /// Find the category a canonical skill belongs to.
    pub fn category_of(&self, skill_name: &str) -> Option<&SkillCategory> {
        self.categories
            .iter()
            .find(|c| c.skills.iter().any(|s| s.name.eq_ignore_ascii_case(skill_name)))
    }

    /// Combined ranking weight for a canonical skill (category weight times
    /// skill weight). Unknown skills get a neutral weight.
    pub fn weight_of(&self, skill_name: &str) -> f32 {
        for (category, skill) in self.skills() {
            if skill.name.eq_ignore_ascii_case(skill_name) {
                return category.weight * skill.weight;
            }
        }
        1.0
    }

    /// Built-in taxonomy for machine-learning interview preparation.
    pub fn builtin() -> Self {
        fn skill(name: &str, synonyms: &[&str], weight: f32) -> Skill {
            Skill {
                name: name.to_string(),
                synonyms: synonyms.iter().map(|s| s.to_string()).collect(),
                weight,
            }
        }

        let categories = vec![
            SkillCategory {
                id: "ml_fundamentals".to_string(),
                name: "ML Fundamentals".to_string(),
                weight: 1.3,
                skills: vec![
                    skill("Linear Regression", &[], 1.0),
                    skill("Logistic Regression", &[], 1.0),
                    skill("Decision Trees", &["decision tree"], 1.0),
                    skill("Random Forest", &["random forests"], 1.0),
                    skill("XGBoost", &[], 1.0),
                    skill("LightGBM", &[], 0.8),
                    skill("SVM", &["support vector machine", "support vector machines"], 0.9),
                    skill("K-Means", &["kmeans", "k means clustering"], 0.9),
                    skill("PCA", &["principal component analysis"], 0.9),
                    skill("Regularization", &["l1 regularization", "l2 regularization"], 1.1),
                    skill("Bias-Variance Tradeoff", &["bias variance"], 1.1),
                    skill("Cross-Validation", &["cross validation", "k-fold"], 1.0),
                    skill("Feature Engineering", &[], 1.1),
                    skill("Evaluation Metrics", &["precision", "recall", "f1 score", "auc"], 1.1),
                    skill("Probability", &[], 1.0),
                    skill("Statistics", &["statistical analysis"], 1.0),
                    skill("Linear Algebra", &[], 0.9),
                    skill("Bayesian Methods", &["bayesian"], 0.8),
                    skill("Causal Inference", &[], 0.8),
                    skill("Experimental Design", &[], 0.8),
                ],
            },
            SkillCategory {
                id: "deep_learning".to_string(),
                name: "Deep Learning".to_string(),
                weight: 1.2,
                skills: vec![
                    skill("Neural Networks", &["neural network", "backpropagation"], 1.1),
                    skill("CNN", &["convolutional neural network", "convolutional neural networks"], 1.0),
                    skill("RNN", &["recurrent neural network", "recurrent neural networks"], 0.9),
                    skill("LSTM", &[], 0.9),
                    skill("Transformer", &["transformers"], 1.2),
                    skill("Attention Mechanism", &["attention", "self-attention"], 1.1),
                    skill("BERT", &[], 1.0),
                    skill("GPT", &[], 1.0),
                    skill("GAN", &["generative adversarial network", "generative adversarial networks"], 0.8),
                    skill("VAE", &["variational autoencoder", "variational autoencoders"], 0.8),
                    skill("Diffusion Models", &["diffusion", "diffusion model"], 1.0),
                    skill("Optimizers", &["sgd", "adam optimizer"], 0.9),
                    skill("Dropout", &[], 0.8),
                    skill("Batch Normalization", &["batchnorm", "batch norm"], 0.8),
                    skill("Transfer Learning", &[], 0.9),
                    skill("Fine-tuning", &["finetuning", "fine tuning"], 1.0),
                    skill("Distributed Training", &["data parallelism", "model parallelism"], 0.9),
                    skill("PyTorch", &[], 1.2),
                    skill("TensorFlow", &[], 1.0),
                    skill("scikit-learn", &["sklearn"], 1.0),
                ],
            },
            SkillCategory {
                id: "nlp".to_string(),
                name: "Natural Language Processing".to_string(),
                weight: 1.1,
                skills: vec![
                    skill("Natural Language Processing", &["nlp"], 1.1),
                    skill("LLM", &["llms", "large language model", "large language models"], 1.2),
                    skill("RAG", &["retrieval augmented generation", "retrieval-augmented generation"], 1.1),
                    skill("Prompt Engineering", &[], 0.9),
                    skill("RLHF", &["reinforcement learning from human feedback"], 0.9),
                    skill("HuggingFace Transformers", &["huggingface", "hugging face"], 0.9),
                    skill("NER", &["named entity recognition"], 0.8),
                    skill("Sentiment Analysis", &[], 0.8),
                    skill("Machine Translation", &[], 0.7),
                    skill("Question Answering", &[], 0.8),
                ],
            },
            SkillCategory {
                id: "computer_vision".to_string(),
                name: "Computer Vision".to_string(),
                weight: 1.0,
                skills: vec![
                    skill("Computer Vision", &["cv"], 1.1),
                    skill("Object Detection", &[], 1.0),
                    skill("YOLO", &[], 0.8),
                    skill("ResNet", &[], 0.8),
                    skill("ViT", &["vision transformer", "vision transformers"], 0.9),
                    skill("Image Segmentation", &["semantic segmentation"], 0.9),
                    skill("OCR", &["optical character recognition"], 0.7),
                    skill("Face Recognition", &["facial recognition"], 0.7),
                    skill("Video Understanding", &[], 0.7),
                    skill("3D Vision", &["3d reconstruction"], 0.7),
                ],
            },
            SkillCategory {
                id: "recommendation".to_string(),
                name: "Recommendation Systems".to_string(),
                weight: 1.0,
                skills: vec![
                    skill(
                        "Recommendation Systems",
                        &["recommendation system", "recommender system", "recommender systems", "recsys"],
                        1.1,
                    ),
                    skill("Collaborative Filtering", &[], 1.0),
                    skill("Matrix Factorization", &[], 0.9),
                    skill("Two-Tower Model", &["two tower", "two-tower"], 0.9),
                    skill("Wide & Deep", &["wide and deep"], 0.8),
                    skill("Ranking", &["learning to rank"], 1.0),
                    skill("Retrieval", &["candidate retrieval"], 0.9),
                    skill("Multi-task Learning", &["multitask learning", "multi-task"], 0.8),
                    skill("Real-time Recommendation", &["real-time serving"], 0.8),
                ],
            },
            SkillCategory {
                id: "mlops".to_string(),
                name: "MLOps & Infrastructure".to_string(),
                weight: 1.1,
                skills: vec![
                    skill("Docker", &[], 1.0),
                    skill("Kubernetes", &["k8s"], 1.0),
                    skill("MLflow", &[], 0.9),
                    skill("Kubeflow", &[], 0.8),
                    skill("Airflow", &[], 0.9),
                    skill("CI/CD", &["cicd", "continuous integration"], 0.9),
                    skill("Model Serving", &["model deployment"], 1.0),
                    skill("Feature Store", &["feature stores"], 0.9),
                    skill("A/B Testing", &["ab testing", "a/b test"], 1.1),
                    skill("Model Monitoring", &["model observability"], 0.9),
                ],
            },
            SkillCategory {
                id: "data_engineering".to_string(),
                name: "Data Engineering".to_string(),
                weight: 0.9,
                skills: vec![
                    skill("Spark", &["apache spark", "pyspark"], 1.0),
                    skill("Hadoop", &[], 0.7),
                    skill("Kafka", &["apache kafka"], 0.9),
                    skill("Redis", &[], 0.8),
                    skill("SQL", &[], 1.1),
                    skill("BigQuery", &[], 0.8),
                    skill("Data Pipelines", &["data pipeline", "etl"], 1.0),
                ],
            },
            SkillCategory {
                id: "cloud".to_string(),
                name: "Cloud Platforms".to_string(),
                weight: 0.8,
                skills: vec![
                    skill("AWS", &["amazon web services"], 1.0),
                    skill("GCP", &["google cloud", "google cloud platform"], 1.0),
                    skill("Azure", &[], 0.9),
                    skill("SageMaker", &[], 0.8),
                    skill("Vertex AI", &[], 0.8),
                ],
            },
            SkillCategory {
                id: "programming".to_string(),
                name: "Programming".to_string(),
                weight: 1.0,
                skills: vec![
                    skill("Python", &[], 1.2),
                    skill("C++", &["cpp"], 0.9),
                    skill("Java", &[], 0.8),
                    skill("Scala", &[], 0.7),
                    skill("Rust", &[], 0.7),
                    skill("Git", &[], 0.8),
                ],
            },
        ];

        SkillTaxonomy { categories }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_builtin_taxonomy_is_valid() {
        let taxonomy = SkillTaxonomy::builtin();
        assert!(taxonomy.validate().is_ok());
        assert!(taxonomy.skill_count() > 50);
    }

    #[test]
    fn test_category_lookup() {
        let taxonomy = SkillTaxonomy::builtin();
        let category = taxonomy.category_of("Transformer").unwrap();
        assert_eq!(category.id, "deep_learning");
        assert!(taxonomy.category_of("Underwater Basket Weaving").is_none());
    }

    #[test]
    fn test_weight_combines_category_and_skill() {
        let taxonomy = SkillTaxonomy::builtin();
        let weight = taxonomy.weight_of("Regularization");
        assert!((weight - 1.3 * 1.1).abs() < 1e-6);
        assert_eq!(taxonomy.weight_of("not a skill"), 1.0);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"categories": [{{"id": "ml_fundamentals", "name": "ML Fundamentals",
                "skills": [{{"name": "Regularization"}},
                           {{"name": "Bias-Variance Tradeoff", "synonyms": ["bias variance"]}}]}}]}}"#
        )
        .unwrap();

        let taxonomy = SkillTaxonomy::load(file.path()).unwrap();
        assert_eq!(taxonomy.skill_count(), 2);
        assert_eq!(taxonomy.categories[0].weight, 1.0);
    }

    #[test]
    fn test_load_rejects_malformed_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{not json").unwrap();

        let result = SkillTaxonomy::load(file.path());
        assert!(matches!(result, Err(SkillGapError::Taxonomy(_))));
    }

    #[test]
    fn test_validate_rejects_duplicates() {
        let taxonomy = SkillTaxonomy {
            categories: vec![SkillCategory {
                id: "a".to_string(),
                name: "A".to_string(),
                weight: 1.0,
                skills: vec![
                    Skill {
                        name: "Python".to_string(),
                        synonyms: vec![],
                        weight: 1.0,
                    },
                    Skill {
                        name: "python".to_string(),
                        synonyms: vec![],
                        weight: 1.0,
                    },
                ],
            }],
        };
        assert!(taxonomy.validate().is_err());
    }
}
