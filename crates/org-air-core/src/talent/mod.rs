//! Talent concentration (key-person risk) from job postings and reviews.
//!
//! TC = 0 means capability is spread across many people; TC = 1 means it
//! hangs on one person. The V^R calculator discounts readiness when TC
//! climbs past its threshold.

use crate::decimal::{clamp_unit, to_decimal};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::debug;

/// Job titles that indicate senior AI leadership.
const SENIOR_KEYWORDS: &[&str] = &[
    "principal",
    "staff",
    "director",
    "vp",
    "vice president",
    "head of",
    "head,",
    "chief",
    "fellow",
];

/// Mid-level titles; checked only after the senior list misses.
const MID_KEYWORDS: &[&str] = &["senior", "lead", "manager", "sr."];

const ENTRY_KEYWORDS: &[&str] = &["junior", "associate", "entry", "intern", "jr."];

/// Role keywords that make a posting count as AI-related.
const AI_ROLE_KEYWORDS: &[&str] = &[
    "machine learning",
    "ml engineer",
    "data scientist",
    "artificial intelligence",
    "deep learning",
    "nlp",
    "computer vision",
    "mlops",
    "ai engineer",
    "data engineer",
    "llm",
    "generative ai",
    "neural network",
];

/// Skills tracked for the skill-diversity measurement.
const TRACKED_SKILLS: &[&str] = &[
    "python",
    "pytorch",
    "tensorflow",
    "scikit-learn",
    "spark",
    "hadoop",
    "kubernetes",
    "docker",
    "aws sagemaker",
    "azure ml",
    "gcp vertex",
    "huggingface",
    "langchain",
    "openai",
    "pandas",
    "numpy",
    "sql",
    "databricks",
    "mlflow",
    "kubeflow",
    "feature store",
    "model registry",
];

/// A raw job posting as supplied by the caller.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct JobPosting {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub ai_skills: Vec<String>,
    /// Pre-classification flag from an upstream collector.
    #[serde(default)]
    pub is_ai_related: bool,
}

/// Categorised analysis of AI job postings.
#[derive(Debug, Clone, Default, Serialize)]
pub struct JobAnalysis {
    pub total_ai_jobs: u32,
    pub senior_ai_jobs: u32,
    pub mid_ai_jobs: u32,
    pub entry_ai_jobs: u32,
    pub unique_skills: BTreeSet<String>,
}

/// Computes the talent concentration ratio.
///
/// TC = 0.4 * leadership_ratio + 0.3 * team_size_factor
///    + 0.2 * skill_concentration + 0.1 * individual_factor,
/// bounded to [0, 1].
#[derive(Debug, Clone, Copy, Default)]
pub struct TalentConcentrationCalculator;

impl TalentConcentrationCalculator {
    const LEADERSHIP_WEIGHT: f64 = 0.4;
    const TEAM_SIZE_WEIGHT: f64 = 0.3;
    const SKILL_CONC_WEIGHT: f64 = 0.2;
    const INDIVIDUAL_WEIGHT: f64 = 0.1;
    /// At or above this many unique skills, concentration reads as low.
    const SKILL_DIVERSITY_MAX: f64 = 15.0;
    const TC_DEFAULT_IF_NO_DATA: f64 = 0.5;

    pub fn new() -> Self {
        Self
    }

    /// Talent concentration in [0, 1], quantized to engine precision.
    ///
    /// `individual_mentions` and `review_count` come from employee-review
    /// analysis; a zero review count is treated as one to keep the ratio
    /// defined.
    pub fn calculate_tc(
        &self,
        analysis: &JobAnalysis,
        individual_mentions: u32,
        review_count: u32,
    ) -> Decimal {
        let leadership_ratio = if analysis.total_ai_jobs > 0 {
            f64::from(analysis.senior_ai_jobs) / f64::from(analysis.total_ai_jobs)
        } else {
            Self::TC_DEFAULT_IF_NO_DATA
        };

        let team_size_factor =
            (1.0 / (f64::from(analysis.total_ai_jobs) + 0.1).sqrt()).min(1.0);

        let skill_concentration =
            (1.0 - analysis.unique_skills.len() as f64 / Self::SKILL_DIVERSITY_MAX).max(0.0);

        let individual_factor =
            (f64::from(individual_mentions) / f64::from(review_count.max(1))).min(1.0);

        let tc_raw = Self::LEADERSHIP_WEIGHT * leadership_ratio
            + Self::TEAM_SIZE_WEIGHT * team_size_factor
            + Self::SKILL_CONC_WEIGHT * skill_concentration
            + Self::INDIVIDUAL_WEIGHT * individual_factor;

        let tc = clamp_unit(to_decimal(tc_raw));
        debug!(
            total_ai_jobs = analysis.total_ai_jobs,
            senior_ai_jobs = analysis.senior_ai_jobs,
            unique_skills = analysis.unique_skills.len(),
            %tc,
            "talent concentration calculated"
        );
        tc
    }

    /// Bucket postings into senior/mid/entry AI roles and collect tracked
    /// skills. Postings that match no AI role keyword and carry no
    /// pre-classification flag are ignored.
    pub fn analyze_job_postings(&self, postings: &[JobPosting]) -> JobAnalysis {
        let mut analysis = JobAnalysis::default();

        for posting in postings {
            let title = posting.title.to_lowercase();
            let text = format!("{} {}", title, posting.description.to_lowercase());

            let ai_related = AI_ROLE_KEYWORDS.iter().any(|kw| text.contains(kw))
                || posting.is_ai_related;
            if !ai_related {
                continue;
            }

            analysis.total_ai_jobs += 1;

            if SENIOR_KEYWORDS.iter().any(|kw| title.contains(kw)) {
                analysis.senior_ai_jobs += 1;
            } else if MID_KEYWORDS.iter().any(|kw| title.contains(kw)) {
                analysis.mid_ai_jobs += 1;
            } else if ENTRY_KEYWORDS.iter().any(|kw| title.contains(kw)) {
                analysis.entry_ai_jobs += 1;
            }
            // Unclassified titles still count toward the AI total.

            for skill in &posting.ai_skills {
                let skill = skill.to_lowercase();
                if TRACKED_SKILLS.contains(&skill.as_str()) {
                    analysis.unique_skills.insert(skill);
                }
            }
            for skill in TRACKED_SKILLS {
                if text.contains(skill) {
                    analysis.unique_skills.insert((*skill).to_string());
                }
            }
        }

        debug!(
            total_postings = postings.len(),
            total_ai = analysis.total_ai_jobs,
            senior = analysis.senior_ai_jobs,
            mid = analysis.mid_ai_jobs,
            entry = analysis.entry_ai_jobs,
            unique_skills = analysis.unique_skills.len(),
            "job postings analyzed"
        );
        analysis
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn posting(title: &str, description: &str) -> JobPosting {
        JobPosting {
            title: title.to_string(),
            description: description.to_string(),
            ai_skills: Vec::new(),
            is_ai_related: false,
        }
    }

    #[test]
    fn tc_is_always_inside_the_unit_interval() {
        let calc = TalentConcentrationCalculator::new();
        let all_senior = JobAnalysis {
            total_ai_jobs: 3,
            senior_ai_jobs: 3,
            ..JobAnalysis::default()
        };
        let tc = calc.calculate_tc(&all_senior, 100, 1);
        assert!(tc >= Decimal::ZERO && tc <= Decimal::ONE, "got {tc}");
    }

    #[test]
    fn no_job_data_uses_the_neutral_leadership_default() {
        let calc = TalentConcentrationCalculator::new();
        let tc = calc.calculate_tc(&JobAnalysis::default(), 0, 1);
        // 0.4*0.5 + 0.3*1.0 + 0.2*1.0 + 0.1*0 = 0.7
        assert_eq!(tc, dec!(0.7000));
    }

    #[test]
    fn more_unique_skills_lowers_concentration() {
        let calc = TalentConcentrationCalculator::new();
        let narrow = JobAnalysis {
            total_ai_jobs: 10,
            senior_ai_jobs: 2,
            unique_skills: ["python"].iter().map(|s| s.to_string()).collect(),
            ..JobAnalysis::default()
        };
        let broad = JobAnalysis {
            unique_skills: TRACKED_SKILLS.iter().map(|s| s.to_string()).collect(),
            ..narrow.clone()
        };
        assert!(calc.calculate_tc(&broad, 0, 10) < calc.calculate_tc(&narrow, 0, 10));
    }

    #[test]
    fn higher_senior_ratio_raises_concentration() {
        let calc = TalentConcentrationCalculator::new();
        let balanced = JobAnalysis {
            total_ai_jobs: 10,
            senior_ai_jobs: 2,
            ..JobAnalysis::default()
        };
        let top_heavy = JobAnalysis {
            senior_ai_jobs: 9,
            ..balanced.clone()
        };
        assert!(calc.calculate_tc(&top_heavy, 0, 10) > calc.calculate_tc(&balanced, 0, 10));
    }

    #[test]
    fn non_ai_postings_are_skipped() {
        let calc = TalentConcentrationCalculator::new();
        let analysis = calc.analyze_job_postings(&[
            posting("Office Manager", "front desk and scheduling"),
            posting("Accountant", "monthly close"),
        ]);
        assert_eq!(analysis.total_ai_jobs, 0);
    }

    #[test]
    fn preclassified_postings_count_without_keywords() {
        let calc = TalentConcentrationCalculator::new();
        let mut flagged = posting("Quantitative Researcher", "statistical modeling");
        flagged.is_ai_related = true;
        let analysis = calc.analyze_job_postings(&[flagged]);
        assert_eq!(analysis.total_ai_jobs, 1);
    }

    #[test]
    fn titles_bucket_by_seniority() {
        let calc = TalentConcentrationCalculator::new();
        let analysis = calc.analyze_job_postings(&[
            posting("Principal Machine Learning Engineer", ""),
            posting("Senior Data Scientist", ""),
            posting("Junior ML Engineer", "machine learning"),
            posting("Data Scientist", ""),
        ]);
        assert_eq!(analysis.total_ai_jobs, 4);
        assert_eq!(analysis.senior_ai_jobs, 1);
        assert_eq!(analysis.mid_ai_jobs, 1);
        assert_eq!(analysis.entry_ai_jobs, 1);
    }

    #[test]
    fn skills_collect_from_both_fields_and_text() {
        let calc = TalentConcentrationCalculator::new();
        let mut with_skills = posting(
            "ML Engineer",
            "production pytorch models orchestrated with kubeflow",
        );
        with_skills.ai_skills = vec!["Python".to_string(), "basket weaving".to_string()];
        let analysis = calc.analyze_job_postings(&[with_skills]);
        assert!(analysis.unique_skills.contains("python"));
        assert!(analysis.unique_skills.contains("pytorch"));
        assert!(analysis.unique_skills.contains("kubeflow"));
        assert!(!analysis.unique_skills.contains("basket weaving"));
    }
}
