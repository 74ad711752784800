//! Keyword rubrics, five ordered maturity levels per dimension.
//!
//! Evaluated top-down (level 5 first); the first satisfied level wins. The
//! keyword lists come from the domain calibration and are matched
//! case-insensitively as substrings of the evidence text.

use super::ScoreLevel;
use crate::dimension::Dimension;

pub(crate) struct CriteriaRow {
    pub level: ScoreLevel,
    pub keywords: &'static [&'static str],
    pub min_keyword_matches: usize,
    /// Normalised signal gate in [0, 1]; 0.0 means no numeric gate.
    pub quantitative_threshold: f64,
}

pub(crate) fn criteria_for(dimension: Dimension) -> &'static [CriteriaRow; 5] {
    match dimension {
        Dimension::DataInfrastructure => &DATA_INFRASTRUCTURE,
        Dimension::AiGovernance => &AI_GOVERNANCE,
        Dimension::TechnologyStack => &TECHNOLOGY_STACK,
        Dimension::TalentSkills => &TALENT_SKILLS,
        Dimension::LeadershipVision => &LEADERSHIP_VISION,
        Dimension::UseCasePortfolio => &USE_CASE_PORTFOLIO,
        Dimension::CultureChange => &CULTURE_CHANGE,
    }
}

const DATA_INFRASTRUCTURE: [CriteriaRow; 5] = [
    CriteriaRow {
        level: ScoreLevel::Excellent,
        keywords: &[
            "data lakehouse",
            "data mesh",
            "feature store",
            "vector database",
            "real-time streaming",
            "petabyte",
            "data fabric",
            "unified data platform",
            "distributed computing",
            "kafka",
            "delta lake",
            "iceberg",
        ],
        min_keyword_matches: 4,
        quantitative_threshold: 0.80,
    },
    CriteriaRow {
        level: ScoreLevel::Good,
        keywords: &[
            "data warehouse",
            "data lake",
            "data pipeline",
            "databricks",
            "snowflake",
            "spark",
            "data catalog",
            "data governance",
            "data quality",
            "etl",
            "elt",
            "cloud storage",
        ],
        min_keyword_matches: 3,
        quantitative_threshold: 0.60,
    },
    CriteriaRow {
        level: ScoreLevel::Adequate,
        keywords: &[
            "database",
            "data integration",
            "sql",
            "data platform",
            "business intelligence",
            "reporting",
            "analytics",
            "centralized data",
        ],
        min_keyword_matches: 2,
        quantitative_threshold: 0.40,
    },
    CriteriaRow {
        level: ScoreLevel::Developing,
        keywords: &[
            "data collection",
            "spreadsheet",
            "legacy system",
            "siloed data",
            "manual process",
            "limited access",
            "inconsistent data",
        ],
        min_keyword_matches: 1,
        quantitative_threshold: 0.20,
    },
    CriteriaRow {
        level: ScoreLevel::Nascent,
        keywords: &[
            "no data strategy",
            "paper-based",
            "ad hoc",
            "unstructured",
            "no governance",
        ],
        min_keyword_matches: 0,
        quantitative_threshold: 0.0,
    },
];

const AI_GOVERNANCE: [CriteriaRow; 5] = [
    CriteriaRow {
        level: ScoreLevel::Excellent,
        keywords: &[
            "ai ethics committee",
            "responsible ai",
            "algorithmic accountability",
            "model risk management",
            "ai audit",
            "bias mitigation",
            "explainability",
            "ai policy",
            "fairness framework",
            "model governance",
            "ai compliance",
        ],
        min_keyword_matches: 4,
        quantitative_threshold: 0.80,
    },
    CriteriaRow {
        level: ScoreLevel::Good,
        keywords: &[
            "ai guidelines",
            "model monitoring",
            "fairness testing",
            "privacy by design",
            "ai oversight",
            "governance committee",
            "risk assessment",
            "ai risk",
            "model documentation",
        ],
        min_keyword_matches: 3,
        quantitative_threshold: 0.60,
    },
    CriteriaRow {
        level: ScoreLevel::Adequate,
        keywords: &[
            "data privacy",
            "gdpr",
            "compliance",
            "security controls",
            "regulation",
            "ai policy",
            "model review",
            "oversight",
        ],
        min_keyword_matches: 2,
        quantitative_threshold: 0.40,
    },
    CriteriaRow {
        level: ScoreLevel::Developing,
        keywords: &[
            "limited oversight",
            "informal review",
            "ad hoc compliance",
            "basic privacy",
            "awareness of risk",
        ],
        min_keyword_matches: 1,
        quantitative_threshold: 0.20,
    },
    CriteriaRow {
        level: ScoreLevel::Nascent,
        keywords: &[
            "no governance",
            "no policy",
            "unregulated",
            "no oversight",
            "reactive",
        ],
        min_keyword_matches: 0,
        quantitative_threshold: 0.0,
    },
];

const TECHNOLOGY_STACK: [CriteriaRow; 5] = [
    CriteriaRow {
        level: ScoreLevel::Excellent,
        keywords: &[
            "mlops",
            "kubernetes",
            "cloud-native ml",
            "model serving",
            "real-time inference",
            "llm deployment",
            "gpu cluster",
            "automl",
            "vector search",
            "feature store",
            "ray",
            "kubeflow",
        ],
        min_keyword_matches: 4,
        quantitative_threshold: 0.80,
    },
    CriteriaRow {
        level: ScoreLevel::Good,
        keywords: &[
            "sagemaker",
            "vertex ai",
            "azure ml",
            "tensorflow",
            "pytorch",
            "mlflow",
            "databricks",
            "airflow",
            "huggingface",
            "openai",
            "langchain",
            "anthropic",
        ],
        min_keyword_matches: 3,
        quantitative_threshold: 0.60,
    },
    CriteriaRow {
        level: ScoreLevel::Adequate,
        keywords: &[
            "python",
            "scikit-learn",
            "cloud platform",
            "spark",
            "data engineering",
            "api",
            "basic machine learning",
            "analytics platform",
        ],
        min_keyword_matches: 2,
        quantitative_threshold: 0.40,
    },
    CriteriaRow {
        level: ScoreLevel::Developing,
        keywords: &[
            "basic analytics",
            "excel",
            "legacy tools",
            "on-premise",
            "limited cloud",
            "no ml tools",
        ],
        min_keyword_matches: 1,
        quantitative_threshold: 0.20,
    },
    CriteriaRow {
        level: ScoreLevel::Nascent,
        keywords: &[
            "manual processes",
            "outdated tools",
            "no cloud",
            "no analytics",
            "spreadsheet only",
        ],
        min_keyword_matches: 0,
        quantitative_threshold: 0.0,
    },
];

const TALENT_SKILLS: [CriteriaRow; 5] = [
    CriteriaRow {
        level: ScoreLevel::Excellent,
        keywords: &[
            "ai research team",
            "chief ai officer",
            "ml engineer",
            "data scientist",
            "nlp specialist",
            "ai architect",
            "phd researcher",
            "applied ai",
            "deep learning expert",
            "llm engineer",
            "mlops engineer",
        ],
        min_keyword_matches: 4,
        quantitative_threshold: 0.80,
    },
    CriteriaRow {
        level: ScoreLevel::Good,
        keywords: &[
            "data science team",
            "machine learning engineer",
            "data engineer",
            "ai talent",
            "analytics team",
            "ai hiring",
            "ml expertise",
            "computer vision",
            "reinforcement learning",
        ],
        min_keyword_matches: 3,
        quantitative_threshold: 0.60,
    },
    CriteriaRow {
        level: ScoreLevel::Adequate,
        keywords: &[
            "data analyst",
            "software engineer",
            "technical team",
            "python developer",
            "analytics capability",
            "data skills",
        ],
        min_keyword_matches: 2,
        quantitative_threshold: 0.40,
    },
    CriteriaRow {
        level: ScoreLevel::Developing,
        keywords: &[
            "limited technical staff",
            "generalist team",
            "upskilling",
            "training program",
            "some data skills",
        ],
        min_keyword_matches: 1,
        quantitative_threshold: 0.20,
    },
    CriteriaRow {
        level: ScoreLevel::Nascent,
        keywords: &[
            "no technical talent",
            "no data skills",
            "no ai hiring",
            "skills gap",
            "no data team",
        ],
        min_keyword_matches: 0,
        quantitative_threshold: 0.0,
    },
];

const LEADERSHIP_VISION: [CriteriaRow; 5] = [
    CriteriaRow {
        level: ScoreLevel::Excellent,
        keywords: &[
            "chief ai officer",
            "caio",
            "ai strategy",
            "board ai committee",
            "ai vision",
            "ai roadmap",
            "executive ai commitment",
            "digital transformation agenda",
            "strategic ai priority",
            "ai-first",
            "technology-driven strategy",
        ],
        min_keyword_matches: 4,
        quantitative_threshold: 0.80,
    },
    CriteriaRow {
        level: ScoreLevel::Good,
        keywords: &[
            "cto",
            "chief digital officer",
            "technology committee",
            "ai initiative",
            "executive sponsor",
            "digital strategy",
            "leadership commitment",
            "cdo",
            "technology investment",
        ],
        min_keyword_matches: 3,
        quantitative_threshold: 0.60,
    },
    CriteriaRow {
        level: ScoreLevel::Adequate,
        keywords: &[
            "digital awareness",
            "technology officer",
            "innovation focus",
            "data leadership",
            "technology governance",
            "executive team",
        ],
        min_keyword_matches: 2,
        quantitative_threshold: 0.40,
    },
    CriteriaRow {
        level: ScoreLevel::Developing,
        keywords: &[
            "limited executive support",
            "ad hoc technology decisions",
            "some digital awareness",
            "board",
            "officer",
        ],
        min_keyword_matches: 1,
        quantitative_threshold: 0.20,
    },
    CriteriaRow {
        level: ScoreLevel::Nascent,
        keywords: &[
            "no digital leadership",
            "no technology strategy",
            "unfamiliar with ai",
            "no innovation agenda",
        ],
        min_keyword_matches: 0,
        quantitative_threshold: 0.0,
    },
];

const USE_CASE_PORTFOLIO: [CriteriaRow; 5] = [
    CriteriaRow {
        level: ScoreLevel::Excellent,
        keywords: &[
            "ai product",
            "ml in production",
            "generative ai",
            "deployed model",
            "ai-driven revenue",
            "predictive analytics at scale",
            "autonomous systems",
            "ai core business",
            "llm application",
            "recommendation system at scale",
        ],
        min_keyword_matches: 4,
        quantitative_threshold: 0.80,
    },
    CriteriaRow {
        level: ScoreLevel::Good,
        keywords: &[
            "ai pilot",
            "proof of concept",
            "automation",
            "recommendation system",
            "fraud detection",
            "nlp application",
            "ai tool deployment",
            "predictive model",
            "computer vision application",
        ],
        min_keyword_matches: 3,
        quantitative_threshold: 0.60,
    },
    CriteriaRow {
        level: ScoreLevel::Adequate,
        keywords: &[
            "analytics",
            "reporting automation",
            "process optimization",
            "basic prediction",
            "rule-based automation",
            "rpa",
            "digital workflow",
        ],
        min_keyword_matches: 2,
        quantitative_threshold: 0.40,
    },
    CriteriaRow {
        level: ScoreLevel::Developing,
        keywords: &[
            "exploring ai",
            "experimenting",
            "early automation",
            "limited ai use",
            "proof of concept planned",
        ],
        min_keyword_matches: 1,
        quantitative_threshold: 0.20,
    },
    CriteriaRow {
        level: ScoreLevel::Nascent,
        keywords: &[
            "no ai use cases",
            "manual processes",
            "no automation",
            "traditional methods only",
            "no digital initiatives",
        ],
        min_keyword_matches: 0,
        quantitative_threshold: 0.0,
    },
];

const CULTURE_CHANGE: [CriteriaRow; 5] = [
    CriteriaRow {
        level: ScoreLevel::Excellent,
        keywords: &[
            "data-driven culture",
            "ai-first",
            "innovation culture",
            "experimentation",
            "learning organization",
            "hackathon",
            "research culture",
            "fail fast",
            "psychological safety",
            "continuous improvement",
            "growth mindset",
        ],
        min_keyword_matches: 4,
        quantitative_threshold: 0.80,
    },
    CriteriaRow {
        level: ScoreLevel::Good,
        keywords: &[
            "innovation encouraged",
            "continuous learning",
            "digital mindset",
            "data-informed decisions",
            "cross-functional collaboration",
            "technology adoption",
            "agile",
            "open to change",
        ],
        min_keyword_matches: 3,
        quantitative_threshold: 0.60,
    },
    CriteriaRow {
        level: ScoreLevel::Adequate,
        keywords: &[
            "change management",
            "digital awareness",
            "some innovation",
            "technology friendly",
            "learning programs",
            "collaborative",
        ],
        min_keyword_matches: 2,
        quantitative_threshold: 0.40,
    },
    CriteriaRow {
        level: ScoreLevel::Developing,
        keywords: &[
            "resistance to change",
            "limited collaboration",
            "hierarchical",
            "risk-averse",
            "slow adoption",
        ],
        min_keyword_matches: 1,
        quantitative_threshold: 0.20,
    },
    CriteriaRow {
        level: ScoreLevel::Nascent,
        keywords: &[
            "no innovation culture",
            "change resistant",
            "siloed",
            "traditional mindset",
            "no learning culture",
        ],
        min_keyword_matches: 0,
        quantitative_threshold: 0.0,
    },
];
