//! Job requirements profile — the configuration data a screening is judged against.

use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

/// Everything position-specific that goes into the assessment prompt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequirementsProfile {
    /// Position title, e.g. "machine learning engineer".
    pub position: String,
    /// Multi-paragraph minimum qualifications text.
    pub requirements: String,
    /// Areas the model must assess one by one before its summary.
    pub assessment_areas: Vec<String>,
}

impl RequirementsProfile {
    /// Loads a profile from a JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read requirements profile {}", path.display()))?;
        let profile: RequirementsProfile = serde_json::from_str(&raw)
            .with_context(|| format!("Invalid requirements profile {}", path.display()))?;
        profile.validate()?;
        Ok(profile)
    }

    pub fn validate(&self) -> Result<()> {
        if self.position.trim().is_empty() {
            bail!("Requirements profile has an empty position");
        }
        if self.requirements.trim().is_empty() {
            bail!("Requirements profile '{}' has no requirements text", self.position);
        }
        if self.assessment_areas.iter().any(|a| a.trim().is_empty()) {
            bail!("Requirements profile '{}' has a blank assessment area", self.position);
        }
        Ok(())
    }
}

impl Default for RequirementsProfile {
    fn default() -> Self {
        Self {
            position: "machine learning engineer".to_string(),
            requirements: ML_ENGINEER_REQUIREMENTS.to_string(),
            assessment_areas: [
                "Education",
                "Programming experience",
                "Machine learning experience",
                "Software engineering experience",
                "Problem-solving skills",
                "Communication skills",
                "Portfolio",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
        }
    }
}

const ML_ENGINEER_REQUIREMENTS: &str = "\
Education: Bachelor's or Master's degree in computer science, engineering, mathematics, or related fields; coursework in machine learning or data science is preferred.
Programming: 2+ years of experience with Python, R, or similar languages; proficiency in TensorFlow, PyTorch, or other ML frameworks.
Machine Learning: 2+ years of practical experience with ML algorithms, model deployment, and optimization.
Software Engineering: Familiarity with Git, Agile methodologies, and collaborative tools; experience in software development teams for at least 2-3 years.
Problem-Solving: Strong analytical skills, with a track record of solving complex problems using machine learning techniques.
Communication: Effective communicator across technical and non-technical audiences; experience working in cross-functional teams.
Portfolio: Demonstrated projects in machine learning through work experience, academic research, or personal projects; contributions to open-source projects or participation in hackathons.";
