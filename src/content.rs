use chrono::{DateTime, Datelike};
use rust_embed::Embed;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use thiserror::Error;

pub const CONTENT_FILE: &str = "portfolio.json";

pub static PORTFOLIO: LazyLock<Result<Portfolio, ContentError>> = LazyLock::new(|| {
    let res = Portfolio::load();
    if let Err(e) = &res {
        log::error!("couldn't load portfolio content: {e}");
    }
    res
});

#[derive(Embed)]
#[folder = "content"]
pub struct ContentAssets;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ContentError {
    #[error("Content file {0} not found")]
    NotFound(String),
    #[error("Content file is not valid UTF-8")]
    Encoding,
    #[error("Couldn't parse content: {0}")]
    ParseError(String),
    #[error("Invalid content: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Portfolio {
    pub profile: Profile,
    pub skills: Vec<SkillCard>,
    pub technical_skills: Vec<TechnicalSkill>,
    pub projects: Vec<Project>,
    pub education: Vec<EducationItem>,
    pub socials: Vec<Social>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    pub name: String,
    pub initials: String,
    pub role: String,
    pub headline: String,
    pub location: String,
    pub email: String,
    pub availability: String,
    pub about: Vec<String>,
    pub phrases: Vec<String>,
    pub resume: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SkillIcon {
    Code,
    User,
    Github,
}

impl SkillIcon {
    pub fn class(&self) -> &'static str {
        match self {
            SkillIcon::Code => "extra-code",
            SkillIcon::User => "extra-user",
            SkillIcon::Github => "devicon-github-plain",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillCard {
    pub icon: SkillIcon,
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TechnicalSkill {
    pub name: String,
    pub level: u8,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    #[default]
    Image,
    Video,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    pub title: String,
    pub category: String,
    pub media: String,
    #[serde(default)]
    pub media_kind: MediaKind,
    pub description: String,
    pub link: String,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub badge: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EducationItem {
    pub years: String,
    pub title: String,
    pub organization: String,
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Social {
    pub name: String,
    pub url: String,
    pub icon: String,
}

impl Portfolio {
    pub fn load() -> Result<Self, ContentError> {
        let file = ContentAssets::get(CONTENT_FILE)
            .ok_or_else(|| ContentError::NotFound(CONTENT_FILE.to_string()))?;
        let text = std::str::from_utf8(&file.data).map_err(|_| ContentError::Encoding)?;
        Self::from_json(text)
    }

    pub fn from_json(text: &str) -> Result<Self, ContentError> {
        let portfolio: Portfolio =
            serde_json::from_str(text).map_err(|e| ContentError::ParseError(e.to_string()))?;
        portfolio.validate()?;
        Ok(portfolio)
    }

    fn validate(&self) -> Result<(), ContentError> {
        if self.projects.is_empty() {
            return Err(ContentError::Invalid("no projects".to_string()));
        }
        if let Some(skill) = self.technical_skills.iter().find(|s| s.level > 100) {
            return Err(ContentError::Invalid(format!(
                "skill level of {} is {}%",
                skill.name, skill.level
            )));
        }
        Ok(())
    }
}

/// Year the site was built, stamped by `build.rs`.
pub fn build_year() -> Option<i32> {
    DateTime::parse_from_rfc3339(env!("BUILD_TIME"))
        .ok()
        .map(|t| t.year())
}
