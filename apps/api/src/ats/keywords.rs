//! Fixed keyword lists and point values for the section-presence gates.
//!
//! Lists are matched as lower-case substrings of the lower-cased résumé text,
//! so "skills" also fires inside "upskills". Changing a list changes scores,
//! keep them stable.

pub const CONTACT_EMAIL_POINTS: u32 = 10;
pub const CONTACT_PHONE_POINTS: u32 = 10;
pub const SKILLS_POINTS: u32 = 25;
pub const EXPERIENCE_POINTS: u32 = 25;
pub const EDUCATION_POINTS: u32 = 15;
pub const KEYWORDS_MAX_POINTS: f64 = 10.0;
pub const FORMATTING_POINTS: u32 = 5;

/// Job-description words must be longer than this (in chars) to count.
pub const MIN_KEYWORD_CHARS: usize = 3;
/// Formatting requires strictly more characters than this.
pub const FORMATTING_MIN_CHARS: usize = 200;
/// Formatting requires strictly more newline-separated lines than this.
pub const FORMATTING_MIN_LINES: usize = 10;

pub const SKILLS_KEYWORDS: &[&str] = &["skills", "technical skills", "competencies", "expertise"];

pub const EXPERIENCE_KEYWORDS: &[&str] = &["experience", "work history", "employment", "career"];

pub const EDUCATION_KEYWORDS: &[&str] = &[
    "education",
    "degree",
    "university",
    "college",
    "certification",
];

/// A résumé section detected by keyword presence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Skills,
    Experience,
    Education,
}

impl Section {
    pub fn keywords(self) -> &'static [&'static str] {
        match self {
            Section::Skills => SKILLS_KEYWORDS,
            Section::Experience => EXPERIENCE_KEYWORDS,
            Section::Education => EDUCATION_KEYWORDS,
        }
    }

    pub fn points(self) -> u32 {
        match self {
            Section::Skills => SKILLS_POINTS,
            Section::Experience => EXPERIENCE_POINTS,
            Section::Education => EDUCATION_POINTS,
        }
    }
}
