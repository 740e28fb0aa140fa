//! Score engine: maps extracted résumé text (and an optional job description)
//! to a `ScoreReport`.
//!
//! Total over all string input: never panics, never errors. Degenerate input
//! (empty text, blank job description) just scores low in the affected fields.
//!
//! Algorithm:
//! 1. contact info: email regex → 10, phone regex → 10 (raw text)
//! 2. skills / experience / education: any keyword substring of the
//!    lower-cased text → full points, else 0
//! 3. keywords: job words longer than 3 chars found as exact résumé tokens,
//!    `matches / total_job_words × 10`, capped at 10
//! 4. formatting: > 200 chars AND > 10 lines → 5
//! 5. total = round(sum), grade from the rounded total

use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::ats::keywords::{
    Section, CONTACT_EMAIL_POINTS, CONTACT_PHONE_POINTS, FORMATTING_MIN_CHARS,
    FORMATTING_MIN_LINES, FORMATTING_POINTS, KEYWORDS_MAX_POINTS, MIN_KEYWORD_CHARS,
};
use crate::ats::report::{ScoreBreakdown, ScoreReport};

// ASCII word boundaries: an address glued to a CJK or accented letter still matches.
static EMAIL_RE: Lazy<regex::bytes::Regex> = Lazy::new(|| {
    regex::bytes::Regex::new(r"(?-u)\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Z|a-z]{2,}\b")
        .expect("email pattern is valid")
});

// Optional international prefix, then 3-3-4 digit groups with optional separators.
static PHONE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(\+[0-9]{1,3}[-.\s]?)?\(?[0-9]{3}\)?[-.\s]?[0-9]{3}[-.\s]?[0-9]{4}")
        .expect("phone pattern is valid")
});

/// Computes the ATS score for one résumé. `job_description = None` scores
/// `keywords` as exactly 0.
pub fn compute_score(resume_text: &str, job_description: Option<&str>) -> ScoreReport {
    let lowered = resume_text.to_lowercase();

    let breakdown = ScoreBreakdown {
        contact_info: score_contact_info(resume_text),
        skills: score_section(&lowered, Section::Skills),
        experience: score_section(&lowered, Section::Experience),
        education: score_section(&lowered, Section::Education),
        keywords: job_description
            .map(|jd| score_keywords(&lowered, jd))
            .unwrap_or(0.0),
        formatting: score_formatting(resume_text),
    };

    ScoreReport::from_breakdown(breakdown)
}

fn score_contact_info(text: &str) -> u32 {
    let email = if EMAIL_RE.is_match(text.as_bytes()) {
        CONTACT_EMAIL_POINTS
    } else {
        0
    };
    let phone = if PHONE_RE.is_match(text) {
        CONTACT_PHONE_POINTS
    } else {
        0
    };
    email + phone
}

/// All-or-nothing gate. `lowered` must already be lower-cased.
fn score_section(lowered: &str, section: Section) -> u32 {
    if section.keywords().iter().any(|kw| lowered.contains(kw)) {
        section.points()
    } else {
        0
    }
}

/// `lowered_resume` must already be lower-cased.
fn score_keywords(lowered_resume: &str, job_description: &str) -> f64 {
    let jd_lower = job_description.to_lowercase();
    let job_words: Vec<&str> = jd_lower.split_whitespace().collect();
    if job_words.is_empty() {
        return 0.0;
    }

    let resume_words: HashSet<&str> = lowered_resume.split_whitespace().collect();
    let matches = job_words
        .iter()
        .filter(|w| w.chars().count() > MIN_KEYWORD_CHARS && resume_words.contains(*w))
        .count();

    (matches as f64 / job_words.len() as f64 * KEYWORDS_MAX_POINTS).min(KEYWORDS_MAX_POINTS)
}

fn score_formatting(text: &str) -> u32 {
    let long_enough = text.chars().count() > FORMATTING_MIN_CHARS;
    let enough_lines = text.split('\n').count() > FORMATTING_MIN_LINES;
    if long_enough && enough_lines {
        FORMATTING_POINTS
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ats::report::Grade;

    /// Builds `lines` newline-joined lines totalling exactly `chars` characters.
    fn text_with_shape(chars: usize, lines: usize) -> String {
        let newlines = lines - 1;
        let body = chars - newlines;
        let per_line = body / lines;
        let mut out: Vec<String> = (0..lines).map(|_| "x".repeat(per_line)).collect();
        let remainder = body - per_line * lines;
        out.last_mut().unwrap().push_str(&"x".repeat(remainder));
        let joined = out.join("\n");
        assert_eq!(joined.chars().count(), chars);
        joined
    }

    #[test]
    fn test_empty_resume_scores_zero() {
        let report = compute_score("", None);
        assert_eq!(report.total_score, 0);
        assert_eq!(report.grade, Grade::Poor);
        assert_eq!(report.breakdown.keywords, 0.0);
    }

    #[test]
    fn test_degenerate_job_descriptions_score_zero() {
        for jd in ["", "   ", "\n\t\n", "a an the"] {
            let report = compute_score("a an the skills", Some(jd));
            assert_eq!(report.breakdown.keywords, 0.0, "jd {jd:?}");
            assert!(report.breakdown.keywords.is_finite());
        }
    }

    #[test]
    fn test_no_job_description_means_zero_keywords() {
        let text = "java python rust kubernetes experience skills";
        assert_eq!(compute_score(text, None).breakdown.keywords, 0.0);
    }

    #[test]
    fn test_email_only_scores_ten() {
        let report = compute_score("Reach me at jane.doe@example.com", None);
        assert_eq!(report.breakdown.contact_info, 10);
    }

    #[test]
    fn test_email_next_to_non_ascii_letters() {
        for text in ["邮箱jane@example.com", "jane@example.com电话", "éjane@example.com"] {
            let report = compute_score(text, None);
            assert_eq!(report.breakdown.contact_info, 10, "text {text}");
        }
    }

    #[test]
    fn test_email_and_phone_scores_twenty() {
        let report = compute_score("jane.doe@example.com +1-555-123-4567", None);
        assert_eq!(report.breakdown.contact_info, 20);
    }

    #[test]
    fn test_phone_only_scores_ten() {
        for phone in ["(555) 123-4567", "555.123.4567", "5551234567", "+44 555 123 4567"] {
            let report = compute_score(phone, None);
            assert_eq!(report.breakdown.contact_info, 10, "phone {phone}");
        }
    }

    #[test]
    fn test_no_contact_scores_zero() {
        let report = compute_score("Jane Doe, London, call 555-12", None);
        assert_eq!(report.breakdown.contact_info, 0);
    }

    #[test]
    fn test_section_gate_is_boolean() {
        let once = compute_score("skills", None);
        let five = compute_score("skills skills skills skills skills", None);
        assert_eq!(once.breakdown.skills, 25);
        assert_eq!(five.breakdown.skills, 25);
        assert_eq!(compute_score("nothing relevant", None).breakdown.skills, 0);
    }

    #[test]
    fn test_section_match_is_case_insensitive() {
        let report = compute_score("TECHNICAL SKILLS\nWORK HISTORY\nUniversity of Leeds", None);
        assert_eq!(report.breakdown.skills, 25);
        assert_eq!(report.breakdown.experience, 25);
        assert_eq!(report.breakdown.education, 15);
    }

    #[test]
    fn test_section_match_is_substring_based() {
        // "upskills" contains "skills"; "careers" contains "career"
        let report = compute_score("upskills careers", None);
        assert_eq!(report.breakdown.skills, 25);
        assert_eq!(report.breakdown.experience, 25);
        assert_eq!(report.breakdown.education, 0);
    }

    #[test]
    fn test_sections_are_independent() {
        let report = compute_score("Certification: AWS", None);
        assert_eq!(report.breakdown.education, 15);
        assert_eq!(report.breakdown.skills, 0);
        assert_eq!(report.breakdown.experience, 0);
    }

    #[test]
    fn test_keyword_ratio() {
        let report = compute_score("I write Java and Rust daily", Some("java python rust"));
        assert!(
            (report.breakdown.keywords - 10.0 * 2.0 / 3.0).abs() < 1e-9,
            "got {}",
            report.breakdown.keywords
        );
    }

    #[test]
    fn test_three_letter_job_words_do_not_count() {
        // "sql" is not longer than 3 chars, but still counts in the denominator
        let report = compute_score("java sql", Some("java python sql"));
        assert!((report.breakdown.keywords - 10.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_keyword_match_is_exact_token() {
        // "javascript" must not match job word "java"
        let report = compute_score("javascript developer", Some("java"));
        assert_eq!(report.breakdown.keywords, 0.0);
    }

    #[test]
    fn test_full_keyword_match_caps_at_ten() {
        let report = compute_score("rust tokio axum serde", Some("Rust Tokio Axum rust"));
        assert_eq!(report.breakdown.keywords, 10.0);
    }

    #[test]
    fn test_formatting_edge() {
        let at_201 = text_with_shape(201, 11);
        assert_eq!(compute_score(&at_201, None).breakdown.formatting, 5);

        let at_200 = text_with_shape(200, 11);
        assert_eq!(compute_score(&at_200, None).breakdown.formatting, 0);

        let at_200_many_lines = text_with_shape(200, 40);
        assert_eq!(compute_score(&at_200_many_lines, None).breakdown.formatting, 0);
    }

    #[test]
    fn test_formatting_requires_more_than_ten_lines() {
        let ten_lines = text_with_shape(300, 10);
        assert_eq!(compute_score(&ten_lines, None).breakdown.formatting, 0);
    }

    #[test]
    fn test_end_to_end_example() {
        let text = "Contact: jane@x.com\nSkills: Java, SQL\nExperience: 5 years\nEducation: BSc";
        let report = compute_score(text, None);
        assert_eq!(report.breakdown.contact_info, 10);
        assert_eq!(report.breakdown.skills, 25);
        assert_eq!(report.breakdown.experience, 25);
        assert_eq!(report.breakdown.education, 15);
        assert_eq!(report.breakdown.keywords, 0.0);
        assert_eq!(report.breakdown.formatting, 0);
        assert_eq!(report.total_score, 75);
        assert_eq!(report.grade, Grade::Good);
    }

    #[test]
    fn test_complete_resume_is_excellent() {
        let mut text = String::from(
            "Jane Doe\njane.doe@example.com\n+1 555 123 4567\n\nSummary\nBackend engineer.\n\n\
             Technical Skills\nRust, Tokio, PostgreSQL\n\nExperience\nAcme Corp, 2019-2024\n\n\
             Education\nBSc Computer Science, University of Leeds\n",
        );
        text.push_str(&"Built distributed services in rust and postgresql.\n".repeat(3));
        let report = compute_score(&text, Some("rust postgresql engineer"));
        assert_eq!(report.breakdown.contact_info, 20);
        assert_eq!(report.breakdown.formatting, 5);
        assert!(report.total_score >= 90, "got {}", report.total_score);
        assert_eq!(report.grade, Grade::Excellent);
    }

    #[test]
    fn test_bounds_hold_for_assorted_input() {
        let inputs = vec![
            String::new(),
            "\n".repeat(12),
            "skills experience education degree university college".to_string(),
            "😀".repeat(500),
            "a@b.co 555-555-5555 5555555555 +999 555 555 5555".to_string(),
        ];
        let jds = [None, Some(""), Some(" "), Some("skills experience"), Some("😀😀😀😀")];
        for text in &inputs {
            for jd in jds {
                let report = compute_score(text, jd);
                let b = &report.breakdown;
                assert!(b.contact_info <= 20);
                assert!(b.skills <= 25);
                assert!(b.experience <= 25);
                assert!(b.education <= 15);
                assert!((0.0..=10.0).contains(&b.keywords));
                assert!(b.formatting <= 5);
                assert!(report.total_score <= 100);
                assert_eq!(report.grade, Grade::from_score(report.total_score));
            }
        }
    }

    #[test]
    fn test_same_input_same_report() {
        let text = "Skills\njane@x.com";
        assert_eq!(compute_score(text, Some("skills")), compute_score(text, Some("skills")));
    }
}
