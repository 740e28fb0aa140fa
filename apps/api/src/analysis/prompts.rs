//! Prompt templates for the CV review calls. Placeholders are `{cv_text}` and
//! `{job_description}`.

pub const REVIEWER_SYSTEM: &str = "You are an experienced HR specialist and recruiter. \
    Review résumés candidly and specifically. \
    Base every observation on the text provided; do not invent employers, dates, or skills.";

pub const ANALYSIS_PROMPT_TEMPLATE: &str = r#"Analyze this CV/Resume for HR purposes and provide detailed feedback:

CV Content:
{cv_text}

Please provide:
1. Overall assessment
2. Strengths identified
3. Areas for improvement
4. Missing elements
5. Recommendations for better ATS compatibility
6. Professional summary evaluation

Format your response as a structured analysis."#;

pub const COMPARISON_PROMPT_TEMPLATE: &str = r#"Compare this CV with the job description and provide matching analysis:

CV Content:
{cv_text}

Job Description:
{job_description}

Please provide:
1. Match percentage
2. Matching skills and qualifications
3. Missing requirements
4. Recommendations to improve match
5. Key strengths for this role"#;

/// Shown in place of the AI analysis whenever the AI call fails.
pub const ANALYSIS_UNAVAILABLE: &str =
    "AI analysis unavailable. Please check your API configuration.";

pub fn analysis_prompt(cv_text: &str) -> String {
    ANALYSIS_PROMPT_TEMPLATE.replace("{cv_text}", cv_text)
}

pub fn comparison_prompt(cv_text: &str, job_description: &str) -> String {
    // Job description first so braces typed into a CV are never re-expanded.
    COMPARISON_PROMPT_TEMPLATE
        .replace("{job_description}", job_description)
        .replacen("{cv_text}", cv_text, 1)
}
