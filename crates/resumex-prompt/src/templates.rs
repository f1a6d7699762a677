//! Template sections for the extraction prompt.

pub(crate) fn render_instruction() -> &'static str {
    "Extract the following structured information from the resume text below. \
     Return your response as valid JSON only, matching this structure:"
}

/// The field layout the endpoint is asked to produce. Field names match the
/// profile schema consumed downstream; do not rename them casually.
pub(crate) fn render_schema() -> &'static str {
    r#"- contact: includes
  - fullName (string)
  - primaryEmail (string)
  - emails (array of strings)
  - primaryPhone (string)
  - phones (array of strings)
- objectives: career objective as a string
- skills: list of unique skills (no duplicates)
- jobs: list of jobs, each with:
  - title
  - company
  - description (summary of role)
  - startDate (e.g., "Jan 2020")
  - endDate (e.g., "Dec 2021" or "Present")
  - accomplishments (array of strings)
- education: list of education records, each with:
  - institution
  - degree
  - dates (e.g., "2018 - 2022")
  - gpa (optional)
  - certificate (optional)"#
}

pub(crate) fn render_output_rules() -> &'static str {
    "Respond with raw JSON only. Do NOT include any markdown formatting, \
     triple backticks, or explanations."
}
