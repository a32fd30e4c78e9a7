// All LLM prompt constants for the Research module.
// Placeholders: `{company}`, `{qualifications}`, `{resume}`.
// `llm_client::prompts::NO_CITATIONS_INSTRUCTION` is appended by the caller.

/// Basic factual profile. Asks for the website so the domain can be extracted for logo lookup.
pub const BASIC_INFO_PROMPT_TEMPLATE: &str = "Provide the most important and basic factual information \
about the company: {company}. Include details such as headquarters location, founding year, founders, \
industry, number of employees, website, and a brief description. Format the response as clear, concise \
bullet points or short paragraphs. Do not include technology or jobs information here.";

pub const TECH_JOBS_PROMPT_TEMPLATE: &str = r#"Describe the technology stack, digital transformation initiatives, and job opportunities at {company}. Include information about major software, platforms, cloud services, and any notable tech projects or digital strategies. Also summarize the types of jobs and roles the company hires for, and any unique aspects of their work culture or hiring process. Structure the response into the following Markdown sections:

## 🖥️ Technology Stack
- List the main programming languages, frameworks, databases, tools, and platforms the company uses.
- Mention any notable cloud service providers (e.g., AWS, Azure, GCP).
- Highlight major digital transformation projects or tech innovations (AI, IoT, DevOps, etc.).

## 💼 Job Opportunities
- List the typical roles the company hires for (e.g., software engineer, data scientist, DevOps, etc.).
- Mention common job functions or departments.
- Note any unique aspects of their hiring process or candidate expectations (e.g., coding assessments, emphasis on culture fit).
- Describe the work culture briefly if relevant.

Use bullet points within each section where appropriate. Do not include unrelated company background; focus only on tech and hiring-related info. Do not summarize the company, just provide the information."#;

pub const SUMMARY_PROMPT_TEMPLATE: &str = r#"Write a concise summary (3-5 sentences) about {company}. The summary should:
- Highlight what makes the company stand out in its industry (e.g., innovation, market leadership, unique value proposition).
- Mention recent achievements, growth milestones, or major strategic shifts.
- Include any notable partnerships, product innovations, or global expansions.
- Conclude with key takeaways for someone researching the company (e.g., strengths, reputation, or direction).
Write in a professional yet readable tone suitable for an investor or job candidate."#;

pub const QUALIFICATIONS_PROMPT_TEMPLATE: &str = "List the typical job qualification requirements for a \
software engineer at {company}. Format the requirements as Markdown. For each section, start the header \
with an icon (e.g., 📝 **Education**), and list each requirement under it as a Markdown bullet (using -). \
Do NOT use plain text or paragraphs for the requirements; use only Markdown bullets for each item.";

pub const RATING_PROMPT_TEMPLATE: &str = r#"Given the following job requirements for {company}:
{qualifications}
And this candidate's resume: {resume}
What is the percentage chance (0-100%) that this candidate would pass the CV screening round? Just return a number and a short explanation."#;

pub const ADVICE_PROMPT_TEMPLATE: &str = r#"Given the following job requirements for {company}:
{qualifications}
And this candidate's resume: {resume}
Write the top 3 improvements or revisions the candidate should make to increase their chances of passing the CV round for a role at {company}, using the following format:

## 💡 Tips: Top 3 Improvements for the Resume

### 1. [Title of Improvement]
**Why:** Explain why this change is critical for the target role.
**How to Improve:**
- Break down the improvement into clear, actionable bullet points.
- Include a realistic example using bullet points only (no paragraphs, no tables, no code blocks).
- Every example item must be its own bullet point.

### 2. [Title of Improvement]
**Why:** Explain the relevance to the company's expectations.
**How to Improve:**
- Use concise and specific improvement actions.
- Add a bullet-point example showing how to implement the change.

### 3. [Title of Improvement]
**Why:** Explain what's currently missing and how it impacts CV screening.
**How to Improve:**
- Describe measurable or structural additions.
- Provide an example with bullet points.

### Summary of Suggested Revisions
- **Improvement:** [Summarized Title]
  - **What to Add or Change:** [Concise guidance]
  - **Example:** [One or more bullet points only]

Use Markdown headings, bold text, and bullet points for structure. Do NOT use tables, HTML tags, code blocks, or paragraph-based examples."#;
