//! Renders the grading instruction and packages it with the page images.

use super::types::GradeRequest;
use crate::config::{GradingConfig, RubricStrictness};
use crate::llm::{ContentSegment, MultimodalContent};

/// Tells the model that one image segment follows for every token.
pub const IMAGE_PLACEHOLDER: &str = "<image>";

const DEFAULT_DATA_URI_PREFIX: &str = "data:image/jpeg;base64,";

const STRICT_RUBRIC: &str = "\
SCORING GUIDELINES (be realistic and varied):
- 9-10: Exceptional work, minimal errors, excellent structure, appropriate length
- 7-8: Good work, few errors, solid structure, decent length
- 5-6: Average, some errors, basic structure, may be too short/long
- 3-4: Below average, many errors, weak structure
- 0-2: Poor, numerous critical errors, incoherent

Be honest and varied in your scoring. Not every essay deserves a 7. Assess realistically.";

const LENIENT_RUBRIC: &str = "\
SCORING GUIDELINES (be fair and encouraging, but still varied):
- 9-10: Excellent, reads naturally with only occasional slips
- 7-8: Good, clear ideas and mostly correct grammar
- 5-6: Fair, understandable but with noticeable errors or thin development
- 3-4: Weak, frequent errors that get in the way of meaning
- 0-2: Very weak, mostly incoherent or far too short

Give credit for clear ideas and effort. Use the whole range and do not give every essay the same score.";

const ERROR_SCHEMA: &str = r#"  "errors": [
    {
      "page": <page_number>,
      "line": <line_number_approx>,
      "text": "<full_line_text>",
      "issue": "<what_is_wrong>",
      "fix": "<corrected_version>"
    }
  ]"#;

/// Builds the single text segment followed by one image segment per page.
pub fn build_content(request: &GradeRequest, config: &GradingConfig) -> MultimodalContent {
    let mut segments = Vec::with_capacity(request.images.len() + 1);
    segments.push(ContentSegment::Text(render_prompt(request, config)));
    segments.extend(
        request
            .images
            .iter()
            .map(|image| ContentSegment::Image(to_data_uri(image))),
    );
    MultimodalContent::new(segments)
}

/// Instruction text. The question is interpolated verbatim.
pub fn render_prompt(request: &GradeRequest, config: &GradingConfig) -> String {
    let image_tokens = IMAGE_PLACEHOLDER.repeat(request.images.len());

    let rubric = match config.rubric {
        RubricStrictness::Strict => STRICT_RUBRIC,
        RubricStrictness::Lenient => LENIENT_RUBRIC,
    };

    let schema = if config.include_feedback {
        format!(
            "{{\n  \"score\": <number 0-10>,\n{},\n  \"feedback\": \"<one_paragraph_of_overall_feedback>\"\n}}",
            ERROR_SCHEMA
        )
    } else {
        format!("{{\n  \"score\": <number 0-10>,\n{}\n}}", ERROR_SCHEMA)
    };

    format!(
        "{image_tokens}
You are an expert English teacher grading a student's composition.
The student chose this question: \"{question}\"

Your task is to:
1. Read the handwritten answer from ALL provided images.
2. Evaluate based on:
   - Sentence formation and structure
   - Grammatical correctness
   - Coherence and flow
   - Only significantly wrong spelling mistakes (ignore minor typos)
3. Essay length consideration: 2 pages is ideal for good marks.

{rubric}

Return STRICT JSON (no markdown):
{schema}
",
        question = request.question,
    )
}

/// Leaves data URIs alone and wraps bare base64 as JPEG.
pub fn to_data_uri(image: &str) -> String {
    // A data URI always has a ',' between its header and payload; base64 never does.
    if image.contains(',') {
        image.to_string()
    } else {
        format!("{}{}", DEFAULT_DATA_URI_PREFIX, image)
    }
}
