//! Resume parser: document bytes → `ParsedProfile`.
//!
//! Pipeline: extractor (by media type) → normalizer → contact, section, and
//! skill heuristics. Only the extraction step can fail.

use std::sync::Arc;

use tracing::debug;

use crate::errors::EngineError;
use crate::resume::contact::{extract_email, extract_name, extract_phone};
use crate::resume::extract::{ExtractorRegistry, RawDocument};
use crate::resume::models::ParsedProfile;
use crate::resume::normalize::{non_empty_lines, normalize};
use crate::resume::sections::{extract_section, EDUCATION_HEADINGS, EXPERIENCE_HEADINGS};
use crate::resume::skills::SkillVocabulary;

/// Stateless after construction; share it behind an `Arc`.
#[derive(Clone)]
pub struct ResumeParser {
    extractors: ExtractorRegistry,
    vocabulary: Arc<SkillVocabulary>,
}

impl ResumeParser {
    pub fn new(extractors: ExtractorRegistry, vocabulary: Arc<SkillVocabulary>) -> Self {
        Self {
            extractors,
            vocabulary,
        }
    }

    pub fn supports(&self, media_type: &str) -> bool {
        self.extractors.supports(media_type)
    }

    /// Blocking: runs the format decoder.
    pub fn parse(&self, document: &RawDocument) -> Result<ParsedProfile, EngineError> {
        let raw_text = self.extractors.extract(document)?;
        Ok(self.parse_text(&raw_text))
    }

    /// Heuristic extraction over already-extracted text. Never fails.
    pub fn parse_text(&self, raw_text: &str) -> ParsedProfile {
        let normalized = normalize(raw_text);
        let lines = non_empty_lines(&normalized);

        let profile = ParsedProfile {
            name: extract_name(&lines),
            email: extract_email(raw_text),
            phone: extract_phone(raw_text),
            skills: self.vocabulary.detect(raw_text),
            experience: extract_section(raw_text, EXPERIENCE_HEADINGS),
            education: extract_section(raw_text, EDUCATION_HEADINGS),
        };

        debug!(
            "Parsed resume: {} lines, {} skills, name found: {}",
            lines.len(),
            profile.skills.len(),
            !profile.name.is_empty()
        );
        profile
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resume::extract::tests::{build_docx, single_line_pdf};
    use crate::resume::extract::{DOCX_MEDIA_TYPE, PDF_MEDIA_TYPE};

    fn parser() -> ResumeParser {
        ResumeParser::new(
            ExtractorRegistry::with_defaults(),
            Arc::new(SkillVocabulary::default()),
        )
    }

    const RESUME_TEXT: &str = "Curriculum Vitae\r\n\
        Jane Doe\r\n\
        jane.doe@example.com | +44 20 7946 0958\r\n\
        \r\n\
        WORK EXPERIENCE\r\n\
        Globex\tSenior Engineer  2019-2023\r\n\
        Built React and Node services on AWS.\r\n\
        \r\n\
        EDUCATION:\r\n\
        BSc Computer Science\r\n\
        \r\n\
        HOBBIES\r\n\
        Chess\r\n";

    #[test]
    fn test_parse_text_extracts_every_field() {
        let profile = parser().parse_text(RESUME_TEXT);
        assert_eq!(profile.name, "Jane Doe");
        assert_eq!(profile.email, "jane.doe@example.com");
        assert_eq!(profile.phone, "+44 20 7946 0958");
        assert_eq!(profile.skills, vec!["React", "Node", "Aws"]);
        assert_eq!(
            profile.experience,
            "Globex Senior Engineer 2019-2023\nBuilt React and Node services on AWS."
        );
        assert_eq!(profile.education, "BSc Computer Science");
    }

    #[test]
    fn test_name_found_before_any_heading_alongside_email() {
        let profile = parser().parse_text("Jane Doe\njane@example.com\nEXPERIENCE\nAcme");
        assert_eq!(profile.name, "Jane Doe");
        assert_eq!(profile.email, "jane@example.com");
    }

    #[test]
    fn test_unstructured_text_degrades_to_empty_fields() {
        let profile = parser().parse_text("1234 5678\n@@@");
        assert_eq!(profile.name, "");
        assert_eq!(profile.email, "");
        assert_eq!(profile.phone, "1234 5678");
        assert!(profile.skills.is_empty());
        assert_eq!(profile.experience, "");
        assert_eq!(profile.education, "");
    }

    #[test]
    fn test_empty_text_is_empty_profile() {
        assert_eq!(parser().parse_text(""), ParsedProfile::default());
    }

    #[test]
    fn test_alternate_vocabulary_is_honored() {
        let parser = ResumeParser::new(
            ExtractorRegistry::with_defaults(),
            Arc::new(SkillVocabulary::new(["rust", "kafka"])),
        );
        let profile = parser.parse_text("Rust services on Kafka, some React");
        assert_eq!(profile.skills, vec!["Rust", "Kafka"]);
    }

    #[test]
    fn test_parse_docx_document() {
        let bytes = build_docx(&[
            "Jane Doe",
            "jane@example.com",
            "Experience",
            "Initech, Python and Docker",
            "EDUCATION",
            "MSc Data Science",
        ]);
        let profile = parser()
            .parse(&RawDocument::new(bytes, DOCX_MEDIA_TYPE))
            .unwrap();
        assert_eq!(profile.name, "Jane Doe");
        assert_eq!(profile.email, "jane@example.com");
        assert_eq!(profile.skills, vec!["Docker", "Python"]);
        assert_eq!(profile.experience, "Initech, Python and Docker");
        assert_eq!(profile.education, "MSc Data Science");
    }

    #[test]
    fn test_parse_pdf_document() {
        let profile = parser()
            .parse(&RawDocument::new(single_line_pdf("Jane Doe"), PDF_MEDIA_TYPE))
            .unwrap();
        assert_eq!(profile.name, "Jane Doe");
    }

    #[test]
    fn test_parsing_same_bytes_twice_is_deterministic() {
        let bytes = build_docx(&["Alex Kim", "alex@kim.dev", "SKILLS", "GraphQL, Redux"]);
        let document = RawDocument::new(bytes, DOCX_MEDIA_TYPE);
        let parser = parser();
        assert_eq!(parser.parse(&document).unwrap(), parser.parse(&document).unwrap());
    }

    #[test]
    fn test_parse_rejects_plain_text() {
        let result = parser().parse(&RawDocument::new(&b"Jane Doe"[..], "text/plain"));
        assert!(matches!(result, Err(EngineError::UnsupportedFormat(_))));
    }
}
