//! Heuristic segmentation of raw OCR text
//!
//! Pure functions that turn the line-oriented OCR output of the two screen
//! halves into a problem title, a cleaned description, and cleaned code.
//! The parser only filters and segments; it never spell-corrects OCR noise
//! and never reorders lines.

use std::sync::LazyLock;

use regex::Regex;

/// Title used when no better candidate is found in the problem text
pub const DEFAULT_TITLE: &str = "LeetCode Problem";

/// Title returned when the problem region produced no usable text
pub const NO_PROBLEM_TITLE: &str = "No Problem Detected";

/// Description returned when the problem region produced no usable text
pub const NO_PROBLEM_DESCRIPTION: &str =
    "Could not extract text from screen. Make sure LeetCode is visible and try again.";

/// Returned in place of an empty code extraction
pub const NO_CODE_SENTINEL: &str = "No code written yet";

/// Verbs that typically open a problem statement; the first line containing
/// one anchors the title search window.
const STATEMENT_KEYWORDS: [&str; 6] = [
    "given",
    "return",
    "find",
    "calculate",
    "implement",
    "design",
];

/// Site chrome and stats lines that are never part of the problem statement
const UI_NOISE_KEYWORDS: [&str; 8] = [
    "leetcode",
    "premium",
    "subscribe",
    "difficulty",
    "acceptance",
    "submissions",
    "runtime",
    "memory",
];

/// Numbered-problem heading, e.g. "1. Two Sum"
static NUMBERED_TITLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+\.\s+").expect("valid regex"));

/// OCR'd editor line numbers at the start of a code line
static LINE_NUMBER_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+\s*").expect("valid regex"));

/// Title and cleaned description derived from the problem region
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProblemInfo {
    pub title: String,
    pub description: String,
}

impl ProblemInfo {
    /// Sentinel for a problem region that yielded no usable text
    pub fn no_problem_detected() -> Self {
        Self {
            title: NO_PROBLEM_TITLE.to_string(),
            description: NO_PROBLEM_DESCRIPTION.to_string(),
        }
    }

    /// Whether this info signals that extraction failed, which switches the
    /// hint client to its fallback prompt.
    pub fn is_extraction_failure(&self) -> bool {
        let description = self.description.trim();
        description.is_empty() || description.to_lowercase().contains("could not extract")
    }
}

/// Derive a title and a cleaned description from raw problem-region text.
///
/// Two title passes run in order: a keyword-anchored scan over the whole
/// text, then a numbered-heading scan over the first 10 lines which, when it
/// matches, overrides whatever the first pass found.
pub fn parse_problem(text: &str) -> ProblemInfo {
    let lines: Vec<&str> = text.split('\n').collect();
    let mut title = DEFAULT_TITLE.to_string();

    // Pass A: find the first statement-keyword line, then look back up to
    // 5 lines for a short non-empty title candidate. The window is scanned
    // forward and the first hit wins; known false positives (keywords inside
    // narrative text) are accepted as-is.
    for (i, line) in lines.iter().enumerate() {
        let lower = line.to_lowercase();
        if STATEMENT_KEYWORDS.iter().any(|k| lower.contains(k)) {
            if i > 0 {
                let window_start = i.saturating_sub(5);
                for candidate in &lines[window_start..i] {
                    if !candidate.trim().is_empty() && candidate.chars().count() < 100 {
                        title = candidate.trim().to_string();
                        break;
                    }
                }
            }
            break;
        }
    }

    // Pass B: a numbered heading near the top beats the keyword scan.
    for line in lines.iter().take(10) {
        let trimmed = line.trim();
        if NUMBERED_TITLE.is_match(trimmed) {
            title = trimmed.to_string();
            break;
        }
    }

    ProblemInfo {
        title,
        description: clean_description(text),
    }
}

/// Drop site chrome, blank lines, bare numbers, and fragments from the raw
/// problem text, preserving the order of what survives.
fn clean_description(text: &str) -> String {
    text.split('\n')
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .filter(|line| {
            let lower = line.to_lowercase();
            !UI_NOISE_KEYWORDS.iter().any(|k| lower.contains(k))
        })
        .filter(|line| line.chars().count() > 3 && !line.chars().all(|c| c.is_ascii_digit()))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Clean code-region text: strip leading editor line numbers, drop lines
/// that are empty after stripping, and fall back to the no-code sentinel
/// when nothing survives.
pub fn parse_code(text: &str) -> String {
    let mut kept: Vec<String> = Vec::new();
    for line in text.split('\n') {
        let stripped = LINE_NUMBER_PREFIX.replace(line, "");
        if !stripped.trim().is_empty() {
            kept.push(stripped.into_owned());
        }
    }

    let joined = kept.join("\n");
    if joined.trim().is_empty() {
        NO_CODE_SENTINEL.to_string()
    } else {
        joined
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_line_anchors_title_from_window() {
        let text = "Two Sum\n\nGiven an array of integers nums and a target";
        let info = parse_problem(text);
        assert_eq!(info.title, "Two Sum");
    }

    #[test]
    fn test_keyword_on_first_line_keeps_default_title() {
        let text = "Given an array of integers nums and a target";
        let info = parse_problem(text);
        assert_eq!(info.title, DEFAULT_TITLE);
    }

    #[test]
    fn test_numbered_title_overrides_keyword_title() {
        let text = "Some noise\n1. Two Sum\nGiven an array nums...";
        let info = parse_problem(text);
        assert_eq!(info.title, "1. Two Sum");
    }

    #[test]
    fn test_numbered_title_only_checked_in_first_ten_lines() {
        let mut lines = vec!["filler line here"; 12];
        lines.push("99. Late Heading");
        let info = parse_problem(&lines.join("\n"));
        assert_eq!(info.title, DEFAULT_TITLE);
    }

    #[test]
    fn test_long_lines_are_not_title_candidates() {
        let long_line = "x".repeat(120);
        let text = format!("{long_line}\nGiven an array nums");
        let info = parse_problem(&text);
        assert_eq!(info.title, DEFAULT_TITLE);
    }

    #[test]
    fn test_title_window_limited_to_five_lines() {
        // The real heading sits 6 lines above the keyword line, outside the
        // window; the nearer filler lines are too long to qualify.
        let filler = "y".repeat(110);
        let text = format!(
            "Actual Title\n{filler}\n{filler}\n{filler}\n{filler}\n{filler}\nGiven an array nums"
        );
        let info = parse_problem(&text);
        assert_eq!(info.title, DEFAULT_TITLE);
    }

    #[test]
    fn test_ui_noise_lines_are_filtered() {
        let text = "1. Two Sum\nGiven an array of integers nums\nRuntime: 52 ms\nMemory: 16 MB\nreturn the indices of the two numbers";
        let info = parse_problem(text);
        assert!(!info.description.contains("Runtime"));
        assert!(!info.description.contains("Memory"));
        assert!(info.description.contains("Given an array of integers nums"));
    }

    #[test]
    fn test_short_and_numeric_lines_are_dropped() {
        let text = "Given a string s of length n\n42\nab\nfind the longest palindrome";
        let info = parse_problem(text);
        assert!(!info.description.contains("42"));
        assert!(!info.description.contains("ab"));
        assert!(info.description.contains("find the longest palindrome"));
    }

    #[test]
    fn test_description_preserves_line_order() {
        let text = "first statement line\nsecond statement line\nthird statement line";
        let info = parse_problem(text);
        assert_eq!(
            info.description,
            "first statement line\nsecond statement line\nthird statement line"
        );
    }

    #[test]
    fn test_site_brand_line_is_filtered() {
        let text = "LeetCode Premium\nGiven two sorted arrays";
        let info = parse_problem(text);
        assert!(!info.description.to_lowercase().contains("leetcode"));
    }

    #[test]
    fn test_code_line_numbers_are_stripped() {
        assert_eq!(parse_code("12   for i in range(n):"), "for i in range(n):");
    }

    #[test]
    fn test_all_numeric_code_line_is_dropped() {
        assert_eq!(parse_code("42"), NO_CODE_SENTINEL);
    }

    #[test]
    fn test_code_without_line_numbers_passes_through() {
        let code = "def two_sum(nums, target):\n    seen = {}\n    return []";
        assert_eq!(parse_code(code), code);
    }

    #[test]
    fn test_mixed_numbered_code() {
        // Indentation after the line number is eaten with it; the original
        // heuristic accepts that loss.
        let text = "1 def solve():\n2\n3     return 0";
        assert_eq!(parse_code(text), "def solve():\nreturn 0");
    }

    #[test]
    fn test_empty_code_yields_sentinel() {
        assert_eq!(parse_code(""), NO_CODE_SENTINEL);
        assert_eq!(parse_code("   \n\t\n  "), NO_CODE_SENTINEL);
    }

    #[test]
    fn test_code_order_preserved() {
        let text = "3 c = a + b\n1 a = 1\n2 b = 2";
        assert_eq!(parse_code(text), "c = a + b\na = 1\nb = 2");
    }

    #[test]
    fn test_extraction_failure_detection() {
        assert!(ProblemInfo::no_problem_detected().is_extraction_failure());
        assert!(ProblemInfo {
            title: "t".to_string(),
            description: "  ".to_string(),
        }
        .is_extraction_failure());
        assert!(!ProblemInfo {
            title: "1. Two Sum".to_string(),
            description: "Given an array".to_string(),
        }
        .is_extraction_failure());
    }

    #[test]
    fn test_ocr_noise_is_not_corrected() {
        // Stray characters survive untouched; the parser never spell-corrects
        let text = "Givn an arr@y of integerz nums";
        let info = parse_problem(text);
        assert_eq!(info.description, "Givn an arr@y of integerz nums");
    }
}
