// Two-tier parser for the model's free-text reply

use super::prompt::{LABEL_DETAILED, LABEL_KEYWORDS, LABEL_OPTIMIZED, LABEL_VIETNAMESE};
use super::AnalysisResult;

/// Per-field defaults applied when neither parsing tier finds content.
pub const DEFAULT_VIETNAMESE: &str = "Không thể tạo mô tả tiếng Việt";
pub const DEFAULT_KEYWORDS: &str = "image, photo, visual";
pub const DEFAULT_DETAILED: &str = "Không thể tạo mô tả chi tiết";
pub const DEFAULT_OPTIMIZED: &str = "Không thể tạo prompt tối ưu";

/// Parse a model reply into the four output fields.
///
/// Tier 1 splits the reply on blank lines and matches blocks that start with
/// one of the four labels. If any field is left empty, tier 2 recomputes all
/// four from individual lines: the first line containing a label contributes
/// everything after its first colon. Unmatched fields fall back to the full
/// raw reply (`detailed`, `optimized`) or a fixed default string.
///
/// Never fails: every field of the result is non-empty.
pub fn parse_analysis(content: &str) -> AnalysisResult {
    let mut detailed = String::new();
    let mut vietnamese = String::new();
    let mut optimized = String::new();
    let mut keywords = String::new();

    // Tier 1: blank-line separated, label-prefixed blocks. Later blocks win.
    for section in content.split("\n\n") {
        if let Some(rest) = labeled_block(section, LABEL_DETAILED) {
            detailed = rest;
        } else if let Some(rest) = labeled_block(section, LABEL_VIETNAMESE) {
            vietnamese = rest;
        } else if let Some(rest) = labeled_block(section, LABEL_OPTIMIZED) {
            optimized = rest;
        } else if let Some(rest) = labeled_block(section, LABEL_KEYWORDS) {
            keywords = rest;
        }
    }

    // Tier 2: if the prompted format drifted, fall back to a line-oriented
    // scan and recompute all four fields.
    if detailed.is_empty() || vietnamese.is_empty() || optimized.is_empty() || keywords.is_empty()
    {
        let lines: Vec<&str> = content.lines().filter(|l| !l.trim().is_empty()).collect();

        detailed = labeled_line(&lines, LABEL_DETAILED).unwrap_or_else(|| content.to_string());
        vietnamese =
            labeled_line(&lines, LABEL_VIETNAMESE).unwrap_or_else(|| DEFAULT_VIETNAMESE.to_string());
        optimized = labeled_line(&lines, LABEL_OPTIMIZED).unwrap_or_else(|| content.to_string());
        keywords =
            labeled_line(&lines, LABEL_KEYWORDS).unwrap_or_else(|| DEFAULT_KEYWORDS.to_string());
    }

    // Final substitution: the contract guarantees four non-empty fields even
    // for an empty reply.
    AnalysisResult {
        detailed: non_empty_or(detailed, DEFAULT_DETAILED),
        vietnamese_description: non_empty_or(vietnamese, DEFAULT_VIETNAMESE),
        optimized: non_empty_or(optimized, DEFAULT_OPTIMIZED),
        keywords: non_empty_or(keywords, DEFAULT_KEYWORDS),
    }
}

/// Tier 1 match: the block must start with `LABEL:`.
fn labeled_block(section: &str, label: &str) -> Option<String> {
    let rest = section.strip_prefix(label)?.strip_prefix(':')?;
    Some(rest.trim().to_string())
}

/// Tier 2 match: first line containing the label; the value is everything
/// after the line's first colon. Empty values count as misses so the caller's
/// default applies.
fn labeled_line(lines: &[&str], label: &str) -> Option<String> {
    let line = lines.iter().find(|l| l.contains(label))?;
    let (_, rest) = line.split_once(':')?;
    let rest = rest.trim();
    if rest.is_empty() {
        None
    } else {
        Some(rest.to_string())
    }
}

fn non_empty_or(value: String, default: &str) -> String {
    if value.is_empty() {
        default.to_string()
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_exact_template() {
        let reply = "DETAILED_DESCRIPTION: A cat sitting on a red sofa.\n\n\
                     VIETNAMESE_DESCRIPTION: Một con mèo ngồi trên ghế sofa đỏ.\n\n\
                     AI_OPTIMIZED_PROMPT: cat on red sofa, cozy, warm light\n\n\
                     KEYWORDS: cat, sofa, red, cozy";

        let result = parse_analysis(reply);

        assert_eq!(result.detailed, "A cat sitting on a red sofa.");
        assert_eq!(
            result.vietnamese_description,
            "Một con mèo ngồi trên ghế sofa đỏ."
        );
        assert_eq!(result.optimized, "cat on red sofa, cozy, warm light");
        assert_eq!(result.keywords, "cat, sofa, red, cozy");
    }

    #[test]
    fn test_fallback_extracts_single_line_keywords() {
        // No blank-line separation, so tier 1 misses and tier 2 kicks in.
        let reply = "Here is my analysis.\nKEYWORDS: a, b, c\nThat's all.";

        let result = parse_analysis(reply);

        assert_eq!(result.keywords, "a, b, c");
        // Unlabeled fields fall back to the full reply.
        assert_eq!(result.detailed, reply);
        assert_eq!(result.optimized, reply);
        assert_eq!(result.vietnamese_description, DEFAULT_VIETNAMESE);
    }

    #[test]
    fn test_unlabeled_reply_uses_defaults() {
        let reply = "The model went completely off script.";

        let result = parse_analysis(reply);

        assert_eq!(result.detailed, reply);
        assert_eq!(result.optimized, reply);
        assert_eq!(result.vietnamese_description, DEFAULT_VIETNAMESE);
        assert_eq!(result.keywords, DEFAULT_KEYWORDS);
    }

    #[test]
    fn test_empty_reply_never_yields_empty_fields() {
        let result = parse_analysis("");

        assert_eq!(result.detailed, DEFAULT_DETAILED);
        assert_eq!(result.vietnamese_description, DEFAULT_VIETNAMESE);
        assert_eq!(result.optimized, DEFAULT_OPTIMIZED);
        assert_eq!(result.keywords, DEFAULT_KEYWORDS);
    }

    #[test]
    fn test_fallback_value_after_extra_colons() {
        // Everything after the *first* colon belongs to the value.
        let reply = "AI_OPTIMIZED_PROMPT: style: photorealistic, 4k";

        let result = parse_analysis(reply);

        assert_eq!(result.optimized, "style: photorealistic, 4k");
    }

    #[test]
    fn test_later_block_overwrites_earlier() {
        // All four labels present so tier 1 completes; the duplicate block wins.
        let reply = "DETAILED_DESCRIPTION: d\n\n\
                     VIETNAMESE_DESCRIPTION: v\n\n\
                     AI_OPTIMIZED_PROMPT: o\n\n\
                     KEYWORDS: first\n\n\
                     KEYWORDS: second";

        let result = parse_analysis(reply);

        assert_eq!(result.keywords, "second");
    }

    #[test]
    fn test_label_without_value_falls_back_to_default() {
        let reply = "KEYWORDS:";

        let result = parse_analysis(reply);

        assert_eq!(result.keywords, DEFAULT_KEYWORDS);
    }
}
