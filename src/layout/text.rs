use crate::config::LayoutConfig;

use super::TextBlock;

/// Character budget of one summary line. Glyph width is approximated as
/// `summary_font_size * char_width_ratio`; the budget can go non-positive
/// under degenerate configs, in which case every word gets its own line.
fn chars_per_line(config: &LayoutConfig) -> isize {
    let usable = config.box_width - 2.0 * config.summary_padding;
    let per_char = config.summary_font_size * config.char_width_ratio;
    (usable / per_char).floor() as isize
}

/// Greedy word wrap: words are packed into a line until appending the next
/// one would push the trimmed line past the character budget. A word longer
/// than the budget still occupies a line of its own.
pub(super) fn wrap_summary(text: &str, config: &LayoutConfig) -> Vec<String> {
    let budget = chars_per_line(config);
    let mut lines = Vec::new();
    let mut current = String::new();
    for word in text.split(' ') {
        let candidate = format!("{current} {word}");
        if candidate.trim().chars().count() as isize > budget {
            if !current.is_empty() {
                lines.push(current.trim().to_string());
            }
            current = word.to_string();
        } else {
            current = candidate;
        }
    }
    if !current.is_empty() {
        lines.push(current.trim().to_string());
    }
    lines
}

pub(super) fn summary_block(summary: &str, config: &LayoutConfig) -> TextBlock {
    let lines = wrap_summary(summary, config);
    let height = lines.len() as f32 * config.summary_line_height;
    TextBlock { lines, height }
}

/// Box height: header band + wrapped summary + assignee row, never below
/// the configured minimum.
pub(super) fn estimate_box_height(summary: &TextBlock, config: &LayoutConfig) -> f32 {
    let height = config.box_header_height + summary.height + config.assignee_row_height;
    height.max(config.min_box_height)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_summary_stays_on_one_line() {
        let config = LayoutConfig::default();
        assert_eq!(wrap_summary("Fix login", &config), vec!["Fix login"]);
    }

    #[test]
    fn empty_summary_yields_a_single_blank_line() {
        let config = LayoutConfig::default();
        assert_eq!(wrap_summary("", &config), vec![""]);
    }

    #[test]
    fn long_summary_wraps_within_budget() {
        let config = LayoutConfig::default();
        let lines = wrap_summary(
            "Migrate the payments reconciliation job to the new ledger schema",
            &config,
        );
        assert!(lines.len() > 1);
        // default budget: (200 - 32) / (14 * 0.6) = 20 chars
        for line in &lines {
            assert!(line.chars().count() <= 20, "line over budget: {line:?}");
        }
    }

    #[test]
    fn oversized_word_gets_its_own_line() {
        let config = LayoutConfig::default();
        let lines = wrap_summary("a extraordinarily-long-component-name b", &config);
        assert!(lines.contains(&"extraordinarily-long-component-name".to_string()));
    }

    #[test]
    fn wrapping_is_deterministic() {
        let config = LayoutConfig::default();
        let text = "Rework the sprint burndown export so partial weeks render";
        assert_eq!(wrap_summary(text, &config), wrap_summary(text, &config));
    }

    #[test]
    fn height_includes_header_and_assignee_rows() {
        let config = LayoutConfig::default();
        let block = summary_block("Fix login", &config);
        // 70 header + 16 one line + 36 assignee
        assert_eq!(estimate_box_height(&block, &config), 122.0);
    }

    #[test]
    fn height_never_drops_below_minimum() {
        let config = LayoutConfig {
            box_header_height: 0.0,
            assignee_row_height: 0.0,
            ..LayoutConfig::default()
        };
        let block = summary_block("x", &config);
        assert_eq!(estimate_box_height(&block, &config), config.min_box_height);
    }
}
