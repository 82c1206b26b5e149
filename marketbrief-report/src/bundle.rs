//! Report bundle — everything one run produced, plus the summary text.

use std::path::PathBuf;

/// Characters of each module's narrative included in the consolidated
/// summary. Longer output is truncated, not wrapped or paginated.
pub const SUMMARY_SNIPPET_CHARS: usize = 2000;

/// One module's captured output and artifacts.
#[derive(Debug, Clone)]
pub struct ModuleEntry {
    pub id: String,
    /// Combined narrative text (stdout/stderr sections, fault text on
    /// failure).
    pub text: String,
    pub figure_paths: Vec<PathBuf>,
    pub failed: bool,
}

/// All module entries for one run, in execution order.
#[derive(Debug, Clone)]
pub struct ReportBundle {
    pub timestamp: String,
    pub entries: Vec<ModuleEntry>,
}

impl ReportBundle {
    pub fn subject(&self) -> String {
        format!("Daily Analysis Report: {}", self.timestamp)
    }

    /// Consolidated summary: run header, module list, then the first
    /// `SUMMARY_SNIPPET_CHARS` characters of each module's output.
    pub fn compose_summary(&self) -> String {
        let mut lines: Vec<String> = vec![
            format!("Daily Analysis Report - {}", self.timestamp),
            String::new(),
            "Modules executed:".to_string(),
        ];
        for entry in &self.entries {
            lines.push(format!("- {}", entry.id));
        }
        lines.push(String::new());
        lines.push("Summary outputs:\n".to_string());
        for entry in &self.entries {
            lines.push(format!("== {} ==\n", entry.id));
            lines.push(truncate_chars(&entry.text, SUMMARY_SNIPPET_CHARS));
            lines.push("\n".to_string());
        }
        lines.join("\n")
    }

    /// Every figure artifact across all modules, in execution order.
    pub fn figure_paths(&self) -> Vec<PathBuf> {
        self.entries
            .iter()
            .flat_map(|e| e.figure_paths.iter().cloned())
            .collect()
    }
}

/// First `max` characters of `text` (char-boundary safe).
pub fn truncate_chars(text: &str, max: usize) -> String {
    text.chars().take(max).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: &str, text: &str) -> ModuleEntry {
        ModuleEntry {
            id: id.to_string(),
            text: text.to_string(),
            figure_paths: Vec::new(),
            failed: false,
        }
    }

    #[test]
    fn summary_lists_all_modules() {
        let bundle = ReportBundle {
            timestamp: "20240628_120000".to_string(),
            entries: vec![entry("a", "alpha output"), entry("b", "beta output")],
        };
        let summary = bundle.compose_summary();
        assert!(summary.starts_with("Daily Analysis Report - 20240628_120000"));
        assert!(summary.contains("- a"));
        assert!(summary.contains("- b"));
        assert!(summary.contains("== a =="));
        assert!(summary.contains("alpha output"));
        assert!(summary.contains("beta output"));
    }

    #[test]
    fn summary_truncates_at_exactly_2000_chars() {
        let long = "x".repeat(5000);
        let bundle = ReportBundle {
            timestamp: "t".to_string(),
            entries: vec![entry("big", &long)],
        };
        let summary = bundle.compose_summary();
        let run: usize = summary
            .split('\n')
            .map(|l| l.chars().filter(|&c| c == 'x').count())
            .max()
            .unwrap();
        assert_eq!(run, SUMMARY_SNIPPET_CHARS);
    }

    #[test]
    fn truncate_respects_char_boundaries() {
        let text = "ééééé";
        assert_eq!(truncate_chars(text, 3), "ééé");
        assert_eq!(truncate_chars("short", 2000), "short");
    }

    #[test]
    fn subject_carries_timestamp() {
        let bundle = ReportBundle {
            timestamp: "20240628_120000".to_string(),
            entries: Vec::new(),
        };
        assert_eq!(bundle.subject(), "Daily Analysis Report: 20240628_120000");
    }
}
