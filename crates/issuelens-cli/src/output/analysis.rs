// SPDX-License-Identifier: Apache-2.0

use std::io::{self, Write};

use console::{StyledObject, style};

use crate::cli::OutputContext;
use crate::commands::types::AnalyzeResult;

use super::Renderable;

/// Colors the priority by severity: 4-5 red, 3 yellow, 1-2 green.
fn styled_priority(score: &str, priority: Option<u8>) -> StyledObject<&str> {
    match priority {
        Some(4..=5) => style(score).red().bold(),
        Some(3) => style(score).yellow(),
        Some(_) => style(score).green(),
        None => style(score).dim(),
    }
}

fn or_placeholder(text: &str) -> &str {
    if text.trim().is_empty() {
        "(not provided)"
    } else {
        text
    }
}

impl Renderable for AnalyzeResult {
    fn render_text(&self, w: &mut dyn Write, _ctx: &OutputContext) -> io::Result<()> {
        let analysis = &self.analysis;

        writeln!(
            w,
            "{}\n",
            style(format!(
                "Analysis for {} #{}",
                self.repo_url.trim_end_matches('/'),
                self.issue_number
            ))
            .bold()
            .underlined()
        )?;

        writeln!(w, "{}", style("Summary").cyan().bold())?;
        writeln!(w, "  {}\n", or_placeholder(&analysis.summary))?;

        writeln!(w, "{}", style("Type").cyan().bold())?;
        writeln!(w, "  {}\n", style(analysis.issue_type).magenta())?;

        writeln!(w, "{}", style("Priority").cyan().bold())?;
        writeln!(
            w,
            "  {}\n",
            styled_priority(or_placeholder(&analysis.priority_score), analysis.priority())
        )?;

        writeln!(w, "{}", style("Suggested Labels").cyan().bold())?;
        if analysis.suggested_labels.is_empty() {
            writeln!(w, "  {}", style("None").dim())?;
        } else {
            for label in &analysis.suggested_labels {
                writeln!(w, "  {} {}", style("-").dim(), label)?;
            }
        }
        writeln!(w)?;

        writeln!(w, "{}", style("Potential Impact").cyan().bold())?;
        writeln!(w, "  {}", or_placeholder(&analysis.potential_impact))?;

        Ok(())
    }
}
