use std::fmt;

use crate::core::GroupingOutcome;
use crate::models::{Diagnostics, GroupReport, GroupingReport, MemberReport, Person};

/// Attach names and categories to a grouping outcome
pub fn build_report(
    persons: &[Person],
    outcome: &GroupingOutcome,
    diagnostics: Option<Diagnostics>,
) -> GroupingReport {
    let groups = outcome
        .groups
        .iter()
        .zip(&outcome.group_costs)
        .enumerate()
        .map(|(gi, (group, &cost))| GroupReport {
            index: gi + 1,
            size: group.len(),
            cost,
            members: group
                .iter()
                .filter_map(|&idx| {
                    persons.get(idx).map(|p| MemberReport {
                        person: idx,
                        name: p.name.clone(),
                        category: p.category.clone(),
                    })
                })
                .collect(),
        })
        .collect();

    GroupingReport {
        run_id: uuid::Uuid::new_v4().to_string(),
        generated_at: chrono::Utc::now(),
        total_cost: outcome.cost,
        best_restart: outcome.best_restart,
        restarts: outcome.restarts,
        groups,
        degradations: outcome.degradations.clone(),
        diagnostics,
    }
}

impl fmt::Display for GroupingReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "\n--------- RESULT ---------")?;
        writeln!(f, "Total cost: {}", self.total_cost)?;

        for group in &self.groups {
            writeln!(f, "\nGroup {} (n={}, cost={}):", group.index, group.size, group.cost)?;
            for member in &group.members {
                writeln!(f, "  - {}  ({})", member.name, member.category)?;
            }
        }

        if !self.degradations.is_empty() {
            writeln!(f, "\n--------- WARNINGS ---------")?;
            for d in &self.degradations {
                writeln!(f, "  - {}", d)?;
            }
        }

        if let Some(diag) = self.diagnostics {
            writeln!(f, "\n--------- PERFORMANCE ---------")?;
            writeln!(f, "Operations: {}", diag.operations)?;
            writeln!(f, "Elapsed: {:.3} seconds", diag.elapsed_secs)?;
        }

        Ok(())
    }
}

/// Human-readable report
pub fn render_text(report: &GroupingReport) -> String {
    report.to_string()
}

pub fn render_json(report: &GroupingReport) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(report)
}
