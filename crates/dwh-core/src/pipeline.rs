//! Ordered statement sets for a pipeline run
//!
//! A full refresh runs drop → create → copy → insert. The first two phases
//! (re)build the schema and need no configuration; the last two load and
//! transform data.

use crate::builder::StatementBuilder;
use crate::config::CopySources;
use crate::statement::{Phase, Statement};

/// Statements grouped by phase, in execution order
#[derive(Debug, Clone, Default)]
pub struct Pipeline {
    phases: Vec<(Phase, Vec<Statement>)>,
}

impl Pipeline {
    /// All four phases of a full refresh
    pub fn build(builder: &StatementBuilder, sources: &CopySources) -> Self {
        Self::from_phases(builder, &Phase::ALL, Some(sources))
    }

    /// Drop and recreate every table
    pub fn schema(builder: &StatementBuilder) -> Self {
        Self::from_phases(builder, &[Phase::Drop, Phase::Create], None)
    }

    /// Load staging and populate the final tables
    pub fn etl(builder: &StatementBuilder, sources: &CopySources) -> Self {
        Self::from_phases(builder, &[Phase::Copy, Phase::Insert], Some(sources))
    }

    /// Selected phases, sorted into execution order.
    ///
    /// The copy phase is skipped when no sources are given.
    pub fn from_phases(
        builder: &StatementBuilder,
        phases: &[Phase],
        sources: Option<&CopySources>,
    ) -> Self {
        let mut selected = phases.to_vec();
        selected.sort();
        selected.dedup();

        let phases = selected
            .into_iter()
            .filter_map(|phase| {
                let statements = builder.phase_statements(phase, sources);
                if statements.is_none() {
                    log::warn!("Skipping {} phase: no bulk-load sources configured", phase);
                }
                statements.map(|s| (phase, s))
            })
            .collect();
        Self { phases }
    }

    /// Phases present in this pipeline
    pub fn phases(&self) -> impl Iterator<Item = Phase> + '_ {
        self.phases.iter().map(|(phase, _)| *phase)
    }

    /// Statements of one phase (empty if the phase is absent)
    pub fn phase(&self, phase: Phase) -> &[Statement] {
        self.phases
            .iter()
            .find(|(p, _)| *p == phase)
            .map(|(_, statements)| statements.as_slice())
            .unwrap_or(&[])
    }

    /// Every statement in execution order
    pub fn statements(&self) -> impl Iterator<Item = &Statement> {
        self.phases.iter().flat_map(|(_, statements)| statements.iter())
    }

    /// Number of statements
    pub fn len(&self) -> usize {
        self.phases.iter().map(|(_, s)| s.len()).sum()
    }

    /// Whether the pipeline has no statements
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Render as a SQL script, one `;`-terminated statement per block with a
    /// comment header per phase
    pub fn to_script(&self) -> String {
        let mut script = String::new();
        for (phase, statements) in &self.phases {
            if !script.is_empty() {
                script.push('\n');
            }
            script.push_str(&format!("-- {} ({} statements)\n", phase, statements.len()));
            for stmt in statements {
                script.push_str(&stmt.sql);
                script.push_str(";\n");
            }
        }
        script
    }
}

#[cfg(test)]
#[path = "pipeline_test.rs"]
mod tests;
