//! Rendering analysis reports to console, JSON, or markdown

use crate::config::OutputFormat;
use crate::error::Result;
use crate::output::report::AnalysisReport;
use crate::processing::extractor::RequirementImportance;
use crate::processing::gap::GapSkill;
use crate::processing::planner::PlanFocus;
use colored::Colorize;
use std::path::Path;

pub struct ReportFormatter {
    format: OutputFormat,
    detailed: bool,
}

impl ReportFormatter {
    pub fn new(format: OutputFormat, detailed: bool) -> Self {
        Self { format, detailed }
    }

    pub fn render(&self, report: &AnalysisReport) -> Result<String> {
        match self.format {
            OutputFormat::Console => Ok(self.render_console(report)),
            OutputFormat::Json => Ok(serde_json::to_string_pretty(report)?),
            OutputFormat::Markdown => Ok(self.render_markdown(report)),
        }
    }

    /// Render and write to a file. Saved output never carries ANSI colors.
    pub fn save(&self, report: &AnalysisReport, path: &Path) -> Result<()> {
        let was_forced = colored::control::SHOULD_COLORIZE.should_colorize();
        colored::control::set_override(false);
        let rendered = self.render(report);
        colored::control::set_override(was_forced);

        std::fs::write(path, rendered?)?;
        Ok(())
    }

    fn render_console(&self, report: &AnalysisReport) -> String {
        let mut out = String::new();
        let meta = &report.metadata;

        out.push_str(&format!("\n{}\n", "Skill Gap Analysis".bold()));
        out.push_str(&format!(
            "  Resume: {}  |  Target: {}\n",
            meta.resume_source, meta.target_source
        ));

        let coverage = format!("{:.0}%", report.coverage() * 100.0);
        let coverage = if report.coverage() >= 0.7 {
            coverage.green()
        } else if report.coverage() >= 0.5 {
            coverage.yellow()
        } else {
            coverage.red()
        };
        out.push_str(&format!(
            "  Coverage: {} ({}/{} target skills)  -  {}\n",
            coverage,
            report.gap.matched.len(),
            report.gap.target_len(),
            report.verdict()
        ));

        out.push_str(&format!(
            "\n{} ({})\n",
            "Matched".green().bold(),
            report.gap.matched.len()
        ));
        for skill in &report.gap.matched {
            out.push_str(&format!("  + {}\n", skill.skill));
        }

        out.push_str(&format!(
            "\n{} ({})\n",
            "Missing".red().bold(),
            report.gap.missing.len()
        ));
        for skill in &report.gap.missing {
            out.push_str(&format!(
                "  - {} [{}]\n",
                skill.skill,
                importance_label(skill.importance)
            ));
        }

        out.push_str(&format!(
            "\n{} ({})\n",
            "Partial".yellow().bold(),
            report.gap.partial.len()
        ));
        for skill in &report.gap.partial {
            out.push_str(&format!(
                "  ~ {} [{}] via {}\n",
                skill.skill,
                importance_label(skill.importance),
                skill.related.join(", ")
            ));
        }

        if !report.gap.surplus.is_empty() {
            out.push_str(&format!(
                "\n{}: {}\n",
                "Additional resume skills".blue().bold(),
                report.gap.surplus.join(", ")
            ));
        }

        out.push_str(&format!(
            "\n{} ({} weeks, {:.1}h total)\n",
            "Study Plan".bold(),
            report.plan.weeks,
            report.plan.total_minutes as f32 / 60.0
        ));
        for item in &report.plan.items {
            let focus = match item.focus {
                PlanFocus::Learn => "learn",
                PlanFocus::Refresh => "refresh",
            };
            out.push_str(&format!(
                "  {:>2}. week {} - {} ({}, {:.1}h)\n",
                item.rank,
                item.week,
                item.skill,
                focus,
                item.minutes as f32 / 60.0
            ));
        }

        if self.detailed {
            out.push_str(&format!("\n{}\n", "Phases".bold()));
            for phase in &report.plan.phases {
                let d = &phase.daily_minutes;
                out.push_str(&format!(
                    "  weeks {}-{}: {} (daily: theory {}m, coding {}m, design {}m, mock {}m)\n",
                    phase.start_week,
                    phase.end_week,
                    phase.name,
                    d.theory,
                    d.coding,
                    d.system_design,
                    d.mock_interview
                ));
            }

            out.push_str(&format!("\n{}\n", "Candidate skills detected".bold()));
            for hit in &report.candidate_skills.hits {
                out.push_str(&format!(
                    "  {} ({}, seen {}x)\n",
                    hit.skill, hit.category, hit.occurrences
                ));
            }
        }

        out
    }

    fn render_markdown(&self, report: &AnalysisReport) -> String {
        let mut out = String::new();
        let meta = &report.metadata;

        out.push_str("# Skill Gap Analysis\n\n");
        out.push_str(&format!(
            "- Resume: `{}`\n- Target: `{}`\n- Generated: {}\n- Coverage: **{:.0}%** ({})\n\n",
            meta.resume_source,
            meta.target_source,
            meta.generated_at.format("%Y-%m-%d %H:%M UTC"),
            report.coverage() * 100.0,
            report.verdict()
        ));

        out.push_str(&format!("## Matched ({})\n\n", report.gap.matched.len()));
        push_skill_list(&mut out, &report.gap.matched);

        out.push_str(&format!("## Missing ({})\n\n", report.gap.missing.len()));
        push_skill_list(&mut out, &report.gap.missing);

        out.push_str(&format!("## Partial ({})\n\n", report.gap.partial.len()));
        for skill in &report.gap.partial {
            out.push_str(&format!(
                "- {} ({}) - related: {}\n",
                skill.skill,
                importance_label(skill.importance),
                skill.related.join(", ")
            ));
        }
        out.push('\n');

        out.push_str(&format!(
            "## Study Plan ({} weeks, {:.1}h)\n\n",
            report.plan.weeks,
            report.plan.total_minutes as f32 / 60.0
        ));
        out.push_str("| # | Week | Skill | Focus | Hours |\n|---|------|-------|-------|-------|\n");
        for item in &report.plan.items {
            let focus = match item.focus {
                PlanFocus::Learn => "learn",
                PlanFocus::Refresh => "refresh",
            };
            out.push_str(&format!(
                "| {} | {} | {} | {} | {:.1} |\n",
                item.rank,
                item.week,
                item.skill,
                focus,
                item.minutes as f32 / 60.0
            ));
        }
        out.push('\n');

        out.push_str("## Phases\n\n");
        for phase in &report.plan.phases {
            out.push_str(&format!(
                "- Weeks {}-{}: **{}**\n",
                phase.start_week, phase.end_week, phase.name
            ));
        }

        out
    }
}

fn push_skill_list(out: &mut String, skills: &[GapSkill]) {
    for skill in skills {
        out.push_str(&format!(
            "- {} ({})\n",
            skill.skill,
            importance_label(skill.importance)
        ));
    }
    out.push('\n');
}

fn importance_label(importance: RequirementImportance) -> &'static str {
    match importance {
        RequirementImportance::Required => "required",
        RequirementImportance::Preferred => "preferred",
        RequirementImportance::Mentioned => "mentioned",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::report::TargetSource;
    use crate::processing::extractor::SkillExtractor;
    use crate::processing::gap::{GapAnalyzer, PartialMatchPolicy};
    use crate::processing::planner::{PlanConfig, PlanGenerator};
    use crate::taxonomy::SkillTaxonomy;

    fn sample_report() -> AnalysisReport {
        let taxonomy = SkillTaxonomy::builtin();
        let extractor = SkillExtractor::new(&taxonomy).unwrap();
        let candidate = extractor.extract("Python and PyTorch");
        let target = extractor.extract_requirements("Requires Python, TensorFlow and Ranking");
        let gap = GapAnalyzer::new(PartialMatchPolicy::default()).analyze(&candidate, &target);
        let plan = PlanGenerator::new(&taxonomy, PlanConfig::default()).generate(&gap, 4);

        AnalysisReport::new(
            candidate,
            target,
            gap,
            plan,
            "resume.txt".to_string(),
            TargetSource::JobDescription {
                path: "jd.txt".to_string(),
            },
            taxonomy.skill_count(),
        )
    }

    #[test]
    fn test_console_render_mentions_all_buckets() {
        colored::control::set_override(false);
        let formatter = ReportFormatter::new(OutputFormat::Console, false);
        let rendered = formatter.render(&sample_report()).unwrap();

        assert!(rendered.contains("Matched"));
        assert!(rendered.contains("Missing"));
        assert!(rendered.contains("Partial"));
        assert!(rendered.contains("Study Plan"));
        assert!(rendered.contains("Python"));
    }

    #[test]
    fn test_json_render_is_valid() {
        let formatter = ReportFormatter::new(OutputFormat::Json, false);
        let rendered = formatter.render(&sample_report()).unwrap();

        let value: serde_json::Value = serde_json::from_str(&rendered).unwrap();
        assert!(value.get("gap").is_some());
        assert!(value.get("metadata").is_some());
    }

    #[test]
    fn test_markdown_render_has_plan_table() {
        let formatter = ReportFormatter::new(OutputFormat::Markdown, false);
        let rendered = formatter.render(&sample_report()).unwrap();

        assert!(rendered.starts_with("# Skill Gap Analysis"));
        assert!(rendered.contains("| # | Week | Skill |"));
    }
}
