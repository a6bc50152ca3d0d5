//! Study plan generation from gap analysis results

use crate::processing::extractor::RequirementImportance;
use crate::processing::gap::{GapResult, GapSkill};
use crate::taxonomy::SkillTaxonomy;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Time budgets for plan generation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlanConfig {
    /// Study capacity per week, in minutes
    pub minutes_per_week: u32,
    /// Budget for learning one missing skill from scratch
    pub minutes_per_skill: u32,
    /// Fraction of the per-skill budget a partial skill needs for a refresh
    pub partial_factor: f32,
}

impl Default for PlanConfig {
    fn default() -> Self {
        Self {
            minutes_per_week: 600,
            minutes_per_skill: 240,
            partial_factor: 0.5,
        }
    }
}

/// Whether a plan item covers a missing skill or refreshes a partial one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlanFocus {
    Learn,
    Refresh,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudyPlanItem {
    pub rank: usize,
    pub skill: String,
    pub category: String,
    pub focus: PlanFocus,
    pub importance: RequirementImportance,
    pub minutes: u32,
    /// 1-based week the item is scheduled into
    pub week: u32,
}

/// Daily minute split within a phase, by activity type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyMinutes {
    pub theory: u32,
    pub coding: u32,
    pub system_design: u32,
    pub mock_interview: u32,
}

/// A named stretch of weeks with its own emphasis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanPhase {
    pub name: String,
    pub start_week: u32,
    pub end_week: u32,
    pub daily_minutes: DailyMinutes,
}

/// Ordered, time-boxed study schedule derived from one GapResult.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StudyPlan {
    pub items: Vec<StudyPlanItem>,
    pub weeks: u32,
    pub total_minutes: u32,
    pub phases: Vec<PlanPhase>,
}

pub struct PlanGenerator<'a> {
    taxonomy: &'a SkillTaxonomy,
    config: PlanConfig,
}

impl<'a> PlanGenerator<'a> {
    pub fn new(taxonomy: &'a SkillTaxonomy, config: PlanConfig) -> Self {
        Self { taxonomy, config }
    }

    /// Turn a gap result into a prioritized schedule over the given number of
    /// weeks. Missing skills come before partial ones; within each group the
    /// order is importance, then taxonomy weight, then extraction order, so
    /// identical inputs always produce identical plans.
    pub fn generate(&self, gap: &GapResult, weeks: u32) -> StudyPlan {
        let weeks = weeks.max(1);

        let mut queue: Vec<(&GapSkill, PlanFocus)> = Vec::new();
        queue.extend(gap.missing.iter().map(|s| (s, PlanFocus::Learn)));
        queue.extend(gap.partial.iter().map(|s| (s, PlanFocus::Refresh)));

        let rank_key = |skill: &GapSkill| (skill.importance, self.taxonomy.weight_of(&skill.skill));
        // stable sort keeps extraction order for ties
        queue.sort_by(|&(a, fa), &(b, fb)| {
            focus_order(fa).cmp(&focus_order(fb)).then_with(|| {
                let (ia, wa) = rank_key(a);
                let (ib, wb) = rank_key(b);
                ia.cmp(&ib)
                    .then(wb.partial_cmp(&wa).unwrap_or(Ordering::Equal))
            })
        });

        let partial_minutes =
            (self.config.minutes_per_skill as f32 * self.config.partial_factor).round() as u32;

        let mut items = Vec::with_capacity(queue.len());
        let mut scheduled: u32 = 0;
        for (rank, (skill, focus)) in queue.into_iter().enumerate() {
            let minutes = match focus {
                PlanFocus::Learn => self.config.minutes_per_skill,
                PlanFocus::Refresh => partial_minutes,
            };
            // overflow past the last week stays in the last week
            let week = (scheduled / self.config.minutes_per_week.max(1) + 1).min(weeks);
            scheduled += minutes;

            items.push(StudyPlanItem {
                rank: rank + 1,
                skill: skill.skill.clone(),
                category: skill.category.clone(),
                focus,
                importance: skill.importance,
                minutes,
                week,
            });
        }

        StudyPlan {
            items,
            weeks,
            total_minutes: scheduled,
            phases: phases_for(weeks),
        }
    }
}

fn focus_order(focus: PlanFocus) -> u8 {
    match focus {
        PlanFocus::Learn => 0,
        PlanFocus::Refresh => 1,
    }
}

/// Phase layout scaled to the plan length. Four or more weeks get the full
/// foundations → coding → system design → mock interview progression; shorter
/// plans collapse into a single sprint.
fn phases_for(weeks: u32) -> Vec<PlanPhase> {
    if weeks < 4 {
        return vec![PlanPhase {
            name: "Sprint".to_string(),
            start_week: 1,
            end_week: weeks,
            daily_minutes: DailyMinutes {
                theory: 45,
                coding: 45,
                system_design: 30,
                mock_interview: 30,
            },
        }];
    }

    let templates = [
        (
            "Foundations",
            DailyMinutes {
                theory: 60,
                coding: 45,
                system_design: 0,
                mock_interview: 0,
            },
        ),
        (
            "Coding Practice",
            DailyMinutes {
                theory: 45,
                coding: 45,
                system_design: 30,
                mock_interview: 0,
            },
        ),
        (
            "System Design",
            DailyMinutes {
                theory: 30,
                coding: 30,
                system_design: 60,
                mock_interview: 30,
            },
        ),
        (
            "Mock Interview Sprint",
            DailyMinutes {
                theory: 20,
                coding: 30,
                system_design: 30,
                mock_interview: 60,
            },
        ),
    ];

    let base = weeks / 4;
    let remainder = weeks % 4;
    let mut phases = Vec::with_capacity(4);
    let mut next_week = 1;
    for (i, (name, daily_minutes)) in templates.into_iter().enumerate() {
        let span = base + if (i as u32) < remainder { 1 } else { 0 };
        phases.push(PlanPhase {
            name: name.to_string(),
            start_week: next_week,
            end_week: next_week + span - 1,
            daily_minutes,
        });
        next_week += span;
    }
    phases
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::extractor::SkillExtractor;
    use crate::processing::gap::{GapAnalyzer, PartialMatchPolicy};

    fn gap_fixture() -> (SkillTaxonomy, GapResult) {
        let taxonomy = SkillTaxonomy::builtin();
        let extractor = SkillExtractor::new(&taxonomy).unwrap();
        let candidate = extractor.extract("Python, PyTorch and SQL.");
        let target = extractor.extract_requirements(
            "Must have experience with Ranking and TensorFlow.\n\
             Familiarity with Kafka is a bonus.\n\
             We also use Airflow.",
        );
        let gap = GapAnalyzer::new(PartialMatchPolicy::default()).analyze(&candidate, &target);
        (taxonomy, gap)
    }

    #[test]
    fn test_plan_covers_missing_and_partial() {
        let (taxonomy, gap) = gap_fixture();
        let plan = PlanGenerator::new(&taxonomy, PlanConfig::default()).generate(&gap, 8);

        assert_eq!(plan.items.len(), gap.missing.len() + gap.partial.len());
        assert_eq!(plan.weeks, 8);
        assert_eq!(
            plan.total_minutes,
            plan.items.iter().map(|i| i.minutes).sum::<u32>()
        );
    }

    #[test]
    fn test_missing_ranked_before_partial() {
        let (taxonomy, gap) = gap_fixture();
        let plan = PlanGenerator::new(&taxonomy, PlanConfig::default()).generate(&gap, 8);

        let first_refresh = plan
            .items
            .iter()
            .position(|i| i.focus == PlanFocus::Refresh);
        if let Some(first_refresh) = first_refresh {
            assert!(plan.items[..first_refresh]
                .iter()
                .all(|i| i.focus == PlanFocus::Learn));
        }
    }

    #[test]
    fn test_required_outranks_mentioned() {
        let (taxonomy, gap) = gap_fixture();
        let plan = PlanGenerator::new(&taxonomy, PlanConfig::default()).generate(&gap, 8);

        let position = |name: &str| plan.items.iter().position(|i| i.skill == name);
        let (learn_required, learn_mentioned): (Vec<_>, Vec<_>) = plan
            .items
            .iter()
            .filter(|i| i.focus == PlanFocus::Learn)
            .partition(|i| i.importance == RequirementImportance::Required);
        for required in &learn_required {
            for mentioned in &learn_mentioned {
                assert!(position(&required.skill) < position(&mentioned.skill));
            }
        }
    }

    #[test]
    fn test_plan_is_deterministic() {
        let (taxonomy, gap) = gap_fixture();
        let generator = PlanGenerator::new(&taxonomy, PlanConfig::default());

        assert_eq!(generator.generate(&gap, 8), generator.generate(&gap, 8));
    }

    #[test]
    fn test_week_assignment_stays_in_range() {
        let (taxonomy, gap) = gap_fixture();
        let config = PlanConfig {
            minutes_per_week: 240,
            ..PlanConfig::default()
        };
        let plan = PlanGenerator::new(&taxonomy, config).generate(&gap, 2);

        assert!(plan.items.iter().all(|i| i.week >= 1 && i.week <= 2));
        // with a tight weekly budget the tail must overflow into week 2
        assert!(plan.items.iter().any(|i| i.week == 2));
    }

    #[test]
    fn test_empty_gap_yields_empty_plan() {
        let taxonomy = SkillTaxonomy::builtin();
        let plan = PlanGenerator::new(&taxonomy, PlanConfig::default())
            .generate(&GapResult::default(), 4);

        assert!(plan.items.is_empty());
        assert_eq!(plan.total_minutes, 0);
        assert_eq!(plan.phases.len(), 4);
    }

    #[test]
    fn test_phase_layout() {
        let phases = phases_for(8);
        assert_eq!(phases.len(), 4);
        assert_eq!((phases[0].start_week, phases[0].end_week), (1, 2));
        assert_eq!((phases[3].start_week, phases[3].end_week), (7, 8));

        let sprint = phases_for(2);
        assert_eq!(sprint.len(), 1);
        assert_eq!((sprint[0].start_week, sprint[0].end_week), (1, 2));

        let five = phases_for(5);
        assert_eq!(five.len(), 4);
        assert_eq!((five[0].start_week, five[0].end_week), (1, 2));
        assert_eq!((five[3].start_week, five[3].end_week), (5, 5));
    }
}
