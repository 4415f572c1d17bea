//! Template gallery and mock insight generation.
//!
//! Insights are synthesized from a seeded random source; no inference is
//! performed. Only one generation request may be in flight at a time.

use crate::error::{DashboardError, DashboardResult};
use crate::models::{FilterState, GroupBy, Metric, Record};
use crate::services::aggregates;
use chrono::{DateTime, Utc};
use rand::{rngs::StdRng, seq::SliceRandom, Rng, SeedableRng};
use serde::Serialize;
use std::fmt::Write as _;
use std::time::Duration;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// An entry of the template gallery.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct InsightTemplate {
    /// Stable identifier (kebab-case)
    pub id: &'static str,
    /// Display title
    pub title: &'static str,
    /// One-line description
    pub description: &'static str,
    /// Grouping the template reports on
    #[serde(skip)]
    pub group_by: GroupBy,
    /// Metric the template ranks by
    #[serde(skip)]
    pub metric: Metric,
}

const GALLERY: &[InsightTemplate] = &[
    InsightTemplate {
        id: "sponsor-performance",
        title: "Sponsor Performance Overview",
        description: "Which sponsors are driving the most media value",
        group_by: GroupBy::Sponsor,
        metric: Metric::Smv,
    },
    InsightTemplate {
        id: "rightsholder-roi",
        title: "Rightsholder ROI Comparison",
        description: "How rightsholders compare on fair market value",
        group_by: GroupBy::Rightsholder,
        metric: Metric::Fmv,
    },
    InsightTemplate {
        id: "platform-engagement",
        title: "Platform Engagement Mix",
        description: "Where audiences watch sponsored content",
        group_by: GroupBy::Platform,
        metric: Metric::VideoViews,
    },
    InsightTemplate {
        id: "placement-effectiveness",
        title: "Placement Effectiveness",
        description: "Placements delivering the most impressions",
        group_by: GroupBy::Placement,
        metric: Metric::Impressions,
    },
    InsightTemplate {
        id: "seasonal-trends",
        title: "Seasonal Trend Summary",
        description: "Month-over-month exposure trends",
        group_by: GroupBy::Month,
        metric: Metric::Views,
    },
];

impl InsightTemplate {
    /// Every template, in gallery order.
    #[must_use]
    pub const fn gallery() -> &'static [Self] {
        GALLERY
    }

    /// Looks up a template by id.
    #[must_use]
    pub fn find(id: &str) -> Option<&'static Self> {
        GALLERY.iter().find(|t| t.id == id)
    }
}

/// A generated (mock) insight.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Insight {
    /// Unique identifier
    pub id: Uuid,
    /// Template the insight was generated from
    pub template_id: String,
    /// Display title
    pub title: String,
    /// Headline sentence
    pub headline: String,
    /// Supporting bullet points
    pub findings: Vec<String>,
    /// Synthetic confidence score (0-100)
    pub confidence: u8,
    /// Latency the generation pretended to take
    #[serde(skip)]
    pub simulated_latency: Duration,
    /// Generation timestamp
    pub generated_at: DateTime<Utc>,
}

/// Capability that turns a template and a record set into an insight.
pub trait InsightGenerator {
    /// Produces an insight for `template` over `records`.
    fn generate(&mut self, template: &InsightTemplate, records: &[Record]) -> Insight;
}

/// Randomized generator over an injected seeded RNG.
#[derive(Debug, Clone)]
pub struct MockInsightGenerator {
    rng: StdRng,
}

impl MockInsightGenerator {
    /// Creates a reproducible generator.
    #[must_use]
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Creates a generator seeded from system entropy.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }
}

const TRENDS: &[&str] = &["up", "down", "flat"];

impl InsightGenerator for MockInsightGenerator {
    fn generate(&mut self, template: &InsightTemplate, records: &[Record]) -> Insight {
        let ranked = aggregates::top_performers(records, template.group_by, template.metric, 3);
        let lift: u32 = self.rng.gen_range(5..=45);

        let headline = match ranked.first() {
            Some(leader) => format!(
                "{} leads on {} with a {lift}% lift over the next best",
                leader.key,
                template.metric.label()
            ),
            None => "No exposure matches the current filters".to_string(),
        };

        let mut findings = Vec::with_capacity(ranked.len());
        for row in &ranked {
            let trend = TRENDS.choose(&mut self.rng).copied().unwrap_or("flat");
            let change: u32 = self.rng.gen_range(1..=30);
            let mut line = String::new();
            let _ = write!(
                line,
                "{} trending {trend} {change}% across {} placements",
                row.key, row.totals.records
            );
            findings.push(line);
        }

        Insight {
            id: Uuid::new_v4(),
            template_id: template.id.to_string(),
            title: template.title.to_string(),
            headline,
            findings,
            confidence: self.rng.gen_range(60..=98),
            simulated_latency: Duration::from_millis(self.rng.gen_range(1_500..=2_000)),
            generated_at: Utc::now(),
        }
    }
}

/// Handle for an accepted generation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InsightTicket {
    sequence: u64,
    template: &'static InsightTemplate,
}

impl InsightTicket {
    /// Template the request was made for.
    #[must_use]
    pub const fn template(&self) -> &'static InsightTemplate {
        self.template
    }
}

/// Everything a renderer needs to preview a saved insight.
///
/// Passed explicitly to [`InsightPreview::render`]; nothing is stashed in
/// shared state between the request and the render.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InsightPreview {
    /// The insight being previewed
    pub insight: Insight,
    /// Filters that were live when it was saved
    pub filters: FilterState,
    /// Active filter labels at save time
    pub summary: Vec<String>,
}

impl InsightPreview {
    /// Plain-text rendering of the preview.
    #[must_use]
    pub fn render(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "{}", self.insight.title);
        let _ = writeln!(out, "{}", self.insight.headline);
        for finding in &self.insight.findings {
            let _ = writeln!(out, "  - {finding}");
        }
        let _ = writeln!(out, "Confidence: {}%", self.insight.confidence);
        if self.summary.is_empty() {
            let _ = writeln!(out, "Filters: none");
        } else {
            let _ = writeln!(out, "Filters: {}", self.summary.join(" | "));
        }
        out
    }
}

/// Serializes insight requests and keeps saved insights.
#[derive(Debug, Default)]
pub struct InsightRunner {
    next_sequence: u64,
    pending: Option<InsightTicket>,
    saved: Vec<InsightPreview>,
}

impl InsightRunner {
    /// Creates an idle runner.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true while a request is in flight.
    #[must_use]
    pub const fn is_busy(&self) -> bool {
        self.pending.is_some()
    }

    /// Accepts a request for `template_id`.
    ///
    /// # Errors
    ///
    /// - `NotFound` for an unknown template
    /// - `Boundary` while another request is pending
    pub fn submit(&mut self, template_id: &str) -> DashboardResult<InsightTicket> {
        let template = InsightTemplate::find(template_id)
            .ok_or_else(|| DashboardError::not_found(format!("insight template '{template_id}'")))?;

        if let Some(pending) = self.pending {
            warn!(
                pending = pending.template.id,
                requested = template_id,
                "insight request rejected, another is in flight"
            );
            return Err(DashboardError::boundary(
                "an insight is already being generated",
            ));
        }

        self.next_sequence += 1;
        let ticket = InsightTicket {
            sequence: self.next_sequence,
            template,
        };
        self.pending = Some(ticket);
        debug!(template = template.id, sequence = ticket.sequence, "insight request accepted");
        Ok(ticket)
    }

    /// Completes the pending request.
    ///
    /// # Errors
    ///
    /// `NotFound` if `ticket` is not the pending request.
    pub fn complete(
        &mut self,
        ticket: InsightTicket,
        generator: &mut dyn InsightGenerator,
        records: &[Record],
    ) -> DashboardResult<Insight> {
        if self.pending != Some(ticket) {
            return Err(DashboardError::not_found("no matching insight request in flight"));
        }

        let insight = generator.generate(ticket.template, records);
        self.pending = None;
        info!(
            template = ticket.template.id,
            latency_ms = u64::try_from(insight.simulated_latency.as_millis()).unwrap_or(u64::MAX),
            "insight generated"
        );
        Ok(insight)
    }

    /// Keeps an insight together with the filters it was generated under.
    pub fn save(&mut self, insight: Insight, filters: &FilterState) -> Uuid {
        let id = insight.id;
        self.saved.push(InsightPreview {
            insight,
            filters: filters.clone(),
            summary: aggregates::active_filter_summary(filters),
        });
        id
    }

    /// Saved insights in save order.
    #[must_use]
    pub fn saved(&self) -> &[InsightPreview] {
        &self.saved
    }

    /// Builds a preview for a saved insight.
    pub fn preview(&self, id: Uuid) -> DashboardResult<InsightPreview> {
        self.saved
            .iter()
            .find(|p| p.insight.id == id)
            .cloned()
            .ok_or_else(|| DashboardError::not_found(format!("saved insight {id}")))
    }
}
