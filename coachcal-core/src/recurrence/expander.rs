//! Series expansion: anchor session + rule -> successor sessions.

use tracing::{debug, warn};

use super::{RecurrenceRule, advance};
use crate::config::ExpansionConfig;
use crate::constants::DEFAULT_OCCURRENCES;
use crate::error::ScheduleResult;
use crate::occurrence::Occurrence;

/// Expand `anchor` into its successors with the default settings
/// (52 sessions when the rule gives no count, a count of 0 read as unset).
///
/// The anchor itself is not part of the result. Every successor carries
/// `rule` with the series id settled (see [`RecurrenceRule::for_series`]).
/// A caller storing the anchor next to its successors must stamp it with
/// `rule.for_series(&anchor.id)` too, or the anchor stays outside the series.
/// [`Expander::schedule`] does that stamping.
pub fn expand(anchor: &Occurrence, rule: &RecurrenceRule) -> Vec<Occurrence> {
    let max_total = rule
        .occurrences
        .filter(|n| *n > 0)
        .unwrap_or(DEFAULT_OCCURRENCES);

    expand_bounded(anchor, rule, max_total)
}

/// Expands series according to an [`ExpansionConfig`].
#[derive(Debug, Clone, Default)]
pub struct Expander {
    config: ExpansionConfig,
}

impl Expander {
    pub fn new(config: ExpansionConfig) -> Self {
        Expander { config }
    }

    pub fn config(&self) -> &ExpansionConfig {
        &self.config
    }

    /// Expand `anchor` into its successors.
    ///
    /// Fails only when the rule asks for zero sessions and the config
    /// rejects that.
    pub fn expand(
        &self,
        anchor: &Occurrence,
        rule: &RecurrenceRule,
    ) -> ScheduleResult<Vec<Occurrence>> {
        let max_total = self.config.max_total(rule.occurrences)?;
        Ok(expand_bounded(anchor, rule, max_total))
    }

    /// Place a new session, generating its whole series when it carries a rule.
    ///
    /// Returns the anchor first (with the settled series id stamped on its
    /// rule) followed by the successors. A session without a rule comes back
    /// alone and untouched.
    pub fn schedule(&self, mut anchor: Occurrence) -> ScheduleResult<Vec<Occurrence>> {
        let Some(rule) = anchor.recurrence.take() else {
            return Ok(vec![anchor]);
        };

        let rule = rule.for_series(&anchor.id);
        let successors = self.expand(&anchor, &rule)?;
        anchor.recurrence = Some(rule);

        let mut series = Vec::with_capacity(successors.len() + 1);
        series.push(anchor);
        series.extend(successors);
        Ok(series)
    }
}

fn expand_bounded(anchor: &Occurrence, rule: &RecurrenceRule, max_total: u32) -> Vec<Occurrence> {
    if rule.interval < 1 {
        warn!(
            anchor = %anchor.id,
            interval = rule.interval,
            "Recurrence interval below 1, using 1"
        );
    }
    let interval = rule.effective_interval();
    let series_rule = rule.for_series(&anchor.id);
    let duration = anchor.duration();

    let mut successors = Vec::new();
    let mut cursor = anchor.start;
    let mut count = 1;

    while count < max_total {
        if rule.is_past_end(&cursor) {
            break;
        }

        let Some(next) = advance(&cursor, &rule.frequency, interval) else {
            warn!(
                anchor = %anchor.id,
                cursor = %cursor,
                "Series ran past the supported date range"
            );
            break;
        };
        cursor = next;

        if rule.is_past_end(&cursor) {
            break;
        }

        successors.push(anchor.successor(cursor, duration, &series_rule));
        count += 1;
    }

    debug!(
        anchor = %anchor.id,
        series = series_rule.series_id.as_deref().unwrap_or_default(),
        frequency = %rule.frequency,
        generated = successors.len(),
        "Expanded recurring series"
    );

    successors
}
