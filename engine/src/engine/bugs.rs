//! Bug report workflow.
//!
//! Submission freezes the reward onto the report; resolution is a single
//! guarded transition whose terminal-state check doubles as the idempotence
//! guard for the reward grant. This coupling is intentional: the status
//! field is the sole source of truth for "has this already been rewarded".

use tracing::{info, warn};

use crate::domain::ports::{StateSlot, StateStore};
use crate::domain::{BugDecision, BugReport, EngineResult, Error, ErrorCode, NotificationKind};

use super::Engine;

/// Outcome of a resolution attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BugResolution {
    /// The decision was applied to a pending report.
    Applied,
    /// The report was already terminal; nothing changed.
    AlreadyResolved,
}

impl<S: StateStore> Engine<S> {
    /// Submit a bug report for the session user.
    ///
    /// The reward amount is frozen from configuration at this point and is
    /// never recomputed, even if configuration changes before resolution.
    pub fn report_bug(&mut self, description: &str) -> EngineResult<BugReport> {
        let description = description.trim();
        if description.is_empty() {
            return Err(Error::invalid_request("bug description must not be empty"));
        }
        let reporter = self.session_user()?;
        let report = BugReport::new(
            self.next_id(),
            reporter.id.clone(),
            reporter.name.clone(),
            description,
            self.now(),
            self.config.bug_reward_points,
        );
        self.state.bug_reports.push(report.clone());
        self.persist(&[StateSlot::BugReports]);
        Ok(report)
    }

    /// Apply a reviewer decision to a report.
    ///
    /// Re-resolving a terminal report is a defined no-op, not an error: the
    /// terminal-state check runs before any ledger mutation, so a reward can
    /// never be granted twice. Approval grants the amount frozen on the
    /// report to its reporter; rejection changes only the status. Both
    /// outcomes queue a notification. The status leaves `pending` only once
    /// the reward has settled, so a grant failure cannot strand a terminal
    /// report with no ledger entry.
    pub fn resolve_bug(&mut self, id: &str, decision: BugDecision) -> EngineResult<BugResolution> {
        let report = self
            .state
            .bug_reports
            .iter()
            .find(|report| report.id == id)
            .ok_or_else(|| Error::not_found(format!("bug report {id} not found")))?;

        if report.is_terminal() {
            return Ok(BugResolution::AlreadyResolved);
        }
        let reporter_id = report.user_id.clone();
        let reward = report.reward_points;
        let reason = report.reward_reason();

        match decision {
            BugDecision::Approved => {
                match self.grant_points(&reporter_id, reward, reason) {
                    Ok(()) => {}
                    // The reporter may have deleted their account since
                    // submission; the resolution still stands.
                    Err(err) if err.code() == ErrorCode::NotFound => {
                        warn!(report_id = id, user_id = %reporter_id, "reporter no longer on roster; reward skipped");
                    }
                    Err(err) => return Err(err),
                }
                self.push_notification(
                    "Bug report approved",
                    format!("Your report was approved and {reward} points were awarded."),
                    NotificationKind::Success,
                );
            }
            BugDecision::Rejected => {
                self.push_notification(
                    "Bug report reviewed",
                    "Your report was reviewed and closed without a reward.",
                    NotificationKind::Info,
                );
            }
        }

        if let Some(report) = self
            .state
            .bug_reports
            .iter_mut()
            .find(|report| report.id == id)
        {
            report.resolve(decision);
        }
        info!(report_id = id, ?decision, "bug report resolved");
        self.persist(&[StateSlot::BugReports, StateSlot::Notifications]);
        Ok(BugResolution::Applied)
    }
}

#[cfg(test)]
#[path = "bugs_tests.rs"]
mod tests;
