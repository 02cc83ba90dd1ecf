//! Poll entity.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use votely_common::{AppError, AppResult};

use super::{PollId, UserId, VoteId};

/// A poll which can be voted on by registered users.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Poll {
    pub id: PollId,

    pub title: String,

    /// Whether a single vote may select more than one option
    #[serde(default)]
    pub multi: bool,

    /// Poll options in display order
    pub options: Vec<String>,

    /// Weak reference to the authoring user
    pub author: UserId,

    /// Votes cast on this poll, in creation order
    #[serde(default)]
    pub votes: Vec<VoteId>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Poll {
    /// Number of votes cast on this poll.
    #[must_use]
    pub fn vote_count(&self) -> usize {
        self.votes.len()
    }

    /// Check that `selection` is an acceptable set of option indices for this poll.
    pub fn check_selection(&self, selection: &[i32]) -> AppResult<()> {
        if selection.is_empty() {
            return Err(AppError::Validation(
                "A vote must select at least one option".to_string(),
            ));
        }
        if !self.multi && selection.len() != 1 {
            return Err(AppError::Validation(format!(
                "Poll {} allows exactly one option, got {}",
                self.id,
                selection.len()
            )));
        }

        let mut seen = HashSet::with_capacity(selection.len());
        for &index in selection {
            let in_range = usize::try_from(index).is_ok_and(|i| i < self.options.len());
            if !in_range {
                return Err(AppError::Validation(format!(
                    "Option {index} is out of range for poll {} ({} options)",
                    self.id,
                    self.options.len()
                )));
            }
            if !seen.insert(index) {
                return Err(AppError::Validation(format!(
                    "Option {index} selected more than once"
                )));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn poll(multi: bool) -> Poll {
        let now = Utc::now();
        Poll {
            id: PollId(1),
            title: "Lunch?".to_string(),
            multi,
            options: vec!["Pizza".into(), "Sushi".into(), "Tacos".into()],
            author: UserId(1),
            votes: vec![],
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_single_choice_selection() {
        let poll = poll(false);
        assert!(poll.check_selection(&[2]).is_ok());
        assert!(matches!(
            poll.check_selection(&[0, 1]),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn test_out_of_range_selection() {
        let poll = poll(true);
        assert!(poll.check_selection(&[5]).is_err());
        assert!(poll.check_selection(&[-1]).is_err());
        assert!(poll.check_selection(&[3]).is_err());
    }

    #[test]
    fn test_multi_selection() {
        let poll = poll(true);
        assert!(poll.check_selection(&[0, 2]).is_ok());
        assert!(poll.check_selection(&[1, 1]).is_err());
        assert!(poll.check_selection(&[]).is_err());
    }
}
