//! User service.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use tracing::debug;
use votely_common::AppResult;
use votely_db::entities::{PollId, PrivateField, User, UserId, Vote, VoteId};
use votely_db::repositories::{PollRepository, UserRepository, VoteRepository};

/// Identity of whoever is reading data, passed explicitly into field resolution.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Viewer {
    user: Option<UserId>,
}

impl Viewer {
    /// A viewer who is not signed in.
    #[must_use]
    pub const fn anonymous() -> Self {
        Self { user: None }
    }

    /// A signed-in viewer.
    #[must_use]
    pub const fn user(id: UserId) -> Self {
        Self { user: Some(id) }
    }

    /// The viewer's user id, if signed in.
    #[must_use]
    pub const fn user_id(&self) -> Option<UserId> {
        self.user
    }

    /// Whether this viewer is the given user.
    #[must_use]
    pub fn is(&self, id: UserId) -> bool {
        self.user == Some(id)
    }
}

/// A private field after the visibility check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VisibleField<T> {
    /// The value, or `None` when hidden from this viewer.
    pub value: Option<T>,
    pub public: bool,
}

impl<T: Clone> VisibleField<T> {
    fn resolve(field: &PrivateField<T>, owner: UserId, viewer: &Viewer) -> Self {
        let visible = field.public || viewer.is(owner);
        Self {
            value: if visible { field.value.clone() } else { None },
            public: field.public,
        }
    }
}

/// A user as seen by a particular viewer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: UserId,
    pub username: String,
    pub email: String,
    pub avatar: Option<String>,
    pub bio: Option<String>,
    pub birth_date: VisibleField<NaiveDate>,
    pub name: VisibleField<String>,
    pub polls: Vec<PollId>,
    pub votes: Vec<VoteId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl UserProfile {
    /// Resolve `user`'s fields for `viewer`.
    #[must_use]
    pub fn for_viewer(user: &User, viewer: &Viewer) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            email: user.email.clone(),
            avatar: user.avatar.clone(),
            bio: user.bio.clone(),
            birth_date: VisibleField::resolve(&user.birth_date, user.id, viewer),
            name: VisibleField::resolve(&user.name, user.id, viewer),
            polls: user.polls.clone(),
            votes: user.votes.clone(),
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

/// User service for business logic.
#[derive(Clone)]
pub struct UserService {
    user_repo: UserRepository,
    poll_repo: PollRepository,
    vote_repo: VoteRepository,
}

impl UserService {
    /// Create a new user service.
    #[must_use]
    pub const fn new(
        user_repo: UserRepository,
        poll_repo: PollRepository,
        vote_repo: VoteRepository,
    ) -> Self {
        Self {
            user_repo,
            poll_repo,
            vote_repo,
        }
    }

    /// Get a user by ID.
    pub async fn get_user(&self, id: UserId) -> AppResult<User> {
        debug!(user_id = %id, "Fetching user");
        self.user_repo.get_by_id(id).await
    }

    /// Get every user.
    pub async fn get_users(&self) -> AppResult<Vec<User>> {
        self.user_repo.find_all().await
    }

    /// Get a user's profile as seen by `viewer`.
    pub async fn get_profile(&self, id: UserId, viewer: &Viewer) -> AppResult<UserProfile> {
        let user = self.user_repo.get_by_id(id).await?;
        Ok(UserProfile::for_viewer(&user, viewer))
    }

    /// Resolve the viewer to their own user, if signed in.
    pub async fn get_viewer(&self, viewer: &Viewer) -> AppResult<Option<User>> {
        match viewer.user_id() {
            Some(id) => self.user_repo.find_by_id(id).await,
            None => Ok(None),
        }
    }

    /// Votes cast by a user. Unknown users have none.
    pub async fn get_user_votes(&self, id: UserId) -> AppResult<Vec<Vote>> {
        self.vote_repo.find_by_user(id).await
    }

    /// Number of users.
    pub async fn count_users(&self) -> AppResult<u64> {
        self.user_repo.count().await
    }

    /// Number of polls a user authored.
    pub async fn count_user_polls(&self, id: UserId) -> AppResult<u64> {
        self.poll_repo.count_by_author(id).await
    }

    /// Number of votes a user cast.
    pub async fn count_user_votes(&self, id: UserId) -> AppResult<u64> {
        self.vote_repo.count_by_user(id).await
    }

    /// Number of votes cast on polls the user authored.
    pub async fn count_user_received_votes(&self, id: UserId) -> AppResult<u64> {
        self.vote_repo.count_received_by_author(id).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use votely_db::test_utils::TestStore;

    fn service() -> (UserService, UserId, UserId) {
        let mut store = TestStore::new();
        let ada = store.user("ada");
        let bob = store.user("bob");
        let poll = store.poll(ada, "Lunch?", &["Pizza", "Sushi"], false, 0);
        store.vote(bob, poll, &[0], 1);
        store.vote(ada, poll, &[1], 2);
        let db = store.build().unwrap();
        let service = UserService::new(
            UserRepository::new(Arc::clone(&db)),
            PollRepository::new(Arc::clone(&db)),
            VoteRepository::new(db),
        );
        (service, ada, bob)
    }

    #[tokio::test]
    async fn test_private_name_hidden_from_others() {
        let (service, ada, bob) = service();

        let own = service.get_profile(ada, &Viewer::user(ada)).await.unwrap();
        assert_eq!(own.name.value.as_deref(), Some("ADA"));
        assert!(!own.name.public);

        let other = service.get_profile(ada, &Viewer::user(bob)).await.unwrap();
        assert_eq!(other.name.value, None);

        let anonymous = service.get_profile(ada, &Viewer::anonymous()).await.unwrap();
        assert_eq!(anonymous.name.value, None);
    }

    #[test]
    fn test_public_field_visible_to_everyone() {
        let now = Utc::now();
        let user = User {
            id: UserId(1),
            username: "ada".into(),
            email: "ada@example.com".into(),
            password: "x".into(),
            avatar: None,
            bio: None,
            birth_date: PrivateField::public(NaiveDate::from_ymd_opt(1815, 12, 10).unwrap()),
            name: PrivateField::private("Ada".to_string()),
            polls: vec![],
            votes: vec![],
            created_at: now,
            updated_at: now,
        };
        let profile = UserProfile::for_viewer(&user, &Viewer::anonymous());
        assert!(profile.birth_date.value.is_some());
        assert!(profile.birth_date.public);
        assert_eq!(profile.name.value, None);
    }

    #[tokio::test]
    async fn test_viewer_resolution() {
        let (service, ada, _) = service();
        assert_eq!(
            service.get_viewer(&Viewer::user(ada)).await.unwrap().map(|u| u.id),
            Some(ada)
        );
        assert!(service.get_viewer(&Viewer::anonymous()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_counters() {
        let (service, ada, bob) = service();
        assert_eq!(service.count_users().await.unwrap(), 2);
        assert_eq!(service.count_user_polls(ada).await.unwrap(), 1);
        assert_eq!(service.count_user_polls(bob).await.unwrap(), 0);
        assert_eq!(service.count_user_votes(bob).await.unwrap(), 1);
        assert_eq!(service.count_user_received_votes(ada).await.unwrap(), 2);
        assert!(service.get_user_votes(UserId(77)).await.unwrap().is_empty());
    }
}
