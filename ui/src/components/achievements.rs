//! Badges and certificates earned by the signed-in user

use crate::format;
use campus_api::types::{Badge, Certificate};
use campus_api::{AchievementApi, ApiResult};
use campus_ui_core::{Effect, Reducer, SmallVec, smallvec};
use chrono::FixedOffset;
use std::sync::Arc;

/// A list fetched from the API
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Remote<T> {
    /// Not requested yet
    #[default]
    Idle,
    /// Request in flight
    Loading,
    /// Fetched
    Loaded(T),
    /// Failed with a user-facing message
    Failed(String),
}

impl<T> Remote<T> {
    fn from_result(result: ApiResult<T>, what: &str) -> Self {
        match result {
            Ok(value) => Self::Loaded(value),
            Err(error) => {
                tracing::warn!(%error, "Failed to load {what}");
                Self::Failed(error.user_message())
            },
        }
    }

    const fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }
}

/// Achievements state
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AchievementsState {
    /// Earned badges
    pub badges: Remote<Vec<Badge>>,
    /// Issued certificates
    pub certificates: Remote<Vec<Certificate>>,
}

/// Achievements actions
#[derive(Clone, Debug, PartialEq)]
pub enum AchievementsAction {
    /// Page shown; loads both lists
    Appeared,
    /// Badges fetched
    BadgesLoaded(ApiResult<Vec<Badge>>),
    /// Certificates fetched
    CertificatesLoaded(ApiResult<Vec<Certificate>>),
}

/// Achievements dependencies
#[derive(Clone)]
pub struct AchievementsEnvironment {
    /// Badge and certificate endpoints
    pub achievements: Arc<dyn AchievementApi>,
}

/// Achievements reducer
#[derive(Clone, Copy, Debug, Default)]
pub struct AchievementsReducer;

impl Reducer for AchievementsReducer {
    type State = AchievementsState;
    type Action = AchievementsAction;
    type Environment = AchievementsEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            AchievementsAction::Appeared => {
                if state.badges.is_loading() || state.certificates.is_loading() {
                    return SmallVec::new();
                }
                state.badges = Remote::Loading;
                state.certificates = Remote::Loading;

                let badges = env.achievements.my_badges();
                let certificates = env.achievements.my_certificates();
                smallvec![Effect::merge(vec![
                    Effect::future(async move {
                        Some(AchievementsAction::BadgesLoaded(badges.await))
                    }),
                    Effect::future(async move {
                        Some(AchievementsAction::CertificatesLoaded(certificates.await))
                    }),
                ])]
            },

            AchievementsAction::BadgesLoaded(result) => {
                state.badges = Remote::from_result(result, "badges");
                SmallVec::new()
            },

            AchievementsAction::CertificatesLoaded(result) => {
                state.certificates = Remote::from_result(result, "certificates");
                SmallVec::new()
            },
        }
    }
}

/// Render-ready badge
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BadgeView {
    /// Badge name
    pub name: String,
    /// What it is awarded for
    pub description: String,
    /// Artwork
    pub icon_url: Option<String>,
    /// Event that granted it
    pub event_title: Option<String>,
    /// Date earned
    pub earned_on: String,
}

/// Render-ready certificate
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CertificateView {
    /// Event attended
    pub event_title: String,
    /// Holder name
    pub participant_name: String,
    /// `4 horas`
    pub workload_label: String,
    /// Issue date
    pub issued_on: String,
    /// Public authenticity code
    pub validation_code: String,
    /// Document link
    pub download_url: Option<String>,
}

/// Render one badge
#[must_use]
pub fn badge_view(badge: &Badge, offset: FixedOffset) -> BadgeView {
    BadgeView {
        name: badge.name.clone(),
        description: badge.description.clone(),
        icon_url: badge.icon_url.clone(),
        event_title: badge.event_title.clone(),
        earned_on: format::date(badge.earned_at, offset),
    }
}

/// Render one certificate
#[must_use]
pub fn certificate_view(certificate: &Certificate, offset: FixedOffset) -> CertificateView {
    let workload_label = match certificate.workload_hours {
        1 => "1 hora".to_string(),
        hours => format!("{hours} horas"),
    };

    CertificateView {
        event_title: certificate.event_title.clone(),
        participant_name: certificate.participant_name.clone(),
        workload_label,
        issued_on: format::date(certificate.issued_at, offset),
        validation_code: certificate.validation_code.clone(),
        download_url: certificate.download_url.clone(),
    }
}

/// Total certified hours, `None` until certificates are loaded
#[must_use]
pub fn total_hours(state: &AchievementsState) -> Option<u32> {
    match &state.certificates {
        Remote::Loaded(certificates) => Some(
            certificates
                .iter()
                .map(|certificate| certificate.workload_hours)
                .sum(),
        ),
        Remote::Idle | Remote::Loading | Remote::Failed(_) => None,
    }
}
