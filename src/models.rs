//! Records of the job-matching and skills-learning schema.
//!
//! These mirror the relational tables (users, skills, lessons, progress, jobs,
//! applications, notifications). Storage and transport are left to the
//! application that owns the database.

use crate::i18n::{LanguageCode, TranslationKey, TranslationStrings};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i64,
    pub name: String,
    pub phone: String,
    pub preferred_language: LanguageCode,
    pub village: Option<String>,
    /// Whether the user reads text; drives audio-first UI when false
    pub can_read_text: bool,
    pub hours_per_day: Option<u32>,
    pub wants_remote_work: bool,
    pub profile_photo_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Skill {
    pub id: i64,
    pub name: String,
    pub image_path: String,
    pub simple_description: Option<String>,
    /// Display text such as "₹3000-5000"
    pub can_earn: Option<String>,
    pub needs_tools: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lesson {
    pub id: i64,
    pub skill_id: i64,
    pub step_number: u32,
    pub title: String,
    pub video_url: Option<String>,
    pub audio_url: Option<String>,
    pub image_path: Option<String>,
    pub duration_minutes: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProgress {
    pub id: i64,
    pub user_id: i64,
    pub skill_id: i64,
    pub last_completed_step: u32,
    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
    pub certificate_generated: bool,
}

impl UserProgress {
    /// Share of the course completed, 0-100.
    pub fn percent_complete(&self, total_steps: u32) -> u8 {
        if total_steps == 0 {
            return 0;
        }
        let done = self.last_completed_step.min(total_steps);
        (u64::from(done) * 100 / u64::from(total_steps)) as u8
    }

    pub fn is_finished(&self) -> bool {
        self.finished_at.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub id: i64,
    pub title: String,
    pub company_name: String,
    pub what_you_do: String,
    pub skill_needed: Option<i64>,
    pub village: Option<String>,
    pub can_work_from_home: bool,
    pub monthly_pay: Option<String>,
    pub hours_per_day: Option<u32>,
    pub is_verified: bool,
    pub employer_phone: Option<String>,
    pub created_at: DateTime<Utc>,
    pub expires_at: Option<DateTime<Utc>>,
    pub is_active: bool,
}

impl Job {
    /// Active and not past its expiry.
    pub fn is_open(&self, now: DateTime<Utc>) -> bool {
        self.is_active && self.expires_at.map_or(true, |expires| now < expires)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplicationStatus {
    #[default]
    Submitted,
    EmployerContacted,
    Hired,
    Rejected,
}

impl ApplicationStatus {
    /// Catalog phrase shown to the applicant for this status.
    pub fn label_key(&self) -> TranslationKey {
        match self {
            ApplicationStatus::Submitted => TranslationKey::Waiting,
            ApplicationStatus::EmployerContacted => TranslationKey::Contacted,
            ApplicationStatus::Hired => TranslationKey::Hired,
            ApplicationStatus::Rejected => TranslationKey::Rejected,
        }
    }

    pub fn label(&self, strings: &TranslationStrings) -> &'static str {
        strings.get(self.label_key())
    }

    /// Allowed moves: submitted -> employer_contacted -> hired | rejected,
    /// and submitted -> rejected. Hired and rejected are final.
    pub fn can_transition_to(&self, next: ApplicationStatus) -> bool {
        use ApplicationStatus::*;
        matches!(
            (self, next),
            (Submitted, EmployerContacted)
                | (Submitted, Rejected)
                | (EmployerContacted, Hired)
                | (EmployerContacted, Rejected)
        )
    }

    pub fn is_final(&self) -> bool {
        matches!(self, ApplicationStatus::Hired | ApplicationStatus::Rejected)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    pub id: i64,
    pub user_id: i64,
    pub job_id: i64,
    pub applicant_name: String,
    pub applicant_phone: String,
    pub applicant_village: Option<String>,
    /// Recorded "why I want this job" message in place of a cover letter
    pub voice_message_url: Option<String>,
    pub status: ApplicationStatus,
    pub applied_at: DateTime<Utc>,
    pub employer_viewed_at: Option<DateTime<Utc>>,
    pub status_updated_at: Option<DateTime<Utc>>,
}

impl Application {
    /// Move to `next` if allowed, stamping `status_updated_at`.
    ///
    /// Returns false and leaves the application untouched otherwise.
    pub fn update_status(&mut self, next: ApplicationStatus, now: DateTime<Utc>) -> bool {
        if !self.status.can_transition_to(next) {
            return false;
        }
        self.status = next;
        self.status_updated_at = Some(now);
        true
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationType {
    NewJob,
    ApplicationUpdate,
    LessonReminder,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: i64,
    pub user_id: i64,
    #[serde(rename = "type")]
    pub kind: NotificationType,
    pub title: String,
    pub message: String,
    pub action_url: Option<String>,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}
