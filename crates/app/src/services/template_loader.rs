//! Default template loader — baseline automations for a new tenant.
//!
//! Seeds three ordinary automation records through the repository. Nothing
//! in the engine special-cases them; a tenant can edit or delete them like
//! any user-authored rule.

use repflow_domain::automation::{
    Action, ActionKind, Automation, Condition, ConditionOperator, NotificationConfig,
    TaskConfig, TriggerType, UpdateFieldConfig,
};
use repflow_domain::error::RepFlowError;
use repflow_domain::id::{OrganizationId, UserId};
use serde_json::json;

use crate::ports::AutomationRepository;

/// Deal value above which an unqualified opportunity is flagged as at-risk.
const RISK_VALUE_THRESHOLD: i64 = 50_000;
/// Qualification score below which the risk alert fires.
const RISK_SCORE_THRESHOLD: i64 = 50;
/// Days without activity before the idle follow-up fires.
const IDLE_DAYS_THRESHOLD: i64 = 14;

/// Seeds the baseline automations at tenant provisioning time.
pub struct DefaultTemplateLoader<R> {
    repo: R,
}

impl<R: AutomationRepository> DefaultTemplateLoader<R> {
    /// Create a loader backed by the given repository.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Create the three baseline automations for an organization.
    ///
    /// # Errors
    ///
    /// Returns a validation or storage error from building or persisting
    /// any template.
    #[tracing::instrument(skip(self), fields(%organization_id))]
    pub async fn seed(
        &self,
        organization_id: OrganizationId,
        created_by: UserId,
    ) -> Result<Vec<Automation>, RepFlowError> {
        let templates = [
            Self::stage_advance(organization_id, created_by)?,
            Self::risk_alert(organization_id, created_by)?,
            Self::idle_follow_up(organization_id, created_by)?,
        ];

        let mut seeded = Vec::with_capacity(templates.len());
        for template in templates {
            tracing::info!(name = %template.name, "seeding default automation");
            seeded.push(self.repo.create(template).await?);
        }
        Ok(seeded)
    }

    /// Advance a prospecting opportunity once a champion is identified,
    /// and queue a follow-up task.
    fn stage_advance(
        organization_id: OrganizationId,
        created_by: UserId,
    ) -> Result<Automation, RepFlowError> {
        Automation::builder()
            .organization_id(organization_id)
            .created_by(created_by)
            .name("Advance stage when champion identified")
            .description("Moves a prospecting opportunity to engaging once a champion is on record")
            .trigger_type(TriggerType::FieldUpdate)
            .condition(Condition::new(
                "stage",
                ConditionOperator::Equals,
                json!("prospecting"),
            ))
            .condition(Condition::new(
                "champion",
                ConditionOperator::IsNotEmpty,
                json!(null),
            ))
            .action(Action::new(ActionKind::UpdateField(UpdateFieldConfig {
                field: "stage".to_string(),
                value: json!("engaging"),
            })))
            .action(Action::new(ActionKind::CreateTask(TaskConfig {
                title: "Schedule discovery meeting".to_string(),
                description: "Champion identified — move the conversation forward".to_string(),
                due_in_days: Some(3),
                assignee: None,
            })))
            .build()
    }

    /// Flag high-value opportunities with a low qualification score.
    fn risk_alert(
        organization_id: OrganizationId,
        created_by: UserId,
    ) -> Result<Automation, RepFlowError> {
        Automation::builder()
            .organization_id(organization_id)
            .created_by(created_by)
            .name("High-value opportunity at risk")
            .description("Large deal with a weak qualification score needs review")
            .trigger_type(TriggerType::FieldUpdate)
            .condition(Condition::new(
                "value",
                ConditionOperator::GreaterThan,
                json!(RISK_VALUE_THRESHOLD),
            ))
            .condition(Condition::new(
                "qualification_score",
                ConditionOperator::LessThan,
                json!(RISK_SCORE_THRESHOLD),
            ))
            .action(Action::new(ActionKind::SendNotification(
                NotificationConfig {
                    message: "High-value opportunity has a low qualification score".to_string(),
                    recipients: vec![],
                },
            )))
            .action(Action::new(ActionKind::CreateTask(TaskConfig {
                title: "Review at-risk opportunity".to_string(),
                description: String::new(),
                due_in_days: Some(1),
                assignee: None,
            })))
            .build()
    }

    /// Chase opportunities that have gone quiet.
    fn idle_follow_up(
        organization_id: OrganizationId,
        created_by: UserId,
    ) -> Result<Automation, RepFlowError> {
        Automation::builder()
            .organization_id(organization_id)
            .created_by(created_by)
            .name("Idle opportunity follow-up")
            .description("Opportunity untouched for two weeks gets a follow-up task")
            .trigger_type(TriggerType::TimeBased)
            .condition(Condition::new(
                "days_since_activity",
                ConditionOperator::GreaterThan,
                json!(IDLE_DAYS_THRESHOLD),
            ))
            .action(Action::new(ActionKind::CreateTask(TaskConfig {
                title: "Follow up on idle opportunity".to_string(),
                description: "No recorded activity in the last two weeks".to_string(),
                due_in_days: Some(2),
                assignee: None,
            })))
            .build()
    }
}
