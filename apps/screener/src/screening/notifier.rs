//! Email notifications — rejection to the applicant, assessment to the recruiter.
//!
//! Both sends return a status or an error and never panic; the orchestrator decides
//! what a failed send means (it logs it and moves on).

use async_trait::async_trait;
use html_escape::{encode_double_quoted_attribute, encode_text};
use reqwest::Client;
use serde::Serialize;
use thiserror::Error;
use tracing::debug;

use crate::config::MailConfig;
use crate::screening::models::ApplicantData;

pub const REJECTION_SUBJECT: &str = "Application Status Update";

#[derive(Debug, Error)]
pub enum NotificationError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("mail provider rejected the message (status {status}): {body}")]
    Rejected { status: u16, body: String },
}

/// The send capability used by the screening pipeline.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send_rejection(&self, to_email: &str, name: &str) -> Result<u16, NotificationError>;

    async fn forward_successful_applicant(
        &self,
        to_email: &str,
        applicant: &ApplicantData,
        formatted_assessment: &str,
    ) -> Result<u16, NotificationError>;
}

/// Collapses blank lines, trims, escapes and wraps the narrative for an email body.
pub fn format_assessment_for_email(assessment: &str) -> String {
    let collapsed = assessment.replace("\n\n", "\n");
    format!(
        "<div style='font-family: Arial, sans-serif;'>{}</div>",
        encode_text(collapsed.trim())
    )
}

// ────────────────────────────────────────────────────────────────────────────
// SendGrid v3 mail/send payload
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct MailPayload {
    personalizations: Vec<Personalization>,
    from: Address,
    subject: String,
    content: Vec<Content>,
}

#[derive(Debug, Serialize)]
struct Personalization {
    to: Vec<Address>,
}

#[derive(Debug, Serialize)]
struct Address {
    email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,
}

#[derive(Debug, Serialize)]
struct Content {
    #[serde(rename = "type")]
    content_type: &'static str,
    value: String,
}

impl MailPayload {
    fn new(
        from: &MailConfig,
        to_email: &str,
        subject: String,
        plain_text: String,
        html: Option<String>,
    ) -> Self {
        // The provider requires text/plain to precede text/html.
        let mut content = vec![Content {
            content_type: "text/plain",
            value: plain_text,
        }];
        if let Some(html) = html {
            content.push(Content {
                content_type: "text/html",
                value: html,
            });
        }

        Self {
            personalizations: vec![Personalization {
                to: vec![Address {
                    email: to_email.to_string(),
                    name: None,
                }],
            }],
            from: Address {
                email: from.from_email.clone(),
                name: Some(from.from_name.clone()),
            },
            subject,
            content,
        }
    }
}

pub fn rejection_mail(from: &MailConfig, to_email: &str, name: &str) -> MailPayload {
    let body = format!(
        "Dear {name},\n\n\
         Thank you for your interest in our company. After careful consideration, \
         we regret to inform you that we will not be moving forward with your \
         application at this time. We appreciate your time and effort in applying.\n\n\
         Best regards,\n\
         {}",
        from.from_name
    );
    MailPayload::new(from, to_email, REJECTION_SUBJECT.to_string(), body, None)
}

pub fn recruiter_mail(
    from: &MailConfig,
    to_email: &str,
    applicant: &ApplicantData,
    formatted_assessment: &str,
) -> MailPayload {
    let html = format!(
        "<p>Name: {name}</p>\n\
         <p>Email: {email}</p>\n\
         <p>Position: {position}</p>\n\
         <p>Resume Path: <a href=\"{path}\">View Resume</a></p>\n\
         <p>Assessment:</p>\n\
         {formatted_assessment}",
        name = encode_text(&applicant.name),
        email = encode_text(&applicant.email),
        position = encode_text(&applicant.position_applied),
        path = encode_double_quoted_attribute(&applicant.resume_path),
    );
    let plain = format!(
        "Name: {}\nEmail: {}\nPosition: {}\nResume Path: {}\nAssessment:\n{}",
        applicant.name,
        applicant.email,
        applicant.position_applied,
        applicant.resume_path,
        formatted_assessment
    );
    MailPayload::new(
        from,
        to_email,
        format!("Successful Applicant: {}", applicant.name),
        plain,
        Some(html),
    )
}

/// SendGrid-backed notifier.
pub struct SendGridNotifier {
    client: Client,
    endpoint: String,
    config: MailConfig,
}

impl SendGridNotifier {
    pub fn new(config: MailConfig) -> Result<Self, NotificationError> {
        Ok(Self {
            client: Client::builder().timeout(config.timeout).build()?,
            endpoint: format!("{}/mail/send", config.base_url.trim_end_matches('/')),
            config,
        })
    }

    async fn send(&self, payload: &MailPayload) -> Result<u16, NotificationError> {
        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.config.api_key)
            .json(payload)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(NotificationError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        debug!(status = status.as_u16(), subject = %payload.subject, "Mail accepted");
        Ok(status.as_u16())
    }
}

#[async_trait]
impl Notifier for SendGridNotifier {
    async fn send_rejection(&self, to_email: &str, name: &str) -> Result<u16, NotificationError> {
        self.send(&rejection_mail(&self.config, to_email, name))
            .await
    }

    async fn forward_successful_applicant(
        &self,
        to_email: &str,
        applicant: &ApplicantData,
        formatted_assessment: &str,
    ) -> Result<u16, NotificationError> {
        self.send(&recruiter_mail(
            &self.config,
            to_email,
            applicant,
            formatted_assessment,
        ))
        .await
    }
}
