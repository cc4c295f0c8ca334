//! Email composition for the two notifications sent per submission.

use antay_core::{ContactRequest, Notification, html::escape_html};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use uuid::Uuid;

/// Recipient and branding used when composing notifications. The sending
/// address belongs to the delivery backend.
#[derive(Debug, Clone, Deserialize)]
pub struct Mailbox {
  /// Fixed operator address that receives every submission.
  pub operator:  String,
  pub site_name: String,
  pub site_url:  String,
}

fn timestamp(at: DateTime<Utc>) -> String {
  at.format("%A, %B %-d, %Y, %I:%M:%S %p UTC").to_string()
}

/// The internal notification: every submitted field plus a server-side
/// timestamp and reference, addressed to the operator. Replies go straight
/// to the submitter.
pub fn compose_operator(
  submission: &ContactRequest,
  mailbox: &Mailbox,
  received_at: DateTime<Utc>,
  reference: Uuid,
) -> Notification {
  let subject = submission.subject_or_empty();
  let phone = submission.phone.as_deref();
  let when = timestamp(received_at);

  let mut text = String::from("New Contact Form Submission:\n--------------------------------\n");
  text.push_str(&format!("Name: {}\n", submission.full_name));
  text.push_str(&format!("Email: {}\n", submission.email));
  if let Some(phone) = phone {
    text.push_str(&format!("Phone: {phone}\n"));
  }
  text.push_str(&format!("Subject: {subject}\n"));
  text.push_str(&format!("Message:\n{}\n", submission.message));
  text.push_str("--------------------------------\n");
  text.push_str(&format!(
    "Received via: {} ({})\nTimestamp: {when}\nReference: {reference}\n",
    mailbox.site_name, mailbox.site_url
  ));

  let phone_row = phone
    .map(|p| format!("<p><strong>Phone:</strong> {}</p>", escape_html(p)))
    .unwrap_or_default();

  let html = format!(
    r#"<div style="font-family: Arial, sans-serif; max-width: 600px; margin: 0 auto;">
  <div style="background-color: #f8f9fa; padding: 20px; border-left: 4px solid #d4af37;">
    <h2 style="color: #333; margin-top: 0;">New Contact Form Submission</h2>
    <div style="background-color: #ffffff; padding: 20px; border-radius: 4px;">
      <p><strong>Name:</strong> {name}</p>
      <p><strong>Email:</strong> {email}</p>
      {phone_row}
      <p><strong>Subject:</strong> {subject}</p>
      <p><strong>Message:</strong></p>
      <p style="white-space: pre-wrap; background-color: #f8f9fa; padding: 15px; border-radius: 4px;">{message}</p>
    </div>
    <div style="margin-top: 20px; padding-top: 20px; border-top: 1px solid #e0e0e0; font-size: 12px; color: #666;">
      <p><strong>Received via:</strong> {site_name} ({site_url})</p>
      <p><strong>Timestamp:</strong> {when}</p>
      <p><strong>Reference:</strong> {reference}</p>
    </div>
  </div>
</div>"#,
    name = escape_html(&submission.full_name),
    email = escape_html(&submission.email),
    subject = escape_html(subject),
    message = escape_html(&submission.message),
    site_name = escape_html(&mailbox.site_name),
    site_url = escape_html(&mailbox.site_url),
  );

  let subject_line = if subject.is_empty() {
    format!("New Contact Form: {}", submission.full_name)
  } else {
    format!("New Contact Form: {subject}")
  };

  Notification {
    to: mailbox.operator.clone(),
    reply_to: Some(submission.email.clone()),
    subject: subject_line,
    text,
    html,
  }
}

/// The acknowledgment sent back to the submitter. Echoes the subject line
/// only; the message body is never reflected.
pub fn compose_acknowledgment(submission: &ContactRequest, mailbox: &Mailbox) -> Notification {
  let subject = submission.subject_or_empty();
  let subject_text = if subject.is_empty() { "(no subject)" } else { subject };

  let text = format!(
    "Dear {name},\n\n\
     We have received your message and appreciate you taking the time to reach out to {site}. \
     Our team will review your inquiry and get back to you as soon as possible.\n\n\
     Your Subject: {subject_text}\n\n\
     Best regards,\n{site} Team\n",
    name = submission.full_name,
    site = mailbox.site_name,
  );

  let html = format!(
    r#"<div style="font-family: Arial, sans-serif; max-width: 600px; margin: 0 auto;">
  <div style="background-color: #f8f9fa; padding: 20px;">
    <h2 style="color: #333; margin-top: 0;">Thank you for contacting us</h2>
    <p style="color: #666; line-height: 1.6;">
      Dear {name},<br><br>
      We have received your message and appreciate you taking the time to reach out to {site}.
      Our team will review your inquiry and get back to you as soon as possible.
    </p>
    <div style="background-color: #ffffff; padding: 15px; border-left: 4px solid #d4af37; margin: 20px 0;">
      <p style="margin: 0; color: #666;"><strong>Your Subject:</strong> {subject}</p>
    </div>
    <p style="color: #666; line-height: 1.6;">
      Best regards,<br>
      <strong>{site} Team</strong>
    </p>
  </div>
</div>"#,
    name = escape_html(&submission.full_name),
    site = escape_html(&mailbox.site_name),
    subject = escape_html(subject_text),
  );

  Notification {
    to: submission.email.clone(),
    reply_to: None,
    subject: format!("We received your message - {}", mailbox.site_name),
    text,
    html,
  }
}
