/// Submission pipeline integration tests
///
/// These tests drive the orchestrator end to end:
/// - Form rejection leaves nothing behind
/// - Valid slides are stored and attached to the notification
/// - Any rejected slide rolls the whole submission back
/// - Delivery failures keep the submission
#[path = "common/mod.rs"]
mod common;

use announce_core::constants::{MSG_NO_AUDIENCE, NOTIFICATION_SUBJECT};
use announce_core::handlers::{Delivery, SubmissionOutcome, SubmissionState};
use announce_core::models::UploadedFile;
use announce_core::routing::RecipientPolicy;
use common::{
    RecordingEmailSender, TestApp, chapel_talk_form, encode_image, jpeg_upload, png_upload,
    text_upload,
};
use image::ImageFormat;
use mail_parser::{MessageParser, MimeHeaders};

/// Chapel Talk with one 1920x1080 PNG: one submission, one slide, one email
#[tokio::test]
async fn test_chapel_talk_with_widescreen_slide() {
    let app = TestApp::new(RecipientPolicy::ByAudience).await;
    app.add_contact("Chapel Office", "chapel@example.com", true, false)
        .await;

    let outcome = app
        .handler
        .submit(&chapel_talk_form(), &[png_upload("chapel-talk.png", 1920, 1080)])
        .await
        .unwrap();

    let SubmissionOutcome::Notified {
        submission,
        slides,
        delivery,
    } = outcome
    else {
        panic!("expected notified outcome");
    };

    assert_eq!(submission.title, "Chapel Talk");
    assert!(submission.chapel);
    assert!(!submission.praise);
    assert_eq!(slides.len(), 1);
    assert!(matches!(delivery, Delivery::Sent { .. }));

    assert_eq!(app.store.count_submissions().await.unwrap(), 1);
    assert_eq!(app.store.list_slides(submission.id).await.unwrap().len(), 1);
    assert_eq!(app.stored_media_files().len(), 1);

    let sent = app.sender.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].to, vec!["chapel@example.com".to_string()]);
    assert_eq!(sent[0].from, common::TEST_FROM);

    let message = MessageParser::default().parse(&sent[0].raw).unwrap();
    assert_eq!(message.subject(), Some(NOTIFICATION_SUBJECT));
    assert_eq!(message.attachment_count(), 1);
    let attachment = message.attachment(0).unwrap();
    assert_eq!(attachment.attachment_name(), Some("chapel-talk.png"));
    assert!(!attachment.contents().is_empty());

    let body = message.body_text(0).unwrap();
    assert!(body.contains("Title: Chapel Talk"));
    assert!(body.contains("Start Date: July 16, 2025"));
    assert!(body.contains("End Date: July 23, 2025"));
}

#[tokio::test]
async fn test_four_by_three_slide_rolls_back() {
    let app = TestApp::new(RecipientPolicy::ByAudience).await;
    app.add_contact("Chapel Office", "chapel@example.com", true, false)
        .await;

    let outcome = app
        .handler
        .submit(&chapel_talk_form(), &[png_upload("old.png", 1200, 900)])
        .await
        .unwrap();

    assert_eq!(outcome.state(), SubmissionState::RolledBack);
    let errors = outcome.errors().unwrap();
    assert_eq!(errors.non_field_errors().len(), 1);
    assert!(errors.non_field_errors()[0].starts_with("old.png: "));
    assert!(errors.non_field_errors()[0].contains("16:9 aspect ratio"));

    assert_eq!(app.store.count_submissions().await.unwrap(), 0);
    assert!(app.sender.sent().is_empty());
}

#[tokio::test]
async fn test_text_file_rolls_back() {
    let app = TestApp::new(RecipientPolicy::ByAudience).await;

    let outcome = app
        .handler
        .submit(&chapel_talk_form(), &[text_upload("notes.txt")])
        .await
        .unwrap();

    let errors = outcome.errors().unwrap();
    assert!(errors.non_field_errors()[0].contains("PNG or JPG image"));
    assert_eq!(app.store.count_submissions().await.unwrap(), 0);
}

/// Slide k of N failing leaves no submission, slides or media behind
#[tokio::test]
async fn test_partial_failure_is_all_or_nothing() {
    let app = TestApp::new(RecipientPolicy::ByAudience).await;
    app.add_contact("Chapel Office", "chapel@example.com", true, false)
        .await;

    let files = vec![
        png_upload("one.png", 1920, 1080),
        jpeg_upload("two.jpg", 1280, 720),
        png_upload("three.png", 800, 800),
        png_upload("four.png", 1600, 900),
    ];

    let outcome = app
        .handler
        .submit(&chapel_talk_form(), &files)
        .await
        .unwrap();

    assert_eq!(outcome.state(), SubmissionState::RolledBack);
    let errors = outcome.errors().unwrap();
    assert_eq!(errors.non_field_errors().len(), 1);
    assert!(errors.non_field_errors()[0].starts_with("three.png: "));

    assert_eq!(app.store.count_submissions().await.unwrap(), 0);
    assert!(app.store.list_submissions().await.unwrap().is_empty());
    assert!(app.stored_media_files().is_empty());
    assert!(app.sender.sent().is_empty());
}

#[tokio::test]
async fn test_every_rejected_file_is_reported() {
    let app = TestApp::new(RecipientPolicy::ByAudience).await;

    let files = vec![
        text_upload("notes.txt"),
        png_upload("ok.png", 1920, 1080),
        png_upload("square.png", 500, 500),
    ];

    let outcome = app
        .handler
        .submit(&chapel_talk_form(), &files)
        .await
        .unwrap();

    let messages = outcome.errors().unwrap().non_field_errors().to_vec();
    assert_eq!(messages.len(), 2);
    assert!(messages[0].starts_with("notes.txt: "));
    assert!(messages[1].starts_with("square.png: "));
    assert!(app.stored_media_files().is_empty());
}

/// N valid slides create N records, and deleting the submission removes them all
#[tokio::test]
async fn test_slides_cascade_with_submission() {
    let app = TestApp::new(RecipientPolicy::ByAudience).await;
    app.add_contact("Chapel Office", "chapel@example.com", true, false)
        .await;

    let files: Vec<_> = (0..3)
        .map(|i| png_upload(&format!("slide-{}.png", i), 1920, 1080))
        .collect();

    let outcome = app
        .handler
        .submit(&chapel_talk_form(), &files)
        .await
        .unwrap();
    let SubmissionOutcome::Notified { submission, .. } = outcome else {
        panic!("expected notified outcome");
    };

    assert_eq!(app.store.list_slides(submission.id).await.unwrap().len(), 3);
    assert_eq!(app.stored_media_files().len(), 3);

    let sent = app.sender.sent();
    let message = MessageParser::default().parse(&sent[0].raw).unwrap();
    assert_eq!(message.attachment_count(), 3);

    let removed = app
        .handler
        .delete_submission(submission.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(removed.len(), 3);
    assert!(app.store.list_slides(submission.id).await.unwrap().is_empty());
    assert!(app.stored_media_files().is_empty());

    assert!(app.handler.delete_submission(submission.id).await.unwrap().is_none());
}

#[tokio::test]
async fn test_no_audience_is_rejected_before_persisting() {
    let app = TestApp::new(RecipientPolicy::ByAudience).await;

    let mut form = chapel_talk_form();
    form.chapel = None;
    form.praise = Some("false".to_string());

    let outcome = app
        .handler
        .submit(&form, &[png_upload("slide.png", 1920, 1080)])
        .await
        .unwrap();

    assert_eq!(outcome.state(), SubmissionState::Rejected);
    assert_eq!(
        outcome.errors().unwrap().non_field_errors(),
        &[MSG_NO_AUDIENCE.to_string()]
    );
    assert_eq!(app.store.count_submissions().await.unwrap(), 0);
    assert!(app.stored_media_files().is_empty());
}

#[tokio::test]
async fn test_submission_without_slides() {
    let app = TestApp::new(RecipientPolicy::ByAudience).await;
    app.add_contact("Chapel Office", "chapel@example.com", true, false)
        .await;

    let outcome = app.handler.submit(&chapel_talk_form(), &[]).await.unwrap();
    assert_eq!(outcome.state(), SubmissionState::Notified);

    let sent = app.sender.sent();
    let message = MessageParser::default().parse(&sent[0].raw).unwrap();
    assert_eq!(message.attachment_count(), 0);
}

#[tokio::test]
async fn test_no_recipients_skips_delivery() {
    let app = TestApp::new(RecipientPolicy::ByAudience).await;

    let outcome = app.handler.submit(&chapel_talk_form(), &[]).await.unwrap();
    let SubmissionOutcome::Notified { delivery, .. } = outcome else {
        panic!("expected notified outcome");
    };

    assert_eq!(delivery, Delivery::Skipped);
    assert_eq!(app.store.count_submissions().await.unwrap(), 1);
    assert!(app.sender.sent().is_empty());
}

#[tokio::test]
async fn test_delivery_failure_keeps_submission() {
    let app = TestApp::with_sender(
        RecipientPolicy::ByAudience,
        RecordingEmailSender::failing("mailbox unavailable"),
    )
    .await;
    app.add_contact("Chapel Office", "chapel@example.com", true, false)
        .await;

    let outcome = app
        .handler
        .submit(&chapel_talk_form(), &[png_upload("slide.png", 1920, 1080)])
        .await
        .unwrap();

    let SubmissionOutcome::Notified { delivery, slides, .. } = outcome else {
        panic!("expected notified outcome");
    };
    assert_eq!(
        delivery,
        Delivery::Failed {
            reason: "mailbox unavailable".to_string()
        }
    );
    assert_eq!(slides.len(), 1);
    assert_eq!(app.store.count_submissions().await.unwrap(), 1);
    assert_eq!(app.stored_media_files().len(), 1);
}

#[tokio::test]
async fn test_malformed_declared_content_type_still_notifies() {
    let app = TestApp::new(RecipientPolicy::ByAudience).await;
    app.add_contact("Chapel Office", "chapel@example.com", true, false)
        .await;

    let slide = UploadedFile::new(
        "slide.png",
        Some("png".to_string()),
        encode_image(1920, 1080, ImageFormat::Png),
    );
    let outcome = app
        .handler
        .submit(&chapel_talk_form(), &[slide])
        .await
        .unwrap();

    assert_eq!(outcome.state(), SubmissionState::Notified);
    assert_eq!(app.store.count_submissions().await.unwrap(), 1);

    let sent = app.sender.sent();
    let message = MessageParser::default().parse(&sent[0].raw).unwrap();
    let attachment = message.attachment(0).unwrap();
    assert_eq!(attachment.attachment_name(), Some("slide.png"));
    assert_eq!(
        attachment.content_type().and_then(|ct| ct.subtype()),
        Some("png")
    );
}
