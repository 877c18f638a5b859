//! Alerts and action sheets driven through the mock renderer

use assert_matches::assert_matches;
use futures::poll;
use modal_core::{ModalError, Presenter, SurfaceKind};
use modal_dialogs::{
    action_sheet, alert, Dialog, DialogAction, DialogSource, DialogStyle, DialogTextField,
};
use modal_testkit::{anchored, init_test_tracing, test_config, MockDialogRenderer};
use std::future::Future;
use std::pin::pin;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq)]
enum Choice {
    Cancel,
    Delete,
}

fn delete_dialog() -> modal_dialogs::DialogBuilder<Choice> {
    Dialog::builder()
        .title("Delete Item")
        .message("This cannot be undone")
        .action(DialogAction::cancel("Cancel").map_to(Choice::Cancel))
        .action(DialogAction::destructive("Delete").map_to(Choice::Delete))
}

#[tokio::test]
async fn test_alert_resolves_to_tapped_action() {
    init_test_tracing();
    let (anchor, presenter) = anchored();
    let renderer = MockDialogRenderer::new();
    let config = test_config();

    let mut pending = pin!(alert(&renderer, &presenter, &config, delete_dialog()));
    assert!(poll!(&mut pending).is_pending());
    assert_eq!(anchor.presented_kinds(), vec![SurfaceKind::Alert]);

    assert!(renderer.tap_title("Delete"));
    assert_eq!(pending.await.unwrap(), Some(Choice::Delete));

    let probe = renderer.last_probe().unwrap();
    assert_eq!(probe.dismissals(), 1);
}

#[tokio::test]
async fn test_missing_target_renders_nothing() {
    let renderer = MockDialogRenderer::new();
    let result = alert(&renderer, &Presenter::none(), &test_config(), delete_dialog()).await;

    assert_matches!(result, Err(ModalError::MissingPresentationTarget));
    assert_eq!(renderer.rendered(), 0);
}

#[tokio::test]
async fn test_second_tap_is_ignored() {
    let (_anchor, presenter) = anchored();
    let renderer = MockDialogRenderer::new();
    let config = test_config();

    let mut pending = pin!(alert(&renderer, &presenter, &config, delete_dialog()));
    assert!(poll!(&mut pending).is_pending());
    assert!(renderer.tap_title("Delete"));
    assert!(!renderer.tap_title("Cancel"));

    assert_eq!(pending.await.unwrap(), Some(Choice::Delete));
    assert_eq!(renderer.last_probe().unwrap().dismissals(), 1);
}

#[tokio::test]
async fn test_action_receives_field_values() {
    #[derive(Debug, PartialEq)]
    struct Credentials {
        login: String,
        password: String,
    }

    let (_anchor, presenter) = anchored();
    let renderer = MockDialogRenderer::new();
    let config = test_config();
    let dialog = Dialog::builder()
        .title("Sign in")
        .text_field(DialogTextField::email().placeholder("login"))
        .text_field(DialogTextField::password().placeholder("password"))
        .action(DialogAction::cancel("Cancel"))
        .action(
            DialogAction::action("Sign In")
                .map(|fields: &[String]| Credentials {
                    login: fields[0].clone(),
                    password: fields[1].clone(),
                })
                .preferred(),
        );

    let mut pending = pin!(alert(&renderer, &presenter, &config, dialog));
    assert!(poll!(&mut pending).is_pending());
    let descriptor = renderer.last_descriptor().unwrap();
    assert_eq!(descriptor.preferred_action, Some(1));
    assert!(descriptor.text_fields[1].traits.secure_entry);

    renderer.tap_with_fields(1, vec!["me@example.com".to_string(), "hunter2".to_string()]);
    assert_eq!(
        pending.await.unwrap(),
        Some(Credentials {
            login: "me@example.com".to_string(),
            password: "hunter2".to_string(),
        })
    );
}

#[tokio::test]
async fn test_plain_action_resolves_to_none() {
    let (_anchor, presenter) = anchored();
    let renderer = MockDialogRenderer::new();
    let config = test_config();
    let dialog = Dialog::<Choice>::builder().action(DialogAction::action("OK"));

    let mut pending = pin!(alert(&renderer, &presenter, &config, dialog));
    assert!(poll!(&mut pending).is_pending());
    renderer.tap(0);
    assert_eq!(pending.await.unwrap(), None);
}

#[tokio::test]
async fn test_throwing_action_fails_presentation() {
    let (_anchor, presenter) = anchored();
    let renderer = MockDialogRenderer::new();
    let config = test_config();
    let dialog = Dialog::<Choice>::builder()
        .action(DialogAction::cancel("Cancel").throw(ModalError::Cancelled));

    let mut pending = pin!(alert(&renderer, &presenter, &config, dialog));
    assert!(poll!(&mut pending).is_pending());
    renderer.tap(0);
    assert_matches!(pending.await, Err(ModalError::Cancelled));
}

#[test]
fn test_dropping_pending_alert_dismisses_it() {
    let (_anchor, presenter) = anchored();
    let renderer = MockDialogRenderer::new();
    let config = test_config();

    {
        let mut pending = Box::pin(alert(&renderer, &presenter, &config, delete_dialog()));
        let waker = futures::task::noop_waker();
        let mut cx = std::task::Context::from_waker(&waker);
        assert!(pending.as_mut().poll(&mut cx).is_pending());
    }

    let probe = renderer.last_probe().unwrap();
    assert_eq!(probe.dismissals(), 1);
    assert!(!renderer.tap_title("Delete"));
    assert_eq!(probe.dismissals(), 1);
}

#[tokio::test]
async fn test_out_of_range_selection_is_invalid() {
    let (_anchor, presenter) = anchored();
    let renderer = MockDialogRenderer::new();
    let config = test_config();

    let mut pending = pin!(alert(&renderer, &presenter, &config, delete_dialog()));
    assert!(poll!(&mut pending).is_pending());
    assert!(renderer.tap(5));
    assert_matches!(pending.await, Err(ModalError::InvalidDialog { .. }));
}

#[tokio::test]
async fn test_self_dismissing_dialog_is_not_dismissed_again() {
    let (_anchor, presenter) = anchored();
    let renderer = MockDialogRenderer::dismissing_on_tap();
    let config = test_config();

    let mut pending = pin!(alert(&renderer, &presenter, &config, delete_dialog()));
    assert!(poll!(&mut pending).is_pending());
    renderer.tap_title("Cancel");

    assert_eq!(pending.await.unwrap(), Some(Choice::Cancel));
    assert_eq!(renderer.last_probe().unwrap().dismissals(), 0);
}

#[tokio::test]
async fn test_invalid_dialog_fails_before_presenting() {
    let (anchor, presenter) = anchored();
    let renderer = MockDialogRenderer::new();
    let result = alert(&renderer, &presenter, &test_config(), Dialog::<Choice>::builder()).await;

    assert_matches!(result, Err(ModalError::InvalidDialog { .. }));
    assert_eq!(anchor.presented(), 0);
}

#[tokio::test]
async fn test_action_sheet_keeps_its_source() {
    let (anchor, presenter) = anchored();
    let renderer = MockDialogRenderer::new();
    let config = test_config();
    let source = DialogSource::bounds("delete-button", 120.0, 44.0);

    let mut pending = pin!(action_sheet(
        &renderer,
        &presenter,
        &config,
        source.clone(),
        delete_dialog(),
    ));
    assert!(poll!(&mut pending).is_pending());
    assert_eq!(anchor.presented_kinds(), vec![SurfaceKind::ActionSheet]);
    assert_eq!(
        renderer.last_descriptor().unwrap().style,
        DialogStyle::ActionSheet { source }
    );

    renderer.tap_title("Cancel");
    assert_eq!(pending.await.unwrap(), Some(Choice::Cancel));
}

#[tokio::test]
async fn test_action_can_chain_a_follow_up_dialog() {
    let (anchor, presenter) = anchored();
    let renderer = Arc::new(MockDialogRenderer::new());
    let config = test_config();

    let follow_up = {
        let renderer = renderer.clone();
        let presenter = presenter.clone();
        move |_: &[String]| {
            let renderer = renderer.clone();
            let presenter = presenter.clone();
            async move {
                let confirm = Dialog::builder()
                    .title("Are you sure?")
                    .action(DialogAction::cancel("No").map_to(Choice::Cancel))
                    .action(DialogAction::destructive("Yes").map_to(Choice::Delete));
                let choice = alert(renderer.as_ref(), &presenter, &config, confirm).await?;
                Ok(choice.unwrap_or(Choice::Cancel))
            }
        }
    };
    let dialog = Dialog::builder()
        .action(DialogAction::cancel("Cancel").map_to(Choice::Cancel))
        .action(DialogAction::destructive("Delete").flat_map(follow_up));

    let mut pending = pin!(alert(renderer.as_ref(), &presenter, &config, dialog));
    assert!(poll!(&mut pending).is_pending());
    renderer.tap_title("Delete");
    assert!(poll!(&mut pending).is_pending());
    assert_eq!(renderer.rendered(), 2);
    assert_eq!(
        renderer.last_descriptor().unwrap().title.as_deref(),
        Some("Are you sure?")
    );

    renderer.tap_title("Yes");
    assert_eq!(pending.await.unwrap(), Some(Choice::Delete));
    assert_eq!(anchor.presented(), 2);
}
