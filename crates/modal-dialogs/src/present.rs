//! Dialog presentation entry points

use crate::action::DialogAction;
use crate::dialog::{Dialog, DialogBuilder};
use crate::render::{DialogDelegate, DialogRenderer};
use crate::style::{DialogSource, DialogStyle};
use modal_core::{ModalConfig, ModalCoordinator, ModalResult, Presenter};
use std::sync::Arc;

/// Present `dialog` and resolve to the chosen action's result.
///
/// Resolves to `None` when the chosen action completes without a value.
pub async fn present_dialog<R, V>(
    renderer: &R,
    presenter: &Presenter,
    config: &ModalConfig,
    dialog: Dialog<V>,
    style: DialogStyle,
) -> ModalResult<Option<V>>
where
    R: DialogRenderer + ?Sized,
    V: Send + 'static,
{
    let descriptor = dialog.descriptor(style);
    let actions: Arc<[DialogAction<V>]> = dialog.into_actions().into();

    let presentation = ModalCoordinator::present(presenter, config, |listener| {
        renderer.make_dialog(descriptor, DialogDelegate::new(actions, listener))
    })?;
    let chosen = presentation.await?;
    chosen.await
}

/// Build and present an alert
pub async fn alert<R, V>(
    renderer: &R,
    presenter: &Presenter,
    config: &ModalConfig,
    dialog: DialogBuilder<V>,
) -> ModalResult<Option<V>>
where
    R: DialogRenderer + ?Sized,
    V: Send + 'static,
{
    let dialog = dialog.build()?;
    present_dialog(renderer, presenter, config, dialog, DialogStyle::Alert).await
}

/// Build and present an action sheet pointing at `source`
pub async fn action_sheet<R, V>(
    renderer: &R,
    presenter: &Presenter,
    config: &ModalConfig,
    source: DialogSource,
    dialog: DialogBuilder<V>,
) -> ModalResult<Option<V>>
where
    R: DialogRenderer + ?Sized,
    V: Send + 'static,
{
    let dialog = dialog.build()?;
    present_dialog(
        renderer,
        presenter,
        config,
        dialog,
        DialogStyle::ActionSheet { source },
    )
    .await
}
