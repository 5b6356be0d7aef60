// SPDX-License-Identifier: MPL-2.0

//! Storefront page shown beneath the category navigator.

use crate::app::{AppModel, Message};
use crate::fl;
use crate::widgets::category_nav::{CategoryView, LoadState};
use cosmic::iced::{Alignment, Length};
use cosmic::prelude::*;
use cosmic::widget;

/// View for the Storefront page
pub fn view(app: &AppModel, space_s: u16, space_m: u16) -> Element<'_, Message> {
    let header = widget::row::with_capacity(2)
        .push(widget::text::title1(fl!("storefront")).width(Length::Fill))
        .push(
            widget::button::standard(fl!("refresh")).on_press(Message::ReloadCategories),
        )
        .align_y(Alignment::Center)
        .spacing(space_m);

    let status = match app.navigator.load_state() {
        LoadState::Loading => fl!("loading-categories"),
        LoadState::Ready => fl!("category-count", count = app.navigator.categories().len()),
        LoadState::Failed(_) => fl!("load-failed"),
    };

    let layout = match app.navigator.layout() {
        CategoryView::Inline => fl!("layout-default"),
        CategoryView::Sidebar => fl!("layout-sidebar"),
    };

    let status_card = widget::container(
        widget::column::with_capacity(3)
            .push(widget::text::title4(status))
            .push(widget::text::caption(fl!("layout-label", layout = layout)))
            .push(widget::text::caption(app.config.tree_url.clone()))
            .spacing(4),
    )
    .padding(space_s)
    .width(Length::Fill)
    .class(cosmic::style::Container::Card);

    widget::column::with_capacity(3)
        .push(header)
        .push(status_card)
        .push(widget::text::body(fl!("storefront-hint")))
        .spacing(space_m)
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
}
