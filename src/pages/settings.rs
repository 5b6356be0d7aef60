// SPDX-License-Identifier: MPL-2.0

//! Settings page view for the storefront navigator.

use crate::app::{AppModel, Message, SettingsStatus};
use crate::fl;
use crate::widgets::category_nav::CategoryView;
use cosmic::iced::{Alignment, Length};
use cosmic::prelude::*;
use cosmic::widget::{self, icon};

/// View for the Settings page
pub fn view(app: &AppModel, space_s: u16, space_m: u16) -> Element<'_, Message> {
    let header = widget::text::title1(fl!("settings"));

    let layout_button = |label: String, layout: CategoryView| {
        widget::button::text(label)
            .class(if app.category_view_input == layout {
                cosmic::theme::Button::Suggested
            } else {
                cosmic::theme::Button::Standard
            })
            .on_press(Message::CategoryViewChanged(layout))
    };

    let storefront_section = cosmic::widget::settings::section()
        .title(fl!("storefront-config"))
        .add(
            cosmic::widget::settings::item::builder(fl!("tree-url"))
                .description(fl!("tree-url-description"))
                .control(
                    widget::text_input(fl!("tree-url-placeholder"), &app.tree_url_input)
                        .on_input(Message::TreeUrlChanged)
                        .width(Length::Fixed(320.0)),
                ),
        )
        .add(
            cosmic::widget::settings::item::builder(fl!("category-view"))
                .description(fl!("category-view-description"))
                .control(
                    widget::row::with_capacity(2)
                        .push(layout_button(fl!("layout-default"), CategoryView::Inline))
                        .push(layout_button(fl!("layout-sidebar"), CategoryView::Sidebar))
                        .spacing(space_s),
                ),
        );

    let status: Option<Element<'_, Message>> = match &app.settings_status {
        SettingsStatus::Idle => None,
        SettingsStatus::Saved => Some(
            widget::row::with_capacity(2)
                .push(icon::from_name("object-select-symbolic").size(16))
                .push(widget::text::body(fl!("settings-saved")))
                .spacing(4)
                .align_y(Alignment::Center)
                .into(),
        ),
        SettingsStatus::Error(e) => Some(
            widget::row::with_capacity(2)
                .push(icon::from_name("dialog-error-symbolic").size(16))
                .push(widget::text::body(fl!("settings-error", error = e.clone())))
                .spacing(4)
                .align_y(Alignment::Center)
                .into(),
        ),
    };

    let actions = widget::row::with_capacity(2)
        .push(widget::button::suggested(fl!("save")).on_press(Message::SaveSettings))
        .push_maybe(status)
        .spacing(space_m)
        .align_y(Alignment::Center);

    widget::scrollable(
        widget::column::with_capacity(3)
            .push(header)
            .push(storefront_section)
            .push(actions)
            .spacing(space_m)
            .width(Length::Fill),
    )
    .height(Length::Fill)
    .into()
}
