// SPDX-License-Identifier: MPL-2.0

//! Category navigator builder and rendering.

use super::message::NavMessage;
use super::state::{pair_category_children, CategoryView, LoadState, NavigatorState, ViewLevel};
use crate::api::CategoryNode;
use crate::fl;
use cosmic::iced::widget::mouse_area as hover_area;
use cosmic::iced::{Alignment, Length};
use cosmic::prelude::*;
use cosmic::widget::{self, icon};

const SHIMMER_COUNT: usize = 3;

/// Whether the bar starts with the "All" toggle, and the categories after it.
fn bar_entries(state: &NavigatorState) -> (bool, &[CategoryNode]) {
    match state.layout() {
        CategoryView::Inline => (false, state.categories()),
        CategoryView::Sidebar => (true, state.top_bar_categories()),
    }
}

/// Hover message of a bar entry. Only groups have a dropdown to open.
fn hover_action(node: &CategoryNode) -> NavMessage {
    NavMessage::Hover(node.has_children().then_some(node.id))
}

/// Press message of a first-level heading in the drawer. Every heading is
/// a link, so categories left out of the top bar stay reachable.
fn heading_action(category: &CategoryNode) -> NavMessage {
    NavMessage::Open(category.url.clone())
}

/// Press message of a second-level entry in the drawer. Only nodes with
/// children drill down; the rest are plain links.
fn drawer_action(parent: &CategoryNode, second: &CategoryNode) -> NavMessage {
    if second.has_children() {
        NavMessage::ShowThirdLevel {
            parent: parent.id,
            category: second.id,
        }
    } else {
        NavMessage::Open(second.url.clone())
    }
}

/// Builder for the category navigator.
///
/// Renders the category bar and, beneath it, the page content. In the
/// sidebar layout an open drawer takes the left edge of the content area
/// and the rest of the content acts as a backdrop that closes it.
///
/// ```ignore
/// CategoryNavigator::new(&navigator_state, Message::Nav)
///     .content(page)
///     .drawer_width(400.0)
///     .into()
/// ```
pub struct CategoryNavigator<'a, Message>
where
    Message: Clone + 'static,
{
    state: &'a NavigatorState,
    on_message: Box<dyn Fn(NavMessage) -> Message + 'a>,
    content: Option<Element<'a, Message>>,
    drawer_width: f32,
    spacing: u16,
}

impl<'a, Message> CategoryNavigator<'a, Message>
where
    Message: Clone + 'static,
{
    /// Creates a new navigator.
    ///
    /// - `state`: The navigator state (owned by parent)
    /// - `on_message`: Function to wrap `NavMessage` into the parent's `Message` type
    pub fn new(state: &'a NavigatorState, on_message: impl Fn(NavMessage) -> Message + 'a) -> Self {
        Self {
            state,
            on_message: Box::new(on_message),
            content: None,
            drawer_width: 400.0,
            spacing: 8,
        }
    }

    /// Sets the page shown beneath the category bar.
    pub fn content(mut self, content: impl Into<Element<'a, Message>>) -> Self {
        self.content = Some(content.into());
        self
    }

    /// Sets the drawer width. Default is 400.
    pub fn drawer_width(mut self, width: f32) -> Self {
        self.drawer_width = width;
        self
    }

    /// Sets the spacing between bar items. Default is 8.
    pub fn spacing(mut self, spacing: u16) -> Self {
        self.spacing = spacing;
        self
    }

    fn msg(&self, message: NavMessage) -> Message {
        (self.on_message)(message)
    }

    fn link(&self, node: &CategoryNode) -> Element<'a, Message> {
        widget::button::text(node.name.clone())
            .on_press(self.msg(NavMessage::Open(node.url.clone())))
            .into()
    }

    fn caption_link(&self, node: &CategoryNode) -> Element<'a, Message> {
        widget::button::custom(widget::text::caption(node.name.clone()))
            .class(cosmic::theme::Button::Text)
            .on_press(self.msg(NavMessage::Open(node.url.clone())))
            .into()
    }

    fn render_loading(&self) -> Element<'a, Message> {
        let mut row = widget::row::with_capacity(SHIMMER_COUNT).spacing(self.spacing * 2);
        for _ in 0..SHIMMER_COUNT {
            row = row.push(
                widget::container(widget::text::caption(""))
                    .width(Length::Fixed(80.0))
                    .height(Length::Fixed(24.0))
                    .class(cosmic::style::Container::Card),
            );
        }
        row.align_y(Alignment::Center).into()
    }

    fn render_failed(&self, error: &str) -> Element<'a, Message> {
        widget::row::with_capacity(3)
            .push(icon::from_name("dialog-error-symbolic").size(16))
            .push(widget::text::caption(error.to_string()))
            .push(widget::button::standard(fl!("retry")).on_press(self.msg(NavMessage::Retry)))
            .spacing(self.spacing)
            .align_y(Alignment::Center)
            .into()
    }

    /// One first-level entry of the bar. Entering a group opens its
    /// dropdown; entering a plain link closes any open one.
    fn render_bar_item(&self, node: &CategoryNode) -> Element<'a, Message> {
        hover_area(self.link(node))
            .on_enter(self.msg(hover_action(node)))
            .into()
    }

    /// Dropdown of a hovered first-level category: second-level categories
    /// in paired columns, each followed by its own children.
    fn render_dropdown(&self, parent: &CategoryNode) -> Element<'a, Message> {
        let pairs = pair_category_children(&parent.children);
        let mut columns = widget::row::with_capacity(pairs.len()).spacing(self.spacing * 4);

        for pair in pairs {
            let mut column = widget::column::with_capacity(pair.len()).spacing(self.spacing);
            for second in pair {
                let mut group = widget::column::with_capacity(2).push(self.link(second));
                if second.has_children() {
                    let mut thirds = widget::column::with_capacity(second.children.len());
                    for third in &second.children {
                        thirds = thirds.push(self.caption_link(third));
                    }
                    group = group.push(thirds);
                }
                column = column.push(group.spacing(2));
            }
            columns = columns.push(column);
        }

        widget::container(columns)
            .padding(self.spacing * 2)
            .width(Length::Fill)
            .class(cosmic::style::Container::Card)
            .into()
    }

    fn render_bar(&self) -> Element<'a, Message> {
        let (show_all, items) = bar_entries(self.state);

        let mut bar = widget::row::with_capacity(items.len() + 1).spacing(self.spacing);

        if show_all {
            let all = widget::button::custom(
                widget::row::with_capacity(2)
                    .push(icon::from_name("open-menu-symbolic").size(16))
                    .push(widget::text::body(fl!("all")))
                    .spacing(4)
                    .align_y(Alignment::Center),
            )
            .class(cosmic::theme::Button::Standard)
            .on_press(self.msg(NavMessage::ToggleDrawer));
            bar = bar.push(all);
        }

        for node in items {
            bar = bar.push(self.render_bar_item(node));
        }

        let bar = bar.align_y(Alignment::Center);
        let dropdown = self
            .state
            .hovered_category()
            .filter(|_| !self.state.is_drawer_open())
            .map(|parent| self.render_dropdown(parent));

        let menu = widget::column::with_capacity(2)
            .push(bar)
            .push_maybe(dropdown)
            .spacing(self.spacing);

        hover_area(menu)
            .on_exit(self.msg(NavMessage::Hover(None)))
            .into()
    }

    fn render_main_level(&self) -> Element<'a, Message> {
        let categories = self.state.categories();
        let mut list = widget::column::with_capacity(categories.len()).spacing(self.spacing);

        for category in categories {
            let heading = widget::button::custom(widget::text::title4(category.name.clone()))
                .class(cosmic::theme::Button::Text)
                .on_press(self.msg(heading_action(category)));

            let mut entry =
                widget::column::with_capacity(category.children.len() + 1).push(heading);

            for second in &category.children {
                let action = drawer_action(category, second);
                let drill_down = matches!(action, NavMessage::ShowThirdLevel { .. })
                    .then(|| icon::from_name("go-next-symbolic").size(16));

                let label = widget::row::with_capacity(2)
                    .push(widget::text::body(second.name.clone()).width(Length::Fill))
                    .push_maybe(drill_down)
                    .align_y(Alignment::Center);

                entry = entry.push(
                    widget::button::custom(label)
                        .class(cosmic::theme::Button::Text)
                        .width(Length::Fill)
                        .on_press(self.msg(action)),
                );
            }

            list = list.push(entry.spacing(2));
        }

        list.into()
    }

    fn render_third_level(&self) -> Element<'a, Message> {
        let back = widget::button::custom(
            widget::row::with_capacity(2)
                .push(icon::from_name("go-previous-symbolic").size(16))
                .push(widget::text::body(fl!("back")))
                .spacing(4)
                .align_y(Alignment::Center),
        )
        .class(cosmic::theme::Button::Text)
        .on_press(self.msg(NavMessage::BackToMain));

        let title = self.state.current_second_level().map(|second| {
            let parent = self
                .state
                .current_parent()
                .map(|parent| parent.name.clone())
                .unwrap_or_default();
            widget::column::with_capacity(2)
                .push(widget::text::caption(parent))
                .push(widget::text::title4(second.name.clone()))
        });

        let items = self.state.third_level_items();
        let mut list = widget::column::with_capacity(items.len() + 2)
            .push(back)
            .push_maybe(title);
        for third in items {
            list = list.push(self.link(third));
        }

        list.spacing(self.spacing).into()
    }

    fn render_drawer(&self) -> Element<'a, Message> {
        let header = widget::row::with_capacity(2)
            .push(widget::text::title3(fl!("categories")).width(Length::Fill))
            .push(
                widget::button::icon(icon::from_name("window-close-symbolic"))
                    .on_press(self.msg(NavMessage::CloseDrawer)),
            )
            .align_y(Alignment::Center);

        let body = match self.state.view_level() {
            ViewLevel::Main => self.render_main_level(),
            ViewLevel::Third => self.render_third_level(),
        };

        widget::container(
            widget::column::with_capacity(2)
                .push(header)
                .push(widget::scrollable(body).height(Length::Fill))
                .spacing(self.spacing * 2),
        )
        .padding(self.spacing * 2)
        .width(Length::Fixed(self.drawer_width))
        .height(Length::Fill)
        .class(cosmic::style::Container::Card)
        .into()
    }

    /// Builds the widget and returns it as an Element.
    pub fn build(mut self) -> Element<'a, Message> {
        let content = self
            .content
            .take()
            .unwrap_or_else(|| {
                widget::container(widget::text::body(""))
                    .width(Length::Fill)
                    .height(Length::Fill)
                    .into()
            });

        let bar = match self.state.load_state() {
            LoadState::Loading => self.render_loading(),
            LoadState::Failed(error) => self.render_failed(error),
            LoadState::Ready => self.render_bar(),
        };

        let body: Element<'a, Message> = if self.state.is_drawer_open() {
            let backdrop = widget::mouse_area(
                widget::container(content)
                    .width(Length::Fill)
                    .height(Length::Fill),
            )
            .on_press(self.msg(NavMessage::CloseDrawer));

            widget::row::with_capacity(2)
                .push(self.render_drawer())
                .push(backdrop)
                .spacing(self.spacing)
                .height(Length::Fill)
                .into()
        } else {
            content
        };

        widget::column::with_capacity(2)
            .push(bar)
            .push(body)
            .spacing(self.spacing * 2)
            .width(Length::Fill)
            .height(Length::Fill)
            .into()
    }
}

impl<'a, Message> From<CategoryNavigator<'a, Message>> for Element<'a, Message>
where
    Message: Clone + 'static,
{
    fn from(navigator: CategoryNavigator<'a, Message>) -> Self {
        navigator.build()
    }
}
