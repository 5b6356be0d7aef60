// SPDX-License-Identifier: MPL-2.0

use crate::config::Config;
use crate::fl;
use crate::helpers;
use crate::pages;
use crate::widgets::category_nav::{
    CategoryNavigator, CategoryView, LoadState, MountToken, NavMessage, NavigatorState,
};
use cosmic::app::context_drawer;
use cosmic::cosmic_config::{self, CosmicConfigEntry};
use cosmic::iced::{Length, Subscription};
use cosmic::prelude::*;
use cosmic::widget::{self, about::About, icon, menu, nav_bar};
use std::collections::HashMap;

const REPOSITORY: &str = env!("CARGO_PKG_REPOSITORY");
const DRAWER_WIDTH: f32 = 400.0;
const APP_ICON: &[u8] = include_bytes!("../resources/icons/hicolor/scalable/apps/icon.svg");

/// The application model stores app-specific state used to describe its interface and
/// drive its logic.
pub struct AppModel {
    /// Application state which is managed by the COSMIC runtime.
    core: cosmic::Core,
    /// Display a context drawer with the designated page if defined.
    context_page: ContextPage,
    /// The about page for this app.
    about: About,
    /// Contains items assigned to the nav bar panel.
    nav: nav_bar::Model,
    /// Key bindings for the application's menu bar.
    key_binds: HashMap<menu::KeyBind, MenuAction>,
    /// Configuration data that persists between application runs.
    pub config: Config,
    /// Cosmic config context for saving
    config_context: Option<cosmic_config::Config>,

    // === App-specific state ===
    /// The mounted category navigator
    pub navigator: NavigatorState,
    /// Temporary endpoint input (before saving)
    pub tree_url_input: String,
    /// Temporary layout choice (before saving)
    pub category_view_input: CategoryView,
    /// Settings save status
    pub settings_status: SettingsStatus,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SettingsStatus {
    #[default]
    Idle,
    Saved,
    Error(String),
}

/// Messages emitted by the application and its widgets.
#[derive(Debug, Clone)]
pub enum Message {
    // Navigation & UI
    LaunchUrl(String),
    ToggleContextPage(ContextPage),
    UpdateConfig(Config),

    // Category navigator
    Nav(NavMessage),
    /// Remount the navigator and fetch the tree again
    ReloadCategories,

    // Settings inputs
    TreeUrlChanged(String),
    CategoryViewChanged(CategoryView),
    SaveSettings,
}

/// Create a COSMIC application from the app model
impl cosmic::Application for AppModel {
    /// The async executor that will be used to run your application's commands.
    type Executor = cosmic::executor::Default;

    /// Data that your application receives to its init method.
    type Flags = ();

    /// Messages which the application and its widgets will emit.
    type Message = Message;

    /// Unique identifier in RDNN (reverse domain name notation) format.
    const APP_ID: &'static str = "io.github.shopnav.ShopNav";

    fn core(&self) -> &cosmic::Core {
        &self.core
    }

    fn core_mut(&mut self) -> &mut cosmic::Core {
        &mut self.core
    }

    /// Initializes the application with any given flags and startup commands.
    fn init(
        core: cosmic::Core,
        _flags: Self::Flags,
    ) -> (Self, Task<cosmic::Action<Self::Message>>) {
        let mut nav = nav_bar::Model::default();

        nav.insert()
            .text(fl!("storefront"))
            .data::<Page>(Page::Storefront)
            .icon(icon::from_name("view-list-symbolic"))
            .activate();

        nav.insert()
            .text(fl!("settings"))
            .data::<Page>(Page::Settings)
            .icon(icon::from_name("preferences-system-symbolic"));

        // Create the about widget
        let about = About::default()
            .name(fl!("app-title"))
            .icon(widget::icon::from_svg_bytes(APP_ICON))
            .version(env!("CARGO_PKG_VERSION"))
            .links([(fl!("repository"), REPOSITORY)])
            .license(env!("CARGO_PKG_LICENSE"));

        // Load configuration
        let config_context = cosmic_config::Config::new(Self::APP_ID, Config::VERSION).ok();
        let config = config_context
            .as_ref()
            .map(|context| match Config::get_entry(context) {
                Ok(config) => config,
                Err((errors, config)) => {
                    tracing::warn!(?errors, "falling back to default config entries");
                    config
                }
            })
            .unwrap_or_default();

        let navigator = NavigatorState::new(config.layout());

        let mut app = AppModel {
            core,
            context_page: ContextPage::default(),
            about,
            nav,
            key_binds: HashMap::new(),
            tree_url_input: config.tree_url.clone(),
            category_view_input: config.layout(),
            config,
            config_context,
            navigator,
            settings_status: SettingsStatus::Idle,
        };

        let token = app.navigator.begin_fetch();
        let fetch = app.spawn_fetch(token);
        let title = app.update_title();

        (app, cosmic::task::batch(vec![title, fetch]))
    }

    /// Elements to pack at the start of the header bar.
    fn header_start(&self) -> Vec<Element<'_, Self::Message>> {
        let menu_bar = menu::bar(vec![menu::Tree::with_children(
            menu::root(fl!("view")).apply(Element::from),
            menu::items(
                &self.key_binds,
                vec![menu::Item::Button(fl!("about"), None, MenuAction::About)],
            ),
        )]);

        vec![menu_bar.into()]
    }

    /// Enables the COSMIC application to create a nav bar with this model.
    fn nav_model(&self) -> Option<&nav_bar::Model> {
        Some(&self.nav)
    }

    /// Display a context drawer if the context page is requested.
    fn context_drawer(&self) -> Option<context_drawer::ContextDrawer<'_, Self::Message>> {
        if !self.core.window.show_context {
            return None;
        }

        Some(match self.context_page {
            ContextPage::About => context_drawer::about(
                &self.about,
                |url| Message::LaunchUrl(url.to_string()),
                Message::ToggleContextPage(ContextPage::About),
            ),
        })
    }

    /// Describes the interface based on the current state of the application model.
    fn view(&self) -> Element<'_, Self::Message> {
        let space_s = cosmic::theme::spacing().space_s;
        let space_m = cosmic::theme::spacing().space_m;

        let page_content: Element<_> =
            match self.nav.active_data::<Page>().unwrap_or(&Page::Storefront) {
                Page::Storefront => CategoryNavigator::new(&self.navigator, Message::Nav)
                    .content(pages::storefront::view(self, space_s, space_m))
                    .drawer_width(DRAWER_WIDTH)
                    .spacing(space_s)
                    .into(),
                Page::Settings => pages::settings::view(self, space_s, space_m),
            };

        widget::container(page_content)
            .width(Length::Fill)
            .height(Length::Fill)
            .padding(space_m)
            .into()
    }

    /// Register subscriptions for this application.
    fn subscription(&self) -> Subscription<Self::Message> {
        // Watch for application configuration changes.
        self.core()
            .watch_config::<Config>(Self::APP_ID)
            .map(|update| Message::UpdateConfig(update.config))
    }

    /// Handles messages emitted by the application and its widgets.
    fn update(&mut self, message: Self::Message) -> Task<cosmic::Action<Self::Message>> {
        match message {
            Message::ToggleContextPage(context_page) => {
                if self.context_page == context_page {
                    self.core.window.show_context = !self.core.window.show_context;
                } else {
                    self.context_page = context_page;
                    self.core.window.show_context = true;
                }
            }

            Message::UpdateConfig(config) => {
                if config != self.config {
                    self.config = config;
                    self.tree_url_input = self.config.tree_url.clone();
                    self.category_view_input = self.config.layout();
                    return self.remount_navigator();
                }
            }

            Message::LaunchUrl(url) => match open::that_detached(&url) {
                Ok(()) => {}
                Err(err) => {
                    tracing::warn!("failed to open {url:?}: {err}");
                }
            },

            Message::Nav(nav_msg) => return self.update_navigator(nav_msg),

            Message::ReloadCategories => return self.remount_navigator(),

            // Settings inputs
            Message::TreeUrlChanged(url) => {
                self.tree_url_input = url;
                self.settings_status = SettingsStatus::Idle;
            }

            Message::CategoryViewChanged(layout) => {
                self.category_view_input = layout;
                self.settings_status = SettingsStatus::Idle;
            }

            Message::SaveSettings => {
                let next = self
                    .config
                    .with_settings(&self.tree_url_input, self.category_view_input);
                let context = self.config_context.as_ref();

                let saved = self.config.replace_if_written(next, |config| match context {
                    Some(context) => config.write_entry(context),
                    None => Ok(()),
                });

                if let Err(e) = saved {
                    tracing::warn!("failed to save config: {e}");
                    self.settings_status = SettingsStatus::Error(e.to_string());
                    return Task::none();
                }

                self.settings_status = SettingsStatus::Saved;
                return self.remount_navigator();
            }
        }

        Task::none()
    }

    /// Called when a nav item is selected.
    fn on_nav_select(&mut self, id: nav_bar::Id) -> Task<cosmic::Action<Self::Message>> {
        self.nav.activate(id);
        self.navigator.close_drawer();
        self.update_title()
    }
}

impl AppModel {
    /// Updates the header and window titles.
    pub fn update_title(&mut self) -> Task<cosmic::Action<Message>> {
        let mut window_title = fl!("app-title");

        if let Some(page) = self.nav.text(self.nav.active()) {
            window_title.push_str(" - ");
            window_title.push_str(page);
        }

        if let Some(id) = self.core.main_window_id() {
            self.set_window_title(window_title, id)
        } else {
            Task::none()
        }
    }

    /// Replaces the navigator with a fresh mount using the current config.
    fn remount_navigator(&mut self) -> Task<cosmic::Action<Message>> {
        self.navigator.unmount();
        self.navigator = NavigatorState::new(self.config.layout());
        tracing::info!(
            layout = self.navigator.layout().as_str(),
            url = %self.config.tree_url,
            "mounting category navigator"
        );
        let token = self.navigator.begin_fetch();
        self.spawn_fetch(token)
    }

    /// Runs the tree fetch for the given mount in the background.
    fn spawn_fetch(&self, token: MountToken) -> Task<cosmic::Action<Message>> {
        let url = self.config.tree_url.clone();

        cosmic::task::future(async move {
            let result = helpers::fetch_category_tree(&url).await;
            cosmic::Action::App(Message::Nav(NavMessage::TreeLoaded { token, result }))
        })
    }

    fn update_navigator(&mut self, message: NavMessage) -> Task<cosmic::Action<Message>> {
        match message {
            NavMessage::TreeLoaded { token, result } => {
                if self.navigator.finish_fetch(token, result) {
                    if let LoadState::Failed(error) = self.navigator.load_state() {
                        tracing::warn!(%error, "category navigator failed to load");
                    }
                }
            }

            NavMessage::ToggleDrawer => {
                self.navigator.toggle_drawer();
                tracing::debug!(open = self.navigator.is_drawer_open(), "category drawer toggled");
            }

            NavMessage::CloseDrawer => self.navigator.close_drawer(),

            NavMessage::ShowThirdLevel { parent, category } => {
                if !self.navigator.show_third_level(parent, category) {
                    tracing::debug!(parent, category, "category has no children to show");
                }
            }

            NavMessage::BackToMain => self.navigator.back_to_main(),

            NavMessage::Hover(category) => self.navigator.set_hovered(category),

            NavMessage::Open(url) => {
                self.navigator.close_drawer();
                self.navigator.set_hovered(None);
                if !url.is_empty() {
                    return self.update(Message::LaunchUrl(url));
                }
            }

            NavMessage::Retry => {
                if let Some(token) = self.navigator.retry() {
                    return self.spawn_fetch(token);
                }
            }
        }

        Task::none()
    }
}

/// The page to display in the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Page {
    #[default]
    Storefront,
    Settings,
}

/// The context page to display in the context drawer.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub enum ContextPage {
    #[default]
    About,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum MenuAction {
    About,
}

impl menu::action::MenuAction for MenuAction {
    type Message = Message;

    fn message(&self) -> Self::Message {
        match self {
            MenuAction::About => Message::ToggleContextPage(ContextPage::About),
        }
    }
}
