// SPDX-License-Identifier: MPL-2.0

//! Category navigator for a storefront header.
//!
//! The navigator shows a product-category tree in one of two layouts. The
//! inline layout lists every first-level category in a bar and opens a
//! dropdown with the deeper levels on hover. The sidebar layout shows only
//! the first few categories in the bar and puts the full tree in a drawer,
//! where second-level categories can be drilled into to list their children.
//!
//! # Example
//!
//! ```ignore
//! use crate::widgets::category_nav::{CategoryNavigator, CategoryView, NavMessage, NavigatorState};
//!
//! // In your app state
//! struct AppModel {
//!     navigator: NavigatorState,
//! }
//!
//! // In your message enum
//! enum Message {
//!     Nav(NavMessage),
//! }
//!
//! // In your view function
//! fn view(&self) -> Element<'_, Message> {
//!     CategoryNavigator::new(&self.navigator, Message::Nav)
//!         .content(page)
//!         .into()
//! }
//!
//! // In your update function
//! fn update(&mut self, message: Message) -> Task<Message> {
//!     match message {
//!         Message::Nav(nav_msg) => match nav_msg {
//!             NavMessage::TreeLoaded { token, result } => {
//!                 self.navigator.finish_fetch(token, result);
//!             }
//!             NavMessage::ToggleDrawer => self.navigator.toggle_drawer(),
//!             NavMessage::ShowThirdLevel { parent, category } => {
//!                 self.navigator.show_third_level(parent, category);
//!             }
//!             _ => {}
//!         }
//!     }
//!     Task::none()
//! }
//! ```

mod message;
mod state;
mod widget;

pub use message::NavMessage;
pub use state::{CategoryView, LoadState, MountToken, NavigatorState};
pub use widget::CategoryNavigator;
