// SPDX-License-Identifier: MPL-2.0

//! State management for the category navigator.

use crate::api::{CategoryId, CategoryNode, FetchError};
use std::sync::atomic::{AtomicU64, Ordering};

/// Number of first-level categories shown directly in the sidebar top bar.
pub const TOP_BAR_LIMIT: usize = 4;

static NEXT_MOUNT_TOKEN: AtomicU64 = AtomicU64::new(1);

/// Identifies one fetch issued by one mounted navigator.
///
/// Tokens are unique across the process, so a response that outlives the
/// navigator that requested it can never match a newer one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MountToken(u64);

impl MountToken {
    fn next() -> Self {
        Self(NEXT_MOUNT_TOKEN.fetch_add(1, Ordering::Relaxed))
    }
}

/// How categories are laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CategoryView {
    /// Hover mega-menu with every first-level category inline.
    #[default]
    Inline,
    /// Short top bar plus an off-canvas drawer.
    Sidebar,
}

impl CategoryView {
    /// Interprets the configured layout flag. Only `"sidebar"` selects the drawer.
    pub fn from_flag(flag: &str) -> Self {
        if flag == "sidebar" {
            CategoryView::Sidebar
        } else {
            CategoryView::Inline
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CategoryView::Inline => "default",
            CategoryView::Sidebar => "sidebar",
        }
    }
}

/// Progress of the one tree fetch of a mount.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum LoadState {
    #[default]
    Loading,
    Ready,
    Failed(String),
}

/// Which depth of the tree the drawer displays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewLevel {
    #[default]
    Main,
    Third,
}

/// Index path of the second-level category whose children the drawer shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThirdLevelFocus {
    pub parent: usize,
    pub second: usize,
}

/// Groups children into consecutive pairs for side-by-side columns.
///
/// The last group holds a single node when the count is odd.
pub fn pair_category_children(children: &[CategoryNode]) -> Vec<&[CategoryNode]> {
    children.chunks(2).collect()
}

/// State for one mounted navigator.
///
/// This state is owned by the parent component and passed to the widget.
#[derive(Debug, Clone)]
pub struct NavigatorState {
    layout: CategoryView,
    load: LoadState,
    categories: Vec<CategoryNode>,
    drawer_open: bool,
    view_level: ViewLevel,
    focus: Option<ThirdLevelFocus>,
    hovered: Option<CategoryId>,
    token: MountToken,
    mounted: bool,
}

impl NavigatorState {
    /// Mounts a navigator with a fixed layout. The state starts in `Loading`.
    pub fn new(layout: CategoryView) -> Self {
        Self {
            layout,
            load: LoadState::Loading,
            categories: Vec::new(),
            drawer_open: false,
            view_level: ViewLevel::Main,
            focus: None,
            hovered: None,
            token: MountToken::next(),
            mounted: true,
        }
    }

    pub fn layout(&self) -> CategoryView {
        self.layout
    }

    pub fn load_state(&self) -> &LoadState {
        &self.load
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.load, LoadState::Loading)
    }

    pub fn is_ready(&self) -> bool {
        matches!(self.load, LoadState::Ready)
    }

    pub fn categories(&self) -> &[CategoryNode] {
        &self.categories
    }

    pub fn is_drawer_open(&self) -> bool {
        self.drawer_open
    }

    pub fn view_level(&self) -> ViewLevel {
        self.view_level
    }

    /// Starts the fetch for this mount and returns the token to tag it with.
    pub fn begin_fetch(&mut self) -> MountToken {
        self.load = LoadState::Loading;
        self.token
    }

    /// Applies a fetch result. Returns false when the result was dropped
    /// because it belongs to another fetch or the navigator is unmounted.
    pub fn finish_fetch(
        &mut self,
        token: MountToken,
        result: Result<Vec<CategoryNode>, FetchError>,
    ) -> bool {
        if !self.mounted || token != self.token || !self.is_loading() {
            tracing::debug!(?token, current = ?self.token, "dropping stale category tree");
            return false;
        }

        match result {
            Ok(categories) => {
                self.categories = categories;
                self.load = LoadState::Ready;
            }
            Err(e) => {
                self.load = LoadState::Failed(e.to_string());
            }
        }
        true
    }

    /// Re-enters `Loading` with a fresh token after a failed fetch.
    pub fn retry(&mut self) -> Option<MountToken> {
        if !self.mounted || !matches!(self.load, LoadState::Failed(_)) {
            return None;
        }
        self.token = MountToken::next();
        Some(self.begin_fetch())
    }

    /// Marks the navigator as gone; late results become no-ops.
    pub fn unmount(&mut self) {
        self.mounted = false;
        self.drawer_open = false;
        self.hovered = None;
    }

    fn drawer_enabled(&self) -> bool {
        self.layout == CategoryView::Sidebar && self.is_ready()
    }

    /// Opens the drawer at the main level, or closes it if already open.
    pub fn toggle_drawer(&mut self) {
        if !self.drawer_enabled() {
            return;
        }
        self.drawer_open = !self.drawer_open;
        if self.drawer_open {
            self.view_level = ViewLevel::Main;
            self.hovered = None;
        }
    }

    /// Closes the drawer, keeping the view level as it was.
    pub fn close_drawer(&mut self) {
        self.drawer_open = false;
    }

    /// Drills into a second-level category. Only nodes with children move
    /// the drawer to the third level; returns whether the level changed.
    pub fn show_third_level(&mut self, parent: CategoryId, category: CategoryId) -> bool {
        if !self.drawer_enabled() || !self.drawer_open {
            return false;
        }

        let Some(parent_index) = self.categories.iter().position(|c| c.id == parent) else {
            return false;
        };
        let Some(second_index) = self.categories[parent_index]
            .children
            .iter()
            .position(|c| c.id == category)
        else {
            return false;
        };

        if !self.categories[parent_index].children[second_index].has_children() {
            return false;
        }

        self.focus = Some(ThirdLevelFocus {
            parent: parent_index,
            second: second_index,
        });
        self.view_level = ViewLevel::Third;
        true
    }

    /// Returns from the third level to the main list.
    pub fn back_to_main(&mut self) {
        self.view_level = ViewLevel::Main;
    }

    /// Opens or clears the hover dropdown of a first-level category.
    pub fn set_hovered(&mut self, category: Option<CategoryId>) {
        self.hovered = category.filter(|id| {
            self.categories
                .iter()
                .any(|c| c.id == *id && c.has_children())
        });
    }

    /// The category whose dropdown is open, if any.
    pub fn hovered_category(&self) -> Option<&CategoryNode> {
        let id = self.hovered?;
        self.categories.iter().find(|c| c.id == id)
    }

    /// The second-level category the drawer drilled into.
    pub fn current_second_level(&self) -> Option<&CategoryNode> {
        let focus = self.focus?;
        self.categories
            .get(focus.parent)
            .and_then(|parent| parent.children.get(focus.second))
    }

    /// The first-level parent of `current_second_level`.
    pub fn current_parent(&self) -> Option<&CategoryNode> {
        let focus = self.focus?;
        self.categories.get(focus.parent)
    }

    /// Children listed at the third level.
    pub fn third_level_items(&self) -> &[CategoryNode] {
        match self.view_level {
            ViewLevel::Third => self
                .current_second_level()
                .map(|c| c.children.as_slice())
                .unwrap_or_default(),
            ViewLevel::Main => &[],
        }
    }

    /// First-level categories shown directly in the sidebar top bar.
    pub fn top_bar_categories(&self) -> &[CategoryNode] {
        let end = self.categories.len().min(TOP_BAR_LIMIT);
        &self.categories[..end]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn electronics_tree() -> Vec<CategoryNode> {
        vec![CategoryNode::with_children(
            1,
            "Electronics",
            "/electronics",
            vec![
                CategoryNode::with_children(
                    2,
                    "Phones",
                    "/phones",
                    vec![
                        CategoryNode::leaf(3, "Android", "/android"),
                        CategoryNode::leaf(4, "iOS", "/ios"),
                    ],
                ),
                CategoryNode::leaf(5, "Cables", "/cables"),
            ],
        )]
    }

    fn ready_state(layout: CategoryView, tree: Vec<CategoryNode>) -> NavigatorState {
        let mut state = NavigatorState::new(layout);
        let token = state.begin_fetch();
        assert!(state.finish_fetch(token, Ok(tree)));
        state
    }

    fn flat_tree(n: u64) -> Vec<CategoryNode> {
        (0..n)
            .map(|i| CategoryNode::leaf(i, format!("Category {i}"), format!("/c/{i}")))
            .collect()
    }

    #[test]
    fn test_new_state() {
        let state = NavigatorState::new(CategoryView::Sidebar);

        assert!(state.is_loading());
        assert!(state.categories().is_empty());
        assert!(!state.is_drawer_open());
        assert_eq!(state.view_level(), ViewLevel::Main);
        assert!(state.current_second_level().is_none());
        assert!(state.current_parent().is_none());
    }

    #[test]
    fn test_layout_flag() {
        assert_eq!(CategoryView::from_flag("sidebar"), CategoryView::Sidebar);
        assert_eq!(CategoryView::from_flag("default"), CategoryView::Inline);
        assert_eq!(CategoryView::from_flag("Sidebar"), CategoryView::Inline);
        assert_eq!(CategoryView::from_flag(""), CategoryView::Inline);
    }

    #[rstest]
    #[case(0)]
    #[case(1)]
    #[case(2)]
    #[case(5)]
    #[case(6)]
    fn test_pairs_flatten_to_children(#[case] n: u64) {
        let children = flat_tree(n);
        let pairs = pair_category_children(&children);

        assert!(pairs.iter().all(|pair| !pair.is_empty() && pair.len() <= 2));
        let flattened: Vec<CategoryNode> = pairs.concat();
        assert_eq!(flattened, children);
        assert_eq!(pairs.len() as u64, n.div_ceil(2));
    }

    #[test]
    fn test_trailing_pair_has_one_node() {
        let children = flat_tree(3);
        let pairs = pair_category_children(&children);

        assert_eq!(pairs.len(), 2);
        assert_eq!(pairs[0].iter().map(|c| c.id).collect::<Vec<_>>(), vec![0, 1]);
        assert_eq!(pairs[1].iter().map(|c| c.id).collect::<Vec<_>>(), vec![2]);
    }

    #[rstest]
    #[case(0, 0)]
    #[case(3, 3)]
    #[case(4, 4)]
    #[case(9, 4)]
    fn test_top_bar_shows_at_most_four(#[case] n: u64, #[case] expected: usize) {
        let state = ready_state(CategoryView::Sidebar, flat_tree(n));
        assert_eq!(state.top_bar_categories().len(), expected);
        assert_eq!(state.top_bar_categories(), &state.categories()[..expected]);
    }

    #[test]
    fn test_drill_down_scenario() {
        let mut state = ready_state(CategoryView::Sidebar, electronics_tree());

        state.toggle_drawer();
        assert!(state.is_drawer_open());

        assert!(state.show_third_level(1, 2));
        assert_eq!(state.view_level(), ViewLevel::Third);
        let ids: Vec<CategoryId> = state.third_level_items().iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![3, 4]);
        assert_eq!(state.current_second_level().map(|c| c.id), Some(2));
        assert_eq!(state.current_parent().map(|c| c.id), Some(1));

        state.back_to_main();
        assert_eq!(state.view_level(), ViewLevel::Main);
        assert!(state.third_level_items().is_empty());
    }

    #[test]
    fn test_show_third_level_ignores_leaf() {
        let mut state = ready_state(CategoryView::Sidebar, electronics_tree());
        state.toggle_drawer();

        assert!(!state.show_third_level(1, 5));
        assert_eq!(state.view_level(), ViewLevel::Main);
        assert!(state.current_second_level().is_none());
    }

    #[test]
    fn test_show_third_level_leaf_keeps_previous_focus() {
        let mut state = ready_state(CategoryView::Sidebar, electronics_tree());
        state.toggle_drawer();
        assert!(state.show_third_level(1, 2));

        assert!(!state.show_third_level(1, 5));
        assert_eq!(state.view_level(), ViewLevel::Third);
        assert_eq!(state.current_second_level().map(|c| c.id), Some(2));
    }

    #[test]
    fn test_show_third_level_unknown_ids() {
        let mut state = ready_state(CategoryView::Sidebar, electronics_tree());
        state.toggle_drawer();

        assert!(!state.show_third_level(42, 2));
        assert!(!state.show_third_level(1, 42));
        assert_eq!(state.view_level(), ViewLevel::Main);
    }

    #[test]
    fn test_open_resets_view_level() {
        let mut state = ready_state(CategoryView::Sidebar, electronics_tree());
        state.toggle_drawer();
        assert!(state.show_third_level(1, 2));

        // Closing keeps the level; reopening resets it.
        state.close_drawer();
        assert!(!state.is_drawer_open());
        assert_eq!(state.view_level(), ViewLevel::Third);

        state.toggle_drawer();
        assert!(state.is_drawer_open());
        assert_eq!(state.view_level(), ViewLevel::Main);
    }

    #[test]
    fn test_toggle_closes_open_drawer() {
        let mut state = ready_state(CategoryView::Sidebar, electronics_tree());
        state.toggle_drawer();
        state.toggle_drawer();
        assert!(!state.is_drawer_open());
    }

    #[test]
    fn test_back_from_any_path_returns_main() {
        let tree = vec![
            CategoryNode::with_children(
                1,
                "A",
                "/a",
                vec![CategoryNode::with_children(
                    10,
                    "A1",
                    "/a1",
                    vec![CategoryNode::leaf(100, "A1x", "/a1x")],
                )],
            ),
            CategoryNode::with_children(
                2,
                "B",
                "/b",
                vec![CategoryNode::with_children(
                    20,
                    "B1",
                    "/b1",
                    vec![CategoryNode::leaf(200, "B1x", "/b1x")],
                )],
            ),
        ];
        let mut state = ready_state(CategoryView::Sidebar, tree);
        state.toggle_drawer();

        assert!(state.show_third_level(1, 10));
        assert!(state.show_third_level(2, 20));
        state.back_to_main();
        assert_eq!(state.view_level(), ViewLevel::Main);
    }

    #[test]
    fn test_drawer_unused_in_inline_layout() {
        let mut state = ready_state(CategoryView::Inline, electronics_tree());

        state.toggle_drawer();
        assert!(!state.is_drawer_open());
        assert!(!state.show_third_level(1, 2));
        assert_eq!(state.view_level(), ViewLevel::Main);
    }

    #[test]
    fn test_drawer_disabled_while_loading() {
        let mut state = NavigatorState::new(CategoryView::Sidebar);
        state.toggle_drawer();
        assert!(!state.is_drawer_open());
    }

    #[test]
    fn test_stale_token_is_dropped() {
        let mut old = NavigatorState::new(CategoryView::Inline);
        let stale = old.begin_fetch();

        let mut state = NavigatorState::new(CategoryView::Inline);
        let current = state.begin_fetch();
        assert_ne!(stale, current);

        assert!(!state.finish_fetch(stale, Ok(electronics_tree())));
        assert!(state.is_loading());
        assert!(state.categories().is_empty());
    }

    #[test]
    fn test_result_after_unmount_is_dropped() {
        let mut state = NavigatorState::new(CategoryView::Sidebar);
        let token = state.begin_fetch();
        state.unmount();

        assert!(!state.finish_fetch(token, Ok(electronics_tree())));
        assert!(state.is_loading());
        assert!(state.categories().is_empty());
    }

    #[test]
    fn test_fetch_failure_and_retry() {
        let mut state = NavigatorState::new(CategoryView::Sidebar);
        let first = state.begin_fetch();

        assert!(state.finish_fetch(first, Err(FetchError::Status(502))));
        assert_eq!(
            state.load_state(),
            &LoadState::Failed("Server returned status: 502".to_string())
        );

        let second = state.retry().expect("retry from failed state");
        assert_ne!(first, second);
        assert!(state.is_loading());

        // The first fetch's token no longer applies.
        assert!(!state.finish_fetch(first, Ok(electronics_tree())));
        assert!(state.finish_fetch(second, Ok(electronics_tree())));
        assert!(state.is_ready());
    }

    #[test]
    fn test_retry_only_from_failed() {
        let mut state = NavigatorState::new(CategoryView::Inline);
        assert!(state.retry().is_none());

        let token = state.begin_fetch();
        state.finish_fetch(token, Ok(Vec::new()));
        assert!(state.retry().is_none());
    }

    #[test]
    fn test_second_result_is_ignored() {
        let mut state = NavigatorState::new(CategoryView::Inline);
        let token = state.begin_fetch();
        assert!(state.finish_fetch(token, Ok(electronics_tree())));
        assert!(!state.finish_fetch(token, Ok(Vec::new())));
        assert_eq!(state.categories().len(), 1);
    }

    #[test]
    fn test_empty_tree() {
        let mut state = ready_state(CategoryView::Sidebar, Vec::new());

        assert!(state.top_bar_categories().is_empty());
        state.toggle_drawer();
        assert!(state.is_drawer_open());
        assert!(!state.show_third_level(1, 2));
    }

    #[test]
    fn test_hover_only_for_groups() {
        let mut tree = electronics_tree();
        tree.push(CategoryNode::leaf(6, "Gift cards", "/gift-cards"));
        let mut state = ready_state(CategoryView::Inline, tree);

        state.set_hovered(Some(1));
        assert_eq!(state.hovered_category().map(|c| c.id), Some(1));

        state.set_hovered(Some(6));
        assert!(state.hovered_category().is_none());

        state.set_hovered(Some(1));
        state.set_hovered(None);
        assert!(state.hovered_category().is_none());
    }
}
