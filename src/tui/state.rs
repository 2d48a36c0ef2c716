use std::cell::Cell;
use std::rc::Rc;

use crate::{
    Location, LocationCatalog, Product, ProductListState, ProductLoader, ProductPhase, SearchFilter,
    Subscription,
};

/// Products per grid row.
pub(crate) const GRID_COLUMNS: usize = 2;

/// Bottom navigation destinations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Tab {
    Home,
    NearbyShops,
    QrCode,
    Community,
    Profile,
}

impl Tab {
    pub(crate) const ALL: [Tab; 5] = [
        Tab::Home,
        Tab::NearbyShops,
        Tab::QrCode,
        Tab::Community,
        Tab::Profile,
    ];

    pub(crate) fn label(self) -> &'static str {
        match self {
            Tab::Home => "Home",
            Tab::NearbyShops => "Nearby Shops",
            Tab::QrCode => "code QR",
            Tab::Community => "community",
            Tab::Profile => "Profile",
        }
    }

    pub(crate) fn index(self) -> usize {
        Tab::ALL.iter().position(|t| *t == self).unwrap_or(0)
    }
}

/// Review categories on the home screen. Selection is cosmetic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Category {
    Shop,
    Product,
    Service,
}

impl Category {
    pub(crate) const ALL: [Category; 3] = [Category::Shop, Category::Product, Category::Service];

    pub(crate) fn label(self) -> &'static str {
        match self {
            Category::Shop => "Shop",
            Category::Product => "Product",
            Category::Service => "Service",
        }
    }

    fn next(self) -> Self {
        match self {
            Category::Shop => Category::Product,
            Category::Product => Category::Service,
            Category::Service => Category::Shop,
        }
    }
}

/// Whether keystrokes edit the search query or navigate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum InputMode {
    Browse,
    Search,
}

/// Main application state.
pub struct AppState {
    /// Current bottom navigation tab.
    pub(crate) tab: Tab,
    /// Current input mode.
    pub(crate) mode: InputMode,
    /// Highlighted review category.
    pub(crate) category: Category,
    /// Live search query.
    pub(crate) search_query: String,
    /// Cursor position in the search query, as a byte offset on a char boundary.
    pub(crate) search_cursor_position: usize,
    /// Selected card among the visible products.
    pub(crate) selected_product: usize,
    /// Selected row in the nearby shops table.
    pub(crate) selected_location: usize,
    /// Store locations shown on the nearby shops tab.
    pub(crate) locations: Vec<Location>,
    /// Product fetch status; written by the loader, read by the renderer.
    pub(crate) products: ProductListState,
    /// Fetch collaborator.
    pub(crate) loader: ProductLoader,
    /// A fetch should run before the next input poll.
    pub(crate) fetch_pending: bool,
    /// Set by the product state subscription and by input handling.
    dirty: Rc<Cell<bool>>,
    _subscription: Subscription,
    /// Should the application quit?
    pub should_quit: bool,
}

impl AppState {
    /// Start on the home tab in the `Loading` phase with a fetch pending.
    pub fn new(loader: ProductLoader) -> Self {
        let products = ProductListState::new();
        let dirty = Rc::new(Cell::new(true));
        let flag = Rc::clone(&dirty);
        let subscription = products.subscribe(move |_| flag.set(true));

        Self {
            tab: Tab::Home,
            mode: InputMode::Browse,
            category: Category::Shop,
            search_query: String::new(),
            search_cursor_position: 0,
            selected_product: 0,
            selected_location: 0,
            locations: LocationCatalog.list(),
            products,
            loader,
            fetch_pending: true,
            dirty,
            _subscription: subscription,
            should_quit: false,
        }
    }

    /// Return whether a redraw is needed and clear the flag.
    pub fn take_redraw(&self) -> bool {
        self.dirty.replace(false)
    }

    pub(crate) fn mark_dirty(&self) {
        self.dirty.set(true);
    }

    /// Products that pass the current query; empty unless the list is ready.
    pub(crate) fn visible_products(&self) -> Vec<Product> {
        let snapshot = self.products.current();
        match snapshot.phase() {
            ProductPhase::Ready(products) => SearchFilter::new(&self.search_query).apply(products),
            ProductPhase::Loading | ProductPhase::Failed(_) => Vec::new(),
        }
    }

    /// Show `Loading` now and fetch on the next tick.
    pub(crate) fn request_reload(&mut self) {
        self.products.set_loading();
        self.fetch_pending = true;
        self.selected_product = 0;
    }

    /// Keep the product selection inside the visible set.
    pub(crate) fn clamp_selection(&mut self) {
        let count = self.visible_products().len();
        self.selected_product = self.selected_product.min(count.saturating_sub(1));
    }

    /// Move the grid selection by `delta` cards.
    pub(crate) fn move_product_selection(&mut self, delta: isize) {
        let count = self.visible_products().len();
        if count == 0 {
            self.selected_product = 0;
            return;
        }
        let target = self.selected_product as isize + delta;
        if (0..count as isize).contains(&target) {
            self.selected_product = target as usize;
        }
    }

    pub(crate) fn move_location_selection(&mut self, delta: isize) {
        let target = self.selected_location as isize + delta;
        if (0..self.locations.len() as isize).contains(&target) {
            self.selected_location = target as usize;
        }
    }

    pub(crate) fn select_tab(&mut self, tab: Tab) {
        self.tab = tab;
        self.mode = InputMode::Browse;
    }

    pub(crate) fn next_tab(&mut self) {
        let next = (self.tab.index() + 1) % Tab::ALL.len();
        self.select_tab(Tab::ALL[next]);
    }

    pub(crate) fn previous_tab(&mut self) {
        let prev = (self.tab.index() + Tab::ALL.len() - 1) % Tab::ALL.len();
        self.select_tab(Tab::ALL[prev]);
    }

    pub(crate) fn next_category(&mut self) {
        self.category = self.category.next();
    }

    // Search editing

    pub(crate) fn insert_search_char(&mut self, c: char) {
        self.search_query.insert(self.search_cursor_position, c);
        self.search_cursor_position += c.len_utf8();
        self.clamp_selection();
    }

    pub(crate) fn delete_search_char_before_cursor(&mut self) {
        if let Some(c) = self.search_query[..self.search_cursor_position].chars().next_back() {
            self.search_cursor_position -= c.len_utf8();
            self.search_query.remove(self.search_cursor_position);
            self.clamp_selection();
        }
    }

    pub(crate) fn delete_search_char_at_cursor(&mut self) {
        if self.search_cursor_position < self.search_query.len() {
            self.search_query.remove(self.search_cursor_position);
            self.clamp_selection();
        }
    }

    pub(crate) fn move_search_cursor_left(&mut self) {
        if let Some(c) = self.search_query[..self.search_cursor_position].chars().next_back() {
            self.search_cursor_position -= c.len_utf8();
        }
    }

    pub(crate) fn move_search_cursor_right(&mut self) {
        if let Some(c) = self.search_query[self.search_cursor_position..].chars().next() {
            self.search_cursor_position += c.len_utf8();
        }
    }

    pub(crate) fn move_search_cursor_home(&mut self) {
        self.search_cursor_position = 0;
    }

    pub(crate) fn move_search_cursor_end(&mut self) {
        self.search_cursor_position = self.search_query.len();
    }

    pub(crate) fn clear_search(&mut self) {
        self.search_query.clear();
        self.search_cursor_position = 0;
        self.clamp_selection();
    }

    /// Cursor column within the search box, in characters.
    pub(crate) fn search_cursor_column(&self) -> usize {
        self.search_query[..self.search_cursor_position].chars().count()
    }
}
