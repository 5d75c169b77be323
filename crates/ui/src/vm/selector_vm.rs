/// One entry of a keyboard-navigable single-select list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SelectorItem {
    pub id: String,
    pub label: String,
    pub description: String,
}

impl SelectorItem {
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        label: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            description: description.into(),
        }
    }
}

/// Input the selector reacts to, independent of the UI toolkit's key type.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SelectorKey {
    Up,
    Down,
    Commit,
    Cancel,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HighlightMove {
    Up,
    Down,
}

/// Open/highlight/selection state of a selector.
///
/// Highlight movement is bounded at both ends and never wraps.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SelectorVm {
    items: Vec<SelectorItem>,
    selected: Option<usize>,
    highlighted: usize,
    open: bool,
}

impl SelectorVm {
    #[must_use]
    pub fn new(items: Vec<SelectorItem>, selected_id: Option<&str>) -> Self {
        let selected = selected_id.and_then(|id| items.iter().position(|item| item.id == id));
        Self {
            items,
            selected,
            highlighted: selected.unwrap_or(0),
            open: false,
        }
    }

    #[must_use]
    pub fn items(&self) -> &[SelectorItem] {
        &self.items
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.open
    }

    #[must_use]
    pub fn highlighted(&self) -> usize {
        self.highlighted
    }

    #[must_use]
    pub fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    #[must_use]
    pub fn selected_item(&self) -> Option<&SelectorItem> {
        self.selected.and_then(|index| self.items.get(index))
    }

    #[must_use]
    pub fn selected_id(&self) -> Option<&str> {
        self.selected_item().map(|item| item.id.as_str())
    }

    pub fn toggle(&mut self) {
        if self.open {
            self.cancel();
        } else {
            self.open();
        }
    }

    pub fn open(&mut self) {
        if self.items.is_empty() {
            return;
        }
        self.open = true;
        self.highlighted = self.selected.unwrap_or(0);
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    pub fn move_highlight(&mut self, direction: HighlightMove) {
        match direction {
            HighlightMove::Up => self.highlighted = self.highlighted.saturating_sub(1),
            HighlightMove::Down => {
                if self.highlighted + 1 < self.items.len() {
                    self.highlighted += 1;
                }
            }
        }
    }

    /// Highlight `index` (pointer hover). Out of range indices are ignored.
    pub fn highlight(&mut self, index: usize) {
        if index < self.items.len() {
            self.highlighted = index;
        }
    }

    /// Select the highlighted item and close. Returns its id.
    pub fn commit(&mut self) -> Option<String> {
        let item = self.items.get(self.highlighted)?;
        let id = item.id.clone();
        self.selected = Some(self.highlighted);
        self.open = false;
        Some(id)
    }

    /// Select the item at `index` (pointer click) and close.
    pub fn commit_index(&mut self, index: usize) -> Option<String> {
        if index >= self.items.len() {
            return None;
        }
        self.highlighted = index;
        self.commit()
    }

    /// Close without changing the selection.
    pub fn cancel(&mut self) {
        self.open = false;
        self.highlighted = self.selected.unwrap_or(0);
    }

    /// Apply a key. Returns the committed id, if the key committed a selection.
    pub fn handle_key(&mut self, key: SelectorKey) -> Option<String> {
        if !self.open {
            if matches!(key, SelectorKey::Up | SelectorKey::Down | SelectorKey::Commit) {
                self.open();
            }
            return None;
        }
        match key {
            SelectorKey::Up => {
                self.move_highlight(HighlightMove::Up);
                None
            }
            SelectorKey::Down => {
                self.move_highlight(HighlightMove::Down);
                None
            }
            SelectorKey::Commit => self.commit(),
            SelectorKey::Cancel => {
                self.cancel();
                None
            }
        }
    }
}
