/// Trait for navigable list views with selection
pub trait Selectable {
    /// Returns the number of items in the list
    fn len(&self) -> usize;

    /// Returns the currently selected index
    fn selected(&self) -> usize;

    /// Sets the selected index directly
    fn set_selected(&mut self, index: usize);

    /// Move selection up with wraparound
    fn move_up(&mut self) {
        let len = self.len();
        if len == 0 {
            self.set_selected(0);
            return;
        }
        let selected = self.selected();
        self.set_selected(if selected == 0 { len - 1 } else { selected - 1 });
    }

    /// Move selection down with wraparound
    fn move_down(&mut self) {
        let len = self.len();
        if len == 0 {
            self.set_selected(0);
            return;
        }
        let selected = self.selected();
        self.set_selected(if selected + 1 >= len { 0 } else { selected + 1 });
    }
}
