/// One mapping from a page to the frame that holds it.
///
/// The page number is not stored: entries are dense and positional, so a
/// page's entry lives at index `page_number` in the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageTableEntry {
    frame_number: usize,
}

impl PageTableEntry {
    #[inline]
    pub fn frame_number(&self) -> usize {
        self.frame_number
    }
}

/// Per-process page table: a dense, ordered page -> frame mapping.
///
/// Built once during allocation by appending one entry per page in
/// ascending page order, and torn down only as a whole when the owning
/// process is removed. No entry is ever updated or deleted individually.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageTable {
    entries: Vec<PageTableEntry>,
}

impl PageTable {
    pub fn new() -> Self {
        PageTable {
            entries: Vec::new(),
        }
    }

    /// Append the mapping for the next sequential page.
    ///
    /// The first call maps page 0, the second page 1, and so on.
    pub fn add_entry(&mut self, frame_number: usize) {
        self.entries.push(PageTableEntry { frame_number });
    }

    /// Frame holding `page_number`, or `None` if the page is out of range.
    #[inline]
    pub fn lookup(&self, page_number: usize) -> Option<usize> {
        self.entries.get(page_number).map(|e| e.frame_number)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Mapped frames in page order.
    pub fn frames(&self) -> impl Iterator<Item = usize> + '_ {
        self.entries.iter().map(|e| e.frame_number)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_table() {
        let table = PageTable::new();
        assert_eq!(table.len(), 0);
        assert!(table.is_empty());
        assert_eq!(table.lookup(0), None);
    }

    #[test]
    fn test_entries_are_positional() {
        let mut table = PageTable::new();
        table.add_entry(7);
        table.add_entry(2);
        table.add_entry(5);

        // Page numbers come from insertion order, not from the frames.
        assert_eq!(table.lookup(0), Some(7));
        assert_eq!(table.lookup(1), Some(2));
        assert_eq!(table.lookup(2), Some(5));
        assert_eq!(table.len(), 3);
    }

    #[test]
    fn test_lookup_out_of_range() {
        let mut table = PageTable::new();
        table.add_entry(0);

        assert_eq!(table.lookup(1), None);
        assert_eq!(table.lookup(usize::MAX), None);
    }

    #[test]
    fn test_frames_iterates_in_page_order() {
        let mut table = PageTable::new();
        table.add_entry(4);
        table.add_entry(5);

        let frames: Vec<usize> = table.frames().collect();
        assert_eq!(frames, vec![4, 5]);
    }
}
