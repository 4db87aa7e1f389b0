use rand_chacha::ChaCha8Rng;
use rand_core::{RngCore, SeedableRng};

use crate::page_table::PageTable;

/// Caller-supplied process identifier. Uniqueness is enforced by the
/// `MemoryManager`, not by the process itself.
pub type ProcessId = u32;

/// Supplies the bytes a process's logical memory starts out with.
///
/// The content has no effect on correctness, only on what the simulator
/// displays and what `translate` reads back, so tests swap in a
/// deterministic source instead of random bytes.
pub trait ContentSource {
    fn fill(&mut self, buf: &mut [u8]);
}

/// Default content source: uniform random bytes.
pub struct RandomContent {
    rng: ChaCha8Rng,
}

impl RandomContent {
    pub fn new() -> Self {
        RandomContent {
            rng: ChaCha8Rng::from_os_rng(),
        }
    }

    /// Seeded variant for reproducible runs.
    pub fn with_seed(seed: u64) -> Self {
        RandomContent {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomContent {
    fn default() -> Self {
        Self::new()
    }
}

impl ContentSource for RandomContent {
    fn fill(&mut self, buf: &mut [u8]) {
        self.rng.fill_bytes(buf);
    }
}

/// One logical address space: a byte buffer of `size` bytes plus the
/// page table mapping its pages onto physical frames.
#[derive(Debug)]
pub struct Process {
    id: ProcessId,
    size: usize,
    frame_size: usize,
    num_pages: usize,
    logical_memory: Vec<u8>,
    page_table: PageTable,
}

impl Process {
    /// Build a process descriptor with its logical memory filled from
    /// `source`. The page table starts empty; the manager populates it
    /// while allocating frames.
    ///
    /// `size` must be positive; callers validate before construction.
    pub(crate) fn new(
        id: ProcessId,
        size: usize,
        frame_size: usize,
        source: &mut dyn ContentSource,
    ) -> Self {
        debug_assert!(size > 0, "process size must be positive");

        let mut logical_memory = vec![0u8; size];
        source.fill(&mut logical_memory);

        Process {
            id,
            size,
            frame_size,
            num_pages: size.div_ceil(frame_size),
            logical_memory,
            page_table: PageTable::new(),
        }
    }

    #[inline]
    pub fn id(&self) -> ProcessId {
        self.id
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    #[inline]
    pub fn num_pages(&self) -> usize {
        self.num_pages
    }

    #[inline]
    pub fn page_table(&self) -> &PageTable {
        &self.page_table
    }

    #[inline]
    pub(crate) fn page_table_mut(&mut self) -> &mut PageTable {
        &mut self.page_table
    }

    /// Bytes of one page of logical memory, or `None` if the page is out
    /// of range. The final page is shorter than `frame_size` whenever
    /// `size` is not a multiple of it.
    pub fn page_data(&self, page_number: usize) -> Option<&[u8]> {
        if page_number >= self.num_pages {
            return None;
        }

        let start = page_number * self.frame_size;
        let end = usize::min(start + self.frame_size, self.size);
        Some(&self.logical_memory[start..end])
    }

    /// Logical byte at `address`, or `None` if out of range.
    pub fn logical_byte(&self, address: usize) -> Option<u8> {
        self.logical_memory.get(address).copied()
    }
}

/// Test helper: fills buffers with 0, 1, 2, ... wrapping at 256.
#[cfg(test)]
pub(crate) struct SequentialContent;

#[cfg(test)]
impl ContentSource for SequentialContent {
    fn fill(&mut self, buf: &mut [u8]) {
        for (i, byte) in buf.iter_mut().enumerate() {
            *byte = (i % 256) as u8;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_count_rounds_up() {
        let mut source = SequentialContent;

        let exact = Process::new(1, 64, 32, &mut source);
        assert_eq!(exact.num_pages(), 2);

        let partial = Process::new(2, 100, 32, &mut source);
        assert_eq!(partial.num_pages(), 4);

        let single = Process::new(3, 1, 32, &mut source);
        assert_eq!(single.num_pages(), 1);
    }

    #[test]
    fn test_page_data_slicing() {
        let mut source = SequentialContent;
        let process = Process::new(1, 100, 32, &mut source);

        let page0 = process.page_data(0).unwrap();
        assert_eq!(page0.len(), 32);
        assert_eq!(page0[0], 0);
        assert_eq!(page0[31], 31);

        let page1 = process.page_data(1).unwrap();
        assert_eq!(page1[0], 32);

        // Final page holds only the 100 - 3*32 = 4 remaining bytes.
        let page3 = process.page_data(3).unwrap();
        assert_eq!(page3.len(), 4);
        assert_eq!(page3, &[96, 97, 98, 99]);
    }

    #[test]
    fn test_page_data_out_of_range() {
        let mut source = SequentialContent;
        let process = Process::new(1, 100, 32, &mut source);

        assert_eq!(process.page_data(4), None);
    }

    #[test]
    fn test_logical_byte() {
        let mut source = SequentialContent;
        let process = Process::new(1, 100, 32, &mut source);

        assert_eq!(process.logical_byte(0), Some(0));
        assert_eq!(process.logical_byte(99), Some(99));
        assert_eq!(process.logical_byte(100), None);
    }

    #[test]
    fn test_seeded_content_is_reproducible() {
        let mut a = RandomContent::with_seed(42);
        let mut b = RandomContent::with_seed(42);

        let mut buf_a = [0u8; 64];
        let mut buf_b = [0u8; 64];
        a.fill(&mut buf_a);
        b.fill(&mut buf_b);

        assert_eq!(buf_a, buf_b);
    }
}
