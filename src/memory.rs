use std::collections::{BTreeMap, BTreeSet};

use log::debug;

use crate::config::MemoryConfig;
use crate::error::MemoryError;
use crate::process::{ContentSource, Process, ProcessId, RandomContent};

/// Result of translating one logical address.
///
/// Every intermediate of the translation is kept so the caller can show
/// the full breakdown, not just the physical address.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Translation {
    pub logical_address: usize,
    pub page_number: usize,
    pub offset: usize,
    pub frame_number: usize,
    pub physical_address: usize,
    pub value: u8,
}

/// Snapshot of frame-pool utilization.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MemoryStats {
    pub total_frames: usize,
    pub free_frames: usize,
    pub used_frames: usize,
    pub percent_free: f64,
    pub percent_used: f64,
    pub num_processes: usize,
}

/// One roster line: a resident process and the frames it owns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessReport {
    pub id: ProcessId,
    pub size: usize,
    pub num_pages: usize,
    pub frames: Vec<usize>,
}

/// Physical memory, the frame pool, and the process roster.
///
/// Owns a byte array of `physical_size` bytes partitioned into
/// `total_frames` equal frames. Every frame is either in the free set or
/// owned by exactly one resident process's page; allocation is
/// all-or-nothing, so a process is fully resident or entirely absent.
///
/// Operations return structured values and never print; presentation is
/// the caller's job.
pub struct MemoryManager {
    config: MemoryConfig,
    physical_memory: Vec<u8>,
    /// Ascending iteration over the set yields the allocation order:
    /// lowest-numbered free frames first.
    free_frames: BTreeSet<usize>,
    frame_owners: BTreeMap<usize, ProcessId>,
    processes: BTreeMap<ProcessId, Process>,
    content: Box<dyn ContentSource>,
}

impl MemoryManager {
    /// Manager with the default random content source.
    pub fn new(config: MemoryConfig) -> Self {
        Self::with_content_source(config, Box::new(RandomContent::new()))
    }

    /// Manager with an injected content source, for deterministic
    /// logical memory in tests and reproducible runs.
    pub fn with_content_source(config: MemoryConfig, content: Box<dyn ContentSource>) -> Self {
        MemoryManager {
            config,
            physical_memory: vec![0u8; config.physical_size()],
            free_frames: (0..config.total_frames()).collect(),
            frame_owners: BTreeMap::new(),
            processes: BTreeMap::new(),
            content,
        }
    }

    /// Create a process of `size` bytes and load all of its pages.
    ///
    /// Frames are taken from the free pool lowest-numbered first, page 0
    /// getting the lowest. All checks run before the first mutation, so
    /// a failed call leaves the manager untouched.
    pub fn create_process(&mut self, id: ProcessId, size: usize) -> Result<(), MemoryError> {
        if self.processes.contains_key(&id) {
            return Err(MemoryError::DuplicateProcess(id));
        }
        if size > self.config.max_process_size() {
            return Err(MemoryError::SizeExceeded {
                size,
                max: self.config.max_process_size(),
            });
        }

        let frame_size = self.config.frame_size();
        let pages_needed = size.div_ceil(frame_size);
        if self.free_frames.len() < pages_needed {
            return Err(MemoryError::InsufficientMemory {
                needed: pages_needed,
                available: self.free_frames.len(),
            });
        }

        let mut process = Process::new(id, size, frame_size, self.content.as_mut());

        let frames: Vec<usize> = self.free_frames.iter().take(pages_needed).copied().collect();
        for (page_number, &frame_number) in frames.iter().enumerate() {
            self.free_frames.remove(&frame_number);
            self.frame_owners.insert(frame_number, id);
            process.page_table_mut().add_entry(frame_number);

            let data = process
                .page_data(page_number)
                .expect("page index below num_pages");
            let frame_start = frame_number * frame_size;
            self.physical_memory[frame_start..frame_start + data.len()].copy_from_slice(data);
        }

        debug!("process {id}: {size} bytes loaded into frames {frames:?}");
        self.processes.insert(id, process);
        Ok(())
    }

    /// Remove a resident process, zero its frames, and return them to
    /// the free pool.
    ///
    /// Zeroing is mandatory: a reused frame must never expose the
    /// previous owner's bytes.
    pub fn remove_process(&mut self, id: ProcessId) -> Result<(), MemoryError> {
        let process = self
            .processes
            .remove(&id)
            .ok_or(MemoryError::ProcessNotFound(id))?;

        let frame_size = self.config.frame_size();
        for frame_number in process.page_table().frames() {
            let frame_start = frame_number * frame_size;
            self.physical_memory[frame_start..frame_start + frame_size].fill(0);
            self.frame_owners.remove(&frame_number);
            self.free_frames.insert(frame_number);
        }

        debug!("process {id}: removed, {} frames freed", process.num_pages());
        Ok(())
    }

    /// Translate a logical address and read the byte stored there.
    /// Never mutates state.
    pub fn translate(
        &self,
        id: ProcessId,
        logical_address: usize,
    ) -> Result<Translation, MemoryError> {
        let process = self
            .processes
            .get(&id)
            .ok_or(MemoryError::ProcessNotFound(id))?;

        if logical_address >= process.size() {
            return Err(MemoryError::AddressOutOfRange {
                address: logical_address,
                size: process.size(),
            });
        }

        let frame_size = self.config.frame_size();
        let page_number = logical_address / frame_size;
        let offset = logical_address % frame_size;

        // All-or-nothing allocation maps every in-range page, so a miss
        // here is a broken invariant, not a user error.
        let frame_number = process
            .page_table()
            .lookup(page_number)
            .expect("resident process maps every in-range page");

        let physical_address = frame_number * frame_size + offset;
        Ok(Translation {
            logical_address,
            page_number,
            offset,
            frame_number,
            physical_address,
            value: self.physical_memory[physical_address],
        })
    }

    /// Frame-pool utilization snapshot.
    pub fn statistics(&self) -> MemoryStats {
        let total_frames = self.config.total_frames();
        let free_frames = self.free_frames.len();
        let used_frames = total_frames - free_frames;

        MemoryStats {
            total_frames,
            free_frames,
            used_frames,
            percent_free: free_frames as f64 / total_frames as f64 * 100.0,
            percent_used: used_frames as f64 / total_frames as f64 * 100.0,
            num_processes: self.processes.len(),
        }
    }

    /// A process's page table as ordered `(page, frame)` pairs.
    pub fn page_table(&self, id: ProcessId) -> Result<Vec<(usize, usize)>, MemoryError> {
        let process = self
            .processes
            .get(&id)
            .ok_or(MemoryError::ProcessNotFound(id))?;

        Ok(process.page_table().frames().enumerate().collect())
    }

    /// All resident processes, sorted by id.
    pub fn processes(&self) -> Vec<ProcessReport> {
        self.processes
            .values()
            .map(|p| ProcessReport {
                id: p.id(),
                size: p.size(),
                num_pages: p.num_pages(),
                frames: p.page_table().frames().collect(),
            })
            .collect()
    }

    /// Resident process descriptor, if any.
    pub fn process(&self, id: ProcessId) -> Option<&Process> {
        self.processes.get(&id)
    }

    /// Owner of a frame, or `None` if the frame is free.
    pub fn frame_owner(&self, frame_number: usize) -> Option<ProcessId> {
        self.frame_owners.get(&frame_number).copied()
    }

    /// The bytes of one frame.
    pub fn frame_data(&self, frame_number: usize) -> &[u8] {
        let frame_size = self.config.frame_size();
        let start = frame_number * frame_size;
        &self.physical_memory[start..start + frame_size]
    }

    #[inline]
    pub fn config(&self) -> &MemoryConfig {
        &self.config
    }

    #[inline]
    pub fn total_frames(&self) -> usize {
        self.config.total_frames()
    }

    #[inline]
    pub fn frame_size(&self) -> usize {
        self.config.frame_size()
    }

    #[inline]
    pub fn physical_size(&self) -> usize {
        self.config.physical_size()
    }

    #[inline]
    pub fn free_frame_count(&self) -> usize {
        self.free_frames.len()
    }

    /// Raw physical memory, for state comparisons in tests.
    pub fn physical_memory(&self) -> &[u8] {
        &self.physical_memory
    }
}
