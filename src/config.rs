use thiserror::Error;

/// Errors raised while validating the sizing triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("physical memory size {0} is not a power of two")]
    PhysicalSizeNotPowerOfTwo(usize),
    #[error("frame size {0} is not a power of two")]
    FrameSizeNotPowerOfTwo(usize),
    #[error("max process size {0} is not a power of two")]
    MaxProcessSizeNotPowerOfTwo(usize),
    #[error("frame size {frame_size} exceeds physical memory size {physical_size}")]
    FrameLargerThanMemory {
        frame_size: usize,
        physical_size: usize,
    },
    #[error("max process size {max_process_size} exceeds physical memory size {physical_size}")]
    ProcessLargerThanMemory {
        max_process_size: usize,
        physical_size: usize,
    },
}

/// Validated sizing parameters for one simulation.
///
/// All three sizes are byte counts and must be powers of two. The values
/// are fixed for the lifetime of the `MemoryManager` built from them, so
/// independent managers (and isolated tests) can each carry their own.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemoryConfig {
    physical_size: usize,
    frame_size: usize,
    max_process_size: usize,
}

impl MemoryConfig {
    pub fn new(
        physical_size: usize,
        frame_size: usize,
        max_process_size: usize,
    ) -> Result<Self, ConfigError> {
        if !physical_size.is_power_of_two() {
            return Err(ConfigError::PhysicalSizeNotPowerOfTwo(physical_size));
        }
        if !frame_size.is_power_of_two() {
            return Err(ConfigError::FrameSizeNotPowerOfTwo(frame_size));
        }
        if !max_process_size.is_power_of_two() {
            return Err(ConfigError::MaxProcessSizeNotPowerOfTwo(max_process_size));
        }
        if frame_size > physical_size {
            return Err(ConfigError::FrameLargerThanMemory {
                frame_size,
                physical_size,
            });
        }
        if max_process_size > physical_size {
            return Err(ConfigError::ProcessLargerThanMemory {
                max_process_size,
                physical_size,
            });
        }

        Ok(MemoryConfig {
            physical_size,
            frame_size,
            max_process_size,
        })
    }

    #[inline]
    pub fn physical_size(&self) -> usize {
        self.physical_size
    }

    #[inline]
    pub fn frame_size(&self) -> usize {
        self.frame_size
    }

    #[inline]
    pub fn max_process_size(&self) -> usize {
        self.max_process_size
    }

    /// Number of frames the physical memory is partitioned into.
    ///
    /// Exact because both sizes are powers of two with
    /// `frame_size <= physical_size`.
    #[inline]
    pub fn total_frames(&self) -> usize {
        self.physical_size / self.frame_size
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_configuration() {
        let config = MemoryConfig::new(256, 32, 128).unwrap();
        assert_eq!(config.physical_size(), 256);
        assert_eq!(config.frame_size(), 32);
        assert_eq!(config.max_process_size(), 128);
        assert_eq!(config.total_frames(), 8);
    }

    #[test]
    fn test_rejects_non_power_of_two_physical_size() {
        assert_eq!(
            MemoryConfig::new(300, 32, 128),
            Err(ConfigError::PhysicalSizeNotPowerOfTwo(300))
        );
    }

    #[test]
    fn test_rejects_non_power_of_two_frame_size() {
        assert_eq!(
            MemoryConfig::new(256, 33, 128),
            Err(ConfigError::FrameSizeNotPowerOfTwo(33))
        );
    }

    #[test]
    fn test_rejects_non_power_of_two_max_process_size() {
        assert_eq!(
            MemoryConfig::new(256, 32, 100),
            Err(ConfigError::MaxProcessSizeNotPowerOfTwo(100))
        );
    }

    #[test]
    fn test_rejects_zero_sizes() {
        // Zero is not a power of two, so all three positions reject it.
        assert!(MemoryConfig::new(0, 32, 128).is_err());
        assert!(MemoryConfig::new(256, 0, 128).is_err());
        assert!(MemoryConfig::new(256, 32, 0).is_err());
    }

    #[test]
    fn test_rejects_frame_larger_than_memory() {
        assert_eq!(
            MemoryConfig::new(256, 512, 128),
            Err(ConfigError::FrameLargerThanMemory {
                frame_size: 512,
                physical_size: 256,
            })
        );
    }

    #[test]
    fn test_rejects_max_process_larger_than_memory() {
        assert_eq!(
            MemoryConfig::new(256, 32, 512),
            Err(ConfigError::ProcessLargerThanMemory {
                max_process_size: 512,
                physical_size: 256,
            })
        );
    }

    #[test]
    fn test_frame_size_may_equal_physical_size() {
        let config = MemoryConfig::new(256, 256, 256).unwrap();
        assert_eq!(config.total_frames(), 1);
    }
}
