//! Decoder configuration

/// Configuration for decoding
#[derive(Debug, Clone, Default)]
pub struct DecoderConfig {
    /// Maximum frame size limit in pixels (0 = no limit)
    pub(crate) frame_size_limit: u64,
}

impl DecoderConfig {
    /// Create a new decoder configuration with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set maximum frame size limit in total pixels
    ///
    /// If width * height exceeds this limit, decoding fails before any
    /// pixel storage is allocated. 0 means no limit.
    pub fn frame_size_limit(mut self, limit: u64) -> Self {
        self.frame_size_limit = limit;
        self
    }

    /// Check a frame size against the configured limit.
    pub(crate) fn check_frame_size(&self, width: u32, height: u32) -> crate::IoResult<()> {
        let limit = self.frame_size_limit;
        if limit != 0 && width as u64 * height as u64 > limit {
            return Err(crate::IoError::ImageTooLarge {
                width,
                height,
                limit,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_has_no_limit() {
        assert!(DecoderConfig::new().check_frame_size(60000, 60000).is_ok());
    }

    #[test]
    fn test_frame_size_limit() {
        let config = DecoderConfig::new().frame_size_limit(100);
        assert!(config.check_frame_size(10, 10).is_ok());
        assert!(matches!(
            config.check_frame_size(10, 11),
            Err(crate::IoError::ImageTooLarge { limit: 100, .. })
        ));
    }
}
