//! Session configuration types
//!
//! Pure data with clamping constructors, safe for WebAssembly. Both the
//! terminal host and web front-ends build a session from these.

/// Slowest tempo the transport accepts
pub const MIN_BPM: f32 = 60.0;
/// Fastest tempo the transport accepts
pub const MAX_BPM: f32 = 200.0;
/// Tempo used when nothing else is configured
pub const DEFAULT_BPM: f32 = 120.0;
/// Output gain used when nothing else is configured
pub const DEFAULT_VOLUME: f32 = 0.8;
/// Pattern loaded into a fresh session
pub const DEFAULT_PATTERN: &str = r#"s("bd sd hh sd")"#;

/// Clamp a tempo into the supported range
pub fn clamp_bpm(bpm: f32) -> f32 {
    if bpm.is_nan() {
        return DEFAULT_BPM;
    }
    bpm.clamp(MIN_BPM, MAX_BPM)
}

/// Clamp a gain into 0.0-1.0
pub fn clamp_volume(volume: f32) -> f32 {
    if volume.is_nan() {
        return DEFAULT_VOLUME;
    }
    volume.clamp(0.0, 1.0)
}

/// Starting state of a sequencer session
///
/// - `bpm`: tempo in beats per minute (60-200)
/// - `volume`: output gain (0.0-1.0)
/// - `pattern`: initial pattern text
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SessionConfig {
    pub bpm: f32,
    pub volume: f32,
    pub pattern: String,
}

impl SessionConfig {
    /// Create a config, clamping tempo and volume into range
    pub fn new(bpm: f32, volume: f32, pattern: impl Into<String>) -> Self {
        Self {
            bpm: clamp_bpm(bpm),
            volume: clamp_volume(volume),
            pattern: pattern.into(),
        }
    }

    /// Same config with a different starting pattern
    pub fn with_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.pattern = pattern.into();
        self
    }

    /// Cycles per second for the engine: one cycle is four beats
    pub fn cps(&self) -> f32 {
        self.bpm / 60.0 / 4.0
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BPM, DEFAULT_VOLUME, DEFAULT_PATTERN)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SessionConfig::default();
        assert_eq!(config.bpm, 120.0);
        assert_eq!(config.volume, 0.8);
        assert_eq!(config.pattern, r#"s("bd sd hh sd")"#);
    }

    #[test]
    fn test_clamping() {
        let config = SessionConfig::new(500.0, -1.0, "");
        assert_eq!(config.bpm, MAX_BPM);
        assert_eq!(config.volume, 0.0);
        assert_eq!(clamp_bpm(10.0), MIN_BPM);
        assert_eq!(clamp_bpm(f32::NAN), DEFAULT_BPM);
        assert_eq!(clamp_volume(3.0), 1.0);
    }

    #[test]
    fn test_cps() {
        // 120 BPM, four beats per cycle = half a cycle per second
        assert_eq!(SessionConfig::default().cps(), 0.5);
    }
}
