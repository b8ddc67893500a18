//! Dashboard controls: filter mode, byte slider and the resulting selection.

use clap::ValueEnum;
use std::fmt;

/// Which filter the Visualizations section applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FilterMode {
    /// Match one source IP
    #[value(name = "ip")]
    ByIp,
    /// Rows above a byte threshold
    #[value(name = "bytes")]
    ByBytes,
}

impl FilterMode {
    /// Modes in selector order.
    pub const ALL: [Self; 2] = [Self::ByIp, Self::ByBytes];
}

impl fmt::Display for FilterMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ByIp => f.write_str("By IP"),
            Self::ByBytes => f.write_str("By Bytes"),
        }
    }
}

/// A bounded integer slider with a fixed step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slider {
    pub min: u64,
    pub max: u64,
    pub step: u64,
}

/// "Subset Data By Bytes Greater Than" slider.
pub const BYTES_SLIDER: Slider = Slider {
    min: 10_000,
    max: 1_000_000,
    step: 25_000,
};

impl Slider {
    /// Largest reachable position.
    pub const fn last(&self) -> u64 {
        self.min + (self.max - self.min) / self.step * self.step
    }

    /// Returns true if `value` is a slider position.
    pub const fn contains(&self, value: u64) -> bool {
        value >= self.min && value <= self.max && (value - self.min) % self.step == 0
    }

    /// Nearest slider position to `value`.
    pub const fn snap(&self, value: u64) -> u64 {
        if value <= self.min {
            return self.min;
        }
        let offset = value - self.min;
        let down = self.min + offset / self.step * self.step;
        let up = down + self.step;
        let nearest = if offset % self.step * 2 >= self.step { up } else { down };
        if nearest > self.last() {
            self.last()
        } else {
            nearest
        }
    }

    /// Check a typed value, for prompt validation.
    pub fn validate(&self, value: u64) -> Result<(), String> {
        if self.contains(value) {
            Ok(())
        } else {
            Err(format!(
                "choose a value from {} to {} in steps of {} (nearest: {})",
                self.min,
                self.last(),
                self.step,
                self.snap(value)
            ))
        }
    }
}

/// The query the Visualizations section issues.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    /// `GET /data/{threshold}`
    Bytes(u64),
    /// `POST /data/ip`
    Ip(String),
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bytes(t) => write!(f, "Bytes > {t}"),
            Self::Ip(ip) => write!(f, "IP = {ip}"),
        }
    }
}
