//! Core types for spark-lifecycle.
//!
//! Size specs are the one-dimensional constraints that flow from a parent to
//! a child during measurement. They are translated to and from Taffy's
//! `known_dimensions` / `AvailableSpace` pair at the engine boundary.

use std::fmt;

use taffy::AvailableSpace;

// =============================================================================
// Size Specs
// =============================================================================

/// How a [`SizeSpec`] constrains its dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SizeSpecMode {
    /// No constraint; the child picks its own size.
    #[default]
    Unspecified,
    /// The child must be exactly `size`.
    Exactly,
    /// The child may be at most `size`.
    AtMost,
}

/// A one-dimensional layout constraint: magnitude plus mode.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SizeSpec {
    size: f32,
    mode: SizeSpecMode,
}

impl SizeSpec {
    /// Unconstrained spec (size 0, mode unspecified).
    pub const UNSPECIFIED: Self = Self {
        size: 0.0,
        mode: SizeSpecMode::Unspecified,
    };

    pub const fn new(size: f32, mode: SizeSpecMode) -> Self {
        Self { size, mode }
    }

    pub const fn exactly(size: f32) -> Self {
        Self::new(size, SizeSpecMode::Exactly)
    }

    pub const fn at_most(size: f32) -> Self {
        Self::new(size, SizeSpecMode::AtMost)
    }

    pub const fn size(self) -> f32 {
        self.size
    }

    pub const fn mode(self) -> SizeSpecMode {
        self.mode
    }

    /// Clamp a desired size to this spec.
    ///
    /// `Exactly` wins outright, `AtMost` caps, `Unspecified` passes through.
    pub fn resolve_size(self, desired: f32) -> f32 {
        match self.mode {
            SizeSpecMode::Exactly => self.size,
            SizeSpecMode::AtMost => desired.min(self.size),
            SizeSpecMode::Unspecified => desired,
        }
    }

    /// Build a spec from the constraints Taffy hands to a measure function.
    ///
    /// A known dimension is exact. Definite available space is an upper
    /// bound. Min/max-content queries carry no bound.
    pub fn from_engine(known: Option<f32>, available: AvailableSpace) -> Self {
        if let Some(size) = known {
            return Self::exactly(size);
        }
        match available {
            AvailableSpace::Definite(size) => Self::at_most(size),
            AvailableSpace::MinContent | AvailableSpace::MaxContent => Self::UNSPECIFIED,
        }
    }

    /// The available space to offer Taffy for this spec.
    pub fn to_available_space(self) -> AvailableSpace {
        match self.mode {
            SizeSpecMode::Exactly | SizeSpecMode::AtMost => AvailableSpace::Definite(self.size),
            SizeSpecMode::Unspecified => AvailableSpace::MaxContent,
        }
    }
}

impl fmt::Display for SizeSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.mode {
            SizeSpecMode::Exactly => write!(f, "EXACTLY {}", self.size),
            SizeSpecMode::AtMost => write!(f, "AT_MOST {}", self.size),
            SizeSpecMode::Unspecified => write!(f, "UNSPECIFIED"),
        }
    }
}

// =============================================================================
// Mount Type
// =============================================================================

/// What a component ultimately mounts, if anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MountType {
    /// Pure layout spec: composes other components, mounts nothing.
    #[default]
    None,
    Drawable,
    View,
}

impl MountType {
    /// True for kinds that render a drawable or view.
    pub const fn is_mount_spec(self) -> bool {
        !matches!(self, MountType::None)
    }
}

// =============================================================================
// Measurement
// =============================================================================

/// Mutable size slot handed to `on_measure`.
///
/// Both dimensions start unset; a mount spec must fill both.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MeasureOutput {
    pub width: Option<f32>,
    pub height: Option<f32>,
}

impl MeasureOutput {
    pub fn set(&mut self, width: f32, height: f32) {
        self.width = Some(width);
        self.height = Some(height);
    }

    /// The measured size, if both dimensions were written.
    pub fn size(&self) -> Option<MeasuredSize> {
        Some(MeasuredSize::new(self.width?, self.height?))
    }
}

/// Result of measuring a node: exactly a width and a height.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MeasuredSize {
    pub width: f32,
    pub height: f32,
}

impl MeasuredSize {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

impl From<MeasuredSize> for taffy::Size<f32> {
    fn from(size: MeasuredSize) -> Self {
        taffy::Size {
            width: size.width,
            height: size.height,
        }
    }
}
