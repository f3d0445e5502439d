//! Animation function curves
//!
//! A curve is one of eleven fixed-layout variants selected by its first
//! byte. Every variant starts with the same 20-byte prefix: the variant id,
//! a range-check byte, two bytes of padding, and a 16-byte output region
//! that holds either a scalar bound pair or four BGRA color stops.
//!
//! Curves only appear in second-generation tags and are always little-endian.

mod codec;

use crate::error::{Error, Result};
use crate::formats::common::{Bgra, Point2};

/// Bytes shared by every variant: id, range check, padding, output region
pub const CURVE_PREFIX_SIZE: usize = 20;

/// Reserved bytes carried by `multi_linear_key`
pub const MULTI_LINEAR_KEY_RESERVED: usize = 256;

/// Reserved bytes carried by `multi_spline`
pub const MULTI_SPLINE_RESERVED: usize = 32;

/// Curve variant discriminant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum CurveKind {
    Identity = 0,
    Constant = 1,
    Transition = 2,
    Periodic = 3,
    Linear = 4,
    LinearKey = 5,
    MultiLinearKey = 6,
    Spline = 7,
    MultiSpline = 8,
    Exponent = 9,
    Spline2 = 10,
}

impl CurveKind {
    pub const ALL: [CurveKind; 11] = [
        CurveKind::Identity,
        CurveKind::Constant,
        CurveKind::Transition,
        CurveKind::Periodic,
        CurveKind::Linear,
        CurveKind::LinearKey,
        CurveKind::MultiLinearKey,
        CurveKind::Spline,
        CurveKind::MultiSpline,
        CurveKind::Exponent,
        CurveKind::Spline2,
    ];

    pub fn from_u8(value: u8) -> Result<Self> {
        Self::ALL
            .get(value as usize)
            .copied()
            .ok_or_else(|| Error::unknown_enum("function type", value))
    }

    /// Encoded size in bytes, including the shared prefix.
    ///
    /// Identical for scalar and color outputs.
    pub const fn size(self) -> usize {
        match self {
            CurveKind::Identity => 20,
            CurveKind::Constant => 28,
            CurveKind::Transition => 36,
            CurveKind::Periodic => 52,
            CurveKind::Linear => 68,
            CurveKind::LinearKey => 180,
            CurveKind::MultiLinearKey => 276,
            CurveKind::Spline => 116,
            CurveKind::MultiSpline => 52,
            CurveKind::Exponent => 44,
            CurveKind::Spline2 => 116,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            CurveKind::Identity => "identity",
            CurveKind::Constant => "constant",
            CurveKind::Transition => "transition",
            CurveKind::Periodic => "periodic",
            CurveKind::Linear => "linear",
            CurveKind::LinearKey => "linear_key",
            CurveKind::MultiLinearKey => "multi_linear_key",
            CurveKind::Spline => "spline",
            CurveKind::MultiSpline => "multi_spline",
            CurveKind::Exponent => "exponent",
            CurveKind::Spline2 => "spline2",
        }
    }
}

/// Easing used by `transition` curves
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum TransitionShape {
    #[default]
    Linear = 0,
    Early = 1,
    VeryEarly = 2,
    Late = 3,
    VeryLate = 4,
    Cosine = 5,
    One = 6,
    Zero = 7,
}

impl TransitionShape {
    pub fn from_u8(value: u8) -> Result<Self> {
        Ok(match value {
            0 => TransitionShape::Linear,
            1 => TransitionShape::Early,
            2 => TransitionShape::VeryEarly,
            3 => TransitionShape::Late,
            4 => TransitionShape::VeryLate,
            5 => TransitionShape::Cosine,
            6 => TransitionShape::One,
            7 => TransitionShape::Zero,
            _ => return Err(Error::unknown_enum("transition function", value)),
        })
    }
}

/// Wave used by `periodic` curves
///
/// Shares its numbering with the first-generation animation function enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum PeriodicShape {
    #[default]
    One = 0,
    Zero = 1,
    Cosine = 2,
    CosineVariablePeriod = 3,
    DiagonalWave = 4,
    DiagonalWaveVariablePeriod = 5,
    Slide = 6,
    SlideVariablePeriod = 7,
    Noise = 8,
    Jitter = 9,
    Wander = 10,
    Spark = 11,
}

impl PeriodicShape {
    pub fn from_u8(value: u8) -> Result<Self> {
        Ok(match value {
            0 => PeriodicShape::One,
            1 => PeriodicShape::Zero,
            2 => PeriodicShape::Cosine,
            3 => PeriodicShape::CosineVariablePeriod,
            4 => PeriodicShape::DiagonalWave,
            5 => PeriodicShape::DiagonalWaveVariablePeriod,
            6 => PeriodicShape::Slide,
            7 => PeriodicShape::SlideVariablePeriod,
            8 => PeriodicShape::Noise,
            9 => PeriodicShape::Jitter,
            10 => PeriodicShape::Wander,
            11 => PeriodicShape::Spark,
            _ => return Err(Error::unknown_enum("periodic function", value)),
        })
    }
}

/// Number of color stops a color output interpolates across
///
/// Every range-check value above 1 selects color stops. Values past 4 have
/// no stop count of their own and are kept as read so they encode unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorMode {
    TwoColor,
    ThreeColor,
    FourColor,
    Other(u8),
}

impl ColorMode {
    /// `None` for the scalar range checks 0 and 1.
    pub fn from_range_check(value: u8) -> Option<Self> {
        match value {
            0 | 1 => None,
            2 => Some(ColorMode::TwoColor),
            3 => Some(ColorMode::ThreeColor),
            4 => Some(ColorMode::FourColor),
            other => Some(ColorMode::Other(other)),
        }
    }

    pub fn range_check(self) -> u8 {
        match self {
            ColorMode::TwoColor => 2,
            ColorMode::ThreeColor => 3,
            ColorMode::FourColor => 4,
            ColorMode::Other(value) => value,
        }
    }
}

/// The 16-byte output region, selected by the range-check byte.
///
/// Range check 0 and 1 are scalar (1 = ranged), anything above is color.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CurveOutput {
    Scalar { ranged: bool, lower: f32, upper: f32 },
    /// Stops `color_a` through `color_d`
    Color { mode: ColorMode, stops: [Bgra; 4] },
}

impl CurveOutput {
    pub fn range_check(&self) -> u8 {
        match self {
            CurveOutput::Scalar { ranged, .. } => u8::from(*ranged),
            CurveOutput::Color { mode, .. } => mode.range_check(),
        }
    }

    pub fn is_color(&self) -> bool {
        matches!(self, CurveOutput::Color { .. })
    }
}

/// Parameters of a `periodic` curve
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PeriodicCurve {
    pub input: PeriodicShape,
    pub range: PeriodicShape,
    pub frequency: f32,
    pub phase: f32,
    pub input_min: f32,
    pub input_max: f32,
    pub range_min: f32,
    pub range_max: f32,
}

/// Parameters of an `exponent` curve
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ExponentCurve {
    pub input_min: f32,
    pub input_max: f32,
    pub input_exponent: f32,
    pub range_min: f32,
    pub range_max: f32,
    pub range_exponent: f32,
}

/// Variant-specific payload following the shared prefix.
///
/// `multi_linear_key` and `multi_spline` store no inline points; their
/// reserved bytes are kept verbatim.
#[derive(Debug, Clone, PartialEq)]
pub enum CurveShape {
    Identity,
    Constant,
    Transition {
        input: TransitionShape,
        range: TransitionShape,
        min: f32,
        max: f32,
    },
    Periodic(PeriodicCurve),
    Linear {
        input: [Point2; 2],
        range: [Point2; 2],
    },
    LinearKey {
        input: [Point2; 4],
        range: [Point2; 4],
    },
    MultiLinearKey {
        reserved: Box<[u8; MULTI_LINEAR_KEY_RESERVED]>,
    },
    Spline {
        input: [Point2; 4],
        range: [Point2; 4],
    },
    MultiSpline {
        reserved: [u8; MULTI_SPLINE_RESERVED],
    },
    Exponent(ExponentCurve),
    Spline2 {
        input: [Point2; 4],
        range: [Point2; 4],
    },
}

impl CurveShape {
    pub fn kind(&self) -> CurveKind {
        match self {
            CurveShape::Identity => CurveKind::Identity,
            CurveShape::Constant => CurveKind::Constant,
            CurveShape::Transition { .. } => CurveKind::Transition,
            CurveShape::Periodic(_) => CurveKind::Periodic,
            CurveShape::Linear { .. } => CurveKind::Linear,
            CurveShape::LinearKey { .. } => CurveKind::LinearKey,
            CurveShape::MultiLinearKey { .. } => CurveKind::MultiLinearKey,
            CurveShape::Spline { .. } => CurveKind::Spline,
            CurveShape::MultiSpline { .. } => CurveKind::MultiSpline,
            CurveShape::Exponent(_) => CurveKind::Exponent,
            CurveShape::Spline2 { .. } => CurveKind::Spline2,
        }
    }
}

/// An animated scalar or color.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionCurve {
    pub output: CurveOutput,
    pub shape: CurveShape,
}

impl FunctionCurve {
    /// Constant scalar curve holding `value`.
    pub fn constant(value: f32) -> Self {
        Self {
            output: CurveOutput::Scalar {
                ranged: false,
                lower: value,
                upper: value,
            },
            shape: CurveShape::Constant,
        }
    }

    /// Constant color curve over `stops`.
    pub fn constant_color(mode: ColorMode, stops: [Bgra; 4]) -> Self {
        Self {
            output: CurveOutput::Color { mode, stops },
            shape: CurveShape::Constant,
        }
    }

    pub fn periodic(output: CurveOutput, periodic: PeriodicCurve) -> Self {
        Self {
            output,
            shape: CurveShape::Periodic(periodic),
        }
    }

    pub fn kind(&self) -> CurveKind {
        self.shape.kind()
    }

    /// Encoded size, derived from the variant.
    pub fn size(&self) -> usize {
        self.kind().size()
    }
}
