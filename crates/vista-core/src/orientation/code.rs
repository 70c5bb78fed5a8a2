use std::fmt;

use serde::{Deserialize, Serialize};

use crate::geometry::Affine;

/// Embedded orientation tag (1-8) describing how a stored raster must be
/// rotated or mirrored to appear upright.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum OrientationCode {
    /// 1: already upright.
    #[default]
    Upright = 1,
    /// 2: mirror horizontally.
    MirrorHorizontal = 2,
    /// 3: rotate 180°.
    Rotate180 = 3,
    /// 4: mirror vertically.
    MirrorVertical = 4,
    /// 5: mirror horizontally + rotate 90° (reflect over the main diagonal).
    Transpose = 5,
    /// 6: rotate 90° clockwise.
    Rotate90 = 6,
    /// 7: mirror horizontally + rotate 270° (reflect over the anti-diagonal).
    Transverse = 7,
    /// 8: rotate 270° clockwise.
    Rotate270 = 8,
}

/// One row of the orientation table.
///
/// The forward transform maps source coordinates into the upright
/// destination. Its linear part is fixed; the translation is expressed as
/// multiples of the *source* width and height.
#[derive(Clone, Copy, Debug)]
pub struct OrientationTransform {
    /// Destination is `height x width` of the source.
    pub swaps_axes: bool,
    /// `(a, b, c, d)` of the canvas-order matrix.
    pub linear: [f64; 4],
    /// `e = tx[0]*w + tx[1]*h`.
    pub tx: [f64; 2],
    /// `f = ty[0]*w + ty[1]*h`.
    pub ty: [f64; 2],
}

/// Indexed by `code - 1`.
const TABLE: [OrientationTransform; 8] = [
    // 1
    OrientationTransform {
        swaps_axes: false,
        linear: [1.0, 0.0, 0.0, 1.0],
        tx: [0.0, 0.0],
        ty: [0.0, 0.0],
    },
    // 2: x' = w - x
    OrientationTransform {
        swaps_axes: false,
        linear: [-1.0, 0.0, 0.0, 1.0],
        tx: [1.0, 0.0],
        ty: [0.0, 0.0],
    },
    // 3: x' = w - x, y' = h - y
    OrientationTransform {
        swaps_axes: false,
        linear: [-1.0, 0.0, 0.0, -1.0],
        tx: [1.0, 0.0],
        ty: [0.0, 1.0],
    },
    // 4: y' = h - y
    OrientationTransform {
        swaps_axes: false,
        linear: [1.0, 0.0, 0.0, -1.0],
        tx: [0.0, 0.0],
        ty: [0.0, 1.0],
    },
    // 5: x' = y, y' = x
    OrientationTransform {
        swaps_axes: true,
        linear: [0.0, 1.0, 1.0, 0.0],
        tx: [0.0, 0.0],
        ty: [0.0, 0.0],
    },
    // 6: x' = h - y, y' = x
    OrientationTransform {
        swaps_axes: true,
        linear: [0.0, 1.0, -1.0, 0.0],
        tx: [0.0, 1.0],
        ty: [0.0, 0.0],
    },
    // 7: x' = h - y, y' = w - x
    OrientationTransform {
        swaps_axes: true,
        linear: [0.0, -1.0, -1.0, 0.0],
        tx: [0.0, 1.0],
        ty: [1.0, 0.0],
    },
    // 8: x' = y, y' = w - x
    OrientationTransform {
        swaps_axes: true,
        linear: [0.0, -1.0, 1.0, 0.0],
        tx: [0.0, 0.0],
        ty: [1.0, 0.0],
    },
];

impl OrientationCode {
    pub const ALL: [Self; 8] = [
        Self::Upright,
        Self::MirrorHorizontal,
        Self::Rotate180,
        Self::MirrorVertical,
        Self::Transpose,
        Self::Rotate90,
        Self::Transverse,
        Self::Rotate270,
    ];

    /// Returns `None` for values outside 1..=8.
    pub fn new(value: u16) -> Option<Self> {
        if (1..=8).contains(&value) {
            Some(Self::ALL[(value - 1) as usize])
        } else {
            None
        }
    }

    pub fn value(self) -> u8 {
        self as u8
    }

    pub fn is_upright(self) -> bool {
        self == Self::Upright
    }

    /// Whether correcting this orientation swaps width and height.
    ///
    /// Both the pre-normalization size check and the normalizer read this.
    pub fn swaps_axes(self) -> bool {
        self.table_entry().swaps_axes
    }

    /// The orientation that undoes this one.
    pub fn inverse(self) -> Self {
        match self {
            Self::Rotate90 => Self::Rotate270,
            Self::Rotate270 => Self::Rotate90,
            other => other,
        }
    }

    pub fn table_entry(self) -> &'static OrientationTransform {
        &TABLE[(self.value() - 1) as usize]
    }

    /// Upright dimensions for a source of `width x height`.
    pub fn oriented_dimensions(self, width: u32, height: u32) -> (u32, u32) {
        if self.swaps_axes() {
            (height, width)
        } else {
            (width, height)
        }
    }

    /// Forward transform from source to upright coordinates for a source of
    /// `width x height`.
    pub fn transform(self, width: u32, height: u32) -> Affine {
        let entry = self.table_entry();
        let (w, h) = (width as f64, height as f64);
        let [a, b, c, d] = entry.linear;
        Affine::new(
            a,
            b,
            c,
            d,
            entry.tx[0] * w + entry.tx[1] * h,
            entry.ty[0] * w + entry.ty[1] * h,
        )
    }
}

impl fmt::Display for OrientationCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Upright => "upright",
            Self::MirrorHorizontal => "mirror horizontal",
            Self::Rotate180 => "rotate 180",
            Self::MirrorVertical => "mirror vertical",
            Self::Transpose => "transpose",
            Self::Rotate90 => "rotate 90",
            Self::Transverse => "transverse",
            Self::Rotate270 => "rotate 270",
        };
        write!(f, "{} ({})", self.value(), label)
    }
}
